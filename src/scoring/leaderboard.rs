use std::cmp::Ordering;

use super::engine::score_prediction;
use super::types::{Championship, Participant, Prediction, ScoreResult, ScoringMethod, StandingEntry};

/// One participant's row on a leaderboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardRow {
    pub participant: Participant,
    pub driver_score: Option<u32>,
    pub constructor_score: Option<u32>,
    pub total: u32,
    /// Full result, present only when the participant submitted a prediction
    /// for a single-championship leaderboard.
    pub result: Option<ScoreResult>,
}

/// Ranked rows plus the ids of everyone sharing the winning score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaderboard {
    pub method: ScoringMethod,
    pub rows: Vec<LeaderboardRow>,
    pub winners: Vec<String>,
}

fn find_prediction<'a>(predictions: &'a [Prediction], participant_id: &str) -> Option<&'a Prediction> {
    predictions.iter().find(|p| p.participant_id == participant_id)
}

/// Rank participants on one championship.
///
/// Participants without a prediction score 0 under either method.
pub fn rank_championship(
    participants: &[Participant],
    predictions: &[Prediction],
    standings: &[StandingEntry],
    championship: Championship,
    method: ScoringMethod,
) -> Leaderboard {
    let rows = participants
        .iter()
        .map(|participant| {
            let result = find_prediction(predictions, &participant.id)
                .map(|p| score_prediction(p, standings, championship));
            let total = result.as_ref().map(|r| r.score(method)).unwrap_or(0);
            let (driver_score, constructor_score) = match championship {
                Championship::Drivers => (Some(total), None),
                Championship::Constructors => (None, Some(total)),
            };
            LeaderboardRow {
                participant: participant.clone(),
                driver_score,
                constructor_score,
                total,
                result,
            }
        })
        .collect();

    finish(rows, method)
}

/// Rank participants on the sum of their driver and constructor scores.
pub fn rank_combined(
    participants: &[Participant],
    driver_predictions: &[Prediction],
    driver_standings: &[StandingEntry],
    constructor_predictions: &[Prediction],
    constructor_standings: &[StandingEntry],
    method: ScoringMethod,
) -> Leaderboard {
    let rows = participants
        .iter()
        .map(|participant| {
            let driver_score = find_prediction(driver_predictions, &participant.id)
                .map(|p| score_prediction(p, driver_standings, Championship::Drivers).score(method))
                .unwrap_or(0);
            let constructor_score = find_prediction(constructor_predictions, &participant.id)
                .map(|p| {
                    score_prediction(p, constructor_standings, Championship::Constructors)
                        .score(method)
                })
                .unwrap_or(0);
            LeaderboardRow {
                participant: participant.clone(),
                driver_score: Some(driver_score),
                constructor_score: Some(constructor_score),
                total: driver_score + constructor_score,
                result: None,
            }
        })
        .collect();

    finish(rows, method)
}

fn finish(mut rows: Vec<LeaderboardRow>, method: ScoringMethod) -> Leaderboard {
    sort_rows(&mut rows, method);
    let totals: Vec<u32> = rows.iter().map(|r| r.total).collect();
    let winners = winning_indices(&totals, method)
        .into_iter()
        .map(|idx| rows[idx].participant.id.clone())
        .collect();
    Leaderboard {
        method,
        rows,
        winners,
    }
}

/// Sort by total in the method's direction. Ties keep participant order.
pub fn sort_rows(rows: &mut [LeaderboardRow], method: ScoringMethod) {
    rows.sort_by(|a, b| compare_scores(a.total, b.total, method));
}

fn compare_scores(a: u32, b: u32, method: ScoringMethod) -> Ordering {
    if method.lower_is_better() {
        a.cmp(&b)
    } else {
        b.cmp(&a)
    }
}

/// Indices of every score equal to the best one.
///
/// When every score is 0 nobody has won: that is indistinguishable from
/// "no predictions submitted yet".
pub fn winning_indices(scores: &[u32], method: ScoringMethod) -> Vec<usize> {
    if scores.iter().all(|&s| s == 0) {
        return Vec::new();
    }
    let best = if method.lower_is_better() {
        scores.iter().min()
    } else {
        scores.iter().max()
    };
    let Some(&best) = best else {
        return Vec::new();
    };
    scores
        .iter()
        .enumerate()
        .filter(|(_, s)| **s == best)
        .map(|(idx, _)| idx)
        .collect()
}
