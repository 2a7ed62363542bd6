use super::matching::resolve;
use super::types::{Championship, ItemDetail, Prediction, ScoreResult, StandingEntry};

/// Penalty for a name that does not resolve: the largest distance any
/// single slot could contribute.
fn unmatched_penalty(standings: &[StandingEntry]) -> u32 {
    standings.len() as u32
}

/// Iterate `(predicted_name, predicted_position, resolved_entry)` for every slot
fn resolved_slots<'a>(
    prediction: &'a Prediction,
    standings: &'a [StandingEntry],
    championship: Championship,
) -> impl Iterator<Item = (&'a str, u32, Option<&'a StandingEntry>)> + 'a {
    prediction
        .ordered_names
        .iter()
        .enumerate()
        .map(move |(idx, name)| {
            let predicted_position = idx as u32 + 1;
            (name.as_str(), predicted_position, resolve(name, standings, championship))
        })
}

/// Closest-position score: sum of `|actual - predicted|` over all slots,
/// with unmatched names charged the standings length. Lower is better.
pub fn delta_score(
    prediction: &Prediction,
    standings: &[StandingEntry],
    championship: Championship,
) -> u32 {
    let penalty = unmatched_penalty(standings);
    resolved_slots(prediction, standings, championship)
        .map(|(_, predicted_position, entry)| match entry {
            Some(entry) => entry.position.abs_diff(predicted_position),
            None => penalty,
        })
        .sum()
}

/// Correct-guesses score: number of slots whose name resolves to the entry
/// at exactly that position. Higher is better.
pub fn correct_count(
    prediction: &Prediction,
    standings: &[StandingEntry],
    championship: Championship,
) -> u32 {
    resolved_slots(prediction, standings, championship)
        .filter(|(_, predicted_position, entry)| {
            entry.is_some_and(|e| e.position == *predicted_position)
        })
        .count() as u32
}

/// Row-by-row comparison used for breakdown tables. Not used for ranking.
pub fn prediction_details(
    prediction: &Prediction,
    standings: &[StandingEntry],
    championship: Championship,
) -> Vec<ItemDetail> {
    let penalty = unmatched_penalty(standings);
    resolved_slots(prediction, standings, championship)
        .map(|(name, predicted_position, entry)| ItemDetail {
            predicted_name: name.to_string(),
            predicted_position,
            matched_position: entry.map(|e| e.position),
            points: entry.map(|e| e.points),
            team: entry.and_then(|e| e.team.clone()),
            is_exact_match: entry.is_some_and(|e| e.position == predicted_position),
            position_delta: entry
                .map(|e| e.position.abs_diff(predicted_position))
                .unwrap_or(penalty),
        })
        .collect()
}

/// Score a prediction under both methods and attach the breakdown.
pub fn score_prediction(
    prediction: &Prediction,
    standings: &[StandingEntry],
    championship: Championship,
) -> ScoreResult {
    ScoreResult {
        participant_id: prediction.participant_id.clone(),
        delta_score: delta_score(prediction, standings, championship),
        correct_count: correct_count(prediction, standings, championship),
        details: prediction_details(prediction, standings, championship),
    }
}
