use std::collections::HashMap;

use super::types::Participant;

/// Number of finishing slots a weekly prediction covers.
pub const WEEKLY_SLOTS: usize = 10;

/// One participant's weekly pick for a single round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyPick<'a> {
    pub participant_id: &'a str,
    pub round: u32,
    pub top10: &'a [String],
}

/// Actual top-ten finishers for a round, by driver family name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaceResult {
    pub round: u32,
    pub race_name: String,
    pub top10: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyScore {
    pub participant_id: String,
    pub display_name: String,
    pub round: u32,
    pub race_name: String,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateScore {
    pub participant_id: String,
    pub display_name: String,
    pub total_correct: u32,
    pub races_scored: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeeklyLeaderboard {
    pub per_race: Vec<WeeklyScore>,
    pub aggregate: Vec<AggregateScore>,
}

/// One point per slot where the predicted and actual names agree, ignoring
/// surrounding whitespace and case. Order matters.
pub fn score_weekly(predicted: &[String], actual: &[String]) -> u32 {
    predicted
        .iter()
        .zip(actual)
        .take(WEEKLY_SLOTS)
        .filter(|(p, a)| p.trim().to_lowercase() == a.trim().to_lowercase())
        .count() as u32
}

fn display_name(participants: &[Participant], participant_id: &str) -> String {
    participants
        .iter()
        .find(|p| p.id == participant_id)
        .map(|p| p.name.clone())
        .unwrap_or_else(|| participant_id.chars().take(8).collect())
}

/// Score every weekly pick that has a matching race result and aggregate
/// per participant. Picks for rounds without results are skipped.
pub fn rank_weekly(
    participants: &[Participant],
    picks: &[WeeklyPick<'_>],
    results: &[RaceResult],
) -> WeeklyLeaderboard {
    let results_by_round: HashMap<u32, &RaceResult> =
        results.iter().map(|r| (r.round, r)).collect();

    let mut per_race = Vec::new();
    // Insertion order of first appearance, for a stable tie order
    let mut order: Vec<String> = Vec::new();
    let mut totals: HashMap<String, (u32, u32)> = HashMap::new();

    for pick in picks {
        let Some(result) = results_by_round.get(&pick.round) else {
            continue;
        };
        if result.top10.is_empty() {
            continue;
        }

        let score = score_weekly(pick.top10, &result.top10);
        per_race.push(WeeklyScore {
            participant_id: pick.participant_id.to_string(),
            display_name: display_name(participants, pick.participant_id),
            round: pick.round,
            race_name: result.race_name.clone(),
            score,
        });

        let entry = totals.entry(pick.participant_id.to_string()).or_insert_with(|| {
            order.push(pick.participant_id.to_string());
            (0, 0)
        });
        entry.0 += score;
        entry.1 += 1;
    }

    per_race.sort_by(|a, b| a.round.cmp(&b.round).then(b.score.cmp(&a.score)));

    let mut aggregate: Vec<AggregateScore> = order
        .into_iter()
        .map(|id| {
            let (total_correct, races_scored) = totals[&id];
            AggregateScore {
                display_name: display_name(participants, &id),
                participant_id: id,
                total_correct,
                races_scored,
            }
        })
        .collect();
    aggregate.sort_by(|a, b| b.total_correct.cmp(&a.total_correct));

    WeeklyLeaderboard {
        per_race,
        aggregate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn participants() -> Vec<Participant> {
        vec![
            Participant { id: "emma".to_string(), name: "Emma".to_string() },
            Participant { id: "jeremy".to_string(), name: "Jeremy".to_string() },
        ]
    }

    #[test]
    fn test_score_weekly_exact_positions() {
        let actual = names(&["Norris", "Verstappen", "Piastri"]);
        let predicted = names(&["norris ", "Piastri", "Piastri"]);
        assert_eq!(score_weekly(&predicted, &actual), 2);
    }

    #[test]
    fn test_score_weekly_shorter_prediction() {
        let actual = names(&["Norris", "Verstappen", "Piastri"]);
        let predicted = names(&["Norris"]);
        assert_eq!(score_weekly(&predicted, &actual), 1);
    }

    #[test]
    fn test_score_weekly_caps_at_ten_slots() {
        let eleven: Vec<String> = (0..11).map(|i| format!("Driver{}", i)).collect();
        assert_eq!(score_weekly(&eleven, &eleven), 10);
    }

    #[test]
    fn test_rank_weekly_aggregates_and_skips_missing_results() {
        let emma_r1 = names(&["Norris", "Verstappen"]);
        let emma_r2 = names(&["Leclerc", "Norris"]);
        let jeremy_r1 = names(&["Verstappen", "Norris"]);
        let picks = vec![
            WeeklyPick { participant_id: "emma", round: 1, top10: &emma_r1 },
            WeeklyPick { participant_id: "emma", round: 2, top10: &emma_r2 },
            WeeklyPick { participant_id: "jeremy", round: 1, top10: &jeremy_r1 },
        ];
        let results = vec![RaceResult {
            round: 1,
            race_name: "Australian Grand Prix".to_string(),
            top10: names(&["Norris", "Verstappen"]),
        }];

        let board = rank_weekly(&participants(), &picks, &results);

        assert_eq!(board.per_race.len(), 2);
        assert_eq!(board.per_race[0].participant_id, "emma");
        assert_eq!(board.per_race[0].score, 2);
        assert_eq!(board.per_race[0].race_name, "Australian Grand Prix");

        assert_eq!(board.aggregate.len(), 2);
        assert_eq!(board.aggregate[0].display_name, "Emma");
        assert_eq!(board.aggregate[0].total_correct, 2);
        assert_eq!(board.aggregate[0].races_scored, 1);
        assert_eq!(board.aggregate[1].total_correct, 0);
    }

    #[test]
    fn test_unknown_participant_uses_truncated_id() {
        let picks_top = names(&["Norris"]);
        let picks = vec![WeeklyPick {
            participant_id: "0123456789abcdef",
            round: 1,
            top10: &picks_top,
        }];
        let results = vec![RaceResult {
            round: 1,
            race_name: "Bahrain Grand Prix".to_string(),
            top10: names(&["Norris"]),
        }];
        let board = rank_weekly(&[], &picks, &results);
        assert_eq!(board.aggregate[0].display_name, "01234567");
    }
}
