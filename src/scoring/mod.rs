pub mod engine;
pub mod leaderboard;
pub mod matching;
pub mod types;
pub mod validation;
pub mod weekly;

pub use engine::{correct_count, delta_score, prediction_details, score_prediction};
pub use leaderboard::{rank_championship, rank_combined, winning_indices, Leaderboard, LeaderboardRow};
pub use matching::resolve;
pub use types::*;
pub use validation::{validate_prediction, validate_weekly};
pub use weekly::{
    rank_weekly, score_weekly, AggregateScore, RaceResult, WeeklyLeaderboard, WeeklyPick, WeeklyScore,
    WEEKLY_SLOTS,
};
