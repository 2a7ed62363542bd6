pub mod storage;
pub mod types;

pub use storage::{load_predictions, save_predictions};
pub use types::{PredictionStore, SeasonEntry, WeeklyEntry};
