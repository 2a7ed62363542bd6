use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scoring::{Championship, Prediction, WeeklyPick};

pub const STORE_VERSION: u32 = 1;

/// All submitted predictions, persisted as one JSON document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionStore {
    pub version: u32,
    #[serde(default)]
    pub season: Vec<SeasonEntry>,
    #[serde(default)]
    pub weekly: Vec<WeeklyEntry>,
}

/// A pre-season ordering for one participant, season and championship.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonEntry {
    pub participant_id: String,
    pub season: String,
    pub championship: Championship,
    pub names: Vec<String>,
    pub submitted_at: DateTime<Utc>,
}

/// A top-ten pick for one participant and race weekend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyEntry {
    pub participant_id: String,
    pub season: String,
    pub round: u32,
    pub top10: Vec<String>,
    pub submitted_at: DateTime<Utc>,
}

impl Default for PredictionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PredictionStore {
    /// Create a new empty store with the current version
    pub fn new() -> Self {
        Self {
            version: STORE_VERSION,
            season: Vec::new(),
            weekly: Vec::new(),
        }
    }

    /// Season predictions for one championship, in submission order
    pub fn predictions_for(&self, season: &str, championship: Championship) -> Vec<Prediction> {
        self.season
            .iter()
            .filter(|e| e.season == season && e.championship == championship)
            .map(|e| Prediction {
                participant_id: e.participant_id.clone(),
                ordered_names: e.names.clone(),
            })
            .collect()
    }

    /// Save a season prediction, replacing any earlier one for the same
    /// participant, season and championship in full.
    /// Returns true if an earlier prediction was replaced.
    pub fn set_prediction(
        &mut self,
        participant_id: &str,
        season: &str,
        championship: Championship,
        names: Vec<String>,
    ) -> bool {
        let entry = SeasonEntry {
            participant_id: participant_id.to_string(),
            season: season.to_string(),
            championship,
            names,
            submitted_at: Utc::now(),
        };
        match self.season.iter_mut().find(|e| {
            e.participant_id == participant_id && e.season == season && e.championship == championship
        }) {
            Some(existing) => {
                *existing = entry;
                true
            }
            None => {
                self.season.push(entry);
                false
            }
        }
    }

    /// Weekly picks for a season, optionally restricted to one round
    pub fn weekly_for(&self, season: &str, round: Option<u32>) -> Vec<WeeklyPick<'_>> {
        self.weekly
            .iter()
            .filter(|e| e.season == season && round.map_or(true, |r| e.round == r))
            .map(|e| WeeklyPick {
                participant_id: &e.participant_id,
                round: e.round,
                top10: &e.top10,
            })
            .collect()
    }

    /// Save a weekly pick, replacing any earlier one for the same round.
    /// Returns true if an earlier pick was replaced.
    pub fn set_weekly(
        &mut self,
        participant_id: &str,
        season: &str,
        round: u32,
        top10: Vec<String>,
    ) -> bool {
        let entry = WeeklyEntry {
            participant_id: participant_id.to_string(),
            season: season.to_string(),
            round,
            top10,
            submitted_at: Utc::now(),
        };
        match self
            .weekly
            .iter_mut()
            .find(|e| e.participant_id == participant_id && e.season == season && e.round == round)
        {
            Some(existing) => {
                *existing = entry;
                true
            }
            None => {
                self.weekly.push(entry);
                false
            }
        }
    }

    /// Distinct rounds with at least one weekly pick, ascending
    pub fn weekly_rounds(&self, season: &str) -> Vec<u32> {
        let mut rounds: Vec<u32> = self
            .weekly
            .iter()
            .filter(|e| e.season == season)
            .map(|e| e.round)
            .collect();
        rounds.sort_unstable();
        rounds.dedup();
        rounds
    }
}
