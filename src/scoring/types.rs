use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which championship a standings table or prediction belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Championship {
    Drivers,
    Constructors,
}

impl Championship {
    pub fn as_str(&self) -> &'static str {
        match self {
            Championship::Drivers => "drivers",
            Championship::Constructors => "constructors",
        }
    }

    /// Singular label for table headers ("Driver", "Constructor")
    pub fn entity_label(&self) -> &'static str {
        match self {
            Championship::Drivers => "Driver",
            Championship::Constructors => "Constructor",
        }
    }
}

impl fmt::Display for Championship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a prediction is scored against the standings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ScoringMethod {
    /// Sum of absolute position differences. Lower is better.
    #[default]
    Delta,
    /// Number of exact position hits. Higher is better.
    #[value(name = "correct")]
    CorrectGuesses,
}

impl ScoringMethod {
    pub fn lower_is_better(&self) -> bool {
        matches!(self, ScoringMethod::Delta)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoringMethod::Delta => "Closest Position",
            ScoringMethod::CorrectGuesses => "Correct Standings",
        }
    }

    pub fn description(&self) -> &'static str {
        if self.lower_is_better() {
            "Lower score is better"
        } else {
            "Higher score is better"
        }
    }
}

/// One row of a championship standings table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingEntry {
    pub position: u32,
    pub name: String,
    /// Constructor the driver raced for. Only set on driver standings.
    #[serde(default)]
    pub team: Option<String>,
    pub points: u32,
}

impl StandingEntry {
    pub fn driver(position: u32, name: &str, team: &str, points: u32) -> Self {
        Self {
            position,
            name: name.to_string(),
            team: Some(team.to_string()),
            points,
        }
    }

    pub fn constructor(position: u32, name: &str, points: u32) -> Self {
        Self {
            position,
            name: name.to_string(),
            team: None,
            points,
        }
    }
}

/// A participant's predicted finishing order. `ordered_names[i]` is the
/// name predicted to finish in position `i + 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    pub participant_id: String,
    pub ordered_names: Vec<String>,
}

impl Prediction {
    pub fn new(participant_id: impl Into<String>, ordered_names: &[&str]) -> Self {
        Self {
            participant_id: participant_id.into(),
            ordered_names: ordered_names.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Per-slot comparison of a prediction against the standings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDetail {
    pub predicted_name: String,
    pub predicted_position: u32,
    pub matched_position: Option<u32>,
    pub points: Option<u32>,
    pub team: Option<String>,
    pub is_exact_match: bool,
    /// Distance to the matched position, or the unmatched penalty
    /// (standings length) when the name did not resolve.
    pub position_delta: u32,
}

/// Both scores for one prediction plus the row breakdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreResult {
    pub participant_id: String,
    pub delta_score: u32,
    pub correct_count: u32,
    pub details: Vec<ItemDetail>,
}

impl ScoreResult {
    pub fn score(&self, method: ScoringMethod) -> u32 {
        match method {
            ScoringMethod::Delta => self.delta_score,
            ScoringMethod::CorrectGuesses => self.correct_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    pub name: String,
}
