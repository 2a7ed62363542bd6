//! Wire types for the Ergast-compatible JSON API (Jolpica mirror).
//!
//! Numeric fields arrive as strings. Only the fields the scorer needs are
//! modelled; everything else is ignored.

use serde::Deserialize;

use crate::scoring::StandingEntry;

#[derive(Debug, Deserialize)]
pub struct ApiResponse {
    #[serde(rename = "MRData")]
    pub mr_data: MrData,
}

#[derive(Debug, Deserialize)]
pub struct MrData {
    #[serde(rename = "StandingsTable")]
    pub standings_table: Option<StandingsTable>,
    #[serde(rename = "RaceTable")]
    pub race_table: Option<RaceTable>,
}

#[derive(Debug, Deserialize)]
pub struct StandingsTable {
    #[serde(rename = "StandingsLists", default)]
    pub standings_lists: Vec<StandingsList>,
}

#[derive(Debug, Deserialize)]
pub struct StandingsList {
    #[serde(rename = "DriverStandings", default)]
    pub driver_standings: Option<Vec<ApiDriverStanding>>,
    #[serde(rename = "ConstructorStandings", default)]
    pub constructor_standings: Option<Vec<ApiConstructorStanding>>,
}

#[derive(Debug, Deserialize)]
pub struct ApiDriverStanding {
    pub position: Option<String>,
    pub points: String,
    #[serde(rename = "Driver")]
    pub driver: ApiDriver,
    #[serde(rename = "Constructors", default)]
    pub constructors: Vec<ApiConstructor>,
}

#[derive(Debug, Deserialize)]
pub struct ApiConstructorStanding {
    pub position: Option<String>,
    pub points: String,
    #[serde(rename = "Constructor")]
    pub constructor: ApiConstructor,
}

#[derive(Debug, Deserialize)]
pub struct ApiDriver {
    #[serde(rename = "givenName", default)]
    pub given_name: String,
    #[serde(rename = "familyName")]
    pub family_name: String,
}

#[derive(Debug, Deserialize)]
pub struct ApiConstructor {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct RaceTable {
    pub season: Option<String>,
    #[serde(rename = "Races", default)]
    pub races: Vec<ApiRace>,
}

#[derive(Debug, Deserialize)]
pub struct ApiRace {
    pub round: Option<String>,
    #[serde(rename = "raceName")]
    pub race_name: String,
    #[serde(rename = "Results", default)]
    pub results: Vec<ApiRaceResult>,
}

#[derive(Debug, Deserialize)]
pub struct ApiRaceResult {
    #[serde(rename = "Driver")]
    pub driver: ApiDriver,
}

/// Integer part of a points string ("12.5" -> 12). Unparseable values are 0.
pub fn parse_points(points: &str) -> u32 {
    points
        .trim()
        .parse::<f64>()
        .map(|p| p.max(0.0).trunc() as u32)
        .unwrap_or(0)
}

/// Position from the feed, or the 1-based list index when the feed omits it
/// (unclassified entries).
fn parse_position(position: Option<&str>, idx: usize) -> u32 {
    position
        .and_then(|p| p.trim().parse().ok())
        .unwrap_or(idx as u32 + 1)
}

impl ApiDriverStanding {
    pub fn into_entry(self, idx: usize) -> StandingEntry {
        let name = if self.driver.given_name.is_empty() {
            self.driver.family_name
        } else {
            format!("{} {}", self.driver.given_name, self.driver.family_name)
        };
        StandingEntry {
            position: parse_position(self.position.as_deref(), idx),
            name,
            team: Some(
                self.constructors
                    .into_iter()
                    .next()
                    .map(|c| c.name)
                    .unwrap_or_else(|| "Unknown".to_string()),
            ),
            points: parse_points(&self.points),
        }
    }
}

impl ApiConstructorStanding {
    pub fn into_entry(self, idx: usize) -> StandingEntry {
        StandingEntry {
            position: parse_position(self.position.as_deref(), idx),
            name: self.constructor.name,
            team: None,
            points: parse_points(&self.points),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_points() {
        assert_eq!(parse_points("423"), 423);
        assert_eq!(parse_points("12.5"), 12);
        assert_eq!(parse_points("0"), 0);
        assert_eq!(parse_points("n/a"), 0);
    }

    #[test]
    fn test_driver_entry_uses_full_name_and_first_constructor() {
        let json = r#"{
            "position": "3",
            "points": "156.5",
            "Driver": { "givenName": "Nico", "familyName": "Hülkenberg" },
            "Constructors": [{ "name": "Sauber" }, { "name": "Haas F1 Team" }]
        }"#;
        let standing: ApiDriverStanding = serde_json::from_str(json).unwrap();
        let entry = standing.into_entry(0);
        assert_eq!(entry.position, 3);
        assert_eq!(entry.name, "Nico Hülkenberg");
        assert_eq!(entry.team.as_deref(), Some("Sauber"));
        assert_eq!(entry.points, 156);
    }

    #[test]
    fn test_missing_position_falls_back_to_index() {
        let json = r#"{
            "positionText": "-",
            "points": "0",
            "Constructor": { "name": "Williams" }
        }"#;
        let standing: ApiConstructorStanding = serde_json::from_str(json).unwrap();
        let entry = standing.into_entry(9);
        assert_eq!(entry.position, 10);
        assert_eq!(entry.name, "Williams");
        assert!(entry.team.is_none());
    }

    #[test]
    fn test_standings_table_ignores_season_and_round() {
        let json = r#"{
            "season": "2025",
            "round": "24",
            "StandingsLists": [{
                "season": "2025",
                "round": "24",
                "ConstructorStandings": [
                    { "position": "1", "points": "833", "Constructor": { "name": "McLaren" } }
                ]
            }]
        }"#;
        let table: StandingsTable = serde_json::from_str(json).unwrap();
        assert_eq!(table.standings_lists.len(), 1);
        assert!(table.standings_lists[0].driver_standings.is_none());
        assert_eq!(table.standings_lists[0].constructor_standings.as_ref().unwrap().len(), 1);
    }
}
