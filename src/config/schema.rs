use serde::{Deserialize, Serialize};

use crate::scoring::Participant;

pub const DEFAULT_BASE_URL: &str = "https://api.jolpi.ca/ergast/f1";
pub const DEFAULT_FALLBACK_URL: &str = "https://ergast.com/api/f1";
pub const DEFAULT_CACHE_TTL: &str = "5m";

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Season to score: "current" or a year such as "2025"
    #[serde(default = "default_season")]
    pub season: String,

    #[serde(default)]
    pub api: ApiConfig,

    pub participants: Vec<Participant>,

    /// Where predictions are stored (defaults to ~/.config/paddock-picks/predictions.json)
    #[serde(default)]
    pub predictions_file: Option<String>,
}

fn default_season() -> String {
    "current".to_string()
}

/// Standings API endpoints and cache policy.
///
/// Example YAML:
/// ```yaml
/// api:
///   base_url: https://api.jolpi.ca/ergast/f1
///   fallback_url: https://ergast.com/api/f1
///   cache_ttl: 10m
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Tried when every request to `base_url` fails. Empty to disable.
    #[serde(default = "default_fallback_url")]
    pub fallback_url: String,

    /// How long a cached response is served without refetching (humantime, e.g. "5m")
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_fallback_url() -> String {
    DEFAULT_FALLBACK_URL.to_string()
}

fn default_cache_ttl() -> String {
    DEFAULT_CACHE_TTL.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            fallback_url: default_fallback_url(),
            cache_ttl: default_cache_ttl(),
        }
    }
}

impl ApiConfig {
    pub fn cache_ttl(&self) -> anyhow::Result<std::time::Duration> {
        Ok(humantime::parse_duration(self.cache_ttl.trim())?)
    }

    /// Endpoints to try, in order
    pub fn endpoints(&self) -> Vec<String> {
        let mut endpoints = vec![self.base_url.trim_end_matches('/').to_string()];
        let fallback = self.fallback_url.trim().trim_end_matches('/');
        if !fallback.is_empty() && fallback != endpoints[0] {
            endpoints.push(fallback.to_string());
        }
        endpoints
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_parse() {
        let yaml = r#"
participants:
  - id: emma
    name: Emma
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.season, "current");
        assert_eq!(config.api, ApiConfig::default());
        assert_eq!(config.participants.len(), 1);
        assert!(config.predictions_file.is_none());
    }

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
season: "2024"
api:
  base_url: https://example.test/f1/
  fallback_url: ""
  cache_ttl: 1h
participants:
  - id: emma
    name: Emma
  - id: jeremy
    name: Jeremy
predictions_file: /tmp/predictions.json
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.season, "2024");
        assert_eq!(config.api.endpoints(), vec!["https://example.test/f1".to_string()]);
        assert_eq!(config.api.cache_ttl().unwrap().as_secs(), 3600);
        assert_eq!(config.participants[1].name, "Jeremy");
        assert_eq!(config.predictions_file.as_deref(), Some("/tmp/predictions.json"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = r#"
participants: []
scoring: delta
"#;
        assert!(serde_saphyr::from_str::<Config>(yaml).is_err());
    }

    #[test]
    fn test_default_endpoints_include_fallback() {
        let api = ApiConfig::default();
        assert_eq!(
            api.endpoints(),
            vec![DEFAULT_BASE_URL.to_string(), DEFAULT_FALLBACK_URL.to_string()]
        );
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = Config {
            season: "2025".to_string(),
            api: ApiConfig::default(),
            participants: vec![Participant {
                id: "laura".to_string(),
                name: "Laura".to_string(),
            }],
            predictions_file: None,
        };
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: Config = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }
}
