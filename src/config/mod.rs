mod schema;

pub use schema::{ApiConfig, Config, DEFAULT_BASE_URL, DEFAULT_CACHE_TTL, DEFAULT_FALLBACK_URL};

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

/// Get the config directory path (~/.config/paddock-picks/)
pub fn get_config_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".config"))
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join("paddock-picks")
}

/// Get the default config file path (~/.config/paddock-picks/config.yaml)
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.yaml")
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses default path (~/.config/paddock-picks/config.yaml)
///
/// # Errors
///
/// Returns an error if:
/// - The config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config_path = path.unwrap_or_else(get_config_path);

    if !config_path.exists() {
        anyhow::bail!(
            "Config file not found at {}. Create ~/.config/paddock-picks/config.yaml",
            config_path.display()
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", config_path.display()))?;

    Ok(config)
}

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    let season = config.season.trim();
    if season != "current" && season.parse::<u32>().is_err() {
        errors.push(format!(
            "season: invalid '{}' - expected \"current\" or a year",
            config.season
        ));
    }

    if config.api.base_url.trim().is_empty() {
        errors.push("api.base_url: must not be empty".to_string());
    }

    if let Err(e) = config.api.cache_ttl() {
        errors.push(format!(
            "api.cache_ttl: invalid format '{}' - {}",
            config.api.cache_ttl, e
        ));
    }

    let mut seen = HashSet::new();
    for (i, participant) in config.participants.iter().enumerate() {
        if participant.id.trim().is_empty() {
            errors.push(format!("participants[{}].id: must not be empty", i));
        } else if !seen.insert(participant.id.as_str()) {
            errors.push(format!(
                "participants[{}].id: duplicate id '{}'",
                i, participant.id
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Resolve the predictions file path from config, falling back to the config directory
pub fn get_predictions_path(config: &Config) -> PathBuf {
    config
        .predictions_file
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(|| get_config_dir().join("predictions.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::Participant;
    use std::env;

    fn sample_config() -> Config {
        Config {
            season: "current".to_string(),
            api: ApiConfig::default(),
            participants: vec![
                Participant { id: "emma".to_string(), name: "Emma".to_string() },
                Participant { id: "jacob".to_string(), name: "Jacob".to_string() },
            ],
            predictions_file: None,
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(validate_config(&sample_config()).is_ok());
    }

    #[test]
    fn test_year_season_is_valid() {
        let mut config = sample_config();
        config.season = "2024".to_string();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = sample_config();
        config.season = "last year".to_string();
        config.api.cache_ttl = "soon".to_string();
        config.participants.push(Participant {
            id: "emma".to_string(),
            name: "Emma again".to_string(),
        });
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors[0].starts_with("season"));
        assert!(errors[1].starts_with("api.cache_ttl"));
        assert!(errors[2].contains("duplicate id 'emma'"));
    }

    #[test]
    fn test_load_missing_config() {
        let path = env::temp_dir().join("paddock_picks_test_missing_config.yaml");
        let _ = fs::remove_file(&path);
        let err = load_config(Some(path)).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_load_config_from_file() {
        let path = env::temp_dir().join("paddock_picks_test_config.yaml");
        fs::write(
            &path,
            "season: \"2025\"\nparticipants:\n  - id: emma\n    name: Emma\n",
        )
        .unwrap();

        let config = load_config(Some(path.clone())).unwrap();
        assert_eq!(config.season, "2025");
        assert_eq!(config.participants[0].id, "emma");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_predictions_path_override() {
        let mut config = sample_config();
        assert!(get_predictions_path(&config).ends_with("predictions.json"));
        config.predictions_file = Some("/srv/picks.json".to_string());
        assert_eq!(get_predictions_path(&config), PathBuf::from("/srv/picks.json"));
    }
}
