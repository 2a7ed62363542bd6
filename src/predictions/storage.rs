//! On-disk home of the prediction store.
//!
//! Every command that saves a prediction rewrites the whole document, so a
//! write either lands completely or leaves the previous file in place.

use super::types::{PredictionStore, STORE_VERSION};
use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs::File;
use std::path::Path;

/// Read the store. A league that has not saved anything yet has no file,
/// which reads as an empty store. Files from a newer layout are refused
/// rather than silently dropping picks the old code does not understand.
pub fn load_predictions(path: &Path) -> Result<PredictionStore> {
    if !path.exists() {
        return Ok(PredictionStore::new());
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open predictions file at {}", path.display()))?;
    let store: PredictionStore = serde_json::from_reader(file)
        .with_context(|| format!("Predictions file at {} is not valid JSON", path.display()))?;

    if store.version != STORE_VERSION {
        anyhow::bail!(
            "Predictions file at {} has version {}, expected {}",
            path.display(),
            store.version,
            STORE_VERSION
        );
    }
    Ok(store)
}

/// Replace the store on disk, creating its directory on first save.
pub fn save_predictions(path: &Path, store: &PredictionStore) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory at {}", dir.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open {} for writing", path.display()))?;
    serde_json::to_writer_pretty(&mut file, store).context("Failed to serialize predictions")?;
    file.commit()
        .with_context(|| format!("Failed to save predictions to {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::Championship;
    use std::env;

    #[test]
    fn test_load_missing_file_returns_empty() {
        let temp_path = env::temp_dir().join("paddock_picks_test_missing.json");
        let _ = std::fs::remove_file(&temp_path);

        let store = load_predictions(&temp_path).unwrap();
        assert_eq!(store.version, 1);
        assert!(store.season.is_empty());
        assert!(store.weekly.is_empty());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_path = env::temp_dir().join("paddock_picks_test_roundtrip.json");
        let _ = std::fs::remove_file(&temp_path);

        let mut store = PredictionStore::new();
        store.set_prediction(
            "emma",
            "2025",
            Championship::Constructors,
            vec!["McLaren".to_string(), "Ferrari".to_string()],
        );
        store.set_weekly("emma", "2025", 4, vec!["Norris".to_string()]);

        save_predictions(&temp_path, &store).unwrap();
        let loaded = load_predictions(&temp_path).unwrap();

        assert_eq!(loaded.version, 1);
        let predictions = loaded.predictions_for("2025", Championship::Constructors);
        assert_eq!(predictions.len(), 1);
        assert_eq!(predictions[0].participant_id, "emma");
        assert_eq!(loaded.weekly_rounds("2025"), vec![4]);

        let _ = std::fs::remove_file(&temp_path);
    }

    #[test]
    fn test_unsupported_version_rejected() {
        let temp_path = env::temp_dir().join("paddock_picks_test_version.json");
        std::fs::write(&temp_path, r#"{ "version": 7, "season": [], "weekly": [] }"#).unwrap();

        let err = load_predictions(&temp_path).unwrap_err();
        assert!(err.to_string().contains("has version 7, expected 1"));

        let _ = std::fs::remove_file(&temp_path);
    }

    #[test]
    fn test_first_save_creates_directory() {
        let dir = env::temp_dir().join("paddock_picks_test_new_league");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("nested").join("predictions.json");

        save_predictions(&path, &PredictionStore::new()).unwrap();
        assert!(load_predictions(&path).unwrap().season.is_empty());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
