use std::collections::HashSet;

use super::types::Championship;
use super::weekly::WEEKLY_SLOTS;

fn check_names(label: &str, names: &[String], errors: &mut Vec<String>) {
    let mut seen = HashSet::new();
    for (i, name) in names.iter().enumerate() {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            errors.push(format!("{}[{}]: name must not be empty", label, i));
            continue;
        }
        if !seen.insert(trimmed.to_lowercase()) {
            errors.push(format!("{}[{}]: duplicate name '{}'", label, i, trimmed));
        }
    }
}

/// Validate a season prediction before it is saved.
/// Returns all validation errors at once (not just the first).
///
/// `expected_len` is the size of the current standings table when known.
pub fn validate_prediction(
    championship: Championship,
    names: &[String],
    expected_len: Option<usize>,
) -> Result<(), Vec<String>> {
    let label = championship.as_str();
    let mut errors = Vec::new();

    if names.is_empty() {
        errors.push(format!("{}: prediction must name at least one entry", label));
    }

    if let Some(expected) = expected_len {
        if expected > 0 && names.len() != expected {
            errors.push(format!(
                "{}: expected {} names to match the standings, got {}",
                label,
                expected,
                names.len()
            ));
        }
    }

    check_names(label, names, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate a weekly top-10 prediction before it is saved.
pub fn validate_weekly(round: u32, names: &[String]) -> Result<(), Vec<String>> {
    let label = format!("round {}", round);
    let mut errors = Vec::new();

    if round == 0 {
        errors.push("round: must be 1 or greater".to_string());
    }
    if names.is_empty() {
        errors.push(format!("{}: prediction must name at least one driver", label));
    }
    if names.len() > WEEKLY_SLOTS {
        errors.push(format!(
            "{}: at most {} drivers, got {}",
            label,
            WEEKLY_SLOTS,
            names.len()
        ));
    }

    check_names(&label, names, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_valid_prediction() {
        let result = validate_prediction(
            Championship::Drivers,
            &names(&["Norris", "Verstappen", "Piastri"]),
            Some(3),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_unknown_length_skips_length_check() {
        let result = validate_prediction(Championship::Constructors, &names(&["McLaren"]), None);
        assert!(result.is_ok());
    }

    #[test]
    fn test_wrong_length() {
        let result = validate_prediction(Championship::Drivers, &names(&["Norris"]), Some(20));
        let errors = result.unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("expected 20 names"));
    }

    #[test]
    fn test_duplicate_is_case_insensitive() {
        let result = validate_prediction(
            Championship::Drivers,
            &names(&["Norris", "norris "]),
            None,
        );
        let errors = result.unwrap_err();
        assert!(errors[0].contains("drivers[1]: duplicate name 'norris'"));
    }

    #[test]
    fn test_empty_name() {
        let result = validate_prediction(Championship::Constructors, &names(&["McLaren", " "]), None);
        let errors = result.unwrap_err();
        assert!(errors[0].contains("constructors[1]: name must not be empty"));
    }

    #[test]
    fn test_collects_all_errors() {
        let result = validate_prediction(
            Championship::Drivers,
            &names(&["Norris", "", "Norris"]),
            Some(5),
        );
        let errors = result.unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_empty_prediction() {
        let result = validate_prediction(Championship::Drivers, &[], None);
        assert!(result.is_err());
    }

    #[test]
    fn test_weekly_too_many() {
        let eleven: Vec<String> = (0..11).map(|i| format!("Driver{}", i)).collect();
        let errors = validate_weekly(3, &eleven).unwrap_err();
        assert!(errors[0].contains("at most 10 drivers"));
    }

    #[test]
    fn test_weekly_round_zero() {
        let errors = validate_weekly(0, &names(&["Norris"])).unwrap_err();
        assert!(errors[0].contains("round"));
    }

    #[test]
    fn test_weekly_valid() {
        assert!(validate_weekly(1, &names(&["Norris", "Piastri"])).is_ok());
    }
}
