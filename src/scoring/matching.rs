use deunicode::deunicode;

use super::types::{Championship, StandingEntry};

/// Alternate constructor spellings mapped to one canonical form. Branding
/// changes year to year, so hand-entered names drift from the feed.
const CONSTRUCTOR_ALIASES: &[(&str, &str)] = &[
    ("Haas", "Haas F1 Team"),
    ("Alpine", "Alpine F1 Team"),
    ("RB F1 Team", "RB F1 Team"),
    ("Racing Bulls", "RB F1 Team"),
    ("Visa Cash App RB", "RB F1 Team"),
    ("Stake F1 Team", "Sauber"),
    ("Kick Sauber", "Sauber"),
    ("Sauber", "Sauber"),
    ("Red Bull Racing", "Red Bull"),
    ("Red Bull", "Red Bull"),
];

fn lookup<'a>(table: &'a [(&'a str, &'a str)], name: &'a str) -> &'a str {
    table
        .iter()
        .find(|(alias, _)| *alias == name)
        .map(|(_, canonical)| *canonical)
        .unwrap_or(name)
}

/// Canonical spelling of a constructor name, or the input when no alias exists
pub fn normalize_constructor(name: &str) -> &str {
    lookup(CONSTRUCTOR_ALIASES, name)
}

/// Case-fold for comparison. Diacritics are transliterated so that
/// "Hülkenberg" and "Hulkenberg" compare equal.
fn fold(name: &str) -> String {
    deunicode(name.trim()).to_lowercase()
}

/// Resolve a predicted name against a standings table.
///
/// Returns the first entry in list order that satisfies the matching rules
/// for the championship, or `None` when nothing matches. Standings are
/// position-ordered, so ambiguous names resolve toward the higher-ranked entry.
pub fn resolve<'a>(
    predicted: &str,
    standings: &'a [StandingEntry],
    championship: Championship,
) -> Option<&'a StandingEntry> {
    match championship {
        Championship::Drivers => resolve_driver(predicted, standings),
        Championship::Constructors => resolve_constructor(predicted, standings),
    }
}

fn resolve_driver<'a>(predicted: &str, standings: &'a [StandingEntry]) -> Option<&'a StandingEntry> {
    // Plain containment, no aliases: nicknames stay unmatched
    let needle = fold(predicted);
    if needle.is_empty() {
        return None;
    }
    standings.iter().find(|entry| fold(&entry.name).contains(&needle))
}

fn resolve_constructor<'a>(
    predicted: &str,
    standings: &'a [StandingEntry],
) -> Option<&'a StandingEntry> {
    let raw = fold(predicted);
    if raw.is_empty() {
        return None;
    }
    let canonical = fold(normalize_constructor(predicted.trim()));

    // Precedence matters: "Red Bull" and "Racing Bulls" share substrings.
    standings.iter().find(|entry| {
        let actual = fold(&entry.name);
        actual == canonical
            || actual == raw
            || canonical.contains(&actual)
            || actual.contains(&canonical)
            || raw.contains(&actual)
            || actual.contains(&raw)
    })
}
