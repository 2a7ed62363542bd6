use std::io::IsTerminal;
use owo_colors::OwoColorize;
use terminal_size::{Width, terminal_size};

use crate::scoring::{Championship, ItemDetail, Leaderboard, StandingEntry, WeeklyLeaderboard};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Pad by character count rather than bytes so accented names line up
fn pad_right(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - len))
    }
}

/// Width of the name column: the longest name, capped by the terminal
fn name_column_width<'a>(names: impl Iterator<Item = &'a str>, fixed_width: usize) -> usize {
    let longest = names.map(|n| n.chars().count()).max().unwrap_or(0).max(4);
    match get_terminal_width() {
        Some(width) if width > fixed_width + 10 => longest.min(width - fixed_width),
        Some(_) => longest.min(20),
        None => longest,
    }
}

fn optional_score(score: Option<u32>) -> String {
    score.map(|s| s.to_string()).unwrap_or_else(|| "-".to_string())
}

/// Format a season leaderboard.
/// Columns: Index, Participant, Total, and Driver/Constructor for combined boards.
/// Winners are marked with a trophy; an all-zero board has no winner.
pub fn format_leaderboard(
    board: &Leaderboard,
    championship: Option<Championship>,
    use_colors: bool,
) -> String {
    if board.rows.is_empty() {
        return "No participants configured.".to_string();
    }

    let scope = championship.map(|c| c.as_str()).unwrap_or("combined");
    let header = format!(
        "{} ({}) - {}",
        board.method.label(),
        scope,
        board.method.description()
    );

    // index(3) + space + marker(2) + score columns
    let fixed_width = 3 + 1 + 2 + 8 * 3;
    let name_width = name_column_width(
        board.rows.iter().map(|r| r.participant.name.as_str()),
        fixed_width,
    );

    let mut lines = vec![if use_colors {
        header.bold().to_string()
    } else {
        header
    }];

    for (idx, row) in board.rows.iter().enumerate() {
        let index_str = format!("{:>2}.", idx + 1);
        let is_winner = board.winners.contains(&row.participant.id);
        let marker = if is_winner { "🏆" } else { "  " };
        let name = pad_right(&truncate_name(&row.participant.name, name_width), name_width);
        let total = format!("{:>6}", row.total);

        let breakdown = if championship.is_none() {
            format!(
                "  {:>6}  {:>6}",
                optional_score(row.driver_score),
                optional_score(row.constructor_score)
            )
        } else {
            String::new()
        };

        if use_colors {
            lines.push(format!(
                "{} {} {}  {}{}",
                index_str.dimmed(),
                marker,
                name.bold(),
                total.red(),
                breakdown.dimmed()
            ));
        } else {
            lines.push(format!("{} {} {}  {}{}", index_str, marker, name, total, breakdown));
        }
    }

    lines.join("\n")
}

/// Format the per-slot breakdown of one prediction.
/// Columns: predicted position, predicted name, actual position, points, delta, hit marker.
pub fn format_details(details: &[ItemDetail], championship: Championship, use_colors: bool) -> String {
    if details.is_empty() {
        return "No prediction submitted.".to_string();
    }

    let fixed_width = 4 + 2 + 6 + 2 + 8 + 2 + 5 + 3;
    let name_width = name_column_width(
        details.iter().map(|d| d.predicted_name.as_str()),
        fixed_width,
    );

    details
        .iter()
        .map(|detail| {
            let predicted = format!("P{:<3}", detail.predicted_position);
            let name = pad_right(&truncate_name(&detail.predicted_name, name_width), name_width);
            let actual = detail
                .matched_position
                .map(|p| format!("P{}", p))
                .unwrap_or_else(|| "--".to_string());
            let actual = format!("{:>4}", actual);
            let points = detail
                .points
                .map(|p| format!("{} pts", p))
                .unwrap_or_default();
            let points = format!("{:>8}", points);
            let delta = format!("±{:<3}", detail.position_delta);
            let team = match (championship, &detail.team) {
                (Championship::Drivers, Some(team)) => format!("  {}", team),
                _ => String::new(),
            };
            let marker = if detail.is_exact_match { "✓" } else { " " };

            if use_colors {
                let marker = if detail.is_exact_match {
                    marker.green().to_string()
                } else {
                    marker.to_string()
                };
                let actual = if detail.matched_position.is_none() {
                    actual.red().to_string()
                } else {
                    actual
                };
                format!(
                    "{}  {}  {}  {}  {} {}{}",
                    predicted.dimmed(),
                    name.bold(),
                    actual,
                    points,
                    delta,
                    marker,
                    team.cyan()
                )
            } else {
                format!(
                    "{}  {}  {}  {}  {} {}{}",
                    predicted, name, actual, points, delta, marker, team
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a standings table.
/// Columns: position, name, constructor (drivers only), points.
pub fn format_standings(entries: &[StandingEntry], championship: Championship, use_colors: bool) -> String {
    if entries.is_empty() {
        return "No standings available yet.".to_string();
    }

    let fixed_width = 4 + 2 + 6 + 20;
    let name_width = name_column_width(entries.iter().map(|e| e.name.as_str()), fixed_width);

    entries
        .iter()
        .map(|entry| {
            let position = format!("{:>3}.", entry.position);
            let name = pad_right(&truncate_name(&entry.name, name_width), name_width);
            let points = format!("{:>5}", entry.points);
            let team = match (championship, &entry.team) {
                (Championship::Drivers, Some(team)) => format!("  {}", team),
                _ => String::new(),
            };
            if use_colors {
                format!("{}  {}  {}{}", position.dimmed(), name.bold(), points, team.cyan())
            } else {
                format!("{}  {}  {}{}", position, name, points, team)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format the weekly leaderboard: aggregate totals followed by per-race scores
pub fn format_weekly(board: &WeeklyLeaderboard, use_colors: bool) -> String {
    if board.aggregate.is_empty() {
        return "No scores yet. Submit weekly predictions and wait for race results.".to_string();
    }

    let name_width = name_column_width(
        board.aggregate.iter().map(|a| a.display_name.as_str()),
        3 + 1 + 8 + 8,
    );

    let mut lines = Vec::new();
    let heading = "Season total (correct picks / races scored)";
    lines.push(if use_colors { heading.bold().to_string() } else { heading.to_string() });

    for (idx, row) in board.aggregate.iter().enumerate() {
        let index_str = format!("{:>2}.", idx + 1);
        let name = pad_right(&truncate_name(&row.display_name, name_width), name_width);
        if use_colors {
            lines.push(format!(
                "{} {}  {:>4}  {:>4}",
                index_str.dimmed(),
                name.bold(),
                row.total_correct.red(),
                row.races_scored
            ));
        } else {
            lines.push(format!(
                "{} {}  {:>4}  {:>4}",
                index_str, name, row.total_correct, row.races_scored
            ));
        }
    }

    let mut current_round = None;
    for score in &board.per_race {
        if current_round != Some(score.round) {
            current_round = Some(score.round);
            lines.push(String::new());
            let heading = format!("Round {} - {}", score.round, score.race_name);
            lines.push(if use_colors { heading.bold().to_string() } else { heading });
        }
        let name = pad_right(&truncate_name(&score.display_name, name_width), name_width);
        lines.push(format!("    {}  {:>4}", name, score.score));
    }

    lines.join("\n")
}
