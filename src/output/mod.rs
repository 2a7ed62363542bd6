pub mod formatter;

pub use formatter::{
    format_details, format_leaderboard, format_standings, format_weekly, should_use_colors,
};
