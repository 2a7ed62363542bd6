pub mod cache;
pub mod client;
pub mod types;

pub use cache::{clear_cache, get_cache_path, CacheConfig, ResponseCache};
pub use client::HttpStandingsProvider;

use anyhow::Result;

use crate::scoring::{Championship, RaceResult, StandingEntry};

/// Source of championship standings and race results.
///
/// Any implementation returning position-ordered, deduplicated standings can
/// stand in for the HTTP API.
#[async_trait::async_trait]
pub trait StandingsProvider: Send + Sync {
    /// Turn "current" into a concrete year. Years pass through unchanged.
    async fn resolve_season(&self, season: &str) -> Result<String>;

    async fn fetch_standings(
        &self,
        season: &str,
        championship: Championship,
    ) -> Result<Vec<StandingEntry>>;

    /// Top-ten finishers for a round, or `None` if the race has no results yet
    async fn fetch_race_result(&self, season: &str, round: u32) -> Result<Option<RaceResult>>;
}
