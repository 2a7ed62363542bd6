use anyhow::{Context, Result};
use futures::stream::{FuturesUnordered, StreamExt};
use tracing::{debug, warn};

use crate::predictions::PredictionStore;
use crate::scoring::{
    rank_championship, rank_combined, rank_weekly, Championship, Leaderboard, Participant,
    RaceResult, ScoringMethod, StandingEntry, WeeklyLeaderboard,
};
use crate::standings::StandingsProvider;

/// Both standings tables for one resolved season.
#[derive(Debug, Clone)]
pub struct SeasonStandings {
    pub season: String,
    pub drivers: Vec<StandingEntry>,
    pub constructors: Vec<StandingEntry>,
}

impl SeasonStandings {
    pub fn table(&self, championship: Championship) -> &[StandingEntry] {
        match championship {
            Championship::Drivers => &self.drivers,
            Championship::Constructors => &self.constructors,
        }
    }

    /// True when a table the board would score against is empty. Scoring
    /// an empty table charges no penalty, so such a board is meaningless.
    pub fn missing_tables(&self, championship: Option<Championship>) -> bool {
        match championship {
            Some(championship) => self.table(championship).is_empty(),
            None => self.drivers.is_empty() || self.constructors.is_empty(),
        }
    }
}

/// Resolve the season and fetch driver and constructor standings concurrently.
pub async fn fetch_season_standings<P: StandingsProvider>(
    provider: &P,
    season: &str,
) -> Result<SeasonStandings> {
    let season = provider.resolve_season(season).await?;
    debug!(%season, "fetching standings");

    let (drivers, constructors) = futures::join!(
        provider.fetch_standings(&season, Championship::Drivers),
        provider.fetch_standings(&season, Championship::Constructors),
    );
    let drivers = drivers.context("Failed to fetch driver standings")?;
    let constructors = constructors.context("Failed to fetch constructor standings")?;

    debug!(
        drivers = drivers.len(),
        constructors = constructors.len(),
        "standings loaded"
    );

    Ok(SeasonStandings {
        season,
        drivers,
        constructors,
    })
}

/// Rank participants for one championship, or on the combined total when
/// `championship` is `None`.
pub fn score_season(
    standings: &SeasonStandings,
    participants: &[Participant],
    store: &PredictionStore,
    championship: Option<Championship>,
    method: ScoringMethod,
) -> Leaderboard {
    match championship {
        Some(championship) => rank_championship(
            participants,
            &store.predictions_for(&standings.season, championship),
            standings.table(championship),
            championship,
            method,
        ),
        None => rank_combined(
            participants,
            &store.predictions_for(&standings.season, Championship::Drivers),
            &standings.drivers,
            &store.predictions_for(&standings.season, Championship::Constructors),
            &standings.constructors,
            method,
        ),
    }
}

/// Fetch race results for every round with weekly picks (or just `round`)
/// and build the weekly leaderboard.
///
/// Rounds whose results fail to load are skipped with a warning; the rest
/// are still scored.
pub async fn fetch_and_score_weekly<P: StandingsProvider>(
    provider: &P,
    participants: &[Participant],
    store: &PredictionStore,
    season: &str,
    round: Option<u32>,
) -> Result<(String, WeeklyLeaderboard)> {
    let season = provider.resolve_season(season).await?;
    let rounds = match round {
        Some(round) => vec![round],
        None => store.weekly_rounds(&season),
    };

    let mut futures = FuturesUnordered::new();
    for round_no in rounds {
        let season = season.clone();
        futures.push(async move { (round_no, provider.fetch_race_result(&season, round_no).await) });
    }

    let mut results: Vec<RaceResult> = Vec::new();
    while let Some((round, result)) = futures.next().await {
        match result {
            Ok(Some(race)) => results.push(race),
            Ok(None) => debug!(round, "no results yet"),
            Err(e) => warn!(round, error = %e, "failed to fetch race results"),
        }
    }
    results.sort_by_key(|r| r.round);

    let picks = store.weekly_for(&season, round);
    let board = rank_weekly(participants, &picks, &results);
    Ok((season, board))
}
