use anyhow::{anyhow, Context, Result};
use tokio_retry::{strategy::ExponentialBackoff, Retry};
use tracing::{debug, info, warn};

use super::cache::ResponseCache;
use super::types::ApiResponse;
use super::StandingsProvider;
use crate::config::ApiConfig;
use crate::scoring::{Championship, RaceResult, StandingEntry, WEEKLY_SLOTS};

/// Standings provider backed by the Ergast-compatible HTTP API, with a
/// fallback mirror and an on-disk response cache.
pub struct HttpStandingsProvider {
    client: reqwest::Client,
    endpoints: Vec<String>,
    cache: ResponseCache,
}

impl HttpStandingsProvider {
    pub fn new(api: &ApiConfig, cache: ResponseCache) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("paddock-picks/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(15))
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self {
            client,
            endpoints: api.endpoints(),
            cache,
        })
    }

    async fn get_with_retry(&self, url: &str) -> Result<String, reqwest::Error> {
        // Retry strategy: exponential backoff with 3 attempts
        let retry_strategy = ExponentialBackoff::from_millis(100)
            .max_delay(std::time::Duration::from_secs(5))
            .take(3);

        let client = &self.client;
        Retry::spawn(retry_strategy, || async move {
            client
                .get(url)
                .send()
                .await?
                .error_for_status()?
                .text()
                .await
        })
        .await
    }

    /// Fetch `path` (relative to the API root), trying each endpoint in turn.
    ///
    /// The cache is keyed by path so a response from the fallback mirror
    /// satisfies later requests too. A body that does not parse counts as a
    /// failed request. When every endpoint fails a stale cached body is
    /// returned instead of an error.
    async fn fetch(&self, path: &str) -> Result<ApiResponse> {
        let cached = self.cache.read(path);
        if let Some(hit) = cached.as_ref().filter(|hit| hit.fresh) {
            match parse_response(&hit.body, path) {
                Ok(parsed) => {
                    debug!(path, "serving fresh cached response");
                    return Ok(parsed);
                }
                Err(e) => warn!(path, error = %e, "ignoring unreadable cache entry"),
            }
        }

        let mut last_error: Option<anyhow::Error> = None;
        for endpoint in &self.endpoints {
            let url = format!("{}/{}", endpoint, path);
            debug!(%url, "fetching");
            let body = match self.get_with_retry(&url).await {
                Ok(body) => body,
                Err(e) => {
                    warn!(%url, error = %e, "request failed");
                    last_error = Some(anyhow!(e).context(format!("Request to {} failed", url)));
                    continue;
                }
            };
            match parse_response(&body, path) {
                Ok(parsed) => {
                    self.cache.write(path, &body);
                    info!(%url, "fetched");
                    return Ok(parsed);
                }
                Err(e) => {
                    warn!(%url, error = %e, "unusable response");
                    last_error = Some(e);
                }
            }
        }

        if let Some(hit) = cached {
            if let Ok(parsed) = parse_response(&hit.body, path) {
                warn!(path, "all endpoints failed, using stale cached data");
                return Ok(parsed);
            }
        }

        match last_error {
            Some(e) => Err(e.context(format!("Failed to fetch {}", path))),
            None => anyhow::bail!("No API endpoints configured"),
        }
    }
}

fn parse_response(body: &str, path: &str) -> Result<ApiResponse> {
    serde_json::from_str(body).with_context(|| format!("Failed to parse API response for {}", path))
}

/// Standings path for a season ("current" or a year)
pub fn standings_path(season: &str, championship: Championship) -> String {
    match championship {
        Championship::Drivers => format!("{}/driverStandings.json", season),
        Championship::Constructors => format!("{}/constructorStandings.json", season),
    }
}

/// Convert an API response into a position-ordered standings table
pub fn standings_from_response(
    response: ApiResponse,
    championship: Championship,
) -> Result<Vec<StandingEntry>> {
    let list = response
        .mr_data
        .standings_table
        .and_then(|table| table.standings_lists.into_iter().next());

    let Some(list) = list else {
        // Season not started yet: the feed returns no lists
        return Ok(Vec::new());
    };

    let mut entries: Vec<StandingEntry> = match championship {
        Championship::Drivers => list
            .driver_standings
            .context("No driver standings data available")?
            .into_iter()
            .enumerate()
            .map(|(idx, s)| s.into_entry(idx))
            .collect(),
        Championship::Constructors => list
            .constructor_standings
            .context("No constructor standings data available")?
            .into_iter()
            .enumerate()
            .map(|(idx, s)| s.into_entry(idx))
            .collect(),
    };
    entries.sort_by_key(|e| e.position);
    Ok(entries)
}

/// Convert a race results response into the top-ten family names
pub fn race_result_from_response(response: ApiResponse, round: u32) -> Option<RaceResult> {
    let race = response
        .mr_data
        .race_table
        .and_then(|table| table.races.into_iter().next())?;

    let top10: Vec<String> = race
        .results
        .into_iter()
        .take(WEEKLY_SLOTS)
        .map(|r| r.driver.family_name)
        .filter(|name| !name.is_empty())
        .collect();

    if top10.is_empty() {
        return None;
    }

    Some(RaceResult {
        round: race.round.and_then(|r| r.parse().ok()).unwrap_or(round),
        race_name: race.race_name,
        top10,
    })
}

#[async_trait::async_trait]
impl StandingsProvider for HttpStandingsProvider {
    async fn resolve_season(&self, season: &str) -> Result<String> {
        if season != "current" {
            return Ok(season.to_string());
        }
        let response = self.fetch("current.json").await?;
        response
            .mr_data
            .race_table
            .and_then(|t| t.season)
            .context("Current season not reported by the API")
    }

    async fn fetch_standings(
        &self,
        season: &str,
        championship: Championship,
    ) -> Result<Vec<StandingEntry>> {
        let response = self.fetch(&standings_path(season, championship)).await?;
        standings_from_response(response, championship)
    }

    async fn fetch_race_result(&self, season: &str, round: u32) -> Result<Option<RaceResult>> {
        let response = self
            .fetch(&format!("{}/{}/results.json", season, round))
            .await?;
        Ok(race_result_from_response(response, round))
    }
}
