use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

/// Configuration for HTTP response caching
#[derive(Clone, Debug)]
pub struct CacheConfig {
    pub enabled: bool, // false when --no-cache
    pub ttl: Duration,
    pub path: PathBuf,
}

impl CacheConfig {
    pub fn new(enabled: bool, ttl: Duration) -> Self {
        Self {
            enabled,
            ttl,
            path: get_cache_path(),
        }
    }
}

/// Get the platform-appropriate cache directory for paddock-picks
pub fn get_cache_path() -> PathBuf {
    dirs::cache_dir()
        .map(|p| p.join("paddock-picks/http-cache"))
        .unwrap_or_else(|| {
            PathBuf::from(format!(
                "{}/.cache/paddock-picks/http-cache",
                std::env::var("HOME").unwrap_or_default()
            ))
        })
}

/// Clear the HTTP cache directory
pub fn clear_cache(cache_path: &std::path::Path) -> Result<()> {
    match std::fs::remove_dir_all(cache_path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).context("Failed to remove cache directory"),
    }
}

/// Serializable representation of a cached response body
#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    fetched_at: DateTime<Utc>,
    body: String,
}

/// A cached body and whether it is still within the TTL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedBody {
    pub body: String,
    pub fresh: bool,
}

/// Disk-persistent response cache keyed by request URL.
///
/// Fresh entries are served without a request. Stale entries are kept so
/// they can be served when every endpoint is unreachable.
#[derive(Clone, Debug)]
pub struct ResponseCache {
    config: CacheConfig,
}

impl ResponseCache {
    pub fn new(config: CacheConfig) -> Self {
        Self { config }
    }

    /// Read a cached body, fresh or stale
    pub fn read(&self, key: &str) -> Option<CachedBody> {
        if !self.config.enabled {
            return None;
        }
        let bytes = cacache::read_sync(&self.config.path, key).ok()?;
        let entry: CacheEntry = serde_json::from_slice(&bytes).ok()?;
        let age = Utc::now().signed_duration_since(entry.fetched_at);
        let fresh = age
            .to_std()
            .map(|age| age < self.config.ttl)
            // fetched_at in the future (clock skew) counts as fresh
            .unwrap_or(true);
        debug!(key, fresh, "cache hit");
        Some(CachedBody {
            body: entry.body,
            fresh,
        })
    }

    /// Write a body to the cache. Errors are ignored; the cache is best-effort.
    pub fn write(&self, key: &str, body: &str) {
        self.write_at(key, body, Utc::now());
    }

    fn write_at(&self, key: &str, body: &str, fetched_at: DateTime<Utc>) {
        if !self.config.enabled {
            return;
        }
        let entry = CacheEntry {
            fetched_at,
            body: body.to_string(),
        };
        if let Ok(serialized) = serde_json::to_vec(&entry) {
            if let Err(e) = cacache::write_sync(&self.config.path, key, &serialized) {
                debug!(key, error = %e, "cache write failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn temp_cache(name: &str, ttl: Duration) -> ResponseCache {
        let path = env::temp_dir().join(format!("paddock_picks_test_cache_{}", name));
        let _ = clear_cache(&path);
        ResponseCache::new(CacheConfig {
            enabled: true,
            ttl,
            path,
        })
    }

    #[test]
    fn test_miss_on_empty_cache() {
        let cache = temp_cache("miss", Duration::from_secs(60));
        assert!(cache.read("https://example.test/a.json").is_none());
    }

    #[test]
    fn test_write_then_read_fresh() {
        let cache = temp_cache("fresh", Duration::from_secs(60));
        cache.write("https://example.test/b.json", "{\"ok\":true}");
        let hit = cache.read("https://example.test/b.json").unwrap();
        assert_eq!(hit.body, "{\"ok\":true}");
        assert!(hit.fresh);
    }

    #[test]
    fn test_old_entry_is_stale() {
        let cache = temp_cache("stale", Duration::from_secs(60));
        let an_hour_ago = Utc::now() - chrono::Duration::hours(1);
        cache.write_at("https://example.test/c.json", "{}", an_hour_ago);
        let hit = cache.read("https://example.test/c.json").unwrap();
        assert!(!hit.fresh);
    }

    #[test]
    fn test_disabled_cache_never_hits() {
        let path = env::temp_dir().join("paddock_picks_test_cache_disabled");
        let cache = ResponseCache::new(CacheConfig {
            enabled: false,
            ttl: Duration::from_secs(60),
            path,
        });
        cache.write("https://example.test/d.json", "{}");
        assert!(cache.read("https://example.test/d.json").is_none());
    }

    #[test]
    fn test_clear_missing_dir_is_ok() {
        let path = env::temp_dir().join("paddock_picks_test_cache_never_created");
        assert!(clear_cache(&path).is_ok());
    }
}
