//! Local snapshot caching
//!
//! Caches implied vol snapshots on disk so repeated pricing runs against the
//! same ticker do not refetch every option chain.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use super::provider::MarketDataProvider;
use crate::core::{AsianError, AsianResult, VolQuoteSnapshot};

/// Cache configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Cache directory
    pub cache_dir: PathBuf,
    /// Maximum age before refresh (in minutes)
    pub max_age_minutes: i64,
    /// Whether to use cache
    pub enabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from("./data/cache"),
            max_age_minutes: 15,
            enabled: true,
        }
    }
}

/// On-disk store of vol snapshots, one JSON file per ticker
pub struct SnapshotCache {
    config: CacheConfig,
}

impl SnapshotCache {
    pub fn new(config: CacheConfig) -> AsianResult<Self> {
        if config.enabled && !config.cache_dir.exists() {
            fs::create_dir_all(&config.cache_dir)?;
        }

        Ok(Self { config })
    }

    fn path_for(&self, ticker: &str) -> PathBuf {
        self.config
            .cache_dir
            .join(format!("{}_snapshot.json", ticker.to_uppercase()))
    }

    /// Cached snapshot exists and is younger than the configured age
    pub fn is_valid(&self, ticker: &str) -> bool {
        if !self.config.enabled {
            return false;
        }

        let path = self.path_for(ticker);
        let modified = fs::metadata(&path).and_then(|m| m.modified());
        match modified {
            Ok(modified) => {
                let modified: DateTime<Utc> = modified.into();
                Utc::now() - modified < Duration::minutes(self.config.max_age_minutes)
            }
            Err(_) => false,
        }
    }

    pub fn save(&self, ticker: &str, snapshot: &VolQuoteSnapshot) -> AsianResult<()> {
        if !self.config.enabled {
            return Ok(());
        }

        let path = self.path_for(ticker);
        let json = serde_json::to_string_pretty(snapshot)
            .map_err(|e| AsianError::serialization(e.to_string()))?;

        // Readers only ever see a complete file
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        if let Err(e) = fs::rename(&tmp, &path) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }

        tracing::info!("Cached snapshot for {} at {:?}", ticker, path);
        Ok(())
    }

    /// Load a fresh snapshot, `None` when missing or stale.
    ///
    /// An unreadable or corrupt entry is removed and reported as a miss.
    pub fn load(&self, ticker: &str) -> AsianResult<Option<VolQuoteSnapshot>> {
        if !self.is_valid(ticker) {
            return Ok(None);
        }

        let path = self.path_for(ticker);
        let parsed = fs::read_to_string(&path)
            .map_err(AsianError::from)
            .and_then(|json| {
                serde_json::from_str::<VolQuoteSnapshot>(&json)
                    .map_err(|e| AsianError::serialization(e.to_string()))
            });

        match parsed {
            Ok(snapshot) => {
                tracing::info!("Loaded snapshot for {} from cache", ticker);
                Ok(Some(snapshot))
            }
            Err(e) => {
                tracing::warn!("Discarding cached snapshot {:?}: {}", path, e);
                if let Err(e) = fs::remove_file(&path) {
                    tracing::warn!("Failed to remove {:?}: {}", path, e);
                }
                Ok(None)
            }
        }
    }

    /// Remove the cached snapshot for a ticker
    pub fn clear(&self, ticker: &str) -> AsianResult<()> {
        let path = self.path_for(ticker);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    /// Clear all cache
    pub fn clear_all(&self) -> AsianResult<()> {
        if self.config.cache_dir.exists() {
            fs::remove_dir_all(&self.config.cache_dir)?;
            fs::create_dir_all(&self.config.cache_dir)?;
        }
        Ok(())
    }

    /// List cached tickers
    pub fn list_cached(&self) -> AsianResult<Vec<String>> {
        let mut tickers = Vec::new();

        if !self.config.cache_dir.exists() {
            return Ok(tickers);
        }

        for entry in fs::read_dir(&self.config.cache_dir)? {
            let file_name = entry?.file_name().to_string_lossy().to_string();
            if let Some(ticker) = file_name.strip_suffix("_snapshot.json") {
                tickers.push(ticker.to_string());
            }
        }

        tickers.sort();
        Ok(tickers)
    }
}

/// Provider wrapper serving snapshots from the cache when fresh.
///
/// Spot and dividend yield always go to the inner provider.
pub struct CachedProvider<P> {
    inner: P,
    cache: SnapshotCache,
}

impl<P: MarketDataProvider> CachedProvider<P> {
    pub fn new(inner: P, config: CacheConfig) -> AsianResult<Self> {
        Ok(Self {
            inner,
            cache: SnapshotCache::new(config)?,
        })
    }

    /// Force refresh (bypass cache)
    pub fn refresh_snapshot(&self, ticker: &str) -> AsianResult<VolQuoteSnapshot> {
        self.cache.clear(ticker)?;
        self.option_chain_snapshot(ticker)
    }
}

impl<P: MarketDataProvider> MarketDataProvider for CachedProvider<P> {
    fn spot_price(&self, ticker: &str) -> AsianResult<f64> {
        self.inner.spot_price(ticker)
    }

    fn dividend_yield(&self, ticker: &str) -> AsianResult<f64> {
        self.inner.dividend_yield(ticker)
    }

    fn spot_and_dividend(&self, ticker: &str) -> AsianResult<(f64, f64)> {
        self.inner.spot_and_dividend(ticker)
    }

    fn option_chain_snapshot(&self, ticker: &str) -> AsianResult<VolQuoteSnapshot> {
        match self.cache.load(ticker) {
            Ok(Some(snapshot)) => return Ok(snapshot),
            Ok(None) => {}
            Err(e) => tracing::warn!("Snapshot cache unavailable for {}: {}", ticker, e),
        }

        tracing::info!("Fetching fresh snapshot for {}", ticker);
        let snapshot = self.inner.option_chain_snapshot(ticker)?;
        if let Err(e) = self.cache.save(ticker, &snapshot) {
            tracing::warn!("Failed to cache snapshot for {}: {}", ticker, e);
        }

        Ok(snapshot)
    }
}
