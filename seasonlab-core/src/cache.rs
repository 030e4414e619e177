//! Time-to-live cache of finished reports, keyed by ticker.
//!
//! Sits outside the engine: the service consults it before fetching and
//! stores successful reports in it. Errors are never cached.

use crate::config::CacheConfig;
use crate::domain::Ticker;
use crate::report::SeasonalityReport;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Debug)]
struct CacheEntry {
    report: Arc<SeasonalityReport>,
    stored_at: Instant,
}

/// Ticker → report map with expiry and a size cap.
#[derive(Debug)]
pub struct ReportCache {
    ttl: Duration,
    max_entries: usize,
    entries: HashMap<Ticker, CacheEntry>,
}

impl ReportCache {
    /// `ttl` of zero disables caching. `max_entries` is clamped to at least 1.
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self {
            ttl,
            max_entries: max_entries.max(1),
            entries: HashMap::new(),
        }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(Duration::from_secs(config.ttl_secs), config.max_entries)
    }

    /// A cache that never holds anything.
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO, 1)
    }

    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    /// Fresh report for `ticker`, if any. Expired entries are dropped.
    pub fn get(&mut self, ticker: &str) -> Option<Arc<SeasonalityReport>> {
        let entry = self.entries.get(ticker)?;
        if entry.stored_at.elapsed() < self.ttl {
            debug!(ticker, "report cache hit");
            return Some(Arc::clone(&entry.report));
        }
        debug!(ticker, "report cache entry expired");
        self.entries.remove(ticker);
        None
    }

    /// Store a report. When full, expired entries go first, then the oldest.
    pub fn insert(&mut self, ticker: &str, report: Arc<SeasonalityReport>) {
        if !self.is_enabled() {
            return;
        }
        if !self.entries.contains_key(ticker) && self.entries.len() >= self.max_entries {
            self.evict();
        }
        self.entries.insert(
            ticker.to_string(),
            CacheEntry {
                report,
                stored_at: Instant::now(),
            },
        );
    }

    /// Drop the entry for `ticker`. Returns whether one existed.
    pub fn invalidate(&mut self, ticker: &str) -> bool {
        self.entries.remove(ticker).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn evict(&mut self) {
        let ttl = self.ttl;
        self.entries.retain(|_, e| e.stored_at.elapsed() < ttl);
        if self.entries.len() < self.max_entries {
            return;
        }
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, e)| e.stored_at)
            .map(|(k, _)| k.clone());
        if let Some(key) = oldest {
            debug!(ticker = %key, "evicting oldest cached report");
            self.entries.remove(&key);
        }
    }
}

impl Default for ReportCache {
    fn default() -> Self {
        Self::from_config(&CacheConfig::default())
    }
}
