//! In-memory provider for tests, demos and offline fixtures.

use super::provider::{DataError, MarketDataProvider};
use crate::domain::{AssetMetadata, DailyBar};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Serves pre-loaded histories. Unknown tickers have an empty history.
///
/// Counts history fetches so callers can check caching behaviour.
#[derive(Debug, Default)]
pub struct InMemoryProvider {
    histories: HashMap<String, Vec<DailyBar>>,
    metadata: HashMap<String, AssetMetadata>,
    failures: HashMap<String, DataError>,
    history_fetches: AtomicUsize,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_history(mut self, ticker: &str, bars: Vec<DailyBar>) -> Self {
        self.histories.insert(ticker.to_string(), bars);
        self
    }

    pub fn with_name(mut self, ticker: &str, name: &str) -> Self {
        self.metadata
            .insert(ticker.to_string(), AssetMetadata::named(name));
        self
    }

    /// Make every fetch for `ticker` fail with `error`.
    pub fn with_failure(mut self, ticker: &str, error: DataError) -> Self {
        self.failures.insert(ticker.to_string(), error);
        self
    }

    /// Number of `fetch_history` calls so far.
    pub fn history_fetches(&self) -> usize {
        self.history_fetches.load(Ordering::Relaxed)
    }

    fn check_failure(&self, ticker: &str) -> Result<(), DataError> {
        match self.failures.get(ticker) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

impl MarketDataProvider for InMemoryProvider {
    fn name(&self) -> &str {
        "in_memory"
    }

    fn fetch_history(&self, ticker: &str) -> Result<Vec<DailyBar>, DataError> {
        self.history_fetches.fetch_add(1, Ordering::Relaxed);
        self.check_failure(ticker)?;
        Ok(self.histories.get(ticker).cloned().unwrap_or_default())
    }

    fn fetch_metadata(&self, ticker: &str) -> Result<AssetMetadata, DataError> {
        self.check_failure(ticker)?;
        Ok(self.metadata.get(ticker).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn unknown_ticker_is_empty() {
        let provider = InMemoryProvider::new();
        assert!(provider.fetch_history("NOPE").unwrap().is_empty());
        assert_eq!(provider.history_fetches(), 1);
    }

    #[test]
    fn serves_loaded_history_and_name() {
        let bar = DailyBar::new(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(), 10.0);
        let provider = InMemoryProvider::new()
            .with_history("SPY", vec![bar])
            .with_name("SPY", "SPDR S&P 500");

        assert_eq!(provider.fetch_history("SPY").unwrap(), vec![bar]);
        assert_eq!(
            provider.fetch_metadata("SPY").unwrap().display_name.as_deref(),
            Some("SPDR S&P 500")
        );
    }

    #[test]
    fn configured_failure_is_returned() {
        let provider = InMemoryProvider::new()
            .with_failure("SPY", DataError::NetworkUnreachable("down".into()));
        assert!(provider.fetch_history("SPY").is_err());
        assert!(provider.fetch_metadata("SPY").is_err());
    }
}
