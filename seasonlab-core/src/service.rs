//! Ticker in, report or error out: provider fetch, report build, caching.

use crate::cache::ReportCache;
use crate::data::MarketDataProvider;
use crate::report::{build_report, ReportError, SeasonalityReport};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Runs one ticker end to end: cache lookup, fetch, build, store.
///
/// Synchronous; the only blocking point is the provider call. Nothing is
/// retried.
pub struct SeasonalityService<P> {
    provider: P,
    cache: ReportCache,
}

impl<P: MarketDataProvider> SeasonalityService<P> {
    pub fn new(provider: P, cache: ReportCache) -> Self {
        Self { provider, cache }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn cache(&self) -> &ReportCache {
        &self.cache
    }

    /// Report for `ticker`. Surrounding whitespace is ignored; case is kept
    /// since providers are case-sensitive.
    pub fn report(&mut self, ticker: &str) -> Result<Arc<SeasonalityReport>, ReportError> {
        let ticker = ticker.trim();
        if ticker.is_empty() {
            return Err(ReportError::EmptyTicker);
        }

        if let Some(report) = self.cache.get(ticker) {
            return Ok(report);
        }

        debug!(ticker, provider = self.provider.name(), "fetching history");
        let bars = self
            .provider
            .fetch_history(ticker)
            .map_err(|e| ReportError::provider(ticker, e))?;
        if bars.is_empty() {
            info!(ticker, "provider returned no history");
            return Err(ReportError::NoData {
                ticker: ticker.to_string(),
            });
        }

        let metadata = self
            .provider
            .fetch_metadata(ticker)
            .map_err(|e| ReportError::provider(ticker, e))?;

        let report = build_report(ticker, &bars, &metadata).map_err(|e| {
            warn!(ticker, error = %e, "report build failed");
            e
        })?;
        info!(
            ticker,
            bars = bars.len(),
            years = report.year_count,
            "built seasonality report"
        );

        let report = Arc::new(report);
        self.cache.insert(ticker, Arc::clone(&report));
        Ok(report)
    }
}
