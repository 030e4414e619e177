//! Market data provider trait and structured error types.
//!
//! The MarketDataProvider trait abstracts over data sources (Yahoo Finance,
//! CSV files, in-memory fixtures) so the service can swap implementations and
//! tests can run offline.

use crate::domain::{AssetMetadata, DailyBar};
use thiserror::Error;

/// Structured error types for data operations.
///
/// Displayable in both CLI and TUI contexts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("HTTP {status} from provider for {ticker}")]
    Http { status: u16, ticker: String },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("CSV error: {0}")]
    Csv(String),

    #[error("data error: {0}")]
    Other(String),
}

impl DataError {
    /// Failures that may succeed if the same request is made again later.
    pub fn is_transient(&self) -> bool {
        match self {
            DataError::NetworkUnreachable(_) => true,
            DataError::Http { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

/// Source of daily price history and asset metadata.
///
/// Implementations do not retry; a failure is returned as-is. An unknown or
/// delisted ticker is an empty history, not an error.
pub trait MarketDataProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Full available daily history, ascending by date.
    fn fetch_history(&self, ticker: &str) -> Result<Vec<DailyBar>, DataError>;

    /// Descriptive metadata (display name).
    fn fetch_metadata(&self, ticker: &str) -> Result<AssetMetadata, DataError>;
}

impl<P: MarketDataProvider + ?Sized> MarketDataProvider for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn fetch_history(&self, ticker: &str) -> Result<Vec<DailyBar>, DataError> {
        (**self).fetch_history(ticker)
    }

    fn fetch_metadata(&self, ticker: &str) -> Result<AssetMetadata, DataError> {
        (**self).fetch_metadata(ticker)
    }
}
