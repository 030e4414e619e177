//! Market data providers

pub mod csv_file;
pub mod memory;
pub mod provider;
pub mod validate;
pub mod yahoo;

pub use csv_file::CsvProvider;
pub use memory::InMemoryProvider;
pub use provider::{DataError, MarketDataProvider};
pub use validate::{canonicalize, validate_bars};
pub use yahoo::YahooProvider;

use crate::config::{ProviderConfig, ProviderKind};

/// Construct the provider selected by the configuration.
pub fn build_provider(config: &ProviderConfig) -> Result<Box<dyn MarketDataProvider>, DataError> {
    Ok(match config.kind {
        ProviderKind::Yahoo => Box::new(YahooProvider::new(config)?),
        ProviderKind::Csv => Box::new(CsvProvider::new(&config.csv_dir)),
    })
}
