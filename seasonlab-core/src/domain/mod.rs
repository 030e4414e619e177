//! Domain types for SeasonLab

pub mod asset;
pub mod bar;

pub use asset::AssetMetadata;
pub use bar::{daily_returns, DailyBar, DailyReturn};

/// Ticker type alias
pub type Ticker = String;
