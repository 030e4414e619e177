//! SeasonLab Core: seasonal return patterns from daily price history.
//!
//! This crate contains:
//! - Domain types (daily bars, returns, asset metadata)
//! - Market data providers (Yahoo Finance, CSV files, in-memory)
//! - The seasonality engine: full-year windowing, trading-day aligned
//!   average cumulative return curve, month tick labels, monthly tables
//! - Report assembly with typed errors
//! - A TTL report cache and the service that ties provider, engine and cache
//! - TOML configuration

pub mod cache;
pub mod config;
pub mod data;
pub mod domain;
pub mod report;
pub mod seasonality;
pub mod service;
pub mod synthetic;

pub use cache::ReportCache;
pub use config::SeasonLabConfig;
pub use report::{build_report, ReportError, SeasonalityReport};
pub use service::SeasonalityService;
