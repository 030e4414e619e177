//! SeasonLab TUI - terminal viewer for seasonal return charts
//!
//! - Ticker input box (Enter fetches)
//! - Average cumulative return chart with month axis and zero line
//! - Monthly average row and scrollable year-by-month table
//! - Background worker owning the data provider and report cache

pub mod app;
pub mod input;
pub mod theme;
pub mod ui;
pub mod worker;

pub use app::AppState;
pub use theme::Theme;
