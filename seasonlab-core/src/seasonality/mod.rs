//! Seasonality engine: full-year windowing, the trading-day aligned curve,
//! month tick labels and monthly return tables.
//!
//! Everything here is pure: no I/O, deterministic for a given input.

pub mod axis;
pub mod curve;
pub mod monthly;
pub mod window;

pub use axis::{AxisLabels, AxisTick, MONTHS, TRADING_DAYS_PER_MONTH};
pub use curve::{build_seasonal_curve, longest_year, CurvePoint, SeasonalCurve};
pub use monthly::{build_monthly_table, MonthlySummary, MonthlyTable, SUMMARY_LABEL};
pub use window::{full_year_window, partition_by_year, YearColumn};

use thiserror::Error;

/// Why a seasonality computation could not run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeasonalityError {
    #[error("empty price history")]
    EmptyHistory,

    #[error("less than one full calendar year of history: {reason}")]
    InsufficientHistory { reason: &'static str },
}
