//! Report assembly: curve, axis labels and monthly tables plus asset metadata.

use crate::data::{validate_bars, DataError};
use crate::domain::{daily_returns, AssetMetadata, DailyBar};
use crate::seasonality::curve::curve_from_columns;
use crate::seasonality::monthly::table_from_columns;
use crate::seasonality::{
    full_year_window, partition_by_year, AxisLabels, MonthlySummary, MonthlyTable, SeasonalCurve,
    SeasonalityError,
};
use serde::Serialize;
use thiserror::Error;

/// Everything a presentation layer needs to draw the seasonality page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonalityReport {
    pub ticker: String,
    /// e.g. "S&P 500 Seasonal chart"
    pub title: String,
    /// e.g. "^GSPC / 1928 - 2023 (96 years)"
    pub meta: String,
    pub first_year: i32,
    pub last_year: i32,
    pub year_count: usize,
    pub curve: SeasonalCurve,
    /// Horizontal reference line drawn across the chart.
    pub zero_line: f64,
    /// `[min, max]` of the curve.
    pub y_domain: (f64, f64),
    pub axis_labels: AxisLabels,
    pub summary: MonthlySummary,
    pub monthly: MonthlyTable,
}

/// Why no report could be produced for a ticker.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReportError {
    #[error("no ticker given")]
    EmptyTicker,

    #[error("no price history for `{ticker}`")]
    NoData { ticker: String },

    #[error("not enough history for `{ticker}`: {source}")]
    InsufficientHistory {
        ticker: String,
        #[source]
        source: SeasonalityError,
    },

    #[error("data provider failed for `{ticker}`: {source}")]
    Provider {
        ticker: String,
        #[source]
        source: DataError,
    },
}

impl ReportError {
    /// The single message end users see, whatever the cause.
    pub fn user_message(&self) -> String {
        match self {
            ReportError::EmptyTicker => "Please select an asset.".to_string(),
            ReportError::NoData { ticker }
            | ReportError::InsufficientHistory { ticker, .. }
            | ReportError::Provider { ticker, .. } => {
                format!("Cannot find asset with ticker `{ticker}`. Asset may be delisted.")
            }
        }
    }

    /// True for transport failures that may go away on retry.
    pub fn is_transient(&self) -> bool {
        match self {
            ReportError::Provider { source, .. } => source.is_transient(),
            _ => false,
        }
    }

    pub fn provider(ticker: &str, source: DataError) -> Self {
        ReportError::Provider {
            ticker: ticker.to_string(),
            source,
        }
    }

    fn from_seasonality(ticker: &str, err: SeasonalityError) -> Self {
        match err {
            SeasonalityError::EmptyHistory => ReportError::NoData {
                ticker: ticker.to_string(),
            },
            other => ReportError::InsufficientHistory {
                ticker: ticker.to_string(),
                source: other,
            },
        }
    }
}

/// Build the seasonality report for `ticker` from its daily bars.
///
/// Pure: the same bars and metadata always give the same report.
pub fn build_report(
    ticker: &str,
    bars: &[DailyBar],
    metadata: &AssetMetadata,
) -> Result<SeasonalityReport, ReportError> {
    if bars.is_empty() {
        return Err(ReportError::NoData {
            ticker: ticker.to_string(),
        });
    }
    validate_bars(bars).map_err(|e| ReportError::provider(ticker, e))?;

    let returns = daily_returns(bars);
    let window =
        full_year_window(&returns).map_err(|e| ReportError::from_seasonality(ticker, e))?;
    let columns = partition_by_year(window);

    let curve =
        curve_from_columns(&columns).map_err(|e| ReportError::from_seasonality(ticker, e))?;
    let monthly = table_from_columns(&columns);
    let summary = monthly.summary();

    // A non-empty window always yields at least one year.
    let (Some(first_year), Some(last_year)) = (monthly.first_year(), monthly.last_year()) else {
        return Err(ReportError::NoData {
            ticker: ticker.to_string(),
        });
    };
    let year_count = monthly.year_count();

    Ok(SeasonalityReport {
        ticker: ticker.to_string(),
        title: format!("{} Seasonal chart", metadata.display_name_or(ticker)),
        meta: format!("{ticker} / {first_year} - {last_year} ({year_count} years)"),
        first_year,
        last_year,
        year_count,
        y_domain: curve.domain(),
        axis_labels: AxisLabels::for_length(curve.len()),
        zero_line: 0.0,
        curve,
        summary,
        monthly,
    })
}
