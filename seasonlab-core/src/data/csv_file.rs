//! CSV file provider: one `{TICKER}.csv` per ticker in a directory.
//!
//! Expected header includes `Date` (YYYY-MM-DD) and `Close`; other columns
//! (Open, High, Adj Close, ...) are ignored. An empty `Close` cell skips the
//! row. This is the layout of Yahoo's historical-data CSV export.

use super::provider::{DataError, MarketDataProvider};
use super::validate::validate_bars;
use crate::domain::{AssetMetadata, DailyBar};
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Date", alias = "date")]
    date: String,
    #[serde(rename = "Close", alias = "close")]
    close: Option<f64>,
}

/// Reads daily closes from CSV files on disk.
pub struct CsvProvider {
    dir: PathBuf,
}

impl CsvProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file for `ticker`, or an error if the ticker would escape
    /// the directory.
    fn path_for(&self, ticker: &str) -> Result<PathBuf, DataError> {
        if ticker.contains(['/', '\\']) || ticker.contains("..") {
            return Err(DataError::Validation(format!(
                "ticker '{ticker}' is not a valid file name"
            )));
        }
        Ok(self.dir.join(format!("{ticker}.csv")))
    }
}

/// Parse CSV content into bars, ascending by date.
pub fn read_bars<R: std::io::Read>(reader: R) -> Result<Vec<DailyBar>, DataError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut bars = Vec::new();

    for (line, record) in rdr.deserialize::<CsvRow>().enumerate() {
        let row = record.map_err(|e| DataError::Csv(format!("row {}: {e}", line + 1)))?;
        let Some(close) = row.close else {
            continue;
        };
        let date = NaiveDate::parse_from_str(row.date.trim(), "%Y-%m-%d").map_err(|e| {
            DataError::Csv(format!("row {}: bad date '{}': {e}", line + 1, row.date))
        })?;
        bars.push(DailyBar { date, close });
    }

    bars.sort_by_key(|b| b.date);
    validate_bars(&bars)?;
    Ok(bars)
}

impl MarketDataProvider for CsvProvider {
    fn name(&self) -> &str {
        "csv"
    }

    fn fetch_history(&self, ticker: &str) -> Result<Vec<DailyBar>, DataError> {
        let path = self.path_for(ticker)?;
        if !path.exists() {
            debug!(ticker, path = %path.display(), "no CSV file for ticker");
            return Ok(Vec::new());
        }

        let file = std::fs::File::open(&path)
            .map_err(|e| DataError::Csv(format!("open {}: {e}", path.display())))?;
        read_bars(file)
    }

    fn fetch_metadata(&self, ticker: &str) -> Result<AssetMetadata, DataError> {
        self.path_for(ticker)?;
        Ok(AssetMetadata::default())
    }
}
