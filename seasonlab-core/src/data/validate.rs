//! Bar series checks and normalization.

use super::provider::DataError;
use crate::domain::DailyBar;

/// Check that a series is usable for return computation: strictly ascending
/// dates and finite, positive closes.
pub fn validate_bars(bars: &[DailyBar]) -> Result<(), DataError> {
    for (i, bar) in bars.iter().enumerate() {
        if !bar.close.is_finite() || bar.close <= 0.0 {
            return Err(DataError::Validation(format!(
                "invalid close {} on {}",
                bar.close, bar.date
            )));
        }
        if i > 0 && bars[i - 1].date >= bar.date {
            return Err(DataError::Validation(format!(
                "dates not strictly ascending at {} (after {})",
                bar.date,
                bars[i - 1].date
            )));
        }
    }
    Ok(())
}

/// Sort by date and drop duplicate dates, keeping the last bar seen for a date.
pub fn canonicalize(mut bars: Vec<DailyBar>) -> Vec<DailyBar> {
    // Stable sort keeps provider order within a date; reversing first makes
    // dedup_by_key keep the latest.
    bars.reverse();
    bars.sort_by_key(|b| b.date);
    bars.dedup_by_key(|b| b.date);
    bars
}
