//! Daily bars and the simple returns derived from them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Closing price for a single symbol on a single trading day.
///
/// Providers return these ascending by date with no duplicate dates
/// (see [`crate::data::validate_bars`]).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyBar {
    pub date: NaiveDate,
    pub close: f64,
}

impl DailyBar {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }
}

/// Simple (non-compounded) return of one trading day against the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyReturn {
    pub date: NaiveDate,
    pub pct_change: f64,
}

/// Convert a close series into day-over-day returns.
///
/// `pct_change[i] = close[i] / close[i - 1] - 1`; the first bar has no
/// predecessor and gets a return of 0. The output is aligned one-to-one
/// with the input.
pub fn daily_returns(bars: &[DailyBar]) -> Vec<DailyReturn> {
    let mut returns = Vec::with_capacity(bars.len());
    let mut prev_close: Option<f64> = None;

    for bar in bars {
        let pct_change = match prev_close {
            Some(prev) => bar.close / prev - 1.0,
            None => 0.0,
        };
        returns.push(DailyReturn {
            date: bar.date,
            pct_change,
        });
        prev_close = Some(bar.close);
    }

    returns
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn first_return_is_zero() {
        let bars = vec![DailyBar::new(d(2024, 1, 2), 100.0)];
        let returns = daily_returns(&bars);
        assert_eq!(returns.len(), 1);
        assert_eq!(returns[0].pct_change, 0.0);
    }

    #[test]
    fn returns_are_day_over_day() {
        let bars = vec![
            DailyBar::new(d(2024, 1, 2), 100.0),
            DailyBar::new(d(2024, 1, 3), 110.0),
            DailyBar::new(d(2024, 1, 4), 99.0),
        ];
        let returns = daily_returns(&bars);

        assert_eq!(returns.len(), 3);
        assert!((returns[1].pct_change - 0.10).abs() < 1e-12);
        assert!((returns[2].pct_change + 0.10).abs() < 1e-12);
        assert_eq!(returns[2].date, d(2024, 1, 4));
    }

    #[test]
    fn empty_input_gives_empty_returns() {
        assert!(daily_returns(&[]).is_empty());
    }

    #[test]
    fn bar_serialization_roundtrip() {
        let bar = DailyBar::new(d(2024, 1, 2), 101.5);
        let json = serde_json::to_string(&bar).unwrap();
        let deser: DailyBar = serde_json::from_str(&json).unwrap();
        assert_eq!(bar, deser);
    }
}
