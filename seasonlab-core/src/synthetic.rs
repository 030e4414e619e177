//! Deterministic synthetic series for tests, benchmarks and demos.
//!
//! Each year gets `days_per_month` trading days in every month (the 1st..Nth
//! of the month), so a year has `12 * days_per_month` bars.

use crate::domain::{DailyBar, DailyReturn};
use chrono::NaiveDate;

/// Largest `days_per_month` that fits every month.
pub const MAX_DAYS_PER_MONTH: u32 = 28;

fn trading_days(year: i32, days_per_month: u32) -> impl Iterator<Item = NaiveDate> {
    let days = days_per_month.clamp(1, MAX_DAYS_PER_MONTH);
    (1..=12u32).flat_map(move |m| {
        (1..=days).filter_map(move |d| NaiveDate::from_ymd_opt(year, m, d))
    })
}

/// Returns of exactly `rates[i]` on every trading day of year `first_year + i`.
pub fn constant_returns(first_year: i32, rates: &[f64], days_per_month: u32) -> Vec<DailyReturn> {
    rates
        .iter()
        .enumerate()
        .flat_map(|(i, &rate)| {
            trading_days(first_year + i as i32, days_per_month).map(move |date| DailyReturn {
                date,
                pct_change: rate,
            })
        })
        .collect()
}

/// Close prices compounding at `rates[i]` per day in year `first_year + i`.
///
/// Starts with a seed bar at 100.0 on December 31 of the previous year, so the
/// first January bar already carries that year's rate.
pub fn constant_return_bars(first_year: i32, rates: &[f64], days_per_month: u32) -> Vec<DailyBar> {
    let mut bars = Vec::new();
    let mut close = 100.0;
    if let Some(seed) = NaiveDate::from_ymd_opt(first_year - 1, 12, 31) {
        bars.push(DailyBar { date: seed, close });
    }
    for r in constant_returns(first_year, rates, days_per_month) {
        close *= 1.0 + r.pct_change;
        bars.push(DailyBar {
            date: r.date,
            close,
        });
    }
    bars
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::daily_returns;

    #[test]
    fn year_has_twelve_months_of_days() {
        let returns = constant_returns(2020, &[0.01, 0.02], 21);
        assert_eq!(returns.len(), 2 * 252);
        assert_eq!(returns[252].date, NaiveDate::from_ymd_opt(2021, 1, 1).unwrap());
        assert_eq!(returns[252].pct_change, 0.02);
    }

    #[test]
    fn bars_reproduce_rates() {
        let bars = constant_return_bars(2020, &[0.01], 5);
        assert_eq!(bars.len(), 1 + 60);
        let returns = daily_returns(&bars);
        for r in &returns[1..] {
            assert!((r.pct_change - 0.01).abs() < 1e-12);
        }
    }
}
