//! Full-calendar-year window and per-year trading-day columns.

use super::SeasonalityError;
use crate::domain::DailyReturn;
use chrono::Datelike;
use std::collections::BTreeMap;

/// Restrict a return series to the span from the first January bar through
/// the last December bar.
///
/// The first entry of the result is in January and the last in December.
pub fn full_year_window(returns: &[DailyReturn]) -> Result<&[DailyReturn], SeasonalityError> {
    if returns.is_empty() {
        return Err(SeasonalityError::EmptyHistory);
    }

    let start = returns
        .iter()
        .position(|r| r.date.month() == 1)
        .ok_or(SeasonalityError::InsufficientHistory {
            reason: "no January bar",
        })?;
    let end = returns
        .iter()
        .rposition(|r| r.date.month() == 12)
        .ok_or(SeasonalityError::InsufficientHistory {
            reason: "no December bar",
        })?;

    if end < start {
        return Err(SeasonalityError::InsufficientHistory {
            reason: "no January-to-December span",
        });
    }

    Ok(&returns[start..=end])
}

/// One calendar year of returns, indexed by trading day within the year.
///
/// Position 0 is the first trading day of the year.
#[derive(Debug, Clone, PartialEq)]
pub struct YearColumn {
    pub year: i32,
    returns: Vec<DailyReturn>,
}

impl YearColumn {
    pub fn new(year: i32) -> Self {
        Self {
            year,
            returns: Vec::new(),
        }
    }

    fn push(&mut self, r: DailyReturn) {
        self.returns.push(r);
    }

    /// Number of trading days recorded for this year.
    pub fn len(&self) -> usize {
        self.returns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.returns.is_empty()
    }

    /// Highest populated trading-day index.
    pub fn last_index(&self) -> Option<usize> {
        self.returns.len().checked_sub(1)
    }

    /// Return on trading day `index`, if the year has that many days.
    pub fn get(&self, index: usize) -> Option<&DailyReturn> {
        self.returns.get(index)
    }

    pub fn returns(&self) -> &[DailyReturn] {
        &self.returns
    }

    /// Running sum of this year's returns. Starts over every year.
    pub fn cumulative(&self) -> Vec<f64> {
        self.returns
            .iter()
            .scan(0.0, |acc, r| {
                *acc += r.pct_change;
                Some(*acc)
            })
            .collect()
    }
}

/// Split a (windowed) return series into one column per calendar year.
pub fn partition_by_year(returns: &[DailyReturn]) -> BTreeMap<i32, YearColumn> {
    let mut columns: BTreeMap<i32, YearColumn> = BTreeMap::new();
    for r in returns {
        let year = r.date.year();
        columns
            .entry(year)
            .or_insert_with(|| YearColumn::new(year))
            .push(*r);
    }
    columns
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ret(y: i32, m: u32, d: u32, pct: f64) -> DailyReturn {
        DailyReturn {
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            pct_change: pct,
        }
    }

    #[test]
    fn trims_leading_and_trailing_partial_years() {
        let returns = vec![
            ret(2019, 11, 4, 0.5),
            ret(2019, 12, 2, 0.5),
            ret(2020, 1, 2, 0.01),
            ret(2020, 6, 1, 0.02),
            ret(2020, 12, 31, 0.03),
            ret(2021, 1, 4, 0.9),
        ];
        let window = full_year_window(&returns).unwrap();
        assert_eq!(window.len(), 3);
        assert_eq!(window[0].date.month(), 1);
        assert_eq!(window[2].date.month(), 12);
    }

    #[test]
    fn missing_january_is_insufficient() {
        let returns = vec![ret(2020, 2, 3, 0.0), ret(2020, 12, 31, 0.0)];
        assert_eq!(
            full_year_window(&returns),
            Err(SeasonalityError::InsufficientHistory {
                reason: "no January bar"
            })
        );
    }

    #[test]
    fn missing_december_is_insufficient() {
        let returns = vec![ret(2020, 1, 2, 0.0), ret(2020, 11, 30, 0.0)];
        assert!(matches!(
            full_year_window(&returns),
            Err(SeasonalityError::InsufficientHistory { .. })
        ));
    }

    #[test]
    fn december_before_january_is_insufficient() {
        let returns = vec![ret(2020, 12, 1, 0.0), ret(2021, 1, 4, 0.0)];
        assert!(matches!(
            full_year_window(&returns),
            Err(SeasonalityError::InsufficientHistory { .. })
        ));
    }

    #[test]
    fn empty_series_is_empty_history() {
        assert_eq!(full_year_window(&[]), Err(SeasonalityError::EmptyHistory));
    }

    #[test]
    fn partition_resets_index_per_year() {
        let returns = vec![
            ret(2020, 1, 2, 0.01),
            ret(2020, 12, 31, 0.02),
            ret(2021, 1, 4, 0.03),
            ret(2021, 1, 5, 0.04),
            ret(2021, 12, 31, 0.05),
        ];
        let columns = partition_by_year(&returns);

        assert_eq!(columns.len(), 2);
        assert_eq!(columns[&2020].len(), 2);
        assert_eq!(columns[&2021].len(), 3);
        assert_eq!(columns[&2021].get(0).unwrap().pct_change, 0.03);
        assert_eq!(columns[&2021].last_index(), Some(2));
    }

    #[test]
    fn cumulative_is_running_sum() {
        let returns = vec![
            ret(2020, 1, 2, 0.01),
            ret(2020, 1, 3, -0.02),
            ret(2020, 1, 6, 0.04),
        ];
        let columns = partition_by_year(&returns);
        let cum = columns[&2020].cumulative();
        assert!((cum[0] - 0.01).abs() < 1e-12);
        assert!((cum[1] + 0.01).abs() < 1e-12);
        assert!((cum[2] - 0.03).abs() < 1e-12);
    }
}
