//! Year-by-month return sums and their cross-year averages.

use super::axis::MONTHS;
use super::window::{full_year_window, partition_by_year, YearColumn};
use super::SeasonalityError;
use crate::domain::DailyReturn;
use chrono::Datelike;
use serde::Serialize;
use std::collections::BTreeMap;

/// Label of the single summary row.
pub const SUMMARY_LABEL: &str = "Return %";

/// Monthly return sums in percentage points, keyed by year.
///
/// `rows[year][m]` is the sum of that year's daily returns in month `m + 1`,
/// times 100. A month with no bars is `None`, never zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTable {
    rows: BTreeMap<i32, [Option<f64>; 12]>,
}

impl MonthlyTable {
    /// Value for `year` and calendar `month` (1..=12).
    pub fn get(&self, year: i32, month: u32) -> Option<f64> {
        let idx = month.checked_sub(1)? as usize;
        self.rows.get(&year)?.get(idx).copied().flatten()
    }

    pub fn year_row(&self, year: i32) -> Option<&[Option<f64>; 12]> {
        self.rows.get(&year)
    }

    /// Years ascending.
    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.rows.keys().copied()
    }

    /// Years most-recent-first, the order tables are presented in.
    pub fn years_desc(&self) -> Vec<i32> {
        self.rows.keys().rev().copied().collect()
    }

    pub fn first_year(&self) -> Option<i32> {
        self.rows.keys().next().copied()
    }

    pub fn last_year(&self) -> Option<i32> {
        self.rows.keys().next_back().copied()
    }

    pub fn year_count(&self) -> usize {
        self.rows.len()
    }

    /// Row for a calendar month across years, most recent year first.
    pub fn month_row(&self, month: u32) -> Vec<(i32, Option<f64>)> {
        self.years_desc()
            .into_iter()
            .map(|y| (y, self.get(y, month)))
            .collect()
    }

    /// Mean of each month across the years that have it.
    pub fn summary(&self) -> MonthlySummary {
        let mut values = [None; 12];
        for (m, slot) in values.iter_mut().enumerate() {
            let present: Vec<f64> = self.rows.values().filter_map(|row| row[m]).collect();
            if !present.is_empty() {
                *slot = Some(present.iter().sum::<f64>() / present.len() as f64);
            }
        }
        MonthlySummary {
            label: SUMMARY_LABEL,
            values,
        }
    }
}

/// One-row table: average monthly return (percentage points) per calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySummary {
    pub label: &'static str,
    pub values: [Option<f64>; 12],
}

impl MonthlySummary {
    /// `(month name, value)` pairs in calendar order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Option<f64>)> + '_ {
        MONTHS.iter().copied().zip(self.values.iter().copied())
    }

    /// Value for calendar `month` (1..=12).
    pub fn get(&self, month: u32) -> Option<f64> {
        let idx = month.checked_sub(1)? as usize;
        self.values.get(idx).copied().flatten()
    }
}

/// Monthly table and its summary over the full-year window of `returns`.
pub fn build_monthly_table(
    returns: &[DailyReturn],
) -> Result<(MonthlyTable, MonthlySummary), SeasonalityError> {
    let window = full_year_window(returns)?;
    let table = table_from_columns(&partition_by_year(window));
    let summary = table.summary();
    Ok((table, summary))
}

pub(crate) fn table_from_columns(columns: &BTreeMap<i32, YearColumn>) -> MonthlyTable {
    let mut rows = BTreeMap::new();
    for column in columns.values().filter(|c| !c.is_empty()) {
        let mut sums: [Option<f64>; 12] = [None; 12];
        for r in column.returns() {
            let slot = &mut sums[r.date.month0() as usize];
            *slot = Some(slot.unwrap_or(0.0) + r.pct_change);
        }
        for slot in sums.iter_mut() {
            *slot = slot.map(|s| s * 100.0);
        }
        rows.insert(column.year, sums);
    }
    MonthlyTable { rows }
}
