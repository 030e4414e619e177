//! Average cumulative return curve aligned by trading day of the year.

use super::window::{full_year_window, partition_by_year, YearColumn};
use super::SeasonalityError;
use crate::domain::DailyReturn;
use serde::Serialize;
use std::collections::BTreeMap;

/// One point on the seasonal curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurvePoint {
    /// 0-based trading day within the year.
    pub trading_day: usize,
    /// Mean across years of the year-to-date return sum, as a fraction.
    pub avg_cumulative_return: f64,
}

/// Average intra-year cumulative return path.
///
/// `points[i].trading_day == i` for every point, and the length equals the
/// trading-day count of `reference_year`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonalCurve {
    pub points: Vec<CurvePoint>,
    /// The longest year; it sets the curve length.
    pub reference_year: i32,
    /// Years that contributed, ascending.
    pub years: Vec<i32>,
}

impl SeasonalCurve {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.avg_cumulative_return)
    }

    /// Value on trading day `index`.
    pub fn value_at(&self, index: usize) -> Option<f64> {
        self.points.get(index).map(|p| p.avg_cumulative_return)
    }

    /// `[min, max]` of the curve values, used as the chart's y domain.
    pub fn domain(&self) -> (f64, f64) {
        let min = self.values().fold(f64::INFINITY, f64::min);
        let max = self.values().fold(f64::NEG_INFINITY, f64::max);
        if self.is_empty() {
            (0.0, 0.0)
        } else {
            (min, max)
        }
    }
}

/// Build the seasonal curve from a daily return series.
///
/// The series is first trimmed to full calendar years; see
/// [`full_year_window`].
pub fn build_seasonal_curve(returns: &[DailyReturn]) -> Result<SeasonalCurve, SeasonalityError> {
    let window = full_year_window(returns)?;
    let columns = partition_by_year(window);
    curve_from_columns(&columns)
}

/// Year whose last populated trading-day index is highest. Ties go to the
/// later year.
pub fn longest_year(columns: &BTreeMap<i32, YearColumn>) -> Option<&YearColumn> {
    let mut longest: Option<&YearColumn> = None;
    for column in columns.values().filter(|c| !c.is_empty()) {
        match longest {
            Some(current) if column.len() < current.len() => {}
            _ => longest = Some(column),
        }
    }
    longest
}

pub(crate) fn curve_from_columns(
    columns: &BTreeMap<i32, YearColumn>,
) -> Result<SeasonalCurve, SeasonalityError> {
    let reference = longest_year(columns).ok_or(SeasonalityError::EmptyHistory)?;
    let length = reference.len();

    let paths: Vec<Vec<f64>> = columns
        .values()
        .filter(|c| !c.is_empty())
        .map(YearColumn::cumulative)
        .collect();

    let mut points = Vec::with_capacity(length);
    for day in 0..length {
        let mut sum = 0.0;
        let mut count = 0usize;
        for path in &paths {
            if let Some(v) = path.get(day) {
                sum += v;
                count += 1;
            }
        }
        // The reference year covers every index, so count >= 1 here.
        if count == 0 {
            continue;
        }
        points.push(CurvePoint {
            trading_day: day,
            avg_cumulative_return: sum / count as f64,
        });
    }

    Ok(SeasonalCurve {
        points,
        reference_year: reference.year,
        years: columns
            .values()
            .filter(|c| !c.is_empty())
            .map(|c| c.year)
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveDate};

    /// `days` returns of `pct` each, spread over January..December of `year`.
    fn year_of(year: i32, days: usize, pct: f64) -> Vec<DailyReturn> {
        let start = NaiveDate::from_ymd_opt(year, 1, 1).unwrap();
        let span = NaiveDate::from_ymd_opt(year, 12, 31).unwrap() - start;
        (0..days)
            .map(|i| {
                let offset = span.num_days() * i as i64 / (days as i64 - 1).max(1);
                DailyReturn {
                    date: start + chrono::Duration::days(offset),
                    pct_change: pct,
                }
            })
            .collect()
    }

    #[test]
    fn single_year_curve_is_its_own_path() {
        let returns = vec![
            DailyReturn {
                date: NaiveDate::from_ymd_opt(2021, 1, 4).unwrap(),
                pct_change: 0.01,
            },
            DailyReturn {
                date: NaiveDate::from_ymd_opt(2021, 6, 1).unwrap(),
                pct_change: -0.03,
            },
            DailyReturn {
                date: NaiveDate::from_ymd_opt(2021, 12, 31).unwrap(),
                pct_change: 0.05,
            },
        ];
        let curve = build_seasonal_curve(&returns).unwrap();

        let expected = [0.01, 0.01 + -0.03, 0.01 + -0.03 + 0.05];
        assert_eq!(curve.len(), 3);
        for (p, e) in curve.points.iter().zip(expected) {
            assert_eq!(p.avg_cumulative_return, e);
        }
        assert_eq!(curve.reference_year, 2021);
    }

    #[test]
    fn two_years_average_per_index() {
        let mut returns = year_of(2020, 252, 0.01);
        returns.extend(year_of(2021, 252, 0.02));
        let curve = build_seasonal_curve(&returns).unwrap();

        assert_eq!(curve.len(), 252);
        for (k, p) in curve.points.iter().enumerate() {
            assert_eq!(p.trading_day, k);
            let expected = 0.015 * (k as f64 + 1.0);
            assert!(
                (p.avg_cumulative_return - expected).abs() < 1e-9,
                "day {k}: {} vs {expected}",
                p.avg_cumulative_return
            );
        }
    }

    #[test]
    fn shorter_year_drops_out_of_average_past_its_end() {
        let mut returns = year_of(2020, 5, 0.01);
        returns.extend(year_of(2021, 3, 0.03));
        let curve = build_seasonal_curve(&returns).unwrap();

        assert_eq!(curve.len(), 5);
        assert_eq!(curve.reference_year, 2020);
        // Index 2: mean(0.03, 0.09)
        assert!((curve.value_at(2).unwrap() - 0.06).abs() < 1e-12);
        // Index 3: only 2020 remains
        assert!((curve.value_at(3).unwrap() - 0.04).abs() < 1e-12);
    }

    #[test]
    fn longest_year_tie_goes_to_latest() {
        let mut returns = year_of(2019, 4, 0.0);
        returns.extend(year_of(2020, 4, 0.0));
        returns.extend(year_of(2021, 2, 0.0));
        let curve = build_seasonal_curve(&returns).unwrap();
        assert_eq!(curve.reference_year, 2020);
        assert_eq!(curve.years, vec![2019, 2020, 2021]);
    }

    #[test]
    fn cumulative_resets_each_year() {
        let mut returns = year_of(2020, 3, 0.10);
        returns.extend(year_of(2021, 3, 0.10));
        let curve = build_seasonal_curve(&returns).unwrap();
        // Both years are identical, so no carry-over from 2020 into 2021.
        assert!((curve.value_at(0).unwrap() - 0.10).abs() < 1e-12);
        assert!((curve.value_at(2).unwrap() - 0.30).abs() < 1e-12);
    }

    #[test]
    fn domain_spans_min_and_max() {
        let returns = vec![
            DailyReturn {
                date: NaiveDate::from_ymd_opt(2021, 1, 4).unwrap(),
                pct_change: -0.02,
            },
            DailyReturn {
                date: NaiveDate::from_ymd_opt(2021, 12, 31).unwrap(),
                pct_change: 0.05,
            },
        ];
        let curve = build_seasonal_curve(&returns).unwrap();
        let (lo, hi) = curve.domain();
        assert_eq!(lo, -0.02);
        assert!((hi - 0.03).abs() < 1e-12);
    }

    #[test]
    fn synthetic_helper_spans_full_year() {
        let returns = year_of(2020, 10, 0.0);
        assert_eq!(returns[0].date.month(), 1);
        assert_eq!(returns.last().unwrap().date.month(), 12);
    }
}
