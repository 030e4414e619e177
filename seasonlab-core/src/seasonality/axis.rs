//! Month tick labels for a trading-day x axis.
//!
//! Months are placed every [`TRADING_DAYS_PER_MONTH`] trading days. This is
//! an approximation (12 × 22 = 264 days); it ignores real month lengths,
//! holidays and leap years.

use serde::Serialize;

/// Month names in calendar order, also used as row labels of the monthly table.
pub const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "June", "July", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Assumed trading days per month.
pub const TRADING_DAYS_PER_MONTH: usize = 22;

/// A labelled tick on the trading-day axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AxisTick {
    pub trading_day: usize,
    pub label: &'static str,
}

/// Sparse index → month-label lookup for a curve of a given length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AxisLabels {
    ticks: Vec<AxisTick>,
}

impl AxisLabels {
    /// Labels for a curve with `len` points: month `k` sits at `k * 22` for
    /// every `k * 22 < len`.
    pub fn for_length(len: usize) -> Self {
        let ticks = MONTHS
            .iter()
            .enumerate()
            .map(|(k, &label)| AxisTick {
                trading_day: k * TRADING_DAYS_PER_MONTH,
                label,
            })
            .take_while(|t| t.trading_day < len)
            .collect();
        Self { ticks }
    }

    /// Label for trading day `index`, or `None` if the index is unlabelled.
    pub fn label_at(&self, index: usize) -> Option<&'static str> {
        if index % TRADING_DAYS_PER_MONTH != 0 {
            return None;
        }
        self.ticks.get(index / TRADING_DAYS_PER_MONTH).map(|t| t.label)
    }

    pub fn ticks(&self) -> &[AxisTick] {
        &self.ticks
    }

    /// Vega-style label expression, e.g.
    /// `datum.label == 0 ? 'Jan' : datum.label == 22 ? 'Feb' : null`.
    pub fn label_expr(&self) -> String {
        let mut expr = String::new();
        for tick in &self.ticks {
            expr.push_str(&format!(
                "datum.label == {} ? '{}' : ",
                tick.trading_day, tick.label
            ));
        }
        expr.push_str("null");
        expr
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_every_22_days() {
        let labels = AxisLabels::for_length(200);
        assert_eq!(labels.label_at(0), Some("Jan"));
        assert_eq!(labels.label_at(22), Some("Feb"));
        assert_eq!(labels.label_at(44), Some("Mar"));
        assert_eq!(labels.label_at(198), Some("Oct"));
        assert_eq!(labels.ticks().len(), 10);
    }

    #[test]
    fn other_indices_unlabelled() {
        let labels = AxisLabels::for_length(200);
        for i in (0..300).filter(|i| i % 22 != 0 || *i > 198) {
            assert_eq!(labels.label_at(i), None, "index {i}");
        }
    }

    #[test]
    fn never_more_than_twelve_months() {
        let labels = AxisLabels::for_length(400);
        assert_eq!(labels.ticks().len(), 12);
        assert_eq!(labels.label_at(242), Some("Dec"));
        assert_eq!(labels.label_at(264), None);
    }

    #[test]
    fn empty_curve_has_no_labels() {
        let labels = AxisLabels::for_length(0);
        assert!(labels.ticks().is_empty());
        assert_eq!(labels.label_expr(), "null");
    }

    #[test]
    fn label_expr_chains_ticks() {
        let labels = AxisLabels::for_length(23);
        assert_eq!(
            labels.label_expr(),
            "datum.label == 0 ? 'Jan' : datum.label == 22 ? 'Feb' : null"
        );
    }
}
