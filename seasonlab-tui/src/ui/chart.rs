//! Seasonal chart widget
//!
//! Displays:
//! - Average cumulative return (percent) per trading day
//! - Zero reference line
//! - Month labels on the x axis

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Widget},
};

use seasonlab_core::seasonality::TRADING_DAYS_PER_MONTH;
use seasonlab_core::SeasonalityReport;

use crate::theme::Theme;

pub struct SeasonalChart<'a> {
    report: &'a SeasonalityReport,
    theme: &'a Theme,
}

impl<'a> SeasonalChart<'a> {
    pub fn new(report: &'a SeasonalityReport, theme: &'a Theme) -> Self {
        Self { report, theme }
    }
}

/// Y bounds in percent: the curve domain widened to include the zero line,
/// padded by 5% of the range.
pub fn y_bounds(domain: (f64, f64), zero_line: f64) -> (f64, f64) {
    let lo = domain.0.min(zero_line) * 100.0;
    let hi = domain.1.max(zero_line) * 100.0;
    let range = hi - lo;
    let pad = if range > 0.0 { range * 0.05 } else { 1.0 };
    (lo - pad, hi + pad)
}

/// Month axis on a 22-day grid: the upper x bound and one label per step.
///
/// Ratatui spaces axis labels evenly over the bounds, so the bound is the
/// first month step at or past the last trading day and every step gets a
/// label. Label `k` then lands on day `22k`; steps past December are blank.
pub fn month_axis(report: &SeasonalityReport) -> (f64, Vec<&'static str>) {
    let last_day = report.curve.len().saturating_sub(1);
    let steps = last_day.div_ceil(TRADING_DAYS_PER_MONTH).max(1);
    let labels = (0..=steps)
        .map(|k| {
            report
                .axis_labels
                .label_at(k * TRADING_DAYS_PER_MONTH)
                .unwrap_or("")
        })
        .collect();
    ((steps * TRADING_DAYS_PER_MONTH) as f64, labels)
}

impl Widget for SeasonalChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let report = self.report;
        let curve: Vec<(f64, f64)> = report
            .curve
            .points
            .iter()
            .map(|p| (p.trading_day as f64, p.avg_cumulative_return * 100.0))
            .collect();

        let (x_max, month_labels) = month_axis(report);
        let zero = report.zero_line * 100.0;
        let zero_line = [(0.0, zero), (x_max, zero)];
        let (y_lower, y_upper) = y_bounds(report.y_domain, report.zero_line);

        let final_return = report.curve.values().last().unwrap_or(0.0) * 100.0;
        let title = format!(
            " Average cumulative return | {} years | year end {:+.2}% ",
            report.year_count, final_return
        );

        let datasets = vec![
            Dataset::default()
                .name("Average")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(self.theme.accent))
                .data(&curve),
            Dataset::default()
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(self.theme.muted))
                .data(&zero_line),
        ];

        let x_labels: Vec<Span> = month_labels.into_iter().map(Span::raw).collect();

        let y_mid = (y_lower + y_upper) / 2.0;
        let y_labels = vec![
            Span::raw(format!("{y_lower:.1}%")),
            Span::raw(format!("{y_mid:.1}%")),
            Span::raw(format!("{y_upper:.1}%")),
        ];

        let chart = Chart::new(datasets)
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.theme.accent))
                    .style(Style::default().bg(self.theme.background)),
            )
            .x_axis(
                Axis::default()
                    .title(Span::styled(
                        "Trading Day #",
                        Style::default().fg(self.theme.text_secondary),
                    ))
                    .style(Style::default().fg(self.theme.muted))
                    .bounds([0.0, x_max])
                    .labels(x_labels),
            )
            .y_axis(
                Axis::default()
                    .title(Span::styled(
                        "Return %",
                        Style::default().fg(self.theme.text_secondary),
                    ))
                    .style(Style::default().fg(self.theme.muted))
                    .bounds([y_lower, y_upper])
                    .labels(y_labels),
            );

        chart.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seasonlab_core::domain::AssetMetadata;
    use seasonlab_core::seasonality::MONTHS;
    use seasonlab_core::report::build_report;
    use seasonlab_core::synthetic::constant_return_bars;

    fn report() -> SeasonalityReport {
        let bars = constant_return_bars(2018, &[0.001, -0.002, 0.0015], 21);
        build_report("SPY", &bars, &AssetMetadata::default()).unwrap()
    }

    fn buffer_text(buf: &Buffer, area: Rect) -> String {
        let mut content = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                content.push_str(buf.cell((x, y)).unwrap().symbol());
            }
            content.push('\n');
        }
        content
    }

    #[test]
    fn y_bounds_include_zero() {
        let (lo, hi) = y_bounds((0.02, 0.10), 0.0);
        assert!(lo < 0.0);
        assert!(hi > 10.0);

        let (lo, hi) = y_bounds((-0.08, -0.01), 0.0);
        assert!(lo < -8.0);
        assert!(hi > 0.0);
    }

    #[test]
    fn flat_curve_still_has_height() {
        let (lo, hi) = y_bounds((0.0, 0.0), 0.0);
        assert_eq!((lo, hi), (-1.0, 1.0));
    }

    #[test]
    fn x_bound_lands_on_month_step() {
        let report = report();
        // 252 points: 12 steps, December on the last labelled step
        let (x_max, labels) = month_axis(&report);
        assert_eq!(x_max, 264.0);
        assert_eq!(labels.len(), 13);
        assert_eq!(labels[11], "Dec");
        assert_eq!(labels[12], "");
    }

    #[test]
    fn long_years_keep_labels_on_22_day_steps() {
        // 28 trading days per month: 336 points, past 12 * 22
        let bars = constant_return_bars(2018, &[0.001, 0.002], 28);
        let report = build_report("BTC-USD", &bars, &AssetMetadata::default()).unwrap();
        assert_eq!(report.curve.len(), 336);

        let (x_max, labels) = month_axis(&report);
        assert_eq!(x_max, 352.0);
        let spacing = x_max / (labels.len() - 1) as f64;
        for (k, label) in labels.iter().enumerate() {
            let day = k as f64 * spacing;
            assert!((day - (k * 22) as f64).abs() < 1e-9, "step {k} at {day}");
            if k < 12 {
                assert_eq!(*label, MONTHS[k]);
            } else {
                assert_eq!(*label, "");
            }
        }
    }

    #[test]
    fn chart_renders_title_and_month_labels() {
        let report = report();
        let theme = Theme::default();
        let area = Rect::new(0, 0, 120, 30);
        let mut buf = Buffer::empty(area);
        SeasonalChart::new(&report, &theme).render(area, &mut buf);

        let content = buffer_text(&buf, area);
        assert!(content.contains("Average cumulative return"));
        assert!(content.contains("Feb"));
        assert!(content.contains("Jul") || content.contains("July"));
    }

    #[test]
    fn tiny_area_renders_without_panic() {
        let report = report();
        let theme = Theme::default();
        let area = Rect::new(0, 0, 10, 4);
        let mut buf = Buffer::empty(area);
        SeasonalChart::new(&report, &theme).render(area, &mut buf);
    }
}
