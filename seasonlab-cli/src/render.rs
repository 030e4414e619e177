//! Plain-text rendering of a seasonality report.

use std::fmt::Write;

use seasonlab_core::SeasonalityReport;

const CHART_WIDTH: usize = 66;
const CHART_HEIGHT: usize = 12;

pub fn render_text(report: &SeasonalityReport) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    write_report(&mut out, report)?;
    Ok(out)
}

fn write_report(out: &mut String, report: &SeasonalityReport) -> std::fmt::Result {
    writeln!(out, "=== {} ===", report.title)?;
    writeln!(out, "{}", report.meta)?;
    writeln!(out)?;

    writeln!(out, "--- Average cumulative return ---")?;
    for line in ascii_chart(report, CHART_WIDTH, CHART_HEIGHT) {
        writeln!(out, "{line}")?;
    }
    writeln!(out)?;

    writeln!(out, "{:<8} {:>6} {:>10}", "Month", "Day", "Return %")?;
    writeln!(out, "{}", "-".repeat(26))?;
    for tick in report.axis_labels.ticks() {
        if let Some(v) = report.curve.value_at(tick.trading_day) {
            writeln!(
                out,
                "{:<8} {:>6} {:>10}",
                tick.label,
                tick.trading_day,
                format!("{:.2}", v * 100.0)
            )?;
        }
    }
    if let Some(last) = report.curve.len().checked_sub(1) {
        if let Some(v) = report.curve.value_at(last) {
            writeln!(out, "{:<8} {:>6} {:>10.2}", "End", last, v * 100.0)?;
        }
    }
    writeln!(out)?;

    write_monthly(out, report)
}

/// Months as rows; the cross-year average first, then one column per year,
/// most recent first.
fn write_monthly(out: &mut String, report: &SeasonalityReport) -> std::fmt::Result {
    writeln!(out, "--- Monthly returns (%) ---")?;
    write!(out, "{:<9}{:>10}", "", report.summary.label)?;
    for year in report.monthly.years_desc() {
        write!(out, "{year:>8}")?;
    }
    writeln!(out)?;

    for (idx, (name, average)) in report.summary.iter().enumerate() {
        write!(out, "{name:<9}{:>10}", format_cell(average))?;
        for (_, value) in report.monthly.month_row(idx as u32 + 1) {
            write!(out, "{:>8}", format_cell(value))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn format_cell(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}"),
        None => "-".to_string(),
    }
}

/// Rasterize the curve (in percent) into `height` text rows plus a month axis.
///
/// The vertical range always includes zero so the zero line is visible.
fn ascii_chart(report: &SeasonalityReport, width: usize, height: usize) -> Vec<String> {
    let curve = &report.curve;
    if curve.is_empty() || width == 0 || height < 2 {
        return vec!["(no data)".to_string()];
    }

    let width = width.min(curve.len());
    let (lo, hi) = report.y_domain;
    let lo = (lo * 100.0).min(report.zero_line * 100.0);
    let hi = (hi * 100.0).max(report.zero_line * 100.0);
    let span = if hi > lo { hi - lo } else { 1.0 };
    let row_of = |v: f64| (((hi - v) / span) * (height - 1) as f64).round() as usize;
    let column_day = |c: usize| c * curve.len() / width;

    let mut grid = vec![vec![' '; width]; height];
    let zero_row = row_of(report.zero_line * 100.0).min(height - 1);
    grid[zero_row].iter_mut().for_each(|cell| *cell = '-');
    for (c, column) in (0..width).map(|c| (c, column_day(c))) {
        if let Some(v) = curve.value_at(column) {
            grid[row_of(v * 100.0).min(height - 1)][c] = '*';
        }
    }

    let mut lines: Vec<String> = grid
        .into_iter()
        .enumerate()
        .map(|(r, row)| {
            let gutter = match r {
                0 => format!("{hi:>8.2} |"),
                r if r == height - 1 => format!("{lo:>8.2} |"),
                r if r == zero_row => format!("{:>8.2} |", report.zero_line * 100.0),
                _ => format!("{:>8} |", ""),
            };
            format!("{gutter}{}", row.into_iter().collect::<String>())
        })
        .collect();

    let mut axis = vec![' '; width];
    for tick in report.axis_labels.ticks() {
        let start = tick.trading_day * width / curve.len();
        for (i, ch) in tick.label.chars().enumerate() {
            if let Some(cell) = axis.get_mut(start + i) {
                *cell = ch;
            }
        }
    }
    lines.push(format!("{:>8} +{}", "", "-".repeat(width)));
    lines.push(format!("{:>10}{}", "", axis.into_iter().collect::<String>()));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use seasonlab_core::domain::AssetMetadata;
    use seasonlab_core::report::build_report;
    use seasonlab_core::synthetic::constant_return_bars;

    fn sample_report() -> SeasonalityReport {
        let bars = constant_return_bars(2020, &[0.001, -0.0005], 21);
        build_report("SPY", &bars, &AssetMetadata::named("SPDR S&P 500 ETF")).unwrap()
    }

    #[test]
    fn text_starts_with_title_and_meta() {
        let text = render_text(&sample_report()).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("=== SPDR S&P 500 ETF Seasonal chart ==="));
        assert_eq!(lines.next(), Some("SPY / 2020 - 2021 (2 years)"));
    }

    #[test]
    fn monthly_header_puts_average_then_newest_year() {
        let text = render_text(&sample_report()).unwrap();
        let header = text
            .lines()
            .skip_while(|l| !l.starts_with("--- Monthly returns"))
            .nth(1)
            .unwrap();
        let columns: Vec<&str> = header.split_whitespace().collect();
        assert_eq!(columns, vec!["Return", "%", "2021", "2020"]);
    }

    #[test]
    fn months_are_rows_with_two_decimals() {
        let text = render_text(&sample_report()).unwrap();
        let monthly: Vec<&str> = text
            .lines()
            .skip_while(|l| !l.starts_with("--- Monthly returns"))
            .skip(2)
            .collect();
        assert_eq!(monthly.len(), 12);
        assert!(monthly[0].starts_with("Jan"));
        assert!(monthly[11].starts_with("Dec"));

        // 2021: 21 * -0.05 = -1.05, 2020: 21 * 0.1 = 2.10, mean 0.525
        let jan: Vec<&str> = monthly[0].split_whitespace().collect();
        assert_eq!(jan.len(), 4);
        assert!(jan[1] == "0.53" || jan[1] == "0.52", "{jan:?}");
        assert_eq!(jan[2], "-1.05");
        assert_eq!(jan[3], "2.10");
    }

    #[test]
    fn chart_has_month_axis_and_fixed_height() {
        let report = sample_report();
        let lines = ascii_chart(&report, 66, 12);
        assert_eq!(lines.len(), 12 + 2);
        let axis = lines.last().unwrap();
        assert!(axis.contains("Jan"));
        assert!(axis.contains("Dec"));
    }

    #[test]
    fn missing_cell_renders_as_dash() {
        assert_eq!(format_cell(None), "-");
        assert_eq!(format_cell(Some(1.234)), "1.23");
    }
}
