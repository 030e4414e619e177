//! Monthly return tables: the cross-year average row and the raw
//! month-by-year grid (months as rows, newest year first, scrolls sideways).

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Row, Table, Widget},
};

use seasonlab_core::seasonality::{MonthlySummary, MonthlyTable, MONTHS};

use crate::theme::Theme;

const LABEL_WIDTH: u16 = 9;
const CELL_WIDTH: u16 = 7;
const YEAR_WIDTH: u16 = 7;

fn widths() -> Vec<Constraint> {
    std::iter::once(Constraint::Length(LABEL_WIDTH))
        .chain(std::iter::repeat(Constraint::Length(CELL_WIDTH)).take(12))
        .collect()
}

fn header(theme: &Theme) -> Row<'static> {
    let style = Style::default()
        .fg(theme.text_secondary)
        .add_modifier(Modifier::BOLD);
    Row::new(
        std::iter::once(Cell::from(""))
            .chain(MONTHS.iter().map(|m| Cell::from(Line::from(*m).right_aligned()))),
    )
    .style(style)
}

fn value_cell(value: Option<f64>, theme: &Theme) -> Cell<'static> {
    match value {
        Some(v) => Cell::from(Line::from(format!("{v:.2}")).right_aligned())
            .style(Style::default().fg(theme.pnl_color(v))),
        None => Cell::from(Line::from("-").right_aligned()).style(theme.muted()),
    }
}

fn value_row(label: String, values: &[Option<f64>; 12], theme: &Theme) -> Row<'static> {
    Row::new(
        std::iter::once(Cell::from(label).style(Style::default().fg(theme.text_primary)))
            .chain(values.iter().map(|v| value_cell(*v, theme))),
    )
}

/// One row: the mean of each month across all years.
pub struct SummaryTable<'a> {
    summary: &'a MonthlySummary,
    theme: &'a Theme,
}

impl<'a> SummaryTable<'a> {
    pub fn new(summary: &'a MonthlySummary, theme: &'a Theme) -> Self {
        Self { summary, theme }
    }
}

impl Widget for SummaryTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let row = value_row(
            self.summary.label.to_string(),
            &self.summary.values,
            self.theme,
        );
        let table = Table::new(vec![row], widths())
            .header(header(self.theme))
            .block(
                Block::default()
                    .title(" Monthly average ")
                    .borders(Borders::ALL)
                    .border_style(self.theme.muted()),
            );
        Widget::render(table, area, buf);
    }
}

/// Sum of daily returns per month and year, in percent. One row per month;
/// year columns start at the newest year, shifted by `offset`.
pub struct RawReturnsTable<'a> {
    table: &'a MonthlyTable,
    offset: usize,
    theme: &'a Theme,
}

impl<'a> RawReturnsTable<'a> {
    pub fn new(table: &'a MonthlyTable, offset: usize, theme: &'a Theme) -> Self {
        Self {
            table,
            offset,
            theme,
        }
    }

    /// How many year columns fit in `width` cells, borders included.
    pub fn columns_for_width(width: u16) -> usize {
        let inner = width.saturating_sub(2 + LABEL_WIDTH);
        (inner / (YEAR_WIDTH + 1)) as usize
    }

    /// Year columns in display order, starting at the offset.
    pub fn visible_years(&self, max: usize) -> Vec<i32> {
        self.table
            .years_desc()
            .into_iter()
            .skip(self.offset)
            .take(max)
            .collect()
    }
}

impl Widget for RawReturnsTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let total = self.table.year_count();
        let years = self.visible_years(Self::columns_for_width(area.width));

        let header = Row::new(
            std::iter::once(Cell::from("")).chain(
                years
                    .iter()
                    .map(|y| Cell::from(Line::from(y.to_string()).right_aligned())),
            ),
        )
        .style(
            Style::default()
                .fg(self.theme.text_secondary)
                .add_modifier(Modifier::BOLD),
        );

        let rows: Vec<Row> = MONTHS
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let values = self.table.month_row(idx as u32 + 1);
                Row::new(
                    std::iter::once(
                        Cell::from(*name).style(Style::default().fg(self.theme.text_primary)),
                    )
                    .chain(
                        values
                            .into_iter()
                            .skip(self.offset)
                            .take(years.len())
                            .map(|(_, v)| value_cell(v, self.theme)),
                    ),
                )
            })
            .collect();

        let widths: Vec<Constraint> = std::iter::once(Constraint::Length(LABEL_WIDTH))
            .chain(std::iter::repeat(Constraint::Length(YEAR_WIDTH)).take(years.len()))
            .collect();

        let title = format!(
            " Monthly returns (%) {}-{} of {} years ←/→ ",
            (self.offset + 1).min(total),
            self.offset + years.len(),
            total
        );
        let table = Table::new(rows, widths).header(header).block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(self.theme.muted()),
        );
        Widget::render(table, area, buf);
    }
}
