//! Top-level UI layout: ticker input, header or error banner, chart,
//! monthly tables and status bar.

pub mod chart;
pub mod status_bar;
pub mod tables;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::AppState;
use crate::theme::Theme;

use self::chart::SeasonalChart;
use self::tables::{RawReturnsTable, SummaryTable};

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    let theme = Theme::default();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // ticker input
            Constraint::Length(2), // header / banner
            Constraint::Min(10),   // chart
            Constraint::Length(4), // monthly average
            Constraint::Length(15), // raw table: header + 12 months
            Constraint::Length(1), // status bar
        ])
        .split(f.area());

    render_input(f, chunks[0], app, &theme);
    render_header(f, chunks[1], app, &theme);

    match &app.report {
        Some(report) => {
            f.render_widget(SeasonalChart::new(report, &theme), chunks[2]);
            f.render_widget(SummaryTable::new(&report.summary, &theme), chunks[3]);
            f.render_widget(
                RawReturnsTable::new(&report.monthly, app.table_scroll, &theme),
                chunks[4],
            );
        }
        None => render_placeholder(f, chunks[2], app, &theme),
    }

    status_bar::render(f, chunks[5], app, &theme);
}

fn render_input(f: &mut Frame, area: Rect, app: &AppState, theme: &Theme) {
    let block = Block::default()
        .title(" Ticker (Enter to load) ")
        .borders(Borders::ALL)
        .border_style(theme.accent());
    let line = Line::from(vec![
        Span::styled(app.input.as_str(), theme.title()),
        Span::styled("▏", theme.accent()),
    ]);
    f.render_widget(Paragraph::new(line).block(block), area);
}

fn render_header(f: &mut Frame, area: Rect, app: &AppState, theme: &Theme) {
    let lines = if let Some(banner) = &app.error {
        vec![Line::from(Span::styled(
            format!(" {}", banner.message),
            theme.banner(),
        ))]
    } else if let Some(report) = &app.report {
        vec![
            Line::from(Span::styled(format!(" {}", report.title), theme.title())),
            Line::from(Span::styled(format!(" {}", report.meta), theme.muted())),
        ]
    } else {
        Vec::new()
    };
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

fn render_placeholder(f: &mut Frame, area: Rect, app: &AppState, theme: &Theme) {
    let text = match &app.pending {
        Some(ticker) => format!("Fetching {ticker}..."),
        None if app.error.is_some() => String::new(),
        None => "Type a ticker (e.g. ^GSPC, AAPL, BTC-USD) and press Enter.".to_string(),
    };
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(text, theme.muted())),
    ];
    f.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).border_style(theme.muted())),
        area,
    );
}
