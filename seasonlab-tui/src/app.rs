//! Application state: single-owner, main-thread only.
//!
//! All TUI state lives here. The worker thread communicates via channels.

use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;

use seasonlab_core::{ReportError, SeasonalityReport};

use crate::worker::{WorkerCommand, WorkerResponse};

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// Shown above the chart when the last request failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorBanner {
    pub message: String,
    pub detail: Option<String>,
}

pub struct AppState {
    pub running: bool,
    /// Ticker text box contents.
    pub input: String,
    /// Ticker currently being fetched by the worker.
    pub pending: Option<String>,
    pub report: Option<Arc<SeasonalityReport>>,
    pub error: Option<ErrorBanner>,
    /// First visible year column of the month-by-year table.
    pub table_scroll: usize,
    pub status_message: Option<(String, StatusLevel)>,
    worker_tx: Sender<WorkerCommand>,
    pub worker_rx: Receiver<WorkerResponse>,
}

impl AppState {
    pub fn new(worker_tx: Sender<WorkerCommand>, worker_rx: Receiver<WorkerResponse>) -> Self {
        Self {
            running: true,
            input: String::new(),
            pending: None,
            report: None,
            error: None,
            table_scroll: 0,
            status_message: None,
            worker_tx,
            worker_rx,
        }
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Error));
    }

    /// Request a report for the ticker in the input box.
    pub fn submit(&mut self) {
        let ticker = self.input.trim().to_string();
        if ticker.is_empty() {
            self.error = Some(ErrorBanner {
                message: ReportError::EmptyTicker.user_message(),
                detail: None,
            });
            return;
        }

        let cmd = WorkerCommand::Fetch {
            ticker: ticker.clone(),
        };
        if self.worker_tx.send(cmd).is_err() {
            self.set_error("Background worker is not running");
            return;
        }
        self.set_warning(format!("Fetching {ticker}..."));
        self.pending = Some(ticker);
    }

    /// Apply a worker response. Responses for a ticker that is no longer
    /// pending (superseded by a newer request) are ignored.
    pub fn handle_response(&mut self, resp: WorkerResponse) {
        match resp {
            WorkerResponse::Report { ticker, report } => {
                if !self.is_pending(&ticker) {
                    return;
                }
                self.pending = None;
                self.error = None;
                self.table_scroll = 0;
                self.set_status(format!("Loaded {ticker}: {}", report.meta));
                self.report = Some(report);
            }
            WorkerResponse::Failed {
                ticker,
                message,
                detail,
                transient,
            } => {
                if !self.is_pending(&ticker) {
                    return;
                }
                self.pending = None;
                self.report = None;
                self.table_scroll = 0;
                if transient {
                    self.set_warning("Network problem; press Enter to retry");
                } else {
                    self.set_error(detail.clone());
                }
                self.error = Some(ErrorBanner {
                    message,
                    detail: Some(detail),
                });
            }
        }
    }

    fn is_pending(&self, ticker: &str) -> bool {
        self.pending.as_deref() == Some(ticker)
    }

    /// Number of year columns in the raw table.
    pub fn table_columns(&self) -> usize {
        self.report.as_ref().map_or(0, |r| r.monthly.year_count())
    }

    pub fn scroll_right(&mut self, by: usize) {
        let max = self.table_columns().saturating_sub(1);
        self.table_scroll = (self.table_scroll + by).min(max);
    }

    pub fn scroll_left(&mut self, by: usize) {
        self.table_scroll = self.table_scroll.saturating_sub(by);
    }
}
