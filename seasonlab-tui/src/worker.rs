//! Background worker thread: provider calls and report building run here.
//!
//! Communication with the TUI main thread is via `mpsc` channels. The worker
//! owns the service, so the report cache lives as long as the worker does.

use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use seasonlab_core::data::MarketDataProvider;
use seasonlab_core::{SeasonalityReport, SeasonalityService};

/// Commands sent from the TUI to the worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerCommand {
    Fetch { ticker: String },
    Shutdown,
}

/// Responses sent from the worker back to the TUI.
#[derive(Debug, Clone)]
pub enum WorkerResponse {
    Report {
        ticker: String,
        report: Arc<SeasonalityReport>,
    },
    Failed {
        ticker: String,
        /// Generic message shown to the user.
        message: String,
        /// Underlying cause, for the status bar and the log.
        detail: String,
        transient: bool,
    },
}

/// Spawn the background worker thread.
///
/// The thread exits on `Shutdown` or when either channel end is dropped.
pub fn spawn_worker<P>(
    mut service: SeasonalityService<P>,
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
) -> JoinHandle<()>
where
    P: MarketDataProvider + 'static,
{
    thread::spawn(move || {
        while let Ok(cmd) = rx.recv() {
            match cmd {
                WorkerCommand::Fetch { ticker } => {
                    let response = match service.report(&ticker) {
                        Ok(report) => WorkerResponse::Report { ticker, report },
                        Err(err) => {
                            tracing::warn!(ticker = %ticker, error = %err, "fetch failed");
                            WorkerResponse::Failed {
                                message: err.user_message(),
                                detail: err.to_string(),
                                transient: err.is_transient(),
                                ticker,
                            }
                        }
                    };
                    if tx.send(response).is_err() {
                        break;
                    }
                }
                WorkerCommand::Shutdown => break,
            }
        }
        tracing::debug!("worker stopped");
    })
}
