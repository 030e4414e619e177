//! SeasonLab CLI: print the seasonal return pattern of a ticker.
//!
//! Commands:
//! - `report`: fetch history and print the seasonality report (text or JSON)
//! - `config`: print the effective configuration as TOML

mod render;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use seasonlab_core::config::{ProviderKind, SeasonLabConfig};
use seasonlab_core::data::build_provider;
use seasonlab_core::{ReportCache, SeasonalityService};

#[derive(Parser)]
#[command(
    name = "seasonlab",
    about = "SeasonLab CLI, seasonal return charts for stocks and ETFs"
)]
struct Cli {
    /// Path to a TOML config file. Defaults to <config dir>/seasonlab/config.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr.
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the seasonality report for a ticker.
    Report {
        /// Ticker in the provider's format (e.g., ^GSPC, AAPL, BTC-USD).
        #[arg(default_value = "^GSPC")]
        ticker: String,

        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Override the configured data provider.
        #[arg(long, value_enum)]
        provider: Option<ProviderArg>,

        /// Directory of {TICKER}.csv files (implies --provider csv).
        #[arg(long)]
        csv_dir: Option<PathBuf>,
    },
    /// Print the effective configuration.
    Config,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum ProviderArg {
    Yahoo,
    Csv,
}

impl From<ProviderArg> for ProviderKind {
    fn from(arg: ProviderArg) -> Self {
        match arg {
            ProviderArg::Yahoo => ProviderKind::Yahoo,
            ProviderArg::Csv => ProviderKind::Csv,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Report {
            ticker,
            format,
            provider,
            csv_dir,
        } => run_report(config, &ticker, format, provider, csv_dir),
        Commands::Config => {
            print!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Explicit path must exist; the default path is optional.
fn load_config(path: Option<&Path>) -> Result<SeasonLabConfig> {
    if let Some(path) = path {
        return SeasonLabConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()));
    }

    match default_config_path() {
        Some(path) if path.exists() => {
            tracing::debug!(path = %path.display(), "using default config");
            SeasonLabConfig::from_file(&path)
                .with_context(|| format!("loading config {}", path.display()))
        }
        _ => Ok(SeasonLabConfig::default()),
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("seasonlab").join("config.toml"))
}

fn run_report(
    mut config: SeasonLabConfig,
    ticker: &str,
    format: OutputFormat,
    provider: Option<ProviderArg>,
    csv_dir: Option<PathBuf>,
) -> Result<()> {
    if let Some(dir) = csv_dir {
        config.provider.kind = ProviderKind::Csv;
        config.provider.csv_dir = dir;
    }
    if let Some(kind) = provider {
        config.provider.kind = kind.into();
    }

    let provider = build_provider(&config.provider)?;
    // One request per process: the cache only matters for long-lived callers.
    let mut service = SeasonalityService::new(provider, ReportCache::disabled());

    match service.report(ticker) {
        Ok(report) => {
            match format {
                OutputFormat::Text => print!("{}", render::render_text(&report)?),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&*report)?),
            }
            Ok(())
        }
        Err(err) => {
            eprintln!("{}", err.user_message());
            eprintln!("  cause: {err}");
            if err.is_transient() {
                eprintln!("  (network problem; trying again later may help)");
            }
            std::process::exit(1);
        }
    }
}
