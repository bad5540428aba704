//! Auditor CLI - upload datasets and models to the ethics auditor backend
//!
//! This CLI provides an `auditor` command that submits files for dataset,
//! fairness, model, explanation, and privacy analysis and renders the
//! results and charts in the terminal.

mod colors;
mod commands;
mod config;
mod render;
mod terminal_view;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{audit, dataset, inspect, ping};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Auditor CLI - ethics audit client
///
/// Sends datasets and trained models to the auditor backend and reports
/// fairness, explainability, and privacy findings.
#[derive(Parser, Debug)]
#[command(
    name = "auditor",
    author,
    version,
    about = "Ethics auditor - dataset and model audit client",
    long_about = "Uploads datasets and trained models to the ethics auditor backend.\nEach analysis is requested concurrently and a failing endpoint never hides the others."
)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true, value_parser = LOG_LEVELS)]
    log_level: Option<String>,

    /// Backend base URL (overrides AUDITOR_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// API key sent as X-API-Key (overrides AUDITOR_API_KEY)
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Configuration file (skips ./.auditorrc and ~/.auditor/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON instead of formatted output
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a dataset
    ///
    /// Uploads a CSV to the dataset, fairness, and mitigation endpoints and
    /// draws the class distribution and group accuracy charts.
    Dataset {
        /// Dataset CSV file
        file: Option<PathBuf>,
    },

    /// Audit a trained model
    ///
    /// Uploads the model for analysis, SHAP and LIME explanations, and the
    /// model together with its training data for the privacy check.
    Audit {
        /// Serialized model file
        #[arg(long)]
        model: Option<PathBuf>,

        /// Training data CSV file
        #[arg(long)]
        train: Option<PathBuf>,
    },

    /// Preview a dataset locally without contacting the backend
    Inspect {
        /// Dataset CSV file
        file: PathBuf,
    },

    /// Check that the backend is reachable
    Ping,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = config::load_config(args.config.as_deref(), args.base_url.clone(), args.api_key.clone())?;

    let level_name = args.log_level.as_deref().or(config.log_level.as_deref()).unwrap_or("warn");
    let level = match level_name {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        other => anyhow::bail!("Invalid log level '{}' (expected one of: {})", other, LOG_LEVELS.join(", ")),
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let options = || -> anyhow::Result<auditor_core::ClientOptions> {
        let options = config::client_options(&config)?;
        tracing::debug!(base_url = %options.base_url, "Resolved backend");
        Ok(options)
    };

    match args.command {
        Command::Dataset { file } => dataset::execute(file, &options()?, args.json).await,
        Command::Audit { model, train } => audit::execute(model, train, &options()?, args.json).await,
        Command::Inspect { file } => inspect::execute(&file, args.json),
        Command::Ping => ping::execute(&options()?, args.json).await,
    }
}
