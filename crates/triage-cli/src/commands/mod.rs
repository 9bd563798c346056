//! CLI command definitions and handlers.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use triage_core::Config;

pub mod history;
pub mod predict;
pub mod search;
pub mod serve;

/// Triage - AI incident management assistant
#[derive(Parser)]
#[command(name = "triage")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a triage.toml config file (defaults to ./triage.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server (REST API + log stream)
    Serve(serve::ServeArgs),

    /// Find historical incidents similar to a query
    Search(search::SearchArgs),

    /// Predict the root cause of a log message
    Predict(predict::PredictArgs),

    /// Show the persisted incident history
    History(history::HistoryArgs),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let config = Config::load(self.config.as_deref())?;

        match self.command {
            Commands::Serve(args) => serve::execute(args, config).await,
            Commands::Search(args) => search::execute(args, config).await,
            Commands::Predict(args) => predict::execute(args, config).await,
            Commands::History(args) => history::execute(args, config).await,
        }
    }
}
