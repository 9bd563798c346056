//! Incident history listing.

use anyhow::Result;
use clap::Args;

use triage_core::{Config, HistoryLog};

use crate::output;

#[derive(Args)]
pub struct HistoryArgs {
    /// Show only the most recent N rows
    #[arg(long)]
    pub limit: Option<usize>,
}

pub async fn execute(args: HistoryArgs, config: Config) -> Result<()> {
    let history = HistoryLog::new(&config.history_path);
    let mut rows = history.load()?;

    if let Some(limit) = args.limit {
        let skip = rows.len().saturating_sub(limit);
        rows.drain(..skip);
    }

    output::print_history(&rows);

    Ok(())
}
