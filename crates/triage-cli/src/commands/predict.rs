//! One-shot root-cause prediction.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use triage_core::{Config, HistoryLog, HistoryRow, IncidentReport};
use triage_ml::{KeywordClassifier, RootCauseClassifier};

#[derive(Args)]
pub struct PredictArgs {
    /// Log text to classify
    pub log_text: String,

    /// Component the incident was observed in
    #[arg(long, default_value = "unknown")]
    pub component: String,

    /// Incident severity
    #[arg(long, default_value = "medium")]
    pub severity: String,
}

pub async fn execute(args: PredictArgs, config: Config) -> Result<()> {
    let classifier = KeywordClassifier::from_file(&config.model_path)?;

    let report = IncidentReport {
        timestamp: chrono::Utc::now().to_rfc3339(),
        component: args.component,
        severity: args.severity,
        log_text: args.log_text,
    };
    let predicted = classifier.predict(&report.combined_input()).await?;

    let history = HistoryLog::new(&config.history_path);
    history.append(&HistoryRow {
        timestamp: report.timestamp.clone(),
        component: report.component.clone(),
        severity: report.severity.clone(),
        log_text: report.log_text.clone(),
        predicted_root_cause: predicted.clone(),
    })?;

    println!("{}: {}", "Predicted root cause".bold(), predicted.yellow());

    Ok(())
}
