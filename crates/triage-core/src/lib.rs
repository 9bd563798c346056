//! # Triage Core
//!
//! Domain types and shared building blocks for the Triage incident
//! assistant: the error taxonomy, configuration, incident records, the
//! append-only history log and the log-stream batcher.

pub mod batch;
pub mod config;
pub mod corpus;
pub mod csv;
pub mod error;
pub mod history;
pub mod incident;

pub use batch::LogBatcher;
pub use config::Config;
pub use error::{TriageError, TriageResult};
pub use history::HistoryLog;
pub use incident::{HistoryRow, IncidentRecord, IncidentReport};
