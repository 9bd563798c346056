//! Incident domain types.

use serde::{Deserialize, Serialize};

/// One historical incident, immutable once indexed. Its id is its position
/// in the similarity index (insertion order).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentRecord {
    pub log_text: String,
    pub root_cause: String,
}

impl IncidentRecord {
    pub fn new(log_text: impl Into<String>, root_cause: impl Into<String>) -> Self {
        Self {
            log_text: log_text.into(),
            root_cause: root_cause.into(),
        }
    }
}

/// An incident as reported for root-cause prediction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncidentReport {
    pub timestamp: String,
    pub component: String,
    pub severity: String,
    pub log_text: String,
}

impl IncidentReport {
    /// Combined classifier input, fields joined the same way the model was
    /// trained on.
    pub fn combined_input(&self) -> String {
        format!(
            "{} | {} | {} | {}",
            self.timestamp, self.component, self.severity, self.log_text
        )
    }
}

/// One persisted row of the incident history log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRow {
    pub timestamp: String,
    pub component: String,
    pub severity: String,
    pub log_text: String,
    pub predicted_root_cause: String,
}
