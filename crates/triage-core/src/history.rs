//! Append-only incident history log.
//!
//! One CSV file, header written on first append, rows in insertion order.
//! A missing file reads back as an empty history.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;

use crate::csv::{escape_field, split_line, unescape_field};
use crate::error::TriageResult;
use crate::incident::HistoryRow;

const HEADER: &str = "timestamp,component,severity,log_text,predicted_root_cause";

/// Persisted incident history. Appends are serialized through an internal
/// lock; reads take the lock too so a row is never observed half-written.
pub struct HistoryLog {
    path: PathBuf,
    lock: Mutex<()>,
}

impl HistoryLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one row, creating the file (and writing the header) on first use.
    pub fn append(&self, row: &HistoryRow) -> TriageResult<()> {
        // A poisoned lock only means another append panicked mid-write;
        // rows are line-atomic so continuing is safe.
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());

        let write_header = !self.path.exists();
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        if write_header {
            writeln!(file, "{}", HEADER)?;
        }
        writeln!(
            file,
            "{},{},{},{},{}",
            escape_field(&row.timestamp),
            escape_field(&row.component),
            escape_field(&row.severity),
            escape_field(&row.log_text),
            escape_field(&row.predicted_root_cause),
        )?;

        debug!(path = %self.path.display(), "Appended incident to history");
        Ok(())
    }

    /// Read the full history in insertion order. Missing file is empty, not
    /// an error. Rows with the wrong field count are skipped.
    pub fn load(&self) -> TriageResult<Vec<HistoryRow>> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());

        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let contents = std::fs::read_to_string(&self.path)?;
        let mut rows = Vec::new();
        for line in contents.lines().skip(1) {
            if line.is_empty() {
                continue;
            }
            let fields: Vec<String> = split_line(line).iter().map(|f| unescape_field(f)).collect();
            if fields.len() != 5 {
                continue;
            }
            rows.push(HistoryRow {
                timestamp: fields[0].clone(),
                component: fields[1].clone(),
                severity: fields[2].clone(),
                log_text: fields[3].clone(),
                predicted_root_cause: fields[4].clone(),
            });
        }
        Ok(rows)
    }
}
