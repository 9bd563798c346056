//! Historical incident corpus loader.
//!
//! The similarity index is built at startup from a CSV file with a header
//! row naming at least `log_text` and `root_cause` columns.

use std::path::Path;

use tracing::info;

use crate::csv::{split_line, unescape_field};
use crate::error::{TriageError, TriageResult};
use crate::incident::IncidentRecord;

/// Load incident records from a corpus CSV, in file order.
///
/// Column positions are taken from the header so extra columns (timestamp,
/// severity, ...) in a richer export are tolerated.
pub fn load_corpus(path: &Path) -> TriageResult<Vec<IncidentRecord>> {
    let contents = std::fs::read_to_string(path)?;
    let mut lines = contents.lines();

    let header = lines
        .next()
        .ok_or_else(|| TriageError::InvalidRecord(format!("{}: empty corpus file", path.display())))?;
    let columns: Vec<String> = split_line(header).iter().map(|f| unescape_field(f)).collect();

    let log_idx = column_index(&columns, "log_text", path)?;
    let cause_idx = column_index(&columns, "root_cause", path)?;

    let mut records = Vec::new();
    for (lineno, line) in lines.enumerate() {
        if line.is_empty() {
            continue;
        }
        let fields: Vec<String> = split_line(line).iter().map(|f| unescape_field(f)).collect();
        if fields.len() <= log_idx.max(cause_idx) {
            return Err(TriageError::InvalidRecord(format!(
                "{}:{}: expected at least {} fields, got {}",
                path.display(),
                lineno + 2,
                log_idx.max(cause_idx) + 1,
                fields.len()
            )));
        }
        records.push(IncidentRecord::new(fields[log_idx].clone(), fields[cause_idx].clone()));
    }

    info!(path = %path.display(), count = records.len(), "Loaded incident corpus");
    Ok(records)
}

fn column_index(columns: &[String], name: &str, path: &Path) -> TriageResult<usize> {
    columns
        .iter()
        .position(|c| c == name)
        .ok_or_else(|| TriageError::InvalidRecord(format!("{}: missing '{}' column", path.display(), name)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_corpus(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corpus.csv");
        let mut f = std::fs::File::create(&path).unwrap();
        write!(f, "{}", contents).unwrap();
        (dir, path)
    }

    #[test]
    fn test_load_simple_corpus() {
        let (_dir, path) = write_corpus("log_text,root_cause\nlogin timeout,network\ndisk full,storage\n");
        let records = load_corpus(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], IncidentRecord::new("login timeout", "network"));
        assert_eq!(records[1], IncidentRecord::new("disk full", "storage"));
    }

    #[test]
    fn test_extra_columns_tolerated() {
        let (_dir, path) = write_corpus(
            "timestamp,component,severity,log_text,root_cause\n2026-01-01,db,high,deadlock detected,database\n",
        );
        let records = load_corpus(&path).unwrap();
        assert_eq!(records[0], IncidentRecord::new("deadlock detected", "database"));
    }

    #[test]
    fn test_missing_column_rejected() {
        let (_dir, path) = write_corpus("log_text,cause\na,b\n");
        assert!(matches!(load_corpus(&path), Err(TriageError::InvalidRecord(_))));
    }

    #[test]
    fn test_header_only_is_empty() {
        let (_dir, path) = write_corpus("log_text,root_cause\n");
        assert!(load_corpus(&path).unwrap().is_empty());
    }

    #[test]
    fn test_short_row_rejected() {
        let (_dir, path) = write_corpus("log_text,root_cause\nonly-one-field\n");
        assert!(matches!(load_corpus(&path), Err(TriageError::InvalidRecord(_))));
    }
}
