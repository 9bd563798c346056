//! Service configuration.
//!
//! Loaded from an optional `triage.toml`; every field has a default so a
//! partial file (or none at all) works. CLI flags override on top.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::batch::DEFAULT_BATCH_SIZE;
use crate::error::{TriageError, TriageResult};

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "triage.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Host the web server binds to.
    pub host: String,
    /// Port the web server listens on.
    pub port: u16,
    /// Base URL of the Ollama API.
    pub ollama_url: String,
    /// Embedding model name.
    pub embed_model: String,
    /// Generation model used for summaries.
    pub summary_model: String,
    /// Root-cause classifier model file (JSON token weights).
    pub model_path: PathBuf,
    /// Historical incident corpus the index is built from.
    pub corpus_path: PathBuf,
    /// Append-only incident history log.
    pub history_path: PathBuf,
    /// Lines per summarized stream batch.
    pub batch_size: usize,
    /// Lower bound on summary length, in characters.
    pub summary_min_chars: usize,
    /// Upper bound on summary length, in characters.
    pub summary_max_chars: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            ollama_url: "http://localhost:11434".to_string(),
            embed_model: "nomic-embed-text".to_string(),
            summary_model: "llama3.2".to_string(),
            model_path: PathBuf::from("data/root_cause_model.json"),
            corpus_path: PathBuf::from("data/incident_corpus.csv"),
            history_path: PathBuf::from("incident_history.csv"),
            batch_size: DEFAULT_BATCH_SIZE,
            summary_min_chars: 10,
            summary_max_chars: 400,
        }
    }
}

impl Config {
    /// Load configuration. An explicit path must exist; the default file is
    /// optional.
    pub fn load(path: Option<&Path>) -> TriageResult<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    Self::from_file(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> TriageResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| TriageError::Config(format!("{}: {}", path.display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.batch_size, 3);
        assert_eq!(config.port, 8000);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("triage.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "port = 9999\nbatch_size = 5").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.port, 9999);
        assert_eq!(config.batch_size, 5);
        assert_eq!(config.host, "127.0.0.1");
    }

    #[test]
    fn test_unknown_field_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("triage.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "prot = 9999").unwrap();

        assert!(matches!(Config::from_file(&path), Err(TriageError::Config(_))));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        assert!(Config::load(Some(Path::new("/nonexistent/triage.toml"))).is_err());
    }
}
