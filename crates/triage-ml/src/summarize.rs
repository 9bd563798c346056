//! Log summarization.
//!
//! Summarizer failures are data, not faults: a failed call returns an
//! error-tagged string so a flaky model never tears down a log stream.

use async_trait::async_trait;
use tracing::warn;

use crate::ollama::OllamaClient;

/// Tag prefixed to summaries that could not be produced.
pub const SUMMARY_FAILURE_TAG: &str = "could not summarize logs";

/// Produces a bounded-length summary of raw log text. Infallible by
/// contract; implementations map internal errors into the returned string.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, text: &str) -> String;
}

/// Ollama-backed abstractive summarizer.
pub struct OllamaSummarizer {
    client: OllamaClient,
    model: String,
    min_chars: usize,
    max_chars: usize,
}

impl OllamaSummarizer {
    pub fn new(client: OllamaClient, model: impl Into<String>, min_chars: usize, max_chars: usize) -> Self {
        Self {
            client,
            model: model.into(),
            min_chars,
            max_chars: max_chars.max(1),
        }
    }

    fn prompt(&self, text: &str) -> String {
        format!(
            "Summarize the following incident log lines in one or two plain sentences. \
             Mention the failing component and the symptom. Logs:\n{text}"
        )
    }
}

#[async_trait]
impl Summarizer for OllamaSummarizer {
    async fn summarize(&self, text: &str) -> String {
        match self.client.generate(&self.model, &self.prompt(text)).await {
            Ok(output) => {
                let trimmed = output.trim();
                if trimmed.len() < self.min_chars {
                    return format!("{SUMMARY_FAILURE_TAG}: model returned no usable summary");
                }
                clamp_chars(trimmed, self.max_chars)
            }
            Err(e) => {
                warn!(error = %e, "Summarization failed");
                format!("{SUMMARY_FAILURE_TAG}: {e}")
            }
        }
    }
}

/// Truncate to at most `max_chars` characters, appending an ellipsis when
/// anything was cut. Operates on char boundaries.
fn clamp_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}…", &text[..byte_idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_leaves_short_text_alone() {
        assert_eq!(clamp_chars("short summary", 100), "short summary");
    }

    #[test]
    fn test_clamp_truncates_long_text() {
        let clamped = clamp_chars("abcdefghij", 4);
        assert_eq!(clamped, "abcd…");
    }

    #[test]
    fn test_clamp_respects_char_boundaries() {
        let clamped = clamp_chars("héllo wörld", 6);
        assert_eq!(clamped.chars().count(), 7);
        assert!(clamped.ends_with('…'));
    }

    #[test]
    fn test_exact_length_not_truncated() {
        assert_eq!(clamp_chars("abcd", 4), "abcd");
    }
}
