//! Live log stream: buffer inbound lines, summarize and classify every
//! completed batch, emit the result over the same socket.
//!
//! `StreamSession` carries all per-connection state and is transport-free;
//! the WebSocket glue below only moves messages. Any processing failure
//! produces exactly one diagnostic message and closes the session —
//! fail-fast, no retry. Summarizer trouble is the one exception: it is
//! reported inside the batch payload and the stream stays up.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use triage_core::{LogBatcher, TriageError, TriageResult};
use triage_ml::{RootCauseClassifier, Summarizer};

use crate::state::AppState;

/// Structured result emitted after every completed batch.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub summary: String,
    pub root_cause: String,
    pub raw_log: String,
}

/// Per-connection session state. Owned exclusively by the connection task;
/// lines are processed strictly in receipt order.
pub struct StreamSession {
    batcher: LogBatcher,
    classifier: Arc<dyn RootCauseClassifier>,
    summarizer: Arc<dyn Summarizer>,
    closed: bool,
}

impl StreamSession {
    pub fn new(
        classifier: Arc<dyn RootCauseClassifier>,
        summarizer: Arc<dyn Summarizer>,
        batch_size: usize,
    ) -> Self {
        Self {
            batcher: LogBatcher::new(batch_size),
            classifier,
            summarizer,
            closed: false,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn lines_received(&self) -> u64 {
        self.batcher.lines_received()
    }

    /// Feed one line. Returns a report when this line completed a batch.
    /// The first error closes the session; every later call is rejected
    /// without touching the buffer.
    pub async fn on_line(&mut self, line: &str) -> TriageResult<Option<BatchReport>> {
        if self.closed {
            return Err(TriageError::stream("session is closed"));
        }

        match self.process(line).await {
            Ok(report) => Ok(report),
            Err(e) => {
                self.closed = true;
                Err(e)
            }
        }
    }

    async fn process(&mut self, line: &str) -> TriageResult<Option<BatchReport>> {
        let Some(batch) = self.batcher.push(line)? else {
            return Ok(None);
        };

        // Summarizer failures are data-level; only the classifier can fault
        // the session.
        let summary = self.summarizer.summarize(&batch).await;
        let root_cause = self
            .classifier
            .predict(&batch)
            .await
            .map_err(|e| TriageError::stream(format!("classification failed: {e}")))?;

        Ok(Some(BatchReport {
            summary,
            root_cause,
            raw_log: batch.trim_end().to_string(),
        }))
    }
}

/// WebSocket upgrade handler for `/ws/logs`.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

/// Drive one connection: a single sequential receive/process/send loop, so
/// batches go out in receipt order. Lines short of the next batch are
/// dropped when the peer disconnects.
async fn handle_socket(mut socket: WebSocket, state: AppState) {
    let session_id = Uuid::new_v4();
    info!(%session_id, "Log stream connected");

    let mut session = StreamSession::new(
        state.classifier.clone(),
        state.summarizer.clone(),
        state.batch_size,
    );

    while let Some(received) = socket.recv().await {
        let msg = match received {
            Ok(msg) => msg,
            Err(e) => {
                debug!(%session_id, error = %e, "Log stream receive failed");
                break;
            }
        };

        match msg {
            Message::Text(text) => match session.on_line(text.as_str()).await {
                Ok(None) => {}
                Ok(Some(report)) => {
                    let json = match serde_json::to_string(&report) {
                        Ok(json) => json,
                        Err(e) => {
                            warn!(%session_id, error = %e, "Failed to encode batch report");
                            break;
                        }
                    };
                    if socket.send(Message::Text(json.into())).await.is_err() {
                        debug!(%session_id, "Log stream send failed, client disconnected");
                        break;
                    }
                }
                Err(e) => {
                    warn!(%session_id, error = %e, "Log stream session failed");
                    let _ = socket.send(Message::Text(format!("Error: {e}").into())).await;
                    let _ = socket.send(Message::Close(None)).await;
                    break;
                }
            },
            Message::Close(_) => {
                debug!(%session_id, "Log stream client sent close frame");
                break;
            }
            _ => {}
        }
    }

    info!(%session_id, lines = session.lines_received(), "Log stream closed");
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct StubClassifier {
        label: Option<&'static str>,
    }

    #[async_trait]
    impl RootCauseClassifier for StubClassifier {
        async fn predict(&self, _text: &str) -> TriageResult<String> {
            match self.label {
                Some(label) => Ok(label.to_string()),
                None => Err(TriageError::Model("model unavailable".to_string())),
            }
        }
    }

    struct StubSummarizer {
        fail: bool,
    }

    #[async_trait]
    impl Summarizer for StubSummarizer {
        async fn summarize(&self, text: &str) -> String {
            if self.fail {
                "could not summarize logs: stub failure".to_string()
            } else {
                format!("summary of {} bytes", text.len())
            }
        }
    }

    fn session(label: Option<&'static str>, summarizer_fails: bool) -> StreamSession {
        StreamSession::new(
            Arc::new(StubClassifier { label }),
            Arc::new(StubSummarizer { fail: summarizer_fails }),
            3,
        )
    }

    #[tokio::test]
    async fn test_two_lines_produce_no_report() {
        let mut session = session(Some("network"), false);
        assert!(session.on_line("ERROR a").await.unwrap().is_none());
        assert!(session.on_line("ERROR b").await.unwrap().is_none());
        assert!(!session.is_closed());
    }

    #[tokio::test]
    async fn test_third_line_flushes_trimmed_raw_log() {
        let mut session = session(Some("network"), false);
        session.on_line("ERROR a").await.unwrap();
        session.on_line("ERROR b").await.unwrap();
        let report = session.on_line("WARN c").await.unwrap().expect("flush on third line");

        assert_eq!(report.raw_log, "ERROR a\nERROR b\nWARN c");
        assert_eq!(report.root_cause, "network");
        assert!(!session.is_closed());
    }

    #[tokio::test]
    async fn test_classifier_failure_closes_session() {
        let mut session = session(None, false);
        session.on_line("a").await.unwrap();
        session.on_line("b").await.unwrap();

        let err = session.on_line("c").await.unwrap_err();
        assert!(matches!(err, TriageError::Stream(_)));
        assert!(session.is_closed());

        // No further lines are accepted.
        let err = session.on_line("d").await.unwrap_err();
        assert!(matches!(err, TriageError::Stream(_)));
        assert_eq!(session.lines_received(), 3);
    }

    #[tokio::test]
    async fn test_summarizer_failure_keeps_session_alive() {
        let mut session = session(Some("storage"), true);
        session.on_line("a").await.unwrap();
        session.on_line("b").await.unwrap();
        let report = session.on_line("c").await.unwrap().unwrap();

        assert!(report.summary.starts_with("could not summarize logs"));
        assert_eq!(report.root_cause, "storage");
        assert!(!session.is_closed());

        // Next batch still flows.
        session.on_line("d").await.unwrap();
        session.on_line("e").await.unwrap();
        assert!(session.on_line("f").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_second_batch_excludes_first() {
        let mut session = session(Some("network"), false);
        for line in ["a", "b", "c", "d", "e"] {
            session.on_line(line).await.unwrap();
        }
        let report = session.on_line("f").await.unwrap().unwrap();
        assert_eq!(report.raw_log, "d\ne\nf");
    }
}
