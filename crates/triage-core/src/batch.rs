//! Log-stream batching state machine.
//!
//! Transport-free: the WebSocket layer feeds lines in and sends whatever
//! comes out. A flush triggers when the running total of lines received is a
//! multiple of the batch size. The buffer is fully cleared on every flush;
//! the line count is not, so the trigger stays anchored to "total lines
//! received" even though the two readings coincide in steady state.

use crate::error::{TriageError, TriageResult};

/// Default number of lines per summarized batch.
pub const DEFAULT_BATCH_SIZE: usize = 3;

/// Default cap on buffered bytes before the session is torn down.
pub const DEFAULT_MAX_BUFFER_BYTES: usize = 64 * 1024;

/// Accumulates raw log lines and yields the buffered text every
/// `batch_size` lines.
#[derive(Debug)]
pub struct LogBatcher {
    buffer: String,
    lines_received: u64,
    batch_size: usize,
    max_buffer_bytes: usize,
}

impl LogBatcher {
    pub fn new(batch_size: usize) -> Self {
        Self {
            buffer: String::new(),
            lines_received: 0,
            batch_size: batch_size.max(1),
            max_buffer_bytes: DEFAULT_MAX_BUFFER_BYTES,
        }
    }

    pub fn with_max_buffer_bytes(mut self, max: usize) -> Self {
        self.max_buffer_bytes = max;
        self
    }

    /// Number of lines received over the lifetime of this batcher.
    pub fn lines_received(&self) -> u64 {
        self.lines_received
    }

    /// True when no lines are waiting for the next flush.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Feed one line. Returns the full buffered text when this line
    /// completes a batch; the buffer is cleared before returning.
    pub fn push(&mut self, line: &str) -> TriageResult<Option<String>> {
        if self.buffer.len() + line.len() + 1 > self.max_buffer_bytes {
            return Err(TriageError::stream(format!(
                "buffer limit of {} bytes exceeded",
                self.max_buffer_bytes
            )));
        }

        self.buffer.push_str(line);
        self.buffer.push('\n');
        self.lines_received += 1;

        if self.lines_received % self.batch_size as u64 == 0 {
            Ok(Some(std::mem::take(&mut self.buffer)))
        } else {
            Ok(None)
        }
    }
}

impl Default for LogBatcher {
    fn default() -> Self {
        Self::new(DEFAULT_BATCH_SIZE)
    }
}
