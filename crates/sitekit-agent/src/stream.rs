//! Incremental, partial-failure-tolerant stream decoding.
//!
//! The transport is read in chunks; a trailing partial line is buffered
//! and re-joined with the next chunk. Each complete line is parsed
//! independently, and a line that fails to parse is skipped: one
//! malformed record must never abort processing of subsequent lines. The
//! channel favors continuing over fidelity of any single record, and the
//! skip count is surfaced so pervasive malformed output stays detectable.

use crate::protocol::AgentEvent;

/// Decodes newline-delimited [`AgentEvent`]s from byte chunks.
#[derive(Debug, Default)]
pub struct LineDecoder {
    buffer: Vec<u8>,
    skipped: u64,
}

impl LineDecoder {
    /// Create an empty decoder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk, returning every event completed by it.
    ///
    /// Chunk boundaries are arbitrary: they may fall mid-line or even
    /// mid-character, since lines are only cut at `\n`.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<AgentEvent> {
        self.buffer.extend_from_slice(chunk);

        let mut events = Vec::new();
        while let Some(newline) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=newline).collect();
            if let Some(event) = self.parse_line(&line[..line.len() - 1]) {
                events.push(event);
            }
        }
        events
    }

    /// Flush the trailing buffered line at end of stream.
    ///
    /// A final complete object without a trailing newline still parses.
    pub fn finish(&mut self) -> Option<AgentEvent> {
        let line = std::mem::take(&mut self.buffer);
        self.parse_line(&line)
    }

    /// Number of non-empty lines skipped because they failed to parse.
    #[must_use]
    pub fn skipped_lines(&self) -> u64 {
        self.skipped
    }

    fn parse_line(&mut self, line: &[u8]) -> Option<AgentEvent> {
        let trimmed = line.trim_ascii();
        if trimmed.is_empty() {
            return None;
        }
        match serde_json::from_slice(trimmed) {
            Ok(event) => Some(event),
            Err(e) => {
                self.skipped += 1;
                tracing::debug!(
                    error = %e,
                    line = %String::from_utf8_lossy(trimmed),
                    "Skipped malformed stream line"
                );
                None
            }
        }
    }
}
