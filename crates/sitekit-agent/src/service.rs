//! The consumed boundary to the upstream agent service.
//!
//! The core is the consumer, not the implementer, of the underlying
//! reasoning: a service takes the running conversation and hands back a
//! chunked reader over the newline-delimited event stream.

use std::collections::VecDeque;
use std::io::Read;
use std::sync::Mutex;

use crate::protocol::{AgentEvent, AgentRequest};

/// Upstream request failure, surfaced to the user as a visible transcript
/// error rather than thrown.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("agent service is not configured")]
    Unconfigured,

    #[error("agent service unavailable: {0}")]
    Unavailable(String),

    #[error("agent request failed: {0}")]
    Request(String),
}

/// Streams agent turns.
pub trait AgentService: Send + Sync {
    /// Send the conversation and open the response stream.
    ///
    /// # Errors
    ///
    /// Returns an error when the upstream request cannot be issued; the
    /// session surfaces it in the transcript.
    fn send_turn(&self, request: &AgentRequest) -> Result<Box<dyn Read + Send>, AgentError>;
}

/// Reader that yields one scripted chunk per `read` call, preserving the
/// chunk boundaries a test scripted.
struct ChunkReader {
    chunks: VecDeque<Vec<u8>>,
}

impl Read for ChunkReader {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let Some(chunk) = self.chunks.front_mut() else {
            return Ok(0);
        };
        let n = chunk.len().min(buf.len());
        buf[..n].copy_from_slice(&chunk[..n]);
        chunk.drain(..n);
        if chunk.is_empty() {
            self.chunks.pop_front();
        }
        Ok(n)
    }
}

/// Scripted service for tests.
///
/// # Example
///
/// ```
/// use sitekit_agent::{AgentEvent, MockAgentService};
///
/// let service = MockAgentService::new()
///     .with_event(&AgentEvent::text("Working on it."))
///     .with_event(&AgentEvent::Done { session_id: None });
/// ```
#[derive(Debug, Default)]
pub struct MockAgentService {
    script: Vec<Vec<u8>>,
    requests: Mutex<Vec<AgentRequest>>,
}

impl MockAgentService {
    /// Create a service with an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a raw chunk to the script. Chunk boundaries are preserved,
    /// so a test can split lines mid-character.
    #[must_use]
    pub fn with_chunk(mut self, chunk: impl Into<Vec<u8>>) -> Self {
        self.script.push(chunk.into());
        self
    }

    /// Append an event as one complete line.
    ///
    /// # Panics
    ///
    /// Panics if the event fails to serialize; events are static test data.
    #[must_use]
    pub fn with_event(self, event: &AgentEvent) -> Self {
        let mut line = serde_json::to_vec(event).expect("event serializes");
        line.push(b'\n');
        self.with_chunk(line)
    }

    /// Append a raw line (newline appended), malformed or otherwise.
    #[must_use]
    pub fn with_line(self, line: &str) -> Self {
        self.with_chunk(format!("{line}\n").into_bytes())
    }

    /// Requests received so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn requests(&self) -> Vec<AgentRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl AgentService for MockAgentService {
    fn send_turn(&self, request: &AgentRequest) -> Result<Box<dyn Read + Send>, AgentError> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(Box::new(ChunkReader {
            chunks: self.script.clone().into(),
        }))
    }
}

/// Placeholder service for deployments with no agent endpoint configured.
///
/// Every turn fails fast with [`AgentError::Unconfigured`]; the session
/// surfaces that in the transcript and stays usable.
#[derive(Debug, Default)]
pub struct UnconfiguredAgent;

impl AgentService for UnconfiguredAgent {
    fn send_turn(&self, _request: &AgentRequest) -> Result<Box<dyn Read + Send>, AgentError> {
        Err(AgentError::Unconfigured)
    }
}
