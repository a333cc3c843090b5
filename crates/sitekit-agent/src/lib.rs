//! Streamed agent mutation channel for SiteKit.
//!
//! A conversational agent edits the site document through the same
//! mutation operations as the form editor, over a newline-delimited JSON
//! protocol:
//! - [`AgentEvent`]: the five wire event kinds (`text`, `tool_call`,
//!   `tool_result`, `error`, `done`)
//! - [`LineDecoder`]: incremental, partial-failure-tolerant line parsing;
//!   one malformed line never aborts the stream
//! - [`apply_tool`]: validates and applies one tool call against the site
//!   document; refused calls apply no partial mutation
//! - [`ChatSession`]: the editor-mode turn state machine; narrated text
//!   and errors accumulate in a transcript that survives failures
//! - [`AgentService`]: the consumed boundary to the upstream reasoning
//!   service, with a scripted [`MockAgentService`] and a streaming
//!   [`HttpAgentService`]

mod http;
mod protocol;
mod service;
mod session;
mod stream;
mod tools;

pub use http::HttpAgentService;
pub use protocol::{
    AgentEvent, AgentRequest, ChatMessage, ChatRole, ImageAttachment, STRUCTURAL_TOOLS,
    is_structural_tool,
};
pub use service::{AgentError, AgentService, MockAgentService, UnconfiguredAgent};
pub use session::{ChatSession, ToolApplier, TranscriptEntry, TranscriptKind, TurnOutcome, TurnState};
pub use stream::LineDecoder;
pub use tools::{ToolError, apply_tool};
