//! Wire protocol for the agent mutation channel.
//!
//! The transport is newline-delimited JSON: one complete object per line,
//! UTF-8, each carrying a `type` discriminator. Within one streamed turn,
//! line order is application order.

use serde::{Deserialize, Serialize};
use serde_json::Map;
use sitekit_model::ContentMap;

/// Tools whose successful result implies the rendered output changed and
/// the preview must reload.
pub const STRUCTURAL_TOOLS: &[&str] = &[
    "update_section",
    "add_section",
    "remove_section",
    "reorder_sections",
    "update_theme",
];

/// Whether a tool name is in the structural set.
#[must_use]
pub fn is_structural_tool(tool_name: &str) -> bool {
    STRUCTURAL_TOOLS.contains(&tool_name)
}

/// Message author role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
    System,
}

/// Inline image attachment carried with a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAttachment {
    /// Media type, e.g. `image/png`.
    pub media_type: String,
    /// Base64-encoded image data.
    pub data: String,
}

/// One message of the running conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<ImageAttachment>,
}

impl ChatMessage {
    /// A plain user message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
            images: Vec::new(),
        }
    }

    /// A plain assistant message.
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
            images: Vec::new(),
        }
    }
}

/// Request sent to the agent service: the running conversation plus the
/// business whose site is being edited, and an optional session to resume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentRequest {
    pub messages: Vec<ChatMessage>,
    pub business_slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// One streamed event.
///
/// The five discriminator values are the wire contract; unknown
/// discriminators fail to parse and are skipped by the decoder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AgentEvent {
    /// Incremental narration; `content` is appended to the transcript
    /// accumulator. May carry a session id to establish the session.
    Text {
        content: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        session_id: Option<String>,
    },
    /// A mutation is about to be invoked; arguments arrive here.
    ToolCall {
        tool_name: String,
        #[serde(default)]
        arguments: ContentMap,
    },
    /// The named tool completed; mutations apply synchronously with this
    /// event, before the next line is processed.
    ToolResult {
        tool_name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        result: Option<serde_json::Value>,
    },
    /// A recoverable failure; appended to the visible transcript, does
    /// not terminate the stream.
    Error { message: String },
    /// Terminal event; may carry the final session id.
    Done {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        session_id: Option<String>,
    },
}

impl AgentEvent {
    /// A bare text event.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
            session_id: None,
        }
    }

    /// A tool call with arguments.
    #[must_use]
    pub fn tool_call(tool_name: impl Into<String>, arguments: Map<String, serde_json::Value>) -> Self {
        Self::ToolCall {
            tool_name: tool_name.into(),
            arguments,
        }
    }

    /// A bare tool result.
    #[must_use]
    pub fn tool_result(tool_name: impl Into<String>) -> Self {
        Self::ToolResult {
            tool_name: tool_name.into(),
            result: None,
        }
    }
}
