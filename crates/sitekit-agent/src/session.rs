//! Editor-mode chat session.
//!
//! Drives one streamed turn at a time against the upstream service:
//! `idle → awaiting-stream → streaming → idle`. The only terminal events
//! are `done` and `error`; both return the session to idle with the
//! transcript retained, so the session stays usable after any failure.
//!
//! Tool-driven mutations are applied one at a time, synchronously with
//! their `tool_result` event and before the next line is processed, through
//! the store's serialized apply path.

use std::collections::HashMap;
use std::collections::VecDeque;
use std::io::Read;

use sitekit_model::{ContentMap, SectionIdGenerator};
use sitekit_render::SectionRegistry;
use sitekit_store::SiteStore;

use crate::protocol::{AgentEvent, AgentRequest, ChatMessage, ChatRole, is_structural_tool};
use crate::service::AgentService;
use crate::stream::LineDecoder;
use crate::tools::apply_tool;

/// Session state, for the editor shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TurnState {
    #[default]
    Idle,
    AwaitingStream,
    Streaming,
}

/// Author of a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptKind {
    User,
    Assistant,
    /// A recoverable failure surfaced as visible text.
    Error,
}

/// One visible transcript entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub kind: TranscriptKind,
    pub content: String,
}

/// Everything a tool call needs to mutate the document: the serialized
/// store plus the registry and id generator used to build new sections.
#[derive(Clone, Copy)]
pub struct ToolApplier<'a> {
    pub store: &'a SiteStore,
    pub registry: &'a SectionRegistry,
    pub ids: &'a SectionIdGenerator,
}

/// Summary of one streamed turn.
#[derive(Debug, Default)]
pub struct TurnOutcome {
    /// Whether a terminal `done` event was seen.
    pub completed: bool,
    /// Session id after the turn.
    pub session_id: Option<String>,
    /// Accumulated narration.
    pub reply: String,
    /// Structural tools applied successfully, in order.
    pub applied_tools: Vec<String>,
    /// Structural tools refused by validation, in order.
    pub refused_tools: Vec<String>,
    /// Whether any applied tool was structural, meaning the preview must reload.
    pub reload_needed: bool,
    /// Malformed stream lines skipped during the turn.
    pub skipped_lines: u64,
}

/// A conversation editing one business's site.
pub struct ChatSession {
    business_slug: String,
    session_id: Option<String>,
    transcript: Vec<TranscriptEntry>,
    state: TurnState,
}

impl ChatSession {
    /// Start an empty session for a business.
    #[must_use]
    pub fn new(business_slug: impl Into<String>) -> Self {
        Self {
            business_slug: business_slug.into(),
            session_id: None,
            transcript: Vec::new(),
            state: TurnState::Idle,
        }
    }

    /// Resume a session from an existing conversation.
    #[must_use]
    pub fn from_messages(
        business_slug: impl Into<String>,
        messages: &[ChatMessage],
        session_id: Option<String>,
    ) -> Self {
        let transcript = messages
            .iter()
            .map(|m| TranscriptEntry {
                kind: match m.role {
                    ChatRole::User | ChatRole::System => TranscriptKind::User,
                    ChatRole::Assistant => TranscriptKind::Assistant,
                },
                content: m.content.clone(),
            })
            .collect();
        Self {
            business_slug: business_slug.into(),
            session_id,
            transcript,
            state: TurnState::Idle,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> TurnState {
        self.state
    }

    /// Established session id, if any.
    #[must_use]
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// The visible transcript.
    #[must_use]
    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    /// Append a user message without sending.
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.transcript.push(TranscriptEntry {
            kind: TranscriptKind::User,
            content: content.into(),
        });
    }

    /// Send a user message and run the streamed turn to completion.
    pub fn send(
        &mut self,
        service: &dyn AgentService,
        applier: ToolApplier<'_>,
        content: impl Into<String>,
    ) -> TurnOutcome {
        self.push_user(content);
        self.run_turn(service, applier, |_| {})
    }

    /// Run one streamed turn over the current transcript.
    ///
    /// `observer` sees every decoded event after it has been handled, in
    /// stream order; the server uses it to re-emit the stream to its own
    /// client.
    pub fn run_turn(
        &mut self,
        service: &dyn AgentService,
        applier: ToolApplier<'_>,
        mut observer: impl FnMut(&AgentEvent),
    ) -> TurnOutcome {
        let request = self.request();
        let mut outcome = TurnOutcome::default();

        self.state = TurnState::AwaitingStream;
        let mut reader = match service.send_turn(&request) {
            Ok(reader) => reader,
            Err(e) => {
                tracing::warn!(error = %e, "Agent request failed");
                self.push_error(format!("Agent request failed: {e}"));
                self.state = TurnState::Idle;
                outcome.session_id = self.session_id.clone();
                return outcome;
            }
        };

        self.state = TurnState::Streaming;
        let mut decoder = LineDecoder::new();
        // Tool arguments arrive with `tool_call` and are consumed by the
        // matching `tool_result`.
        let mut pending: HashMap<String, VecDeque<ContentMap>> = HashMap::new();
        let mut buf = [0u8; 8192];
        let mut done = false;

        'stream: loop {
            match reader.read(&mut buf) {
                Ok(0) => {
                    // End of stream; a final unterminated line still counts.
                    if let Some(event) = decoder.finish() {
                        self.handle_event(&event, applier, &mut pending, &mut outcome);
                        observer(&event);
                        done = matches!(event, AgentEvent::Done { .. });
                    }
                    break;
                }
                Ok(n) => {
                    for event in decoder.feed(&buf[..n]) {
                        self.handle_event(&event, applier, &mut pending, &mut outcome);
                        observer(&event);
                        if matches!(event, AgentEvent::Done { .. }) {
                            done = true;
                            break 'stream;
                        }
                    }
                }
                Err(e) => {
                    self.push_error(format!("Agent stream interrupted: {e}"));
                    break;
                }
            }
        }

        outcome.completed = done;
        outcome.skipped_lines = decoder.skipped_lines();
        if outcome.skipped_lines > 0 {
            tracing::warn!(
                skipped = outcome.skipped_lines,
                "Skipped malformed lines in agent stream"
            );
        }

        if !outcome.reply.is_empty() {
            self.transcript.push(TranscriptEntry {
                kind: TranscriptKind::Assistant,
                content: outcome.reply.clone(),
            });
        }
        outcome.session_id = self.session_id.clone();
        self.state = TurnState::Idle;
        outcome
    }

    fn handle_event(
        &mut self,
        event: &AgentEvent,
        applier: ToolApplier<'_>,
        pending: &mut HashMap<String, VecDeque<ContentMap>>,
        outcome: &mut TurnOutcome,
    ) {
        match event {
            AgentEvent::Text { content, session_id } => {
                outcome.reply.push_str(content);
                if let Some(id) = session_id {
                    self.session_id = Some(id.clone());
                }
            }
            AgentEvent::ToolCall { tool_name, arguments } => {
                pending
                    .entry(tool_name.clone())
                    .or_default()
                    .push_back(arguments.clone());
            }
            AgentEvent::ToolResult { tool_name, .. } => {
                self.handle_tool_result(tool_name, applier, pending, outcome);
            }
            AgentEvent::Error { message } => {
                self.push_error(message.clone());
            }
            AgentEvent::Done { session_id } => {
                if let Some(id) = session_id {
                    self.session_id = Some(id.clone());
                }
            }
        }
    }

    fn handle_tool_result(
        &mut self,
        tool_name: &str,
        applier: ToolApplier<'_>,
        pending: &mut HashMap<String, VecDeque<ContentMap>>,
        outcome: &mut TurnOutcome,
    ) {
        if !is_structural_tool(tool_name) {
            // Read-only tool; nothing to apply, no reload.
            return;
        }
        let Some(arguments) = pending.get_mut(tool_name).and_then(VecDeque::pop_front) else {
            tracing::warn!(tool = %tool_name, "tool_result without a matching tool_call");
            outcome.refused_tools.push(tool_name.to_owned());
            return;
        };

        let applied = applier.store.try_apply(|site| {
            apply_tool(site, applier.registry, applier.ids, tool_name, &arguments)
        });
        match applied {
            Ok(snapshot) => {
                tracing::debug!(tool = %tool_name, version = snapshot.version, "Applied agent mutation");
                outcome.applied_tools.push(tool_name.to_owned());
                outcome.reload_needed = true;
            }
            Err(e) => {
                tracing::warn!(tool = %tool_name, error = %e, "Refused agent mutation");
                outcome.refused_tools.push(tool_name.to_owned());
                self.push_error(format!("Could not apply {tool_name}: {e}"));
            }
        }
    }

    fn push_error(&mut self, message: String) {
        self.transcript.push(TranscriptEntry {
            kind: TranscriptKind::Error,
            content: message,
        });
    }

    /// Build the upstream request from the visible transcript. Error
    /// entries are visible text, not conversation history; they are not
    /// resent.
    fn request(&self) -> AgentRequest {
        let messages = self
            .transcript
            .iter()
            .filter_map(|entry| match entry.kind {
                TranscriptKind::User => Some(ChatMessage::user(entry.content.clone())),
                TranscriptKind::Assistant => Some(ChatMessage::assistant(entry.content.clone())),
                TranscriptKind::Error => None,
            })
            .collect();
        AgentRequest {
            messages,
            business_slug: self.business_slug.clone(),
            session_id: self.session_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use sitekit_model::{PageConfig, SectionConfig, SiteConfig};

    use super::*;
    use crate::service::{AgentError, MockAgentService, UnconfiguredAgent};

    fn store() -> SiteStore {
        SiteStore::new(SiteConfig::new(vec![PageConfig::home("Home", vec![
            SectionConfig::new("hero-1", "hero"),
        ])]))
    }

    fn arguments(value: serde_json::Value) -> ContentMap {
        match value {
            serde_json::Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    fn run(service: &MockAgentService, store: &SiteStore) -> (ChatSession, TurnOutcome) {
        let registry = SectionRegistry::builtin();
        let ids = SectionIdGenerator::new();
        let mut session = ChatSession::new("smith-plumbing");
        let outcome = session.send(
            service,
            ToolApplier { store, registry: &registry, ids: &ids },
            "Make the theme red",
        );
        (session, outcome)
    }

    #[test]
    fn test_full_turn_applies_theme_mutation() {
        let service = MockAgentService::new()
            .with_event(&AgentEvent::Text {
                content: "Updating your theme. ".to_owned(),
                session_id: Some("sess-1".to_owned()),
            })
            .with_event(&AgentEvent::tool_call(
                "update_theme",
                arguments(json!({"theme": {"colors": {"primary": "#ff0000"}}})),
            ))
            .with_event(&AgentEvent::tool_result("update_theme"))
            .with_event(&AgentEvent::text("Done."))
            .with_event(&AgentEvent::Done { session_id: Some("sess-1".to_owned()) });

        let store = store();
        let (session, outcome) = run(&service, &store);

        assert!(outcome.completed);
        assert!(outcome.reload_needed);
        assert_eq!(outcome.applied_tools, ["update_theme"]);
        assert_eq!(outcome.session_id.as_deref(), Some("sess-1"));
        assert_eq!(outcome.reply, "Updating your theme. Done.");

        let snapshot = store.snapshot();
        assert_eq!(snapshot.version, 1);
        assert_eq!(snapshot.config.theme.colors.primary, "#ff0000");

        assert_eq!(session.state(), TurnState::Idle);
        assert_eq!(session.transcript().len(), 2);
        assert_eq!(session.transcript()[1].kind, TranscriptKind::Assistant);
    }

    #[test]
    fn test_malformed_line_between_valid_events() {
        let service = MockAgentService::new()
            .with_event(&AgentEvent::text("one "))
            .with_line("{not json at all")
            .with_event(&AgentEvent::text("two"))
            .with_event(&AgentEvent::Done { session_id: None });

        let (_, outcome) = run(&service, &store());

        assert_eq!(outcome.reply, "one two");
        assert_eq!(outcome.skipped_lines, 1);
        assert!(outcome.completed);
    }

    #[test]
    fn test_error_event_lands_in_transcript_and_stream_continues() {
        let service = MockAgentService::new()
            .with_event(&AgentEvent::Error { message: "tool backend hiccup".to_owned() })
            .with_event(&AgentEvent::text("Recovered."))
            .with_event(&AgentEvent::Done { session_id: None });

        let (session, outcome) = run(&service, &store());

        assert!(outcome.completed);
        assert_eq!(outcome.reply, "Recovered.");
        assert!(session
            .transcript()
            .iter()
            .any(|e| e.kind == TranscriptKind::Error && e.content.contains("hiccup")));
    }

    #[test]
    fn test_refused_tool_leaves_store_untouched() {
        let service = MockAgentService::new()
            .with_event(&AgentEvent::tool_call(
                "remove_section",
                arguments(json!({"section_id": "missing"})),
            ))
            .with_event(&AgentEvent::tool_result("remove_section"))
            .with_event(&AgentEvent::Done { session_id: None });

        let store = store();
        let (session, outcome) = run(&service, &store);

        assert_eq!(outcome.refused_tools, ["remove_section"]);
        assert!(!outcome.reload_needed);
        assert_eq!(store.snapshot().version, 0);
        assert!(session
            .transcript()
            .iter()
            .any(|e| e.kind == TranscriptKind::Error));
    }

    #[test]
    fn test_read_only_tool_result_needs_no_reload() {
        let service = MockAgentService::new()
            .with_event(&AgentEvent::tool_result("get_site_config"))
            .with_event(&AgentEvent::Done { session_id: None });

        let (_, outcome) = run(&service, &store());

        assert!(!outcome.reload_needed);
        assert!(outcome.applied_tools.is_empty());
        assert!(outcome.refused_tools.is_empty());
    }

    #[test]
    fn test_result_without_call_is_refused() {
        let service = MockAgentService::new()
            .with_event(&AgentEvent::tool_result("update_theme"))
            .with_event(&AgentEvent::Done { session_id: None });

        let store = store();
        let (_, outcome) = run(&service, &store);

        assert_eq!(outcome.refused_tools, ["update_theme"]);
        assert_eq!(store.snapshot().version, 0);
    }

    #[test]
    fn test_request_failure_keeps_session_usable() {
        struct FailingService;
        impl AgentService for FailingService {
            fn send_turn(
                &self,
                _: &AgentRequest,
            ) -> Result<Box<dyn std::io::Read + Send>, AgentError> {
                Err(AgentError::Unavailable("connection refused".to_owned()))
            }
        }

        let registry = SectionRegistry::builtin();
        let ids = SectionIdGenerator::new();
        let store = store();
        let applier = ToolApplier { store: &store, registry: &registry, ids: &ids };

        let mut session = ChatSession::new("smith-plumbing");
        let outcome = session.send(&FailingService, applier, "hello");

        assert!(!outcome.completed);
        assert_eq!(session.state(), TurnState::Idle);
        assert!(session
            .transcript()
            .iter()
            .any(|e| e.kind == TranscriptKind::Error && e.content.contains("connection refused")));
        // The transcript keeps the user message; the session can retry.
        assert_eq!(session.transcript()[0].kind, TranscriptKind::User);
    }

    #[test]
    fn test_unconfigured_agent_surfaces_in_transcript() {
        let service = UnconfiguredAgent;
        let registry = SectionRegistry::builtin();
        let ids = SectionIdGenerator::new();
        let store = store();

        let mut session = ChatSession::new("smith-plumbing");
        let outcome = session.send(
            &service,
            ToolApplier { store: &store, registry: &registry, ids: &ids },
            "hi",
        );

        assert!(!outcome.completed);
        assert!(session.transcript().iter().any(|e| e.kind == TranscriptKind::Error));
    }

    #[test]
    fn test_stream_without_done_retains_transcript() {
        let service = MockAgentService::new().with_event(&AgentEvent::text("partial"));

        let (session, outcome) = run(&service, &store());

        assert!(!outcome.completed);
        assert_eq!(outcome.reply, "partial");
        assert_eq!(session.transcript().len(), 2);
    }

    #[test]
    fn test_next_request_excludes_error_entries() {
        let service = MockAgentService::new()
            .with_event(&AgentEvent::Error { message: "transient".to_owned() })
            .with_event(&AgentEvent::Done { session_id: None });

        let store = store();
        let registry = SectionRegistry::builtin();
        let ids = SectionIdGenerator::new();
        let applier = ToolApplier { store: &store, registry: &registry, ids: &ids };

        let mut session = ChatSession::new("smith-plumbing");
        let _ = session.send(&service, applier, "first");
        let _ = session.send(&service, applier, "second");

        let requests = service.requests();
        assert_eq!(requests.len(), 2);
        // Second request carries both user messages but no error text.
        assert_eq!(requests[1].messages.len(), 2);
        assert!(requests[1].messages.iter().all(|m| !m.content.contains("transient")));
    }

    #[test]
    fn test_events_observed_in_stream_order() {
        let service = MockAgentService::new()
            .with_event(&AgentEvent::text("a"))
            .with_event(&AgentEvent::tool_result("get_x"))
            .with_event(&AgentEvent::Done { session_id: None });

        let store = store();
        let registry = SectionRegistry::builtin();
        let ids = SectionIdGenerator::new();

        let mut seen = Vec::new();
        let mut session = ChatSession::new("smith-plumbing");
        session.push_user("hi");
        let _ = session.run_turn(
            &service,
            ToolApplier { store: &store, registry: &registry, ids: &ids },
            |event| {
                seen.push(match event {
                    AgentEvent::Text { .. } => "text",
                    AgentEvent::ToolCall { .. } => "tool_call",
                    AgentEvent::ToolResult { .. } => "tool_result",
                    AgentEvent::Error { .. } => "error",
                    AgentEvent::Done { .. } => "done",
                });
            },
        );

        assert_eq!(seen, ["text", "tool_result", "done"]);
    }
}
