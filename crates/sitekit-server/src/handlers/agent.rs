//! Agent turn endpoint.
//!
//! Drives the upstream agent service for one turn, applies structural
//! tool calls through the store, and re-emits the event stream to the
//! client as newline-delimited JSON. The client sends the running
//! conversation each turn; the optional `session_id` resumes an upstream
//! session.

use std::sync::Arc;

use axum::Json;
use axum::body::Body;
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use sitekit_agent::{AgentRequest, ChatSession, STRUCTURAL_TOOLS, ToolApplier};
use sitekit_preview::TurnReloadTracker;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::ReceiverStream;

use crate::state::AppState;

/// Handle POST /api/agent/turn.
pub(crate) async fn post_turn(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AgentRequest>,
) -> Response {
    let (tx, rx) = tokio::sync::mpsc::channel::<String>(64);

    // The turn is a blocking read loop over the upstream stream; run it
    // off the async workers. The response streams lines as they arrive.
    tokio::task::spawn_blocking(move || run_turn(&state, request, &tx));

    let body = Body::from_stream(
        ReceiverStream::new(rx).map(|line| Ok::<_, std::convert::Infallible>(line.into_bytes())),
    );
    (
        [(header::CONTENT_TYPE, "application/x-ndjson")],
        body,
    )
        .into_response()
}

/// Run one turn to completion, forwarding each event as a line.
fn run_turn(state: &AppState, request: AgentRequest, tx: &tokio::sync::mpsc::Sender<String>) {
    let mut session = ChatSession::from_messages(
        request.business_slug.clone(),
        &request.messages,
        request.session_id.clone(),
    );
    let mut tracker = TurnReloadTracker::new(STRUCTURAL_TOOLS);

    let applier = ToolApplier {
        store: &state.store,
        registry: &state.registry,
        ids: &state.ids,
    };
    let outcome = session.run_turn(&*state.agent, applier, |event| {
        if let sitekit_agent::AgentEvent::ToolResult { tool_name, .. } = event {
            tracker.note_tool_result(tool_name);
        }
        if let Ok(line) = serde_json::to_string(event) {
            // A closed receiver means the client went away; keep draining
            // the upstream so mutations still apply.
            let _ = tx.blocking_send(format!("{line}\n"));
        }
    });

    // One reload per turn, debounced, and only when something structural
    // actually applied.
    if tracker.finish_turn() && outcome.reload_needed {
        state.reload.request();
    }

    tracing::info!(
        completed = outcome.completed,
        applied = outcome.applied_tools.len(),
        refused = outcome.refused_tools.len(),
        skipped_lines = outcome.skipped_lines,
        "Agent turn finished"
    );
}
