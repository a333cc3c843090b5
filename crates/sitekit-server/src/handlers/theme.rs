//! Theme endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::Serialize;
use sitekit_model::{ThemeConfig, ThemeUpdate};

use crate::state::AppState;

/// Response for PUT /api/site/theme.
#[derive(Serialize)]
pub(crate) struct ThemeResponse {
    theme: ThemeConfig,
    version: u64,
}

/// Handle PUT /api/site/theme: shallow-merge a partial theme update.
pub(crate) async fn put_theme(
    State(state): State<Arc<AppState>>,
    Json(update): Json<ThemeUpdate>,
) -> Json<ThemeResponse> {
    let snapshot = state
        .store
        .apply(|site| sitekit_editor::update_theme(site, &update));
    state.reload.request();
    Json(ThemeResponse {
        theme: snapshot.config.theme.clone(),
        version: snapshot.version,
    })
}
