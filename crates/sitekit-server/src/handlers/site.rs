//! Whole-document endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use sitekit_model::SiteConfig;

use crate::error::ServerError;
use crate::state::AppState;

/// Response for GET /api/site/config.
#[derive(Serialize)]
pub(crate) struct ConfigResponse {
    config: SiteConfig,
    version: u64,
}

/// Request body for PUT /api/site/config.
#[derive(Deserialize)]
pub(crate) struct ReplaceConfigRequest {
    config: SiteConfig,
    /// The version the client based its edit on.
    version: u64,
}

/// Handle GET /api/site/config.
pub(crate) async fn get_config(State(state): State<Arc<AppState>>) -> Json<ConfigResponse> {
    let snapshot = state.store.snapshot();
    Json(ConfigResponse {
        config: (*snapshot.config).clone(),
        version: snapshot.version,
    })
}

/// Handle PUT /api/site/config.
///
/// Wholesale replace guarded by the version the client read; a stale
/// version is a 409 and the write is discarded.
pub(crate) async fn put_config(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ReplaceConfigRequest>,
) -> Result<Json<ConfigResponse>, ServerError> {
    let snapshot = state.store.replace(request.version, request.config)?;
    state.reload.request();
    Ok(Json(ConfigResponse {
        config: (*snapshot.config).clone(),
        version: snapshot.version,
    }))
}
