//! Section mutation endpoints.
//!
//! The form editor's surface over the same operations the agent channel
//! uses. Validation failures refuse the whole request; the document is
//! never partially mutated.

use std::collections::HashSet;
use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use sitekit_model::{SectionConfig, SectionPatch};

use crate::error::ServerError;
use crate::handlers::require_page;
use crate::state::AppState;

/// Request body for POST /api/site/pages/{page_id}/sections.
#[derive(Deserialize)]
pub(crate) struct AddSectionRequest {
    /// Registered section type to clone a default for.
    #[serde(rename = "type")]
    section_type: String,
    /// Insertion position; appends when absent or out of bounds.
    #[serde(default)]
    position: Option<usize>,
}

/// Response carrying the affected section and the new document version.
#[derive(Serialize)]
pub(crate) struct SectionResponse {
    section: SectionConfig,
    version: u64,
}

/// Response carrying the new document version only.
#[derive(Serialize)]
pub(crate) struct VersionResponse {
    version: u64,
}

/// Handle POST /api/site/pages/{page_id}/sections.
///
/// Clones the registry default for the requested type and inserts it. The
/// add-section UI only offers registered types; unknown types are a 422.
pub(crate) async fn add_section(
    State(state): State<Arc<AppState>>,
    Path(page_id): Path<String>,
    Json(request): Json<AddSectionRequest>,
) -> Result<Json<SectionResponse>, ServerError> {
    let section = state
        .registry
        .default_section(&request.section_type, &state.ids)
        .ok_or_else(|| ServerError::UnknownSectionType(request.section_type.clone()))?;

    require_page(&state.store.snapshot().config, &page_id)?;

    let added = section.clone();
    let snapshot = state
        .store
        .apply(|site| sitekit_editor::add_section(site, &page_id, section, request.position));
    state.reload.request();

    Ok(Json(SectionResponse {
        section: added,
        version: snapshot.version,
    }))
}

/// Handle PATCH /api/site/pages/{page_id}/sections/{section_id}.
pub(crate) async fn update_section(
    State(state): State<Arc<AppState>>,
    Path((page_id, section_id)): Path<(String, String)>,
    Json(patch): Json<SectionPatch>,
) -> Result<Json<SectionResponse>, ServerError> {
    require_section(&state, &page_id, &section_id)?;

    let snapshot = state
        .store
        .apply(|site| sitekit_editor::update_section(site, &page_id, &section_id, &patch));
    state.reload.request();

    let section = snapshot
        .config
        .page(&page_id)
        .and_then(|page| page.section(&section_id))
        .cloned()
        .ok_or_else(|| ServerError::NotFound(format!("no section matching '{section_id}'")))?;
    Ok(Json(SectionResponse {
        section,
        version: snapshot.version,
    }))
}

/// Handle DELETE /api/site/pages/{page_id}/sections/{section_id}.
pub(crate) async fn delete_section(
    State(state): State<Arc<AppState>>,
    Path((page_id, section_id)): Path<(String, String)>,
) -> Result<(StatusCode, Json<VersionResponse>), ServerError> {
    require_section(&state, &page_id, &section_id)?;

    let snapshot = state
        .store
        .apply(|site| sitekit_editor::remove_section(site, &page_id, &section_id));
    state.reload.request();

    Ok((StatusCode::OK, Json(VersionResponse { version: snapshot.version })))
}

/// Request body for PUT /api/site/pages/{page_id}/sections/order.
#[derive(Deserialize)]
pub(crate) struct ReorderRequest {
    /// The full new id order, as computed by the drag interaction.
    section_ids: Vec<String>,
}

/// Handle PUT /api/site/pages/{page_id}/sections/order.
///
/// The order must name every current section id exactly once; anything
/// else refuses the request wholesale.
pub(crate) async fn reorder_sections(
    State(state): State<Arc<AppState>>,
    Path(page_id): Path<String>,
    Json(request): Json<ReorderRequest>,
) -> Result<Json<VersionResponse>, ServerError> {
    let snapshot = state.store.try_apply(|site| {
        let page = site
            .page(&page_id)
            .ok_or_else(|| ServerError::NotFound(format!("no page matching '{page_id}'")))?;

        let current: HashSet<&str> = page.sections.iter().map(|s| s.id.as_str()).collect();
        let requested: HashSet<&str> = request.section_ids.iter().map(String::as_str).collect();
        if requested.len() != request.section_ids.len()
            || request.section_ids.len() != page.sections.len()
            || current != requested
        {
            return Err(ServerError::Validation(
                "order must name every current section id exactly once".to_owned(),
            ));
        }

        let new_order = request
            .section_ids
            .iter()
            .filter_map(|id| page.section(id).cloned())
            .collect();
        Ok(sitekit_editor::reorder_sections(site, &page_id, new_order))
    })?;
    state.reload.request();

    Ok(Json(VersionResponse { version: snapshot.version }))
}

/// 404 unless the page and section both exist.
fn require_section(state: &AppState, page_id: &str, section_id: &str) -> Result<(), ServerError> {
    let snapshot = state.store.snapshot();
    let page = require_page(&snapshot.config, page_id)?;
    if page.section(section_id).is_none() {
        return Err(ServerError::NotFound(format!(
            "no section matching '{section_id}'"
        )));
    }
    Ok(())
}
