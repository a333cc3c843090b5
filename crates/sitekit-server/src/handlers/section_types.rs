//! Section type metadata endpoints.
//!
//! Read-only queries over the registry, consumed by the add-section UI.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::Serialize;
use sitekit_model::SectionConfig;
use sitekit_render::SectionTypeInfo;

use crate::state::AppState;

/// Response for GET /api/section-types.
#[derive(Serialize)]
pub(crate) struct SectionTypesResponse {
    types: Vec<SectionTypeInfo>,
}

/// Handle GET /api/section-types.
pub(crate) async fn get_section_types(
    State(state): State<Arc<AppState>>,
) -> Json<SectionTypesResponse> {
    Json(SectionTypesResponse {
        types: state.registry.available(),
    })
}

/// Handle GET /api/section-types/defaults.
///
/// Returns a freshly stamped default section per registered type.
pub(crate) async fn get_defaults(
    State(state): State<Arc<AppState>>,
) -> Json<BTreeMap<String, SectionConfig>> {
    let defaults = state
        .registry
        .available()
        .into_iter()
        .filter_map(|info| {
            state
                .registry
                .default_section(&info.section_type, &state.ids)
                .map(|section| (info.section_type, section))
        })
        .collect();
    Json(defaults)
}
