//! Image upload endpoint.

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::http::header;
use serde::{Deserialize, Serialize};
use sitekit_store::NewImage;

use crate::error::ServerError;
use crate::state::AppState;

/// Query for POST /api/images.
#[derive(Deserialize)]
pub(crate) struct UploadQuery {
    /// Optional folder under the business's upload root.
    #[serde(default)]
    folder: Option<String>,
}

/// Response for POST /api/images.
#[derive(Serialize)]
pub(crate) struct UploadResponse {
    url: String,
}

/// Handle POST /api/images.
///
/// The raw body is the file; `content-type` and `x-file-name` headers
/// describe it. Size and type validation is the store's; a rejected
/// upload writes nothing.
pub(crate) async fn upload_image(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UploadQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<UploadResponse>, ServerError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/octet-stream")
        .to_owned();
    let file_name = headers
        .get("x-file-name")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("upload")
        .to_owned();

    let business_id = {
        let business = state
            .directory
            .business_by_slug(&state.business_slug, &state.template)?
            .ok_or_else(|| {
                ServerError::NotFound(format!("no business matching '{}'", state.business_slug))
            })?;
        business.id
    };

    let stored = state.images.store(
        NewImage {
            file_name,
            content_type,
            bytes: body.to_vec(),
        },
        &business_id,
        query.folder.as_deref(),
    )?;

    Ok(Json(UploadResponse { url: stored.url }))
}
