//! Preview endpoints.
//!
//! The preview frame renders the current document through the dispatch
//! pipeline. Responses are never cached; the admin frontend polls the
//! refresh token and reloads the frame with a new cache-busting key when
//! it moves.

use std::fmt::Write;
use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Response};
use serde::{Deserialize, Serialize};
use sitekit_preview::ScrollTarget;
use sitekit_render::{BusinessContext, ContextService, escape_html};
use sitekit_store::Business;

use crate::error::ServerError;
use crate::state::AppState;

/// Query for GET /preview/{slug}.
#[derive(Deserialize)]
pub(crate) struct PreviewQuery {
    /// Page slug to render; home when absent.
    #[serde(default)]
    page: String,
}

/// Response for GET /api/preview/state.
#[derive(Serialize)]
pub(crate) struct PreviewState {
    /// Monotonic refresh token; embed in the frame's cache-busting key.
    token: u64,
}

/// Handle GET /api/preview/state.
pub(crate) async fn get_state(State(state): State<Arc<AppState>>) -> Json<PreviewState> {
    Json(PreviewState {
        token: state.refresh.current(),
    })
}

/// Query for GET /api/preview/scroll-target.
#[derive(Deserialize)]
pub(crate) struct ScrollQuery {
    section_id: String,
    #[serde(default)]
    page: String,
}

/// Response for GET /api/preview/scroll-target.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ScrollResponse {
    section_id: String,
    selector: String,
}

/// Handle GET /api/preview/scroll-target.
///
/// Best-effort: `null` when the section is not on the rendered page (or
/// is disabled), which the frontend treats as "nothing to scroll to".
pub(crate) async fn get_scroll_target(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ScrollQuery>,
) -> Json<Option<ScrollResponse>> {
    let snapshot = state.store.snapshot();
    let target = snapshot
        .config
        .page_for_slug(&query.page)
        .and_then(|page| ScrollTarget::resolve(page, &query.section_id));

    Json(target.map(|t| ScrollResponse {
        section_id: t.section_id().to_owned(),
        selector: t.dom_selector(),
    }))
}

/// Handle GET /preview/{slug}.
pub(crate) async fn get_preview(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Query(query): Query<PreviewQuery>,
) -> Result<Response, ServerError> {
    let business = state
        .directory
        .business_by_slug(&slug, &state.template)?
        .ok_or_else(|| ServerError::NotFound(format!("no business matching '{slug}'")))?;
    let context = business_context(&state, &business)?;

    let snapshot = state.store.snapshot();
    let page = snapshot
        .config
        .page_for_slug(&query.page)
        .ok_or_else(|| ServerError::NotFound("site has no pages".to_owned()))?;

    let html = render_document(&state, &snapshot.config.theme, &business, page, &context);
    Ok((
        [(header::CACHE_CONTROL, "no-store")],
        Html(html),
    )
        .into_response())
}

fn business_context(
    state: &AppState,
    business: &Business,
) -> Result<BusinessContext, ServerError> {
    let services = state
        .directory
        .services_for(&business.id)?
        .into_iter()
        .map(|s| ContextService {
            name: s.name,
            description: s.description,
            price: s.price,
        })
        .collect();
    Ok(BusinessContext {
        name: business.name.clone(),
        phone: business.phone.clone(),
        city: business.city.clone(),
        rating: business.rating,
        review_count: business.review_count,
        services,
    })
}

/// Render the full preview document: theme CSS variables, the page's
/// sections, and the refresh token for cache busting.
fn render_document(
    state: &AppState,
    theme: &sitekit_model::ThemeConfig,
    business: &Business,
    page: &sitekit_model::PageConfig,
    context: &BusinessContext,
) -> String {
    let mut html = String::with_capacity(4096);
    let _ = write!(
        html,
        "<!doctype html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{} | {}</title>\n",
        escape_html(&page.title),
        escape_html(&business.name),
    );
    let _ = write!(
        html,
        "<meta name=\"refresh-token\" content=\"{}\">\n",
        state.refresh.cache_key(&business.slug),
    );
    let _ = write!(
        html,
        "<style>:root{{--color-primary:{};--color-accent:{};--color-background:{};--color-text:{};--color-text-muted:{};--font-heading:{};--font-body:{};--radius:{}}}</style>\n",
        escape_html(&theme.colors.primary),
        escape_html(&theme.colors.accent),
        escape_html(&theme.colors.background),
        escape_html(&theme.colors.text),
        escape_html(&theme.colors.text_muted),
        escape_html(&theme.fonts.heading),
        escape_html(&theme.fonts.body),
        theme.border_radius.css(),
    );
    html.push_str("</head>\n<body>\n<main>\n");
    html.push_str(&state.dispatch.render_page(page, context));
    html.push_str("\n</main>\n</body>\n</html>\n");
    html
}
