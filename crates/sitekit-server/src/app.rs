//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::http::header;
use axum::routing::{get, post, put};
use tower::ServiceBuilder;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::handlers;
use crate::state::AppState;

/// Create the application router.
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .route("/api/section-types", get(handlers::section_types::get_section_types))
        .route("/api/section-types/defaults", get(handlers::section_types::get_defaults))
        .route("/api/site/config", get(handlers::site::get_config).put(handlers::site::put_config))
        .route("/api/site/theme", put(handlers::theme::put_theme))
        .route(
            "/api/site/pages/{page_id}/sections",
            post(handlers::sections::add_section),
        )
        .route(
            "/api/site/pages/{page_id}/sections/order",
            put(handlers::sections::reorder_sections),
        )
        .route(
            "/api/site/pages/{page_id}/sections/{section_id}",
            axum::routing::patch(handlers::sections::update_section)
                .delete(handlers::sections::delete_section),
        )
        .route("/api/agent/turn", post(handlers::agent::post_turn))
        .route("/api/preview/state", get(handlers::preview::get_state))
        .route("/api/preview/scroll-target", get(handlers::preview::get_scroll_target))
        .route(
            "/api/images",
            post(handlers::images::upload_image)
                .layer(DefaultBodyLimit::max(sitekit_store::MAX_IMAGE_BYTES + 4096)),
        );

    Router::new()
        .merge(api_routes)
        .route("/preview/{slug}", get(handlers::preview::get_preview))
        .layer(
            ServiceBuilder::new().layer(SetResponseHeaderLayer::overriding(
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            )),
        )
        .with_state(state)
}
