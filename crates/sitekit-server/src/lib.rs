//! HTTP admin server for SiteKit.
//!
//! Serves the editing surface for one business's generated site:
//! - Registry metadata for the add-section UI
//! - Versioned site document reads and guarded replaces
//! - Section and theme mutations (the form editor's writer surface)
//! - The streamed agent turn endpoint (the agent's writer surface)
//! - The rendered preview plus its refresh-token state
//!
//! # Architecture
//!
//! ```text
//! Admin UI ──HTTP──► axum (sitekit-server)
//!                      │
//!                      ├─► mutation handlers ──► SiteStore (serialized writes)
//!                      │                            │
//!                      │                            └─► change subscribers (persistence)
//!                      ├─► /api/agent/turn ──► AgentService ──► tool apply ──► SiteStore
//!                      │                            │
//!                      │                            └─► NDJSON re-emitted to client
//!                      └─► /preview/{slug} ──► DispatchRenderer
//!
//! mutations ──► ReloadDebouncer ──(settled)──► RefreshToken bump ──► frame reload
//! ```

mod app;
mod error;
mod handlers;
mod state;

use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use sitekit_agent::AgentService;
use sitekit_model::SectionIdGenerator;
use sitekit_preview::{RefreshToken, ReloadDebouncer};
use sitekit_render::{DispatchRenderer, SectionRegistry};
use sitekit_store::{BusinessDirectory, ImageStore, SiteStore};
use state::AppState;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Template vertical this instance serves.
    pub template: String,
    /// Business slug being edited.
    pub business_slug: String,
    /// Preview reload debounce in milliseconds.
    pub debounce_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7878,
            template: "plumbing".to_owned(),
            business_slug: String::new(),
            debounce_ms: sitekit_preview::DEFAULT_RELOAD_DEBOUNCE_MS,
        }
    }
}

/// Injected collaborators.
///
/// The registry is built once at startup and read-only afterwards; the
/// store is the single shared document both writer surfaces funnel
/// through.
pub struct ServerDeps {
    pub store: Arc<SiteStore>,
    pub registry: Arc<SectionRegistry>,
    pub directory: Arc<dyn BusinessDirectory>,
    pub agent: Arc<dyn AgentService>,
    pub images: Arc<dyn ImageStore>,
}

/// Create server configuration from the application config.
#[must_use]
pub fn server_config_from_config(config: &sitekit_config::Config) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        template: config.site.template.clone(),
        business_slug: config.site.business.clone(),
        debounce_ms: config.preview.debounce_ms,
    }
}

fn build_state(config: &ServerConfig, deps: ServerDeps) -> Arc<AppState> {
    Arc::new(AppState {
        dispatch: DispatchRenderer::new(Arc::clone(&deps.registry)),
        store: deps.store,
        registry: deps.registry,
        directory: deps.directory,
        agent: deps.agent,
        images: deps.images,
        ids: Arc::new(SectionIdGenerator::new()),
        refresh: Arc::new(RefreshToken::new()),
        reload: Arc::new(ReloadDebouncer::new(Duration::from_millis(config.debounce_ms))),
        template: config.template.clone(),
        business_slug: config.business_slug.clone(),
    })
}

/// Spawn the loop that turns settled reload requests into refresh-token
/// bumps the preview frontend can observe.
fn spawn_reload_pump(state: &Arc<AppState>) {
    let reload = Arc::clone(&state.reload);
    let refresh = Arc::clone(&state.refresh);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(50));
        loop {
            interval.tick().await;
            if reload.take_ready() {
                let token = refresh.bump();
                tracing::info!(token, "Preview reload");
            }
        }
    });
}

/// Run the server.
///
/// # Errors
///
/// Returns an error if the server fails to bind or serve.
pub async fn run_server(
    config: ServerConfig,
    deps: ServerDeps,
) -> Result<(), Box<dyn std::error::Error>> {
    let state = build_state(&config, deps);
    spawn_reload_pump(&state);

    let app = app::create_router(state);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, business = %config.business_slug, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, stopping server...");
}
