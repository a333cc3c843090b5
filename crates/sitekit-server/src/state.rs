//! Application state.
//!
//! Shared state for all request handlers.

use std::sync::Arc;

use sitekit_agent::AgentService;
use sitekit_model::SectionIdGenerator;
use sitekit_preview::{RefreshToken, ReloadDebouncer};
use sitekit_render::{DispatchRenderer, SectionRegistry};
use sitekit_store::{BusinessDirectory, ImageStore, SiteStore};

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// The shared, versioned site document.
    pub(crate) store: Arc<SiteStore>,
    /// Section type registry, built once at startup.
    pub(crate) registry: Arc<SectionRegistry>,
    /// Dispatch renderer over the registry.
    pub(crate) dispatch: DispatchRenderer,
    /// Business directory collaborator.
    pub(crate) directory: Arc<dyn BusinessDirectory>,
    /// Upstream agent service.
    pub(crate) agent: Arc<dyn AgentService>,
    /// Image upload collaborator.
    pub(crate) images: Arc<dyn ImageStore>,
    /// Section id generator shared by every add path.
    pub(crate) ids: Arc<SectionIdGenerator>,
    /// Preview refresh token.
    pub(crate) refresh: Arc<RefreshToken>,
    /// Preview reload debouncer.
    pub(crate) reload: Arc<ReloadDebouncer>,
    /// Template vertical this instance serves.
    pub(crate) template: String,
    /// Business slug being edited.
    pub(crate) business_slug: String,
}
