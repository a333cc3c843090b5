//! CLI command implementations.

mod init;
mod serve;

pub(crate) use init::InitArgs;
pub(crate) use serve::ServeArgs;

use sitekit_model::{PageConfig, SectionIdGenerator, SiteConfig};
use sitekit_render::SectionRegistry;

/// Build a starter site: the home page populated with one default of
/// every registered section type, in registry order.
pub(crate) fn starter_site(registry: &SectionRegistry, ids: &SectionIdGenerator) -> SiteConfig {
    let sections = registry
        .available()
        .into_iter()
        .filter_map(|info| registry.default_section(&info.section_type, ids))
        .collect();
    SiteConfig::new(vec![PageConfig::home("Home", sections)])
}
