//! HTTP request handlers.

pub(crate) mod agent;
pub(crate) mod images;
pub(crate) mod preview;
pub(crate) mod section_types;
pub(crate) mod sections;
pub(crate) mod site;
pub(crate) mod theme;

use sitekit_model::{PageConfig, SiteConfig};

use crate::error::ServerError;

/// Look up a page by id or return 404.
pub(crate) fn require_page<'a>(
    site: &'a SiteConfig,
    page_id: &str,
) -> Result<&'a PageConfig, ServerError> {
    site.page(page_id)
        .ok_or_else(|| ServerError::NotFound(format!("no page matching '{page_id}'")))
}
