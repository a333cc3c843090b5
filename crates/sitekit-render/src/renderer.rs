//! Section renderer trait.

use sitekit_model::SectionConfig;

use crate::context::BusinessContext;

/// Renders one section type into HTML.
///
/// Implementations must be total: content of any shape (empty, partial,
/// wrong-typed) renders without panicking, degrading field by field. The
/// dispatch layer relies on this to keep
/// [`DispatchRenderer::render_section`](crate::DispatchRenderer::render_section)
/// a never-fail operation.
pub trait SectionRenderer: Send + Sync {
    /// Append the section's HTML fragment to `out`.
    fn render(&self, section: &SectionConfig, business: &BusinessContext, out: &mut String);
}
