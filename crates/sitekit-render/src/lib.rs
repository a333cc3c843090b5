//! Section type registry and rendering pipeline for SiteKit.
//!
//! This crate turns a [`SectionConfig`](sitekit_model::SectionConfig) into
//! HTML:
//! - [`SectionRegistry`]: startup-populated table mapping a type tag to a
//!   renderer, display metadata and a default content template. Built once,
//!   read-only afterwards, always passed in explicitly.
//! - [`DispatchRenderer`]: resolves a section's type tag against the
//!   registry and renders it. Resolution is a two-variant
//!   [`ResolvedRenderer`] so the fallback path is an explicit match arm.
//! - [`render_generic`]: the safety net. Infers headings, body text, lists
//!   and images from an arbitrary content record so section types invented
//!   at content-generation time still produce a reasonable fragment. It
//!   never fails.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use sitekit_model::{SectionConfig, SectionIdGenerator};
//! use sitekit_render::{BusinessContext, DispatchRenderer, SectionRegistry};
//!
//! let registry = Arc::new(SectionRegistry::builtin());
//! let ids = SectionIdGenerator::new();
//! let renderer = DispatchRenderer::new(Arc::clone(&registry));
//!
//! let hero = registry.default_section("hero", &ids).unwrap();
//! let business = BusinessContext::named("Smith Plumbing");
//! let html = renderer.render_section(&hero, &business);
//! assert!(html.contains("data-section-id"));
//! ```

mod context;
mod dispatch;
mod generic;
mod html;
mod registry;
mod renderer;
mod sections;
mod value;

pub use context::{BusinessContext, ContextService};
pub use dispatch::{DispatchRenderer, ResolvedRenderer};
pub use generic::render_generic;
pub use html::escape_html;
pub use registry::{SectionRegistry, SectionTemplate, SectionTypeInfo};
pub use renderer::SectionRenderer;
