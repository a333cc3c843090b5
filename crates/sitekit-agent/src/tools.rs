//! Tool call validation and application.
//!
//! The agent mutates the site document through the same operations the
//! form editor uses. Arguments are untrusted relative to UI input, so
//! every call is validated against the current document first; a refused
//! call applies no partial mutation.

use serde::Deserialize;
use serde_json::Value;
use sitekit_model::{
    ContentMap, SectionConfig, SectionIdGenerator, SectionPatch, SiteConfig, ThemeUpdate,
};
use sitekit_render::SectionRegistry;

/// Refused tool call.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("invalid arguments for {tool}: {message}")]
    BadArguments { tool: String, message: String },

    #[error("no page matching '{0}'")]
    UnknownPage(String),

    #[error("no section matching '{0}'")]
    UnknownSection(String),

    #[error("reorder must name every current section id exactly once")]
    OrderMismatch,

    #[error("site has no pages")]
    EmptySite,
}

fn bad_args(tool: &str, e: &serde_json::Error) -> ToolError {
    ToolError::BadArguments {
        tool: tool.to_owned(),
        message: e.to_string(),
    }
}

#[derive(Debug, Deserialize)]
struct UpdateSectionArgs {
    #[serde(default)]
    page_id: Option<String>,
    section_id: String,
    #[serde(default)]
    patch: SectionPatch,
}

#[derive(Debug, Deserialize)]
struct AddSectionArgs {
    #[serde(default)]
    page_id: Option<String>,
    #[serde(rename = "type", alias = "section_type")]
    section_type: String,
    #[serde(default)]
    content: Option<ContentMap>,
    #[serde(default)]
    styles: Option<ContentMap>,
    #[serde(default)]
    position: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RemoveSectionArgs {
    #[serde(default)]
    page_id: Option<String>,
    section_id: String,
}

#[derive(Debug, Deserialize)]
struct ReorderSectionsArgs {
    #[serde(default)]
    page_id: Option<String>,
    section_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct UpdateThemeArgs {
    theme: ThemeUpdate,
}

/// Apply one structural tool call to the document, returning the new
/// document.
///
/// # Errors
///
/// Returns a [`ToolError`] when the tool is unknown, its arguments don't
/// parse, or they don't validate against the current document. The input
/// document is untouched in every error case.
pub fn apply_tool(
    site: &SiteConfig,
    registry: &SectionRegistry,
    ids: &SectionIdGenerator,
    tool_name: &str,
    arguments: &ContentMap,
) -> Result<SiteConfig, ToolError> {
    let args = Value::Object(arguments.clone());
    match tool_name {
        "update_section" => {
            let args: UpdateSectionArgs =
                serde_json::from_value(args).map_err(|e| bad_args(tool_name, &e))?;
            let page_id = resolve_page_for_section(site, args.page_id.as_deref(), &args.section_id)?;
            Ok(sitekit_editor::update_section(site, &page_id, &args.section_id, &args.patch))
        }
        "add_section" => {
            let args: AddSectionArgs =
                serde_json::from_value(args).map_err(|e| bad_args(tool_name, &e))?;
            if args.section_type.is_empty() {
                return Err(ToolError::BadArguments {
                    tool: tool_name.to_owned(),
                    message: "type must be a non-empty string".to_owned(),
                });
            }
            let page_id = resolve_page(site, args.page_id.as_deref())?;
            let section = build_section(registry, ids, &args);
            Ok(sitekit_editor::add_section(site, &page_id, section, args.position))
        }
        "remove_section" => {
            let args: RemoveSectionArgs =
                serde_json::from_value(args).map_err(|e| bad_args(tool_name, &e))?;
            let page_id = resolve_page_for_section(site, args.page_id.as_deref(), &args.section_id)?;
            Ok(sitekit_editor::remove_section(site, &page_id, &args.section_id))
        }
        "reorder_sections" => {
            let args: ReorderSectionsArgs =
                serde_json::from_value(args).map_err(|e| bad_args(tool_name, &e))?;
            let page_id = resolve_page(site, args.page_id.as_deref())?;
            let page = site.page(&page_id).ok_or_else(|| ToolError::UnknownPage(page_id.clone()))?;
            let new_order = permute_sections(page.sections.clone(), &args.section_ids)?;
            Ok(sitekit_editor::reorder_sections(site, &page_id, new_order))
        }
        "update_theme" => {
            let args: UpdateThemeArgs =
                serde_json::from_value(args).map_err(|e| bad_args(tool_name, &e))?;
            Ok(sitekit_editor::update_theme(site, &args.theme))
        }
        other => Err(ToolError::UnknownTool(other.to_owned())),
    }
}

/// Build the section to add: a registry default when the type is known
/// (agent-supplied content merged over the template), or an ad hoc
/// section for an agent-invented type.
fn build_section(
    registry: &SectionRegistry,
    ids: &SectionIdGenerator,
    args: &AddSectionArgs,
) -> SectionConfig {
    let mut section = registry
        .default_section(&args.section_type, ids)
        .unwrap_or_else(|| SectionConfig::new(ids.next(&args.section_type), &args.section_type));

    if args.content.is_some() || args.styles.is_some() {
        section = section.patched(&SectionPatch {
            content: args.content.clone(),
            styles: args.styles.clone(),
            ..SectionPatch::default()
        });
    }
    section
}

/// Resolve the target page: explicit id when given, else the first page.
fn resolve_page(site: &SiteConfig, page_id: Option<&str>) -> Result<String, ToolError> {
    match page_id {
        Some(id) => site
            .page(id)
            .map(|p| p.id.clone())
            .ok_or_else(|| ToolError::UnknownPage(id.to_owned())),
        None => site
            .pages
            .first()
            .map(|p| p.id.clone())
            .ok_or(ToolError::EmptySite),
    }
}

/// Resolve the page owning a section: explicit id when given, else the
/// page containing the section.
fn resolve_page_for_section(
    site: &SiteConfig,
    page_id: Option<&str>,
    section_id: &str,
) -> Result<String, ToolError> {
    let page = match page_id {
        Some(id) => site.page(id).ok_or_else(|| ToolError::UnknownPage(id.to_owned()))?,
        None => site
            .page_containing(section_id)
            .ok_or_else(|| ToolError::UnknownSection(section_id.to_owned()))?,
    };
    if page.section(section_id).is_none() {
        return Err(ToolError::UnknownSection(section_id.to_owned()));
    }
    Ok(page.id.clone())
}

/// Reassemble the section list in the requested id order.
///
/// The requested order must name every current id exactly once; anything
/// else refuses the whole operation.
fn permute_sections(
    mut sections: Vec<SectionConfig>,
    order: &[String],
) -> Result<Vec<SectionConfig>, ToolError> {
    if order.len() != sections.len() {
        return Err(ToolError::OrderMismatch);
    }
    let mut result = Vec::with_capacity(sections.len());
    for id in order {
        let index = sections
            .iter()
            .position(|s| &s.id == id)
            .ok_or(ToolError::OrderMismatch)?;
        result.push(sections.remove(index));
    }
    Ok(result)
}
