//! Section list editor operations for SiteKit.
//!
//! Pure mutation operations over a
//! [`SiteConfig`](sitekit_model::SiteConfig): each returns a new value with
//! only the affected page's sections replaced, sibling pages untouched.
//! All operations are total functions over the in-memory model: invalid
//! input (unknown page, unknown section id, out-of-bounds position) is a
//! no-op, never an error.
//!
//! The same operations back both writer surfaces: the human-facing form
//! editor and the conversational agent's tool calls.

mod ops;
mod state;

pub use ops::{
    add_section, move_section, remove_section, reorder_sections, toggle_enabled, update_section,
    update_theme,
};
pub use state::EditorState;
