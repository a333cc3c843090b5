//! Preview synchronization for SiteKit.
//!
//! Decides, from the stream of tool results in an agent turn, whether the
//! rendered preview must reload, and performs that reload debounced:
//! - [`TurnReloadTracker`]: one-per-turn structural-trigger detection
//! - [`ReloadDebouncer`]: coalesces reload requests behind a deadline
//! - [`RefreshToken`]: monotonic counter embedded in the preview's
//!   cache-busting key
//! - [`ScrollTarget`]: best-effort scroll-into-view as an explicit
//!   optional capability

mod debouncer;
mod refresh;
mod scroll;
mod tracker;

pub use debouncer::{DEFAULT_RELOAD_DEBOUNCE_MS, ReloadDebouncer};
pub use refresh::RefreshToken;
pub use scroll::ScrollTarget;
pub use tracker::TurnReloadTracker;
