//! External collaborator boundaries for SiteKit.
//!
//! The core edits an in-memory site document; everything durable lives
//! behind the traits in this crate:
//! - [`BusinessDirectory`]: read-only business and service records
//! - [`SiteStore`]: the single shared [`SiteConfig`](sitekit_model::SiteConfig)
//!   with serialized writes, an optimistic version counter and change
//!   subscribers (the persistence callback)
//! - [`JsonFileSink`]: file-backed persistence subscriber
//! - [`ImageStore`]: size-capped, type-restricted image uploads
//!
//! Each trait ships a builder-style mock for tests and a file-backed
//! implementation for `serve`.

mod directory;
mod images;
mod persist;
mod site_store;

pub use directory::{Business, BusinessDirectory, DirectoryError, FileDirectory, MockDirectory, ServiceEntry};
pub use images::{
    ALLOWED_IMAGE_TYPES, FsImageStore, ImageError, ImageStore, MAX_IMAGE_BYTES, MockImageStore,
    NewImage, StoredImage,
};
pub use persist::{JsonFileSink, PersistError, load_site_config};
pub use site_store::{SiteSnapshot, SiteStore, StaleWrite};
