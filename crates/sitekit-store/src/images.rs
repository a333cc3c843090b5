//! Image upload boundary.
//!
//! Accepts a file plus a business identifier and optional folder, returns
//! a stored URL. Uploads are size-capped and restricted to common raster
//! formats; rejection is a typed error, never a panic.

use std::path::PathBuf;
use std::sync::Mutex;

/// Maximum accepted upload size.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Accepted content types.
pub const ALLOWED_IMAGE_TYPES: [&str; 4] =
    ["image/png", "image/jpeg", "image/webp", "image/gif"];

/// An upload to store.
#[derive(Debug, Clone)]
pub struct NewImage {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// A stored image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    /// URL the image is served under.
    pub url: String,
}

/// Upload failure.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("image is {size} bytes, limit is {limit}")]
    TooLarge { size: usize, limit: usize },

    #[error("unsupported image type: {0}")]
    UnsupportedType(String),

    #[error("failed to store image: {0}")]
    Io(#[from] std::io::Error),
}

/// Stores uploaded images and hands back their URLs.
pub trait ImageStore: Send + Sync {
    /// Store an upload for a business.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::TooLarge`] or [`ImageError::UnsupportedType`]
    /// when validation fails; no bytes are written in that case.
    fn store(
        &self,
        image: NewImage,
        business_id: &str,
        folder: Option<&str>,
    ) -> Result<StoredImage, ImageError>;
}

/// Validate size and content type.
fn validate(image: &NewImage) -> Result<(), ImageError> {
    if image.bytes.len() > MAX_IMAGE_BYTES {
        return Err(ImageError::TooLarge {
            size: image.bytes.len(),
            limit: MAX_IMAGE_BYTES,
        });
    }
    if !ALLOWED_IMAGE_TYPES.contains(&image.content_type.as_str()) {
        return Err(ImageError::UnsupportedType(image.content_type.clone()));
    }
    Ok(())
}

/// Keep only path-safe characters from a client-supplied file name.
///
/// Takes the final path component, then replaces anything outside
/// `[A-Za-z0-9.-_]`. Leading dots are dropped so a name can never walk up
/// the tree.
fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned: String = base
        .trim_start_matches('.')
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') { c } else { '-' })
        .collect();
    if cleaned.is_empty() { "upload".to_owned() } else { cleaned }
}

/// Filesystem-backed image store.
pub struct FsImageStore {
    root: PathBuf,
    base_url: String,
}

impl FsImageStore {
    /// Create a store writing under `root`, serving under `base_url`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.into(),
        }
    }
}

impl ImageStore for FsImageStore {
    fn store(
        &self,
        image: NewImage,
        business_id: &str,
        folder: Option<&str>,
    ) -> Result<StoredImage, ImageError> {
        validate(&image)?;

        let mut relative = PathBuf::from(sanitize_file_name(business_id));
        if let Some(folder) = folder {
            relative.push(sanitize_file_name(folder));
        }
        let file_name = format!("{}-{}", uuid::Uuid::new_v4(), sanitize_file_name(&image.file_name));
        relative.push(file_name);

        let target = self.root.join(&relative);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&target, &image.bytes)?;

        let url = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            relative.to_string_lossy().replace('\\', "/")
        );
        tracing::debug!(url = %url, size = image.bytes.len(), "Stored image");
        Ok(StoredImage { url })
    }
}

/// Recording store for tests.
#[derive(Debug, Default)]
pub struct MockImageStore {
    uploads: Mutex<Vec<(NewImage, String)>>,
}

impl MockImageStore {
    /// Create an empty mock store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored uploads.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }
}

impl ImageStore for MockImageStore {
    fn store(
        &self,
        image: NewImage,
        business_id: &str,
        folder: Option<&str>,
    ) -> Result<StoredImage, ImageError> {
        validate(&image)?;
        let url = match folder {
            Some(folder) => format!("mock://{business_id}/{folder}/{}", image.file_name),
            None => format!("mock://{business_id}/{}", image.file_name),
        };
        self.uploads.lock().unwrap().push((image, url.clone()));
        Ok(StoredImage { url })
    }
}
