//! CLI error types.

use sitekit_config::ConfigError;
use sitekit_store::{DirectoryError, PersistError};

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Directory(#[from] DirectoryError),

    #[error("{0}")]
    Persist(#[from] PersistError),

    #[error("{0}")]
    Server(String),

    #[error("{0}")]
    Validation(String),
}
