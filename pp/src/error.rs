//! Registry error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while materializing templates
///
/// None of these are fatal. Each is caught where it happens and turned into a
/// notification; the registry keeps serving whatever templates it has.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Directory not found: {}", path.display())]
    DirectoryNotFound { path: PathBuf },

    #[error("Failed to list {}: {source}", path.display())]
    ListError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read {}: {source}", path.display())]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read asset {}: {source}", path.display())]
    AssetLoadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Template key '{key}' is already taken, skipping {}", path.display())]
    DuplicateKey { key: String, path: PathBuf },
}

impl RegistryError {
    /// Short title used for the notification raised from this error
    pub fn title(&self) -> &'static str {
        match self {
            RegistryError::DirectoryNotFound { .. } => "Prompts directory not found",
            RegistryError::ListError { .. } => "Failed to list prompts",
            RegistryError::ReadError { .. } => "Failed to read prompt",
            RegistryError::AssetLoadError { .. } => "Failed to load learning template",
            RegistryError::DuplicateKey { .. } => "Duplicate prompt key",
        }
    }

    /// Collisions are warnings; everything else is a failure
    pub fn is_warning(&self) -> bool {
        matches!(self, RegistryError::DuplicateKey { .. })
    }
}
