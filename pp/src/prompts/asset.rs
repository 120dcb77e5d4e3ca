//! Lazily loaded asset templates
//!
//! The learning mode prompt lives in a file shipped alongside the binary. It is
//! read on first use and memoized for the life of the owning registry.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::RegistryError;

/// Capability for reading a text file
///
/// Split out so call counts can be observed in tests.
pub trait ReadText {
    fn read_text(&self, path: &Path) -> io::Result<String>;
}

/// Reads from the local filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct FsReader;

impl ReadText for FsReader {
    fn read_text(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }
}

/// What the cache does after a failed read
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Serve empty content until [`AssetCache::invalidate`] is called
    #[default]
    Sticky,
    /// Try the read again on the next access
    Retry,
}

impl std::fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sticky => write!(f, "sticky"),
            Self::Retry => write!(f, "retry"),
        }
    }
}

/// Cache state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetState {
    Unloaded,
    Loaded(String),
    LoadFailed,
}

/// Memoized content of a single asset file
#[derive(Debug)]
pub struct AssetCache {
    path: PathBuf,
    policy: FailurePolicy,
    state: AssetState,
}

impl AssetCache {
    pub fn new(path: impl Into<PathBuf>, policy: FailurePolicy) -> Self {
        let path = path.into();
        debug!(?path, %policy, "AssetCache::new: called");
        Self {
            path,
            policy,
            state: AssetState::Unloaded,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn state(&self) -> &AssetState {
        &self.state
    }

    /// Content of the asset, reading it if needed
    ///
    /// The read error is returned only from the access that performed the
    /// failing read. Under [`FailurePolicy::Sticky`] later accesses return an
    /// empty string without touching `reader`.
    pub fn get(&mut self, reader: &dyn ReadText) -> Result<String, RegistryError> {
        match (&self.state, self.policy) {
            (AssetState::Loaded(content), _) => {
                debug!(path = ?self.path, "AssetCache::get: cache hit");
                return Ok(content.clone());
            }
            (AssetState::LoadFailed, FailurePolicy::Sticky) => {
                debug!(path = ?self.path, "AssetCache::get: previous load failed, serving empty content");
                return Ok(String::new());
            }
            (AssetState::Unloaded, _) | (AssetState::LoadFailed, FailurePolicy::Retry) => {}
        }

        debug!(path = ?self.path, "AssetCache::get: reading asset");
        match reader.read_text(&self.path) {
            Ok(content) => {
                info!(path = ?self.path, bytes = content.len(), "Loaded asset template");
                self.state = AssetState::Loaded(content.clone());
                Ok(content)
            }
            Err(source) => {
                warn!(path = ?self.path, error = %source, "Failed to load asset template");
                self.state = AssetState::LoadFailed;
                Err(RegistryError::AssetLoadError {
                    path: self.path.clone(),
                    source,
                })
            }
        }
    }

    /// Forget any cached content or failure
    pub fn invalidate(&mut self) {
        debug!(path = ?self.path, "AssetCache::invalidate: called");
        self.state = AssetState::Unloaded;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use tempfile::TempDir;

    #[derive(Default)]
    struct CountingReader {
        reads: Cell<usize>,
    }

    impl ReadText for CountingReader {
        fn read_text(&self, path: &Path) -> io::Result<String> {
            self.reads.set(self.reads.get() + 1);
            FsReader.read_text(path)
        }
    }

    #[test]
    fn test_reads_once() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("learning_mode.txt");
        fs::write(&path, "learn").unwrap();
        let reader = CountingReader::default();
        let mut cache = AssetCache::new(&path, FailurePolicy::Sticky);

        assert_eq!(cache.state(), &AssetState::Unloaded);
        assert_eq!(cache.get(&reader).unwrap(), "learn");
        assert_eq!(cache.get(&reader).unwrap(), "learn");
        assert_eq!(reader.reads.get(), 1);
        assert_eq!(cache.state(), &AssetState::Loaded("learn".to_string()));
    }

    #[test]
    fn test_sticky_failure() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("learning_mode.txt");
        let reader = CountingReader::default();
        let mut cache = AssetCache::new(&path, FailurePolicy::Sticky);

        let err = cache.get(&reader).unwrap_err();
        assert!(matches!(err, RegistryError::AssetLoadError { .. }));
        assert_eq!(cache.state(), &AssetState::LoadFailed);

        // File shows up later, but the failure sticks
        fs::write(&path, "late").unwrap();
        assert_eq!(cache.get(&reader).unwrap(), "");
        assert_eq!(reader.reads.get(), 1);

        cache.invalidate();
        assert_eq!(cache.get(&reader).unwrap(), "late");
        assert_eq!(reader.reads.get(), 2);
    }

    #[test]
    fn test_retry_failure() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("learning_mode.txt");
        let reader = CountingReader::default();
        let mut cache = AssetCache::new(&path, FailurePolicy::Retry);

        assert!(cache.get(&reader).is_err());
        assert!(cache.get(&reader).is_err());
        assert_eq!(reader.reads.get(), 2);

        fs::write(&path, "now").unwrap();
        assert_eq!(cache.get(&reader).unwrap(), "now");
    }

    #[test]
    fn test_failure_policy_yaml() {
        let policy: FailurePolicy = serde_yaml::from_str("retry").unwrap();
        assert_eq!(policy, FailurePolicy::Retry);
        assert_eq!(FailurePolicy::default(), FailurePolicy::Sticky);
    }
}
