//! Prompts directory scanner

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::RegistryError;

/// File extensions recognized as prompt templates (matched case-insensitively)
pub const EXTENSIONS: &[&str] = &["txt", "md"];

/// Result of listing a prompts directory
#[derive(Debug, Default)]
pub struct ScanOutcome {
    /// Qualifying file names, sorted
    pub files: Vec<String>,
    /// Per-entry problems that did not stop the scan
    pub errors: Vec<RegistryError>,
}

/// Whether a file name carries one of the [`EXTENSIONS`]
pub fn has_template_extension(name: impl AsRef<Path>) -> bool {
    name.as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| EXTENSIONS.iter().any(|known| e.eq_ignore_ascii_case(known)))
        .unwrap_or(false)
}

/// List template files at the top level of `dir`
///
/// Fails only when the directory is missing or cannot be listed at all. An entry
/// qualifies when it has a template extension and resolves to a regular file;
/// symlinks are followed.
pub fn scan(dir: &Path) -> Result<ScanOutcome, RegistryError> {
    debug!(?dir, "scan: called");
    if let Err(source) = fs::metadata(dir) {
        if source.kind() == io::ErrorKind::NotFound {
            debug!(?dir, "scan: directory does not exist");
            return Err(RegistryError::DirectoryNotFound { path: dir.to_path_buf() });
        }
        return Err(RegistryError::ListError {
            path: dir.to_path_buf(),
            source,
        });
    }

    let entries = fs::read_dir(dir).map_err(|source| RegistryError::ListError {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut outcome = ScanOutcome::default();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(source) => {
                outcome.errors.push(RegistryError::ListError {
                    path: dir.to_path_buf(),
                    source,
                });
                continue;
            }
        };

        let path = entry.path();
        if !has_template_extension(&path) {
            debug!(?path, "scan: skipping, extension not recognized");
            continue;
        }

        match fs::metadata(&path) {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => {
                debug!(?path, "scan: skipping, not a regular file");
                continue;
            }
            Err(source) => {
                outcome.errors.push(RegistryError::ReadError { path, source });
                continue;
            }
        }

        match entry.file_name().into_string() {
            Ok(name) => outcome.files.push(name),
            Err(_) => outcome.errors.push(non_utf8_name(path)),
        }
    }

    outcome.files.sort();
    info!(
        ?dir,
        files = outcome.files.len(),
        errors = outcome.errors.len(),
        "Scanned prompts directory"
    );
    Ok(outcome)
}

fn non_utf8_name(path: PathBuf) -> RegistryError {
    RegistryError::ReadError {
        path,
        source: io::Error::new(io::ErrorKind::InvalidData, "file name is not valid UTF-8"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), format!("contents of {}", name)).unwrap();
    }

    #[test]
    fn test_has_template_extension() {
        assert!(has_template_extension("a.txt"));
        assert!(has_template_extension("a.md"));
        assert!(has_template_extension("NOTES.MD"));
        assert!(has_template_extension("a.b.txt"));
        assert!(!has_template_extension("a.rs"));
        assert!(!has_template_extension("README"));
        assert!(!has_template_extension(".md"));
        assert!(!has_template_extension("a.txt.bak"));
    }

    #[test]
    fn test_scan_filters_and_sorts() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path();
        touch(dir, "zeta.md");
        touch(dir, "alpha.txt");
        touch(dir, "script.rs");
        touch(dir, "README");
        fs::create_dir(dir.join("folder.md")).unwrap();

        let outcome = scan(dir).unwrap();

        assert_eq!(outcome.files, vec!["alpha.txt".to_string(), "zeta.md".to_string()]);
        assert!(outcome.errors.is_empty());
    }

    #[test]
    fn test_scan_empty_dir() {
        let temp = TempDir::new().unwrap();
        let outcome = scan(temp.path()).unwrap();
        assert!(outcome.files.is_empty());
    }

    #[test]
    fn test_scan_missing_dir() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");

        let err = scan(&missing).unwrap_err();
        assert!(matches!(err, RegistryError::DirectoryNotFound { ref path } if *path == missing));
    }

    #[test]
    fn test_scan_file_instead_of_dir() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "plain.txt");

        let err = scan(&temp.path().join("plain.txt")).unwrap_err();
        assert!(matches!(err, RegistryError::ListError { .. }));
    }

    #[cfg(unix)]
    fn is_root() -> bool {
        use std::os::unix::fs::MetadataExt;
        // Root ignores permission bits, so the tests below cannot fail a read
        fs::metadata("/proc/self").map(|m| m.uid() == 0).unwrap_or(false)
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_unreadable_dir() {
        use std::os::unix::fs::PermissionsExt;

        if is_root() {
            return;
        }
        let temp = TempDir::new().unwrap();
        let locked = temp.path().join("locked");
        fs::create_dir(&locked).unwrap();
        touch(&locked, "hidden.md");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        let err = scan(&locked).unwrap_err();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        assert!(matches!(err, RegistryError::ListError { ref path, .. } if *path == locked));
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_unsearchable_parent_is_not_missing() {
        use std::os::unix::fs::PermissionsExt;

        if is_root() {
            return;
        }
        let temp = TempDir::new().unwrap();
        let parent = temp.path().join("parent");
        let child = parent.join("prompts");
        fs::create_dir_all(&child).unwrap();
        fs::set_permissions(&parent, fs::Permissions::from_mode(0o000)).unwrap();

        let err = scan(&child).unwrap_err();
        fs::set_permissions(&parent, fs::Permissions::from_mode(0o755)).unwrap();
        assert!(matches!(err, RegistryError::ListError { .. }));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_scan_non_utf8_name() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp = TempDir::new().unwrap();
        let dir = temp.path();
        touch(dir, "good.md");
        fs::write(dir.join(OsStr::from_bytes(b"bad\xff.md")), "bytes").unwrap();

        let outcome = scan(dir).unwrap();

        assert_eq!(outcome.files, vec!["good.md".to_string()]);
        assert_eq!(outcome.errors.len(), 1);
        match &outcome.errors[0] {
            RegistryError::ReadError { source, .. } => assert_eq!(source.kind(), io::ErrorKind::InvalidData),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_symlinks() {
        use std::os::unix::fs::symlink;

        let temp = TempDir::new().unwrap();
        let dir = temp.path();
        touch(dir, "real.md");
        fs::create_dir(dir.join("sub")).unwrap();
        symlink(dir.join("real.md"), dir.join("alias.md")).unwrap();
        symlink(dir.join("sub"), dir.join("linked_dir.txt")).unwrap();
        symlink(dir.join("gone.md"), dir.join("dangling.md")).unwrap();

        let outcome = scan(dir).unwrap();

        assert_eq!(outcome.files, vec!["alias.md".to_string(), "real.md".to_string()]);
        assert_eq!(outcome.errors.len(), 1);
        assert!(matches!(outcome.errors[0], RegistryError::ReadError { .. }));
    }
}
