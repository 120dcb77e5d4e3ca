//! Prompts directory resolution

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// Used when no prompts directory is configured
pub const DEFAULT_PROMPTS_DIR: &str = "~/git/prompts";

/// Expand a configured prompts directory into a path
///
/// An empty string means [`DEFAULT_PROMPTS_DIR`]. A leading `~` (alone or
/// followed by `/`) is replaced with `home`. Anything else passes through
/// unchanged; existence is the scanner's problem.
pub fn resolve_dir(raw: &str, home: Option<&Path>) -> PathBuf {
    debug!(%raw, ?home, "resolve_dir: called");
    let raw = if raw.is_empty() { DEFAULT_PROMPTS_DIR } else { raw };

    let rest = if raw == "~" {
        Some("")
    } else {
        raw.strip_prefix("~/")
    };

    match (rest, home) {
        (Some(rest), Some(home)) => {
            let path = if rest.is_empty() { home.to_path_buf() } else { home.join(rest) };
            debug!(?path, "resolve_dir: expanded home shorthand");
            path
        }
        (Some(_), None) => {
            warn!(%raw, "resolve_dir: no home directory available, leaving path unexpanded");
            PathBuf::from(raw)
        }
        (None, _) => PathBuf::from(raw),
    }
}

/// [`resolve_dir`] against the current user's home directory
pub fn resolve_user_dir(raw: &str) -> PathBuf {
    resolve_dir(raw, dirs::home_dir().as_deref())
}
