//! Built-in templates
//!
//! The paper summary prompt is compiled into the binary. The learning mode
//! prompt ships as an asset file next to the binary and is read lazily through
//! [`super::asset::AssetCache`].

use tracing::debug;

/// Key of the paper summary template
pub const PAPER_KEY: &str = "paper";

/// Title of the paper summary template
pub const PAPER_TITLE: &str = "Paper summary";

/// Research paper summary prompt
pub const PAPER_SUMMARY: &str = include_str!("../../prompts/paper.txt");

/// Key of the asset-backed learning mode template
pub const LEARNING_KEY: &str = "learning";

/// Title of the learning mode template
pub const LEARNING_TITLE: &str = "Learning mode";

/// File name of the learning mode asset inside the assets directory
pub const LEARNING_ASSET: &str = "learning_mode.txt";

/// Get the compiled-in prompt by key
pub fn get_embedded(key: &str) -> Option<&'static str> {
    debug!(%key, "get_embedded: called");
    match key {
        PAPER_KEY => Some(PAPER_SUMMARY),
        _ => None,
    }
}
