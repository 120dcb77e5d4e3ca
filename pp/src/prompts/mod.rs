//! Prompt Template System
//!
//! Materializes prompt templates from two places:
//! 1. Built-in templates compiled into the binary or shipped as an asset
//! 2. `.txt` / `.md` files in the configured prompts directory (`~/git/prompts`)
//!
//! Discovery chain: [`source::resolve_dir`] -> [`scanner::scan`] -> [`loader::load_template`].

pub mod asset;
pub mod embedded;
pub mod loader;
pub mod scanner;
pub mod source;
mod template;

pub use asset::{AssetCache, AssetState, FailurePolicy, FsReader, ReadText};
pub use loader::{LoadReport, derive_key, derive_title, discover, load_template};
pub use scanner::{ScanOutcome, scan};
pub use source::{DEFAULT_PROMPTS_DIR, resolve_dir};
pub use template::PromptTemplate;
