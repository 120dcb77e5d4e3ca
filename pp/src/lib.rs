//! promptpick - pick, view, edit and copy prompt templates
//!
//! Templates come from two places: a small built-in catalog and a directory of
//! plain-text files (`~/git/prompts` by default). The registry merges both,
//! the selection tracks which one is active, and the active text is what gets
//! copied.
//!
//! # Modules
//!
//! - [`prompts`] - Directory resolution, scanning, loading and the built-in catalog
//! - [`registry`] - Merged, addressable template collection
//! - [`selection`] - Active template and its editable working copy
//! - [`picker`] - One mounted command: load once, select the default
//! - [`notify`] - Non-fatal notifications for load failures
//! - [`clipboard`] - Clipboard sink
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface
//! - [`repl`] - Interactive picker
//!
//! # Example
//!
//! ```ignore
//! use promptpick::{Config, ConsoleNotifier, Picker, SystemClipboard};
//!
//! let config = Config::load(None)?;
//! let mut picker = Picker::from_config(&config, Box::new(ConsoleNotifier)).await?;
//! picker.select("paper");
//! picker.copy(&mut SystemClipboard::new())?;
//! ```

pub mod cli;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod notify;
pub mod picker;
pub mod prompts;
pub mod registry;
pub mod repl;
pub mod selection;

// Re-export commonly used types
pub use clipboard::{ClipboardSink, MemoryClipboard, SystemClipboard};
pub use config::Config;
pub use error::RegistryError;
pub use notify::{ConsoleNotifier, MemoryNotifier, Notification, NotificationStyle, Notifier};
pub use picker::Picker;
pub use prompts::{AssetCache, AssetState, FailurePolicy, FsReader, LoadReport, PromptTemplate, ReadText};
pub use registry::{Entry, Registry, Variant, spawn_discovery};
pub use repl::PickSession;
pub use selection::Selection;
