//! Selection State
//!
//! Tracks the active template key and the text currently shown for it. The
//! text may be edited in place; edits never reach the registry or disk.

use eyre::{Result, eyre};
use tracing::debug;

use crate::clipboard::ClipboardSink;
use crate::registry::Registry;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Active {
    key: String,
    content: String,
    edited: bool,
}

/// Active template and its working copy
#[derive(Debug, Default, Clone)]
pub struct Selection {
    active: Option<Active>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `key` active, loading its content from `registry`
    ///
    /// Key and content change together. An unknown key leaves the selection
    /// untouched and returns `false`.
    pub fn select(&mut self, registry: &mut Registry, key: &str) -> bool {
        debug!(%key, "Selection::select: called");
        match registry.resolve(key) {
            Some(template) => {
                self.active = Some(Active {
                    key: template.key,
                    content: template.content,
                    edited: false,
                });
                true
            }
            None => {
                debug!(%key, "Selection::select: unknown key, keeping current selection");
                false
            }
        }
    }

    pub fn key(&self) -> Option<&str> {
        self.active.as_ref().map(|a| a.key.as_str())
    }

    pub fn content(&self) -> Option<&str> {
        self.active.as_ref().map(|a| a.content.as_str())
    }

    /// Whether the working copy differs from what was loaded
    pub fn is_edited(&self) -> bool {
        self.active.as_ref().is_some_and(|a| a.edited)
    }

    /// Overwrite the working copy; returns `false` when nothing is selected
    pub fn edit(&mut self, content: impl Into<String>) -> bool {
        match self.active.as_mut() {
            Some(active) => {
                active.content = content.into();
                active.edited = true;
                true
            }
            None => false,
        }
    }

    /// Discard edits by reloading the active key from `registry`
    pub fn reset(&mut self, registry: &mut Registry) -> bool {
        match self.key().map(str::to_string) {
            Some(key) => self.select(registry, &key),
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.active = None;
    }

    /// Hand the working copy to `sink`
    pub fn copy_to(&self, sink: &mut dyn ClipboardSink) -> Result<()> {
        let active = self.active.as_ref().ok_or_else(|| eyre!("No template selected"))?;
        debug!(key = %active.key, bytes = active.content.len(), "Selection::copy_to: called");
        sink.set_text(&active.content)
    }
}
