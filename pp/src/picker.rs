//! Picker lifecycle
//!
//! A [`Picker`] is one mounted command: it runs a single discovery pass, fills
//! the registry, and points the selection at the default entry. After that the
//! directory is not looked at again unless [`Picker::reload`] is called.

use std::path::{Path, PathBuf};

use eyre::{Context, Result};
use tracing::{debug, info};

use crate::clipboard::ClipboardSink;
use crate::config::Config;
use crate::notify::{Notification, Notifier};
use crate::prompts::{AssetCache, FsReader, ReadText};
use crate::registry::{Entry, Registry, spawn_discovery};
use crate::selection::Selection;

/// Notification title used when an action needs an active template
pub const NO_SELECTION: &str = "No template selected";

/// Registry plus selection for one command invocation
pub struct Picker {
    registry: Registry,
    selection: Selection,
    prompts_dir: PathBuf,
}

impl Picker {
    /// Build a registry from `config` and mount it
    pub async fn from_config(config: &Config, notifier: Box<dyn Notifier>) -> Result<Self> {
        Self::from_config_with_reader(config, Box::new(FsReader), notifier).await
    }

    pub async fn from_config_with_reader(
        config: &Config,
        reader: Box<dyn ReadText>,
        notifier: Box<dyn Notifier>,
    ) -> Result<Self> {
        let asset = AssetCache::new(config.learning_asset_path(), config.asset_failure);
        let registry = Registry::new(config.variant, asset, reader, notifier);
        Self::mount(registry, config.resolved_prompts_dir()).await
    }

    /// Load templates once and select the default entry
    pub async fn mount(registry: Registry, prompts_dir: PathBuf) -> Result<Self> {
        debug!(?prompts_dir, variant = %registry.variant(), "Picker::mount: called");
        let mut picker = Self {
            registry,
            selection: Selection::new(),
            prompts_dir,
        };
        picker.load().await?;
        picker.select_default();
        info!(
            entries = picker.registry.len(),
            active = ?picker.selection.key(),
            "Picker mounted"
        );
        Ok(picker)
    }

    /// Run a fresh discovery pass
    ///
    /// The active key survives if it still exists; otherwise the default is
    /// selected. Edits to the active text are kept only when the key survives.
    pub async fn reload(&mut self) -> Result<()> {
        debug!(prompts_dir = ?self.prompts_dir, "Picker::reload: called");
        self.load().await?;
        match self.selection.key() {
            Some(key) if self.registry.contains(key) => {
                debug!(%key, "Picker::reload: keeping active key");
            }
            _ => {
                self.selection.clear();
                self.select_default();
            }
        }
        Ok(())
    }

    async fn load(&mut self) -> Result<()> {
        if !self.registry.variant().scans_directory() {
            debug!("Picker::load: variant has no directory source");
            return Ok(());
        }
        let report = spawn_discovery(self.prompts_dir.clone())
            .await
            .context("Template discovery task failed")?;
        self.registry.install(report);
        Ok(())
    }

    fn select_default(&mut self) {
        if let Some(key) = self.registry.default_key() {
            self.selection.select(&mut self.registry, &key);
        }
    }

    pub fn entries(&self) -> Vec<Entry> {
        self.registry.entries()
    }

    pub fn prompts_dir(&self) -> &Path {
        &self.prompts_dir
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn active_key(&self) -> Option<&str> {
        self.selection.key()
    }

    pub fn active_content(&self) -> Option<&str> {
        self.selection.content()
    }

    /// Switch the active template; unknown keys are ignored
    pub fn select(&mut self, key: &str) -> bool {
        self.selection.select(&mut self.registry, key)
    }

    /// Replace the active text without touching the template source
    pub fn edit(&mut self, content: impl Into<String>) -> bool {
        self.selection.edit(content)
    }

    /// Throw away edits to the active text
    pub fn reset(&mut self) -> bool {
        self.selection.reset(&mut self.registry)
    }

    /// Copy the active text to `sink` and report the outcome
    ///
    /// Nothing selected is only a warning; a clipboard failure is an error.
    pub fn copy(&self, sink: &mut dyn ClipboardSink) -> Result<()> {
        let Some(key) = self.selection.key() else {
            self.registry
                .notify(Notification::warning(NO_SELECTION, "nothing to copy"));
            return Ok(());
        };
        match self.selection.copy_to(sink) {
            Ok(()) => {
                self.registry
                    .notify(Notification::success("Copied to clipboard", key.to_string()));
                Ok(())
            }
            Err(e) => {
                self.registry
                    .notify(Notification::failure("Failed to copy template", e.to_string()));
                Err(e)
            }
        }
    }
}
