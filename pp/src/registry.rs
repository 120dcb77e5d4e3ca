//! Template Registry
//!
//! Merges built-in templates with those discovered on disk and serves lookups
//! by key. Built-ins always come first; their keys are reserved.

use std::collections::HashSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::error::RegistryError;
use crate::notify::{Notification, Notifier};
use crate::prompts::embedded::{LEARNING_KEY, LEARNING_TITLE, PAPER_KEY, PAPER_SUMMARY, PAPER_TITLE};
use crate::prompts::{AssetCache, AssetState, LoadReport, PromptTemplate, ReadText, discover};

/// Which template sources a picker offers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    /// Learning mode (asset) and paper summary; no directory scan
    Learning,
    /// Paper summary followed by templates from the prompts directory
    #[default]
    Library,
}

impl Variant {
    /// Whether this variant discovers templates from the prompts directory
    pub fn scans_directory(&self) -> bool {
        matches!(self, Variant::Library)
    }

    fn builtins(&self) -> Vec<Slot> {
        let paper = Slot::Ready(PromptTemplate::builtin(PAPER_KEY, PAPER_TITLE, PAPER_SUMMARY));
        match self {
            Variant::Learning => vec![
                Slot::Asset {
                    key: LEARNING_KEY,
                    title: LEARNING_TITLE,
                },
                paper,
            ],
            Variant::Library => vec![paper],
        }
    }
}

impl std::str::FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "learning" => Ok(Self::Learning),
            "library" => Ok(Self::Library),
            _ => Err(format!("Unknown variant: {}. Use: learning or library", s)),
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Learning => write!(f, "learning"),
            Self::Library => write!(f, "library"),
        }
    }
}

/// A built-in template whose content is either inline or behind the asset cache
#[derive(Debug)]
enum Slot {
    Ready(PromptTemplate),
    Asset { key: &'static str, title: &'static str },
}

impl Slot {
    fn key(&self) -> &str {
        match self {
            Slot::Ready(t) => &t.key,
            Slot::Asset { key, .. } => key,
        }
    }
}

/// Selectable entry as shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub key: String,
    pub title: String,
    pub builtin: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Display width of the widest key, counted in chars
pub fn key_width(entries: &[Entry]) -> usize {
    entries.iter().map(|e| e.key.chars().count()).max().unwrap_or(0)
}

/// Run one discovery pass off the calling thread
///
/// The returned handle resolves once with the full report; nothing watches the
/// directory afterwards.
pub fn spawn_discovery(dir: PathBuf) -> JoinHandle<LoadReport> {
    debug!(?dir, "spawn_discovery: called");
    tokio::task::spawn_blocking(move || discover(&dir))
}

/// Addressable collection of templates for one picker
pub struct Registry {
    variant: Variant,
    builtins: Vec<Slot>,
    discovered: Vec<PromptTemplate>,
    asset: AssetCache,
    reader: Box<dyn ReadText>,
    notifier: Box<dyn Notifier>,
}

impl Registry {
    pub fn new(variant: Variant, asset: AssetCache, reader: Box<dyn ReadText>, notifier: Box<dyn Notifier>) -> Self {
        debug!(%variant, asset = ?asset.path(), "Registry::new: called");
        Self {
            variant,
            builtins: variant.builtins(),
            discovered: Vec::new(),
            asset,
            reader,
            notifier,
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Replace the discovered templates with those from `report`
    ///
    /// Every error in the report becomes one notification. Templates whose key
    /// is already taken, by a built-in or an earlier file, are dropped with a
    /// warning. Returns the number of templates kept.
    pub fn install(&mut self, report: LoadReport) -> usize {
        debug!(dir = ?report.dir, templates = report.templates.len(), errors = report.errors.len(), "Registry::install: called");
        for err in &report.errors {
            self.report(err);
        }

        let mut taken: HashSet<String> = self.builtins.iter().map(|s| s.key().to_string()).collect();
        let mut kept = Vec::with_capacity(report.templates.len());
        for template in report.templates {
            if taken.insert(template.key.clone()) {
                kept.push(template);
            } else {
                let err = RegistryError::DuplicateKey {
                    key: template.key.clone(),
                    path: template.filepath.clone().unwrap_or_default(),
                };
                self.report(&err);
            }
        }

        info!(dir = ?report.dir, kept = kept.len(), "Installed discovered templates");
        self.discovered = kept;
        self.discovered.len()
    }

    /// Entries in presentation order: built-ins, then discovered
    pub fn entries(&self) -> Vec<Entry> {
        let builtins = self.builtins.iter().map(|slot| match slot {
            Slot::Ready(t) => Entry {
                key: t.key.clone(),
                title: t.title.clone(),
                builtin: true,
                path: None,
            },
            Slot::Asset { key, title } => Entry {
                key: key.to_string(),
                title: title.to_string(),
                builtin: true,
                path: None,
            },
        });
        let discovered = self.discovered.iter().map(|t| Entry {
            key: t.key.clone(),
            title: t.title.clone(),
            builtin: false,
            path: t.filepath.clone(),
        });
        builtins.chain(discovered).collect()
    }

    pub fn len(&self) -> usize {
        self.builtins.len() + self.discovered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn discovered(&self) -> &[PromptTemplate] {
        &self.discovered
    }

    pub fn contains(&self, key: &str) -> bool {
        self.builtins.iter().any(|s| s.key() == key) || self.discovered.iter().any(|t| t.key == key)
    }

    /// Look up a template by key
    ///
    /// Asset-backed templates are read through the cache; a failed read is
    /// reported and yields empty content.
    pub fn resolve(&mut self, key: &str) -> Option<PromptTemplate> {
        debug!(%key, "Registry::resolve: called");
        let (asset_key, asset_title) = match self.builtins.iter().find(|s| s.key() == key) {
            Some(Slot::Ready(t)) => return Some(t.clone()),
            Some(Slot::Asset { key, title }) => (*key, *title),
            None => {
                let found = self.discovered.iter().find(|t| t.key == key).cloned();
                if found.is_none() {
                    debug!(%key, "Registry::resolve: no such key");
                }
                return found;
            }
        };

        let content = match self.asset.get(self.reader.as_ref()) {
            Ok(content) => content,
            Err(e) => {
                self.report(&e);
                String::new()
            }
        };
        Some(PromptTemplate::builtin(asset_key, asset_title, content))
    }

    /// Key that should be active right after mount
    pub fn default_key(&self) -> Option<String> {
        match self.variant {
            Variant::Learning => Some(LEARNING_KEY.to_string()),
            Variant::Library => self.discovered.first().map(|t| t.key.clone()),
        }
    }

    pub fn asset_state(&self) -> &AssetState {
        self.asset.state()
    }

    /// Drop the cached asset so the next access reads it again
    pub fn invalidate_asset(&mut self) {
        self.asset.invalidate();
    }

    pub fn notify(&self, notification: Notification) {
        self.notifier.notify(notification);
    }

    fn report(&self, err: &RegistryError) {
        self.notifier.notify(Notification::from(err));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::MemoryNotifier;
    use crate::prompts::{FailurePolicy, FsReader};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_key_width_counts_chars() {
        let entry = |key: &str| Entry {
            key: key.to_string(),
            title: String::new(),
            builtin: false,
            path: None,
        };

        assert_eq!(key_width(&[]), 0);
        assert_eq!(key_width(&[entry("paper"), entry("résumé")]), 6);
        assert_eq!(format!("{:w$}|", "résumé", w = key_width(&[entry("résumé"), entry("ab")])), "résumé|");
    }

    fn registry(variant: Variant, asset_dir: &std::path::Path) -> (Registry, MemoryNotifier) {
        let notifier = MemoryNotifier::new();
        let asset = AssetCache::new(asset_dir.join("learning_mode.txt"), FailurePolicy::Sticky);
        let registry = Registry::new(variant, asset, Box::new(FsReader), Box::new(notifier.clone()));
        (registry, notifier)
    }

    fn file_template(dir: &std::path::Path, key: &str, content: &str) -> PromptTemplate {
        PromptTemplate {
            key: key.to_string(),
            title: crate::prompts::derive_title(key),
            content: content.to_string(),
            filepath: Some(dir.join(format!("{}.md", key))),
        }
    }

    #[test]
    fn test_variant_from_str() {
        assert_eq!("learning".parse::<Variant>().unwrap(), Variant::Learning);
        assert_eq!("LIBRARY".parse::<Variant>().unwrap(), Variant::Library);
        assert!("other".parse::<Variant>().is_err());
        assert_eq!(Variant::Learning.to_string(), "learning");
    }

    #[test]
    fn test_learning_entries_and_default() {
        let temp = TempDir::new().unwrap();
        let (reg, _) = registry(Variant::Learning, temp.path());

        let keys: Vec<_> = reg.entries().into_iter().map(|e| e.key).collect();
        assert_eq!(keys, vec!["learning", "paper"]);
        assert_eq!(reg.default_key().as_deref(), Some("learning"));
        assert!(!reg.variant().scans_directory());
    }

    #[test]
    fn test_library_default_is_first_discovered() {
        let temp = TempDir::new().unwrap();
        let (mut reg, notifier) = registry(Variant::Library, temp.path());
        assert_eq!(reg.default_key(), None);

        let report = LoadReport {
            dir: temp.path().to_path_buf(),
            templates: vec![file_template(temp.path(), "alpha", "a"), file_template(temp.path(), "beta", "b")],
            errors: vec![],
        };
        assert_eq!(reg.install(report), 2);

        let keys: Vec<_> = reg.entries().into_iter().map(|e| e.key).collect();
        assert_eq!(keys, vec!["paper", "alpha", "beta"]);
        assert_eq!(reg.default_key().as_deref(), Some("alpha"));
        assert_eq!(notifier.count(), 0);
    }

    #[test]
    fn test_install_rejects_reserved_and_duplicate_keys() {
        let temp = TempDir::new().unwrap();
        let (mut reg, notifier) = registry(Variant::Library, temp.path());

        let report = LoadReport {
            dir: temp.path().to_path_buf(),
            templates: vec![
                file_template(temp.path(), "notes", "first"),
                file_template(temp.path(), "notes", "second"),
                file_template(temp.path(), "paper", "shadow"),
            ],
            errors: vec![],
        };
        assert_eq!(reg.install(report), 1);

        assert_eq!(reg.len(), 2);
        assert_eq!(reg.resolve("notes").unwrap().content, "first");
        assert_eq!(reg.resolve("paper").unwrap().content, PAPER_SUMMARY);
        assert_eq!(notifier.count_titled("Duplicate prompt key"), 2);
    }

    #[test]
    fn test_install_reports_each_error_once() {
        let temp = TempDir::new().unwrap();
        let (mut reg, notifier) = registry(Variant::Library, temp.path());

        let report = LoadReport {
            dir: temp.path().join("missing"),
            templates: vec![],
            errors: vec![RegistryError::DirectoryNotFound {
                path: temp.path().join("missing"),
            }],
        };
        reg.install(report);

        assert_eq!(notifier.count(), 1);
        assert_eq!(notifier.count_titled("Prompts directory not found"), 1);
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_resolve_asset_and_failure() {
        let temp = TempDir::new().unwrap();
        let (mut reg, notifier) = registry(Variant::Learning, temp.path());

        let learning = reg.resolve("learning").unwrap();
        assert_eq!(learning.content, "");
        assert!(learning.is_builtin());
        assert_eq!(notifier.count_titled("Failed to load learning template"), 1);

        fs::write(temp.path().join("learning_mode.txt"), "teach me").unwrap();
        assert_eq!(reg.resolve("learning").unwrap().content, "");
        assert_eq!(notifier.count(), 1);

        reg.invalidate_asset();
        assert_eq!(reg.resolve("learning").unwrap().content, "teach me");
        assert_eq!(reg.asset_state(), &AssetState::Loaded("teach me".to_string()));
    }

    #[test]
    fn test_resolve_unknown() {
        let temp = TempDir::new().unwrap();
        let (mut reg, _) = registry(Variant::Library, temp.path());
        assert!(reg.resolve("nope").is_none());
        assert!(!reg.contains("nope"));
        assert!(reg.contains("paper"));
    }

    #[tokio::test]
    async fn test_spawn_discovery() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("one.md"), "1").unwrap();

        let report = spawn_discovery(temp.path().to_path_buf()).await.unwrap();

        assert_eq!(report.templates.len(), 1);
        assert_eq!(report.templates[0].key, "one");
    }
}
