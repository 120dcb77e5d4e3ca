//! promptpick configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::prompts::FailurePolicy;
use crate::prompts::embedded::LEARNING_ASSET;
use crate::prompts::source::{DEFAULT_PROMPTS_DIR, resolve_user_dir};
use crate::registry::Variant;

/// Main promptpick configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding `.txt` / `.md` prompt files; `~` expands to home
    #[serde(rename = "prompts-dir")]
    pub prompts_dir: String,

    /// Directory holding bundled assets such as `learning_mode.txt`
    #[serde(rename = "assets-dir", skip_serializing_if = "Option::is_none")]
    pub assets_dir: Option<PathBuf>,

    /// Which template sources to offer
    pub variant: Variant,

    /// What to do after the learning asset fails to load
    #[serde(rename = "asset-failure")]
    pub asset_failure: FailurePolicy,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[serde(rename = "log-level", skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prompts_dir: DEFAULT_PROMPTS_DIR.to_string(),
            assets_dir: None,
            variant: Variant::default(),
            asset_failure: FailurePolicy::default(),
            log_level: None,
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        for path in Self::default_paths() {
            if path.exists() {
                match Self::load_from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                    }
                }
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Read just the log level, before logging is set up
    ///
    /// Errors are ignored here; [`Config::load`] reports them later.
    pub fn load_log_level(config_path: Option<&PathBuf>) -> Option<String> {
        let paths: Vec<PathBuf> = match config_path {
            Some(path) => vec![path.clone()],
            None => Self::default_paths(),
        };
        paths
            .iter()
            .find(|p| p.exists())
            .and_then(|p| Self::load_from_file(p).ok())
            .and_then(|c| c.log_level)
    }

    /// Project-local `.promptpick.yml`, then `~/.config/promptpick/promptpick.yml`
    fn default_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(".promptpick.yml")];
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("promptpick").join("promptpick.yml"));
        }
        paths
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// The prompts directory with `~` expanded
    pub fn resolved_prompts_dir(&self) -> PathBuf {
        resolve_user_dir(&self.prompts_dir)
    }

    /// Assets directory
    ///
    /// The configured directory wins. Otherwise the first existing of
    /// `<exe dir>/assets`, `<data dir>/promptpick/assets` and the crate's own
    /// `assets/` (for `cargo run`); failing all of those, the data dir path.
    pub fn resolved_assets_dir(&self) -> PathBuf {
        if let Some(dir) = &self.assets_dir {
            debug!(?dir, "resolved_assets_dir: using configured directory");
            return resolve_user_dir(&dir.to_string_lossy());
        }

        let data_assets = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("promptpick")
            .join("assets");
        let candidates = [
            std::env::current_exe()
                .ok()
                .and_then(|exe| exe.parent().map(|p| p.join("assets"))),
            Some(data_assets.clone()),
            Some(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets")),
        ];

        match candidates.into_iter().flatten().find(|d| d.is_dir()) {
            Some(dir) => {
                debug!(?dir, "resolved_assets_dir: found assets directory");
                dir
            }
            None => data_assets,
        }
    }

    /// Full path of the learning mode asset
    pub fn learning_asset_path(&self) -> PathBuf {
        self.resolved_assets_dir().join(LEARNING_ASSET)
    }
}
