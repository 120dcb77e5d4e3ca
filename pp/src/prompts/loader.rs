//! Template Loader
//!
//! Turns files found by the scanner into [`PromptTemplate`] records.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::scanner;
use super::template::PromptTemplate;
use crate::error::RegistryError;

/// Outcome of one discovery pass over a prompts directory
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Directory that was scanned
    pub dir: PathBuf,
    /// Templates that loaded, in scan order
    pub templates: Vec<PromptTemplate>,
    /// Everything that went wrong along the way
    pub errors: Vec<RegistryError>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Key for a file name: the name with its last extension removed
pub fn derive_key(file_name: &str) -> String {
    Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name)
        .to_string()
}

/// Display title for a key
///
/// Underscores and hyphens become spaces and each word gets an uppercase
/// first letter; the rest of each word is left alone.
pub fn derive_title(key: &str) -> String {
    key.replace(['_', '-'], " ")
        .split(' ')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Read one file from `dir` into a template
pub fn load_template(dir: &Path, file_name: &str) -> Result<PromptTemplate, RegistryError> {
    let path = dir.join(file_name);
    debug!(?path, "load_template: called");

    let content = fs::read_to_string(&path).map_err(|source| RegistryError::ReadError {
        path: path.clone(),
        source,
    })?;

    let key = derive_key(file_name);
    let title = derive_title(&key);
    let filepath = std::path::absolute(&path).unwrap_or(path);

    Ok(PromptTemplate {
        key,
        title,
        content,
        filepath: Some(filepath),
    })
}

/// Scan `dir` and load every qualifying file
///
/// A file that fails to read is reported and skipped; the rest still load. A
/// directory that cannot be listed yields an empty report with one error.
pub fn discover(dir: &Path) -> LoadReport {
    debug!(?dir, "discover: called");
    let mut report = LoadReport {
        dir: dir.to_path_buf(),
        ..Default::default()
    };

    let outcome = match scanner::scan(dir) {
        Ok(outcome) => outcome,
        Err(e) => {
            warn!(error = %e, "discover: scan failed");
            report.errors.push(e);
            return report;
        }
    };
    report.errors.extend(outcome.errors);

    for file_name in &outcome.files {
        match load_template(dir, file_name) {
            Ok(template) => report.templates.push(template),
            Err(e) => {
                warn!(error = %e, "discover: skipping unreadable template");
                report.errors.push(e);
            }
        }
    }

    info!(
        ?dir,
        loaded = report.templates.len(),
        failed = report.errors.len(),
        "Discovered prompt templates"
    );
    report
}
