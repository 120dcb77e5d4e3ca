//! Template record

use std::path::PathBuf;

use serde::Serialize;

/// One addressable prompt template
///
/// `content` is a snapshot taken at load time. Edits made to a selection never
/// flow back into this record or the file behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptTemplate {
    /// Unique within one loaded collection
    pub key: String,
    /// Display label
    pub title: String,
    pub content: String,
    /// Absolute path for discovered templates, `None` for built-ins
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filepath: Option<PathBuf>,
}

impl PromptTemplate {
    /// Built-in template with no backing file
    pub fn builtin(key: impl Into<String>, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            content: content.into(),
            filepath: None,
        }
    }

    pub fn is_builtin(&self) -> bool {
        self.filepath.is_none()
    }
}
