//! Clipboard sink

use arboard::Clipboard;
use eyre::{Result, eyre};
use tracing::debug;

/// Anything that can receive the text of the active template
pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// The system clipboard, opened on first use
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure(&mut self) -> Result<&mut Clipboard> {
        if self.inner.is_none() {
            debug!("SystemClipboard::ensure: opening clipboard");
            self.inner = Some(Clipboard::new().map_err(|e| eyre!("Clipboard unavailable: {}", e))?);
        }
        self.inner.as_mut().ok_or_else(|| eyre!("Clipboard unavailable"))
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        debug!(bytes = text.len(), "SystemClipboard::set_text: called");
        self.ensure()?
            .set_text(text.to_string())
            .map_err(|e| eyre!("Failed to write clipboard: {}", e))
    }
}

/// Keeps every write in memory
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    pub writes: Vec<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&str> {
        self.writes.last().map(String::as_str)
    }
}

impl ClipboardSink for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.writes.push(text.to_string());
        Ok(())
    }
}
