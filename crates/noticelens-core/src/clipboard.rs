//! Clipboard export of the letter templates.

use thiserror::Error;

pub const COPY_OK_MESSAGE: &str = "Copied to clipboard!";
pub const COPY_FAILED_MESSAGE: &str = "Failed to copy to clipboard.";

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("no clipboard available")]
    Unavailable,

    #[error("clipboard write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// A place text can be written to. Best effort: callers report failure, they never abort.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Keeps the last written text in memory. Useful headless and in tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl MemoryClipboard {
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}
