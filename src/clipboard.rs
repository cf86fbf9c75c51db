//! Shared buffer port.
//!
//! The clipboard is the only persistence the pipeline has; modeling it as a
//! port keeps the merge path pure and testable without a real clipboard.

use crate::error::CaptureError;

/// Read/write access to the shared text buffer.
pub trait ClipboardPort {
    /// Current buffer text. Implementations degrade an empty or unreadable
    /// buffer to `""`; the merge engine treats the result as untrusted input.
    fn read(&mut self) -> Result<String, CaptureError>;

    fn write(&mut self, text: &str) -> Result<(), CaptureError>;
}

/// System clipboard backed by `arboard`.
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self, CaptureError> {
        let inner = arboard::Clipboard::new()
            .map_err(|e| CaptureError::ClipboardError(format!("Failed to open clipboard: {}", e)))?;
        Ok(Self { inner })
    }
}

impl ClipboardPort for SystemClipboard {
    fn read(&mut self) -> Result<String, CaptureError> {
        match self.inner.get_text() {
            Ok(text) => Ok(text),
            // An empty or non-text clipboard is a normal starting state.
            Err(arboard::Error::ContentNotAvailable) => Ok(String::new()),
            Err(e) => Err(CaptureError::ClipboardError(format!(
                "Failed to read clipboard: {}",
                e
            ))),
        }
    }

    fn write(&mut self, text: &str) -> Result<(), CaptureError> {
        self.inner
            .set_text(text.to_string())
            .map_err(|e| CaptureError::ClipboardError(format!("Failed to write clipboard: {}", e)))
    }
}

/// In-memory buffer for tests and headless runs.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    buffer: String,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            buffer: text.into(),
        }
    }
}

impl ClipboardPort for MemoryClipboard {
    fn read(&mut self) -> Result<String, CaptureError> {
        Ok(self.buffer.clone())
    }

    fn write(&mut self, text: &str) -> Result<(), CaptureError> {
        self.buffer = text.to_string();
        Ok(())
    }
}
