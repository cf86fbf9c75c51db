//! Shared helpers for integration tests.

use codeclip::clipboard::ClipboardPort;
use codeclip::error::CaptureError;
use std::sync::{Arc, Mutex};

/// Clipboard backed by shared storage so tests can inspect what the pipeline
/// wrote after the run context has consumed the port.
#[derive(Clone, Default)]
pub struct SharedClipboard {
    buffer: Arc<Mutex<String>>,
}

impl SharedClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: &str) -> Self {
        let clipboard = Self::default();
        *clipboard.buffer.lock().unwrap() = text.to_string();
        clipboard
    }

    pub fn contents(&self) -> String {
        self.buffer.lock().unwrap().clone()
    }
}

impl ClipboardPort for SharedClipboard {
    fn read(&mut self) -> Result<String, CaptureError> {
        Ok(self.buffer.lock().unwrap().clone())
    }

    fn write(&mut self, text: &str) -> Result<(), CaptureError> {
        *self.buffer.lock().unwrap() = text.to_string();
        Ok(())
    }
}
