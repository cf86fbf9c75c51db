//! Error types for the codeclip capture and merge pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Provider-related errors for shell-command generation
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Provider authentication failed: {0}")]
    AuthFailed(String),

    #[error("Provider rate limit exceeded: {0}")]
    RateLimit(String),

    #[error("Provider model not found: {0}")]
    ModelNotFound(String),

    #[error("Provider request failed: {0}")]
    RequestFailed(String),

    #[error("Provider response invalid: {0}")]
    InvalidResponse(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),
}

/// Capture, merge, and CLI-surface errors
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("Not a valid directory: {0}")]
    InvalidRoot(PathBuf),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Clipboard error: {0}")]
    ClipboardError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Provider error: {0}")]
    ProviderError(#[from] ProviderError),
}
