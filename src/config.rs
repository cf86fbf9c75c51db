//! Configuration system.
//!
//! Layered configuration: serde defaults, then the global config file at
//! `~/.config/codeclip/config.toml` (or an explicit `--config` path), then
//! `CODECLIP_`-prefixed environment variables (nested keys separated by
//! `__`, e.g. `CODECLIP_PROVIDER__MODEL`). Provider credentials additionally
//! fall back to the `OPENROUTER_API_KEY` / `OPENROUTER_BASE_URL` variables.

use crate::error::CaptureError;
use crate::logging::LoggingConfig;
use crate::provider::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CodeclipConfig {
    /// Command-generation provider settings
    #[serde(default)]
    pub provider: ProviderSettings,

    /// Capture behavior
    #[serde(default)]
    pub capture: CaptureSettings,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Provider settings for shell-command generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSettings {
    #[serde(default = "default_model")]
    pub model: String,

    /// Endpoint base URL; `OPENROUTER_BASE_URL` or the OpenRouter default
    /// when unset
    #[serde(default)]
    pub base_url: Option<String>,

    /// API key; `OPENROUTER_API_KEY` when unset
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_temperature() -> f32 {
    0.7
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: None,
            api_key: None,
            temperature: default_temperature(),
        }
    }
}

impl ProviderSettings {
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("OPENROUTER_API_KEY").ok())
    }

    pub fn resolve_base_url(&self) -> String {
        self.base_url
            .clone()
            .or_else(|| std::env::var("OPENROUTER_BASE_URL").ok())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }
}

/// Capture settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureSettings {
    /// Per-file token count above which a warning is printed
    #[serde(default = "default_token_limit")]
    pub token_limit: u32,

    #[serde(default = "default_follow_symlinks")]
    pub follow_symlinks: bool,
}

fn default_token_limit() -> u32 {
    10_000
}

fn default_follow_symlinks() -> bool {
    true
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            token_limit: default_token_limit(),
            follow_symlinks: default_follow_symlinks(),
        }
    }
}

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the global file (or `override_path`) plus
    /// environment overrides. An explicit override path must exist; the
    /// global file is optional.
    pub fn load(override_path: Option<&Path>) -> Result<CodeclipConfig, CaptureError> {
        let mut builder = Config::builder();

        if let Some(path) = override_path {
            builder = builder.add_source(File::from(path.to_path_buf()).required(true));
        } else if let Some(global) = Self::global_config_path() {
            if global.exists() {
                builder = builder.add_source(File::from(global).required(false));
            }
        }

        builder = builder.add_source(Environment::with_prefix("CODECLIP").separator("__"));

        builder
            .build()
            .and_then(|config| config.try_deserialize())
            .map_err(|e| CaptureError::ConfigError(format!("Failed to load configuration: {}", e)))
    }

    /// Path to the global config file.
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "codeclip")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
