//! CLI route: run context and command dispatch.

use crate::clipboard::{ClipboardPort, SystemClipboard};
use crate::codec;
use crate::config::{CodeclipConfig, ConfigLoader};
use crate::document::Snapshot;
use crate::error::{CaptureError, ProviderError};
use crate::ignore;
use crate::merge::{self, DocumentSource};
use crate::provider::{self, CompletionOptions, OpenRouterClient};
use crate::stats::DocumentStats;
use crate::tokens::ApproxTokenCounter;
use crate::walker::{Walker, WalkerConfig};
use std::path::Path;
use tracing::{debug, info};

use super::output;
use super::parse::Commands;

/// Runtime context for CLI execution: configuration plus the clipboard port.
pub struct RunContext {
    config: CodeclipConfig,
    clipboard: Box<dyn ClipboardPort>,
}

impl RunContext {
    /// Create a run context with the system clipboard.
    pub fn new(config_path: Option<&Path>) -> Result<Self, CaptureError> {
        let config = ConfigLoader::load(config_path)?;
        let clipboard = Box::new(SystemClipboard::new()?);
        Ok(Self { config, clipboard })
    }

    /// Context with an explicit clipboard port (tests, headless runs).
    pub fn with_clipboard(config: CodeclipConfig, clipboard: Box<dyn ClipboardPort>) -> Self {
        Self { config, clipboard }
    }

    /// Execute a CLI command via the route table.
    pub fn execute(&mut self, command: &Commands) -> Result<String, CaptureError> {
        match command {
            Commands::Copy {
                path,
                directory_only,
                token_limit,
                format,
            } => self.handle_copy(path, *directory_only, *token_limit, format),
            Commands::Stats { format } => self.handle_stats(format),
            Commands::Command { prompt, run, force } => self.handle_command(prompt, *run, *force),
        }
    }

    fn handle_copy(
        &mut self,
        path: &Path,
        directory_only: bool,
        token_limit: Option<u32>,
        format: &str,
    ) -> Result<String, CaptureError> {
        let base = std::env::current_dir()?;
        let requested = base.join(path);
        let root = requested
            .canonicalize()
            .map_err(|_| CaptureError::InvalidRoot(requested.clone()))?;
        if !root.is_dir() {
            return Err(CaptureError::InvalidRoot(root));
        }

        let git_root = ignore::find_git_root(&root);
        let patterns = ignore::collect_ignore_patterns(&base, git_root.as_deref());
        let matcher = ignore::build_matcher(&root, &patterns)?;
        debug!(
            patterns = patterns.len(),
            root = %root.display(),
            "Capture starting"
        );

        let counter = ApproxTokenCounter;
        let walker_config = WalkerConfig {
            directory_only,
            follow_symlinks: self.config.capture.follow_symlinks,
            token_limit: Some(token_limit.unwrap_or(self.config.capture.token_limit)),
        };
        let (records, report) =
            Walker::new(root.clone(), matcher, walker_config, &counter).walk()?;
        let snapshot = Snapshot::from_records(root.to_string_lossy().into_owned(), records);

        let buffer = self.clipboard.read()?;
        let outcome = merge::merge(&buffer, snapshot);
        match outcome.source {
            DocumentSource::Existing => info!("Merged capture into existing document"),
            DocumentSource::Fresh => info!("Started fresh document"),
        }

        let text = codec::encode(&outcome.document);
        self.clipboard.write(&text)?;

        let stats = DocumentStats::from_text(&text);
        output::format_capture_summary(&stats, directory_only, &report, format)
    }

    fn handle_stats(&mut self, format: &str) -> Result<String, CaptureError> {
        let buffer = self.clipboard.read()?;
        let stats = DocumentStats::from_text(&buffer);
        output::format_stats(&stats, format)
    }

    fn handle_command(&mut self, prompt: &str, run: bool, force: bool) -> Result<String, CaptureError> {
        let settings = self.config.provider.clone();
        let api_key = settings.resolve_api_key().ok_or_else(|| {
            ProviderError::NotConfigured(
                "No API key: set OPENROUTER_API_KEY or provider.api_key in the config file"
                    .to_string(),
            )
        })?;

        let client = OpenRouterClient::new(
            settings.model.clone(),
            api_key,
            Some(settings.resolve_base_url()),
        )?;
        let options = CompletionOptions {
            temperature: settings.temperature,
            max_tokens: None,
        };

        let rt = tokio::runtime::Runtime::new().map_err(|e| {
            CaptureError::ConfigError(format!("Failed to create async runtime: {}", e))
        })?;
        let command = rt.block_on(provider::generate_command(&client, prompt, options))?;

        if run {
            if !force {
                let confirmed = dialoguer::Confirm::new()
                    .with_prompt(format!("Execute '{}'?", command))
                    .interact()
                    .map_err(|e| {
                        CaptureError::ConfigError(format!("Failed to get user input: {}", e))
                    })?;
                if !confirmed {
                    return Ok("Execution cancelled".to_string());
                }
            }
            info!("Executing generated command: {}", command);
            let status = std::process::Command::new("sh")
                .arg("-c")
                .arg(&command)
                .status()?;
            if status.success() {
                Ok(format!("Command completed: {}", command))
            } else {
                Ok(format!("Command exited with {}: {}", status, command))
            }
        } else {
            self.clipboard.write(&command)?;
            Ok(format!("Generated command copied to clipboard: {}", command))
        }
    }
}
