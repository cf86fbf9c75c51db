//! CLI parse: clap types for codeclip. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Codeclip CLI - mergeable codebase snapshots on the clipboard
#[derive(Parser)]
#[command(name = "codeclip")]
#[command(about = "Capture codebases as mergeable snapshot documents on the clipboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Disable logging
    #[arg(long)]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(long)]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Capture a directory and merge it into the clipboard document
    Copy {
        /// Directory to capture (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Capture directory structure only, without file contents
        #[arg(short = 'd', long)]
        directory_only: bool,

        /// Token limit per file (warns if exceeded; overrides config)
        #[arg(short = 't', long)]
        token_limit: Option<u32>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show statistics for the document currently on the clipboard
    Stats {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Generate a shell command from a natural-language prompt
    Command {
        /// Natural-language description of the command
        prompt: String,

        /// Execute the generated command instead of copying it
        #[arg(long)]
        run: bool,

        /// Skip the confirmation prompt when executing
        #[arg(long)]
        force: bool,
    },
}
