//! Codeclip: mergeable codebase snapshots on the clipboard.
//!
//! Captures a filesystem subtree as a structured, re-parseable text document
//! and merges it into the multi-snapshot document held by the system
//! clipboard, replacing any prior snapshot captured from the same root path.

pub mod cli;
pub mod clipboard;
pub mod codec;
pub mod config;
pub mod document;
pub mod error;
pub mod ignore;
pub mod logging;
pub mod merge;
pub mod provider;
pub mod stats;
pub mod tokens;
pub mod walker;
