//! Ignore pattern collection and matcher construction.
//!
//! Pattern sources, in order: built-in defaults, then `.gitignore` and
//! `.repoignore` at the git root when the capture base sits inside a git
//! repository (otherwise at the base itself), then `~/.repoignore`. Glob
//! semantics are delegated to the `ignore` crate's gitignore machinery.

use crate::error::CaptureError;
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::fs;
use std::path::{Path, PathBuf};

/// Patterns always excluded from captures.
pub const BUILTIN_DEFAULTS: &[&str] = &[".git", ".repo", "package-lock.json", "yarn.lock"];

/// Nearest ancestor of `start` containing a `.git` directory.
pub fn find_git_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.canonicalize().ok()?;
    loop {
        if current.join(".git").is_dir() {
            return Some(current);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Read one ignore file into pattern lines: trim, skip blanks and comments,
/// strip a leading `/` so patterns stay root-relative.
fn parse_ignore_file(path: &Path) -> Vec<String> {
    let Ok(contents) = fs::read_to_string(path) else {
        return Vec::new();
    };
    let mut patterns = Vec::new();
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        patterns.push(line.trim_start_matches('/').to_string());
    }
    patterns
}

/// Collect the full pattern list for a capture rooted under `base_directory`.
pub fn collect_ignore_patterns(base_directory: &Path, git_root: Option<&Path>) -> Vec<String> {
    let mut patterns: Vec<String> = BUILTIN_DEFAULTS.iter().map(|s| (*s).to_string()).collect();

    let source_dir = git_root.unwrap_or(base_directory);
    patterns.extend(parse_ignore_file(&source_dir.join(".gitignore")));
    patterns.extend(parse_ignore_file(&source_dir.join(".repoignore")));

    if let Some(base_dirs) = directories::BaseDirs::new() {
        patterns.extend(parse_ignore_file(&base_dirs.home_dir().join(".repoignore")));
    }

    patterns
}

/// Build a gitignore matcher rooted at the capture root.
pub fn build_matcher(root: &Path, patterns: &[String]) -> Result<Gitignore, CaptureError> {
    let mut builder = GitignoreBuilder::new(root);
    for pattern in patterns {
        builder.add_line(None, pattern).map_err(|e| {
            CaptureError::ConfigError(format!("Invalid ignore pattern '{}': {}", pattern, e))
        })?;
    }
    builder
        .build()
        .map_err(|e| CaptureError::ConfigError(format!("Failed to build ignore matcher: {}", e)))
}
