//! Capture walker: traverses a capture root and produces the flat record
//! list the snapshot builder consumes.
//!
//! The walker owns binary-extension detection and read-error recovery; the
//! snapshot data model trusts its records as given. A failing file read is
//! converted into an error-placeholder record rather than aborting the
//! capture.

use crate::document::EntryRecord;
use crate::error::CaptureError;
use crate::tokens::{TokenCounter, BINARY_PLACEHOLDER_TOKENS};
use ignore::gitignore::Gitignore;
use std::path::{Component, Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

/// Content recorded for files with a recognized binary extension.
pub const BINARY_PLACEHOLDER: &str = "[Binary file]";

/// Extensions whose content is replaced by the binary placeholder.
const BINARY_EXTENSIONS: &[&str] = &[
    ".wasm", ".png", ".jpg", ".jpeg", ".gif", ".bmp", ".ico", ".svg", ".webp", ".tiff", ".tff",
    ".woff", ".woff2", ".tif", ".psd", ".raw", ".heif", ".indd", ".ai", ".eps", ".pdf", ".docx",
    ".pptx", ".xlsx", ".mp3", ".flac", ".wav", ".aac", ".wma", ".ogg", ".mp4", ".m4a", ".mkv",
    ".webm", ".avi", ".mov", ".wmv", ".mpg", ".mpeg", ".flv", ".3gp", ".zip", ".rar", ".7z",
    ".gz", ".tar", ".tgz", ".bz2", ".xz", ".lz", ".lz4", ".lzo", ".zst", ".zstd", ".z",
];

/// Capture walker configuration
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// Emit directory records instead of file records
    pub directory_only: bool,
    /// Whether to follow symbolic links (default: true)
    pub follow_symlinks: bool,
    /// Per-file token count above which the file is reported as large
    pub token_limit: Option<u32>,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            directory_only: false,
            follow_symlinks: true,
            token_limit: None,
        }
    }
}

/// Per-capture diagnostics surfaced alongside the record list.
#[derive(Debug, Clone, Default)]
pub struct CaptureReport {
    /// Files whose token count exceeded the configured limit
    pub large_files: Vec<(String, u32)>,
    /// Files whose token count could not be computed (recorded as 0)
    pub files_with_token_errors: Vec<String>,
}

impl CaptureReport {
    pub fn has_token_errors(&self) -> bool {
        !self.files_with_token_errors.is_empty()
    }
}

/// Filesystem walker producing entry records in traversal order.
pub struct Walker<'a> {
    root: PathBuf,
    matcher: Gitignore,
    config: WalkerConfig,
    counter: &'a dyn TokenCounter,
}

impl<'a> Walker<'a> {
    pub fn new(
        root: PathBuf,
        matcher: Gitignore,
        config: WalkerConfig,
        counter: &'a dyn TokenCounter,
    ) -> Self {
        Self {
            root,
            matcher,
            config,
            counter,
        }
    }

    /// Walk the capture root and collect records.
    ///
    /// Ignored directories are pruned from descent. Entries are visited in
    /// file-name order per directory so repeated captures of an unchanged
    /// tree produce identical snapshots.
    pub fn walk(&self) -> Result<(Vec<EntryRecord>, CaptureReport), CaptureError> {
        let mut records = Vec::new();
        let mut report = CaptureReport::default();

        let walker = WalkDir::new(&self.root)
            .follow_links(self.config.follow_symlinks)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                if entry.depth() == 0 {
                    return true;
                }
                !self
                    .matcher
                    .matched(entry.path(), entry.file_type().is_dir())
                    .is_ignore()
            });

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry during capture: {}", e);
                    continue;
                }
            };
            if entry.depth() == 0 {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(&self.root) else {
                continue;
            };
            let relative = normalize_relative(relative);
            if relative.is_empty() {
                continue;
            }

            if self.config.directory_only {
                if entry.file_type().is_dir() {
                    records.push(EntryRecord::directory(relative, 0));
                }
            } else if entry.file_type().is_file() {
                records.push(self.process_file(entry.path(), relative, &mut report));
            }
        }

        Ok((records, report))
    }

    fn process_file(
        &self,
        path: &Path,
        relative: String,
        report: &mut CaptureReport,
    ) -> EntryRecord {
        if is_binary_path(&relative) {
            return EntryRecord::file(relative, BINARY_PLACEHOLDER, BINARY_PLACEHOLDER_TOKENS);
        }

        // Invalid UTF-8 is replaced, not rejected; an unreadable file becomes
        // an error-placeholder record and the capture continues.
        let content = match std::fs::read(path) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => {
                warn!("Error reading file {}: {}", path.display(), e);
                format!("Error reading file: {}", e)
            }
        };

        let tokens = match self.counter.count(&content) {
            Some(tokens) => {
                if let Some(limit) = self.config.token_limit {
                    if tokens > limit {
                        report.large_files.push((relative.clone(), tokens));
                    }
                }
                tokens
            }
            None => {
                report.files_with_token_errors.push(relative.clone());
                0
            }
        };

        EntryRecord::file(relative, content, tokens)
    }
}

/// Recognized binary extension, matched case-insensitively on the path tail.
fn is_binary_path(path: &str) -> bool {
    let lower = path.to_ascii_lowercase();
    BINARY_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Path-separator-normalized relative path (`/` on every platform).
fn normalize_relative(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
