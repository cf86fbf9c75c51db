//! Snapshot document data model.
//!
//! `EntryRecord`, `Snapshot`, and `Document` are the value objects shared by
//! the codec and the merge engine. A `Document` is the unit of textual
//! round-trip; a `Snapshot` is the unit of capture and merge, keyed by the
//! root path it was captured from.

/// Default usage instructions embedded at the top of every document.
pub const DEFAULT_PREAMBLE: &str = "\
This document contains a representation of one or more codebases.
Each codebase is enclosed in <codebase> tags with a 'path' attribute.
Files are represented by <file> tags with the 'path' attribute.
File contents are stored within the <file> tags.
For directory-only mode, <directory> tags are used instead of <file> tags.";

/// One filesystem item under a snapshot root.
///
/// Directory entries never carry content or line counts; file entries own
/// their content verbatim (or a binary/error placeholder).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryRecord {
    File {
        /// Path relative to the snapshot root, `/`-separated
        relative_path: String,
        /// Raw text, binary placeholder, or read-error placeholder
        content: String,
        token_count: u32,
        /// Newline-delimited line count of `content` (0 for empty content)
        line_count: usize,
    },
    Directory {
        /// Path relative to the snapshot root, `/`-separated
        relative_path: String,
        token_count: u32,
    },
}

impl EntryRecord {
    /// File entry; derives the line count from the content.
    pub fn file(relative_path: impl Into<String>, content: impl Into<String>, tokens: u32) -> Self {
        let content = content.into();
        let line_count = content.lines().count();
        EntryRecord::File {
            relative_path: relative_path.into(),
            content,
            token_count: tokens,
            line_count,
        }
    }

    /// Directory entry (directory-only mode).
    pub fn directory(relative_path: impl Into<String>, tokens: u32) -> Self {
        EntryRecord::Directory {
            relative_path: relative_path.into(),
            token_count: tokens,
        }
    }

    pub fn relative_path(&self) -> &str {
        match self {
            EntryRecord::File { relative_path, .. }
            | EntryRecord::Directory { relative_path, .. } => relative_path,
        }
    }

    pub fn token_count(&self) -> u32 {
        match self {
            EntryRecord::File { token_count, .. }
            | EntryRecord::Directory { token_count, .. } => *token_count,
        }
    }

    /// Line count; always 0 for directories.
    pub fn line_count(&self) -> usize {
        match self {
            EntryRecord::File { line_count, .. } => *line_count,
            EntryRecord::Directory { .. } => 0,
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self, EntryRecord::File { .. })
    }
}

/// One captured filesystem subtree, keyed by its root path.
///
/// Entries retain traversal insertion order; a snapshot is built fresh per
/// capture and never mutated afterwards (full replace, not incremental patch).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub root_path: String,
    pub entries: Vec<EntryRecord>,
}

impl Snapshot {
    /// Assemble a snapshot from the flat record list produced by traversal.
    /// Record order is preserved unchanged: no sorting, no deduplication.
    pub fn from_records(root_path: impl Into<String>, records: Vec<EntryRecord>) -> Self {
        Self {
            root_path: root_path.into(),
            entries: records,
        }
    }
}

/// The full shared artifact: a preamble plus an ordered snapshot sequence
/// with at most one snapshot per root path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub preamble: String,
    pub snapshots: Vec<Snapshot>,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            preamble: DEFAULT_PREAMBLE.to_string(),
            snapshots: Vec::new(),
        }
    }
}

impl Document {
    /// Replace the snapshot sharing `snapshot.root_path` in place, preserving
    /// its position; append when no snapshot with that root path exists.
    pub fn upsert_snapshot(&mut self, snapshot: Snapshot) {
        for existing in self.snapshots.iter_mut() {
            if existing.root_path == snapshot.root_path {
                *existing = snapshot;
                return;
            }
        }
        self.snapshots.push(snapshot);
    }
}
