//! Document statistics, derived by re-decoding the final buffer text.

use crate::codec;
use crate::document::Document;
use serde::{Deserialize, Serialize};

/// Aggregate totals over every entry of every snapshot in a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStats {
    pub entries: usize,
    pub files: usize,
    pub directories: usize,
    pub lines: usize,
    pub tokens: u64,
}

impl DocumentStats {
    /// Stats for buffer text; all zeros when the text is not a document.
    pub fn from_text(text: &str) -> Self {
        match codec::decode(text) {
            Some(document) => Self::from_document(&document),
            None => Self::default(),
        }
    }

    pub fn from_document(document: &Document) -> Self {
        let mut stats = Self::default();
        for snapshot in &document.snapshots {
            for entry in &snapshot.entries {
                stats.entries += 1;
                stats.tokens += u64::from(entry.token_count());
                if entry.is_file() {
                    stats.files += 1;
                    stats.lines += entry.line_count();
                } else {
                    stats.directories += 1;
                }
            }
        }
        stats
    }
}
