//! Merge engine: reconcile a freshly captured snapshot into the document
//! sourced from the shared buffer.
//!
//! The buffer is untrusted input. Anything that does not decode as a document
//! (empty text, foreign clipboard content) starts a fresh document rather
//! than failing the capture; the outcome records which path was taken so
//! callers can distinguish "fresh" from "merged into existing".

use crate::codec;
use crate::document::{Document, Snapshot};

/// Where the merged document came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentSource {
    /// Buffer held no document; started from the default empty document
    Fresh,
    /// Buffer decoded as a prior document
    Existing,
}

/// Result of a merge: the updated document and its provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    pub document: Document,
    pub source: DocumentSource,
}

/// Merge `snapshot` into the document decoded from `buffer`.
///
/// After the merge exactly one snapshot carries `snapshot.root_path`: a prior
/// snapshot with the same root path is replaced in place, otherwise the new
/// snapshot is appended. All other snapshots are untouched in order and
/// content.
pub fn merge(buffer: &str, snapshot: Snapshot) -> MergeOutcome {
    let (mut document, source) = match codec::decode(buffer) {
        Some(document) => (document, DocumentSource::Existing),
        None => (Document::default(), DocumentSource::Fresh),
    };

    document.upsert_snapshot(snapshot);

    MergeOutcome { document, source }
}
