//! Textual codec for snapshot documents.
//!
//! Encodes a `Document` into a tagged text format and decodes it back. The
//! round-trip contract is the correctness-critical property: for every
//! document this codec produces, `decode(encode(doc))` is structurally equal
//! to `doc`. Decoding untrusted buffer text never panics; blocks that do not
//! match the tag grammar are dropped and the rest of the document survives.
//!
//! Known limitation: file content containing the literal `</file>` terminator
//! truncates that entry on decode. The terminator is not escaped, so captures
//! of files that embed this format do not round-trip exactly.

use crate::document::{Document, EntryRecord, Snapshot, DEFAULT_PREAMBLE};
use once_cell::sync::Lazy;
use regex::Regex;

/// Top-level document marker; its presence distinguishes "prior document"
/// from foreign buffer text.
pub const DOCUMENT_OPEN: &str = "<codeclip>";
pub const DOCUMENT_CLOSE: &str = "</codeclip>";

static INSTRUCTIONS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<instructions>(.*?)</instructions>").expect("instructions pattern compiles")
});

static CODEBASE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)<codebase\s+path="([^"]+)">(.*?)</codebase>"#)
        .expect("codebase pattern compiles")
});

// Single alternation over both entry shapes so interleaved file and
// directory entries decode in document order.
static ENTRY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r#"(?s)<file\s+path="([^"]+)"\s+tokens="(\d+)">(.*?)</file>"#,
        r#"|<directory\s+path="([^"]+)"\s+tokens="(\d+)"></directory>"#,
    ))
    .expect("entry pattern compiles")
});

/// Encode a full document: marker, preamble block, snapshot blocks in order.
pub fn encode(document: &Document) -> String {
    let mut lines = Vec::new();
    lines.push(DOCUMENT_OPEN.to_string());
    lines.push("<instructions>".to_string());
    lines.push(document.preamble.clone());
    lines.push("</instructions>".to_string());

    for snapshot in &document.snapshots {
        lines.push(encode_snapshot(snapshot));
    }

    lines.push(DOCUMENT_CLOSE.to_string());
    lines.join("\n")
}

/// Encode one snapshot as a tagged block with one sub-block per entry.
/// File content is embedded verbatim.
pub fn encode_snapshot(snapshot: &Snapshot) -> String {
    let mut lines = Vec::new();
    lines.push(format!(r#"<codebase path="{}">"#, snapshot.root_path));
    for entry in &snapshot.entries {
        lines.push(encode_entry(entry));
    }
    lines.push("</codebase>".to_string());
    lines.join("\n")
}

fn encode_entry(entry: &EntryRecord) -> String {
    match entry {
        EntryRecord::File {
            relative_path,
            content,
            token_count,
            ..
        } => format!(
            r#"<file path="{}" tokens="{}">{}</file>"#,
            relative_path, token_count, content
        ),
        EntryRecord::Directory {
            relative_path,
            token_count,
        } => format!(
            r#"<directory path="{}" tokens="{}"></directory>"#,
            relative_path, token_count
        ),
    }
}

/// Decode buffer text into a document.
///
/// Returns `None` when the top-level marker is absent ("no prior document",
/// as opposed to "malformed"). Malformed snapshot or entry blocks inside an
/// otherwise-decodable document are skipped, not fatal.
pub fn decode(text: &str) -> Option<Document> {
    if !text.contains(DOCUMENT_OPEN) {
        return None;
    }

    let preamble = INSTRUCTIONS_RE
        .captures(text)
        .map(|cap| cap[1].trim().to_string())
        .unwrap_or_else(|| DEFAULT_PREAMBLE.to_string());

    let mut snapshots = Vec::new();
    for cap in CODEBASE_RE.captures_iter(text) {
        let root_path = cap[1].to_string();
        let entries = decode_entries(&cap[2]);
        snapshots.push(Snapshot {
            root_path,
            entries,
        });
    }

    Some(Document {
        preamble,
        snapshots,
    })
}

/// Scan a snapshot block for file and directory sub-blocks in document order.
fn decode_entries(block: &str) -> Vec<EntryRecord> {
    let mut entries = Vec::new();
    for cap in ENTRY_RE.captures_iter(block) {
        if let (Some(path), Some(tokens), Some(content)) = (cap.get(1), cap.get(2), cap.get(3)) {
            // Token attribute outside u32 range means the block is malformed;
            // drop the entry and keep scanning.
            let Ok(tokens) = tokens.as_str().parse::<u32>() else {
                continue;
            };
            entries.push(EntryRecord::file(path.as_str(), content.as_str(), tokens));
        } else if let (Some(path), Some(tokens)) = (cap.get(4), cap.get(5)) {
            let Ok(tokens) = tokens.as_str().parse::<u32>() else {
                continue;
            };
            entries.push(EntryRecord::directory(path.as_str(), tokens));
        }
    }
    entries
}
