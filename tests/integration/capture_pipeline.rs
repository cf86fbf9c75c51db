//! End-to-end capture pipeline tests: walk, merge, encode, clipboard.

use super::test_utils::SharedClipboard;
use codeclip::cli::{Commands, RunContext};
use codeclip::codec;
use codeclip::config::CodeclipConfig;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn copy_command(path: &Path) -> Commands {
    Commands::Copy {
        path: path.to_path_buf(),
        directory_only: false,
        token_limit: None,
        format: "text".to_string(),
    }
}

fn run_copy(clipboard: &SharedClipboard, path: &Path) {
    let mut context =
        RunContext::with_clipboard(CodeclipConfig::default(), Box::new(clipboard.clone()));
    context.execute(&copy_command(path)).unwrap();
}

fn canonical_root(path: &Path) -> String {
    path.canonicalize().unwrap().to_string_lossy().into_owned()
}

#[test]
fn test_copy_places_decodable_document_on_clipboard() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("readme.md"), "# Title\n\nBody\n").unwrap();
    fs::create_dir(temp.path().join("src")).unwrap();
    fs::write(temp.path().join("src").join("lib.rs"), "pub fn f() {}\n").unwrap();

    let clipboard = SharedClipboard::new();
    run_copy(&clipboard, temp.path());

    let document = codec::decode(&clipboard.contents()).unwrap();
    assert_eq!(document.snapshots.len(), 1);
    assert_eq!(document.snapshots[0].root_path, canonical_root(temp.path()));

    let paths: Vec<_> = document.snapshots[0]
        .entries
        .iter()
        .map(|e| e.relative_path())
        .collect();
    assert!(paths.contains(&"readme.md"));
    assert!(paths.contains(&"src/lib.rs"));
}

#[test]
fn test_recapture_replaces_snapshot_with_fresh_content() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("a.txt"), "old\n").unwrap();

    let clipboard = SharedClipboard::new();
    run_copy(&clipboard, temp.path());

    fs::write(temp.path().join("a.txt"), "new content\nsecond line\n").unwrap();
    run_copy(&clipboard, temp.path());

    let document = codec::decode(&clipboard.contents()).unwrap();
    assert_eq!(document.snapshots.len(), 1);

    let entry = document.snapshots[0]
        .entries
        .iter()
        .find(|e| e.relative_path() == "a.txt")
        .unwrap();
    assert_eq!(entry.line_count(), 2);
    assert!(!clipboard.contents().contains("old\n"));
}

#[test]
fn test_second_root_appends_after_first() {
    let first = TempDir::new().unwrap();
    fs::write(first.path().join("one.txt"), "1\n").unwrap();
    let second = TempDir::new().unwrap();
    fs::write(second.path().join("two.txt"), "2\n").unwrap();

    let clipboard = SharedClipboard::new();
    run_copy(&clipboard, first.path());
    run_copy(&clipboard, second.path());

    let document = codec::decode(&clipboard.contents()).unwrap();
    assert_eq!(document.snapshots.len(), 2);
    assert_eq!(document.snapshots[0].root_path, canonical_root(first.path()));
    assert_eq!(document.snapshots[1].root_path, canonical_root(second.path()));
}

#[test]
fn test_directory_only_capture_emits_directory_entries() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("src").join("nested")).unwrap();
    fs::write(temp.path().join("src").join("main.rs"), "fn main() {}\n").unwrap();

    let clipboard = SharedClipboard::new();
    let mut context =
        RunContext::with_clipboard(CodeclipConfig::default(), Box::new(clipboard.clone()));
    context
        .execute(&Commands::Copy {
            path: temp.path().to_path_buf(),
            directory_only: true,
            token_limit: None,
            format: "text".to_string(),
        })
        .unwrap();

    let document = codec::decode(&clipboard.contents()).unwrap();
    let entries = &document.snapshots[0].entries;
    assert!(!entries.is_empty());
    assert!(entries.iter().all(|e| !e.is_file()));
    assert!(!clipboard.contents().contains("<file path="));
}

#[test]
fn test_foreign_clipboard_content_starts_fresh_document() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("a.txt"), "a\n").unwrap();

    let clipboard = SharedClipboard::with_text("meeting notes, definitely not a document");
    run_copy(&clipboard, temp.path());

    let document = codec::decode(&clipboard.contents()).unwrap();
    assert_eq!(document.snapshots.len(), 1);
    assert!(!clipboard.contents().contains("meeting notes"));
}

#[test]
fn test_stats_reflects_captured_document() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("a.txt"), "one\ntwo\n").unwrap();
    fs::write(temp.path().join("b.txt"), "three\n").unwrap();

    let clipboard = SharedClipboard::new();
    run_copy(&clipboard, temp.path());

    let mut context =
        RunContext::with_clipboard(CodeclipConfig::default(), Box::new(clipboard.clone()));
    let output = context
        .execute(&Commands::Stats {
            format: "json".to_string(),
        })
        .unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed["files"], 2);
    assert_eq!(parsed["lines"], 3);
}

#[test]
fn test_clipboard_document_roundtrips_through_codec() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("tricky.rs"),
        "let x = a < b; // <file path=\"nope\"\n",
    )
    .unwrap();

    let clipboard = SharedClipboard::new();
    run_copy(&clipboard, temp.path());

    let text = clipboard.contents();
    let document = codec::decode(&text).unwrap();
    assert_eq!(codec::encode(&document), text);
}
