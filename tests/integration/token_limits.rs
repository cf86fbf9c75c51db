//! Token-limit configuration flowing through the capture pipeline.

use super::test_utils::SharedClipboard;
use codeclip::cli::{Commands, RunContext};
use codeclip::config::CodeclipConfig;
use std::fs;
use tempfile::TempDir;

fn copy_json(context: &mut RunContext, path: &std::path::Path, token_limit: Option<u32>) -> serde_json::Value {
    let output = context
        .execute(&Commands::Copy {
            path: path.to_path_buf(),
            directory_only: false,
            token_limit,
            format: "json".to_string(),
        })
        .unwrap();
    serde_json::from_str(&output).unwrap()
}

#[test]
fn test_config_token_limit_flags_large_files() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("big.txt"), "word ".repeat(200)).unwrap();
    fs::write(temp.path().join("small.txt"), "word\n").unwrap();

    let mut config = CodeclipConfig::default();
    config.capture.token_limit = 10;
    let mut context =
        RunContext::with_clipboard(config, Box::new(SharedClipboard::new()));

    let summary = copy_json(&mut context, temp.path(), None);
    let large = summary["large_files"].as_array().unwrap();
    assert_eq!(large.len(), 1);
    assert_eq!(large[0]["path"], "big.txt");
}

#[test]
fn test_cli_token_limit_overrides_config() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("big.txt"), "word ".repeat(200)).unwrap();

    // Config allows everything; the CLI flag tightens the limit.
    let mut config = CodeclipConfig::default();
    config.capture.token_limit = 1_000_000;
    let mut context =
        RunContext::with_clipboard(config, Box::new(SharedClipboard::new()));

    let summary = copy_json(&mut context, temp.path(), Some(10));
    let large = summary["large_files"].as_array().unwrap();
    assert_eq!(large.len(), 1);
}

#[test]
fn test_default_limit_keeps_small_captures_quiet() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("small.txt"), "just a few words\n").unwrap();

    let mut context =
        RunContext::with_clipboard(CodeclipConfig::default(), Box::new(SharedClipboard::new()));
    let summary = copy_json(&mut context, temp.path(), None);
    assert!(summary["large_files"].as_array().unwrap().is_empty());
    assert_eq!(summary["has_token_errors"], false);
}
