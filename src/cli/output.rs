//! CLI output: capture summaries, stats presentation, and error mapping.

use crate::error::CaptureError;
use crate::stats::DocumentStats;
use crate::walker::CaptureReport;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde::Serialize;

/// Map domain errors to a string for the CLI surface.
pub fn map_error(e: &CaptureError) -> String {
    e.to_string()
}

#[derive(Serialize)]
struct CaptureSummary<'a> {
    files: usize,
    directories: usize,
    lines: usize,
    tokens: u64,
    has_token_errors: bool,
    large_files: Vec<LargeFile<'a>>,
    files_with_token_errors: &'a [String],
}

#[derive(Serialize)]
struct LargeFile<'a> {
    path: &'a str,
    tokens: u32,
}

/// Post-capture summary over the merged document plus walker diagnostics.
pub fn format_capture_summary(
    stats: &DocumentStats,
    directory_only: bool,
    report: &CaptureReport,
    format: &str,
) -> Result<String, CaptureError> {
    match format {
        "json" => {
            let summary = CaptureSummary {
                files: stats.files,
                directories: stats.directories,
                lines: stats.lines,
                tokens: stats.tokens,
                has_token_errors: report.has_token_errors(),
                large_files: report
                    .large_files
                    .iter()
                    .map(|(path, tokens)| LargeFile {
                        path,
                        tokens: *tokens,
                    })
                    .collect(),
                files_with_token_errors: &report.files_with_token_errors,
            };
            serde_json::to_string_pretty(&summary)
                .map_err(|e| CaptureError::ConfigError(e.to_string()))
        }
        "text" => Ok(format_capture_text(stats, directory_only, report)),
        other => Err(invalid_format(other)),
    }
}

fn format_capture_text(
    stats: &DocumentStats,
    directory_only: bool,
    report: &CaptureReport,
) -> String {
    let mut out = if directory_only {
        format!("d: {}", stats.directories.green())
    } else {
        let tokens_display = if report.has_token_errors() {
            format!("{} + ???", stats.tokens)
        } else {
            stats.tokens.to_string()
        };
        format!(
            "f: {} l: {} t: {}",
            stats.files.green(),
            stats.lines.yellow(),
            tokens_display.magenta()
        )
    };

    if !report.large_files.is_empty() {
        out.push_str(&format!("\n\n{}\n", "Files exceeding token limit:".red()));
        let mut table = Table::new();
        table.load_preset(comfy_table::presets::UTF8_FULL);
        table.set_header(vec!["Path", "Tokens"]);
        for (path, tokens) in &report.large_files {
            table.add_row(vec![path.clone(), tokens.to_string()]);
        }
        out.push_str(&table.to_string());
    }

    if report.has_token_errors() {
        out.push_str(&format!(
            "\n\n{}",
            "Files with failed token counts:".red()
        ));
        for path in &report.files_with_token_errors {
            out.push('\n');
            out.push_str(path);
        }
    }

    out
}

/// Stats for the document currently on the clipboard.
pub fn format_stats(stats: &DocumentStats, format: &str) -> Result<String, CaptureError> {
    match format {
        "json" => serde_json::to_string_pretty(stats)
            .map_err(|e| CaptureError::ConfigError(e.to_string())),
        "text" => Ok(format!(
            "entries: {} f: {} d: {} l: {} t: {}",
            stats.entries,
            stats.files.green(),
            stats.directories.green(),
            stats.lines.yellow(),
            stats.tokens.magenta()
        )),
        other => Err(invalid_format(other)),
    }
}

fn invalid_format(format: &str) -> CaptureError {
    CaptureError::ConfigError(format!(
        "Invalid format: '{}'. Must be 'text' or 'json'.",
        format
    ))
}
