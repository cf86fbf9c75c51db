//! Token counting port.
//!
//! The capture pipeline only records whatever the counter returns; a real
//! BPE tokenizer is intentionally out of scope. `None` means counting failed
//! and is surfaced per entry through the capture report.

/// Fixed token count recorded for binary placeholder content.
pub const BINARY_PLACEHOLDER_TOKENS: u32 = 2;

/// Pure text-to-count port. Implementations must be deterministic.
pub trait TokenCounter {
    /// Token count for `text`, or `None` when counting failed.
    fn count(&self, text: &str) -> Option<u32>;
}

/// Deterministic approximation: one token per word plus one per four
/// characters of word overflow, which tracks BPE counts closely enough for
/// budgeting prose and source code.
#[derive(Debug, Default, Clone, Copy)]
pub struct ApproxTokenCounter;

impl TokenCounter for ApproxTokenCounter {
    fn count(&self, text: &str) -> Option<u32> {
        let mut tokens: u64 = 0;
        for word in text.split_whitespace() {
            let chars = word.chars().count() as u64;
            tokens += 1 + chars / 4;
        }
        u32::try_from(tokens).ok()
    }
}
