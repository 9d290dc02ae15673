//! Query and question text normalization.
//!
//! Both matchers compare normalized text only, which makes matching
//! punctuation-, whitespace-, and case-insensitive.

/// Normalize text for matching.
///
/// Strips every character that is not alphanumeric or whitespace, collapses
/// whitespace runs to single spaces, trims, and lowercases. Idempotent:
/// normalizing already-normalized text is a no-op.
pub fn normalize(text: &str) -> String {
    let kept: String = text
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();

    kept.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
