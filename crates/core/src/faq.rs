//! FAQ catalog entry.

use serde::{Deserialize, Serialize};

/// A single question/response pair from the FAQ catalog.
///
/// Entries are immutable once loaded; resolvers receive the full set fresh
/// on every request, so catalog edits show up without a restart. An entry
/// with a question that normalizes to the empty string is malformed and is
/// skipped by every matcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
    /// Canonical phrasing of the question
    pub question: String,

    /// The published answer
    pub response: String,
}

impl FaqEntry {
    pub fn new(question: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            response: response.into(),
        }
    }
}
