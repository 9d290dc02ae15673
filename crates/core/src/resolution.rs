//! Resolution outcome types.
//!
//! One query runs through the tiered matchers exactly once; the outcome
//! records the answer, which tier produced it, and the history the caller
//! should carry into the next request.

use serde::{Deserialize, Serialize};

use crate::turn::Conversation;

/// Which tier of the pipeline produced the answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnswerSource {
    /// The normalized catalog question appeared verbatim inside the query
    ExactFaq,
    /// Token-overlap scoring cleared the relevance threshold
    RelevantFaq,
    /// The language-model fallback generated the answer
    Generated,
}

/// A scored FAQ candidate produced by a matcher.
///
/// Computed fresh per query, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct FaqMatch {
    /// The matched entry's response text
    pub response: String,

    /// Match confidence; exact matches carry 1.0
    pub score: f64,
}

/// The final product of one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resolution {
    /// The answer returned to the caller
    pub answer: String,

    /// Which tier produced it
    pub source: AnswerSource,

    /// Bounded history including the new user turn, plus the assistant turn
    /// when the answer was generated
    pub conversation: Conversation,
}
