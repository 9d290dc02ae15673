//! The tiered answer-resolution pipeline — the heart of faqline.
//!
//! A query walks three tiers in order:
//!
//! 1. **Exact match** — a normalized catalog question appears verbatim
//!    inside the normalized query
//! 2. **Relevance match** — unique-token overlap scoring with a domain
//!    keyword bonus, gated by a fixed threshold and a topical post-filter
//! 3. **Generation** — the bounded conversation goes to the configured
//!    language-model backend and the reply is length-shaped
//!
//! The first tier to produce an answer wins. Every produced outcome is
//! offered to the audit sink on a detached task, so auditing never delays or
//! fails a response.

pub mod normalize;
pub mod exact;
pub mod relevance;
pub mod bound;
pub mod shape;
pub mod pipeline;

pub use normalize::normalize;
pub use exact::exact_match;
pub use relevance::{
    relevance_match, ALLOWED_TOPICS, CRITICAL_KEYWORDS, KEYWORD_BONUS, RELEVANCE_THRESHOLD,
};
pub use bound::{bound_conversation, MAX_CONVERSATION_TURNS};
pub use shape::{shape_response, ELLIPSIS, TRUNCATION_MARGIN, WORDS_PER_TOKEN};
pub use pipeline::{ResolutionPipeline, ResolveRequest};
