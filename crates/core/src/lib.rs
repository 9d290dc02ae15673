//! # Faqline Core
//!
//! Domain types, traits, and error definitions for the faqline answer
//! service. This crate has **zero framework dependencies** — it defines the
//! domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! Every external collaborator (FAQ source, generation backend, audit sink)
//! is defined as a trait here. Implementations live in their respective
//! crates. This enables:
//! - Swapping implementations via configuration
//! - Easy testing with mock/stub implementations
//! - Clean dependency graph (all crates depend inward on core)

pub mod error;
pub mod turn;
pub mod faq;
pub mod resolution;
pub mod generate;
pub mod catalog;
pub mod audit;

// Re-export key types at crate root for ergonomics
pub use error::{AuditError, CatalogError, Error, GenerationError, Result};
pub use turn::{Conversation, Role, Turn};
pub use faq::FaqEntry;
pub use resolution::{AnswerSource, FaqMatch, Resolution};
pub use generate::{GenerationRequest, Generator};
pub use catalog::FaqSource;
pub use audit::{AuditRecord, AuditSink, RequestCounter};
