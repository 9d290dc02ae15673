//! Audit sink trait and the process-wide request counter.
//!
//! Every produced outcome is offered to the audit sink after the answer is
//! decided. Auditing is best-effort: the pipeline never blocks the response
//! on it and never propagates its failures.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AuditError;

/// One row of the audit trail: which request, what was asked, what was
/// answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub request_id: u64,
    pub message: String,
    pub answer: String,
}

/// Trait for audit destinations.
#[async_trait]
pub trait AuditSink: Send + Sync {
    /// Short sink name for logs.
    fn name(&self) -> &str;

    async fn record(&self, record: &AuditRecord) -> std::result::Result<(), AuditError>;
}

/// Monotonic request-id source shared across the process.
///
/// Ids exist only to correlate log and audit lines, so relaxed ordering is
/// enough; there is no coordination with resolution state.
#[derive(Debug, Default)]
pub struct RequestCounter(AtomicU64);

impl RequestCounter {
    pub fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    /// Draw the next id. Ids start at 1.
    pub fn next_id(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed) + 1
    }
}
