//! No-op audit sink — disables the audit trail entirely.

use async_trait::async_trait;
use faqline_core::{AuditError, AuditRecord, AuditSink};

/// An audit sink that drops every row.
pub struct NoopAuditSink;

#[async_trait]
impl AuditSink for NoopAuditSink {
    fn name(&self) -> &str {
        "noop"
    }

    async fn record(&self, _record: &AuditRecord) -> std::result::Result<(), AuditError> {
        Ok(())
    }
}
