//! Tracing-based audit sink — one structured log line per resolved request.

use async_trait::async_trait;
use faqline_core::{AuditError, AuditRecord, AuditSink};

/// Writes audit rows to the process logs via `tracing::info!`.
///
/// The default sink when no webhook is configured.
pub struct TracingAuditSink;

#[async_trait]
impl AuditSink for TracingAuditSink {
    fn name(&self) -> &str {
        "tracing"
    }

    async fn record(&self, record: &AuditRecord) -> std::result::Result<(), AuditError> {
        tracing::info!(
            request_id = record.request_id,
            message = %record.message,
            answer = %record.answer,
            "AUDIT"
        );
        Ok(())
    }
}
