//! Audit trail sinks for Faqline.
//!
//! Every resolved request produces one audit row: request id, the user's
//! message, and the answer served. Rows go to a spreadsheet-bridge webhook
//! when one is configured, otherwise to the process logs. Delivery is
//! best-effort; the pipeline logs and drops sink failures.

pub mod in_memory;
pub mod noop;
pub mod sheet;
pub mod tracing_sink;

pub use in_memory::MemoryAuditSink;
pub use noop::NoopAuditSink;
pub use sheet::SheetWebhookSink;
pub use tracing_sink::TracingAuditSink;

use std::sync::Arc;

use faqline_config::AppConfig;
use faqline_core::AuditSink;

/// Build the audit sink the configuration asks for.
///
/// Disabled audit gets a no-op sink, a configured webhook gets the
/// spreadsheet bridge, and everything else falls back to structured logs.
pub fn build_from_config(config: &AppConfig) -> Arc<dyn AuditSink> {
    if !config.audit.enabled {
        return Arc::new(NoopAuditSink);
    }

    match &config.audit.webhook_url {
        Some(url) => {
            let mut sink = SheetWebhookSink::new(url);
            if let Some(token) = &config.audit.token {
                sink = sink.with_token(token);
            }
            Arc::new(sink)
        }
        None => Arc::new(TracingAuditSink),
    }
}
