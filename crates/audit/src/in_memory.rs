//! In-memory audit sink — useful for testing and ephemeral runs.

use std::sync::Mutex;

use async_trait::async_trait;
use faqline_core::{AuditError, AuditRecord, AuditSink};

/// Stores audit rows in a vector.
#[derive(Default)]
pub struct MemoryAuditSink {
    records: Mutex<Vec<AuditRecord>>,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All rows recorded so far, oldest first.
    pub fn records(&self) -> Vec<AuditRecord> {
        self.records.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn clear(&self) {
        self.records.lock().unwrap().clear();
    }
}

#[async_trait]
impl AuditSink for MemoryAuditSink {
    fn name(&self) -> &str {
        "memory"
    }

    async fn record(&self, record: &AuditRecord) -> std::result::Result<(), AuditError> {
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}
