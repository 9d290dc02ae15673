//! CSV-backed FAQ catalog.
//!
//! Reads a `Question,Response` CSV file fresh on every load, so catalog
//! edits take effect without a restart. Rows whose question is empty are
//! skipped with a warning rather than failing the whole load.

use async_trait::async_trait;
use faqline_core::{CatalogError, FaqEntry, FaqSource};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::{debug, warn};

/// A FAQ catalog backed by a CSV file on disk.
pub struct CsvCatalog {
    path: PathBuf,
}

impl CsvCatalog {
    /// Create a catalog reading from the given CSV path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// One catalog row. Header names match the published sheet export.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Question")]
    question: String,

    #[serde(rename = "Response")]
    response: String,
}

#[async_trait]
impl FaqSource for CsvCatalog {
    async fn load(&self) -> std::result::Result<Vec<FaqEntry>, CatalogError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| CatalogError::Io {
                path: self.path.display().to_string(),
                reason: e.to_string(),
            })?;

        let mut reader = csv::Reader::from_reader(content.as_bytes());
        let mut entries = Vec::new();

        for (index, row) in reader.deserialize::<CsvRow>().enumerate() {
            let row = row.map_err(|e| CatalogError::Parse {
                path: self.path.display().to_string(),
                reason: e.to_string(),
            })?;

            if row.question.trim().is_empty() {
                // Header is line 1, first record line 2.
                warn!(line = index + 2, "Skipping FAQ row with empty question");
                continue;
            }

            entries.push(FaqEntry::new(row.question, row.response));
        }

        debug!(path = %self.path.display(), count = entries.len(), "FAQ catalog loaded");
        Ok(entries)
    }
}
