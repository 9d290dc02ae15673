//! In-memory catalog — useful for testing and fixed FAQ sets.

use async_trait::async_trait;
use faqline_core::{CatalogError, FaqEntry, FaqSource};

/// A catalog that serves a fixed, pre-parsed entry list.
pub struct StaticCatalog {
    entries: Vec<FaqEntry>,
}

impl StaticCatalog {
    pub fn new(entries: Vec<FaqEntry>) -> Self {
        Self { entries }
    }

    /// A catalog with no entries; every lookup falls through to generation.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl FaqSource for StaticCatalog {
    async fn load(&self) -> std::result::Result<Vec<FaqEntry>, CatalogError> {
        Ok(self.entries.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn serves_entries_in_insertion_order() {
        let catalog = StaticCatalog::new(vec![
            FaqEntry::new("First?", "One."),
            FaqEntry::new("Second?", "Two."),
        ]);

        let entries = catalog.load().await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].question, "First?");
        assert_eq!(entries[1].question, "Second?");
    }

    #[tokio::test]
    async fn empty_catalog_loads_nothing() {
        let catalog = StaticCatalog::empty();
        assert!(catalog.load().await.unwrap().is_empty());
    }
}
