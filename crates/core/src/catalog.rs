//! FaqSource trait — the abstraction over FAQ storage.

use async_trait::async_trait;

use crate::error::CatalogError;
use crate::faq::FaqEntry;

/// Where FAQ entries come from.
///
/// The pipeline holds no cache; a source is asked for the full set on every
/// request. Implementations decide whether that means re-reading a file or
/// cloning an in-memory list, and must preserve source order because the
/// matchers break ties by position.
#[async_trait]
pub trait FaqSource: Send + Sync {
    /// Load the full FAQ set, source order preserved.
    async fn load(&self) -> std::result::Result<Vec<FaqEntry>, CatalogError>;
}
