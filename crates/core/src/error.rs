//! Error types for the faqline domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error enum; the top-level `Error` is
//! what a resolution request can fail with.

use thiserror::Error;

/// The top-level error type for resolution requests.
#[derive(Debug, Error)]
pub enum Error {
    /// The required user message was absent or empty. No resolver runs.
    #[error("message content is required")]
    InvalidRequest,

    // --- Generation errors ---
    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    // --- Catalog errors ---
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    // --- Audit errors ---
    #[error("Audit error: {0}")]
    Audit(#[from] AuditError),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Clone, Error)]
pub enum GenerationError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read FAQ catalog {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("Malformed FAQ catalog {path}: {reason}")]
    Parse { path: String, reason: String },
}

#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Audit delivery failed: {reason} (status: {status_code})")]
    Delivery { status_code: u16, reason: String },

    #[error("Audit network error: {0}")]
    Network(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_request_message_is_stable() {
        // The gateway surfaces this text to callers.
        assert_eq!(Error::InvalidRequest.to_string(), "message content is required");
    }

    #[test]
    fn generation_error_displays_status() {
        let err = Error::Generation(GenerationError::ApiError {
            status_code: 429,
            message: "Too many requests".into(),
        });
        assert!(err.to_string().contains("429"));
        assert!(err.to_string().contains("Too many requests"));
    }

    #[test]
    fn catalog_error_names_the_path() {
        let err = Error::Catalog(CatalogError::Io {
            path: "data/faqs.csv".into(),
            reason: "No such file or directory".into(),
        });
        assert!(err.to_string().contains("data/faqs.csv"));
    }
}
