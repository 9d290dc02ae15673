//! Spreadsheet-bridge audit sink.
//!
//! Posts one JSON row per resolved request to a webhook that appends it to
//! a spreadsheet. The bridge owns the sheet credentials; this sink only
//! needs the webhook URL and, optionally, a bearer token.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use faqline_core::{AuditError, AuditRecord, AuditSink};
use serde_json::json;
use tracing::debug;

/// Delivers audit rows to a spreadsheet-bridge webhook over HTTPS.
pub struct SheetWebhookSink {
    webhook_url: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl SheetWebhookSink {
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            webhook_url: webhook_url.into(),
            token: None,
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    /// Set a bearer token sent with every delivery.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// The JSON row the bridge appends to the sheet.
    fn row_payload(record: &AuditRecord) -> serde_json::Value {
        json!({
            "request_id": record.request_id,
            "message": record.message,
            "answer": record.answer,
            "timestamp": Utc::now().to_rfc3339(),
        })
    }
}

#[async_trait]
impl AuditSink for SheetWebhookSink {
    fn name(&self) -> &str {
        "sheet-webhook"
    }

    async fn record(&self, record: &AuditRecord) -> std::result::Result<(), AuditError> {
        let mut request = self
            .client
            .post(&self.webhook_url)
            .json(&Self::row_payload(record));

        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AuditError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuditError::Delivery {
                status_code: status.as_u16(),
                reason: body,
            });
        }

        debug!(request_id = record.request_id, "Audit row delivered");
        Ok(())
    }
}
