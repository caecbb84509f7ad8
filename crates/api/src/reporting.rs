//! Webhook sink for unexpected service errors.

use std::time::Duration;

use wording_core::error::CoreError;
use wording_core::reporting::ReportSink;

/// HTTP request timeout for a single report.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Posts `{ "operation", "error", "kind", "timestamp" }` to `url`.
///
/// Delivery happens on a spawned task so reporting never delays the
/// request that failed; delivery failures are only logged. Must be used
/// inside a Tokio runtime.
#[derive(Clone)]
pub struct WebhookSink {
    client: reqwest::Client,
    url: String,
}

impl WebhookSink {
    pub fn new(url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

impl ReportSink for WebhookSink {
    fn capture(&self, operation: &'static str, err: &CoreError) {
        let payload = serde_json::json!({
            "operation": operation,
            "error": err.to_string(),
            "kind": err.kind(),
            "timestamp": chrono::Utc::now(),
        });
        let client = self.client.clone();
        let url = self.url.clone();

        tokio::spawn(async move {
            let result = client
                .post(&url)
                .json(&payload)
                .send()
                .await
                .and_then(|r| r.error_for_status());
            if let Err(e) = result {
                tracing::warn!(url = %url, error = %e, "Failed to deliver error report");
            }
        });
    }
}
