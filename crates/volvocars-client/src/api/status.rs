//! API status probe.

use std::collections::HashMap;

use serde_json::Value;

use crate::client::{REQUEST_TIMEOUT, VolvoCarsApi};
use crate::types::VolvoCarsValue;

/// API status client.
///
/// The backend-status endpoint is public: no bearer token, no API key.
pub struct StatusApi {
    client: VolvoCarsApi,
}

impl StatusApi {
    pub(crate) fn new(client: VolvoCarsApi) -> Self {
        Self { client }
    }

    /// Check the API backend status.
    ///
    /// Failures degrade to an `Unknown` status instead of erroring; this
    /// probe is informational only.
    pub async fn check(&self) -> HashMap<String, VolvoCarsValue> {
        let inner = self.client.inner();

        tracing::debug!("request API status");

        let message = match inner
            .http
            .get(&inner.status_url)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
        {
            Ok(response) if response.status().is_success() => response
                .json::<Value>()
                .await
                .ok()
                .and_then(|data| {
                    data.get("message")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                })
                .unwrap_or_else(|| "OK".to_string()),
            Ok(response) => {
                tracing::debug!(status = response.status().as_u16(), "API status failed");
                "Unknown".to_string()
            }
            Err(_) => "Unknown".to_string(),
        };

        HashMap::from([("apiStatus".to_string(), VolvoCarsValue::new(message))])
    }
}
