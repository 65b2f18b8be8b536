//! Fire-and-forget product analytics.
//!
//! Events are posted on a spawned task; nothing in the request path waits on
//! or reads the response, and failures are only logged.

use serde_json::{json, Value};

use crate::config::Config;

/// Event names, kept identical to the frontend's tracking plan.
#[allow(dead_code)]
pub mod events {
    // Giftee events
    pub const GIFTEE_ADDED: &str = "giftee_added";
    pub const GIFTEE_DETAILS_UPDATED: &str = "giftee_details_updated";
    pub const GIFTEE_UPDATE_FAILED: &str = "giftee_update_failed";

    // Idea events
    pub const IDEA_ADDED: &str = "idea_added";
    pub const IDEA_STATUS_TOGGLED: &str = "idea_status_toggled";
    pub const IDEA_URL_UPDATED: &str = "idea_url_updated";

    // Gift suggestion events
    pub const GIFT_SUGGESTIONS_REQUESTED: &str = "gift_suggestions_requested";
    pub const GIFT_SUGGESTIONS_RECEIVED: &str = "gift_suggestions_received";
    pub const GIFT_SUGGESTIONS_ERROR: &str = "gift_suggestions_error";
}

/// Analytics capture client. Disabled (every capture is a no-op) when no
/// endpoint is configured.
#[derive(Clone)]
pub struct AnalyticsClient {
    http: reqwest::Client,
    endpoint: Option<String>,
    api_key: Option<String>,
}

impl AnalyticsClient {
    pub fn from_config(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: config.analytics_endpoint.clone(),
            api_key: config.analytics_api_key.clone(),
        }
    }

    /// Emit one named event with properties. Never blocks the caller and
    /// never surfaces an error.
    pub fn capture(&self, event: &'static str, properties: Value) {
        let Some(endpoint) = self.endpoint.clone() else {
            return;
        };

        let http = self.http.clone();
        let body = json!({
            "api_key": self.api_key,
            "event": event,
            "properties": properties,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        });

        tokio::spawn(async move {
            if let Err(e) = http.post(&endpoint).json(&body).send().await {
                tracing::warn!("Failed to capture analytics event {}: {}", event, e);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_capture_without_endpoint_is_noop() {
        let mut config = Config::from_env();
        config.analytics_endpoint = None;
        let client = AnalyticsClient::from_config(&config);
        // must not spawn or panic
        client.capture(events::GIFTEE_ADDED, json!({ "giftee_id": "g1" }));
    }
}
