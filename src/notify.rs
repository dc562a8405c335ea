//! Outbound chat notifications for entity mutations.
//!
//! Fire-and-forget: a mutation handler queues the message and moves on. A
//! failed or slow webhook never affects the request outcome; failures are
//! logged and dropped.

use serde_json::json;
use tracing::{debug, warn};

#[derive(Clone)]
pub struct Notifier {
    client: reqwest::Client,
    webhook_url: Option<String>,
}

impl Notifier {
    pub fn new(client: reqwest::Client, webhook_url: Option<String>) -> Self {
        if webhook_url.is_none() {
            debug!("No notification webhook configured; mutation messages disabled");
        }
        Self {
            client,
            webhook_url,
        }
    }

    /// A notifier that never posts anywhere. Used in tests.
    pub fn disabled() -> Self {
        Self::new(reqwest::Client::new(), None)
    }

    /// Queue one human-readable message for delivery.
    pub fn send(&self, message: impl Into<String>) {
        let url = match &self.webhook_url {
            Some(url) => url.clone(),
            None => return,
        };

        let message = message.into();
        let client = self.client.clone();

        tokio::spawn(async move {
            let body = json!({ "text": message });
            match client.post(&url).json(&body).send().await {
                Ok(resp) if resp.status().is_success() => {
                    debug!("Notification delivered: {}", message);
                }
                Ok(resp) => {
                    warn!(
                        "Notification webhook returned {}: {}",
                        resp.status(),
                        message
                    );
                }
                Err(e) => {
                    warn!("Notification webhook failed: {} ({})", e, message);
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disabled_notifier_is_a_no_op() {
        let notifier = Notifier::disabled();
        // Must not panic or spawn anything that errors out.
        notifier.send("New rice mill added: test");
    }
}
