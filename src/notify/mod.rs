//! Fire-and-forget webhook notifications.
//!
//! The notification channel is an external collaborator: events are posted
//! on a spawned task, failures are logged, and no caller ever awaits or
//! depends on the result.

use serde_json::json;

use crate::models::graduates::{self, GraduateStatus};

#[derive(Clone)]
pub struct Notifier {
    client: reqwest::Client,
    webhook_url: Option<String>,
}

impl Notifier {
    /// Reads `NOTIFY_WEBHOOK_URL`; without it the notifier is a no-op.
    pub fn from_env() -> Self {
        Self::new(std::env::var("NOTIFY_WEBHOOK_URL").ok())
    }

    pub fn new(webhook_url: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            webhook_url,
        }
    }

    /// A tracer survey submission was accepted and persisted.
    pub fn submission_received(&self, graduate: &graduates::Model) {
        self.dispatch(
            "graduate.submitted",
            json!({
                "graduate_id": graduate.id,
                "email": graduate.email,
                "status": graduate.status,
            }),
        );
    }

    /// An admin moved a profile through the approval lifecycle.
    pub fn status_changed(&self, graduate: &graduates::Model, previous: &GraduateStatus) {
        self.dispatch(
            "graduate.status_changed",
            json!({
                "graduate_id": graduate.id,
                "email": graduate.email,
                "previous": previous,
                "status": graduate.status,
            }),
        );
    }

    fn dispatch(&self, event: &'static str, data: serde_json::Value) {
        let Some(url) = self.webhook_url.clone() else {
            return;
        };
        let client = self.client.clone();
        tokio::spawn(async move {
            let body = json!({ "event": event, "data": data });
            if let Err(e) = client.post(&url).json(&body).send().await {
                tracing::warn!("Failed to deliver {event} notification: {e}");
            }
        });
    }
}
