use crate::utils::crypto::sign_payload;
use tracing::{debug, warn};

/// Tells the serving layer that dependent views are stale.
///
/// Purely best-effort: failures are logged and never propagated into the
/// operation that triggered them. When no webhook is configured the
/// notification is only traced.
#[derive(Clone)]
pub struct Revalidator {
    client: reqwest::Client,
    webhook_url: Option<String>,
    webhook_secret: Option<String>,
}

impl Revalidator {
    pub fn new(webhook_url: Option<String>, webhook_secret: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            webhook_url,
            webhook_secret,
        }
    }

    /// A notifier with no outbound target, used in tests.
    pub fn disabled() -> Self {
        Self::new(None, None)
    }

    /// Fire-and-forget revalidation of the given view paths.
    pub fn notify(&self, paths: &[&str]) {
        debug!(?paths, "marking views stale");

        let Some(url) = self.webhook_url.clone() else {
            return;
        };

        let body = serde_json::json!({ "paths": paths });
        let payload = body.to_string();
        let signature = self
            .webhook_secret
            .as_deref()
            .map(|secret| sign_payload(secret, payload.as_bytes()));
        let client = self.client.clone();

        tokio::spawn(async move {
            let mut request = client
                .post(&url)
                .header("Content-Type", "application/json")
                .body(payload);
            if let Some(signature) = signature {
                request = request.header("X-Revalidate-Signature", signature);
            }
            match request.send().await {
                Ok(response) if response.status().is_success() => {}
                Ok(response) => {
                    warn!(status = %response.status(), "revalidation webhook rejected");
                }
                Err(e) => {
                    warn!(error = %e, "revalidation webhook unreachable");
                }
            }
        });
    }
}
