use std::env;

/// Shared secret for verifying signed provisioning events.
#[derive(Clone, Debug)]
pub struct WebhookConfig {
    pub secret: String,
}

impl WebhookConfig {
    /// # Panics
    ///
    /// Panics if `WEBHOOK_SECRET` is not set; the webhook route cannot
    /// operate without it.
    pub fn from_env() -> Self {
        Self {
            secret: env::var("WEBHOOK_SECRET").expect("WEBHOOK_SECRET must be set"),
        }
    }
}
