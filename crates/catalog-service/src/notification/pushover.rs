//! Pushover delivery over HTTPS.

use super::{Notification, Notifier};
use async_trait::async_trait;
use catalog_config::NotificationConfig;
use catalog_core::{CatalogError, CatalogResult};
use reqwest::Client;
use serde::Serialize;
use shaku::Component;
use tracing::{debug, info};

/// Service name used in `CatalogError::ExternalService`.
pub const PUSHOVER_SERVICE: &str = "pushover";

const MESSAGES_PATH: &str = "/1/messages.json";

#[derive(Serialize)]
struct PushoverMessage<'a> {
    token: &'a str,
    user: &'a str,
    title: &'a str,
    message: &'a str,
}

/// Pushover notifier.
///
/// Without credentials the notifier is disabled: every send is logged at
/// debug level and succeeds.
#[derive(Component)]
#[shaku(interface = Notifier)]
pub struct PushoverNotifier {
    client: Client,
    endpoint: String,
    /// Application token and user key. `None` disables delivery.
    credentials: Option<(String, String)>,
}

impl PushoverNotifier {
    /// Builds a notifier from configuration.
    pub fn from_config(config: &NotificationConfig) -> CatalogResult<Self> {
        if !config.enabled {
            info!("Push notifications disabled");
            return Ok(Self::disabled());
        }

        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| CatalogError::Internal(format!("Failed to create HTTP client: {e}")))?;

        let credentials = config
            .credentials()
            .map(|(token, user)| (token.to_string(), user.to_string()));

        Ok(Self::with_client(client, &config.api_url, credentials))
    }

    /// Creates a notifier with a preconfigured HTTP client.
    #[must_use]
    pub fn with_client(
        client: Client,
        api_url: &str,
        credentials: Option<(String, String)>,
    ) -> Self {
        Self {
            client,
            endpoint: format!("{}{}", api_url.trim_end_matches('/'), MESSAGES_PATH),
            credentials,
        }
    }

    /// Creates a notifier that drops every message.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            client: Client::new(),
            endpoint: String::new(),
            credentials: None,
        }
    }

    /// Returns true if messages are actually delivered.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.credentials.is_some()
    }
}

#[async_trait]
impl Notifier for PushoverNotifier {
    async fn send(&self, notification: &Notification) -> CatalogResult<()> {
        let Some((token, user)) = &self.credentials else {
            debug!("Notifications disabled, dropping '{}'", notification.title);
            return Ok(());
        };

        let form = PushoverMessage {
            token,
            user,
            title: &notification.title,
            message: &notification.message,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .form(&form)
            .send()
            .await
            .map_err(|e| CatalogError::external(PUSHOVER_SERVICE, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::external(
                PUSHOVER_SERVICE,
                format!("HTTP {}: {}", status.as_u16(), body),
            ));
        }

        debug!("Notification '{}' delivered", notification.title);
        Ok(())
    }
}

impl std::fmt::Debug for PushoverNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PushoverNotifier")
            .field("endpoint", &self.endpoint)
            .field("enabled", &self.is_enabled())
            .finish_non_exhaustive()
    }
}
