//! Outbound notifications.
//!
//! Delivery is best-effort: callers log failures and carry on.

mod pushover;

pub use pushover::{PushoverNotifier, PushoverNotifierParameters, PUSHOVER_SERVICE};

use async_trait::async_trait;
use catalog_core::{CatalogResult, Interface, Product};
use serde::Serialize;

/// A push message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub message: String,
}

impl Notification {
    /// Creates a notification.
    #[must_use]
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }

    /// Announcement sent after a product is stored.
    #[must_use]
    pub fn product_created(product: &Product) -> Self {
        Self::new(
            "New Product Created",
            format!(
                "A new product \"{}\" was created in the \"{}\" area.",
                product.name, product.area
            ),
        )
    }
}

/// Delivers notifications to an external channel.
#[async_trait]
pub trait Notifier: Interface + Send + Sync {
    /// Sends one notification.
    async fn send(&self, notification: &Notification) -> CatalogResult<()>;
}
