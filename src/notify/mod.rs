//! Notification fan-out to administrators and end users

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// Category a notification is filed under in the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationCategory {
    OrderStatus,
    VendorApproval,
}

/// Who a notification was delivered to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Audience {
    Admins,
    User {
        user_id: i64,
        vendor_id: i64,
        product_id: Option<i64>,
    },
}

/// A delivered notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub audience: Audience,
    pub title: String,
    pub message: String,
    pub category: NotificationCategory,
    pub created_at: DateTime<Utc>,
}

/// A user-facing notification request.
#[derive(Debug, Clone)]
pub struct UserNotification {
    pub user_id: i64,
    pub vendor_id: i64,
    pub product_id: Option<i64>,
    pub title: String,
    pub message: String,
    pub category: NotificationCategory,
}

/// Fan-out notifier.
///
/// Deliveries are independent side effects with no all-or-nothing guarantee;
/// the dispatcher treats a failed delivery as log-worthy, not fatal.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Notify all administrators.
    async fn notify_admins(
        &self,
        title: &str,
        message: &str,
        category: NotificationCategory,
    ) -> Result<()>;

    /// Notify a specific end user.
    async fn notify_user(&self, notification: UserNotification) -> Result<()>;
}

/// In-memory sink; the dashboard reads these back, and tests observe them.
#[derive(Clone, Default)]
pub struct InMemoryNotificationSink {
    sent: Arc<RwLock<Vec<Notification>>>,
}

impl InMemoryNotificationSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything delivered so far.
    pub fn sent(&self) -> Vec<Notification> {
        self.sent.read().map(|s| s.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl NotificationSink for InMemoryNotificationSink {
    async fn notify_admins(
        &self,
        title: &str,
        message: &str,
        category: NotificationCategory,
    ) -> Result<()> {
        let mut sent = self
            .sent
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        tracing::debug!(%title, "admin notification");

        sent.push(Notification {
            id: Uuid::new_v4(),
            audience: Audience::Admins,
            title: title.to_string(),
            message: message.to_string(),
            category,
            created_at: Utc::now(),
        });

        Ok(())
    }

    async fn notify_user(&self, notification: UserNotification) -> Result<()> {
        let mut sent = self
            .sent
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        tracing::debug!(user_id = notification.user_id, title = %notification.title, "user notification");

        sent.push(Notification {
            id: Uuid::new_v4(),
            audience: Audience::User {
                user_id: notification.user_id,
                vendor_id: notification.vendor_id,
                product_id: notification.product_id,
            },
            title: notification.title,
            message: notification.message,
            category: notification.category,
            created_at: Utc::now(),
        });

        Ok(())
    }
}
