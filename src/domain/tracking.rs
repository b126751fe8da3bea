//! Append-only order tracking log

use crate::domain::order::OrderStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One entry in an order's tracking history.
///
/// Entries are created once per status transition and never mutated or
/// deleted; the log is the audit trail of the order's fulfillment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingEntry {
    pub id: Uuid,
    pub order_id: i64,
    pub status: OrderStatus,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl TrackingEntry {
    pub fn new(order_id: i64, status: OrderStatus, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            order_id,
            status,
            message: message.into(),
            created_at: Utc::now(),
        }
    }
}
