//! Vendor and customer records as seen by the fulfillment flow

use serde::{Deserialize, Serialize};

/// Marketplace vendor. `user_id` links the vendor to the authenticated actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vendor {
    pub id: i64,
    pub user_id: i64,
    /// Used as the shipment's pickup-location label when present.
    pub business_name: Option<String>,
}

/// End customer who placed the order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}
