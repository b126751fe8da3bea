//! Order aggregate: items, payment and the checkout-time shipping snapshot
//!
//! Orders are created by the checkout flow and are read-only inputs here,
//! except for `status`, `tracking_number` and `tracking_partner`, which the
//! fulfillment dispatcher is the sole mutator of.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Order lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Shipped,
    Delivered,
    Returned,
    Cancelled,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Shipped => "SHIPPED",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Returned => "RETURNED",
            OrderStatus::Cancelled => "CANCELLED",
        };
        write!(f, "{}", s)
    }
}

/// Payment mode recorded by the checkout flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMode {
    Cod,
    Card,
    Upi,
    NetBanking,
    Wallet,
}

/// Payment attached to an order (at most one).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: i64,
    /// `None` when the payment row predates mode tracking; treated as prepaid.
    pub mode: Option<PaymentMode>,
    pub amount: f64,
}

/// Immutable copy of the customer's address captured at order-placement time.
///
/// Billing/shipping fields sent to the aggregator come from this snapshot,
/// never from the live customer record, so later address edits do not
/// retroactively change historical orders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingSnapshot {
    pub name: String,
    pub address: String,
    pub address_2: Option<String>,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub country: String,
    pub phone: Option<String>,
}

/// Line item with financial fields snapshotted at purchase time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: i64,
    pub product_id: i64,
    pub name: String,
    pub quantity: u32,
    pub base_price: f64,
    pub tax_amount: f64,
    pub commission_amt: f64,
    pub commission_pct: f64,
}

/// Order aggregate as loaded for dispatch (items and payment eager-loaded).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub vendor_id: i64,
    pub customer_id: i64,
    pub status: OrderStatus,
    /// Stored order-level subtotal, passed through to the aggregator verbatim.
    pub sub_total: f64,
    pub shipping: ShippingSnapshot,
    /// Carrier tracking code, populated only after a successful dispatch.
    pub tracking_number: Option<String>,
    /// Carrier display name, populated only after a successful dispatch.
    pub tracking_partner: Option<String>,
    pub items: Vec<OrderItem>,
    pub payment: Option<Payment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Whether the order is in a state the dispatcher may hand off.
    ///
    /// Only `PENDING` orders can be dispatched; anything else has either
    /// already shipped or left the fulfillment path.
    pub fn is_dispatchable(&self) -> bool {
        self.status == OrderStatus::Pending
    }
}
