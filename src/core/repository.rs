//! Repository traits for the collaborators the dispatcher composes
//!
//! Implementations provide storage for a specific entity family. The
//! dispatcher is agnostic to the underlying storage mechanism; the in-memory
//! implementations live in [`crate::storage`].

use crate::core::auth::Role;
use crate::domain::{ApiKey, Customer, Order, TrackingEntry, Vendor};
use anyhow::Result;
use async_trait::async_trait;

/// Storage for order aggregates.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Insert a new order (checkout-flow surface, also used for seeding).
    async fn insert(&self, order: Order) -> Result<()>;

    /// Look up an order by id with items and payment loaded.
    async fn find_by_id(&self, id: i64) -> Result<Option<Order>>;

    /// Record a successful shipment hand-off, conditionally.
    ///
    /// Atomically transitions the order `PENDING -> SHIPPED` and sets the
    /// tracking fields. Returns the updated order, or `None` when the order
    /// is missing or no longer `PENDING` — the caller treats that as a lost
    /// dispatch race, not as success.
    async fn record_shipment(
        &self,
        id: i64,
        tracking_number: &str,
        tracking_partner: &str,
    ) -> Result<Option<Order>>;
}

/// Storage for vendor records.
#[async_trait]
pub trait VendorRepository: Send + Sync {
    async fn insert(&self, vendor: Vendor) -> Result<()>;

    /// Resolve the vendor owned by an authenticated user.
    async fn find_by_user_id(&self, user_id: i64) -> Result<Option<Vendor>>;
}

/// Storage for customer records.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn insert(&self, customer: Customer) -> Result<()>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Customer>>;
}

/// Storage for named, role-scoped API credentials.
#[async_trait]
pub trait CredentialRepository: Send + Sync {
    async fn insert(&self, key: ApiKey) -> Result<()>;

    /// The current credential for a name+role pair: most recent `created_at`
    /// wins. Rotation is implicit via insertion of a newer row.
    async fn latest_by_name_and_role(&self, name: &str, role: Role) -> Result<Option<ApiKey>>;
}

/// Append-only storage for order tracking history.
#[async_trait]
pub trait TrackingRepository: Send + Sync {
    async fn append(&self, entry: TrackingEntry) -> Result<()>;

    async fn list_for_order(&self, order_id: i64) -> Result<Vec<TrackingEntry>>;
}
