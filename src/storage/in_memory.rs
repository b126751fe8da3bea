//! In-memory implementations of the repository traits
//!
//! Used for development and tests. Each store uses RwLock for thread-safe
//! access; the conditional shipment update runs entirely under the write
//! lock, so concurrent dispatches of the same order cannot both transition it.

use crate::core::auth::Role;
use crate::core::repository::{
    CredentialRepository, CustomerRepository, OrderRepository, TrackingRepository,
    VendorRepository,
};
use crate::domain::{ApiKey, Customer, Order, OrderStatus, TrackingEntry, Vendor};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// In-memory order store.
#[derive(Clone, Default)]
pub struct InMemoryOrderStore {
    orders: Arc<RwLock<HashMap<i64, Order>>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderStore {
    async fn insert(&self, order: Order) -> Result<()> {
        let mut orders = self
            .orders
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        orders.insert(order.id, order);

        Ok(())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Order>> {
        let orders = self
            .orders
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(orders.get(&id).cloned())
    }

    async fn record_shipment(
        &self,
        id: i64,
        tracking_number: &str,
        tracking_partner: &str,
    ) -> Result<Option<Order>> {
        let mut orders = self
            .orders
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let Some(order) = orders.get_mut(&id) else {
            return Ok(None);
        };

        // Conditional transition: only PENDING orders may become SHIPPED.
        if order.status != OrderStatus::Pending {
            return Ok(None);
        }

        order.status = OrderStatus::Shipped;
        order.tracking_number = Some(tracking_number.to_string());
        order.tracking_partner = Some(tracking_partner.to_string());
        order.updated_at = Utc::now();

        Ok(Some(order.clone()))
    }
}

/// In-memory vendor store.
#[derive(Clone, Default)]
pub struct InMemoryVendorStore {
    vendors: Arc<RwLock<HashMap<i64, Vendor>>>,
}

impl InMemoryVendorStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VendorRepository for InMemoryVendorStore {
    async fn insert(&self, vendor: Vendor) -> Result<()> {
        let mut vendors = self
            .vendors
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        vendors.insert(vendor.id, vendor);

        Ok(())
    }

    async fn find_by_user_id(&self, user_id: i64) -> Result<Option<Vendor>> {
        let vendors = self
            .vendors
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(vendors.values().find(|v| v.user_id == user_id).cloned())
    }
}

/// In-memory customer store.
#[derive(Clone, Default)]
pub struct InMemoryCustomerStore {
    customers: Arc<RwLock<HashMap<i64, Customer>>>,
}

impl InMemoryCustomerStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerStore {
    async fn insert(&self, customer: Customer) -> Result<()> {
        let mut customers = self
            .customers
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        customers.insert(customer.id, customer);

        Ok(())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Customer>> {
        let customers = self
            .customers
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(customers.get(&id).cloned())
    }
}

/// In-memory credential store.
#[derive(Clone, Default)]
pub struct InMemoryCredentialStore {
    keys: Arc<RwLock<Vec<ApiKey>>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialRepository for InMemoryCredentialStore {
    async fn insert(&self, key: ApiKey) -> Result<()> {
        let mut keys = self
            .keys
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        keys.push(key);

        Ok(())
    }

    async fn latest_by_name_and_role(&self, name: &str, role: Role) -> Result<Option<ApiKey>> {
        let keys = self
            .keys
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(keys
            .iter()
            .filter(|k| k.name == name && k.role == role)
            .max_by_key(|k| k.created_at)
            .cloned())
    }
}

/// In-memory append-only tracking log.
#[derive(Clone, Default)]
pub struct InMemoryTrackingStore {
    entries: Arc<RwLock<Vec<TrackingEntry>>>,
}

impl InMemoryTrackingStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TrackingRepository for InMemoryTrackingStore {
    async fn append(&self, entry: TrackingEntry) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        entries.push(entry);

        Ok(())
    }

    async fn list_for_order(&self, order_id: i64) -> Result<Vec<TrackingEntry>> {
        let entries = self
            .entries
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(entries
            .iter()
            .filter(|e| e.order_id == order_id)
            .cloned()
            .collect())
    }
}
