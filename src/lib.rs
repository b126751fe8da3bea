//! # Shipgate
//!
//! Order fulfillment dispatch service for a multi-vendor marketplace.
//!
//! ## What it does
//!
//! - **Vendor-scoped dispatch**: a vendor approves one of their orders and
//!   the service hands it to a shipping aggregator for carrier assignment
//! - **Ownership enforcement**: foreign orders are indistinguishable from
//!   missing ones in every response
//! - **Single-transition guard**: only `PENDING` orders dispatch; duplicates
//!   get a conflict instead of a second aggregator call
//! - **Credential rotation**: the newest stored aggregator key wins
//! - **Typed errors**: callers branch on error kind, not message strings
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use shipgate::prelude::*;
//!
//! let repos = Repositories {
//!     orders: Arc::new(InMemoryOrderStore::new()),
//!     vendors: Arc::new(InMemoryVendorStore::new()),
//!     customers: Arc::new(InMemoryCustomerStore::new()),
//!     credentials: Arc::new(InMemoryCredentialStore::new()),
//!     tracking: Arc::new(InMemoryTrackingStore::new()),
//! };
//!
//! let config = ServiceConfig::default();
//! let shipping = Arc::new(ShiprocketClient::new(&config.shipping)?);
//! let notifier = Arc::new(InMemoryNotificationSink::new());
//! let dispatcher = Arc::new(Dispatcher::new(repos, shipping, notifier, config.shipping.clone()));
//!
//! let state = AppState {
//!     dispatcher,
//!     auth: Arc::new(StaticTokenAuthProvider::new()),
//! };
//! shipgate::server::serve(state, &config.listen_addr).await?;
//! ```

pub mod config;
pub mod core;
pub mod dispatch;
pub mod domain;
pub mod notify;
pub mod server;
pub mod shipping;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        auth::{AuthProvider, Principal, Role, StaticTokenAuthProvider},
        error::{DispatchError, DispatchResult, ErrorResponse},
        repository::{
            CredentialRepository, CustomerRepository, OrderRepository, TrackingRepository,
            VendorRepository,
        },
    };

    // === Domain ===
    pub use crate::domain::{
        ApiKey, Customer, Order, OrderItem, OrderStatus, Payment, PaymentMode, ShippingSnapshot,
        TrackingEntry, Vendor,
    };

    // === Dispatch ===
    pub use crate::dispatch::{DispatchReceipt, Dispatcher, Repositories};

    // === Shipping ===
    pub use crate::shipping::{
        ShipmentAssignment, ShipmentOutcome, ShipmentRequest, ShippingClient, ShippingError,
        ShiprocketClient, build_shipment_request,
    };

    // === Notifications ===
    pub use crate::notify::{
        InMemoryNotificationSink, Notification, NotificationCategory, NotificationSink,
        UserNotification,
    };

    // === Storage ===
    pub use crate::storage::{
        InMemoryCredentialStore, InMemoryCustomerStore, InMemoryOrderStore, InMemoryTrackingStore,
        InMemoryVendorStore,
    };

    // === Config ===
    pub use crate::config::{PackageProfile, ServiceConfig, ShippingConfig};

    // === Server ===
    pub use crate::server::{AppState, build_router};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use std::sync::Arc;
    pub use uuid::Uuid;
}
