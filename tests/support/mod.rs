//! Shared fixtures for the integration suites
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use serde_json::json;
use shipgate::config::ShippingConfig;
use shipgate::core::auth::{Principal, Role, StaticTokenAuthProvider};
use shipgate::dispatch::{Dispatcher, Repositories};
use shipgate::domain::{
    ApiKey, Customer, Order, OrderItem, OrderStatus, Payment, PaymentMode, ShippingSnapshot,
    Vendor,
};
use shipgate::notify::InMemoryNotificationSink;
use shipgate::server::AppState;
use shipgate::shipping::{
    ShipmentAssignment, ShipmentOutcome, ShipmentRequest, ShippingClient, ShippingError,
};
use shipgate::storage::{
    InMemoryCredentialStore, InMemoryCustomerStore, InMemoryOrderStore, InMemoryTrackingStore,
    InMemoryVendorStore,
};
use std::sync::{Arc, Mutex};

/// What the mock aggregator should do on the next call.
pub enum MockBehavior {
    Assign {
        shipment_id: i64,
        awb_code: String,
        courier_name: Option<String>,
    },
    Reject {
        status: u16,
        message: String,
    },
    Timeout,
    InvalidResponse,
}

/// Programmable stand-in for the shipping aggregator.
///
/// Records every call (token + payload) so tests can assert on what was —
/// or was not — sent over the wire.
pub struct MockShippingClient {
    behavior: Mutex<MockBehavior>,
    calls: Mutex<Vec<(String, ShipmentRequest)>>,
}

impl MockShippingClient {
    pub fn assigning(awb_code: &str, courier_name: Option<&str>) -> Self {
        Self {
            behavior: Mutex::new(MockBehavior::Assign {
                shipment_id: 5512,
                awb_code: awb_code.to_string(),
                courier_name: courier_name.map(String::from),
            }),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn set_behavior(&self, behavior: MockBehavior) {
        *self.behavior.lock().unwrap() = behavior;
    }

    pub fn calls(&self) -> Vec<(String, ShipmentRequest)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ShippingClient for MockShippingClient {
    async fn create_shipment(
        &self,
        token: &str,
        request: &ShipmentRequest,
    ) -> Result<ShipmentOutcome, ShippingError> {
        self.calls
            .lock()
            .unwrap()
            .push((token.to_string(), request.clone()));

        let behavior = self.behavior.lock().unwrap();
        match &*behavior {
            MockBehavior::Assign {
                shipment_id,
                awb_code,
                courier_name,
            } => {
                let raw = json!({
                    "order_id": 9981,
                    "shipment_id": shipment_id,
                    "awb_code": awb_code,
                    "courier_company_id": 24,
                    "courier_name": courier_name,
                    "status": "NEW",
                });
                Ok(ShipmentOutcome {
                    assignment: ShipmentAssignment {
                        shipment_id: *shipment_id,
                        awb_code: awb_code.clone(),
                        courier_company_id: Some(24),
                        courier_name: courier_name.clone(),
                    },
                    raw,
                })
            }
            MockBehavior::Reject { status, message } => Err(ShippingError::Rejected {
                status: *status,
                message: message.clone(),
            }),
            MockBehavior::Timeout => Err(ShippingError::Timeout),
            MockBehavior::InvalidResponse => Err(ShippingError::InvalidResponse {
                message: "response carries no awb_code".to_string(),
            }),
        }
    }
}

/// A fully wired dispatcher over in-memory stores and the mock aggregator.
pub struct World {
    pub orders: Arc<InMemoryOrderStore>,
    pub vendors: Arc<InMemoryVendorStore>,
    pub customers: Arc<InMemoryCustomerStore>,
    pub credentials: Arc<InMemoryCredentialStore>,
    pub tracking: Arc<InMemoryTrackingStore>,
    pub shipping: Arc<MockShippingClient>,
    pub notifier: Arc<InMemoryNotificationSink>,
    pub dispatcher: Arc<Dispatcher>,
}

impl World {
    pub fn new() -> Self {
        let orders = Arc::new(InMemoryOrderStore::new());
        let vendors = Arc::new(InMemoryVendorStore::new());
        let customers = Arc::new(InMemoryCustomerStore::new());
        let credentials = Arc::new(InMemoryCredentialStore::new());
        let tracking = Arc::new(InMemoryTrackingStore::new());
        let shipping = Arc::new(MockShippingClient::assigning("AWB123", Some("BlueDart")));
        let notifier = Arc::new(InMemoryNotificationSink::new());

        let repos = Repositories {
            orders: orders.clone(),
            vendors: vendors.clone(),
            customers: customers.clone(),
            credentials: credentials.clone(),
            tracking: tracking.clone(),
        };

        let dispatcher = Arc::new(Dispatcher::new(
            repos,
            shipping.clone(),
            notifier.clone(),
            ShippingConfig::default(),
        ));

        Self {
            orders,
            vendors,
            customers,
            credentials,
            tracking,
            shipping,
            notifier,
            dispatcher,
        }
    }

    /// Seed the usual cast: vendor 7 (user 70), a second vendor 8 (user 80),
    /// customer 3 (user 30), the aggregator credential, and pending order 42.
    pub async fn seed(&self) {
        use shipgate::core::repository::{
            CredentialRepository, CustomerRepository, OrderRepository, VendorRepository,
        };

        self.vendors
            .insert(Vendor {
                id: 7,
                user_id: 70,
                business_name: Some("Kranti Textiles".to_string()),
            })
            .await
            .unwrap();

        self.vendors
            .insert(Vendor {
                id: 8,
                user_id: 80,
                business_name: Some("Navjeevan Traders".to_string()),
            })
            .await
            .unwrap();

        self.customers
            .insert(Customer {
                id: 3,
                user_id: 30,
                name: "Asha Rao".to_string(),
                email: Some("asha@example.com".to_string()),
                phone: None,
            })
            .await
            .unwrap();

        self.credentials
            .insert(ApiKey::new("shiprocket", Role::Admin, "sr-live-token"))
            .await
            .unwrap();

        self.orders.insert(pending_order(42, 7, 3)).await.unwrap();
    }

    pub fn app_state(&self) -> AppState {
        let auth = StaticTokenAuthProvider::new()
            .with_token("vendor-7-token", Principal::vendor(70))
            .with_token("vendor-8-token", Principal::vendor(80))
            .with_token(
                "admin-token",
                Principal {
                    user_id: 1,
                    role: Role::Admin,
                },
            );

        AppState {
            dispatcher: self.dispatcher.clone(),
            auth: Arc::new(auth),
        }
    }
}

/// A pending COD order with two items and a stored subtotal that does not
/// equal the item sum, so pass-through vs recompute is observable.
pub fn pending_order(id: i64, vendor_id: i64, customer_id: i64) -> Order {
    let placed = Utc.with_ymd_and_hms(2025, 3, 14, 18, 45, 12).unwrap();
    Order {
        id,
        vendor_id,
        customer_id,
        status: OrderStatus::Pending,
        sub_total: 268.0,
        shipping: ShippingSnapshot {
            name: "Asha Rao".to_string(),
            address: "14 MG Road".to_string(),
            address_2: None,
            city: "Bengaluru".to_string(),
            state: "Karnataka".to_string(),
            pincode: "560001".to_string(),
            country: "India".to_string(),
            phone: None,
        },
        tracking_number: None,
        tracking_partner: None,
        items: vec![
            OrderItem {
                id: 1,
                product_id: 501,
                name: "Cotton kurta".to_string(),
                quantity: 2,
                base_price: 100.0,
                tax_amount: 18.0,
                commission_amt: 10.0,
                commission_pct: 5.0,
            },
            OrderItem {
                id: 2,
                product_id: 502,
                name: "Dupatta".to_string(),
                quantity: 1,
                base_price: 50.0,
                tax_amount: 9.0,
                commission_amt: 2.5,
                commission_pct: 5.0,
            },
        ],
        payment: Some(Payment {
            id: 1,
            mode: Some(PaymentMode::Cod),
            amount: 268.0,
        }),
        created_at: placed,
        updated_at: placed,
    }
}
