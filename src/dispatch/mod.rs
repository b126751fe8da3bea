//! Order fulfillment dispatcher
//!
//! Composes the order/vendor/customer/credential stores, the shipping
//! aggregator client and the notification sink into a single synchronous
//! dispatch operation: validate, hand the order to the aggregator, record
//! the carrier assignment, notify.

use crate::config::ShippingConfig;
use crate::core::auth::{Principal, Role};
use crate::core::error::{DispatchError, DispatchResult};
use crate::core::repository::{
    CredentialRepository, CustomerRepository, OrderRepository, TrackingRepository,
    VendorRepository,
};
use crate::domain::{Order, OrderStatus, TrackingEntry};
use crate::notify::{NotificationCategory, NotificationSink, UserNotification};
use crate::shipping::{ShippingClient, build_shipment_request};
use serde_json::Value;
use std::sync::Arc;

/// Name of the stored aggregator credential.
const SHIPPING_CREDENTIAL: &str = "shiprocket";

/// Aggregated repository handles, wired once at bootstrap.
#[derive(Clone)]
pub struct Repositories {
    pub orders: Arc<dyn OrderRepository>,
    pub vendors: Arc<dyn VendorRepository>,
    pub customers: Arc<dyn CustomerRepository>,
    pub credentials: Arc<dyn CredentialRepository>,
    pub tracking: Arc<dyn TrackingRepository>,
}

/// Result of a successful dispatch: the updated order projection plus the
/// aggregator's raw response, both returned to the API caller.
#[derive(Debug, Clone)]
pub struct DispatchReceipt {
    pub order: Order,
    pub aggregator: Value,
}

/// The order fulfillment dispatcher.
pub struct Dispatcher {
    repos: Repositories,
    shipping: Arc<dyn ShippingClient>,
    notifier: Arc<dyn NotificationSink>,
    shipping_config: ShippingConfig,
}

impl Dispatcher {
    pub fn new(
        repos: Repositories,
        shipping: Arc<dyn ShippingClient>,
        notifier: Arc<dyn NotificationSink>,
        shipping_config: ShippingConfig,
    ) -> Self {
        Self {
            repos,
            shipping,
            notifier,
            shipping_config,
        }
    }

    /// Dispatch an order to the shipping aggregator on behalf of a vendor.
    ///
    /// Validation order matters: every check before the aggregator call is
    /// local, so no network traffic happens for a request that was never
    /// going to succeed. The aggregator call itself is a single attempt with
    /// no retry and no idempotency key; its failure surfaces directly.
    pub async fn dispatch(
        &self,
        actor: &Principal,
        order_id: i64,
    ) -> DispatchResult<DispatchReceipt> {
        if order_id <= 0 {
            return Err(DispatchError::InvalidRequest {
                message: "orderId must be a positive integer".to_string(),
            });
        }

        if !actor.is_vendor() {
            return Err(DispatchError::Unauthorized {
                message: "vendor role required".to_string(),
            });
        }

        let vendor = self
            .repos
            .vendors
            .find_by_user_id(actor.user_id)
            .await?
            .ok_or(DispatchError::VendorNotFound {
                user_id: actor.user_id,
            })?;

        let order = self
            .repos
            .orders
            .find_by_id(order_id)
            .await?
            .ok_or(DispatchError::OrderNotFound { order_id })?;

        if order.vendor_id != vendor.id {
            // Same response as a missing order: foreign order ids must not
            // be distinguishable from nonexistent ones.
            tracing::debug!(
                order_id,
                vendor_id = vendor.id,
                owner_id = order.vendor_id,
                "ownership check failed"
            );
            return Err(DispatchError::OrderNotFound { order_id });
        }

        if !order.is_dispatchable() {
            return Err(DispatchError::AlreadyDispatched {
                order_id,
                status: order.status,
            });
        }

        let credential = self
            .repos
            .credentials
            .latest_by_name_and_role(SHIPPING_CREDENTIAL, Role::Admin)
            .await?
            .ok_or_else(|| DispatchError::CredentialMissing {
                name: SHIPPING_CREDENTIAL.to_string(),
            })?;

        let customer = self
            .repos
            .customers
            .find_by_id(order.customer_id)
            .await?
            .ok_or_else(|| DispatchError::Internal {
                detail: format!(
                    "order {} references missing customer {}",
                    order.id, order.customer_id
                ),
            })?;

        let request = build_shipment_request(&order, &customer, &vendor, &self.shipping_config);

        let outcome = self
            .shipping
            .create_shipment(&credential.token, &request)
            .await?;
        let assignment = &outcome.assignment;
        let courier = assignment.courier_label().to_string();

        tracing::info!(
            order_id,
            shipment_id = assignment.shipment_id,
            awb = %assignment.awb_code,
            %courier,
            "aggregator accepted shipment"
        );

        let updated = self
            .repos
            .orders
            .record_shipment(order_id, &assignment.awb_code, &courier)
            .await?;

        let Some(updated) = updated else {
            // A concurrent dispatch won the PENDING -> SHIPPED transition
            // after our aggregator call: the shipment we just created has no
            // local record. Known inconsistency window; reconciliation is a
            // separate concern.
            tracing::error!(
                order_id,
                shipment_id = assignment.shipment_id,
                awb = %assignment.awb_code,
                "order left PENDING during dispatch; aggregator shipment is unreconciled"
            );
            let status = self
                .repos
                .orders
                .find_by_id(order_id)
                .await
                .ok()
                .flatten()
                .map(|o| o.status)
                .unwrap_or(OrderStatus::Shipped);
            return Err(DispatchError::AlreadyDispatched { order_id, status });
        };

        self.repos
            .tracking
            .append(TrackingEntry::new(
                order_id,
                OrderStatus::Shipped,
                format!("Shipped via {} (AWB {})", courier, assignment.awb_code),
            ))
            .await?;

        self.send_notifications(&updated, &courier, &assignment.awb_code, customer.user_id)
            .await;

        Ok(DispatchReceipt {
            order: updated,
            aggregator: outcome.raw,
        })
    }

    /// Fire the post-shipment notifications.
    ///
    /// The order has already shipped at this point, so a failed delivery is
    /// logged and swallowed; the caller still needs the tracking assignment.
    async fn send_notifications(
        &self,
        order: &Order,
        courier: &str,
        awb_code: &str,
        customer_user_id: i64,
    ) {
        let admin_message = format!(
            "Order #{} shipped via {} (AWB {})",
            order.id, courier, awb_code
        );
        if let Err(err) = self
            .notifier
            .notify_admins("Order shipped", &admin_message, NotificationCategory::OrderStatus)
            .await
        {
            tracing::warn!(order_id = order.id, error = %err, "admin notification failed");
        }

        let user_notification = UserNotification {
            user_id: customer_user_id,
            vendor_id: order.vendor_id,
            product_id: order.items.first().map(|i| i.product_id),
            title: "Order shipped".to_string(),
            message: format!(
                "Your order #{} is on its way via {} (AWB {})",
                order.id, courier, awb_code
            ),
            category: NotificationCategory::OrderStatus,
        };
        if let Err(err) = self.notifier.notify_user(user_notification).await {
            tracing::warn!(order_id = order.id, error = %err, "customer notification failed");
        }
    }
}
