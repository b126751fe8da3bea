//! Shipment-creation payload construction
//!
//! Pure mapping from the order aggregate to the aggregator's wire format.
//! No side effects here; everything the payload needs is passed in.

use crate::config::ShippingConfig;
use crate::domain::{Customer, Order, Payment, PaymentMode, Vendor};
use serde::{Deserialize, Serialize};

/// Prefix namespacing our order ids inside the aggregator's id space.
///
/// `"APP-<id>"` cannot collide with the aggregator's own ids and marks the
/// order as originating from the app channel.
pub const ORDER_REF_PREFIX: &str = "APP";

/// Synthetic SKU prefix; the catalog has no per-variant SKUs of its own.
pub const SKU_PREFIX: &str = "SKU";

/// Placeholder used when no phone number is on file anywhere.
///
/// Known weak spot: this fabricates contact data, but the aggregator rejects
/// shipments without a billing phone.
pub const FALLBACK_PHONE: &str = "9999999999";

/// One line of the shipment payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentItem {
    pub name: String,
    pub sku: String,
    pub units: u32,
    pub selling_price: f64,
    pub tax: f64,
}

/// Body of the aggregator's adhoc shipment-creation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentRequest {
    pub order_id: String,
    /// Calendar day only; the aggregator does not accept a time component.
    pub order_date: String,
    pub pickup_location: String,
    pub billing_customer_name: String,
    pub billing_last_name: String,
    pub billing_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_address_2: Option<String>,
    pub billing_city: String,
    pub billing_pincode: String,
    pub billing_state: String,
    pub billing_country: String,
    pub billing_email: String,
    pub billing_phone: String,
    pub shipping_is_billing: bool,
    pub order_items: Vec<ShipmentItem>,
    pub payment_method: String,
    pub sub_total: f64,
    pub length: f64,
    pub breadth: f64,
    pub height: f64,
    pub weight: f64,
}

/// Map a payment record to the aggregator's binary payment taxonomy.
///
/// Only cash-on-delivery is distinguished; every other mode, including a
/// missing one, counts as prepaid.
pub fn payment_method(payment: Option<&Payment>) -> &'static str {
    match payment.and_then(|p| p.mode) {
        Some(PaymentMode::Cod) => "COD",
        _ => "Prepaid",
    }
}

/// Build the shipment-creation payload for an order.
///
/// Address fields come from the order's shipping snapshot — the address the
/// customer approved at checkout — never from the live customer record.
/// Contact fields prefer the snapshot, then the customer, then fixed
/// fallbacks.
pub fn build_shipment_request(
    order: &Order,
    customer: &Customer,
    vendor: &Vendor,
    config: &ShippingConfig,
) -> ShipmentRequest {
    let snapshot = &order.shipping;

    let pickup_location = vendor
        .business_name
        .clone()
        .unwrap_or_else(|| config.pickup_fallback.clone());

    let billing_phone = snapshot
        .phone
        .clone()
        .or_else(|| customer.phone.clone())
        .unwrap_or_else(|| FALLBACK_PHONE.to_string());

    let order_items = order
        .items
        .iter()
        .map(|item| ShipmentItem {
            name: item.name.clone(),
            sku: format!("{}-{}", SKU_PREFIX, item.product_id),
            units: item.quantity,
            selling_price: item.base_price,
            tax: item.tax_amount,
        })
        .collect();

    ShipmentRequest {
        order_id: format!("{}-{}", ORDER_REF_PREFIX, order.id),
        order_date: order.created_at.format("%Y-%m-%d").to_string(),
        pickup_location,
        billing_customer_name: snapshot.name.clone(),
        billing_last_name: String::new(),
        billing_address: snapshot.address.clone(),
        billing_address_2: snapshot.address_2.clone(),
        billing_city: snapshot.city.clone(),
        billing_pincode: snapshot.pincode.clone(),
        billing_state: snapshot.state.clone(),
        billing_country: snapshot.country.clone(),
        billing_email: customer.email.clone().unwrap_or_default(),
        billing_phone,
        shipping_is_billing: true,
        order_items,
        payment_method: payment_method(order.payment.as_ref()).to_string(),
        sub_total: order.sub_total,
        length: config.package.length,
        breadth: config.package.breadth,
        height: config.package.height,
        weight: config.package.weight,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{OrderItem, OrderStatus, ShippingSnapshot};
    use chrono::{TimeZone, Utc};

    fn snapshot() -> ShippingSnapshot {
        ShippingSnapshot {
            name: "Asha Rao".to_string(),
            address: "14 MG Road".to_string(),
            address_2: None,
            city: "Bengaluru".to_string(),
            state: "Karnataka".to_string(),
            pincode: "560001".to_string(),
            country: "India".to_string(),
            phone: None,
        }
    }

    fn customer() -> Customer {
        Customer {
            id: 3,
            user_id: 30,
            name: "Asha Rao".to_string(),
            email: Some("asha@example.com".to_string()),
            phone: None,
        }
    }

    fn vendor() -> Vendor {
        Vendor {
            id: 7,
            user_id: 70,
            business_name: Some("Kranti Textiles".to_string()),
        }
    }

    fn order(payment: Option<Payment>) -> Order {
        let placed = Utc.with_ymd_and_hms(2025, 3, 14, 18, 45, 12).unwrap();
        Order {
            id: 42,
            vendor_id: 7,
            customer_id: 3,
            status: OrderStatus::Pending,
            sub_total: 268.0,
            shipping: snapshot(),
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
            payment,
            created_at: placed,
            updated_at: placed,
        }
    }

    fn cod_payment() -> Payment {
        Payment {
            id: 1,
            mode: Some(PaymentMode::Cod),
            amount: 268.0,
        }
    }

    #[test]
    fn test_order_reference_is_namespaced() {
        let request =
            build_shipment_request(&order(None), &customer(), &vendor(), &Default::default());
        assert_eq!(request.order_id, "APP-42");
    }

    #[test]
    fn test_order_date_truncated_to_day() {
        let request =
            build_shipment_request(&order(None), &customer(), &vendor(), &Default::default());
        assert_eq!(request.order_date, "2025-03-14");
    }

    #[test]
    fn test_pickup_location_uses_business_name() {
        let request =
            build_shipment_request(&order(None), &customer(), &vendor(), &Default::default());
        assert_eq!(request.pickup_location, "Kranti Textiles");
    }

    #[test]
    fn test_pickup_location_falls_back() {
        let vendor = Vendor {
            id: 7,
            user_id: 70,
            business_name: None,
        };
        let request =
            build_shipment_request(&order(None), &customer(), &vendor, &Default::default());
        assert_eq!(request.pickup_location, "Primary");
    }

    #[test]
    fn test_billing_fields_come_from_snapshot() {
        let request =
            build_shipment_request(&order(None), &customer(), &vendor(), &Default::default());
        assert_eq!(request.billing_customer_name, "Asha Rao");
        assert_eq!(request.billing_address, "14 MG Road");
        assert_eq!(request.billing_city, "Bengaluru");
        assert_eq!(request.billing_pincode, "560001");
        assert!(request.shipping_is_billing);
    }

    #[test]
    fn test_missing_phone_uses_placeholder() {
        let request =
            build_shipment_request(&order(None), &customer(), &vendor(), &Default::default());
        assert_eq!(request.billing_phone, "9999999999");
    }

    #[test]
    fn test_snapshot_phone_preferred_over_customer() {
        let mut order = order(None);
        order.shipping.phone = Some("9811100000".to_string());
        let mut customer = customer();
        customer.phone = Some("9822200000".to_string());

        let request = build_shipment_request(&order, &customer, &vendor(), &Default::default());
        assert_eq!(request.billing_phone, "9811100000");
    }

    #[test]
    fn test_customer_phone_used_when_snapshot_empty() {
        let mut customer = customer();
        customer.phone = Some("9822200000".to_string());

        let request = build_shipment_request(&order(None), &customer, &vendor(), &Default::default());
        assert_eq!(request.billing_phone, "9822200000");
    }

    #[test]
    fn test_items_map_sku_units_price_tax() {
        let request =
            build_shipment_request(&order(None), &customer(), &vendor(), &Default::default());
        assert_eq!(request.order_items.len(), 2);

        let first = &request.order_items[0];
        assert_eq!(first.sku, "SKU-501");
        assert_eq!(first.units, 2);
        assert_eq!(first.selling_price, 100.0);
        assert_eq!(first.tax, 18.0);

        assert_eq!(request.order_items[1].sku, "SKU-502");
    }

    #[test]
    fn test_sub_total_passed_through_verbatim() {
        // Stored value, not recomputed from items (2*100 + 50 = 250 != 268)
        let request =
            build_shipment_request(&order(None), &customer(), &vendor(), &Default::default());
        assert_eq!(request.sub_total, 268.0);
    }

    #[test]
    fn test_payment_method_cod() {
        assert_eq!(payment_method(Some(&cod_payment())), "COD");
    }

    #[test]
    fn test_payment_method_prepaid_for_other_modes() {
        let card = Payment {
            id: 1,
            mode: Some(PaymentMode::Card),
            amount: 268.0,
        };
        assert_eq!(payment_method(Some(&card)), "Prepaid");
    }

    #[test]
    fn test_payment_method_prepaid_for_missing_mode() {
        let unknown = Payment {
            id: 1,
            mode: None,
            amount: 268.0,
        };
        assert_eq!(payment_method(Some(&unknown)), "Prepaid");
        assert_eq!(payment_method(None), "Prepaid");
    }

    #[test]
    fn test_package_profile_from_config() {
        let mut config = ShippingConfig::default();
        config.package.length = 25.0;
        config.package.weight = 1.25;

        let request = build_shipment_request(&order(None), &customer(), &vendor(), &config);
        assert_eq!(request.length, 25.0);
        assert_eq!(request.weight, 1.25);
        assert_eq!(request.breadth, 10.0);
    }

    #[test]
    fn test_request_serializes_without_null_address_2() {
        let request =
            build_shipment_request(&order(Some(cod_payment())), &customer(), &vendor(), &Default::default());
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("billing_address_2").is_none());
        assert_eq!(json["payment_method"], "COD");
    }
}
