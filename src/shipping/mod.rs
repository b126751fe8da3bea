//! Shipping aggregator integration: payload construction and HTTP client

pub mod client;
pub mod payload;

pub use client::{
    DEFAULT_COURIER_NAME, ShipmentAssignment, ShipmentOutcome, ShippingClient, ShippingError,
    ShiprocketClient,
};
pub use payload::{ShipmentItem, ShipmentRequest, build_shipment_request};
