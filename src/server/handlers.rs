//! HTTP handlers for the fulfillment surface

use crate::core::auth::AuthProvider;
use crate::core::error::DispatchError;
use crate::dispatch::Dispatcher;
use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
    pub auth: Arc<dyn AuthProvider>,
}

/// Body of `POST /vendor/approve-order`.
#[derive(Debug, Default, Deserialize)]
pub struct ApproveOrderRequest {
    #[serde(rename = "orderId")]
    pub order_id: Option<i64>,
}

/// Approve an order and hand it to the shipping aggregator.
///
/// The body is parsed by hand so that a missing or malformed body surfaces
/// as our own 400, not as the framework's rejection format.
pub async fn approve_order(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, DispatchError> {
    let principal = state.auth.authenticate(&headers).await?;

    let request: ApproveOrderRequest = serde_json::from_slice(&body).unwrap_or_default();
    let order_id = request
        .order_id
        .ok_or_else(|| DispatchError::InvalidRequest {
            message: "orderId is required".to_string(),
        })?;

    let receipt = state.dispatcher.dispatch(&principal, order_id).await?;

    Ok(Json(json!({
        "message": "Order approved and dispatched for shipment",
        "shiprocket": receipt.aggregator,
        "order": receipt.order,
    })))
}

/// Liveness probe.
pub async fn healthz() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
