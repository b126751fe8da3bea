//! Typed error handling for the dispatch service
//!
//! Callers branch on error kind (and on the machine-readable `code` in the
//! HTTP body) rather than parsing messages.
//!
//! # Example
//!
//! ```rust,ignore
//! match dispatcher.dispatch(&actor, order_id).await {
//!     Ok(receipt) => println!("shipped: {:?}", receipt.order.tracking_number),
//!     Err(DispatchError::AlreadyDispatched { status, .. }) => {
//!         println!("order already left PENDING (now {})", status);
//!     }
//!     Err(e) => eprintln!("dispatch failed: {}", e),
//! }
//! ```

use crate::domain::order::OrderStatus;
use crate::shipping::ShippingError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

/// The main error type for the fulfillment dispatch flow
#[derive(Debug)]
pub enum DispatchError {
    /// The request itself is malformed (missing or invalid order id)
    InvalidRequest { message: String },

    /// Missing or unknown bearer token, or a non-vendor actor
    Unauthorized { message: String },

    /// The authenticated user has no vendor record
    VendorNotFound { user_id: i64 },

    /// Order missing — also returned for orders owned by another vendor, so
    /// the response never reveals whether a foreign order id exists
    OrderNotFound { order_id: i64 },

    /// The order has already left `PENDING`; the aggregator is not re-invoked
    AlreadyDispatched { order_id: i64, status: OrderStatus },

    /// No usable aggregator credential is configured (operational error)
    CredentialMissing { name: String },

    /// The shipping aggregator rejected or failed the shipment call
    Aggregator(ShippingError),

    /// Storage-layer failure; detail is logged, not returned to the caller
    Repository { detail: String },

    /// Catch-all for unexpected failures; detail is logged, not returned
    Internal { detail: String },
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::InvalidRequest { message } => {
                write!(f, "Invalid request: {}", message)
            }
            DispatchError::Unauthorized { message } => {
                write!(f, "Unauthorized: {}", message)
            }
            DispatchError::VendorNotFound { user_id } => {
                write!(f, "No vendor profile for user '{}'", user_id)
            }
            DispatchError::OrderNotFound { order_id } => {
                write!(f, "Order '{}' not found", order_id)
            }
            DispatchError::AlreadyDispatched { order_id, status } => {
                write!(
                    f,
                    "Order '{}' cannot be dispatched from status {}",
                    order_id, status
                )
            }
            DispatchError::CredentialMissing { name } => {
                write!(f, "Shipping credential '{}' is not configured", name)
            }
            DispatchError::Aggregator(e) => write!(f, "{}", e),
            // Storage and internal details stay in the logs
            DispatchError::Repository { .. } => write!(f, "Storage error"),
            DispatchError::Internal { .. } => write!(f, "Internal error"),
        }
    }
}

impl std::error::Error for DispatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DispatchError::Aggregator(e) => Some(e),
            _ => None,
        }
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl DispatchError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            DispatchError::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
            DispatchError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            DispatchError::VendorNotFound { .. } => StatusCode::NOT_FOUND,
            DispatchError::OrderNotFound { .. } => StatusCode::NOT_FOUND,
            DispatchError::AlreadyDispatched { .. } => StatusCode::CONFLICT,
            DispatchError::CredentialMissing { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            DispatchError::Aggregator(_) => StatusCode::INTERNAL_SERVER_ERROR,
            DispatchError::Repository { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            DispatchError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            DispatchError::InvalidRequest { .. } => "INVALID_REQUEST",
            DispatchError::Unauthorized { .. } => "UNAUTHORIZED",
            DispatchError::VendorNotFound { .. } => "VENDOR_NOT_FOUND",
            DispatchError::OrderNotFound { .. } => "ORDER_NOT_FOUND",
            DispatchError::AlreadyDispatched { .. } => "ALREADY_DISPATCHED",
            DispatchError::CredentialMissing { .. } => "CREDENTIAL_MISSING",
            DispatchError::Aggregator(_) => "AGGREGATOR_FAILURE",
            DispatchError::Repository { .. } => "STORAGE_ERROR",
            DispatchError::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    /// Get additional details for the error
    fn details(&self) -> Option<serde_json::Value> {
        match self {
            DispatchError::OrderNotFound { order_id } => {
                Some(serde_json::json!({ "order_id": order_id }))
            }
            DispatchError::AlreadyDispatched { order_id, status } => Some(serde_json::json!({
                "order_id": order_id,
                "status": status,
            })),
            DispatchError::Aggregator(e) => Some(serde_json::json!({
                "retryable": e.is_retryable(),
            })),
            _ => None,
        }
    }
}

impl IntoResponse for DispatchError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

impl From<ShippingError> for DispatchError {
    fn from(err: ShippingError) -> Self {
        DispatchError::Aggregator(err)
    }
}

impl From<anyhow::Error> for DispatchError {
    fn from(err: anyhow::Error) -> Self {
        DispatchError::Repository {
            detail: format!("{:#}", err),
        }
    }
}

/// A specialized Result type for dispatch operations
pub type DispatchResult<T> = Result<T, DispatchError>;
