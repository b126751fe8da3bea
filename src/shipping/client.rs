//! HTTP client for the shipping aggregator
//!
//! Single attempt, explicit timeout, no retry and no idempotency key: a
//! failure here surfaces directly to the dispatcher. The response body is
//! validated against the fields we consume before anything touches it.

use crate::config::ShippingConfig;
use crate::shipping::payload::ShipmentRequest;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Display name used when the aggregator omits the courier assignment name.
pub const DEFAULT_COURIER_NAME: &str = "Shiprocket";

const CREATE_SHIPMENT_PATH: &str = "/v1/external/orders/create/adhoc";

/// Errors from the shipping aggregator call.
#[derive(Debug, Error)]
pub enum ShippingError {
    /// The call exceeded the configured deadline.
    #[error("Shipping aggregator timed out")]
    Timeout,

    /// The aggregator could not be reached at all.
    #[error("Shipping aggregator unreachable: {message}")]
    Transport { message: String },

    /// The aggregator answered with a non-success status.
    #[error("Shipping aggregator rejected the shipment: {message}")]
    Rejected { status: u16, message: String },

    /// The aggregator answered 2xx but the body is not usable.
    #[error("Shipping aggregator returned an unusable response: {message}")]
    InvalidResponse { message: String },
}

impl ShippingError {
    /// Whether a caller could reasonably retry the same call.
    ///
    /// Timeouts and transport failures are transient; aggregator 5xx answers
    /// usually are too. A 4xx rejection or a malformed body will not get
    /// better by retrying.
    pub fn is_retryable(&self) -> bool {
        match self {
            ShippingError::Timeout => true,
            ShippingError::Transport { .. } => true,
            ShippingError::Rejected { status, .. } => *status >= 500,
            ShippingError::InvalidResponse { .. } => false,
        }
    }
}

/// Carrier assignment extracted from a successful aggregator response.
#[derive(Debug, Clone)]
pub struct ShipmentAssignment {
    pub shipment_id: i64,
    pub awb_code: String,
    pub courier_company_id: Option<i64>,
    pub courier_name: Option<String>,
}

impl ShipmentAssignment {
    /// Courier display name, with the aggregator's own name as fallback.
    pub fn courier_label(&self) -> &str {
        self.courier_name.as_deref().unwrap_or(DEFAULT_COURIER_NAME)
    }
}

/// A successful shipment creation: the validated assignment plus the raw
/// response body, which is passed through to the API caller untouched.
#[derive(Debug, Clone)]
pub struct ShipmentOutcome {
    pub assignment: ShipmentAssignment,
    pub raw: Value,
}

/// Client for the aggregator's shipment-creation endpoint.
#[async_trait]
pub trait ShippingClient: Send + Sync {
    /// Submit a shipment and return the carrier assignment.
    async fn create_shipment(
        &self,
        token: &str,
        request: &ShipmentRequest,
    ) -> Result<ShipmentOutcome, ShippingError>;
}

/// Shape of the fields we consume from the aggregator response.
#[derive(Debug, Deserialize)]
struct RawAssignment {
    shipment_id: Option<i64>,
    awb_code: Option<String>,
    courier_company_id: Option<i64>,
    courier_name: Option<String>,
}

/// Validate the aggregator response before any field access.
///
/// The happy path requires a shipment id and a non-empty AWB code; anything
/// else is an aggregator failure, not a crash further down.
fn parse_assignment(body: &Value) -> Result<ShipmentAssignment, ShippingError> {
    let raw: RawAssignment =
        serde_json::from_value(body.clone()).map_err(|e| ShippingError::InvalidResponse {
            message: format!("unexpected response shape: {}", e),
        })?;

    let shipment_id = raw
        .shipment_id
        .ok_or_else(|| ShippingError::InvalidResponse {
            message: "response carries no shipment_id".to_string(),
        })?;

    let awb_code = raw
        .awb_code
        .filter(|code| !code.is_empty())
        .ok_or_else(|| ShippingError::InvalidResponse {
            message: "response carries no awb_code".to_string(),
        })?;

    Ok(ShipmentAssignment {
        shipment_id,
        awb_code,
        courier_company_id: raw.courier_company_id,
        courier_name: raw.courier_name,
    })
}

/// reqwest-backed client for a Shiprocket-compatible aggregator.
pub struct ShiprocketClient {
    http: reqwest::Client,
    base_url: String,
}

impl ShiprocketClient {
    pub fn new(config: &ShippingConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn classify(err: reqwest::Error) -> ShippingError {
        if err.is_timeout() {
            ShippingError::Timeout
        } else {
            ShippingError::Transport {
                message: err.to_string(),
            }
        }
    }
}

#[async_trait]
impl ShippingClient for ShiprocketClient {
    async fn create_shipment(
        &self,
        token: &str,
        request: &ShipmentRequest,
    ) -> Result<ShipmentOutcome, ShippingError> {
        let url = format!("{}{}", self.base_url, CREATE_SHIPMENT_PATH);

        tracing::debug!(order_ref = %request.order_id, %url, "submitting shipment to aggregator");

        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(request)
            .send()
            .await
            .map_err(Self::classify)?;

        let status = response.status();
        let body: Value = response
            .json()
            .await
            .map_err(|e| ShippingError::InvalidResponse {
                message: format!("non-JSON response body: {}", e),
            })?;

        if !status.is_success() {
            // The aggregator puts its diagnostic in a top-level message field
            let message = body
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("no diagnostic message")
                .to_string();
            return Err(ShippingError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let assignment = parse_assignment(&body)?;
        Ok(ShipmentOutcome {
            assignment,
            raw: body,
        })
    }
}
