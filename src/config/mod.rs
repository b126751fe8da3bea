//! Configuration loading and management

use crate::core::auth::Role;
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Top-level service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Address the HTTP server binds to.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    #[serde(default)]
    pub shipping: ShippingConfig,

    /// Static bearer tokens accepted by the server.
    ///
    /// Deployment bootstrap surface; the token format itself is opaque.
    #[serde(default)]
    pub auth_tokens: Vec<AuthTokenEntry>,
}

/// One accepted bearer token and the principal it resolves to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthTokenEntry {
    pub token: String,
    pub user_id: i64,
    pub role: Role,
}

/// Configuration for the shipping aggregator integration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingConfig {
    /// Base URL of the aggregator API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Timeout for the shipment-creation call, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Pickup-location label used when the vendor has no business name.
    #[serde(default = "default_pickup_fallback")]
    pub pickup_fallback: String,

    /// Package physical profile sent with every shipment.
    ///
    /// The order model carries no per-product dimensions, so one fleet-wide
    /// profile applies to all shipments.
    #[serde(default)]
    pub package: PackageProfile,
}

/// Physical dimensions (cm) and weight (kg) of a shipment package.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageProfile {
    #[serde(default = "default_dimension")]
    pub length: f64,
    #[serde(default = "default_dimension")]
    pub breadth: f64,
    #[serde(default = "default_dimension")]
    pub height: f64,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

fn default_listen_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_base_url() -> String {
    "https://apiv2.shiprocket.in".to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_pickup_fallback() -> String {
    "Primary".to_string()
}

fn default_dimension() -> f64 {
    10.0
}

fn default_weight() -> f64 {
    0.5
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            shipping: ShippingConfig::default(),
            auth_tokens: Vec::new(),
        }
    }
}

impl Default for ShippingConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            pickup_fallback: default_pickup_fallback(),
            package: PackageProfile::default(),
        }
    }
}

impl Default for PackageProfile {
    fn default() -> Self {
        Self {
            length: default_dimension(),
            breadth: default_dimension(),
            height: default_dimension(),
            weight: default_weight(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }
}
