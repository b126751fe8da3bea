//! Bearer-token authentication for inbound requests
//!
//! The token format itself is opaque to this crate: an [`AuthProvider`]
//! resolves whatever is in the `Authorization` header to a [`Principal`].
//! [`StaticTokenAuthProvider`] maps opaque tokens to principals and is used
//! for development and tests.

use crate::core::error::DispatchError;
use async_trait::async_trait;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Actor role carried by a token (and used to scope stored credentials).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Vendor,
    Customer,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Role::Admin => "ADMIN",
            Role::Vendor => "VENDOR",
            Role::Customer => "CUSTOMER",
        };
        write!(f, "{}", s)
    }
}

/// Authenticated actor resolved from a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub user_id: i64,
    pub role: Role,
}

impl Principal {
    pub fn vendor(user_id: i64) -> Self {
        Self {
            user_id,
            role: Role::Vendor,
        }
    }

    pub fn is_vendor(&self) -> bool {
        self.role == Role::Vendor
    }
}

/// Extract the bearer token from an `Authorization` header, if any.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Trait for auth providers
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Resolve the request headers to an authenticated principal.
    async fn authenticate(&self, headers: &HeaderMap) -> Result<Principal, DispatchError>;
}

/// Auth provider backed by a fixed token table.
#[derive(Default)]
pub struct StaticTokenAuthProvider {
    tokens: HashMap<String, Principal>,
}

impl StaticTokenAuthProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a token for a principal (builder-style).
    pub fn with_token(mut self, token: impl Into<String>, principal: Principal) -> Self {
        self.tokens.insert(token.into(), principal);
        self
    }
}

#[async_trait]
impl AuthProvider for StaticTokenAuthProvider {
    async fn authenticate(&self, headers: &HeaderMap) -> Result<Principal, DispatchError> {
        let token = bearer_token(headers).ok_or_else(|| DispatchError::Unauthorized {
            message: "missing bearer token".to_string(),
        })?;

        self.tokens
            .get(token)
            .copied()
            .ok_or_else(|| DispatchError::Unauthorized {
                message: "unknown token".to_string(),
            })
    }
}
