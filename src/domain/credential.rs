//! Named, role-scoped API credentials

use crate::core::auth::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored API credential.
///
/// There is no revocation or expiry field: the "current" credential for a
/// name+role pair is the most recently created row, so rotation happens by
/// inserting a newer one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiKey {
    pub id: Uuid,
    pub name: String,
    pub role: Role,
    pub token: String,
    pub created_at: DateTime<Utc>,
}

impl ApiKey {
    pub fn new(name: impl Into<String>, role: Role, token: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            role,
            token: token.into(),
            created_at: Utc::now(),
        }
    }
}
