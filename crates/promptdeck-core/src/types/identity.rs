//! Signed-in identity as reported by the external identity provider.

use serde::{Deserialize, Serialize};

/// Persisted under the `user` key as `{ "email", "id", ... }`.
///
/// Provider-specific fields are opaque to us but kept so a stored record
/// round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    /// Opaque provider user id.
    #[serde(default)]
    pub id: String,
    pub email: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Identity {
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            extra: serde_json::Map::new(),
        }
    }

    /// Identity known only by email. The provider id is filled in later, if ever.
    pub fn from_email(email: impl Into<String>) -> Self {
        Self::new(String::new(), email)
    }
}
