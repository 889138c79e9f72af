//! Stable error codes surfaced to the UI layer.
//!
//! The UI maps these to user-facing copy; the `Display` text of an error is
//! for logs only.

pub const AUTH_CANCELLED: &str = "AUTH_CANCELLED";
pub const AUTH_PROVIDER_FAILED: &str = "AUTH_PROVIDER_FAILED";
pub const NOT_SIGNED_IN: &str = "NOT_SIGNED_IN";
pub const SUBSCRIPTION_REFRESH_FAILED: &str = "SUBSCRIPTION_REFRESH_FAILED";
pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const STORAGE_UNAVAILABLE: &str = "STORAGE_UNAVAILABLE";
pub const MIGRATION_FAILED: &str = "MIGRATION_FAILED";
pub const SERIALIZATION_ERROR: &str = "SERIALIZATION_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const PERSISTENCE_WRITE_WARNING: &str = "PERSISTENCE_WRITE_WARNING";
pub const STALE_STATE_WARNING: &str = "STALE_STATE_WARNING";

/// Implemented by every error enum in the workspace.
pub trait ErrorCode {
    fn error_code(&self) -> &'static str;
}
