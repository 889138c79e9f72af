//! Remaining daily quota.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Result of `remaining_quota()`.
///
/// `Unlimited` is what the UI layer historically received as `-1`;
/// `as_sentinel` keeps that encoding available at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Quota {
    Unlimited,
    Remaining(u32),
}

impl Quota {
    pub const UNLIMITED_SENTINEL: i64 = -1;

    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::Remaining(0))
    }

    pub fn remaining(&self) -> Option<u32> {
        match self {
            Self::Unlimited => None,
            Self::Remaining(n) => Some(*n),
        }
    }

    /// `-1` for unlimited, otherwise the remaining count.
    pub fn as_sentinel(&self) -> i64 {
        match self {
            Self::Unlimited => Self::UNLIMITED_SENTINEL,
            Self::Remaining(n) => i64::from(*n),
        }
    }
}

impl fmt::Display for Quota {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unlimited => f.write_str("unlimited"),
            Self::Remaining(n) => write!(f, "{n} remaining today"),
        }
    }
}
