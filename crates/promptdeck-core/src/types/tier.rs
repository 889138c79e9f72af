//! Coarse account tier.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Account tier. `Anonymous` holds exactly when nobody is signed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    #[default]
    Anonymous,
    Free,
    Paid,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Self::Anonymous, Self::Free, Self::Paid];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Anonymous => "anonymous",
            Self::Free => "free",
            Self::Paid => "paid",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "anonymous" => Some(Self::Anonymous),
            "free" => Some(Self::Free),
            "paid" => Some(Self::Paid),
            _ => None,
        }
    }

    pub fn is_signed_in(&self) -> bool {
        !matches!(self, Self::Anonymous)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
