//! Catalog errors.

use std::fmt;
use std::path::PathBuf;

use promptdeck_core::ErrorCode;

pub const CATALOG_IO_ERROR: &str = "CATALOG_IO_ERROR";
pub const CATALOG_PARSE_ERROR: &str = "CATALOG_PARSE_ERROR";
pub const CATALOG_REMOTE_ERROR: &str = "CATALOG_REMOTE_ERROR";
pub const CATALOG_UNAVAILABLE: &str = "CATALOG_UNAVAILABLE";

/// One source that did not produce a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFailure {
    pub source: String,
    pub reason: String,
}

impl fmt::Display for SourceFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.source, self.reason)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed catalog in {source_name}: {message}")]
    Parse {
        source_name: String,
        message: String,
    },

    #[error("remote catalog unavailable: {reason}")]
    Remote { reason: String },

    #[error("no catalog source produced prompts ({})", format_attempts(.attempts))]
    AllSourcesFailed { attempts: Vec<SourceFailure> },
}

fn format_attempts(attempts: &[SourceFailure]) -> String {
    if attempts.is_empty() {
        return "no sources configured".to_string();
    }
    attempts
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl CatalogError {
    pub fn remote(reason: impl Into<String>) -> Self {
        Self::Remote {
            reason: reason.into(),
        }
    }
}

impl ErrorCode for CatalogError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Io { .. } => CATALOG_IO_ERROR,
            Self::Parse { .. } => CATALOG_PARSE_ERROR,
            Self::Remote { .. } => CATALOG_REMOTE_ERROR,
            Self::AllSourcesFailed { .. } => CATALOG_UNAVAILABLE,
        }
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_sources_failed_lists_attempts() {
        let err = CatalogError::AllSourcesFailed {
            attempts: vec![
                SourceFailure {
                    source: "remote".into(),
                    reason: "offline".into(),
                },
                SourceFailure {
                    source: "prompts.json".into(),
                    reason: "returned no prompts".into(),
                },
            ],
        };
        let msg = err.to_string();
        assert!(msg.contains("remote: offline"));
        assert!(msg.contains("prompts.json: returned no prompts"));
        assert_eq!(err.error_code(), CATALOG_UNAVAILABLE);
    }
}
