//! Error types for keyframe map operations

use serde::{Deserialize, Serialize};

/// Errors raised by [`crate::KeyframeMap`] and its construction config.
///
/// Every failing operation leaves the map unchanged.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum KeyframeError {
    /// Position is not an integer
    #[error("Frame position must be an integer, got {found}")]
    TypeKind { found: String },

    /// Position outside the coverage range
    #[error("Frame {position} is out of range [{start}, {end}]")]
    OutOfRange { position: i64, start: i64, end: i64 },

    /// Fallback keyframe holds a value of the wrong kind
    #[error("Value type mismatch at frame {position}: expected {expected}, got {actual}")]
    TypeMismatch {
        position: i64,
        expected: String,
        actual: String,
    },

    /// No keyframe precedes the requested position
    #[error("No keyframe at or before frame {position} (range starts at {start})")]
    NotFound { position: i64, start: i64 },

    /// Construction config could not be parsed
    #[error("Invalid keyframe map config: {reason}")]
    InvalidConfig { reason: String },
}

impl KeyframeError {
    pub(crate) fn type_kind(found: impl Into<String>) -> Self {
        Self::TypeKind {
            found: found.into(),
        }
    }

    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::TypeKind { .. } => "position",
            Self::OutOfRange { .. } => "range",
            Self::TypeMismatch { .. } => "type",
            Self::NotFound { .. } => "lookup",
            Self::InvalidConfig { .. } => "config",
        }
    }
}

impl From<serde_json::Error> for KeyframeError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidConfig {
            reason: err.to_string(),
        }
    }
}
