//! Error types for binding generation
//!
//! Every fatal condition aborts the run; entities flagged `nobind` are not
//! errors and never reach this module.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for cppbind operations
pub type BindResult<T> = Result<T, BindError>;

/// Main error type for cppbind
#[derive(Debug, Error)]
pub enum BindError {
    /// A declaration shape with no binding rule
    #[error("Unsupported construct in {entity}: {reason}")]
    UnsupportedConstruct { entity: String, reason: String },

    /// An entity is missing a field the emitters depend on
    #[error("Malformed entity {entity}: {reason}")]
    MalformedInput { entity: String, reason: String },

    /// Two entities of one namespace map to the same generated identifier
    #[error("Generated identifier {identifier} is not unique in namespace {namespace}")]
    IdentifierCollision { namespace: String, identifier: String },

    /// IO error
    #[error("IO error on {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Documentation database could not be decoded
    #[error("Invalid documentation database: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Environment variable missing
    #[error("Environment variable not set: {0}")]
    EnvVarMissing(String),
}

impl BindError {
    /// Create an unsupported-construct error
    pub fn unsupported(entity: impl Into<String>, reason: impl Into<String>) -> Self {
        BindError::UnsupportedConstruct {
            entity: entity.into(),
            reason: reason.into(),
        }
    }

    /// Create a malformed-input error
    pub fn malformed(entity: impl Into<String>, reason: impl Into<String>) -> Self {
        BindError::MalformedInput {
            entity: entity.into(),
            reason: reason.into(),
        }
    }

    /// Create an IO error tied to a path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BindError::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        BindError::Config(message.into())
    }

    /// Attach the qualified name of the entity being bound.
    ///
    /// The normalizer and operator classifier only see type strings, so they
    /// report the offending expression; emitters re-tag the error with the
    /// entity they were working on.
    pub fn in_entity(self, entity: &str) -> Self {
        match self {
            BindError::UnsupportedConstruct { entity: inner, reason } => {
                BindError::UnsupportedConstruct {
                    entity: entity.to_string(),
                    reason: format!("{} ({})", reason, inner),
                }
            }
            BindError::MalformedInput { entity: inner, reason } => BindError::MalformedInput {
                entity: entity.to_string(),
                reason: format!("{} ({})", reason, inner),
            },
            other => other,
        }
    }
}
