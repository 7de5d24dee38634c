//! Port infrastructure for backend access
//!
//! Domain crates define port traits for the collaborating backend; adapters
//! implement them (the REST adapter in production, an in-memory mock in
//! tests). Every implementation reports failures through [`BackendError`]
//! so callers classify outcomes without knowing which adapter produced them.

use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

fn joined(violations: &BTreeMap<String, String>) -> String {
    violations
        .iter()
        .map(|(field, message)| format!("{field}: {message}"))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Error type for backend port operations
///
/// Classifies every failure mode of the quoting backend so interface code
/// can route each one to the right user-facing treatment: rejection maps
/// merge into the validation display, ambiguity becomes a verify warning,
/// transport trouble becomes a generic retryable message.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The requested entity does not exist
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// The backend rejected the payload with a field-to-message map
    #[error("validation rejected: {}", joined(.violations))]
    Rejected {
        violations: BTreeMap<String, String>,
    },

    /// The request was malformed in a way the backend reported as a
    /// single message rather than a field map
    #[error("bad request: {message}")]
    BadRequest { message: String },

    /// The operation violates a lifecycle rule (wrong status, not deletable)
    #[error("conflict: {message}")]
    Conflict { message: String },

    /// The request never completed at the transport level
    #[error("connection error: {message}")]
    Transport {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The request timed out
    #[error("timeout after {duration_ms}ms: {operation}")]
    Timeout { operation: String, duration_ms: u64 },

    /// The backend failed internally (5xx)
    #[error("service error ({status}): {message}")]
    Service { status: u16, message: String },

    /// A successful response body could not be decoded (read path)
    #[error("response decode error: {message}")]
    Decode { message: String },

    /// A write was accepted but its confirmation could not be read;
    /// the entity may or may not have been persisted
    #[error("ambiguous outcome: {message}")]
    Ambiguous { message: String },
}

impl BackendError {
    /// Creates a NotFound error
    pub fn not_found(entity: impl Into<String>, id: impl fmt::Display) -> Self {
        BackendError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Creates a Rejected error from a field-to-message map
    pub fn rejected(violations: BTreeMap<String, String>) -> Self {
        BackendError::Rejected { violations }
    }

    /// Creates a Conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        BackendError::Conflict {
            message: message.into(),
        }
    }

    /// Creates a Transport error without an underlying source
    pub fn transport(message: impl Into<String>) -> Self {
        BackendError::Transport {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a Transport error wrapping its cause
    pub fn transport_from(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        BackendError::Transport {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a Timeout error
    pub fn timeout(operation: impl Into<String>, duration_ms: u64) -> Self {
        BackendError::Timeout {
            operation: operation.into(),
            duration_ms,
        }
    }

    /// Creates a Service error
    pub fn service(status: u16, message: impl Into<String>) -> Self {
        BackendError::Service {
            status,
            message: message.into(),
        }
    }

    /// Creates a Decode error
    pub fn decode(message: impl Into<String>) -> Self {
        BackendError::Decode {
            message: message.into(),
        }
    }

    /// Creates an Ambiguous error
    pub fn ambiguous(message: impl Into<String>) -> Self {
        BackendError::Ambiguous {
            message: message.into(),
        }
    }

    /// Returns true if the entity was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, BackendError::NotFound { .. })
    }

    /// Returns true if the backend rejected the payload field-by-field
    pub fn is_rejection(&self) -> bool {
        matches!(self, BackendError::Rejected { .. })
    }

    /// Returns true if the write outcome is unknown and needs verification
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, BackendError::Ambiguous { .. })
    }

    /// Returns true if retrying later may succeed
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            BackendError::Transport { .. }
                | BackendError::Timeout { .. }
                | BackendError::Service { .. }
        )
    }

    /// Rejection messages in field order, empty for other variants
    ///
    /// Interface code merges these into the same display path as
    /// client-side validation so the user sees one consistent list.
    pub fn violation_messages(&self) -> Vec<String> {
        match self {
            BackendError::Rejected { violations } => violations.values().cloned().collect(),
            _ => Vec::new(),
        }
    }
}

/// Marker trait for all backend ports
///
/// Port traits extend this marker so implementations are thread-safe and
/// usable behind `Arc<dyn ...>` in async contexts.
pub trait DomainPort: Send + Sync + 'static {}
