//! Error type for collaborator failures.

use crate::framework::RecordError;
use thiserror::Error;

/// A repository, journey or geocoding call failed.
///
/// The engines never retry these; they propagate to whoever invoked the engine.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PortError {
    /// The collaborator has no record with this id.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// The collaborator refused a write.
    #[error("{kind} rejected the update: {reason}")]
    Rejected { kind: &'static str, reason: String },

    /// The collaborator could not be reached.
    #[error("Collaborator unavailable: {0}")]
    Unavailable(String),

    /// The route could not be computed.
    #[error("Route calculation failed: {0}")]
    Route(String),
}

impl From<RecordError> for PortError {
    fn from(e: RecordError) -> Self {
        match e {
            RecordError::NotFound { entity, id } => PortError::NotFound { kind: entity, id },
            RecordError::Rejected { entity, reason } => PortError::Rejected {
                kind: entity,
                reason,
            },
            other => PortError::Unavailable(other.to_string()),
        }
    }
}
