//! # Framework Errors
//!
//! Errors raised by the record actor plumbing. Collaborator-level code maps
//! these into [`PortError`](crate::ports::PortError).

/// Errors that can occur within the record framework itself.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum RecordError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },
    #[error("{entity} rejected patch: {reason}")]
    Rejected { entity: &'static str, reason: String },
}
