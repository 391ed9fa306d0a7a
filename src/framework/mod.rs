//! Generic in-memory record actors.
//!
//! The dispatch engines talk to their collaborators through the traits in
//! [`ports`](crate::ports). The in-process implementations of those ports are built on
//! the pieces in this module:
//!
//! - [`Record`] - Trait that stored types implement (id + patch application)
//! - [`RecordActor`] - A Tokio task that owns a `HashMap` of records and serves requests sequentially
//! - [`RecordClient`] - Cheap-to-clone handle that sends [`RecordRequest`]s to the actor
//! - [`RecordError`] - Failures of the actor plumbing itself
//!
//! # Testing
//!
//! See [`mock`] for helpers that let a test play the actor's part.

pub mod actor;
pub mod client;
pub mod error;
pub mod message;
pub mod mock;
pub mod record;

// Re-export core types for convenience
pub use actor::RecordActor;
pub use client::RecordClient;
pub use error::RecordError;
pub use message::{Filter, RecordRequest, Response};
pub use record::Record;
