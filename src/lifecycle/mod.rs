//! Runtime wiring and lifecycle management.
//!
//! - [`DispatchSystem`] - Starts the record actors, wires both engines and the orchestrator, shuts everything down
//! - [`setup_tracing`] - Initializes the tracing/logging infrastructure

pub mod dispatch_system;
pub mod tracing;

pub use self::dispatch_system::*;
pub use self::tracing::*;
