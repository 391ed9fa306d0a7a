//! # Record Trait
//!
//! The contract every stored type fulfils to be held by a [`RecordActor`](crate::framework::RecordActor).
//!
//! Records carry their own identifier (ids are assigned by whoever creates the
//! record, not by the store) and describe their mutations as a `Patch` enum, so
//! every write is a single message the actor can apply atomically.

use std::fmt::{Debug, Display};
use std::hash::Hash;

pub trait Record: Clone + Send + Sync + 'static {
    /// The unique identifier for this record.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// The mutations this record accepts.
    type Patch: Send + Sync + Debug;

    fn id(&self) -> Self::Id;

    /// Apply a patch in place. An `Err` leaves the record untouched and is
    /// reported to the caller as [`RecordError::Rejected`](crate::framework::RecordError::Rejected).
    fn apply(&mut self, patch: Self::Patch) -> Result<(), String>;

    /// Short name used in log fields and errors ("Driver", "Order", ...).
    fn entity_name() -> &'static str {
        std::any::type_name::<Self>()
            .rsplit("::")
            .next()
            .unwrap_or("Record")
    }
}
