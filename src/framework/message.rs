//! # Record Messages
//!
//! The request enum exchanged between [`RecordClient`](crate::framework::RecordClient)
//! and [`RecordActor`](crate::framework::RecordActor). Every request carries a
//! oneshot sender the actor answers on.

use crate::framework::error::RecordError;
use crate::framework::record::Record;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, RecordError>>;

/// Predicate evaluated inside the actor by [`RecordRequest::Scan`].
pub type Filter<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

pub enum RecordRequest<T: Record> {
    /// Insert or replace a record under its own id.
    Insert {
        record: T,
        respond_to: Response<()>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    /// Apply a patch and return the updated record.
    Patch {
        id: T::Id,
        patch: T::Patch,
        respond_to: Response<T>,
    },
    Remove {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    /// Return every record matching the filter.
    Scan {
        filter: Filter<T>,
        respond_to: Response<Vec<T>>,
    },
}
