//! Type-safe wrappers around [`RecordClient`](crate::framework::RecordClient).
//!
//! Each client implements one collaborator port from [`ports`](crate::ports),
//! so the engines can run against the in-memory record actors.

pub mod actor_client;
pub mod address_client;
pub mod driver_client;
pub mod food_place_client;
pub mod order_client;

pub use actor_client::*;
pub use address_client::*;
pub use driver_client::*;
pub use food_place_client::*;
pub use order_client::*;
