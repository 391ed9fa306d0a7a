//! Plain data records shared by the dispatch engines and the in-memory collaborators.
//!
//! Each record implements [`Record`](crate::framework::Record) so it can be held by a
//! [`RecordActor`](crate::framework::RecordActor).

pub mod address;
pub mod driver;
pub mod food_place;
pub mod ids;
pub mod location;
pub mod order;
pub mod route;

pub use address::*;
pub use driver::*;
pub use food_place::*;
pub use ids::*;
pub use location::*;
pub use order::*;
pub use route::*;
