//! # Delivery Assignment
//!
//! Finds and assigns a driver to a confirmed order.
//!
//! ## Structure
//!
//! - [`job`] - [`DeliveryAssignmentJob`], the per-order state, and its store
//! - [`engine`] - [`DeliveryAssignmentEngine`], the offer loop and the accept/reject entry points
//! - [`error`] - [`AssignmentError`]
//!
//! ## Races
//!
//! Three parties touch a job: the offering loop, the offer timer and the
//! driver's response. Each offer carries a [`ResponseWait`](crate::wait::ResponseWait);
//! whoever claims it first decides the offer. A response arriving after the
//! timer fired, or for a driver that no longer holds the offer, is ignored.

pub mod engine;
pub mod error;
pub mod job;

pub use engine::DeliveryAssignmentEngine;
pub use error::AssignmentError;
pub use job::{AssignmentJobStore, DeliveryAssignmentJob, PendingOffer};
