//! # Order Confirmation
//!
//! Asks a food-place to accept or reject an order within a deadline.
//!
//! Per order: `Requested -> {Confirmed, Rejected, TimedOut}`, all terminal. Only
//! the food-place's owning user may answer; answers from anyone else, and
//! answers that arrive after the outcome is settled, are ignored.

pub mod engine;
pub mod error;
pub mod wait;

pub use engine::OrderConfirmationEngine;
pub use error::ConfirmationError;
pub use wait::{ConfirmationStore, OrderConfirmationWait};
