//! # Food Dispatch
//!
//! > **The real-time order-dispatch core of a food delivery marketplace.**
//!
//! Two engines take a placed order to a delivering driver:
//!
//! 1. [`OrderConfirmationEngine`](confirmation::OrderConfirmationEngine) asks the
//!    food-place to accept or reject the order before a deadline.
//! 2. [`DeliveryAssignmentEngine`](assignment::DeliveryAssignmentEngine) offers the
//!    delivery to nearby drivers one at a time, retrying a bounded number of
//!    rounds, until one accepts.
//!
//! [`DispatchOrchestrator`](orchestrator::DispatchOrchestrator) runs them in
//! sequence and cancels the order when either gives up.
//!
//! ## Core Concepts
//!
//! ### Single-resolution waits
//! Every offer and every confirmation request suspends on a
//! [`ResponseWait`](wait::ResponseWait). The inbound response and the deadline
//! timer race to claim it with an atomic compare-and-set; exactly one wins, and
//! the loser's effect is discarded. A driver who answers after their offer
//! expired changes nothing.
//!
//! ### One dispatch per order
//! In-flight state lives in [`PendingStore`](store::PendingStore)s keyed by
//! order. Creating an entry for an order that already has one fails, and the
//! entry is removed when its dispatch step ends, however it ends.
//!
//! ### Ports
//! The engines only depend on the traits in [`ports`]. The in-process
//! implementations are record actors ([`framework`]) behind typed
//! [`clients`], a straight-line [`journey`] estimator and a broadcast
//! [`notify`] channel, all wired by [`lifecycle::DispatchSystem`].
//!
//! ## Module Tour
//!
//! - [`model`] - Plain data: ids, orders, drivers, food-places, addresses, routes
//! - [`framework`] - Generic `RecordActor<T>` / `RecordClient<T>` and mock helpers
//! - [`clients`] - Record clients implementing the repository ports
//! - [`assignment`], [`confirmation`] - The two engines
//! - [`payment`] - Driver pay formula
//! - [`config`] - Timeouts, retry policy and search radius
//! - [`lifecycle`] - System wiring and tracing setup
//!
//! ## Running the Demo
//!
//! ```bash
//! RUST_LOG=info cargo run
//! ```

pub mod assignment;
pub mod clients;
pub mod config;
pub mod confirmation;
pub mod framework;
pub mod journey;
pub mod lifecycle;
pub mod model;
pub mod notify;
pub mod orchestrator;
pub mod payment;
pub mod ports;
pub mod store;
pub mod wait;
