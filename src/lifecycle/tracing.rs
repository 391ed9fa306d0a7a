//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered
//! by `RUST_LOG`. Module paths are hidden (`with_target(false)`); records carry
//! `entity_type`, `order_id` and `driver_id` fields instead.
//!
//! ## Usage
//!
//! ```bash
//! # Outcomes only: offers sent, acceptances, timeouts, cancellations
//! RUST_LOG=info cargo run
//!
//! # Also every actor request and push payload
//! RUST_LOG=debug cargo run
//! ```
//!
//! ## Workflow Trace Example
//!
//! **With `RUST_LOG=info`**:
//!
//! ```text
//! INFO dispatch_task:dispatch:request_order_confirmation: Confirmation requested owner=user_20
//! INFO dispatch_task:dispatch:request_order_confirmation: Order confirmed
//! INFO dispatch_task:dispatch:initiate_delivery_assignment: Assignment attempt attempt=1 candidates=2
//! INFO dispatch_task:dispatch:initiate_delivery_assignment:offer_delivery_to_driver: Offer sent payment=412
//! INFO accept_delivery_offer: Offer accepted payment=412
//! INFO dispatch_task:dispatch: Order dispatched driver_id=driver_2
//! ```
//!
//! The span prefix shows which task produced a line: the dispatch task's
//! offer loop or the inbound response.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
