//! Error types for order confirmation.

use crate::model::OrderId;
use crate::ports::PortError;
use thiserror::Error;

/// Failures of the confirmation engine. A rejection or a timeout is not an
/// error; both end as `Ok(false)`.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfirmationError {
    /// A confirmation request for this order is already waiting.
    #[error("Confirmation already pending for {0}")]
    AlreadyPending(OrderId),

    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    #[error(transparent)]
    Collaborator(#[from] PortError),
}
