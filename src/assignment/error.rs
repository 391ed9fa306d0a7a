//! Error types for delivery assignment.

use crate::model::{AddressId, DriverId, FoodPlaceId, OrderId};
use crate::ports::PortError;
use thiserror::Error;

/// Failures of the assignment engine.
///
/// "No driver found" and "no driver accepted" are not errors; they end as
/// `Ok(false)` from [`initiate_delivery_assignment`](super::DeliveryAssignmentEngine::initiate_delivery_assignment).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AssignmentError {
    /// A dispatch for this order is already running.
    #[error("Delivery assignment already in progress for {0}")]
    AlreadyDispatching(OrderId),

    /// An acceptance arrived for an order that is not being dispatched.
    #[error("No delivery assignment in progress for {0}")]
    JobNotFound(OrderId),

    #[error("Food place not found: {0}")]
    FoodPlaceNotFound(FoodPlaceId),

    #[error("Delivery address not found: {0}")]
    AddressNotFound(AddressId),

    /// The delivery address has no stored location and could not be geocoded.
    #[error("Delivery address could not be geocoded: {0}")]
    UnresolvableAddress(AddressId),

    /// The accepting driver's record disappeared while the offer was open.
    #[error("{driver_id} vanished while holding the offer for {order_id}")]
    DriverVanished { driver_id: DriverId, order_id: OrderId },

    /// The driver won the offer but the acceptance could not be persisted.
    #[error("Acceptance by {driver_id} for {order_id} did not complete")]
    AcceptanceFailed { driver_id: DriverId, order_id: OrderId },

    /// A repository, journey or notification call failed.
    #[error(transparent)]
    Collaborator(#[from] PortError),
}
