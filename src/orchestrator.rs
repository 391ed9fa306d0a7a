//! Per-order dispatch workflow.
//!
//! Runs the food-place confirmation and then the driver search for one order,
//! and keeps the order's status in step. A `false` from either engine cancels
//! the order and tells the customer.

use crate::assignment::{AssignmentError, DeliveryAssignmentEngine};
use crate::confirmation::{ConfirmationError, OrderConfirmationEngine};
use crate::model::{CancelReason, DriverId, OrderId, OrderStatus, UserId};
use crate::notify::ORDER_CANCELLED;
use crate::ports::{NotificationSender, OrderRepository, PortError};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info, instrument, warn, Instrument};

#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    Assigned { driver_id: DriverId },
    Cancelled(CancelReason),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum DispatchError {
    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    /// The order is not in a state dispatch can start from.
    #[error("{order_id} cannot be dispatched from status {status:?}")]
    InvalidStatus { order_id: OrderId, status: OrderStatus },

    /// Assignment reported success but no delivery is stored on the order.
    #[error("{0} has no delivery after assignment")]
    MissingDelivery(OrderId),

    #[error(transparent)]
    Confirmation(#[from] ConfirmationError),

    #[error(transparent)]
    Assignment(#[from] AssignmentError),

    #[error(transparent)]
    Collaborator(#[from] PortError),
}

pub struct DispatchOrchestrator {
    confirmation: Arc<OrderConfirmationEngine>,
    assignment: Arc<DeliveryAssignmentEngine>,
    orders: Arc<dyn OrderRepository>,
    notifier: Arc<dyn NotificationSender>,
}

impl DispatchOrchestrator {
    pub fn new(
        confirmation: Arc<OrderConfirmationEngine>,
        assignment: Arc<DeliveryAssignmentEngine>,
        orders: Arc<dyn OrderRepository>,
        notifier: Arc<dyn NotificationSender>,
    ) -> Self {
        Self {
            confirmation,
            assignment,
            orders,
            notifier,
        }
    }

    /// Take a placed order through confirmation and driver assignment.
    #[instrument(skip(self))]
    pub async fn dispatch(&self, order_id: OrderId) -> Result<DispatchOutcome, DispatchError> {
        let order = self
            .orders
            .order_by_id(order_id)
            .await?
            .ok_or(DispatchError::OrderNotFound(order_id))?;
        if order.status != OrderStatus::Placed {
            return Err(DispatchError::InvalidStatus {
                order_id,
                status: order.status,
            });
        }

        self.orders
            .update_status(order_id, OrderStatus::AwaitingConfirmation)
            .await?;
        if !self.confirmation.request_order_confirmation(&order).await? {
            return self.cancel(order_id, order.customer_id, CancelReason::FoodPlaceDeclined).await;
        }
        self.orders
            .update_status(order_id, OrderStatus::Confirmed)
            .await?;

        if !self.assignment.initiate_delivery_assignment(&order).await? {
            return self.cancel(order_id, order.customer_id, CancelReason::NoDriverAvailable).await;
        }

        let driver_id = self
            .orders
            .order_by_id(order_id)
            .await?
            .and_then(|order| order.delivery)
            .map(|delivery| delivery.driver_id)
            .ok_or(DispatchError::MissingDelivery(order_id))?;
        self.orders
            .update_status(order_id, OrderStatus::DriverAssigned)
            .await?;

        info!(%driver_id, "Order dispatched");
        Ok(DispatchOutcome::Assigned { driver_id })
    }

    async fn cancel(
        &self,
        order_id: OrderId,
        customer_id: UserId,
        reason: CancelReason,
    ) -> Result<DispatchOutcome, DispatchError> {
        self.orders
            .update_status(order_id, OrderStatus::Cancelled(reason))
            .await?;
        self.notifier
            .send_to_user(
                customer_id,
                ORDER_CANCELLED,
                json!({ "order_id": order_id, "reason": reason }),
            )
            .await;
        warn!(?reason, "Order cancelled, payment reversal required");
        Ok(DispatchOutcome::Cancelled(reason))
    }

    /// Run [`dispatch`](Self::dispatch) as a background task.
    pub fn spawn_dispatch(self: &Arc<Self>, order_id: OrderId) -> JoinHandle<Result<DispatchOutcome, DispatchError>> {
        let orchestrator = Arc::clone(self);
        let span = tracing::info_span!("dispatch_task", %order_id);
        tokio::spawn(
            async move {
                let result = orchestrator.dispatch(order_id).await;
                if let Err(e) = &result {
                    error!(error = %e, "Dispatch failed");
                }
                result
            }
            .instrument(span),
        )
    }
}
