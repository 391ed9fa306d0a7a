use super::error::ConfirmationError;
use super::wait::ConfirmationStore;
use crate::config::DispatchConfig;
use crate::model::{Order, OrderId, UserId};
use crate::notify::ORDER_CONFIRMATION_REQUEST;
use crate::ports::{Collaborators, FoodPlaceRepository, NotificationSender, OrderRepository};
use crate::wait::Resolution;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Asks a food-place to accept or reject an incoming order.
pub struct OrderConfirmationEngine {
    food_places: Arc<dyn FoodPlaceRepository>,
    orders: Arc<dyn OrderRepository>,
    notifier: Arc<dyn NotificationSender>,
    waits: ConfirmationStore,
    confirmation_timeout: Duration,
}

impl OrderConfirmationEngine {
    pub fn new(collaborators: Collaborators, config: &DispatchConfig) -> Self {
        Self {
            food_places: collaborators.food_places,
            orders: collaborators.orders,
            notifier: collaborators.notifier,
            waits: ConfirmationStore::new(),
            confirmation_timeout: config.confirmation_timeout,
        }
    }

    pub fn waits(&self) -> &ConfirmationStore {
        &self.waits
    }

    /// Push the order to the food-place owner and wait for their answer.
    ///
    /// `Ok(true)` only on an explicit confirmation; rejection and timeout are
    /// `Ok(false)`. The pending entry is removed on every exit path, including
    /// when this future is dropped.
    #[instrument(skip(self, order), fields(order_id = %order.id))]
    pub async fn request_order_confirmation(&self, order: &Order) -> Result<bool, ConfirmationError> {
        let pending = self
            .waits
            .create_guarded(order.id)
            .map_err(|_| ConfirmationError::AlreadyPending(order.id))?;

        let owner = self
            .food_places
            .food_place_user_id(order.food_place_id)
            .await?;

        let items: Vec<_> = order
            .items
            .iter()
            .map(|item| json!({ "name": item.name, "quantity": item.quantity }))
            .collect();
        let summary = json!({
            "order_id": order.id,
            "customer_name": order.customer_name,
            "items": items,
            "expires_in_seconds": self.confirmation_timeout.as_secs(),
        });
        self.notifier
            .send_to_user(owner, ORDER_CONFIRMATION_REQUEST, summary)
            .await;
        info!(%owner, "Confirmation requested");

        match pending.wait().wait(self.confirmation_timeout).await {
            Resolution::Accepted => {
                info!("Order confirmed");
            }
            Resolution::Declined => {
                info!("Order rejected by food place");
            }
            Resolution::TimedOut => {
                warn!(timeout = ?self.confirmation_timeout, "Confirmation timed out");
            }
        }
        Ok(pending.confirmed())
    }

    /// The food-place owner accepts the order.
    #[instrument(skip(self))]
    pub async fn confirm_order(&self, order_id: OrderId, user_id: UserId) -> Result<bool, ConfirmationError> {
        self.respond(order_id, user_id, true).await
    }

    /// The food-place owner turns the order down.
    #[instrument(skip(self))]
    pub async fn reject_order(&self, order_id: OrderId, user_id: UserId) -> Result<bool, ConfirmationError> {
        self.respond(order_id, user_id, false).await
    }

    async fn respond(&self, order_id: OrderId, user_id: UserId, confirmed: bool) -> Result<bool, ConfirmationError> {
        let order = self
            .orders
            .order_by_id(order_id)
            .await?
            .ok_or(ConfirmationError::OrderNotFound(order_id))?;

        let owner = self
            .food_places
            .food_place_user_id(order.food_place_id)
            .await?;
        if owner != user_id {
            warn!(%owner, "Response from a user who does not own the food place");
            return Ok(false);
        }

        let Some(pending) = self.waits.get(order_id) else {
            debug!("No confirmation pending");
            return Ok(false);
        };
        let applied = pending.respond(confirmed);
        if !applied {
            debug!("Confirmation already resolved");
        }
        Ok(applied)
    }
}
