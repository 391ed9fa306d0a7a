//! # Order Client
//!
//! Serves the [`OrderRepository`] port from a `RecordActor<Order>`. Status and
//! delivery writes are patches, so the order's own rules (a cancelled order
//! stays cancelled, a delivery is never handed to a second driver) are checked
//! inside the actor.
use crate::clients::actor_client::ActorClient;
use crate::framework::RecordClient;
use crate::model::{Delivery, Order, OrderId, OrderPatch, OrderStatus};
use crate::ports::{OrderRepository, PortError};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

/// Client for interacting with the Order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: RecordClient<Order>,
}

impl OrderClient {
    pub fn new(inner: RecordClient<Order>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, order), fields(order_id = %order.id))]
    pub async fn place_order(&self, order: Order) -> Result<OrderId, PortError> {
        debug!(?order, "place_order called");
        let id = order.id;
        self.store(order).await?;
        info!("Order placed");
        Ok(id)
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    fn inner(&self) -> &RecordClient<Order> {
        &self.inner
    }
}

#[async_trait]
impl OrderRepository for OrderClient {
    async fn order_by_id(&self, id: OrderId) -> Result<Option<Order>, PortError> {
        self.fetch(id).await
    }

    #[instrument(skip(self, delivery), fields(driver_id = %delivery.driver_id))]
    async fn update_delivery(&self, order_id: OrderId, delivery: Delivery) -> Result<(), PortError> {
        debug!(?delivery, "Sending request");
        self.inner
            .patch(order_id, OrderPatch::Delivery(delivery))
            .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_status(&self, order_id: OrderId, status: OrderStatus) -> Result<(), PortError> {
        debug!("Sending request");
        self.inner
            .patch(order_id, OrderPatch::Status(status))
            .await?;
        Ok(())
    }
}
