//! Customer orders as seen by dispatch.
//!
//! # Actor Framework
//! [`Order`] implements the [`Record`](crate::framework::Record) trait,
//! allowing it to be held by a [`RecordActor`](crate::framework::RecordActor).
//! Mutations go through [`OrderPatch`].
use crate::framework::Record;
use crate::model::{AddressId, DriverId, FoodPlaceId, OrderId, UserId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub name: String,
    pub quantity: u32,
}

impl OrderItem {
    pub fn new(name: impl Into<String>, quantity: u32) -> Self {
        Self {
            name: name.into(),
            quantity,
        }
    }
}

/// Why dispatch gave up on an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CancelReason {
    /// The food-place rejected the order or never answered.
    FoodPlaceDeclined,
    /// Every assignment attempt ended without a driver.
    NoDriverAvailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Placed,
    AwaitingConfirmation,
    Confirmed,
    DriverAssigned,
    Cancelled(CancelReason),
}

/// Delivery details persisted once a driver accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delivery {
    pub driver_id: DriverId,
    /// Driver pay in the smallest currency unit.
    pub payment_amount: i64,
    pub distance_meters: u64,
    pub duration_seconds: u64,
    /// Opaque route blob produced by the journey service.
    pub route: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: OrderId,
    pub customer_id: UserId,
    pub customer_name: String,
    pub food_place_id: FoodPlaceId,
    pub delivery_address_id: AddressId,
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
    pub delivery: Option<Delivery>,
}

impl Order {
    /// Creates a freshly placed order with no delivery attached.
    pub fn new(
        id: OrderId,
        customer_id: UserId,
        customer_name: impl Into<String>,
        food_place_id: FoodPlaceId,
        delivery_address_id: AddressId,
        items: Vec<OrderItem>,
    ) -> Self {
        Self {
            id,
            customer_id,
            customer_name: customer_name.into(),
            food_place_id,
            delivery_address_id,
            items,
            status: OrderStatus::Placed,
            delivery: None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum OrderPatch {
    Status(OrderStatus),
    Delivery(Delivery),
}

impl Record for Order {
    type Id = OrderId;
    type Patch = OrderPatch;

    fn id(&self) -> OrderId {
        self.id
    }

    fn apply(&mut self, patch: OrderPatch) -> Result<(), String> {
        match patch {
            OrderPatch::Status(status) => {
                if let OrderStatus::Cancelled(_) = self.status {
                    if status != self.status {
                        return Err(format!("{} is already cancelled", self.id));
                    }
                }
                self.status = status;
            }
            OrderPatch::Delivery(delivery) => {
                if let Some(existing) = &self.delivery {
                    if existing.driver_id != delivery.driver_id {
                        return Err(format!(
                            "{} is already assigned to {}",
                            self.id, existing.driver_id
                        ));
                    }
                }
                self.delivery = Some(delivery);
            }
        }
        Ok(())
    }
}
