//! Contracts of the collaborators the dispatch engines depend on.
//!
//! The engines only ever see these traits. In-process implementations live in
//! [`clients`](crate::clients), [`journey`](crate::journey) and [`notify`](crate::notify);
//! a deployment can swap any of them for a database- or HTTP-backed one.

pub mod error;

pub use error::*;

use crate::model::{
    Address, AddressId, AvailableDriver, Delivery, Driver, DriverId, DriverStatus, FoodPlace,
    FoodPlaceId, Location, Order, OrderId, OrderStatus, Route, UserId,
};
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait DriverRepository: Send + Sync {
    /// Online drivers within `radius_meters` of `location`.
    async fn available_drivers_within(
        &self,
        location: Location,
        radius_meters: f64,
    ) -> Result<Vec<AvailableDriver>, PortError>;

    /// Set a driver's status. Idempotent.
    async fn update_driver_status(
        &self,
        driver_id: DriverId,
        status: DriverStatus,
    ) -> Result<(), PortError>;

    async fn driver_by_id(&self, driver_id: DriverId) -> Result<Option<Driver>, PortError>;
}

#[async_trait]
pub trait FoodPlaceRepository: Send + Sync {
    async fn food_place_by_id(&self, id: FoodPlaceId) -> Result<Option<FoodPlace>, PortError>;

    /// The account that owns the food-place.
    async fn food_place_user_id(&self, id: FoodPlaceId) -> Result<UserId, PortError>;
}

#[async_trait]
pub trait AddressRepository: Send + Sync {
    async fn address_by_id(&self, id: AddressId) -> Result<Option<Address>, PortError>;

    /// Remember a geocoded location so later dispatches skip the lookup.
    async fn update_address_location(&self, id: AddressId, location: Location) -> Result<(), PortError>;
}

#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn order_by_id(&self, id: OrderId) -> Result<Option<Order>, PortError>;

    async fn update_delivery(&self, order_id: OrderId, delivery: Delivery) -> Result<(), PortError>;

    async fn update_status(&self, order_id: OrderId, status: OrderStatus) -> Result<(), PortError>;
}

#[async_trait]
pub trait JourneyCalculationService: Send + Sync {
    /// Route through `locations` in order, one leg per consecutive pair.
    async fn calculate_route(&self, locations: &[Location]) -> Result<Route, PortError>;

    /// `None` when the text cannot be resolved.
    async fn geocode_address(&self, text: &str) -> Result<Option<Location>, PortError>;
}

/// Push channel to user devices. Fire-and-forget: at most once, no delivery
/// guarantee, and a failed push never fails the caller.
#[async_trait]
pub trait NotificationSender: Send + Sync {
    async fn send_to_user(&self, user_id: UserId, event: &str, payload: serde_json::Value);
}

/// Everything the engines need from the outside world, bundled for injection.
#[derive(Clone)]
pub struct Collaborators {
    pub drivers: Arc<dyn DriverRepository>,
    pub food_places: Arc<dyn FoodPlaceRepository>,
    pub addresses: Arc<dyn AddressRepository>,
    pub orders: Arc<dyn OrderRepository>,
    pub journeys: Arc<dyn JourneyCalculationService>,
    pub notifier: Arc<dyn NotificationSender>,
}
