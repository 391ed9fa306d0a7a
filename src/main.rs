//! # Food Dispatch Demo
//!
//! Seeds one food-place, one customer address, two nearby drivers and an
//! order, then dispatches the order. The food-place owner and the drivers are
//! simulated by a task listening on the push channel: the owner confirms, Sam
//! declines every offer and Kim accepts.

use food_dispatch::clients::ActorClient;
use food_dispatch::config::DispatchConfig;
use food_dispatch::lifecycle::{setup_tracing, DispatchSystem};
use food_dispatch::model::{
    Address, AddressId, Driver, DriverId, DriverStatus, FoodPlace, FoodPlaceId, Location, Order,
    OrderId, OrderItem, UserId,
};
use food_dispatch::notify::{Notification, DELIVERY_OFFER, ORDER_CONFIRMATION_REQUEST};
use food_dispatch::orchestrator::DispatchOutcome;
use std::collections::HashMap;
use tokio::sync::broadcast::error::RecvError;
use tracing::{error, info, warn, Instrument};

const OWNER: UserId = UserId(20);
const CUSTOMER: UserId = UserId(30);

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = DispatchConfig::from_env().map_err(|e| e.to_string())?;
    info!("Starting dispatch demo");
    let system = DispatchSystem::new(config);

    let kitchen = Location::new(51.5155, -0.1420);
    let home = Location::new(51.5226, -0.1300);
    let sam = Driver::new(DriverId(1), UserId(101), "Sam", DriverStatus::Online, Location::new(51.5170, -0.1450));
    let kim = Driver::new(DriverId(2), UserId(102), "Kim", DriverStatus::Online, Location::new(51.5120, -0.1390));
    let drivers_by_user: HashMap<UserId, DriverId> =
        [(sam.user_id, sam.id), (kim.user_id, kim.id)].into_iter().collect();

    async {
        system
            .food_place_client
            .store(FoodPlace::new(FoodPlaceId(1), OWNER, "Noodle Bar", AddressId(1), kitchen))
            .await?;
        system
            .address_client
            .store(Address::new(AddressId(2), CUSTOMER, "12 Fitzroy Square, London", None))
            .await?;
        system.driver_client.store(sam).await?;
        system.driver_client.store(kim).await?;
        system
            .order_client
            .place_order(Order::new(
                OrderId(1),
                CUSTOMER,
                "Ada",
                FoodPlaceId(1),
                AddressId(2),
                vec![OrderItem::new("Pad thai", 2), OrderItem::new("Spring rolls", 1)],
            ))
            .await
    }
    .instrument(tracing::info_span!("seeding"))
    .await
    .map_err(|e| e.to_string())?;
    system.journeys.register_address("12 Fitzroy Square, London", home);

    let mut pushes = system.notifier.subscribe();
    let confirmation = system.confirmation.clone();
    let assignment = system.assignment.clone();
    let devices = tokio::spawn(
        async move {
            loop {
                let Notification { user_id, event, payload } = match pushes.recv().await {
                    Ok(n) => n,
                    Err(RecvError::Lagged(missed)) => {
                        warn!(missed, "Device fell behind");
                        continue;
                    }
                    Err(RecvError::Closed) => break,
                };
                let Some(order_id) = payload["order_id"].as_u64().map(|id| OrderId(id as u32)) else {
                    continue;
                };

                let answered = match (event.as_str(), drivers_by_user.get(&user_id)) {
                    (ORDER_CONFIRMATION_REQUEST, _) if user_id == OWNER => {
                        confirmation.confirm_order(order_id, user_id).await.map_err(|e| e.to_string())
                    }
                    (DELIVERY_OFFER, Some(&driver_id)) if driver_id == DriverId(1) => {
                        assignment.reject_delivery_offer(driver_id, order_id).await.map_err(|e| e.to_string())
                    }
                    (DELIVERY_OFFER, Some(&driver_id)) => {
                        assignment.accept_delivery_offer(driver_id, order_id).await.map_err(|e| e.to_string())
                    }
                    _ => continue,
                };
                match answered {
                    Ok(applied) => info!(%user_id, %event, applied, "Device answered"),
                    Err(e) => error!(%user_id, %event, error = %e, "Device answer failed"),
                }
            }
        }
        .instrument(tracing::info_span!("devices")),
    );

    let outcome = system
        .orchestrator
        .spawn_dispatch(OrderId(1))
        .await
        .map_err(|e| e.to_string())?
        .map_err(|e| e.to_string())?;

    match outcome {
        DispatchOutcome::Assigned { driver_id } => {
            let delivery = system
                .order_client
                .fetch(OrderId(1))
                .await
                .map_err(|e| e.to_string())?
                .and_then(|order| order.delivery);
            info!(%driver_id, ?delivery, "Delivery assigned");
        }
        DispatchOutcome::Cancelled(reason) => warn!(?reason, "Order cancelled"),
    }

    devices.abort();
    let _ = devices.await;

    system.shutdown().await?;

    info!("Demo completed successfully");
    Ok(())
}
