#![allow(dead_code)]

use food_dispatch::clients::ActorClient;
use food_dispatch::config::DispatchConfig;
use food_dispatch::lifecycle::DispatchSystem;
use food_dispatch::model::{
    Address, AddressId, Driver, DriverId, DriverStatus, FoodPlace, FoodPlaceId, Location, Order,
    OrderId, OrderItem, OrderStatus, UserId,
};
use food_dispatch::notify::{DELIVERY_OFFER, DELIVERY_OFFER_CANCELLED};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

pub const OWNER: UserId = UserId(20);
pub const CUSTOMER: UserId = UserId(30);
pub const FOOD_PLACE: FoodPlaceId = FoodPlaceId(1);
pub const ADDRESS: AddressId = AddressId(2);
pub const ORDER: OrderId = OrderId(1);

pub const KITCHEN: Location = Location {
    latitude: 51.5155,
    longitude: -0.1420,
};
pub const HOME: Location = Location {
    latitude: 51.5226,
    longitude: -0.1300,
};

/// Millisecond timeouts so tests exercise the real timers quickly.
pub fn fast_config() -> DispatchConfig {
    DispatchConfig::default()
        .with_offer_timeout(Duration::from_millis(200))
        .with_confirmation_timeout(Duration::from_millis(500))
        .with_retry_interval(Duration::from_millis(10))
}

/// Drivers receive pushes on user id `100 + driver id`.
pub fn driver_user(driver_id: DriverId) -> UserId {
    UserId(100 + driver_id.0)
}

pub fn driver_for_user(user_id: UserId) -> Option<DriverId> {
    user_id.0.checked_sub(100).filter(|id| *id > 0).map(DriverId)
}

/// Seed a food-place, the customer's address, online drivers a few hundred
/// meters from the kitchen, and a placed order. Returns the order.
pub async fn seed(system: &DispatchSystem, drivers: &[DriverId]) -> Order {
    system
        .food_place_client
        .store(FoodPlace::new(FOOD_PLACE, OWNER, "Noodle Bar", AddressId(1), KITCHEN))
        .await
        .expect("Failed to store food place");
    system
        .address_client
        .store(Address::new(ADDRESS, CUSTOMER, "12 Fitzroy Square", Some(HOME)))
        .await
        .expect("Failed to store address");

    for (i, &id) in drivers.iter().enumerate() {
        let location = Location::new(KITCHEN.latitude + 0.002 * (i as f64 + 1.0), KITCHEN.longitude);
        let driver = Driver::new(id, driver_user(id), format!("driver {}", id.0), DriverStatus::Online, location);
        system
            .driver_client
            .store(driver)
            .await
            .expect("Failed to store driver");
    }

    let order = Order::new(
        ORDER,
        CUSTOMER,
        "Ada",
        FOOD_PLACE,
        ADDRESS,
        vec![OrderItem::new("Pad thai", 2)],
    );
    system
        .order_client
        .place_order(order.clone())
        .await
        .expect("Failed to place order");
    order
}

pub async fn driver_status(system: &DispatchSystem, id: DriverId) -> DriverStatus {
    system
        .driver_client
        .fetch(id)
        .await
        .expect("Failed to get driver")
        .expect("Driver not found")
        .status
}

pub async fn order_status(system: &DispatchSystem, id: OrderId) -> OrderStatus {
    system
        .order_client
        .fetch(id)
        .await
        .expect("Failed to get order")
        .expect("Order not found")
        .status
}

pub async fn wait_until(mut condition: impl FnMut() -> bool) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while !condition() {
        assert!(Instant::now() < deadline, "Condition not met in time");
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Answer {
    Accept,
    Decline,
    Ignore,
}

/// Simulated driver phones answering offers from the push channel.
pub struct DriverDevices {
    offers: Arc<Mutex<Vec<DriverId>>>,
    cancellations: Arc<Mutex<Vec<DriverId>>>,
    handle: JoinHandle<()>,
}

impl DriverDevices {
    /// Drivers offered the delivery, in order.
    pub fn offers(&self) -> Vec<DriverId> {
        self.offers.lock().clone()
    }

    /// Drivers told that their offer expired.
    pub fn cancellations(&self) -> Vec<DriverId> {
        self.cancellations.lock().clone()
    }

    pub async fn stop(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }
}

/// Subscribes immediately, so start it before the dispatch under test.
pub fn spawn_driver_devices(
    system: &DispatchSystem,
    answer: impl Fn(DriverId) -> Answer + Send + 'static,
) -> DriverDevices {
    spawn_devices(system, move |driver_id, _| answer(driver_id))
}

/// Answers the n-th offer sent to any driver with `answers[n]`, whichever
/// driver the shuffle picked. Offers past the end of the list are ignored.
pub fn spawn_driver_devices_in_turn(system: &DispatchSystem, answers: Vec<Answer>) -> DriverDevices {
    spawn_devices(system, move |_, turn| {
        answers.get(turn).copied().unwrap_or(Answer::Ignore)
    })
}

fn spawn_devices(
    system: &DispatchSystem,
    mut answer: impl FnMut(DriverId, usize) -> Answer + Send + 'static,
) -> DriverDevices {
    let mut pushes = system.notifier.subscribe();
    let engine = system.assignment.clone();
    let offers = Arc::new(Mutex::new(Vec::new()));
    let cancellations = Arc::new(Mutex::new(Vec::new()));

    let seen_offers = offers.clone();
    let seen_cancellations = cancellations.clone();
    let handle = tokio::spawn(async move {
        loop {
            let push = match pushes.recv().await {
                Ok(push) => push,
                Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => break,
            };
            let Some(driver_id) = driver_for_user(push.user_id) else {
                continue;
            };
            let order_id = OrderId(push.payload["order_id"].as_u64().expect("order_id in payload") as u32);

            match push.event.as_str() {
                DELIVERY_OFFER => {
                    let turn = {
                        let mut offers = seen_offers.lock();
                        offers.push(driver_id);
                        offers.len() - 1
                    };
                    match answer(driver_id, turn) {
                        Answer::Accept => {
                            engine
                                .accept_delivery_offer(driver_id, order_id)
                                .await
                                .expect("Accept failed");
                        }
                        Answer::Decline => {
                            engine
                                .reject_delivery_offer(driver_id, order_id)
                                .await
                                .expect("Reject failed");
                        }
                        Answer::Ignore => {}
                    }
                }
                DELIVERY_OFFER_CANCELLED => seen_cancellations.lock().push(driver_id),
                _ => {}
            }
        }
    });

    DriverDevices {
        offers,
        cancellations,
        handle,
    }
}
