use super::error::AssignmentError;
use super::job::{AssignmentJobStore, DeliveryAssignmentJob};
use crate::config::DispatchConfig;
use crate::model::{
    AvailableDriver, Delivery, DriverId, DriverStatus, Location, Order, OrderId,
};
use crate::notify::{DELIVERY_ASSIGNMENT_CONFIRMED, DELIVERY_OFFER, DELIVERY_OFFER_CANCELLED};
use crate::payment::calculate_payment_amount;
use crate::ports::{
    AddressRepository, Collaborators, DriverRepository, FoodPlaceRepository,
    JourneyCalculationService, NotificationSender, OrderRepository,
};
use crate::wait::Resolution;
use rand::seq::SliceRandom;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Finds a driver for a confirmed order.
///
/// Nearby drivers are offered the delivery one at a time in random order. Each
/// offer stays open until the driver accepts, declines, or the offer timeout
/// elapses. Rounds that end without a driver are retried after a pause, up to
/// the configured number of attempts.
pub struct DeliveryAssignmentEngine {
    drivers: Arc<dyn DriverRepository>,
    food_places: Arc<dyn FoodPlaceRepository>,
    addresses: Arc<dyn AddressRepository>,
    orders: Arc<dyn OrderRepository>,
    journeys: Arc<dyn JourneyCalculationService>,
    notifier: Arc<dyn NotificationSender>,
    jobs: AssignmentJobStore,
    offer_timeout: Duration,
    retry_interval: Duration,
    max_attempts: u32,
    search_radius_meters: f64,
}

impl DeliveryAssignmentEngine {
    pub fn new(collaborators: Collaborators, config: &DispatchConfig) -> Self {
        Self {
            drivers: collaborators.drivers,
            food_places: collaborators.food_places,
            addresses: collaborators.addresses,
            orders: collaborators.orders,
            journeys: collaborators.journeys,
            notifier: collaborators.notifier,
            jobs: AssignmentJobStore::new(),
            offer_timeout: config.offer_timeout,
            retry_interval: config.retry_interval,
            max_attempts: config.max_attempts,
            search_radius_meters: config.search_radius_meters,
        }
    }

    pub fn jobs(&self) -> &AssignmentJobStore {
        &self.jobs
    }

    /// Run the driver search for `order` to completion.
    ///
    /// Returns `Ok(true)` once a driver is assigned and `Ok(false)` when every
    /// attempt ended without one. The job is gone from the store either way.
    #[instrument(skip(self, order), fields(order_id = %order.id))]
    pub async fn initiate_delivery_assignment(&self, order: &Order) -> Result<bool, AssignmentError> {
        let job = self
            .jobs
            .create_guarded(order.id)
            .map_err(|_| AssignmentError::AlreadyDispatching(order.id))?;
        info!("Delivery assignment started");

        let (pickup, dropoff) = self.resolve_endpoints(order).await?;

        while let Some(attempt) = job.begin_attempt(self.max_attempts) {
            let mut candidates = self
                .drivers
                .available_drivers_within(pickup, self.search_radius_meters)
                .await?;
            info!(attempt, candidates = candidates.len(), "Assignment attempt");

            candidates.shuffle(&mut rand::thread_rng());
            for candidate in &candidates {
                if self
                    .offer_delivery_to_driver(&job, order, candidate, pickup, dropoff)
                    .await?
                {
                    info!(attempt, driver_id = %candidate.id, "Driver assigned");
                    return Ok(true);
                }
            }

            if attempt < self.max_attempts {
                debug!(attempt, retry_in = ?self.retry_interval, "No driver this round");
                tokio::time::sleep(self.retry_interval).await;
            }
        }

        info!(attempts = self.max_attempts, "No driver accepted the delivery");
        Ok(false)
    }

    /// A driver takes the offer they currently hold.
    ///
    /// `Ok(false)` for stale, duplicate, late or foreign acceptances, and
    /// `Err(JobNotFound)` only for an order that does not exist. When this
    /// call wins, the driver is set to delivering and the quoted route and pay
    /// are stored on the order before the offering loop is released.
    #[instrument(skip_all, fields(%driver_id, %order_id))]
    pub async fn accept_delivery_offer(
        &self,
        driver_id: DriverId,
        order_id: OrderId,
    ) -> Result<bool, AssignmentError> {
        let Some(job) = self.jobs.get(order_id) else {
            if self.orders.order_by_id(order_id).await?.is_none() {
                return Err(AssignmentError::JobNotFound(order_id));
            }
            warn!("Acceptance for an order that is no longer being dispatched");
            return Ok(false);
        };

        let Some(offer) = job.claim_acceptance(driver_id) else {
            warn!(
                offered = ?job.offered_driver_id(),
                assigned = ?job.assigned_driver_id(),
                "Acceptance ignored"
            );
            return Ok(false);
        };
        let _wake = offer.wait.wake_on_drop();

        let driver = self
            .drivers
            .driver_by_id(driver_id)
            .await?
            .ok_or(AssignmentError::DriverVanished { driver_id, order_id })?;

        self.drivers
            .update_driver_status(driver_id, DriverStatus::Delivering)
            .await?;

        let summary = &offer.route.summary;
        let delivery = Delivery {
            driver_id,
            payment_amount: offer.payment_amount,
            distance_meters: summary.distance_meters,
            duration_seconds: summary.duration_seconds,
            route: offer.route.blob.clone(),
        };
        self.orders.update_delivery(order_id, delivery).await?;
        job.mark_assignment_persisted();
        self.jobs.remove_entry(order_id, &job);

        self.notifier
            .send_to_user(
                driver.user_id,
                DELIVERY_ASSIGNMENT_CONFIRMED,
                json!({
                    "order_id": order_id,
                    "payment_amount": offer.payment_amount,
                }),
            )
            .await;

        info!(payment = offer.payment_amount, "Offer accepted");
        Ok(true)
    }

    /// A driver declines the offer they currently hold. Idempotent; never fails.
    #[instrument(skip_all, fields(%driver_id, %order_id))]
    pub async fn reject_delivery_offer(
        &self,
        driver_id: DriverId,
        order_id: OrderId,
    ) -> Result<bool, AssignmentError> {
        let Some(job) = self.jobs.get(order_id) else {
            debug!("Rejection for an order that is not being dispatched");
            return Ok(false);
        };
        match job.claim_rejection(driver_id) {
            Some(wait) => {
                wait.wake();
                info!("Offer declined");
                Ok(true)
            }
            None => {
                warn!(offered = ?job.offered_driver_id(), "Rejection ignored");
                Ok(false)
            }
        }
    }

    async fn resolve_endpoints(&self, order: &Order) -> Result<(Location, Location), AssignmentError> {
        let food_place = self
            .food_places
            .food_place_by_id(order.food_place_id)
            .await?
            .ok_or(AssignmentError::FoodPlaceNotFound(order.food_place_id))?;

        let address = self
            .addresses
            .address_by_id(order.delivery_address_id)
            .await?
            .ok_or(AssignmentError::AddressNotFound(order.delivery_address_id))?;

        let dropoff = match address.location {
            Some(location) => location,
            None => {
                let location = self
                    .journeys
                    .geocode_address(&address.text)
                    .await?
                    .ok_or(AssignmentError::UnresolvableAddress(address.id))?;
                self.addresses
                    .update_address_location(address.id, location)
                    .await?;
                debug!(address_id = %address.id, "Address geocoded");
                location
            }
        };

        Ok((food_place.location, dropoff))
    }

    /// Offer the delivery to one driver and wait for the outcome.
    ///
    /// Returns `Ok(true)` only if this driver accepted and the acceptance was persisted.
    #[instrument(skip_all, fields(driver_id = %candidate.id))]
    async fn offer_delivery_to_driver(
        &self,
        job: &DeliveryAssignmentJob,
        order: &Order,
        candidate: &AvailableDriver,
        pickup: Location,
        dropoff: Location,
    ) -> Result<bool, AssignmentError> {
        let Some(driver) = self.drivers.driver_by_id(candidate.id).await? else {
            warn!("Candidate disappeared before the offer");
            return Ok(false);
        };
        if driver.status != DriverStatus::Online {
            debug!(status = ?driver.status, "Candidate no longer available");
            return Ok(false);
        }

        let route = self
            .journeys
            .calculate_route(&[candidate.location, pickup, dropoff])
            .await?;
        let payment = calculate_payment_amount(
            route.summary.distance_meters,
            route.summary.duration_seconds,
        );
        let payload = json!({
            "order_id": order.id,
            "food_place_id": order.food_place_id,
            "payment_amount": payment,
            "distance_meters": route.summary.distance_meters,
            "duration_seconds": route.summary.duration_seconds,
            "pickup_eta_seconds": route.first_leg_seconds(),
            "delivery_eta_seconds": route.summary.duration_seconds,
            "route": route.blob,
            "expires_in_seconds": self.offer_timeout.as_secs(),
        });

        let wait = job.open_offer(candidate.id, route, payment);
        if let Err(e) = self
            .drivers
            .update_driver_status(candidate.id, DriverStatus::Offered)
            .await
        {
            job.close_offer(candidate.id);
            return Err(e.into());
        }
        self.notifier
            .send_to_user(driver.user_id, DELIVERY_OFFER, payload)
            .await;
        info!(payment, "Offer sent");

        let resolution = wait.wait(self.offer_timeout).await;
        job.close_offer(candidate.id);

        match resolution {
            Resolution::Accepted if job.is_assignment_persisted() => Ok(true),
            Resolution::Accepted => Err(AssignmentError::AcceptanceFailed {
                driver_id: candidate.id,
                order_id: order.id,
            }),
            Resolution::Declined => {
                self.drivers
                    .update_driver_status(candidate.id, DriverStatus::Online)
                    .await?;
                Ok(false)
            }
            Resolution::TimedOut => {
                warn!(timeout = ?self.offer_timeout, "Offer expired");
                self.drivers
                    .update_driver_status(candidate.id, DriverStatus::Online)
                    .await?;
                self.notifier
                    .send_to_user(
                        driver.user_id,
                        DELIVERY_OFFER_CANCELLED,
                        json!({ "order_id": order.id }),
                    )
                    .await;
                Ok(false)
            }
        }
    }
}
