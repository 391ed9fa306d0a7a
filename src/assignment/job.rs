//! Per-order assignment state.

use crate::model::{DriverId, OrderId, Route};
use crate::store::{PendingEntry, PendingStore};
use crate::wait::{Resolution, ResponseWait};
use parking_lot::Mutex;
use std::sync::Arc;

/// In-flight assignment jobs, one per order.
pub type AssignmentJobStore = PendingStore<DeliveryAssignmentJob>;

/// The offer currently held by one driver.
#[derive(Debug, Clone)]
pub struct PendingOffer {
    pub driver_id: DriverId,
    pub wait: Arc<ResponseWait>,
    /// Driver → food-place → customer, computed for this driver.
    pub route: Route,
    pub payment_amount: i64,
}

#[derive(Debug, Default)]
struct JobState {
    current_attempt: u32,
    assigned_driver_id: Option<DriverId>,
    assignment_persisted: bool,
    offer: Option<PendingOffer>,
}

/// Mutable state of one order's driver search.
///
/// Every transition happens under the job's own lock and never across an
/// `.await`; the offer's [`ResponseWait`] decides which of {driver, timer} wins.
#[derive(Debug)]
pub struct DeliveryAssignmentJob {
    order_id: OrderId,
    state: Mutex<JobState>,
}

impl PendingEntry for DeliveryAssignmentJob {
    fn for_order(order_id: OrderId) -> Self {
        Self {
            order_id,
            state: Mutex::new(JobState::default()),
        }
    }
}

impl DeliveryAssignmentJob {
    pub fn order_id(&self) -> OrderId {
        self.order_id
    }

    /// Start the next attempt. `None` once a driver is assigned or the budget is spent.
    pub fn begin_attempt(&self, max_attempts: u32) -> Option<u32> {
        let mut state = self.state.lock();
        if state.assigned_driver_id.is_some() || state.current_attempt >= max_attempts {
            return None;
        }
        state.current_attempt += 1;
        Some(state.current_attempt)
    }

    pub fn current_attempt(&self) -> u32 {
        self.state.lock().current_attempt
    }

    pub fn assigned_driver_id(&self) -> Option<DriverId> {
        self.state.lock().assigned_driver_id
    }

    pub fn offered_driver_id(&self) -> Option<DriverId> {
        self.state.lock().offer.as_ref().map(|offer| offer.driver_id)
    }

    /// Hand the delivery to `driver_id`, caching the route and pay quoted to them.
    ///
    /// Replaces any previous offer; callers close an offer before opening the next.
    pub fn open_offer(&self, driver_id: DriverId, route: Route, payment_amount: i64) -> Arc<ResponseWait> {
        let wait = Arc::new(ResponseWait::new());
        let mut state = self.state.lock();
        debug_assert!(state.offer.is_none(), "offer already open for {}", self.order_id);
        state.offer = Some(PendingOffer {
            driver_id,
            wait: Arc::clone(&wait),
            route,
            payment_amount,
        });
        wait
    }

    /// Withdraw `driver_id`'s offer. No-op if another driver holds the offer.
    pub fn close_offer(&self, driver_id: DriverId) -> Option<PendingOffer> {
        let mut state = self.state.lock();
        if state.offer.as_ref().is_some_and(|offer| offer.driver_id == driver_id) {
            state.offer.take()
        } else {
            None
        }
    }

    /// Claim the open offer for `driver_id` as accepted.
    ///
    /// Succeeds for at most one caller per job: the driver must hold the offer,
    /// nobody may be assigned yet, and the offer's wait must still be pending.
    /// On success the driver is recorded as assigned and the offer is returned
    /// so the caller can persist it and then wake the waiter.
    pub fn claim_acceptance(&self, driver_id: DriverId) -> Option<PendingOffer> {
        let mut state = self.state.lock();
        if state.assigned_driver_id.is_some() {
            return None;
        }
        let offer = state.offer.as_ref().filter(|offer| offer.driver_id == driver_id)?;
        if !offer.wait.try_resolve(Resolution::Accepted) {
            return None;
        }
        let offer = offer.clone();
        state.assigned_driver_id = Some(driver_id);
        Some(offer)
    }

    /// Claim the open offer for `driver_id` as declined. Returns the wait to wake.
    pub fn claim_rejection(&self, driver_id: DriverId) -> Option<Arc<ResponseWait>> {
        let state = self.state.lock();
        let offer = state.offer.as_ref().filter(|offer| offer.driver_id == driver_id)?;
        offer
            .wait
            .try_resolve(Resolution::Declined)
            .then(|| Arc::clone(&offer.wait))
    }

    /// Record that the accepted delivery reached the order repository.
    pub fn mark_assignment_persisted(&self) {
        self.state.lock().assignment_persisted = true;
    }

    pub fn is_assignment_persisted(&self) -> bool {
        self.state.lock().assignment_persisted
    }
}
