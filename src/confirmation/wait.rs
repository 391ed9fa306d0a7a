use crate::model::OrderId;
use crate::store::{PendingEntry, PendingStore};
use crate::wait::{Resolution, ResponseWait};

/// Pending confirmation requests, one per order.
pub type ConfirmationStore = PendingStore<OrderConfirmationWait>;

/// A food-place's pending yes/no on one order.
#[derive(Debug)]
pub struct OrderConfirmationWait {
    order_id: OrderId,
    wait: ResponseWait,
}

impl PendingEntry for OrderConfirmationWait {
    fn for_order(order_id: OrderId) -> Self {
        Self {
            order_id,
            wait: ResponseWait::new(),
        }
    }
}

impl OrderConfirmationWait {
    pub fn order_id(&self) -> OrderId {
        self.order_id
    }

    pub fn wait(&self) -> &ResponseWait {
        &self.wait
    }

    /// Record the food-place's answer and release the requester.
    /// `false` if the request was already answered or expired.
    pub fn respond(&self, confirmed: bool) -> bool {
        let resolution = if confirmed {
            Resolution::Accepted
        } else {
            Resolution::Declined
        };
        if !self.wait.try_resolve(resolution) {
            return false;
        }
        self.wait.wake();
        true
    }

    /// `true` only after an explicit confirmation.
    pub fn confirmed(&self) -> bool {
        self.wait.resolution() == Some(Resolution::Accepted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_not_confirmed() {
        let w = OrderConfirmationWait::for_order(OrderId(1));
        assert!(!w.confirmed());
    }

    #[test]
    fn test_first_answer_sticks() {
        let w = OrderConfirmationWait::for_order(OrderId(1));
        assert!(w.respond(true));
        assert!(!w.respond(false));
        assert!(w.confirmed());
    }
}
