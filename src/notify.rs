//! In-process push channel.
//!
//! [`BroadcastNotifier`] fans every notification out to all subscribers. A
//! subscriber plays the part of the user devices: it filters by `user_id` and
//! reacts to the events it cares about. Nothing is buffered for users without a
//! subscriber, and a lagging subscriber loses messages.

use crate::model::UserId;
use crate::ports::NotificationSender;
use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::debug;

pub const ORDER_CONFIRMATION_REQUEST: &str = "order_confirmation_request";
pub const DELIVERY_OFFER: &str = "delivery_offer";
pub const DELIVERY_OFFER_CANCELLED: &str = "delivery_offer_cancelled";
pub const DELIVERY_ASSIGNMENT_CONFIRMED: &str = "delivery_assignment_confirmed";
pub const ORDER_CANCELLED: &str = "order_cancelled";

/// A single push as delivered to a device.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub user_id: UserId,
    pub event: String,
    pub payload: serde_json::Value,
}

#[derive(Debug, Clone)]
pub struct BroadcastNotifier {
    sender: broadcast::Sender<Notification>,
}

impl BroadcastNotifier {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }
}

#[async_trait]
impl NotificationSender for BroadcastNotifier {
    async fn send_to_user(&self, user_id: UserId, event: &str, payload: serde_json::Value) {
        debug!(%user_id, event, ?payload, "Push");
        let notification = Notification {
            user_id,
            event: event.to_string(),
            payload,
        };
        if self.sender.send(notification).is_err() {
            debug!(%user_id, event, "Push dropped, no subscribers");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_subscribers_receive_pushes() {
        let notifier = BroadcastNotifier::new(8);
        let mut rx = notifier.subscribe();

        notifier
            .send_to_user(UserId(4), DELIVERY_OFFER, json!({ "order_id": 1 }))
            .await;

        let n = rx.recv().await.unwrap();
        assert_eq!(n.user_id, UserId(4));
        assert_eq!(n.event, DELIVERY_OFFER);
        assert_eq!(n.payload["order_id"], 1);
    }

    #[tokio::test]
    async fn test_send_without_subscribers_does_not_fail() {
        let notifier = BroadcastNotifier::new(8);
        notifier
            .send_to_user(UserId(1), ORDER_CANCELLED, json!(null))
            .await;
    }
}
