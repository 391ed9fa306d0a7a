//! # Record Actor
//!
//! The server half of a record store: one Tokio task owning a `HashMap` of
//! records and processing [`RecordRequest`]s one at a time.

use crate::framework::client::RecordClient;
use crate::framework::error::RecordError;
use crate::framework::message::RecordRequest;
use crate::framework::record::Record;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that holds a collection of records.
///
/// **Concurrency Model**:
/// Requests are processed sequentially, so a `Patch` is atomic with respect to
/// every other request for the same store and the map needs no lock. Separate
/// stores (drivers, orders, ...) run in parallel in their own tasks.
///
/// ```rust
/// use food_dispatch::framework::RecordActor;
/// use food_dispatch::model::{Driver, DriverId, DriverStatus, Location, UserId};
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = RecordActor::<Driver>::new(10);
///     tokio::spawn(actor.run());
///
///     let driver = Driver::new(DriverId(1), UserId(1), "Sam", DriverStatus::Online, Location::new(0.0, 0.0));
///     client.insert(driver).await.unwrap();
///     assert!(client.get(DriverId(1)).await.unwrap().is_some());
/// }
/// ```
pub struct RecordActor<T: Record> {
    receiver: mpsc::Receiver<RecordRequest<T>>,
    store: HashMap<T::Id, T>,
}

impl<T: Record> RecordActor<T> {
    /// Creates a new `RecordActor` and its associated `RecordClient`.
    ///
    /// `buffer_size` is the capacity of the request channel; clients wait for
    /// space when it is full.
    pub fn new(buffer_size: usize) -> (Self, RecordClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
        };
        (actor, RecordClient::new(sender))
    }

    /// Runs the actor's event loop until every client has been dropped.
    pub async fn run(mut self) {
        let entity_type = T::entity_name();
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                RecordRequest::Insert { record, respond_to } => {
                    let id = record.id();
                    let replaced = self.store.insert(id.clone(), record).is_some();
                    debug!(entity_type, %id, replaced, size = self.store.len(), "Insert");
                    let _ = respond_to.send(Ok(()));
                }
                RecordRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                RecordRequest::Patch {
                    id,
                    patch,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?patch, "Patch");
                    let Some(item) = self.store.get(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(RecordError::NotFound {
                            entity: entity_type,
                            id: id.to_string(),
                        }));
                        continue;
                    };
                    // Patch a copy so a rejected patch leaves the stored record intact.
                    let mut updated = item.clone();
                    match updated.apply(patch) {
                        Ok(()) => {
                            self.store.insert(id.clone(), updated.clone());
                            info!(entity_type, %id, "Patched");
                            let _ = respond_to.send(Ok(updated));
                        }
                        Err(reason) => {
                            warn!(entity_type, %id, error = %reason, "Patch rejected");
                            let _ = respond_to.send(Err(RecordError::Rejected {
                                entity: entity_type,
                                reason,
                            }));
                        }
                    }
                }
                RecordRequest::Remove { id, respond_to } => {
                    let removed = self.store.remove(&id);
                    debug!(entity_type, %id, found = removed.is_some(), size = self.store.len(), "Remove");
                    let _ = respond_to.send(Ok(removed));
                }
                RecordRequest::Scan { filter, respond_to } => {
                    let matches: Vec<T> = self
                        .store
                        .values()
                        .filter(|record| filter(*record))
                        .cloned()
                        .collect();
                    debug!(entity_type, matched = matches.len(), size = self.store.len(), "Scan");
                    let _ = respond_to.send(Ok(matches));
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        CancelReason, Order, OrderId, OrderItem, OrderPatch, OrderStatus, AddressId, FoodPlaceId,
        UserId,
    };

    fn order(id: u32) -> Order {
        Order::new(
            OrderId(id),
            UserId(1),
            "Ada",
            FoodPlaceId(1),
            AddressId(1),
            vec![OrderItem::new("Ramen", 1)],
        )
    }

    #[tokio::test]
    async fn test_insert_get_patch_remove() {
        let (actor, client) = RecordActor::<Order>::new(10);
        let handle = tokio::spawn(actor.run());

        client.insert(order(1)).await.unwrap();
        client.insert(order(2)).await.unwrap();

        let patched = client
            .patch(OrderId(1), OrderPatch::Status(OrderStatus::Confirmed))
            .await
            .unwrap();
        assert_eq!(patched.status, OrderStatus::Confirmed);

        let fetched = client.get(OrderId(1)).await.unwrap().unwrap();
        assert_eq!(fetched.status, OrderStatus::Confirmed);

        let confirmed = client
            .scan(|o: &Order| o.status == OrderStatus::Confirmed)
            .await
            .unwrap();
        assert_eq!(confirmed.len(), 1);

        assert!(client.remove(OrderId(2)).await.unwrap().is_some());
        assert!(client.get(OrderId(2)).await.unwrap().is_none());

        drop(client);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_rejected_patch_leaves_record_untouched() {
        let (actor, client) = RecordActor::<Order>::new(10);
        tokio::spawn(actor.run());

        client.insert(order(1)).await.unwrap();
        let cancelled = OrderStatus::Cancelled(CancelReason::FoodPlaceDeclined);
        client
            .patch(OrderId(1), OrderPatch::Status(cancelled))
            .await
            .unwrap();

        let err = client
            .patch(OrderId(1), OrderPatch::Status(OrderStatus::Confirmed))
            .await
            .unwrap_err();
        assert!(matches!(err, RecordError::Rejected { entity: "Order", .. }));

        let fetched = client.get(OrderId(1)).await.unwrap().unwrap();
        assert_eq!(fetched.status, cancelled);
    }

    #[tokio::test]
    async fn test_patch_unknown_record_is_not_found() {
        let (actor, client) = RecordActor::<Order>::new(10);
        tokio::spawn(actor.run());

        let err = client
            .patch(OrderId(9), OrderPatch::Status(OrderStatus::Confirmed))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            RecordError::NotFound {
                entity: "Order",
                id: "order_9".into()
            }
        );
    }
}
