//! Concurrent keyed stores of in-flight dispatch state.
//!
//! One entry per order while a dispatch step is in progress. The map is sharded
//! ([`DashMap`]), so orders never contend on a single lock, and `create` is an
//! atomic insert-if-absent: an order cannot be dispatched twice concurrently.

use crate::model::OrderId;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::ops::Deref;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error("An entry already exists for {0}")]
    AlreadyExists(OrderId),
}

/// Values that can be created fresh for an order.
pub trait PendingEntry: Send + Sync + 'static {
    fn for_order(order_id: OrderId) -> Self;
}

pub struct PendingStore<V> {
    entries: DashMap<OrderId, Arc<V>>,
}

impl<V: PendingEntry> Default for PendingStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: PendingEntry> PendingStore<V> {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Create the entry for `order_id`, failing if one is already registered.
    pub fn create(&self, order_id: OrderId) -> Result<Arc<V>, StoreError> {
        match self.entries.entry(order_id) {
            Entry::Occupied(_) => Err(StoreError::AlreadyExists(order_id)),
            Entry::Vacant(slot) => {
                let entry = Arc::new(V::for_order(order_id));
                slot.insert(Arc::clone(&entry));
                debug!(%order_id, "Entry created");
                Ok(entry)
            }
        }
    }

    /// Like [`create`](Self::create), but the entry is removed again when the
    /// returned guard is dropped, including when the owning future is cancelled.
    pub fn create_guarded(&self, order_id: OrderId) -> Result<PendingGuard<'_, V>, StoreError> {
        let entry = self.create(order_id)?;
        Ok(PendingGuard {
            store: self,
            order_id,
            entry,
        })
    }

    pub fn get(&self, order_id: OrderId) -> Option<Arc<V>> {
        self.entries
            .get(&order_id)
            .map(|entry| Arc::clone(entry.value()))
    }

    pub fn remove(&self, order_id: OrderId) -> Option<Arc<V>> {
        self.entries.remove(&order_id).map(|(_, entry)| entry)
    }

    /// Remove the entry only if it is still `entry`. Returns whether it was removed.
    pub fn remove_entry(&self, order_id: OrderId, entry: &Arc<V>) -> bool {
        let removed = self
            .entries
            .remove_if(&order_id, |_, current| Arc::ptr_eq(current, entry))
            .is_some();
        if removed {
            debug!(%order_id, "Entry removed");
        }
        removed
    }

    pub fn contains(&self, order_id: OrderId) -> bool {
        self.entries.contains_key(&order_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Owns a store entry for the duration of one dispatch step.
pub struct PendingGuard<'a, V: PendingEntry> {
    store: &'a PendingStore<V>,
    order_id: OrderId,
    entry: Arc<V>,
}

impl<V: PendingEntry> PendingGuard<'_, V> {
    pub fn entry(&self) -> &Arc<V> {
        &self.entry
    }
}

impl<V: PendingEntry> Deref for PendingGuard<'_, V> {
    type Target = V;

    fn deref(&self) -> &V {
        &self.entry
    }
}

impl<V: PendingEntry> Drop for PendingGuard<'_, V> {
    fn drop(&mut self) {
        self.store.remove_entry(self.order_id, &self.entry);
    }
}
