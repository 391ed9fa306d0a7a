//! # Record Client
//!
//! The typed, cloneable handle for talking to a [`RecordActor`](crate::framework::RecordActor).

use crate::framework::error::RecordError;
use crate::framework::message::RecordRequest;
use crate::framework::record::Record;
use tokio::sync::{mpsc, oneshot};

/// A type-safe client for interacting with a `RecordActor`.
///
/// Holds only a sender, so cloning is cheap and clones can be shared across
/// tasks. The actor stops once every clone has been dropped.
pub struct RecordClient<T: Record> {
    sender: mpsc::Sender<RecordRequest<T>>,
}

impl<T: Record> Clone for RecordClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: Record> RecordClient<T> {
    pub fn new(sender: mpsc::Sender<RecordRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<R, RecordError>>) -> RecordRequest<T>,
    ) -> Result<R, RecordError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| RecordError::ActorClosed)?;
        response.await.map_err(|_| RecordError::ActorDropped)?
    }

    pub async fn insert(&self, record: T) -> Result<(), RecordError> {
        self.request(|respond_to| RecordRequest::Insert { record, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, RecordError> {
        self.request(|respond_to| RecordRequest::Get { id, respond_to })
            .await
    }

    pub async fn patch(&self, id: T::Id, patch: T::Patch) -> Result<T, RecordError> {
        self.request(|respond_to| RecordRequest::Patch {
            id,
            patch,
            respond_to,
        })
        .await
    }

    pub async fn remove(&self, id: T::Id) -> Result<Option<T>, RecordError> {
        self.request(|respond_to| RecordRequest::Remove { id, respond_to })
            .await
    }

    pub async fn scan(
        &self,
        filter: impl Fn(&T) -> bool + Send + Sync + 'static,
    ) -> Result<Vec<T>, RecordError> {
        self.request(|respond_to| RecordRequest::Scan {
            filter: Box::new(filter),
            respond_to,
        })
        .await
    }
}
