use crate::framework::{Record, RecordClient};
use crate::ports::PortError;
use async_trait::async_trait;

/// Trait for record-specific clients to inherit the common operations.
///
/// Implementors only hand out their inner [`RecordClient`]; `fetch` and
/// `store` come for free, with actor failures mapped to [`PortError`].
#[async_trait]
pub trait ActorClient<T: Record>: Send + Sync {
    /// Access the inner generic RecordClient.
    fn inner(&self) -> &RecordClient<T>;

    /// Fetch a record by id.
    #[tracing::instrument(skip(self))]
    async fn fetch(&self, id: T::Id) -> Result<Option<T>, PortError> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(PortError::from)
    }

    /// Insert or replace a record.
    #[tracing::instrument(skip(self, record))]
    async fn store(&self, record: T) -> Result<(), PortError> {
        tracing::debug!(id = %record.id(), "Sending request");
        self.inner().insert(record).await.map_err(PortError::from)
    }
}
