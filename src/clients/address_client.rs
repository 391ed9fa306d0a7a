use crate::clients::actor_client::ActorClient;
use crate::framework::RecordClient;
use crate::model::{Address, AddressId, AddressPatch, Location};
use crate::ports::{AddressRepository, PortError};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for the address record actor.
#[derive(Clone)]
pub struct AddressClient {
    inner: RecordClient<Address>,
}

impl AddressClient {
    pub fn new(inner: RecordClient<Address>) -> Self {
        Self { inner }
    }

    /// Store a resolved location on the address.
    #[instrument(skip(self))]
    pub async fn set_location(&self, id: AddressId, location: Location) -> Result<Address, PortError> {
        debug!("Sending request");
        Ok(self.inner.patch(id, AddressPatch::Geocoded(location)).await?)
    }
}

#[async_trait]
impl ActorClient<Address> for AddressClient {
    fn inner(&self) -> &RecordClient<Address> {
        &self.inner
    }
}

#[async_trait]
impl AddressRepository for AddressClient {
    async fn address_by_id(&self, id: AddressId) -> Result<Option<Address>, PortError> {
        self.fetch(id).await
    }

    async fn update_address_location(&self, id: AddressId, location: Location) -> Result<(), PortError> {
        self.set_location(id, location).await?;
        Ok(())
    }
}
