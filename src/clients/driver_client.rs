//! # Driver Client
//!
//! Serves the [`DriverRepository`] port from a `RecordActor<Driver>`.
use crate::clients::actor_client::ActorClient;
use crate::framework::RecordClient;
use crate::model::{AvailableDriver, Driver, DriverId, DriverPatch, DriverStatus, Location};
use crate::ports::{DriverRepository, PortError};
use async_trait::async_trait;
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct DriverClient {
    inner: RecordClient<Driver>,
}

impl DriverClient {
    pub fn new(inner: RecordClient<Driver>) -> Self {
        Self { inner }
    }

    /// Move a driver, e.g. from a location ping.
    #[instrument(skip(self))]
    pub async fn update_location(&self, id: DriverId, location: Location) -> Result<Driver, PortError> {
        debug!("Sending request");
        Ok(self.inner.patch(id, DriverPatch::Location(location)).await?)
    }
}

#[async_trait]
impl ActorClient<Driver> for DriverClient {
    fn inner(&self) -> &RecordClient<Driver> {
        &self.inner
    }
}

#[async_trait]
impl DriverRepository for DriverClient {
    #[instrument(skip(self))]
    async fn available_drivers_within(
        &self,
        location: Location,
        radius_meters: f64,
    ) -> Result<Vec<AvailableDriver>, PortError> {
        let online = self
            .inner
            .scan(move |driver| {
                driver.status == DriverStatus::Online
                    && driver.location.distance_meters(&location) <= radius_meters
            })
            .await?;

        let mut available: Vec<AvailableDriver> = online
            .into_iter()
            .map(|driver| AvailableDriver {
                id: driver.id,
                status: driver.status,
                location: driver.location,
                distance_meters: driver.location.distance_meters(&location),
            })
            .collect();
        available.sort_by(|a, b| a.distance_meters.total_cmp(&b.distance_meters));

        debug!(found = available.len(), "Nearby drivers");
        Ok(available)
    }

    #[instrument(skip(self))]
    async fn update_driver_status(&self, driver_id: DriverId, status: DriverStatus) -> Result<(), PortError> {
        debug!("Sending request");
        self.inner
            .patch(driver_id, DriverPatch::Status(status))
            .await?;
        Ok(())
    }

    async fn driver_by_id(&self, driver_id: DriverId) -> Result<Option<Driver>, PortError> {
        self.fetch(driver_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{create_mock_client, expect_patch, expect_scan};
    use crate::framework::RecordError;
    use crate::model::UserId;

    fn driver(id: u32, status: DriverStatus, latitude: f64) -> Driver {
        Driver::new(
            DriverId(id),
            UserId(100 + id),
            format!("driver {id}"),
            status,
            Location::new(latitude, 0.0),
        )
    }

    #[tokio::test]
    async fn test_available_drivers_are_online_in_range_and_sorted() {
        let (mock, mut receiver) = create_mock_client::<Driver>(10);
        let client = DriverClient::new(mock);

        let task = tokio::spawn(async move {
            client
                .available_drivers_within(Location::new(0.0, 0.0), 5000.0)
                .await
        });

        let (filter, responder) = expect_scan(&mut receiver).await.expect("Expected Scan request");
        let fixtures = vec![
            driver(1, DriverStatus::Online, 0.03),     // ~3.3 km
            driver(2, DriverStatus::Online, 0.01),     // ~1.1 km
            driver(3, DriverStatus::Delivering, 0.01), // busy
            driver(4, DriverStatus::Online, 0.5),      // ~55 km
            driver(5, DriverStatus::Offered, 0.0),     // holding another offer
        ];
        let matched: Vec<Driver> = fixtures.into_iter().filter(|d| filter(d)).collect();
        responder.send(Ok(matched)).unwrap();

        let available = task.await.unwrap().unwrap();
        let ids: Vec<DriverId> = available.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![DriverId(2), DriverId(1)]);
        assert!(available[0].distance_meters < available[1].distance_meters);
    }

    #[tokio::test]
    async fn test_update_status_sends_patch() {
        let (mock, mut receiver) = create_mock_client::<Driver>(10);
        let client = DriverClient::new(mock);

        let task = tokio::spawn(async move {
            client
                .update_driver_status(DriverId(7), DriverStatus::Offered)
                .await
        });

        let (id, patch, responder) = expect_patch(&mut receiver).await.expect("Expected Patch request");
        assert_eq!(id, DriverId(7));
        assert!(matches!(patch, DriverPatch::Status(DriverStatus::Offered)));
        responder
            .send(Ok(driver(7, DriverStatus::Offered, 0.0)))
            .unwrap();

        assert!(task.await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn test_unknown_driver_maps_to_not_found() {
        let (mock, mut receiver) = create_mock_client::<Driver>(10);
        let client = DriverClient::new(mock);

        let task = tokio::spawn(async move {
            client
                .update_driver_status(DriverId(9), DriverStatus::Online)
                .await
        });

        let (_, _, responder) = expect_patch(&mut receiver).await.expect("Expected Patch request");
        responder
            .send(Err(RecordError::NotFound {
                entity: "Driver",
                id: "driver_9".into(),
            }))
            .unwrap();

        assert_eq!(
            task.await.unwrap().unwrap_err(),
            PortError::NotFound {
                kind: "Driver",
                id: "driver_9".into()
            }
        );
    }

    #[tokio::test]
    async fn test_closed_actor_is_unavailable() {
        let (mock, receiver) = create_mock_client::<Driver>(10);
        drop(receiver);
        let client = DriverClient::new(mock);

        let err = client.driver_by_id(DriverId(1)).await.unwrap_err();
        assert!(matches!(err, PortError::Unavailable(_)));
    }
}
