use crate::clients::actor_client::ActorClient;
use crate::framework::{Record, RecordClient};
use crate::model::{FoodPlace, FoodPlaceId, UserId};
use crate::ports::{FoodPlaceRepository, PortError};
use async_trait::async_trait;
use tracing::instrument;

/// Client for the food-place record actor.
#[derive(Clone)]
pub struct FoodPlaceClient {
    inner: RecordClient<FoodPlace>,
}

impl FoodPlaceClient {
    pub fn new(inner: RecordClient<FoodPlace>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<FoodPlace> for FoodPlaceClient {
    fn inner(&self) -> &RecordClient<FoodPlace> {
        &self.inner
    }
}

#[async_trait]
impl FoodPlaceRepository for FoodPlaceClient {
    async fn food_place_by_id(&self, id: FoodPlaceId) -> Result<Option<FoodPlace>, PortError> {
        self.fetch(id).await
    }

    #[instrument(skip(self))]
    async fn food_place_user_id(&self, id: FoodPlaceId) -> Result<UserId, PortError> {
        self.fetch(id)
            .await?
            .map(|food_place| food_place.owner_user_id)
            .ok_or_else(|| PortError::NotFound {
                kind: FoodPlace::entity_name(),
                id: id.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{create_mock_client, expect_get};
    use crate::model::{AddressId, Location};

    #[tokio::test]
    async fn test_owner_lookup() {
        let (mock, mut receiver) = create_mock_client::<FoodPlace>(10);
        let client = FoodPlaceClient::new(mock);

        let task = tokio::spawn(async move { client.food_place_user_id(FoodPlaceId(2)).await });

        let (id, responder) = expect_get(&mut receiver).await.expect("Expected Get request");
        assert_eq!(id, FoodPlaceId(2));
        responder
            .send(Ok(Some(FoodPlace::new(
                FoodPlaceId(2),
                UserId(20),
                "Noodle Bar",
                AddressId(1),
                Location::new(0.0, 0.0),
            ))))
            .unwrap();

        assert_eq!(task.await.unwrap().unwrap(), UserId(20));
    }

    #[tokio::test]
    async fn test_owner_of_unknown_food_place_is_not_found() {
        let (mock, mut receiver) = create_mock_client::<FoodPlace>(10);
        let client = FoodPlaceClient::new(mock);

        let task = tokio::spawn(async move { client.food_place_user_id(FoodPlaceId(3)).await });

        let (_, responder) = expect_get(&mut receiver).await.expect("Expected Get request");
        responder.send(Ok(None)).unwrap();

        assert_eq!(
            task.await.unwrap().unwrap_err(),
            PortError::NotFound {
                kind: "FoodPlace",
                id: "food_place_3".into()
            }
        );
    }
}
