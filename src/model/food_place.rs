use crate::framework::Record;
use crate::model::{AddressId, FoodPlaceId, Location, UserId};

/// A restaurant taking part in the marketplace.
#[derive(Debug, Clone, PartialEq)]
pub struct FoodPlace {
    pub id: FoodPlaceId,
    /// The account that manages this food-place and answers confirmation requests.
    pub owner_user_id: UserId,
    pub name: String,
    pub address_id: AddressId,
    pub location: Location,
}

impl FoodPlace {
    pub fn new(
        id: FoodPlaceId,
        owner_user_id: UserId,
        name: impl Into<String>,
        address_id: AddressId,
        location: Location,
    ) -> Self {
        Self {
            id,
            owner_user_id,
            name: name.into(),
            address_id,
            location,
        }
    }
}

/// Food-places are read-only from dispatch; the only mutation is relocation.
#[derive(Debug, Clone)]
pub enum FoodPlacePatch {
    Location(Location),
}

impl Record for FoodPlace {
    type Id = FoodPlaceId;
    type Patch = FoodPlacePatch;

    fn id(&self) -> FoodPlaceId {
        self.id
    }

    fn apply(&mut self, patch: FoodPlacePatch) -> Result<(), String> {
        match patch {
            FoodPlacePatch::Location(location) => self.location = location,
        }
        Ok(())
    }
}
