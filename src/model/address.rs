use crate::framework::Record;
use crate::model::{AddressId, Location, UserId};

/// A stored delivery address.
///
/// `location` is filled in when the address was geocoded on entry. Addresses
/// without one are geocoded from `text` when a route is needed.
#[derive(Debug, Clone, PartialEq)]
pub struct Address {
    pub id: AddressId,
    pub user_id: UserId,
    pub text: String,
    pub location: Option<Location>,
}

impl Address {
    pub fn new(
        id: AddressId,
        user_id: UserId,
        text: impl Into<String>,
        location: Option<Location>,
    ) -> Self {
        Self {
            id,
            user_id,
            text: text.into(),
            location,
        }
    }
}

#[derive(Debug, Clone)]
pub enum AddressPatch {
    Geocoded(Location),
}

impl Record for Address {
    type Id = AddressId;
    type Patch = AddressPatch;

    fn id(&self) -> AddressId {
        self.id
    }

    fn apply(&mut self, patch: AddressPatch) -> Result<(), String> {
        match patch {
            AddressPatch::Geocoded(location) => self.location = Some(location),
        }
        Ok(())
    }
}
