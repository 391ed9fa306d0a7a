//! Type-safe identifiers.
//!
//! Every record is keyed by its own newtype so a `DriverId` can never be passed
//! where an `OrderId` is expected.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, "_{}"), self.0)
            }
        }
    };
}

record_id!(
    /// Identifier of a customer order.
    OrderId,
    "order"
);
record_id!(
    /// Identifier of a delivery driver profile.
    DriverId,
    "driver"
);
record_id!(
    /// Identifier of a food-place (restaurant).
    FoodPlaceId,
    "food_place"
);
record_id!(
    /// Identifier of a stored postal address.
    AddressId,
    "address"
);
record_id!(
    /// Identifier of an account. Push notifications are addressed to users,
    /// never to drivers or food-places directly.
    UserId,
    "user"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_display_with_their_prefix() {
        assert_eq!(OrderId(7).to_string(), "order_7");
        assert_eq!(DriverId::from(3).to_string(), "driver_3");
        assert_eq!(FoodPlaceId(1).to_string(), "food_place_1");
    }

    #[test]
    fn ids_serialize_as_plain_numbers() {
        let json = serde_json::to_string(&UserId(42)).unwrap();
        assert_eq!(json, "42");
    }
}
