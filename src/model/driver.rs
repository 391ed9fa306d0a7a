use crate::framework::Record;
use crate::model::{DriverId, Location, UserId};
use serde::{Deserialize, Serialize};

/// Availability of a driver as seen by dispatch.
///
/// Only `Online` drivers are returned by the nearby-driver query. A driver holding
/// an open offer is `Offered` until they respond or the offer expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriverStatus {
    Offline,
    Online,
    Offered,
    Delivering,
}

/// A delivery driver profile.
#[derive(Debug, Clone, PartialEq)]
pub struct Driver {
    pub id: DriverId,
    /// The account that receives this driver's push notifications.
    pub user_id: UserId,
    pub name: String,
    pub status: DriverStatus,
    pub location: Location,
}

impl Driver {
    pub fn new(
        id: DriverId,
        user_id: UserId,
        name: impl Into<String>,
        status: DriverStatus,
        location: Location,
    ) -> Self {
        Self {
            id,
            user_id,
            name: name.into(),
            status,
            location,
        }
    }
}

/// Mutations accepted by the driver record actor.
#[derive(Debug, Clone)]
pub enum DriverPatch {
    Status(DriverStatus),
    Location(Location),
}

impl Record for Driver {
    type Id = DriverId;
    type Patch = DriverPatch;

    fn id(&self) -> DriverId {
        self.id
    }

    fn apply(&mut self, patch: DriverPatch) -> Result<(), String> {
        match patch {
            DriverPatch::Status(status) => self.status = status,
            DriverPatch::Location(location) => self.location = location,
        }
        Ok(())
    }
}

/// Read-only projection returned by the nearby-driver query.
#[derive(Debug, Clone, PartialEq)]
pub struct AvailableDriver {
    pub id: DriverId,
    pub status: DriverStatus,
    pub location: Location,
    /// Straight-line distance to the food-place the query was centred on.
    pub distance_meters: f64,
}
