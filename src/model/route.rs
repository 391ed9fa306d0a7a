use serde::{Deserialize, Serialize};

/// One leg of a multi-stop route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteLeg {
    pub distance_meters: u64,
    pub duration_seconds: u64,
}

/// Totals and per-leg figures of a computed route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    pub distance_meters: u64,
    pub duration_seconds: u64,
    pub legs: Vec<RouteLeg>,
}

/// A computed route: the summary the engines reason about plus an opaque blob
/// (geometry, provider payload) that is only ever stored and forwarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub summary: RouteSummary,
    pub blob: String,
}

impl Route {
    /// Duration of the first leg. For a driver→food-place→customer route this is
    /// the driver's ETA to the pickup.
    pub fn first_leg_seconds(&self) -> u64 {
        self.summary
            .legs
            .first()
            .map(|leg| leg.duration_seconds)
            .unwrap_or_default()
    }
}
