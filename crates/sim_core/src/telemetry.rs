//! Telemetry / KPIs: counters and completed-ride records for analysis.

use bevy_ecs::prelude::Resource;

/// One completed ride, recorded when the driver reaches the dropoff.
/// Timestamps are simulation ms; use the helper methods for derived KPIs.
#[derive(Debug, Clone)]
pub struct CompletedRideRecord {
    pub request_id: String,
    pub driver_id: String,
    pub requested_at: u64,
    pub matched_at: u64,
    pub pickup_at: u64,
    pub dropoff_at: u64,
    pub trip_distance_km: f64,
    pub fare: f64,
}

impl CompletedRideRecord {
    /// Time from request creation to driver claim.
    pub fn time_to_match(&self) -> u64 {
        self.matched_at.saturating_sub(self.requested_at)
    }

    /// Time from driver claim to pickup.
    pub fn time_to_pickup(&self) -> u64 {
        self.pickup_at.saturating_sub(self.matched_at)
    }

    /// Time from pickup to dropoff (passenger on board).
    pub fn trip_duration(&self) -> u64 {
        self.dropoff_at.saturating_sub(self.pickup_at)
    }
}

/// Collects simulation telemetry. Inserted as a resource at scenario build.
#[derive(Debug, Default, Resource)]
pub struct SimTelemetry {
    pub requests_generated: u64,
    pub requests_matched: u64,
    pub requests_abandoned: u64,
    pub rides_completed: u64,
    pub heartbeats_emitted: u64,
    pub sink_publish_failures: u64,
    pub completed_rides: Vec<CompletedRideRecord>,
}
