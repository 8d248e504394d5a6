use bevy_ecs::prelude::{Component, Entity};

use crate::geo::GeoPoint;
use crate::records::{DriverStatus, PassengerRequestRecord, VehicleType};

/// A driver in the roster. Created once at simulation start, mutated in place
/// for the life of the simulation, never despawned.
#[derive(Debug, Clone, Component)]
pub struct Driver {
    pub id: String,
    pub vehicle_type: VehicleType,
    pub status: DriverStatus,
}

/// A passenger anchor record. Immutable after creation; the source of
/// repeated ride requests.
#[derive(Debug, Clone, Component)]
pub struct Passenger {
    pub id: String,
    pub home: GeoPoint,
    pub work: GeoPoint,
}

/// Current coordinates of a driver. Written only by the ride lifecycle that
/// claimed the driver (pickup/dropoff arrival).
#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct Position(pub GeoPoint);

/// A pending ride request waiting for a driver. Despawned on match or on
/// abandonment, whichever comes first.
#[derive(Debug, Clone, Component)]
pub struct RideRequest {
    pub record: PassengerRequestRecord,
    /// Simulated time the request entered the matching queue.
    pub requested_at: u64,
}

/// Matching wait budget for a pending request.
#[derive(Debug, Clone, Copy, Component)]
pub struct MatchDeadline {
    pub expires_at_ms: u64,
}

/// An in-flight ride holding a claimed driver. Progresses strictly through
/// match -> pickup -> dropoff, then despawns after emitting its records.
#[derive(Debug, Clone, Component)]
pub struct Ride {
    pub request: PassengerRequestRecord,
    pub driver: Entity,
    pub requested_at: u64,
    pub matched_at: u64,
    pub pickup_at: Option<u64>,
    /// Pickup-to-dropoff distance; set when the driver reaches the pickup.
    pub trip_distance_km: f64,
    /// Final fare; set when the trip details are computed at pickup.
    pub fare: Option<f64>,
}
