#![allow(dead_code)]

use bevy_ecs::prelude::{Entity, World};
use sim_core::clock::{EventKind, EventSubject, SimulationClock};
use sim_core::ecs::{MatchDeadline, RideRequest};
use sim_core::geo::GeoPoint;
use sim_core::records::{
    PassengerPreferences, PassengerRequestRecord, PaymentInfo, PaymentMethod, VehicleType,
};

/// A minimal but schema-complete request record for tests.
pub fn request_record(
    request_id: &str,
    pickup: GeoPoint,
    dropoff: GeoPoint,
    vehicle_type: VehicleType,
) -> PassengerRequestRecord {
    PassengerRequestRecord {
        request_id: request_id.to_string(),
        passenger_id: "P00000".to_string(),
        timestamp: 0,
        pickup_location: pickup,
        dropoff_location: dropoff,
        vehicle_type,
        passenger_preferences: PassengerPreferences::default(),
        payment_info: PaymentInfo {
            payment_method: PaymentMethod::CreditCard,
            coupon_codes: Vec::new(),
            loyalty_points_used: None,
        },
        estimated_fare: 0.0,
        text_messages: Vec::new(),
        driver_rating: None,
    }
}

/// Spawn a pending request entity and schedule its first match attempt at
/// the current simulated time.
pub fn spawn_pending_request(
    world: &mut World,
    record: PassengerRequestRecord,
    wait_ms: u64,
) -> Entity {
    let now = world.resource::<SimulationClock>().now();
    let entity = world
        .spawn((
            RideRequest {
                record,
                requested_at: now,
            },
            MatchDeadline {
                expires_at_ms: now + wait_ms,
            },
        ))
        .id();
    world.resource_mut::<SimulationClock>().schedule_at(
        now,
        EventKind::TryMatch,
        Some(EventSubject::Request(entity)),
    );
    entity
}
