//! Driver reaches the pickup point: position updates, trip details are
//! priced with the multipliers current at this moment, and the dropoff leg
//! is scheduled.

use bevy_ecs::prelude::{Query, Res, ResMut, With};
use log::debug;

use crate::clock::{CurrentEvent, EventKind, EventSubject, SimulationClock};
use crate::demand::DemandPricingModel;
use crate::ecs::{Driver, Position, Ride};
use crate::geo::distance_km;
use crate::pricing::{trip_fare, PricingConfig, SpeedModel};

pub fn pickup_arrived_system(
    mut clock: ResMut<SimulationClock>,
    event: Res<CurrentEvent>,
    demand: Res<DemandPricingModel>,
    speed: Res<SpeedModel>,
    pricing: Res<PricingConfig>,
    mut rides: Query<&mut Ride>,
    mut driver_positions: Query<&mut Position, With<Driver>>,
) {
    if event.0.kind != EventKind::PickupArrived {
        return;
    }
    let Some(EventSubject::Ride(ride_entity)) = event.0.subject else {
        return;
    };
    let Ok(mut ride) = rides.get_mut(ride_entity) else {
        return;
    };

    if let Ok(mut position) = driver_positions.get_mut(ride.driver) {
        position.0 = ride.request.pickup_location;
    }

    let snapshot = demand.current();
    let trip_km = distance_km(ride.request.pickup_location, ride.request.dropoff_location);
    let fare = trip_fare(
        *pricing,
        trip_km,
        snapshot.pricing_multiplier,
        snapshot.demand_multiplier,
    );
    let trip_ms = speed.travel_duration_ms(trip_km, snapshot.speed_factor);
    debug!(
        "request {}: picked up, {trip_km:.2} km trip, fare {fare:.2}",
        ride.request.request_id
    );

    ride.pickup_at = Some(clock.now());
    ride.trip_distance_km = trip_km;
    ride.fare = Some(fare);

    clock.schedule_in(
        trip_ms,
        EventKind::DropoffArrived,
        Some(EventSubject::Ride(ride_entity)),
    );
}
