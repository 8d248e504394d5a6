//! Ride completion: the driver is released back to the available pool and
//! the two output records are handed to the sink. Sink failures are logged
//! and swallowed; the ride is complete regardless of delivery outcome.

use bevy_ecs::prelude::{Commands, Query, Res, ResMut};
use log::info;

use crate::clock::{CurrentEvent, EventKind, EventSubject, SimulationClock};
use crate::ecs::{Driver, Position, Ride};
use crate::matching;
use crate::pricing::round_to_cents;
use crate::records::DriverUpdateRecord;
use crate::sink::{publish_request_best_effort, publish_update_best_effort, EventSinkResource};
use crate::telemetry::{CompletedRideRecord, SimTelemetry};

pub fn dropoff_arrived_system(
    mut commands: Commands,
    clock: Res<SimulationClock>,
    event: Res<CurrentEvent>,
    mut telemetry: ResMut<SimTelemetry>,
    mut sink: ResMut<EventSinkResource>,
    rides: Query<&Ride>,
    mut drivers: Query<(&mut Driver, &mut Position)>,
) {
    if event.0.kind != EventKind::DropoffArrived {
        return;
    }
    let Some(EventSubject::Ride(ride_entity)) = event.0.subject else {
        return;
    };
    let Ok(ride) = rides.get(ride_entity) else {
        return;
    };

    let fare = ride.fare.unwrap_or(0.0);
    let now = clock.now();
    let wall_ms = clock.wall_timestamp_ms();

    let Ok((mut driver, mut position)) = drivers.get_mut(ride.driver) else {
        return;
    };
    position.0 = ride.request.dropoff_location;
    matching::release(&mut driver);

    let mut request_record = ride.request.clone();
    request_record.estimated_fare = round_to_cents(fare) as f32;
    let driver_update = DriverUpdateRecord {
        driver_id: driver.id.clone(),
        timestamp: wall_ms,
        latitude: position.0.latitude,
        longitude: position.0.longitude,
        status: driver.status,
    };

    info!(
        "request {} completed by driver {}: {:.2} km, fare {:.2}",
        request_record.request_id, driver.id, ride.trip_distance_km, fare
    );
    publish_request_best_effort(sink.0.as_mut(), &mut telemetry, &request_record);
    publish_update_best_effort(sink.0.as_mut(), &mut telemetry, &driver_update);

    telemetry.rides_completed += 1;
    telemetry.completed_rides.push(CompletedRideRecord {
        request_id: request_record.request_id.clone(),
        driver_id: driver.id.clone(),
        requested_at: ride.requested_at,
        matched_at: ride.matched_at,
        pickup_at: ride.pickup_at.unwrap_or(ride.matched_at),
        dropoff_at: now,
        trip_distance_km: ride.trip_distance_km,
        fare,
    });
    commands.entity(ride_entity).despawn();
}
