//! Matching attempts for pending requests, bounded by each request's wait
//! budget. No eligible driver is a normal outcome, not an error: the request
//! polls again after the configured interval and is abandoned once the
//! deadline passes, emitting nothing.

use bevy_ecs::prelude::{Commands, Entity, Query, Res, ResMut};
use log::{debug, info};

use crate::clock::{CurrentEvent, EventKind, EventSubject, SimulationClock};
use crate::demand::DemandPricingModel;
use crate::ecs::{Driver, MatchDeadline, Position, Ride, RideRequest};
use crate::geo::distance_km;
use crate::matching::{self, MatchPolicy};
use crate::pricing::SpeedModel;
use crate::telemetry::SimTelemetry;

pub fn try_match_system(
    mut commands: Commands,
    mut clock: ResMut<SimulationClock>,
    event: Res<CurrentEvent>,
    policy: Res<MatchPolicy>,
    demand: Res<DemandPricingModel>,
    speed: Res<SpeedModel>,
    mut telemetry: ResMut<SimTelemetry>,
    requests: Query<(&RideRequest, &MatchDeadline)>,
    mut drivers: Query<(Entity, &mut Driver, &Position)>,
) {
    if event.0.kind != EventKind::TryMatch {
        return;
    }
    let Some(EventSubject::Request(request_entity)) = event.0.subject else {
        return;
    };
    // Already matched or abandoned; a stale retry is a no-op.
    let Ok((request, deadline)) = requests.get(request_entity) else {
        return;
    };

    let pickup = request.record.pickup_location;
    let vehicle_type = request.record.vehicle_type;

    match matching::try_claim_closest(&mut drivers, pickup, vehicle_type) {
        Some(driver_entity) => {
            let (_, driver, driver_position) = drivers
                .get(driver_entity)
                .expect("claimed driver must exist");
            info!(
                "driver {} ({vehicle_type:?}) assigned to request {}",
                driver.id, request.record.request_id
            );

            let approach_km = distance_km(driver_position.0, pickup);
            let approach_ms =
                speed.travel_duration_ms(approach_km, demand.current().speed_factor);

            let ride_entity = commands
                .spawn(Ride {
                    request: request.record.clone(),
                    driver: driver_entity,
                    requested_at: request.requested_at,
                    matched_at: clock.now(),
                    pickup_at: None,
                    trip_distance_km: 0.0,
                    fare: None,
                })
                .id();
            clock.schedule_in(
                approach_ms,
                EventKind::PickupArrived,
                Some(EventSubject::Ride(ride_entity)),
            );
            commands.entity(request_entity).despawn();
            telemetry.requests_matched += 1;
        }
        None => {
            if clock.now() >= deadline.expires_at_ms {
                info!(
                    "request {} abandoned: no {vehicle_type:?} driver within wait budget",
                    request.record.request_id
                );
                telemetry.requests_abandoned += 1;
                commands.entity(request_entity).despawn();
            } else {
                debug!(
                    "request {}: no {vehicle_type:?} driver available, polling again",
                    request.record.request_id
                );
                clock.schedule_in(
                    policy.poll_interval_ms,
                    EventKind::TryMatch,
                    Some(EventSubject::Request(request_entity)),
                );
            }
        }
    }
}
