//! The per-minute clock tick: demand refresh, workforce churn, heartbeat
//! telemetry and new passenger arrivals.

use bevy_ecs::prelude::{Commands, Query, Res, ResMut};
use log::debug;
use rand::seq::IteratorRandom;

use crate::clock::{hour_of_day, CurrentEvent, EventKind, EventSubject, SimulationClock, ONE_MIN_MS};
use crate::demand::DemandPricingModel;
use crate::ecs::{Driver, MatchDeadline, Passenger, Position, RideRequest};
use crate::matching::MatchPolicy;
use crate::records::DriverUpdateRecord;
use crate::request::RequestGenerator;
use crate::scenario::{RequestRateScale, SimulationEndTimeMs};
use crate::sink::{publish_update_best_effort, EventSinkResource};
use crate::telemetry::SimTelemetry;
use crate::workforce::WorkforceModel;

#[allow(clippy::too_many_arguments)]
pub fn minute_tick_system(
    mut commands: Commands,
    mut clock: ResMut<SimulationClock>,
    event: Res<CurrentEvent>,
    mut demand: ResMut<DemandPricingModel>,
    mut workforce: ResMut<WorkforceModel>,
    mut generator: ResMut<RequestGenerator>,
    policy: Res<MatchPolicy>,
    rate_scale: Res<RequestRateScale>,
    end_time: Res<SimulationEndTimeMs>,
    mut telemetry: ResMut<SimTelemetry>,
    mut sink: ResMut<EventSinkResource>,
    mut drivers: Query<(&mut Driver, &Position)>,
    passengers: Query<&Passenger>,
) {
    if event.0.kind != EventKind::MinuteTick {
        return;
    }

    let now = clock.now();
    let hour = hour_of_day(now);
    demand.resample(now);

    // Workforce churn first, so this minute's heartbeats report the
    // post-churn statuses.
    for (mut driver, _) in drivers.iter_mut() {
        let next = workforce.step(hour, driver.status);
        if next != driver.status {
            debug!("driver {} churned {:?} -> {:?}", driver.id, driver.status, next);
            driver.status = next;
        }
    }

    let wall_ms = clock.wall_timestamp_ms();
    for (driver, position) in drivers.iter() {
        let heartbeat = DriverUpdateRecord {
            driver_id: driver.id.clone(),
            timestamp: wall_ms,
            latitude: position.0.latitude,
            longitude: position.0.longitude,
            status: driver.status,
        };
        publish_update_best_effort(sink.0.as_mut(), &mut telemetry, &heartbeat);
        telemetry.heartbeats_emitted += 1;
    }

    // New arrivals: requests come in at a scaled-down arrival rate, each
    // from a randomly chosen passenger. The demand model is resampled once
    // more per request so every request sees multipliers current as of its
    // own processing.
    let arrivals = demand.sample_arrivals(rate_scale.0);
    debug!("minute {}: {arrivals} new ride request(s)", now / ONE_MIN_MS);
    for _ in 0..arrivals {
        let Some(passenger) = passengers.iter().choose(generator.rng()) else {
            continue;
        };
        demand.resample(now);
        let record = generator.next_request(passenger, wall_ms);
        let wait_ms = policy.sample_wait_ms(generator.rng());
        let request_entity = commands
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
        clock.schedule_at(
            now,
            EventKind::TryMatch,
            Some(EventSubject::Request(request_entity)),
        );
        telemetry.requests_generated += 1;
    }

    if now + ONE_MIN_MS <= end_time.0 {
        clock.schedule_in(ONE_MIN_MS, EventKind::MinuteTick, None);
    }
}
