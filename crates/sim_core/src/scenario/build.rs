use std::error::Error;
use std::fmt;

use bevy_ecs::prelude::World;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::clock::{SimulationClock, ONE_MIN_MS};
use crate::demand::DemandPricingModel;
use crate::ecs::{Driver, Passenger, Position};
use crate::geo::GeoPoint;
use crate::records::DriverStatus;
use crate::request::RequestGenerator;
use crate::scenario::params::{RequestRateScale, ScenarioParams, SimulationEndTimeMs};
use crate::sink::{CollectingSink, EventSinkResource};
use crate::telemetry::SimTelemetry;
use crate::workforce::WorkforceModel;

/// Configuration rejected at startup. The simulation never starts in an
/// inconsistent state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScenarioError {
    EmptyDriverRoster,
    EmptyPassengerRoster,
    InvalidCityRadius,
    InvalidBaseSpeed,
    InvalidAvailabilityProbability,
    InvalidDuration,
    InvalidRequestRateScale,
    InvalidDemandConfig(&'static str),
    InvalidWorkforceConfig(&'static str),
    InvalidPricingConfig(&'static str),
    InvalidMatchPolicy(&'static str),
    InvalidDriverMix(&'static str),
    InvalidRequestMix(&'static str),
}

impl fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioError::EmptyDriverRoster => write!(f, "driver roster must not be empty"),
            ScenarioError::EmptyPassengerRoster => write!(f, "passenger roster must not be empty"),
            ScenarioError::InvalidCityRadius => write!(f, "city radius must be positive"),
            ScenarioError::InvalidBaseSpeed => write!(f, "base speed must be positive"),
            ScenarioError::InvalidAvailabilityProbability => {
                write!(f, "availability probability must be within [0, 1]")
            }
            ScenarioError::InvalidDuration => {
                write!(f, "simulation must run for at least one minute")
            }
            ScenarioError::InvalidRequestRateScale => {
                write!(f, "request rate scale must be non-negative")
            }
            ScenarioError::InvalidDemandConfig(detail) => write!(f, "demand config: {detail}"),
            ScenarioError::InvalidWorkforceConfig(detail) => {
                write!(f, "workforce config: {detail}")
            }
            ScenarioError::InvalidPricingConfig(detail) => write!(f, "pricing config: {detail}"),
            ScenarioError::InvalidMatchPolicy(detail) => write!(f, "match policy: {detail}"),
            ScenarioError::InvalidDriverMix(detail) => write!(f, "driver vehicle mix: {detail}"),
            ScenarioError::InvalidRequestMix(detail) => {
                write!(f, "request vehicle mix: {detail}")
            }
        }
    }
}

impl Error for ScenarioError {}

fn validate(params: &ScenarioParams) -> Result<(), ScenarioError> {
    if params.num_drivers == 0 {
        return Err(ScenarioError::EmptyDriverRoster);
    }
    if params.num_passengers == 0 {
        return Err(ScenarioError::EmptyPassengerRoster);
    }
    if !(params.city_radius_km > 0.0) {
        return Err(ScenarioError::InvalidCityRadius);
    }
    if !(params.base_speed_kmh > 0.0) {
        return Err(ScenarioError::InvalidBaseSpeed);
    }
    if !(0.0..=1.0).contains(&params.availability_probability) {
        return Err(ScenarioError::InvalidAvailabilityProbability);
    }
    if params.duration_minutes == 0 {
        return Err(ScenarioError::InvalidDuration);
    }
    if !(params.request_rate_scale >= 0.0) {
        return Err(ScenarioError::InvalidRequestRateScale);
    }

    let demand = &params.demand;
    if !(demand.rush_arrival_rate > 0.0) || !(demand.offpeak_arrival_rate > 0.0) {
        return Err(ScenarioError::InvalidDemandConfig(
            "arrival rates must be positive",
        ));
    }
    if !(demand.rush_speed_factor > 0.0) || !(demand.offpeak_speed_factor > 0.0) {
        return Err(ScenarioError::InvalidDemandConfig(
            "speed factors must be positive",
        ));
    }
    for window in &demand.rush_windows {
        if window.start >= window.end || window.end > 24 {
            return Err(ScenarioError::InvalidDemandConfig(
                "rush-hour windows must satisfy start < end <= 24",
            ));
        }
    }

    for rates in [
        params.workforce.overnight,
        params.workforce.morning,
        params.workforce.daytime,
    ] {
        if !(0.0..=1.0).contains(&rates.offline_probability)
            || !(0.0..=1.0).contains(&rates.online_probability)
        {
            return Err(ScenarioError::InvalidWorkforceConfig(
                "churn probabilities must be within [0, 1]",
            ));
        }
    }

    if params.pricing.base_fare < 0.0 || params.pricing.per_km_rate < 0.0 {
        return Err(ScenarioError::InvalidPricingConfig(
            "fare rates must be non-negative",
        ));
    }

    let policy = &params.match_policy;
    if policy.poll_interval_ms == 0 {
        return Err(ScenarioError::InvalidMatchPolicy(
            "poll interval must be positive",
        ));
    }
    if policy.min_wait_ms > policy.max_wait_ms {
        return Err(ScenarioError::InvalidMatchPolicy(
            "min wait must not exceed max wait",
        ));
    }

    params
        .driver_mix
        .validate()
        .map_err(ScenarioError::InvalidDriverMix)?;
    params
        .request_mix
        .validate()
        .map_err(ScenarioError::InvalidRequestMix)?;

    Ok(())
}

/// A point uniformly placed within `radius_km / 100` degrees of the center
/// on both axes.
fn random_point_near<R: Rng>(rng: &mut R, center: GeoPoint, radius_km: f64) -> GeoPoint {
    let spread = radius_km / 100.0;
    GeoPoint::new(
        center.latitude + rng.gen_range(-spread..spread),
        center.longitude + rng.gen_range(-spread..spread),
    )
}

/// Validates the parameters, inserts every simulation resource and spawns
/// the initial driver and passenger rosters. A [`CollectingSink`] is used
/// unless the caller installed a sink beforehand.
pub fn build_scenario(world: &mut World, params: ScenarioParams) -> Result<(), ScenarioError> {
    validate(&params)?;

    let mut clock = SimulationClock::default();
    clock.set_epoch_ms(params.epoch_ms.unwrap_or(0));
    world.insert_resource(clock);

    let seed = params.seed;
    world.insert_resource(DemandPricingModel::new(
        params.demand.clone(),
        seed.map(|s| s.wrapping_add(0xcafe_babe)),
    ));
    world.insert_resource(WorkforceModel::new(
        params.workforce.clone(),
        seed.map(|s| s.wrapping_add(0xdead_beef)),
    ));
    world.insert_resource(RequestGenerator::new(
        params.request_mix.clone(),
        seed.map(|s| s.wrapping_add(0x0071_1073)),
    ));
    world.insert_resource(params.pricing);
    world.insert_resource(crate::pricing::SpeedModel::new(params.base_speed_kmh));
    world.insert_resource(params.match_policy);
    world.insert_resource(RequestRateScale(params.request_rate_scale));
    world.insert_resource(SimulationEndTimeMs(params.duration_minutes * ONE_MIN_MS));
    world.insert_resource(SimTelemetry::default());
    if !world.contains_resource::<EventSinkResource>() {
        world.insert_resource(EventSinkResource(Box::new(CollectingSink::new())));
    }

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    for i in 0..params.num_drivers {
        let position = random_point_near(&mut rng, params.city_center, params.city_radius_km);
        let status = if rng.gen_bool(params.availability_probability) {
            DriverStatus::Available
        } else {
            DriverStatus::Offline
        };
        world.spawn((
            Driver {
                id: format!("D{i:05}"),
                vehicle_type: params.driver_mix.sample(&mut rng),
                status,
            },
            Position(position),
        ));
    }

    for i in 0..params.num_passengers {
        world.spawn(Passenger {
            id: format!("P{i:05}"),
            home: random_point_near(&mut rng, params.city_center, params.city_radius_km),
            work: random_point_near(&mut rng, params.city_center, params.city_radius_km),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::MatchPolicy;
    use crate::request::VehicleMix;

    #[test]
    fn empty_driver_roster_is_rejected() {
        let mut world = World::new();
        let params = ScenarioParams {
            num_drivers: 0,
            ..ScenarioParams::default()
        };
        assert_eq!(
            build_scenario(&mut world, params),
            Err(ScenarioError::EmptyDriverRoster)
        );
    }

    #[test]
    fn malformed_vehicle_mix_is_rejected() {
        let mut world = World::new();
        let params = ScenarioParams {
            request_mix: VehicleMix::new(vec![]),
            ..ScenarioParams::default()
        };
        assert!(matches!(
            build_scenario(&mut world, params),
            Err(ScenarioError::InvalidRequestMix(_))
        ));
    }

    #[test]
    fn inverted_wait_window_is_rejected() {
        let mut world = World::new();
        let params = ScenarioParams::default().with_match_policy(MatchPolicy {
            poll_interval_ms: 1000,
            min_wait_ms: 10_000,
            max_wait_ms: 5_000,
        });
        assert!(matches!(
            build_scenario(&mut world, params),
            Err(ScenarioError::InvalidMatchPolicy(_))
        ));
    }

    #[test]
    fn builds_rosters_of_the_requested_size() {
        let mut world = World::new();
        let params = ScenarioParams::default()
            .with_seed(42)
            .with_rosters(25, 40);
        build_scenario(&mut world, params).expect("scenario");

        let drivers = world.query::<&Driver>().iter(&world).count();
        let passengers = world.query::<&Passenger>().iter(&world).count();
        assert_eq!(drivers, 25);
        assert_eq!(passengers, 40);
    }

    #[test]
    fn drivers_start_available_or_offline_only() {
        let mut world = World::new();
        let params = ScenarioParams::default().with_seed(7).with_rosters(50, 10);
        build_scenario(&mut world, params).expect("scenario");

        for driver in world.query::<&Driver>().iter(&world) {
            assert!(
                driver.status == DriverStatus::Available
                    || driver.status == DriverStatus::Offline
            );
        }
    }

    #[test]
    fn same_seed_builds_identical_rosters() {
        let build = |seed| {
            let mut world = World::new();
            let params = ScenarioParams::default().with_seed(seed).with_rosters(30, 5);
            build_scenario(&mut world, params).expect("scenario");
            world
                .query::<&Driver>()
                .iter(&world)
                .map(|d| (d.id.clone(), d.vehicle_type, d.status))
                .collect::<Vec<_>>()
        };
        assert_eq!(build(99), build(99));
    }

    #[test]
    fn spawned_positions_stay_near_the_center() {
        let mut world = World::new();
        let center = GeoPoint::new(40.0, -74.0);
        let params = ScenarioParams::default()
            .with_seed(3)
            .with_city(center, 15.0)
            .with_rosters(40, 10);
        build_scenario(&mut world, params).expect("scenario");

        for position in world.query::<&Position>().iter(&world) {
            assert!((position.0.latitude - center.latitude).abs() <= 0.15);
            assert!((position.0.longitude - center.longitude).abs() <= 0.15);
        }
    }
}
