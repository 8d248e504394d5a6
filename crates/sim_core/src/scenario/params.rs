use bevy_ecs::prelude::Resource;

use crate::demand::DemandConfig;
use crate::geo::GeoPoint;
use crate::matching::MatchPolicy;
use crate::pricing::PricingConfig;
use crate::request::VehicleMix;
use crate::workforce::WorkforceConfig;

/// Default city center: lower Manhattan.
const DEFAULT_CITY_CENTER: GeoPoint = GeoPoint {
    latitude: 40.7128,
    longitude: -74.0060,
};

/// Simulation end time in milliseconds. The tick chain stops scheduling new
/// minutes at this time; in-flight rides still drain afterwards.
#[derive(Debug, Clone, Copy, Resource)]
pub struct SimulationEndTimeMs(pub u64);

/// Scale applied to the demand model's arrival rate when drawing the number
/// of new requests per tick.
#[derive(Debug, Clone, Copy, Resource)]
pub struct RequestRateScale(pub f64);

/// Parameters for building a simulation scenario.
#[derive(Debug, Clone)]
pub struct ScenarioParams {
    pub num_drivers: usize,
    pub num_passengers: usize,
    pub city_center: GeoPoint,
    /// Approximate city radius in kilometers; rosters spawn within
    /// `radius / 100` degrees of the center on both axes.
    pub city_radius_km: f64,
    /// Free-flow travel speed in km/h.
    pub base_speed_kmh: f64,
    /// Probability that a driver starts AVAILABLE (otherwise OFFLINE).
    pub availability_probability: f64,
    /// How many simulated minutes the clock generates ticks for.
    pub duration_minutes: u64,
    /// Real-world epoch (Unix ms) for simulated time 0. If None, 0.
    pub epoch_ms: Option<i64>,
    /// RNG seed; None draws from entropy.
    pub seed: Option<u64>,
    /// Requests per tick are drawn at `base_arrival_rate * request_rate_scale`.
    pub request_rate_scale: f64,
    pub demand: DemandConfig,
    pub workforce: WorkforceConfig,
    pub pricing: PricingConfig,
    pub match_policy: MatchPolicy,
    pub driver_mix: VehicleMix,
    pub request_mix: VehicleMix,
}

impl Default for ScenarioParams {
    fn default() -> Self {
        Self {
            num_drivers: 350,
            num_passengers: 650,
            city_center: DEFAULT_CITY_CENTER,
            city_radius_km: 15.0,
            base_speed_kmh: 30.0,
            availability_probability: 0.7,
            duration_minutes: 60,
            epoch_ms: None,
            seed: None,
            request_rate_scale: 0.5,
            demand: DemandConfig::default(),
            workforce: WorkforceConfig::default(),
            pricing: PricingConfig::default(),
            match_policy: MatchPolicy::default(),
            driver_mix: VehicleMix::default_drivers(),
            request_mix: VehicleMix::default_requests(),
        }
    }
}

impl ScenarioParams {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_city(mut self, center: GeoPoint, radius_km: f64) -> Self {
        self.city_center = center;
        self.city_radius_km = radius_km;
        self
    }

    pub fn with_rosters(mut self, num_drivers: usize, num_passengers: usize) -> Self {
        self.num_drivers = num_drivers;
        self.num_passengers = num_passengers;
        self
    }

    pub fn with_duration_minutes(mut self, minutes: u64) -> Self {
        self.duration_minutes = minutes;
        self
    }

    /// Set the epoch in milliseconds (real-world time for simulated time 0).
    pub fn with_epoch_ms(mut self, epoch_ms: i64) -> Self {
        self.epoch_ms = Some(epoch_ms);
        self
    }

    pub fn with_match_policy(mut self, match_policy: MatchPolicy) -> Self {
        self.match_policy = match_policy;
        self
    }

    pub fn with_pricing(mut self, pricing: PricingConfig) -> Self {
        self.pricing = pricing;
        self
    }
}
