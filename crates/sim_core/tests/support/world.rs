#![allow(dead_code)]

use bevy_ecs::prelude::World;
use sim_core::clock::{SimulationClock, ONE_MIN_MS};
use sim_core::demand::{DemandConfig, DemandPricingModel};
use sim_core::matching::MatchPolicy;
use sim_core::pricing::{PricingConfig, SpeedModel};
use sim_core::request::{RequestGenerator, VehicleMix};
use sim_core::scenario::{RequestRateScale, SimulationEndTimeMs};
use sim_core::sink::{CollectingSink, EventSinkResource};
use sim_core::telemetry::SimTelemetry;
use sim_core::test_helpers::no_churn;
use sim_core::workforce::{WorkforceConfig, WorkforceModel};

/// Builder configuration for reproducible test worlds.
#[derive(Clone, Debug)]
pub struct TestWorldConfig {
    pub seed: u64,
    pub match_policy: MatchPolicy,
    pub demand: DemandConfig,
    pub workforce: WorkforceConfig,
    pub pricing: PricingConfig,
    pub base_speed_kmh: f64,
    pub request_rate_scale: f64,
    pub duration_minutes: u64,
}

impl Default for TestWorldConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            match_policy: MatchPolicy::default(),
            demand: DemandConfig::default(),
            workforce: no_churn(),
            pricing: PricingConfig::default(),
            base_speed_kmh: 30.0,
            request_rate_scale: 0.5,
            duration_minutes: 60,
        }
    }
}

/// Helper that populates the ECS world with all shared resources used in
/// integration tests, wired to a [`CollectingSink`] the test keeps a handle
/// to.
#[derive(Debug, Default)]
pub struct TestWorldBuilder {
    config: TestWorldConfig,
}

impl TestWorldBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the RNG seed used by all deterministically seeded helpers.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Override the matching poll interval and wait budget.
    pub fn with_match_policy(mut self, policy: MatchPolicy) -> Self {
        self.config.match_policy = policy;
        self
    }

    /// Override the workforce churn configuration (defaults to no churn).
    pub fn with_workforce(mut self, workforce: WorkforceConfig) -> Self {
        self.config.workforce = workforce;
        self
    }

    /// Override the demand model configuration.
    pub fn with_demand(mut self, demand: DemandConfig) -> Self {
        self.config.demand = demand;
        self
    }

    /// Set the free-flow speed used for travel-time computation.
    pub fn with_base_speed(mut self, base_speed_kmh: f64) -> Self {
        self.config.base_speed_kmh = base_speed_kmh;
        self
    }

    /// Scale for per-tick request arrivals (0.0 disables arrivals).
    pub fn with_request_rate_scale(mut self, scale: f64) -> Self {
        self.config.request_rate_scale = scale;
        self
    }

    /// How many simulated minutes of ticks to generate.
    pub fn with_duration_minutes(mut self, minutes: u64) -> Self {
        self.config.duration_minutes = minutes;
        self
    }

    /// Build the ECS world and return it with the collecting sink handle.
    pub fn build(self) -> (World, CollectingSink) {
        let TestWorldConfig {
            seed,
            match_policy,
            demand,
            workforce,
            pricing,
            base_speed_kmh,
            request_rate_scale,
            duration_minutes,
        } = self.config;

        let mut world = World::new();
        let sink = CollectingSink::new();
        world.insert_resource(SimulationClock::default());
        world.insert_resource(SimTelemetry::default());
        world.insert_resource(DemandPricingModel::new(demand, Some(seed)));
        world.insert_resource(WorkforceModel::new(
            workforce,
            Some(seed.wrapping_add(0xdead_beef)),
        ));
        world.insert_resource(pricing);
        world.insert_resource(SpeedModel::new(base_speed_kmh));
        world.insert_resource(match_policy);
        world.insert_resource(RequestRateScale(request_rate_scale));
        world.insert_resource(SimulationEndTimeMs(duration_minutes * ONE_MIN_MS));
        world.insert_resource(RequestGenerator::new(
            VehicleMix::default_requests(),
            Some(seed.wrapping_add(0x0071_1073)),
        ));
        world.insert_resource(EventSinkResource(Box::new(sink.clone())));
        (world, sink)
    }
}
