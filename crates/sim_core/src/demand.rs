//! Demand and pricing model: a time-of-day-conditioned Poisson arrival rate
//! drives a surge multiplier and an effective speed factor.

use bevy_ecs::prelude::Resource;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Poisson};

use crate::clock::hour_of_day;

/// Half-open hour-of-day window: `start <= hour < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourWindow {
    pub start: u32,
    pub end: u32,
}

impl HourWindow {
    pub fn contains(&self, hour: u32) -> bool {
        self.start <= hour && hour < self.end
    }
}

#[derive(Debug, Clone)]
pub struct DemandConfig {
    /// Morning and evening rush windows.
    pub rush_windows: [HourWindow; 2],
    /// Expected requests per simulated minute during rush hours.
    pub rush_arrival_rate: f64,
    /// Expected requests per simulated minute outside rush hours.
    pub offpeak_arrival_rate: f64,
    pub rush_speed_factor: f64,
    pub offpeak_speed_factor: f64,
}

impl Default for DemandConfig {
    fn default() -> Self {
        Self {
            rush_windows: [
                HourWindow { start: 7, end: 9 },
                HourWindow { start: 17, end: 19 },
            ],
            rush_arrival_rate: 10.0,
            offpeak_arrival_rate: 3.0,
            rush_speed_factor: 0.7,
            offpeak_speed_factor: 1.0,
        }
    }
}

/// Output of one model evaluation. `pricing_multiplier` always equals
/// `demand_multiplier`; both floor at 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DemandSnapshot {
    pub demand_multiplier: f64,
    pub pricing_multiplier: f64,
    pub speed_factor: f64,
    pub base_arrival_rate: f64,
}

/// Recomputed once per simulated minute and again for every request
/// processed, so each request sees a model current as of its own
/// processing time.
#[derive(Debug, Resource)]
pub struct DemandPricingModel {
    config: DemandConfig,
    rng: StdRng,
    current: DemandSnapshot,
}

impl DemandPricingModel {
    pub fn new(config: DemandConfig, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let current = DemandSnapshot {
            demand_multiplier: 1.0,
            pricing_multiplier: 1.0,
            speed_factor: config.offpeak_speed_factor,
            base_arrival_rate: config.offpeak_arrival_rate,
        };
        Self {
            config,
            rng,
            current,
        }
    }

    pub fn config(&self) -> &DemandConfig {
        &self.config
    }

    pub fn is_rush_hour(&self, hour: u32) -> bool {
        self.config.rush_windows.iter().any(|w| w.contains(hour))
    }

    /// Draw a fresh Poisson demand sample for the given simulated instant and
    /// update the current snapshot.
    pub fn resample(&mut self, sim_time_ms: u64) -> DemandSnapshot {
        let hour = hour_of_day(sim_time_ms);
        let (rate, speed_factor) = if self.is_rush_hour(hour) {
            (self.config.rush_arrival_rate, self.config.rush_speed_factor)
        } else {
            (
                self.config.offpeak_arrival_rate,
                self.config.offpeak_speed_factor,
            )
        };

        // Rates are validated positive at scenario build time.
        let poisson = Poisson::new(rate).expect("arrival rate must be positive");
        let sample: f64 = poisson.sample(&mut self.rng);
        let demand_multiplier = (1.0 + (sample - rate) / rate).max(1.0);

        self.current = DemandSnapshot {
            demand_multiplier,
            pricing_multiplier: demand_multiplier,
            speed_factor,
            base_arrival_rate: rate,
        };
        self.current
    }

    /// The snapshot from the most recent [`resample`](Self::resample).
    pub fn current(&self) -> DemandSnapshot {
        self.current
    }

    /// Poisson draw with the current base arrival rate scaled by `scale`.
    /// Used for the per-tick arrival count.
    pub fn sample_arrivals(&mut self, scale: f64) -> u64 {
        let lambda = self.current.base_arrival_rate * scale;
        if lambda <= 0.0 {
            return 0;
        }
        let poisson = Poisson::new(lambda).expect("scaled arrival rate must be positive");
        poisson.sample(&mut self.rng) as u64
    }
}
