//! Workforce churn: drivers drift between serving and off-duty states with
//! time-of-day dependent probabilities, evaluated once per simulated minute.

use bevy_ecs::prelude::Resource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::records::DriverStatus;

/// Per-minute transition probabilities for one time-of-day band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChurnRates {
    /// AVAILABLE or ON_RIDE -> OFFLINE.
    pub offline_probability: f64,
    /// OFFLINE -> AVAILABLE.
    pub online_probability: f64,
}

#[derive(Debug, Clone)]
pub struct WorkforceConfig {
    /// Hour < 6 or hour >= 22.
    pub overnight: ChurnRates,
    /// 6 <= hour < 10.
    pub morning: ChurnRates,
    /// Everything else.
    pub daytime: ChurnRates,
}

impl Default for WorkforceConfig {
    fn default() -> Self {
        Self {
            overnight: ChurnRates {
                offline_probability: 0.03,
                online_probability: 0.005,
            },
            morning: ChurnRates {
                offline_probability: 0.01,
                online_probability: 0.02,
            },
            daytime: ChurnRates {
                offline_probability: 0.015,
                online_probability: 0.01,
            },
        }
    }
}

impl WorkforceConfig {
    pub fn rates_for_hour(&self, hour: u32) -> ChurnRates {
        if hour < 6 || hour >= 22 {
            self.overnight
        } else if hour < 10 {
            self.morning
        } else {
            self.daytime
        }
    }
}

#[derive(Debug, Resource)]
pub struct WorkforceModel {
    config: WorkforceConfig,
    rng: StdRng,
}

impl WorkforceModel {
    pub fn new(config: WorkforceConfig, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { config, rng }
    }

    pub fn config(&self) -> &WorkforceConfig {
        &self.config
    }

    /// One churn evaluation for one driver. UNAVAILABLE is a manual/external
    /// marking and is never touched by churn.
    pub fn step(&mut self, hour: u32, status: DriverStatus) -> DriverStatus {
        let rates = self.config.rates_for_hour(hour);
        match status {
            DriverStatus::Available | DriverStatus::OnRide => {
                if self.rng.gen_bool(rates.offline_probability) {
                    DriverStatus::Offline
                } else {
                    status
                }
            }
            DriverStatus::Offline => {
                if self.rng.gen_bool(rates.online_probability) {
                    DriverStatus::Available
                } else {
                    status
                }
            }
            DriverStatus::Unavailable => status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn always_offline() -> WorkforceConfig {
        let rates = ChurnRates {
            offline_probability: 1.0,
            online_probability: 0.0,
        };
        WorkforceConfig {
            overnight: rates,
            morning: rates,
            daytime: rates,
        }
    }

    #[test]
    fn default_bands_match_time_of_day() {
        let config = WorkforceConfig::default();
        assert_eq!(config.rates_for_hour(3), config.overnight);
        assert_eq!(config.rates_for_hour(23), config.overnight);
        assert_eq!(config.rates_for_hour(7), config.morning);
        assert_eq!(config.rates_for_hour(14), config.daytime);
    }

    #[test]
    fn certain_churn_offlines_serving_drivers() {
        let mut model = WorkforceModel::new(always_offline(), Some(1));
        assert_eq!(
            model.step(12, DriverStatus::Available),
            DriverStatus::Offline
        );
        assert_eq!(model.step(12, DriverStatus::OnRide), DriverStatus::Offline);
    }

    #[test]
    fn certain_return_brings_offline_drivers_back() {
        let rates = ChurnRates {
            offline_probability: 0.0,
            online_probability: 1.0,
        };
        let config = WorkforceConfig {
            overnight: rates,
            morning: rates,
            daytime: rates,
        };
        let mut model = WorkforceModel::new(config, Some(1));
        assert_eq!(
            model.step(12, DriverStatus::Offline),
            DriverStatus::Available
        );
    }

    #[test]
    fn unavailable_is_never_churned() {
        let mut model = WorkforceModel::new(always_offline(), Some(1));
        assert_eq!(
            model.step(12, DriverStatus::Unavailable),
            DriverStatus::Unavailable
        );
    }
}
