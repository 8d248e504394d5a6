//! Fare and travel-time arithmetic.

use bevy_ecs::prelude::Resource;

use crate::clock::ONE_SEC_MS;

/// Fare parameters, applied before the surge multipliers.
#[derive(Debug, Clone, Copy, Resource)]
pub struct PricingConfig {
    /// Base fare in currency units.
    pub base_fare: f64,
    /// Per-kilometer rate in currency units.
    pub per_km_rate: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            base_fare: 2.50,
            per_km_rate: 1.50,
        }
    }
}

/// Fare for a trip:
/// `(base_fare + per_km_rate * distance) * pricing_multiplier * demand_multiplier`.
pub fn trip_fare(
    config: PricingConfig,
    distance_km: f64,
    pricing_multiplier: f64,
    demand_multiplier: f64,
) -> f64 {
    (config.base_fare + config.per_km_rate * distance_km) * pricing_multiplier * demand_multiplier
}

/// Round a fare to cents for emission on the wire.
pub fn round_to_cents(fare: f64) -> f64 {
    (fare * 100.0).round() / 100.0
}

/// Converts distances to simulated travel time at the configured free-flow
/// speed, slowed by the demand model's current speed factor.
#[derive(Debug, Clone, Copy, Resource)]
pub struct SpeedModel {
    pub base_speed_kmh: f64,
}

impl Default for SpeedModel {
    fn default() -> Self {
        Self {
            base_speed_kmh: 30.0,
        }
    }
}

impl SpeedModel {
    pub fn new(base_speed_kmh: f64) -> Self {
        Self { base_speed_kmh }
    }

    /// Simulated milliseconds to cover `distance_km` at
    /// `base_speed_kmh * speed_factor`.
    pub fn travel_duration_ms(&self, distance_km: f64, speed_factor: f64) -> u64 {
        let hours = distance_km / (self.base_speed_kmh * speed_factor);
        (hours * 3600.0 * ONE_SEC_MS as f64) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fare_matches_formula() {
        let config = PricingConfig::default();
        let fare = trip_fare(config, 4.0, 1.2, 1.2);
        let expected = (2.50 + 1.50 * 4.0) * 1.2 * 1.2;
        assert!((fare - expected).abs() < 1e-9);
    }

    #[test]
    fn fare_is_non_negative_for_non_negative_inputs() {
        let config = PricingConfig::default();
        for &distance in &[0.0, 0.5, 3.0, 42.0] {
            for &multiplier in &[1.0, 1.5, 4.0] {
                assert!(trip_fare(config, distance, multiplier, multiplier) >= 0.0);
            }
        }
    }

    #[test]
    fn zero_distance_trip_still_charges_base_fare() {
        let config = PricingConfig::default();
        let fare = trip_fare(config, 0.0, 1.0, 1.0);
        assert!((fare - config.base_fare).abs() < 1e-9);
    }

    #[test]
    fn rounding_keeps_two_decimals() {
        assert_eq!(round_to_cents(12.3456), 12.35);
        assert_eq!(round_to_cents(2.5), 2.5);
    }

    #[test]
    fn travel_duration_scales_with_speed_factor() {
        let model = SpeedModel::new(30.0);
        // 30 km at 30 km/h is one hour of simulated time.
        assert_eq!(model.travel_duration_ms(30.0, 1.0), 3_600_000);
        // A 0.5 speed factor doubles it.
        assert_eq!(model.travel_duration_ms(30.0, 0.5), 7_200_000);
    }

    #[test]
    fn zero_distance_travels_instantly() {
        let model = SpeedModel::default();
        assert_eq!(model.travel_duration_ms(0.0, 1.0), 0);
    }
}
