//! Driver matching: claim the closest available driver of the requested
//! vehicle type, or nothing.
//!
//! The roster is only ever claimed through [`try_claim_closest`] and released
//! through [`release`]; callers never scan driver statuses themselves. The
//! scan-and-flip runs inside a single system with exclusive query access, so
//! it never observes a half-claimed driver and two requests can never claim
//! the same one.

use bevy_ecs::prelude::{Entity, Query, Resource};
use rand::Rng;

use crate::clock::ONE_MIN_MS;
use crate::ecs::{Driver, Position};
use crate::geo::{distance_km, GeoPoint};
use crate::records::{DriverStatus, VehicleType};

/// Matching wait budget. The poll interval and deadline bounds are explicit
/// parameters rather than hard-coded constants.
#[derive(Debug, Clone, Copy, Resource)]
pub struct MatchPolicy {
    /// Delay between successive match attempts for one request.
    pub poll_interval_ms: u64,
    /// Wait budget is drawn uniformly from `[min_wait_ms, max_wait_ms]`.
    pub min_wait_ms: u64,
    pub max_wait_ms: u64,
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            poll_interval_ms: ONE_MIN_MS,
            min_wait_ms: 5 * ONE_MIN_MS,
            max_wait_ms: 10 * ONE_MIN_MS,
        }
    }
}

impl MatchPolicy {
    /// Draw a wait budget for one request.
    pub fn sample_wait_ms<R: Rng>(&self, rng: &mut R) -> u64 {
        rng.gen_range(self.min_wait_ms..=self.max_wait_ms)
    }
}

/// Pick the AVAILABLE driver of `vehicle_type` closest to `pickup` from the
/// given candidates. First scanned wins ties.
pub fn closest_available<'a, I>(
    candidates: I,
    pickup: GeoPoint,
    vehicle_type: VehicleType,
) -> Option<Entity>
where
    I: IntoIterator<Item = (Entity, &'a Driver, &'a Position)>,
{
    let mut closest: Option<(Entity, f64)> = None;
    for (entity, driver, position) in candidates {
        if driver.status != DriverStatus::Available || driver.vehicle_type != vehicle_type {
            continue;
        }
        let distance = distance_km(pickup, position.0);
        // Strict `<` keeps the earlier roster entry on equal distances.
        if closest.map_or(true, |(_, best)| distance < best) {
            closest = Some((entity, distance));
        }
    }
    closest.map(|(entity, _)| entity)
}

/// Scan the roster and atomically claim the closest eligible driver,
/// flipping it to ON_RIDE before returning it.
pub fn try_claim_closest(
    drivers: &mut Query<(Entity, &mut Driver, &Position)>,
    pickup: GeoPoint,
    vehicle_type: VehicleType,
) -> Option<Entity> {
    let entity = closest_available(drivers.iter(), pickup, vehicle_type)?;
    let (_, mut driver, _) = drivers.get_mut(entity).ok()?;
    driver.status = DriverStatus::OnRide;
    Some(entity)
}

/// Return a driver to the available pool after its ride completes.
pub fn release(driver: &mut Driver) {
    driver.status = DriverStatus::Available;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn driver(vehicle_type: VehicleType, status: DriverStatus) -> Driver {
        Driver {
            id: "D00000".to_string(),
            vehicle_type,
            status,
        }
    }

    fn entity(index: u32) -> Entity {
        Entity::from_raw(index)
    }

    #[test]
    fn picks_the_closest_available_driver() {
        let pickup = GeoPoint::new(40.0, -74.0);
        let near = driver(VehicleType::Economy, DriverStatus::Available);
        let near_pos = Position(GeoPoint::new(40.01, -74.0));
        let far = driver(VehicleType::Economy, DriverStatus::Available);
        let far_pos = Position(GeoPoint::new(40.1, -74.0));

        let chosen = closest_available(
            [
                (entity(1), &far, &far_pos),
                (entity(2), &near, &near_pos),
            ],
            pickup,
            VehicleType::Economy,
        );
        assert_eq!(chosen, Some(entity(2)));
    }

    #[test]
    fn ties_go_to_the_first_scanned_driver() {
        let pickup = GeoPoint::new(40.0, -74.0);
        let a = driver(VehicleType::Economy, DriverStatus::Available);
        let b = driver(VehicleType::Economy, DriverStatus::Available);
        let pos = Position(GeoPoint::new(40.02, -74.0));

        let chosen = closest_available(
            [(entity(1), &a, &pos), (entity(2), &b, &pos)],
            pickup,
            VehicleType::Economy,
        );
        assert_eq!(chosen, Some(entity(1)));
    }

    #[test]
    fn skips_busy_offline_and_mismatched_drivers() {
        let pickup = GeoPoint::new(40.0, -74.0);
        let pos = Position(GeoPoint::new(40.0, -74.0));
        let on_ride = driver(VehicleType::Economy, DriverStatus::OnRide);
        let offline = driver(VehicleType::Economy, DriverStatus::Offline);
        let unavailable = driver(VehicleType::Economy, DriverStatus::Unavailable);
        let wrong_type = driver(VehicleType::Luxury, DriverStatus::Available);

        let chosen = closest_available(
            [
                (entity(1), &on_ride, &pos),
                (entity(2), &offline, &pos),
                (entity(3), &unavailable, &pos),
                (entity(4), &wrong_type, &pos),
            ],
            pickup,
            VehicleType::Economy,
        );
        assert_eq!(chosen, None);
    }

    #[test]
    fn match_policy_wait_budget_is_within_bounds() {
        let policy = MatchPolicy::default();
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..100 {
            let wait = policy.sample_wait_ms(&mut rng);
            assert!(wait >= policy.min_wait_ms);
            assert!(wait <= policy.max_wait_ms);
        }
    }

    #[test]
    fn release_restores_available() {
        let mut claimed = driver(VehicleType::Economy, DriverStatus::OnRide);
        release(&mut claimed);
        assert_eq!(claimed.status, DriverStatus::Available);
    }
}
