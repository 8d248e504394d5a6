//! Test helpers for common test setup and utilities.
//!
//! This module provides shared test utilities to reduce duplication across
//! test files.

use bevy_ecs::prelude::{Entity, World};

use crate::clock::SimulationClock;
use crate::demand::{DemandConfig, DemandPricingModel};
use crate::ecs::{Driver, Passenger, Position};
use crate::geo::GeoPoint;
use crate::matching::MatchPolicy;
use crate::pricing::{PricingConfig, SpeedModel};
use crate::records::{DriverStatus, VehicleType};
use crate::request::{RequestGenerator, VehicleMix};
use crate::scenario::{RequestRateScale, SimulationEndTimeMs};
use crate::sink::{CollectingSink, EventSink, EventSinkResource, SinkError};
use crate::telemetry::SimTelemetry;
use crate::workforce::{ChurnRates, WorkforceConfig, WorkforceModel};

/// A standard test city center used across test files for consistency.
pub fn test_center() -> GeoPoint {
    GeoPoint::new(40.0, -74.0)
}

/// Workforce config with churn disabled, so tests control statuses exactly.
pub fn no_churn() -> WorkforceConfig {
    let frozen = ChurnRates {
        offline_probability: 0.0,
        online_probability: 0.0,
    };
    WorkforceConfig {
        overnight: frozen,
        morning: frozen,
        daytime: frozen,
    }
}

/// Create a minimal test world with every resource the systems expect, a
/// fixed seed and a [`CollectingSink`]. Returns the sink handle for
/// asserting on published records. For full scenarios use
/// [`crate::scenario::build_scenario`].
pub fn create_test_world() -> (World, CollectingSink) {
    let mut world = World::new();
    let sink = CollectingSink::new();
    world.insert_resource(SimulationClock::default());
    world.insert_resource(SimTelemetry::default());
    world.insert_resource(DemandPricingModel::new(DemandConfig::default(), Some(1)));
    world.insert_resource(WorkforceModel::new(no_churn(), Some(1)));
    world.insert_resource(PricingConfig::default());
    world.insert_resource(SpeedModel::new(30.0));
    world.insert_resource(MatchPolicy::default());
    world.insert_resource(RequestRateScale(0.5));
    world.insert_resource(SimulationEndTimeMs(60 * crate::clock::ONE_MIN_MS));
    world.insert_resource(RequestGenerator::new(
        VehicleMix::default_requests(),
        Some(1),
    ));
    world.insert_resource(EventSinkResource(Box::new(sink.clone())));
    (world, sink)
}

/// Spawn a driver at the given position.
pub fn spawn_driver(
    world: &mut World,
    id: &str,
    vehicle_type: VehicleType,
    status: DriverStatus,
    position: GeoPoint,
) -> Entity {
    world
        .spawn((
            Driver {
                id: id.to_string(),
                vehicle_type,
                status,
            },
            Position(position),
        ))
        .id()
}

/// Spawn a passenger with home and work anchors.
pub fn spawn_passenger(world: &mut World, id: &str, home: GeoPoint, work: GeoPoint) -> Entity {
    world
        .spawn(Passenger {
            id: id.to_string(),
            home,
            work,
        })
        .id()
}

/// A sink that rejects every record, for exercising the best-effort
/// delivery contract.
#[derive(Debug, Default, Clone)]
pub struct FailingSink;

impl EventSink for FailingSink {
    fn publish_request(
        &mut self,
        _record: &crate::records::PassengerRequestRecord,
    ) -> Result<(), SinkError> {
        Err("sink unavailable".into())
    }

    fn publish_driver_update(
        &mut self,
        _record: &crate::records::DriverUpdateRecord,
    ) -> Result<(), SinkError> {
        Err("sink unavailable".into())
    }
}
