use bevy_ecs::prelude::World;

use sim_core::clock::SimulationClock;
use sim_core::demand::DemandPricingModel;
use sim_core::matching::MatchPolicy;
use sim_core::pricing::{PricingConfig, SpeedModel};
use sim_core::request::RequestGenerator;
use sim_core::runner::{initialize_simulation, run_until_empty, simulation_schedule};
use sim_core::scenario::{build_scenario, ScenarioParams, SimulationEndTimeMs};
use sim_core::sink::{CollectingSink, EventSinkResource};
use sim_core::telemetry::SimTelemetry;
use sim_core::workforce::WorkforceModel;

#[test]
fn build_inserts_every_simulation_resource() {
    let mut world = World::new();
    let params = ScenarioParams::default()
        .with_seed(1)
        .with_rosters(5, 5)
        .with_epoch_ms(1_700_000_000_000);
    build_scenario(&mut world, params).expect("valid scenario");

    assert!(world.contains_resource::<SimulationClock>());
    assert!(world.contains_resource::<DemandPricingModel>());
    assert!(world.contains_resource::<WorkforceModel>());
    assert!(world.contains_resource::<PricingConfig>());
    assert!(world.contains_resource::<SpeedModel>());
    assert!(world.contains_resource::<MatchPolicy>());
    assert!(world.contains_resource::<RequestGenerator>());
    assert!(world.contains_resource::<SimTelemetry>());
    assert!(world.contains_resource::<SimulationEndTimeMs>());
    // A default collecting sink is installed when the caller brought none.
    assert!(world.contains_resource::<EventSinkResource>());

    assert_eq!(world.resource::<SimulationClock>().epoch_ms(), 1_700_000_000_000);
    assert_eq!(world.resource::<SimulationEndTimeMs>().0, 60 * 60 * 1000);
}

#[test]
fn a_caller_installed_sink_is_kept() {
    let mut world = World::new();
    let sink = CollectingSink::new();
    world.insert_resource(EventSinkResource(Box::new(sink.clone())));

    let params = ScenarioParams::default()
        .with_seed(5)
        .with_rosters(3, 3)
        .with_duration_minutes(2);
    build_scenario(&mut world, params).expect("valid scenario");
    initialize_simulation(&mut world);

    let mut schedule = simulation_schedule();
    run_until_empty(&mut world, &mut schedule, 10_000);

    // Heartbeats landed in the sink the caller installed.
    assert_eq!(sink.updates().len() as u64, {
        let telemetry = world.resource::<SimTelemetry>();
        telemetry.heartbeats_emitted + telemetry.rides_completed
    });
    assert!(!sink.updates().is_empty());
}
