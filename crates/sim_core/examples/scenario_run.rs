//! Run a small scenario to completion and print what came out of it.
//!
//! ```sh
//! cargo run -p sim_core --example scenario_run
//! ```

use bevy_ecs::prelude::World;

use sim_core::runner::{initialize_simulation, run_until_empty, simulation_schedule};
use sim_core::scenario::{build_scenario, ScenarioParams};
use sim_core::sink::{CollectingSink, EventSinkResource};
use sim_core::telemetry::SimTelemetry;

fn main() {
    let mut world = World::new();
    let sink = CollectingSink::new();
    world.insert_resource(EventSinkResource(Box::new(sink.clone())));

    let params = ScenarioParams::default()
        .with_seed(42)
        .with_rosters(50, 120)
        .with_duration_minutes(90);
    build_scenario(&mut world, params).expect("valid scenario");
    initialize_simulation(&mut world);

    let mut schedule = simulation_schedule();
    let steps = run_until_empty(&mut world, &mut schedule, 1_000_000);

    let telemetry = world.resource::<SimTelemetry>();
    println!("steps processed:     {steps}");
    println!("requests generated:  {}", telemetry.requests_generated);
    println!("requests matched:    {}", telemetry.requests_matched);
    println!("requests abandoned:  {}", telemetry.requests_abandoned);
    println!("rides completed:     {}", telemetry.rides_completed);
    println!("heartbeats emitted:  {}", telemetry.heartbeats_emitted);

    if let Some(record) = sink.requests().first() {
        println!("\nfirst passenger request record:");
        println!("  request_id:   {}", record.request_id);
        println!("  passenger_id: {}", record.passenger_id);
        println!("  vehicle_type: {:?}", record.vehicle_type);
        println!("  fare:         {:.2}", record.estimated_fare);
    }
}
