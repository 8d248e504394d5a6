use bevy_ecs::prelude::{Res, ResMut};
use log::info;

use crate::clock::{CurrentEvent, EventKind, SimulationClock, ONE_MIN_MS};
use crate::scenario::SimulationEndTimeMs;

/// Kicks off the tick chain: the first minute tick fires one simulated
/// minute after start, matching the source model where minute zero only
/// initializes the rosters.
pub fn simulation_started_system(
    mut clock: ResMut<SimulationClock>,
    event: Res<CurrentEvent>,
    end_time: Res<SimulationEndTimeMs>,
) {
    if event.0.kind != EventKind::SimulationStarted {
        return;
    }

    info!(
        "simulation started, running {} simulated minutes",
        end_time.0 / ONE_MIN_MS
    );
    if ONE_MIN_MS <= end_time.0 {
        clock.schedule_in(ONE_MIN_MS, EventKind::MinuteTick, None);
    }
}
