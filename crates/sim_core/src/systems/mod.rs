pub mod dropoff_arrived;
pub mod minute_tick;
pub mod pickup_arrived;
pub mod simulation_started;
pub mod try_match;
