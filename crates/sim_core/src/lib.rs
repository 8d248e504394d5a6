pub mod clock;
pub mod demand;
pub mod ecs;
pub mod geo;
pub mod matching;
pub mod pricing;
pub mod records;
pub mod request;
pub mod runner;
pub mod scenario;
pub mod sink;
pub mod systems;
pub mod telemetry;
pub mod workforce;

#[cfg(feature = "test-helpers")]
pub mod test_helpers;
