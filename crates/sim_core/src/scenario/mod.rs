mod build;
mod params;

pub use build::{build_scenario, ScenarioError};
pub use params::{RequestRateScale, ScenarioParams, SimulationEndTimeMs};
