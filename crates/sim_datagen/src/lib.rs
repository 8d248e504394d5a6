//! Data-generation harness for the ride-hailing simulation.
//!
//! `sim_core` produces the event streams; this crate decides where they go
//! (JSON Lines, Parquet, CSV samples) and paces a generation run against
//! wall-clock time.

pub mod export;
pub mod generate;

pub use export::{CsvSampleSink, JsonLinesSink, MultiSink, ParquetSink};
pub use generate::{run_generation, GenerateOptions, GenerationSummary, OutputFormats};
