//! Orchestrates one paced generation run: build the world, install the
//! sinks, drain the simulation, flush.

use std::fs;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{anyhow, bail};
use bevy_ecs::prelude::World;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;

use sim_core::clock::EventKind;
use sim_core::runner::{initialize_simulation, run_until_empty_with_hook, simulation_schedule};
use sim_core::scenario::{build_scenario, ScenarioParams};
use sim_core::sink::{EventSink, EventSinkResource};
use sim_core::telemetry::SimTelemetry;

use crate::export::{CsvSampleSink, JsonLinesSink, MultiSink, ParquetSink};

/// Hard cap on processed events, as a runaway guard only.
const MAX_STEPS: usize = 100_000_000;

#[derive(Debug, Clone, Copy)]
pub struct OutputFormats {
    pub json: bool,
    pub parquet: bool,
    pub csv_sample: bool,
}

impl Default for OutputFormats {
    fn default() -> Self {
        Self {
            json: true,
            parquet: true,
            csv_sample: true,
        }
    }
}

#[derive(Debug)]
pub struct GenerateOptions {
    pub params: ScenarioParams,
    pub out_dir: PathBuf,
    /// Wall-clock pause after each simulated minute; zero runs flat out.
    pub tick_interval: Duration,
    pub formats: OutputFormats,
    /// Rows captured in each CSV sample file.
    pub csv_sample_rows: usize,
    pub show_progress: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationSummary {
    pub requests_generated: u64,
    pub requests_matched: u64,
    pub requests_abandoned: u64,
    pub rides_completed: u64,
    pub heartbeats_emitted: u64,
    pub sink_publish_failures: u64,
}

pub fn run_generation(options: GenerateOptions) -> anyhow::Result<GenerationSummary> {
    fs::create_dir_all(&options.out_dir)?;

    let mut sinks: Vec<Box<dyn EventSink>> = Vec::new();
    if options.formats.json {
        sinks.push(Box::new(
            JsonLinesSink::create(&options.out_dir)
                .map_err(|error| anyhow!("failed to create JSON sink: {error}"))?,
        ));
    }
    if options.formats.parquet {
        sinks.push(Box::new(ParquetSink::new(&options.out_dir)));
    }
    if options.formats.csv_sample {
        sinks.push(Box::new(
            CsvSampleSink::create(&options.out_dir, options.csv_sample_rows)
                .map_err(|error| anyhow!("failed to create CSV sample sink: {error}"))?,
        ));
    }
    if sinks.is_empty() {
        bail!("no output formats selected");
    }

    let duration_minutes = options.params.duration_minutes;
    let mut world = World::new();
    world.insert_resource(EventSinkResource(Box::new(MultiSink::new(sinks))));
    build_scenario(&mut world, options.params)?;
    initialize_simulation(&mut world);

    let progress = if options.show_progress {
        let bar = ProgressBar::new(duration_minutes);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] minute {pos}/{len} ({eta})")
                .expect("valid progress template")
                .progress_chars("#>-"),
        );
        Some(bar)
    } else {
        None
    };

    let mut schedule = simulation_schedule();
    let steps = run_until_empty_with_hook(&mut world, &mut schedule, MAX_STEPS, |_, event| {
        if event.kind == EventKind::MinuteTick {
            if let Some(ref bar) = progress {
                bar.inc(1);
            }
            if !options.tick_interval.is_zero() {
                thread::sleep(options.tick_interval);
            }
        }
    });
    if let Some(ref bar) = progress {
        bar.finish_with_message("drained");
    }
    info!("generation finished after {steps} events");

    let mut sink = world
        .remove_resource::<EventSinkResource>()
        .expect("sink resource installed above");
    sink.0
        .flush()
        .map_err(|error| anyhow!("failed to flush sinks: {error}"))?;

    let telemetry = world.resource::<SimTelemetry>();
    Ok(GenerationSummary {
        requests_generated: telemetry.requests_generated,
        requests_matched: telemetry.requests_matched,
        requests_abandoned: telemetry.requests_abandoned,
        rides_completed: telemetry.rides_completed,
        heartbeats_emitted: telemetry.heartbeats_emitted,
        sink_publish_failures: telemetry.sink_publish_failures,
    })
}
