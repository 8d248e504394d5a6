use std::time::Duration;

use tempfile::tempdir;

use sim_core::scenario::ScenarioParams;
use sim_datagen::{run_generation, GenerateOptions, OutputFormats};

#[test]
fn a_flat_out_run_writes_all_output_files() {
    let dir = tempdir().expect("tempdir");
    let params = ScenarioParams::default()
        .with_seed(42)
        .with_rosters(10, 20)
        .with_duration_minutes(10)
        .with_epoch_ms(1_700_000_000_000);

    let summary = run_generation(GenerateOptions {
        params,
        out_dir: dir.path().to_path_buf(),
        tick_interval: Duration::ZERO,
        formats: OutputFormats::default(),
        csv_sample_rows: 100,
        show_progress: false,
    })
    .expect("generation run");

    assert_eq!(summary.heartbeats_emitted, 10 * 10);
    assert_eq!(
        summary.requests_generated,
        summary.requests_matched + summary.requests_abandoned
    );
    assert_eq!(summary.sink_publish_failures, 0);

    for name in [
        "passenger_requests.jsonl",
        "driver_updates.jsonl",
        "passenger_requests.parquet",
        "driver_updates.parquet",
        "sample_passenger_requests.csv",
        "sample_driver_updates.csv",
    ] {
        assert!(dir.path().join(name).exists(), "{name} should exist");
    }
    // Heartbeats guarantee the driver update streams carry data.
    for name in [
        "driver_updates.jsonl",
        "driver_updates.parquet",
        "sample_driver_updates.csv",
    ] {
        let len = dir.path().join(name).metadata().expect("metadata").len();
        assert!(len > 0, "{name} should not be empty");
    }
}

#[test]
fn invalid_scenarios_are_rejected_before_any_output() {
    let dir = tempdir().expect("tempdir");
    let params = ScenarioParams::default().with_rosters(0, 20);

    let result = run_generation(GenerateOptions {
        params,
        out_dir: dir.path().to_path_buf(),
        tick_interval: Duration::ZERO,
        formats: OutputFormats {
            json: false,
            parquet: true,
            csv_sample: false,
        },
        csv_sample_rows: 100,
        show_progress: false,
    });

    let error = result.expect_err("empty driver roster must be rejected");
    assert!(error.to_string().contains("driver roster"));
    // The parquet sink buffers in memory and never flushed.
    assert!(!dir.path().join("passenger_requests.parquet").exists());
}
