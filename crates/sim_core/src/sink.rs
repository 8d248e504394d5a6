//! The external event sink: where completed rides and heartbeats go.
//!
//! The simulation's only delivery contract is "publish each record exactly
//! once, best effort": a failing sink is logged and counted, never retried,
//! and never rolls back simulation state.

use std::error::Error;
use std::sync::{Arc, Mutex};

use bevy_ecs::prelude::Resource;
use log::warn;

use crate::records::{DriverUpdateRecord, PassengerRequestRecord};
use crate::telemetry::SimTelemetry;

pub type SinkError = Box<dyn Error + Send + Sync>;

/// Destination for the two output record streams. Implementations include
/// file writers and message-queue producers; [`CollectingSink`] keeps
/// everything in memory for tests.
pub trait EventSink: Send + Sync {
    fn publish_request(&mut self, record: &PassengerRequestRecord) -> Result<(), SinkError>;

    fn publish_driver_update(&mut self, record: &DriverUpdateRecord) -> Result<(), SinkError>;

    /// Finish any buffered output. Called once after the simulation drains.
    fn flush(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

#[derive(Resource)]
pub struct EventSinkResource(pub Box<dyn EventSink>);

/// Publish a passenger request record, treating failure as non-fatal.
pub fn publish_request_best_effort(
    sink: &mut dyn EventSink,
    telemetry: &mut SimTelemetry,
    record: &PassengerRequestRecord,
) {
    if let Err(error) = sink.publish_request(record) {
        telemetry.sink_publish_failures += 1;
        warn!(
            "failed to publish passenger request {}: {error}",
            record.request_id
        );
    }
}

/// Publish a driver update record, treating failure as non-fatal.
pub fn publish_update_best_effort(
    sink: &mut dyn EventSink,
    telemetry: &mut SimTelemetry,
    record: &DriverUpdateRecord,
) {
    if let Err(error) = sink.publish_driver_update(record) {
        telemetry.sink_publish_failures += 1;
        warn!(
            "failed to publish driver update for {}: {error}",
            record.driver_id
        );
    }
}

/// In-memory sink with shared handles, so a test can keep a clone and read
/// back what the simulation published.
#[derive(Debug, Default, Clone)]
pub struct CollectingSink {
    requests: Arc<Mutex<Vec<PassengerRequestRecord>>>,
    updates: Arc<Mutex<Vec<DriverUpdateRecord>>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> Vec<PassengerRequestRecord> {
        self.requests.lock().expect("collector lock").clone()
    }

    pub fn updates(&self) -> Vec<DriverUpdateRecord> {
        self.updates.lock().expect("collector lock").clone()
    }
}

impl EventSink for CollectingSink {
    fn publish_request(&mut self, record: &PassengerRequestRecord) -> Result<(), SinkError> {
        self.requests
            .lock()
            .expect("collector lock")
            .push(record.clone());
        Ok(())
    }

    fn publish_driver_update(&mut self, record: &DriverUpdateRecord) -> Result<(), SinkError> {
        self.updates
            .lock()
            .expect("collector lock")
            .push(record.clone());
        Ok(())
    }
}
