//! Event sinks: where generated records land on disk.

mod csv;
mod json;
mod parquet;
mod utils;

pub use csv::CsvSampleSink;
pub use json::JsonLinesSink;
pub use parquet::ParquetSink;

use sim_core::records::{DriverUpdateRecord, PassengerRequestRecord};
use sim_core::sink::{EventSink, SinkError};

/// Fan-out sink: forwards every record to all inner sinks. All sinks see
/// every record even when one of them fails; the first error is reported.
pub struct MultiSink {
    sinks: Vec<Box<dyn EventSink>>,
}

impl MultiSink {
    pub fn new(sinks: Vec<Box<dyn EventSink>>) -> Self {
        Self { sinks }
    }
}

impl EventSink for MultiSink {
    fn publish_request(&mut self, record: &PassengerRequestRecord) -> Result<(), SinkError> {
        let mut first_error = None;
        for sink in &mut self.sinks {
            if let Err(error) = sink.publish_request(record) {
                first_error.get_or_insert(error);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    fn publish_driver_update(&mut self, record: &DriverUpdateRecord) -> Result<(), SinkError> {
        let mut first_error = None;
        for sink in &mut self.sinks {
            if let Err(error) = sink.publish_driver_update(record) {
                first_error.get_or_insert(error);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        let mut first_error = None;
        for sink in &mut self.sinks {
            if let Err(error) = sink.flush() {
                first_error.get_or_insert(error);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}
