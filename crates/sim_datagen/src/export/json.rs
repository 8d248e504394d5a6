use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use sim_core::records::{DriverUpdateRecord, PassengerRequestRecord};
use sim_core::sink::{EventSink, SinkError};

pub const PASSENGER_REQUESTS_JSONL: &str = "passenger_requests.jsonl";
pub const DRIVER_UPDATES_JSONL: &str = "driver_updates.jsonl";

/// Streams both record types to JSON Lines files, one JSON object per line.
pub struct JsonLinesSink {
    requests: BufWriter<File>,
    updates: BufWriter<File>,
}

impl JsonLinesSink {
    /// Create `passenger_requests.jsonl` and `driver_updates.jsonl` in
    /// `out_dir`, truncating existing files.
    pub fn create<P: AsRef<Path>>(out_dir: P) -> Result<Self, SinkError> {
        let out_dir = out_dir.as_ref();
        let requests = BufWriter::new(File::create(out_dir.join(PASSENGER_REQUESTS_JSONL))?);
        let updates = BufWriter::new(File::create(out_dir.join(DRIVER_UPDATES_JSONL))?);
        Ok(Self { requests, updates })
    }
}

impl EventSink for JsonLinesSink {
    fn publish_request(&mut self, record: &PassengerRequestRecord) -> Result<(), SinkError> {
        serde_json::to_writer(&mut self.requests, record)?;
        self.requests.write_all(b"\n")?;
        Ok(())
    }

    fn publish_driver_update(&mut self, record: &DriverUpdateRecord) -> Result<(), SinkError> {
        serde_json::to_writer(&mut self.updates, record)?;
        self.updates.write_all(b"\n")?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        self.requests.flush()?;
        self.updates.flush()?;
        Ok(())
    }
}
