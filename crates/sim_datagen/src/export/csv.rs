use std::fs::File;
use std::path::Path;

use sim_core::records::{DriverUpdateRecord, PassengerRequestRecord};
use sim_core::sink::{EventSink, SinkError};

use super::utils::{driver_status_str, music_str, payment_method_str, vehicle_type_str};

pub const SAMPLE_PASSENGER_REQUESTS_CSV: &str = "sample_passenger_requests.csv";
pub const SAMPLE_DRIVER_UPDATES_CSV: &str = "sample_driver_updates.csv";

/// Captures the first N records of each stream as flattened CSV rows, for
/// eyeballing a run without parquet tooling.
pub struct CsvSampleSink {
    requests: csv::Writer<File>,
    updates: csv::Writer<File>,
    limit: usize,
    request_rows: usize,
    update_rows: usize,
}

impl CsvSampleSink {
    pub fn create<P: AsRef<Path>>(out_dir: P, limit: usize) -> Result<Self, SinkError> {
        let out_dir = out_dir.as_ref();
        let mut requests = csv::Writer::from_path(out_dir.join(SAMPLE_PASSENGER_REQUESTS_CSV))?;
        requests.write_record([
            "request_id",
            "passenger_id",
            "timestamp",
            "pickup_latitude",
            "pickup_longitude",
            "dropoff_latitude",
            "dropoff_longitude",
            "vehicle_type",
            "music",
            "temperature",
            "quiet_ride",
            "payment_method",
            "coupon_codes",
            "loyalty_points_used",
            "estimated_fare",
            "text_message_count",
            "driver_rating",
        ])?;

        let mut updates = csv::Writer::from_path(out_dir.join(SAMPLE_DRIVER_UPDATES_CSV))?;
        updates.write_record(["driver_id", "timestamp", "latitude", "longitude", "status"])?;

        Ok(Self {
            requests,
            updates,
            limit,
            request_rows: 0,
            update_rows: 0,
        })
    }
}

impl EventSink for CsvSampleSink {
    fn publish_request(&mut self, record: &PassengerRequestRecord) -> Result<(), SinkError> {
        if self.request_rows >= self.limit {
            return Ok(());
        }
        self.request_rows += 1;
        let row = [
            record.request_id.clone(),
            record.passenger_id.clone(),
            record.timestamp.to_string(),
            record.pickup_location.latitude.to_string(),
            record.pickup_location.longitude.to_string(),
            record.dropoff_location.latitude.to_string(),
            record.dropoff_location.longitude.to_string(),
            vehicle_type_str(record.vehicle_type).to_string(),
            music_str(record.passenger_preferences.music).to_string(),
            record.passenger_preferences.temperature.to_string(),
            record.passenger_preferences.quiet_ride.to_string(),
            payment_method_str(record.payment_info.payment_method).to_string(),
            record.payment_info.coupon_codes.join(";"),
            record
                .payment_info
                .loyalty_points_used
                .map(|points| points.to_string())
                .unwrap_or_default(),
            record.estimated_fare.to_string(),
            record.text_messages.len().to_string(),
            record
                .driver_rating
                .map(|rating| rating.to_string())
                .unwrap_or_default(),
        ];
        self.requests.write_record(&row)?;
        Ok(())
    }

    fn publish_driver_update(&mut self, record: &DriverUpdateRecord) -> Result<(), SinkError> {
        if self.update_rows >= self.limit {
            return Ok(());
        }
        self.update_rows += 1;
        let row = [
            record.driver_id.clone(),
            record.timestamp.to_string(),
            record.latitude.to_string(),
            record.longitude.to_string(),
            driver_status_str(record.status).to_string(),
        ];
        self.updates.write_record(&row)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        self.requests.flush()?;
        self.updates.flush()?;
        Ok(())
    }
}
