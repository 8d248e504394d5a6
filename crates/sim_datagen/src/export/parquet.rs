use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{
    ArrayRef, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::Schema;

use sim_core::records::{DriverUpdateRecord, PassengerRequestRecord};
use sim_core::sink::{EventSink, SinkError};

use super::utils::{
    bool_field, driver_status_str, f32_field, f64_field, i32_field, i64_field, music_str,
    nullable_f32_field, nullable_i32_field, payment_method_str, utf8_field, vehicle_type_str,
    write_record_batch,
};

pub const PASSENGER_REQUESTS_PARQUET: &str = "passenger_requests.parquet";
pub const DRIVER_UPDATES_PARQUET: &str = "driver_updates.parquet";

/// Buffers records in memory and writes one Parquet file per record stream
/// on flush. Nested sequences are carried as strings: coupon codes joined
/// with `;`, text messages JSON-encoded.
pub struct ParquetSink {
    out_dir: PathBuf,
    requests: Vec<PassengerRequestRecord>,
    updates: Vec<DriverUpdateRecord>,
}

impl ParquetSink {
    pub fn new<P: AsRef<Path>>(out_dir: P) -> Self {
        Self {
            out_dir: out_dir.as_ref().to_path_buf(),
            requests: Vec::new(),
            updates: Vec::new(),
        }
    }

    fn write_requests(&self) -> Result<(), SinkError> {
        let rows = &self.requests;
        let mut text_messages_json = Vec::with_capacity(rows.len());
        for record in rows {
            text_messages_json.push(serde_json::to_string(&record.text_messages)?);
        }

        let schema = Schema::new(vec![
            utf8_field("request_id"),
            utf8_field("passenger_id"),
            i64_field("timestamp"),
            f64_field("pickup_latitude"),
            f64_field("pickup_longitude"),
            f64_field("dropoff_latitude"),
            f64_field("dropoff_longitude"),
            utf8_field("vehicle_type"),
            utf8_field("music"),
            i32_field("temperature"),
            bool_field("quiet_ride"),
            utf8_field("payment_method"),
            utf8_field("coupon_codes"),
            nullable_i32_field("loyalty_points_used"),
            f32_field("estimated_fare"),
            utf8_field("text_messages"),
            nullable_f32_field("driver_rating"),
        ]);

        let arrays: Vec<ArrayRef> = vec![
            Arc::new(StringArray::from(
                rows.iter().map(|r| r.request_id.clone()).collect::<Vec<_>>(),
            )),
            Arc::new(StringArray::from(
                rows.iter()
                    .map(|r| r.passenger_id.clone())
                    .collect::<Vec<_>>(),
            )),
            Arc::new(Int64Array::from(
                rows.iter().map(|r| r.timestamp).collect::<Vec<_>>(),
            )),
            Arc::new(Float64Array::from(
                rows.iter()
                    .map(|r| r.pickup_location.latitude)
                    .collect::<Vec<_>>(),
            )),
            Arc::new(Float64Array::from(
                rows.iter()
                    .map(|r| r.pickup_location.longitude)
                    .collect::<Vec<_>>(),
            )),
            Arc::new(Float64Array::from(
                rows.iter()
                    .map(|r| r.dropoff_location.latitude)
                    .collect::<Vec<_>>(),
            )),
            Arc::new(Float64Array::from(
                rows.iter()
                    .map(|r| r.dropoff_location.longitude)
                    .collect::<Vec<_>>(),
            )),
            Arc::new(StringArray::from(
                rows.iter()
                    .map(|r| vehicle_type_str(r.vehicle_type))
                    .collect::<Vec<_>>(),
            )),
            Arc::new(StringArray::from(
                rows.iter()
                    .map(|r| music_str(r.passenger_preferences.music))
                    .collect::<Vec<_>>(),
            )),
            Arc::new(Int32Array::from(
                rows.iter()
                    .map(|r| r.passenger_preferences.temperature)
                    .collect::<Vec<_>>(),
            )),
            Arc::new(BooleanArray::from(
                rows.iter()
                    .map(|r| r.passenger_preferences.quiet_ride)
                    .collect::<Vec<_>>(),
            )),
            Arc::new(StringArray::from(
                rows.iter()
                    .map(|r| payment_method_str(r.payment_info.payment_method))
                    .collect::<Vec<_>>(),
            )),
            Arc::new(StringArray::from(
                rows.iter()
                    .map(|r| r.payment_info.coupon_codes.join(";"))
                    .collect::<Vec<_>>(),
            )),
            Arc::new(Int32Array::from(
                rows.iter()
                    .map(|r| r.payment_info.loyalty_points_used)
                    .collect::<Vec<_>>(),
            )),
            Arc::new(Float32Array::from(
                rows.iter().map(|r| r.estimated_fare).collect::<Vec<_>>(),
            )),
            Arc::new(StringArray::from(text_messages_json)),
            Arc::new(Float32Array::from(
                rows.iter().map(|r| r.driver_rating).collect::<Vec<_>>(),
            )),
        ];

        write_record_batch(
            self.out_dir.join(PASSENGER_REQUESTS_PARQUET),
            schema,
            arrays,
        )
    }

    fn write_updates(&self) -> Result<(), SinkError> {
        let rows = &self.updates;
        let schema = Schema::new(vec![
            utf8_field("driver_id"),
            i64_field("timestamp"),
            f64_field("latitude"),
            f64_field("longitude"),
            utf8_field("status"),
        ]);

        let arrays: Vec<ArrayRef> = vec![
            Arc::new(StringArray::from(
                rows.iter().map(|r| r.driver_id.clone()).collect::<Vec<_>>(),
            )),
            Arc::new(Int64Array::from(
                rows.iter().map(|r| r.timestamp).collect::<Vec<_>>(),
            )),
            Arc::new(Float64Array::from(
                rows.iter().map(|r| r.latitude).collect::<Vec<_>>(),
            )),
            Arc::new(Float64Array::from(
                rows.iter().map(|r| r.longitude).collect::<Vec<_>>(),
            )),
            Arc::new(StringArray::from(
                rows.iter()
                    .map(|r| driver_status_str(r.status))
                    .collect::<Vec<_>>(),
            )),
        ];

        write_record_batch(self.out_dir.join(DRIVER_UPDATES_PARQUET), schema, arrays)
    }
}

impl EventSink for ParquetSink {
    fn publish_request(&mut self, record: &PassengerRequestRecord) -> Result<(), SinkError> {
        self.requests.push(record.clone());
        Ok(())
    }

    fn publish_driver_update(&mut self, record: &DriverUpdateRecord) -> Result<(), SinkError> {
        self.updates.push(record.clone());
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        self.write_requests()?;
        self.write_updates()?;
        Ok(())
    }
}
