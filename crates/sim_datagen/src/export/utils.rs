//! Shared helpers for the export sinks: arrow field constructors, enum
//! symbol names and record-batch writing.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::ArrayRef;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use sim_core::records::{DriverStatus, MusicPreference, PaymentMethod, VehicleType};
use sim_core::sink::SinkError;

pub(crate) fn utf8_field(name: &str) -> Field {
    Field::new(name, DataType::Utf8, false)
}

pub(crate) fn i64_field(name: &str) -> Field {
    Field::new(name, DataType::Int64, false)
}

pub(crate) fn f64_field(name: &str) -> Field {
    Field::new(name, DataType::Float64, false)
}

pub(crate) fn f32_field(name: &str) -> Field {
    Field::new(name, DataType::Float32, false)
}

pub(crate) fn i32_field(name: &str) -> Field {
    Field::new(name, DataType::Int32, false)
}

pub(crate) fn bool_field(name: &str) -> Field {
    Field::new(name, DataType::Boolean, false)
}

pub(crate) fn nullable_i32_field(name: &str) -> Field {
    Field::new(name, DataType::Int32, true)
}

pub(crate) fn nullable_f32_field(name: &str) -> Field {
    Field::new(name, DataType::Float32, true)
}

pub(crate) fn write_record_batch<P: AsRef<Path>>(
    path: P,
    schema: Schema,
    arrays: Vec<ArrayRef>,
) -> Result<(), SinkError> {
    let schema = Arc::new(schema);
    let batch = RecordBatch::try_new(schema.clone(), arrays)?;
    let file = File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

pub(crate) fn vehicle_type_str(value: VehicleType) -> &'static str {
    match value {
        VehicleType::Economy => "ECONOMY",
        VehicleType::Standard => "STANDARD",
        VehicleType::Luxury => "LUXURY",
        VehicleType::Pool => "POOL",
        VehicleType::Suv => "SUV",
        VehicleType::Electric => "ELECTRIC",
    }
}

pub(crate) fn driver_status_str(value: DriverStatus) -> &'static str {
    match value {
        DriverStatus::Available => "AVAILABLE",
        DriverStatus::Unavailable => "UNAVAILABLE",
        DriverStatus::OnRide => "ON_RIDE",
        DriverStatus::Offline => "OFFLINE",
    }
}

pub(crate) fn music_str(value: MusicPreference) -> &'static str {
    match value {
        MusicPreference::NoPreference => "NO_PREFERENCE",
        MusicPreference::Pop => "POP",
        MusicPreference::Rock => "ROCK",
        MusicPreference::Classical => "CLASSICAL",
        MusicPreference::Jazz => "JAZZ",
        MusicPreference::HipHop => "HIP_HOP",
    }
}

pub(crate) fn payment_method_str(value: PaymentMethod) -> &'static str {
    match value {
        PaymentMethod::Cash => "CASH",
        PaymentMethod::CreditCard => "CREDIT_CARD",
        PaymentMethod::DebitCard => "DEBIT_CARD",
        PaymentMethod::Paypal => "PAYPAL",
        PaymentMethod::ApplePay => "APPLE_PAY",
        PaymentMethod::GooglePay => "GOOGLE_PAY",
    }
}
