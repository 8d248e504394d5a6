//! Wire-format records emitted to the external sink.
//!
//! These mirror the downstream consumer's schema: a `PassengerRequestRecord`
//! per completed ride and a `DriverUpdateRecord` per completion and per
//! heartbeat. Enum variants serialize to the upper-case symbols the schema
//! registry expects (`ECONOMY`, `ON_RIDE`, ...).

use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehicleType {
    Economy,
    Standard,
    Luxury,
    Pool,
    Suv,
    Electric,
}

impl VehicleType {
    pub const ALL: [VehicleType; 6] = [
        VehicleType::Economy,
        VehicleType::Standard,
        VehicleType::Luxury,
        VehicleType::Pool,
        VehicleType::Suv,
        VehicleType::Electric,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DriverStatus {
    Available,
    Unavailable,
    OnRide,
    Offline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MusicPreference {
    NoPreference,
    Pop,
    Rock,
    Classical,
    Jazz,
    HipHop,
}

impl MusicPreference {
    pub const ALL: [MusicPreference; 6] = [
        MusicPreference::NoPreference,
        MusicPreference::Pop,
        MusicPreference::Rock,
        MusicPreference::Classical,
        MusicPreference::Jazz,
        MusicPreference::HipHop,
    ];
}

impl Default for MusicPreference {
    fn default() -> Self {
        MusicPreference::NoPreference
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Cash,
    CreditCard,
    DebitCard,
    Paypal,
    ApplePay,
    GooglePay,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 6] = [
        PaymentMethod::Cash,
        PaymentMethod::CreditCard,
        PaymentMethod::DebitCard,
        PaymentMethod::Paypal,
        PaymentMethod::ApplePay,
        PaymentMethod::GooglePay,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageSender {
    Driver,
    Passenger,
    System,
}

/// In-car preferences attached to a ride request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassengerPreferences {
    pub music: MusicPreference,
    /// Desired in-car temperature in Celsius.
    pub temperature: i32,
    /// Passenger wants minimal conversation.
    pub quiet_ride: bool,
}

impl Default for PassengerPreferences {
    fn default() -> Self {
        Self {
            music: MusicPreference::NoPreference,
            temperature: 22,
            quiet_ride: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentInfo {
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub coupon_codes: Vec<String>,
    #[serde(default)]
    pub loyalty_points_used: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextMessage {
    pub message_id: String,
    pub sender: MessageSender,
    pub content: String,
    /// Epoch milliseconds when the message was sent.
    pub sent_at: i64,
}

/// A passenger's ride request, emitted once the ride completes with
/// `estimated_fare` replaced by the fare actually charged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassengerRequestRecord {
    pub request_id: String,
    pub passenger_id: String,
    /// Epoch milliseconds when the request was created.
    pub timestamp: i64,
    pub pickup_location: GeoPoint,
    pub dropoff_location: GeoPoint,
    pub vehicle_type: VehicleType,
    pub passenger_preferences: PassengerPreferences,
    pub payment_info: PaymentInfo,
    pub estimated_fare: f32,
    #[serde(default)]
    pub text_messages: Vec<TextMessage>,
    /// Rating the passenger gave on a previous ride, if any.
    #[serde(default)]
    pub driver_rating: Option<f32>,
}

/// A driver's availability/position update: emitted per completed ride and
/// once per simulated minute for every driver (heartbeat telemetry).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverUpdateRecord {
    pub driver_id: String,
    /// Epoch milliseconds when the update occurred.
    pub timestamp: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub status: DriverStatus,
}
