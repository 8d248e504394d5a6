//! Synthesis of passenger ride requests.
//!
//! Every arrival drawn by the clock turns into a fully populated
//! [`PassengerRequestRecord`]: trip endpoints from the passenger's anchors,
//! a weighted vehicle type, preferences, payment details and the occasional
//! text message. The fare starts at 0.0 and is substituted with the computed
//! fare when the ride completes.

use bevy_ecs::prelude::Resource;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::ecs::Passenger;
use crate::records::{
    MessageSender, MusicPreference, PassengerPreferences, PassengerRequestRecord, PaymentInfo,
    PaymentMethod, TextMessage, VehicleType,
};

const COUPON_PROBABILITY: f64 = 0.15;
const LOYALTY_PROBABILITY: f64 = 0.10;
const PRIOR_RATING_PROBABILITY: f64 = 0.40;
const TEXT_MESSAGE_PROBABILITY: f64 = 0.15;

/// Stand-ins for passenger-to-driver chatter.
const PASSENGER_MESSAGES: &[&str] = &[
    "I'm waiting by the main entrance, black jacket.",
    "Running two minutes late, please wait for me.",
    "Could you pop the trunk? I have a suitcase.",
    "I'm on the corner across from the pharmacy.",
    "Please call when you arrive, the buzzer is broken.",
    "Is it okay if we make a quick stop at an ATM?",
    "I have a small dog in a carrier, hope that's fine.",
    "The pickup pin is slightly off, I'm one block north.",
];

/// Weighted distribution over vehicle types with cumulative-weight sampling.
#[derive(Debug, Clone)]
pub struct VehicleMix {
    entries: Vec<(VehicleType, f64)>,
    cumulative: Vec<f64>,
}

impl VehicleMix {
    pub fn new(entries: Vec<(VehicleType, f64)>) -> Self {
        let mut cumulative = Vec::with_capacity(entries.len());
        let mut total = 0.0;
        for &(_, weight) in &entries {
            total += weight;
            cumulative.push(total);
        }
        Self {
            entries,
            cumulative,
        }
    }

    /// Fleet composition observed in the source data.
    pub fn default_drivers() -> Self {
        Self::new(vec![
            (VehicleType::Economy, 0.80),
            (VehicleType::Luxury, 0.08),
            (VehicleType::Pool, 0.02),
            (VehicleType::Suv, 0.10),
        ])
    }

    /// What passengers ask for; economy dominates.
    pub fn default_requests() -> Self {
        Self::new(vec![
            (VehicleType::Economy, 0.75),
            (VehicleType::Luxury, 0.10),
            (VehicleType::Pool, 0.05),
            (VehicleType::Suv, 0.10),
        ])
    }

    pub fn entries(&self) -> &[(VehicleType, f64)] {
        &self.entries
    }

    /// Empty mixes, negative weights and all-zero weights are rejected at
    /// scenario build time.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.entries.is_empty() {
            return Err("vehicle mix has no entries");
        }
        if self.entries.iter().any(|&(_, weight)| weight < 0.0) {
            return Err("vehicle mix has a negative weight");
        }
        let total = self.cumulative.last().copied().unwrap_or(0.0);
        if total <= 0.0 {
            return Err("vehicle mix weights sum to zero");
        }
        Ok(())
    }

    pub fn sample<R: Rng>(&self, rng: &mut R) -> VehicleType {
        let total = self
            .cumulative
            .last()
            .copied()
            .expect("vehicle mix validated non-empty");
        let r = rng.gen_range(0.0..total);
        let idx = self
            .cumulative
            .partition_point(|&w| w <= r)
            .min(self.entries.len() - 1);
        self.entries[idx].0
    }
}

/// Builds ride requests from passenger anchors. Owns its RNG so request
/// content is reproducible under a fixed scenario seed.
#[derive(Debug, Resource)]
pub struct RequestGenerator {
    rng: StdRng,
    request_mix: VehicleMix,
}

impl RequestGenerator {
    pub fn new(request_mix: VehicleMix, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng, request_mix }
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Create a request for `passenger`, stamped with the wall-clock
    /// timestamp of the current simulated instant.
    pub fn next_request(&mut self, passenger: &Passenger, wall_ms: i64) -> PassengerRequestRecord {
        let (pickup, dropoff) = if self.rng.gen_bool(0.5) {
            (passenger.home, passenger.work)
        } else {
            (passenger.work, passenger.home)
        };

        let preferences = PassengerPreferences {
            music: *MusicPreference::ALL
                .choose(&mut self.rng)
                .expect("non-empty choices"),
            temperature: self.rng.gen_range(18..=26),
            quiet_ride: self.rng.gen_bool(0.5),
        };

        let coupon_codes = if self.rng.gen_bool(COUPON_PROBABILITY) {
            vec![format!("SAVE{}", self.rng.gen_range(10..=50))]
        } else {
            Vec::new()
        };
        let payment_info = PaymentInfo {
            payment_method: *PaymentMethod::ALL
                .choose(&mut self.rng)
                .expect("non-empty choices"),
            coupon_codes,
            loyalty_points_used: if self.rng.gen_bool(LOYALTY_PROBABILITY) {
                Some(self.rng.gen_range(0..=100))
            } else {
                None
            },
        };

        let text_messages = if self.rng.gen_bool(TEXT_MESSAGE_PROBABILITY) {
            let content = *PASSENGER_MESSAGES
                .choose(&mut self.rng)
                .expect("non-empty choices");
            vec![TextMessage {
                message_id: format!("MSG-{}-{}", wall_ms / 1000, self.rng.gen_range(1000..=9999)),
                sender: MessageSender::Passenger,
                content: content.to_string(),
                sent_at: wall_ms,
            }]
        } else {
            Vec::new()
        };

        let driver_rating = if self.rng.gen_bool(PRIOR_RATING_PROBABILITY) {
            let rating: f64 = self.rng.gen_range(1.0..5.0);
            Some(((rating * 10.0).round() / 10.0) as f32)
        } else {
            None
        };

        PassengerRequestRecord {
            request_id: format!("REQ-{}-{}", wall_ms / 1000, self.rng.gen_range(1000..=9999)),
            passenger_id: passenger.id.clone(),
            timestamp: wall_ms,
            pickup_location: pickup,
            dropoff_location: dropoff,
            vehicle_type: self.request_mix.sample(&mut self.rng),
            passenger_preferences: preferences,
            payment_info,
            estimated_fare: 0.0,
            text_messages,
            driver_rating,
        }
    }
}
