use std::cmp::Ordering;
use std::collections::BinaryHeap;

use bevy_ecs::prelude::{Entity, Resource};

pub const ONE_SEC_MS: u64 = 1000;
pub const ONE_MIN_MS: u64 = 60 * ONE_SEC_MS;

const MINUTES_PER_DAY: u64 = 24 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    SimulationStarted,
    MinuteTick,
    TryMatch,
    PickupArrived,
    DropoffArrived,
}

/// Which entity an event concerns, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventSubject {
    Request(Entity),
    Ride(Entity),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub timestamp: u64,
    /// Monotonic insertion order; ties on `timestamp` pop in schedule order.
    pub seq: u64,
    pub kind: EventKind,
    pub subject: Option<EventSubject>,
}

impl Ord for Event {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap a min-heap by (timestamp, seq).
        other
            .timestamp
            .cmp(&self.timestamp)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The event processed by the schedule currently running.
#[derive(Debug, Clone, Copy, Resource)]
pub struct CurrentEvent(pub Event);

/// Discrete-event clock: simulated time only advances when an event pops.
#[derive(Debug, Default, Resource)]
pub struct SimulationClock {
    now: u64,
    epoch_ms: i64,
    next_seq: u64,
    events: BinaryHeap<Event>,
}

impl SimulationClock {
    /// Current simulated time in milliseconds.
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Real-world epoch (Unix ms) corresponding to simulated time 0.
    pub fn epoch_ms(&self) -> i64 {
        self.epoch_ms
    }

    pub fn set_epoch_ms(&mut self, epoch_ms: i64) {
        self.epoch_ms = epoch_ms;
    }

    /// Wall-clock timestamp (Unix ms) for the current simulated instant.
    pub fn wall_timestamp_ms(&self) -> i64 {
        self.epoch_ms.saturating_add(self.now as i64)
    }

    pub fn schedule_at(&mut self, timestamp: u64, kind: EventKind, subject: Option<EventSubject>) {
        debug_assert!(
            timestamp >= self.now,
            "event timestamp must be >= current time"
        );
        let seq = self.next_seq;
        self.next_seq += 1;
        self.events.push(Event {
            timestamp,
            seq,
            kind,
            subject,
        });
    }

    pub fn schedule_in(&mut self, delay_ms: u64, kind: EventKind, subject: Option<EventSubject>) {
        self.schedule_at(self.now + delay_ms, kind, subject);
    }

    pub fn schedule_in_secs(&mut self, secs: u64, kind: EventKind, subject: Option<EventSubject>) {
        self.schedule_in(secs * ONE_SEC_MS, kind, subject);
    }

    /// Timestamp of the next pending event without popping it.
    pub fn next_event_time(&self) -> Option<u64> {
        self.events.peek().map(|event| event.timestamp)
    }

    pub fn pop_next(&mut self) -> Option<Event> {
        let event = self.events.pop()?;
        self.now = event.timestamp;
        Some(event)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Hour of day (0-23) for a simulated instant, with the day wrapping every
/// 24 simulated hours.
pub fn hour_of_day(sim_time_ms: u64) -> u32 {
    let minutes_in_day = (sim_time_ms / ONE_MIN_MS) % MINUTES_PER_DAY;
    (minutes_in_day / 60) as u32
}
