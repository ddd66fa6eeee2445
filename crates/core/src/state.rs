// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use louaj_audit::{AuditEvent, StateSnapshot};
use louaj_domain::{
    Customer, Destination, DriverCin, EntryId, Fare, OvernightEntry, QueueEntry, Vehicle,
    VehicleId,
};
use std::collections::HashMap;
use time::OffsetDateTime;

/// Station-wide metadata: which destinations exist and which vehicles
/// belong to the fleet.
///
/// This is separate from the per-destination `State`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationMetadata {
    /// Registered destinations, in registration order.
    pub destinations: Vec<Destination>,
    /// The vehicle registry keyed by vehicle id.
    pub vehicles: HashMap<VehicleId, Vehicle>,
    /// Per-seat ticket price by destination.
    pub fares: HashMap<Destination, Fare>,
    /// Whether the station is open for bookings and promotions.
    pub operational: bool,
}

impl Default for StationMetadata {
    fn default() -> Self {
        Self {
            destinations: Vec::new(),
            vehicles: HashMap::new(),
            fares: HashMap::new(),
            operational: true,
        }
    }
}

impl StationMetadata {
    /// Creates empty metadata for an open station.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the per-seat price for a destination, zero if none is set.
    #[must_use]
    pub fn fare(&self, destination: &Destination) -> Fare {
        self.fares.get(destination).copied().unwrap_or(Fare::ZERO)
    }

    /// Checks if a destination is registered.
    #[must_use]
    pub fn has_destination(&self, destination: &Destination) -> bool {
        self.destinations.contains(destination)
    }

    /// Looks up a vehicle by id.
    #[must_use]
    pub fn vehicle(&self, vehicle_id: &VehicleId) -> Option<&Vehicle> {
        self.vehicles.get(vehicle_id)
    }

    /// Looks up the vehicle driven by the holder of `cin`.
    #[must_use]
    pub fn vehicle_by_driver(&self, cin: &DriverCin) -> Option<&Vehicle> {
        self.vehicles.values().find(|v| &v.driver_cin == cin)
    }

    /// Adds a destination.
    pub(crate) fn add_destination(&mut self, destination: Destination) {
        self.destinations.push(destination);
    }

    /// Adds a vehicle.
    pub(crate) fn add_vehicle(&mut self, vehicle: Vehicle) {
        self.vehicles.insert(vehicle.vehicle_id.clone(), vehicle);
    }

    /// Sets a destination's per-seat price.
    pub(crate) fn set_fare(&mut self, destination: Destination, fare: Fare) {
        self.fares.insert(destination, fare);
    }
}

/// The queues of a single destination.
///
/// Both lists are kept sorted by position, and positions are always
/// `1..=len`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    /// The destination this state is scoped to.
    pub destination: Destination,
    /// The daytime queue.
    pub active: Vec<QueueEntry>,
    /// Vehicles parked overnight.
    pub overnight: Vec<OvernightEntry>,
    /// Tickets sold for this destination, oldest first.
    pub bookings: Vec<Booking>,
}

impl State {
    /// Creates empty queues for a destination.
    #[must_use]
    pub const fn new(destination: Destination) -> Self {
        Self {
            destination,
            active: Vec::new(),
            overnight: Vec::new(),
            bookings: Vec::new(),
        }
    }

    /// Finds an active entry by id.
    #[must_use]
    pub fn active_entry(&self, entry_id: EntryId) -> Option<&QueueEntry> {
        self.active.iter().find(|e| e.id == entry_id)
    }

    /// Finds an overnight entry by id.
    #[must_use]
    pub fn overnight_entry(&self, entry_id: EntryId) -> Option<&OvernightEntry> {
        self.overnight.iter().find(|e| e.id == entry_id)
    }

    /// Finds a booking by its verification code.
    #[must_use]
    pub fn booking_by_code(&self, verification_code: &str) -> Option<&Booking> {
        self.bookings
            .iter()
            .find(|b| b.verification_code == verification_code)
    }

    /// Converts the state to a snapshot for audit purposes.
    #[must_use]
    pub fn to_snapshot(&self) -> StateSnapshot {
        let active: Vec<String> = self
            .active
            .iter()
            .map(|e| {
                format!(
                    "{}@{}:{}/{}",
                    e.vehicle_id, e.position, e.available_seats, e.total_seats
                )
            })
            .collect();
        let overnight: Vec<String> = self
            .overnight
            .iter()
            .map(|e| format!("{}@{}", e.vehicle_id, e.position))
            .collect();
        StateSnapshot::new(format!(
            "destination={},active=[{}],overnight=[{}]",
            self.destination.name(),
            active.join(","),
            overnight.join(",")
        ))
    }
}

/// Seats taken from one entry by a destination-wide booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatAllocation {
    /// The entry the seats were taken from.
    pub entry_id: EntryId,
    /// The vehicle carrying the passengers.
    pub vehicle_id: VehicleId,
    /// The entry's queue position at booking time.
    pub position: u32,
    /// Seats booked on this entry.
    pub seats: u32,
}

/// A sold ticket: seats taken across the queue for one customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    /// Station-wide booking number.
    pub id: u64,
    /// The destination travelled to.
    pub destination: Destination,
    /// Seats taken per entry, front of the queue first.
    pub allocations: Vec<SeatAllocation>,
    /// Seats booked in total.
    pub seats: u32,
    /// The passenger.
    pub customer: Customer,
    /// Per-seat price at booking time.
    pub base_price: Fare,
    /// `base_price` times `seats`.
    pub total_price: Fare,
    /// Code printed on the ticket and checked at boarding.
    pub verification_code: String,
    /// When the ticket was sold.
    pub booked_at: OffsetDateTime,
    /// When the ticket was checked, if it has been.
    pub verified_at: Option<OffsetDateTime>,
}

impl Booking {
    /// Returns true once the ticket has been checked.
    #[must_use]
    pub const fn is_verified(&self) -> bool {
        self.verified_at.is_some()
    }
}

/// The result of moving a destination's overnight list into its queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Promotion {
    /// How many overnight entries moved.
    pub promoted: usize,
    /// The whole active queue afterwards.
    pub queue: Vec<QueueEntry>,
}

/// What a transition produced, besides the new state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A single active entry (created, changed, removed or departed).
    Entry(QueueEntry),
    /// The whole active queue after the transition.
    Queue(Vec<QueueEntry>),
    /// A single overnight entry (created, changed or removed).
    Overnight(OvernightEntry),
    /// A booking, after it was sold or verified.
    Booking(Booking),
    /// An overnight promotion.
    Promotion(Promotion),
}

impl Outcome {
    /// Unwraps a single active entry.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::UnexpectedOutcome` for any other outcome.
    pub fn into_entry(self) -> Result<QueueEntry, CoreError> {
        match self {
            Self::Entry(entry) => Ok(entry),
            _ => Err(CoreError::UnexpectedOutcome { expected: "entry" }),
        }
    }

    /// Unwraps the active queue.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::UnexpectedOutcome` for any other outcome.
    pub fn into_queue(self) -> Result<Vec<QueueEntry>, CoreError> {
        match self {
            Self::Queue(entries) => Ok(entries),
            _ => Err(CoreError::UnexpectedOutcome { expected: "queue" }),
        }
    }

    /// Unwraps a single overnight entry.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::UnexpectedOutcome` for any other outcome.
    pub fn into_overnight(self) -> Result<OvernightEntry, CoreError> {
        match self {
            Self::Overnight(entry) => Ok(entry),
            _ => Err(CoreError::UnexpectedOutcome {
                expected: "overnight entry",
            }),
        }
    }

    /// Unwraps a booking.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::UnexpectedOutcome` for any other outcome.
    pub fn into_booking(self) -> Result<Booking, CoreError> {
        match self {
            Self::Booking(booking) => Ok(booking),
            _ => Err(CoreError::UnexpectedOutcome {
                expected: "booking",
            }),
        }
    }

    /// Unwraps a promotion.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::UnexpectedOutcome` for any other outcome.
    pub fn into_promotion(self) -> Result<Promotion, CoreError> {
        match self {
            Self::Promotion(promotion) => Ok(promotion),
            _ => Err(CoreError::UnexpectedOutcome {
                expected: "promotion",
            }),
        }
    }
}

/// The result of a successful state transition.
///
/// Transitions are atomic: they either succeed completely or fail without side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The new state after the transition.
    pub new_state: State,
    /// What the transition produced.
    pub outcome: Outcome,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}

/// The result of a bootstrap operation.
///
/// Bootstrap operations modify metadata, not destination state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapResult {
    /// The new station metadata after the operation.
    pub new_metadata: StationMetadata,
    /// The audit event recording this operation.
    pub audit_event: AuditEvent,
}
