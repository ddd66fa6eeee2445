// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{EntryId, VehicleId};

/// The class of queue a slot belongs to.
///
/// A vehicle may hold at most one slot per class across all destinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueueClass {
    /// The daytime queue of a destination.
    Active,
    /// The overnight parking list of a destination.
    Overnight,
}

impl QueueClass {
    /// Returns the string representation of the queue class.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Overnight => "overnight",
        }
    }
}

impl std::fmt::Display for QueueClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors that can occur during domain validation.
///
/// Every variant describes a caller-correctable condition. None of them
/// indicate that queue state has been corrupted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The destination has not been registered.
    DestinationNotFound(String),
    /// The destination is already registered.
    DuplicateDestination(String),
    /// No active or overnight entry has this id.
    EntryNotFound(EntryId),
    /// The vehicle is not in the station registry.
    VehicleNotFound(VehicleId),
    /// No registered vehicle is driven by this CIN.
    DriverNotFound(String),
    /// The vehicle already holds a slot of this class.
    DuplicateVehicle {
        /// The vehicle that is already queued.
        vehicle_id: VehicleId,
        /// The queue class in which the existing slot lives.
        queue_class: QueueClass,
        /// The destination holding the existing slot.
        destination: String,
    },
    /// The vehicle id is already present in the registry.
    DuplicateVehicleRegistration(VehicleId),
    /// A reorder request was not a permutation of the current entries.
    InvalidPermutation {
        /// The destination being reordered.
        destination: String,
        /// What was wrong with the supplied ordering.
        reason: String,
    },
    /// The requested status change is not allowed.
    InvalidTransition {
        /// The entry whose status was being changed.
        entry_id: EntryId,
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
    },
    /// A seat adjustment would break `0 <= available <= total`.
    InsufficientSeats {
        /// The entry (or destination-wide booking, when `None`).
        entry_id: Option<EntryId>,
        /// The requested change in booked seats (negative for cancellation).
        requested: i32,
        /// Seats available before the adjustment.
        available: u32,
        /// Total seats.
        total: u32,
    },
    /// A booking asked for a seat count outside the allowed range.
    InvalidSeatRequest {
        /// The requested seat count.
        requested: u32,
        /// The maximum allowed per booking.
        max: u32,
    },
    /// Destination name is empty or invalid.
    InvalidDestination(String),
    /// Driver CIN is not exactly 8 digits.
    InvalidDriverCin(String),
    /// Vehicle fields are invalid.
    InvalidVehicle(String),
    /// Status string could not be parsed.
    InvalidStatus(String),
    /// Queue type string could not be parsed.
    InvalidQueueType(String),
    /// Timezone string is not a known IANA zone.
    InvalidTimezone(String),
    /// The promotion schedule cannot be resolved to an instant.
    InvalidSchedule {
        /// Why the schedule could not be resolved.
        reason: String,
    },
    /// The vehicle has no assigned destination to auto-detect.
    UnassignedVehicle(VehicleId),
    /// A fare is not a non-negative dinar amount with at most three decimals.
    InvalidFare(String),
    /// Customer details are missing or malformed.
    InvalidCustomer(String),
    /// No booking carries this verification code.
    TicketNotFound(String),
    /// The ticket has already been verified.
    TicketAlreadyVerified(String),
    /// The station is closed, so bookings and promotions are refused.
    StationClosed,
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DestinationNotFound(name) => write!(f, "Destination '{name}' not found"),
            Self::DuplicateDestination(name) => {
                write!(f, "Destination '{name}' already exists")
            }
            Self::EntryNotFound(id) => write!(f, "Queue entry {id} not found"),
            Self::VehicleNotFound(id) => write!(f, "Vehicle '{id}' not found"),
            Self::DriverNotFound(cin) => {
                write!(f, "No registered vehicle for driver CIN '{cin}'")
            }
            Self::DuplicateVehicle {
                vehicle_id,
                queue_class,
                destination,
            } => {
                write!(
                    f,
                    "Vehicle '{vehicle_id}' already occupies a {queue_class} slot for '{destination}'"
                )
            }
            Self::DuplicateVehicleRegistration(id) => {
                write!(f, "Vehicle '{id}' is already registered")
            }
            Self::InvalidPermutation {
                destination,
                reason,
            } => {
                write!(f, "Invalid ordering for '{destination}': {reason}")
            }
            Self::InvalidTransition { entry_id, from, to } => {
                write!(
                    f,
                    "Queue entry {entry_id} cannot move from {from} to {to}"
                )
            }
            Self::InsufficientSeats {
                entry_id,
                requested,
                available,
                total,
            } => match entry_id {
                Some(id) => write!(
                    f,
                    "Cannot adjust seats by {requested} on queue entry {id}: {available} of {total} available"
                ),
                None => write!(
                    f,
                    "Cannot book {requested} seats: {available} of {total} available"
                ),
            },
            Self::InvalidSeatRequest { requested, max } => {
                write!(
                    f,
                    "Invalid seat request: {requested}. Must be between 1 and {max}"
                )
            }
            Self::InvalidDestination(msg) => write!(f, "Invalid destination: {msg}"),
            Self::InvalidDriverCin(msg) => write!(f, "Invalid driver CIN: {msg}"),
            Self::InvalidVehicle(msg) => write!(f, "Invalid vehicle: {msg}"),
            Self::InvalidStatus(s) => write!(f, "Invalid status: {s}"),
            Self::InvalidQueueType(s) => write!(f, "Invalid queue type: {s}"),
            Self::InvalidTimezone(tz) => write!(f, "Invalid timezone: {tz}"),
            Self::InvalidSchedule { reason } => write!(f, "Invalid promotion schedule: {reason}"),
            Self::UnassignedVehicle(id) => {
                write!(f, "Vehicle '{id}' has no assigned destination")
            }
            Self::InvalidFare(value) => write!(f, "Invalid fare: {value}"),
            Self::InvalidCustomer(msg) => write!(f, "Invalid customer: {msg}"),
            Self::TicketNotFound(code) => write!(f, "Ticket '{code}' not found"),
            Self::TicketAlreadyVerified(code) => {
                write!(f, "Ticket '{code}' has already been verified")
            }
            Self::StationClosed => write!(f, "The station is closed"),
        }
    }
}

impl std::error::Error for DomainError {}
