// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Queue slots and their status lifecycle.
//!
//! An active entry moves strictly forward through
//! `WAITING -> LOADING -> READY -> DEPARTED`. `DEPARTED` is terminal.
//! Overnight entries move one way from `PARKED` to `READY_FOR_TRANSFER`.

use crate::error::DomainError;
use crate::types::{Destination, DriverCin, EntryId, VehicleId};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// Status of a vehicle in a destination's active queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryStatus {
    /// Queued, not yet boarding.
    #[default]
    Waiting,
    /// At the platform, taking passengers.
    Loading,
    /// Full or released, about to leave.
    Ready,
    /// Left the station.
    Departed,
}

impl EntryStatus {
    /// Returns the wire representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Waiting => "WAITING",
            Self::Loading => "LOADING",
            Self::Ready => "READY",
            Self::Departed => "DEPARTED",
        }
    }

    /// Returns true if no transition is possible out of this status.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Departed)
    }

    /// Checks if a transition from this status to another is valid.
    ///
    /// Valid transitions are exactly one step forward:
    /// - `Waiting` → `Loading`
    /// - `Loading` → `Ready`
    /// - `Ready` → `Departed`
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Waiting, Self::Loading)
                | (Self::Loading, Self::Ready)
                | (Self::Ready, Self::Departed)
        )
    }
}

impl FromStr for EntryStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WAITING" => Ok(Self::Waiting),
            "LOADING" => Ok(Self::Loading),
            "READY" => Ok(Self::Ready),
            "DEPARTED" => Ok(Self::Departed),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How an entry arrived in the active queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QueueType {
    /// Enqueued on arrival during the day.
    #[default]
    Regular,
    /// Promoted from the overnight list.
    Overnight,
}

impl QueueType {
    /// Returns the wire representation of the queue type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Regular => "REGULAR",
            Self::Overnight => "OVERNIGHT",
        }
    }
}

impl FromStr for QueueType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "REGULAR" => Ok(Self::Regular),
            "OVERNIGHT" => Ok(Self::Overnight),
            _ => Err(DomainError::InvalidQueueType(s.to_string())),
        }
    }
}

impl std::fmt::Display for QueueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Status of a vehicle parked overnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OvernightStatus {
    /// Parked, awaiting the morning.
    #[default]
    Parked,
    /// Checked by staff and cleared for promotion.
    ReadyForTransfer,
}

impl OvernightStatus {
    /// Returns the wire representation of the overnight status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Parked => "PARKED",
            Self::ReadyForTransfer => "READY_FOR_TRANSFER",
        }
    }
}

impl FromStr for OvernightStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PARKED" => Ok(Self::Parked),
            "READY_FOR_TRANSFER" => Ok(Self::ReadyForTransfer),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for OvernightStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One vehicle's slot in a destination's active queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueEntry {
    /// Unique slot id.
    pub id: EntryId,
    /// The vehicle holding the slot.
    pub vehicle_id: VehicleId,
    /// The destination whose queue holds the slot.
    pub destination: Destination,
    /// 1-based rank within the destination's active queue.
    pub position: u32,
    /// Seat capacity of the vehicle.
    pub total_seats: u32,
    /// Seats not yet booked.
    pub available_seats: u32,
    /// Boarding status.
    pub status: EntryStatus,
    /// How the entry arrived.
    pub queue_type: QueueType,
    /// Expected departure, when known.
    #[serde(with = "time::serde::rfc3339::option")]
    pub estimated_departure: Option<OffsetDateTime>,
}

impl QueueEntry {
    /// Creates a new waiting entry with all seats available.
    ///
    /// # Arguments
    ///
    /// * `id` - Slot id allocated by the store
    /// * `vehicle_id` - The queued vehicle
    /// * `destination` - The destination queue
    /// * `position` - 1-based position to occupy
    /// * `total_seats` - Seat capacity
    /// * `queue_type` - Regular arrival or overnight promotion
    #[must_use]
    pub const fn new(
        id: EntryId,
        vehicle_id: VehicleId,
        destination: Destination,
        position: u32,
        total_seats: u32,
        queue_type: QueueType,
    ) -> Self {
        Self {
            id,
            vehicle_id,
            destination,
            position,
            total_seats,
            available_seats: total_seats,
            status: EntryStatus::Waiting,
            queue_type,
            estimated_departure: None,
        }
    }

    /// Returns the number of seats already booked.
    #[must_use]
    pub const fn booked_seats(&self) -> u32 {
        self.total_seats - self.available_seats
    }

    /// Returns true when no seats remain.
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.available_seats == 0
    }
}

/// A vehicle parked overnight, waiting to be promoted to the morning queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvernightEntry {
    /// Unique slot id.
    pub id: EntryId,
    /// The parked vehicle.
    pub vehicle_id: VehicleId,
    /// The destination it will serve in the morning.
    pub destination: Destination,
    /// 1-based rank within the destination's overnight list.
    pub position: u32,
    /// CIN of the driver who registered the vehicle.
    pub driver_cin: DriverCin,
    /// Seat capacity recorded when parked.
    pub total_seats: u32,
    /// When the vehicle was registered.
    #[serde(with = "time::serde::rfc3339")]
    pub entered_at: OffsetDateTime,
    /// Free-form staff notes.
    pub notes: Option<String>,
    /// Parking status.
    pub status: OvernightStatus,
}
