// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use louaj_domain::{
    Customer, Destination, DriverCin, EntryId, EntryStatus, Fare, QueueType, Vehicle, VehicleId,
};
use time::OffsetDateTime;

/// A command represents staff or system intent as data only.
///
/// Commands are the only way to request state changes. Ids and
/// timestamps are allocated by the store before the command is built,
/// so applying a command is deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Register a destination served by the station.
    RegisterDestination {
        /// The destination to add.
        destination: Destination,
    },
    /// Add a vehicle to the station fleet.
    RegisterVehicle {
        /// The vehicle to add.
        vehicle: Vehicle,
    },
    /// Set a destination's per-seat ticket price.
    SetFare {
        /// The destination priced.
        destination: Destination,
        /// Price per seat.
        fare: Fare,
    },
    /// Open or close the station.
    SetOperational {
        /// Whether bookings and promotions are accepted.
        operational: bool,
    },
    /// Append a vehicle to the destination's active queue.
    Enqueue {
        /// Id for the new slot.
        entry_id: EntryId,
        /// The arriving vehicle.
        vehicle_id: VehicleId,
        /// Seat capacity of the vehicle.
        total_seats: u32,
        /// How the vehicle arrived.
        queue_type: QueueType,
    },
    /// Replace the active queue order with a caller-supplied permutation.
    Reorder {
        /// Every current entry id, in the desired order.
        ordered_ids: Vec<EntryId>,
    },
    /// Move an active entry one step through its status lifecycle.
    UpdateStatus {
        /// The entry to change.
        entry_id: EntryId,
        /// The requested status.
        status: EntryStatus,
    },
    /// Book (positive) or cancel (negative) seats on one entry.
    AdjustSeats {
        /// The entry to change.
        entry_id: EntryId,
        /// Seats booked; negative for cancellations.
        delta: i32,
    },
    /// Set or clear the expected departure of an active entry.
    SetEstimatedDeparture {
        /// The entry to change.
        entry_id: EntryId,
        /// The new estimate.
        estimated_departure: Option<OffsetDateTime>,
    },
    /// Delete an active entry.
    Remove {
        /// The entry to delete.
        entry_id: EntryId,
    },
    /// Sell a ticket, taking seats across the destination in queue order.
    BookSeats {
        /// Station-wide booking number.
        booking_id: u64,
        /// Seats to book.
        seats: u32,
        /// The passenger.
        customer: Customer,
        /// Per-seat price in force at booking time.
        base_price: Fare,
        /// Code printed on the ticket.
        verification_code: String,
        /// Sale time.
        booked_at: OffsetDateTime,
    },
    /// Check a ticket at boarding; each ticket verifies once.
    VerifyTicket {
        /// The code printed on the ticket.
        verification_code: String,
        /// Check time.
        verified_at: OffsetDateTime,
    },
    /// Park a vehicle in the destination's overnight list.
    EnqueueOvernight {
        /// Id for the new slot.
        entry_id: EntryId,
        /// The parked vehicle.
        vehicle_id: VehicleId,
        /// The driver who registered it.
        driver_cin: DriverCin,
        /// Seat capacity carried into the morning queue.
        total_seats: u32,
        /// Free-form notes.
        notes: Option<String>,
        /// Registration time.
        entered_at: OffsetDateTime,
    },
    /// Clear an overnight entry for transfer.
    MarkReadyForTransfer {
        /// The overnight entry to change.
        entry_id: EntryId,
    },
    /// Move every overnight entry into the active queue.
    PromoteOvernight,
    /// Delete an overnight entry.
    RemoveOvernight {
        /// The overnight entry to delete.
        entry_id: EntryId,
    },
}

impl Command {
    /// Returns the command name used in audit actions.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::RegisterDestination { .. } => "RegisterDestination",
            Self::RegisterVehicle { .. } => "RegisterVehicle",
            Self::SetFare { .. } => "SetFare",
            Self::SetOperational { .. } => "SetOperational",
            Self::Enqueue { .. } => "Enqueue",
            Self::Reorder { .. } => "Reorder",
            Self::UpdateStatus { .. } => "UpdateStatus",
            Self::AdjustSeats { .. } => "AdjustSeats",
            Self::SetEstimatedDeparture { .. } => "SetEstimatedDeparture",
            Self::Remove { .. } => "Remove",
            Self::BookSeats { .. } => "BookSeats",
            Self::VerifyTicket { .. } => "VerifyTicket",
            Self::EnqueueOvernight { .. } => "EnqueueOvernight",
            Self::MarkReadyForTransfer { .. } => "MarkReadyForTransfer",
            Self::PromoteOvernight => "PromoteOvernight",
            Self::RemoveOvernight { .. } => "RemoveOvernight",
        }
    }

    /// Returns true for commands that modify station metadata rather than
    /// a destination's queues.
    #[must_use]
    pub const fn is_bootstrap(&self) -> bool {
        matches!(
            self,
            Self::RegisterDestination { .. }
                | Self::RegisterVehicle { .. }
                | Self::SetFare { .. }
                | Self::SetOperational { .. }
        )
    }

    /// Returns true if applying this command can add or remove slots.
    ///
    /// Such commands must be applied while holding the vehicle occupancy
    /// ledger so the one-slot-per-vehicle rule holds across destinations.
    #[must_use]
    pub const fn changes_membership(&self) -> bool {
        match self {
            Self::Enqueue { .. }
            | Self::Remove { .. }
            | Self::EnqueueOvernight { .. }
            | Self::PromoteOvernight
            | Self::RemoveOvernight { .. } => true,
            Self::UpdateStatus { status, .. } => status.is_terminal(),
            Self::RegisterDestination { .. }
            | Self::RegisterVehicle { .. }
            | Self::SetFare { .. }
            | Self::SetOperational { .. }
            | Self::Reorder { .. }
            | Self::AdjustSeats { .. }
            | Self::SetEstimatedDeparture { .. }
            | Self::BookSeats { .. }
            | Self::VerifyTicket { .. }
            | Self::MarkReadyForTransfer { .. } => false,
        }
    }
}
