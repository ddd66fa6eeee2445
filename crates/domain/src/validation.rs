// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::queue_entry::{EntryStatus, QueueEntry};
use crate::types::{MAX_VEHICLE_CAPACITY, Vehicle};

/// Largest number of seats a single booking may take.
pub const MAX_SEATS_PER_BOOKING: u32 = 8;

/// Validates that a vehicle's basic field constraints are met.
///
/// This function checks that required fields are present and the capacity
/// is within range. It does NOT check for uniqueness (that requires the
/// registry).
///
/// # Errors
///
/// Returns an error if:
/// - The vehicle id is empty
/// - The license plate is empty
/// - The driver name is empty
/// - The capacity is zero or above `MAX_VEHICLE_CAPACITY`
pub fn validate_vehicle_fields(vehicle: &Vehicle) -> Result<(), DomainError> {
    if vehicle.vehicle_id.value().is_empty() {
        return Err(DomainError::InvalidVehicle(String::from(
            "Vehicle id cannot be empty",
        )));
    }

    if vehicle.license_plate.trim().is_empty() {
        return Err(DomainError::InvalidVehicle(String::from(
            "License plate cannot be empty",
        )));
    }

    if vehicle.driver_name.trim().is_empty() {
        return Err(DomainError::InvalidVehicle(String::from(
            "Driver name cannot be empty",
        )));
    }

    if vehicle.capacity == 0 || vehicle.capacity > MAX_VEHICLE_CAPACITY {
        return Err(DomainError::InvalidVehicle(format!(
            "Capacity must be between 1 and {MAX_VEHICLE_CAPACITY}, got {}",
            vehicle.capacity
        )));
    }

    Ok(())
}

/// Validates a requested status change against the entry lifecycle.
///
/// # Errors
///
/// Returns `DomainError::InvalidTransition` if the change is not exactly
/// one step forward, including any change out of `DEPARTED`.
pub fn validate_status_transition(
    entry: &QueueEntry,
    target: EntryStatus,
) -> Result<(), DomainError> {
    if entry.status.can_transition_to(target) {
        Ok(())
    } else {
        Err(DomainError::InvalidTransition {
            entry_id: entry.id,
            from: entry.status.as_str().to_string(),
            to: target.as_str().to_string(),
        })
    }
}

/// Computes the available seat count after booking `delta` seats.
///
/// A positive `delta` books seats; a negative one cancels bookings.
///
/// # Returns
///
/// The new `available_seats` value. The entry itself is not modified.
///
/// # Errors
///
/// Returns `DomainError::InsufficientSeats` if the result would be
/// negative or exceed the entry's total seats.
pub fn apply_seat_delta(entry: &QueueEntry, delta: i32) -> Result<u32, DomainError> {
    let insufficient = || DomainError::InsufficientSeats {
        entry_id: Some(entry.id),
        requested: delta,
        available: entry.available_seats,
        total: entry.total_seats,
    };

    let available: i64 = i64::from(entry.available_seats) - i64::from(delta);
    if available < 0 || available > i64::from(entry.total_seats) {
        return Err(insufficient());
    }

    u32::try_from(available).map_err(|_| insufficient())
}

/// Validates the seat count of a destination-wide booking.
///
/// # Errors
///
/// Returns `DomainError::InvalidSeatRequest` unless
/// `1 <= seats <= MAX_SEATS_PER_BOOKING`.
pub const fn validate_seat_request(seats: u32) -> Result<(), DomainError> {
    if seats == 0 || seats > MAX_SEATS_PER_BOOKING {
        return Err(DomainError::InvalidSeatRequest {
            requested: seats,
            max: MAX_SEATS_PER_BOOKING,
        });
    }
    Ok(())
}
