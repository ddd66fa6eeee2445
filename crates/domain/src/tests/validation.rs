// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{create_test_entry, create_test_vehicle};
use crate::{
    DomainError, EntryStatus, MAX_SEATS_PER_BOOKING, QueueEntry, Vehicle, apply_seat_delta,
    validate_seat_request, validate_status_transition, validate_vehicle_fields,
};

#[test]
fn test_validate_vehicle_fields_accepts_valid_vehicle() {
    let vehicle: Vehicle = create_test_vehicle("V1", "12345678", 8);
    assert!(validate_vehicle_fields(&vehicle).is_ok());
}

#[test]
fn test_validate_vehicle_fields_rejects_empty_plate() {
    let mut vehicle: Vehicle = create_test_vehicle("V1", "12345678", 8);
    vehicle.license_plate = String::from("  ");
    assert!(matches!(
        validate_vehicle_fields(&vehicle),
        Err(DomainError::InvalidVehicle(_))
    ));
}

#[test]
fn test_validate_vehicle_fields_rejects_zero_and_oversized_capacity() {
    let vehicle: Vehicle = create_test_vehicle("V1", "12345678", 0);
    assert!(matches!(
        validate_vehicle_fields(&vehicle),
        Err(DomainError::InvalidVehicle(_))
    ));

    let vehicle: Vehicle = create_test_vehicle("V1", "12345678", 21);
    assert!(matches!(
        validate_vehicle_fields(&vehicle),
        Err(DomainError::InvalidVehicle(_))
    ));
}

#[test]
fn test_validate_status_transition_allows_next_step() {
    let entry: QueueEntry = create_test_entry(1, 1, 8);
    assert!(validate_status_transition(&entry, EntryStatus::Loading).is_ok());
}

#[test]
fn test_validate_status_transition_rejects_skip() {
    let entry: QueueEntry = create_test_entry(1, 1, 8);
    let result: Result<(), DomainError> = validate_status_transition(&entry, EntryStatus::Ready);
    assert_eq!(
        result,
        Err(DomainError::InvalidTransition {
            entry_id: entry.id,
            from: String::from("WAITING"),
            to: String::from("READY"),
        })
    );
}

#[test]
fn test_apply_seat_delta_books_and_cancels() {
    let mut entry: QueueEntry = create_test_entry(1, 1, 8);
    assert_eq!(apply_seat_delta(&entry, 3).unwrap(), 5);

    entry.available_seats = 5;
    assert_eq!(apply_seat_delta(&entry, -2).unwrap(), 7);
    assert_eq!(apply_seat_delta(&entry, 5).unwrap(), 0);
}

#[test]
fn test_apply_seat_delta_rejects_overbooking() {
    let mut entry: QueueEntry = create_test_entry(1, 1, 8);
    entry.available_seats = 2;

    let result: Result<u32, DomainError> = apply_seat_delta(&entry, 3);
    assert_eq!(
        result,
        Err(DomainError::InsufficientSeats {
            entry_id: Some(entry.id),
            requested: 3,
            available: 2,
            total: 8,
        })
    );
}

#[test]
fn test_apply_seat_delta_rejects_cancelling_past_capacity() {
    let mut entry: QueueEntry = create_test_entry(1, 1, 8);
    entry.available_seats = 7;

    assert!(matches!(
        apply_seat_delta(&entry, -2),
        Err(DomainError::InsufficientSeats { .. })
    ));
}

#[test]
fn test_apply_seat_delta_handles_extreme_values() {
    let entry: QueueEntry = create_test_entry(1, 1, 8);
    assert!(apply_seat_delta(&entry, i32::MAX).is_err());
    assert!(apply_seat_delta(&entry, i32::MIN).is_err());
}

#[test]
fn test_validate_seat_request_bounds() {
    assert!(validate_seat_request(1).is_ok());
    assert!(validate_seat_request(MAX_SEATS_PER_BOOKING).is_ok());
    assert!(matches!(
        validate_seat_request(0),
        Err(DomainError::InvalidSeatRequest { .. })
    ));
    assert!(matches!(
        validate_seat_request(MAX_SEATS_PER_BOOKING + 1),
        Err(DomainError::InvalidSeatRequest { .. })
    ));
}
