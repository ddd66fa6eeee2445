// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DomainError, EntryId, QueueClass, VehicleId};

#[test]
fn test_domain_error_display() {
    let err: DomainError = DomainError::DestinationNotFound(String::from("Sousse"));
    assert_eq!(format!("{err}"), "Destination 'Sousse' not found");

    let err: DomainError = DomainError::EntryNotFound(EntryId::new(7));
    assert_eq!(format!("{err}"), "Queue entry 7 not found");

    let err: DomainError = DomainError::DuplicateVehicle {
        vehicle_id: VehicleId::new("V1"),
        queue_class: QueueClass::Active,
        destination: String::from("Monastir"),
    };
    assert_eq!(
        format!("{err}"),
        "Vehicle 'V1' already occupies a active slot for 'Monastir'"
    );

    let err: DomainError = DomainError::InvalidPermutation {
        destination: String::from("Sousse"),
        reason: String::from("expected 3 entries, got 2"),
    };
    assert_eq!(
        format!("{err}"),
        "Invalid ordering for 'Sousse': expected 3 entries, got 2"
    );

    let err: DomainError = DomainError::InvalidTransition {
        entry_id: EntryId::new(3),
        from: String::from("DEPARTED"),
        to: String::from("WAITING"),
    };
    assert_eq!(
        format!("{err}"),
        "Queue entry 3 cannot move from DEPARTED to WAITING"
    );

    let err: DomainError = DomainError::InsufficientSeats {
        entry_id: Some(EntryId::new(2)),
        requested: 5,
        available: 3,
        total: 8,
    };
    assert_eq!(
        format!("{err}"),
        "Cannot adjust seats by 5 on queue entry 2: 3 of 8 available"
    );

    let err: DomainError = DomainError::InsufficientSeats {
        entry_id: None,
        requested: 4,
        available: 1,
        total: 16,
    };
    assert_eq!(format!("{err}"), "Cannot book 4 seats: 1 of 16 available");

    let err: DomainError = DomainError::InvalidSeatRequest {
        requested: 9,
        max: 8,
    };
    assert_eq!(
        format!("{err}"),
        "Invalid seat request: 9. Must be between 1 and 8"
    );

    let err: DomainError = DomainError::UnassignedVehicle(VehicleId::new("V9"));
    assert_eq!(format!("{err}"), "Vehicle 'V9' has no assigned destination");
}

#[test]
fn test_domain_error_is_std_error() {
    let err: Box<dyn std::error::Error> =
        Box::new(DomainError::InvalidTimezone(String::from("Mars/Olympus")));
    assert_eq!(err.to_string(), "Invalid timezone: Mars/Olympus");
}
