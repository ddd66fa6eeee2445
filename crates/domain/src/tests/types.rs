// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Destination, DomainError, DriverCin, EntryId, EntryStatus, OvernightStatus, QueueType,
    VehicleId,
};
use std::collections::HashSet;

#[test]
fn test_destination_equality_ignores_station_reference() {
    let plain: Destination = Destination::new("Sousse");
    let bound: Destination = Destination::with_station("Sousse", "station-42");

    assert_eq!(plain, bound);
    assert_eq!(bound.station_id(), Some("station-42"));

    let mut set: HashSet<Destination> = HashSet::new();
    set.insert(plain);
    assert!(set.contains(&bound));
}

#[test]
fn test_destination_name_is_trimmed() {
    let destination: Destination = Destination::new("  Monastir ");
    assert_eq!(destination.name(), "Monastir");
}

#[test]
fn test_destination_parse_rejects_blank_name() {
    let result: Result<Destination, DomainError> = Destination::parse("   ");
    assert!(matches!(result, Err(DomainError::InvalidDestination(_))));
}

#[test]
fn test_driver_cin_accepts_eight_digits() {
    let cin: DriverCin = DriverCin::parse(" 12345678 ").unwrap();
    assert_eq!(cin.value(), "12345678");
}

#[test]
fn test_driver_cin_rejects_wrong_length_and_letters() {
    assert!(matches!(
        DriverCin::parse("1234567"),
        Err(DomainError::InvalidDriverCin(_))
    ));
    assert!(matches!(
        DriverCin::parse("123456789"),
        Err(DomainError::InvalidDriverCin(_))
    ));
    assert!(matches!(
        DriverCin::parse("1234567A"),
        Err(DomainError::InvalidDriverCin(_))
    ));
}

#[test]
fn test_driver_cin_deserialization_validates() {
    let ok: Result<DriverCin, _> = serde_json::from_str("\"11223344\"");
    assert!(ok.is_ok());

    let bad: Result<DriverCin, _> = serde_json::from_str("\"11-22\"");
    assert!(bad.is_err());
}

#[test]
fn test_vehicle_id_is_trimmed() {
    assert_eq!(VehicleId::new(" V1 ").value(), "V1");
}

#[test]
fn test_entry_id_display() {
    assert_eq!(EntryId::new(42).to_string(), "42");
}

#[test]
fn test_entry_status_round_trips_wire_names() {
    for status in [
        EntryStatus::Waiting,
        EntryStatus::Loading,
        EntryStatus::Ready,
        EntryStatus::Departed,
    ] {
        let parsed: EntryStatus = status.as_str().parse().unwrap();
        assert_eq!(parsed, status);
    }
    assert!(matches!(
        "BOARDING".parse::<EntryStatus>(),
        Err(DomainError::InvalidStatus(_))
    ));
}

#[test]
fn test_entry_status_serializes_screaming_case() {
    let json: String = serde_json::to_string(&EntryStatus::Loading).unwrap();
    assert_eq!(json, "\"LOADING\"");
    let json: String = serde_json::to_string(&OvernightStatus::ReadyForTransfer).unwrap();
    assert_eq!(json, "\"READY_FOR_TRANSFER\"");
}

#[test]
fn test_entry_status_transitions_are_strictly_forward() {
    assert!(EntryStatus::Waiting.can_transition_to(EntryStatus::Loading));
    assert!(EntryStatus::Loading.can_transition_to(EntryStatus::Ready));
    assert!(EntryStatus::Ready.can_transition_to(EntryStatus::Departed));

    assert!(!EntryStatus::Waiting.can_transition_to(EntryStatus::Ready));
    assert!(!EntryStatus::Loading.can_transition_to(EntryStatus::Waiting));
    assert!(!EntryStatus::Waiting.can_transition_to(EntryStatus::Waiting));
}

#[test]
fn test_departed_is_terminal() {
    assert!(EntryStatus::Departed.is_terminal());
    for target in [
        EntryStatus::Waiting,
        EntryStatus::Loading,
        EntryStatus::Ready,
        EntryStatus::Departed,
    ] {
        assert!(!EntryStatus::Departed.can_transition_to(target));
    }
}

#[test]
fn test_queue_type_parse() {
    assert_eq!("OVERNIGHT".parse::<QueueType>().unwrap(), QueueType::Overnight);
    assert_eq!("REGULAR".parse::<QueueType>().unwrap(), QueueType::Regular);
    assert!(matches!(
        "regular".parse::<QueueType>(),
        Err(DomainError::InvalidQueueType(_))
    ));
}
