// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    create_test_actor, create_test_cause, create_test_store, create_test_vehicle, enqueue_all,
    monastir, sousse, vehicle_order,
};
use crate::{CoreError, DEFAULT_OVERNIGHT_SEATS, Promotion, QueueStore};
use louaj_domain::{
    Destination, DomainError, DriverCin, OvernightEntry, OvernightStatus, QueueClass, QueueEntry,
    VehicleId,
};

fn park(store: &QueueStore, destination: &Destination, vehicle: &str) -> OvernightEntry {
    store
        .enqueue_overnight(
            destination,
            VehicleId::new(vehicle),
            DriverCin::parse("12345678").unwrap(),
            Some(String::from("Parked by gate 2")),
            create_test_actor(),
            create_test_cause(),
        )
        .unwrap()
}

#[test]
fn test_overnight_entries_take_consecutive_positions() {
    let store: QueueStore = create_test_store();

    let first: OvernightEntry = park(&store, &sousse(), "V1");
    let second: OvernightEntry = park(&store, &sousse(), "V2");

    assert_eq!(first.position, 1);
    assert_eq!(second.position, 2);
    assert_eq!(first.status, OvernightStatus::Parked);
    assert_eq!(first.total_seats, DEFAULT_OVERNIGHT_SEATS);
    assert_eq!(first.notes.as_deref(), Some("Parked by gate 2"));
}

#[test]
fn test_overnight_capacity_comes_from_registry() {
    let store: QueueStore = create_test_store();
    store
        .register_vehicle(
            create_test_vehicle("V1", "11112222", 12, Some(sousse())),
            create_test_actor(),
            create_test_cause(),
        )
        .unwrap();

    let entry: OvernightEntry = park(&store, &sousse(), "V1");

    assert_eq!(entry.total_seats, 12);
}

#[test]
fn test_vehicle_cannot_park_overnight_twice() {
    let store: QueueStore = create_test_store();
    park(&store, &sousse(), "V1");

    let result: Result<OvernightEntry, CoreError> = store.enqueue_overnight(
        &monastir(),
        VehicleId::new("V1"),
        DriverCin::parse("12345678").unwrap(),
        None,
        create_test_actor(),
        create_test_cause(),
    );

    assert!(matches!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::DuplicateVehicle {
            queue_class: QueueClass::Overnight,
            ..
        })
    ));
}

#[test]
fn test_active_vehicle_may_also_park_overnight() {
    let store: QueueStore = create_test_store();
    enqueue_all(&store, &sousse(), &["V1"]);

    let entry: OvernightEntry = park(&store, &monastir(), "V1");

    assert_eq!(entry.position, 1);
}

#[test]
fn test_park_by_driver_uses_assigned_destination() {
    let store: QueueStore = create_test_store();
    store
        .register_vehicle(
            create_test_vehicle("V9", "55554444", 10, Some(monastir())),
            create_test_actor(),
            create_test_cause(),
        )
        .unwrap();

    let entry: OvernightEntry = store
        .enqueue_overnight_by_driver(
            &DriverCin::parse("55554444").unwrap(),
            None,
            create_test_actor(),
            create_test_cause(),
        )
        .unwrap();

    assert_eq!(entry.destination, monastir());
    assert_eq!(entry.vehicle_id, VehicleId::new("V9"));
    assert_eq!(entry.total_seats, 10);
}

#[test]
fn test_park_by_unknown_driver_fails() {
    let store: QueueStore = create_test_store();

    let result: Result<OvernightEntry, CoreError> = store.enqueue_overnight_by_driver(
        &DriverCin::parse("99999999").unwrap(),
        None,
        create_test_actor(),
        create_test_cause(),
    );

    assert_eq!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::DriverNotFound(String::from("99999999")))
    );
}

#[test]
fn test_park_by_driver_without_assignment_fails() {
    let store: QueueStore = create_test_store();
    store
        .register_vehicle(
            create_test_vehicle("V9", "55554444", 10, None),
            create_test_actor(),
            create_test_cause(),
        )
        .unwrap();

    let result: Result<OvernightEntry, CoreError> = store.enqueue_overnight_by_driver(
        &DriverCin::parse("55554444").unwrap(),
        None,
        create_test_actor(),
        create_test_cause(),
    );

    assert!(matches!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::UnassignedVehicle(_))
    ));
}

#[test]
fn test_promotion_only_touches_its_destination() {
    let store: QueueStore = create_test_store();
    park(&store, &sousse(), "V1");
    park(&store, &monastir(), "V2");

    store
        .promote_overnight(&sousse(), create_test_actor(), create_test_cause())
        .unwrap();

    assert_eq!(store.list_overnight(&monastir()).unwrap().len(), 1);
    assert!(store.list_by_destination(&monastir()).unwrap().is_empty());
    assert_eq!(store.list_by_destination(&sousse()).unwrap().len(), 1);
}

#[test]
fn test_promotion_keeps_overnight_order_after_removal() {
    let store: QueueStore = create_test_store();
    enqueue_all(&store, &sousse(), &["A1"]);
    park(&store, &sousse(), "N1");
    let middle: OvernightEntry = park(&store, &sousse(), "N2");
    park(&store, &sousse(), "N3");
    store
        .remove_overnight(middle.id, create_test_actor(), create_test_cause())
        .unwrap();

    let overnight: Vec<OvernightEntry> = store.list_overnight(&sousse()).unwrap();
    assert_eq!(
        overnight.iter().map(|e| e.position).collect::<Vec<u32>>(),
        vec![1, 2]
    );

    let promotion: Promotion = store
        .promote_overnight(&sousse(), create_test_actor(), create_test_cause())
        .unwrap();
    assert_eq!(promotion.promoted, 2);
    assert_eq!(
        vehicle_order(&promotion.queue),
        vec![
            (String::from("A1"), 1),
            (String::from("N1"), 2),
            (String::from("N3"), 3)
        ]
    );
}

#[test]
fn test_promotion_conflict_moves_nothing() {
    let store: QueueStore = create_test_store();
    enqueue_all(&store, &monastir(), &["V2"]);
    park(&store, &sousse(), "V1");
    park(&store, &sousse(), "V2");

    let result: Result<Promotion, CoreError> =
        store.promote_overnight(&sousse(), create_test_actor(), create_test_cause());

    assert_eq!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::DuplicateVehicle {
            vehicle_id: VehicleId::new("V2"),
            queue_class: QueueClass::Active,
            destination: String::from("Monastir"),
        })
    );
    assert_eq!(store.list_overnight(&sousse()).unwrap().len(), 2);
    assert!(store.list_by_destination(&sousse()).unwrap().is_empty());
}

#[test]
fn test_promoted_entries_can_be_managed_as_active() {
    let store: QueueStore = create_test_store();
    let parked: OvernightEntry = park(&store, &sousse(), "V1");
    store
        .promote_overnight(&sousse(), create_test_actor(), create_test_cause())
        .unwrap();

    let removed: QueueEntry = store
        .remove(parked.id, create_test_actor(), create_test_cause())
        .unwrap();
    assert_eq!(removed.vehicle_id, VehicleId::new("V1"));

    let gone: Result<OvernightEntry, CoreError> =
        store.remove_overnight(parked.id, create_test_actor(), create_test_cause());
    assert!(matches!(
        gone.unwrap_err(),
        CoreError::DomainViolation(DomainError::EntryNotFound(_))
    ));
}

#[test]
fn test_mark_ready_for_transfer_through_store() {
    let store: QueueStore = create_test_store();
    let parked: OvernightEntry = park(&store, &sousse(), "V1");

    let marked: OvernightEntry = store
        .mark_ready_for_transfer(parked.id, create_test_actor(), create_test_cause())
        .unwrap();

    assert_eq!(marked.status, OvernightStatus::ReadyForTransfer);
    assert_eq!(
        store.list_overnight(&sousse()).unwrap()[0].status,
        OvernightStatus::ReadyForTransfer
    );
}

#[test]
fn test_active_entry_id_is_not_an_overnight_entry() {
    let store: QueueStore = create_test_store();
    let entry: QueueEntry = enqueue_all(&store, &sousse(), &["V1"]).remove(0);

    let result: Result<OvernightEntry, CoreError> =
        store.mark_ready_for_transfer(entry.id, create_test_actor(), create_test_cause());

    assert!(matches!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::EntryNotFound(_))
    ));
}

#[test]
fn test_promotion_refused_while_station_closed() {
    let store: QueueStore = create_test_store();
    park(&store, &sousse(), "V1");
    store
        .set_operational(false, create_test_actor(), create_test_cause())
        .unwrap();

    let result: Result<Promotion, CoreError> =
        store.promote_overnight(&sousse(), create_test_actor(), create_test_cause());

    assert_eq!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::StationClosed)
    );
    assert_eq!(store.list_overnight(&sousse()).unwrap().len(), 1);

    store
        .set_operational(true, create_test_actor(), create_test_cause())
        .unwrap();
    let promotion: Promotion = store
        .promote_overnight(&sousse(), create_test_actor(), create_test_cause())
        .unwrap();
    assert_eq!(promotion.promoted, 1);
}
