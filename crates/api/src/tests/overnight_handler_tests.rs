// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Overnight queue handler tests.

use louaj::QueueStore;

use crate::{
    ApiError, OvernightEntryResponse, OvernightQueueResponse, ParkByDriverRequest,
    ParkOvernightRequest, PromoteOvernightResponse, SetOperationalRequest, list_overnight,
    mark_ready_for_transfer, park_overnight, park_overnight_by_driver, promote_overnight,
    remove_overnight, set_operational,
};

use super::helpers::{
    create_test_cause, create_test_staff, create_test_store, create_test_supervisor, enqueue,
    vehicle_order,
};

fn park(
    store: &QueueStore,
    destination: &str,
    vehicle_id: &str,
    driver_cin: &str,
) -> Result<OvernightEntryResponse, ApiError> {
    park_overnight(
        store,
        destination,
        &ParkOvernightRequest {
            vehicle_id: vehicle_id.to_string(),
            driver_cin: driver_cin.to_string(),
            notes: None,
        },
        &create_test_supervisor(),
        create_test_cause(),
    )
}

fn park_by_driver(store: &QueueStore, driver_cin: &str) -> Result<OvernightEntryResponse, ApiError> {
    park_overnight_by_driver(
        store,
        &ParkByDriverRequest {
            driver_cin: driver_cin.to_string(),
            notes: Some(String::from("Arrived 23:10")),
        },
        &create_test_supervisor(),
        create_test_cause(),
    )
}

#[test]
fn test_staff_cannot_park_overnight() {
    let store: QueueStore = create_test_store();

    let result: Result<OvernightEntryResponse, ApiError> = park_overnight(
        &store,
        "Sousse",
        &ParkOvernightRequest {
            vehicle_id: String::from("TN-1"),
            driver_cin: String::from("12345678"),
            notes: None,
        },
        &create_test_staff(),
        create_test_cause(),
    );

    assert!(matches!(
        result.unwrap_err(),
        ApiError::Unauthorized { required_role, .. } if required_role == "Supervisor"
    ));
    assert!(
        list_overnight(&store, "Sousse", &create_test_supervisor())
            .unwrap()
            .entries
            .is_empty()
    );
}

#[test]
fn test_staff_cannot_view_overnight_list() {
    let store: QueueStore = create_test_store();

    let result: Result<OvernightQueueResponse, ApiError> =
        list_overnight(&store, "Sousse", &create_test_staff());

    assert!(matches!(result.unwrap_err(), ApiError::Unauthorized { .. }));
}

#[test]
fn test_park_overnight_assigns_positions() {
    let store: QueueStore = create_test_store();

    let first: OvernightEntryResponse = park(&store, "Sousse", "TN-1", "12345678").unwrap();
    let second: OvernightEntryResponse = park(&store, "Sousse", "TN-3", "11223344").unwrap();

    assert_eq!(first.entry.position, 1);
    assert_eq!(second.entry.position, 2);
    assert_eq!(first.entry.status, "PARKED");
    assert_eq!(first.entry.total_seats, 8);
}

#[test]
fn test_park_overnight_twice_is_rejected() {
    let store: QueueStore = create_test_store();
    park(&store, "Sousse", "TN-1", "12345678").unwrap();

    let result: Result<OvernightEntryResponse, ApiError> =
        park(&store, "Monastir", "TN-1", "12345678");

    assert!(matches!(
        result.unwrap_err(),
        ApiError::DomainRuleViolation { rule, .. } if rule == "one_slot_per_vehicle"
    ));
}

#[test]
fn test_park_overnight_rejects_malformed_cin() {
    let store: QueueStore = create_test_store();

    let result: Result<OvernightEntryResponse, ApiError> = park(&store, "Sousse", "TN-1", "1234");

    assert!(matches!(
        result.unwrap_err(),
        ApiError::InvalidInput { field, .. } if field == "driver_cin"
    ));
}

#[test]
fn test_park_by_driver_uses_assigned_destination() {
    let store: QueueStore = create_test_store();

    let response: OvernightEntryResponse = park_by_driver(&store, "87654321").unwrap();

    assert_eq!(response.entry.destination, "Monastir");
    assert_eq!(response.entry.vehicle_id, "TN-2");
    assert_eq!(response.entry.total_seats, 4);
    assert_eq!(response.entry.notes.as_deref(), Some("Arrived 23:10"));
}

#[test]
fn test_park_by_driver_without_assignment_is_rejected() {
    let store: QueueStore = create_test_store();

    let result: Result<OvernightEntryResponse, ApiError> = park_by_driver(&store, "11223344");

    assert!(matches!(
        result.unwrap_err(),
        ApiError::DomainRuleViolation { rule, .. } if rule == "assigned_destination"
    ));
}

#[test]
fn test_park_by_unknown_driver_is_not_found() {
    let store: QueueStore = create_test_store();

    let result: Result<OvernightEntryResponse, ApiError> = park_by_driver(&store, "99999999");

    assert!(matches!(
        result.unwrap_err(),
        ApiError::ResourceNotFound { resource_type, .. } if resource_type == "Driver"
    ));
}

#[test]
fn test_promote_appends_overnight_vehicles_in_order() {
    let store: QueueStore = create_test_store();
    enqueue(&store, "Sousse", "EARLY");
    park(&store, "Sousse", "TN-3", "11223344").unwrap();
    park(&store, "Sousse", "TN-1", "12345678").unwrap();

    let response: PromoteOvernightResponse = promote_overnight(
        &store,
        "Sousse",
        &create_test_supervisor(),
        create_test_cause(),
    )
    .unwrap();

    assert_eq!(response.promoted, 2);
    assert_eq!(vehicle_order(&store, "Sousse"), vec!["EARLY", "TN-3", "TN-1"]);
    let promoted_types: Vec<&str> = response
        .entries
        .iter()
        .skip(1)
        .map(|e| e.queue_type.as_str())
        .collect();
    assert_eq!(promoted_types, vec!["OVERNIGHT", "OVERNIGHT"]);
    assert!(
        list_overnight(&store, "Sousse", &create_test_supervisor())
            .unwrap()
            .entries
            .is_empty()
    );
}

#[test]
fn test_promote_with_nothing_parked_moves_nothing() {
    let store: QueueStore = create_test_store();
    enqueue(&store, "Sousse", "A");

    let response: PromoteOvernightResponse = promote_overnight(
        &store,
        "Sousse",
        &create_test_supervisor(),
        create_test_cause(),
    )
    .unwrap();

    assert_eq!(response.promoted, 0);
    assert_eq!(response.entries.len(), 1);
}

#[test]
fn test_promote_conflict_leaves_both_lists_unchanged() {
    let store: QueueStore = create_test_store();
    park(&store, "Sousse", "TN-1", "12345678").unwrap();
    enqueue(&store, "Monastir", "TN-1");

    let result: Result<PromoteOvernightResponse, ApiError> = promote_overnight(
        &store,
        "Sousse",
        &create_test_supervisor(),
        create_test_cause(),
    );

    assert!(matches!(
        result.unwrap_err(),
        ApiError::DomainRuleViolation { rule, .. } if rule == "one_slot_per_vehicle"
    ));
    assert_eq!(
        list_overnight(&store, "Sousse", &create_test_supervisor())
            .unwrap()
            .entries
            .len(),
        1
    );
    assert!(vehicle_order(&store, "Sousse").is_empty());
}

#[test]
fn test_promote_refused_while_station_closed() {
    let store: QueueStore = create_test_store();
    park(&store, "Sousse", "TN-1", "12345678").unwrap();
    set_operational(
        &store,
        &SetOperationalRequest { operational: false },
        &create_test_supervisor(),
        create_test_cause(),
    )
    .unwrap();

    let result: Result<PromoteOvernightResponse, ApiError> = promote_overnight(
        &store,
        "Sousse",
        &create_test_supervisor(),
        create_test_cause(),
    );

    assert!(matches!(
        result.unwrap_err(),
        ApiError::DomainRuleViolation { rule, .. } if rule == "station_operational"
    ));
    assert!(vehicle_order(&store, "Sousse").is_empty());
}

#[test]
fn test_mark_ready_twice_is_rejected() {
    let store: QueueStore = create_test_store();
    let id: u64 = park(&store, "Sousse", "TN-1", "12345678").unwrap().entry.id;

    let ready: OvernightEntryResponse =
        mark_ready_for_transfer(&store, id, &create_test_supervisor(), create_test_cause())
            .unwrap();
    assert_eq!(ready.entry.status, "READY_FOR_TRANSFER");

    let result: Result<OvernightEntryResponse, ApiError> =
        mark_ready_for_transfer(&store, id, &create_test_supervisor(), create_test_cause());
    assert!(matches!(
        result.unwrap_err(),
        ApiError::DomainRuleViolation { rule, .. } if rule == "status_transition"
    ));
}

#[test]
fn test_remove_overnight_renumbers_remaining() {
    let store: QueueStore = create_test_store();
    let first: u64 = park(&store, "Sousse", "TN-1", "12345678").unwrap().entry.id;
    park(&store, "Sousse", "TN-3", "11223344").unwrap();

    let removed: OvernightEntryResponse =
        remove_overnight(&store, first, &create_test_supervisor(), create_test_cause()).unwrap();

    assert_eq!(removed.entry.vehicle_id, "TN-1");
    let remaining: OvernightQueueResponse =
        list_overnight(&store, "Sousse", &create_test_supervisor()).unwrap();
    assert_eq!(remaining.entries.len(), 1);
    assert_eq!(remaining.entries[0].vehicle_id, "TN-3");
    assert_eq!(remaining.entries[0].position, 1);
}
