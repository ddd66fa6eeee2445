// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use louaj::QueueStore;
use louaj_audit::{Actor, Cause};
use louaj_domain::{Destination, DriverCin, Vehicle, VehicleId};

use crate::{AuthenticatedActor, EnqueueVehicleRequest, EntryResponse, Role, enqueue_vehicle};

pub fn create_test_staff() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("staff-123"), Role::Staff)
}

pub fn create_test_supervisor() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("supervisor-456"), Role::Supervisor)
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("api-req-456"), String::from("API request"))
}

fn setup_actor() -> Actor {
    Actor::new(String::from("setup"), String::from("system"))
}

fn register_vehicle(
    store: &QueueStore,
    id: &str,
    cin: &str,
    capacity: u32,
    assigned: Option<&str>,
) {
    let vehicle: Vehicle = Vehicle::new(
        VehicleId::new(id),
        format!("{id} TUN"),
        format!("Driver {id}"),
        DriverCin::parse(cin).unwrap(),
        capacity,
        assigned.map(Destination::new),
    );
    store
        .register_vehicle(vehicle, setup_actor(), create_test_cause())
        .unwrap();
}

/// A store with Sousse and Monastir registered and three vehicles:
///
/// - `TN-1`, 8 seats, driver `12345678`, assigned to Sousse
/// - `TN-2`, 4 seats, driver `87654321`, assigned to Monastir
/// - `TN-3`, 8 seats, driver `11223344`, unassigned
pub fn create_test_store() -> QueueStore {
    let store: QueueStore = QueueStore::new();
    for name in ["Sousse", "Monastir"] {
        store
            .register_destination(Destination::new(name), setup_actor(), create_test_cause())
            .unwrap();
    }
    register_vehicle(&store, "TN-1", "12345678", 8, Some("Sousse"));
    register_vehicle(&store, "TN-2", "87654321", 4, Some("Monastir"));
    register_vehicle(&store, "TN-3", "11223344", 8, None);
    store
}

pub fn enqueue_request(vehicle_id: &str, total_seats: Option<u32>) -> EnqueueVehicleRequest {
    EnqueueVehicleRequest {
        vehicle_id: vehicle_id.to_string(),
        total_seats,
        queue_type: None,
    }
}

pub fn enqueue(store: &QueueStore, destination: &str, vehicle_id: &str) -> EntryResponse {
    enqueue_vehicle(
        store,
        destination,
        &enqueue_request(vehicle_id, Some(8)),
        &create_test_staff(),
        create_test_cause(),
    )
    .unwrap()
}

pub fn vehicle_order(store: &QueueStore, destination: &str) -> Vec<String> {
    crate::list_queue(store, destination)
        .unwrap()
        .entries
        .into_iter()
        .map(|e| e.vehicle_id)
        .collect()
}
