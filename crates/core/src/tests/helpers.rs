// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Command, QueueStore, State};
use louaj_audit::{Actor, Cause};
use louaj_domain::{
    Customer, Destination, DriverCin, EntryId, Fare, OvernightEntry, OvernightStatus, QueueEntry,
    QueueType, Vehicle, VehicleId,
};
use time::macros::datetime;

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("staff-12"), String::from("staff"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Desk request"))
}

pub fn sousse() -> Destination {
    Destination::new("Sousse")
}

pub fn monastir() -> Destination {
    Destination::new("Monastir")
}

/// Builds a Sousse state whose active queue holds `V1..Vn`, ids `1..n`,
/// eight seats each.
pub fn create_state_with_vehicles(count: u64) -> State {
    let mut state: State = State::new(sousse());
    for id in 1..=count {
        state.active.push(QueueEntry::new(
            EntryId::new(id),
            VehicleId::new(&format!("V{id}")),
            sousse(),
            u32::try_from(id).unwrap(),
            8,
            QueueType::Regular,
        ));
    }
    state
}

pub fn create_overnight_entry(id: u64, vehicle: &str, position: u32) -> OvernightEntry {
    OvernightEntry {
        id: EntryId::new(id),
        vehicle_id: VehicleId::new(vehicle),
        destination: sousse(),
        position,
        driver_cin: DriverCin::parse("12345678").unwrap(),
        total_seats: 8,
        entered_at: datetime!(2026-03-01 22:15 UTC),
        notes: None,
        status: OvernightStatus::Parked,
    }
}

pub fn create_test_customer() -> Customer {
    Customer::new("Salma Trabelsi", Some("98123456")).unwrap()
}

/// A ticket sale of `seats` seats at 4.500 TND per seat.
pub fn book_command(seats: u32, verification_code: &str) -> Command {
    Command::BookSeats {
        booking_id: 1,
        seats,
        customer: create_test_customer(),
        base_price: Fare::from_millimes(4500),
        verification_code: verification_code.to_string(),
        booked_at: datetime!(2026-03-02 07:30 UTC),
    }
}

pub fn create_test_vehicle(
    id: &str,
    cin: &str,
    capacity: u32,
    assigned: Option<Destination>,
) -> Vehicle {
    Vehicle::new(
        VehicleId::new(id),
        format!("{id} TUN 2024"),
        String::from("Test Driver"),
        DriverCin::parse(cin).unwrap(),
        capacity,
        assigned,
    )
}

/// A store with Sousse and Monastir registered.
pub fn create_test_store() -> QueueStore {
    let store: QueueStore = QueueStore::new();
    store
        .register_destination(sousse(), create_test_actor(), create_test_cause())
        .unwrap();
    store
        .register_destination(monastir(), create_test_actor(), create_test_cause())
        .unwrap();
    store
}

/// Enqueues regular eight-seat vehicles and returns their entries.
pub fn enqueue_all(
    store: &QueueStore,
    destination: &Destination,
    vehicles: &[&str],
) -> Vec<QueueEntry> {
    vehicles
        .iter()
        .map(|v| {
            store
                .enqueue(
                    destination,
                    VehicleId::new(v),
                    8,
                    QueueType::Regular,
                    create_test_actor(),
                    create_test_cause(),
                )
                .unwrap()
        })
        .collect()
}

pub fn vehicle_order(entries: &[QueueEntry]) -> Vec<(String, u32)> {
    entries
        .iter()
        .map(|e| (e.vehicle_id.value().to_string(), e.position))
        .collect()
}
