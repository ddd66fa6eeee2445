// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Destination, DriverCin, EntryId, QueueEntry, QueueType, Vehicle, VehicleId};

pub fn create_test_entry(id: u64, position: u32, total_seats: u32) -> QueueEntry {
    QueueEntry::new(
        EntryId::new(id),
        VehicleId::new(&format!("V{id}")),
        Destination::new("Sousse"),
        position,
        total_seats,
        QueueType::Regular,
    )
}

pub fn create_test_vehicle(id: &str, cin: &str, capacity: u32) -> Vehicle {
    Vehicle::new(
        VehicleId::new(id),
        format!("{id} TUN 2024"),
        String::from("Test Driver"),
        DriverCin::parse(cin).unwrap(),
        capacity,
        Some(Destination::new("Sousse")),
    )
}
