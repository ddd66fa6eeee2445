// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::queue_entry::{EntryStatus, QueueEntry, QueueType};
use crate::types::Destination;
use serde::{Deserialize, Serialize};

/// Seat and vehicle totals for one destination's active queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueStats {
    /// The destination summarized.
    pub destination: Destination,
    /// Vehicles currently queued.
    pub vehicle_count: u32,
    /// Sum of seat capacity over queued vehicles.
    pub total_seats: u32,
    /// Seats still available.
    pub available_seats: u32,
    /// Seats already booked.
    pub booked_seats: u32,
    /// Booked seats as a whole percentage of total seats (0 when empty).
    pub occupancy_percent: u32,
    /// Entries in `WAITING`.
    pub waiting: u32,
    /// Entries in `LOADING`.
    pub loading: u32,
    /// Entries in `READY`.
    pub ready: u32,
    /// Entries promoted from the overnight list.
    pub from_overnight: u32,
}

/// Summarizes a destination's active queue.
///
/// # Arguments
///
/// * `destination` - The destination being summarized
/// * `entries` - Its active entries, in any order
#[must_use]
pub fn compute_queue_stats(destination: &Destination, entries: &[QueueEntry]) -> QueueStats {
    let mut stats: QueueStats = QueueStats {
        destination: destination.clone(),
        vehicle_count: 0,
        total_seats: 0,
        available_seats: 0,
        booked_seats: 0,
        occupancy_percent: 0,
        waiting: 0,
        loading: 0,
        ready: 0,
        from_overnight: 0,
    };

    for entry in entries {
        stats.vehicle_count += 1;
        stats.total_seats += entry.total_seats;
        stats.available_seats += entry.available_seats;
        stats.booked_seats += entry.booked_seats();
        match entry.status {
            EntryStatus::Waiting => stats.waiting += 1,
            EntryStatus::Loading => stats.loading += 1,
            EntryStatus::Ready => stats.ready += 1,
            EntryStatus::Departed => {}
        }
        if entry.queue_type == QueueType::Overnight {
            stats.from_overnight += 1;
        }
    }

    stats.occupancy_percent = occupancy_percent(stats.booked_seats, stats.total_seats);
    stats
}

fn occupancy_percent(booked: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let percent: u64 = u64::from(booked) * 100 / u64::from(total);
    u32::try_from(percent).unwrap_or(100)
}
