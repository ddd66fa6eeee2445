// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod booking;
mod error;
mod ordering;
mod queue_entry;
mod schedule;
mod stats;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use booking::{Customer, Fare, MILLIMES_PER_DINAR};
pub use error::{DomainError, QueueClass};
pub use ordering::{
    is_contiguous, next_position, renumber_active, renumber_overnight, validate_permutation,
};
pub use queue_entry::{EntryStatus, OvernightEntry, OvernightStatus, QueueEntry, QueueType};
pub use schedule::{DEFAULT_TIMEZONE, PromotionSchedule, next_promotion_at};
pub use stats::{QueueStats, compute_queue_stats};

// Re-export public types
pub use types::{Destination, DriverCin, EntryId, MAX_VEHICLE_CAPACITY, Vehicle, VehicleId};
pub use validation::{
    MAX_SEATS_PER_BOOKING, apply_seat_delta, validate_seat_request, validate_status_transition,
    validate_vehicle_fields,
};
