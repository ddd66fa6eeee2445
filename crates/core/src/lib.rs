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

mod apply;
mod command;
mod error;
mod occupancy;
mod state;
mod store;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use apply::{apply, apply_bootstrap};
pub use command::Command;
pub use error::CoreError;
pub use occupancy::{Slot, VehicleOccupancy};
pub use state::{
    Booking, BootstrapResult, Outcome, Promotion, SeatAllocation, State, StationMetadata,
    TransitionResult,
};
pub use store::{DEFAULT_OVERNIGHT_SEATS, QueueStore};
