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

//! API boundary for the station queue.
//!
//! Handlers here authorize staff, parse requests into domain values, call
//! the [`louaj::QueueStore`] and translate results into response types.
//! This is the first layer that logs.

mod auth;
mod error;
mod handlers;
mod request_response;
mod station_config;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthorizationService, Role, authenticate_stub};
pub use error::{ApiError, AuthError, translate_core_error, translate_domain_error};
pub use handlers::{
    adjust_entry_seats, book_seats, destination_audit_events, enqueue_vehicle, list_bookings,
    list_destinations, list_overnight, list_queue, mark_ready_for_transfer, park_overnight,
    park_overnight_by_driver, promote_destination, promote_overnight, queue_stats,
    recent_audit_events, register_destination, register_vehicle, remove_entry, remove_overnight,
    reorder_queue, set_estimated_departure, set_fare, set_operational, station_stats,
    update_entry_status, verify_ticket,
};
pub use request_response::{
    AdjustSeatsRequest, AuditEventView, BookSeatsRequest, BookingListResponse, BookingResponse,
    BookingView, DestinationListResponse, DestinationView, EnqueueVehicleRequest, EntryResponse,
    FareResponse, OperationalResponse, OvernightEntryResponse, OvernightEntryView,
    OvernightQueueResponse, ParkByDriverRequest, ParkOvernightRequest, PromoteOvernightResponse,
    QueueEntryView, QueueResponse, QueueStatsResponse, RegisterDestinationRequest,
    RegisterVehicleRequest, ReorderQueueRequest, SeatAllocationView, SetDepartureRequest,
    SetFareRequest, SetOperationalRequest, StationStatsResponse, UpdateStatusRequest,
    VehicleResponse,
};
pub use station_config::{StationConfig, StationConfigError, VehicleConfig};
