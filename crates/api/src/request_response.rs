// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use louaj::{Booking, SeatAllocation};
use louaj_audit::AuditEvent;
use louaj_domain::{Destination, Fare, OvernightEntry, QueueEntry, QueueStats, Vehicle};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

// ============================================================================
// Shared views
// ============================================================================

/// One active queue slot as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueEntryView {
    /// Entry id.
    pub id: u64,
    /// The queued vehicle.
    pub vehicle_id: String,
    /// The destination served.
    pub destination: String,
    /// 1-based queue position.
    pub position: u32,
    /// Seat capacity.
    pub total_seats: u32,
    /// Seats still free.
    pub available_seats: u32,
    /// Seats already sold.
    pub booked_seats: u32,
    /// `WAITING`, `LOADING`, `READY` or `DEPARTED`.
    pub status: String,
    /// `REGULAR` or `OVERNIGHT`.
    pub queue_type: String,
    /// Expected departure, if known.
    #[serde(with = "time::serde::rfc3339::option")]
    pub estimated_departure: Option<OffsetDateTime>,
}

impl From<&QueueEntry> for QueueEntryView {
    fn from(entry: &QueueEntry) -> Self {
        Self {
            id: entry.id.value(),
            vehicle_id: entry.vehicle_id.value().to_string(),
            destination: entry.destination.name().to_string(),
            position: entry.position,
            total_seats: entry.total_seats,
            available_seats: entry.available_seats,
            booked_seats: entry.booked_seats(),
            status: entry.status.as_str().to_string(),
            queue_type: entry.queue_type.as_str().to_string(),
            estimated_departure: entry.estimated_departure,
        }
    }
}

/// One overnight slot as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvernightEntryView {
    /// Entry id.
    pub id: u64,
    /// The parked vehicle.
    pub vehicle_id: String,
    /// The destination it will serve.
    pub destination: String,
    /// 1-based position in the overnight list.
    pub position: u32,
    /// Driver who registered the vehicle.
    pub driver_cin: String,
    /// Seat capacity carried into the morning queue.
    pub total_seats: u32,
    /// When it was parked.
    #[serde(with = "time::serde::rfc3339")]
    pub entered_at: OffsetDateTime,
    /// Staff notes.
    pub notes: Option<String>,
    /// `PARKED` or `READY_FOR_TRANSFER`.
    pub status: String,
}

impl From<&OvernightEntry> for OvernightEntryView {
    fn from(entry: &OvernightEntry) -> Self {
        Self {
            id: entry.id.value(),
            vehicle_id: entry.vehicle_id.value().to_string(),
            destination: entry.destination.name().to_string(),
            position: entry.position,
            driver_cin: entry.driver_cin.value().to_string(),
            total_seats: entry.total_seats,
            entered_at: entry.entered_at,
            notes: entry.notes.clone(),
            status: entry.status.as_str().to_string(),
        }
    }
}

/// A destination as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationView {
    /// Destination name.
    pub name: String,
    /// Station reference, if any.
    pub station_id: Option<String>,
    /// Per-seat price in dinars.
    pub base_price: String,
}

impl DestinationView {
    /// Builds a view of a destination and its fare.
    #[must_use]
    pub fn new(destination: &Destination, fare: Fare) -> Self {
        Self {
            name: destination.name().to_string(),
            station_id: destination.station_id().map(str::to_string),
            base_price: fare.to_string(),
        }
    }
}

// ============================================================================
// Active queue
// ============================================================================

/// A destination's active queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueResponse {
    /// The destination.
    pub destination: String,
    /// Entries in position order.
    pub entries: Vec<QueueEntryView>,
}

impl QueueResponse {
    /// Builds a response from store entries.
    #[must_use]
    pub fn new(destination: &Destination, entries: &[QueueEntry]) -> Self {
        Self {
            destination: destination.name().to_string(),
            entries: entries.iter().map(QueueEntryView::from).collect(),
        }
    }
}

/// API request to append a vehicle to a queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnqueueVehicleRequest {
    /// The arriving vehicle.
    pub vehicle_id: String,
    /// Seat capacity; defaults to the registered capacity.
    #[serde(default)]
    pub total_seats: Option<u32>,
    /// `REGULAR` (default) or `OVERNIGHT`.
    #[serde(default)]
    pub queue_type: Option<String>,
}

/// API request to reorder a queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderQueueRequest {
    /// Every current entry id in the desired order.
    pub ordered_ids: Vec<u64>,
}

/// API request to change an entry's status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    /// The requested status wire name.
    pub status: String,
}

/// API request to book or cancel seats on one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustSeatsRequest {
    /// Seats booked; negative to cancel.
    pub delta: i32,
}

/// API request to set or clear an entry's expected departure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetDepartureRequest {
    /// The new estimate; `null` clears it.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub estimated_departure: Option<OffsetDateTime>,
}

/// API response for operations on a single active entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryResponse {
    /// The entry after the operation.
    pub entry: QueueEntryView,
    /// A success message.
    pub message: String,
}

// ============================================================================
// Bookings
// ============================================================================

/// API request to sell a ticket on the next vehicles out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSeatsRequest {
    /// The destination travelled to.
    pub destination: String,
    /// Seats to book.
    pub seats: u32,
    /// The passenger's name.
    pub customer_name: String,
    /// The passenger's phone number.
    #[serde(default)]
    pub customer_phone: Option<String>,
}

/// Seats taken from one vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatAllocationView {
    /// Entry id.
    pub entry_id: u64,
    /// The vehicle carrying the passengers.
    pub vehicle_id: String,
    /// Queue position at booking time.
    pub position: u32,
    /// Seats taken on this vehicle.
    pub seats: u32,
}

impl From<&SeatAllocation> for SeatAllocationView {
    fn from(allocation: &SeatAllocation) -> Self {
        Self {
            entry_id: allocation.entry_id.value(),
            vehicle_id: allocation.vehicle_id.value().to_string(),
            position: allocation.position,
            seats: allocation.seats,
        }
    }
}

/// A sold ticket as returned to clients.
///
/// Prices are dinar amounts with three decimals, e.g. `"13.500"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingView {
    /// Booking number.
    pub booking_id: u64,
    /// The destination travelled to.
    pub destination: String,
    /// Seats booked in total.
    pub seats: u32,
    /// Per-vehicle split.
    pub allocations: Vec<SeatAllocationView>,
    /// The passenger's name.
    pub customer_name: String,
    /// The passenger's phone number.
    pub customer_phone: Option<String>,
    /// Price per seat.
    pub base_price: String,
    /// Price of the whole booking.
    pub total_price: String,
    /// Code printed on the ticket.
    pub verification_code: String,
    /// When the ticket was sold.
    #[serde(with = "time::serde::rfc3339")]
    pub booked_at: OffsetDateTime,
    /// Whether the ticket has been checked.
    pub verified: bool,
    /// When the ticket was checked.
    #[serde(with = "time::serde::rfc3339::option")]
    pub verified_at: Option<OffsetDateTime>,
}

impl From<&Booking> for BookingView {
    fn from(booking: &Booking) -> Self {
        Self {
            booking_id: booking.id,
            destination: booking.destination.name().to_string(),
            seats: booking.seats,
            allocations: booking
                .allocations
                .iter()
                .map(SeatAllocationView::from)
                .collect(),
            customer_name: booking.customer.name().to_string(),
            customer_phone: booking.customer.phone().map(str::to_string),
            base_price: booking.base_price.to_string(),
            total_price: booking.total_price.to_string(),
            verification_code: booking.verification_code.clone(),
            booked_at: booking.booked_at,
            verified: booking.is_verified(),
            verified_at: booking.verified_at,
        }
    }
}

/// API response for a ticket sale or check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingResponse {
    /// The booking after the operation.
    pub booking: BookingView,
    /// A success message.
    pub message: String,
}

/// A destination's tickets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingListResponse {
    /// The destination.
    pub destination: String,
    /// Tickets, oldest first.
    pub bookings: Vec<BookingView>,
}

// ============================================================================
// Overnight queue
// ============================================================================

/// API request to park a vehicle overnight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParkOvernightRequest {
    /// The parked vehicle.
    pub vehicle_id: String,
    /// The registering driver's CIN.
    pub driver_cin: String,
    /// Staff notes.
    #[serde(default)]
    pub notes: Option<String>,
}

/// API request to park a vehicle overnight by its driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParkByDriverRequest {
    /// The driver's CIN.
    pub driver_cin: String,
    /// Staff notes.
    #[serde(default)]
    pub notes: Option<String>,
}

/// A destination's overnight list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvernightQueueResponse {
    /// The destination.
    pub destination: String,
    /// Entries in position order.
    pub entries: Vec<OvernightEntryView>,
}

/// API response for operations on a single overnight entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvernightEntryResponse {
    /// The entry after the operation.
    pub entry: OvernightEntryView,
    /// A success message.
    pub message: String,
}

/// API response for a promotion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromoteOvernightResponse {
    /// The destination.
    pub destination: String,
    /// How many vehicles moved into the active queue.
    pub promoted: usize,
    /// The active queue afterwards.
    pub entries: Vec<QueueEntryView>,
}

// ============================================================================
// Statistics and audit
// ============================================================================

/// Occupancy figures for one destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueStatsResponse {
    /// The destination.
    pub destination: String,
    /// Vehicles queued.
    pub vehicle_count: u32,
    /// Total seats across queued vehicles.
    pub total_seats: u32,
    /// Seats still free.
    pub available_seats: u32,
    /// Seats sold.
    pub booked_seats: u32,
    /// Booked share of total seats, in whole percent.
    pub occupancy_percent: u32,
    /// Entries waiting.
    pub waiting: u32,
    /// Entries loading.
    pub loading: u32,
    /// Entries ready.
    pub ready: u32,
    /// Entries promoted from overnight.
    pub from_overnight: u32,
}

impl From<&QueueStats> for QueueStatsResponse {
    fn from(stats: &QueueStats) -> Self {
        Self {
            destination: stats.destination.name().to_string(),
            vehicle_count: stats.vehicle_count,
            total_seats: stats.total_seats,
            available_seats: stats.available_seats,
            booked_seats: stats.booked_seats,
            occupancy_percent: stats.occupancy_percent,
            waiting: stats.waiting,
            loading: stats.loading,
            ready: stats.ready,
            from_overnight: stats.from_overnight,
        }
    }
}

/// Occupancy figures for the whole station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationStatsResponse {
    /// Vehicles queued across all destinations.
    pub total_vehicles: u32,
    /// Seats sold across all destinations.
    pub total_booked_seats: u32,
    /// Per-destination figures.
    pub destinations: Vec<QueueStatsResponse>,
}

/// One audit event as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEventView {
    /// Sequence number.
    pub event_id: Option<u64>,
    /// Destination scope, if any.
    pub destination: Option<String>,
    /// Who acted.
    pub actor_id: String,
    /// `staff`, `supervisor` or `scheduler`.
    pub actor_type: String,
    /// Request or trigger id.
    pub cause_id: String,
    /// Action name.
    pub action: String,
    /// Action details.
    pub details: Option<String>,
    /// State before.
    pub before: String,
    /// State after.
    pub after: String,
}

impl From<&AuditEvent> for AuditEventView {
    fn from(event: &AuditEvent) -> Self {
        Self {
            event_id: event.event_id,
            destination: event.destination.as_ref().map(|d| d.name().to_string()),
            actor_id: event.actor.id.clone(),
            actor_type: event.actor.actor_type.clone(),
            cause_id: event.cause.id.clone(),
            action: event.action.name.clone(),
            details: event.action.details.clone(),
            before: event.before.data.clone(),
            after: event.after.data.clone(),
        }
    }
}

// ============================================================================
// Station setup
// ============================================================================

/// API request to register a destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterDestinationRequest {
    /// Destination name.
    pub name: String,
    /// Station reference.
    #[serde(default)]
    pub station_id: Option<String>,
    /// Per-seat price in dinars, e.g. `"4.500"`.
    #[serde(default)]
    pub base_price: Option<String>,
}

/// API request to set a destination's per-seat price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetFareRequest {
    /// Per-seat price in dinars, e.g. `"4.500"`.
    pub base_price: String,
}

/// A destination's per-seat price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FareResponse {
    /// The destination.
    pub destination: String,
    /// Per-seat price in dinars.
    pub base_price: String,
}

/// API request to open or close the station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetOperationalRequest {
    /// Whether bookings and promotions are accepted.
    pub operational: bool,
}

/// Whether the station is open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationalResponse {
    /// Whether bookings and promotions are accepted.
    pub operational: bool,
    /// A success message.
    pub message: String,
}

/// Registered destinations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationListResponse {
    /// Destinations in registration order.
    pub destinations: Vec<DestinationView>,
}

/// API request to register a vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterVehicleRequest {
    /// Vehicle id.
    pub vehicle_id: String,
    /// License plate.
    pub license_plate: String,
    /// Driver's full name.
    pub driver_name: String,
    /// Driver's CIN.
    pub driver_cin: String,
    /// Passenger seats.
    pub capacity: u32,
    /// Route normally served.
    #[serde(default)]
    pub assigned_destination: Option<String>,
}

/// A registered vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleResponse {
    /// Vehicle id.
    pub vehicle_id: String,
    /// License plate.
    pub license_plate: String,
    /// Driver's full name.
    pub driver_name: String,
    /// Driver's CIN.
    pub driver_cin: String,
    /// Passenger seats.
    pub capacity: u32,
    /// Route normally served.
    pub assigned_destination: Option<String>,
}

impl From<&Vehicle> for VehicleResponse {
    fn from(vehicle: &Vehicle) -> Self {
        Self {
            vehicle_id: vehicle.vehicle_id.value().to_string(),
            license_plate: vehicle.license_plate.clone(),
            driver_name: vehicle.driver_name.clone(),
            driver_cin: vehicle.driver_cin.value().to_string(),
            capacity: vehicle.capacity,
            assigned_destination: vehicle
                .assigned_destination
                .as_ref()
                .map(|d| d.name().to_string()),
        }
    }
}
