// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions.
//!
//! Each handler authorizes the actor, turns the request into domain
//! values, calls the store and translates the outcome. Handlers log
//! successful mutations at `info` and rejected requests at `warn`.

use louaj::{Booking, CoreError, Promotion, QueueStore};
use louaj_audit::{Actor, Cause};
use louaj_domain::{
    Customer, Destination, DomainError, DriverCin, EntryId, EntryStatus, Fare, OvernightEntry,
    QueueEntry, QueueStats, QueueType, Vehicle, VehicleId,
};

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::error::{ApiError, translate_core_error, translate_domain_error};
use crate::request_response::{
    AdjustSeatsRequest, AuditEventView, BookSeatsRequest, BookingListResponse, BookingResponse,
    BookingView, DestinationListResponse, DestinationView, EnqueueVehicleRequest, EntryResponse,
    FareResponse, OperationalResponse, OvernightEntryResponse, OvernightEntryView,
    OvernightQueueResponse, ParkByDriverRequest, ParkOvernightRequest, PromoteOvernightResponse,
    QueueEntryView, QueueResponse, QueueStatsResponse, RegisterDestinationRequest,
    RegisterVehicleRequest, ReorderQueueRequest, SetDepartureRequest, SetFareRequest,
    SetOperationalRequest, StationStatsResponse, UpdateStatusRequest, VehicleResponse,
};

// ============================================================================
// Helpers
// ============================================================================

/// Translates a store error and logs the rejection.
fn rejected(operation: &'static str, err: CoreError) -> ApiError {
    let api_error: ApiError = translate_core_error(err);
    tracing::warn!(operation, error = %api_error, "Request rejected");
    api_error
}

/// Translates a parse error and logs the rejection.
fn invalid(operation: &'static str, err: DomainError) -> ApiError {
    let api_error: ApiError = translate_domain_error(err);
    tracing::warn!(operation, error = %api_error, "Request rejected");
    api_error
}

fn parse_destination(operation: &'static str, name: &str) -> Result<Destination, ApiError> {
    Destination::parse(name).map_err(|e| invalid(operation, e))
}

fn parse_fare(operation: &'static str, value: &str) -> Result<Fare, ApiError> {
    Fare::parse(value).map_err(|e| invalid(operation, e))
}

fn parse_driver_cin(operation: &'static str, value: &str) -> Result<DriverCin, ApiError> {
    DriverCin::parse(value).map_err(|e| invalid(operation, e))
}

fn parse_vehicle_id(operation: &'static str, value: &str) -> Result<VehicleId, ApiError> {
    let vehicle_id: VehicleId = VehicleId::new(value);
    if vehicle_id.value().is_empty() {
        return Err(invalid(
            operation,
            DomainError::InvalidVehicle(String::from("Vehicle id cannot be empty")),
        ));
    }
    Ok(vehicle_id)
}

fn authorize_overnight(
    operation: &'static str,
    authenticated_actor: &AuthenticatedActor,
) -> Result<(), ApiError> {
    AuthorizationService::authorize_overnight_operation(authenticated_actor, operation).map_err(
        |e| {
            tracing::warn!(operation, actor = %authenticated_actor.id, "Supervisor role required");
            ApiError::from(e)
        },
    )
}

fn authorize_setup(
    operation: &'static str,
    authenticated_actor: &AuthenticatedActor,
) -> Result<(), ApiError> {
    AuthorizationService::authorize_station_setup(authenticated_actor, operation).map_err(|e| {
        tracing::warn!(operation, actor = %authenticated_actor.id, "Supervisor role required");
        ApiError::from(e)
    })
}

fn entry_response(entry: &QueueEntry, message: String) -> EntryResponse {
    EntryResponse {
        entry: QueueEntryView::from(entry),
        message,
    }
}

fn booking_response(booking: &Booking, message: String) -> BookingResponse {
    BookingResponse {
        booking: BookingView::from(booking),
        message,
    }
}

fn overnight_response(entry: &OvernightEntry, message: String) -> OvernightEntryResponse {
    OvernightEntryResponse {
        entry: OvernightEntryView::from(entry),
        message,
    }
}

// ============================================================================
// Station setup
// ============================================================================

/// Lists registered destinations.
#[must_use]
pub fn list_destinations(store: &QueueStore) -> DestinationListResponse {
    DestinationListResponse {
        destinations: store
            .destinations()
            .iter()
            .map(|d| DestinationView::new(d, store.fare(d)))
            .collect(),
    }
}

/// Registers a destination, optionally with its per-seat price.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not a supervisor
/// - The name is empty or the price malformed
/// - The destination is already registered
pub fn register_destination(
    store: &QueueStore,
    request: &RegisterDestinationRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<DestinationView, ApiError> {
    const OPERATION: &str = "register_destination";
    authorize_setup(OPERATION, authenticated_actor)?;

    let parsed: Destination = parse_destination(OPERATION, &request.name)?;
    let destination: Destination = match &request.station_id {
        Some(station_id) => Destination::with_station(parsed.name(), station_id),
        None => parsed,
    };
    let fare: Option<Fare> = request
        .base_price
        .as_deref()
        .map(|value| parse_fare(OPERATION, value))
        .transpose()?;

    let registered: Destination = store
        .register_destination(destination, authenticated_actor.to_audit_actor(), cause.clone())
        .map_err(|e| rejected(OPERATION, e))?;
    if let Some(fare) = fare {
        store
            .set_fare(
                registered.clone(),
                fare,
                authenticated_actor.to_audit_actor(),
                cause,
            )
            .map_err(|e| rejected(OPERATION, e))?;
    }

    tracing::info!(destination = %registered, actor = %authenticated_actor.id, "Destination registered");
    Ok(DestinationView::new(&registered, store.fare(&registered)))
}

/// Sets a destination's per-seat price.
///
/// # Errors
///
/// Returns an error if the actor is not a supervisor, the price is
/// malformed, or the destination is unknown.
pub fn set_fare(
    store: &QueueStore,
    destination: &str,
    request: &SetFareRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<FareResponse, ApiError> {
    const OPERATION: &str = "set_fare";
    authorize_setup(OPERATION, authenticated_actor)?;
    let destination: Destination = parse_destination(OPERATION, destination)?;
    let fare: Fare = parse_fare(OPERATION, &request.base_price)?;

    store
        .set_fare(
            destination.clone(),
            fare,
            authenticated_actor.to_audit_actor(),
            cause,
        )
        .map_err(|e| rejected(OPERATION, e))?;

    tracing::info!(destination = %destination, fare = %fare, actor = %authenticated_actor.id, "Fare set");
    Ok(FareResponse {
        destination: destination.name().to_string(),
        base_price: fare.to_string(),
    })
}

/// Opens or closes the station.
///
/// # Errors
///
/// Returns an error if the actor is not a supervisor.
pub fn set_operational(
    store: &QueueStore,
    request: &SetOperationalRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<OperationalResponse, ApiError> {
    const OPERATION: &str = "set_operational";
    authorize_setup(OPERATION, authenticated_actor)?;

    let operational: bool = store
        .set_operational(
            request.operational,
            authenticated_actor.to_audit_actor(),
            cause,
        )
        .map_err(|e| rejected(OPERATION, e))?;

    tracing::info!(operational, actor = %authenticated_actor.id, "Station status changed");
    let message: String = if operational {
        String::from("Station is open")
    } else {
        String::from("Station is closed; bookings and promotions are refused")
    };
    Ok(OperationalResponse {
        operational,
        message,
    })
}

/// Registers a vehicle in the fleet.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not a supervisor
/// - Any field is invalid
/// - The vehicle id is already registered
/// - The assigned destination is unknown
pub fn register_vehicle(
    store: &QueueStore,
    request: &RegisterVehicleRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<VehicleResponse, ApiError> {
    const OPERATION: &str = "register_vehicle";
    authorize_setup(OPERATION, authenticated_actor)?;

    let driver_cin: DriverCin = parse_driver_cin(OPERATION, &request.driver_cin)?;
    let assigned_destination: Option<Destination> = request
        .assigned_destination
        .as_deref()
        .map(|name| parse_destination(OPERATION, name))
        .transpose()?;

    let vehicle: Vehicle = Vehicle::new(
        VehicleId::new(&request.vehicle_id),
        request.license_plate.trim().to_string(),
        request.driver_name.trim().to_string(),
        driver_cin,
        request.capacity,
        assigned_destination,
    );

    let registered: Vehicle = store
        .register_vehicle(vehicle, authenticated_actor.to_audit_actor(), cause)
        .map_err(|e| rejected(OPERATION, e))?;

    tracing::info!(
        vehicle_id = %registered.vehicle_id,
        capacity = registered.capacity,
        actor = %authenticated_actor.id,
        "Vehicle registered"
    );
    Ok(VehicleResponse::from(&registered))
}

// ============================================================================
// Active queue
// ============================================================================

/// Returns a destination's active queue.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unregistered destination.
pub fn list_queue(store: &QueueStore, destination: &str) -> Result<QueueResponse, ApiError> {
    const OPERATION: &str = "list_queue";
    let destination: Destination = parse_destination(OPERATION, destination)?;
    let entries: Vec<QueueEntry> = store
        .list_by_destination(&destination)
        .map_err(|e| rejected(OPERATION, e))?;
    Ok(QueueResponse::new(&destination, &entries))
}

/// Appends a vehicle to a destination's active queue.
///
/// The seat count defaults to the vehicle's registered capacity.
///
/// # Errors
///
/// Returns an error if:
/// - The destination is unknown
/// - No seat count is given for an unregistered vehicle
/// - The vehicle already holds an active slot
pub fn enqueue_vehicle(
    store: &QueueStore,
    destination: &str,
    request: &EnqueueVehicleRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<EntryResponse, ApiError> {
    const OPERATION: &str = "enqueue_vehicle";
    let destination: Destination = parse_destination(OPERATION, destination)?;
    let vehicle_id: VehicleId = parse_vehicle_id(OPERATION, &request.vehicle_id)?;
    let queue_type: QueueType = match &request.queue_type {
        Some(value) => value.parse().map_err(|e| invalid(OPERATION, e))?,
        None => QueueType::Regular,
    };
    let total_seats: u32 = match request.total_seats {
        Some(seats) => seats,
        None => store
            .vehicle(&vehicle_id)
            .map(|v| v.capacity)
            .ok_or_else(|| {
                tracing::warn!(operation = OPERATION, vehicle_id = %vehicle_id, "Seat count missing");
                ApiError::InvalidInput {
                    field: String::from("total_seats"),
                    message: format!(
                        "Vehicle '{vehicle_id}' is not registered; total_seats is required"
                    ),
                }
            })?,
    };

    let entry: QueueEntry = store
        .enqueue(
            &destination,
            vehicle_id,
            total_seats,
            queue_type,
            authenticated_actor.to_audit_actor(),
            cause,
        )
        .map_err(|e| rejected(OPERATION, e))?;

    tracing::info!(
        destination = %destination,
        vehicle_id = %entry.vehicle_id,
        entry_id = entry.id.value(),
        position = entry.position,
        "Vehicle enqueued"
    );
    let message: String = format!(
        "Vehicle '{}' queued for {destination} at position {}",
        entry.vehicle_id, entry.position
    );
    Ok(entry_response(&entry, message))
}

/// Replaces a destination's queue order.
///
/// # Errors
///
/// Returns an error if the destination is unknown or the ids are not a
/// permutation of the current queue.
pub fn reorder_queue(
    store: &QueueStore,
    destination: &str,
    request: &ReorderQueueRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<QueueResponse, ApiError> {
    const OPERATION: &str = "reorder_queue";
    let destination: Destination = parse_destination(OPERATION, destination)?;
    let ordered_ids: Vec<EntryId> = request.ordered_ids.iter().copied().map(EntryId::new).collect();

    let entries: Vec<QueueEntry> = store
        .reorder(
            &destination,
            ordered_ids,
            authenticated_actor.to_audit_actor(),
            cause,
        )
        .map_err(|e| rejected(OPERATION, e))?;

    tracing::info!(destination = %destination, entries = entries.len(), "Queue reordered");
    Ok(QueueResponse::new(&destination, &entries))
}

/// Moves an entry one step along its status lifecycle.
///
/// A move to `DEPARTED` also removes the entry from its queue.
///
/// # Errors
///
/// Returns an error if the status is unknown, the entry does not exist,
/// or the transition is not allowed.
pub fn update_entry_status(
    store: &QueueStore,
    entry_id: u64,
    request: &UpdateStatusRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<EntryResponse, ApiError> {
    const OPERATION: &str = "update_entry_status";
    let status: EntryStatus = request.status.parse().map_err(|e| invalid(OPERATION, e))?;

    let entry: QueueEntry = store
        .update_status(
            EntryId::new(entry_id),
            status,
            authenticated_actor.to_audit_actor(),
            cause,
        )
        .map_err(|e| rejected(OPERATION, e))?;

    tracing::info!(
        entry_id,
        vehicle_id = %entry.vehicle_id,
        status = %entry.status,
        "Entry status updated"
    );
    let message: String = if entry.status == EntryStatus::Departed {
        format!("Vehicle '{}' departed", entry.vehicle_id)
    } else {
        format!("Vehicle '{}' is now {}", entry.vehicle_id, entry.status)
    };
    Ok(entry_response(&entry, message))
}

/// Books or cancels seats on one entry.
///
/// # Errors
///
/// Returns an error if the entry does not exist or the change would leave
/// the seat count out of range.
pub fn adjust_entry_seats(
    store: &QueueStore,
    entry_id: u64,
    request: &AdjustSeatsRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<EntryResponse, ApiError> {
    const OPERATION: &str = "adjust_entry_seats";
    let entry: QueueEntry = store
        .adjust_seats(
            EntryId::new(entry_id),
            request.delta,
            authenticated_actor.to_audit_actor(),
            cause,
        )
        .map_err(|e| rejected(OPERATION, e))?;

    tracing::info!(
        entry_id,
        delta = request.delta,
        available = entry.available_seats,
        "Seats adjusted"
    );
    let message: String = format!(
        "{} of {} seats available on '{}'",
        entry.available_seats, entry.total_seats, entry.vehicle_id
    );
    Ok(entry_response(&entry, message))
}

/// Sets or clears an entry's expected departure.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the entry does not exist.
pub fn set_estimated_departure(
    store: &QueueStore,
    entry_id: u64,
    request: &SetDepartureRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<EntryResponse, ApiError> {
    const OPERATION: &str = "set_estimated_departure";
    let entry: QueueEntry = store
        .set_estimated_departure(
            EntryId::new(entry_id),
            request.estimated_departure,
            authenticated_actor.to_audit_actor(),
            cause,
        )
        .map_err(|e| rejected(OPERATION, e))?;

    tracing::info!(entry_id, "Estimated departure updated");
    let message: String = format!("Estimated departure updated for '{}'", entry.vehicle_id);
    Ok(entry_response(&entry, message))
}

/// Removes an entry from its queue.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the entry does not exist.
pub fn remove_entry(
    store: &QueueStore,
    entry_id: u64,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<EntryResponse, ApiError> {
    const OPERATION: &str = "remove_entry";
    let entry: QueueEntry = store
        .remove(
            EntryId::new(entry_id),
            authenticated_actor.to_audit_actor(),
            cause,
        )
        .map_err(|e| rejected(OPERATION, e))?;

    tracing::info!(entry_id, vehicle_id = %entry.vehicle_id, "Entry removed");
    let message: String = format!(
        "Vehicle '{}' removed from {}",
        entry.vehicle_id, entry.destination
    );
    Ok(entry_response(&entry, message))
}

/// Sells a ticket on the next vehicles out for a destination.
///
/// The ticket is priced at the destination's fare and carries the
/// verification code checked at boarding.
///
/// # Errors
///
/// Returns an error if:
/// - The station is closed
/// - The destination is unknown
/// - The customer details are malformed
/// - The seat count is out of range
/// - The queue does not have enough free seats
pub fn book_seats(
    store: &QueueStore,
    request: &BookSeatsRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<BookingResponse, ApiError> {
    const OPERATION: &str = "book_seats";
    let destination: Destination = parse_destination(OPERATION, &request.destination)?;
    let customer: Customer =
        Customer::new(&request.customer_name, request.customer_phone.as_deref())
            .map_err(|e| invalid(OPERATION, e))?;

    let booking: Booking = store
        .book_seats(
            &destination,
            request.seats,
            customer,
            authenticated_actor.to_audit_actor(),
            cause,
        )
        .map_err(|e| rejected(OPERATION, e))?;

    tracing::info!(
        destination = %destination,
        booking_id = booking.id,
        seats = booking.seats,
        vehicles = booking.allocations.len(),
        total_price = %booking.total_price,
        "Ticket sold"
    );
    let message: String = format!(
        "{} seats to {destination} for {}: {} TND",
        booking.seats,
        booking.customer.name(),
        booking.total_price
    );
    Ok(booking_response(&booking, message))
}

/// Checks a ticket at boarding. Each ticket verifies once.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown code, or a
/// `single_verification` rule violation if the ticket was already checked.
pub fn verify_ticket(
    store: &QueueStore,
    verification_code: &str,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<BookingResponse, ApiError> {
    const OPERATION: &str = "verify_ticket";
    let booking: Booking = store
        .verify_ticket(
            verification_code,
            authenticated_actor.to_audit_actor(),
            cause,
        )
        .map_err(|e| rejected(OPERATION, e))?;

    tracing::info!(
        booking_id = booking.id,
        destination = %booking.destination,
        actor = %authenticated_actor.id,
        "Ticket verified"
    );
    let message: String = format!(
        "Ticket {} verified: {} seats to {}",
        booking.verification_code, booking.seats, booking.destination
    );
    Ok(booking_response(&booking, message))
}

/// Returns a destination's tickets.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unregistered destination.
pub fn list_bookings(
    store: &QueueStore,
    destination: &str,
) -> Result<BookingListResponse, ApiError> {
    const OPERATION: &str = "list_bookings";
    let destination: Destination = parse_destination(OPERATION, destination)?;
    let bookings: Vec<Booking> = store
        .list_bookings(&destination)
        .map_err(|e| rejected(OPERATION, e))?;
    Ok(BookingListResponse {
        destination: destination.name().to_string(),
        bookings: bookings.iter().map(BookingView::from).collect(),
    })
}

// ============================================================================
// Overnight queue
// ============================================================================

/// Parks a vehicle overnight.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not a supervisor
/// - The destination is unknown or the CIN malformed
/// - The vehicle is already parked overnight
pub fn park_overnight(
    store: &QueueStore,
    destination: &str,
    request: &ParkOvernightRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<OvernightEntryResponse, ApiError> {
    const OPERATION: &str = "park_overnight";
    authorize_overnight(OPERATION, authenticated_actor)?;
    let destination: Destination = parse_destination(OPERATION, destination)?;
    let vehicle_id: VehicleId = parse_vehicle_id(OPERATION, &request.vehicle_id)?;
    let driver_cin: DriverCin = parse_driver_cin(OPERATION, &request.driver_cin)?;

    let entry: OvernightEntry = store
        .enqueue_overnight(
            &destination,
            vehicle_id,
            driver_cin,
            request.notes.clone(),
            authenticated_actor.to_audit_actor(),
            cause,
        )
        .map_err(|e| rejected(OPERATION, e))?;

    tracing::info!(
        destination = %destination,
        vehicle_id = %entry.vehicle_id,
        position = entry.position,
        "Vehicle parked overnight"
    );
    let message: String = format!(
        "Vehicle '{}' parked overnight for {destination} at position {}",
        entry.vehicle_id, entry.position
    );
    Ok(overnight_response(&entry, message))
}

/// Parks the vehicle driven by a CIN at its assigned destination.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not a supervisor
/// - The CIN is malformed or unknown
/// - The vehicle has no assigned destination
/// - The vehicle is already parked overnight
pub fn park_overnight_by_driver(
    store: &QueueStore,
    request: &ParkByDriverRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<OvernightEntryResponse, ApiError> {
    const OPERATION: &str = "park_overnight_by_driver";
    authorize_overnight(OPERATION, authenticated_actor)?;
    let driver_cin: DriverCin = parse_driver_cin(OPERATION, &request.driver_cin)?;

    let entry: OvernightEntry = store
        .enqueue_overnight_by_driver(
            &driver_cin,
            request.notes.clone(),
            authenticated_actor.to_audit_actor(),
            cause,
        )
        .map_err(|e| rejected(OPERATION, e))?;

    tracing::info!(
        destination = %entry.destination,
        vehicle_id = %entry.vehicle_id,
        position = entry.position,
        "Vehicle parked overnight by driver"
    );
    let message: String = format!(
        "Vehicle '{}' parked overnight for {} at position {}",
        entry.vehicle_id, entry.destination, entry.position
    );
    Ok(overnight_response(&entry, message))
}

/// Returns a destination's overnight list.
///
/// # Errors
///
/// Returns an error if the actor is not a supervisor or the destination
/// is unknown.
pub fn list_overnight(
    store: &QueueStore,
    destination: &str,
    authenticated_actor: &AuthenticatedActor,
) -> Result<OvernightQueueResponse, ApiError> {
    const OPERATION: &str = "list_overnight";
    authorize_overnight(OPERATION, authenticated_actor)?;
    let destination: Destination = parse_destination(OPERATION, destination)?;
    let entries: Vec<OvernightEntry> = store
        .list_overnight(&destination)
        .map_err(|e| rejected(OPERATION, e))?;
    Ok(OvernightQueueResponse {
        destination: destination.name().to_string(),
        entries: entries.iter().map(OvernightEntryView::from).collect(),
    })
}

/// Marks an overnight entry ready for transfer.
///
/// # Errors
///
/// Returns an error if the actor is not a supervisor, the entry does not
/// exist, or it is already marked.
pub fn mark_ready_for_transfer(
    store: &QueueStore,
    entry_id: u64,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<OvernightEntryResponse, ApiError> {
    const OPERATION: &str = "mark_ready_for_transfer";
    authorize_overnight(OPERATION, authenticated_actor)?;

    let entry: OvernightEntry = store
        .mark_ready_for_transfer(
            EntryId::new(entry_id),
            authenticated_actor.to_audit_actor(),
            cause,
        )
        .map_err(|e| rejected(OPERATION, e))?;

    tracing::info!(entry_id, vehicle_id = %entry.vehicle_id, "Overnight entry ready for transfer");
    let message: String = format!("Vehicle '{}' is ready for transfer", entry.vehicle_id);
    Ok(overnight_response(&entry, message))
}

/// Removes an overnight entry.
///
/// # Errors
///
/// Returns an error if the actor is not a supervisor or the entry does
/// not exist.
pub fn remove_overnight(
    store: &QueueStore,
    entry_id: u64,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<OvernightEntryResponse, ApiError> {
    const OPERATION: &str = "remove_overnight";
    authorize_overnight(OPERATION, authenticated_actor)?;

    let entry: OvernightEntry = store
        .remove_overnight(
            EntryId::new(entry_id),
            authenticated_actor.to_audit_actor(),
            cause,
        )
        .map_err(|e| rejected(OPERATION, e))?;

    tracing::info!(entry_id, vehicle_id = %entry.vehicle_id, "Overnight entry removed");
    let message: String = format!(
        "Vehicle '{}' removed from the overnight list for {}",
        entry.vehicle_id, entry.destination
    );
    Ok(overnight_response(&entry, message))
}

/// Moves every overnight vehicle for a destination into its active queue.
///
/// # Errors
///
/// Returns an error if the actor is not a supervisor, the station is
/// closed, the destination is unknown, or a parked vehicle already holds
/// an active slot.
pub fn promote_overnight(
    store: &QueueStore,
    destination: &str,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<PromoteOvernightResponse, ApiError> {
    const OPERATION: &str = "promote_overnight";
    authorize_overnight(OPERATION, authenticated_actor)?;
    let destination: Destination = parse_destination(OPERATION, destination)?;
    promote_destination(
        store,
        &destination,
        authenticated_actor.to_audit_actor(),
        cause,
    )
}

/// Promotes one destination on behalf of any actor, including the
/// scheduler.
///
/// # Errors
///
/// Returns an error if the station is closed, the destination is unknown,
/// or a parked vehicle already holds an active slot.
pub fn promote_destination(
    store: &QueueStore,
    destination: &Destination,
    actor: Actor,
    cause: Cause,
) -> Result<PromoteOvernightResponse, ApiError> {
    const OPERATION: &str = "promote_overnight";
    let actor_id: String = actor.id.clone();
    let promotion: Promotion = store
        .promote_overnight(destination, actor, cause)
        .map_err(|e| rejected(OPERATION, e))?;

    tracing::info!(
        destination = %destination,
        actor = %actor_id,
        promoted = promotion.promoted,
        queue_length = promotion.queue.len(),
        "Overnight queue promoted"
    );
    Ok(PromoteOvernightResponse {
        destination: destination.name().to_string(),
        promoted: promotion.promoted,
        entries: promotion.queue.iter().map(QueueEntryView::from).collect(),
    })
}

// ============================================================================
// Statistics and audit
// ============================================================================

/// Returns occupancy figures for one destination.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unregistered destination.
pub fn queue_stats(store: &QueueStore, destination: &str) -> Result<QueueStatsResponse, ApiError> {
    const OPERATION: &str = "queue_stats";
    let destination: Destination = parse_destination(OPERATION, destination)?;
    let stats: QueueStats = store
        .queue_stats(&destination)
        .map_err(|e| rejected(OPERATION, e))?;
    Ok(QueueStatsResponse::from(&stats))
}

/// Returns occupancy figures for the whole station.
#[must_use]
pub fn station_stats(store: &QueueStore) -> StationStatsResponse {
    let destinations: Vec<QueueStatsResponse> = store
        .station_stats()
        .iter()
        .map(QueueStatsResponse::from)
        .collect();
    StationStatsResponse {
        total_vehicles: destinations.iter().map(|d| d.vehicle_count).sum(),
        total_booked_seats: destinations.iter().map(|d| d.booked_seats).sum(),
        destinations,
    }
}

/// Returns the most recent audit events, oldest first.
#[must_use]
pub fn recent_audit_events(store: &QueueStore, limit: usize) -> Vec<AuditEventView> {
    store
        .recent_audit_events(limit)
        .iter()
        .map(AuditEventView::from)
        .collect()
}

/// Returns retained audit events for one destination, oldest first.
///
/// # Errors
///
/// Returns `InvalidInput` if the destination name is empty.
pub fn destination_audit_events(
    store: &QueueStore,
    destination: &str,
) -> Result<Vec<AuditEventView>, ApiError> {
    let destination: Destination = parse_destination("destination_audit_events", destination)?;
    Ok(store
        .audit_events(&destination)
        .iter()
        .map(AuditEventView::from)
        .collect())
}
