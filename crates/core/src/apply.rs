// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::state::{
    Booking, BootstrapResult, Outcome, Promotion, SeatAllocation, State, StationMetadata,
    TransitionResult,
};
use louaj_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use louaj_domain::{
    DomainError, EntryId, EntryStatus, Fare, MAX_VEHICLE_CAPACITY, OvernightEntry, OvernightStatus,
    QueueClass, QueueEntry, QueueType, VehicleId, apply_seat_delta, next_position,
    renumber_active, renumber_overnight, validate_permutation, validate_seat_request,
    validate_status_transition, validate_vehicle_fields,
};

/// Applies a bootstrap command to the metadata, producing new metadata and audit event.
///
/// Bootstrap commands (`RegisterDestination`, `RegisterVehicle`, `SetFare`,
/// `SetOperational`) operate on station-wide metadata.
///
/// # Arguments
///
/// * `metadata` - The current station metadata (immutable)
/// * `command` - The bootstrap command to apply
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if:
/// - The command violates domain rules
/// - The command is not a bootstrap command
pub fn apply_bootstrap(
    metadata: &StationMetadata,
    command: Command,
    actor: Actor,
    cause: Cause,
) -> Result<BootstrapResult, CoreError> {
    match command {
        Command::RegisterDestination { destination } => {
            if metadata.has_destination(&destination) {
                return Err(CoreError::DomainViolation(
                    DomainError::DuplicateDestination(destination.name().to_string()),
                ));
            }

            let mut new_metadata: StationMetadata = metadata.clone();
            new_metadata.add_destination(destination.clone());

            let before: StateSnapshot =
                StateSnapshot::new(format!("destinations={}", metadata.destinations.len()));
            let after: StateSnapshot = StateSnapshot::new(format!(
                "destinations={}",
                new_metadata.destinations.len()
            ));
            let action: Action = Action::new(
                String::from("RegisterDestination"),
                Some(format!("Registered destination {destination}")),
            );
            let audit_event: AuditEvent =
                AuditEvent::new(Some(destination), actor, cause, action, before, after);

            Ok(BootstrapResult {
                new_metadata,
                audit_event,
            })
        }
        Command::RegisterVehicle { vehicle } => {
            validate_vehicle_fields(&vehicle)?;

            if metadata.vehicle(&vehicle.vehicle_id).is_some() {
                return Err(CoreError::DomainViolation(
                    DomainError::DuplicateVehicleRegistration(vehicle.vehicle_id),
                ));
            }

            if let Some(assigned) = &vehicle.assigned_destination
                && !metadata.has_destination(assigned)
            {
                return Err(CoreError::DomainViolation(DomainError::DestinationNotFound(
                    assigned.name().to_string(),
                )));
            }

            let details: String = format!(
                "Registered vehicle {} ({}), driver {}, capacity {}",
                vehicle.vehicle_id, vehicle.license_plate, vehicle.driver_name, vehicle.capacity
            );

            let mut new_metadata: StationMetadata = metadata.clone();
            new_metadata.add_vehicle(vehicle);

            let before: StateSnapshot =
                StateSnapshot::new(format!("vehicles={}", metadata.vehicles.len()));
            let after: StateSnapshot =
                StateSnapshot::new(format!("vehicles={}", new_metadata.vehicles.len()));
            let action: Action = Action::new(String::from("RegisterVehicle"), Some(details));
            let audit_event: AuditEvent =
                AuditEvent::new(None, actor, cause, action, before, after);

            Ok(BootstrapResult {
                new_metadata,
                audit_event,
            })
        }
        Command::SetFare { destination, fare } => {
            if !metadata.has_destination(&destination) {
                return Err(CoreError::DomainViolation(DomainError::DestinationNotFound(
                    destination.name().to_string(),
                )));
            }

            let previous: Fare = metadata.fare(&destination);
            let mut new_metadata: StationMetadata = metadata.clone();
            new_metadata.set_fare(destination.clone(), fare);

            let before: StateSnapshot = StateSnapshot::new(format!("fare={previous}"));
            let after: StateSnapshot = StateSnapshot::new(format!("fare={fare}"));
            let action: Action = Action::new(
                String::from("SetFare"),
                Some(format!("{destination}: {fare} TND per seat")),
            );
            let audit_event: AuditEvent =
                AuditEvent::new(Some(destination), actor, cause, action, before, after);

            Ok(BootstrapResult {
                new_metadata,
                audit_event,
            })
        }
        Command::SetOperational { operational } => {
            let mut new_metadata: StationMetadata = metadata.clone();
            new_metadata.operational = operational;

            let before: StateSnapshot =
                StateSnapshot::new(format!("operational={}", metadata.operational));
            let after: StateSnapshot = StateSnapshot::new(format!("operational={operational}"));
            let details: &str = if operational {
                "Station opened"
            } else {
                "Station closed"
            };
            let action: Action =
                Action::new(String::from("SetOperational"), Some(details.to_string()));
            let audit_event: AuditEvent =
                AuditEvent::new(None, actor, cause, action, before, after);

            Ok(BootstrapResult {
                new_metadata,
                audit_event,
            })
        }
        _ => Err(CoreError::MisroutedCommand(
            "queue command passed to apply_bootstrap",
        )),
    }
}

/// Applies a command to one destination's state, producing a new state and
/// audit event.
///
/// This function is pure: the input state is never modified. Checks that
/// span destinations (a vehicle already queued elsewhere) belong to the
/// caller; this function only rejects duplicates within `state`.
///
/// # Arguments
///
/// * `state` - The current state of the destination (immutable)
/// * `command` - The command to apply
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new state, the outcome and the audit event
/// * `Err(CoreError)` if the command is invalid
///
/// # Errors
///
/// Returns an error if:
/// - The command violates domain rules
/// - The command is a bootstrap command
#[allow(clippy::too_many_lines)]
pub fn apply(
    state: &State,
    command: Command,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    let command_name: &'static str = command.name();
    let mut new_state: State = state.clone();

    let (outcome, details): (Outcome, String) = match command {
        Command::Enqueue {
            entry_id,
            vehicle_id,
            total_seats,
            queue_type,
        } => {
            validate_total_seats(total_seats)?;
            ensure_not_active(state, &vehicle_id)?;

            let position: u32 = next_position(new_state.active.len());
            let entry: QueueEntry = QueueEntry::new(
                entry_id,
                vehicle_id,
                state.destination.clone(),
                position,
                total_seats,
                queue_type,
            );
            new_state.active.push(entry.clone());

            let details: String = format!(
                "Enqueued {} as {} at position {position}",
                entry.vehicle_id, entry.queue_type
            );
            (Outcome::Entry(entry), details)
        }
        Command::Reorder { ordered_ids } => {
            let current_ids: Vec<EntryId> = state.active.iter().map(|e| e.id).collect();
            validate_permutation(&state.destination, &current_ids, &ordered_ids)?;

            let mut reordered: Vec<QueueEntry> = Vec::with_capacity(ordered_ids.len());
            for id in &ordered_ids {
                let entry: &QueueEntry = state
                    .active_entry(*id)
                    .ok_or(DomainError::EntryNotFound(*id))?;
                reordered.push(entry.clone());
            }
            renumber_active(&mut reordered);
            new_state.active = reordered;

            let order: Vec<String> = new_state
                .active
                .iter()
                .map(|e| e.vehicle_id.to_string())
                .collect();
            let details: String = format!("New order: {}", order.join(", "));
            (Outcome::Queue(new_state.active.clone()), details)
        }
        Command::UpdateStatus { entry_id, status } => {
            let index: usize = active_index(state, entry_id)?;
            validate_status_transition(&state.active[index], status)?;

            let from: EntryStatus = state.active[index].status;
            if status == EntryStatus::Departed {
                let mut departed: QueueEntry = new_state.active.remove(index);
                departed.status = EntryStatus::Departed;
                renumber_active(&mut new_state.active);

                let details: String = format!(
                    "{} departed from position {}",
                    departed.vehicle_id, departed.position
                );
                (Outcome::Entry(departed), details)
            } else {
                new_state.active[index].status = status;
                let entry: QueueEntry = new_state.active[index].clone();
                let details: String = format!("{}: {from} -> {status}", entry.vehicle_id);
                (Outcome::Entry(entry), details)
            }
        }
        Command::AdjustSeats { entry_id, delta } => {
            let index: usize = active_index(state, entry_id)?;
            let available: u32 = apply_seat_delta(&state.active[index], delta)?;
            new_state.active[index].available_seats = available;

            let entry: QueueEntry = new_state.active[index].clone();
            let details: String = format!(
                "{}: delta {delta}, {}/{} seats available",
                entry.vehicle_id, entry.available_seats, entry.total_seats
            );
            (Outcome::Entry(entry), details)
        }
        Command::SetEstimatedDeparture {
            entry_id,
            estimated_departure,
        } => {
            let index: usize = active_index(state, entry_id)?;
            new_state.active[index].estimated_departure = estimated_departure;

            let entry: QueueEntry = new_state.active[index].clone();
            let details: String = match estimated_departure {
                Some(at) => format!("{}: estimated departure {at}", entry.vehicle_id),
                None => format!("{}: estimated departure cleared", entry.vehicle_id),
            };
            (Outcome::Entry(entry), details)
        }
        Command::Remove { entry_id } => {
            let index: usize = active_index(state, entry_id)?;
            let removed: QueueEntry = new_state.active.remove(index);
            renumber_active(&mut new_state.active);

            let details: String = format!(
                "Removed {} from position {}",
                removed.vehicle_id, removed.position
            );
            (Outcome::Entry(removed), details)
        }
        Command::BookSeats {
            booking_id,
            seats,
            customer,
            base_price,
            verification_code,
            booked_at,
        } => {
            validate_seat_request(seats)?;
            let total_price: Fare = base_price.for_seats(seats)?;
            let allocations: Vec<SeatAllocation> = book_in_queue_order(&mut new_state, seats)?;

            let booking: Booking = Booking {
                id: booking_id,
                destination: state.destination.clone(),
                allocations,
                seats,
                customer,
                base_price,
                total_price,
                verification_code,
                booked_at,
                verified_at: None,
            };
            new_state.bookings.push(booking.clone());

            let details: String = format!(
                "Ticket {} for {}: {seats} seats across {} vehicles, {total_price} TND",
                booking.verification_code,
                booking.customer.name(),
                booking.allocations.len()
            );
            (Outcome::Booking(booking), details)
        }
        Command::VerifyTicket {
            verification_code,
            verified_at,
        } => {
            let index: usize = new_state
                .bookings
                .iter()
                .position(|b| b.verification_code == verification_code)
                .ok_or_else(|| DomainError::TicketNotFound(verification_code.clone()))?;
            if new_state.bookings[index].is_verified() {
                return Err(CoreError::DomainViolation(
                    DomainError::TicketAlreadyVerified(verification_code),
                ));
            }
            new_state.bookings[index].verified_at = Some(verified_at);

            let booking: Booking = new_state.bookings[index].clone();
            let details: String = format!(
                "Verified ticket {verification_code} for {}",
                booking.customer.name()
            );
            (Outcome::Booking(booking), details)
        }
        Command::EnqueueOvernight {
            entry_id,
            vehicle_id,
            driver_cin,
            total_seats,
            notes,
            entered_at,
        } => {
            validate_total_seats(total_seats)?;
            if state.overnight.iter().any(|e| e.vehicle_id == vehicle_id) {
                return Err(duplicate(vehicle_id, QueueClass::Overnight, state));
            }

            let entry: OvernightEntry = OvernightEntry {
                id: entry_id,
                vehicle_id,
                destination: state.destination.clone(),
                position: next_position(new_state.overnight.len()),
                driver_cin,
                total_seats,
                entered_at,
                notes,
                status: OvernightStatus::Parked,
            };
            new_state.overnight.push(entry.clone());

            let details: String = format!(
                "Parked {} overnight at position {}",
                entry.vehicle_id, entry.position
            );
            (Outcome::Overnight(entry), details)
        }
        Command::MarkReadyForTransfer { entry_id } => {
            let index: usize = overnight_index(state, entry_id)?;
            let current: OvernightStatus = state.overnight[index].status;
            if current == OvernightStatus::ReadyForTransfer {
                return Err(CoreError::DomainViolation(DomainError::InvalidTransition {
                    entry_id,
                    from: current.as_str().to_string(),
                    to: OvernightStatus::ReadyForTransfer.as_str().to_string(),
                }));
            }
            new_state.overnight[index].status = OvernightStatus::ReadyForTransfer;

            let entry: OvernightEntry = new_state.overnight[index].clone();
            let details: String = format!("{} ready for transfer", entry.vehicle_id);
            (Outcome::Overnight(entry), details)
        }
        Command::PromoteOvernight => {
            let parked: Vec<OvernightEntry> = std::mem::take(&mut new_state.overnight);
            for overnight in &parked {
                ensure_not_active(state, &overnight.vehicle_id)?;
            }

            for overnight in parked {
                let position: u32 = next_position(new_state.active.len());
                let entry: QueueEntry = QueueEntry::new(
                    overnight.id,
                    overnight.vehicle_id,
                    state.destination.clone(),
                    position,
                    overnight.total_seats,
                    QueueType::Overnight,
                );
                new_state.active.push(entry);
            }

            let promoted: usize = state.overnight.len();
            let details: String = format!("Promoted {promoted} overnight vehicles");
            let promotion: Promotion = Promotion {
                promoted,
                queue: new_state.active.clone(),
            };
            (Outcome::Promotion(promotion), details)
        }
        Command::RemoveOvernight { entry_id } => {
            let index: usize = overnight_index(state, entry_id)?;
            let removed: OvernightEntry = new_state.overnight.remove(index);
            renumber_overnight(&mut new_state.overnight);

            let details: String = format!(
                "Removed {} from overnight position {}",
                removed.vehicle_id, removed.position
            );
            (Outcome::Overnight(removed), details)
        }
        Command::RegisterDestination { .. }
        | Command::RegisterVehicle { .. }
        | Command::SetFare { .. }
        | Command::SetOperational { .. } => {
            return Err(CoreError::MisroutedCommand("bootstrap command passed to apply"));
        }
    };

    let action: Action = Action::new(String::from(command_name), Some(details));
    let audit_event: AuditEvent = AuditEvent::new(
        Some(state.destination.clone()),
        actor,
        cause,
        action,
        state.to_snapshot(),
        new_state.to_snapshot(),
    );

    Ok(TransitionResult {
        new_state,
        outcome,
        audit_event,
    })
}

fn active_index(state: &State, entry_id: EntryId) -> Result<usize, DomainError> {
    state
        .active
        .iter()
        .position(|e| e.id == entry_id)
        .ok_or(DomainError::EntryNotFound(entry_id))
}

fn overnight_index(state: &State, entry_id: EntryId) -> Result<usize, DomainError> {
    state
        .overnight
        .iter()
        .position(|e| e.id == entry_id)
        .ok_or(DomainError::EntryNotFound(entry_id))
}

fn validate_total_seats(total_seats: u32) -> Result<(), DomainError> {
    if total_seats == 0 || total_seats > MAX_VEHICLE_CAPACITY {
        return Err(DomainError::InvalidVehicle(format!(
            "Seat count must be between 1 and {MAX_VEHICLE_CAPACITY}, got {total_seats}"
        )));
    }
    Ok(())
}

fn ensure_not_active(state: &State, vehicle_id: &VehicleId) -> Result<(), CoreError> {
    if state.active.iter().any(|e| &e.vehicle_id == vehicle_id) {
        return Err(duplicate(vehicle_id.clone(), QueueClass::Active, state));
    }
    Ok(())
}

fn duplicate(vehicle_id: VehicleId, queue_class: QueueClass, state: &State) -> CoreError {
    CoreError::DomainViolation(DomainError::DuplicateVehicle {
        vehicle_id,
        queue_class,
        destination: state.destination.name().to_string(),
    })
}

/// Takes `seats` seats from the active queue in position order.
///
/// Full entries are skipped. Nothing is written unless the whole request
/// fits.
fn book_in_queue_order(state: &mut State, seats: u32) -> Result<Vec<SeatAllocation>, DomainError> {
    let available: u32 = state.active.iter().map(|e| e.available_seats).sum();
    if available < seats {
        let total: u32 = state.active.iter().map(|e| e.total_seats).sum();
        return Err(DomainError::InsufficientSeats {
            entry_id: None,
            requested: i32::try_from(seats).unwrap_or(i32::MAX),
            available,
            total,
        });
    }

    let mut remaining: u32 = seats;
    let mut allocations: Vec<SeatAllocation> = Vec::new();
    for entry in &mut state.active {
        if remaining == 0 {
            break;
        }
        if entry.is_full() {
            continue;
        }
        let taken: u32 = remaining.min(entry.available_seats);
        entry.available_seats -= taken;
        remaining -= taken;
        allocations.push(SeatAllocation {
            entry_id: entry.id,
            vehicle_id: entry.vehicle_id.clone(),
            position: entry.position,
            seats: taken,
        });
    }

    Ok(allocations)
}
