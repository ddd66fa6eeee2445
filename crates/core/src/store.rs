// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The shared, thread-safe queue store.
//!
//! Lock order is always: metadata, destination map, one destination's
//! state, occupancy ledger, ticket index, audit log. Only one destination
//! lock is ever held at a time.

use crate::apply::{apply, apply_bootstrap};
use crate::command::Command;
use crate::error::CoreError;
use crate::occupancy::VehicleOccupancy;
use crate::state::{
    Booking, BootstrapResult, Outcome, Promotion, State, StationMetadata, TransitionResult,
};
use louaj_audit::{Actor, AuditEvent, AuditLog, Cause};
use louaj_domain::{
    Customer, Destination, DomainError, DriverCin, EntryId, EntryStatus, Fare, OvernightEntry,
    QueueClass, QueueEntry, QueueStats, QueueType, Vehicle, VehicleId, compute_queue_stats,
    is_contiguous,
};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use time::OffsetDateTime;

/// Seat count used for overnight vehicles missing from the registry.
pub const DEFAULT_OVERNIGHT_SEATS: u32 = 8;

type DestinationCell = Arc<Mutex<State>>;

/// Authoritative per-destination vehicle queues.
///
/// Every mutating call holds its destination's lock for its whole
/// duration, so readers never observe a half-renumbered list. Calls on
/// different destinations proceed independently.
#[derive(Debug)]
pub struct QueueStore {
    metadata: RwLock<StationMetadata>,
    destinations: RwLock<HashMap<Destination, DestinationCell>>,
    occupancy: Mutex<VehicleOccupancy>,
    tickets: Mutex<HashMap<String, Destination>>,
    audit_log: Mutex<AuditLog>,
    next_entry_id: AtomicU64,
    next_booking_id: AtomicU64,
}

impl Default for QueueStore {
    fn default() -> Self {
        Self::with_audit_log(AuditLog::default())
    }
}

impl QueueStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store that records into `audit_log`.
    #[must_use]
    pub fn with_audit_log(audit_log: AuditLog) -> Self {
        Self {
            metadata: RwLock::new(StationMetadata::new()),
            destinations: RwLock::new(HashMap::new()),
            occupancy: Mutex::new(VehicleOccupancy::new()),
            tickets: Mutex::new(HashMap::new()),
            audit_log: Mutex::new(audit_log),
            next_entry_id: AtomicU64::new(1),
            next_booking_id: AtomicU64::new(1),
        }
    }

    // ------------------------------------------------------------------
    // Station metadata
    // ------------------------------------------------------------------

    /// Registers a destination with empty queues.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateDestination` if it is already registered.
    pub fn register_destination(
        &self,
        destination: Destination,
        actor: Actor,
        cause: Cause,
    ) -> Result<Destination, CoreError> {
        let mut metadata = self.metadata.write();
        let result: BootstrapResult = apply_bootstrap(
            &metadata,
            Command::RegisterDestination {
                destination: destination.clone(),
            },
            actor,
            cause,
        )?;

        self.destinations.write().insert(
            destination.clone(),
            Arc::new(Mutex::new(State::new(destination.clone()))),
        );
        *metadata = result.new_metadata;
        self.audit_log.lock().record(result.audit_event);
        Ok(destination)
    }

    /// Adds a vehicle to the fleet registry.
    ///
    /// # Errors
    ///
    /// Returns an error if the vehicle fields are invalid, the id is
    /// already registered, or its assigned destination is unknown.
    pub fn register_vehicle(
        &self,
        vehicle: Vehicle,
        actor: Actor,
        cause: Cause,
    ) -> Result<Vehicle, CoreError> {
        self.bootstrap(
            Command::RegisterVehicle {
                vehicle: vehicle.clone(),
            },
            actor,
            cause,
        )?;
        Ok(vehicle)
    }

    /// Sets a destination's per-seat ticket price.
    ///
    /// # Errors
    ///
    /// Returns `DestinationNotFound` for an unregistered destination.
    pub fn set_fare(
        &self,
        destination: Destination,
        fare: Fare,
        actor: Actor,
        cause: Cause,
    ) -> Result<Fare, CoreError> {
        self.bootstrap(Command::SetFare { destination, fare }, actor, cause)?;
        Ok(fare)
    }

    /// Opens or closes the station.
    ///
    /// While closed, bookings and overnight promotions are refused.
    ///
    /// # Errors
    ///
    /// Returns an error only if the transition itself is rejected.
    pub fn set_operational(
        &self,
        operational: bool,
        actor: Actor,
        cause: Cause,
    ) -> Result<bool, CoreError> {
        self.bootstrap(Command::SetOperational { operational }, actor, cause)?;
        Ok(operational)
    }

    /// Returns true while the station accepts bookings and promotions.
    #[must_use]
    pub fn is_operational(&self) -> bool {
        self.metadata.read().operational
    }

    /// Returns a destination's per-seat price, zero if none is set.
    #[must_use]
    pub fn fare(&self, destination: &Destination) -> Fare {
        self.metadata.read().fare(destination)
    }

    /// Returns registered destinations in registration order.
    #[must_use]
    pub fn destinations(&self) -> Vec<Destination> {
        self.metadata.read().destinations.clone()
    }

    /// Looks up a registered vehicle.
    #[must_use]
    pub fn vehicle(&self, vehicle_id: &VehicleId) -> Option<Vehicle> {
        self.metadata.read().vehicle(vehicle_id).cloned()
    }

    /// Looks up the registered vehicle driven by the holder of `cin`.
    #[must_use]
    pub fn vehicle_by_driver_cin(&self, cin: &DriverCin) -> Option<Vehicle> {
        self.metadata.read().vehicle_by_driver(cin).cloned()
    }

    // ------------------------------------------------------------------
    // Active queue
    // ------------------------------------------------------------------

    /// Returns the destination's active queue sorted by position.
    ///
    /// # Errors
    ///
    /// Returns `DestinationNotFound` for an unregistered destination.
    pub fn list_by_destination(
        &self,
        destination: &Destination,
    ) -> Result<Vec<QueueEntry>, CoreError> {
        let cell: DestinationCell = self.cell(destination)?;
        let active: Vec<QueueEntry> = cell.lock().active.clone();
        Ok(active)
    }

    /// Appends a vehicle to the destination's active queue.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateVehicle` if the vehicle already holds an active
    /// slot at any destination.
    pub fn enqueue(
        &self,
        destination: &Destination,
        vehicle_id: VehicleId,
        total_seats: u32,
        queue_type: QueueType,
        actor: Actor,
        cause: Cause,
    ) -> Result<QueueEntry, CoreError> {
        let command: Command = Command::Enqueue {
            entry_id: self.allocate_entry_id(),
            vehicle_id,
            total_seats,
            queue_type,
        };
        self.execute(destination, command, actor, cause)?
            .into_entry()
    }

    /// Replaces the active queue order.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPermutation` unless `ordered_ids` is exactly a
    /// permutation of the current entry ids.
    pub fn reorder(
        &self,
        destination: &Destination,
        ordered_ids: Vec<EntryId>,
        actor: Actor,
        cause: Cause,
    ) -> Result<Vec<QueueEntry>, CoreError> {
        self.execute(destination, Command::Reorder { ordered_ids }, actor, cause)?
            .into_queue()
    }

    /// Moves an entry one step along its status lifecycle.
    ///
    /// Moving to `DEPARTED` removes the entry from the queue and returns
    /// it with its last position.
    ///
    /// # Errors
    ///
    /// Returns `EntryNotFound` or `InvalidTransition`.
    pub fn update_status(
        &self,
        entry_id: EntryId,
        status: EntryStatus,
        actor: Actor,
        cause: Cause,
    ) -> Result<QueueEntry, CoreError> {
        let destination: Destination = self.locate(entry_id, QueueClass::Active)?;
        self.execute(
            &destination,
            Command::UpdateStatus { entry_id, status },
            actor,
            cause,
        )?
        .into_entry()
    }

    /// Books (positive `delta`) or cancels (negative) seats on one entry.
    ///
    /// # Errors
    ///
    /// Returns `EntryNotFound` or `InsufficientSeats`.
    pub fn adjust_seats(
        &self,
        entry_id: EntryId,
        delta: i32,
        actor: Actor,
        cause: Cause,
    ) -> Result<QueueEntry, CoreError> {
        let destination: Destination = self.locate(entry_id, QueueClass::Active)?;
        self.execute(
            &destination,
            Command::AdjustSeats { entry_id, delta },
            actor,
            cause,
        )?
        .into_entry()
    }

    /// Sets or clears an entry's estimated departure.
    ///
    /// # Errors
    ///
    /// Returns `EntryNotFound`.
    pub fn set_estimated_departure(
        &self,
        entry_id: EntryId,
        estimated_departure: Option<OffsetDateTime>,
        actor: Actor,
        cause: Cause,
    ) -> Result<QueueEntry, CoreError> {
        let destination: Destination = self.locate(entry_id, QueueClass::Active)?;
        self.execute(
            &destination,
            Command::SetEstimatedDeparture {
                entry_id,
                estimated_departure,
            },
            actor,
            cause,
        )?
        .into_entry()
    }

    /// Deletes an active entry and closes the gap it leaves.
    ///
    /// # Errors
    ///
    /// Returns `EntryNotFound`.
    pub fn remove(
        &self,
        entry_id: EntryId,
        actor: Actor,
        cause: Cause,
    ) -> Result<QueueEntry, CoreError> {
        let destination: Destination = self.locate(entry_id, QueueClass::Active)?;
        self.execute(&destination, Command::Remove { entry_id }, actor, cause)?
            .into_entry()
    }

    /// Sells a ticket, taking seats front of the queue first.
    ///
    /// The price is the destination's fare at the time of sale. The
    /// returned booking carries the verification code printed on the
    /// ticket.
    ///
    /// # Errors
    ///
    /// Returns `StationClosed` while the station is closed,
    /// `InvalidSeatRequest` for a seat count outside `1..=8`, or
    /// `InsufficientSeats` when the whole queue cannot take the booking.
    pub fn book_seats(
        &self,
        destination: &Destination,
        seats: u32,
        customer: Customer,
        actor: Actor,
        cause: Cause,
    ) -> Result<Booking, CoreError> {
        let metadata = self.metadata.read();
        if !metadata.operational {
            return Err(CoreError::DomainViolation(DomainError::StationClosed));
        }
        let booking_id: u64 = self.next_booking_id.fetch_add(1, Ordering::Relaxed);
        let command: Command = Command::BookSeats {
            booking_id,
            seats,
            customer,
            base_price: metadata.fare(destination),
            verification_code: verification_code(booking_id),
            booked_at: OffsetDateTime::now_utc(),
        };
        let booking: Booking = self
            .execute(destination, command, actor, cause)?
            .into_booking()?;
        drop(metadata);
        Ok(booking)
    }

    /// Checks a ticket at boarding. Each ticket verifies once.
    ///
    /// The code is matched case-insensitively, ignoring surrounding
    /// whitespace.
    ///
    /// # Errors
    ///
    /// Returns `TicketNotFound` for an unknown code or
    /// `TicketAlreadyVerified` on a second check.
    pub fn verify_ticket(
        &self,
        verification_code: &str,
        actor: Actor,
        cause: Cause,
    ) -> Result<Booking, CoreError> {
        let code: String = verification_code.trim().to_ascii_uppercase();
        let destination: Destination = self
            .tickets
            .lock()
            .get(&code)
            .cloned()
            .ok_or_else(|| DomainError::TicketNotFound(code.clone()))?;
        let command: Command = Command::VerifyTicket {
            verification_code: code,
            verified_at: OffsetDateTime::now_utc(),
        };
        self.execute(&destination, command, actor, cause)?
            .into_booking()
    }

    /// Returns the destination's tickets, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `DestinationNotFound` for an unregistered destination.
    pub fn list_bookings(&self, destination: &Destination) -> Result<Vec<Booking>, CoreError> {
        let cell: DestinationCell = self.cell(destination)?;
        let bookings: Vec<Booking> = cell.lock().bookings.clone();
        Ok(bookings)
    }

    // ------------------------------------------------------------------
    // Overnight queue
    // ------------------------------------------------------------------

    /// Parks a vehicle overnight for a destination.
    ///
    /// Seat capacity comes from the registry, or `DEFAULT_OVERNIGHT_SEATS`
    /// for vehicles the registry does not know.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateVehicle` if the vehicle is already parked
    /// overnight at any destination.
    pub fn enqueue_overnight(
        &self,
        destination: &Destination,
        vehicle_id: VehicleId,
        driver_cin: DriverCin,
        notes: Option<String>,
        actor: Actor,
        cause: Cause,
    ) -> Result<OvernightEntry, CoreError> {
        let total_seats: u32 = self
            .vehicle(&vehicle_id)
            .map_or(DEFAULT_OVERNIGHT_SEATS, |v| v.capacity);
        let command: Command = Command::EnqueueOvernight {
            entry_id: self.allocate_entry_id(),
            vehicle_id,
            driver_cin,
            total_seats,
            notes,
            entered_at: OffsetDateTime::now_utc(),
        };
        self.execute(destination, command, actor, cause)?
            .into_overnight()
    }

    /// Parks the vehicle driven by `cin` at its assigned destination.
    ///
    /// # Errors
    ///
    /// Returns `DriverNotFound` if no registered vehicle has this driver,
    /// `UnassignedVehicle` if the vehicle has no assigned destination, or
    /// any error of [`Self::enqueue_overnight`].
    pub fn enqueue_overnight_by_driver(
        &self,
        cin: &DriverCin,
        notes: Option<String>,
        actor: Actor,
        cause: Cause,
    ) -> Result<OvernightEntry, CoreError> {
        let vehicle: Vehicle = self
            .vehicle_by_driver_cin(cin)
            .ok_or_else(|| DomainError::DriverNotFound(cin.value().to_string()))?;
        let destination: Destination = vehicle
            .assigned_destination
            .clone()
            .ok_or_else(|| DomainError::UnassignedVehicle(vehicle.vehicle_id.clone()))?;
        self.enqueue_overnight(
            &destination,
            vehicle.vehicle_id,
            cin.clone(),
            notes,
            actor,
            cause,
        )
    }

    /// Returns the destination's overnight list sorted by position.
    ///
    /// # Errors
    ///
    /// Returns `DestinationNotFound` for an unregistered destination.
    pub fn list_overnight(
        &self,
        destination: &Destination,
    ) -> Result<Vec<OvernightEntry>, CoreError> {
        let cell: DestinationCell = self.cell(destination)?;
        let overnight: Vec<OvernightEntry> = cell.lock().overnight.clone();
        Ok(overnight)
    }

    /// Marks an overnight entry as cleared for transfer.
    ///
    /// # Errors
    ///
    /// Returns `EntryNotFound`, or `InvalidTransition` if it is already
    /// marked.
    pub fn mark_ready_for_transfer(
        &self,
        entry_id: EntryId,
        actor: Actor,
        cause: Cause,
    ) -> Result<OvernightEntry, CoreError> {
        let destination: Destination = self.locate(entry_id, QueueClass::Overnight)?;
        self.execute(
            &destination,
            Command::MarkReadyForTransfer { entry_id },
            actor,
            cause,
        )?
        .into_overnight()
    }

    /// Moves every overnight entry to the end of the active queue.
    ///
    /// Returns how many entries moved and the full active queue afterwards,
    /// both taken under the destination lock.
    ///
    /// # Errors
    ///
    /// Returns `StationClosed` while the station is closed, or
    /// `DuplicateVehicle` if any parked vehicle already holds an active
    /// slot anywhere; nothing moves in either case.
    pub fn promote_overnight(
        &self,
        destination: &Destination,
        actor: Actor,
        cause: Cause,
    ) -> Result<Promotion, CoreError> {
        let metadata = self.metadata.read();
        if !metadata.operational {
            return Err(CoreError::DomainViolation(DomainError::StationClosed));
        }
        let promotion: Promotion = self
            .execute(destination, Command::PromoteOvernight, actor, cause)?
            .into_promotion()?;
        drop(metadata);
        Ok(promotion)
    }

    /// Deletes an overnight entry and closes the gap it leaves.
    ///
    /// # Errors
    ///
    /// Returns `EntryNotFound`.
    pub fn remove_overnight(
        &self,
        entry_id: EntryId,
        actor: Actor,
        cause: Cause,
    ) -> Result<OvernightEntry, CoreError> {
        let destination: Destination = self.locate(entry_id, QueueClass::Overnight)?;
        self.execute(
            &destination,
            Command::RemoveOvernight { entry_id },
            actor,
            cause,
        )?
        .into_overnight()
    }

    // ------------------------------------------------------------------
    // Read models
    // ------------------------------------------------------------------

    /// Computes occupancy figures for one destination.
    ///
    /// # Errors
    ///
    /// Returns `DestinationNotFound` for an unregistered destination.
    pub fn queue_stats(&self, destination: &Destination) -> Result<QueueStats, CoreError> {
        let entries: Vec<QueueEntry> = self.list_by_destination(destination)?;
        Ok(compute_queue_stats(destination, &entries))
    }

    /// Computes occupancy figures for every destination.
    #[must_use]
    pub fn station_stats(&self) -> Vec<QueueStats> {
        self.destinations()
            .iter()
            .filter_map(|d| self.queue_stats(d).ok())
            .collect()
    }

    /// Returns retained audit events for one destination, oldest first.
    #[must_use]
    pub fn audit_events(&self, destination: &Destination) -> Vec<AuditEvent> {
        self.audit_log.lock().events_for(destination)
    }

    /// Returns up to `n` most recent audit events, oldest first.
    #[must_use]
    pub fn recent_audit_events(&self, n: usize) -> Vec<AuditEvent> {
        self.audit_log.lock().latest(n)
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn bootstrap(&self, command: Command, actor: Actor, cause: Cause) -> Result<(), CoreError> {
        let mut metadata = self.metadata.write();
        let result: BootstrapResult = apply_bootstrap(&metadata, command, actor, cause)?;
        *metadata = result.new_metadata;
        self.audit_log.lock().record(result.audit_event);
        Ok(())
    }

    fn allocate_entry_id(&self) -> EntryId {
        EntryId::new(self.next_entry_id.fetch_add(1, Ordering::Relaxed))
    }

    fn cell(&self, destination: &Destination) -> Result<DestinationCell, DomainError> {
        self.destinations
            .read()
            .get(destination)
            .cloned()
            .ok_or_else(|| DomainError::DestinationNotFound(destination.name().to_string()))
    }

    fn locate(
        &self,
        entry_id: EntryId,
        queue_class: QueueClass,
    ) -> Result<Destination, DomainError> {
        self.occupancy
            .lock()
            .locate(entry_id)
            .filter(|slot| slot.queue_class == queue_class)
            .map(|slot| slot.destination.clone())
            .ok_or(DomainError::EntryNotFound(entry_id))
    }

    /// Applies `command` to one destination under its lock and commits the
    /// result.
    fn execute(
        &self,
        destination: &Destination,
        command: Command,
        actor: Actor,
        cause: Cause,
    ) -> Result<Outcome, CoreError> {
        let cell: DestinationCell = self.cell(destination)?;
        let mut state = cell.lock();

        let result: TransitionResult = if command.changes_membership() {
            let mut occupancy = self.occupancy.lock();
            ensure_vacancies(&occupancy, &state, &command)?;
            let result: TransitionResult = apply(&state, command, actor, cause)?;
            occupancy.sync(&state, &result.new_state);
            result
        } else {
            apply(&state, command, actor, cause)?
        };

        debug_assert!(is_contiguous(
            result.new_state.active.iter().map(|e| e.position)
        ));
        debug_assert!(is_contiguous(
            result.new_state.overnight.iter().map(|e| e.position)
        ));

        if let Outcome::Booking(booking) = &result.outcome {
            self.tickets
                .lock()
                .insert(booking.verification_code.clone(), destination.clone());
        }

        *state = result.new_state;
        self.audit_log.lock().record(result.audit_event);
        Ok(result.outcome)
    }
}

/// Builds a ticket code: the booking number followed by six random hex
/// digits. The number keeps codes unique; the suffix keeps them unguessable.
fn verification_code(booking_id: u64) -> String {
    let suffix: u32 = rand::random::<u32>() & 0x00FF_FFFF;
    format!("{booking_id:06}{suffix:06X}")
}

/// Rejects commands that would give a vehicle a second slot of a class
/// somewhere in the station.
fn ensure_vacancies(
    occupancy: &VehicleOccupancy,
    state: &State,
    command: &Command,
) -> Result<(), DomainError> {
    match command {
        Command::Enqueue { vehicle_id, .. } => {
            occupancy.ensure_vacant(vehicle_id, QueueClass::Active)
        }
        Command::EnqueueOvernight { vehicle_id, .. } => {
            occupancy.ensure_vacant(vehicle_id, QueueClass::Overnight)
        }
        Command::PromoteOvernight => state
            .overnight
            .iter()
            .try_for_each(|e| occupancy.ensure_vacant(&e.vehicle_id, QueueClass::Active)),
        _ => Ok(()),
    }
}
