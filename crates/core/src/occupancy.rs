// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Cross-destination ledger of queue slots.
//!
//! Each destination's `State` only knows its own lists. This ledger is the
//! one place that can answer "is this vehicle queued anywhere?" and "which
//! destination holds this entry id?".

use crate::state::State;
use louaj_domain::{Destination, DomainError, EntryId, QueueClass, VehicleId};
use std::collections::HashMap;

/// Where a slot lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    /// The destination holding the slot.
    pub destination: Destination,
    /// The slot's entry id.
    pub entry_id: EntryId,
    /// Active queue or overnight list.
    pub queue_class: QueueClass,
}

/// Which vehicle holds which slot, across all destinations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VehicleOccupancy {
    active: HashMap<VehicleId, Slot>,
    overnight: HashMap<VehicleId, Slot>,
    entries: HashMap<EntryId, Slot>,
}

impl VehicleOccupancy {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the slot a vehicle holds in the given class, if any.
    #[must_use]
    pub fn slot_of(&self, vehicle_id: &VehicleId, queue_class: QueueClass) -> Option<&Slot> {
        match queue_class {
            QueueClass::Active => self.active.get(vehicle_id),
            QueueClass::Overnight => self.overnight.get(vehicle_id),
        }
    }

    /// Returns the slot with the given entry id, if any.
    #[must_use]
    pub fn locate(&self, entry_id: EntryId) -> Option<&Slot> {
        self.entries.get(&entry_id)
    }

    /// Checks that a vehicle holds no slot of the given class.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DuplicateVehicle` naming the existing slot.
    pub fn ensure_vacant(
        &self,
        vehicle_id: &VehicleId,
        queue_class: QueueClass,
    ) -> Result<(), DomainError> {
        match self.slot_of(vehicle_id, queue_class) {
            Some(slot) => Err(DomainError::DuplicateVehicle {
                vehicle_id: vehicle_id.clone(),
                queue_class,
                destination: slot.destination.name().to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Replaces everything recorded for `previous.destination` with the
    /// slots in `current`.
    pub fn sync(&mut self, previous: &State, current: &State) {
        for entry in &previous.active {
            self.active.remove(&entry.vehicle_id);
            self.entries.remove(&entry.id);
        }
        for entry in &previous.overnight {
            self.overnight.remove(&entry.vehicle_id);
            self.entries.remove(&entry.id);
        }

        for entry in &current.active {
            let slot: Slot = Slot {
                destination: current.destination.clone(),
                entry_id: entry.id,
                queue_class: QueueClass::Active,
            };
            self.entries.insert(entry.id, slot.clone());
            self.active.insert(entry.vehicle_id.clone(), slot);
        }
        for entry in &current.overnight {
            let slot: Slot = Slot {
                destination: current.destination.clone(),
                entry_id: entry.id,
                queue_class: QueueClass::Overnight,
            };
            self.entries.insert(entry.id, slot.clone());
            self.overnight.insert(entry.vehicle_id.clone(), slot);
        }
    }

    /// Returns the number of vehicles holding an active slot.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Returns the number of vehicles holding an overnight slot.
    #[must_use]
    pub fn overnight_count(&self) -> usize {
        self.overnight.len()
    }
}
