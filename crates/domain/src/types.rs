// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};

/// Largest seat capacity accepted for a registered vehicle.
pub const MAX_VEHICLE_CAPACITY: u32 = 20;

/// Identifier of a queue slot (active or overnight).
///
/// Ids are allocated by the store and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(u64);

impl EntryId {
    /// Creates an entry id from its raw value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a vehicle in the station fleet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VehicleId(String);

impl VehicleId {
    /// Creates a vehicle id.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self(value.trim().to_string())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VehicleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A departure target served from the station.
///
/// Two destinations are the same if their names match; the station
/// reference is carried for display only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Destination {
    name: String,
    station_id: Option<String>,
}

impl PartialEq for Destination {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Destination {}

impl std::hash::Hash for Destination {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl Destination {
    /// Creates a destination without a station reference.
    ///
    /// The name is trimmed but not otherwise validated; use
    /// [`Destination::parse`] for untrusted input.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            station_id: None,
        }
    }

    /// Creates a destination bound to a remote station id.
    #[must_use]
    pub fn with_station(name: &str, station_id: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            station_id: Some(station_id.to_string()),
        }
    }

    /// Parses a destination name from untrusted input.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDestination` if the trimmed name is empty.
    pub fn parse(name: &str) -> Result<Self, DomainError> {
        let destination: Self = Self::new(name);
        if destination.name.is_empty() {
            return Err(DomainError::InvalidDestination(String::from(
                "Destination name cannot be empty",
            )));
        }
        Ok(destination)
    }

    /// Returns the destination name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the station reference, if any.
    #[must_use]
    pub fn station_id(&self) -> Option<&str> {
        self.station_id.as_deref()
    }
}

impl std::fmt::Display for Destination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A driver's national identity card number.
///
/// Always exactly 8 ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DriverCin(String);

impl DriverCin {
    /// Parses a CIN.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDriverCin` unless the trimmed input is
    /// exactly 8 digits.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let trimmed: &str = value.trim();
        if trimmed.len() != 8 || !trimmed.chars().all(|c| c.is_ascii_digit()) {
            return Err(DomainError::InvalidDriverCin(format!(
                "'{trimmed}' must be exactly 8 digits"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the CIN as a string slice.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for DriverCin {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DriverCin> for String {
    fn from(cin: DriverCin) -> Self {
        cin.0
    }
}

impl std::fmt::Display for DriverCin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A vehicle registered at the station.
///
/// Immutable once registered. Which queue it currently occupies is
/// tracked by the store, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Unique vehicle id.
    pub vehicle_id: VehicleId,
    /// License plate as painted on the vehicle.
    pub license_plate: String,
    /// Driver's full name.
    pub driver_name: String,
    /// Driver's identity card number.
    pub driver_cin: DriverCin,
    /// Total passenger seats.
    pub capacity: u32,
    /// The route this vehicle normally serves.
    pub assigned_destination: Option<Destination>,
}

impl Vehicle {
    /// Creates a new vehicle.
    ///
    /// # Arguments
    ///
    /// * `vehicle_id` - Unique vehicle id
    /// * `license_plate` - License plate
    /// * `driver_name` - Driver's full name
    /// * `driver_cin` - Driver's identity card number
    /// * `capacity` - Total passenger seats
    /// * `assigned_destination` - Route normally served, if any
    #[must_use]
    pub const fn new(
        vehicle_id: VehicleId,
        license_plate: String,
        driver_name: String,
        driver_cin: DriverCin,
        capacity: u32,
        assigned_destination: Option<Destination>,
    ) -> Self {
        Self {
            vehicle_id,
            license_plate,
            driver_name,
            driver_cin,
            capacity,
            assigned_destination,
        }
    }
}
