// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Station configuration.
//!
//! A station is described by a JSON file naming its opening hours,
//! timezone, per-seat fares and the destinations and vehicles to register
//! at startup.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use louaj::{CoreError, QueueStore};
use louaj_audit::{Actor, Cause};
use louaj_domain::{
    DEFAULT_TIMEZONE, Destination, DomainError, DriverCin, Fare, PromotionSchedule, Vehicle,
    VehicleId,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::macros::format_description;

/// Station configuration errors.
#[derive(Debug, Error)]
pub enum StationConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read station config: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid JSON for this schema.
    #[error("Failed to parse station config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A time of day is not in `HH:MM` form.
    #[error("Invalid {field} '{value}': expected HH:MM")]
    InvalidTime { field: &'static str, value: String },

    /// The station would close before it opens.
    #[error("Opening time {opening} must be before closing time {closing}")]
    OpeningNotBeforeClosing { opening: String, closing: String },

    /// The timezone is not an IANA zone name.
    #[error("Invalid timezone '{0}'")]
    InvalidTimezone(String),

    /// A destination is listed twice.
    #[error("Destination '{0}' is listed more than once")]
    DuplicateDestination(String),

    /// A fare names a destination that is not listed.
    #[error("Fare given for unlisted destination '{0}'")]
    UnlistedFare(String),

    /// A destination or vehicle entry is malformed.
    #[error("Invalid station config entry '{item}': {source}")]
    InvalidEntry { item: String, source: DomainError },

    /// The store rejected a seeded destination or vehicle.
    #[error("Failed to seed '{item}': {source}")]
    Seed { item: String, source: CoreError },
}

/// A vehicle to register at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleConfig {
    /// Unique vehicle id.
    pub vehicle_id: String,
    /// License plate.
    pub license_plate: String,
    /// Driver's full name.
    pub driver_name: String,
    /// Driver's 8-digit CIN.
    pub driver_cin: String,
    /// Total passenger seats.
    pub capacity: u32,
    /// The route this vehicle normally serves.
    #[serde(default)]
    pub assigned_destination: Option<String>,
}

/// Station settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StationConfig {
    /// Display name of the station.
    pub station_name: String,
    /// Station reference attached to every destination.
    pub station_id: Option<String>,
    /// Local opening time, `HH:MM`.
    pub opening_time: String,
    /// Local closing time, `HH:MM`.
    pub closing_time: String,
    /// IANA timezone the opening hours are expressed in.
    pub timezone: String,
    /// Whether the station accepts bookings and promotions at startup.
    pub operational: bool,
    /// Destinations to register.
    pub destinations: Vec<String>,
    /// Per-seat price in dinars by destination name, e.g. `"4.500"`.
    /// Destinations without an entry are priced at zero.
    pub fares: BTreeMap<String, String>,
    /// Vehicles to register.
    pub vehicles: Vec<VehicleConfig>,
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            station_name: String::from("Louaj Station"),
            station_id: None,
            opening_time: String::from("05:00"),
            closing_time: String::from("22:00"),
            timezone: DEFAULT_TIMEZONE.to_string(),
            operational: true,
            destinations: Vec::new(),
            fares: BTreeMap::new(),
            vehicles: Vec::new(),
        }
    }
}

impl StationConfig {
    /// Parses and validates a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or fails validation.
    pub fn from_json(json: &str) -> Result<Self, StationConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its contents are invalid.
    pub fn load(path: &Path) -> Result<Self, StationConfigError> {
        let json: String = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Checks opening hours, timezone, destination uniqueness and fares.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), StationConfigError> {
        let opening: time::Time = self.opening()?;
        let closing: time::Time = parse_time("closing_time", &self.closing_time)?;
        if opening >= closing {
            return Err(StationConfigError::OpeningNotBeforeClosing {
                opening: self.opening_time.clone(),
                closing: self.closing_time.clone(),
            });
        }

        self.promotion_schedule()?;

        let mut seen: HashSet<&str> = HashSet::new();
        for name in &self.destinations {
            if !seen.insert(name.trim()) {
                return Err(StationConfigError::DuplicateDestination(name.trim().to_string()));
            }
        }

        for (name, price) in &self.fares {
            if !seen.contains(name.trim()) {
                return Err(StationConfigError::UnlistedFare(name.trim().to_string()));
            }
            parse_fare(name, price)?;
        }
        Ok(())
    }

    /// Returns the parsed opening time.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTime` if `opening_time` is not `HH:MM`.
    pub fn opening(&self) -> Result<time::Time, StationConfigError> {
        parse_time("opening_time", &self.opening_time)
    }

    /// Returns the daily overnight promotion schedule.
    ///
    /// # Errors
    ///
    /// Returns an error if the opening time or timezone is invalid.
    pub fn promotion_schedule(&self) -> Result<PromotionSchedule, StationConfigError> {
        PromotionSchedule::new(self.opening()?, &self.timezone)
            .map_err(|_| StationConfigError::InvalidTimezone(self.timezone.clone()))
    }

    /// Registers the configured destinations with their fares, then
    /// vehicles, into `store`. A station configured as not operational is
    /// closed last.
    ///
    /// # Errors
    ///
    /// Returns the first entry that is malformed or rejected by the store.
    pub fn seed_store(&self, store: &QueueStore) -> Result<(), StationConfigError> {
        for name in &self.destinations {
            let destination: Destination = self.destination(name)?;
            store
                .register_destination(destination.clone(), seed_actor(), seed_cause())
                .map_err(|source| StationConfigError::Seed {
                    item: name.clone(),
                    source,
                })?;

            if let Some(price) = self.fares.get(name.trim()) {
                let fare: Fare = parse_fare(name, price)?;
                store
                    .set_fare(destination, fare, seed_actor(), seed_cause())
                    .map_err(|source| StationConfigError::Seed {
                        item: name.clone(),
                        source,
                    })?;
            }
        }

        for entry in &self.vehicles {
            let vehicle: Vehicle = self.vehicle(entry)?;
            store
                .register_vehicle(vehicle, seed_actor(), seed_cause())
                .map_err(|source| StationConfigError::Seed {
                    item: entry.vehicle_id.clone(),
                    source,
                })?;
        }

        if !self.operational {
            store
                .set_operational(false, seed_actor(), seed_cause())
                .map_err(|source| StationConfigError::Seed {
                    item: String::from("operational"),
                    source,
                })?;
        }
        Ok(())
    }

    fn destination(&self, name: &str) -> Result<Destination, StationConfigError> {
        let parsed: Destination =
            Destination::parse(name).map_err(|source| StationConfigError::InvalidEntry {
                item: name.to_string(),
                source,
            })?;
        Ok(match &self.station_id {
            Some(station_id) => Destination::with_station(parsed.name(), station_id),
            None => parsed,
        })
    }

    fn vehicle(&self, entry: &VehicleConfig) -> Result<Vehicle, StationConfigError> {
        let invalid = |source: DomainError| StationConfigError::InvalidEntry {
            item: entry.vehicle_id.clone(),
            source,
        };
        let driver_cin: DriverCin = DriverCin::parse(&entry.driver_cin).map_err(invalid)?;
        let assigned_destination: Option<Destination> = entry
            .assigned_destination
            .as_deref()
            .map(|name| self.destination(name))
            .transpose()?;
        Ok(Vehicle::new(
            VehicleId::new(&entry.vehicle_id),
            entry.license_plate.clone(),
            entry.driver_name.clone(),
            driver_cin,
            entry.capacity,
            assigned_destination,
        ))
    }
}

fn parse_time(field: &'static str, value: &str) -> Result<time::Time, StationConfigError> {
    time::Time::parse(value.trim(), format_description!("[hour]:[minute]")).map_err(|_| {
        StationConfigError::InvalidTime {
            field,
            value: value.to_string(),
        }
    })
}

fn parse_fare(destination: &str, price: &str) -> Result<Fare, StationConfigError> {
    Fare::parse(price).map_err(|source| StationConfigError::InvalidEntry {
        item: destination.to_string(),
        source,
    })
}

fn seed_actor() -> Actor {
    Actor::new(String::from("station-config"), String::from("system"))
}

fn seed_cause() -> Cause {
    Cause::new(
        String::from("startup"),
        String::from("Seeded from station configuration"),
    )
}
