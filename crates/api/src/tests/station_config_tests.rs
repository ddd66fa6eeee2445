// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Station configuration tests.

use louaj::QueueStore;
use louaj_domain::{Destination, DriverCin, Fare, PromotionSchedule, VehicleId};
use time::macros::time;

use crate::{StationConfig, StationConfigError};

const SAMPLE: &str = r#"{
    "station_name": "Monastir Louaj",
    "station_id": "station-monastir",
    "opening_time": "05:30",
    "closing_time": "21:00",
    "timezone": "Africa/Tunis",
    "destinations": ["Sousse", "Mahdia"],
    "fares": { "Sousse": "4.500" },
    "vehicles": [
        {
            "vehicle_id": "TN-1",
            "license_plate": "123 TUN 4567",
            "driver_name": "Ahmed Ben Ali",
            "driver_cin": "12345678",
            "capacity": 8,
            "assigned_destination": "Sousse"
        },
        {
            "vehicle_id": "TN-2",
            "license_plate": "88 TUN 1200",
            "driver_name": "Sami Trabelsi",
            "driver_cin": "87654321",
            "capacity": 6
        }
    ]
}"#;

#[test]
fn test_default_config_is_valid() {
    let config: StationConfig = StationConfig::default();

    assert!(config.validate().is_ok());
    assert_eq!(config.opening().unwrap(), time!(05:00));
    assert!(config.operational);
    assert!(config.destinations.is_empty());
}

#[test]
fn test_sample_config_parses_and_fills_defaults() {
    let config: StationConfig = StationConfig::from_json(SAMPLE).unwrap();

    assert_eq!(config.station_name, "Monastir Louaj");
    assert!(config.operational);
    assert_eq!(config.vehicles.len(), 2);
    assert_eq!(config.vehicles[1].assigned_destination, None);

    let schedule: PromotionSchedule = config.promotion_schedule().unwrap();
    assert_eq!(schedule.opening_time(), time!(05:30));
    assert_eq!(schedule.timezone(), "Africa/Tunis");
}

#[test]
fn test_seed_store_registers_destinations_and_vehicles() {
    let config: StationConfig = StationConfig::from_json(SAMPLE).unwrap();
    let store: QueueStore = QueueStore::new();

    config.seed_store(&store).unwrap();

    let names: Vec<String> = store
        .destinations()
        .iter()
        .map(|d| d.name().to_string())
        .collect();
    assert_eq!(names, vec!["Sousse", "Mahdia"]);
    assert_eq!(
        store.destinations()[0].station_id(),
        Some("station-monastir")
    );
    assert_eq!(store.vehicle(&VehicleId::new("TN-2")).unwrap().capacity, 6);
    let by_driver = store
        .vehicle_by_driver_cin(&DriverCin::parse("12345678").unwrap())
        .unwrap();
    assert_eq!(
        by_driver.assigned_destination,
        Some(Destination::new("Sousse"))
    );
    assert!(store.list_by_destination(&Destination::new("Mahdia")).unwrap().is_empty());
    assert_eq!(store.fare(&Destination::new("Sousse")), Fare::from_millimes(4500));
    assert_eq!(store.fare(&Destination::new("Mahdia")), Fare::ZERO);
    assert!(store.is_operational());
}

#[test]
fn test_seed_store_closes_non_operational_station() {
    let mut config: StationConfig = StationConfig::from_json(SAMPLE).unwrap();
    config.operational = false;
    let store: QueueStore = QueueStore::new();

    config.seed_store(&store).unwrap();

    assert!(!store.is_operational());
}

#[test]
fn test_fare_for_unlisted_destination_is_rejected() {
    let mut config: StationConfig = StationConfig::from_json(SAMPLE).unwrap();
    config
        .fares
        .insert(String::from("Gabes"), String::from("9.000"));

    assert!(matches!(
        config.validate().unwrap_err(),
        StationConfigError::UnlistedFare(name) if name == "Gabes"
    ));
}

#[test]
fn test_malformed_fare_is_rejected() {
    let json: String = SAMPLE.replace("\"4.500\"", "\"4.5000\"");

    let result: Result<StationConfig, StationConfigError> = StationConfig::from_json(&json);

    assert!(matches!(
        result.unwrap_err(),
        StationConfigError::InvalidEntry { item, .. } if item == "Sousse"
    ));
}

#[test]
fn test_seed_store_twice_reports_duplicate() {
    let config: StationConfig = StationConfig::from_json(SAMPLE).unwrap();
    let store: QueueStore = QueueStore::new();
    config.seed_store(&store).unwrap();

    let result: Result<(), StationConfigError> = config.seed_store(&store);

    assert!(matches!(
        result.unwrap_err(),
        StationConfigError::Seed { item, .. } if item == "Sousse"
    ));
}

#[test]
fn test_seed_store_rejects_malformed_cin() {
    let mut config: StationConfig = StationConfig::from_json(SAMPLE).unwrap();
    config.vehicles[0].driver_cin = String::from("ABC");
    let store: QueueStore = QueueStore::new();

    let result: Result<(), StationConfigError> = config.seed_store(&store);

    assert!(matches!(
        result.unwrap_err(),
        StationConfigError::InvalidEntry { item, .. } if item == "TN-1"
    ));
}

#[test]
fn test_opening_after_closing_is_rejected() {
    let config: StationConfig = StationConfig {
        opening_time: String::from("22:00"),
        closing_time: String::from("05:00"),
        ..StationConfig::default()
    };

    assert!(matches!(
        config.validate().unwrap_err(),
        StationConfigError::OpeningNotBeforeClosing { .. }
    ));
}

#[test]
fn test_malformed_time_is_rejected() {
    let config: StationConfig = StationConfig {
        closing_time: String::from("late"),
        ..StationConfig::default()
    };

    assert!(matches!(
        config.validate().unwrap_err(),
        StationConfigError::InvalidTime { field, .. } if field == "closing_time"
    ));
}

#[test]
fn test_unknown_timezone_is_rejected() {
    let config: StationConfig = StationConfig {
        timezone: String::from("Mars/Olympus"),
        ..StationConfig::default()
    };

    assert!(matches!(
        config.validate().unwrap_err(),
        StationConfigError::InvalidTimezone(zone) if zone == "Mars/Olympus"
    ));
}

#[test]
fn test_duplicate_destination_is_rejected() {
    let config: StationConfig = StationConfig {
        destinations: vec![String::from("Sousse"), String::from(" Sousse")],
        ..StationConfig::default()
    };

    assert!(matches!(
        config.validate().unwrap_err(),
        StationConfigError::DuplicateDestination(name) if name == "Sousse"
    ));
}

#[test]
fn test_malformed_json_is_parse_error() {
    let result: Result<StationConfig, StationConfigError> = StationConfig::from_json("{");

    assert!(matches!(result.unwrap_err(), StationConfigError::Parse(_)));
}
