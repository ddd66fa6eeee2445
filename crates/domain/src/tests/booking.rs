// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Customer, DomainError, Fare};

#[test]
fn test_fare_parses_dinar_amounts() {
    assert_eq!(Fare::parse("4").unwrap(), Fare::from_millimes(4000));
    assert_eq!(Fare::parse("4.5").unwrap(), Fare::from_millimes(4500));
    assert_eq!(Fare::parse(" 4.750 ").unwrap(), Fare::from_millimes(4750));
    assert_eq!(Fare::parse("0.050").unwrap(), Fare::from_millimes(50));
}

#[test]
fn test_fare_rejects_malformed_amounts() {
    for value in ["", "-4", "4.", ".5", "4.5000", "four", "4,5"] {
        assert_eq!(
            Fare::parse(value),
            Err(DomainError::InvalidFare(value.to_string())),
            "{value:?} should be rejected"
        );
    }
}

#[test]
fn test_fare_for_seats_multiplies() {
    let fare: Fare = Fare::parse("4.750").unwrap();
    assert_eq!(fare.for_seats(3).unwrap(), Fare::from_millimes(14_250));
    assert_eq!(fare.for_seats(3).unwrap().to_string(), "14.250");
    assert_eq!(Fare::ZERO.for_seats(8).unwrap(), Fare::ZERO);
}

#[test]
fn test_fare_for_seats_rejects_overflow() {
    let fare: Fare = Fare::from_millimes(u64::MAX);
    assert!(matches!(fare.for_seats(2), Err(DomainError::InvalidFare(_))));
}

#[test]
fn test_fare_display_pads_millimes() {
    assert_eq!(Fare::from_millimes(5).to_string(), "0.005");
    assert_eq!(Fare::from_millimes(12_000).to_string(), "12.000");
}

#[test]
fn test_customer_trims_and_drops_empty_phone() {
    let customer: Customer = Customer::new("  Salma Trabelsi ", Some("  ")).unwrap();
    assert_eq!(customer.name(), "Salma Trabelsi");
    assert_eq!(customer.phone(), None);

    let customer: Customer = Customer::new("Salma", Some("+216 98 123 456")).unwrap();
    assert_eq!(customer.phone(), Some("+216 98 123 456"));
}

#[test]
fn test_customer_rejects_empty_name() {
    assert!(matches!(
        Customer::new(" ", None),
        Err(DomainError::InvalidCustomer(_))
    ));
}

#[test]
fn test_customer_rejects_malformed_phone() {
    for phone in ["1234", "98-123-456", "phone"] {
        assert!(
            matches!(
                Customer::new("Salma", Some(phone)),
                Err(DomainError::InvalidCustomer(_))
            ),
            "{phone:?} should be rejected"
        );
    }
}
