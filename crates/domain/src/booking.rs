// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ticket pricing and customer details.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};

/// Millimes in one Tunisian dinar.
pub const MILLIMES_PER_DINAR: u64 = 1000;

/// Fewest digits accepted in a customer phone number.
const MIN_PHONE_DIGITS: usize = 8;

/// A price in Tunisian dinars, held as whole millimes.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Fare(u64);

impl Fare {
    /// A fare of nothing, used for destinations with no price set.
    pub const ZERO: Self = Self(0);

    /// Creates a fare from millimes.
    #[must_use]
    pub const fn from_millimes(millimes: u64) -> Self {
        Self(millimes)
    }

    /// Returns the fare in millimes.
    #[must_use]
    pub const fn millimes(&self) -> u64 {
        self.0
    }

    /// Parses a dinar amount such as `4`, `4.5` or `4.500`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidFare` for empty, negative or
    /// non-numeric input, or for more than three decimal places.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let trimmed: &str = value.trim();
        let invalid = || DomainError::InvalidFare(value.to_string());

        let (dinars, fraction): (&str, &str) = trimmed.split_once('.').unwrap_or((trimmed, ""));
        if dinars.is_empty() || !dinars.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        if fraction.len() > 3 || !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        if trimmed.contains('.') && fraction.is_empty() {
            return Err(invalid());
        }

        let whole: u64 = dinars.parse().map_err(|_| invalid())?;
        let millimes: u64 = if fraction.is_empty() {
            0
        } else {
            format!("{fraction:0<3}").parse().map_err(|_| invalid())?
        };

        whole
            .checked_mul(MILLIMES_PER_DINAR)
            .and_then(|m| m.checked_add(millimes))
            .map(Self)
            .ok_or_else(invalid)
    }

    /// Returns the price of `seats` seats at this fare.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidFare` if the total overflows.
    pub fn for_seats(self, seats: u32) -> Result<Self, DomainError> {
        self.0
            .checked_mul(u64::from(seats))
            .map(Self)
            .ok_or_else(|| DomainError::InvalidFare(format!("{self} x {seats}")))
    }
}

impl std::fmt::Display for Fare {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}.{:03}",
            self.0 / MILLIMES_PER_DINAR,
            self.0 % MILLIMES_PER_DINAR
        )
    }
}

/// The passenger a booking is made for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    name: String,
    phone: Option<String>,
}

impl Customer {
    /// Creates a customer record.
    ///
    /// An empty phone number is treated as absent.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCustomer` if the name is empty, or if
    /// the phone number has fewer than 8 digits or characters other than
    /// digits, spaces and a leading `+`.
    pub fn new(name: &str, phone: Option<&str>) -> Result<Self, DomainError> {
        let name: &str = name.trim();
        if name.is_empty() {
            return Err(DomainError::InvalidCustomer(String::from(
                "Customer name cannot be empty",
            )));
        }

        let phone: Option<String> = phone
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(validate_phone)
            .transpose()?;

        Ok(Self {
            name: name.to_string(),
            phone,
        })
    }

    /// Returns the customer's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the customer's phone number, if given.
    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }
}

fn validate_phone(phone: &str) -> Result<String, DomainError> {
    let digits: &str = phone.strip_prefix('+').unwrap_or(phone);
    let well_formed: bool = digits.chars().all(|c| c.is_ascii_digit() || c == ' ');
    let digit_count: usize = digits.chars().filter(char::is_ascii_digit).count();
    if !well_formed || digit_count < MIN_PHONE_DIGITS {
        return Err(DomainError::InvalidCustomer(format!(
            "Invalid phone number '{phone}'"
        )));
    }
    Ok(phone.to_string())
}
