// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use louaj::CoreError;
use louaj_domain::DomainError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

/// Translates a domain error into an API error.
///
/// Missing resources become `ResourceNotFound`, malformed input becomes
/// `InvalidInput`, and everything else is a `DomainRuleViolation` naming
/// the rule.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    match err {
        DomainError::DestinationNotFound(_) => not_found("Destination", message),
        DomainError::EntryNotFound(_) => not_found("Queue entry", message),
        DomainError::VehicleNotFound(_) => not_found("Vehicle", message),
        DomainError::DriverNotFound(_) => not_found("Driver", message),
        DomainError::TicketNotFound(_) => not_found("Ticket", message),
        DomainError::DuplicateDestination(_) => violation("unique_destination", message),
        DomainError::DuplicateVehicle { .. } => violation("one_slot_per_vehicle", message),
        DomainError::DuplicateVehicleRegistration(_) => {
            violation("unique_vehicle_registration", message)
        }
        DomainError::InvalidPermutation { .. } => violation("queue_permutation", message),
        DomainError::InvalidTransition { .. } => violation("status_transition", message),
        DomainError::InsufficientSeats { .. } => violation("seat_availability", message),
        DomainError::UnassignedVehicle(_) => violation("assigned_destination", message),
        DomainError::TicketAlreadyVerified(_) => violation("single_verification", message),
        DomainError::StationClosed => violation("station_operational", message),
        DomainError::InvalidSeatRequest { .. } => invalid("seats", message),
        DomainError::InvalidDestination(_) => invalid("destination", message),
        DomainError::InvalidDriverCin(_) => invalid("driver_cin", message),
        DomainError::InvalidVehicle(_) => invalid("vehicle", message),
        DomainError::InvalidStatus(_) => invalid("status", message),
        DomainError::InvalidQueueType(_) => invalid("queue_type", message),
        DomainError::InvalidTimezone(_) => invalid("timezone", message),
        DomainError::InvalidSchedule { .. } => invalid("opening_time", message),
        DomainError::InvalidFare(_) => invalid("base_price", message),
        DomainError::InvalidCustomer(_) => invalid("customer", message),
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        other @ (CoreError::MisroutedCommand(_) | CoreError::UnexpectedOutcome { .. }) => {
            ApiError::Internal {
                message: other.to_string(),
            }
        }
    }
}

fn not_found(resource_type: &str, message: String) -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: resource_type.to_string(),
        message,
    }
}

fn violation(rule: &str, message: String) -> ApiError {
    ApiError::DomainRuleViolation {
        rule: rule.to_string(),
        message,
    }
}

fn invalid(field: &str, message: String) -> ApiError {
    ApiError::InvalidInput {
        field: field.to_string(),
        message,
    }
}
