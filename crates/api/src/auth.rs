// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Staff roles and authorization checks.

use louaj_audit::Actor;

use crate::error::AuthError;

/// Staff roles for authorization.
///
/// Roles determine what actions an authenticated staff member may perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Desk staff.
    ///
    /// Staff may:
    /// - view queues, statistics and the audit trail
    /// - enqueue, reorder and remove vehicles in the active queue
    /// - move entries through their status lifecycle
    /// - book and cancel seats
    Staff,
    /// Shift supervisor.
    ///
    /// Supervisors may do everything staff can, and additionally:
    /// - manage the overnight queue (park, mark ready, remove, promote)
    /// - register destinations and vehicles
    Supervisor,
}

impl Role {
    /// Returns the audit actor type for this role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Staff => "staff",
            Self::Supervisor => "supervisor",
        }
    }

    /// Parses a role name, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::AuthenticationFailed` for an unknown role.
    pub fn parse(value: &str) -> Result<Self, AuthError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "staff" => Ok(Self::Staff),
            "supervisor" => Ok(Self::Supervisor),
            other => Err(AuthError::AuthenticationFailed {
                reason: format!("Unknown role '{other}'"),
            }),
        }
    }
}

/// An authenticated staff member with an associated role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The unique identifier for this staff member.
    pub id: String,
    /// The role assigned to this staff member.
    pub role: Role,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `role` - The role assigned to this actor
    #[must_use]
    pub const fn new(id: String, role: Role) -> Self {
        Self { id, role }
    }

    /// Converts this authenticated actor into an audit Actor.
    ///
    /// This is used when recording audit events to attribute actions
    /// to the staff member.
    #[must_use]
    pub fn to_audit_actor(&self) -> Actor {
        Actor::new(self.id.clone(), self.role.as_str().to_string())
    }
}

/// Authorization service for enforcing role-based access control.
///
/// Active-queue operations only need an authenticated actor, so they have
/// no check here.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks if an actor may manage the overnight queue.
    ///
    /// Only supervisors may.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Supervisor role.
    pub fn authorize_overnight_operation(
        actor: &AuthenticatedActor,
        action: &str,
    ) -> Result<(), AuthError> {
        Self::require_supervisor(actor, action)
    }

    /// Checks if an actor may register destinations and vehicles, set
    /// fares, or open and close the station.
    ///
    /// Only supervisors may.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Supervisor role.
    pub fn authorize_station_setup(
        actor: &AuthenticatedActor,
        action: &str,
    ) -> Result<(), AuthError> {
        Self::require_supervisor(actor, action)
    }

    fn require_supervisor(actor: &AuthenticatedActor, action: &str) -> Result<(), AuthError> {
        match actor.role {
            Role::Supervisor => Ok(()),
            Role::Staff => Err(AuthError::Unauthorized {
                action: action.to_string(),
                required_role: String::from("Supervisor"),
            }),
        }
    }
}

/// Builds an authenticated actor from the identity a client presents.
///
/// There is no credential store; the identity is trusted as given.
///
/// # Errors
///
/// Returns an error if the actor id is empty.
pub fn authenticate_stub(actor_id: String, role: Role) -> Result<AuthenticatedActor, AuthError> {
    if actor_id.trim().is_empty() {
        return Err(AuthError::AuthenticationFailed {
            reason: String::from("Staff id cannot be empty"),
        });
    }
    Ok(AuthenticatedActor::new(actor_id, role))
}
