// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use louaj_domain::Destination;
use std::collections::VecDeque;

/// Default number of events retained by an [`AuditLog`].
pub const DEFAULT_AUDIT_CAPACITY: usize = 1000;

/// Represents the entity performing an action.
///
/// An actor is station staff, a supervisor, or the promotion scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The type of actor (`staff`, `supervisor`, `scheduler`).
    pub actor_type: String,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `actor_type` - The type of actor
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }

    /// The actor used for automatic morning promotion.
    #[must_use]
    pub fn scheduler() -> Self {
        Self::new(String::from("promotion-scheduler"), String::from("scheduler"))
    }
}

/// Represents the reason or trigger for an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cause {
    /// A unique identifier for this cause (e.g., request ID).
    pub id: String,
    /// A description of the cause.
    pub description: String,
}

impl Cause {
    /// Creates a new Cause.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this cause
    /// * `description` - A description of what triggered this action
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// Represents the specific action performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// The name of the action (e.g., "`Reorder`", "`PromoteOvernight`").
    pub name: String,
    /// Optional additional details about the action.
    pub details: Option<String>,
}

impl Action {
    /// Creates a new Action.
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// A compact description of queue state at a point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSnapshot {
    /// A string representation of the state.
    pub data: String,
}

impl StateSnapshot {
    /// Creates a new `StateSnapshot`.
    #[must_use]
    pub const fn new(data: String) -> Self {
        Self { data }
    }
}

/// An immutable audit event representing a state transition.
///
/// Every successful mutation produces exactly one audit event. Failed
/// mutations produce none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// Sequence number assigned when recorded. `None` until then.
    pub event_id: Option<u64>,
    /// The destination whose queues changed, if the action was scoped.
    pub destination: Option<Destination>,
    /// The actor who initiated this state change.
    pub actor: Actor,
    /// The cause or reason for this state change.
    pub cause: Cause,
    /// The action that was performed.
    pub action: Action,
    /// The state before the transition.
    pub before: StateSnapshot,
    /// The state after the transition.
    pub after: StateSnapshot,
}

impl AuditEvent {
    /// Creates a new unrecorded `AuditEvent`.
    ///
    /// # Arguments
    ///
    /// * `destination` - The destination scope, if any
    /// * `actor` - The actor who initiated the change
    /// * `cause` - The reason for the change
    /// * `action` - The action that was performed
    /// * `before` - The state before the transition
    /// * `after` - The state after the transition
    #[must_use]
    pub const fn new(
        destination: Option<Destination>,
        actor: Actor,
        cause: Cause,
        action: Action,
        before: StateSnapshot,
        after: StateSnapshot,
    ) -> Self {
        Self {
            event_id: None,
            destination,
            actor,
            cause,
            action,
            before,
            after,
        }
    }
}

/// Bounded, append-only, in-memory audit trail.
///
/// When full, the oldest event is dropped. Event ids keep increasing
/// regardless of eviction.
#[derive(Debug, Clone)]
pub struct AuditLog {
    events: VecDeque<AuditEvent>,
    capacity: usize,
    next_event_id: u64,
}

impl AuditLog {
    /// Creates an empty log holding at most `capacity` events (minimum 1).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity: usize = capacity.max(1);
        Self {
            events: VecDeque::with_capacity(capacity.min(DEFAULT_AUDIT_CAPACITY)),
            capacity,
            next_event_id: 1,
        }
    }

    /// Assigns the next event id and appends the event.
    ///
    /// Returns the assigned id.
    pub fn record(&mut self, mut event: AuditEvent) -> u64 {
        let event_id: u64 = self.next_event_id;
        self.next_event_id += 1;
        event.event_id = Some(event_id);

        if self.events.len() == self.capacity {
            self.events.pop_front();
        }
        self.events.push_back(event);
        event_id
    }

    /// Returns retained events for `destination`, oldest first.
    #[must_use]
    pub fn events_for(&self, destination: &Destination) -> Vec<AuditEvent> {
        self.events
            .iter()
            .filter(|e| e.destination.as_ref() == Some(destination))
            .cloned()
            .collect()
    }

    /// Returns up to `n` most recent events, oldest first.
    #[must_use]
    pub fn latest(&self, n: usize) -> Vec<AuditEvent> {
        let skip: usize = self.events.len().saturating_sub(n);
        self.events.iter().skip(skip).cloned().collect()
    }

    /// Returns the number of retained events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if no events are retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl Default for AuditLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_AUDIT_CAPACITY)
    }
}
