// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Queue position rules.
//!
//! ## Invariants
//!
//! - Positions in a destination's active queue are exactly `1..=N`
//! - Positions in a destination's overnight list are exactly `1..=M`
//! - Any removal or promotion renumbers the remaining slots at once
//!
//! Lists are kept in position order, so renumbering is a single pass that
//! writes `index + 1` into each slot. A reorder is caller-driven: the
//! caller supplies the full order and this module only checks it is a
//! permutation of what is there.

use crate::error::DomainError;
use crate::queue_entry::{OvernightEntry, QueueEntry};
use crate::types::{Destination, EntryId};
use std::collections::HashSet;

/// Validates that `ordered_ids` is a permutation of `current_ids`.
///
/// # Errors
///
/// Returns `DomainError::InvalidPermutation` if:
/// - The two sequences have different lengths
/// - `ordered_ids` contains an id more than once
/// - `ordered_ids` contains an id not in `current_ids`
pub fn validate_permutation(
    destination: &Destination,
    current_ids: &[EntryId],
    ordered_ids: &[EntryId],
) -> Result<(), DomainError> {
    let invalid = |reason: String| DomainError::InvalidPermutation {
        destination: destination.name().to_string(),
        reason,
    };

    if current_ids.len() != ordered_ids.len() {
        return Err(invalid(format!(
            "expected {} entries, got {}",
            current_ids.len(),
            ordered_ids.len()
        )));
    }

    let known: HashSet<EntryId> = current_ids.iter().copied().collect();
    let mut seen: HashSet<EntryId> = HashSet::with_capacity(ordered_ids.len());

    for id in ordered_ids {
        if !seen.insert(*id) {
            return Err(invalid(format!("entry {id} appears more than once")));
        }
        if !known.contains(id) {
            return Err(invalid(format!("entry {id} is not in this queue")));
        }
    }

    Ok(())
}

/// Rewrites active-queue positions to `1..=N` in slice order.
pub fn renumber_active(entries: &mut [QueueEntry]) {
    for (position, entry) in (1u32..).zip(entries.iter_mut()) {
        entry.position = position;
    }
}

/// Rewrites overnight positions to `1..=M` in slice order.
pub fn renumber_overnight(entries: &mut [OvernightEntry]) {
    for (position, entry) in (1u32..).zip(entries.iter_mut()) {
        entry.position = position;
    }
}

/// Returns true if `positions`, in order, are exactly `1..=len`.
#[must_use]
pub fn is_contiguous(positions: impl IntoIterator<Item = u32>) -> bool {
    positions
        .into_iter()
        .zip(1u32..)
        .all(|(position, expected)| position == expected)
}

/// Returns the next free position in a list of `len` slots.
#[must_use]
pub fn next_position(len: usize) -> u32 {
    u32::try_from(len).map_or(u32::MAX, |n| n.saturating_add(1))
}
