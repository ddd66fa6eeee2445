// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::create_test_entry;
use crate::{
    Destination, DomainError, EntryId, QueueEntry, is_contiguous, next_position, renumber_active,
    validate_permutation,
};

fn ids(values: &[u64]) -> Vec<EntryId> {
    values.iter().copied().map(EntryId::new).collect()
}

#[test]
fn test_validate_permutation_accepts_reordering() {
    let destination: Destination = Destination::new("Sousse");
    let result: Result<(), DomainError> =
        validate_permutation(&destination, &ids(&[1, 2, 3]), &ids(&[3, 1, 2]));
    assert!(result.is_ok());
}

#[test]
fn test_validate_permutation_accepts_empty_queue() {
    let destination: Destination = Destination::new("Sousse");
    assert!(validate_permutation(&destination, &[], &[]).is_ok());
}

#[test]
fn test_validate_permutation_rejects_wrong_length() {
    let destination: Destination = Destination::new("Sousse");
    let result: Result<(), DomainError> =
        validate_permutation(&destination, &ids(&[1, 2, 3]), &ids(&[1, 2]));
    assert_eq!(
        result,
        Err(DomainError::InvalidPermutation {
            destination: String::from("Sousse"),
            reason: String::from("expected 3 entries, got 2"),
        })
    );
}

#[test]
fn test_validate_permutation_rejects_duplicate_id() {
    let destination: Destination = Destination::new("Sousse");
    let result: Result<(), DomainError> =
        validate_permutation(&destination, &ids(&[1, 2, 3]), &ids(&[1, 1, 3]));
    assert_eq!(
        result,
        Err(DomainError::InvalidPermutation {
            destination: String::from("Sousse"),
            reason: String::from("entry 1 appears more than once"),
        })
    );
}

#[test]
fn test_validate_permutation_rejects_unknown_id() {
    let destination: Destination = Destination::new("Sousse");
    let result: Result<(), DomainError> =
        validate_permutation(&destination, &ids(&[1, 2, 3]), &ids(&[1, 2, 9]));
    assert_eq!(
        result,
        Err(DomainError::InvalidPermutation {
            destination: String::from("Sousse"),
            reason: String::from("entry 9 is not in this queue"),
        })
    );
}

#[test]
fn test_renumber_active_closes_gaps() {
    let mut entries: Vec<QueueEntry> = vec![
        create_test_entry(1, 1, 8),
        create_test_entry(3, 3, 8),
        create_test_entry(4, 7, 8),
    ];

    renumber_active(&mut entries);

    let positions: Vec<u32> = entries.iter().map(|e| e.position).collect();
    assert_eq!(positions, vec![1, 2, 3]);
    assert_eq!(entries[2].id, EntryId::new(4));
}

#[test]
fn test_is_contiguous() {
    assert!(is_contiguous(Vec::<u32>::new()));
    assert!(is_contiguous([1, 2, 3]));
    assert!(!is_contiguous([1, 3]));
    assert!(!is_contiguous([1, 2, 2]));
    assert!(!is_contiguous([2, 3]));
}

#[test]
fn test_next_position() {
    assert_eq!(next_position(0), 1);
    assert_eq!(next_position(4), 5);
}
