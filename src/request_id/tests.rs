use std::collections::HashSet;

use crate::{RequestId, RequestIdGenerator};

#[test]
fn ids_count_from_one() {
    let g = RequestIdGenerator::new();
    assert_eq!(g.next_id(), RequestId::from("req-1"));
    assert_eq!(g.next_id(), RequestId::from("req-2"));
}

#[test]
fn generators_share_counter() {
    let a = RequestIdGenerator::new();
    let b = RequestIdGenerator::new();
    let c = RequestIdGenerator::with_prefix("users");
    assert_eq!(a.next_id().as_str(), "req-1");
    assert_eq!(b.next_id().as_str(), "req-2");
    assert_eq!(c.next_id().as_str(), "users-3");
    assert_eq!(a.next_id().as_str(), "req-4");
}

#[test]
fn cloned_generator_continues_sequence() {
    let a = RequestIdGenerator::new();
    a.next_id();
    let b = a.clone();
    assert_eq!(b.next_id().as_str(), "req-2");
}

#[test]
fn random_prefixes_differ() {
    let a = RequestIdGenerator::with_random_prefix();
    let b = RequestIdGenerator::with_random_prefix();
    assert_ne!(a.prefix(), b.prefix());
    let ids: HashSet<_> = (0..4).flat_map(|_| [a.next_id(), b.next_id()]).collect();
    assert_eq!(ids.len(), 8);
}
