use crate::{Cache, CacheLookup, Equality, LookupKind, RequestId, StructuralEq};

fn ignore_case(a: &String, b: &String) -> bool {
    a.eq_ignore_ascii_case(b)
}

#[test]
fn lookup_absent() {
    let cache: Cache<String, i32> = Cache::new();
    let lookup = cache.lookup(&"a".to_string(), &StructuralEq);
    assert_eq!(lookup, CacheLookup::Absent);
    assert_eq!(lookup.kind().to_string(), "absent");
}

#[test]
fn lookup_uses_injected_equality() {
    let cache: Cache<String, i32> = Cache::new().with_received("User".into(), 1, &ignore_case);
    assert_eq!(
        cache.lookup(&"USER".to_string(), &ignore_case),
        CacheLookup::Received(&1)
    );
    assert_eq!(
        cache.lookup(&"USER".to_string(), &StructuralEq),
        CacheLookup::Absent
    );
}

#[test]
fn lookup_awaiting() {
    let (cache, superseded) =
        Cache::<&str, i32>::new().with_awaiting("a", RequestId::from("req-1"), None, &StructuralEq);
    assert_eq!(superseded, None);
    assert_eq!(cache.lookup(&"a", &StructuralEq), CacheLookup::Awaiting);
    assert_eq!(cache.lookup(&"a", &StructuralEq).kind(), LookupKind::Awaiting);
    assert_eq!(cache.in_flight_count(), 1);
}

#[test]
fn with_received_moves_replaced_entry_to_end() {
    let cache: Cache<&str, i32> = Cache::new()
        .with_received("a", 1, &StructuralEq)
        .with_received("b", 2, &StructuralEq)
        .with_received("a", 3, &StructuralEq);
    let items: Vec<_> = cache.iter().map(|e| (*e.key(), e.value().copied())).collect();
    assert_eq!(items, vec![("b", Some(2)), ("a", Some(3))]);
}

#[test]
fn mutation_does_not_touch_shared_snapshot() {
    let before: Cache<&str, i32> = Cache::new().with_received("a", 1, &StructuralEq);
    let after = before.clone().with_received("a", 2, &StructuralEq);
    assert_eq!(before.get(&"a", &StructuralEq).and_then(|e| e.value()), Some(&1));
    assert_eq!(after.get(&"a", &StructuralEq).and_then(|e| e.value()), Some(&2));
}

#[test]
fn retain_without_removal_keeps_snapshot() {
    let cache: Cache<&str, i32> = Cache::new().with_received("a", 1, &StructuralEq);
    let retained = cache.clone().retain(|_| true);
    assert!(retained.ptr_eq(&cache));

    let retained = cache.clone().retain(|_| false);
    assert!(retained.is_empty());
    assert_eq!(cache.len(), 1);
}

#[test]
fn find_request() {
    let (cache, _) = Cache::<&str, i32>::new().with_awaiting(
        "a",
        RequestId::from("req-7"),
        Some(()),
        &StructuralEq,
    );
    let entry = cache.find_request(&RequestId::from("req-7")).unwrap();
    assert_eq!(*entry.key(), "a");
    assert_eq!(entry.meta(), Some(&()));
    assert!(cache.find_request(&RequestId::from("req-8")).is_none());
}

#[test]
fn closure_equality() {
    let eq = |a: &i32, b: &i32| a % 10 == b % 10;
    assert!(eq.are_equal(&1, &11));
    let cache: Cache<i32, &str> = Cache::new().with_received(1, "one", &eq);
    assert_eq!(cache.lookup(&21, &eq), CacheLookup::Received(&"one"));
}

#[test]
fn serde_round_trip_keeps_in_flight_requests() {
    let (cache, _) = Cache::<String, u32, String>::new()
        .with_received("a".into(), 1, &StructuralEq)
        .with_awaiting(
            "b".into(),
            RequestId::from("req-2"),
            Some("hint".into()),
            &StructuralEq,
        );
    let json = serde_json::to_string(&cache).unwrap();
    let restored: Cache<String, u32, String> = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, cache);
    assert_eq!(
        restored.find_request(&RequestId::from("req-2")).map(|e| e.key().as_str()),
        Some("b")
    );
}
