#![cfg(feature = "serde")]

//! Integration tests for serde support in persistent-deque.
//!
//! These tests verify that deques serialize as plain sequences and
//! deserialize back into equal deques.

use persistent_deque::persistent::PersistentDeque;
use rstest::rstest;

#[rstest]
fn test_deque_json_roundtrip() {
    let deque: PersistentDeque<i32> = (1..=100).collect();
    let json = serde_json::to_string(&deque).unwrap();
    let restored: PersistentDeque<i32> = serde_json::from_str(&json).unwrap();
    assert_eq!(deque, restored);
}

#[rstest]
fn test_deque_serializes_as_sequence() {
    let deque = PersistentDeque::singleton(2).cons_left(1).cons_right(3);
    let json = serde_json::to_string(&deque).unwrap();
    assert_eq!(json, "[1,2,3]");
}

#[rstest]
fn test_empty_deque_roundtrip() {
    let deque: PersistentDeque<String> = PersistentDeque::new();
    let json = serde_json::to_string(&deque).unwrap();
    assert_eq!(json, "[]");
    let restored: PersistentDeque<String> = serde_json::from_str(&json).unwrap();
    assert!(restored.is_empty());
}

#[rstest]
fn test_concatenated_deque_roundtrip() {
    let first: PersistentDeque<i32> = (0..50).collect();
    let second: PersistentDeque<i32> = (50..120).collect();
    let joined = first.concat(&second);
    let json = serde_json::to_string(&joined).unwrap();
    let restored: PersistentDeque<i32> = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.len(), 120);
    assert_eq!(restored.get(75), Ok(&75));
}

#[rstest]
fn test_nested_deques() {
    let inner1: PersistentDeque<i32> = (1..=3).collect();
    let inner2: PersistentDeque<i32> = (4..=6).collect();
    let outer: PersistentDeque<PersistentDeque<i32>> = vec![inner1, inner2].into_iter().collect();

    let json = serde_json::to_string(&outer).unwrap();
    assert_eq!(json, "[[1,2,3],[4,5,6]]");
    let restored: PersistentDeque<PersistentDeque<i32>> = serde_json::from_str(&json).unwrap();
    assert_eq!(outer, restored);
}

#[rstest]
fn test_deserialize_rejects_non_sequence() {
    let result: Result<PersistentDeque<i32>, _> = serde_json::from_str("{\"a\": 1}");
    assert!(result.is_err());
}
