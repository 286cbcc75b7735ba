//! Persistent (immutable) deque.
//!
//! - [`PersistentDeque`]: persistent double-ended queue with catenation
//!
//! # Structural Sharing
//!
//! Every operation returns a new version and leaves its inputs untouched.
//! Nodes and elements are reference counted, so a new version shares all
//! unchanged structure with the version it came from and cloning a deque is
//! O(1).
//!
//! # Examples
//!
//! ```rust
//! use persistent_deque::persistent::PersistentDeque;
//!
//! let deque: PersistentDeque<i32> = (1..=3).collect();
//! let extended = deque.cons_left(0).cons_right(4);
//!
//! assert_eq!(deque.len(), 3);    // Original unchanged
//! assert_eq!(extended.len(), 5); // New version
//! assert_eq!(extended.head_left(), Ok(&0));
//! assert_eq!(extended.head_right(), Ok(&4));
//! ```
//!
//! # Thread Safety
//!
//! With the `arc` feature, nodes are shared through [`std::sync::Arc`] and
//! `PersistentDeque<T>` is `Send + Sync` whenever `T` is. Without it,
//! [`std::rc::Rc`] is used and deques stay on one thread.

#[cfg(feature = "arc")]
pub(crate) type ReferenceCounter<T> = std::sync::Arc<T>;

#[cfg(not(feature = "arc"))]
pub(crate) type ReferenceCounter<T> = std::rc::Rc<T>;

mod deque;

pub use deque::DequeError;
pub use deque::PersistentDeque;
pub use deque::PersistentDequeIntoIterator;
pub use deque::PersistentDequeIterator;

#[cfg(test)]
mod reference_counter_tests {
    use super::{PersistentDeque, ReferenceCounter};
    use rstest::rstest;

    #[rstest]
    fn test_reference_counter_clone() {
        let reference_counter: ReferenceCounter<i32> = ReferenceCounter::new(42);
        let reference_counter_clone = reference_counter.clone();
        assert!(ReferenceCounter::ptr_eq(
            &reference_counter,
            &reference_counter_clone
        ));
    }

    #[rstest]
    fn test_versions_share_elements() {
        let element = ReferenceCounter::new(7);
        let deque = PersistentDeque::singleton(ReferenceCounter::clone(&element));
        assert_eq!(ReferenceCounter::strong_count(&element), 2);

        let versions: Vec<_> = (0..4)
            .map(|value| deque.cons_right(ReferenceCounter::new(value)))
            .collect();
        assert_eq!(ReferenceCounter::strong_count(&element), 2);

        drop(versions);
        drop(deque);
        assert_eq!(ReferenceCounter::strong_count(&element), 1);
    }
}
