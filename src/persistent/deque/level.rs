//! Nesting-level factories.
//!
//! Every node of a deque is built through a [`Level`]. A level knows how much
//! a single slot contributes to the size of the node holding it, and derives
//! the cached size of every node it constructs from that measure.
//!
//! Two levels exist:
//!
//! - [`Outer`]: slots hold client items, each of size one.
//! - [`Nested`]: slots hold digits (buffers one level further out), each
//!   measuring its own cached size.
//!
//! The middle of a deep node is always built at [`Nested`], whatever level the
//! deep node itself lives at. Because slots are type-erased, a digit of digits
//! has the same Rust type as a digit of items, and each algorithm is
//! instantiated exactly twice no matter how deep the nesting grows.

use super::node::{Node, Shape, Slot};

/// Construction strategy for one nesting level.
pub(crate) trait Level<E> {
    /// Number of client items a single slot at this level stands for.
    fn size_of(slot: &Slot<E>) -> usize;

    fn empty() -> Node<E> {
        Node::from_shape(0, Shape::Empty)
    }

    fn single(e0: Slot<E>) -> Node<E> {
        Node::from_shape(Self::size_of(&e0), Shape::Single(e0))
    }

    fn pair(e0: Slot<E>, e1: Slot<E>) -> Node<E> {
        let size = Self::size_of(&e0) + Self::size_of(&e1);
        Node::from_shape(size, Shape::Pair(e0, e1))
    }

    fn triple(e0: Slot<E>, e1: Slot<E>, e2: Slot<E>) -> Node<E> {
        let size = Self::size_of(&e0) + Self::size_of(&e1) + Self::size_of(&e2);
        Node::from_shape(size, Shape::Triple(e0, e1, e2))
    }

    fn quadruple(e0: Slot<E>, e1: Slot<E>, e2: Slot<E>, e3: Slot<E>) -> Node<E> {
        let size = Self::size_of(&e0)
            + Self::size_of(&e1)
            + Self::size_of(&e2)
            + Self::size_of(&e3);
        Node::from_shape(size, Shape::Quad(e0, e1, e2, e3))
    }

    /// Builds a deep node. `left` and `right` must be buffers holding two to
    /// four slots; `middle` holds digits at [`Nested`].
    fn deep(left: Node<E>, middle: Node<E>, right: Node<E>) -> Node<E> {
        debug_assert!(left.is_digit() && right.is_digit());
        let size = left.size() + middle.size() + right.size();
        Node::from_shape(
            size,
            Shape::Deep {
                left,
                middle,
                right,
            },
        )
    }

    /// Builds a deep node whose middle is empty.
    fn deep_from_buffers(left: Node<E>, right: Node<E>) -> Node<E> {
        Self::deep(left, <Nested as Level<E>>::empty(), right)
    }
}

/// The client-facing level: each slot is one item.
pub(crate) enum Outer {}

/// Every level below the outermost: each slot is a digit.
pub(crate) enum Nested {}

impl<E> Level<E> for Outer {
    #[inline]
    fn size_of(_slot: &Slot<E>) -> usize {
        1
    }
}

impl<E> Level<E> for Nested {
    #[inline]
    fn size_of(slot: &Slot<E>) -> usize {
        slot.digit().size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistent::ReferenceCounter;
    use rstest::rstest;

    fn item(value: i32) -> Slot<i32> {
        Slot::Item(ReferenceCounter::new(value))
    }

    #[rstest]
    fn test_outer_measures_one_per_slot() {
        let quadruple = Outer::quadruple(item(1), item(2), item(3), item(4));
        assert_eq!(quadruple.size(), 4);
        assert_eq!(<Outer as Level<i32>>::empty().size(), 0);
    }

    #[rstest]
    fn test_nested_measures_digit_sizes() {
        let pair = Outer::pair(item(1), item(2));
        let triple = Outer::triple(item(3), item(4), item(5));
        let nested = Nested::pair(Slot::Digit(pair), Slot::Digit(triple));
        assert_eq!(nested.size(), 5);
    }

    #[rstest]
    fn test_deep_sums_all_parts() {
        let middle = Nested::single(Slot::Digit(Outer::triple(item(3), item(4), item(5))));
        let deep = Outer::deep(
            Outer::pair(item(1), item(2)),
            middle,
            Outer::pair(item(6), item(7)),
        );
        assert_eq!(deep.size(), 7);
    }

    #[rstest]
    fn test_deep_from_buffers_has_empty_middle() {
        let deep = Outer::deep_from_buffers(
            Outer::pair(item(1), item(2)),
            Outer::triple(item(3), item(4), item(5)),
        );
        assert_eq!(deep.size(), 5);
        let Shape::Deep { middle, .. } = deep.shape() else {
            panic!("expected a deep node");
        };
        assert!(middle.is_empty());
    }
}
