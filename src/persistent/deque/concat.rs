//! Concatenation.
//!
//! The shallower operand is folded slot by slot onto the matching end of the
//! other. When both operands are deep, each packs its inner buffer into its
//! middle as digits and the two middles are concatenated one level down, so
//! the recursion depth is bounded by the smaller operand's depth.

use super::level::{Level, Nested};
use super::node::{Kind, Node, Shape, Slot};

impl<E> Node<E> {
    pub(crate) fn concatenate<L: Level<E>>(first: &Self, second: &Self) -> Self {
        let (first_kind, second_kind) = (first.kind(), second.kind());
        if first_kind < second_kind {
            first.append_left_to::<L>(second)
        } else if second_kind < Kind::Deep {
            second.append_right_to::<L>(first)
        } else {
            let (
                Shape::Deep {
                    left: outer_left,
                    middle: first_middle,
                    right: inner_right,
                },
                Shape::Deep {
                    left: inner_left,
                    middle: second_middle,
                    right: outer_right,
                },
            ) = (first.shape(), second.shape())
            else {
                unreachable!("both operands are deep")
            };
            tracing::trace!(
                first_len = first.size(),
                second_len = second.size(),
                "packing inner buffers into middles"
            );
            let middle = Self::concatenate::<Nested>(
                &Self::pack_right::<L>(first_middle, inner_right),
                &Self::pack_left::<L>(inner_left, second_middle),
            );
            L::deep(outer_left.clone(), middle, outer_right.clone())
        }
    }

    /// Same result as concatenating `self` in front of `target`.
    pub(crate) fn append_left_to<L: Level<E>>(&self, target: &Self) -> Self {
        match self.shape() {
            Shape::Empty => target.clone(),
            Shape::Single(e0) => target.cons_left::<L>(e0.clone()),
            Shape::Pair(e0, e1) => target.cons_cons_left::<L>(e0.clone(), e1.clone()),
            Shape::Triple(e0, e1, e2) => target
                .cons_left::<L>(e2.clone())
                .cons_cons_left::<L>(e0.clone(), e1.clone()),
            Shape::Quad(e0, e1, e2, e3) => target
                .cons_cons_left::<L>(e2.clone(), e3.clone())
                .cons_cons_left::<L>(e0.clone(), e1.clone()),
            Shape::Deep { .. } => Self::concatenate::<L>(self, target),
        }
    }

    /// Same result as concatenating `target` in front of `self`.
    pub(crate) fn append_right_to<L: Level<E>>(&self, target: &Self) -> Self {
        match self.shape() {
            Shape::Empty => target.clone(),
            Shape::Single(e0) => target.cons_right::<L>(e0.clone()),
            Shape::Pair(e0, e1) => target.cons_cons_right::<L>(e0.clone(), e1.clone()),
            Shape::Triple(e0, e1, e2) => target
                .cons_cons_right::<L>(e0.clone(), e1.clone())
                .cons_right::<L>(e2.clone()),
            Shape::Quad(e0, e1, e2, e3) => target
                .cons_cons_right::<L>(e0.clone(), e1.clone())
                .cons_cons_right::<L>(e2.clone(), e3.clone()),
            Shape::Deep { .. } => Self::concatenate::<L>(target, self),
        }
    }

    /// Appends `right` to the end of `middle` as digits. A four-slot buffer
    /// becomes two two-slot digits.
    fn pack_right<L: Level<E>>(middle: &Self, right: &Self) -> Self {
        match right.shape() {
            Shape::Pair(..) | Shape::Triple(..) => {
                middle.cons_right::<Nested>(Slot::Digit(right.clone()))
            }
            Shape::Quad(e0, e1, e2, e3) => middle.cons_cons_right::<Nested>(
                Slot::Digit(L::pair(e0.clone(), e1.clone())),
                Slot::Digit(L::pair(e2.clone(), e3.clone())),
            ),
            _ => unreachable!("deep node buffers hold two to four slots"),
        }
    }

    fn pack_left<L: Level<E>>(left: &Self, middle: &Self) -> Self {
        match left.shape() {
            Shape::Pair(..) | Shape::Triple(..) => {
                middle.cons_left::<Nested>(Slot::Digit(left.clone()))
            }
            Shape::Quad(e0, e1, e2, e3) => middle.cons_cons_left::<Nested>(
                Slot::Digit(L::pair(e0.clone(), e1.clone())),
                Slot::Digit(L::pair(e2.clone(), e3.clone())),
            ),
            _ => unreachable!("deep node buffers hold two to four slots"),
        }
    }
}
