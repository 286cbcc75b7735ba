//! Algorithms on deep nodes.
//!
//! A deep node keeps two outer buffers of two to four slots and a middle
//! deque of digits one level down. Pushes and pops touch the buffer on their
//! side and only reach into the middle when that buffer over- or underflows.
//!
//! The `prepare_*` operations keep that cascade short. Before a buffer is
//! pushed to three slots, the middle's own buffer on that side is split if it
//! is full; before a buffer is popped to two slots, the middle's own buffer on
//! that side is refilled if it is down to two. Either way the next overflow or
//! underflow finds the middle ready to absorb it without recursing further,
//! which bounds the amortized cost of every push and pop by a constant.

use super::level::{Level, Nested};
use super::node::{Node, Shape, Slot};

const BUFFER_SHAPE: &str = "deep node buffers hold two to four slots";
const MIDDLE_HAS_HEAD: &str = "a middle with a head digit has a tail";

impl<E> Node<E> {
    pub(super) fn deep_cons_left<L: Level<E>>(
        left: &Self,
        middle: &Self,
        right: &Self,
        e: Slot<E>,
    ) -> Self {
        match left.shape() {
            Shape::Pair(..) => L::deep(left.cons_left::<L>(e), middle.clone(), right.clone()),
            Shape::Triple(..) => L::deep(
                left.cons_left::<L>(e),
                middle.prepare_cons_left::<Nested>(),
                right.clone(),
            ),
            Shape::Quad(e0, e1, e2, e3) => L::deep(
                L::pair(e, e0.clone()),
                middle.cons_left::<Nested>(Slot::Digit(L::triple(
                    e1.clone(),
                    e2.clone(),
                    e3.clone(),
                ))),
                right.clone(),
            ),
            _ => unreachable!("{BUFFER_SHAPE}"),
        }
    }

    pub(super) fn deep_cons_right<L: Level<E>>(
        left: &Self,
        middle: &Self,
        right: &Self,
        e: Slot<E>,
    ) -> Self {
        match right.shape() {
            Shape::Pair(..) => L::deep(left.clone(), middle.clone(), right.cons_right::<L>(e)),
            Shape::Triple(..) => L::deep(
                left.clone(),
                middle.prepare_cons_right::<Nested>(),
                right.cons_right::<L>(e),
            ),
            Shape::Quad(e0, e1, e2, e3) => L::deep(
                left.clone(),
                middle.cons_right::<Nested>(Slot::Digit(L::triple(
                    e0.clone(),
                    e1.clone(),
                    e2.clone(),
                ))),
                L::pair(e3.clone(), e),
            ),
            _ => unreachable!("{BUFFER_SHAPE}"),
        }
    }

    pub(super) fn deep_cons_cons_left<L: Level<E>>(
        left: &Self,
        middle: &Self,
        right: &Self,
        outer: Slot<E>,
        inner: Slot<E>,
    ) -> Self {
        match left.shape() {
            Shape::Pair(..) => L::deep(
                left.cons_cons_left::<L>(outer, inner),
                middle.prepare_cons_left::<Nested>(),
                right.clone(),
            ),
            Shape::Triple(..) => L::deep(
                L::pair(outer, inner),
                middle.cons_left::<Nested>(Slot::Digit(left.clone())),
                right.clone(),
            ),
            Shape::Quad(e0, e1, e2, e3) => L::deep(
                L::triple(outer, inner, e0.clone()),
                middle
                    .cons_left::<Nested>(Slot::Digit(L::triple(
                        e1.clone(),
                        e2.clone(),
                        e3.clone(),
                    )))
                    .prepare_cons_left::<Nested>(),
                right.clone(),
            ),
            _ => unreachable!("{BUFFER_SHAPE}"),
        }
    }

    pub(super) fn deep_cons_cons_right<L: Level<E>>(
        left: &Self,
        middle: &Self,
        right: &Self,
        inner: Slot<E>,
        outer: Slot<E>,
    ) -> Self {
        match right.shape() {
            Shape::Pair(..) => L::deep(
                left.clone(),
                middle.prepare_cons_right::<Nested>(),
                right.cons_cons_right::<L>(inner, outer),
            ),
            Shape::Triple(..) => L::deep(
                left.clone(),
                middle.cons_right::<Nested>(Slot::Digit(right.clone())),
                L::pair(inner, outer),
            ),
            // Prepared like the left-hand mirror so the middle's right buffer
            // stays below four slots.
            Shape::Quad(e0, e1, e2, e3) => L::deep(
                left.clone(),
                middle
                    .cons_right::<Nested>(Slot::Digit(L::triple(
                        e0.clone(),
                        e1.clone(),
                        e2.clone(),
                    )))
                    .prepare_cons_right::<Nested>(),
                L::triple(e3.clone(), inner, outer),
            ),
            _ => unreachable!("{BUFFER_SHAPE}"),
        }
    }

    pub(super) fn deep_tail_left<L: Level<E>>(
        left: &Self,
        middle: &Self,
        right: &Self,
    ) -> Option<Self> {
        let node = match left.shape() {
            Shape::Pair(_, e1) => match middle.head_left() {
                None => right.cons_left::<L>(e1.clone()),
                Some(digit) => {
                    let Some(rest) = middle.tail_left::<Nested>() else {
                        unreachable!("{MIDDLE_HAS_HEAD}")
                    };
                    L::deep(digit.digit().cons_left::<L>(e1.clone()), rest, right.clone())
                }
            },
            Shape::Triple(_, e1, e2) => L::deep(
                L::pair(e1.clone(), e2.clone()),
                middle.prepare_tail_left::<Nested>(),
                right.clone(),
            ),
            Shape::Quad(_, e1, e2, e3) => L::deep(
                L::triple(e1.clone(), e2.clone(), e3.clone()),
                middle.clone(),
                right.clone(),
            ),
            _ => unreachable!("{BUFFER_SHAPE}"),
        };
        Some(node)
    }

    pub(super) fn deep_tail_right<L: Level<E>>(
        left: &Self,
        middle: &Self,
        right: &Self,
    ) -> Option<Self> {
        let node = match right.shape() {
            Shape::Pair(e0, _) => match middle.head_right() {
                None => left.cons_right::<L>(e0.clone()),
                Some(digit) => {
                    let Some(rest) = middle.tail_right::<Nested>() else {
                        unreachable!("{MIDDLE_HAS_HEAD}")
                    };
                    L::deep(left.clone(), rest, digit.digit().cons_right::<L>(e0.clone()))
                }
            },
            Shape::Triple(e0, e1, _) => L::deep(
                left.clone(),
                middle.prepare_tail_right::<Nested>(),
                L::pair(e0.clone(), e1.clone()),
            ),
            Shape::Quad(e0, e1, e2, _) => L::deep(
                left.clone(),
                middle.clone(),
                L::triple(e0.clone(), e1.clone(), e2.clone()),
            ),
            _ => unreachable!("{BUFFER_SHAPE}"),
        };
        Some(node)
    }

    /// Splits a full left buffer, moving its right half into the middle.
    /// Any other node is returned unchanged.
    pub(super) fn prepare_cons_left<L: Level<E>>(&self) -> Self {
        match self.shape() {
            Shape::Deep {
                left,
                middle,
                right,
            } => match left.shape() {
                Shape::Quad(e0, e1, e2, e3) => L::deep(
                    L::pair(e0.clone(), e1.clone()),
                    middle.cons_left::<Nested>(Slot::Digit(L::pair(e2.clone(), e3.clone()))),
                    right.clone(),
                ),
                _ => self.clone(),
            },
            _ => self.clone(),
        }
    }

    pub(super) fn prepare_cons_right<L: Level<E>>(&self) -> Self {
        match self.shape() {
            Shape::Deep {
                left,
                middle,
                right,
            } => match right.shape() {
                Shape::Quad(e0, e1, e2, e3) => L::deep(
                    left.clone(),
                    middle.cons_right::<Nested>(Slot::Digit(L::pair(e0.clone(), e1.clone()))),
                    L::pair(e2.clone(), e3.clone()),
                ),
                _ => self.clone(),
            },
            _ => self.clone(),
        }
    }

    /// Refills a two-slot left buffer from the first digit of the middle.
    /// Any other node is returned unchanged.
    pub(super) fn prepare_tail_left<L: Level<E>>(&self) -> Self {
        self.refill_left::<L>().unwrap_or_else(|| self.clone())
    }

    pub(super) fn prepare_tail_right<L: Level<E>>(&self) -> Self {
        self.refill_right::<L>().unwrap_or_else(|| self.clone())
    }

    /// A two-slot digit is merged whole into the buffer; a larger one lends
    /// its first slot and stays behind, so every digit keeps at least two.
    fn refill_left<L: Level<E>>(&self) -> Option<Self> {
        let Shape::Deep {
            left,
            middle,
            right,
        } = self.shape()
        else {
            return None;
        };
        let Shape::Pair(..) = left.shape() else {
            return None;
        };
        let digit = middle.head_left()?.digit();
        let node = match digit.shape() {
            Shape::Pair(d0, d1) => L::deep(
                left.cons_cons_right::<L>(d0.clone(), d1.clone()),
                middle.tail_left::<Nested>()?,
                right.clone(),
            ),
            _ => L::deep(
                left.cons_right::<L>(digit.head_left()?.clone()),
                middle.replace_left::<Nested>(Slot::Digit(digit.tail_left::<L>()?))?,
                right.clone(),
            ),
        };
        Some(node)
    }

    fn refill_right<L: Level<E>>(&self) -> Option<Self> {
        let Shape::Deep {
            left,
            middle,
            right,
        } = self.shape()
        else {
            return None;
        };
        let Shape::Pair(..) = right.shape() else {
            return None;
        };
        let digit = middle.head_right()?.digit();
        let node = match digit.shape() {
            Shape::Pair(d0, d1) => L::deep(
                left.clone(),
                middle.tail_right::<Nested>()?,
                right.cons_cons_left::<L>(d0.clone(), d1.clone()),
            ),
            _ => L::deep(
                left.clone(),
                middle.replace_right::<Nested>(Slot::Digit(digit.tail_right::<L>()?))?,
                right.cons_left::<L>(digit.head_right()?.clone()),
            ),
        };
        Some(node)
    }
}
