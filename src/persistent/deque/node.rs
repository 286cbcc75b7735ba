//! Node representation shared by every nesting level.
//!
//! A [`Node`] is an immutable, reference-counted value with a cached size and
//! one of six shapes. The four small shapes double as digits: inside a deep
//! node they are the outer buffers, and one level down they are the slots of
//! the middle. All operations here handle the buffer shapes directly and hand
//! deep nodes over to the algorithms in `deep.rs`.

use std::fmt;

use super::DequeError;
use super::level::{Level, Nested};
use crate::persistent::ReferenceCounter;

/// A type-erased element of a node.
///
/// At the outer level every slot is an `Item`; at every nested level every
/// slot is a `Digit` holding a buffer of the level above it.
pub(crate) enum Slot<E> {
    Item(ReferenceCounter<E>),
    Digit(Node<E>),
}

impl<E> Clone for Slot<E> {
    fn clone(&self) -> Self {
        match self {
            Self::Item(item) => Self::Item(item.clone()),
            Self::Digit(digit) => Self::Digit(digit.clone()),
        }
    }
}

impl<E> Slot<E> {
    pub(crate) fn item(&self) -> &E {
        match self {
            Self::Item(item) => item,
            Self::Digit(_) => unreachable!("digit slot found at the outer level"),
        }
    }

    pub(crate) fn digit(&self) -> &Node<E> {
        match self {
            Self::Digit(digit) => digit,
            Self::Item(_) => unreachable!("item slot found at a nested level"),
        }
    }
}

impl<E: fmt::Debug> fmt::Debug for Slot<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Item(item) => fmt::Debug::fmt(item, f),
            Self::Digit(digit) => fmt::Debug::fmt(digit, f),
        }
    }
}

/// The shape of a node.
pub(crate) enum Shape<E> {
    Empty,
    Single(Slot<E>),
    Pair(Slot<E>, Slot<E>),
    Triple(Slot<E>, Slot<E>, Slot<E>),
    Quad(Slot<E>, Slot<E>, Slot<E>, Slot<E>),
    Deep {
        left: Node<E>,
        middle: Node<E>,
        right: Node<E>,
    },
}

/// Ordered shape tag. Concatenation compares the kinds of its operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Kind {
    Empty,
    Single,
    Pair,
    Triple,
    Quad,
    Deep,
}

struct Inner<E> {
    size: usize,
    shape: Shape<E>,
}

/// An immutable node. Cloning shares the node.
pub(crate) struct Node<E> {
    inner: ReferenceCounter<Inner<E>>,
}

impl<E> Clone for Node<E> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<E> Node<E> {
    /// Wraps a shape. Only [`Level`] constructors call this, so `size` always
    /// matches the level the node is built for.
    pub(crate) fn from_shape(size: usize, shape: Shape<E>) -> Self {
        Self {
            inner: ReferenceCounter::new(Inner { size, shape }),
        }
    }

    #[inline]
    pub(crate) fn shape(&self) -> &Shape<E> {
        &self.inner.shape
    }

    #[inline]
    pub(crate) fn size(&self) -> usize {
        self.inner.size
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        matches!(self.shape(), Shape::Empty)
    }

    pub(crate) fn kind(&self) -> Kind {
        match self.shape() {
            Shape::Empty => Kind::Empty,
            Shape::Single(_) => Kind::Single,
            Shape::Pair(..) => Kind::Pair,
            Shape::Triple(..) => Kind::Triple,
            Shape::Quad(..) => Kind::Quad,
            Shape::Deep { .. } => Kind::Deep,
        }
    }

    /// Whether this node may serve as a buffer of a deep node or as a digit.
    pub(crate) fn is_digit(&self) -> bool {
        matches!(self.kind(), Kind::Pair | Kind::Triple | Kind::Quad)
    }

    #[cfg(test)]
    pub(crate) fn ptr_eq(&self, other: &Self) -> bool {
        ReferenceCounter::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn head_left(&self) -> Option<&Slot<E>> {
        match self.shape() {
            Shape::Empty => None,
            Shape::Single(e0)
            | Shape::Pair(e0, _)
            | Shape::Triple(e0, _, _)
            | Shape::Quad(e0, _, _, _) => Some(e0),
            Shape::Deep { left, .. } => left.head_left(),
        }
    }

    pub(crate) fn head_right(&self) -> Option<&Slot<E>> {
        match self.shape() {
            Shape::Empty => None,
            Shape::Single(e0) => Some(e0),
            Shape::Pair(_, e1) => Some(e1),
            Shape::Triple(_, _, e2) => Some(e2),
            Shape::Quad(_, _, _, e3) => Some(e3),
            Shape::Deep { right, .. } => right.head_right(),
        }
    }

    /// Pushes a slot onto the left end. A full quadruple overflows into a
    /// deep node with an empty middle.
    pub(crate) fn cons_left<L: Level<E>>(&self, e: Slot<E>) -> Self {
        match self.shape() {
            Shape::Empty => L::single(e),
            Shape::Single(e0) => L::pair(e, e0.clone()),
            Shape::Pair(e0, e1) => L::triple(e, e0.clone(), e1.clone()),
            Shape::Triple(e0, e1, e2) => L::quadruple(e, e0.clone(), e1.clone(), e2.clone()),
            Shape::Quad(e0, e1, e2, e3) => L::deep_from_buffers(
                L::pair(e, e0.clone()),
                L::triple(e1.clone(), e2.clone(), e3.clone()),
            ),
            Shape::Deep {
                left,
                middle,
                right,
            } => Self::deep_cons_left::<L>(left, middle, right, e),
        }
    }

    pub(crate) fn cons_right<L: Level<E>>(&self, e: Slot<E>) -> Self {
        match self.shape() {
            Shape::Empty => L::single(e),
            Shape::Single(e0) => L::pair(e0.clone(), e),
            Shape::Pair(e0, e1) => L::triple(e0.clone(), e1.clone(), e),
            Shape::Triple(e0, e1, e2) => L::quadruple(e0.clone(), e1.clone(), e2.clone(), e),
            Shape::Quad(e0, e1, e2, e3) => L::deep_from_buffers(
                L::triple(e0.clone(), e1.clone(), e2.clone()),
                L::pair(e3.clone(), e),
            ),
            Shape::Deep {
                left,
                middle,
                right,
            } => Self::deep_cons_right::<L>(left, middle, right, e),
        }
    }

    /// Same result as `cons_left(inner)` followed by `cons_left(outer)`.
    pub(crate) fn cons_cons_left<L: Level<E>>(&self, outer: Slot<E>, inner: Slot<E>) -> Self {
        match self.shape() {
            Shape::Empty => L::pair(outer, inner),
            Shape::Single(e0) => L::triple(outer, inner, e0.clone()),
            Shape::Pair(e0, e1) => L::quadruple(outer, inner, e0.clone(), e1.clone()),
            Shape::Triple(..) | Shape::Quad(..) => {
                L::deep_from_buffers(L::pair(outer, inner), self.clone())
            }
            Shape::Deep {
                left,
                middle,
                right,
            } => Self::deep_cons_cons_left::<L>(left, middle, right, outer, inner),
        }
    }

    /// Same result as `cons_right(inner)` followed by `cons_right(outer)`.
    pub(crate) fn cons_cons_right<L: Level<E>>(&self, inner: Slot<E>, outer: Slot<E>) -> Self {
        match self.shape() {
            Shape::Empty => L::pair(inner, outer),
            Shape::Single(e0) => L::triple(e0.clone(), inner, outer),
            Shape::Pair(e0, e1) => L::quadruple(e0.clone(), e1.clone(), inner, outer),
            Shape::Triple(..) | Shape::Quad(..) => {
                L::deep_from_buffers(self.clone(), L::pair(inner, outer))
            }
            Shape::Deep {
                left,
                middle,
                right,
            } => Self::deep_cons_cons_right::<L>(left, middle, right, inner, outer),
        }
    }

    /// Removes the leftmost slot, or returns `None` when empty.
    pub(crate) fn tail_left<L: Level<E>>(&self) -> Option<Self> {
        match self.shape() {
            Shape::Empty => None,
            Shape::Single(_) => Some(L::empty()),
            Shape::Pair(_, e1) => Some(L::single(e1.clone())),
            Shape::Triple(_, e1, e2) => Some(L::pair(e1.clone(), e2.clone())),
            Shape::Quad(_, e1, e2, e3) => Some(L::triple(e1.clone(), e2.clone(), e3.clone())),
            Shape::Deep {
                left,
                middle,
                right,
            } => Self::deep_tail_left::<L>(left, middle, right),
        }
    }

    pub(crate) fn tail_right<L: Level<E>>(&self) -> Option<Self> {
        match self.shape() {
            Shape::Empty => None,
            Shape::Single(_) => Some(L::empty()),
            Shape::Pair(e0, _) => Some(L::single(e0.clone())),
            Shape::Triple(e0, e1, _) => Some(L::pair(e0.clone(), e1.clone())),
            Shape::Quad(e0, e1, e2, _) => Some(L::triple(e0.clone(), e1.clone(), e2.clone())),
            Shape::Deep {
                left,
                middle,
                right,
            } => Self::deep_tail_right::<L>(left, middle, right),
        }
    }

    /// Replaces the leftmost slot, keeping the shape.
    pub(crate) fn replace_left<L: Level<E>>(&self, e: Slot<E>) -> Option<Self> {
        match self.shape() {
            Shape::Empty => None,
            Shape::Single(_) => Some(L::single(e)),
            Shape::Pair(_, e1) => Some(L::pair(e, e1.clone())),
            Shape::Triple(_, e1, e2) => Some(L::triple(e, e1.clone(), e2.clone())),
            Shape::Quad(_, e1, e2, e3) => {
                Some(L::quadruple(e, e1.clone(), e2.clone(), e3.clone()))
            }
            Shape::Deep {
                left,
                middle,
                right,
            } => Some(L::deep(
                left.replace_left::<L>(e)?,
                middle.clone(),
                right.clone(),
            )),
        }
    }

    pub(crate) fn replace_right<L: Level<E>>(&self, e: Slot<E>) -> Option<Self> {
        match self.shape() {
            Shape::Empty => None,
            Shape::Single(_) => Some(L::single(e)),
            Shape::Pair(e0, _) => Some(L::pair(e0.clone(), e)),
            Shape::Triple(e0, e1, _) => Some(L::triple(e0.clone(), e1.clone(), e)),
            Shape::Quad(e0, e1, e2, _) => {
                Some(L::quadruple(e0.clone(), e1.clone(), e2.clone(), e))
            }
            Shape::Deep {
                left,
                middle,
                right,
            } => Some(L::deep(
                left.clone(),
                middle.clone(),
                right.replace_right::<L>(e)?,
            )),
        }
    }

    /// Locates the slot owning `index` and hands it to `continuation` with the
    /// index relative to that slot.
    ///
    /// Deep nodes descend into their middle at [`Nested`] and then into the
    /// owning digit at `L`, threading the same continuation through every
    /// level. An index past the end reaches the continuation with a residual
    /// that does not fit the slot, and the outermost continuation rejects it.
    pub(crate) fn get_with<'a, L: Level<E>, R>(
        &'a self,
        index: usize,
        continuation: &mut dyn FnMut(&'a Slot<E>, usize) -> Result<R, DequeError>,
    ) -> Result<R, DequeError> {
        match self.shape() {
            Shape::Empty => Err(DequeError::IndexOutOfBounds { index, len: 0 }),
            Shape::Single(e0) => continuation(e0, index),
            Shape::Pair(e0, e1) => {
                let m0 = L::size_of(e0);
                if index < m0 {
                    continuation(e0, index)
                } else {
                    continuation(e1, index - m0)
                }
            }
            Shape::Triple(e0, e1, e2) => {
                let m0 = L::size_of(e0);
                if index < m0 {
                    return continuation(e0, index);
                }
                let m1 = m0 + L::size_of(e1);
                if index < m1 {
                    continuation(e1, index - m0)
                } else {
                    continuation(e2, index - m1)
                }
            }
            Shape::Quad(e0, e1, e2, e3) => {
                let m0 = L::size_of(e0);
                let m1 = m0 + L::size_of(e1);
                if index < m1 {
                    if index < m0 {
                        continuation(e0, index)
                    } else {
                        continuation(e1, index - m0)
                    }
                } else {
                    let m2 = m1 + L::size_of(e2);
                    if index < m2 {
                        continuation(e2, index - m1)
                    } else {
                        continuation(e3, index - m2)
                    }
                }
            }
            Shape::Deep {
                left,
                middle,
                right,
            } => {
                let m0 = left.size();
                if index < m0 {
                    return left.get_with::<L, R>(index, continuation);
                }
                let m1 = m0 + middle.size();
                if index < m1 {
                    middle.get_with::<Nested, R>(index - m0, &mut |digit, residual| {
                        digit.digit().get_with::<L, R>(residual, &mut *continuation)
                    })
                } else {
                    right.get_with::<L, R>(index - m1, continuation)
                }
            }
        }
    }

    /// Visits every slot from left to right.
    pub(crate) fn for_each_slot<'a>(&'a self, visit: &mut dyn FnMut(&'a Slot<E>)) {
        match self.shape() {
            Shape::Empty => {}
            Shape::Single(e0) => visit(e0),
            Shape::Pair(e0, e1) => {
                visit(e0);
                visit(e1);
            }
            Shape::Triple(e0, e1, e2) => {
                visit(e0);
                visit(e1);
                visit(e2);
            }
            Shape::Quad(e0, e1, e2, e3) => {
                visit(e0);
                visit(e1);
                visit(e2);
                visit(e3);
            }
            Shape::Deep {
                left,
                middle,
                right,
            } => {
                left.for_each_slot(visit);
                middle.for_each_slot(&mut |digit| digit.digit().for_each_slot(&mut *visit));
                right.for_each_slot(visit);
            }
        }
    }
}

impl<E: fmt::Debug> fmt::Debug for Node<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.shape() {
            Shape::Empty => f.write_str("Empty"),
            Shape::Single(e0) => f.debug_tuple("Single").field(e0).finish(),
            Shape::Pair(e0, e1) => f.debug_tuple("Pair").field(e0).field(e1).finish(),
            Shape::Triple(e0, e1, e2) => f
                .debug_tuple("Triple")
                .field(e0)
                .field(e1)
                .field(e2)
                .finish(),
            Shape::Quad(e0, e1, e2, e3) => f
                .debug_tuple("Quad")
                .field(e0)
                .field(e1)
                .field(e2)
                .field(e3)
                .finish(),
            Shape::Deep {
                left,
                middle,
                right,
            } => f
                .debug_struct("Deep")
                .field("size", &self.size())
                .field("left", left)
                .field("middle", middle)
                .field("right", right)
                .finish(),
        }
    }
}
