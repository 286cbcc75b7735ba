//! Persistent (immutable) double-ended queue (Deque).
//!
//! This module provides a persistent deque built from arity-tagged buffers and
//! deep nodes whose middle is itself a deque of buffers, in the spirit of
//! Hinze & Paterson's finger trees and Kaplan & Tarjan's catenable deques.
//!
//! # Overview
//!
//! `PersistentDeque` provides:
//!
//! - O(1) `len` and `is_empty`
//! - O(1) `head_left` and `head_right`
//! - Amortized O(1) `cons_left`, `cons_right`, `tail_left` and `tail_right`
//! - O(1) `replace_left` and `replace_right`
//! - O(log n) `get` by index
//! - O(log(min(n, m))) concatenation
//!
//! All operations return new deques without modifying the original, and
//! unchanged subtrees are shared between the input and the output.
//!
//! # Structure
//!
//! A deque is one of:
//! - a buffer of zero to four elements, or
//! - a deep node with a left buffer and a right buffer of two to four elements
//!   each, and a middle deque whose elements are buffers of two or three
//!   elements.
//!
//! Each nesting level at least halves the number of slots, so the depth is
//! logarithmic. Before a buffer reaches a state where the next push or pop
//! would have to reach into the middle, the middle is rebalanced ahead of
//! time; this keeps the amortized cost of every end operation constant.
//!
//! # Implementation Note
//!
//! The middle of a deep node holds buffers one level down. Rather than a
//! recursive type parameter, slots are type-erased: a slot is either a client
//! element or a buffer of the level above it. A level factory measures slots
//! and builds nodes with cached sizes, and only two instantiations of every
//! algorithm exist (the outer level and all nested levels).
//!
//! # Examples
//!
//! ```rust
//! use persistent_deque::persistent::PersistentDeque;
//!
//! let deque = PersistentDeque::new()
//!     .cons_right(1)
//!     .cons_right(2)
//!     .cons_right(3);
//!
//! assert_eq!(deque.head_left(), Ok(&1));
//! assert_eq!(deque.head_right(), Ok(&3));
//! assert_eq!(deque.len(), 3);
//!
//! // Structural sharing: the original deque is preserved
//! let extended = deque.cons_right(4);
//! assert_eq!(deque.len(), 3);     // Original unchanged
//! assert_eq!(extended.len(), 4);  // New deque
//! ```
//!
//! # References
//!
//! - Okasaki, "Purely Functional Data Structures" (1998)
//! - Kaplan & Tarjan, "Purely Functional, Real-Time Deques with Catenation" (1999)
//! - Hinze & Paterson, "Finger Trees: A Simple General-purpose Data Structure" (2006)

mod concat;
mod deep;
mod error;
mod level;
mod node;

use std::fmt;
use std::hash::{Hash, Hasher};

pub use error::DequeError;

use level::{Level, Outer};
use node::{Node, Slot};

use super::ReferenceCounter;

/// A persistent (immutable) double-ended queue.
///
/// `PersistentDeque` supports amortized O(1) operations at both ends,
/// O(log n) indexed access and O(log n) concatenation. Cloning is O(1).
///
/// # Time Complexity
///
/// | Operation                        | Complexity          |
/// |----------------------------------|---------------------|
/// | `new`, `singleton`               | O(1)                |
/// | `len`, `is_empty`                | O(1)                |
/// | `head_left`, `head_right`        | O(1)                |
/// | `cons_left`, `cons_right`        | O(1) amortized      |
/// | `cons_cons_left/right`           | O(1) amortized      |
/// | `tail_left`, `tail_right`        | O(1) amortized      |
/// | `replace_left`, `replace_right`  | O(1)                |
/// | `get`, `get_with`                | O(log n)            |
/// | `concat`                         | O(log min(n, m))    |
///
/// # Examples
///
/// ```rust
/// use persistent_deque::persistent::PersistentDeque;
///
/// let deque: PersistentDeque<i32> = (1..=5).collect();
/// assert_eq!(deque.get(2), Ok(&3));
///
/// let rest = deque.tail_left().unwrap();
/// assert_eq!(rest.head_left(), Ok(&2));
/// assert_eq!(deque.head_left(), Ok(&1));
/// ```
pub struct PersistentDeque<T> {
    root: Node<T>,
}

impl<T> Clone for PersistentDeque<T> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
        }
    }
}

impl<T> PersistentDeque<T> {
    const fn from_root(root: Node<T>) -> Self {
        Self { root }
    }

    fn item(element: T) -> Slot<T> {
        Slot::Item(ReferenceCounter::new(element))
    }

    /// Creates a new empty deque.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_deque::persistent::PersistentDeque;
    ///
    /// let deque: PersistentDeque<i32> = PersistentDeque::new();
    /// assert!(deque.is_empty());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::from_root(Outer::empty())
    }

    /// Creates a deque containing a single element.
    #[must_use]
    pub fn singleton(element: T) -> Self {
        Self::from_root(Outer::single(Self::item(element)))
    }

    /// Returns the number of elements in the deque.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.root.size()
    }

    /// Returns `true` if the deque contains no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Returns the leftmost element.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::Empty`] if the deque is empty.
    pub fn head_left(&self) -> Result<&T, DequeError> {
        self.root
            .head_left()
            .map(Slot::item)
            .ok_or(DequeError::Empty {
                operation: "head_left",
            })
    }

    /// Returns the rightmost element.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::Empty`] if the deque is empty.
    pub fn head_right(&self) -> Result<&T, DequeError> {
        self.root
            .head_right()
            .map(Slot::item)
            .ok_or(DequeError::Empty {
                operation: "head_right",
            })
    }

    /// Returns a new deque with `element` added at the left end.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_deque::persistent::PersistentDeque;
    ///
    /// let deque = PersistentDeque::singleton(2).cons_left(1);
    /// assert_eq!(deque.head_left(), Ok(&1));
    /// ```
    #[must_use]
    pub fn cons_left(&self, element: T) -> Self {
        Self::from_root(self.root.cons_left::<Outer>(Self::item(element)))
    }

    /// Returns a new deque with `element` added at the right end.
    #[must_use]
    pub fn cons_right(&self, element: T) -> Self {
        Self::from_root(self.root.cons_right::<Outer>(Self::item(element)))
    }

    /// Adds two elements at the left end in one step.
    ///
    /// The result equals `self.cons_left(inner).cons_left(outer)`: `outer`
    /// becomes the leftmost element and `inner` the second.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_deque::persistent::PersistentDeque;
    ///
    /// let deque = PersistentDeque::singleton(3).cons_cons_left(1, 2);
    /// assert_eq!(deque, PersistentDeque::singleton(3).cons_left(2).cons_left(1));
    /// assert_eq!(deque.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    /// ```
    #[must_use]
    pub fn cons_cons_left(&self, outer: T, inner: T) -> Self {
        Self::from_root(
            self.root
                .cons_cons_left::<Outer>(Self::item(outer), Self::item(inner)),
        )
    }

    /// Adds two elements at the right end in one step.
    ///
    /// The result equals `self.cons_right(inner).cons_right(outer)`: `outer`
    /// becomes the rightmost element and `inner` the second to last.
    #[must_use]
    pub fn cons_cons_right(&self, inner: T, outer: T) -> Self {
        Self::from_root(
            self.root
                .cons_cons_right::<Outer>(Self::item(inner), Self::item(outer)),
        )
    }

    /// Returns the deque without its leftmost element.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::Empty`] if the deque is empty.
    pub fn tail_left(&self) -> Result<Self, DequeError> {
        self.root
            .tail_left::<Outer>()
            .map(Self::from_root)
            .ok_or(DequeError::Empty {
                operation: "tail_left",
            })
    }

    /// Returns the deque without its rightmost element.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::Empty`] if the deque is empty.
    pub fn tail_right(&self) -> Result<Self, DequeError> {
        self.root
            .tail_right::<Outer>()
            .map(Self::from_root)
            .ok_or(DequeError::Empty {
                operation: "tail_right",
            })
    }

    /// Returns a deque with the leftmost element replaced by `element`.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::Empty`] if the deque is empty.
    pub fn replace_left(&self, element: T) -> Result<Self, DequeError> {
        self.root
            .replace_left::<Outer>(Self::item(element))
            .map(Self::from_root)
            .ok_or(DequeError::Empty {
                operation: "replace_left",
            })
    }

    /// Returns a deque with the rightmost element replaced by `element`.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::Empty`] if the deque is empty.
    pub fn replace_right(&self, element: T) -> Result<Self, DequeError> {
        self.root
            .replace_right::<Outer>(Self::item(element))
            .map(Self::from_root)
            .ok_or(DequeError::Empty {
                operation: "replace_right",
            })
    }

    /// Returns the element at `index`, counting from the left.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::IndexOutOfBounds`] if `index >= len()`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_deque::persistent::{DequeError, PersistentDeque};
    ///
    /// let deque: PersistentDeque<i32> = (0..10).collect();
    /// assert_eq!(deque.get(7), Ok(&7));
    /// assert_eq!(
    ///     deque.get(10),
    ///     Err(DequeError::IndexOutOfBounds { index: 10, len: 10 })
    /// );
    /// ```
    pub fn get(&self, index: usize) -> Result<&T, DequeError> {
        let len = self.len();
        self.get_with(index, |element, residual| {
            if residual == 0 {
                Ok(element)
            } else {
                Err(DequeError::IndexOutOfBounds { index, len })
            }
        })?
    }

    /// Locates the element owning `index` and passes it to `continuation`
    /// together with the index remaining after descending to it.
    ///
    /// The descent threads `continuation` through every nesting level, so the
    /// caller sees only the final element. For an in-range index the residual
    /// is always zero.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::IndexOutOfBounds`] if `index >= len()`; the
    /// continuation is not called in that case.
    pub fn get_with<'a, R, F>(&'a self, index: usize, mut continuation: F) -> Result<R, DequeError>
    where
        F: FnMut(&'a T, usize) -> R,
    {
        let len = self.len();
        if index >= len {
            return Err(DequeError::IndexOutOfBounds { index, len });
        }
        self.root
            .get_with::<Outer, R>(index, &mut |slot, residual| {
                Ok(continuation(slot.item(), residual))
            })
            .map_err(|_| DequeError::IndexOutOfBounds { index, len })
    }

    /// Concatenates this deque with another deque.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_deque::persistent::PersistentDeque;
    ///
    /// let left: PersistentDeque<i32> = (0..100).collect();
    /// let right: PersistentDeque<i32> = (100..200).collect();
    /// let joined = left.concat(&right);
    /// assert_eq!(joined.len(), 200);
    /// assert_eq!(joined.get(150), Ok(&150));
    /// ```
    #[must_use]
    pub fn concat(&self, other: &Self) -> Self {
        Self::from_root(Node::concatenate::<Outer>(&self.root, &other.root))
    }

    /// Places this deque in front of `target`; equivalent to
    /// `self.concat(target)`.
    #[must_use]
    pub fn append_left_to(&self, target: &Self) -> Self {
        Self::from_root(self.root.append_left_to::<Outer>(&target.root))
    }

    /// Places this deque behind `target`; equivalent to
    /// `target.concat(self)`.
    #[must_use]
    pub fn append_right_to(&self, target: &Self) -> Self {
        Self::from_root(self.root.append_right_to::<Outer>(&target.root))
    }

    /// Returns a reference to the first element, or `None` if empty.
    #[must_use]
    pub fn front(&self) -> Option<&T> {
        self.head_left().ok()
    }

    /// Returns a reference to the last element, or `None` if empty.
    #[must_use]
    pub fn back(&self) -> Option<&T> {
        self.head_right().ok()
    }

    /// Prepends an element; alias of [`cons_left`](Self::cons_left).
    #[must_use]
    pub fn push_front(&self, element: T) -> Self {
        self.cons_left(element)
    }

    /// Appends an element; alias of [`cons_right`](Self::cons_right).
    #[must_use]
    pub fn push_back(&self, element: T) -> Self {
        self.cons_right(element)
    }

    /// Removes and returns the first element.
    #[must_use]
    pub fn pop_front(&self) -> Option<(Self, T)>
    where
        T: Clone,
    {
        let element = self.front()?.clone();
        let rest = self.tail_left().ok()?;
        Some((rest, element))
    }

    /// Removes and returns the last element.
    #[must_use]
    pub fn pop_back(&self) -> Option<(Self, T)>
    where
        T: Clone,
    {
        let element = self.back()?.clone();
        let rest = self.tail_right().ok()?;
        Some((rest, element))
    }

    /// Creates an iterator over references to the elements.
    #[must_use]
    pub fn iter(&self) -> PersistentDequeIterator<'_, T> {
        PersistentDequeIterator {
            deque: self,
            front_index: 0,
            back_index: self.len(),
        }
    }

    /// Calls `visit` on every element from left to right in a single pass.
    pub fn for_each<'a, F>(&'a self, mut visit: F)
    where
        F: FnMut(&'a T),
    {
        self.root.for_each_slot(&mut |slot| visit(slot.item()));
    }

    /// Returns a new deque with elements in reverse order.
    #[must_use]
    pub fn reverse(&self) -> Self
    where
        T: Clone,
    {
        let mut reversed = Self::new();
        self.for_each(|element| reversed = reversed.cons_left(element.clone()));
        reversed
    }

    /// Creates a deque from a slice.
    #[must_use]
    pub fn from_slice(slice: &[T]) -> Self
    where
        T: Clone,
    {
        slice.iter().cloned().collect()
    }
}

impl<T> Default for PersistentDeque<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PartialEq> PartialEq for PersistentDeque<T> {
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<T: Eq> Eq for PersistentDeque<T> {}

impl<T: fmt::Debug> fmt::Debug for PersistentDeque<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        self.for_each(|element| {
            list.entry(element);
        });
        list.finish()
    }
}

impl<T: Hash> Hash for PersistentDeque<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        self.for_each(|element| element.hash(state));
    }
}

impl<T> FromIterator<T> for PersistentDeque<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut deque = Self::new();
        deque.extend(iter);
        deque
    }
}

impl<T> Extend<T> for PersistentDeque<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let mut iter = iter.into_iter();
        while let Some(inner) = iter.next() {
            *self = match iter.next() {
                Some(outer) => self.cons_cons_right(inner, outer),
                None => self.cons_right(inner),
            };
        }
    }
}

impl<T: Clone> IntoIterator for PersistentDeque<T> {
    type Item = T;
    type IntoIter = PersistentDequeIntoIterator<T>;

    fn into_iter(self) -> Self::IntoIter {
        PersistentDequeIntoIterator { deque: self }
    }
}

impl<'a, T> IntoIterator for &'a PersistentDeque<T> {
    type Item = &'a T;
    type IntoIter = PersistentDequeIterator<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Borrowing iterator over a [`PersistentDeque`], walking by index.
pub struct PersistentDequeIterator<'a, T> {
    deque: &'a PersistentDeque<T>,
    front_index: usize,
    back_index: usize,
}

impl<'a, T> Iterator for PersistentDequeIterator<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front_index >= self.back_index {
            return None;
        }

        let result = self.deque.get(self.front_index).ok();
        self.front_index += 1;
        result
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back_index - self.front_index;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for PersistentDequeIterator<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front_index >= self.back_index {
            return None;
        }

        self.back_index -= 1;
        self.deque.get(self.back_index).ok()
    }
}

impl<T> ExactSizeIterator for PersistentDequeIterator<'_, T> {}

/// Owning iterator over a [`PersistentDeque`].
pub struct PersistentDequeIntoIterator<T> {
    deque: PersistentDeque<T>,
}

impl<T: Clone> Iterator for PersistentDequeIntoIterator<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let (new_deque, element) = self.deque.pop_front()?;
        self.deque = new_deque;
        Some(element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.deque.len(), Some(self.deque.len()))
    }
}

impl<T: Clone> DoubleEndedIterator for PersistentDequeIntoIterator<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let (new_deque, element) = self.deque.pop_back()?;
        self.deque = new_deque;
        Some(element)
    }
}

impl<T: Clone> ExactSizeIterator for PersistentDequeIntoIterator<T> {}

#[cfg(feature = "arc")]
static_assertions::assert_impl_all!(PersistentDeque<i32>: Send, Sync);

#[cfg(not(feature = "arc"))]
static_assertions::assert_not_impl_any!(PersistentDeque<i32>: Send, Sync);

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for PersistentDeque<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for element in self {
            seq.serialize_element(element)?;
        }
        seq.end()
    }
}

#[cfg(feature = "serde")]
struct PersistentDequeVisitor<T> {
    marker: std::marker::PhantomData<T>,
}

#[cfg(feature = "serde")]
impl<T> PersistentDequeVisitor<T> {
    const fn new() -> Self {
        Self {
            marker: std::marker::PhantomData,
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::de::Visitor<'de> for PersistentDequeVisitor<T>
where
    T: serde::Deserialize<'de>,
{
    type Value = PersistentDeque<T>;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        let mut deque = PersistentDeque::new();
        while let Some(element) = seq.next_element()? {
            deque = deque.cons_right(element);
        }
        Ok(deque)
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for PersistentDeque<T>
where
    T: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(PersistentDequeVisitor::new())
    }
}
