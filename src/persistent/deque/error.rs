//! Error types for [`PersistentDeque`](super::PersistentDeque).

use thiserror::Error;

/// Errors raised by the fallible deque operations.
///
/// Both variants are deterministic functions of the deque and the arguments;
/// a failed operation leaves every existing deque untouched.
///
/// # Examples
///
/// ```rust
/// use persistent_deque::persistent::{DequeError, PersistentDeque};
///
/// let deque: PersistentDeque<i32> = PersistentDeque::new();
/// assert_eq!(
///     deque.head_left(),
///     Err(DequeError::Empty { operation: "head_left" })
/// );
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DequeError {
    /// An end was accessed, removed or replaced on an empty deque.
    #[error("{operation}: deque is empty")]
    Empty {
        /// The name of the operation that failed.
        operation: &'static str,
    },

    /// An index was not in `0..len`.
    #[error("index {index} out of range for deque of length {len}")]
    IndexOutOfBounds {
        /// The requested index.
        index: usize,
        /// The length of the deque at the time of the request.
        len: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_empty_display() {
        let error = DequeError::Empty {
            operation: "tail_left",
        };
        assert_eq!(format!("{error}"), "tail_left: deque is empty");
    }

    #[rstest]
    fn test_index_out_of_bounds_display() {
        let error = DequeError::IndexOutOfBounds { index: 7, len: 3 };
        assert_eq!(
            format!("{error}"),
            "index 7 out of range for deque of length 3"
        );
    }
}
