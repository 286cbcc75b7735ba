//! # persistent-deque
//!
//! A persistent (immutable) double-ended queue with efficient catenation.
//!
//! ## Overview
//!
//! [`PersistentDeque`](persistent::PersistentDeque) keeps every version of
//! itself alive: operations return new deques that share unchanged structure
//! with their inputs.
//!
//! - **End operations**: push, pop, peek and replace at either end in
//!   amortized constant time
//! - **Indexed access**: `get` in logarithmic time
//! - **Concatenation**: joining two deques in time logarithmic in the smaller
//!
//! ## Feature Flags
//!
//! - `arc`: Use `Arc` instead of `Rc` so deques are `Send + Sync`
//! - `serde`: `Serialize`/`Deserialize` as a sequence
//!
//! ## Example
//!
//! ```rust
//! use persistent_deque::prelude::*;
//!
//! let left: PersistentDeque<i32> = (0..3).collect();
//! let right = PersistentDeque::singleton(3).cons_right(4);
//! let joined = left.concat(&right);
//!
//! assert_eq!(joined.len(), 5);
//! assert_eq!(joined.get(3), Ok(&3));
//! assert_eq!(joined.tail_left().and_then(|rest| rest.head_left().copied()), Ok(1));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Note: Disabling redundant_closure_for_method_calls due to clippy 0.1.92 panic bug
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use persistent_deque::prelude::*;
/// ```
pub mod prelude {
    pub use crate::persistent::*;
}

pub mod persistent;
