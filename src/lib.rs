//! # scapegoat
//!
//! An ordered symbol table backed by a scapegoat tree.
//!
//! ## Overview
//!
//! [`ScapegoatTree`] maps unique, totally ordered keys to values and supports
//! lookup, insertion with overwrite, minimum/maximum queries and ordered
//! range iteration. It keeps its height within `alpha * log2(n)` by
//! occasionally rebuilding the smallest offending subtree into a perfectly
//! balanced one, instead of rotating on every insertion.
//!
//! Removal is not supported.
//!
//! ## Feature Flags
//!
//! - `tracing`: Emit `tracing` events when leaves are attached, when a
//!   scapegoat subtree is rebuilt, and when the consistency check fails
//!
//! ## Example
//!
//! ```rust
//! use scapegoat::prelude::*;
//!
//! let mut tree = ScapegoatTree::new();
//! for key in 1..=100 {
//!     tree.put(key, key.to_string());
//! }
//!
//! assert_eq!(tree.len(), 100);
//! assert_eq!(tree.get(&42).map(String::as_str), Some("42"));
//! assert!(tree.height() <= 2 * 7);
//! assert_eq!(tree.keys_in(&10, &14).count(), 5);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use scapegoat::prelude::*;
/// ```
pub mod prelude {
    pub use crate::balance::BalanceFactor;
    pub use crate::error::ScapegoatTreeError;
    pub use crate::tree::ScapegoatTree;
}

mod tracing_helpers;

pub mod balance;
pub mod error;
pub mod tree;

pub use balance::BalanceFactor;
pub use error::{IntegrityViolation, ScapegoatTreeError};
pub use tree::ScapegoatTree;
