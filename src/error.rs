//! Error types for the scapegoat tree.
//!
//! Two kinds of failure are reported to callers as values:
//!
//! - [`ScapegoatTreeError::InvalidArgument`]: an argument the tree cannot work
//!   with, such as a balance factor that is not greater than one.
//! - [`ScapegoatTreeError::NotFound`]: a query that needs at least one entry
//!   (`min`/`max`) was made on an empty tree.
//!
//! Lookup misses are not errors; `get` returns `None` instead.
//!
//! [`IntegrityViolation`] describes a broken structural invariant. It is only
//! produced by the internal consistency checker and always indicates a bug in
//! this crate.

use std::fmt;

/// Errors returned by [`ScapegoatTree`](crate::ScapegoatTree) operations.
///
/// # Examples
///
/// ```rust
/// use scapegoat::{ScapegoatTree, ScapegoatTreeError};
///
/// let tree: ScapegoatTree<i32, &str> = ScapegoatTree::new();
/// assert_eq!(tree.min(), Err(ScapegoatTreeError::NotFound { operation: "min" }));
/// assert_eq!(
///     format!("{}", tree.max().unwrap_err()),
///     "max: called on an empty tree"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScapegoatTreeError {
    /// An argument passed to `operation` was rejected.
    InvalidArgument {
        /// The operation that rejected its argument.
        operation: &'static str,
        /// Why the argument was rejected.
        reason: &'static str,
    },
    /// `operation` requires a non-empty tree.
    NotFound {
        /// The operation that found nothing to return.
        operation: &'static str,
    },
}

impl fmt::Display for ScapegoatTreeError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument { operation, reason } => {
                write!(formatter, "{operation}: invalid argument: {reason}")
            }
            Self::NotFound { operation } => {
                write!(formatter, "{operation}: called on an empty tree")
            }
        }
    }
}

impl std::error::Error for ScapegoatTreeError {}

/// A structural invariant that the consistency checker found broken.
///
/// The variants are listed in the order the checker evaluates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntegrityViolation {
    /// Keys are not in symmetric order.
    Order,
    /// A cached subtree size disagrees with its children.
    Size,
    /// A cached subtree height disagrees with its children.
    Height,
    /// A node is taller than the balance factor allows for its size.
    Balance,
}

impl fmt::Display for IntegrityViolation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Self::Order => "keys are not in symmetric order",
            Self::Size => "subtree sizes are not consistent",
            Self::Height => "subtree heights are not consistent",
            Self::Balance => "tree is not balanced",
        };
        formatter.write_str(message)
    }
}

impl std::error::Error for IntegrityViolation {}
