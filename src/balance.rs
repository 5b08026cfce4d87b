//! The balance condition that decides when a subtree must be rebuilt.
//!
//! A scapegoat tree tolerates local imbalance as long as every node `x`
//! satisfies
//!
//! ```text
//! height(x) <= alpha * log2(size(x))
//! ```
//!
//! where `alpha > 1` is the [`BalanceFactor`]. A larger factor allows deeper
//! trees between rebuilds and so trades lookup depth for fewer rebuilds.
//!
//! Factors are capped at [`BalanceFactor::MAX`]. The tree walks and frees its
//! nodes recursively, so the cap also bounds stack use: no tree can grow
//! deeper than `MAX * log2(usize::MAX)` levels.

use crate::error::ScapegoatTreeError;

/// Integer base-2 logarithm used by the balance condition.
///
/// Returns `0` for `n == 0`, and the bit length of `n - 1` otherwise, which is
/// `ceil(log2(n))`. A single node therefore gets a budget of zero, which its
/// height of zero always meets.
///
/// # Examples
///
/// ```rust
/// use scapegoat::balance::log2;
///
/// assert_eq!(log2(0), 0);
/// assert_eq!(log2(1), 0);
/// assert_eq!(log2(2), 1);
/// assert_eq!(log2(7), 3);
/// assert_eq!(log2(8), 3);
/// assert_eq!(log2(9), 4);
/// ```
#[inline]
#[must_use]
pub const fn log2(n: usize) -> u32 {
    if n == 0 {
        0
    } else {
        usize::BITS - (n - 1).leading_zeros()
    }
}

/// The tolerance constant `alpha` of the balance condition.
///
/// Always a finite number strictly greater than one and at most
/// [`MAX`](Self::MAX).
///
/// # Examples
///
/// ```rust
/// use scapegoat::BalanceFactor;
///
/// let factor = BalanceFactor::new(1.5).unwrap();
/// assert_eq!(factor.alpha(), 1.5);
/// assert!(BalanceFactor::new(1.0).is_err());
/// assert!(BalanceFactor::new(BalanceFactor::MAX.alpha() + 1.0).is_err());
/// assert_eq!(BalanceFactor::default().alpha(), 2.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BalanceFactor {
    alpha: f64,
}

impl BalanceFactor {
    /// `alpha = 2`, the factor used by [`ScapegoatTree::new`](crate::ScapegoatTree::new).
    pub const DEFAULT: Self = Self { alpha: 2.0 };

    /// `alpha = 8`, the loosest factor accepted.
    ///
    /// Trees built with it are at most 512 levels deep on 64-bit targets.
    pub const MAX: Self = Self { alpha: 8.0 };

    /// Creates a balance factor.
    ///
    /// # Errors
    ///
    /// Returns [`ScapegoatTreeError::InvalidArgument`] if `alpha` is not a
    /// finite number in `(1, 8]`. With `alpha <= 1` no tree of more than one
    /// node could ever satisfy the condition.
    pub fn new(alpha: f64) -> Result<Self, ScapegoatTreeError> {
        if !alpha.is_finite() {
            return Err(ScapegoatTreeError::InvalidArgument {
                operation: "BalanceFactor::new",
                reason: "balance factor must be a finite number",
            });
        }
        if alpha <= 1.0 {
            return Err(ScapegoatTreeError::InvalidArgument {
                operation: "BalanceFactor::new",
                reason: "balance factor must be greater than 1",
            });
        }
        if alpha > Self::MAX.alpha {
            return Err(ScapegoatTreeError::InvalidArgument {
                operation: "BalanceFactor::new",
                reason: "balance factor must be at most 8",
            });
        }
        Ok(Self { alpha })
    }

    /// Returns `alpha`.
    #[inline]
    #[must_use]
    pub const fn alpha(self) -> f64 {
        self.alpha
    }

    /// The largest height a subtree of `size` nodes may have.
    #[inline]
    #[must_use]
    pub fn height_budget(self, size: usize) -> f64 {
        self.alpha * f64::from(log2(size))
    }

    /// Returns `true` if a subtree with the given `height` and `size` meets
    /// the balance condition.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn admits(self, height: isize, size: usize) -> bool {
        height as f64 <= self.height_budget(size)
    }
}

impl Default for BalanceFactor {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}
