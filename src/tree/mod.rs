//! Ordered symbol table based on a scapegoat tree.
//!
//! This module provides [`ScapegoatTree`], a mutable ordered map that keeps
//! its height logarithmic without rotations or per-node balance data.
//!
//! # Overview
//!
//! Every node caches the size and height of its subtree. After an insertion
//! the path back to the root is refreshed, and each ancestor is tested
//! against the balance condition
//!
//! ```text
//! height(x) <= alpha * log2(size(x))
//! ```
//!
//! The ancestor nearest to the new leaf that fails the test (the
//! *scapegoat*) has its whole subtree rebuilt into a perfectly balanced one.
//! Ancestors above it only get their cached statistics refreshed.
//!
//! - O(log N) get
//! - O(log N) amortized insert, O(N) for a single insert that rebuilds
//! - O(log N) min/max
//! - O(log N + k) range queries where k is the number of results
//! - O(1) len, `is_empty` and height
//!
//! Removal is not supported.
//!
//! # Examples
//!
//! ```rust
//! use scapegoat::ScapegoatTree;
//!
//! let mut tree = ScapegoatTree::new();
//! for key in [5, 3, 8, 1, 4, 7, 9] {
//!     tree.put(key, key * 10);
//! }
//!
//! assert_eq!(tree.get(&4), Some(&40));
//! assert_eq!(tree.min(), Ok(&1));
//!
//! let keys: Vec<&i32> = tree.keys_in(&3, &8).collect();
//! assert_eq!(keys, vec![&3, &4, &5, &7, &8]);
//! ```
//!
//! # Internal Structure
//!
//! The tree maintains the following invariants:
//! 1. Keys are in symmetric order
//! 2. Every cached size is one plus the sizes of the children
//! 3. Every cached height is one plus the larger child height (empty is -1)
//! 4. Every node satisfies the balance condition

mod check;
mod iter;
mod node;
mod rebuild;

pub use iter::{IntoIter, Iter, Keys, KeysIn, Range, Values};

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem;
use std::ops::Index;

use crate::balance::BalanceFactor;
use crate::error::{IntegrityViolation, ScapegoatTreeError};
use crate::tracing_helpers::{debug_log, error_log, trace_log};
use node::{Link, Node, find, find_mut, leftmost, rightmost};

static_assertions::assert_impl_all!(ScapegoatTree<i32, String>: Send, Sync, Clone);
static_assertions::assert_not_impl_any!(ScapegoatTree<std::rc::Rc<i32>, i32>: Send, Sync);

/// What an insertion did to the subtree it descended into.
enum Insertion<V> {
    /// The key was present; holds the value it replaced.
    Replaced(V),
    /// A new leaf was attached somewhere below.
    Added {
        /// A scapegoat below has already been rebuilt.
        rebuilt: bool,
    },
}

// =============================================================================
// ScapegoatTree Definition
// =============================================================================

/// An ordered map based on a scapegoat tree.
///
/// Keys must implement `Ord`. Entries are kept in sorted key order, which
/// makes minimum/maximum queries and inclusive range iteration cheap.
///
/// # Time Complexity
///
/// | Operation      | Complexity            |
/// |----------------|-----------------------|
/// | `new`          | O(1)                  |
/// | `get`          | O(log N)              |
/// | `put`          | O(log N) amortized    |
/// | `contains`     | O(log N)              |
/// | `min`/`max`    | O(log N)              |
/// | `keys_in`      | O(log N + k)          |
/// | `len`          | O(1)                  |
/// | `height`       | O(1)                  |
///
/// # Examples
///
/// ```rust
/// use scapegoat::ScapegoatTree;
///
/// let mut tree = ScapegoatTree::new();
/// tree.put("b", 2);
/// tree.put("a", 1);
/// assert_eq!(tree.put("b", 20), Some(2));
///
/// let entries: Vec<(&&str, &i32)> = tree.iter().collect();
/// assert_eq!(entries, vec![(&"a", &1), (&"b", &20)]);
/// ```
#[derive(Clone)]
pub struct ScapegoatTree<K, V> {
    /// Root node of the tree
    root: Link<K, V>,
    /// Tolerance of the balance condition
    factor: BalanceFactor,
    /// Number of scapegoat rebuilds so far
    rebuilds: usize,
}

impl<K, V> ScapegoatTree<K, V> {
    /// Creates an empty tree with the default balance factor (`alpha = 2`).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use scapegoat::ScapegoatTree;
    ///
    /// let tree: ScapegoatTree<i32, String> = ScapegoatTree::new();
    /// assert!(tree.is_empty());
    /// assert_eq!(tree.height(), -1);
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self::with_balance_factor(BalanceFactor::DEFAULT)
    }

    /// Creates an empty tree with the given balance factor.
    #[inline]
    #[must_use]
    pub const fn with_balance_factor(factor: BalanceFactor) -> Self {
        Self {
            root: None,
            factor,
            rebuilds: 0,
        }
    }

    /// Creates an empty tree whose balance condition uses `alpha`.
    ///
    /// # Errors
    ///
    /// Returns [`ScapegoatTreeError::InvalidArgument`] unless `alpha` is a
    /// finite number greater than one and at most
    /// [`BalanceFactor::MAX`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use scapegoat::ScapegoatTree;
    ///
    /// let tree: ScapegoatTree<i32, i32> = ScapegoatTree::with_alpha(1.5).unwrap();
    /// assert_eq!(tree.balance_factor().alpha(), 1.5);
    ///
    /// assert!(ScapegoatTree::<i32, i32>::with_alpha(0.9).is_err());
    /// ```
    pub fn with_alpha(alpha: f64) -> Result<Self, ScapegoatTreeError> {
        BalanceFactor::new(alpha).map(Self::with_balance_factor)
    }

    /// Returns the balance factor this tree was built with.
    #[inline]
    #[must_use]
    pub const fn balance_factor(&self) -> BalanceFactor {
        self.factor
    }

    /// Returns the number of entries in the tree.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        node::size(self.root.as_deref())
    }

    /// Returns the number of entries in the tree.
    ///
    /// Same as [`size`](Self::size).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use scapegoat::ScapegoatTree;
    ///
    /// let tree: ScapegoatTree<i32, &str> = [(1, "one"), (2, "two")].into_iter().collect();
    /// assert_eq!(tree.len(), 2);
    /// ```
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.size()
    }

    /// Returns `true` if the tree contains no entries.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the height of the tree: `-1` when empty, `0` for a single
    /// entry.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[inline]
    #[must_use]
    pub fn height(&self) -> isize {
        node::height(self.root.as_deref())
    }

    /// Returns how many scapegoat subtrees have been rebuilt since the tree
    /// was created.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use scapegoat::ScapegoatTree;
    ///
    /// let mut tree = ScapegoatTree::new();
    /// for key in 1..=7 {
    ///     tree.put(key, ());
    /// }
    /// assert_eq!(tree.rebuilds(), 0);
    /// assert_eq!(tree.height(), 6);
    ///
    /// tree.put(8, ());
    /// assert_eq!(tree.rebuilds(), 1);
    /// assert_eq!(tree.height(), 3);
    /// ```
    #[inline]
    #[must_use]
    pub const fn rebuilds(&self) -> usize {
        self.rebuilds
    }
}

impl<K: Ord, V> ScapegoatTree<K, V> {
    /// Returns a reference to the value stored under `key`.
    ///
    /// The key may be any borrowed form of the tree's key type, but the
    /// ordering on the borrowed form must match the ordering on the key type.
    /// A missing key is reported as `None`, never as an error.
    ///
    /// # Complexity
    ///
    /// O(log N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use scapegoat::ScapegoatTree;
    ///
    /// let mut tree = ScapegoatTree::new();
    /// tree.put("hello".to_string(), 42);
    ///
    /// assert_eq!(tree.get("hello"), Some(&42));
    /// assert_eq!(tree.get("world"), None);
    /// ```
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        find(self.root.as_deref(), key).map(|node| &node.value)
    }

    /// Returns a mutable reference to the value stored under `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use scapegoat::ScapegoatTree;
    ///
    /// let mut tree = ScapegoatTree::new();
    /// tree.put(1, 10);
    /// if let Some(value) = tree.get_mut(&1) {
    ///     *value += 1;
    /// }
    /// assert_eq!(tree.get(&1), Some(&11));
    /// ```
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        find_mut(self.root.as_deref_mut(), key).map(|node| &mut node.value)
    }

    /// Returns `true` if the tree holds a value for `key`.
    #[must_use]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Inserts a key-value pair.
    ///
    /// If the key is already present only its value is replaced, and the old
    /// value is returned; the shape of the tree does not change. Otherwise a
    /// new leaf is attached and, if some ancestor now violates the balance
    /// condition, the one nearest to the leaf is rebuilt.
    ///
    /// # Complexity
    ///
    /// O(log N) amortized
    ///
    /// # Panics
    ///
    /// With debug assertions enabled, panics if a node the insertion touched
    /// fails its consistency check. That always indicates a bug in this
    /// crate.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use scapegoat::ScapegoatTree;
    ///
    /// let mut tree = ScapegoatTree::new();
    /// assert_eq!(tree.put(1, "one"), None);
    /// assert_eq!(tree.put(1, "ONE"), Some("one"));
    /// assert_eq!(tree.get(&1), Some(&"ONE"));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        match Self::insert_into(&mut self.root, key, value, None, None, self.factor) {
            Insertion::Replaced(previous) => Some(previous),
            Insertion::Added { rebuilt } => {
                if rebuilt {
                    self.rebuilds += 1;
                }
                None
            }
        }
    }

    /// Recursive helper for put. `min` and `max` are the keys of the nearest
    /// ancestors the descent passed on its right and on its left.
    fn insert_into(
        slot: &mut Link<K, V>,
        key: K,
        value: V,
        min: Option<&K>,
        max: Option<&K>,
        factor: BalanceFactor,
    ) -> Insertion<V> {
        let Some(node) = slot.as_deref_mut() else {
            trace_log!("attaching new leaf");
            let leaf: &Node<K, V> = slot.insert(Box::new(Node::leaf(key, value)));
            assert_integrity(|| check::check_node(leaf, min, max, factor));
            return Insertion::Added { rebuilt: false };
        };

        let outcome = match key.cmp(&node.key) {
            Ordering::Less => {
                Self::insert_into(&mut node.left, key, value, min, Some(&node.key), factor)
            }
            Ordering::Greater => {
                Self::insert_into(&mut node.right, key, value, Some(&node.key), max, factor)
            }
            Ordering::Equal => return Insertion::Replaced(mem::replace(&mut node.value, value)),
        };

        let Insertion::Added { rebuilt } = outcome else {
            return outcome;
        };
        node.refresh();
        if rebuilt || factor.admits(node.height, node.size) {
            assert_integrity(|| check::check_node(&*node, min, max, factor));
            return outcome;
        }

        debug_log!(
            size = node.size,
            height = node.height,
            budget = factor.height_budget(node.size),
            "rebuilding scapegoat subtree"
        );
        *slot = rebuild::rebuild(slot.take());
        debug_log!(height = node::height(slot.as_deref()), "scapegoat subtree rebuilt");
        assert_integrity(|| check::check_within(slot.as_deref(), min, max, factor));
        Insertion::Added { rebuilt: true }
    }

    /// Returns the smallest key.
    ///
    /// # Errors
    ///
    /// Returns [`ScapegoatTreeError::NotFound`] if the tree is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use scapegoat::{ScapegoatTree, ScapegoatTreeError};
    ///
    /// let mut tree = ScapegoatTree::new();
    /// assert_eq!(tree.min(), Err(ScapegoatTreeError::NotFound { operation: "min" }));
    ///
    /// tree.put(3, ());
    /// tree.put(1, ());
    /// assert_eq!(tree.min(), Ok(&1));
    /// ```
    pub fn min(&self) -> Result<&K, ScapegoatTreeError> {
        self.min_entry()
            .map(|(key, _)| key)
            .ok_or(ScapegoatTreeError::NotFound { operation: "min" })
    }

    /// Returns the largest key.
    ///
    /// # Errors
    ///
    /// Returns [`ScapegoatTreeError::NotFound`] if the tree is empty.
    pub fn max(&self) -> Result<&K, ScapegoatTreeError> {
        self.max_entry()
            .map(|(key, _)| key)
            .ok_or(ScapegoatTreeError::NotFound { operation: "max" })
    }

    /// Returns the entry with the smallest key, or `None` if the tree is
    /// empty.
    #[must_use]
    pub fn min_entry(&self) -> Option<(&K, &V)> {
        self.root
            .as_deref()
            .map(leftmost)
            .map(|node| (&node.key, &node.value))
    }

    /// Returns the entry with the largest key, or `None` if the tree is
    /// empty.
    #[must_use]
    pub fn max_entry(&self) -> Option<(&K, &V)> {
        self.root
            .as_deref()
            .map(rightmost)
            .map(|node| (&node.key, &node.value))
    }

    /// Returns an iterator over entries in ascending key order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use scapegoat::ScapegoatTree;
    ///
    /// let tree: ScapegoatTree<i32, &str> =
    ///     [(3, "three"), (1, "one"), (2, "two")].into_iter().collect();
    ///
    /// for (key, value) in tree.iter() {
    ///     println!("{key}: {value}");
    /// }
    /// ```
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self.root.as_deref())
    }

    /// Returns an iterator over all keys in ascending order.
    ///
    /// Empty for an empty tree; otherwise the same sequence as
    /// `keys_in(min, max)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use scapegoat::ScapegoatTree;
    ///
    /// let tree: ScapegoatTree<i32, ()> = [(3, ()), (1, ()), (2, ())].into_iter().collect();
    /// let keys: Vec<&i32> = tree.keys().collect();
    /// assert_eq!(keys, vec![&1, &2, &3]);
    /// ```
    #[must_use]
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over all values in ascending key order.
    #[must_use]
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Returns an iterator over the keys `k` with `lower <= k <= upper`, in
    /// ascending order.
    ///
    /// Only subtrees that can hold keys inside the interval are visited. An
    /// inverted interval yields nothing.
    ///
    /// # Complexity
    ///
    /// O(log N + k) where k is the number of keys yielded
    ///
    /// # Examples
    ///
    /// ```rust
    /// use scapegoat::ScapegoatTree;
    ///
    /// let tree: ScapegoatTree<i32, ()> =
    ///     [5, 3, 8, 1, 4, 7, 9].into_iter().map(|key| (key, ())).collect();
    ///
    /// let keys: Vec<&i32> = tree.keys_in(&3, &8).collect();
    /// assert_eq!(keys, vec![&3, &4, &5, &7, &8]);
    /// assert_eq!(tree.keys_in(&8, &3).count(), 0);
    /// ```
    pub fn keys_in<'a, Q>(&'a self, lower: &'a Q, upper: &'a Q) -> KeysIn<'a, K, V, Q>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        KeysIn {
            inner: self.range(lower, upper),
        }
    }

    /// Returns an iterator over the entries whose keys `k` satisfy
    /// `lower <= k <= upper`, in ascending key order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use scapegoat::ScapegoatTree;
    ///
    /// let tree: ScapegoatTree<String, usize> = ["apple", "banana", "cherry", "date"]
    ///     .into_iter()
    ///     .map(|fruit| (fruit.to_string(), fruit.len()))
    ///     .collect();
    ///
    /// let entries: Vec<(&String, &usize)> = tree.range("b", "cz").collect();
    /// assert_eq!(entries.len(), 2); // banana, cherry
    /// ```
    pub fn range<'a, Q>(&'a self, lower: &'a Q, upper: &'a Q) -> Range<'a, K, V, Q>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        Range::new(self.root.as_deref(), lower, upper)
    }

    /// Runs the structural consistency checks over the whole tree.
    ///
    /// Verifies symmetric key order, cached sizes, cached heights and the
    /// balance condition, reporting the first violation found. A violation
    /// means this crate has a bug.
    ///
    /// # Errors
    ///
    /// Returns the first [`IntegrityViolation`] found.
    #[doc(hidden)]
    pub fn check_integrity(&self) -> Result<(), IntegrityViolation> {
        check::check(self.root.as_deref(), self.factor)
    }

}

/// Panics on a failed consistency check. The check only runs with debug
/// assertions enabled.
fn assert_integrity(checker: impl FnOnce() -> Result<(), IntegrityViolation>) {
    if cfg!(debug_assertions)
        && let Err(violation) = checker()
    {
        error_log!(%violation, "scapegoat tree integrity violated");
        panic!("scapegoat tree integrity violated: {violation}");
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, V> Default for ScapegoatTree<K, V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for ScapegoatTree<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord, V> Extend<(K, V)> for ScapegoatTree<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<K, V> IntoIterator for ScapegoatTree<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        let mut nodes = Vec::with_capacity(self.size());
        rebuild::flatten(self.root, &mut nodes);
        IntoIter {
            nodes: nodes.into_iter(),
        }
    }
}

impl<'a, K: Ord, V> IntoIterator for &'a ScapegoatTree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, Q, V> Index<&Q> for ScapegoatTree<K, V>
where
    K: Ord + Borrow<Q>,
    Q: Ord + ?Sized,
{
    type Output = V;

    /// Returns the value stored under `key`.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present.
    fn index(&self, key: &Q) -> &V {
        match self.get(key) {
            Some(value) => value,
            None => panic!("no entry found for key"),
        }
    }
}

/// Two trees are equal when they hold the same entries; their shapes and
/// balance factors may differ.
impl<K: Ord, V: PartialEq> PartialEq for ScapegoatTree<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.size() == other.size() && self.iter().eq(other.iter())
    }
}

impl<K: Ord, V: Eq> Eq for ScapegoatTree<K, V> {}

/// Hashes the length, then each entry in key order, so equal trees hash
/// equally whatever their insertion order.
impl<K, V> Hash for ScapegoatTree<K, V>
where
    K: Ord + Hash,
    V: Hash,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.size().hash(state);
        for (key, value) in self {
            key.hash(state);
            value.hash(state);
        }
    }
}

impl<K: Ord + fmt::Debug, V: fmt::Debug> fmt::Debug for ScapegoatTree<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Ord + fmt::Display, V: fmt::Display> fmt::Display for ScapegoatTree<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for (key, value) in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{key}: {value}")?;
        }
        write!(formatter, "}}")
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn preorder(tree: &ScapegoatTree<i32, i32>) -> Vec<i32> {
        fn visit(node: Option<&Node<i32, i32>>, keys: &mut Vec<i32>) {
            if let Some(node) = node {
                keys.push(node.key);
                visit(node.left.as_deref(), keys);
                visit(node.right.as_deref(), keys);
            }
        }
        let mut keys = Vec::new();
        visit(tree.root.as_deref(), &mut keys);
        keys
    }

    fn tree_of(keys: impl IntoIterator<Item = i32>) -> ScapegoatTree<i32, i32> {
        keys.into_iter().map(|key| (key, key * 10)).collect()
    }

    // =========================================================================
    // Display Tests
    // =========================================================================

    #[rstest]
    fn test_display_empty_tree() {
        let tree: ScapegoatTree<i32, String> = ScapegoatTree::new();
        assert_eq!(format!("{tree}"), "{}");
    }

    #[rstest]
    fn test_display_sorted() {
        let mut tree = ScapegoatTree::new();
        tree.put(3, "three");
        tree.put(1, "one");
        tree.put(2, "two");
        assert_eq!(format!("{tree}"), "{1: one, 2: two, 3: three}");
    }

    #[rstest]
    fn test_debug_map_form() {
        let tree = tree_of([2, 1]);
        assert_eq!(format!("{tree:?}"), "{1: 10, 2: 20}");
    }

    // =========================================================================
    // Shape Tests
    // =========================================================================

    #[rstest]
    fn test_ascending_chain_below_budget_is_not_rebuilt() {
        let tree = tree_of(1..=7);
        assert_eq!(tree.rebuilds(), 0);
        assert_eq!(tree.height(), 6);
        assert_eq!(preorder(&tree), vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[rstest]
    fn test_eighth_ascending_key_rebuilds_root_around_lower_median() {
        let tree = tree_of(1..=8);
        assert_eq!(tree.rebuilds(), 1);
        assert_eq!(tree.height(), 3);
        assert_eq!(preorder(&tree), vec![4, 2, 1, 3, 6, 5, 7, 8]);
    }

    #[rstest]
    fn test_scapegoat_is_nearest_violating_ancestor() {
        // a shallow right subtree keeps the root within budget while the
        // chain grown under its left child does not
        let mut tree = tree_of([100, 200, 150, 250, 125, 175, 225, 275]);
        assert_eq!(tree.height(), 3);
        for key in 1..=7 {
            tree.put(key, key);
        }
        assert_eq!(tree.rebuilds(), 0);
        assert_eq!(tree.height(), 7);

        tree.put(8, 8);
        assert_eq!(tree.rebuilds(), 1);
        assert_eq!(tree.height(), 4);
        let root = tree.root.as_deref().map(|node| node.key);
        let left = tree
            .root
            .as_deref()
            .and_then(|node| node.left.as_deref())
            .map(|node| node.key);
        assert_eq!(root, Some(100));
        assert_eq!(left, Some(4));
    }

    #[rstest]
    fn test_overwrite_does_not_change_shape() {
        let mut tree = tree_of([4, 2, 6, 1]);
        let before = preorder(&tree);
        assert_eq!(tree.put(2, -2), Some(20));
        assert_eq!(preorder(&tree), before);
        assert_eq!(tree.len(), 4);
        assert_eq!(tree.get(&2), Some(&-2));
    }

    #[rstest]
    fn test_smaller_alpha_rebuilds_sooner() {
        let mut tight = ScapegoatTree::with_alpha(1.1).unwrap();
        let mut loose = ScapegoatTree::with_alpha(3.0).unwrap();
        for key in 0..64 {
            tight.put(key, ());
            loose.put(key, ());
        }
        assert!(tight.rebuilds() > loose.rebuilds());
        assert!(tight.height() <= loose.height());
        assert_eq!(tight.check_integrity(), Ok(()));
        assert_eq!(loose.check_integrity(), Ok(()));
    }

    #[rstest]
    fn test_with_alpha_rejects_invalid_factor() {
        let result = ScapegoatTree::<i32, i32>::with_alpha(1.0);
        assert!(matches!(
            result,
            Err(ScapegoatTreeError::InvalidArgument { .. })
        ));
    }

    // =========================================================================
    // Lookup Tests
    // =========================================================================

    #[rstest]
    fn test_min_max_on_empty_tree() {
        let tree: ScapegoatTree<i32, i32> = ScapegoatTree::new();
        assert_eq!(tree.min(), Err(ScapegoatTreeError::NotFound { operation: "min" }));
        assert_eq!(tree.max(), Err(ScapegoatTreeError::NotFound { operation: "max" }));
        assert_eq!(tree.min_entry(), None);
        assert_eq!(tree.max_entry(), None);
    }

    #[rstest]
    fn test_min_max_entries() {
        let tree = tree_of([5, 3, 8, 1, 4, 7, 9]);
        assert_eq!(tree.min_entry(), Some((&1, &10)));
        assert_eq!(tree.max_entry(), Some((&9, &90)));
    }

    #[rstest]
    fn test_index_returns_value() {
        let tree = tree_of([1, 2]);
        assert_eq!(tree[&2], 20);
    }

    #[rstest]
    #[should_panic(expected = "no entry found for key")]
    fn test_index_panics_on_missing_key() {
        let tree = tree_of([1, 2]);
        let _value: i32 = tree[&3];
    }

    // =========================================================================
    // Integrity Tests
    // =========================================================================

    #[cfg(debug_assertions)]
    #[rstest]
    #[should_panic(expected = "scapegoat tree integrity violated: keys are not in symmetric order")]
    fn test_put_panics_on_misplaced_key_along_path() {
        let mut tree = tree_of([2, 1, 3]);
        if let Some(right) = tree.root.as_deref_mut().and_then(|root| root.right.as_deref_mut()) {
            right.key = 0;
        }
        tree.put(4, 40);
    }

    #[cfg(debug_assertions)]
    #[rstest]
    #[should_panic(expected = "scapegoat tree integrity violated: keys are not in symmetric order")]
    fn test_put_panics_on_corrupted_rebuilt_subtree() {
        let mut tree = ScapegoatTree::with_alpha(1.1).unwrap();
        for key in [9, 3, 1, 8, 6] {
            tree.put(key, key);
        }
        assert_eq!(tree.rebuilds(), 0);
        // 1 hangs off the path to 5, so only the check of the rebuilt root
        // sees it out of order
        if let Some(one) = tree
            .root
            .as_deref_mut()
            .and_then(|root| root.left.as_deref_mut())
            .and_then(|three| three.left.as_deref_mut())
        {
            one.key = 4;
        }
        tree.put(5, 5);
    }

    #[rstest]
    fn test_loosest_factor_survives_long_ascending_run() {
        let mut tree = ScapegoatTree::with_balance_factor(BalanceFactor::MAX);
        for key in 0..200_000 {
            tree.put(key, ());
        }
        assert_eq!(tree.len(), 200_000);
        assert!(tree.height() as f64 <= BalanceFactor::MAX.height_budget(tree.len()));
        assert_eq!(tree.check_integrity(), Ok(()));
        assert_eq!(tree.keys_in(&199_990, &300_000).count(), 10);
        drop(tree);
    }
}
