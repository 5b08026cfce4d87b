//! Ordered iterators over a [`ScapegoatTree`](super::ScapegoatTree).
//!
//! Every borrowing iterator is driven by [`Range`], a lazy in-order traversal
//! pruned to an inclusive key interval. A subtree is only entered when it can
//! hold keys inside the interval, so producing `k` keys costs
//! `O(k + log n)`. Full iteration is the range from the minimum to the
//! maximum key.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;

use smallvec::SmallVec;

use super::node::{Node, leftmost, rightmost};

/// Stack depth kept inline before spilling to the heap. Under the default
/// balance factor this covers trees of up to 2^16 entries.
const INLINE_DEPTH: usize = 32;

type Stack<'a, K, V> = SmallVec<[&'a Node<K, V>; INLINE_DEPTH]>;

// =============================================================================
// Range
// =============================================================================

/// An iterator over the entries whose keys lie in an inclusive interval.
///
/// Created by [`ScapegoatTree::range`](super::ScapegoatTree::range).
pub struct Range<'a, K, V, Q: ?Sized = K> {
    /// Nodes whose key is at least `lower` and whose right subtree is still
    /// unvisited, with the next node to yield on top.
    stack: Stack<'a, K, V>,
    lower: &'a Q,
    upper: &'a Q,
}

impl<'a, K, V, Q> Range<'a, K, V, Q>
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
    pub(crate) fn new(root: Option<&'a Node<K, V>>, lower: &'a Q, upper: &'a Q) -> Self {
        let mut range = Self {
            stack: SmallVec::new(),
            lower,
            upper,
        };
        range.descend(root);
        range
    }

    /// Pushes the path towards the smallest key `>= lower` in the subtree,
    /// skipping left subtrees that lie entirely below `lower`.
    fn descend(&mut self, mut node: Option<&'a Node<K, V>>) {
        while let Some(current) = node {
            match self.lower.cmp(current.key.borrow()) {
                Ordering::Less => {
                    self.stack.push(current);
                    node = current.left.as_deref();
                }
                Ordering::Equal => {
                    self.stack.push(current);
                    return;
                }
                Ordering::Greater => node = current.right.as_deref(),
            }
        }
    }
}

impl<'a, K, V, Q> Iterator for Range<'a, K, V, Q>
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        match self.upper.cmp(node.key.borrow()) {
            Ordering::Less => {
                // everything left on the stack is larger still
                self.stack.clear();
                return None;
            }
            Ordering::Equal => self.stack.clear(),
            Ordering::Greater => self.descend(node.right.as_deref()),
        }
        Some((&node.key, &node.value))
    }
}

impl<K, V, Q> FusedIterator for Range<'_, K, V, Q>
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
}

impl<K, V, Q: ?Sized> Clone for Range<'_, K, V, Q> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            lower: self.lower,
            upper: self.upper,
        }
    }
}

impl<K, V, Q: ?Sized> fmt::Debug for Range<'_, K, V, Q> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Range")
            .field("pending", &self.stack.len())
            .finish_non_exhaustive()
    }
}

/// An iterator over the keys that lie in an inclusive interval.
///
/// Created by [`ScapegoatTree::keys_in`](super::ScapegoatTree::keys_in).
pub struct KeysIn<'a, K, V, Q: ?Sized = K> {
    pub(crate) inner: Range<'a, K, V, Q>,
}

impl<'a, K, V, Q> Iterator for KeysIn<'a, K, V, Q>
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }
}

impl<K, V, Q> FusedIterator for KeysIn<'_, K, V, Q>
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
}

impl<K, V, Q: ?Sized> Clone for KeysIn<'_, K, V, Q> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

// =============================================================================
// Full Iteration
// =============================================================================

/// An iterator over all entries in ascending key order.
///
/// Created by [`ScapegoatTree::iter`](super::ScapegoatTree::iter).
pub struct Iter<'a, K, V> {
    range: Option<Range<'a, K, V, K>>,
    remaining: usize,
}

impl<'a, K: Ord, V> Iter<'a, K, V> {
    pub(crate) fn new(root: Option<&'a Node<K, V>>) -> Self {
        root.map_or(
            Self {
                range: None,
                remaining: 0,
            },
            |root| Self {
                range: Some(Range::new(
                    Some(root),
                    &leftmost(root).key,
                    &rightmost(root).key,
                )),
                remaining: root.size,
            },
        )
    }
}

impl<'a, K: Ord, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.range.as_mut()?.next()?;
        self.remaining = self.remaining.saturating_sub(1);
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K: Ord, V> ExactSizeIterator for Iter<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K: Ord, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            range: self.range.clone(),
            remaining: self.remaining,
        }
    }
}

/// An iterator over all keys in ascending order.
///
/// Created by [`ScapegoatTree::keys`](super::ScapegoatTree::keys).
pub struct Keys<'a, K, V> {
    pub(crate) inner: Iter<'a, K, V>,
}

impl<'a, K: Ord, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K: Ord, V> ExactSizeIterator for Keys<'_, K, V> {}

impl<K: Ord, V> FusedIterator for Keys<'_, K, V> {}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

/// An iterator over all values in ascending key order.
///
/// Created by [`ScapegoatTree::values`](super::ScapegoatTree::values).
pub struct Values<'a, K, V> {
    pub(crate) inner: Iter<'a, K, V>,
}

impl<'a, K: Ord, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K: Ord, V> ExactSizeIterator for Values<'_, K, V> {}

impl<K: Ord, V> FusedIterator for Values<'_, K, V> {}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

// =============================================================================
// Owning Iteration
// =============================================================================

/// An owning iterator over all entries in ascending key order.
///
/// Created by `ScapegoatTree::into_iter`.
pub struct IntoIter<K, V> {
    pub(crate) nodes: std::vec::IntoIter<Box<Node<K, V>>>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.nodes.next().map(|node| (node.key, node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.nodes.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.nodes.next_back().map(|node| (node.key, node.value))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> FusedIterator for IntoIter<K, V> {}
