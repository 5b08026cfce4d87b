//! Tree cells and the link helpers that fold the empty subtree into them.

use std::borrow::Borrow;
use std::cmp::Ordering;

/// An owned, possibly empty subtree.
pub(crate) type Link<K, V> = Option<Box<Node<K, V>>>;

/// A tree cell with its cached subtree statistics.
#[derive(Clone)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) left: Link<K, V>,
    pub(crate) right: Link<K, V>,
    /// Number of nodes in the subtree rooted here.
    pub(crate) size: usize,
    /// Edges on the longest path from here down to a leaf.
    pub(crate) height: isize,
}

impl<K, V> Node<K, V> {
    /// Creates a leaf.
    pub(crate) const fn leaf(key: K, value: V) -> Self {
        Self {
            key,
            value,
            left: None,
            right: None,
            size: 1,
            height: 0,
        }
    }

    /// Re-derives `size` and `height` from the children.
    #[inline]
    pub(crate) fn refresh(&mut self) {
        self.size = 1 + size(self.left.as_deref()) + size(self.right.as_deref());
        self.height = 1 + height(self.left.as_deref()).max(height(self.right.as_deref()));
    }
}

/// Size of a subtree; `0` when empty.
#[inline]
pub(crate) fn size<K, V>(node: Option<&Node<K, V>>) -> usize {
    node.map_or(0, |node| node.size)
}

/// Height of a subtree; `-1` when empty.
#[inline]
pub(crate) fn height<K, V>(node: Option<&Node<K, V>>) -> isize {
    node.map_or(-1, |node| node.height)
}

/// Finds the node holding `key`.
pub(crate) fn find<'a, K, V, Q>(mut node: Option<&'a Node<K, V>>, key: &Q) -> Option<&'a Node<K, V>>
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
    while let Some(current) = node {
        node = match key.cmp(current.key.borrow()) {
            Ordering::Less => current.left.as_deref(),
            Ordering::Greater => current.right.as_deref(),
            Ordering::Equal => return Some(current),
        };
    }
    None
}

/// Finds the node holding `key`, mutably.
pub(crate) fn find_mut<'a, K, V, Q>(
    mut node: Option<&'a mut Node<K, V>>,
    key: &Q,
) -> Option<&'a mut Node<K, V>>
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
    while let Some(current) = node {
        node = match key.cmp(current.key.borrow()) {
            Ordering::Less => current.left.as_deref_mut(),
            Ordering::Greater => current.right.as_deref_mut(),
            Ordering::Equal => return Some(current),
        };
    }
    None
}

/// Leftmost node of a non-empty subtree.
pub(crate) fn leftmost<K, V>(node: &Node<K, V>) -> &Node<K, V> {
    node.left.as_deref().map_or(node, leftmost)
}

/// Rightmost node of a non-empty subtree.
pub(crate) fn rightmost<K, V>(node: &Node<K, V>) -> &Node<K, V> {
    node.right.as_deref().map_or(node, rightmost)
}
