//! Perfect rebuild of a subtree.
//!
//! The subtree is flattened into its in-order sequence of nodes, which are
//! then re-linked around lower medians. The node allocations are reused; only
//! the links and cached statistics are rewritten.

use super::node::{Link, Node};

/// Replaces the subtree with a perfectly balanced one over the same entries.
///
/// The result has height `floor(log2(size))`, the minimum for its size.
pub(crate) fn rebuild<K, V>(subtree: Link<K, V>) -> Link<K, V> {
    let mut nodes = Vec::with_capacity(subtree.as_ref().map_or(0, |node| node.size));
    flatten(subtree, &mut nodes);
    let count = nodes.len();
    build_balanced(&mut nodes.into_iter(), count)
}

/// Moves every node of the subtree into `nodes`, in key order, with its
/// children detached.
pub(crate) fn flatten<K, V>(subtree: Link<K, V>, nodes: &mut Vec<Box<Node<K, V>>>) {
    if let Some(mut node) = subtree {
        flatten(node.left.take(), nodes);
        let right = node.right.take();
        nodes.push(node);
        flatten(right, nodes);
    }
}

/// Builds a balanced subtree from the next `count` nodes of `nodes`.
///
/// For an inclusive index range `lo..=hi` the root is element `(lo + hi) / 2`,
/// so the left half receives `(count - 1) / 2` nodes and the right half the
/// rest.
fn build_balanced<K, V, I>(nodes: &mut I, count: usize) -> Link<K, V>
where
    I: Iterator<Item = Box<Node<K, V>>>,
{
    if count == 0 {
        return None;
    }
    let left_count = (count - 1) / 2;
    let left = build_balanced(nodes, left_count);
    let mut root = nodes.next()?;
    root.left = left;
    root.right = build_balanced(nodes, count - 1 - left_count);
    root.refresh();
    Some(root)
}
