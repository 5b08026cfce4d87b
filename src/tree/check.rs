//! Structural consistency checks.
//!
//! Each predicate walks a whole subtree and re-derives from the node fields
//! what must hold. They exist to catch bugs in this crate. Builds with debug
//! assertions run them on every node an insertion touches: [`check_node`] on
//! each node of the insertion path and [`check_within`] on a rebuilt subtree.

use super::node::{Node, height, size};
use crate::balance::BalanceFactor;
use crate::error::IntegrityViolation;

/// Runs every predicate over the whole tree and reports the first one that
/// fails.
pub(crate) fn check<K: Ord, V>(
    root: Option<&Node<K, V>>,
    factor: BalanceFactor,
) -> Result<(), IntegrityViolation> {
    check_within(root, None, None, factor)
}

/// Runs every predicate over a subtree whose keys must lie strictly between
/// `min` and `max`.
pub(crate) fn check_within<K: Ord, V>(
    subtree: Option<&Node<K, V>>,
    min: Option<&K>,
    max: Option<&K>,
    factor: BalanceFactor,
) -> Result<(), IntegrityViolation> {
    if !is_ordered(subtree, min, max) {
        return Err(IntegrityViolation::Order);
    }
    if !is_size_consistent(subtree) {
        return Err(IntegrityViolation::Size);
    }
    if !is_height_consistent(subtree) {
        return Err(IntegrityViolation::Height);
    }
    if !is_balanced(subtree, factor) {
        return Err(IntegrityViolation::Balance);
    }
    Ok(())
}

/// Checks a single node against its key bounds and the cached statistics of
/// its children. The children themselves are not inspected.
pub(crate) fn check_node<K: Ord, V>(
    node: &Node<K, V>,
    min: Option<&K>,
    max: Option<&K>,
    factor: BalanceFactor,
) -> Result<(), IntegrityViolation> {
    if !is_within(&node.key, min, max) {
        return Err(IntegrityViolation::Order);
    }
    if node.size != 1 + size(node.left.as_deref()) + size(node.right.as_deref()) {
        return Err(IntegrityViolation::Size);
    }
    if node.height != 1 + height(node.left.as_deref()).max(height(node.right.as_deref())) {
        return Err(IntegrityViolation::Height);
    }
    if !factor.admits(node.height, node.size) {
        return Err(IntegrityViolation::Balance);
    }
    Ok(())
}

/// Strict on both sides; a missing bound is unconstrained. Strictness also
/// rules out shared nodes.
fn is_within<K: Ord>(key: &K, min: Option<&K>, max: Option<&K>) -> bool {
    min.is_none_or(|min| key > min) && max.is_none_or(|max| key < max)
}

/// Every key lies strictly between `min` and `max`.
fn is_ordered<K: Ord, V>(node: Option<&Node<K, V>>, min: Option<&K>, max: Option<&K>) -> bool {
    let Some(node) = node else {
        return true;
    };
    if !is_within(&node.key, min, max) {
        return false;
    }
    is_ordered(node.left.as_deref(), min, Some(&node.key))
        && is_ordered(node.right.as_deref(), Some(&node.key), max)
}

fn is_size_consistent<K, V>(node: Option<&Node<K, V>>) -> bool {
    node.is_none_or(|node| {
        node.size == 1 + size(node.left.as_deref()) + size(node.right.as_deref())
            && is_size_consistent(node.left.as_deref())
            && is_size_consistent(node.right.as_deref())
    })
}

fn is_height_consistent<K, V>(node: Option<&Node<K, V>>) -> bool {
    node.is_none_or(|node| {
        node.height == 1 + height(node.left.as_deref()).max(height(node.right.as_deref()))
            && is_height_consistent(node.left.as_deref())
            && is_height_consistent(node.right.as_deref())
    })
}

fn is_balanced<K, V>(node: Option<&Node<K, V>>, factor: BalanceFactor) -> bool {
    node.is_none_or(|node| {
        factor.admits(node.height, node.size)
            && is_balanced(node.left.as_deref(), factor)
            && is_balanced(node.right.as_deref(), factor)
    })
}
