// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree walks over a [`Hierarchy`].
//!
//! Every walk here keeps its own stack, so stack usage does not depend on tree depth.

use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use crate::hierarchy::Hierarchy;
use crate::types::{FlatRow, RowFlags};

/// Flatten the visible part of `h` into rows, depth-first and pre-order.
///
/// A node's children are visited only when the node is in `expanded`; the root
/// row is always present and always expanded. Cost is proportional to the
/// number of visible rows, not to the size of collapsed subtrees.
pub fn flatten<H: Hierarchy>(
    h: &H,
    expanded: &BTreeSet<H::Key>,
    selected: &BTreeSet<H::Key>,
    active: Option<H::Key>,
    focused: Option<H::Key>,
) -> Vec<FlatRow<H::Key>> {
    let mut rows = Vec::new();
    let mut stack = vec![(h.root(), 0_usize)];
    while let Some((id, depth)) = stack.pop() {
        let children = h.children(id);
        let is_expanded = depth == 0 || expanded.contains(&id);

        let mut flags = RowFlags::empty();
        flags.set(RowFlags::EXPANDED, is_expanded);
        flags.set(RowFlags::SELECTED, selected.contains(&id));
        flags.set(RowFlags::ACTIVE, active == Some(id));
        flags.set(RowFlags::FOCUSED, focused == Some(id));
        flags.set(RowFlags::LEAF, children.is_empty());

        rows.push(FlatRow {
            id,
            name: String::from(h.name(id).unwrap_or_default()),
            depth,
            flags,
        });

        if is_expanded {
            stack.extend(children.iter().rev().map(|&child| (child, depth + 1)));
        }
    }
    tracing::trace!(rows = rows.len(), "flatten");
    rows
}

/// Find `id` by walking down from the root.
///
/// Unlike [`Hierarchy::contains`], this only answers `Some` for nodes that are
/// actually reachable from the root.
pub fn find_node<H: Hierarchy>(h: &H, id: H::Key) -> Option<H::Key> {
    let mut stack = vec![h.root()];
    while let Some(node) = stack.pop() {
        if node == id {
            return Some(node);
        }
        stack.extend_from_slice(h.children(node));
    }
    None
}

/// All nodes in the subtree rooted at `id`, excluding `id` itself.
///
/// Empty when `id` is not in the tree.
pub fn descendant_ids<H: Hierarchy>(h: &H, id: H::Key) -> BTreeSet<H::Key> {
    let mut out = BTreeSet::new();
    if find_node(h, id).is_none() {
        return out;
    }
    let mut stack = h.children(id).to_vec();
    while let Some(node) = stack.pop() {
        out.insert(node);
        stack.extend_from_slice(h.children(node));
    }
    out
}

/// The shallowest selected nodes, in document order.
///
/// A selected node whose ancestor is also selected is left out, since moving
/// the ancestor already moves it.
pub fn selection_roots<H: Hierarchy>(h: &H, selection: &BTreeSet<H::Key>) -> Vec<H::Key> {
    let mut roots = Vec::new();
    if selection.is_empty() {
        return roots;
    }
    let mut stack = vec![h.root()];
    while let Some(node) = stack.pop() {
        if selection.contains(&node) {
            roots.push(node);
            continue;
        }
        stack.extend(h.children(node).iter().rev().copied());
    }
    roots
}

/// Returns true if `node` is `ancestor` or lies in its subtree.
pub fn is_within<H: Hierarchy>(h: &H, node: H::Key, ancestor: H::Key) -> bool {
    if !h.contains(node) {
        return false;
    }
    let mut cursor = Some(node);
    while let Some(current) = cursor {
        if current == ancestor {
            return true;
        }
        cursor = h.parent(current);
    }
    false
}

/// The chain of nodes from the root down to `id`, both inclusive.
///
/// `None` if `id` is not attached to this tree's root.
pub fn path_to<H: Hierarchy>(h: &H, id: H::Key) -> Option<Vec<H::Key>> {
    if !h.contains(id) {
        return None;
    }
    let mut path = vec![id];
    let mut cursor = id;
    while let Some(parent) = h.parent(cursor) {
        path.push(parent);
        cursor = parent;
    }
    if cursor != h.root() {
        return None;
    }
    path.reverse();
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::Outline;

    fn set(ids: &[u32]) -> BTreeSet<u32> {
        ids.iter().copied().collect()
    }

    fn ids(rows: &[FlatRow<u32>]) -> Vec<u32> {
        rows.iter().map(|r| r.id).collect()
    }

    #[test]
    fn collapsed_tree_shows_root_and_its_children() {
        let h = Outline::abc();
        let rows = flatten(&h, &set(&[]), &set(&[]), None, None);
        assert_eq!(ids(&rows), vec![0, 1, 3]);
        assert!(rows[0].is_expanded());
        assert_eq!(rows[0].depth, 0);
        assert_eq!(rows[1].name, "A");
        assert!(!rows[1].is_leaf());
        assert!(!rows[1].is_expanded());
        assert!(rows[2].is_leaf());
    }

    #[test]
    fn expanded_rows_are_pre_order() {
        let h = Outline::abc().node(2, 4, "D").node(1, 5, "E");
        let rows = flatten(&h, &set(&[1, 2]), &set(&[]), None, None);
        assert_eq!(ids(&rows), vec![0, 1, 2, 4, 5, 3]);
        let depths: Vec<usize> = rows.iter().map(|r| r.depth).collect();
        assert_eq!(depths, vec![0, 1, 2, 3, 2, 1]);
    }

    #[test]
    fn expansion_of_hidden_nodes_does_not_leak() {
        let h = Outline::abc().node(2, 4, "D");
        // B is expanded but A is not, so neither B nor D is visible.
        let rows = flatten(&h, &set(&[2]), &set(&[]), None, None);
        assert_eq!(ids(&rows), vec![0, 1, 3]);
    }

    #[test]
    fn root_is_expanded_even_if_absent_from_set() {
        let h = Outline::abc();
        let rows = flatten(&h, &set(&[]), &set(&[]), None, None);
        assert!(rows[0].flags.contains(RowFlags::EXPANDED));
    }

    #[test]
    fn selection_active_and_focus_flags() {
        let h = Outline::abc();
        let rows = flatten(&h, &set(&[1]), &set(&[1, 2]), Some(2), Some(3));
        let b = &rows[2];
        assert_eq!(b.id, 2);
        assert!(b.is_selected() && b.is_active() && !b.is_focused());
        assert!(rows[1].is_selected() && !rows[1].is_active());
        assert!(rows[3].is_focused());
    }

    #[test]
    fn deep_chain_does_not_recurse() {
        let mut h = Outline::new(0, "root");
        let mut expanded = BTreeSet::new();
        for i in 1..20_000_u32 {
            h = h.node(i - 1, i, "n");
            expanded.insert(i);
        }
        let rows = flatten(&h, &expanded, &set(&[]), None, None);
        assert_eq!(rows.len(), 20_000);
        assert_eq!(rows.last().map(|r| r.depth), Some(19_999));
        assert_eq!(descendant_ids(&h, 0).len(), 19_999);
    }

    #[test]
    fn find_and_descendants() {
        let h = Outline::abc().node(2, 4, "D");
        assert_eq!(find_node(&h, 4), Some(4));
        assert_eq!(find_node(&h, 99), None);
        assert_eq!(descendant_ids(&h, 1), set(&[2, 4]));
        assert!(descendant_ids(&h, 3).is_empty());
        assert!(descendant_ids(&h, 99).is_empty());
    }

    #[test]
    fn selection_roots_skip_selected_descendants() {
        let h = Outline::abc();
        assert_eq!(selection_roots(&h, &set(&[2, 1, 3])), vec![1, 3]);
        assert_eq!(selection_roots(&h, &set(&[3, 2])), vec![2, 3]);
        assert_eq!(selection_roots(&h, &set(&[0, 2])), vec![0]);
        assert!(selection_roots(&h, &set(&[42])).is_empty());
    }

    #[test]
    fn ancestry_queries() {
        let h = Outline::abc();
        assert!(is_within(&h, 2, 1));
        assert!(is_within(&h, 1, 1));
        assert!(is_within(&h, 3, 0));
        assert!(!is_within(&h, 1, 2));
        assert!(!is_within(&h, 99, 0));
        assert_eq!(path_to(&h, 2), Some(vec![0, 1, 2]));
        assert_eq!(path_to(&h, 0), Some(vec![0]));
        assert_eq!(path_to(&h, 99), None);
    }
}
