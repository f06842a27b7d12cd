// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drop resolution: deciding whether a drag may land, and where.
//!
//! ## Rules
//!
//! A drop is accepted unless one of these holds:
//!
//! - the payload is empty or names no node in the tree;
//! - the position is `Before`/`After` and the target is the root;
//! - the position needs a target and none (or a detached one) was given;
//! - the payload would move the root;
//! - the target is one of the moved nodes or lies inside one of their subtrees.
//!
//! Only the selection roots of the payload move (see
//! [`selection_roots`]); their relative document order is preserved.
//!
//! ## Commit
//!
//! An accepted drop becomes a [`ReparentPlan`], which the host applies through
//! [`Reparent`]. For `After`, the insertion point is the first following sibling
//! of the target that is not itself being moved, so the result does not depend
//! on whether a dragged node already sat right after the target.

use alloc::collections::BTreeSet;
use alloc::vec::Vec;

use crate::hierarchy::{Hierarchy, Reparent};
use crate::types::DropPosition;
use crate::walk::{find_node, is_within, selection_roots};

/// Why a drop was refused.
///
/// A refusal is a normal outcome that only suppresses the accept affordance.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DropRejection {
    /// Nothing is being dragged.
    EmptyPayload,
    /// `Before`/`After` relative to the root.
    RootSibling,
    /// The position needs a target row that is not in the tree.
    MissingTarget,
    /// None of the dragged nodes are in the tree.
    NothingToMove,
    /// The root itself is being dragged.
    MovesRoot,
    /// The target is a dragged node or one of its descendants.
    IntoOwnSubtree,
}

/// A structural edit derived from an accepted drop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReparentPlan<K> {
    /// Nodes to move, in document order.
    pub nodes: Vec<K>,
    /// New parent.
    pub parent: K,
    /// Sibling to insert ahead of; `None` appends.
    pub before: Option<K>,
}

impl<K: Copy + Ord + core::fmt::Debug> ReparentPlan<K> {
    /// Apply this plan to `h`.
    pub fn apply<H>(&self, h: &mut H) -> Result<(), H::Error>
    where
        H: Reparent<Key = K>,
    {
        tracing::debug!(
            nodes = ?self.nodes,
            parent = ?self.parent,
            before = ?self.before,
            "apply drop"
        );
        h.reparent(&self.nodes, self.parent, self.before)
    }
}

/// Returns true if dropping `payload` at `position` relative to `target` is allowed.
pub fn can_drop<H: Hierarchy>(
    h: &H,
    payload: &BTreeSet<H::Key>,
    target: Option<H::Key>,
    position: DropPosition,
) -> bool {
    plan_drop(h, payload, target, position).is_ok()
}

/// Resolve a drop into the edit it commits to.
pub fn plan_drop<H: Hierarchy>(
    h: &H,
    payload: &BTreeSet<H::Key>,
    target: Option<H::Key>,
    position: DropPosition,
) -> Result<ReparentPlan<H::Key>, DropRejection> {
    let plan = resolve(h, payload, target, position);
    if let Err(reason) = &plan {
        tracing::trace!(?target, ?position, ?reason, "drop rejected");
    }
    plan
}

fn resolve<H: Hierarchy>(
    h: &H,
    payload: &BTreeSet<H::Key>,
    target: Option<H::Key>,
    position: DropPosition,
) -> Result<ReparentPlan<H::Key>, DropRejection> {
    if payload.is_empty() {
        return Err(DropRejection::EmptyPayload);
    }
    let root = h.root();
    let target = match position {
        DropPosition::Root => root,
        DropPosition::Before | DropPosition::After | DropPosition::On => {
            let target = target
                .and_then(|t| find_node(h, t))
                .ok_or(DropRejection::MissingTarget)?;
            if target == root && position != DropPosition::On {
                return Err(DropRejection::RootSibling);
            }
            target
        }
    };

    let nodes = selection_roots(h, payload);
    if nodes.is_empty() {
        return Err(DropRejection::NothingToMove);
    }
    if nodes.contains(&root) {
        return Err(DropRejection::MovesRoot);
    }
    if nodes.iter().any(|&moving| is_within(h, target, moving)) {
        return Err(DropRejection::IntoOwnSubtree);
    }

    let (parent, before) = match position {
        DropPosition::Root => (root, None),
        DropPosition::On => (target, None),
        DropPosition::Before => {
            let parent = h.parent(target).ok_or(DropRejection::RootSibling)?;
            (parent, Some(target))
        }
        DropPosition::After => {
            let parent = h.parent(target).ok_or(DropRejection::RootSibling)?;
            let siblings = h.children(parent);
            let before = siblings
                .iter()
                .skip_while(|&&s| s != target)
                .skip(1)
                .find(|s| !nodes.contains(s))
                .copied();
            (parent, before)
        }
    };
    Ok(ReparentPlan {
        nodes,
        parent,
        before,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::Outline;
    use alloc::vec;

    fn set(ids: &[u32]) -> BTreeSet<u32> {
        ids.iter().copied().collect()
    }

    const ALL: [DropPosition; 3] = [DropPosition::Before, DropPosition::After, DropPosition::On];

    #[test]
    fn drop_on_sibling_appends_to_its_children() {
        // root -> [A -> [B], C]
        let mut h = Outline::abc();
        let plan = plan_drop(&h, &set(&[3]), Some(1), DropPosition::On).unwrap();
        plan.apply(&mut h).unwrap();
        assert_eq!(h.children(1), &[2, 3]);
        assert_eq!(h.children(0), &[1]);
    }

    #[test]
    fn drop_after_lifts_into_target_parent() {
        let mut h = Outline::abc();
        let plan = plan_drop(&h, &set(&[2]), Some(1), DropPosition::After).unwrap();
        assert_eq!(plan.before, Some(3));
        plan.apply(&mut h).unwrap();
        assert_eq!(h.children(0), &[1, 2, 3]);
        assert!(h.children(1).is_empty());
    }

    #[test]
    fn drop_after_at_end_appends() {
        let mut h = Outline::new(0, "root").node(0, 1, "A").node(1, 2, "B");
        let plan = plan_drop(&h, &set(&[2]), Some(1), DropPosition::After).unwrap();
        assert_eq!(plan.before, None);
        plan.apply(&mut h).unwrap();
        assert_eq!(h.children(0), &[1, 2]);
    }

    #[test]
    fn drop_after_skips_moving_next_sibling() {
        // root -> [A, B, C]; drag {B} after A leaves the order unchanged.
        let mut h = Outline::new(0, "root")
            .node(0, 1, "A")
            .node(0, 2, "B")
            .node(0, 3, "C");
        let plan = plan_drop(&h, &set(&[2]), Some(1), DropPosition::After).unwrap();
        assert_eq!(plan.before, Some(3));
        plan.apply(&mut h).unwrap();
        assert_eq!(h.children(0), &[1, 2, 3]);

        let plan = plan_drop(&h, &set(&[2, 3]), Some(1), DropPosition::After).unwrap();
        assert_eq!(plan.before, None);
        plan.apply(&mut h).unwrap();
        assert_eq!(h.children(0), &[1, 2, 3]);
    }

    #[test]
    fn drop_before_inserts_block_in_document_order() {
        let mut h = Outline::new(0, "root")
            .node(0, 1, "A")
            .node(0, 2, "B")
            .node(0, 3, "C")
            .node(0, 4, "D");
        let plan = plan_drop(&h, &set(&[4, 1]), Some(3), DropPosition::Before).unwrap();
        assert_eq!(plan.nodes, vec![1, 4]);
        plan.apply(&mut h).unwrap();
        assert_eq!(h.children(0), &[2, 1, 4, 3]);
    }

    #[test]
    fn root_drop_appends_selection_roots() {
        let mut h = Outline::abc().node(2, 4, "D");
        let plan = plan_drop(&h, &set(&[2, 4]), None, DropPosition::Root).unwrap();
        assert_eq!(plan.nodes, vec![2]);
        plan.apply(&mut h).unwrap();
        assert_eq!(h.children(0), &[1, 3, 2]);
        assert_eq!(h.children(2), &[4]);
    }

    #[test]
    fn rejects_empty_and_unknown_payloads() {
        let h = Outline::abc();
        assert_eq!(
            plan_drop(&h, &set(&[]), Some(1), DropPosition::On),
            Err(DropRejection::EmptyPayload)
        );
        assert_eq!(
            plan_drop(&h, &set(&[77]), Some(1), DropPosition::On),
            Err(DropRejection::NothingToMove)
        );
    }

    #[test]
    fn rejects_root_siblings_and_root_moves() {
        let h = Outline::abc();
        assert!(!can_drop(&h, &set(&[3]), Some(0), DropPosition::Before));
        assert!(!can_drop(&h, &set(&[3]), Some(0), DropPosition::After));
        assert!(can_drop(&h, &set(&[2]), Some(0), DropPosition::On));
        assert_eq!(
            plan_drop(&h, &set(&[0]), None, DropPosition::Root),
            Err(DropRejection::MovesRoot)
        );
    }

    #[test]
    fn rejects_missing_targets() {
        let h = Outline::abc();
        for position in ALL {
            assert_eq!(
                plan_drop(&h, &set(&[3]), None, position),
                Err(DropRejection::MissingTarget)
            );
            assert!(!can_drop(&h, &set(&[3]), Some(55), position));
        }
    }

    #[test]
    fn rejects_drops_into_own_subtree() {
        let h = Outline::abc().node(2, 4, "D");
        for position in ALL {
            for target in [1, 2, 4] {
                assert_eq!(
                    plan_drop(&h, &set(&[1]), Some(target), position),
                    Err(DropRejection::IntoOwnSubtree),
                    "{position:?} {target}"
                );
            }
            // A selected descendant does not shield its selected ancestor.
            assert!(!can_drop(&h, &set(&[1, 4]), Some(2), position));
        }
        assert!(can_drop(&h, &set(&[2]), Some(3), DropPosition::On));
    }
}
