// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by structural scene edits.

use crate::types::NodeId;

/// A structural edit that the scene refused to apply.
///
/// All of these indicate that the caller acted on an inconsistent snapshot of
/// the hierarchy. The scene is left untouched when an error is returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SceneError {
    /// The identifier does not refer to a live node.
    #[error("node {0:?} is not alive")]
    StaleNode(NodeId),
    /// The scene root has no parent and cannot be moved.
    #[error("the scene root cannot be reparented")]
    RootImmovable,
    /// Moving `node` under `parent` would make a node its own ancestor.
    #[error("cannot move {node:?} under {parent:?}, which lies in its own subtree")]
    WouldCycle {
        /// The node being moved.
        node: NodeId,
        /// The requested new parent.
        parent: NodeId,
    },
    /// The insertion reference is not a child of the new parent once the moved
    /// nodes have been detached.
    #[error("insertion reference {0:?} is not a remaining child of the new parent")]
    BeforeNotFound(NodeId),
    /// The new parent's world transform is singular, so a moved node's world
    /// placement cannot be expressed in its space.
    #[error("parent {0:?} has a non-invertible world transform")]
    SingularParent(NodeId),
}
