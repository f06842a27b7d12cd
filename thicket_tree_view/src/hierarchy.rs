// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The contract a host hierarchy fulfils for the tree view.
//!
//! The tree view never owns the hierarchy. It reads structure through
//! [`Hierarchy`] and asks for structural edits through [`Reparent`], which the
//! host applies before the next sync.

use core::fmt::Debug;

/// Read access to a rooted tree of named nodes.
///
/// Lookups for keys that are not (or no longer) in the tree must answer
/// `None` or an empty slice rather than panic; the tree view can hold keys
/// that the host has since removed.
pub trait Hierarchy {
    /// Stable, unique node identifier.
    type Key: Copy + Ord + Debug;

    /// The root node.
    fn root(&self) -> Self::Key;
    /// Returns true if `node` is currently part of the tree.
    fn contains(&self, node: Self::Key) -> bool;
    /// Display name of `node`.
    fn name(&self, node: Self::Key) -> Option<&str>;
    /// Ordered children of `node`.
    fn children(&self, node: Self::Key) -> &[Self::Key];
    /// Parent of `node`; `None` for the root.
    fn parent(&self, node: Self::Key) -> Option<Self::Key>;
}

/// Structural edits requested by the tree view.
pub trait Reparent: Hierarchy {
    /// Reported when an edit cannot be applied to the current tree.
    type Error: Debug;

    /// Move `nodes` under `parent` as one contiguous block, preserving each
    /// node's world-space placement.
    ///
    /// With `before`, the block lands immediately ahead of that child of
    /// `parent`; otherwise it is appended. A `before` that is not among the
    /// parent's remaining children is a contract violation and must fail.
    fn reparent(
        &mut self,
        nodes: &[Self::Key],
        parent: Self::Key,
        before: Option<Self::Key>,
    ) -> Result<(), Self::Error>;

    /// Rename `node`. Returns `false` if the node is gone.
    fn rename(&mut self, node: Self::Key, name: &str) -> bool;
}
