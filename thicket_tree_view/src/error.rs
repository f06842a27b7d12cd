// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by the tree view facade.

/// A row could not be scrolled to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ScrollError<K> {
    /// The node is not part of the hierarchy.
    #[error("node {0:?} is not in the tree")]
    NotFound(K),
    /// The node exists but a collapsed ancestor hides its row.
    ///
    /// [`TreeView::reveal_node`](crate::TreeView::reveal_node) expands the ancestors.
    #[error("node {0:?} is hidden under a collapsed ancestor")]
    Hidden(K),
}
