// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the scene: node identifiers and per-node local data.

use alloc::string::String;
use kurbo::Affine;

/// Identifier for a node in the scene.
///
/// This is a small, copyable handle that stays stable across updates (including
/// reparenting) but becomes invalid when the underlying slot is reused.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `NodeId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `NodeId`.
///
/// ### Ordering
///
/// `NodeId` orders by slot index, then generation. The order carries no meaning
/// beyond giving sets of ids a deterministic iteration order.
///
/// ### Liveness
///
/// Use [`Scene::is_alive`](crate::Scene::is_alive) to check whether a `NodeId` still refers
/// to a live node.
/// Stale `NodeId`s never alias a different live node because the generation must match.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    /// Slot index of this identifier.
    ///
    /// Stable for the lifetime of the node; useful as a compact display key.
    pub const fn slot(self) -> u32 {
        self.0
    }
}

/// Local data for a node.
#[derive(Clone, Debug)]
pub struct SceneNode {
    /// Display name shown by outliners.
    pub name: String,
    /// Local transform relative to parent space.
    pub local_transform: Affine,
}

impl SceneNode {
    /// A node with the given name and an identity transform.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            local_transform: Affine::IDENTITY,
        }
    }
}

impl Default for SceneNode {
    fn default() -> Self {
        Self {
            name: String::new(),
            local_transform: Affine::IDENTITY,
        }
    }
}
