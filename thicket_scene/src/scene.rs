// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core scene implementation: structure, updates, queries.

use alloc::string::String;
use alloc::vec::Vec;
use kurbo::Affine;

use crate::error::SceneError;
use crate::types::{NodeId, SceneNode};

/// A rooted scene graph.
///
/// The root is created with the scene and lives as long as it does.
pub struct Scene {
    nodes: Vec<Option<Node>>, // slots
    generations: Vec<u32>,    // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    root: NodeId,
    epoch: u64,
}

impl core::fmt::Debug for Scene {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        let free = self.free_list.len();
        f.debug_struct("Scene")
            .field("root", &self.root)
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &free)
            .field("epoch", &self.epoch)
            .finish_non_exhaustive()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new("Scene")
    }
}

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    local: SceneNode,
    world_transform: Affine,
    dirty: bool,
}

impl Node {
    fn new(generation: u32, local: SceneNode) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            local,
            world_transform: Affine::IDENTITY,
            dirty: true,
        }
    }
}

impl Scene {
    /// Create a scene holding only a root node with the given name.
    pub fn new(root_name: impl Into<String>) -> Self {
        let mut scene = Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            root: NodeId::new(0, 1),
            epoch: 0,
        };
        scene.root = scene.alloc(SceneNode::named(root_name));
        scene
    }

    /// The root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of live nodes, including the root.
    pub fn len(&self) -> usize {
        self.nodes.len() - self.free_list.len()
    }

    /// A scene always holds at least its root.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Insert a new node as the last child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if `parent` is stale.
    pub fn insert(&mut self, parent: NodeId, local: SceneNode) -> NodeId {
        assert!(self.is_alive(parent), "dangling parent NodeId");
        let id = self.alloc(local);
        self.node_mut(parent).children.push(id);
        self.node_mut(id).parent = Some(parent);
        id
    }

    /// Remove a node and its whole subtree.
    ///
    /// Stale ids and the root are ignored. Returns the number of nodes freed.
    pub fn remove(&mut self, id: NodeId) -> usize {
        if !self.is_alive(id) || id == self.root {
            return 0;
        }
        if let Some(parent) = self.node(id).parent {
            self.node_mut(parent).children.retain(|c| *c != id);
        }
        let mut freed = 0;
        let mut stack = alloc::vec![id];
        while let Some(next) = stack.pop() {
            if let Some(node) = self.nodes[next.idx()].take() {
                stack.extend(node.children);
                self.free_list.push(next.idx());
                freed += 1;
            }
        }
        freed
    }

    /// Move `nodes` under `parent`, preserving each node's world transform.
    ///
    /// The nodes are detached from their current parents and inserted into
    /// `parent`'s children as one contiguous block, in the order given. With
    /// `before`, the block lands immediately ahead of that child; without it,
    /// the block is appended. `before` is looked up among the children that
    /// remain once the moved nodes are detached.
    ///
    /// Each moved node gets a new local transform such that its world
    /// transform is unchanged by the move. World caches are refreshed before
    /// the old transforms are read and again after the move.
    ///
    /// Moving a node under a parent whose world transform cannot be inverted
    /// fails with [`SceneError::SingularParent`]; reordering among existing
    /// children does not need the inverse and is still allowed.
    ///
    /// The scene is not modified when an error is returned.
    pub fn reparent(
        &mut self,
        nodes: &[NodeId],
        parent: NodeId,
        before: Option<NodeId>,
    ) -> Result<(), SceneError> {
        if !self.is_alive(parent) {
            return Err(SceneError::StaleNode(parent));
        }
        let mut moving: Vec<NodeId> = Vec::with_capacity(nodes.len());
        for &node in nodes {
            if !self.is_alive(node) {
                return Err(SceneError::StaleNode(node));
            }
            if node == self.root {
                return Err(SceneError::RootImmovable);
            }
            if self.is_within(parent, node) {
                return Err(SceneError::WouldCycle { node, parent });
            }
            if !moving.contains(&node) {
                moving.push(node);
            }
        }
        let remaining = self
            .node(parent)
            .children
            .iter()
            .filter(|c| !moving.contains(c));
        let insert_at = match before {
            Some(b) => remaining
                .clone()
                .position(|c| *c == b)
                .ok_or(SceneError::BeforeNotFound(b))?,
            None => remaining.count(),
        };

        self.commit();
        let parent_world = self.node(parent).world_transform;
        let changes_parent = moving.iter().any(|&n| self.node(n).parent != Some(parent));
        let det = parent_world.determinant();
        if changes_parent && (det == 0.0 || !det.is_finite()) {
            return Err(SceneError::SingularParent(parent));
        }
        let to_parent_space = parent_world.inverse();
        for &node in &moving {
            let old_parent = self.node(node).parent;
            if old_parent != Some(parent) {
                let old_parent_world = old_parent
                    .map(|p| self.node(p).world_transform)
                    .unwrap_or(Affine::IDENTITY);
                let n = self.node_mut(node);
                n.local.local_transform =
                    to_parent_space * old_parent_world * n.local.local_transform;
            }
            if let Some(p) = old_parent {
                self.node_mut(p).children.retain(|c| *c != node);
            }
            tracing::debug!(?node, from = ?old_parent, to = ?parent, "reparent");
        }
        self.node_mut(parent)
            .children
            .splice(insert_at..insert_at, moving.iter().copied());
        for &node in &moving {
            self.node_mut(node).parent = Some(parent);
            self.mark_subtree_dirty(node);
        }
        self.commit();
        Ok(())
    }

    /// Display name of a live node.
    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.node_opt(id).map(|n| n.local.name.as_str())
    }

    /// Rename a node. Returns `false` for stale ids.
    pub fn set_name(&mut self, id: NodeId, name: impl Into<String>) -> bool {
        match self.node_opt_mut(id) {
            Some(n) => {
                n.local.name = name.into();
                true
            }
            None => false,
        }
    }

    /// Local transform of a live node.
    pub fn local_transform(&self, id: NodeId) -> Option<Affine> {
        self.node_opt(id).map(|n| n.local.local_transform)
    }

    /// Update local transform. Takes effect on world caches at the next [`Scene::commit`].
    pub fn set_local_transform(&mut self, id: NodeId, tf: Affine) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.local_transform = tf;
            self.mark_subtree_dirty(id);
        }
    }

    /// Cached world transform of a live node, as of the last [`Scene::commit`].
    pub fn world_transform(&self, id: NodeId) -> Option<Affine> {
        self.node_opt(id).map(|n| n.world_transform)
    }

    /// Parent of a live node; `None` for the root and for stale ids.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id).and_then(|n| n.parent)
    }

    /// Ordered children of a live node; empty for stale ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node_opt(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// First node in pre-order whose name equals `name`.
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        let mut stack = alloc::vec![self.root];
        while let Some(id) = stack.pop() {
            let node = self.node(id);
            if node.local.name == name {
                return Some(id);
            }
            stack.extend(node.children.iter().rev().copied());
        }
        None
    }

    /// Returns true if `node` is `ancestor` or lies in its subtree.
    pub fn is_within(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut cur = Some(node);
        while let Some(id) = cur {
            if id == ancestor {
                return true;
            }
            cur = self.parent(id);
        }
        false
    }

    /// Refresh world transforms of dirty nodes. Returns how many were recomputed.
    pub fn commit(&mut self) -> usize {
        self.epoch = self.epoch.wrapping_add(1);
        let mut refreshed = 0;
        let mut stack = alloc::vec![(self.root, Affine::IDENTITY, false)];
        while let Some((id, parent_tf, parent_changed)) = stack.pop() {
            let node = self.node_mut(id);
            let changed = parent_changed || node.dirty;
            if changed {
                node.world_transform = parent_tf * node.local.local_transform;
                node.dirty = false;
                refreshed += 1;
            }
            let world = node.world_transform;
            for &child in node.children.iter().rev() {
                stack.push((child, world, changed));
            }
        }
        refreshed
    }

    /// Returns true if `id` refers to a live node.
    ///
    /// A `NodeId` is considered live if its slot exists and its generation matches
    /// the current generation stored in that slot.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.node_opt(id).is_some()
    }

    // --- internals ---

    fn alloc(&mut self, local: SceneNode) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, local));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, local)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        NodeId::new(idx, generation)
    }

    fn mark_subtree_dirty(&mut self, id: NodeId) {
        let mut stack = alloc::vec![id];
        while let Some(next) = stack.pop() {
            let n = self.node_mut(next);
            n.dirty = true;
            stack.extend(n.children.iter().copied());
        }
    }

    fn node(&self, id: NodeId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling NodeId")
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling NodeId")
    }

    fn node_opt(&self, id: NodeId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }
}
