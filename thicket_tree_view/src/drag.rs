// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transient state of one drag gesture.
//!
//! A [`DragSession`] lives from drag start to drop or cancel and is never
//! folded back into the interaction state. The payload is captured once at the
//! start; hovering only moves the current target.
//!
//! ## Example
//!
//! ```
//! use std::collections::BTreeSet;
//! use thicket_tree_view::{DragPayload, DragSession, DropPosition, DropTarget};
//!
//! let payload = DragPayload { item_type: "node".into(), nodes: BTreeSet::from([7_u32]) };
//! let mut drag = DragSession::new(payload);
//! drag.hover(DropTarget::Row { node: 3, position: DropPosition::On });
//! assert!(drag.region(3, DropPosition::On).is_over);
//! assert!(!drag.region(3, DropPosition::Before).is_over);
//! drag.leave();
//! assert_eq!(drag.hovered(), None);
//! ```

use alloc::collections::BTreeSet;
use alloc::string::String;

use crate::drop::{ReparentPlan, plan_drop};
use crate::hierarchy::Hierarchy;
use crate::types::{DragPayload, DropPosition};

/// The region under the pointer during a drag.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DropTarget<K> {
    /// One of a row's three regions.
    Row {
        /// The row's node.
        node: K,
        /// Which region of the row.
        position: DropPosition,
    },
    /// The tree background, outside every row.
    Background,
}

impl<K: Copy> DropTarget<K> {
    /// The target node and position this region commits to.
    ///
    /// The background maps to [`DropPosition::Root`] with no target node.
    pub fn resolve(self) -> (Option<K>, DropPosition) {
        match self {
            Self::Row { node, position } => (Some(node), position),
            Self::Background => (None, DropPosition::Root),
        }
    }
}

/// Hover and accept state of one drop region, as a row renders it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct DropTargetState {
    /// The hovered payload may be dropped here.
    pub can_drop: bool,
    /// The pointer is over this region.
    pub is_over: bool,
}

/// One in-flight drag.
#[derive(Clone, Debug)]
pub struct DragSession<K> {
    payload: DragPayload<K>,
    hovered: Option<DropTarget<K>>,
    accepted: bool,
}

impl<K: Copy + Ord + core::fmt::Debug> DragSession<K> {
    /// Start a drag carrying `payload`.
    pub fn new(payload: DragPayload<K>) -> Self {
        Self {
            payload,
            hovered: None,
            accepted: false,
        }
    }

    /// The payload captured at drag start.
    pub fn payload(&self) -> &DragPayload<K> {
        &self.payload
    }

    /// The region currently under the pointer.
    pub fn hovered(&self) -> Option<DropTarget<K>> {
        self.hovered
    }

    /// Whether the hovered region accepts the payload.
    pub fn is_accepted(&self) -> bool {
        self.hovered.is_some() && self.accepted
    }

    /// Move the pointer over `target`, without judging acceptance.
    pub fn hover(&mut self, target: DropTarget<K>) {
        if self.hovered != Some(target) {
            self.hovered = Some(target);
            self.accepted = false;
        }
    }

    /// Move the pointer over `target` and decide whether it accepts the payload.
    ///
    /// `accept` lists the drag type tags the tree takes. Returns the decision.
    pub fn hover_in<H: Hierarchy<Key = K>>(
        &mut self,
        h: &H,
        target: DropTarget<K>,
        accept: &[String],
    ) -> bool {
        self.hover(target);
        self.accepted = self.accepts(h, target, accept);
        self.accepted
    }

    /// The pointer left every region.
    pub fn leave(&mut self) {
        self.hovered = None;
        self.accepted = false;
    }

    /// Render state of the `position` region of `node`.
    pub fn region(&self, node: K, position: DropPosition) -> DropTargetState {
        let is_over = self.hovered == Some(DropTarget::Row { node, position });
        DropTargetState {
            can_drop: is_over && self.accepted,
            is_over,
        }
    }

    /// Render state of the tree background.
    pub fn background(&self) -> DropTargetState {
        let is_over = self.hovered == Some(DropTarget::Background);
        DropTargetState {
            can_drop: is_over && self.accepted,
            is_over,
        }
    }

    /// Returns true if `target` would accept this payload.
    pub fn accepts<H: Hierarchy<Key = K>>(
        &self,
        h: &H,
        target: DropTarget<K>,
        accept: &[String],
    ) -> bool {
        if !accept.contains(&self.payload.item_type) {
            return false;
        }
        let (node, position) = target.resolve();
        plan_drop(h, &self.payload.nodes, node, position).is_ok()
    }

    /// Release over the hovered region.
    ///
    /// Returns the committed target and the edit it implies, or `None` when the
    /// pointer is outside every region or the region refuses the payload. The
    /// session ends either way.
    pub fn finish<H: Hierarchy<Key = K>>(
        self,
        h: &H,
        accept: &[String],
    ) -> Option<(DropTarget<K>, ReparentPlan<K>)> {
        let target = self.hovered?;
        if !accept.contains(&self.payload.item_type) {
            return None;
        }
        let (node, position) = target.resolve();
        let plan = plan_drop(h, &self.payload.nodes, node, position).ok()?;
        tracing::debug!(?target, nodes = ?plan.nodes, "drop");
        Some((target, plan))
    }

    /// Give the payload back, ending the session.
    pub fn into_payload(self) -> DragPayload<K> {
        self.payload
    }
}

/// The payload a drag starting on `node` carries.
///
/// A pressed row that is already selected drags the whole selection; otherwise
/// the press has just asked to select it alone, so it drags by itself.
pub fn drag_payload<K: Copy + Ord>(
    selected: &BTreeSet<K>,
    node: K,
    item_type: &str,
) -> DragPayload<K> {
    let nodes = if selected.contains(&node) {
        selected.clone()
    } else {
        BTreeSet::from([node])
    };
    DragPayload {
        item_type: String::from(item_type),
        nodes,
    }
}

/// Returns true if `payload` may be dragged at all: it must not carry the root.
pub fn can_drag<H: Hierarchy>(h: &H, payload: &DragPayload<H::Key>) -> bool {
    !payload.nodes.is_empty() && !payload.nodes.contains(&h.root())
}
