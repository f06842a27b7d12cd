// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types: flattened rows, row flags, drop positions, gestures, and events.
//!
//! ## Overview
//!
//! These types describe what the tree view derives from a hierarchy and what it
//! reports back to its host. They are produced by [`flatten`](crate::flatten)
//! and consumed by the [`TreeView`](crate::TreeView) facade.

use alloc::collections::BTreeSet;
use alloc::string::String;

bitflags::bitflags! {
    /// Derived view-state bits of a single row.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct RowFlags: u8 {
        /// Children are shown. Always set on the root row.
        const EXPANDED = 0b0000_0001;
        /// The node is part of the host's selection.
        const SELECTED = 0b0000_0010;
        /// The node is the host's active node.
        const ACTIVE   = 0b0000_0100;
        /// The node has no children.
        const LEAF     = 0b0000_1000;
        /// The node holds keyboard focus.
        const FOCUSED  = 0b0001_0000;
        /// The node shows an editable name field.
        const RENAMING = 0b0010_0000;
    }
}

bitflags::bitflags! {
    /// Keyboard modifiers that change gesture meaning.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift is held.
        const SHIFT = 0b0000_0001;
    }
}

/// One visible line of the tree.
///
/// Produced fresh by [`flatten`](crate::flatten) and never mutated in place.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlatRow<K> {
    /// Node identifier.
    pub id: K,
    /// Display name at the time of flattening.
    pub name: String,
    /// Distance from the root; the root row has depth 0.
    pub depth: usize,
    /// Derived view-state.
    pub flags: RowFlags,
}

impl<K> FlatRow<K> {
    /// Children are shown.
    pub fn is_expanded(&self) -> bool {
        self.flags.contains(RowFlags::EXPANDED)
    }

    /// Part of the host's selection.
    pub fn is_selected(&self) -> bool {
        self.flags.contains(RowFlags::SELECTED)
    }

    /// The host's active node.
    pub fn is_active(&self) -> bool {
        self.flags.contains(RowFlags::ACTIVE)
    }

    /// Has no children.
    pub fn is_leaf(&self) -> bool {
        self.flags.contains(RowFlags::LEAF)
    }

    /// Holds keyboard focus.
    pub fn is_focused(&self) -> bool {
        self.flags.contains(RowFlags::FOCUSED)
    }
}

/// Where a drop lands relative to its target.
///
/// The positions are mutually exclusive; see [`plan_drop`](crate::plan_drop)
/// for how each one is committed.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DropPosition {
    /// Append to the tree root (the gesture ended on the tree background).
    Root,
    /// Insert as the target's immediately preceding siblings.
    Before,
    /// Insert as the target's immediately following siblings.
    After,
    /// Append to the target's children.
    On,
}

/// Keys the row keyboard protocol reacts to.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Key {
    /// Move focus to the next visible row.
    ArrowDown,
    /// Move focus to the previous visible row.
    ArrowUp,
    /// Collapse.
    ArrowLeft,
    /// Expand.
    ArrowRight,
    /// Select, or commit a rename.
    Enter,
    /// Cancel a rename.
    Escape,
}

/// The set of dragged nodes, captured once when a drag starts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DragPayload<K> {
    /// Type tag matched against a tree's accepted drop types.
    pub item_type: String,
    /// Dragged node identifiers.
    pub nodes: BTreeSet<K>,
}

/// Intents the tree view emits for its host.
///
/// Selection, activation, renames, and drops are owned by the host; the tree
/// view only reports what the user asked for. Drain them with
/// [`TreeView::take_events`](crate::TreeView::take_events).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TreeEvent<K> {
    /// Flip the node's membership in the selection.
    ToggleSelected(K),
    /// Add the node to the selection and make it active.
    AddSelected(K),
    /// Replace the selection with exactly this node.
    SetSelected(K),
    /// The node was double clicked.
    Activate(K),
    /// The user committed a new name.
    Rename {
        /// Renamed node.
        node: K,
        /// Text of the name field at commit time.
        name: String,
    },
    /// An accepted drop was released.
    Drop {
        /// The payload captured at drag start.
        payload: DragPayload<K>,
        /// The row dropped on, or `None` for the tree background.
        target: Option<K>,
        /// Where relative to the target.
        position: DropPosition,
    },
}
