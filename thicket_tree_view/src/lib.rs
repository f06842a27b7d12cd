// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=thicket_tree_view --heading-base-level=0

//! Thicket Tree View: a virtualized, drag-and-drop outliner over a host-owned hierarchy.
//!
//! ## Overview
//!
//! The tree view turns a rooted hierarchy into a flat list of rows, shows only the
//! rows that fit the viewport, and interprets keyboard, pointer, and drag gestures.
//! It owns very little: expansion, keyboard focus, the rename field, and the drag in
//! flight. Selection belongs to the host and arrives as [`TreeProps`]; everything
//! the user asks for leaves as a [`TreeEvent`].
//!
//! ## Pieces
//!
//! - [`Hierarchy`] / [`Reparent`]: what the host's tree must offer.
//! - [`flatten`] and the other walks: pre-order flattening and subtree queries, all
//!   with explicit stacks.
//! - [`plan_drop`]: accept or refuse a drop and turn it into a [`ReparentPlan`].
//! - [`InteractionState`]: expansion, focus, and rename commands plus the row
//!   keyboard and pointer protocols.
//! - [`RowBinding`]: per-row field bundles, memoized so unchanged rows are not
//!   rendered again.
//! - [`TreeView`]: the facade tying these to a [`thicket_list::Virtualizer`].
//!
//! ## Drop positions
//!
//! - `Root`: append to the root (released on the background).
//! - `On`: append to the target's children.
//! - `Before` / `After`: insert next to the target under the target's parent.
//!
//! The dragged nodes' selection roots move as one block in document order. Drops
//! into a dragged node's own subtree and `Before`/`After` on the root are refused.
//!
//! ## Example
//!
//! ```
//! use thicket_scene::{Scene, SceneNode};
//! use thicket_tree_view::{
//!     DropPosition, DropTarget, RowBinding, RowFields, TreeEvent, TreeProps, TreeView,
//!     TreeViewConfig,
//! };
//! use kurbo::Size;
//!
//! let mut scene = Scene::new("Scene");
//! let a = scene.insert(scene.root(), SceneNode::named("A"));
//! let c = scene.insert(scene.root(), SceneNode::named("C"));
//!
//! let mut view = TreeView::new(TreeViewConfig::default());
//! view.set_viewport(Size::new(200.0, 320.0));
//! view.update(&scene, TreeProps::default());
//!
//! // Click C: the host is asked to select it.
//! view.pointer_down(&scene, c, 1, Default::default());
//! assert_eq!(view.take_events(), vec![TreeEvent::SetSelected(c)]);
//! view.update(&scene, TreeProps { selected: [c].into(), active: Some(c) });
//!
//! // Drag C onto A and apply the resulting edit.
//! assert!(view.begin_drag(&scene, c));
//! view.drag_over(&scene, DropTarget::Row { node: a, position: DropPosition::On });
//! let plan = view.drop(&scene).unwrap();
//! plan.apply(&mut scene).unwrap();
//! assert_eq!(scene.children(a), &[c]);
//!
//! // Render the window as text.
//! view.expand(a);
//! let mut rows =
//!     RowBinding::new(|f: &RowFields<_>| format!("{}{}", "  ".repeat(f.depth), f.name));
//! view.invalidate();
//! let lines: Vec<String> = view.render(&scene, &mut rows).into_iter().map(|r| r.markup).collect();
//! assert_eq!(lines, ["Scene", "  A", "    C"]);
//! ```
//!
//! ## Features
//!
//! - `std` (default): std support in dependencies.
//! - `libm`: `no_std` float support through `libm`.
//! - `scene_adapter` (default): implements [`Hierarchy`] and [`Reparent`] for
//!   `thicket_scene::Scene`.
//! - `serde`: `Serialize`/`Deserialize` for [`TreeViewConfig`] and [`DropPosition`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod adapters;

mod drag;
mod drop;
mod error;
mod hierarchy;
mod row;
mod state;
mod types;
mod view;
mod walk;

#[cfg(test)]
mod test_support;

pub use drag::{DragSession, DropTarget, DropTargetState, can_drag, drag_payload};
pub use drop::{DropRejection, ReparentPlan, can_drop, plan_drop};
pub use error::ScrollError;
pub use hierarchy::{Hierarchy, Reparent};
pub use row::{RowBinding, RowCache, RowFields, RowRenderer};
pub use state::{InteractionState, RenameField};
pub use types::{DragPayload, DropPosition, FlatRow, Key, Modifiers, RowFlags, TreeEvent};
pub use view::{RenderedRow, TreeProps, TreeView, TreeViewConfig};
pub use walk::{descendant_ids, find_node, flatten, is_within, path_to, selection_roots};

pub use thicket_list::Align;
