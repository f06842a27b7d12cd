// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=thicket_scene --heading-base-level=0

//! Thicket Scene: a Kurbo-native scene graph for outliners and editors.
//!
//! - Represents a single rooted hierarchy of named nodes with local transforms.
//! - Caches world transforms and refreshes them in a batched [`Scene::commit`] step.
//! - Moves groups of nodes between parents with [`Scene::reparent`], keeping every moved node's
//!   world transform unchanged.
//!
//! ## Where this fits
//!
//! The scene is the *model* side of an outliner.
//! `thicket_tree_view` derives a flat, windowed list of rows from it and resolves drag-and-drop
//! gestures into reparent instructions; the scene applies them.
//!
//! ## Reparenting contract
//!
//! - The moved nodes are removed from their old parents and inserted as one contiguous block.
//! - With an insertion reference, the block lands immediately before it; the reference is looked
//!   up among the new parent's children *after* the moved nodes are detached.
//! - A missing reference, a stale id, moving the root, or moving a node into its own subtree is
//!   reported as a [`SceneError`] and the scene is left untouched.
//!
//! ## API overview
//!
//! - [`Scene`]: container managing nodes and world-transform caches.
//! - [`SceneNode`]: per-node local data (name, transform).
//! - [`NodeId`]: generational handle of a node.
//!
//! ### Minimal usage
//!
//! ```
//! use thicket_scene::{Scene, SceneNode};
//! use kurbo::{Affine, Point, Vec2};
//!
//! let mut scene = Scene::new("Scene");
//! let root = scene.root();
//!
//! let a = scene.insert(
//!     root,
//!     SceneNode { name: "A".into(), local_transform: Affine::translate(Vec2::new(10.0, 0.0)) },
//! );
//! let b = scene.insert(root, SceneNode::named("B"));
//! let _ = scene.commit();
//!
//! // Move B under A without moving it in world space.
//! scene.reparent(&[b], a, None).unwrap();
//! assert_eq!(scene.children(a), &[b]);
//! assert_eq!(scene.world_transform(b).unwrap() * Point::ORIGIN, Point::ORIGIN);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod error;
mod scene;
mod types;

pub use error::SceneError;
pub use scene::Scene;
pub use types::{NodeId, SceneNode};
