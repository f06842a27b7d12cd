// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Row binding: the per-row field bundle and its memoized markup.
//!
//! The host turns a [`RowFields`] into markup through a [`RowRenderer`]. A
//! [`RowBinding`] remembers the last bundle and markup for every row in the
//! window and only calls the renderer again when a row's bundle changed.

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::string::String;
use core::fmt;

use crate::drag::DropTargetState;
use crate::types::RowFlags;

/// Everything a row needs to draw itself.
///
/// Compared by value to decide whether a row must be rendered again. Placement
/// lives on [`RenderedRow`](crate::RenderedRow), so a row that only moved up or
/// down the list keeps its cached markup.
#[derive(Clone, Debug, PartialEq)]
pub struct RowFields<K> {
    /// Node identifier; also the row's stable key.
    pub id: K,
    /// Display name.
    pub name: String,
    /// Nesting depth; the root is 0.
    pub depth: usize,
    /// Derived view-state, including [`RowFlags::RENAMING`].
    pub flags: RowFlags,
    /// Drop region above the row.
    pub before: DropTargetState,
    /// Drop region below the row.
    pub after: DropTargetState,
    /// Drop region on the row's label.
    pub on: DropTargetState,
    /// A drag may start on this row.
    pub draggable: bool,
    /// The row shows an expand toggle (it is not a leaf).
    pub has_toggle: bool,
    /// Text of the name field while renaming.
    pub rename_value: Option<String>,
}

impl<K> RowFields<K> {
    /// This is the root row.
    pub fn is_root(&self) -> bool {
        self.depth == 0
    }

    /// The row shows a name field instead of its label.
    pub fn is_renaming(&self) -> bool {
        self.flags.contains(RowFlags::RENAMING)
    }
}

/// Host-supplied row markup.
///
/// Any `FnMut(&RowFields<K>) -> M` closure is a renderer.
pub trait RowRenderer<K> {
    /// What a rendered row looks like to the host.
    type Markup: Clone;

    /// Produce markup for one row.
    fn render_row(&mut self, fields: &RowFields<K>) -> Self::Markup;
}

impl<K, M: Clone, F: FnMut(&RowFields<K>) -> M> RowRenderer<K> for F {
    type Markup = M;

    fn render_row(&mut self, fields: &RowFields<K>) -> M {
        self(fields)
    }
}

/// Last rendered bundle and markup per row key.
#[derive(Clone, Debug)]
pub struct RowCache<K, M> {
    entries: BTreeMap<K, (RowFields<K>, M)>,
    hits: u64,
    misses: u64,
}

impl<K, M> Default for RowCache<K, M> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
            hits: 0,
            misses: 0,
        }
    }
}

impl<K: Copy + Ord, M: Clone> RowCache<K, M> {
    /// Cached markup for `fields`, or the result of `render` when the row changed.
    pub fn get_or_render(
        &mut self,
        fields: RowFields<K>,
        render: impl FnOnce(&RowFields<K>) -> M,
    ) -> M {
        if let Some((cached, markup)) = self.entries.get(&fields.id) {
            if *cached == fields {
                self.hits += 1;
                return markup.clone();
            }
        }
        self.misses += 1;
        let markup = render(&fields);
        self.entries.insert(fields.id, (fields, markup.clone()));
        markup
    }

    /// Drop entries for rows outside `keep`.
    pub fn retain(&mut self, keep: &BTreeSet<K>) {
        self.entries.retain(|k, _| keep.contains(k));
    }

    /// Number of cached rows.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Renders avoided so far.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Renders performed so far.
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Forget every cached row.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// A renderer paired with its row cache.
pub struct RowBinding<K, R: RowRenderer<K>> {
    renderer: R,
    cache: RowCache<K, R::Markup>,
}

impl<K, R: RowRenderer<K>> fmt::Debug for RowBinding<K, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowBinding")
            .field("cached", &self.cache.entries.len())
            .field("hits", &self.cache.hits)
            .field("misses", &self.cache.misses)
            .finish_non_exhaustive()
    }
}

impl<K: Copy + Ord, R: RowRenderer<K>> RowBinding<K, R> {
    /// Wrap `renderer` with an empty cache.
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            cache: RowCache::default(),
        }
    }

    /// Markup for one row, reusing the cached markup when `fields` is unchanged.
    pub fn bind(&mut self, fields: RowFields<K>) -> R::Markup {
        let renderer = &mut self.renderer;
        self.cache
            .get_or_render(fields, |fields| renderer.render_row(fields))
    }

    /// Evict rows that left the window.
    pub fn retain(&mut self, window: &BTreeSet<K>) {
        self.cache.retain(window);
    }

    /// The row cache.
    pub fn cache(&self) -> &RowCache<K, R::Markup> {
        &self.cache
    }

    /// The host renderer.
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Forget every cached row, forcing a full render next time.
    pub fn invalidate(&mut self) {
        self.cache.clear();
    }
}
