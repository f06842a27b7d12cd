// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The tree view facade.

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use kurbo::Size;
use thicket_list::{Align, FixedSizeList, ListConfig, Virtualizer};

use crate::drag::{DragSession, DropTarget, DropTargetState, can_drag, drag_payload};
use crate::drop::ReparentPlan;
use crate::error::ScrollError;
use crate::hierarchy::Hierarchy;
use crate::row::{RowBinding, RowFields, RowRenderer};
use crate::state::InteractionState;
use crate::types::{DropPosition, FlatRow, Key, Modifiers, RowFlags, TreeEvent};
use crate::walk::{find_node, flatten, path_to};

/// Widget configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TreeViewConfig {
    /// Row height in pixels.
    pub item_size: f64,
    /// Extra rows rendered beyond each edge of the viewport.
    pub overscan_count: usize,
    /// Viewport height before the first measurement.
    pub default_height: f64,
    /// Viewport width before the first measurement.
    pub default_width: f64,
    /// Tag attached to drags that start in this tree.
    pub drag_item_type: String,
    /// Drag tags this tree accepts as drops.
    pub drop_accept: Vec<String>,
}

impl Default for TreeViewConfig {
    fn default() -> Self {
        Self {
            item_size: 32.0,
            overscan_count: 2,
            default_height: 0.0,
            default_width: 0.0,
            drag_item_type: String::from("node"),
            drop_accept: vec![String::from("node")],
        }
    }
}

impl TreeViewConfig {
    /// Windowing configuration derived from this one.
    pub fn list_config(&self) -> ListConfig {
        ListConfig {
            item_size: self.item_size,
            overscan_count: self.overscan_count,
            default_size: Size::new(self.default_width, self.default_height),
        }
    }
}

/// Host-owned inputs: the selection and the active node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeProps<K> {
    /// Selected nodes.
    pub selected: BTreeSet<K>,
    /// The active node, usually the most recently selected one.
    pub active: Option<K>,
}

impl<K> Default for TreeProps<K> {
    fn default() -> Self {
        Self {
            selected: BTreeSet::new(),
            active: None,
        }
    }
}

/// One row of a rendered window.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedRow<K, M> {
    /// Stable key of the row.
    pub id: K,
    /// Position in the flattened list.
    pub index: usize,
    /// Top edge in list coordinates.
    pub offset: f64,
    /// Host markup for the row.
    pub markup: M,
}

/// A virtualized tree widget over a host-owned hierarchy.
///
/// The view keeps expansion, focus, rename, and drag state, derives the
/// flattened rows, and drives a [`Virtualizer`]. Selection, activation,
/// renames, and drops are reported as [`TreeEvent`]s; structural edits come
/// back as [`ReparentPlan`]s for the host to apply.
///
/// Rows are flattened lazily: commands only mark the view stale, and the next
/// [`sync`](Self::sync) (or anything that needs fresh rows) flattens once.
/// After changing the hierarchy, call [`update`](Self::update) or
/// [`invalidate`](Self::invalidate).
#[derive(Debug)]
pub struct TreeView<K, V = FixedSizeList> {
    config: TreeViewConfig,
    list: V,
    state: InteractionState<K>,
    props: TreeProps<K>,
    rows: Vec<FlatRow<K>>,
    positions: BTreeMap<K, usize>,
    synced: Option<u64>,
    drag: Option<DragSession<K>>,
    flattens: u64,
}

impl<K: Copy + Ord + core::fmt::Debug> TreeView<K> {
    /// Create a view backed by a [`FixedSizeList`].
    pub fn new(config: TreeViewConfig) -> Self {
        let list = FixedSizeList::new(config.list_config());
        Self::with_virtualizer(config, list)
    }
}

impl<K: Copy + Ord + core::fmt::Debug, V: Virtualizer> TreeView<K, V> {
    /// Create a view backed by a custom virtualizer.
    pub fn with_virtualizer(config: TreeViewConfig, list: V) -> Self {
        Self {
            config,
            list,
            state: InteractionState::new(),
            props: TreeProps::default(),
            rows: Vec::new(),
            positions: BTreeMap::new(),
            synced: None,
            drag: None,
            flattens: 0,
        }
    }

    /// The configuration.
    pub fn config(&self) -> &TreeViewConfig {
        &self.config
    }

    /// The virtualizer.
    pub fn virtualizer(&self) -> &V {
        &self.list
    }

    /// Mutable access to the virtualizer.
    pub fn virtualizer_mut(&mut self) -> &mut V {
        &mut self.list
    }

    /// Expansion, focus, and rename state.
    pub fn state(&self) -> &InteractionState<K> {
        &self.state
    }

    /// The current host props.
    pub fn props(&self) -> &TreeProps<K> {
        &self.props
    }

    /// Rows as of the last sync.
    pub fn rows(&self) -> &[FlatRow<K>] {
        &self.rows
    }

    /// Index of `id`'s row as of the last sync.
    pub fn row_index(&self, id: K) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    /// How many times the rows have been flattened.
    pub fn flatten_count(&self) -> u64 {
        self.flattens
    }

    // --- Sync ---

    /// Replace the host props and flatten against `h`.
    pub fn update<H: Hierarchy<Key = K>>(&mut self, h: &H, props: TreeProps<K>) {
        self.props = props;
        self.invalidate();
        self.sync(h);
    }

    /// Mark the rows stale, e.g. after the host edited the hierarchy.
    pub fn invalidate(&mut self) {
        self.synced = None;
    }

    /// Flatten if anything changed since the last sync. Returns true if it did.
    pub fn sync<H: Hierarchy<Key = K>>(&mut self, h: &H) -> bool {
        self.state.prune(h);
        let revision = self.state.revision();
        if self.synced == Some(revision) {
            return false;
        }
        self.rows = flatten(
            h,
            self.state.expanded(),
            &self.props.selected,
            self.props.active,
            self.state.focused(),
        );
        self.positions = self
            .rows
            .iter()
            .enumerate()
            .map(|(index, row)| (row.id, index))
            .collect();
        self.list.set_item_count(self.rows.len());
        self.synced = Some(revision);
        self.flattens += 1;
        tracing::trace!(rows = self.rows.len(), revision, "sync");
        true
    }

    // --- Commands ---

    /// Expand `id`.
    pub fn expand(&mut self, id: K) {
        self.state.expand(id);
    }

    /// Collapse `id`.
    pub fn collapse(&mut self, id: K) {
        self.state.collapse(id);
    }

    /// Expand `id` and everything beneath it.
    pub fn expand_subtree<H: Hierarchy<Key = K>>(&mut self, h: &H, id: K) {
        self.state.expand_subtree(h, id);
    }

    /// Collapse `id` and everything beneath it.
    pub fn collapse_subtree<H: Hierarchy<Key = K>>(&mut self, h: &H, id: K) {
        self.state.collapse_subtree(h, id);
    }

    /// Expand every non-leaf row currently shown.
    pub fn expand_all<H: Hierarchy<Key = K>>(&mut self, h: &H) {
        self.sync(h);
        self.state.expand_all(&self.rows);
    }

    /// Expand every non-leaf node in the tree, shown or not.
    pub fn expand_everything<H: Hierarchy<Key = K>>(&mut self, h: &H) {
        self.state.expand_everything(h);
    }

    /// Collapse everything.
    pub fn collapse_all(&mut self) {
        self.state.collapse_all();
    }

    /// Move keyboard focus to `id`.
    pub fn set_focused(&mut self, id: K) {
        self.state.set_focused(id);
    }

    /// Ask the host to flip `id`'s selection.
    pub fn toggle_selected(&mut self, id: K) {
        self.state.toggle_selected(id);
    }

    /// Ask the host to add `id` to the selection.
    pub fn add_selected(&mut self, id: K) {
        self.state.add_selected(id);
    }

    /// Ask the host to select exactly `id`.
    pub fn set_selected(&mut self, id: K) {
        self.state.set_selected(id);
    }

    /// Show a name field on `id`, seeded with its current name. Unknown ids are ignored.
    pub fn begin_rename<H: Hierarchy<Key = K>>(&mut self, h: &H, id: K) {
        if let Some(name) = h.name(id) {
            self.state.begin_rename(id, name);
        }
    }

    /// Update the name field text.
    pub fn rename_input(&mut self, value: &str) {
        self.state.rename_input(value);
    }

    /// Discard the name field.
    pub fn cancel_rename(&mut self) {
        self.state.cancel_rename();
    }

    /// Commit `name` for `id` if `id` is being renamed.
    pub fn commit_rename(&mut self, id: K, name: &str) -> bool {
        self.state.commit_rename(id, name)
    }

    /// The name field lost focus; commits its text.
    pub fn rename_blur(&mut self) {
        self.state.rename_blur();
    }

    // --- Gestures ---

    /// A key pressed while `id`'s row (or its name field) has focus.
    pub fn key_down<H: Hierarchy<Key = K>>(
        &mut self,
        h: &H,
        id: K,
        key: Key,
        modifiers: Modifiers,
    ) {
        self.sync(h);
        if self.state.renaming().is_some_and(|r| r.node == id) {
            self.state.rename_key(key);
            return;
        }
        if let Some(index) = self.row_index(id) {
            self.state.row_key(h, &self.rows, index, key, modifiers);
        }
    }

    /// Pointer pressed on `id`'s row. `clicks` is 1 for a single and 2 for a double click.
    pub fn pointer_down<H: Hierarchy<Key = K>>(
        &mut self,
        h: &H,
        id: K,
        clicks: u8,
        modifiers: Modifiers,
    ) {
        self.sync(h);
        let Some(row) = self.positions.get(&id).and_then(|&i| self.rows.get(i)) else {
            return;
        };
        self.state.row_pointer_down(row, clicks, modifiers);
    }

    /// Click on `id`'s expand toggle.
    pub fn toggle_click<H: Hierarchy<Key = K>>(&mut self, h: &H, id: K) {
        self.sync(h);
        let Some(row) = self.positions.get(&id).and_then(|&i| self.rows.get(i)) else {
            return;
        };
        if !row.is_leaf() {
            self.state.toggle_click(row);
        }
    }

    // --- Drag and drop ---

    /// Start dragging from `id`'s row. Returns false if the drag is refused.
    pub fn begin_drag<H: Hierarchy<Key = K>>(&mut self, h: &H, id: K) -> bool {
        if !h.contains(id) {
            return false;
        }
        let payload = drag_payload(&self.props.selected, id, &self.config.drag_item_type);
        if !can_drag(h, &payload) {
            tracing::trace!(node = ?id, "drag refused");
            return false;
        }
        tracing::debug!(nodes = ?payload.nodes, "begin drag");
        self.drag = Some(DragSession::new(payload));
        true
    }

    /// The pointer moved over `target` during a drag. Returns whether it accepts the drop.
    pub fn drag_over<H: Hierarchy<Key = K>>(&mut self, h: &H, target: DropTarget<K>) -> bool {
        match &mut self.drag {
            Some(drag) => drag.hover_in(h, target, &self.config.drop_accept),
            None => false,
        }
    }

    /// The pointer left every drop region.
    pub fn drag_leave(&mut self) {
        if let Some(drag) = &mut self.drag {
            drag.leave();
        }
    }

    /// Release the drag.
    ///
    /// On an accepted region this queues a [`TreeEvent::Drop`] and returns the
    /// edit for the host to apply. Otherwise nothing is committed.
    pub fn drop<H: Hierarchy<Key = K>>(&mut self, h: &H) -> Option<ReparentPlan<K>> {
        let drag = self.drag.take()?;
        let payload = drag.payload().clone();
        let (target, plan) = drag.finish(h, &self.config.drop_accept)?;
        let (target, position) = target.resolve();
        self.state.emit(TreeEvent::Drop {
            payload,
            target,
            position,
        });
        Some(plan)
    }

    /// Abandon the drag without committing.
    pub fn cancel_drag(&mut self) {
        self.drag = None;
    }

    /// The drag in flight, if any.
    pub fn drag_session(&self) -> Option<&DragSession<K>> {
        self.drag.as_ref()
    }

    /// Drop state of the tree background.
    pub fn background_state(&self) -> DropTargetState {
        self.drag
            .as_ref()
            .map(DragSession::background)
            .unwrap_or_default()
    }

    // --- Rendering ---

    /// Render the rows in the virtualizer's window, keyed by node id.
    ///
    /// Rows whose fields did not change reuse the binding's cached markup.
    pub fn render<H, R>(
        &mut self,
        h: &H,
        binding: &mut RowBinding<K, R>,
    ) -> Vec<RenderedRow<K, R::Markup>>
    where
        H: Hierarchy<Key = K>,
        R: RowRenderer<K>,
    {
        self.sync(h);
        let range = self.list.rendered_range();
        let size = self.config.item_size;
        let root = h.root();
        let root_selected = self.props.selected.contains(&root);

        let mut out = Vec::with_capacity(range.len());
        let mut window = BTreeSet::new();
        for (index, row) in self.rows.iter().enumerate().skip(range.start).take(range.len()) {
            let renaming = self.state.renaming().filter(|r| r.node == row.id);
            let mut flags = row.flags;
            flags.set(RowFlags::RENAMING, renaming.is_some());
            let draggable = if row.is_selected() {
                !root_selected
            } else {
                row.id != root
            };
            let region = |position| {
                self.drag
                    .as_ref()
                    .map(|drag| drag.region(row.id, position))
                    .unwrap_or_default()
            };
            let offset = index as f64 * size;
            let fields = RowFields {
                id: row.id,
                name: row.name.clone(),
                depth: row.depth,
                flags,
                before: region(DropPosition::Before),
                after: region(DropPosition::After),
                on: region(DropPosition::On),
                draggable,
                has_toggle: !row.is_leaf(),
                rename_value: renaming.map(|r| r.value.clone()),
            };
            window.insert(row.id);
            out.push(RenderedRow {
                id: row.id,
                index,
                offset,
                markup: binding.bind(fields),
            });
        }
        binding.retain(&window);
        tracing::trace!(start = range.start, rendered = out.len(), "render");
        out
    }

    // --- Scrolling ---

    /// Report a new viewport measurement.
    pub fn set_viewport(&mut self, size: Size) {
        self.list.set_viewport(size);
    }

    /// Current scroll offset.
    pub fn scroll_offset(&self) -> f64 {
        self.list.scroll_offset()
    }

    /// Scroll to an absolute offset.
    pub fn scroll_to(&mut self, offset: f64) {
        self.list.scroll_to_offset(offset);
    }

    /// Scroll to the row at `index`.
    pub fn scroll_to_row(&mut self, index: usize, align: Align) {
        self.list.scroll_to_index(index, align);
    }

    /// Scroll to `id`'s row. Returns the row index.
    ///
    /// Rows hidden under a collapsed ancestor are not addressable and yield
    /// [`ScrollError::Hidden`]; nothing is expanded implicitly. Call
    /// [`reveal_node`](Self::reveal_node) first to make them visible.
    pub fn scroll_to_node<H: Hierarchy<Key = K>>(
        &mut self,
        h: &H,
        id: K,
        align: Align,
    ) -> Result<usize, ScrollError<K>> {
        self.sync(h);
        if let Some(index) = self.row_index(id) {
            tracing::debug!(node = ?id, index, ?align, "scroll to node");
            self.list.scroll_to_index(index, align);
            return Ok(index);
        }
        if find_node(h, id).is_some() {
            Err(ScrollError::Hidden(id))
        } else {
            Err(ScrollError::NotFound(id))
        }
    }

    /// Expand every ancestor of `id` so that its row becomes visible.
    ///
    /// Returns false if `id` is not in the tree.
    pub fn reveal_node<H: Hierarchy<Key = K>>(&mut self, h: &H, id: K) -> bool {
        let Some(path) = path_to(h, id) else {
            return false;
        };
        if let Some((_, ancestors)) = path.split_last() {
            for &ancestor in ancestors {
                self.state.expand(ancestor);
            }
        }
        true
    }

    // --- Host outbox ---

    /// Drain queued events.
    pub fn take_events(&mut self) -> Vec<TreeEvent<K>> {
        self.state.take_events()
    }

    /// Take the pending input-focus request.
    pub fn take_focus_request(&mut self) -> Option<K> {
        self.state.take_focus_request()
    }
}
