// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The interaction state store: expansion, focus, and rename state.
//!
//! Selection is not stored here. Selection gestures become [`TreeEvent`]s for
//! the host, which feeds the new selection back in as props.
//!
//! Every command that changes visible state bumps [`InteractionState::revision`],
//! which is how the facade knows to flatten again.

use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::vec::Vec;
use core::mem;

use crate::hierarchy::Hierarchy;
use crate::types::{FlatRow, Key, Modifiers, TreeEvent};
use crate::walk::{descendant_ids, find_node};

/// The editable name field of the row being renamed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenameField<K> {
    /// Node being renamed.
    pub node: K,
    /// Current text of the field.
    pub value: String,
}

/// View-local interaction state.
#[derive(Clone, Debug)]
pub struct InteractionState<K> {
    expanded: BTreeSet<K>,
    focused: Option<K>,
    renaming: Option<RenameField<K>>,
    focus_request: Option<K>,
    events: Vec<TreeEvent<K>>,
    revision: u64,
}

impl<K> Default for InteractionState<K> {
    fn default() -> Self {
        Self {
            expanded: BTreeSet::new(),
            focused: None,
            renaming: None,
            focus_request: None,
            events: Vec::new(),
            revision: 0,
        }
    }
}

impl<K: Copy + Ord + core::fmt::Debug> InteractionState<K> {
    /// Create an empty state: nothing expanded, focused, or renaming.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bumped on every change that can alter the flattened rows.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The expansion set.
    pub fn expanded(&self) -> &BTreeSet<K> {
        &self.expanded
    }

    /// Returns true if `id` is in the expansion set.
    pub fn is_expanded(&self, id: K) -> bool {
        self.expanded.contains(&id)
    }

    /// The row holding keyboard focus.
    pub fn focused(&self) -> Option<K> {
        self.focused
    }

    /// The active rename, if any.
    pub fn renaming(&self) -> Option<&RenameField<K>> {
        self.renaming.as_ref()
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    // --- Selection intents ---

    /// Ask the host to flip `id`'s selection membership.
    pub fn toggle_selected(&mut self, id: K) {
        self.events.push(TreeEvent::ToggleSelected(id));
    }

    /// Ask the host to add `id` to the selection.
    pub fn add_selected(&mut self, id: K) {
        self.events.push(TreeEvent::AddSelected(id));
    }

    /// Ask the host to select exactly `id`.
    pub fn set_selected(&mut self, id: K) {
        self.events.push(TreeEvent::SetSelected(id));
    }

    /// Report a double click on `id`.
    pub fn activate(&mut self, id: K) {
        self.events.push(TreeEvent::Activate(id));
    }

    /// Queue an arbitrary event for the host.
    pub fn emit(&mut self, event: TreeEvent<K>) {
        self.events.push(event);
    }

    /// Drain queued events in emission order.
    pub fn take_events(&mut self) -> Vec<TreeEvent<K>> {
        mem::take(&mut self.events)
    }

    // --- Expansion ---

    /// Expand `id`. Expanding twice is the same as expanding once.
    pub fn expand(&mut self, id: K) {
        if self.expanded.insert(id) {
            self.touch();
        }
    }

    /// Collapse `id`. Collapsing twice is the same as collapsing once.
    pub fn collapse(&mut self, id: K) {
        if self.expanded.remove(&id) {
            self.touch();
        }
    }

    /// Expand `id` and every node beneath it.
    pub fn expand_subtree<H: Hierarchy<Key = K>>(&mut self, h: &H, id: K) {
        if find_node(h, id).is_none() {
            return;
        }
        let before = self.expanded.len();
        self.expanded.insert(id);
        self.expanded.extend(descendant_ids(h, id));
        if self.expanded.len() != before {
            self.touch();
        }
    }

    /// Collapse `id` and every node beneath it.
    pub fn collapse_subtree<H: Hierarchy<Key = K>>(&mut self, h: &H, id: K) {
        let mut subtree = descendant_ids(h, id);
        subtree.insert(id);
        let before = self.expanded.len();
        self.expanded.retain(|e| !subtree.contains(e));
        if self.expanded.len() != before {
            self.touch();
        }
    }

    /// Expand every non-leaf row in `rows`.
    ///
    /// Nodes hidden under collapsed ancestors are not in `rows` and stay as they are;
    /// use [`expand_everything`](Self::expand_everything) to reach them.
    pub fn expand_all(&mut self, rows: &[FlatRow<K>]) {
        let before = self.expanded.len();
        self.expanded
            .extend(rows.iter().filter(|r| !r.is_leaf()).map(|r| r.id));
        if self.expanded.len() != before {
            self.touch();
        }
    }

    /// Expand every non-leaf node reachable from the root.
    pub fn expand_everything<H: Hierarchy<Key = K>>(&mut self, h: &H) {
        let before = self.expanded.len();
        let mut stack = alloc::vec![h.root()];
        while let Some(node) = stack.pop() {
            let children = h.children(node);
            if !children.is_empty() {
                self.expanded.insert(node);
                stack.extend_from_slice(children);
            }
        }
        if self.expanded.len() != before {
            self.touch();
        }
    }

    /// Collapse everything.
    pub fn collapse_all(&mut self) {
        if !self.expanded.is_empty() {
            self.expanded.clear();
            self.touch();
        }
    }

    // --- Focus ---

    /// Move keyboard focus to `id` and request input focus for its row.
    pub fn set_focused(&mut self, id: K) {
        self.focus_request = Some(id);
        if self.focused != Some(id) {
            self.focused = Some(id);
            self.touch();
        }
    }

    /// Take the pending input-focus request, if any.
    ///
    /// The host moves platform focus to this row once it is rendered.
    pub fn take_focus_request(&mut self) -> Option<K> {
        self.focus_request.take()
    }

    // --- Rename ---

    /// Show an editable name field on `id`, seeded with `name`.
    pub fn begin_rename(&mut self, id: K, name: &str) {
        self.renaming = Some(RenameField {
            node: id,
            value: String::from(name),
        });
        self.touch();
    }

    /// Replace the text of the name field.
    pub fn rename_input(&mut self, value: &str) {
        if let Some(field) = &mut self.renaming {
            if field.value != value {
                field.value.clear();
                field.value.push_str(value);
                self.touch();
            }
        }
    }

    /// Discard the name field without renaming.
    pub fn cancel_rename(&mut self) {
        if self.renaming.take().is_some() {
            self.touch();
        }
    }

    /// Commit `name` for `id`.
    ///
    /// Only takes effect while `id` is being renamed; otherwise (including after
    /// [`cancel_rename`](Self::cancel_rename)) this does nothing and returns false.
    pub fn commit_rename(&mut self, id: K, name: &str) -> bool {
        if self.renaming.as_ref().map(|f| f.node) != Some(id) {
            return false;
        }
        self.renaming = None;
        tracing::debug!(node = ?id, name, "rename");
        self.events.push(TreeEvent::Rename {
            node: id,
            name: String::from(name),
        });
        self.touch();
        true
    }

    /// Commit the field's current text. Enter and blur both end up here.
    pub fn commit_rename_field(&mut self) -> bool {
        let Some(field) = self.renaming.as_ref() else {
            return false;
        };
        let (node, value) = (field.node, field.value.clone());
        self.commit_rename(node, &value)
    }

    /// Keys pressed inside the name field.
    pub fn rename_key(&mut self, key: Key) {
        match key {
            Key::Escape => self.cancel_rename(),
            Key::Enter => {
                self.commit_rename_field();
            }
            _ => {}
        }
    }

    /// The name field lost focus.
    pub fn rename_blur(&mut self) {
        self.commit_rename_field();
    }

    /// Forget focus and rename targets whose nodes left the tree.
    ///
    /// Expansion entries are kept so a node that comes back restores its state.
    pub fn prune<H: Hierarchy<Key = K>>(&mut self, h: &H) {
        if self.focused.is_some_and(|f| !h.contains(f)) {
            self.focused = None;
            self.touch();
        }
        if self.focus_request.is_some_and(|f| !h.contains(f)) {
            self.focus_request = None;
        }
        if self.renaming.as_ref().is_some_and(|r| !h.contains(r.node)) {
            self.renaming = None;
            self.touch();
        }
    }

    // --- Gestures ---

    /// Row keyboard protocol for the focused row at `index` of `rows`.
    pub fn row_key<H: Hierarchy<Key = K>>(
        &mut self,
        h: &H,
        rows: &[FlatRow<K>],
        index: usize,
        key: Key,
        modifiers: Modifiers,
    ) {
        let Some(row) = rows.get(index) else {
            return;
        };
        let id = row.id;
        let shift = modifiers.contains(Modifiers::SHIFT);
        match key {
            Key::ArrowDown => {
                if let Some(next) = rows.get(index + 1) {
                    if shift {
                        self.add_selected(id);
                    }
                    self.set_focused(next.id);
                }
            }
            Key::ArrowUp => {
                if let Some(prev) = index.checked_sub(1).and_then(|i| rows.get(i)) {
                    if shift {
                        self.add_selected(id);
                    }
                    self.set_focused(prev.id);
                }
            }
            Key::ArrowLeft if !row.is_leaf() => {
                if shift {
                    self.collapse_subtree(h, id);
                } else {
                    self.collapse(id);
                }
            }
            Key::ArrowRight if !row.is_leaf() => {
                if shift {
                    self.expand_subtree(h, id);
                } else {
                    self.expand(id);
                }
            }
            Key::Enter => {
                if shift {
                    self.toggle_selected(id);
                } else {
                    self.set_selected(id);
                }
            }
            _ => {}
        }
    }

    /// Pointer press on a row's body.
    ///
    /// `clicks` is the platform click count: 1 for a single click, 2 for a double click.
    pub fn row_pointer_down(&mut self, row: &FlatRow<K>, clicks: u8, modifiers: Modifiers) {
        match clicks {
            1 if modifiers.contains(Modifiers::SHIFT) => self.toggle_selected(row.id),
            1 if !row.is_selected() => self.set_selected(row.id),
            2 => self.activate(row.id),
            _ => {}
        }
    }

    /// Click on a row's expand toggle.
    pub fn toggle_click(&mut self, row: &FlatRow<K>) {
        if row.is_expanded() {
            self.collapse(row.id);
        } else {
            self.expand(row.id);
        }
    }
}
