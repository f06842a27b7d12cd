// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Test doubles for the hierarchy and virtualization collaborators.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::ops::Range;

use kurbo::Size;
use thicket_list::{Align, FixedSizeList, ListConfig, Virtualizer};

use crate::hierarchy::{Hierarchy, Reparent};

/// A bare arena hierarchy keyed by `u32`, without transforms.
#[derive(Clone, Debug, Default)]
pub(crate) struct Outline {
    root: u32,
    names: BTreeMap<u32, String>,
    children: BTreeMap<u32, Vec<u32>>,
    parents: BTreeMap<u32, u32>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum OutlineError {
    BeforeNotFound(u32),
}

impl Outline {
    pub(crate) fn new(root: u32, name: &str) -> Self {
        let mut outline = Self {
            root,
            ..Default::default()
        };
        outline.names.insert(root, name.to_string());
        outline.children.insert(root, Vec::new());
        outline
    }

    pub(crate) fn node(mut self, parent: u32, id: u32, name: &str) -> Self {
        self.names.insert(id, name.to_string());
        self.children.insert(id, Vec::new());
        self.children.entry(parent).or_default().push(id);
        self.parents.insert(id, parent);
        self
    }

    /// `0:root → [1:A → [2:B], 3:C]`
    pub(crate) fn abc() -> Self {
        Self::new(0, "root")
            .node(0, 1, "A")
            .node(1, 2, "B")
            .node(0, 3, "C")
    }

    pub(crate) fn remove(&mut self, id: u32) {
        if let Some(parent) = self.parents.remove(&id) {
            if let Some(siblings) = self.children.get_mut(&parent) {
                siblings.retain(|c| *c != id);
            }
        }
        let mut stack = alloc::vec![id];
        while let Some(next) = stack.pop() {
            self.names.remove(&next);
            self.parents.remove(&next);
            if let Some(kids) = self.children.remove(&next) {
                stack.extend(kids);
            }
        }
    }
}

impl Hierarchy for Outline {
    type Key = u32;

    fn root(&self) -> u32 {
        self.root
    }

    fn contains(&self, node: u32) -> bool {
        self.names.contains_key(&node)
    }

    fn name(&self, node: u32) -> Option<&str> {
        self.names.get(&node).map(String::as_str)
    }

    fn children(&self, node: u32) -> &[u32] {
        self.children.get(&node).map(Vec::as_slice).unwrap_or(&[])
    }

    fn parent(&self, node: u32) -> Option<u32> {
        self.parents.get(&node).copied()
    }
}

impl Reparent for Outline {
    type Error = OutlineError;

    fn reparent(
        &mut self,
        nodes: &[u32],
        parent: u32,
        before: Option<u32>,
    ) -> Result<(), OutlineError> {
        let remaining: Vec<u32> = self
            .children(parent)
            .iter()
            .copied()
            .filter(|c| !nodes.contains(c))
            .collect();
        let at = match before {
            Some(b) => remaining
                .iter()
                .position(|c| *c == b)
                .ok_or(OutlineError::BeforeNotFound(b))?,
            None => remaining.len(),
        };
        for &node in nodes {
            if let Some(old) = self.parents.insert(node, parent) {
                if let Some(siblings) = self.children.get_mut(&old) {
                    siblings.retain(|c| *c != node);
                }
            }
        }
        let mut next = remaining;
        next.splice(at..at, nodes.iter().copied());
        self.children.insert(parent, next);
        Ok(())
    }

    fn rename(&mut self, node: u32, name: &str) -> bool {
        match self.names.get_mut(&node) {
            Some(n) => {
                *n = name.to_string();
                true
            }
            None => false,
        }
    }
}

/// Wraps a [`FixedSizeList`] and records every scroll request.
#[derive(Debug)]
pub(crate) struct RecordingList {
    pub(crate) inner: FixedSizeList,
    pub(crate) index_requests: Vec<(usize, Align)>,
    pub(crate) offset_requests: Vec<f64>,
}

impl RecordingList {
    pub(crate) fn new(rows_high: f64) -> Self {
        Self {
            inner: FixedSizeList::new(ListConfig {
                item_size: 10.0,
                overscan_count: 1,
                default_size: Size::new(100.0, rows_high * 10.0),
            }),
            index_requests: Vec::new(),
            offset_requests: Vec::new(),
        }
    }
}

impl Virtualizer for RecordingList {
    fn set_item_count(&mut self, count: usize) {
        self.inner.set_item_count(count);
    }

    fn item_count(&self) -> usize {
        self.inner.item_count()
    }

    fn set_viewport(&mut self, size: Size) {
        self.inner.set_viewport(size);
    }

    fn scroll_offset(&self) -> f64 {
        self.inner.scroll_offset()
    }

    fn scroll_to_offset(&mut self, offset: f64) {
        self.offset_requests.push(offset);
        self.inner.scroll_to_offset(offset);
    }

    fn scroll_to_index(&mut self, index: usize, align: Align) {
        self.index_requests.push((index, align));
        self.inner.scroll_to_index(index, align);
    }

    fn rendered_range(&self) -> Range<usize> {
        self.inner.rendered_range()
    }
}
