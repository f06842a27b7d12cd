// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed-row-height windowing.

use core::ops::Range;

use kurbo::Size;

use crate::Virtualizer;
use crate::types::{Align, ListConfig};

/// A list whose rows all share one height.
///
/// Row geometry is arithmetic: row `i` spans `[i * item_size, (i + 1) * item_size)`.
/// The scroll offset is always clamped to `[0, max_offset]`, including after
/// the item count or viewport shrinks.
#[derive(Clone, Debug)]
pub struct FixedSizeList {
    config: ListConfig,
    item_count: usize,
    viewport: Size,
    offset: f64,
}

impl FixedSizeList {
    /// Create an empty list using `config`'s default viewport size.
    pub fn new(config: ListConfig) -> Self {
        Self {
            config,
            item_count: 0,
            viewport: config.default_size,
            offset: 0.0,
        }
    }

    /// The list configuration.
    pub fn config(&self) -> &ListConfig {
        &self.config
    }

    /// Current viewport size.
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Total scrollable height of all rows.
    pub fn total_size(&self) -> f64 {
        self.config.item_size.max(0.0) * self.item_count as f64
    }

    /// Largest valid scroll offset.
    pub fn max_offset(&self) -> f64 {
        (self.total_size() - self.viewport.height).max(0.0)
    }

    /// Top edge of row `index`.
    pub fn item_offset(&self, index: usize) -> f64 {
        self.config.item_size * index as f64
    }

    /// Rows intersecting the viewport, without overscan.
    pub fn visible_range(&self) -> Range<usize> {
        let size = self.config.item_size;
        if size <= 0.0 || self.item_count == 0 || self.viewport.height <= 0.0 {
            return 0..0;
        }
        let start = floor_index(self.offset / size).min(self.item_count);
        let end = ceil_index((self.offset + self.viewport.height) / size).min(self.item_count);
        start..end
    }

    fn clamp_offset(&mut self) {
        self.offset = self.offset.clamp(0.0, self.max_offset());
    }
}

impl Default for FixedSizeList {
    fn default() -> Self {
        Self::new(ListConfig::default())
    }
}

impl Virtualizer for FixedSizeList {
    fn set_item_count(&mut self, count: usize) {
        self.item_count = count;
        self.clamp_offset();
    }

    fn item_count(&self) -> usize {
        self.item_count
    }

    fn set_viewport(&mut self, size: Size) {
        self.viewport = size;
        self.clamp_offset();
    }

    fn scroll_offset(&self) -> f64 {
        self.offset
    }

    fn scroll_to_offset(&mut self, offset: f64) {
        self.offset = offset;
        self.clamp_offset();
        tracing::trace!(offset = self.offset, "scroll to offset");
    }

    fn scroll_to_index(&mut self, index: usize, align: Align) {
        if self.item_count == 0 {
            return;
        }
        let index = index.min(self.item_count - 1);
        let size = self.config.item_size;
        let height = self.viewport.height;
        let top = self.item_offset(index);
        let bottom = top + size;
        let target = match align {
            Align::Start => top,
            Align::End => bottom - height,
            Align::Center => top - (height - size) / 2.0,
            Align::Auto => {
                if top < self.offset {
                    top
                } else if bottom > self.offset + height {
                    bottom - height
                } else {
                    self.offset
                }
            }
        };
        self.offset = target;
        self.clamp_offset();
        tracing::trace!(index, ?align, offset = self.offset, "scroll to index");
    }

    fn rendered_range(&self) -> Range<usize> {
        let visible = self.visible_range();
        if visible.is_empty() {
            return visible;
        }
        let overscan = self.config.overscan_count;
        let start = visible.start.saturating_sub(overscan);
        let end = visible.end.saturating_add(overscan).min(self.item_count);
        start..end
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "Callers pass non-negative, finite row positions."
)]
fn floor_index(pos: f64) -> usize {
    pos as usize
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "Callers pass non-negative, finite row positions."
)]
fn ceil_index(pos: f64) -> usize {
    let whole = pos as usize;
    if (whole as f64) < pos { whole + 1 } else { whole }
}
