// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration and alignment types shared by list virtualizers.

use kurbo::Size;

/// Where a row should land in the viewport when scrolling to it.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Align {
    /// Row top aligned with the viewport top.
    Start,
    /// Row centered in the viewport.
    Center,
    /// Row bottom aligned with the viewport bottom.
    End,
    /// Scroll the minimum distance that makes the row fully visible.
    /// Rows that are already fully visible do not scroll.
    #[default]
    Auto,
}

/// Sizing options for a fixed-row-height list.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ListConfig {
    /// Height of every row, in pixels. Non-positive sizes render nothing.
    pub item_size: f64,
    /// Extra rows rendered beyond each edge of the viewport.
    pub overscan_count: usize,
    /// Viewport size used until the host reports a measurement.
    pub default_size: Size,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            item_size: 32.0,
            overscan_count: 2,
            default_size: Size::ZERO,
        }
    }
}
