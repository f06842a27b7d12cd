// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=thicket_list --heading-base-level=0

//! Thicket List: windowing for long lists of fixed-height rows.
//!
//! ## Overview
//!
//! A virtualized list renders only the rows that intersect its viewport (plus a few overscan
//! rows on each side).
//! This crate computes those ranges and owns the scroll offset; it does not draw anything.
//! The host keeps its own row data and asks for [`Virtualizer::rendered_range`] each frame.
//!
//! ## Scrolling
//!
//! - [`Virtualizer::scroll_to_offset`] sets the offset directly (clamped to the content).
//! - [`Virtualizer::scroll_to_index`] brings a row into view with an [`Align`] policy.
//!
//! ## Example
//!
//! ```
//! use kurbo::Size;
//! use thicket_list::{Align, FixedSizeList, ListConfig, Virtualizer};
//!
//! let mut list = FixedSizeList::new(ListConfig {
//!     item_size: 20.0,
//!     overscan_count: 1,
//!     default_size: Size::new(200.0, 100.0),
//! });
//! list.set_item_count(1000);
//! assert_eq!(list.visible_range(), 0..5);
//!
//! list.scroll_to_index(500, Align::Start);
//! assert_eq!(list.visible_range(), 500..505);
//! assert_eq!(list.rendered_range(), 499..506);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod fixed;
mod types;

use core::ops::Range;

use kurbo::Size;

pub use fixed::FixedSizeList;
pub use types::{Align, ListConfig};

/// The windowing operations a tree view drives.
///
/// [`FixedSizeList`] is the stock implementation; hosts with their own scroll
/// containers can implement this instead.
pub trait Virtualizer {
    /// Set the number of rows in the list.
    fn set_item_count(&mut self, count: usize);
    /// Number of rows in the list.
    fn item_count(&self) -> usize;
    /// Report a new viewport measurement.
    fn set_viewport(&mut self, size: Size);
    /// Current scroll offset, in pixels from the top of the first row.
    fn scroll_offset(&self) -> f64;
    /// Scroll to an absolute offset.
    fn scroll_to_offset(&mut self, offset: f64);
    /// Scroll so that row `index` lands according to `align`.
    fn scroll_to_index(&mut self, index: usize, align: Align);
    /// Rows that should be rendered: the visible rows plus overscan.
    fn rendered_range(&self) -> Range<usize>;
}
