// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visible-window example: a fixed-height list, then the same windowing behind a tree view.
//!
//! Run:
//! - `cargo run -p thicket_demos --example visible_window`

use kurbo::Size;
use thicket_list::{Align, FixedSizeList, ListConfig, Virtualizer};
use thicket_scene::{NodeId, Scene, SceneNode};
use thicket_tree_view::{RowBinding, RowFields, TreeProps, TreeView, TreeViewConfig};

const ROW_H: f64 = 20.0;
const WIDTH: f64 = 200.0;

fn print_range(list: &FixedSizeList, label: &str) {
    let visible = list.visible_range();
    let rendered = list.rendered_range();
    println!(
        "{label:>10}: offset={:>6.0} visible={visible:?} rendered={rendered:?}",
        list.scroll_offset()
    );
}

fn main() {
    let mut list = FixedSizeList::new(ListConfig {
        item_size: ROW_H,
        overscan_count: 2,
        default_size: Size::new(WIDTH, 100.0),
    });
    list.set_item_count(1000);
    println!(
        "1000 rows of {ROW_H}px: total {} px, max offset {} px",
        list.total_size(),
        list.max_offset()
    );
    print_range(&list, "top");

    list.scroll_to_offset(190.0);
    print_range(&list, "offset 190");

    list.scroll_to_index(500, Align::Center);
    print_range(&list, "center 500");

    list.scroll_to_index(498, Align::Auto);
    print_range(&list, "auto 498");

    list.scroll_to_offset(1.0e9);
    print_range(&list, "clamped");

    list.set_viewport(Size::new(WIDTH, 400.0));
    print_range(&list, "taller");

    // The same windowing drives a tree view; only rows inside the window are rendered.
    let mut scene = Scene::new("root");
    let root = scene.root();
    for i in 0..1000 {
        let group = scene.insert(root, SceneNode::named(format!("group{i}")));
        scene.insert(group, SceneNode::named(format!("item{i}")));
    }
    let mut view = TreeView::new(TreeViewConfig {
        item_size: ROW_H,
        default_height: 100.0,
        default_width: WIDTH,
        ..Default::default()
    });
    view.update(&scene, TreeProps::default());
    let mut rows = RowBinding::new(|f: &RowFields<NodeId>| {
        format!("{}{}", "  ".repeat(f.depth), f.name)
    });

    view.scroll_to_row(500, Align::Start);
    for row in view.render(&scene, &mut rows) {
        println!("{:>6.0} {}", row.offset, row.markup);
    }

    // Expanding a group above the window shifts every row below it by one.
    if let Some(group) = scene.find_by_name("group10") {
        view.expand(group);
    }
    let window = view.render(&scene, &mut rows);
    println!(
        "after expanding group10: first rendered row {} is {:?}; {} cached, {} rendered so far",
        window.first().map_or(0, |r| r.index),
        window.first().map(|r| r.markup.as_str()),
        rows.cache().len(),
        rows.cache().misses()
    );
}
