// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A text-mode scene outliner driven by scripted gestures.
//!
//! Builds `Scene -> [A -> [B], C, Child0..Child249]`, then clicks, drags C onto A,
//! renames a node, and scrolls to `Child50`, printing the rendered window after each step.
//!
//! Run:
//! - `cargo run -p thicket_demos --example scene_outliner`
//! - `RUST_LOG=thicket_tree_view=debug cargo run -p thicket_demos --example scene_outliner`

use kurbo::{Affine, Point, Vec2};
use thicket_scene::{NodeId, Scene, SceneNode};
use thicket_tree_view::{
    Align, DropPosition, DropTarget, Modifiers, RowBinding, RowFields, RowFlags, TreeEvent,
    TreeProps, TreeView, TreeViewConfig,
};
use tracing_subscriber::EnvFilter;

/// Host state: the scene plus the selection the tree view reports into.
struct Host {
    scene: Scene,
    selected: Vec<NodeId>,
    active: Option<NodeId>,
}

impl Host {
    fn props(&self) -> TreeProps<NodeId> {
        TreeProps {
            selected: self.selected.iter().copied().collect(),
            active: self.active,
        }
    }

    fn apply(&mut self, events: Vec<TreeEvent<NodeId>>) {
        for event in events {
            match event {
                TreeEvent::ToggleSelected(id) => {
                    if let Some(at) = self.selected.iter().position(|s| *s == id) {
                        self.selected.remove(at);
                    } else {
                        self.selected.push(id);
                    }
                    self.active = self.selected.last().copied();
                }
                TreeEvent::AddSelected(id) => {
                    if !self.selected.contains(&id) {
                        self.selected.push(id);
                    }
                    self.active = Some(id);
                }
                TreeEvent::SetSelected(id) => {
                    self.selected = vec![id];
                    self.active = Some(id);
                }
                TreeEvent::Activate(id) => {
                    tracing::info!(node = ?id, name = ?self.scene.name(id), "focus requested");
                }
                TreeEvent::Rename { node, name } => {
                    self.scene.set_name(node, name);
                }
                TreeEvent::Drop { target, position, .. } => {
                    tracing::info!(?target, ?position, "dropped");
                }
            }
        }
    }
}

fn row_text(f: &RowFields<NodeId>) -> String {
    let toggle = match (f.has_toggle, f.flags.contains(RowFlags::EXPANDED)) {
        (false, _) => ' ',
        (true, true) => 'v',
        (true, false) => '>',
    };
    let mark = if f.flags.contains(RowFlags::ACTIVE) {
        '*'
    } else if f.flags.contains(RowFlags::SELECTED) {
        '+'
    } else {
        ' '
    };
    let drop = if f.on.can_drop && f.on.is_over {
        "  <- drop here"
    } else {
        ""
    };
    let label = match &f.rename_value {
        Some(value) => format!("[{value}_]"),
        None => f.name.clone(),
    };
    format!("{mark} {}{toggle} {label}{drop}", "  ".repeat(f.depth))
}

fn print_window(
    title: &str,
    host: &Host,
    view: &mut TreeView<NodeId>,
    rows: &mut RowBinding<NodeId, fn(&RowFields<NodeId>) -> String>,
) {
    println!("-- {title} (offset {:.0})", view.scroll_offset());
    for row in view.render(&host.scene, rows) {
        println!("{:>4} {}", row.index, row.markup);
    }
    println!(
        "   cache: {} hits, {} misses",
        rows.cache().hits(),
        rows.cache().misses()
    );
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut scene = Scene::new("Scene");
    let root = scene.root();
    let a = scene.insert(
        root,
        SceneNode {
            name: "Object3D A".into(),
            local_transform: Affine::translate(Vec2::new(40.0, 10.0)),
        },
    );
    scene.insert(a, SceneNode::named("Object3D B"));
    let c = scene.insert(
        root,
        SceneNode {
            name: "Object3D C".into(),
            local_transform: Affine::translate(Vec2::new(-8.0, 25.0)),
        },
    );
    for i in 0..250 {
        scene.insert(root, SceneNode::named(format!("Child{i}")));
    }
    let _ = scene.commit();

    let mut host = Host {
        scene,
        selected: Vec::new(),
        active: None,
    };
    let mut view = TreeView::new(TreeViewConfig {
        item_size: 32.0,
        overscan_count: 1,
        default_height: 192.0,
        default_width: 240.0,
        ..Default::default()
    });
    let mut rows = RowBinding::new(row_text as fn(&RowFields<NodeId>) -> String);
    view.update(&host.scene, host.props());
    print_window("initial", &host, &mut view, &mut rows);

    // Click A, shift-click C.
    view.pointer_down(&host.scene, a, 1, Modifiers::empty());
    host.apply(view.take_events());
    view.update(&host.scene, host.props());
    view.pointer_down(&host.scene, c, 1, Modifiers::SHIFT);
    host.apply(view.take_events());
    view.update(&host.scene, host.props());
    print_window("selected A and C", &host, &mut view, &mut rows);

    // Select C alone and drag it onto A.
    view.pointer_down(&host.scene, c, 1, Modifiers::empty());
    host.apply(view.take_events());
    view.update(&host.scene, host.props());
    let before = host.scene.world_transform(c).unwrap_or_default() * Point::ORIGIN;
    if view.begin_drag(&host.scene, c) {
        let over_a = DropTarget::Row {
            node: a,
            position: DropPosition::On,
        };
        view.drag_over(&host.scene, over_a);
        print_window("dragging C over A", &host, &mut view, &mut rows);
        if let Some(plan) = view.drop(&host.scene) {
            if let Err(err) = plan.apply(&mut host.scene) {
                tracing::error!(%err, "drop could not be applied");
            }
        }
        host.apply(view.take_events());
    }
    view.expand(a);
    view.update(&host.scene, host.props());
    let after = host.scene.world_transform(c).unwrap_or_default() * Point::ORIGIN;
    println!("C world origin: {before:?} -> {after:?}");
    print_window("C moved under A", &host, &mut view, &mut rows);

    // Rename B in place.
    if let Some(b) = host.scene.find_by_name("Object3D B") {
        view.begin_rename(&host.scene, b);
        view.rename_input("Camera");
        print_window("renaming B", &host, &mut view, &mut rows);
        view.rename_blur();
        host.apply(view.take_events());
        view.update(&host.scene, host.props());
    }

    // Scroll to Child50, as the demo button does.
    if let Some(child) = host.scene.find_by_name("Child50") {
        match view.scroll_to_node(&host.scene, child, Align::Start) {
            Ok(index) => println!("scrolled to row {index}"),
            Err(err) => println!("cannot scroll: {err}"),
        }
    }
    print_window("scrolled to Child50", &host, &mut view, &mut rows);
}
