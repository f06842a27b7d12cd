// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::Size;
use thicket_scene::{NodeId, Scene, SceneNode};
use thicket_tree_view::{Align, RowBinding, RowFields, TreeProps, TreeView, TreeViewConfig};

fn outliner(rows: usize) -> (Scene, TreeView<NodeId>) {
    let mut scene = Scene::new("Scene");
    let root = scene.root();
    for i in 0..rows {
        scene.insert(root, SceneNode::named(format!("Child{i}")));
    }
    let mut view = TreeView::new(TreeViewConfig::default());
    view.set_viewport(Size::new(240.0, 640.0));
    view.update(&scene, TreeProps::default());
    (scene, view)
}

fn label(f: &RowFields<NodeId>) -> String {
    format!("{}{}", "  ".repeat(f.depth), f.name)
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_window");
    let (scene, mut view) = outliner(100_000);

    // Same window every time: every row comes from the cache.
    let mut warm = RowBinding::new(label);
    view.render(&scene, &mut warm);
    group.bench_function("steady", |b| {
        b.iter(|| black_box(view.render(&scene, &mut warm)).len());
    });

    // One-row scroll steps: only the row entering the window is rendered.
    group.bench_function("scroll_step", |b| {
        let mut binding = RowBinding::new(label);
        let mut top = 0_usize;
        b.iter(|| {
            top = (top + 1) % 90_000;
            view.scroll_to_row(top, Align::Start);
            black_box(view.render(&scene, &mut binding)).len()
        });
    });

    // Cold cache: every row in the window is rendered.
    group.bench_function("cold", |b| {
        b.iter_batched(
            || RowBinding::new(label),
            |mut binding| black_box(view.render(&scene, &mut binding)).len(),
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

fn bench_sync(c: &mut Criterion) {
    let mut group = c.benchmark_group("sync");
    let (scene, mut view) = outliner(100_000);
    let first = scene.children(scene.root())[0];
    // Each toggle is one discrete change, so each sync flattens exactly once.
    group.bench_function("toggle_focus_100k", |b| {
        let mut flip = false;
        b.iter(|| {
            flip = !flip;
            if flip {
                view.set_focused(first);
            } else {
                view.set_focused(scene.root());
            }
            black_box(view.sync(&scene))
        });
    });
    group.finish();
}

criterion_group!(benches, bench_render, bench_sync);
criterion_main!(benches);
