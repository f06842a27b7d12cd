// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::collections::BTreeSet;

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use thicket_scene::{NodeId, Scene, SceneNode};
use thicket_tree_view::{descendant_ids, flatten, selection_roots};

/// Root with `n` leaf children.
fn wide(n: usize) -> Scene {
    let mut scene = Scene::new("root");
    let root = scene.root();
    for i in 0..n {
        scene.insert(root, SceneNode::named(format!("n{i}")));
    }
    scene
}

/// Complete tree with the given fan-out and depth (root at depth 0).
fn bushy(fanout: usize, depth: usize) -> (Scene, Vec<NodeId>) {
    let mut scene = Scene::new("root");
    let mut all = vec![scene.root()];
    let mut level = vec![scene.root()];
    for d in 0..depth {
        let mut next = Vec::with_capacity(level.len() * fanout);
        for &parent in &level {
            for i in 0..fanout {
                let id = scene.insert(parent, SceneNode::named(format!("d{d}-{i}")));
                next.push(id);
            }
        }
        all.extend_from_slice(&next);
        level = next;
    }
    (scene, all)
}

fn bench_wide(c: &mut Criterion) {
    let mut group = c.benchmark_group("flatten_wide");
    for n in [1_000_usize, 10_000, 100_000] {
        let scene = wide(n);
        let none = BTreeSet::new();
        group.throughput(Throughput::Elements(n as u64 + 1));
        group.bench_function(format!("children_{n}"), |b| {
            b.iter(|| black_box(flatten(&scene, &none, &none, None, None)).len());
        });
    }
    group.finish();
}

fn bench_bushy(c: &mut Criterion) {
    let mut group = c.benchmark_group("flatten_bushy");
    let (scene, all) = bushy(8, 5);
    let none = BTreeSet::new();
    let everything: BTreeSet<NodeId> = all.iter().copied().collect();

    // Only the root's children are visible; the collapsed bulk must not cost anything.
    group.bench_function("collapsed_37449", |b| {
        b.iter(|| black_box(flatten(&scene, &none, &none, None, None)).len());
    });
    group.throughput(Throughput::Elements(all.len() as u64));
    group.bench_function("expanded_37449", |b| {
        b.iter(|| black_box(flatten(&scene, &everything, &none, None, None)).len());
    });
    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("subtree_queries");
    let (scene, all) = bushy(8, 5);
    let selection: BTreeSet<NodeId> = all.iter().copied().step_by(7).collect();
    group.bench_function("descendant_ids_root", |b| {
        b.iter(|| black_box(descendant_ids(&scene, scene.root())).len());
    });
    group.bench_function("selection_roots_sparse", |b| {
        b.iter(|| black_box(selection_roots(&scene, &selection)).len());
    });
    group.finish();
}

criterion_group!(benches, bench_wide, bench_bushy, bench_queries);
criterion_main!(benches);
