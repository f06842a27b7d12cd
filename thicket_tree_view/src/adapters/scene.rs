// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hierarchy contract for Thicket Scene.
//!
//! ## Feature
//!
//! Enable with `scene_adapter` (on by default).
//!
//! ## Notes
//!
//! Reparenting goes through [`Scene::reparent`], which keeps world transforms
//! unchanged and refreshes the world caches before returning.

use thicket_scene::{NodeId, Scene, SceneError};

use crate::hierarchy::{Hierarchy, Reparent};

impl Hierarchy for Scene {
    type Key = NodeId;

    fn root(&self) -> NodeId {
        Self::root(self)
    }

    fn contains(&self, node: NodeId) -> bool {
        self.is_alive(node)
    }

    fn name(&self, node: NodeId) -> Option<&str> {
        Self::name(self, node)
    }

    fn children(&self, node: NodeId) -> &[NodeId] {
        Self::children(self, node)
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        Self::parent(self, node)
    }
}

impl Reparent for Scene {
    type Error = SceneError;

    fn reparent(
        &mut self,
        nodes: &[NodeId],
        parent: NodeId,
        before: Option<NodeId>,
    ) -> Result<(), SceneError> {
        Self::reparent(self, nodes, parent, before)
    }

    fn rename(&mut self, node: NodeId, name: &str) -> bool {
        self.set_name(node, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drop::plan_drop;
    use crate::types::DropPosition;
    use crate::walk::flatten;
    use alloc::collections::BTreeSet;
    use alloc::vec;
    use alloc::vec::Vec;
    use kurbo::{Affine, Point, Vec2};
    use thicket_scene::SceneNode;

    fn scene() -> (Scene, [NodeId; 3]) {
        let mut scene = Scene::new("Scene");
        let root = scene.root();
        let a = scene.insert(
            root,
            SceneNode {
                name: "A".into(),
                local_transform: Affine::translate(Vec2::new(100.0, 0.0)),
            },
        );
        let b = scene.insert(a, SceneNode::named("B"));
        let c = scene.insert(
            root,
            SceneNode {
                name: "C".into(),
                local_transform: Affine::translate(Vec2::new(0.0, 50.0)),
            },
        );
        let _ = scene.commit();
        (scene, [a, b, c])
    }

    #[test]
    fn scene_flattens_like_any_hierarchy() {
        let (scene, [a, b, c]) = scene();
        let expanded = BTreeSet::from([a]);
        let rows = flatten(&scene, &expanded, &BTreeSet::new(), None, None);
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Scene", "A", "B", "C"]);
        assert_eq!(rows[2].id, b);
        assert_eq!(rows[3].id, c);
    }

    #[test]
    fn drop_on_keeps_world_placement() {
        let (mut scene, [a, b, c]) = scene();
        let plan = plan_drop(&scene, &BTreeSet::from([c]), Some(a), DropPosition::On).unwrap();
        plan.apply(&mut scene).unwrap();

        assert_eq!(Hierarchy::children(&scene, a), &[b, c]);
        assert_eq!(Hierarchy::children(&scene, scene.root()), &[a]);
        let world = scene.world_transform(c).unwrap() * Point::ORIGIN;
        assert!((world - Point::new(0.0, 50.0)).hypot() < 1e-9);
        let local = scene.local_transform(c).unwrap() * Point::ORIGIN;
        assert!((local - Point::new(-100.0, 50.0)).hypot() < 1e-9);
    }

    #[test]
    fn drop_after_lifts_child_to_root() {
        let (mut scene, [a, b, c]) = scene();
        let plan = plan_drop(&scene, &BTreeSet::from([b]), Some(a), DropPosition::After).unwrap();
        plan.apply(&mut scene).unwrap();
        assert_eq!(Hierarchy::children(&scene, scene.root()), &[a, b, c]);
        let world = scene.world_transform(b).unwrap() * Point::ORIGIN;
        assert!((world - Point::new(100.0, 0.0)).hypot() < 1e-9);
    }

    #[test]
    fn stale_ids_read_as_absent() {
        let (mut scene, [a, b, _]) = scene();
        scene.remove(a);
        assert!(!Hierarchy::contains(&scene, b));
        assert_eq!(Hierarchy::name(&scene, b), None);
        assert!(Hierarchy::children(&scene, a).is_empty());
        assert!(!Reparent::rename(&mut scene, a, "gone"));
    }

    #[test]
    fn stale_before_reference_fails_the_edit() {
        let (mut scene, [a, b, c]) = scene();
        let root = scene.root();
        let err = Reparent::reparent(&mut scene, &[c], root, Some(b));
        assert_eq!(err, Err(SceneError::BeforeNotFound(b)));
        assert_eq!(Hierarchy::children(&scene, root), &[a, c]);
    }
}
