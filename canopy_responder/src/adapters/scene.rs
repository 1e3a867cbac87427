// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree lookups for the Canopy scene graph.
//!
//! ## Feature
//!
//! Enable with `scene_adapter`.

use canopy_scene::{NodeId, Scene};
use kurbo::Point;

use crate::types::{ChildLookup, ParentLookup};

impl ParentLookup<NodeId> for Scene {
    fn parent_of(&self, node: &NodeId) -> Option<NodeId> {
        self.parent(*node)
    }
}

impl ChildLookup<NodeId> for Scene {
    fn children_of(&self, node: &NodeId) -> Vec<NodeId> {
        self.children(*node).to_vec()
    }
}

/// Root-to-target path under the global point `pt`.
///
/// Falls back to the stage root alone when nothing hittable is under the point, so pointer
/// events always have somewhere to go.
pub fn pointer_path(scene: &Scene, pt: Point) -> Vec<NodeId> {
    scene
        .hit_test(pt)
        .map_or_else(|| vec![scene.root()], |hit| hit.path)
}
