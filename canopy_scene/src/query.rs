// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Queries over the scene: transforms, hit testing and painting.

use canopy_mesh::Painter;
use kurbo::{Affine, Point};

use crate::scene::Scene;
use crate::types::{NodeFlags, NodeId};

/// Results of a hit test.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hit {
    /// The matched node.
    pub node: NodeId,
    /// Path from the stage root to node (inclusive).
    pub path: Vec<NodeId>,
}

const HITTABLE: NodeFlags = NodeFlags::VISIBLE
    .union(NodeFlags::TOUCHABLE)
    .union(NodeFlags::INTERACTABLE);

impl Scene {
    /// Local-to-global transform of `id`.
    pub fn world_transform(&self, id: NodeId) -> Option<Affine> {
        let mut tf = Affine::IDENTITY;
        for n in self.ancestors(id) {
            tf = self.node(n)?.local_transform() * tf;
        }
        self.is_alive(id).then_some(tf)
    }

    /// Product of the alphas of `id` and its ancestors.
    pub fn world_alpha(&self, id: NodeId) -> f64 {
        self.ancestors(id)
            .into_iter()
            .filter_map(|n| self.node(n))
            .map(|n| n.alpha())
            .product()
    }

    /// Map a global point into the local space of `id`.
    pub fn global_to_local(&self, id: NodeId, pt: Point) -> Option<Point> {
        let tf = self.world_transform(id)?;
        (tf.determinant() != 0.0).then(|| tf.inverse() * pt)
    }

    /// Map a point in the local space of `id` to global space.
    pub fn local_to_global(&self, id: NodeId, pt: Point) -> Option<Point> {
        Some(self.world_transform(id)? * pt)
    }

    /// Topmost hittable node under the global point `pt`.
    ///
    /// Children are tested before their parent, last child first. Invisible, untouchable and
    /// disabled nodes hide their whole subtree. A node is hit by its shape's precise test when it
    /// has one, else by its bounds when it has graphics or is opaque.
    pub fn hit_test(&self, pt: Point) -> Option<Hit> {
        self.hit_test_under(self.root(), pt)
    }

    /// Like [`Scene::hit_test`], limited to the subtree at `subtree`.
    pub fn hit_test_under(&self, subtree: NodeId, pt: Point) -> Option<Hit> {
        let parent_tf = match self.parent(subtree) {
            Some(p) => self.world_transform(p)?,
            None => Affine::IDENTITY,
        };
        let node = self.hit_recursive(subtree, parent_tf, pt)?;
        Some(Hit {
            node,
            path: self.path_to_root(node),
        })
    }

    fn hit_recursive(&self, id: NodeId, parent_tf: Affine, pt: Point) -> Option<NodeId> {
        let node = self.node(id)?;
        if !node.flags().contains(HITTABLE) {
            return None;
        }
        let tf = parent_tf * node.local_transform();
        if tf.determinant() == 0.0 {
            return None;
        }
        for &child in node.children().iter().rev() {
            if let Some(hit) = self.hit_recursive(child, tf, pt) {
                return Some(hit);
            }
        }
        node.hit_test_local(tf.inverse() * pt).then_some(id)
    }

    /// Paint every visible node with graphics, parents before children.
    ///
    /// Alpha multiplies down the tree; disabled nodes paint their subtree grayed.
    pub fn paint(&mut self, painter: &mut dyn Painter) {
        let root = self.root();
        self.paint_recursive(root, Affine::IDENTITY, 1.0, false, painter);
    }

    fn paint_recursive(
        &mut self,
        id: NodeId,
        parent_tf: Affine,
        parent_alpha: f64,
        parent_grayed: bool,
        painter: &mut dyn Painter,
    ) {
        let Some(node) = self.node_mut(id) else {
            return;
        };
        if !node.visible() {
            return;
        }
        let tf = parent_tf * node.local_transform();
        let alpha = parent_alpha * node.alpha();
        let grayed = parent_grayed || !node.interactable();
        if let Some(g) = node.graphics_mut() {
            #[allow(clippy::cast_possible_truncation, reason = "Paint alpha is f32.")]
            g.paint(tf, alpha as f32, grayed, painter);
        }
        let children = node.children().to_vec();
        for child in children {
            self.paint_recursive(child, tf, alpha, grayed, painter);
        }
    }
}
