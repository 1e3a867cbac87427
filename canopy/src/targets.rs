// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Binding between tweens and scene nodes.

use canopy_scene::{NodeId, Scene};
use canopy_tween::{TweenProp, TweenTargets, TweenValue};
use kurbo::{Point, Size, Vec2};

/// Lets tweens keyed by [`NodeId`] write node properties.
///
/// A destroyed node is dead, so its tweens are cancelled on their next update.
#[derive(Debug)]
pub struct SceneTargets<'a> {
    scene: &'a mut Scene,
}

impl<'a> SceneTargets<'a> {
    /// Targets backed by `scene`.
    pub fn new(scene: &'a mut Scene) -> Self {
        Self { scene }
    }
}

impl TweenTargets<NodeId> for SceneTargets<'_> {
    fn is_alive(&self, target: NodeId) -> bool {
        self.scene.is_alive(target)
    }

    fn apply(&mut self, target: NodeId, prop: TweenProp, v: &TweenValue) {
        let Some(node) = self.scene.node_mut(target) else {
            return;
        };
        let pos = node.position();
        let size = node.size();
        let scale = node.scale();
        match prop {
            TweenProp::X => node.set_position(Point::new(v.x, pos.y)),
            TweenProp::Y => node.set_position(Point::new(pos.x, v.x)),
            TweenProp::Position => node.set_position(v.to_point()),
            TweenProp::Width => node.set_size(Size::new(v.x, size.height)),
            TweenProp::Height => node.set_size(Size::new(size.width, v.x)),
            TweenProp::Size => node.set_size(Size::new(v.x, v.y)),
            TweenProp::ScaleX => node.set_scale(Vec2::new(v.x, scale.y)),
            TweenProp::ScaleY => node.set_scale(Vec2::new(scale.x, v.x)),
            TweenProp::Scale => node.set_scale(v.to_vec2()),
            TweenProp::Rotation => node.set_rotation(v.x),
            TweenProp::Alpha => node.set_alpha(v.x),
            TweenProp::Progress => {
                if let Some(g) = node.graphics_mut() {
                    g.set_fill_amount(v.d);
                }
            }
        }
    }
}
