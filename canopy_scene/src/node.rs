// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-node state.

use canopy_mesh::Graphics;
use kurbo::{Affine, Point, Rect, Size, Vec2};

use crate::types::{NodeFlags, NodeId};

/// One display object of a [`Scene`](crate::Scene).
///
/// Structure (parent and children) is owned by the scene and only changes through scene methods;
/// everything else is edited through the setters here.
#[derive(Debug)]
pub struct DisplayNode {
    pub(crate) generation: u32,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    name: String,
    position: Point,
    size: Size,
    scale: Vec2,
    rotation: f64,
    alpha: f64,
    flags: NodeFlags,
    draggable: bool,
    drag_bounds: Option<Rect>,
    sorting_order: i32,
    graphics: Option<Graphics>,
}

impl DisplayNode {
    pub(crate) fn new(generation: u32) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            name: String::new(),
            position: Point::ORIGIN,
            size: Size::ZERO,
            scale: Vec2::new(1.0, 1.0),
            rotation: 0.0,
            alpha: 1.0,
            flags: NodeFlags::default(),
            draggable: false,
            drag_bounds: None,
            sorting_order: 0,
            graphics: None,
        }
    }

    /// Parent node, if attached.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in paint order (last is on top).
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Name, empty by default.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Position of the top-left corner in parent space.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Move the node.
    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    /// Size of the node's local bounds.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Resize the node. Graphics follow the new bounds.
    pub fn set_size(&mut self, size: Size) {
        if self.size != size {
            self.size = size;
            if let Some(g) = self.graphics.as_mut() {
                g.set_content_rect(size.to_rect());
            }
        }
    }

    /// Local bounds, `(0, 0)` to `size`.
    pub fn bounds(&self) -> Rect {
        self.size.to_rect()
    }

    /// Scale factors.
    pub fn scale(&self) -> Vec2 {
        self.scale
    }

    /// Set the scale factors.
    pub fn set_scale(&mut self, scale: Vec2) {
        self.scale = scale;
    }

    /// Rotation in degrees, clockwise in y-down space.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Set the rotation in degrees.
    pub fn set_rotation(&mut self, degrees: f64) {
        self.rotation = degrees;
    }

    /// Opacity in `0..=1`.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Set the opacity, clamped to `0..=1`.
    pub fn set_alpha(&mut self, alpha: f64) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }

    /// Capability flags.
    pub fn flags(&self) -> NodeFlags {
        self.flags
    }

    /// Replace the capability flags.
    pub fn set_flags(&mut self, flags: NodeFlags) {
        self.flags = flags;
    }

    /// Whether the node is visible.
    pub fn visible(&self) -> bool {
        self.flags.contains(NodeFlags::VISIBLE)
    }

    /// Show or hide the node.
    pub fn set_visible(&mut self, visible: bool) {
        self.flags.set(NodeFlags::VISIBLE, visible);
    }

    /// Whether the node receives pointer input.
    pub fn touchable(&self) -> bool {
        self.flags.contains(NodeFlags::TOUCHABLE)
    }

    /// Enable or disable pointer input for the node and its subtree.
    pub fn set_touchable(&mut self, touchable: bool) {
        self.flags.set(NodeFlags::TOUCHABLE, touchable);
    }

    /// Whether the whole bounds are hittable.
    pub fn opaque(&self) -> bool {
        self.flags.contains(NodeFlags::OPAQUE)
    }

    /// Make the whole bounds hittable (or not).
    pub fn set_opaque(&mut self, opaque: bool) {
        self.flags.set(NodeFlags::OPAQUE, opaque);
    }

    /// Whether the node is enabled.
    pub fn interactable(&self) -> bool {
        self.flags.contains(NodeFlags::INTERACTABLE)
    }

    /// Enable or disable the node.
    pub fn set_interactable(&mut self, interactable: bool) {
        self.flags.set(NodeFlags::INTERACTABLE, interactable);
    }

    /// Whether pressing and moving the node drags it.
    pub fn draggable(&self) -> bool {
        self.draggable
    }

    /// Allow or forbid dragging.
    pub fn set_draggable(&mut self, draggable: bool) {
        self.draggable = draggable;
    }

    /// Area (in global coordinates) the node is kept inside while dragged.
    pub fn drag_bounds(&self) -> Option<Rect> {
        self.drag_bounds
    }

    /// Limit dragging to `bounds`, or lift the limit.
    pub fn set_drag_bounds(&mut self, bounds: Option<Rect>) {
        self.drag_bounds = bounds;
    }

    /// Window ordering key: higher sorts above lower among windows.
    pub fn sorting_order(&self) -> i32 {
        self.sorting_order
    }

    /// Set the window ordering key.
    pub fn set_sorting_order(&mut self, order: i32) {
        self.sorting_order = order;
    }

    /// The node's graphics, if any.
    pub fn graphics(&self) -> Option<&Graphics> {
        self.graphics.as_ref()
    }

    /// Mutable graphics, if any.
    pub fn graphics_mut(&mut self) -> Option<&mut Graphics> {
        self.graphics.as_mut()
    }

    /// Graphics, created on first use and sized to the node.
    pub fn ensure_graphics(&mut self) -> &mut Graphics {
        let size = self.size;
        self.graphics.get_or_insert_with(|| {
            let mut g = Graphics::new();
            g.set_content_rect(size.to_rect());
            g
        })
    }

    /// Replace (or remove) the graphics. New graphics are sized to the node.
    pub fn set_graphics(&mut self, graphics: Option<Graphics>) {
        self.graphics = graphics;
        if let Some(g) = self.graphics.as_mut() {
            g.set_content_rect(self.size.to_rect());
        }
    }

    /// Transform from local space to parent space: translate, then rotate, then scale.
    pub fn local_transform(&self) -> Affine {
        Affine::translate(self.position.to_vec2())
            * Affine::rotate(self.rotation.to_radians())
            * Affine::scale_non_uniform(self.scale.x, self.scale.y)
    }

    /// Local-space point inclusion: the shape's precise test if it has one, else the bounds
    /// for nodes that have graphics or are opaque.
    pub fn hit_test_local(&self, pt: Point) -> bool {
        if let Some(g) = &self.graphics {
            if let Some(inside) = g.hit_test(pt) {
                return inside;
            }
            return self.bounds().contains(pt);
        }
        self.opaque() && self.bounds().contains(pt)
    }
}
