// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer input: touch events, roll-over, click recognition, dragging and drag-and-drop.

use std::any::Any;
use std::fmt;

use canopy_responder::adapters::scene::pointer_path;
use canopy_responder::{EventType, InputSnapshot, TouchId};
use canopy_scene::NodeId;
use kurbo::{Point, Rect, Vec2};

use crate::stage::Stage;

/// A node following a pointer.
#[derive(Clone, Debug)]
pub(crate) struct DragState {
    pub(crate) node: NodeId,
    touch: TouchId,
    pointer_start: Point,
    node_start: Point,
    active: bool,
}

/// Data carried by a drag-and-drop gesture until release.
pub(crate) struct DropPayload {
    touch: TouchId,
    source: NodeId,
    data: Option<Box<dyn Any>>,
}

impl fmt::Debug for DropPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DropPayload")
            .field("touch", &self.touch)
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

impl Stage {
    /// A pointer was pressed.
    ///
    /// Updates roll-over, closes popups the press landed outside of, then bubbles
    /// `TouchBegin` from the node under the pointer. The innermost draggable node on the path
    /// becomes a drag candidate.
    pub fn pointer_down(&mut self, input: InputSnapshot) {
        let path = pointer_path(&self.scene, input.position);
        self.update_roll_over(input, &path);
        let count = self.touches.press(input, self.time, path.clone());
        let input = InputSnapshot {
            click_count: count,
            ..input
        };

        let closed = self.popups.probe(path.iter().rev().copied());
        self.close_popups(closed);

        let Some(&target) = path.last() else {
            return;
        };
        self.bubble_input(target, EventType::TouchBegin, input, None);

        let root = self.scene.root();
        let candidate = path.iter().rev().copied().find(|&n| {
            n != root && self.scene.node(n).is_some_and(|node| node.draggable())
        });
        if let Some(node) = candidate {
            if self.drag.as_ref().is_none_or(|d| !d.active) {
                self.drag = Some(DragState {
                    node,
                    touch: input.touch,
                    pointer_start: input.position,
                    node_start: self.scene.node(node).map_or(Point::ORIGIN, |n| n.position()),
                    active: false,
                });
            }
        }
    }

    /// A pointer moved, pressed or not.
    ///
    /// Fires `RollOut`/`RollOver`, then `TouchMove` to the pointer's captors. Moves past the
    /// drag sensitivity start a pending drag with `DragStart` (prevent-default cancels it);
    /// an active drag moves its node and fires `PositionChanged` then `DragMove`.
    pub fn pointer_move(&mut self, input: InputSnapshot) {
        self.touches.moved(input);
        let input = self.touches.info(input.touch).map_or(input, |i| *i.last_event());
        let path = pointer_path(&self.scene, input.position);
        self.update_roll_over(input, &path);

        let captors = self.captors(input.touch);
        if !captors.is_empty() {
            self.deliver_to(&captors, EventType::TouchMove, input, None);
        }

        self.update_drag(input);
    }

    /// A pointer was released.
    ///
    /// `TouchEnd` goes to exactly the pointer's captors when it has any, otherwise it bubbles
    /// from the node under the pointer. Then `DragEnd` for an active drag, `Drop` for a
    /// drag-and-drop gesture, and finally `Click` if the press was not cancelled.
    pub fn pointer_up(&mut self, input: InputSnapshot) {
        let path = pointer_path(&self.scene, input.position);
        let release = self.touches.release(input, &path);
        let input = InputSnapshot {
            click_count: release.click_count,
            ..input
        };

        let captors: Vec<NodeId> = release
            .captors
            .iter()
            .copied()
            .filter(|&k| self.scene.is_on_stage(k))
            .collect();
        if captors.is_empty() {
            if let Some(&target) = path.last() {
                self.bubble_input(target, EventType::TouchEnd, input, None);
            }
        } else {
            self.deliver_to(&captors, EventType::TouchEnd, input, None);
        }

        if let Some(drag) = self.drag.take_if(|d| d.touch == input.touch) {
            if drag.active {
                log::debug!("drag of {:?} ended", drag.node);
                self.dispatch_input(drag.node, EventType::DragEnd, input, None);
            }
        }

        if let Some(payload) = self.drag_drop.take_if(|p| p.touch == input.touch) {
            let target = path
                .iter()
                .rev()
                .copied()
                .find(|&n| self.listeners.has(n, &EventType::Drop));
            if let Some(target) = target {
                log::debug!("{:?} dropped on {target:?}", payload.source);
                self.dispatch_input(target, EventType::Drop, input, payload.data);
            }
        }

        if let Some(target) = release.click_target {
            if self.scene.is_alive(target) {
                self.bubble_input(target, EventType::Click, input, None);
            }
        }
    }

    /// The wheel turned; bubbles `MouseWheel` from the node under the pointer.
    pub fn wheel(&mut self, input: InputSnapshot) {
        let path = pointer_path(&self.scene, input.position);
        if let Some(&target) = path.last() {
            self.bubble_input(target, EventType::MouseWheel, input, None);
        }
    }

    /// The pointer left the stage: roll out of everything it was over.
    pub fn pointer_leave(&mut self, touch: TouchId) {
        let input = self
            .touches
            .info(touch)
            .map_or_else(|| InputSnapshot::at(touch, Point::ORIGIN), |i| *i.last_event());
        for node in self.touches.roll_out_all(touch) {
            if self.scene.is_alive(node) {
                self.dispatch_input(node, EventType::RollOut, input, None);
            }
        }
    }

    /// Prevent the current press of `touch` from producing a click.
    pub fn cancel_click(&mut self, touch: TouchId) {
        self.touches.cancel_click(touch);
    }

    /// Start dragging `node` with `touch` right away, without waiting for the sensitivity.
    pub fn start_drag(&mut self, node: NodeId, touch: TouchId) {
        let Some(n) = self.scene.node(node) else {
            return;
        };
        let pointer = self
            .touches
            .info(touch)
            .map_or(Point::ORIGIN, |i| i.last_event().position);
        self.drag = Some(DragState {
            node,
            touch,
            pointer_start: pointer,
            node_start: n.position(),
            active: true,
        });
        self.touches.cancel_click(touch);
        log::debug!("drag of {node:?} started by {touch:?}");
    }

    /// Stop dragging `node`, if it is being dragged. No `DragEnd` is fired.
    pub fn stop_drag(&mut self, node: NodeId) {
        self.drag.take_if(|d| d.node == node);
    }

    /// Node being dragged.
    pub fn dragging_node(&self) -> Option<NodeId> {
        self.drag.as_ref().filter(|d| d.active).map(|d| d.node)
    }

    /// Start a drag-and-drop gesture for `touch`: on release, `data` is dispatched as `Drop`
    /// to the innermost node under the pointer with a `Drop` listener.
    pub fn start_drag_drop(&mut self, touch: TouchId, source: NodeId, data: Option<Box<dyn Any>>) {
        self.drag_drop = Some(DropPayload {
            touch,
            source,
            data,
        });
        self.touches.cancel_click(touch);
    }

    /// Abandon the drag-and-drop gesture, returning its data.
    pub fn cancel_drag_drop(&mut self) -> Option<Box<dyn Any>> {
        self.drag_drop.take().and_then(|p| p.data)
    }

    /// Whether a drag-and-drop gesture is in progress.
    pub fn is_drag_drop_active(&self) -> bool {
        self.drag_drop.is_some()
    }

    fn update_roll_over(&mut self, input: InputSnapshot, path: &[NodeId]) {
        let change = self.touches.roll_over(input.touch, path);
        for node in change.out {
            if self.scene.is_alive(node) {
                self.dispatch_input(node, EventType::RollOut, input, None);
            }
        }
        for node in change.over {
            if self.scene.is_alive(node) {
                self.dispatch_input(node, EventType::RollOver, input, None);
            }
        }
    }

    fn update_drag(&mut self, input: InputSnapshot) {
        let Some(drag) = self.drag.as_ref() else {
            return;
        };
        if drag.touch != input.touch {
            return;
        }
        if !drag.active {
            if !self.touches.is_down(input.touch) {
                self.drag = None;
                return;
            }
            // Pointer 0 is the mouse; other pointers are fingers.
            let sensitivity = if input.touch.pointer == 0 {
                self.config.click_drag_sensitivity
            } else {
                self.config.touch_drag_sensitivity
            };
            if (input.position - drag.pointer_start).hypot() <= sensitivity {
                return;
            }
            let node = drag.node;
            if self.dispatch_input(node, EventType::DragStart, input, None) {
                log::debug!("drag of {node:?} prevented");
                self.drag = None;
                return;
            }
            let Some(drag) = self.drag.as_mut() else {
                return;
            };
            drag.active = true;
            self.touches.cancel_click(input.touch);
            log::debug!("drag of {node:?} started");
        }
        self.move_dragged(input);
    }

    fn move_dragged(&mut self, input: InputSnapshot) {
        let Some(drag) = self.drag.clone() else {
            return;
        };
        let Some(parent) = self.scene.parent(drag.node) else {
            return;
        };
        let (Some(from), Some(to)) = (
            self.scene.global_to_local(parent, drag.pointer_start),
            self.scene.global_to_local(parent, input.position),
        ) else {
            return;
        };
        let mut pos = drag.node_start + (to - from);
        if let Some(bounds) = self.scene.node(drag.node).and_then(|n| n.drag_bounds()) {
            pos = self.clamp_to_bounds(drag.node, parent, pos, bounds);
        }
        let Some(node) = self.scene.node_mut(drag.node) else {
            return;
        };
        if node.position() == pos {
            return;
        }
        node.set_position(pos);
        self.dispatch_input(drag.node, EventType::PositionChanged, input, None);
        self.dispatch_input(drag.node, EventType::DragMove, input, None);
    }

    /// Keep the global bounding box of `node`, placed at `pos` in `parent`, inside `bounds`.
    fn clamp_to_bounds(&self, node: NodeId, parent: NodeId, pos: Point, bounds: Rect) -> Point {
        let (Some(parent_tf), Some(n)) = (self.scene.world_transform(parent), self.scene.node(node))
        else {
            return pos;
        };
        let local = n.local_transform().transform_rect_bbox(n.bounds());
        let moved = local + (pos - n.position());
        let global = parent_tf.transform_rect_bbox(moved);
        let dx = shift_into(global.x0, global.x1, bounds.x0, bounds.x1);
        let dy = shift_into(global.y0, global.y1, bounds.y0, bounds.y1);
        if dx == 0.0 && dy == 0.0 {
            return pos;
        }
        let det = parent_tf.determinant();
        if det == 0.0 {
            return pos;
        }
        let shift = parent_tf.inverse() * (global.origin() + Vec2::new(dx, dy))
            - parent_tf.inverse() * global.origin();
        pos + shift
    }
}

/// Offset that moves `[lo, hi]` inside `[min, max]`, pinning to `min` when it does not fit.
fn shift_into(lo: f64, hi: f64, min: f64, max: f64) -> f64 {
    if lo < min || hi - lo > max - min {
        min - lo
    } else if hi > max {
        max - hi
    } else {
        0.0
    }
}
