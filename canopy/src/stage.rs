// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The stage: scene, tweens, listeners and input state for one UI.

use std::fmt;
use std::rc::Rc;

use canopy_mesh::Painter;
use canopy_responder::{ContextPool, EventContext, EventType, PopupStack, TouchId, TouchTracker};
use canopy_scene::{NodeId, Scene};
use canopy_tween::{TweenManager, TweenProp, TweenValue, Tweener, TweenerHandle};
use kurbo::{Point, Size};

use crate::config::UiConfig;
use crate::input::{DragState, DropPayload};
use crate::listeners::{ListenerId, Listeners};
use crate::targets::SceneTargets;
use crate::window::WindowEntry;

type Deferred = Box<dyn FnOnce(&mut Stage)>;

/// One UI: a scene of nodes plus everything that makes it interactive.
///
/// The host drives a stage once per frame: feed pointer input
/// ([`Stage::pointer_down`], [`Stage::pointer_move`], [`Stage::pointer_up`], [`Stage::wheel`]),
/// then call [`Stage::tick`] and [`Stage::paint`].
pub struct Stage {
    pub(crate) scene: Scene,
    pub(crate) tweens: TweenManager<NodeId>,
    pub(crate) listeners: Listeners,
    pub(crate) pool: ContextPool<NodeId>,
    pub(crate) touches: TouchTracker<NodeId>,
    pub(crate) popups: PopupStack<NodeId>,
    pub(crate) windows: Vec<WindowEntry>,
    pub(crate) modal_layer: Option<NodeId>,
    pub(crate) drag: Option<DragState>,
    pub(crate) drag_drop: Option<DropPayload>,
    deferred: Vec<Deferred>,
    pub(crate) config: UiConfig,
    pub(crate) time: f64,
}

impl fmt::Debug for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stage")
            .field("scene", &self.scene)
            .field("tweens", &self.tweens)
            .field("popups", &self.popups)
            .field("windows", &self.windows)
            .field("deferred", &self.deferred.len())
            .field("time", &self.time)
            .finish_non_exhaustive()
    }
}

impl Stage {
    /// Stage covering `viewport` with the default configuration.
    pub fn new(viewport: Size) -> Self {
        Self::with_config(viewport, UiConfig::default())
    }

    /// Stage covering `viewport` configured by `config`.
    pub fn with_config(viewport: Size, config: UiConfig) -> Self {
        Self {
            scene: Scene::new(viewport),
            tweens: TweenManager::new(),
            listeners: Listeners::default(),
            pool: ContextPool::new(),
            touches: TouchTracker::new(config.touch_settings()),
            popups: PopupStack::new(),
            windows: Vec::new(),
            modal_layer: None,
            drag: None,
            drag_drop: None,
            deferred: Vec::new(),
            config,
            time: 0.0,
        }
    }

    /// Configuration in use.
    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    /// Replace the configuration.
    pub fn set_config(&mut self, config: UiConfig) {
        self.touches.set_settings(config.touch_settings());
        self.config = config;
    }

    /// The scene.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The scene, for edits that do not change what is on stage (node properties, graphics).
    ///
    /// Structural changes should go through the stage so `AddedToStage` and
    /// `RemovedFromStage` fire.
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// The stage root.
    pub fn root(&self) -> NodeId {
        self.scene.root()
    }

    /// Resize the stage. The root gets `SizeChanged` when the size actually changed.
    pub fn set_viewport(&mut self, size: Size) {
        let root = self.scene.root();
        let old = self.scene.node(root).map(|n| n.size());
        self.scene.set_viewport(size);
        if let Some(layer) = self.modal_layer {
            if let Some(n) = self.scene.node_mut(layer) {
                n.set_size(size);
            }
        }
        if old != Some(size) {
            self.dispatch(root, EventType::SizeChanged, None);
        }
    }

    /// Seconds accumulated by [`Stage::tick`].
    pub fn time(&self) -> f64 {
        self.time
    }

    /// The touch tracker.
    pub fn touches(&self) -> &TouchTracker<NodeId> {
        &self.touches
    }

    /// Contexts currently borrowed by dispatches in progress.
    pub fn contexts_in_use(&self) -> usize {
        self.pool.outstanding()
    }

    // --- structure ---

    /// Create a detached node of `size`.
    pub fn create_node(&mut self, size: Size) -> NodeId {
        let id = self.scene.create();
        if let Some(n) = self.scene.node_mut(id) {
            n.set_size(size);
        }
        id
    }

    /// Create a node of `size` under `parent`.
    pub fn create_child(&mut self, parent: NodeId, size: Size) -> NodeId {
        let id = self.create_node(size);
        self.add_child(parent, id);
        id
    }

    /// Append `child` to `parent`.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) {
        let end = self.scene.num_children(parent);
        self.add_child_at(parent, child, end);
    }

    /// Insert `child` into `parent` at `index`.
    ///
    /// Broadcasts `RemovedFromStage` if the move takes `child` off stage, `AddedToStage` if it
    /// puts it on stage.
    pub fn add_child_at(&mut self, parent: NodeId, child: NodeId, index: usize) {
        let was_on = self.scene.is_on_stage(child);
        let will_be_on = self.scene.is_on_stage(parent);
        if was_on && !will_be_on {
            self.broadcast(child, EventType::RemovedFromStage, None);
        }
        self.scene.add_child_at(parent, child, index);
        if !was_on && self.scene.is_on_stage(child) {
            self.broadcast(child, EventType::AddedToStage, None);
        }
    }

    /// Detach `child` from `parent`. Returns whether it was a child.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if self.scene.child_index(parent, child).is_none() {
            return false;
        }
        self.leave_stage(child);
        self.scene.remove_child(parent, child)
    }

    /// Detach the child at `index` of `parent`.
    pub fn remove_child_at(&mut self, parent: NodeId, index: usize) -> Option<NodeId> {
        let child = self.scene.child_at(parent, index)?;
        self.remove_child(parent, child).then_some(child)
    }

    /// Detach `node` from its parent.
    pub fn remove_from_parent(&mut self, node: NodeId) {
        if let Some(parent) = self.scene.parent(node) {
            self.remove_child(parent, node);
        }
    }

    /// Move `node` to `position` in its parent, firing `PositionChanged` when it moved.
    pub fn set_node_position(&mut self, node: NodeId, position: Point) {
        let Some(n) = self.scene.node_mut(node) else {
            return;
        };
        if n.position() == position {
            return;
        }
        n.set_position(position);
        self.dispatch(node, EventType::PositionChanged, None);
    }

    /// Resize `node`, firing `SizeChanged` when the size changed.
    pub fn set_node_size(&mut self, node: NodeId, size: Size) {
        let Some(n) = self.scene.node_mut(node) else {
            return;
        };
        if n.size() == size {
            return;
        }
        n.set_size(size);
        self.dispatch(node, EventType::SizeChanged, None);
    }

    /// Move `child` among its siblings.
    pub fn set_child_index(
        &mut self,
        parent: NodeId,
        child: NodeId,
        index: usize,
    ) -> Option<usize> {
        self.scene.set_child_index(parent, child, index)
    }

    /// Destroy `node` and its subtree, dropping their listeners, captures and popup/window
    /// registrations.
    pub fn destroy(&mut self, node: NodeId) {
        if node == self.scene.root() || !self.scene.is_alive(node) {
            return;
        }
        self.leave_stage(node);
        let doomed = self.scene.destroy(node);
        for id in &doomed {
            self.listeners.remove_all(*id, None);
            self.touches.uncapture_all(*id);
        }
        let scene = &self.scene;
        self.touches.retain(|k| scene.is_alive(*k));
        self.popups.retain(|k| scene.is_alive(*k));
        self.windows.retain(|w| scene.is_alive(w.node));
        if self.drag.as_ref().is_some_and(|d| !scene.is_alive(d.node)) {
            self.drag = None;
        }
        if self.modal_layer.is_some_and(|m| !scene.is_alive(m)) {
            self.modal_layer = None;
        }
        log::trace!("destroyed {} nodes under {node:?}", doomed.len());
    }

    fn leave_stage(&mut self, node: NodeId) {
        if self.scene.is_on_stage(node) {
            self.broadcast(node, EventType::RemovedFromStage, None);
        }
    }

    // --- listeners ---

    /// Register `listener` for `event_type` on `node`.
    pub fn on(
        &mut self,
        node: NodeId,
        event_type: EventType,
        listener: impl Fn(&mut Self, &mut EventContext<NodeId>) + 'static,
    ) -> ListenerId {
        self.listeners.add(node, event_type, Rc::new(listener))
    }

    /// Remove the registration `id`. Returns whether it existed.
    pub fn off(&mut self, node: NodeId, event_type: &EventType, id: ListenerId) -> bool {
        self.listeners.remove(node, event_type, id)
    }

    /// Remove every listener of `node` for `event_type`, or all of them.
    pub fn off_all(&mut self, node: NodeId, event_type: Option<&EventType>) {
        self.listeners.remove_all(node, event_type);
    }

    /// Whether `node` has a listener for `event_type`.
    pub fn has_listener(&self, node: NodeId, event_type: &EventType) -> bool {
        self.listeners.has(node, event_type)
    }

    // --- frame ---

    /// Run `callback` at the start of the next [`Stage::tick`].
    pub fn call_later(&mut self, callback: impl FnOnce(&mut Self) + 'static) {
        self.deferred.push(Box::new(callback));
    }

    /// Advance one frame: run deferred callbacks, advance tweens by `dt` seconds, then forget
    /// this frame's popup closures.
    ///
    /// Callbacks scheduled by deferred callbacks run next frame.
    pub fn tick(&mut self, dt: f64) {
        self.time += dt;
        for callback in std::mem::take(&mut self.deferred) {
            callback(self);
        }
        let mut targets = SceneTargets::new(&mut self.scene);
        self.tweens.tick(dt, &mut targets);
        self.popups.end_frame();
    }

    /// Paint the scene.
    pub fn paint(&mut self, painter: &mut dyn Painter) {
        self.scene.paint(painter);
    }

    // --- tweens ---

    /// The tween manager.
    pub fn tweens(&self) -> &TweenManager<NodeId> {
        &self.tweens
    }

    /// The tween manager, for creating free-standing tweens and reading them back.
    pub fn tweens_mut(&mut self) -> &mut TweenManager<NodeId> {
        &mut self.tweens
    }

    /// Tween `prop` of `node` from `start` to `end` with the configured default ease.
    ///
    /// Scalar properties, `Progress` included, read the first channel of `start` and `end`.
    pub fn tween(
        &mut self,
        node: NodeId,
        prop: TweenProp,
        start: impl Into<TweenValue>,
        end: impl Into<TweenValue>,
        duration: f64,
    ) -> &mut Tweener<NodeId> {
        let (start, end) = (start.into(), end.into());
        let ease = self.config.default_ease;
        let tw = match prop {
            TweenProp::Position | TweenProp::Size | TweenProp::Scale => {
                self.tweens.to_vec2(start, end, duration)
            }
            TweenProp::Progress => self.tweens.to_double(start.x, end.x, duration),
            _ => self.tweens.to(start.x, end.x, duration),
        };
        tw.set_target_prop(node, prop).set_ease(ease)
    }

    /// Shake `node` around its current position.
    pub fn shake(&mut self, node: NodeId, amplitude: f64, duration: f64) -> &mut Tweener<NodeId> {
        let center = self
            .scene
            .node(node)
            .map_or(Point::ORIGIN, |n| n.position());
        self.tweens
            .shake(center, amplitude, duration)
            .set_target_prop(node, TweenProp::Position)
    }

    /// Kill the tween behind `handle`, optionally snapping it to its end.
    pub fn kill_tween(&mut self, handle: &mut TweenerHandle, complete: bool) -> bool {
        let mut targets = SceneTargets::new(&mut self.scene);
        self.tweens.kill(handle, complete, &mut targets)
    }

    /// Kill every tween on `node` (and `prop`, when given).
    pub fn kill_tweens(&mut self, node: NodeId, prop: Option<TweenProp>, complete: bool) -> bool {
        let mut targets = SceneTargets::new(&mut self.scene);
        self.tweens.kill_tweens(node, prop, complete, &mut targets)
    }

    /// Jump the tween behind `handle` to `time` seconds.
    pub fn seek_tween(&mut self, handle: TweenerHandle, time: f64) {
        let mut targets = SceneTargets::new(&mut self.scene);
        self.tweens.seek(handle, time, &mut targets);
    }

    // --- capture ---

    /// Make `node` a captor of `touch`: it receives that pointer's `TouchMove` and `TouchEnd`
    /// directly until release.
    pub fn capture_touch(&mut self, touch: TouchId, node: NodeId) {
        if self.touches.capture(touch, node) {
            log::trace!("{node:?} captured {touch:?}");
        }
    }

    /// Stop `node` capturing `touch`.
    pub fn release_touch(&mut self, touch: TouchId, node: NodeId) {
        self.touches.uncapture(touch, node);
    }

    /// Stop `node` capturing any pointer.
    pub fn release_all_touches(&mut self, node: NodeId) {
        self.touches.uncapture_all(node);
    }

    /// Live, on-stage captors of `touch`.
    pub fn captors(&self, touch: TouchId) -> Vec<NodeId> {
        self.touches
            .captors(touch)
            .iter()
            .copied()
            .filter(|&k| self.scene.is_on_stage(k))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn logger(
        log: &Rc<RefCell<Vec<String>>>,
        tag: &'static str,
    ) -> impl Fn(&mut Stage, &mut EventContext<NodeId>) + 'static {
        let log = Rc::clone(log);
        move |_, ctx| log.borrow_mut().push(format!("{tag}:{}", ctx.event_type()))
    }

    #[test]
    fn stage_membership_events() {
        let mut stage = Stage::new(Size::new(100.0, 100.0));
        let log = Rc::new(RefCell::new(Vec::new()));
        let panel = stage.create_node(Size::new(10.0, 10.0));
        let child = stage.create_child(panel, Size::new(5.0, 5.0));
        for (n, tag) in [(panel, "panel"), (child, "child")] {
            stage.on(n, EventType::AddedToStage, logger(&log, tag));
            stage.on(n, EventType::RemovedFromStage, logger(&log, tag));
        }
        assert!(log.borrow().is_empty(), "detached tree is silent");

        let root = stage.root();
        stage.add_child(root, panel);
        assert_eq!(
            *log.borrow(),
            vec!["panel:onAddedToStage", "child:onAddedToStage"],
            "pre-order broadcast on attach"
        );
        log.borrow_mut().clear();
        stage.add_child(root, panel);
        assert!(log.borrow().is_empty(), "reordering on stage fires nothing");

        stage.remove_child(root, panel);
        assert_eq!(
            *log.borrow(),
            vec!["panel:onRemovedFromStage", "child:onRemovedFromStage"],
            "broadcast on detach"
        );
    }

    #[test]
    fn destroy_drops_listeners_and_captures() {
        let mut stage = Stage::new(Size::new(100.0, 100.0));
        let root = stage.root();
        let node = stage.create_child(root, Size::new(10.0, 10.0));
        stage.on(node, EventType::Click, |_, _| {});
        stage.capture_touch(TouchId::PRIMARY, node);
        assert_eq!(stage.captors(TouchId::PRIMARY), vec![node], "captured");
        stage.destroy(node);
        assert!(!stage.has_listener(node, &EventType::Click), "listeners gone");
        assert!(stage.captors(TouchId::PRIMARY).is_empty(), "capture gone");
        stage.destroy(root);
        assert!(stage.scene().is_alive(root), "stage root survives");
    }

    #[test]
    fn deferred_callbacks_run_once_and_reschedule_to_next_frame() {
        let mut stage = Stage::new(Size::new(10.0, 10.0));
        let runs = Rc::new(RefCell::new(Vec::new()));
        let r = Rc::clone(&runs);
        stage.call_later(move |s| {
            r.borrow_mut().push("first");
            let r2 = Rc::clone(&r);
            s.call_later(move |_| r2.borrow_mut().push("second"));
        });
        stage.tick(0.016);
        assert_eq!(*runs.borrow(), vec!["first"], "rescheduled callback waits");
        stage.tick(0.016);
        assert_eq!(*runs.borrow(), vec!["first", "second"], "runs next frame");
        stage.tick(0.016);
        assert_eq!(runs.borrow().len(), 2, "each runs once");
    }

    #[test]
    fn node_tweens_write_through_and_stop_when_destroyed() {
        let mut stage = Stage::new(Size::new(100.0, 100.0));
        let root = stage.root();
        let node = stage.create_child(root, Size::new(10.0, 10.0));
        stage
            .tween(node, TweenProp::X, 0.0, 100.0, 1.0)
            .set_ease(canopy_tween::EaseType::Linear);
        stage.tick(0.5);
        let x = stage.scene().node(node).map(|n| n.position().x);
        assert_eq!(x, Some(50.0), "halfway");
        assert!(stage.tweens().is_tweening(node, None), "still running");
        stage.destroy(node);
        stage.tick(0.1);
        assert!(!stage.tweens().is_tweening(node, None), "dead target cancels");
    }

    #[test]
    fn progress_tween_drives_the_fill_amount() {
        let mut stage = Stage::new(Size::new(100.0, 100.0));
        let root = stage.root();
        let gauge = stage.create_child(root, Size::new(10.0, 10.0));
        if let Some(n) = stage.scene_mut().node_mut(gauge) {
            n.ensure_graphics().set_fill_method(canopy_mesh::FillMethod::Radial360);
        }
        stage
            .tween(gauge, TweenProp::Progress, 0.0, 1.0, 1.0)
            .set_ease(canopy_tween::EaseType::Linear);
        let amount = |stage: &Stage| {
            stage
                .scene()
                .node(gauge)
                .and_then(|n| n.graphics())
                .and_then(|g| g.fill())
                .map(|f| f.amount)
        };
        stage.tick(0.5);
        assert_eq!(amount(&stage), Some(0.5), "half filled at half time");
        stage.tick(0.5);
        assert_eq!(amount(&stage), Some(1.0), "full at the end");
    }
}
