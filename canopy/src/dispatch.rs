// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Executing listeners: direct, bubbling and broadcast dispatch.

use std::any::Any;

use canopy_responder::{EventContext, EventType, InputSnapshot, broadcast_chain, bubble_chain};
use canopy_scene::NodeId;

use crate::stage::Stage;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Mode {
    /// Walk the chain, stopping after a node whose listener stopped propagation.
    Bubble,
    /// Visit every node; each is its own initiator.
    Broadcast,
}

impl Stage {
    /// Deliver `event_type` to `node` only. Returns whether a listener prevented the default.
    pub fn dispatch(
        &mut self,
        node: NodeId,
        event_type: EventType,
        data: Option<Box<dyn Any>>,
    ) -> bool {
        let input = self.touches.last_input();
        self.dispatch_input(node, event_type, input, data)
    }

    /// Like [`Stage::dispatch`] with explicit pointer state.
    pub fn dispatch_input(
        &mut self,
        node: NodeId,
        event_type: EventType,
        input: InputSnapshot,
        data: Option<Box<dyn Any>>,
    ) -> bool {
        if !self.scene.is_alive(node) {
            log::warn!("{event_type} dispatched to stale node {node:?}");
            return false;
        }
        self.run(node, &[node], event_type, input, data, Mode::Bubble)
    }

    /// Deliver `event_type` to `node`, then to each ancestor up to the stage root, until a
    /// listener stops propagation. Returns whether a listener prevented the default.
    ///
    /// A listener asking to capture the touch makes its node a captor of the event's pointer.
    pub fn bubble(
        &mut self,
        node: NodeId,
        event_type: EventType,
        data: Option<Box<dyn Any>>,
    ) -> bool {
        let input = self.touches.last_input();
        self.bubble_input(node, event_type, input, data)
    }

    /// Like [`Stage::bubble`] with explicit pointer state.
    pub fn bubble_input(
        &mut self,
        node: NodeId,
        event_type: EventType,
        input: InputSnapshot,
        data: Option<Box<dyn Any>>,
    ) -> bool {
        let chain = bubble_chain(&self.scene, node, None);
        if chain.is_empty() || !self.scene.is_alive(node) {
            log::warn!("{event_type} bubbled from stale node {node:?}");
            return false;
        }
        self.run(node, &chain, event_type, input, data, Mode::Bubble)
    }

    /// Deliver `event_type` to `node` and every descendant in pre-order. Stopping propagation
    /// has no effect; every node is visited.
    pub fn broadcast(&mut self, node: NodeId, event_type: EventType, data: Option<Box<dyn Any>>) {
        if !self.scene.is_alive(node) {
            log::warn!("{event_type} broadcast from stale node {node:?}");
            return;
        }
        let chain = broadcast_chain(&self.scene, node);
        let input = self.touches.last_input();
        self.run(node, &chain, event_type, input, data, Mode::Broadcast);
    }

    /// Deliver `event_type` to exactly the nodes of `targets`, in order, as one bubbling
    /// dispatch initiated by the first of them.
    pub(crate) fn deliver_to(
        &mut self,
        targets: &[NodeId],
        event_type: EventType,
        input: InputSnapshot,
        data: Option<Box<dyn Any>>,
    ) -> bool {
        let Some(&first) = targets.first() else {
            return false;
        };
        self.run(first, targets, event_type, input, data, Mode::Bubble)
    }

    fn run(
        &mut self,
        initiator: NodeId,
        chain: &[NodeId],
        event_type: EventType,
        input: InputSnapshot,
        data: Option<Box<dyn Any>>,
        mode: Mode,
    ) -> bool {
        let mut ctx = self.pool.borrow();
        ctx.begin(event_type, Some(initiator), input, data);
        for &node in chain {
            if mode == Mode::Broadcast {
                ctx.set_initiator(Some(node));
            }
            self.call_listeners(node, &mut ctx);
            if mode == Mode::Bubble && ctx.is_propagation_stopped() {
                break;
            }
        }
        let prevented = ctx.is_default_prevented();
        self.pool.give_back(ctx);
        prevented
    }

    fn call_listeners(&mut self, node: NodeId, ctx: &mut EventContext<NodeId>) {
        if !self.scene.is_alive(node) {
            return;
        }
        let listeners = self.listeners.snapshot(node, ctx.event_type());
        if listeners.is_empty() {
            return;
        }
        ctx.set_sender(Some(node));
        for listener in listeners {
            listener(self, ctx);
        }
        if ctx.take_capture_request() {
            let touch = ctx.input().touch;
            self.capture_touch(touch, node);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use kurbo::Size;

    use super::*;

    type Log = Rc<RefCell<Vec<NodeId>>>;

    fn chain3() -> (Stage, [NodeId; 3]) {
        let mut stage = Stage::new(Size::new(100.0, 100.0));
        let root = stage.root();
        let a = stage.create_child(root, Size::new(50.0, 50.0));
        let b = stage.create_child(a, Size::new(20.0, 20.0));
        (stage, [root, a, b])
    }

    fn record(stage: &mut Stage, node: NodeId, ty: EventType, log: &Log) {
        let log = Rc::clone(log);
        stage.on(node, ty, move |_, ctx| {
            log.borrow_mut().extend(ctx.sender());
        });
    }

    #[test]
    fn dispatch_reaches_only_its_node_and_reports_prevent_default() {
        let (mut stage, [root, a, b]) = chain3();
        let log = Log::default();
        for n in [root, a, b] {
            record(&mut stage, n, EventType::Changed, &log);
        }
        stage.on(b, EventType::Changed, |_, ctx| ctx.prevent_default());
        assert!(stage.dispatch(b, EventType::Changed, None), "prevented");
        assert_eq!(*log.borrow(), vec![b], "no bubbling");
        assert!(!stage.dispatch(a, EventType::Changed, None), "not prevented");
        assert_eq!(stage.contexts_in_use(), 0, "context returned");
    }

    #[test]
    fn bubble_goes_to_root_and_stops_on_request() {
        let (mut stage, [root, a, b]) = chain3();
        let log = Log::default();
        for n in [root, a, b] {
            record(&mut stage, n, EventType::Submit, &log);
        }
        stage.bubble(b, EventType::Submit, None);
        assert_eq!(*log.borrow(), vec![b, a, root], "child to root");

        log.borrow_mut().clear();
        stage.on(a, EventType::Submit, |_, ctx| ctx.stop_propagation());
        stage.bubble(b, EventType::Submit, None);
        assert_eq!(*log.borrow(), vec![b, a], "stopped after a");
    }

    #[test]
    fn broadcast_visits_every_descendant_once() {
        // Property: K descendants (inclusive) yield exactly K listener calls, pre-order.
        let (mut stage, [root, a, b]) = chain3();
        let c = stage.create_child(a, Size::new(5.0, 5.0));
        let d = stage.create_child(root, Size::new(5.0, 5.0));
        let log = Log::default();
        for n in [root, a, b, c, d] {
            let log = Rc::clone(&log);
            stage.on(n, EventType::GearStopped, move |_, ctx| {
                assert_eq!(ctx.sender(), ctx.initiator(), "each node initiates itself");
                log.borrow_mut().extend(ctx.sender());
                ctx.stop_propagation();
            });
        }
        stage.broadcast(root, EventType::GearStopped, None);
        assert_eq!(*log.borrow(), vec![root, a, b, c, d], "pre-order, stop ignored");
        log.borrow_mut().clear();
        stage.broadcast(a, EventType::GearStopped, None);
        assert_eq!(*log.borrow(), vec![a, b, c], "subtree only");
    }

    #[test]
    fn nested_dispatch_uses_a_separate_context() {
        let (mut stage, [_, a, b]) = chain3();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&seen);
        stage.on(b, EventType::Submit, move |stage, ctx| {
            let outer = ctx.lease();
            stage.dispatch(a, EventType::Changed, Some(Box::new(5_u8)));
            s.borrow_mut().push((outer, ctx.lease(), ctx.data_as::<&str>().copied()));
        });
        let s = Rc::clone(&seen);
        stage.on(a, EventType::Changed, move |stage, ctx| {
            assert_eq!(ctx.data_as::<u8>(), Some(&5), "nested payload");
            assert_eq!(stage.contexts_in_use(), 2, "outer still borrowed");
            s.borrow_mut().push((ctx.lease(), 0, None));
        });
        stage.dispatch(b, EventType::Submit, Some(Box::new("outer")));
        let seen = seen.borrow();
        assert_eq!(seen.len(), 2, "both listeners ran");
        assert_ne!(seen[0].0, seen[1].0, "distinct leases");
        assert_eq!(seen[1].2, Some("outer"), "outer payload survived the nested dispatch");
        assert_eq!(stage.contexts_in_use(), 0, "all returned");
    }

    #[test]
    fn capture_request_in_bubble_captures_the_events_touch() {
        let (mut stage, [_, a, b]) = chain3();
        stage.on(a, EventType::TouchBegin, |_, ctx| ctx.capture_touch());
        let touch = canopy_responder::TouchId::new(0, 3);
        let input = InputSnapshot::at(touch, kurbo::Point::new(1.0, 1.0));
        stage.bubble_input(b, EventType::TouchBegin, input, None);
        assert_eq!(stage.captors(touch), vec![a], "captured for the event's touch");
        assert!(
            stage.captors(canopy_responder::TouchId::PRIMARY).is_empty(),
            "other touches untouched"
        );
    }

    #[test]
    fn stale_nodes_are_a_no_op() {
        let (mut stage, [_, a, b]) = chain3();
        stage.destroy(a);
        assert!(!stage.bubble(b, EventType::Click, None), "stale bubble");
        assert!(!stage.dispatch(b, EventType::Click, None), "stale dispatch");
        stage.broadcast(b, EventType::Click, None);
        assert_eq!(stage.contexts_in_use(), 0, "nothing borrowed");
    }
}
