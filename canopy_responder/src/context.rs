// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event contexts and the pool they are borrowed from.
//!
//! A dispatcher borrows one [`EventContext`] per dispatch with [`ContextPool::borrow`], hands
//! `&mut` to every listener in the chain, and gives it back with [`ContextPool::give_back`].
//! Nested dispatches from inside a listener borrow a different context, so the outer one is
//! never clobbered. Contexts are owned values; a dispatch that unwinds just drops its context.

use std::any::Any;
use std::fmt;

use crate::types::{EventType, InputSnapshot};

/// The record passed to listeners for one dispatch.
pub struct EventContext<K> {
    event_type: EventType,
    sender: Option<K>,
    initiator: Option<K>,
    input: InputSnapshot,
    data: Option<Box<dyn Any>>,
    stopped: bool,
    default_prevented: bool,
    capture_requested: bool,
    lease: u32,
}

impl<K: fmt::Debug> fmt::Debug for EventContext<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventContext")
            .field("event_type", &self.event_type)
            .field("sender", &self.sender)
            .field("initiator", &self.initiator)
            .field("input", &self.input)
            .field("has_data", &self.data.is_some())
            .field("stopped", &self.stopped)
            .field("default_prevented", &self.default_prevented)
            .field("capture_requested", &self.capture_requested)
            .field("lease", &self.lease)
            .finish()
    }
}

impl<K: Copy> EventContext<K> {
    fn blank() -> Self {
        Self {
            event_type: EventType::Changed,
            sender: None,
            initiator: None,
            input: InputSnapshot::default(),
            data: None,
            stopped: false,
            default_prevented: false,
            capture_requested: false,
            lease: 0,
        }
    }

    /// Fill the context for a new dispatch.
    pub fn begin(
        &mut self,
        event_type: EventType,
        initiator: Option<K>,
        input: InputSnapshot,
        data: Option<Box<dyn Any>>,
    ) {
        self.event_type = event_type;
        self.sender = initiator;
        self.initiator = initiator;
        self.input = input;
        self.data = data;
    }

    /// The event type.
    pub fn event_type(&self) -> &EventType {
        &self.event_type
    }

    /// Node whose listener is currently running.
    pub fn sender(&self) -> Option<K> {
        self.sender
    }

    /// Set the node whose listener runs next. Dispatchers call this while walking the chain.
    pub fn set_sender(&mut self, sender: Option<K>) {
        self.sender = sender;
    }

    /// Node the dispatch started from.
    pub fn initiator(&self) -> Option<K> {
        self.initiator
    }

    /// Set the node the dispatch is attributed to. Broadcasts make every visited node its own
    /// initiator.
    pub fn set_initiator(&mut self, initiator: Option<K>) {
        self.initiator = initiator;
    }

    /// Pointer state at dispatch time.
    pub fn input(&self) -> &InputSnapshot {
        &self.input
    }

    /// Payload, if any.
    pub fn data(&self) -> Option<&dyn Any> {
        self.data.as_deref()
    }

    /// Payload downcast to `T`.
    pub fn data_as<T: Any>(&self) -> Option<&T> {
        self.data.as_deref()?.downcast_ref()
    }

    /// Replace the payload.
    pub fn set_data(&mut self, data: Option<Box<dyn Any>>) {
        self.data = data;
    }

    /// Take the payload out of the context.
    pub fn take_data(&mut self) -> Option<Box<dyn Any>> {
        self.data.take()
    }

    /// Stop a bubbling dispatch after the current listener. Broadcasts ignore this.
    pub fn stop_propagation(&mut self) {
        self.stopped = true;
    }

    /// Whether a listener stopped propagation.
    pub fn is_propagation_stopped(&self) -> bool {
        self.stopped
    }

    /// Ask the initiator of a cancellable action (drag start, for instance) not to proceed.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Whether a listener prevented the default action.
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Ask the dispatcher to make the current sender a captor of this event's touch.
    pub fn capture_touch(&mut self) {
        self.capture_requested = true;
    }

    /// Whether capture was requested and not yet consumed.
    pub fn is_capture_requested(&self) -> bool {
        self.capture_requested
    }

    /// Consume a pending capture request.
    pub fn take_capture_request(&mut self) -> bool {
        std::mem::take(&mut self.capture_requested)
    }

    /// Stamp of the borrow this context belongs to. Every borrow gets a new one.
    pub fn lease(&self) -> u32 {
        self.lease
    }

    fn reset(&mut self, lease: u32) {
        self.sender = None;
        self.initiator = None;
        self.input = InputSnapshot::default();
        self.data = None;
        self.stopped = false;
        self.default_prevented = false;
        self.capture_requested = false;
        self.lease = lease;
    }
}

/// Free list of [`EventContext`]s.
pub struct ContextPool<K> {
    free: Vec<EventContext<K>>,
    next_lease: u32,
    outstanding: usize,
}

impl<K> fmt::Debug for ContextPool<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextPool")
            .field("free", &self.free.len())
            .field("next_lease", &self.next_lease)
            .field("outstanding", &self.outstanding)
            .finish()
    }
}

impl<K: Copy> Default for ContextPool<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy> ContextPool<K> {
    /// Empty pool.
    pub fn new() -> Self {
        Self {
            free: Vec::new(),
            next_lease: 1,
            outstanding: 0,
        }
    }

    /// Borrow a cleared context.
    pub fn borrow(&mut self) -> EventContext<K> {
        let mut ctx = self.free.pop().unwrap_or_else(EventContext::blank);
        let lease = self.next_lease;
        self.next_lease = self.next_lease.wrapping_add(1).max(1);
        ctx.reset(lease);
        self.outstanding += 1;
        ctx
    }

    /// Return a context borrowed from this pool.
    pub fn give_back(&mut self, mut ctx: EventContext<K>) {
        ctx.data = None;
        self.outstanding = self.outstanding.saturating_sub(1);
        self.free.push(ctx);
    }

    /// Contexts currently borrowed.
    pub fn outstanding(&self) -> usize {
        self.outstanding
    }

    /// Contexts waiting in the free list.
    pub fn free_count(&self) -> usize {
        self.free.len()
    }
}
