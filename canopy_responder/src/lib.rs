// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Responder: the event model underneath the stage.
//!
//! ## Overview
//!
//! This crate holds the parts of event handling that do not depend on who runs the listeners:
//!
//! - [`EventType`]: the event vocabulary shared by dispatchers and listeners.
//! - [`EventContext`] and [`ContextPool`]: the record handed to listeners, borrowed per
//!   dispatch and returned afterwards. Nested dispatches borrow distinct contexts.
//! - [`bubble_chain`] and [`broadcast_chain`]: delivery order. Bubbling goes from the
//!   initiator to the root and honors stop-propagation; broadcasts visit a subtree in
//!   pre-order and ignore it.
//! - [`TouchTracker`]: per-[`TouchId`] press state, captors, click cancellation and click
//!   attribution through the press-time path.
//! - [`RollOverState`]: minimal roll-out/roll-over transitions between hovered paths.
//! - [`PopupStack`]: nested popups closed by pointer presses outside them.
//!
//! Trees plug in through [`ParentLookup`] and [`ChildLookup`]; with the `scene_adapter`
//! feature, [`canopy_scene::Scene`](https://docs.rs/canopy_scene) implements both.
//!
//! ## Layering
//!
//! Nothing here executes listeners. A dispatcher borrows a context, walks a chain, calls its
//! listeners, acts on the flags they set, and returns the context.
//!
//! ## Example
//!
//! ```
//! use canopy_responder::{bubble_chain, ContextPool, EventType, InputSnapshot, ParentLookup};
//!
//! struct Parents;
//! impl ParentLookup<u32> for Parents {
//!     fn parent_of(&self, n: &u32) -> Option<u32> {
//!         (*n > 1).then(|| n - 1)
//!     }
//! }
//!
//! let mut pool = ContextPool::new();
//! let mut ctx = pool.borrow();
//! ctx.begin(EventType::Click, Some(3), InputSnapshot::default(), None);
//! let mut visited = Vec::new();
//! for node in bubble_chain(&Parents, 3, None) {
//!     ctx.set_sender(Some(node));
//!     visited.push(node);
//!     if node == 2 {
//!         ctx.stop_propagation();
//!     }
//!     if ctx.is_propagation_stopped() {
//!         break;
//!     }
//! }
//! pool.give_back(ctx);
//! assert_eq!(visited, vec![3, 2]);
//! ```

pub mod adapters;

mod chain;
mod context;
mod hover;
mod popup;
mod touch;
mod types;

pub use chain::{broadcast_chain, bubble_chain, common_target};
pub use context::{ContextPool, EventContext};
pub use hover::{RollChange, RollOverState};
pub use popup::{PopupEntry, PopupStack};
pub use touch::{Release, TouchInfo, TouchSettings, TouchTracker};
pub use types::{ChildLookup, EventType, InputSnapshot, MouseButton, ParentLookup, TouchId};
