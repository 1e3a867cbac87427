// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy: a retained-mode UI stage.
//!
//! A [`Stage`] owns a [`Scene`] of display nodes and makes it interactive:
//!
//! - Listeners: [`Stage::on`] registers a callback per node and [`EventType`]. Events are
//!   delivered directly ([`Stage::dispatch`]), child to root ([`Stage::bubble`]) or to a whole
//!   subtree ([`Stage::broadcast`]). Each delivery borrows a pooled [`EventContext`], so
//!   listeners may dispatch further events.
//! - Pointer input: [`Stage::pointer_down`], [`Stage::pointer_move`] and [`Stage::pointer_up`]
//!   drive roll-over, touch capture, clicks (cancelled once the pointer strays beyond
//!   [`UiConfig::click_cancel_distance`]), node dragging and drag-and-drop.
//! - Popups close when a press lands outside them; windows keep modal ones on top above a
//!   modal layer.
//! - Tweens: [`Stage::tween`] animates node properties, advanced by [`Stage::tick`].
//!
//! ## Example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use canopy::{EventType, InputSnapshot, Stage, TouchId};
//! use canopy_mesh::Color;
//! use kurbo::{Point, Size};
//!
//! let mut stage = Stage::new(Size::new(320.0, 240.0));
//! let button = stage.create_child(stage.root(), Size::new(80.0, 30.0));
//! stage
//!     .scene_mut()
//!     .node_mut(button)
//!     .unwrap()
//!     .ensure_graphics()
//!     .draw_rect(1.0, Color::BLACK, Color::WHITE);
//!
//! let clicks = Rc::new(Cell::new(0));
//! let c = Rc::clone(&clicks);
//! stage.on(button, EventType::Click, move |_, _| c.set(c.get() + 1));
//!
//! let at = InputSnapshot::at(TouchId::PRIMARY, Point::new(10.0, 10.0));
//! stage.pointer_down(at);
//! stage.pointer_up(at);
//! stage.tick(1.0 / 60.0);
//! assert_eq!(clicks.get(), 1);
//! ```

mod config;
mod dispatch;
mod input;
mod listeners;
mod popup;
mod stage;
mod targets;
mod window;

pub use config::{ConfigError, PopupDirection, UiConfig};
pub use listeners::{Listener, ListenerId};
pub use stage::Stage;
pub use targets::SceneTargets;

pub use canopy_responder::{EventContext, EventType, InputSnapshot, MouseButton, TouchId};
pub use canopy_scene::{NodeId, Scene};
