// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Tween: a pooled, indexed tween scheduler.
//!
//! ## Overview
//!
//! A [`TweenManager`] owns every running tween. Tweens are created through it
//! ([`TweenManager::to`], [`TweenManager::to_vec2`], [`TweenManager::shake`],
//! [`TweenManager::delayed_call`], ...), configured with chained setters on the returned
//! [`Tweener`], and advanced once per frame by [`TweenManager::tick`].
//!
//! ## Handles
//!
//! Each tween is addressed by a [`TweenerHandle`]: a slot index plus the serial of the slot's
//! occupant. Killing a tween invalidates the caller's handle at once; the slot itself is recycled
//! by the next tick and gets a new serial when reused, so a handle captured before a kill can never
//! address a later tween.
//!
//! ## Targets
//!
//! Tweens never own what they animate. A tween may be bound to a key `K` and a [`TweenProp`];
//! every tick asks the [`TweenTargets`] implementation whether the key is still alive (a dead
//! target cancels its tweens silently) and hands it each new value.
//!
//! ## Example
//!
//! ```
//! use canopy_tween::{EaseType, NoTargets, TweenManager};
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let mut tweens: TweenManager<u32> = TweenManager::new();
//! let seen = Rc::new(Cell::new(0.0));
//! let s = seen.clone();
//! let handle = tweens
//!     .to(0.0, 100.0, 1.0)
//!     .set_ease(EaseType::Linear)
//!     .on_update(move |tw, _, _| s.set(tw.value().x))
//!     .handle();
//!
//! tweens.tick(0.5, &mut NoTargets);
//! assert_eq!(seen.get(), 50.0);
//!
//! tweens.tick(0.5, &mut NoTargets);
//! assert_eq!(seen.get(), 100.0);
//! // Finished tweens no longer resolve.
//! assert!(tweens.get_tween(handle).is_none());
//! ```

mod ease;
mod handle;
mod manager;
mod path;
mod target;
mod tweener;
mod value;

pub use ease::{DEFAULT_OVERSHOOT, EaseType};
pub use handle::TweenerHandle;
pub use manager::TweenManager;
pub use path::{CurveType, PathPoint, TweenPath};
pub use target::{NoTargets, TweenProp, TweenTargets};
pub use tweener::{TweenCallback, Tweener};
pub use value::TweenValue;
