// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Scene: the retained display-node tree.
//!
//! A [`Scene`] is a generational slot arena of [`DisplayNode`]s rooted at a stage node. Each node
//! carries a transform (position, scale, rotation), opacity, [`NodeFlags`], and optionally a
//! [`Graphics`](canopy_mesh::Graphics) binding that doubles as its precise hit-test shape.
//!
//! - Structure: [`Scene::add_child`], [`Scene::add_child_at`], [`Scene::remove_child`],
//!   [`Scene::set_child_index`], [`Scene::child_at`], [`Scene::destroy`].
//! - Queries: [`Scene::hit_test`] (topmost node and its root path), [`Scene::world_transform`],
//!   [`Scene::global_to_local`], [`Scene::descendants`], [`Scene::is_on_stage`].
//! - Output: [`Scene::paint`] walks visible nodes and hands their buffers to a
//!   [`Painter`](canopy_mesh::Painter).
//!
//! The scene does not dispatch events; that is the job of the stage built on top of it.
//!
//! ## Example
//!
//! ```
//! use canopy_mesh::Color;
//! use canopy_scene::Scene;
//! use kurbo::{Point, Size};
//!
//! let mut scene = Scene::new(Size::new(320.0, 240.0));
//! let button = scene.create_child(scene.root(), Size::new(80.0, 30.0));
//! let node = scene.node_mut(button).unwrap();
//! node.set_position(Point::new(10.0, 10.0));
//! node.ensure_graphics().draw_rect(1.0, Color::BLACK, Color::WHITE);
//!
//! let hit = scene.hit_test(Point::new(20.0, 20.0)).unwrap();
//! assert_eq!(hit.node, button);
//! assert_eq!(hit.path, vec![scene.root(), button]);
//! ```

mod node;
mod query;
mod scene;
mod types;

pub use node::DisplayNode;
pub use query::Hit;
pub use scene::Scene;
pub use types::{NodeFlags, NodeId};
