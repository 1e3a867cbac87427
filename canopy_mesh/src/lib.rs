// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Mesh: procedural vertex and index buffers for retained UI graphics.
//!
//! Every visual element of a Canopy scene is ultimately a triangle list. This crate owns the
//! geometry side of that story:
//!
//! - [`VertexHelper`] accumulates vertices and triangle indices for one populate pass, carrying the
//!   ambient content rectangle, UV rectangle and default vertex color.
//! - [`MeshFactory`] is implemented by every shape generator: [`RectMesh`], [`RoundedRectMesh`],
//!   [`EllipseMesh`], [`PolygonMesh`], [`RegularPolygonMesh`] and the reveal-style [`FillMesh`].
//! - [`ShapeKind`] is the closed set of generators with their point-inclusion tests.
//! - [`Graphics`] binds a generator to a texture, tint, alpha and flip state, rebuilds lazily, and
//!   hands world-space [`PaintVertex`] buffers to a [`Painter`].
//!
//! Coordinates are y-down, in the local space of the owning node. Triangles are emitted as index
//! triples into the vertex list.
//!
//! ## Minimal usage
//!
//! ```
//! use canopy_mesh::{Color, MeshFactory, RectMesh, VertexHelper};
//! use kurbo::Rect;
//!
//! let mut vh = VertexHelper::new(Rect::new(0.0, 0.0, 100.0, 40.0));
//! let rect = RectMesh {
//!     line_width: 2.0,
//!     line_color: Color::BLACK,
//!     ..RectMesh::default()
//! };
//! rect.populate_mesh(&mut vh);
//!
//! // Four border strips plus the inset fill.
//! assert_eq!(vh.vert_count(), 20);
//! assert_eq!(vh.buffer().triangle_count(), 10);
//! ```

mod color;
mod ellipse;
mod fill;
mod graphics;
mod polygon;
mod rect;
mod regular_polygon;
mod ring;
mod rounded_rect;
mod shape;
mod vertex;

pub use color::{Color, PaintVertex, Vertex};
pub use ellipse::EllipseMesh;
pub use fill::{FillMesh, FillMethod, FillOrigin};
pub use graphics::{FlipType, Graphics, Painter, TextureHandle, TextureProvider};
pub use polygon::{PolygonMesh, triangulate};
pub use rect::RectMesh;
pub use regular_polygon::RegularPolygonMesh;
pub use rounded_rect::RoundedRectMesh;
pub use shape::{MeshFactory, ShapeKind};
pub use vertex::{VertexBuffer, VertexHelper};
