// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The mesh factory seam and the closed set of shape generators.

use kurbo::{Point, Rect};

use crate::ellipse::EllipseMesh;
use crate::fill::FillMesh;
use crate::polygon::PolygonMesh;
use crate::rect::RectMesh;
use crate::regular_polygon::RegularPolygonMesh;
use crate::rounded_rect::RoundedRectMesh;
use crate::vertex::VertexHelper;

/// Anything that can emit geometry into a [`VertexHelper`].
///
/// Generators read `content_rect`, `uv_rect` and `vertex_color` from the helper and append
/// vertices and triangles. They never clear the helper.
pub trait MeshFactory {
    /// Append this generator's geometry.
    fn populate_mesh(&self, vh: &mut VertexHelper);
}

/// One of the built-in generators.
#[derive(Clone, Debug, PartialEq)]
pub enum ShapeKind {
    /// Axis-aligned rectangle with optional stroke.
    Rect(RectMesh),
    /// Rectangle with per-corner radii.
    RoundedRect(RoundedRectMesh),
    /// Ellipse or elliptical sector.
    Ellipse(EllipseMesh),
    /// Arbitrary simple polygon.
    Polygon(PolygonMesh),
    /// Regular polygon with optional per-vertex distances.
    RegularPolygon(RegularPolygonMesh),
    /// Progressive reveal fill.
    Fill(FillMesh),
}

impl ShapeKind {
    /// Point inclusion against the shape drawn into `content_rect`.
    ///
    /// Returns `None` for generators that have no shape-specific test ([`ShapeKind::Fill`]); the
    /// caller falls back to its bounds.
    pub fn hit_test(&self, content_rect: Rect, pt: Point) -> Option<bool> {
        match self {
            Self::Rect(m) => Some(m.hit_test(content_rect, pt)),
            Self::RoundedRect(m) => Some(m.hit_test(content_rect, pt)),
            Self::Ellipse(m) => Some(m.hit_test(content_rect, pt)),
            Self::Polygon(m) => Some(m.hit_test(content_rect, pt)),
            Self::RegularPolygon(m) => Some(m.hit_test(content_rect, pt)),
            Self::Fill(_) => None,
        }
    }
}

impl MeshFactory for ShapeKind {
    fn populate_mesh(&self, vh: &mut VertexHelper) {
        match self {
            Self::Rect(m) => m.populate_mesh(vh),
            Self::RoundedRect(m) => m.populate_mesh(vh),
            Self::Ellipse(m) => m.populate_mesh(vh),
            Self::Polygon(m) => m.populate_mesh(vh),
            Self::RegularPolygon(m) => m.populate_mesh(vh),
            Self::Fill(m) => m.populate_mesh(vh),
        }
    }
}

macro_rules! shape_from {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for ShapeKind {
                fn from(m: $ty) -> Self {
                    Self::$variant(m)
                }
            }
        )*
    };
}

shape_from!(
    Rect(RectMesh),
    RoundedRect(RoundedRectMesh),
    Ellipse(EllipseMesh),
    Polygon(PolygonMesh),
    RegularPolygon(RegularPolygonMesh),
    Fill(FillMesh),
);
