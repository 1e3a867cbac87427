// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Regular polygons and star shapes.

use core::f64::consts::{FRAC_PI_2, TAU};

use kurbo::{Point, Rect, Vec2};

use crate::color::Color;
use crate::polygon::even_odd_contains;
use crate::ring::{RingClosure, add_ring_triangles};
use crate::shape::MeshFactory;
use crate::vertex::VertexHelper;

/// Regular polygon inscribed in the largest circle centered in the draw rectangle.
///
/// The first vertex points up; `rotation` turns the shape clockwise. `distances` scales the
/// radius per vertex, which turns an even-sided polygon into a star while keeping the fan
/// triangulation unchanged.
#[derive(Clone, Debug, PartialEq)]
pub struct RegularPolygonMesh {
    /// Bounding rectangle; the helper's content rectangle when `None`.
    pub draw_rect: Option<Rect>,
    /// Number of sides. Zero draws nothing.
    pub sides: usize,
    /// Rotation in degrees.
    pub rotation: f64,
    /// Per-vertex radius factors; must hold at least `sides` entries when present.
    pub distances: Option<Vec<f64>>,
    /// Stroke width; `0` draws no stroke.
    pub line_width: f64,
    /// Stroke color.
    pub line_color: Color,
    /// Fill color; the helper's vertex color when `None`.
    pub fill_color: Option<Color>,
    /// Color of the center vertex; the fill color when `None`.
    pub center_color: Option<Color>,
}

impl Default for RegularPolygonMesh {
    fn default() -> Self {
        Self {
            draw_rect: None,
            sides: 3,
            rotation: 0.0,
            distances: None,
            line_width: 0.0,
            line_color: Color::BLACK,
            fill_color: None,
            center_color: None,
        }
    }
}

impl RegularPolygonMesh {
    /// Polygon with `sides` sides and default styling.
    pub fn new(sides: usize) -> Self {
        Self {
            sides,
            ..Self::default()
        }
    }

    /// Unit directions and radii of the outline vertices, or `None` if the shape is degenerate.
    fn spokes(&self, rect: Rect) -> Option<Vec<(Vec2, f64)>> {
        if self.sides == 0 {
            return None;
        }
        if let Some(d) = &self.distances {
            if d.len() < self.sides {
                log::error!(
                    "regular polygon has {} sides but only {} distances",
                    self.sides,
                    d.len()
                );
                return None;
            }
        }
        let radius = rect.width().min(rect.height()) * 0.5;
        if radius <= 0.0 {
            return None;
        }
        let start = self.rotation.to_radians() - FRAC_PI_2;
        let step = TAU / self.sides as f64;
        Some(
            (0..self.sides)
                .map(|k| {
                    let factor = self.distances.as_ref().map_or(1.0, |d| d[k]);
                    (Vec2::from_angle(start + step * k as f64), radius * factor)
                })
                .collect(),
        )
    }

    /// Even-odd point inclusion against the outline.
    pub fn hit_test(&self, content_rect: Rect, pt: Point) -> bool {
        let rect = self.draw_rect.unwrap_or(content_rect);
        let Some(spokes) = self.spokes(rect) else {
            return false;
        };
        let center = rect.center();
        let outline: Vec<Point> = spokes.iter().map(|&(d, r)| center + d * r).collect();
        even_odd_contains(&outline, pt)
    }
}

impl MeshFactory for RegularPolygonMesh {
    fn populate_mesh(&self, vh: &mut VertexHelper) {
        let rect = self.draw_rect.unwrap_or(vh.content_rect);
        let Some(spokes) = self.spokes(rect) else {
            return;
        };
        let fill = self.fill_color.unwrap_or(vh.vertex_color);
        let lw = self.line_width.max(0.0);
        let stroked = lw > 0.0;
        let center = rect.center();

        let base = vh.vert_count();
        vh.add_vert_with_color(center, self.center_color.unwrap_or(fill));
        for &(dir, r) in &spokes {
            let outer = center + dir * r;
            if stroked {
                let inner = center + dir * (r - lw).max(0.0);
                vh.add_vert_with_color(inner, fill);
                vh.add_vert_with_color(inner, self.line_color);
                vh.add_vert_with_color(outer, self.line_color);
            } else {
                vh.add_vert_with_color(outer, fill);
            }
        }
        add_ring_triangles(vh, base, spokes.len(), stroked, RingClosure::Closed);
    }
}
