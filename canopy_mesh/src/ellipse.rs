// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ellipses and elliptical sectors.

use core::f64::consts::{FRAC_PI_2, PI, TAU};

use kurbo::{Point, Rect, Vec2};

use crate::color::Color;
use crate::ring::{RingClosure, add_ring_triangles};
use crate::shape::MeshFactory;
use crate::vertex::VertexHelper;

/// Cap fan joining the two cut edges of a stroked sector, relative to its first vertex.
const SECTOR_CAP_TRIANGLES: [usize; 24] = [
    0, 4, 1, 0, 3, 4, 0, 2, 3, //
    0, 8, 5, 0, 7, 8, 0, 6, 7, //
    6, 5, 2, 2, 1, 6,
];

/// Ellipse generator, optionally restricted to an angular section.
///
/// Angles are in degrees, measured from the positive x axis towards positive y (clockwise on a
/// y-down screen).
#[derive(Clone, Debug, PartialEq)]
pub struct EllipseMesh {
    /// Bounding rectangle; the helper's content rectangle when `None`.
    pub draw_rect: Option<Rect>,
    /// Stroke width; `0` draws no stroke.
    pub line_width: f64,
    /// Stroke color.
    pub line_color: Color,
    /// Fill color; the helper's vertex color when `None`.
    pub fill_color: Option<Color>,
    /// Color of the center vertex; the fill color when `None`.
    pub center_color: Option<Color>,
    /// Section start, in degrees.
    pub start_degree: f64,
    /// Section end, in degrees.
    pub end_degree: f64,
}

impl Default for EllipseMesh {
    fn default() -> Self {
        Self {
            draw_rect: None,
            line_width: 0.0,
            line_color: Color::BLACK,
            fill_color: None,
            center_color: None,
            start_degree: 0.0,
            end_degree: 360.0,
        }
    }
}

impl EllipseMesh {
    /// Number of outline samples for the given radii.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "Side count is clamped to a small positive range."
    )]
    pub fn side_count(rx: f64, ry: f64) -> usize {
        let sides = (PI * (rx + ry) / 4.0).ceil().max(0.0) as usize;
        sides.clamp(40, 800)
    }

    fn section(&self) -> (f64, f64) {
        (
            self.start_degree.clamp(0.0, 360.0),
            self.end_degree.clamp(0.0, 360.0),
        )
    }

    /// Point inclusion against the ellipse and its angular section.
    pub fn hit_test(&self, content_rect: Rect, pt: Point) -> bool {
        let rect = self.draw_rect.unwrap_or(content_rect);
        let rx = rect.width() * 0.5;
        let ry = rect.height() * 0.5;
        if rx <= 0.0 || ry <= 0.0 {
            return false;
        }
        let d = pt - rect.center();
        let n = Vec2::new(d.x / rx, d.y / ry);
        if n.hypot2() >= 1.0 {
            return false;
        }
        let (start, end) = self.section();
        if start <= 0.0 && end >= 360.0 {
            return true;
        }
        let mut deg = d.y.atan2(d.x).to_degrees();
        if deg < 0.0 {
            deg += 360.0;
        }
        deg >= start && deg <= end
    }
}

impl MeshFactory for EllipseMesh {
    fn populate_mesh(&self, vh: &mut VertexHelper) {
        let rect = self.draw_rect.unwrap_or(vh.content_rect);
        let rx = rect.width() * 0.5;
        let ry = rect.height() * 0.5;
        if rx <= 0.0 || ry <= 0.0 {
            return;
        }
        let (start_deg, end_deg) = self.section();
        if end_deg <= start_deg {
            return;
        }
        let clipped = start_deg > 0.0 || end_deg < 360.0;
        let start = start_deg.to_radians();
        let end = end_deg.to_radians();

        let lw = self.line_width.max(0.0);
        let stroked = lw > 0.0;
        let line_angle = if stroked && clipped { lw / rx.max(ry) } else { 0.0 };
        let sec_start = start + line_angle;
        let sec_end = (end - line_angle).max(sec_start);

        let fill = self.fill_color.unwrap_or(vh.vertex_color);
        let center = rect.center();
        let sides = Self::side_count(rx, ry);
        let delta = TAU / sides as f64;
        // A section needs its closing sample at the end angle; a full loop wraps instead.
        let samples = if clipped { sides + 1 } else { sides };

        let base = vh.vert_count();
        vh.add_vert_with_color(center, self.center_color.unwrap_or(fill));
        for k in 0..samples {
            let angle = (k as f64 * delta).max(sec_start).min(sec_end);
            let dir = Vec2::from_angle(angle);
            let outer = center + Vec2::new(dir.x * rx, dir.y * ry);
            if stroked {
                let inner = center
                    + Vec2::new(dir.x * (rx - lw).max(0.0), dir.y * (ry - lw).max(0.0));
                vh.add_vert_with_color(inner, fill);
                vh.add_vert_with_color(inner, self.line_color);
                vh.add_vert_with_color(outer, self.line_color);
            } else {
                vh.add_vert_with_color(outer, fill);
            }
        }
        let closure = if clipped {
            RingClosure::Open
        } else {
            RingClosure::Closed
        };
        add_ring_triangles(vh, base, samples, stroked, closure);

        if stroked && clipped {
            let on_ellipse = |a: f64| {
                let d = Vec2::from_angle(a);
                center + Vec2::new(d.x * rx, d.y * ry)
            };
            let half = lw * 0.5;
            let first_outer = vh.buffer().vertices[base + 3].position;
            let last_outer = vh.buffer().vertices[base + samples * 3].position;
            let start_axis = start + line_angle * 0.5;
            let end_axis = end - line_angle * 0.5;
            let cap_start = vh.vert_count();
            let cap = [
                center,
                center + Vec2::from_angle(start_axis + FRAC_PI_2) * half,
                center + Vec2::from_angle(start_axis - FRAC_PI_2) * half,
                on_ellipse(start),
                first_outer,
                center + Vec2::from_angle(end_axis + FRAC_PI_2) * half,
                center + Vec2::from_angle(end_axis - FRAC_PI_2) * half,
                last_outer,
                on_ellipse(end),
            ];
            for p in cap {
                vh.add_vert_with_color(p, self.line_color);
            }
            vh.add_triangles_from(&SECTOR_CAP_TRIANGLES, cap_start);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(mesh: &EllipseMesh, rect: Rect) -> VertexHelper {
        let mut vh = VertexHelper::new(rect);
        mesh.populate_mesh(&mut vh);
        vh
    }

    #[test]
    fn side_count_is_clamped() {
        assert_eq!(EllipseMesh::side_count(1.0, 1.0), 40);
        assert_eq!(EllipseMesh::side_count(50.0, 50.0), 79);
        assert_eq!(EllipseMesh::side_count(5000.0, 5000.0), 800);
    }

    #[test]
    fn full_ellipse_is_a_closed_fan() {
        let vh = build(&EllipseMesh::default(), Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(vh.vert_count(), 80);
        assert_eq!(vh.buffer().triangle_count(), 79);
        let exact = PI * 50.0 * 50.0;
        let area = vh.buffer().area();
        assert!((exact - area) / exact < 0.01, "area {area} vs {exact}");
    }

    #[test]
    fn half_section_covers_half_the_area() {
        let mesh = EllipseMesh {
            end_degree: 180.0,
            ..EllipseMesh::default()
        };
        let vh = build(&mesh, Rect::new(0.0, 0.0, 100.0, 100.0));
        let exact = PI * 50.0 * 50.0 * 0.5;
        let area = vh.buffer().area();
        assert!((exact - area).abs() / exact < 0.01, "area {area} vs {exact}");
        let bounds = vh.buffer().bounds().unwrap();
        assert!(bounds.y0 >= 50.0 - 1e-9, "section lies below the center");
    }

    #[test]
    fn stroked_sector_adds_cap() {
        let mesh = EllipseMesh {
            line_width: 2.0,
            start_degree: 45.0,
            end_degree: 270.0,
            ..EllipseMesh::default()
        };
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        let vh = build(&mesh, rect);
        let sides = EllipseMesh::side_count(50.0, 50.0);
        assert_eq!(vh.vert_count(), 1 + (sides + 1) * 3 + 9);
        let max_index = *vh.buffer().triangles.iter().max().unwrap() as usize;
        assert_eq!(max_index, vh.vert_count() - 1);
    }

    #[test]
    fn empty_section_is_empty() {
        let mesh = EllipseMesh {
            start_degree: 90.0,
            end_degree: 90.0,
            ..EllipseMesh::default()
        };
        assert!(build(&mesh, Rect::new(0.0, 0.0, 10.0, 10.0)).buffer().is_empty());
        assert!(
            build(&EllipseMesh::default(), Rect::ZERO)
                .buffer()
                .is_empty()
        );
    }

    #[test]
    fn hit_test_respects_radius_and_section() {
        let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
        let full = EllipseMesh::default();
        assert!(full.hit_test(rect, Point::new(50.0, 25.0)));
        assert!(full.hit_test(rect, Point::new(95.0, 25.0)));
        assert!(!full.hit_test(rect, Point::new(2.0, 2.0)));

        let lower = EllipseMesh {
            end_degree: 180.0,
            ..EllipseMesh::default()
        };
        assert!(lower.hit_test(rect, Point::new(50.0, 40.0)));
        assert!(!lower.hit_test(rect, Point::new(50.0, 10.0)));
    }
}
