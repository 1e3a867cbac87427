// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rounded rectangle as a center fan over four tessellated corners.

use core::f64::consts::{FRAC_PI_2, PI};

use kurbo::{Point, Rect, RoundedRect, RoundedRectRadii, Shape, Vec2};

use crate::color::Color;
use crate::rect::RectMesh;
use crate::ring::{RingClosure, add_ring_triangles};
use crate::shape::MeshFactory;
use crate::vertex::VertexHelper;

/// Rounded rectangle generator with independent corner radii.
///
/// Radii are clamped to half the smaller side. When every radius is zero the output is exactly
/// that of [`RectMesh`] with the same stroke and fill.
#[derive(Clone, Debug, PartialEq)]
pub struct RoundedRectMesh {
    /// Rectangle to draw; the helper's content rectangle when `None`.
    pub draw_rect: Option<Rect>,
    /// Stroke width; `0` draws no stroke.
    pub line_width: f64,
    /// Stroke color.
    pub line_color: Color,
    /// Fill color; the helper's vertex color when `None`.
    pub fill_color: Option<Color>,
    /// Top-left corner radius.
    pub top_left_radius: f64,
    /// Top-right corner radius.
    pub top_right_radius: f64,
    /// Bottom-left corner radius.
    pub bottom_left_radius: f64,
    /// Bottom-right corner radius.
    pub bottom_right_radius: f64,
}

impl Default for RoundedRectMesh {
    fn default() -> Self {
        Self {
            draw_rect: None,
            line_width: 0.0,
            line_color: Color::BLACK,
            fill_color: None,
            top_left_radius: 0.0,
            top_right_radius: 0.0,
            bottom_left_radius: 0.0,
            bottom_right_radius: 0.0,
        }
    }
}

impl RoundedRectMesh {
    /// Uniform corner radius.
    pub fn with_radius(radius: f64) -> Self {
        Self {
            top_left_radius: radius,
            top_right_radius: radius,
            bottom_left_radius: radius,
            bottom_right_radius: radius,
            ..Self::default()
        }
    }

    /// Radii in ring order (bottom-right, bottom-left, top-left, top-right), clamped.
    fn ring_radii(&self, rect: Rect) -> [f64; 4] {
        let max = (rect.width() * 0.5).min(rect.height() * 0.5).max(0.0);
        [
            self.bottom_right_radius,
            self.bottom_left_radius,
            self.top_left_radius,
            self.top_right_radius,
        ]
        .map(|r| r.clamp(0.0, max))
    }

    /// Point inclusion against the rounded outline.
    pub fn hit_test(&self, content_rect: Rect, pt: Point) -> bool {
        let rect = self.draw_rect.unwrap_or(content_rect);
        let [br, bl, tl, tr] = self.ring_radii(rect);
        RoundedRect::from_rect(rect, RoundedRectRadii::new(tl, tr, br, bl)).contains(pt)
    }
}

impl MeshFactory for RoundedRectMesh {
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "Segment counts are small positive integers."
    )]
    fn populate_mesh(&self, vh: &mut VertexHelper) {
        let rect = self.draw_rect.unwrap_or(vh.content_rect);
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return;
        }
        let radii = self.ring_radii(rect);
        if radii.iter().all(|&r| r <= 0.0) {
            RectMesh {
                draw_rect: Some(rect),
                line_width: self.line_width,
                line_color: self.line_color,
                fill_color: self.fill_color,
                colors: None,
            }
            .populate_mesh(vh);
            return;
        }

        let fill = self.fill_color.unwrap_or(vh.vertex_color);
        let lw = self.line_width.max(0.0);
        let stroked = lw > 0.0;
        let base = vh.vert_count();
        vh.add_vert_with_color(rect.center(), fill);

        for (i, r) in radii.into_iter().enumerate() {
            let right = i == 0 || i == 3;
            let bottom = i == 0 || i == 1;
            let cx = if right { rect.x1 - r } else { rect.x0 + r };
            let cy = if bottom { rect.y1 - r } else { rect.y0 + r };
            let arc_center = Point::new(cx, cy);

            if r <= 0.0 {
                if stroked {
                    let inward = Vec2::new(
                        if right { -lw } else { lw },
                        if bottom { -lw } else { lw },
                    );
                    let inner = arc_center + inward;
                    vh.add_vert_with_color(inner, fill);
                    vh.add_vert_with_color(inner, self.line_color);
                    vh.add_vert_with_color(arc_center, self.line_color);
                } else {
                    vh.add_vert_with_color(arc_center, fill);
                }
                continue;
            }

            let segments = ((PI * r / 8.0).ceil() as usize).max(1);
            let start = FRAC_PI_2 * i as f64;
            let inner_r = (r - lw).max(0.0);
            for j in 0..=segments {
                let angle = if j == segments {
                    start + FRAC_PI_2
                } else {
                    start + FRAC_PI_2 * j as f64 / segments as f64
                };
                let dir = Vec2::from_angle(angle);
                let outer = arc_center + dir * r;
                if stroked {
                    let inner = arc_center + dir * inner_r;
                    vh.add_vert_with_color(inner, fill);
                    vh.add_vert_with_color(inner, self.line_color);
                    vh.add_vert_with_color(outer, self.line_color);
                } else {
                    vh.add_vert_with_color(outer, fill);
                }
            }
        }

        let ring = vh.vert_count() - base - 1;
        let groups = if stroked { ring / 3 } else { ring };
        add_ring_triangles(vh, base, groups, stroked, RingClosure::Closed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build<M: MeshFactory>(mesh: &M, rect: Rect) -> VertexHelper {
        let mut vh = VertexHelper::new(rect);
        mesh.populate_mesh(&mut vh);
        vh
    }

    #[test]
    fn zero_radii_match_plain_rect() {
        let rect = Rect::new(0.0, 0.0, 80.0, 30.0);
        for lw in [0.0, 2.0] {
            let rounded = RoundedRectMesh {
                line_width: lw,
                ..RoundedRectMesh::default()
            };
            let plain = RectMesh {
                line_width: lw,
                ..RectMesh::default()
            };
            let a = build(&rounded, rect);
            let b = build(&plain, rect);
            assert_eq!(a.buffer().triangle_count(), b.buffer().triangle_count());
            assert_eq!(a.vert_count(), b.vert_count());
            assert!((a.buffer().area() - b.buffer().area()).abs() < 1e-9);
        }
    }

    #[test]
    fn corner_tessellation_follows_radius() {
        // radius 8 → ceil(π) = 4 segments, 5 samples per corner.
        let vh = build(
            &RoundedRectMesh::with_radius(8.0),
            Rect::new(0.0, 0.0, 100.0, 50.0),
        );
        assert_eq!(vh.vert_count(), 1 + 4 * 5);
        assert_eq!(vh.buffer().triangle_count(), 20);
        let exact = 100.0 * 50.0 - (4.0 - PI) * 64.0;
        let area = vh.buffer().area();
        assert!(area <= exact + 1e-6 && area > exact * 0.99, "area {area}");
    }

    #[test]
    fn stroked_ring_uses_three_vertices_per_sample() {
        let mesh = RoundedRectMesh {
            line_width: 2.0,
            ..RoundedRectMesh::with_radius(8.0)
        };
        let vh = build(&mesh, Rect::new(0.0, 0.0, 100.0, 50.0));
        assert_eq!(vh.vert_count(), 1 + 4 * 5 * 3);
        assert_eq!(vh.buffer().triangle_count(), 20 * 3);
    }

    #[test]
    fn mixed_zero_radius_corner_is_a_point() {
        let mesh = RoundedRectMesh {
            top_left_radius: 10.0,
            ..RoundedRectMesh::default()
        };
        let vh = build(&mesh, Rect::new(0.0, 0.0, 40.0, 40.0));
        // 3 point corners plus ceil(10π/8) = 4 segments → 5 samples.
        assert_eq!(vh.vert_count(), 1 + 3 + 5);
    }

    #[test]
    fn radius_is_clamped_to_half_the_short_side() {
        let vh = build(
            &RoundedRectMesh::with_radius(500.0),
            Rect::new(0.0, 0.0, 40.0, 20.0),
        );
        let bounds = vh.buffer().bounds().unwrap();
        assert!((bounds.width() - 40.0).abs() < 1e-9);
        assert!((bounds.height() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn hit_test_excludes_rounded_corner() {
        let mesh = RoundedRectMesh::with_radius(10.0);
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(!mesh.hit_test(rect, Point::new(1.0, 1.0)));
        assert!(mesh.hit_test(rect, Point::new(50.0, 1.0)));
        assert!(mesh.hit_test(rect, Point::new(50.0, 50.0)));
    }
}
