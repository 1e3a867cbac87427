// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arbitrary simple polygons: ear-clipping fill and a mitered outline.

use kurbo::{Point, Rect, Vec2};

use crate::color::Color;
use crate::shape::MeshFactory;
use crate::vertex::VertexHelper;

/// Polygon generator.
///
/// Points are in local space, or fractions of the content rectangle when
/// `use_percent_positions` is set. Fewer than three points produce nothing.
#[derive(Clone, Debug, PartialEq)]
pub struct PolygonMesh {
    /// Outline points, in order. Either winding is accepted.
    pub points: Vec<Point>,
    /// Normalized texture coordinates per point, mapped into the helper's UV rectangle.
    pub texcoords: Option<Vec<Point>>,
    /// Interpret `points` as fractions of the content rectangle.
    pub use_percent_positions: bool,
    /// Outline width; `0` draws no outline.
    pub line_width: f64,
    /// Outline color.
    pub line_color: Color,
    /// Fill color; the helper's vertex color when `None`.
    pub fill_color: Option<Color>,
    /// Per-vertex fill colors, repeated over the points.
    pub colors: Option<Vec<Color>>,
}

impl Default for PolygonMesh {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            texcoords: None,
            use_percent_positions: false,
            line_width: 0.0,
            line_color: Color::BLACK,
            fill_color: None,
            colors: None,
        }
    }
}

impl PolygonMesh {
    /// Polygon over `points` with default styling.
    pub fn new(points: impl Into<Vec<Point>>) -> Self {
        Self {
            points: points.into(),
            ..Self::default()
        }
    }

    fn resolved_points(&self, content_rect: Rect) -> Vec<Point> {
        if self.use_percent_positions {
            self.points
                .iter()
                .map(|p| {
                    Point::new(
                        content_rect.x0 + p.x * content_rect.width(),
                        content_rect.y0 + p.y * content_rect.height(),
                    )
                })
                .collect()
        } else {
            self.points.clone()
        }
    }

    /// Even-odd point inclusion.
    pub fn hit_test(&self, content_rect: Rect, pt: Point) -> bool {
        even_odd_contains(&self.resolved_points(content_rect), pt)
    }
}

impl MeshFactory for PolygonMesh {
    fn populate_mesh(&self, vh: &mut VertexHelper) {
        let points = self.resolved_points(vh.content_rect);
        if points.len() < 3 {
            return;
        }
        let fill = self.fill_color.unwrap_or(vh.vertex_color);
        let start = vh.vert_count();
        let texcoords = self
            .texcoords
            .as_deref()
            .filter(|tc| tc.len() >= points.len());
        for (i, &p) in points.iter().enumerate() {
            match texcoords {
                Some(tc) => {
                    let uv = vh.uv_rect;
                    let t = tc[i];
                    let mapped = Point::new(uv.x0 + t.x * uv.width(), uv.y0 + t.y * uv.height());
                    vh.add_vert_full(p, fill, mapped);
                }
                None => vh.add_vert_with_color(p, fill),
            }
        }
        if let Some(colors) = &self.colors {
            vh.repeat_colors(colors, start, points.len());
        }
        for [a, b, c] in triangulate(&points) {
            vh.add_triangle(start + a, start + b, start + c);
        }
        if self.line_width > 0.0 {
            add_outline(vh, &points, self.line_width, self.line_color);
        }
    }
}

/// Ear-clipping triangulation of a simple polygon.
///
/// Returns index triples into `points`. A convex polygon with `n` points yields `n - 2`
/// triangles. Self-intersecting or otherwise degenerate input is tolerated: when a sweep finds no
/// ear, clipping stops and the first three remaining points form the last triangle.
pub fn triangulate(points: &[Point]) -> Vec<[usize; 3]> {
    let n = points.len();
    let mut out = Vec::with_capacity(n.saturating_sub(2));
    if n < 3 {
        return out;
    }
    let winding = if signed_area(points) < 0.0 { -1.0 } else { 1.0 };
    let mut rest: Vec<usize> = (0..n).collect();

    while rest.len() > 3 {
        let m = rest.len();
        let ear = (0..m).find(|&i| {
            let a = rest[(i + m - 1) % m];
            let b = rest[i];
            let c = rest[(i + 1) % m];
            let (pa, pb, pc) = (points[a], points[b], points[c]);
            if (pb - pa).cross(pc - pb) * winding < 0.0 {
                return false;
            }
            !rest
                .iter()
                .any(|&k| k != a && k != b && k != c && in_triangle(points[k], pa, pb, pc))
        });
        let Some(i) = ear else {
            log::debug!(
                "ear clipping stalled with {} points left; closing with the first three",
                rest.len()
            );
            break;
        };
        out.push([rest[(i + m - 1) % m], rest[i], rest[(i + 1) % m]]);
        rest.remove(i);
    }
    out.push([rest[0], rest[1], rest[2]]);
    out
}

/// Twice the signed area; positive for clockwise order on a y-down screen.
fn signed_area(points: &[Point]) -> f64 {
    let n = points.len();
    (0..n)
        .map(|i| {
            let p = points[i];
            let q = points[(i + 1) % n];
            p.x * q.y - q.x * p.y
        })
        .sum()
}

/// Barycentric test; points on the edges opposite `a` count as outside.
fn in_triangle(p: Point, a: Point, b: Point, c: Point) -> bool {
    let v0 = c - a;
    let v1 = b - a;
    let v2 = p - a;
    let dot00 = v0.dot(v0);
    let dot01 = v0.dot(v1);
    let dot02 = v0.dot(v2);
    let dot11 = v1.dot(v1);
    let dot12 = v1.dot(v2);
    let inv = 1.0 / (dot00 * dot11 - dot01 * dot01);
    let u = (dot11 * dot02 - dot01 * dot12) * inv;
    let v = (dot00 * dot12 - dot01 * dot02) * inv;
    u >= 0.0 && v >= 0.0 && u + v < 1.0
}

pub(crate) fn even_odd_contains(points: &[Point], pt: Point) -> bool {
    let n = points.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (pi, pj) = (points[i], points[j]);
        if (pi.y > pt.y) != (pj.y > pt.y)
            && pt.x < (pj.x - pi.x) * (pt.y - pi.y) / (pj.y - pi.y) + pi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Closed outline: one quad per edge centered on the edge, plus a joint quad at every corner.
fn add_outline(vh: &mut VertexHelper, points: &[Point], line_width: f64, color: Color) {
    let n = points.len();
    let half = line_width * 0.5;
    let first = vh.vert_count();
    for i in 0..n {
        let p0 = points[i];
        let p1 = points[(i + 1) % n];
        let d = p1 - p0;
        let len = d.length();
        let w = if len > 0.0 {
            Vec2::new(-d.y, d.x) * (half / len)
        } else {
            Vec2::ZERO
        };
        let k = vh.vert_count();
        vh.add_vert_with_color(p0 - w, color);
        vh.add_vert_with_color(p0 + w, color);
        vh.add_vert_with_color(p1 + w, color);
        vh.add_vert_with_color(p1 - w, color);
        vh.add_triangle(k, k + 1, k + 2);
        vh.add_triangle(k, k + 2, k + 3);
        if i > 0 {
            vh.add_triangle(k - 1, k - 2, k + 1);
            vh.add_triangle(k - 1, k + 1, k);
        }
    }
    let last = vh.vert_count() - 4;
    vh.add_triangle(last + 3, last + 2, first + 1);
    vh.add_triangle(last + 3, first + 1, first);
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f64::consts::TAU;

    fn area_of(points: &[Point], tris: &[[usize; 3]]) -> f64 {
        tris.iter()
            .map(|&[a, b, c]| ((points[b] - points[a]).cross(points[c] - points[a]) * 0.5).abs())
            .sum()
    }

    fn regular(n: usize, reverse: bool) -> Vec<Point> {
        let mut pts: Vec<_> = (0..n)
            .map(|i| {
                let a = TAU * i as f64 / n as f64;
                Point::new(50.0 + 40.0 * a.cos(), 50.0 + 40.0 * a.sin())
            })
            .collect();
        if reverse {
            pts.reverse();
        }
        pts
    }

    #[test]
    fn square_yields_two_triangles_covering_it() {
        let square = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ];
        let tris = triangulate(&square);
        assert_eq!(tris.len(), 2);
        assert!((area_of(&square, &tris) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn convex_polygons_yield_n_minus_two_in_either_winding() {
        for n in 3..=12 {
            for reverse in [false, true] {
                let pts = regular(n, reverse);
                let tris = triangulate(&pts);
                assert_eq!(tris.len(), n - 2, "n = {n}, reversed = {reverse}");
                let expected = signed_area(&pts).abs() * 0.5;
                assert!((area_of(&pts, &tris) - expected).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn concave_l_shape_is_covered_exactly() {
        let l = [
            Point::new(0.0, 0.0),
            Point::new(20.0, 0.0),
            Point::new(20.0, 10.0),
            Point::new(10.0, 10.0),
            Point::new(10.0, 30.0),
            Point::new(0.0, 30.0),
        ];
        let tris = triangulate(&l);
        assert_eq!(tris.len(), 4);
        assert!((area_of(&l, &tris) - 400.0).abs() < 1e-9);
    }

    #[test]
    fn too_few_points_is_a_no_op() {
        let mut vh = VertexHelper::new(Rect::new(0.0, 0.0, 10.0, 10.0));
        PolygonMesh::new(vec![Point::ZERO, Point::new(1.0, 1.0)]).populate_mesh(&mut vh);
        assert!(vh.buffer().is_empty());
        assert!(triangulate(&[]).is_empty());
    }

    #[test]
    fn outline_adds_four_vertices_per_edge() {
        let mesh = PolygonMesh {
            line_width: 2.0,
            ..PolygonMesh::new(regular(5, false))
        };
        let mut vh = VertexHelper::new(Rect::new(0.0, 0.0, 100.0, 100.0));
        mesh.populate_mesh(&mut vh);
        assert_eq!(vh.vert_count(), 5 + 5 * 4);
        // 3 fill, 2 per edge quad, 2 per joint.
        assert_eq!(vh.buffer().triangle_count(), 3 + 5 * 2 + 5 * 2);
    }

    #[test]
    fn percent_positions_scale_to_content() {
        let mesh = PolygonMesh {
            use_percent_positions: true,
            ..PolygonMesh::new(vec![
                Point::new(0.0, 0.0),
                Point::new(1.0, 0.0),
                Point::new(1.0, 1.0),
            ])
        };
        let mut vh = VertexHelper::new(Rect::new(0.0, 0.0, 200.0, 100.0));
        mesh.populate_mesh(&mut vh);
        assert_eq!(vh.position(2), Point::new(200.0, 100.0));
        assert!(mesh.hit_test(vh.content_rect, Point::new(150.0, 20.0)));
    }

    #[test]
    fn texcoords_map_into_uv_rect() {
        let mesh = PolygonMesh {
            texcoords: Some(vec![
                Point::new(0.0, 0.0),
                Point::new(1.0, 0.0),
                Point::new(0.5, 1.0),
            ]),
            ..PolygonMesh::new(vec![
                Point::new(0.0, 0.0),
                Point::new(4.0, 0.0),
                Point::new(2.0, 4.0),
            ])
        };
        let mut vh = VertexHelper::new(Rect::new(0.0, 0.0, 4.0, 4.0));
        vh.uv_rect = Rect::new(0.5, 0.5, 1.0, 1.0);
        mesh.populate_mesh(&mut vh);
        assert_eq!(vh.buffer().vertices[2].uv, Point::new(0.75, 1.0));
    }

    #[test]
    fn even_odd_hit_test_handles_concavity() {
        let mesh = PolygonMesh::new(vec![
            Point::new(0.0, 0.0),
            Point::new(20.0, 0.0),
            Point::new(20.0, 10.0),
            Point::new(10.0, 10.0),
            Point::new(10.0, 30.0),
            Point::new(0.0, 30.0),
        ]);
        let rect = Rect::new(0.0, 0.0, 20.0, 30.0);
        assert!(mesh.hit_test(rect, Point::new(5.0, 25.0)));
        assert!(mesh.hit_test(rect, Point::new(15.0, 5.0)));
        assert!(!mesh.hit_test(rect, Point::new(15.0, 20.0)));
    }
}
