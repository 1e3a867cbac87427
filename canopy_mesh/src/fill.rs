// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Progressive reveal fills: linear and radial clipping of the content rectangle.
//!
//! Radial fills are built recursively. A 90° fill is a wedge around one corner. A 180° fill
//! splits the rectangle into two halves that share a pivot at the middle of one edge, each
//! filled as a 90° wedge. A 360° fill splits into two halves pivoting at the center, each filled
//! as a 180° fill. Whenever the amount passes the midpoint, the first half is emitted as a plain
//! quad and the remainder is swept in the second half.

use core::f64::consts::FRAC_PI_2;

use kurbo::{Point, Rect, Vec2};

use crate::shape::MeshFactory;
use crate::vertex::VertexHelper;

/// How the content is revealed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FillMethod {
    /// No clipping: the full rectangle.
    #[default]
    None,
    /// Reveal left to right (or right to left).
    Horizontal,
    /// Reveal top to bottom (or bottom to top).
    Vertical,
    /// Quarter sweep around a corner.
    Radial90,
    /// Half sweep around the middle of an edge.
    Radial180,
    /// Full sweep around the center.
    Radial360,
}

/// Where a fill starts.
///
/// Linear fills use the edges (`Left`/`Right`, `Top`/`Bottom`). Radial 90° fills use the corners;
/// an edge origin stands for the corner that begins that edge going clockwise (`Top` is
/// `TopLeft`, `Right` is `TopRight`, `Bottom` is `BottomRight`, `Left` is `BottomLeft`). Radial
/// 180° and 360° fills use the edges; a corner stands for the edge it begins.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FillOrigin {
    /// Left edge.
    Left,
    /// Right edge.
    Right,
    /// Top edge.
    #[default]
    Top,
    /// Bottom edge.
    Bottom,
    /// Top-left corner.
    TopLeft,
    /// Top-right corner.
    TopRight,
    /// Bottom-left corner.
    BottomLeft,
    /// Bottom-right corner.
    BottomRight,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    /// Mirroring of the canonical top-left frame: (x, y).
    fn flips(self) -> (bool, bool) {
        match self {
            Self::TopLeft => (false, false),
            Self::TopRight => (true, false),
            Self::BottomLeft => (false, true),
            Self::BottomRight => (true, true),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl FillOrigin {
    fn corner(self) -> Corner {
        match self {
            Self::TopLeft | Self::Top => Corner::TopLeft,
            Self::TopRight | Self::Right => Corner::TopRight,
            Self::BottomRight | Self::Bottom => Corner::BottomRight,
            Self::BottomLeft | Self::Left => Corner::BottomLeft,
        }
    }

    fn edge(self) -> Edge {
        match self {
            Self::Top | Self::TopLeft => Edge::Top,
            Self::Right | Self::TopRight => Edge::Right,
            Self::Bottom | Self::BottomRight => Edge::Bottom,
            Self::Left | Self::BottomLeft => Edge::Left,
        }
    }

    fn is_far_x(self) -> bool {
        matches!(self, Self::Right | Self::TopRight | Self::BottomRight)
    }

    fn is_far_y(self) -> bool {
        matches!(self, Self::Bottom | Self::BottomLeft | Self::BottomRight)
    }
}

/// Reveal fill over the helper's content rectangle.
///
/// `amount` is clamped to `0..=1`; zero emits nothing and one emits the full quad.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FillMesh {
    /// Reveal style.
    pub method: FillMethod,
    /// Start edge or corner.
    pub origin: FillOrigin,
    /// Revealed fraction.
    pub amount: f64,
    /// Sweep direction for radial fills.
    pub clockwise: bool,
}

impl Default for FillMesh {
    fn default() -> Self {
        Self {
            method: FillMethod::None,
            origin: FillOrigin::Top,
            amount: 1.0,
            clockwise: true,
        }
    }
}

impl FillMesh {
    /// Fill with `method` from `origin`, fully revealed, clockwise.
    pub fn new(method: FillMethod, origin: FillOrigin) -> Self {
        Self {
            method,
            origin,
            ..Self::default()
        }
    }
}

impl MeshFactory for FillMesh {
    fn populate_mesh(&self, vh: &mut VertexHelper) {
        let rect = vh.content_rect;
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return;
        }
        let amount = self.amount.clamp(0.0, 1.0);
        if amount.is_nan() || amount <= 0.0 {
            return;
        }
        match self.method {
            FillMethod::None => full_quad(vh, rect),
            FillMethod::Horizontal => {
                let w = rect.width() * amount;
                let r = if self.origin.is_far_x() {
                    Rect::new(rect.x1 - w, rect.y0, rect.x1, rect.y1)
                } else {
                    Rect::new(rect.x0, rect.y0, rect.x0 + w, rect.y1)
                };
                full_quad(vh, r);
            }
            FillMethod::Vertical => {
                let h = rect.height() * amount;
                let r = if self.origin.is_far_y() {
                    Rect::new(rect.x0, rect.y1 - h, rect.x1, rect.y1)
                } else {
                    Rect::new(rect.x0, rect.y0, rect.x1, rect.y0 + h)
                };
                full_quad(vh, r);
            }
            FillMethod::Radial90 => {
                radial90(vh, rect, self.origin.corner(), amount, self.clockwise);
            }
            FillMethod::Radial180 => {
                radial180(vh, rect, self.origin.edge(), amount, self.clockwise);
            }
            FillMethod::Radial360 => {
                radial360(vh, rect, self.origin.edge(), amount, self.clockwise);
            }
        }
    }
}

fn full_quad(vh: &mut VertexHelper, rect: Rect) {
    let start = vh.vert_count();
    vh.add_quad(rect);
    vh.add_quad_triangles(start);
}

fn left_half(r: Rect) -> Rect {
    Rect::new(r.x0, r.y0, r.center().x, r.y1)
}

fn right_half(r: Rect) -> Rect {
    Rect::new(r.center().x, r.y0, r.x1, r.y1)
}

fn top_half(r: Rect) -> Rect {
    Rect::new(r.x0, r.y0, r.x1, r.center().y)
}

fn bottom_half(r: Rect) -> Rect {
    Rect::new(r.x0, r.center().y, r.x1, r.y1)
}

/// Where a ray from the canonical origin at `angle` leaves the `w` by `h` box.
fn ray_exit(angle: f64, w: f64, h: f64) -> Vec2 {
    let (s, c) = angle.sin_cos();
    if c * h >= s * w {
        Vec2::new(w, w * s / c)
    } else {
        Vec2::new(h * c / s, h)
    }
}

fn radial90(vh: &mut VertexHelper, rect: Rect, corner: Corner, amount: f64, clockwise: bool) {
    if amount <= 0.0 {
        return;
    }
    if amount >= 1.0 {
        full_quad(vh, rect);
        return;
    }
    let (fx, fy) = corner.flips();
    let mirrored = fx != fy;
    // In the canonical frame clockwise runs from the u axis towards the v axis.
    let canonical_cw = clockwise != mirrored;
    let (w, h) = (rect.width(), rect.height());
    let sweep = amount * FRAC_PI_2;
    let (a0, a1) = if canonical_cw {
        (0.0, sweep)
    } else {
        (FRAC_PI_2 - sweep, FRAC_PI_2)
    };

    let mut local = Vec::with_capacity(4);
    local.push(Vec2::ZERO);
    local.push(ray_exit(a0, w, h));
    let diagonal = h.atan2(w);
    if a0 < diagonal && diagonal < a1 {
        local.push(Vec2::new(w, h));
    }
    local.push(ray_exit(a1, w, h));

    let base = vh.vert_count();
    for p in &local {
        let x = if fx { rect.x1 - p.x } else { rect.x0 + p.x };
        let y = if fy { rect.y1 - p.y } else { rect.y0 + p.y };
        vh.add_vert(Point::new(x, y));
    }
    for k in 1..local.len() - 1 {
        if mirrored {
            vh.add_triangle(base, base + k + 1, base + k);
        } else {
            vh.add_triangle(base, base + k, base + k + 1);
        }
    }
}

fn radial180(vh: &mut VertexHelper, rect: Rect, edge: Edge, amount: f64, clockwise: bool) {
    if amount <= 0.0 {
        return;
    }
    if amount >= 1.0 {
        full_quad(vh, rect);
        return;
    }
    let (first, second) = match edge {
        Edge::Top => (
            (right_half(rect), Corner::TopLeft),
            (left_half(rect), Corner::TopRight),
        ),
        Edge::Bottom => (
            (left_half(rect), Corner::BottomRight),
            (right_half(rect), Corner::BottomLeft),
        ),
        Edge::Left => (
            (top_half(rect), Corner::BottomLeft),
            (bottom_half(rect), Corner::TopLeft),
        ),
        Edge::Right => (
            (bottom_half(rect), Corner::TopRight),
            (top_half(rect), Corner::BottomRight),
        ),
    };
    let (first, second) = if clockwise {
        (first, second)
    } else {
        (second, first)
    };
    if amount <= 0.5 {
        radial90(vh, first.0, first.1, amount * 2.0, clockwise);
    } else {
        radial90(vh, second.0, second.1, (amount - 0.5) * 2.0, clockwise);
        full_quad(vh, first.0);
    }
}

fn radial360(vh: &mut VertexHelper, rect: Rect, edge: Edge, amount: f64, clockwise: bool) {
    if amount <= 0.0 {
        return;
    }
    if amount >= 1.0 {
        full_quad(vh, rect);
        return;
    }
    let (first, second) = match edge {
        Edge::Top => ((right_half(rect), Edge::Left), (left_half(rect), Edge::Right)),
        Edge::Bottom => ((left_half(rect), Edge::Right), (right_half(rect), Edge::Left)),
        Edge::Left => ((top_half(rect), Edge::Bottom), (bottom_half(rect), Edge::Top)),
        Edge::Right => ((bottom_half(rect), Edge::Top), (top_half(rect), Edge::Bottom)),
    };
    let (first, second) = if clockwise {
        (first, second)
    } else {
        (second, first)
    };
    if amount <= 0.5 {
        radial180(vh, first.0, first.1, amount * 2.0, clockwise);
    } else {
        radial180(vh, second.0, second.1, (amount - 0.5) * 2.0, clockwise);
        full_quad(vh, first.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rect::RectMesh;

    const SQUARE: Rect = Rect::new(0.0, 0.0, 100.0, 100.0);

    fn build(mesh: FillMesh, rect: Rect) -> VertexHelper {
        let mut vh = VertexHelper::new(rect);
        mesh.populate_mesh(&mut vh);
        vh
    }

    fn radial(method: FillMethod, origin: FillOrigin, amount: f64, clockwise: bool) -> FillMesh {
        FillMesh {
            method,
            origin,
            amount,
            clockwise,
        }
    }

    const ALL_METHODS: [FillMethod; 6] = [
        FillMethod::None,
        FillMethod::Horizontal,
        FillMethod::Vertical,
        FillMethod::Radial90,
        FillMethod::Radial180,
        FillMethod::Radial360,
    ];

    #[test]
    fn zero_amount_is_empty() {
        for method in ALL_METHODS {
            let vh = build(radial(method, FillOrigin::Top, 0.0, true), SQUARE);
            assert!(vh.buffer().is_empty(), "{method:?}");
        }
    }

    #[test]
    fn full_amount_matches_plain_quad() {
        let mut plain = VertexHelper::new(SQUARE);
        RectMesh::default().populate_mesh(&mut plain);
        for method in ALL_METHODS {
            for clockwise in [true, false] {
                let vh = build(radial(method, FillOrigin::Left, 1.0, clockwise), SQUARE);
                assert_eq!(vh.vert_count(), plain.vert_count(), "{method:?}");
                assert_eq!(vh.buffer().triangle_count(), plain.buffer().triangle_count());
                assert!((vh.buffer().area() - plain.buffer().area()).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn half_radial360_from_top_clockwise_is_the_right_half() {
        let rect = Rect::new(0.0, 0.0, 120.0, 60.0);
        let vh = build(radial(FillMethod::Radial360, FillOrigin::Top, 0.5, true), rect);
        assert!((vh.buffer().area() - 3600.0).abs() < 1e-9);
        assert_eq!(vh.buffer().bounds(), Some(Rect::new(60.0, 0.0, 120.0, 60.0)));
    }

    #[test]
    fn half_radial360_from_top_counter_clockwise_is_the_left_half() {
        let vh = build(
            radial(FillMethod::Radial360, FillOrigin::Top, 0.5, false),
            SQUARE,
        );
        assert_eq!(vh.buffer().bounds(), Some(Rect::new(0.0, 0.0, 50.0, 100.0)));
    }

    #[test]
    fn radial360_eighth_is_a_triangle_right_of_noon() {
        let vh = build(
            radial(FillMethod::Radial360, FillOrigin::Top, 0.125, true),
            SQUARE,
        );
        assert!((vh.buffer().area() - 1250.0).abs() < 1e-6);
        let b = vh.buffer().bounds().unwrap();
        assert!(b.x0 >= 50.0 - 1e-9 && b.y1 <= 50.0 + 1e-9, "{b:?}");
    }

    #[test]
    fn radial360_three_quarters_of_square() {
        let vh = build(
            radial(FillMethod::Radial360, FillOrigin::Top, 0.75, true),
            SQUARE,
        );
        assert!((vh.buffer().area() - 7500.0).abs() < 1e-6);
    }

    #[test]
    fn radial90_wedge_follows_tangent() {
        let vh = build(
            radial(FillMethod::Radial90, FillOrigin::TopLeft, 0.25, true),
            SQUARE,
        );
        let expected = 100.0 * 100.0 * (FRAC_PI_2 * 0.25).tan() * 0.5;
        assert!((vh.buffer().area() - expected).abs() < 1e-6);
        assert_eq!(vh.vert_count(), 3);
    }

    #[test]
    fn radial90_past_diagonal_includes_far_corner() {
        let vh = build(
            radial(FillMethod::Radial90, FillOrigin::BottomRight, 0.75, true),
            SQUARE,
        );
        assert_eq!(vh.vert_count(), 4);
        assert_eq!(vh.buffer().triangle_count(), 2);
        let expected = 10000.0 - 100.0 * 100.0 * (FRAC_PI_2 * 0.25).tan() * 0.5;
        assert!((vh.buffer().area() - expected).abs() < 1e-6);
    }

    #[test]
    fn radial180_bottom_half_amount_is_left_half() {
        let vh = build(
            radial(FillMethod::Radial180, FillOrigin::Bottom, 0.5, true),
            SQUARE,
        );
        assert_eq!(vh.buffer().bounds(), Some(Rect::new(0.0, 0.0, 50.0, 100.0)));
    }

    #[test]
    fn linear_fills_respect_origin() {
        let vh = build(
            radial(FillMethod::Horizontal, FillOrigin::Right, 0.3, true),
            SQUARE,
        );
        assert_eq!(vh.buffer().bounds(), Some(Rect::new(70.0, 0.0, 100.0, 100.0)));
        let vh = build(
            radial(FillMethod::Vertical, FillOrigin::Top, 0.4, true),
            SQUARE,
        );
        assert_eq!(vh.buffer().bounds(), Some(Rect::new(0.0, 0.0, 100.0, 40.0)));
    }
}
