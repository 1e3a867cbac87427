// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Motion paths for position tweens.

use kurbo::{CubicBez, Line, ParamCurve, ParamCurveArclen, PathSeg, Point, QuadBez};

const ARCLEN_ACCURACY: f64 = 1e-3;

/// How the segment leaving a [`PathPoint`] is shaped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CurveType {
    /// Smooth spline through consecutive Catmull-Rom points.
    #[default]
    CatmullRom,
    /// Quadratic Bézier using `control1`.
    Bezier,
    /// Cubic Bézier using `control1` and `control2`.
    CubicBezier,
    /// Straight line.
    Straight,
}

/// One point of a [`TweenPath`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathPoint {
    /// Position the path passes through.
    pub pos: Point,
    /// First control point (Bézier kinds only).
    pub control1: Point,
    /// Second control point (cubic Bézier only).
    pub control2: Point,
    /// Shape of the segment that starts here.
    pub curve_type: CurveType,
}

impl PathPoint {
    /// Point followed by a straight segment.
    pub fn straight(pos: Point) -> Self {
        Self::with_type(pos, CurveType::Straight)
    }

    /// Point on a Catmull-Rom spline.
    pub fn catmull_rom(pos: Point) -> Self {
        Self::with_type(pos, CurveType::CatmullRom)
    }

    /// Point followed by a quadratic Bézier.
    pub fn bezier(pos: Point, control: Point) -> Self {
        Self {
            control1: control,
            ..Self::with_type(pos, CurveType::Bezier)
        }
    }

    /// Point followed by a cubic Bézier.
    pub fn cubic_bezier(pos: Point, control1: Point, control2: Point) -> Self {
        Self {
            control1,
            control2,
            ..Self::with_type(pos, CurveType::CubicBezier)
        }
    }

    fn with_type(pos: Point, curve_type: CurveType) -> Self {
        Self {
            pos,
            control1: pos,
            control2: pos,
            curve_type,
        }
    }
}

/// A polycurve sampled by normalized arc length.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TweenPath {
    segments: Vec<PathSeg>,
    /// Arc length at the end of each segment.
    cumulative: Vec<f64>,
}

impl TweenPath {
    /// Build a path through `points`.
    ///
    /// Fewer than two points produce an empty path, which samples as the origin (or the single
    /// point, if one was given).
    pub fn new(points: &[PathPoint]) -> Self {
        let mut segments = Vec::new();
        let mut i = 0;
        while i + 1 < points.len() {
            let p = points[i];
            match p.curve_type {
                CurveType::Straight => {
                    segments.push(PathSeg::Line(Line::new(p.pos, points[i + 1].pos)));
                    i += 1;
                }
                CurveType::Bezier => {
                    segments.push(PathSeg::Quad(QuadBez::new(
                        p.pos,
                        p.control1,
                        points[i + 1].pos,
                    )));
                    i += 1;
                }
                CurveType::CubicBezier => {
                    segments.push(PathSeg::Cubic(CubicBez::new(
                        p.pos,
                        p.control1,
                        p.control2,
                        points[i + 1].pos,
                    )));
                    i += 1;
                }
                CurveType::CatmullRom => {
                    // The spline runs while points stay Catmull-Rom and includes the point
                    // that ends it.
                    let mut end = i + 1;
                    while end + 1 < points.len() && points[end].curve_type == CurveType::CatmullRom
                    {
                        end += 1;
                    }
                    let run: Vec<Point> = points[i..=end].iter().map(|p| p.pos).collect();
                    push_catmull_rom(&mut segments, &run);
                    i = end;
                }
            }
        }
        let mut total = 0.0;
        let cumulative = segments
            .iter()
            .map(|s| {
                total += s.arclen(ARCLEN_ACCURACY);
                total
            })
            .collect();
        let mut path = Self {
            segments,
            cumulative,
        };
        if path.segments.is_empty() {
            if let Some(p) = points.first() {
                path.segments.push(PathSeg::Line(Line::new(p.pos, p.pos)));
                path.cumulative.push(0.0);
            }
        }
        path
    }

    /// Number of segments.
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Total arc length.
    pub fn length(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// Point at normalized arc length `t` (clamped to `0..=1`).
    pub fn point_at(&self, t: f64) -> Point {
        let Some(last) = self.segments.last() else {
            return Point::ORIGIN;
        };
        let total = self.length();
        if total <= 0.0 {
            return last.eval(1.0);
        }
        let s = t.clamp(0.0, 1.0) * total;
        let k = self
            .cumulative
            .partition_point(|&c| c < s)
            .min(self.segments.len() - 1);
        let seg_start = if k == 0 { 0.0 } else { self.cumulative[k - 1] };
        let seg = &self.segments[k];
        let param = seg.inv_arclen(s - seg_start, ARCLEN_ACCURACY);
        seg.eval(param)
    }

    /// `count` evenly spaced samples along the path, including both ends.
    pub fn sample(&self, count: usize) -> Vec<Point> {
        match count {
            0 => Vec::new(),
            1 => vec![self.point_at(0.0)],
            _ => (0..count)
                .map(|i| self.point_at(i as f64 / (count - 1) as f64))
                .collect(),
        }
    }
}

/// Uniform Catmull-Rom through `run`, converted to cubic Béziers. End tangents reuse the ends.
fn push_catmull_rom(segments: &mut Vec<PathSeg>, run: &[Point]) {
    let n = run.len();
    for i in 0..n.saturating_sub(1) {
        let p0 = run[i.saturating_sub(1)];
        let p1 = run[i];
        let p2 = run[i + 1];
        let p3 = run[(i + 2).min(n - 1)];
        let c1 = p1 + (p2 - p0) / 6.0;
        let c2 = p2 - (p3 - p1) / 6.0;
        segments.push(PathSeg::Cubic(CubicBez::new(p1, c1, c2, p2)));
    }
}
