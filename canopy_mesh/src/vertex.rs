// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vertex accumulation used by every mesh factory.

use kurbo::{Point, Rect};

use crate::color::{Color, Vertex};

/// Triangulated output of a populate pass: vertices plus index triples.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VertexBuffer {
    /// Vertices in emission order.
    pub vertices: Vec<Vertex>,
    /// Triangle indices, three per triangle.
    pub triangles: Vec<u32>,
}

impl VertexBuffer {
    /// True if no vertex was emitted.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }

    /// Drop all vertices and triangles, keeping the allocations.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.triangles.clear();
    }

    /// Iterate triangles as vertex position triples.
    pub fn triangle_positions(&self) -> impl Iterator<Item = [Point; 3]> + '_ {
        self.triangles.chunks_exact(3).map(|t| {
            [
                self.vertices[t[0] as usize].position,
                self.vertices[t[1] as usize].position,
                self.vertices[t[2] as usize].position,
            ]
        })
    }

    /// Sum of the unsigned triangle areas.
    pub fn area(&self) -> f64 {
        self.triangle_positions()
            .map(|[a, b, c]| ((b - a).cross(c - a) * 0.5).abs())
            .sum()
    }

    /// Bounding box of all vertex positions, or `None` when empty.
    pub fn bounds(&self) -> Option<Rect> {
        let mut it = self.vertices.iter();
        let first = it.next()?.position;
        Some(it.fold(Rect::from_points(first, first), |r, v| {
            r.union_pt(v.position)
        }))
    }
}

/// Accumulates one mesh.
///
/// The helper carries the ambient parameters a generator reads: the content rectangle in local
/// space, the UV rectangle that content maps to, and the default vertex color.
#[derive(Clone, Debug)]
pub struct VertexHelper {
    /// Local-space rectangle being filled.
    pub content_rect: Rect,
    /// Texture-space rectangle matching `content_rect`. May be mirrored (`x0 > x1`).
    pub uv_rect: Rect,
    /// Color used by the plain `add_vert`/`add_quad` variants.
    pub vertex_color: Color,
    buffer: VertexBuffer,
}

impl Default for VertexHelper {
    fn default() -> Self {
        Self::new(Rect::ZERO)
    }
}

impl VertexHelper {
    /// Unit UV rectangle.
    pub const FULL_UV: Rect = Rect::new(0.0, 0.0, 1.0, 1.0);

    /// Helper for `content_rect`, unit UVs and white vertices.
    pub fn new(content_rect: Rect) -> Self {
        Self {
            content_rect,
            uv_rect: Self::FULL_UV,
            vertex_color: Color::WHITE,
            buffer: VertexBuffer::default(),
        }
    }

    /// Clear geometry and install new ambient parameters.
    pub fn reset(&mut self, content_rect: Rect, uv_rect: Rect, vertex_color: Color) {
        self.content_rect = content_rect;
        self.uv_rect = uv_rect;
        self.vertex_color = vertex_color;
        self.buffer.clear();
    }

    /// Number of vertices emitted so far.
    pub fn vert_count(&self) -> usize {
        self.buffer.vertices.len()
    }

    /// Accumulated output.
    pub fn buffer(&self) -> &VertexBuffer {
        &self.buffer
    }

    /// Mutable access to the accumulated output.
    pub fn buffer_mut(&mut self) -> &mut VertexBuffer {
        &mut self.buffer
    }

    /// Consume the helper, returning the accumulated output.
    pub fn into_buffer(self) -> VertexBuffer {
        self.buffer
    }

    /// Drop all emitted geometry.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Position of vertex `index`; negative indices count back from the end (`-1` is the last).
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn position(&self, index: isize) -> Point {
        let i = if index < 0 {
            self.vert_count() - index.unsigned_abs()
        } else {
            index.unsigned_abs()
        };
        self.buffer.vertices[i].position
    }

    /// Texture coordinate for a local position, by linear mapping of the content rectangle onto
    /// the UV rectangle.
    pub fn uv_at(&self, pos: Point) -> Point {
        let c = self.content_rect;
        let uv = self.uv_rect;
        let tx = if c.width() == 0.0 {
            0.0
        } else {
            (pos.x - c.x0) / c.width()
        };
        let ty = if c.height() == 0.0 {
            0.0
        } else {
            (pos.y - c.y0) / c.height()
        };
        Point::new(uv.x0 + tx * uv.width(), uv.y0 + ty * uv.height())
    }

    /// Add a vertex with the default color and a mapped UV.
    pub fn add_vert(&mut self, pos: Point) {
        let uv = self.uv_at(pos);
        self.add_vert_full(pos, self.vertex_color, uv);
    }

    /// Add a vertex with an explicit color and a mapped UV.
    pub fn add_vert_with_color(&mut self, pos: Point, color: Color) {
        let uv = self.uv_at(pos);
        self.add_vert_full(pos, color, uv);
    }

    /// Add a fully specified vertex.
    pub fn add_vert_full(&mut self, position: Point, color: Color, uv: Point) {
        self.buffer.vertices.push(Vertex {
            position,
            color,
            uv,
        });
    }

    /// Add the four corners of `rect` with the default color.
    ///
    /// Corner order is bottom-left, top-left, top-right, bottom-right, which is what
    /// [`add_quad_triangles`](Self::add_quad_triangles) expects.
    pub fn add_quad(&mut self, rect: Rect) {
        self.add_quad_with_color(rect, self.vertex_color);
    }

    /// Add the four corners of `rect` with an explicit color and mapped UVs.
    pub fn add_quad_with_color(&mut self, rect: Rect, color: Color) {
        for p in quad_corners(rect) {
            self.add_vert_with_color(p, color);
        }
    }

    /// Add the four corners of `rect`, mapping the corners onto `uv_rect` directly.
    pub fn add_quad_full(&mut self, rect: Rect, color: Color, uv_rect: Rect) {
        let [a, b, c, d] = quad_corners(rect);
        self.add_vert_full(a, color, Point::new(uv_rect.x0, uv_rect.y1));
        self.add_vert_full(b, color, Point::new(uv_rect.x0, uv_rect.y0));
        self.add_vert_full(c, color, Point::new(uv_rect.x1, uv_rect.y0));
        self.add_vert_full(d, color, Point::new(uv_rect.x1, uv_rect.y1));
    }

    /// Add one triangle by absolute vertex index.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Meshes use 32-bit indices."
    )]
    pub fn add_triangle(&mut self, a: usize, b: usize, c: usize) {
        self.buffer
            .triangles
            .extend_from_slice(&[a as u32, b as u32, c as u32]);
    }

    /// Add triangles from an index list, offsetting every index by `start`.
    pub fn add_triangles_from(&mut self, indices: &[usize], start: usize) {
        for t in indices.chunks_exact(3) {
            self.add_triangle(start + t[0], start + t[1], start + t[2]);
        }
    }

    /// Triangulate every quad emitted since vertex `start` as `(i, i+1, i+2), (i+2, i+3, i)`.
    pub fn add_quad_triangles(&mut self, start: usize) {
        let count = self.vert_count();
        let mut i = start;
        while i + 3 < count {
            self.add_triangle(i, i + 1, i + 2);
            self.add_triangle(i + 2, i + 3, i);
            i += 4;
        }
    }

    /// Recolor `count` vertices starting at `start`, cycling through `colors`.
    pub fn repeat_colors(&mut self, colors: &[Color], start: usize, count: usize) {
        if colors.is_empty() {
            return;
        }
        let end = (start + count).min(self.vert_count());
        for (k, v) in self.buffer.vertices[start..end].iter_mut().enumerate() {
            v.color = colors[k % colors.len()];
        }
    }

    /// Append another buffer, offsetting its indices past the current vertices.
    pub fn append(&mut self, other: &VertexBuffer) {
        let base = index_u32(self.vert_count());
        self.buffer.vertices.extend_from_slice(&other.vertices);
        self.buffer
            .triangles
            .extend(other.triangles.iter().map(|&i| i + base));
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "Meshes use 32-bit indices."
)]
fn index_u32(i: usize) -> u32 {
    i as u32
}

/// Corners of `rect` in quad order: bottom-left, top-left, top-right, bottom-right.
pub(crate) fn quad_corners(rect: Rect) -> [Point; 4] {
    [
        Point::new(rect.x0, rect.y1),
        Point::new(rect.x0, rect.y0),
        Point::new(rect.x1, rect.y0),
        Point::new(rect.x1, rect.y1),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_triangles_cover_rect() {
        let mut vh = VertexHelper::new(Rect::new(0.0, 0.0, 10.0, 20.0));
        vh.add_quad(vh.content_rect);
        vh.add_quad_triangles(0);
        assert_eq!(vh.buffer().triangles, vec![0, 1, 2, 2, 3, 0]);
        assert!((vh.buffer().area() - 200.0).abs() < 1e-9);
    }

    #[test]
    fn uv_maps_content_rect_corners() {
        let mut vh = VertexHelper::new(Rect::new(10.0, 10.0, 30.0, 50.0));
        vh.uv_rect = Rect::new(0.5, 0.0, 1.0, 0.5);
        assert_eq!(vh.uv_at(Point::new(10.0, 10.0)), Point::new(0.5, 0.0));
        assert_eq!(vh.uv_at(Point::new(30.0, 50.0)), Point::new(1.0, 0.5));
        assert_eq!(vh.uv_at(Point::new(20.0, 30.0)), Point::new(0.75, 0.25));
    }

    #[test]
    fn mirrored_uv_rect_flips_mapping() {
        let mut vh = VertexHelper::new(Rect::new(0.0, 0.0, 10.0, 10.0));
        vh.uv_rect = Rect::new(1.0, 0.0, 0.0, 1.0);
        assert_eq!(vh.uv_at(Point::new(0.0, 0.0)), Point::new(1.0, 0.0));
        assert_eq!(vh.uv_at(Point::new(10.0, 0.0)), Point::new(0.0, 0.0));
    }

    #[test]
    fn zero_sized_content_rect_does_not_divide_by_zero() {
        let vh = VertexHelper::new(Rect::ZERO);
        let uv = vh.uv_at(Point::new(3.0, 4.0));
        assert!(uv.x.is_finite() && uv.y.is_finite());
    }

    #[test]
    fn repeat_colors_cycles() {
        let mut vh = VertexHelper::default();
        vh.add_quad(Rect::new(0.0, 0.0, 1.0, 1.0));
        vh.repeat_colors(&[Color::BLACK, Color::TRANSPARENT], 0, 4);
        let colors: Vec<_> = vh.buffer().vertices.iter().map(|v| v.color).collect();
        assert_eq!(
            colors,
            vec![
                Color::BLACK,
                Color::TRANSPARENT,
                Color::BLACK,
                Color::TRANSPARENT
            ]
        );
    }

    #[test]
    fn append_offsets_indices() {
        let mut a = VertexHelper::default();
        a.add_quad(Rect::new(0.0, 0.0, 1.0, 1.0));
        a.add_quad_triangles(0);
        let other = a.buffer().clone();
        a.append(&other);
        assert_eq!(a.vert_count(), 8);
        assert_eq!(&a.buffer().triangles[6..], &[4, 5, 6, 6, 7, 4]);
    }

    #[test]
    fn negative_position_counts_from_end() {
        let mut vh = VertexHelper::default();
        vh.add_quad(Rect::new(0.0, 0.0, 2.0, 3.0));
        assert_eq!(vh.position(-1), Point::new(2.0, 3.0));
        assert_eq!(vh.position(1), Point::new(0.0, 0.0));
    }

    #[test]
    fn bounds_of_empty_buffer_is_none() {
        assert!(VertexBuffer::default().bounds().is_none());
    }
}
