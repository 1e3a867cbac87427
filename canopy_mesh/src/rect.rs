// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis-aligned rectangle with an optional border.

use kurbo::{Point, Rect};

use crate::color::Color;
use crate::shape::MeshFactory;
use crate::vertex::VertexHelper;

/// Rectangle generator.
///
/// Without a border this is a single quad. With a border it is four strips (left, right, top,
/// bottom) in `line_color` plus an inset fill quad.
#[derive(Clone, Debug, PartialEq)]
pub struct RectMesh {
    /// Rectangle to draw; the helper's content rectangle when `None`.
    pub draw_rect: Option<Rect>,
    /// Border width; `0` draws no border.
    pub line_width: f64,
    /// Border color.
    pub line_color: Color,
    /// Fill color; the helper's vertex color when `None`. A transparent fill emits no quad.
    pub fill_color: Option<Color>,
    /// Per-vertex colors, repeated over every emitted vertex.
    pub colors: Option<Vec<Color>>,
}

impl Default for RectMesh {
    fn default() -> Self {
        Self {
            draw_rect: None,
            line_width: 0.0,
            line_color: Color::BLACK,
            fill_color: None,
            colors: None,
        }
    }
}

impl RectMesh {
    /// Point inclusion against the drawn rectangle.
    pub fn hit_test(&self, content_rect: Rect, pt: Point) -> bool {
        self.draw_rect.unwrap_or(content_rect).contains(pt)
    }
}

impl MeshFactory for RectMesh {
    fn populate_mesh(&self, vh: &mut VertexHelper) {
        let rect = self.draw_rect.unwrap_or(vh.content_rect);
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return;
        }
        let fill = self.fill_color.unwrap_or(vh.vertex_color);
        let start = vh.vert_count();

        if self.line_width <= 0.0 {
            if !fill.is_transparent() {
                vh.add_quad_with_color(rect, fill);
            }
        } else {
            let lw = self
                .line_width
                .min(rect.width() * 0.5)
                .min(rect.height() * 0.5);
            let strips = [
                Rect::new(rect.x0, rect.y0, rect.x0 + lw, rect.y1),
                Rect::new(rect.x1 - lw, rect.y0, rect.x1, rect.y1),
                Rect::new(rect.x0 + lw, rect.y0, rect.x1 - lw, rect.y0 + lw),
                Rect::new(rect.x0 + lw, rect.y1 - lw, rect.x1 - lw, rect.y1),
            ];
            for strip in strips {
                vh.add_quad_with_color(strip, self.line_color);
            }
            let inner = rect.inset(-lw);
            if !fill.is_transparent() && inner.width() > 0.0 && inner.height() > 0.0 {
                vh.add_quad_with_color(inner, fill);
            }
        }

        if let Some(colors) = &self.colors {
            vh.repeat_colors(colors, start, vh.vert_count() - start);
        }
        vh.add_quad_triangles(start);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(mesh: &RectMesh, rect: Rect) -> VertexHelper {
        let mut vh = VertexHelper::new(rect);
        mesh.populate_mesh(&mut vh);
        vh
    }

    #[test]
    fn plain_rect_is_one_quad() {
        let vh = build(&RectMesh::default(), Rect::new(0.0, 0.0, 50.0, 20.0));
        assert_eq!(vh.vert_count(), 4);
        assert_eq!(vh.buffer().triangle_count(), 2);
        assert!((vh.buffer().area() - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn stroked_rect_covers_whole_area_once() {
        let mesh = RectMesh {
            line_width: 3.0,
            ..RectMesh::default()
        };
        let vh = build(&mesh, Rect::new(0.0, 0.0, 50.0, 20.0));
        assert_eq!(vh.vert_count(), 20);
        assert!(
            (vh.buffer().area() - 1000.0).abs() < 1e-9,
            "strips plus inset fill tile the rectangle exactly"
        );
        let border = vh.buffer().vertices[..16]
            .iter()
            .all(|v| v.color == Color::BLACK);
        assert!(border, "border strips use the line color");
    }

    #[test]
    fn transparent_fill_skips_inner_quad() {
        let mesh = RectMesh {
            line_width: 1.0,
            fill_color: Some(Color::TRANSPARENT),
            ..RectMesh::default()
        };
        let vh = build(&mesh, Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(vh.vert_count(), 16);
    }

    #[test]
    fn degenerate_interior_skips_inner_quad() {
        let mesh = RectMesh {
            line_width: 10.0,
            ..RectMesh::default()
        };
        let vh = build(&mesh, Rect::new(0.0, 0.0, 10.0, 30.0));
        assert_eq!(vh.vert_count(), 16, "inset reaches half the smaller side");
    }

    #[test]
    fn zero_size_rect_is_empty() {
        let vh = build(&RectMesh::default(), Rect::new(5.0, 5.0, 5.0, 9.0));
        assert!(vh.buffer().is_empty());
    }

    #[test]
    fn per_vertex_colors_repeat() {
        let red = Color::rgb(255, 0, 0);
        let mesh = RectMesh {
            colors: Some(vec![red, Color::BLACK]),
            ..RectMesh::default()
        };
        let vh = build(&mesh, Rect::new(0.0, 0.0, 1.0, 1.0));
        assert_eq!(vh.buffer().vertices[2].color, red);
        assert_eq!(vh.buffer().vertices[3].color, Color::BLACK);
    }

    #[test]
    fn explicit_draw_rect_overrides_content() {
        let mesh = RectMesh {
            draw_rect: Some(Rect::new(10.0, 10.0, 20.0, 20.0)),
            ..RectMesh::default()
        };
        let content = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(mesh.hit_test(content, Point::new(15.0, 15.0)));
        assert!(!mesh.hit_test(content, Point::new(5.0, 5.0)));
        let vh = build(&mesh, content);
        assert_eq!(vh.buffer().bounds(), Some(Rect::new(10.0, 10.0, 20.0, 20.0)));
    }
}
