// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Binding of a mesh factory to texture, tint and paint state.

use kurbo::{Affine, Point, Rect, Size};

use crate::color::{Color, PaintVertex};
use crate::ellipse::EllipseMesh;
use crate::fill::{FillMesh, FillMethod, FillOrigin};
use crate::polygon::PolygonMesh;
use crate::rect::RectMesh;
use crate::regular_polygon::RegularPolygonMesh;
use crate::rounded_rect::RoundedRectMesh;
use crate::shape::{MeshFactory, ShapeKind};
use crate::vertex::{VertexBuffer, VertexHelper};

/// A host texture, or a region of one.
#[derive(Clone, Debug, PartialEq)]
pub struct TextureHandle {
    /// Host-defined identifier.
    pub id: u64,
    /// Pixel size of the region.
    pub size: Size,
    /// Region of the host texture, in normalized coordinates.
    pub uv_rect: Rect,
}

impl TextureHandle {
    /// Handle covering a whole texture.
    pub fn new(id: u64, size: Size) -> Self {
        Self {
            id,
            size,
            uv_rect: VertexHelper::FULL_UV,
        }
    }
}

/// Resolves package items to textures.
pub trait TextureProvider {
    /// Texture for `url`, or `None` if the item is unknown.
    fn texture_for_item(&self, url: &str) -> Option<TextureHandle>;
}

/// Host-side renderer.
pub trait Painter {
    /// Draw one triangle list.
    ///
    /// `vertices` are in world space with `alpha` already multiplied into their colors. The alpha
    /// is passed as well for hosts that batch or composite per draw.
    fn paint_vertex_buffer(
        &mut self,
        vertices: &[PaintVertex],
        indices: &[u32],
        texture: Option<&TextureHandle>,
        alpha: f32,
    );
}

/// Texture mirroring.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FlipType {
    /// No mirroring.
    #[default]
    None,
    /// Mirror left/right.
    Horizontal,
    /// Mirror top/bottom.
    Vertical,
    /// Mirror both axes.
    Both,
}

impl FlipType {
    fn apply(self, uv: Rect) -> Rect {
        let (h, v) = match self {
            Self::None => (false, false),
            Self::Horizontal => (true, false),
            Self::Vertical => (false, true),
            Self::Both => (true, true),
        };
        let (x0, x1) = if h { (uv.x1, uv.x0) } else { (uv.x0, uv.x1) };
        let (y0, y1) = if v { (uv.y1, uv.y0) } else { (uv.y0, uv.y1) };
        Rect::new(x0, y0, x1, y1)
    }
}

/// Visual content of one node.
///
/// Geometry is rebuilt only when marked dirty (shape, content rectangle, texture, flip or tint
/// changed). A paint whose only changes are the transform rewrites positions; a paint whose only
/// changes are alpha or grayed state rewrites colors. Neither regenerates geometry.
pub struct Graphics {
    shape: Option<ShapeKind>,
    texture: Option<TextureHandle>,
    color: Color,
    alpha: f32,
    flip: FlipType,
    content_rect: Rect,
    mesh: VertexHelper,
    mesh_dirty: bool,
    rebuilds: u64,
    painted: Vec<PaintVertex>,
    paint_stale: bool,
    painted_transform: Option<Affine>,
    painted_alpha: f32,
    painted_grayed: bool,
}

impl core::fmt::Debug for Graphics {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Graphics")
            .field("shape", &self.shape)
            .field("texture", &self.texture.as_ref().map(|t| t.id))
            .field("content_rect", &self.content_rect)
            .field("vertices", &self.mesh.vert_count())
            .field("mesh_dirty", &self.mesh_dirty)
            .finish_non_exhaustive()
    }
}

impl Default for Graphics {
    fn default() -> Self {
        Self::new()
    }
}

impl Graphics {
    /// Empty graphics: no shape, no texture, white tint.
    pub fn new() -> Self {
        Self {
            shape: None,
            texture: None,
            color: Color::WHITE,
            alpha: 1.0,
            flip: FlipType::None,
            content_rect: Rect::ZERO,
            mesh: VertexHelper::default(),
            mesh_dirty: true,
            rebuilds: 0,
            painted: Vec::new(),
            paint_stale: true,
            painted_transform: None,
            painted_alpha: 1.0,
            painted_grayed: false,
        }
    }

    /// Force a geometry rebuild on the next paint.
    pub fn set_mesh_dirty(&mut self) {
        self.mesh_dirty = true;
    }

    /// Whether geometry will be rebuilt on the next paint.
    pub fn is_mesh_dirty(&self) -> bool {
        self.mesh_dirty
    }

    /// Number of geometry rebuilds so far.
    pub fn rebuild_count(&self) -> u64 {
        self.rebuilds
    }

    /// Local rectangle the content is drawn into.
    pub fn content_rect(&self) -> Rect {
        self.content_rect
    }

    /// Set the local rectangle; usually the node's size.
    pub fn set_content_rect(&mut self, rect: Rect) {
        if self.content_rect != rect {
            self.content_rect = rect;
            self.mesh_dirty = true;
        }
    }

    /// Current shape generator.
    pub fn shape(&self) -> Option<&ShapeKind> {
        self.shape.as_ref()
    }

    /// Replace the shape generator.
    pub fn set_shape(&mut self, shape: impl Into<ShapeKind>) {
        self.shape = Some(shape.into());
        self.mesh_dirty = true;
    }

    /// Remove the shape. A textured graphics then draws a plain quad.
    pub fn clear_shape(&mut self) {
        if self.shape.take().is_some() {
            self.mesh_dirty = true;
        }
    }

    /// Draw a rectangle with a border.
    pub fn draw_rect(&mut self, line_width: f64, line_color: Color, fill_color: Color) {
        self.set_shape(RectMesh {
            line_width,
            line_color,
            fill_color: Some(fill_color),
            ..RectMesh::default()
        });
    }

    /// Draw a rounded rectangle; radii are top-left, top-right, bottom-left, bottom-right.
    pub fn draw_round_rect(
        &mut self,
        line_width: f64,
        line_color: Color,
        fill_color: Color,
        radii: [f64; 4],
    ) {
        let [top_left_radius, top_right_radius, bottom_left_radius, bottom_right_radius] = radii;
        self.set_shape(RoundedRectMesh {
            line_width,
            line_color,
            fill_color: Some(fill_color),
            top_left_radius,
            top_right_radius,
            bottom_left_radius,
            bottom_right_radius,
            ..RoundedRectMesh::default()
        });
    }

    /// Draw an ellipse filling the content rectangle.
    pub fn draw_ellipse(&mut self, line_width: f64, line_color: Color, fill_color: Color) {
        self.set_shape(EllipseMesh {
            line_width,
            line_color,
            fill_color: Some(fill_color),
            ..EllipseMesh::default()
        });
    }

    /// Draw an elliptical sector between two angles in degrees.
    pub fn draw_sector(&mut self, fill_color: Color, start_degree: f64, end_degree: f64) {
        self.set_shape(EllipseMesh {
            fill_color: Some(fill_color),
            start_degree,
            end_degree,
            ..EllipseMesh::default()
        });
    }

    /// Draw a polygon.
    pub fn draw_polygon(
        &mut self,
        points: impl Into<Vec<Point>>,
        fill_color: Color,
        line_width: f64,
        line_color: Color,
    ) {
        self.set_shape(PolygonMesh {
            fill_color: Some(fill_color),
            line_width,
            line_color,
            ..PolygonMesh::new(points)
        });
    }

    /// Draw a regular polygon or, with `distances`, a star.
    pub fn draw_regular_polygon(
        &mut self,
        sides: usize,
        line_width: f64,
        line_color: Color,
        fill_color: Color,
        rotation: f64,
        distances: Option<Vec<f64>>,
    ) {
        self.set_shape(RegularPolygonMesh {
            sides,
            line_width,
            line_color,
            fill_color: Some(fill_color),
            rotation,
            distances,
            ..RegularPolygonMesh::default()
        });
    }

    /// Current reveal fill, if the shape is a fill.
    pub fn fill(&self) -> Option<&FillMesh> {
        match &self.shape {
            Some(ShapeKind::Fill(f)) => Some(f),
            _ => None,
        }
    }

    fn update_fill(&mut self, edit: impl FnOnce(&mut FillMesh)) {
        let mut fill = self.fill().copied().unwrap_or_default();
        edit(&mut fill);
        self.set_shape(fill);
    }

    /// Set the reveal method, installing a fill shape if needed.
    pub fn set_fill_method(&mut self, method: FillMethod) {
        self.update_fill(|f| f.method = method);
    }

    /// Set the reveal origin.
    pub fn set_fill_origin(&mut self, origin: FillOrigin) {
        self.update_fill(|f| f.origin = origin);
    }

    /// Set the radial sweep direction.
    pub fn set_fill_clockwise(&mut self, clockwise: bool) {
        self.update_fill(|f| f.clockwise = clockwise);
    }

    /// Set the revealed fraction.
    pub fn set_fill_amount(&mut self, amount: f64) {
        self.update_fill(|f| f.amount = amount.clamp(0.0, 1.0));
    }

    /// Current texture.
    pub fn texture(&self) -> Option<&TextureHandle> {
        self.texture.as_ref()
    }

    /// Replace the texture.
    pub fn set_texture(&mut self, texture: Option<TextureHandle>) {
        if self.texture != texture {
            self.texture = texture;
            self.mesh_dirty = true;
        }
    }

    /// Resolve `url` through `provider` and use it as the texture.
    ///
    /// Returns false (and clears the texture) when the provider does not know the item.
    pub fn load_texture(&mut self, provider: &dyn TextureProvider, url: &str) -> bool {
        let texture = provider.texture_for_item(url);
        if texture.is_none() {
            log::warn!("resource not found: {url}");
        }
        let found = texture.is_some();
        self.set_texture(texture);
        found
    }

    /// Tint color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Set the tint color.
    pub fn set_color(&mut self, color: Color) {
        if self.color != color {
            self.color = color;
            self.mesh_dirty = true;
        }
    }

    /// Own alpha, multiplied with the parent alpha at paint.
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Set own alpha. Does not dirty geometry.
    pub fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }

    /// Texture mirroring.
    pub fn flip(&self) -> FlipType {
        self.flip
    }

    /// Set texture mirroring.
    pub fn set_flip(&mut self, flip: FlipType) {
        if self.flip != flip {
            self.flip = flip;
            self.mesh_dirty = true;
        }
    }

    /// Shape-specific point inclusion in local space, or `None` when there is no precise test.
    pub fn hit_test(&self, pt: Point) -> Option<bool> {
        self.shape
            .as_ref()
            .and_then(|s| s.hit_test(self.content_rect, pt))
    }

    /// Rebuild geometry if dirty and return the local-space buffer.
    pub fn update_mesh(&mut self) -> &VertexBuffer {
        if self.mesh_dirty {
            let uv = self
                .texture
                .as_ref()
                .map_or(VertexHelper::FULL_UV, |t| t.uv_rect);
            self.mesh
                .reset(self.content_rect, self.flip.apply(uv), self.color);
            match &self.shape {
                Some(shape) => shape.populate_mesh(&mut self.mesh),
                None if self.texture.is_some() => {
                    let start = self.mesh.vert_count();
                    self.mesh.add_quad(self.content_rect);
                    self.mesh.add_quad_triangles(start);
                }
                None => {}
            }
            self.mesh_dirty = false;
            self.rebuilds += 1;
            self.paint_stale = true;
            log::trace!(
                "graphics rebuilt: {} vertices, {} triangles",
                self.mesh.vert_count(),
                self.mesh.buffer().triangle_count()
            );
        }
        self.mesh.buffer()
    }

    /// Paint with a local-to-world `transform` and the accumulated parent alpha.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Paint vertices are f32 by contract."
    )]
    pub fn paint(
        &mut self,
        transform: Affine,
        parent_alpha: f32,
        grayed: bool,
        painter: &mut dyn Painter,
    ) {
        self.update_mesh();
        let vertices = &self.mesh.buffer().vertices;
        if vertices.is_empty() {
            return;
        }
        let alpha = (self.alpha * parent_alpha).clamp(0.0, 1.0);
        let full = self.paint_stale || self.painted.len() != vertices.len();
        if full {
            self.painted.resize(vertices.len(), PaintVertex::default());
        }
        if full || self.painted_transform != Some(transform) {
            for (pv, v) in self.painted.iter_mut().zip(vertices) {
                let p = transform * v.position;
                pv.position = [p.x as f32, p.y as f32];
                pv.uv = [v.uv.x as f32, v.uv.y as f32];
            }
            self.painted_transform = Some(transform);
        }
        if full || self.painted_alpha != alpha || self.painted_grayed != grayed {
            for (pv, v) in self.painted.iter_mut().zip(vertices) {
                let c = if grayed { v.color.grayscale() } else { v.color };
                pv.color = c.multiply_alpha(alpha).to_array();
            }
            self.painted_alpha = alpha;
            self.painted_grayed = grayed;
        }
        self.paint_stale = false;
        painter.paint_vertex_buffer(
            &self.painted,
            &self.mesh.buffer().triangles,
            self.texture.as_ref(),
            alpha,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Vec2;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<(Vec<PaintVertex>, usize, Option<u64>, f32)>,
    }

    impl Painter for Recorder {
        fn paint_vertex_buffer(
            &mut self,
            vertices: &[PaintVertex],
            indices: &[u32],
            texture: Option<&TextureHandle>,
            alpha: f32,
        ) {
            self.calls
                .push((vertices.to_vec(), indices.len(), texture.map(|t| t.id), alpha));
        }
    }

    struct Atlas;

    impl TextureProvider for Atlas {
        fn texture_for_item(&self, url: &str) -> Option<TextureHandle> {
            (url == "ui://main/icon").then(|| TextureHandle::new(7, Size::new(32.0, 32.0)))
        }
    }

    fn square() -> Graphics {
        let mut g = Graphics::new();
        g.set_content_rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        g.draw_rect(0.0, Color::BLACK, Color::WHITE);
        g
    }

    #[test]
    fn rebuilds_lazily_once() {
        let mut g = square();
        let mut r = Recorder::default();
        assert!(g.is_mesh_dirty());
        g.paint(Affine::IDENTITY, 1.0, false, &mut r);
        g.paint(Affine::IDENTITY, 1.0, false, &mut r);
        assert_eq!(g.rebuild_count(), 1);
        assert_eq!(r.calls.len(), 2);
        assert_eq!(r.calls[0].1, 6);
    }

    #[test]
    fn alpha_and_transform_changes_do_not_rebuild_geometry() {
        let mut g = square();
        let mut r = Recorder::default();
        g.paint(Affine::IDENTITY, 1.0, false, &mut r);
        g.set_alpha(0.5);
        g.paint(Affine::translate(Vec2::new(5.0, 0.0)), 1.0, false, &mut r);
        assert_eq!(g.rebuild_count(), 1, "only the paint pass changed");
        let (verts, _, _, alpha) = &r.calls[1];
        assert_eq!(*alpha, 0.5);
        assert_eq!(verts[0].color[3], 128);
        assert_eq!(verts[1].position, [5.0, 0.0]);
    }

    #[test]
    fn parent_alpha_multiplies_and_grayed_desaturates() {
        let mut g = Graphics::new();
        g.set_content_rect(Rect::new(0.0, 0.0, 4.0, 4.0));
        g.draw_rect(0.0, Color::BLACK, Color::rgb(255, 0, 0));
        let mut r = Recorder::default();
        g.paint(Affine::IDENTITY, 0.5, true, &mut r);
        let c = r.calls[0].0[0].color;
        assert_eq!(c[0], c[1]);
        assert_eq!(c[3], 128);
    }

    #[test]
    fn shape_change_marks_dirty() {
        let mut g = square();
        let mut r = Recorder::default();
        g.paint(Affine::IDENTITY, 1.0, false, &mut r);
        g.draw_ellipse(0.0, Color::BLACK, Color::WHITE);
        assert!(g.is_mesh_dirty());
        g.paint(Affine::IDENTITY, 1.0, false, &mut r);
        assert_eq!(g.rebuild_count(), 2);
        assert!(r.calls[1].0.len() > 4);
    }

    #[test]
    fn fill_setters_install_fill_shape() {
        let mut g = Graphics::new();
        g.set_content_rect(Rect::new(0.0, 0.0, 100.0, 100.0));
        g.set_fill_method(FillMethod::Radial360);
        g.set_fill_amount(0.5);
        let fill = g.fill().copied().unwrap();
        assert_eq!(fill.method, FillMethod::Radial360);
        assert_eq!(fill.amount, 0.5);
        assert!((g.update_mesh().area() - 5000.0).abs() < 1e-9);
        assert_eq!(g.hit_test(Point::new(1.0, 1.0)), None, "fills have no precise test");
    }

    #[test]
    fn textured_graphics_without_shape_draws_a_quad() {
        let mut g = Graphics::new();
        g.set_content_rect(Rect::new(0.0, 0.0, 32.0, 32.0));
        assert!(g.load_texture(&Atlas, "ui://main/icon"));
        let mut r = Recorder::default();
        g.paint(Affine::IDENTITY, 1.0, false, &mut r);
        assert_eq!(r.calls[0].2, Some(7));
        assert_eq!(r.calls[0].0.len(), 4);

        assert!(!g.load_texture(&Atlas, "ui://main/missing"));
        assert!(g.texture().is_none());
    }

    #[test]
    fn horizontal_flip_mirrors_uvs() {
        let mut g = Graphics::new();
        g.set_content_rect(Rect::new(0.0, 0.0, 8.0, 8.0));
        g.set_texture(Some(TextureHandle::new(1, Size::new(8.0, 8.0))));
        g.set_flip(FlipType::Horizontal);
        let buf = g.update_mesh();
        // Bottom-left corner samples the right edge of the texture.
        assert_eq!(buf.vertices[0].uv, Point::new(1.0, 1.0));
        assert_eq!(buf.vertices[2].uv, Point::new(0.0, 0.0));
    }

    #[test]
    fn shape_hit_test_is_exposed() {
        let mut g = Graphics::new();
        g.set_content_rect(Rect::new(0.0, 0.0, 100.0, 100.0));
        g.draw_ellipse(0.0, Color::BLACK, Color::WHITE);
        assert_eq!(g.hit_test(Point::new(50.0, 50.0)), Some(true));
        assert_eq!(g.hit_test(Point::new(2.0, 2.0)), Some(false));
    }
}
