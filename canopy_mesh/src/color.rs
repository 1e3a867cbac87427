// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Color and vertex records.

use bytemuck::{Pod, Zeroable};
use kurbo::Point;

/// 8-bit RGBA color, straight (non-premultiplied) alpha.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Color {
    /// Opaque white.
    pub const WHITE: Self = Self::rgba(255, 255, 255, 255);
    /// Opaque black.
    pub const BLACK: Self = Self::rgba(0, 0, 0, 255);
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    /// Construct from channels.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Construct an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Same color with a replaced alpha channel.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// True when the alpha channel is zero.
    pub const fn is_transparent(self) -> bool {
        self.a == 0
    }

    /// Scale the alpha channel by `factor` (clamped to `0..=1`).
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "Result is clamped to the u8 range before the cast."
    )]
    pub fn multiply_alpha(self, factor: f32) -> Self {
        let a = (f32::from(self.a) * factor.clamp(0.0, 1.0)).round();
        self.with_alpha(a.clamp(0.0, 255.0) as u8)
    }

    /// Luma-weighted grayscale of this color, alpha preserved.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Weighted average of u8 channels stays below 256."
    )]
    pub fn grayscale(self) -> Self {
        let y = (u32::from(self.r) * 299 + u32::from(self.g) * 587 + u32::from(self.b) * 114)
            / 1000;
        let y = y as u8;
        Self::rgba(y, y, y, self.a)
    }

    /// Channels as an array, in RGBA order.
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Build from an RGBA array.
    pub const fn from_array(c: [u8; 4]) -> Self {
        Self::rgba(c[0], c[1], c[2], c[3])
    }
}

/// A generated vertex in the local space of its owner.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vertex {
    /// Local position.
    pub position: Point,
    /// Vertex color.
    pub color: Color,
    /// Texture coordinate.
    pub uv: Point,
}

/// GPU-facing vertex: world-space position, UV and color with alpha already applied.
///
/// The layout is `#[repr(C)]` and [`Pod`], so a slice can be cast to bytes with
/// [`bytemuck::cast_slice`] for upload.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct PaintVertex {
    /// World-space position.
    pub position: [f32; 2],
    /// Texture coordinate.
    pub uv: [f32; 2],
    /// RGBA8 color.
    pub color: [u8; 4],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grayscale_keeps_alpha() {
        let c = Color::rgba(255, 0, 0, 77).grayscale();
        assert_eq!(c.r, c.g);
        assert_eq!(c.g, c.b);
        assert_eq!(c.a, 77);
        assert_eq!(c.r, 76);
    }

    #[test]
    fn multiply_alpha_clamps() {
        assert_eq!(Color::WHITE.multiply_alpha(0.5).a, 128);
        assert_eq!(Color::WHITE.multiply_alpha(2.0).a, 255);
        assert_eq!(Color::WHITE.multiply_alpha(-1.0).a, 0);
    }

    #[test]
    fn paint_vertex_is_tightly_packed() {
        assert_eq!(core::mem::size_of::<PaintVertex>(), 20);
        let verts = [PaintVertex::default(); 3];
        let bytes: &[u8] = bytemuck::cast_slice(&verts);
        assert_eq!(bytes.len(), 60);
    }
}
