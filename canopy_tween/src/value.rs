// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interpolated values.

use kurbo::{Point, Vec2};

/// Up to four interpolated channels plus an auxiliary double.
///
/// Which channels are meaningful depends on how the tween was created: `to` drives `x`,
/// `to_vec2` drives `x, y`, and so on; `to_double` drives `d`. Shake tweens keep the center in
/// `x, y` and the amplitude in `w`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TweenValue {
    /// First channel.
    pub x: f64,
    /// Second channel.
    pub y: f64,
    /// Third channel.
    pub z: f64,
    /// Fourth channel.
    pub w: f64,
    /// Double-precision channel.
    pub d: f64,
}

impl TweenValue {
    /// All channels zero.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 0.0,
        d: 0.0,
    };

    /// Four-channel value.
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w, d: 0.0 }
    }

    /// Value carried only in the double channel.
    pub const fn double(d: f64) -> Self {
        Self {
            d,
            ..Self::ZERO
        }
    }

    /// Channel by index (`0..4` are `x, y, z, w`; anything else is `d`).
    pub fn channel(&self, i: usize) -> f64 {
        match i {
            0 => self.x,
            1 => self.y,
            2 => self.z,
            3 => self.w,
            _ => self.d,
        }
    }

    /// Set a channel by index, with the same numbering as [`TweenValue::channel`].
    pub fn set_channel(&mut self, i: usize, v: f64) {
        match i {
            0 => self.x = v,
            1 => self.y = v,
            2 => self.z = v,
            3 => self.w = v,
            _ => self.d = v,
        }
    }

    /// `x, y` as a point.
    pub fn to_point(self) -> Point {
        Point::new(self.x, self.y)
    }

    /// `x, y` as a vector.
    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

impl From<f64> for TweenValue {
    fn from(x: f64) -> Self {
        Self::new(x, 0.0, 0.0, 0.0)
    }
}

impl From<Point> for TweenValue {
    fn from(p: Point) -> Self {
        Self::new(p.x, p.y, 0.0, 0.0)
    }
}

impl From<Vec2> for TweenValue {
    fn from(v: Vec2) -> Self {
        Self::new(v.x, v.y, 0.0, 0.0)
    }
}

impl From<[f64; 3]> for TweenValue {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z, 0.0)
    }
}

impl From<[f64; 4]> for TweenValue {
    fn from([x, y, z, w]: [f64; 4]) -> Self {
        Self::new(x, y, z, w)
    }
}
