// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tween targets: how values reach the objects they animate.

use crate::value::TweenValue;

/// A well-known property a tween can drive on its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TweenProp {
    /// Horizontal position, from `x`.
    X,
    /// Vertical position, from `x`.
    Y,
    /// Position, from `x, y`.
    Position,
    /// Width, from `x`.
    Width,
    /// Height, from `x`.
    Height,
    /// Size, from `x, y`.
    Size,
    /// Horizontal scale, from `x`.
    ScaleX,
    /// Vertical scale, from `x`.
    ScaleY,
    /// Scale, from `x, y`.
    Scale,
    /// Rotation in degrees, from `x`.
    Rotation,
    /// Opacity, from `x`.
    Alpha,
    /// Progress value, from `d`.
    Progress,
}

/// Owner of the objects tweens are bound to.
///
/// Tweens hold only a key. Liveness is checked before every update, so a destroyed target cancels
/// its tweens instead of being written to.
pub trait TweenTargets<K> {
    /// Whether `target` still exists.
    fn is_alive(&self, target: K) -> bool;

    /// Write the current value of a tween bound to `prop` on `target`.
    fn apply(&mut self, target: K, prop: TweenProp, value: &TweenValue);
}

/// Targets for tweens that are observed only through callbacks.
///
/// Every key is alive and nothing is written.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoTargets;

impl<K> TweenTargets<K> for NoTargets {
    fn is_alive(&self, _target: K) -> bool {
        true
    }

    fn apply(&mut self, _target: K, _prop: TweenProp, _value: &TweenValue) {}
}
