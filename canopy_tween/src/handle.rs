// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tween handles.

/// Identifies one tween: a slot index plus the serial of the slot's occupant.
///
/// A slot's serial changes every time the slot is reused, so a handle kept past a kill can never
/// address a newer tween in the same slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TweenerHandle {
    pub(crate) index: u32,
    pub(crate) serial: u32,
}

impl TweenerHandle {
    /// The null handle. Never matches a tween.
    pub const INVALID: Self = Self {
        index: u32::MAX,
        serial: 0,
    };

    pub(crate) const fn new(index: u32, serial: u32) -> Self {
        Self { index, serial }
    }

    /// False for [`TweenerHandle::INVALID`].
    ///
    /// A valid-looking handle may still refer to a finished tween; use
    /// [`TweenManager::get_tween`](crate::TweenManager::get_tween) to check liveness.
    pub const fn is_valid(self) -> bool {
        self.index != u32::MAX
    }

    /// Slot index.
    pub const fn index(self) -> u32 {
        self.index
    }

    /// Occupant serial.
    pub const fn serial(self) -> u32 {
        self.serial
    }

    /// Reset to [`TweenerHandle::INVALID`].
    pub fn invalidate(&mut self) {
        *self = Self::INVALID;
    }
}

impl Default for TweenerHandle {
    fn default() -> Self {
        Self::INVALID
    }
}
