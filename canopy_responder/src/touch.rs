// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-pointer press/move/release state, captors, and click recognition.
//!
//! Each [`TouchId`] gets a [`TouchInfo`] the first time it is seen. The life of a touch is:
//!
//! - `press`: record the down position and the root-to-target path under the pointer, clear
//!   the previous captors, settle the click count.
//! - `moved`: once the pointer strays further than the cancel distance from the down
//!   position, the press can no longer become a click. This happens whether or not the touch
//!   is captured.
//! - `release`: hand back the captors (who alone receive `TouchEnd`) and, unless the click
//!   was cancelled, the innermost node shared by the press path and the release path.

use std::collections::HashMap;
use std::fmt;

use kurbo::Point;

use crate::chain::common_target;
use crate::hover::{RollChange, RollOverState};
use crate::types::{InputSnapshot, TouchId};

/// Thresholds used by [`TouchTracker`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TouchSettings {
    /// Movement from the down position that cancels a click.
    pub click_cancel_distance: f64,
    /// Longest gap between two presses that still makes a double click, in seconds.
    pub double_click_interval: f64,
    /// Largest distance between two presses that still makes a double click.
    pub double_click_distance: f64,
}

impl Default for TouchSettings {
    fn default() -> Self {
        Self {
            click_cancel_distance: 50.0,
            double_click_interval: 0.35,
            double_click_distance: 8.0,
        }
    }
}

/// State of one pointer stream.
#[derive(Clone)]
pub struct TouchInfo<K> {
    down: bool,
    down_pos: Point,
    click_cancelled: bool,
    click_count: u32,
    captors: Vec<K>,
    down_path: Vec<K>,
    last_event: InputSnapshot,
    last_press_time: f64,
    last_press_pos: Point,
    roll: RollOverState<K>,
}

impl<K: fmt::Debug> fmt::Debug for TouchInfo<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TouchInfo")
            .field("down", &self.down)
            .field("down_pos", &self.down_pos)
            .field("click_cancelled", &self.click_cancelled)
            .field("click_count", &self.click_count)
            .field("captors", &self.captors)
            .field("down_path", &self.down_path)
            .finish_non_exhaustive()
    }
}

impl<K: Copy + Eq> TouchInfo<K> {
    fn new() -> Self {
        Self {
            down: false,
            down_pos: Point::ORIGIN,
            click_cancelled: false,
            click_count: 0,
            captors: Vec::new(),
            down_path: Vec::new(),
            last_event: InputSnapshot::default(),
            last_press_time: f64::NEG_INFINITY,
            last_press_pos: Point::ORIGIN,
            roll: RollOverState::new(),
        }
    }

    /// Whether the pointer is pressed.
    pub fn is_down(&self) -> bool {
        self.down
    }

    /// Where the current (or last) press started.
    pub fn down_position(&self) -> Point {
        self.down_pos
    }

    /// Whether the current press moved too far to be a click.
    pub fn is_click_cancelled(&self) -> bool {
        self.click_cancelled
    }

    /// Click count of the current (or last) press.
    pub fn click_count(&self) -> u32 {
        self.click_count
    }

    /// Nodes holding capture, in capture order.
    pub fn captors(&self) -> &[K] {
        &self.captors
    }

    /// Root-to-target path recorded at press time.
    pub fn down_path(&self) -> &[K] {
        &self.down_path
    }

    /// Most recent event seen for this pointer.
    pub fn last_event(&self) -> &InputSnapshot {
        &self.last_event
    }

    /// Root-to-target path the pointer is over.
    pub fn roll_over_path(&self) -> &[K] {
        self.roll.current_path()
    }
}

/// Outcome of a release.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Release<K> {
    /// Captors at release time; `TouchEnd` goes to exactly these when non-empty.
    pub captors: Vec<K>,
    /// Node the click is attributed to, when the release still counts as a click.
    pub click_target: Option<K>,
    /// Click count of the press.
    pub click_count: u32,
}

/// All pointer streams, keyed by [`TouchId`].
pub struct TouchTracker<K> {
    settings: TouchSettings,
    touches: HashMap<TouchId, TouchInfo<K>>,
    last_touch: Option<TouchId>,
}

impl<K: fmt::Debug> fmt::Debug for TouchTracker<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TouchTracker")
            .field("settings", &self.settings)
            .field("touches", &self.touches)
            .field("last_touch", &self.last_touch)
            .finish()
    }
}

impl<K: Copy + Eq> Default for TouchTracker<K> {
    fn default() -> Self {
        Self::new(TouchSettings::default())
    }
}

impl<K: Copy + Eq> TouchTracker<K> {
    /// Tracker with the given thresholds.
    pub fn new(settings: TouchSettings) -> Self {
        Self {
            settings,
            touches: HashMap::new(),
            last_touch: None,
        }
    }

    /// Thresholds in use.
    pub fn settings(&self) -> &TouchSettings {
        &self.settings
    }

    /// Replace the thresholds.
    pub fn set_settings(&mut self, settings: TouchSettings) {
        self.settings = settings;
    }

    /// State of `touch`, if it was ever seen.
    pub fn info(&self, touch: TouchId) -> Option<&TouchInfo<K>> {
        self.touches.get(&touch)
    }

    /// Every known pointer stream.
    pub fn touches(&self) -> impl Iterator<Item = (TouchId, &TouchInfo<K>)> {
        self.touches.iter().map(|(&id, info)| (id, info))
    }

    /// Pointer that produced the most recent event.
    ///
    /// Only used as the default for dispatches that carry no pointer of their own.
    pub fn last_touch(&self) -> Option<TouchId> {
        self.last_touch
    }

    /// Most recent event of the last observed pointer, or a blank snapshot.
    pub fn last_input(&self) -> InputSnapshot {
        self.last_touch
            .and_then(|t| self.touches.get(&t))
            .map(|i| i.last_event)
            .unwrap_or_default()
    }

    /// Whether `touch` is pressed.
    pub fn is_down(&self, touch: TouchId) -> bool {
        self.touches.get(&touch).is_some_and(|i| i.down)
    }

    fn entry(&mut self, touch: TouchId) -> &mut TouchInfo<K> {
        self.last_touch = Some(touch);
        self.touches.entry(touch).or_insert_with(TouchInfo::new)
    }

    /// Record a press at `input.position` at time `now` (seconds) over `down_path`.
    ///
    /// Returns the click count: the host's when `input.click_count` is non-zero, otherwise 2
    /// for a second press close enough in time and space to a previous single press, else 1.
    pub fn press(&mut self, input: InputSnapshot, now: f64, down_path: Vec<K>) -> u32 {
        let settings = self.settings;
        let info = self.entry(input.touch);
        let count = if input.click_count > 0 {
            input.click_count
        } else if info.click_count == 1
            && now - info.last_press_time <= settings.double_click_interval
            && (input.position - info.last_press_pos).hypot() <= settings.double_click_distance
        {
            2
        } else {
            1
        };
        info.down = true;
        info.down_pos = input.position;
        info.click_cancelled = false;
        info.click_count = count;
        info.captors.clear();
        info.down_path = down_path;
        info.last_event = InputSnapshot {
            click_count: count,
            ..input
        };
        info.last_press_time = now;
        info.last_press_pos = input.position;
        count
    }

    /// Record a move. Returns `true` when this move cancelled the pending click.
    pub fn moved(&mut self, input: InputSnapshot) -> bool {
        let cancel = self.settings.click_cancel_distance;
        let info = self.entry(input.touch);
        info.last_event = InputSnapshot {
            click_count: info.click_count,
            ..input
        };
        if info.down
            && !info.click_cancelled
            && (input.position - info.down_pos).hypot() > cancel
        {
            info.click_cancelled = true;
            return true;
        }
        false
    }

    /// Record a release over `release_path` (root to target).
    ///
    /// Captors are handed back and cleared. A release that was never pressed yields no
    /// click target.
    pub fn release(&mut self, input: InputSnapshot, release_path: &[K]) -> Release<K> {
        let info = self.entry(input.touch);
        let was_down = std::mem::replace(&mut info.down, false);
        info.last_event = InputSnapshot {
            click_count: info.click_count,
            ..input
        };
        let click_target = if was_down && !info.click_cancelled {
            common_target(&info.down_path, release_path)
        } else {
            None
        };
        info.down_path.clear();
        Release {
            captors: std::mem::take(&mut info.captors),
            click_target,
            click_count: info.click_count,
        }
    }

    /// Mark the current press of `touch` as not-a-click.
    pub fn cancel_click(&mut self, touch: TouchId) {
        if let Some(info) = self.touches.get_mut(&touch) {
            info.click_cancelled = true;
        }
    }

    /// Make `node` a captor of `touch`. Returns `false` if it already was one.
    pub fn capture(&mut self, touch: TouchId, node: K) -> bool {
        let info = self.touches.entry(touch).or_insert_with(TouchInfo::new);
        if info.captors.contains(&node) {
            return false;
        }
        info.captors.push(node);
        true
    }

    /// Remove `node` from the captors of `touch`.
    pub fn uncapture(&mut self, touch: TouchId, node: K) {
        if let Some(info) = self.touches.get_mut(&touch) {
            info.captors.retain(|&k| k != node);
        }
    }

    /// Remove `node` from the captors of every touch.
    pub fn uncapture_all(&mut self, node: K) {
        for info in self.touches.values_mut() {
            info.captors.retain(|&k| k != node);
        }
    }

    /// Captors of `touch`.
    pub fn captors(&self, touch: TouchId) -> &[K] {
        self.touches
            .get(&touch)
            .map(|i| i.captors.as_slice())
            .unwrap_or_default()
    }

    /// Drop captors, down-path entries and hovered nodes for which `keep` fails.
    pub fn retain(&mut self, mut keep: impl FnMut(&K) -> bool) {
        for info in self.touches.values_mut() {
            info.captors.retain(|k| keep(k));
            info.down_path.retain(|k| keep(k));
            info.roll.retain_prefix(&mut keep);
        }
    }

    /// Update the roll-over path of `touch`.
    pub fn roll_over(&mut self, touch: TouchId, path: &[K]) -> RollChange<K> {
        self.touches
            .entry(touch)
            .or_insert_with(TouchInfo::new)
            .roll
            .update_path(path)
    }

    /// Leave every node `touch` was over, innermost first.
    pub fn roll_out_all(&mut self, touch: TouchId) -> Vec<K> {
        self.touches
            .get_mut(&touch)
            .map(|i| i.roll.clear())
            .unwrap_or_default()
    }
}
