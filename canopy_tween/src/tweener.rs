// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A single tween and its configuration.

use std::any::Any;
use std::fmt;

use rand::Rng;
use rand::rngs::SmallRng;

use crate::ease::{DEFAULT_OVERSHOOT, EaseType};
use crate::handle::TweenerHandle;
use crate::manager::TweenManager;
use crate::path::TweenPath;
use crate::target::{TweenProp, TweenTargets};
use crate::value::TweenValue;

/// Callback fired on start, update or completion.
///
/// Receives the tween itself, the manager (so new tweens can be created or others killed from
/// inside a tick), and the targets the tick was run against.
pub type TweenCallback<K> =
    Box<dyn FnMut(&mut Tweener<K>, &mut TweenManager<K>, &mut dyn TweenTargets<K>)>;

/// What a tween interpolates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ValueKind {
    /// No value; only timing and callbacks.
    Delayed,
    /// `n` of the `x, y, z, w` channels.
    Channels(usize),
    /// The `d` channel.
    Double,
    /// Random offsets around `start.x, start.y` decaying from amplitude `start.w`.
    Shake,
}

/// How a tween finished.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum Ended {
    #[default]
    No,
    Completed,
    Breakpoint,
}

#[derive(Clone, Copy, Debug)]
pub(crate) enum Which {
    Start,
    Update,
    Complete,
}

/// One tween.
///
/// Created through [`TweenManager`]; every setter returns `&mut Self` so configuration chains.
/// A tween does nothing until the manager's first tick after its creation.
pub struct Tweener<K> {
    pub(crate) handle: TweenerHandle,
    pub(crate) kind: ValueKind,
    pub(crate) target: Option<K>,
    pub(crate) prop: Option<TweenProp>,
    start_value: TweenValue,
    end_value: TweenValue,
    value: TweenValue,
    delta_value: TweenValue,
    delay: f64,
    duration: f64,
    breakpoint: f64,
    ease: EaseType,
    overshoot_or_amplitude: f64,
    period: f64,
    repeat: i32,
    yoyo: bool,
    time_scale: f64,
    snapping: bool,
    pub(crate) paused: bool,
    path: Option<TweenPath>,
    user_data: Option<Box<dyn Any>>,
    on_start: Option<TweenCallback<K>>,
    on_update: Option<TweenCallback<K>>,
    on_complete: Option<TweenCallback<K>>,
    pub(crate) elapsed: f64,
    normalized_time: f64,
    /// Repeat round reached by the last [`Tweener::compute`].
    pub(crate) round: i64,
    pub(crate) started: bool,
    pub(crate) ended: Ended,
    pub(crate) killed: bool,
}

impl<K> fmt::Debug for Tweener<K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tweener")
            .field("handle", &self.handle)
            .field("target", &self.target)
            .field("prop", &self.prop)
            .field("value", &self.value)
            .field("elapsed", &self.elapsed)
            .field("killed", &self.killed)
            .finish_non_exhaustive()
    }
}

impl<K: Copy + PartialEq> Tweener<K> {
    pub(crate) fn new(
        handle: TweenerHandle,
        kind: ValueKind,
        start: TweenValue,
        end: TweenValue,
        duration: f64,
    ) -> Self {
        Self {
            handle,
            kind,
            target: None,
            prop: None,
            start_value: start,
            end_value: end,
            value: start,
            delta_value: TweenValue::ZERO,
            delay: 0.0,
            duration,
            breakpoint: -1.0,
            ease: EaseType::default(),
            overshoot_or_amplitude: DEFAULT_OVERSHOOT,
            period: 0.0,
            repeat: 0,
            yoyo: false,
            time_scale: 1.0,
            snapping: false,
            paused: false,
            path: None,
            user_data: None,
            on_start: None,
            on_update: None,
            on_complete: None,
            elapsed: 0.0,
            normalized_time: 0.0,
            round: 0,
            started: false,
            ended: Ended::No,
            killed: false,
        }
    }

    /// Seconds to wait before the tween starts.
    pub fn set_delay(&mut self, delay: f64) -> &mut Self {
        self.delay = delay.max(0.0);
        self
    }

    /// Seconds one round takes.
    pub fn set_duration(&mut self, duration: f64) -> &mut Self {
        self.duration = duration.max(0.0);
        self
    }

    /// Stop (and complete) once this many seconds past the delay have run. Negative disables.
    pub fn set_breakpoint(&mut self, breakpoint: f64) -> &mut Self {
        self.breakpoint = breakpoint;
        self
    }

    /// Easing curve.
    pub fn set_ease(&mut self, ease: EaseType) -> &mut Self {
        self.ease = ease;
        self
    }

    /// Elastic period (zero picks the curve's default).
    pub fn set_ease_period(&mut self, period: f64) -> &mut Self {
        self.period = period;
        self
    }

    /// Back overshoot or elastic amplitude.
    pub fn set_ease_overshoot_or_amplitude(&mut self, value: f64) -> &mut Self {
        self.overshoot_or_amplitude = value;
        self
    }

    /// Extra rounds after the first (`-1` repeats forever). With `yoyo`, odd rounds run backwards.
    pub fn set_repeat(&mut self, repeat: i32, yoyo: bool) -> &mut Self {
        self.repeat = repeat;
        self.yoyo = yoyo;
        self
    }

    /// Multiplier applied to every tick's delta.
    pub fn set_time_scale(&mut self, time_scale: f64) -> &mut Self {
        self.time_scale = time_scale;
        self
    }

    /// Round interpolated values to whole numbers.
    pub fn set_snapping(&mut self, snapping: bool) -> &mut Self {
        self.snapping = snapping;
        self
    }

    /// Bind the tween to `target`. Liveness is checked every tick.
    pub fn set_target(&mut self, target: K) -> &mut Self {
        self.target = Some(target);
        self
    }

    /// Bind the tween to `prop` of `target`, so every update writes the value there.
    pub fn set_target_prop(&mut self, target: K, prop: TweenProp) -> &mut Self {
        self.target = Some(target);
        self.prop = Some(prop);
        self
    }

    /// Property written on the bound target.
    pub fn set_prop(&mut self, prop: TweenProp) -> &mut Self {
        self.prop = Some(prop);
        self
    }

    /// Arbitrary data for callbacks.
    pub fn set_user_data(&mut self, data: Box<dyn Any>) -> &mut Self {
        self.user_data = Some(data);
        self
    }

    /// Follow `path` instead of interpolating between start and end.
    ///
    /// The eased progress is the normalized arc length along the path.
    pub fn set_path(&mut self, path: TweenPath) -> &mut Self {
        self.path = Some(path);
        self
    }

    /// Pause or resume.
    pub fn set_paused(&mut self, paused: bool) -> &mut Self {
        self.paused = paused;
        self
    }

    /// Fired once the delay has passed.
    pub fn on_start(
        &mut self,
        callback: impl FnMut(&mut Self, &mut TweenManager<K>, &mut dyn TweenTargets<K>) + 'static,
    ) -> &mut Self {
        self.on_start = Some(Box::new(callback));
        self
    }

    /// Fired after every value change.
    pub fn on_update(
        &mut self,
        callback: impl FnMut(&mut Self, &mut TweenManager<K>, &mut dyn TweenTargets<K>) + 'static,
    ) -> &mut Self {
        self.on_update = Some(Box::new(callback));
        self
    }

    /// Fired when the tween finishes, or is killed with `complete`.
    pub fn on_complete(
        &mut self,
        callback: impl FnMut(&mut Self, &mut TweenManager<K>, &mut dyn TweenTargets<K>) + 'static,
    ) -> &mut Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    /// This tween's handle.
    pub fn handle(&self) -> TweenerHandle {
        self.handle
    }

    /// Bound target, if any.
    pub fn target(&self) -> Option<K> {
        self.target
    }

    /// Bound property, if any.
    pub fn prop(&self) -> Option<TweenProp> {
        self.prop
    }

    /// Delay in seconds.
    pub fn delay(&self) -> f64 {
        self.delay
    }

    /// Duration of one round in seconds.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Configured repeat count.
    pub fn repeat(&self) -> i32 {
        self.repeat
    }

    /// Ease curve.
    pub fn ease(&self) -> EaseType {
        self.ease
    }

    /// Time scale.
    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// User data set with [`Tweener::set_user_data`].
    pub fn user_data(&self) -> Option<&dyn Any> {
        self.user_data.as_deref()
    }

    /// Start value.
    pub fn start_value(&self) -> &TweenValue {
        &self.start_value
    }

    /// End value.
    pub fn end_value(&self) -> &TweenValue {
        &self.end_value
    }

    /// Current value.
    pub fn value(&self) -> &TweenValue {
        &self.value
    }

    /// Change of the value in the last update.
    pub fn delta_value(&self) -> &TweenValue {
        &self.delta_value
    }

    /// Eased progress of the current round, `0..=1` for non-overshooting curves.
    pub fn normalized_time(&self) -> f64 {
        self.normalized_time
    }

    /// Seconds since creation, including the delay and scaled by the time scale.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Whether the delay has passed.
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Whether the tween reached its end (or breakpoint).
    pub fn is_completed(&self) -> bool {
        self.ended != Ended::No
    }

    /// Whether the tween is paused.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Whether the tween has been killed and awaits recycling.
    pub fn is_killed(&self) -> bool {
        self.killed
    }

    pub(crate) fn callback_slot(&mut self, which: Which) -> &mut Option<TweenCallback<K>> {
        match which {
            Which::Start => &mut self.on_start,
            Which::Update => &mut self.on_update,
            Which::Complete => &mut self.on_complete,
        }
    }

    /// Advance the clock. Returns `false` when nothing moved.
    pub(crate) fn advance(&mut self, dt: f64) -> bool {
        let dt = dt * self.time_scale;
        if dt == 0.0 {
            return false;
        }
        self.elapsed += dt;
        true
    }

    /// Elapsed time that lands exactly on the natural end.
    pub(crate) fn snap_to_end(&mut self) {
        self.elapsed = if self.breakpoint >= 0.0 {
            self.delay + self.breakpoint
        } else if self.repeat >= 0 {
            self.delay + self.duration * f64::from(self.repeat + 1)
        } else {
            self.delay + self.duration * 2.0
        };
    }

    /// Recompute time and value from `elapsed`.
    pub(crate) fn compute(&mut self, rng: &mut SmallRng) {
        if self.kind == ValueKind::Delayed {
            if self.elapsed >= self.delay + self.duration {
                self.ended = Ended::Completed;
            }
            return;
        }

        let mut tt = self.elapsed - self.delay;
        let mut reversed = false;
        if self.breakpoint >= 0.0 && tt >= self.breakpoint {
            tt = self.breakpoint;
            self.ended = Ended::Breakpoint;
        }

        if self.duration <= 0.0 {
            tt = 0.0;
            self.ended = Ended::Completed;
        } else if self.repeat != 0 {
            #[allow(clippy::cast_possible_truncation, reason = "Round counts fit in i64.")]
            let round = (tt / self.duration).floor() as i64;
            tt -= self.duration * round as f64;
            self.round = round;
            if self.yoyo {
                reversed = round % 2 == 1;
            }
            if self.repeat > 0 && i64::from(self.repeat) - round < 0 {
                if self.yoyo {
                    reversed = self.repeat % 2 == 1;
                }
                tt = self.duration;
                self.round = i64::from(self.repeat);
                self.ended = Ended::Completed;
            }
        } else if tt >= self.duration {
            tt = self.duration;
            self.ended = Ended::Completed;
        }

        let t = if reversed { self.duration - tt } else { tt };
        self.normalized_time =
            self.ease
                .evaluate(t, self.duration, self.overshoot_or_amplitude, self.period);

        let previous = self.value;
        match self.kind {
            ValueKind::Delayed => {}
            ValueKind::Double => {
                let d = self.start_value.d
                    + (self.end_value.d - self.start_value.d) * self.normalized_time;
                self.value.d = self.snap(d);
            }
            ValueKind::Shake => {
                if self.ended == Ended::No {
                    let r = self.start_value.w * (1.0 - self.normalized_time);
                    let rx = rng.gen_range(-1.0..=1.0) * r;
                    let ry = rng.gen_range(-1.0..=1.0) * r;
                    self.value.x = self.snap(self.start_value.x + rx);
                    self.value.y = self.snap(self.start_value.y + ry);
                } else {
                    self.value.x = self.start_value.x;
                    self.value.y = self.start_value.y;
                }
            }
            ValueKind::Channels(n) => {
                if let Some(path) = &self.path {
                    let p = path.point_at(self.normalized_time);
                    self.value.x = self.snap(p.x);
                    self.value.y = self.snap(p.y);
                } else {
                    for i in 0..n {
                        let a = self.start_value.channel(i);
                        let b = self.end_value.channel(i);
                        let v = self.snap(a + (b - a) * self.normalized_time);
                        self.value.set_channel(i, v);
                    }
                }
            }
        }
        self.delta_value = TweenValue {
            x: self.value.x - previous.x,
            y: self.value.y - previous.y,
            z: self.value.z - previous.z,
            w: self.value.w - previous.w,
            d: self.value.d - previous.d,
        };
    }

    /// Write the current value to the bound target property.
    pub(crate) fn apply(&self, targets: &mut dyn TweenTargets<K>) {
        if self.kind == ValueKind::Delayed {
            return;
        }
        if let (Some(target), Some(prop)) = (self.target, self.prop) {
            targets.apply(target, prop, &self.value);
        }
    }

    fn snap(&self, v: f64) -> f64 {
        if self.snapping { v.round() } else { v }
    }
}
