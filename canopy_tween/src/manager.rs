// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The tween scheduler.

use std::fmt;

use kurbo::Point;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::handle::TweenerHandle;
use crate::target::{TweenProp, TweenTargets};
use crate::tweener::{Ended, Tweener, ValueKind, Which};
use crate::value::TweenValue;

const INITIAL_ACTIVE_CAPACITY: usize = 30;

/// Bookkeeping for a tween whose callbacks are running.
///
/// While a callback runs the tween is moved out of its slot; this keeps it findable.
#[derive(Clone, Copy, Debug)]
struct Busy<K> {
    target: Option<K>,
    prop: Option<TweenProp>,
    killed: bool,
    /// Kill requested from inside a callback, with its `complete` flag.
    pending_kill: Option<bool>,
}

#[derive(Debug)]
struct Slot<K> {
    serial: u32,
    tweener: Option<Tweener<K>>,
    busy: Option<Busy<K>>,
}

/// Pooled, indexed tween scheduler.
///
/// Tweens live in a slot arena addressed by [`TweenerHandle`]s. Freed slots go to a pool and are
/// reused with a new serial, so a handle that outlives its tween is rejected instead of aliasing
/// the next occupant. Scheduling order lives in a flat active list that [`TweenManager::tick`]
/// compacts in place.
///
/// `K` is the key of tween targets (for example a scene node id); see [`TweenTargets`].
pub struct TweenManager<K> {
    slots: Vec<Slot<K>>,
    pool: Vec<u32>,
    /// Slot indices in scheduling order; `None` entries are holes awaiting compaction.
    active: Vec<Option<u32>>,
    total_active: usize,
    rng: SmallRng,
}

impl<K: fmt::Debug> fmt::Debug for TweenManager<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TweenManager")
            .field("slots", &self.slots.len())
            .field("pool", &self.pool.len())
            .field("total_active", &self.total_active)
            .field("capacity", &self.active.len())
            .finish_non_exhaustive()
    }
}

impl<K: Copy + PartialEq> Default for TweenManager<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + PartialEq> TweenManager<K> {
    /// Empty manager with the default active-list capacity.
    pub fn new() -> Self {
        Self::with_seed(0x5eed)
    }

    /// Empty manager whose shake randomness starts from `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            slots: Vec::new(),
            pool: Vec::new(),
            active: vec![None; INITIAL_ACTIVE_CAPACITY],
            total_active: 0,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Tween one channel from `start` to `end`.
    pub fn to(&mut self, start: f64, end: f64, duration: f64) -> &mut Tweener<K> {
        self.create(ValueKind::Channels(1), start.into(), end.into(), duration)
    }

    /// Tween two channels.
    pub fn to_vec2(
        &mut self,
        start: impl Into<TweenValue>,
        end: impl Into<TweenValue>,
        duration: f64,
    ) -> &mut Tweener<K> {
        self.create(ValueKind::Channels(2), start.into(), end.into(), duration)
    }

    /// Tween three channels.
    pub fn to_vec3(&mut self, start: [f64; 3], end: [f64; 3], duration: f64) -> &mut Tweener<K> {
        self.create(ValueKind::Channels(3), start.into(), end.into(), duration)
    }

    /// Tween four channels.
    pub fn to_vec4(&mut self, start: [f64; 4], end: [f64; 4], duration: f64) -> &mut Tweener<K> {
        self.create(ValueKind::Channels(4), start.into(), end.into(), duration)
    }

    /// Tween the double channel.
    pub fn to_double(&mut self, start: f64, end: f64, duration: f64) -> &mut Tweener<K> {
        self.create(
            ValueKind::Double,
            TweenValue::double(start),
            TweenValue::double(end),
            duration,
        )
    }

    /// Shake around `center` with an offset decaying from `amplitude` to zero.
    pub fn shake(&mut self, center: Point, amplitude: f64, duration: f64) -> &mut Tweener<K> {
        self.create(
            ValueKind::Shake,
            TweenValue::new(center.x, center.y, 0.0, amplitude),
            TweenValue::ZERO,
            duration,
        )
    }

    /// A tween with no value that starts after `delay` and completes right away.
    pub fn delayed_call(&mut self, delay: f64) -> &mut Tweener<K> {
        let tw = self.create(ValueKind::Delayed, TweenValue::ZERO, TweenValue::ZERO, 0.0);
        tw.set_delay(delay);
        tw
    }

    fn create(
        &mut self,
        kind: ValueKind,
        start: TweenValue,
        end: TweenValue,
        duration: f64,
    ) -> &mut Tweener<K> {
        let index = match self.pool.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.serial = slot.serial.wrapping_add(1).max(1);
                index
            }
            None => {
                #[allow(clippy::cast_possible_truncation, reason = "Slot counts fit in u32.")]
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    serial: 1,
                    tweener: None,
                    busy: None,
                });
                index
            }
        };

        if self.total_active == self.active.len() {
            let grow = (self.active.len() / 2).max(1);
            self.active.resize(self.active.len() + grow, None);
            log::debug!("tween active list grown to {}", self.active.len());
        }
        self.active[self.total_active] = Some(index);
        self.total_active += 1;

        let slot = &mut self.slots[index as usize];
        let handle = TweenerHandle::new(index, slot.serial);
        slot.tweener
            .insert(Tweener::new(handle, kind, start, end, duration.max(0.0)))
    }

    /// Slot addressed by `handle` when its serial still matches.
    fn live_slot(&self, handle: TweenerHandle) -> Option<&Slot<K>> {
        if !handle.is_valid() {
            return None;
        }
        let slot = self.slots.get(handle.index as usize)?;
        (slot.serial == handle.serial).then_some(slot)
    }

    /// Tween addressed by `handle`, unless it was killed or its slot was reused.
    pub fn get_tween(&self, handle: TweenerHandle) -> Option<&Tweener<K>> {
        self.live_slot(handle)?
            .tweener
            .as_ref()
            .filter(|tw| !tw.killed)
    }

    /// Mutable access to the tween addressed by `handle`.
    pub fn get_tween_mut(&mut self, handle: TweenerHandle) -> Option<&mut Tweener<K>> {
        self.live_slot(handle)?;
        self.slots[handle.index as usize]
            .tweener
            .as_mut()
            .filter(|tw| !tw.killed)
    }

    /// Whether `handle` addresses a tween that has not been killed.
    pub fn is_alive(&self, handle: TweenerHandle) -> bool {
        self.live_slot(handle).is_some_and(|slot| match &slot.tweener {
            Some(tw) => !tw.killed,
            None => slot.busy.is_some_and(|b| !b.killed && b.pending_kill.is_none()),
        })
    }

    /// Handles of unkilled tweens bound to `target` (and `prop`, when given), in schedule order.
    fn matching(&self, target: K, prop: Option<TweenProp>) -> Vec<TweenerHandle> {
        let matches = |t: Option<K>, p: Option<TweenProp>| {
            t == Some(target) && (prop.is_none() || p == prop)
        };
        self.active[..self.total_active]
            .iter()
            .flatten()
            .filter_map(|&index| {
                let slot = &self.slots[index as usize];
                let handle = TweenerHandle::new(index, slot.serial);
                match (&slot.tweener, &slot.busy) {
                    (Some(tw), _) if !tw.killed && matches(tw.target, tw.prop) => Some(handle),
                    (None, Some(b)) if !b.killed && matches(b.target, b.prop) => Some(handle),
                    _ => None,
                }
            })
            .collect()
    }

    /// Whether any unkilled tween is bound to `target` (and `prop`, when given).
    pub fn is_tweening(&self, target: K, prop: Option<TweenProp>) -> bool {
        !self.matching(target, prop).is_empty()
    }

    /// First unkilled tween bound to `target` (and `prop`, when given).
    pub fn get_tween_by_target(
        &self,
        target: K,
        prop: Option<TweenProp>,
    ) -> Option<TweenerHandle> {
        self.matching(target, prop).first().copied()
    }

    /// Kill the tween addressed by `handle` and invalidate the caller's copy.
    ///
    /// With `complete`, the value is first snapped to its end state, written to the target, and
    /// the completion callback fires. The slot itself is recycled by the next tick. Returns
    /// whether a live tween was killed.
    pub fn kill(
        &mut self,
        handle: &mut TweenerHandle,
        complete: bool,
        targets: &mut dyn TweenTargets<K>,
    ) -> bool {
        let h = *handle;
        handle.invalidate();
        let Some(slot) = self.live_slot(h) else {
            return false;
        };
        if slot.tweener.is_none() {
            let Some(busy) = self.slots[h.index as usize].busy.as_mut() else {
                return false;
            };
            if busy.killed || busy.pending_kill.is_some() {
                return false;
            }
            busy.pending_kill = Some(complete);
            return true;
        }
        self.with_taken(h.index, targets, |mgr, tw, targets| {
            if tw.killed {
                return false;
            }
            mgr.finish_kill(tw, complete, targets);
            true
        })
        .unwrap_or(false)
    }

    /// Kill every tween bound to `target` (and `prop`, when given). Returns whether any were.
    pub fn kill_tweens(
        &mut self,
        target: K,
        prop: Option<TweenProp>,
        complete: bool,
        targets: &mut dyn TweenTargets<K>,
    ) -> bool {
        let mut killed = false;
        for mut handle in self.matching(target, prop) {
            killed |= self.kill(&mut handle, complete, targets);
        }
        killed
    }

    /// Jump the tween addressed by `handle` to `time` seconds (delay included) and update it.
    ///
    /// A tween sought past its end completes on the next tick.
    pub fn seek(&mut self, handle: TweenerHandle, time: f64, targets: &mut dyn TweenTargets<K>) {
        if self.get_tween(handle).is_none() {
            return;
        }
        self.with_taken(handle.index, targets, |mgr, tw, targets| {
            tw.elapsed = time;
            if tw.elapsed < tw.delay() {
                if tw.started {
                    tw.elapsed = tw.delay();
                } else {
                    return;
                }
            }
            mgr.refresh(tw, targets);
        });
    }

    /// Number of scheduled tweens, including killed ones awaiting recycling.
    pub fn active_count(&self) -> usize {
        self.total_active
    }

    /// Capacity of the active list.
    pub fn active_capacity(&self) -> usize {
        self.active.len()
    }

    /// Number of recycled slots ready for reuse.
    pub fn pool_size(&self) -> usize {
        self.pool.len()
    }

    /// Drop every tween without firing callbacks. Outstanding handles become invalid.
    ///
    /// Called from inside a callback, every tween is killed instead and recycled by the tick.
    pub fn clean(&mut self) {
        if self.slots.iter().any(|slot| slot.busy.is_some()) {
            for slot in &mut self.slots {
                if let Some(tw) = slot.tweener.as_mut() {
                    tw.killed = true;
                }
                if let Some(busy) = slot.busy.as_mut() {
                    busy.pending_kill.get_or_insert(false);
                }
            }
            return;
        }
        for (i, slot) in self.slots.iter_mut().enumerate() {
            if slot.tweener.take().is_some() {
                #[allow(clippy::cast_possible_truncation, reason = "Slot counts fit in u32.")]
                self.pool.push(i as u32);
            }
        }
        self.active.fill(None);
        self.total_active = 0;
    }

    /// Advance every tween by `dt` seconds.
    ///
    /// Killed tweens (and tweens whose target is no longer alive) are recycled, survivors are
    /// shifted left to close the holes, and tweens created by callbacks during this pass are
    /// moved behind the survivors without being ticked until the next pass.
    pub fn tick(&mut self, dt: f64, targets: &mut dyn TweenTargets<K>) {
        let cnt = self.total_active;
        let mut free_pos: Option<usize> = None;
        for i in 0..cnt {
            let Some(index) = self.active[i] else {
                free_pos.get_or_insert(i);
                continue;
            };
            let slot = &self.slots[index as usize];
            let killed = slot.busy.is_none() && slot.tweener.as_ref().is_none_or(|tw| tw.killed);
            if killed {
                self.recycle(index);
                self.active[i] = None;
                free_pos.get_or_insert(i);
                continue;
            }

            self.with_taken(index, targets, |mgr, tw, targets| {
                if tw.target.is_some_and(|t| !targets.is_alive(t)) {
                    tw.killed = true;
                } else if !tw.paused {
                    mgr.update(tw, dt, targets);
                }
            });

            if let Some(pos) = free_pos.as_mut() {
                self.active[*pos] = Some(index);
                self.active[i] = None;
                *pos += 1;
            }
        }

        if let Some(mut pos) = free_pos {
            // Tweens added by callbacks sit past `cnt`; pull them down behind the survivors.
            for j in cnt..self.total_active {
                self.active[pos] = self.active[j].take();
                pos += 1;
            }
            self.total_active = pos;
        }
    }

    fn recycle(&mut self, index: u32) {
        let slot = &mut self.slots[index as usize];
        slot.tweener = None;
        self.pool.push(index);
    }

    /// Run `f` with the tween moved out of slot `index`.
    fn with_taken<R>(
        &mut self,
        index: u32,
        targets: &mut dyn TweenTargets<K>,
        f: impl FnOnce(&mut Self, &mut Tweener<K>, &mut dyn TweenTargets<K>) -> R,
    ) -> Option<R> {
        let slot = self.slots.get_mut(index as usize)?;
        let mut tw = slot.tweener.take()?;
        slot.busy = Some(Busy {
            target: tw.target,
            prop: tw.prop,
            killed: tw.killed,
            pending_kill: None,
        });
        let result = f(self, &mut tw, targets);
        let slot = &mut self.slots[index as usize];
        slot.busy = None;
        slot.tweener = Some(tw);
        Some(result)
    }

    /// One tick of a live, unpaused tween.
    fn update(&mut self, tw: &mut Tweener<K>, dt: f64, targets: &mut dyn TweenTargets<K>) {
        if tw.ended != Ended::No {
            // Ended by a seek; complete now.
            tw.killed = true;
            self.fire(tw, Which::Complete, targets);
            return;
        }
        if !tw.advance(dt) {
            return;
        }
        self.refresh(tw, targets);
        if tw.ended != Ended::No && !tw.killed {
            tw.killed = true;
            self.fire(tw, Which::Complete, targets);
        }
    }

    /// Recompute from the current clock: start, value, target write, update callback.
    ///
    /// The start callback fires once the delay has passed and again at every repeat round.
    fn refresh(&mut self, tw: &mut Tweener<K>, targets: &mut dyn TweenTargets<K>) {
        if !tw.started {
            if tw.elapsed < tw.delay() {
                return;
            }
            tw.started = true;
            self.fire(tw, Which::Start, targets);
            if tw.killed {
                return;
            }
        }
        let round = tw.round;
        tw.compute(&mut self.rng);
        if tw.round > round {
            self.fire(tw, Which::Start, targets);
            if tw.killed {
                return;
            }
        }
        tw.apply(targets);
        self.fire(tw, Which::Update, targets);
    }

    /// Kill a tween that is not yet killed, optionally running it to its end first.
    fn finish_kill(
        &mut self,
        tw: &mut Tweener<K>,
        complete: bool,
        targets: &mut dyn TweenTargets<K>,
    ) {
        if complete {
            if tw.ended == Ended::No {
                tw.snap_to_end();
                tw.started = true;
                tw.compute(&mut self.rng);
                tw.apply(targets);
                self.fire(tw, Which::Update, targets);
                if tw.killed {
                    return;
                }
            }
            tw.killed = true;
            self.fire(tw, Which::Complete, targets);
        } else {
            tw.killed = true;
        }
    }

    /// Fire one callback, then honor any kill it requested on its own tween.
    fn fire(&mut self, tw: &mut Tweener<K>, which: Which, targets: &mut dyn TweenTargets<K>) {
        let Some(mut callback) = tw.callback_slot(which).take() else {
            return;
        };
        let index = tw.handle.index as usize;
        if let Some(busy) = self.slots[index].busy.as_mut() {
            busy.killed = tw.killed;
            busy.target = tw.target;
            busy.prop = tw.prop;
        }
        callback(tw, self, targets);
        let slot = tw.callback_slot(which);
        if slot.is_none() {
            *slot = Some(callback);
        }
        let pending = self.slots[index]
            .busy
            .as_mut()
            .and_then(|b| b.pending_kill.take());
        if let Some(complete) = pending {
            if !tw.killed {
                self.finish_kill(tw, complete, targets);
            }
        }
    }
}
