// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Easing curves.

use core::f64::consts::{FRAC_PI_2, PI, TAU};

/// Default overshoot for the `Back` family, and default amplitude for `Elastic`.
pub const DEFAULT_OVERSHOOT: f64 = 1.70158;

/// Easing curve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs, reason = "Variant names are the standard curve names.")]
pub enum EaseType {
    Linear,
    SineIn,
    SineOut,
    SineInOut,
    QuadIn,
    #[default]
    QuadOut,
    QuadInOut,
    CubicIn,
    CubicOut,
    CubicInOut,
    QuartIn,
    QuartOut,
    QuartInOut,
    QuintIn,
    QuintOut,
    QuintInOut,
    ExpoIn,
    ExpoOut,
    ExpoInOut,
    CircIn,
    CircOut,
    CircInOut,
    ElasticIn,
    ElasticOut,
    ElasticInOut,
    BackIn,
    BackOut,
    BackInOut,
    BounceIn,
    BounceOut,
    BounceInOut,
}

impl EaseType {
    /// Eased progress at `time` of `duration`.
    ///
    /// `overshoot_or_amplitude` shapes the `Back` and `Elastic` families; `period` shapes
    /// `Elastic` (zero picks the conventional default). A non-positive duration is complete.
    #[must_use]
    pub fn evaluate(
        self,
        time: f64,
        duration: f64,
        overshoot_or_amplitude: f64,
        period: f64,
    ) -> f64 {
        if duration <= 0.0 {
            return 1.0;
        }
        let t = (time / duration).clamp(0.0, 1.0);
        let s = overshoot_or_amplitude;
        match self {
            Self::Linear => t,
            Self::SineIn => 1.0 - (t * FRAC_PI_2).cos(),
            Self::SineOut => (t * FRAC_PI_2).sin(),
            Self::SineInOut => -0.5 * ((PI * t).cos() - 1.0),
            Self::QuadIn => t * t,
            Self::QuadOut => -t * (t - 2.0),
            Self::QuadInOut => in_out(t, |u| u * u),
            Self::CubicIn => t.powi(3),
            Self::CubicOut => (t - 1.0).powi(3) + 1.0,
            Self::CubicInOut => in_out(t, |u| u.powi(3)),
            Self::QuartIn => t.powi(4),
            Self::QuartOut => 1.0 - (t - 1.0).powi(4),
            Self::QuartInOut => in_out(t, |u| u.powi(4)),
            Self::QuintIn => t.powi(5),
            Self::QuintOut => (t - 1.0).powi(5) + 1.0,
            Self::QuintInOut => in_out(t, |u| u.powi(5)),
            Self::ExpoIn => expo_in(t),
            Self::ExpoOut => 1.0 - expo_in(1.0 - t),
            Self::ExpoInOut => in_out(t, expo_in),
            Self::CircIn => 1.0 - (1.0 - t * t).max(0.0).sqrt(),
            Self::CircOut => (1.0 - (t - 1.0) * (t - 1.0)).max(0.0).sqrt(),
            Self::CircInOut => in_out(t, |u| 1.0 - (1.0 - u * u).max(0.0).sqrt()),
            Self::ElasticIn => elastic_in(t, s, if period == 0.0 { 0.3 } else { period }),
            Self::ElasticOut => {
                1.0 - elastic_in(1.0 - t, s, if period == 0.0 { 0.3 } else { period })
            }
            Self::ElasticInOut => {
                let p = if period == 0.0 { 0.45 } else { period };
                in_out(t, |u| elastic_in(u, s, p))
            }
            Self::BackIn => back_in(t, s),
            Self::BackOut => 1.0 - back_in(1.0 - t, s),
            Self::BackInOut => in_out(t, |u| back_in(u, s * 1.525)),
            Self::BounceIn => 1.0 - bounce_out(1.0 - t),
            Self::BounceOut => bounce_out(t),
            Self::BounceInOut => in_out(t, |u| 1.0 - bounce_out(1.0 - u)),
        }
    }
}

/// Mirror an "in" curve into an "in-out" curve.
fn in_out(t: f64, ease_in: impl Fn(f64) -> f64) -> f64 {
    if t < 0.5 {
        0.5 * ease_in(t * 2.0)
    } else {
        1.0 - 0.5 * ease_in((1.0 - t) * 2.0)
    }
}

fn expo_in(t: f64) -> f64 {
    if t <= 0.0 {
        0.0
    } else {
        2.0_f64.powf(10.0 * (t - 1.0))
    }
}

fn elastic_in(t: f64, amplitude: f64, period: f64) -> f64 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }
    let (a, s) = if amplitude < 1.0 {
        (1.0, period / 4.0)
    } else {
        (amplitude, period / TAU * (1.0 / amplitude).asin())
    };
    let t = t - 1.0;
    -(a * 2.0_f64.powf(10.0 * t) * ((t - s) * TAU / period).sin())
}

fn back_in(t: f64, s: f64) -> f64 {
    t * t * ((s + 1.0) * t - s)
}

fn bounce_out(t: f64) -> f64 {
    const N: f64 = 7.5625;
    const D: f64 = 2.75;
    if t < 1.0 / D {
        N * t * t
    } else if t < 2.0 / D {
        let t = t - 1.5 / D;
        N * t * t + 0.75
    } else if t < 2.5 / D {
        let t = t - 2.25 / D;
        N * t * t + 0.9375
    } else {
        let t = t - 2.625 / D;
        N * t * t + 0.984_375
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [EaseType; 31] = [
        EaseType::Linear,
        EaseType::SineIn,
        EaseType::SineOut,
        EaseType::SineInOut,
        EaseType::QuadIn,
        EaseType::QuadOut,
        EaseType::QuadInOut,
        EaseType::CubicIn,
        EaseType::CubicOut,
        EaseType::CubicInOut,
        EaseType::QuartIn,
        EaseType::QuartOut,
        EaseType::QuartInOut,
        EaseType::QuintIn,
        EaseType::QuintOut,
        EaseType::QuintInOut,
        EaseType::ExpoIn,
        EaseType::ExpoOut,
        EaseType::ExpoInOut,
        EaseType::CircIn,
        EaseType::CircOut,
        EaseType::CircInOut,
        EaseType::ElasticIn,
        EaseType::ElasticOut,
        EaseType::ElasticInOut,
        EaseType::BackIn,
        EaseType::BackOut,
        EaseType::BackInOut,
        EaseType::BounceIn,
        EaseType::BounceOut,
        EaseType::BounceInOut,
    ];

    #[test]
    fn every_curve_starts_at_zero_and_ends_at_one() {
        for ease in ALL {
            let a = ease.evaluate(0.0, 2.0, DEFAULT_OVERSHOOT, 0.0);
            let b = ease.evaluate(2.0, 2.0, DEFAULT_OVERSHOOT, 0.0);
            assert!(a.abs() < 1e-3, "{ease:?} starts at {a}");
            assert!((b - 1.0).abs() < 1e-3, "{ease:?} ends at {b}");
        }
    }

    #[test]
    fn in_out_curves_pass_through_half() {
        for ease in [
            EaseType::SineInOut,
            EaseType::QuadInOut,
            EaseType::CubicInOut,
            EaseType::QuintInOut,
            EaseType::CircInOut,
            EaseType::BounceInOut,
        ] {
            let mid = ease.evaluate(0.5, 1.0, DEFAULT_OVERSHOOT, 0.0);
            assert!((mid - 0.5).abs() < 1e-9, "{ease:?} at half is {mid}");
        }
    }

    #[test]
    fn back_overshoots() {
        let min = (1..100)
            .map(|i| EaseType::BackIn.evaluate(f64::from(i) / 100.0, 1.0, DEFAULT_OVERSHOOT, 0.0))
            .fold(f64::INFINITY, f64::min);
        assert!(min < 0.0, "BackIn dips below zero");
    }

    #[test]
    fn quad_out_matches_closed_form() {
        let v = EaseType::QuadOut.evaluate(0.25, 1.0, DEFAULT_OVERSHOOT, 0.0);
        assert!((v - 0.4375).abs() < 1e-12, "QuadOut(0.25) = {v}");
    }

    #[test]
    fn zero_duration_is_complete() {
        assert_eq!(EaseType::Linear.evaluate(0.0, 0.0, 0.0, 0.0), 1.0);
    }
}
