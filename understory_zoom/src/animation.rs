// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Double-tap zoom animation.
//!
//! A [`ZoomAnimation`] is a pure interpolation `t -> (scale, focus)`. It does
//! not own a clock: the host's scheduler supplies progress values, either
//! already eased (see [`crate::ZoomController::tick`]) or as elapsed time that
//! is eased by [`ZoomAnimation::progress_at`].

use core::time::Duration;

use kurbo::Point;

/// Progress curve applied by [`ZoomAnimation::progress_at`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Easing {
    /// Progress equals the elapsed fraction.
    Linear,
    /// Slow start and slow finish (smoothstep).
    #[default]
    EaseInOut,
}

impl Easing {
    /// Maps a linear fraction in `[0, 1]` onto this curve.
    ///
    /// Out-of-range and non-finite inputs are first clamped into `[0, 1]`.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = sanitize_progress(t);
        match self {
            Self::Linear => t,
            Self::EaseInOut => t * t * (3.0 - 2.0 * t),
        }
    }
}

/// Identifies one started animation.
///
/// Ticks carrying the handle of a cancelled or superseded animation are
/// rejected with [`AnimationStatus::Stale`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AnimationHandle(pub(crate) u64);

/// Result of driving an animation one step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationStatus {
    /// The animation applied this frame and expects more ticks.
    Running,
    /// The animation applied its final frame and has stopped.
    Finished,
    /// The handle no longer refers to the live animation; nothing changed.
    Stale,
}

/// Which way an animation moves the scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoomDirection {
    /// Target scale is larger than the start scale.
    In,
    /// Target scale is at most the start scale.
    Out,
}

/// Interpolation between a start and a target zoom state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomAnimation {
    start_scale: f64,
    target_scale: f64,
    start_focus: Point,
    end_focus: Point,
    duration: Duration,
    easing: Easing,
}

impl ZoomAnimation {
    /// Plans an animation from `(start_scale, start_focus)` to `target_scale`.
    ///
    /// Zooming in solves the end focus so the content under `anchor` stays
    /// under `anchor` once the target scale is reached. Zooming out heads for
    /// `viewport_center`.
    #[must_use]
    pub fn new(
        start_scale: f64,
        start_focus: Point,
        target_scale: f64,
        anchor: Point,
        viewport_center: Point,
        duration: Duration,
    ) -> Self {
        let end_focus = if target_scale > start_scale {
            if start_scale > 0.0 {
                anchor - (anchor - start_focus) * (target_scale / start_scale)
            } else {
                start_focus
            }
        } else {
            viewport_center
        };
        Self {
            start_scale,
            target_scale,
            start_focus,
            end_focus,
            duration,
            easing: Easing::default(),
        }
    }

    /// Replaces the easing curve used by [`ZoomAnimation::progress_at`].
    #[must_use]
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Scale and focus at progress `t`.
    ///
    /// Scale is interpolated linearly (not in log space). At `t >= 1` the
    /// exact target values are returned.
    #[must_use]
    pub fn sample(&self, t: f64) -> (f64, Point) {
        let t = sanitize_progress(t);
        if t >= 1.0 {
            return (self.target_scale, self.end_focus);
        }
        let scale = self.start_scale + t * (self.target_scale - self.start_scale);
        (scale, self.start_focus.lerp(self.end_focus, t))
    }

    /// Eased progress after `elapsed` time. A zero duration is complete at once.
    #[must_use]
    pub fn progress_at(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        self.easing
            .apply(elapsed.as_secs_f64() / self.duration.as_secs_f64())
    }

    /// Direction of the scale change.
    #[must_use]
    pub fn direction(&self) -> ZoomDirection {
        if self.target_scale > self.start_scale {
            ZoomDirection::In
        } else {
            ZoomDirection::Out
        }
    }

    /// Scale at `t = 0`.
    #[must_use]
    pub fn start_scale(&self) -> f64 {
        self.start_scale
    }

    /// Scale at `t = 1`.
    #[must_use]
    pub fn target_scale(&self) -> f64 {
        self.target_scale
    }

    /// Focus at `t = 0`.
    #[must_use]
    pub fn start_focus(&self) -> Point {
        self.start_focus
    }

    /// Focus at `t = 1`, before the pan-limit clamp.
    #[must_use]
    pub fn end_focus(&self) -> Point {
        self.end_focus
    }

    /// Total duration.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Easing curve used by [`ZoomAnimation::progress_at`].
    #[must_use]
    pub fn easing(&self) -> Easing {
        self.easing
    }
}

/// Clamps progress into `[0, 1]`, mapping NaN to `0`.
pub(crate) fn sanitize_progress(t: f64) -> f64 {
    if t > 0.0 { t.min(1.0) } else { 0.0 }
}
