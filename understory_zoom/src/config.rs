// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::time::Duration;

/// Scale at which the image is drawn by the host's own fit mode.
pub const REST_SCALE: f64 = 1.0;
/// Default lower scale bound.
pub const MIN_SCALE: f64 = 1.0;
/// Default upper scale bound.
pub const MAX_SCALE: f64 = 10.0;
/// Default scale a double tap zooms into.
pub const DOUBLE_TAP_SCALE: f64 = 2.0;
/// Default duration of the double-tap animation.
pub const ANIMATION_DURATION: Duration = Duration::from_millis(300);
/// Default press length below which a pointer-up counts as a click.
pub const TAP_TIMEOUT: Duration = Duration::from_millis(100);

/// Tunable limits and timings for a [`crate::ZoomController`].
///
/// The rest scale `1.0` is always kept inside `[min_scale, max_scale]`, since
/// that is where the host's fit mode takes over.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "RawZoomConfig"))]
pub struct ZoomConfig {
    min_scale: f64,
    max_scale: f64,
    double_tap_scale: f64,
    animation_duration: Duration,
    tap_timeout: Duration,
    clamp_during_pinch: bool,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            double_tap_scale: DOUBLE_TAP_SCALE,
            animation_duration: ANIMATION_DURATION,
            tap_timeout: TAP_TIMEOUT,
            clamp_during_pinch: false,
        }
    }
}

/// Deserialized form of [`ZoomConfig`], normalized through its setters.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(default)]
struct RawZoomConfig {
    min_scale: f64,
    max_scale: f64,
    double_tap_scale: f64,
    animation_duration: Duration,
    tap_timeout: Duration,
    clamp_during_pinch: bool,
}

#[cfg(feature = "serde")]
impl Default for RawZoomConfig {
    fn default() -> Self {
        Self {
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            double_tap_scale: DOUBLE_TAP_SCALE,
            animation_duration: ANIMATION_DURATION,
            tap_timeout: TAP_TIMEOUT,
            clamp_during_pinch: false,
        }
    }
}

#[cfg(feature = "serde")]
impl From<RawZoomConfig> for ZoomConfig {
    fn from(raw: RawZoomConfig) -> Self {
        Self::default()
            .with_scale_limits(raw.min_scale, raw.max_scale)
            .with_double_tap_scale(raw.double_tap_scale)
            .with_animation_duration(raw.animation_duration)
            .with_tap_timeout(raw.tap_timeout)
            .with_clamp_during_pinch(raw.clamp_during_pinch)
    }
}

impl ZoomConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the minimum and maximum scale factors.
    ///
    /// The range is normalized so that `min <= max`, then widened if needed so
    /// that it contains [`REST_SCALE`]. Non-finite or non-positive bounds are
    /// ignored.
    pub fn set_scale_limits(&mut self, min: f64, max: f64) {
        if !(min.is_finite() && max.is_finite()) || min <= 0.0 || max <= 0.0 {
            return;
        }
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        self.min_scale = min.min(REST_SCALE);
        self.max_scale = max.max(REST_SCALE);
    }

    /// Builder form of [`ZoomConfig::set_scale_limits`].
    #[must_use]
    pub fn with_scale_limits(mut self, min: f64, max: f64) -> Self {
        self.set_scale_limits(min, max);
        self
    }

    /// Sets the scale a double tap zooms into. Non-positive values are ignored.
    pub fn set_double_tap_scale(&mut self, scale: f64) {
        if scale.is_finite() && scale > 0.0 {
            self.double_tap_scale = scale;
        }
    }

    /// Builder form of [`ZoomConfig::set_double_tap_scale`].
    #[must_use]
    pub fn with_double_tap_scale(mut self, scale: f64) -> Self {
        self.set_double_tap_scale(scale);
        self
    }

    /// Sets the duration of the double-tap animation.
    pub fn set_animation_duration(&mut self, duration: Duration) {
        self.animation_duration = duration;
    }

    /// Builder form of [`ZoomConfig::set_animation_duration`].
    #[must_use]
    pub fn with_animation_duration(mut self, duration: Duration) -> Self {
        self.animation_duration = duration;
        self
    }

    /// Sets the tap timeout handed to [`crate::input::TapTracker`].
    pub fn set_tap_timeout(&mut self, timeout: Duration) {
        self.tap_timeout = timeout;
    }

    /// Builder form of [`ZoomConfig::set_tap_timeout`].
    #[must_use]
    pub fn with_tap_timeout(mut self, timeout: Duration) -> Self {
        self.tap_timeout = timeout;
        self
    }

    /// Whether live pinch steps also apply the pan-limit clamp.
    ///
    /// Off by default: pinch steps only clamp the scale, and the focus is
    /// pulled back in by the next pan or animation.
    pub fn set_clamp_during_pinch(&mut self, clamp: bool) {
        self.clamp_during_pinch = clamp;
    }

    /// Builder form of [`ZoomConfig::set_clamp_during_pinch`].
    #[must_use]
    pub fn with_clamp_during_pinch(mut self, clamp: bool) -> Self {
        self.clamp_during_pinch = clamp;
        self
    }

    /// Minimum scale factor.
    #[must_use]
    pub fn min_scale(&self) -> f64 {
        self.min_scale
    }

    /// Maximum scale factor.
    #[must_use]
    pub fn max_scale(&self) -> f64 {
        self.max_scale
    }

    /// Configured double-tap scale, before clamping.
    #[must_use]
    pub fn double_tap_scale(&self) -> f64 {
        self.double_tap_scale
    }

    /// Duration of the double-tap animation.
    #[must_use]
    pub fn animation_duration(&self) -> Duration {
        self.animation_duration
    }

    /// Press length below which a pointer-up counts as a click.
    #[must_use]
    pub fn tap_timeout(&self) -> Duration {
        self.tap_timeout
    }

    /// Whether live pinch steps apply the pan-limit clamp.
    #[must_use]
    pub fn clamp_during_pinch(&self) -> bool {
        self.clamp_during_pinch
    }

    /// Clamps `scale` into `[min_scale, max_scale]`.
    #[must_use]
    pub fn clamp_scale(&self, scale: f64) -> f64 {
        scale.clamp(self.min_scale, self.max_scale)
    }

    /// The scale a double tap from rest animates to.
    #[must_use]
    pub fn double_tap_target(&self) -> f64 {
        self.clamp_scale(self.double_tap_scale)
    }
}
