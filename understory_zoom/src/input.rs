// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glue between a host's gesture recognizer and the controller.
//!
//! Gesture recognition itself stays with the host. This module only carries
//! already-recognized primitives ([`GestureEvent`]) and two small helpers:
//!
//! - [`ScrollTracker`] turns raw pointer positions into scroll distances.
//! - [`TapTracker`] decides whether a pointer-up is a plain click that the
//!   host should perform itself.
//!
//! ## Minimal example
//!
//! ```
//! use core::time::Duration;
//! use kurbo::{Point, Size};
//! use understory_zoom::ZoomController;
//! use understory_zoom::input::{GestureEvent, ScrollTracker, TapTracker};
//!
//! let mut zoom = ZoomController::new(Size::new(800.0, 600.0));
//! let mut scroll = ScrollTracker::default();
//! let mut taps = TapTracker::new(Duration::from_millis(100));
//!
//! taps.on_down(1_000);
//! scroll.start(Point::new(400.0, 300.0));
//! let mut handled = false;
//! if let Some(delta) = scroll.update(Point::new(390.0, 300.0)) {
//!     handled |= zoom.handle_event(GestureEvent::Scroll { delta });
//! }
//! scroll.end();
//!
//! // The scroll consumed the sequence, so no click.
//! assert!(!taps.on_up(1_040, handled));
//! ```

use core::time::Duration;

use kurbo::{Point, Size, Vec2};

use crate::config::ZoomConfig;

/// A recognized gesture primitive delivered by the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureEvent {
    /// A pinch started.
    ScaleBegin,
    /// One pinch step: incremental `factor` since the last step, around `focal`.
    Scale {
        /// Scale change since the previous step.
        factor: f64,
        /// Current focal point in viewport coordinates.
        focal: Point,
    },
    /// One drag step, as a scroll distance (previous minus current position).
    Scroll {
        /// Scroll distance in viewport coordinates.
        delta: Vec2,
    },
    /// A double tap at a viewport position.
    DoubleTap {
        /// Tap position in viewport coordinates.
        position: Point,
    },
    /// A single confirmed tap. The controller never consumes these.
    Tap {
        /// Tap position in viewport coordinates.
        position: Point,
    },
    /// The viewport was laid out at a new size.
    Resize {
        /// New viewport size.
        size: Size,
    },
}

/// Converts successive pointer positions into scroll distances.
///
/// Distances follow the usual scroll convention: `previous - current`, so
/// dragging content to the right yields a negative `x`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScrollTracker {
    last_pos: Option<Point>,
}

impl ScrollTracker {
    /// Starts tracking from `pos`.
    pub fn start(&mut self, pos: Point) {
        self.last_pos = Some(pos);
    }

    /// Records `pos` and returns the scroll distance since the last position.
    ///
    /// Returns `None` when not tracking.
    pub fn update(&mut self, pos: Point) -> Option<Vec2> {
        let last = self.last_pos?;
        self.last_pos = Some(pos);
        Some(last - pos)
    }

    /// Stops tracking.
    pub fn end(&mut self) {
        self.last_pos = None;
    }

    /// Returns `true` between [`ScrollTracker::start`] and [`ScrollTracker::end`].
    pub fn is_tracking(&self) -> bool {
        self.last_pos.is_some()
    }
}

/// Decides whether a pointer-up should be performed as a click.
///
/// Timestamps are milliseconds on any monotonic clock.
#[derive(Clone, Copy, Debug)]
pub struct TapTracker {
    timeout: Duration,
    down_at: Option<u64>,
}

impl TapTracker {
    /// Creates a tracker with the given tap timeout.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            down_at: None,
        }
    }

    /// Creates a tracker using [`ZoomConfig::tap_timeout`].
    #[must_use]
    pub fn from_config(config: &ZoomConfig) -> Self {
        Self::new(config.tap_timeout())
    }

    /// Records a pointer-down.
    pub fn on_down(&mut self, time_ms: u64) {
        self.down_at = Some(time_ms);
    }

    /// Records a pointer-up and returns `true` if the host should perform a
    /// click: the press was shorter than the timeout and no gesture
    /// `handled` the sequence.
    pub fn on_up(&mut self, time_ms: u64, handled: bool) -> bool {
        let Some(down_at) = self.down_at.take() else {
            return false;
        };
        !handled && Duration::from_millis(time_ms.saturating_sub(down_at)) < self.timeout
    }

    /// Forgets a pending press (for example on pointer cancel).
    pub fn cancel(&mut self) {
        self.down_at = None;
    }

    /// Configured tap timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}
