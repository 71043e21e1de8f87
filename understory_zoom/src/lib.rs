// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_zoom --heading-base-level=0

//! Understory Zoom: pinch-zoom, pan and double-tap for a single image.
//!
//! This crate provides a small, headless controller that keeps a zoomable
//! image's transform valid while gestures arrive. It focuses on:
//! - Turning recognized gesture primitives (pinch steps, scroll distances,
//!   double taps, resizes) into a bounded scale and focus.
//! - Keeping the zoomed image covering the viewport while panning.
//! - Animating between rest and a fixed double-tap zoom.
//! - Handing the host either its own fit mode (at rest) or an [`kurbo::Affine`].
//!
//! It does **not** recognize gestures, draw pixels, or run a clock. Callers are
//! expected to:
//! - Feed recognized gestures into [`ZoomController`] (directly, or through
//!   [`input::GestureEvent`]).
//! - Drive double-tap animations from their own frame scheduler with
//!   [`ZoomController::tick`] or [`ZoomController::tick_elapsed`].
//! - Implement [`RenderTarget`] and call [`ZoomController::present`] after
//!   updates.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size, Vec2};
//! use understory_zoom::{FitMode, ZoomController};
//!
//! let viewport = Size::new(1000.0, 1000.0);
//! let mut zoom = ZoomController::new(viewport);
//!
//! // The pan clamp works from the image's extent at rest.
//! let natural = Size::new(500.0, 500.0);
//! zoom.set_image_size(Some(FitMode::FitCenter.fitted_size(natural, viewport)));
//!
//! // Pinch steps carry the incremental factor and the focal point.
//! zoom.on_scale_gesture(1.5, Point::new(600.0, 600.0));
//! zoom.on_scale_gesture(1.2, Point::new(600.0, 600.0));
//! assert!(zoom.is_zoomed());
//!
//! // Drags arrive as scroll distances (previous minus current position).
//! zoom.on_pan_gesture(Vec2::new(-20.0, 0.0));
//! assert!(zoom.transform().matrix().is_some());
//! ```
//!
//! ## Double-tap animation
//!
//! ```rust
//! use core::time::Duration;
//! use kurbo::{Point, Size};
//! use understory_zoom::{AnimationStatus, ZoomController};
//!
//! let mut zoom = ZoomController::new(Size::new(800.0, 600.0));
//! let handle = zoom.on_double_tap(Point::new(400.0, 300.0)).unwrap();
//!
//! // A host scheduler reports elapsed time each frame.
//! let mut elapsed = Duration::ZERO;
//! while zoom.tick_elapsed(handle, elapsed) == AnimationStatus::Running {
//!     elapsed += Duration::from_millis(16);
//! }
//! assert_eq!(zoom.scale(), 2.0);
//! assert_eq!(zoom.focus(), Point::new(400.0, 300.0));
//! ```
//!
//! ## Design notes
//!
//! - Zoom is uniform and axis-aligned; rotation, flips and fling are left out.
//! - Scale stays within [`ZoomConfig::min_scale`] and
//!   [`ZoomConfig::max_scale`] after every update, including animation frames.
//! - Live pinch steps move the focus by the first-order `1 - 1/factor`
//!   approximation and do not clamp panning unless
//!   [`ZoomConfig::set_clamp_during_pinch`] is enabled. Pans and animation
//!   frames always clamp.
//! - Any delivered gesture cancels a running animation first.
//!
//! This crate is `no_std`.

#![no_std]

mod animation;
mod config;
mod controller;
pub mod input;
mod modes;
mod render;

pub use animation::{AnimationHandle, AnimationStatus, Easing, ZoomAnimation, ZoomDirection};
pub use config::{
    ANIMATION_DURATION, DOUBLE_TAP_SCALE, MAX_SCALE, MIN_SCALE, REST_SCALE, TAP_TIMEOUT,
    ZoomConfig,
};
pub use controller::{ZoomController, ZoomDebugInfo, constrain_focus, zoom_matrix};
pub use modes::{FitMode, ImageTransform};
pub use render::RenderTarget;
