// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::time::Duration;

use kurbo::{Affine, Point, Size, Vec2};

use crate::animation::{AnimationHandle, AnimationStatus, ZoomAnimation, sanitize_progress};
use crate::config::{REST_SCALE, ZoomConfig};
use crate::input::GestureEvent;
use crate::modes::{FitMode, ImageTransform};
use crate::render::RenderTarget;

/// Pinch-zoom, pan and double-tap controller for one image in a viewport.
///
/// `ZoomController` owns the zoom state (scale, focus, viewport size) and
/// turns recognized gesture primitives into an [`ImageTransform`]:
/// - At scale `1.0` the host's [`FitMode`] applies and no matrix is produced.
/// - Above it, the fitted image is drawn through
///   `translate(focus) * scale(s) * translate(-center)`, so `focus` is where
///   the viewport's own center ends up after magnification.
///
/// Every delivered gesture cancels a running double-tap animation before it
/// applies its own update.
#[derive(Clone, Debug)]
pub struct ZoomController {
    config: ZoomConfig,
    viewport: Size,
    image_size: Option<Size>,
    fit_mode: FitMode,
    scale: f64,
    focus: Point,
    transform: ImageTransform,
    presented: Option<ImageTransform>,
    animation: Option<(AnimationHandle, ZoomAnimation)>,
    next_animation: u64,
}

impl ZoomController {
    /// Creates a controller at rest over a viewport of size `viewport`.
    #[must_use]
    pub fn new(viewport: Size) -> Self {
        Self::with_config(viewport, ZoomConfig::default())
    }

    /// Creates a controller at rest with explicit limits and timings.
    #[must_use]
    pub fn with_config(viewport: Size, config: ZoomConfig) -> Self {
        let mut zc = Self {
            config,
            viewport,
            image_size: None,
            fit_mode: FitMode::default(),
            scale: REST_SCALE,
            focus: center_of(viewport),
            transform: ImageTransform::Fit(FitMode::default()),
            presented: None,
            animation: None,
            next_animation: 0,
        };
        zc.recompute();
        zc
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &ZoomConfig {
        &self.config
    }

    /// Replaces the configuration and re-clamps the current scale.
    pub fn set_config(&mut self, config: ZoomConfig) {
        self.config = config;
        self.scale = self.config.clamp_scale(self.scale);
        self.constrain_pan();
        self.recompute();
    }

    /// Sets the extent the image occupies at rest, in viewport units.
    ///
    /// This is the size after the host's fit, see [`FitMode::fitted_size`].
    /// Without it the pan-limit clamp is skipped. While zoomed, the focus is
    /// clamped against the new extent right away.
    pub fn set_image_size(&mut self, size: Option<Size>) {
        self.image_size = size;
        if self.is_zoomed() {
            self.constrain_pan();
            self.recompute();
        }
    }

    /// Returns the rest extent of the image, if known.
    #[must_use]
    pub fn image_size(&self) -> Option<Size> {
        self.image_size
    }

    /// Sets the host fit mode restored at rest.
    pub fn set_fit_mode(&mut self, mode: FitMode) {
        if self.fit_mode != mode {
            self.fit_mode = mode;
            self.recompute();
        }
    }

    /// Returns the host fit mode restored at rest.
    #[must_use]
    pub fn fit_mode(&self) -> FitMode {
        self.fit_mode
    }

    /// Current scale factor.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Current focus in viewport coordinates.
    #[must_use]
    pub fn focus(&self) -> Point {
        self.focus
    }

    /// Current viewport size.
    #[must_use]
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Center of the viewport.
    #[must_use]
    pub fn viewport_center(&self) -> Point {
        center_of(self.viewport)
    }

    /// Returns `true` while the scale is above rest.
    #[must_use]
    pub fn is_zoomed(&self) -> bool {
        self.scale > REST_SCALE
    }

    /// The transform the render surface should currently use.
    #[must_use]
    pub fn transform(&self) -> ImageTransform {
        self.transform
    }

    /// Handles a viewport size change.
    ///
    /// Resets to rest (scale `1.0`, focus at the new center) and cancels any
    /// running animation, since its endpoints were computed for the old size.
    pub fn on_resize(&mut self, size: Size) {
        self.cancel_animation();
        log::debug!("zoom: resize to {}x{}", size.width, size.height);
        self.viewport = size;
        self.scale = REST_SCALE;
        self.focus = center_of(size);
        self.recompute();
    }

    /// Start of a pinch. Only cancels a running animation.
    pub fn on_scale_begin(&mut self) {
        self.cancel_animation();
    }

    /// One pinch step with the incremental `factor` since the last step.
    ///
    /// The focus moves toward `focal` by `1 - 1/factor`, a first-order
    /// approximation that keeps the content under the fingers roughly still
    /// for the small factors gesture recognizers deliver. Non-positive or
    /// non-finite factors are ignored.
    pub fn on_scale_gesture(&mut self, factor: f64, focal: Point) {
        if !factor.is_finite() || factor <= 0.0 || !is_finite_point(focal) {
            log::trace!("zoom: ignoring scale step factor={factor}");
            return;
        }
        self.cancel_animation();
        self.scale = self.config.clamp_scale(self.scale * factor);
        self.focus += (focal - self.focus) * (1.0 - 1.0 / factor);
        if self.config.clamp_during_pinch() {
            self.constrain_pan();
        }
        log::trace!("zoom: pinch scale={} focus={:?}", self.scale, self.focus);
        self.recompute();
    }

    /// One drag step, as a scroll distance (previous minus current position).
    ///
    /// Only pans while zoomed in; at rest the host's fit mode stays in charge.
    pub fn on_pan_gesture(&mut self, delta: Vec2) {
        if !delta.is_finite() {
            return;
        }
        self.cancel_animation();
        if !self.is_zoomed() {
            return;
        }
        self.focus -= delta;
        self.constrain_pan();
        log::trace!("zoom: pan focus={:?}", self.focus);
        self.recompute();
    }

    /// Toggles between rest and the double-tap scale, animated.
    ///
    /// Zoomed in, this animates back to rest at the viewport center.
    /// Otherwise it zooms into `position`, keeping that point anchored. The
    /// returned handle must be passed to [`ZoomController::tick`]. Non-finite
    /// positions are ignored.
    pub fn on_double_tap(&mut self, position: Point) -> Option<AnimationHandle> {
        if !is_finite_point(position) {
            return None;
        }
        let target = if self.is_zoomed() {
            REST_SCALE
        } else {
            self.config.double_tap_target()
        };
        Some(self.start_animation(target, position))
    }

    /// Starts an animation toward `target_scale`, anchored at `anchor`.
    ///
    /// Any running animation is superseded. `target_scale` is clamped to the
    /// configured limits.
    pub fn start_animation(&mut self, target_scale: f64, anchor: Point) -> AnimationHandle {
        self.cancel_animation();
        let target = self.config.clamp_scale(target_scale);
        let animation = ZoomAnimation::new(
            self.scale,
            self.effective_focus(),
            target,
            anchor,
            self.viewport_center(),
            self.config.animation_duration(),
        );
        let handle = AnimationHandle(self.next_animation);
        self.next_animation = self.next_animation.wrapping_add(1);
        log::debug!(
            "zoom: animate {} -> {} around {:?}",
            self.scale,
            target,
            anchor
        );
        self.animation = Some((handle, animation));
        handle
    }

    /// Applies the animation frame at progress `t` (already eased).
    ///
    /// After interpolating, the pan-limit clamp runs so no frame ever shows an
    /// out-of-bounds image. Progress is clamped to `[0, 1]`; at `1` the state
    /// equals the target and the animation stops.
    pub fn tick(&mut self, handle: AnimationHandle, t: f64) -> AnimationStatus {
        let Some(animation) = self.live_animation(handle) else {
            return AnimationStatus::Stale;
        };
        let t = sanitize_progress(t);
        let (scale, focus) = animation.sample(t);
        self.scale = self.config.clamp_scale(scale);
        self.focus = focus;
        self.constrain_pan();
        self.recompute();
        if t >= 1.0 {
            log::debug!("zoom: animation finished at scale {}", self.scale);
            self.animation = None;
            AnimationStatus::Finished
        } else {
            AnimationStatus::Running
        }
    }

    /// Like [`ZoomController::tick`], but eases `elapsed` time with the
    /// animation's own curve and duration.
    pub fn tick_elapsed(&mut self, handle: AnimationHandle, elapsed: Duration) -> AnimationStatus {
        match self.live_animation(handle) {
            Some(animation) => self.tick(handle, animation.progress_at(elapsed)),
            None => AnimationStatus::Stale,
        }
    }

    /// Stops the running animation where it is. Returns `false` if none was running.
    pub fn cancel_animation(&mut self) -> bool {
        if self.animation.take().is_some() {
            log::debug!("zoom: animation cancelled at scale {}", self.scale);
            true
        } else {
            false
        }
    }

    /// Returns `true` while an animation is in flight.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// The running animation and its handle, if any.
    #[must_use]
    pub fn animation(&self) -> Option<(AnimationHandle, &ZoomAnimation)> {
        self.animation.as_ref().map(|(h, a)| (*h, a))
    }

    /// Dispatches a gesture primitive and returns whether it was handled.
    ///
    /// Everything except [`GestureEvent::Tap`] is handled, so the host only
    /// performs its own click for plain taps.
    ///
    /// A [`GestureEvent::DoubleTap`] starts an animation whose handle is not
    /// returned here; fetch it with [`ZoomController::animation`] to drive
    /// [`ZoomController::tick`].
    pub fn handle_event(&mut self, event: GestureEvent) -> bool {
        match event {
            GestureEvent::ScaleBegin => self.on_scale_begin(),
            GestureEvent::Scale { factor, focal } => self.on_scale_gesture(factor, focal),
            GestureEvent::Scroll { delta } => self.on_pan_gesture(delta),
            GestureEvent::DoubleTap { position } => {
                self.on_double_tap(position);
            }
            GestureEvent::Resize { size } => self.on_resize(size),
            GestureEvent::Tap { .. } => return false,
        }
        true
    }

    /// Pushes the current transform to `target` if it changed since the last call.
    ///
    /// Entering rest emits `set_transform(None)` followed by `set_fit_mode`;
    /// while zoomed only `set_transform(Some(matrix))` is emitted.
    pub fn present(&mut self, mut target: impl RenderTarget) {
        if self.presented == Some(self.transform) {
            return;
        }
        match self.transform {
            ImageTransform::Fit(mode) => {
                target.set_transform(None);
                target.set_fit_mode(mode);
            }
            ImageTransform::Matrix(matrix) => target.set_transform(Some(matrix)),
        }
        self.presented = Some(self.transform);
    }

    /// Forces the next [`ZoomController::present`] to emit, for example after
    /// the host recreated its surface.
    pub fn invalidate_presented(&mut self) {
        self.presented = None;
    }

    /// Maps a point of the rest layout into the viewport under the current transform.
    #[must_use]
    pub fn image_to_view_point(&self, pt: Point) -> Point {
        self.current_matrix() * pt
    }

    /// Maps a viewport point back into the rest layout.
    #[must_use]
    pub fn view_to_image_point(&self, pt: Point) -> Point {
        self.current_matrix().inverse() * pt
    }

    /// Snapshot of the current state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> ZoomDebugInfo {
        ZoomDebugInfo {
            viewport: self.viewport,
            image_size: self.image_size,
            fit_mode: self.fit_mode,
            scale: self.scale,
            focus: self.focus,
            transform: self.transform,
            min_scale: self.config.min_scale(),
            max_scale: self.config.max_scale(),
            animating: self.is_animating(),
        }
    }

    fn live_animation(&self, handle: AnimationHandle) -> Option<ZoomAnimation> {
        match self.animation {
            Some((live, animation)) if live == handle => Some(animation),
            _ => None,
        }
    }

    // At rest the fit mode draws the image as if the focus were centered.
    fn effective_focus(&self) -> Point {
        if self.scale == REST_SCALE {
            self.viewport_center()
        } else {
            self.focus
        }
    }

    fn current_matrix(&self) -> Affine {
        self.transform.matrix().unwrap_or(Affine::IDENTITY)
    }

    fn constrain_pan(&mut self) {
        if let Some(image) = self.image_size {
            self.focus = constrain_focus(self.focus, self.scale, image, self.viewport);
        }
    }

    fn recompute(&mut self) {
        self.transform = if self.scale == REST_SCALE {
            ImageTransform::Fit(self.fit_mode)
        } else {
            ImageTransform::Matrix(zoom_matrix(self.scale, self.focus, self.viewport))
        };
    }
}

/// Builds the image matrix for `scale` and `focus` in a viewport of `viewport` size.
///
/// Moves the viewport center to the origin, magnifies by `scale`, then moves
/// the origin to `focus`.
#[must_use]
pub fn zoom_matrix(scale: f64, focus: Point, viewport: Size) -> Affine {
    Affine::translate(focus.to_vec2())
        * Affine::scale(scale)
        * Affine::translate(-center_of(viewport).to_vec2())
}

/// Clamps `focus` so an image of rest extent `image` at `scale` keeps covering
/// the viewport on axes where it is larger, and stays centered where it is
/// smaller.
#[must_use]
pub fn constrain_focus(focus: Point, scale: f64, image: Size, viewport: Size) -> Point {
    let center = center_of(viewport);
    let max_x = ((image.width * scale - viewport.width) / 2.0).max(0.0);
    let max_y = ((image.height * scale - viewport.height) / 2.0).max(0.0);
    Point::new(
        focus.x.max(center.x - max_x).min(center.x + max_x),
        focus.y.max(center.y - max_y).min(center.y + max_y),
    )
}

fn center_of(size: Size) -> Point {
    Point::new(size.width / 2.0, size.height / 2.0)
}

fn is_finite_point(pt: Point) -> bool {
    pt.x.is_finite() && pt.y.is_finite()
}

/// Debug snapshot of a [`ZoomController`] state.
#[derive(Clone, Copy, Debug)]
pub struct ZoomDebugInfo {
    /// Viewport size.
    pub viewport: Size,
    /// Rest extent of the image, if known.
    pub image_size: Option<Size>,
    /// Host fit mode used at rest.
    pub fit_mode: FitMode,
    /// Current scale factor.
    pub scale: f64,
    /// Current focus in viewport coordinates.
    pub focus: Point,
    /// Transform the render surface should use.
    pub transform: ImageTransform,
    /// Minimum scale factor.
    pub min_scale: f64,
    /// Maximum scale factor.
    pub max_scale: f64,
    /// Whether a double-tap animation is in flight.
    pub animating: bool,
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Size, Vec2};

    use super::{ZoomController, constrain_focus, zoom_matrix};
    use crate::animation::AnimationStatus;
    use crate::modes::ImageTransform;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn zoomed_controller() -> ZoomController {
        let mut zc = ZoomController::new(Size::new(1000.0, 1000.0));
        zc.set_image_size(Some(Size::new(1000.0, 1000.0)));
        zc.on_scale_gesture(3.0, zc.viewport_center());
        zc
    }

    #[test]
    fn starts_at_rest_with_fit_transform() {
        let zc = ZoomController::new(Size::new(800.0, 600.0));
        assert_eq!(zc.scale(), 1.0);
        assert_eq!(zc.focus(), Point::new(400.0, 300.0));
        assert!(zc.transform().is_fit());
        assert!(!zc.is_zoomed());
    }

    #[test]
    fn matrix_maps_viewport_center_to_focus() {
        let focus = Point::new(320.0, 180.0);
        let m = zoom_matrix(2.5, focus, Size::new(800.0, 600.0));
        let mapped = m * Point::new(400.0, 300.0);
        assert!(approx(mapped.x, focus.x));
        assert!(approx(mapped.y, focus.y));

        let corner = m * Point::new(0.0, 0.0);
        assert!(approx(corner.x, 320.0 - 2.5 * 400.0));
        assert!(approx(corner.y, 180.0 - 2.5 * 300.0));
    }

    #[test]
    fn constrain_focus_limits_and_centers() {
        let viewport = Size::new(1000.0, 400.0);
        let image = Size::new(1000.0, 100.0);
        // At 2x the image is 2000 wide (500 of slack each way) and 200 tall (centered).
        let clamped = constrain_focus(Point::new(2000.0, 0.0), 2.0, image, viewport);
        assert_eq!(clamped, Point::new(1000.0, 200.0));
        let clamped = constrain_focus(Point::new(-50.0, 999.0), 2.0, image, viewport);
        assert_eq!(clamped, Point::new(0.0, 200.0));
    }

    #[test]
    fn scale_is_clamped_to_limits() {
        let mut zc = ZoomController::new(Size::new(500.0, 500.0));
        let center = zc.viewport_center();
        zc.on_scale_gesture(50.0, center);
        assert_eq!(zc.scale(), 10.0);
        zc.on_scale_gesture(0.001, center);
        assert_eq!(zc.scale(), 1.0);
        assert!(zc.transform().is_fit());
    }

    #[test]
    fn degenerate_factors_are_ignored() {
        let mut zc = zoomed_controller();
        let before = (zc.scale(), zc.focus());
        for factor in [0.0, -2.0, f64::NAN, f64::INFINITY] {
            zc.on_scale_gesture(factor, Point::new(10.0, 10.0));
            assert_eq!((zc.scale(), zc.focus()), before);
        }
    }

    #[test]
    fn pan_is_ignored_at_rest() {
        let mut zc = ZoomController::new(Size::new(500.0, 500.0));
        zc.on_pan_gesture(Vec2::new(40.0, 40.0));
        assert_eq!(zc.focus(), Point::new(250.0, 250.0));
    }

    #[test]
    fn pan_moves_focus_and_clamps() {
        let mut zc = zoomed_controller();
        // 3x of a 1000 image in a 1000 viewport leaves 1000 slack each way.
        zc.on_pan_gesture(Vec2::new(-300.0, 200.0));
        assert_eq!(zc.focus(), Point::new(800.0, 300.0));
        zc.on_pan_gesture(Vec2::new(-5000.0, 5000.0));
        assert_eq!(zc.focus(), Point::new(1500.0, -500.0));
    }

    #[test]
    fn pan_without_image_is_unclamped() {
        let mut zc = ZoomController::new(Size::new(1000.0, 1000.0));
        zc.on_scale_gesture(2.0, zc.viewport_center());
        zc.on_pan_gesture(Vec2::new(-5000.0, 0.0));
        assert_eq!(zc.focus(), Point::new(5500.0, 500.0));
    }

    #[test]
    fn resize_resets_and_cancels() {
        let mut zc = zoomed_controller();
        let handle = zc.on_double_tap(Point::new(100.0, 100.0)).unwrap();
        zc.on_resize(Size::new(300.0, 200.0));
        assert_eq!(zc.scale(), 1.0);
        assert_eq!(zc.focus(), Point::new(150.0, 100.0));
        assert!(!zc.is_animating());
        assert_eq!(zc.tick(handle, 0.5), AnimationStatus::Stale);
    }

    #[test]
    fn new_gesture_cancels_animation() {
        let mut zc = ZoomController::new(Size::new(1000.0, 1000.0));
        let handle = zc.on_double_tap(Point::new(500.0, 500.0)).unwrap();
        assert_eq!(zc.tick(handle, 0.5), AnimationStatus::Running);
        assert!(approx(zc.scale(), 1.5));

        zc.on_scale_gesture(1.1, Point::new(500.0, 500.0));
        assert!(!zc.is_animating());
        assert!(approx(zc.scale(), 1.65));
        assert_eq!(zc.tick(handle, 1.0), AnimationStatus::Stale);
        assert!(approx(zc.scale(), 1.65));
    }

    #[test]
    fn superseded_handle_is_stale() {
        let mut zc = ZoomController::new(Size::new(1000.0, 1000.0));
        let first = zc.start_animation(4.0, Point::new(500.0, 500.0));
        let second = zc.start_animation(2.0, Point::new(500.0, 500.0));
        assert_ne!(first, second);
        assert_eq!(zc.tick(first, 1.0), AnimationStatus::Stale);
        assert_eq!(zc.tick(second, 1.0), AnimationStatus::Finished);
        assert_eq!(zc.scale(), 2.0);
    }

    #[test]
    fn animation_target_is_clamped() {
        let mut zc = ZoomController::new(Size::new(1000.0, 1000.0));
        let handle = zc.start_animation(40.0, Point::new(500.0, 500.0));
        assert_eq!(zc.tick(handle, 1.0), AnimationStatus::Finished);
        assert_eq!(zc.scale(), 10.0);
    }

    #[test]
    fn point_mapping_roundtrips() {
        let mut zc = zoomed_controller();
        zc.on_pan_gesture(Vec2::new(120.0, -40.0));
        let view = Point::new(250.0, 730.0);
        let image = zc.view_to_image_point(view);
        let back = zc.image_to_view_point(image);
        assert!(approx(back.x, view.x));
        assert!(approx(back.y, view.y));

        zc.on_resize(Size::new(1000.0, 1000.0));
        assert_eq!(zc.view_to_image_point(view), view);
    }

    #[test]
    fn fit_mode_change_updates_rest_transform() {
        let mut zc = ZoomController::new(Size::new(100.0, 100.0));
        zc.set_fit_mode(crate::FitMode::CenterCrop);
        assert_eq!(
            zc.transform(),
            ImageTransform::Fit(crate::FitMode::CenterCrop)
        );
    }

    #[test]
    fn debug_info_reflects_state() {
        let zc = zoomed_controller();
        let info = zc.debug_info();
        assert_eq!(info.scale, 3.0);
        assert_eq!(info.viewport, Size::new(1000.0, 1000.0));
        assert!(info.min_scale <= info.max_scale);
        assert!(!info.animating);
        assert!(!info.transform.is_fit());
    }

    #[test]
    fn image_size_set_while_zoomed_clamps_focus() {
        let mut zc = ZoomController::new(Size::new(1000.0, 1000.0));
        zc.on_scale_gesture(2.0, Point::new(0.0, 0.0));
        zc.on_pan_gesture(Vec2::new(2000.0, 0.0));
        assert!(zc.focus().x < 0.0);

        zc.set_image_size(Some(Size::new(1000.0, 1000.0)));
        assert_eq!(zc.focus().x, 0.0);
        let mapped = zc.image_to_view_point(zc.viewport_center());
        assert!(approx(mapped.x, 0.0));
    }

    #[test]
    fn double_tap_event_handle_is_reachable() {
        let mut zc = ZoomController::new(Size::new(800.0, 800.0));
        let event = crate::input::GestureEvent::DoubleTap {
            position: Point::new(400.0, 400.0),
        };
        assert!(zc.handle_event(event));
        let (handle, _) = zc.animation().unwrap();
        assert_eq!(zc.tick(handle, 1.0), AnimationStatus::Finished);
        assert_eq!(zc.scale(), 2.0);
    }
}
