// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Affine;

use crate::modes::FitMode;

/// Outbound contract to the surface that draws the image.
///
/// Fed by [`crate::ZoomController::present`], which only forwards changes.
pub trait RenderTarget {
    /// Sets the custom image matrix. `None` means "use the native fit mode".
    fn set_transform(&mut self, matrix: Option<Affine>);

    /// Restores the host's native fit mode. Called once per return to rest.
    fn set_fit_mode(&mut self, mode: FitMode);
}

impl<T: RenderTarget + ?Sized> RenderTarget for &mut T {
    fn set_transform(&mut self, matrix: Option<Affine>) {
        (**self).set_transform(matrix);
    }

    fn set_fit_mode(&mut self, mode: FitMode) {
        (**self).set_fit_mode(mode);
    }
}
