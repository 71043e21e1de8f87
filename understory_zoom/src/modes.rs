// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Size};

/// The host's native image-fit behavior, restored verbatim whenever the
/// controller is at rest (scale `1.0`).
///
/// The controller never renders with this mode itself; it only hands it back
/// to the [`crate::RenderTarget`] so that an untouched image looks exactly as
/// the host would draw it without zoom support.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FitMode {
    /// Scale uniformly so the whole image fits, then center it.
    #[default]
    FitCenter,
    /// Stretch the image independently on each axis to fill the viewport.
    FitXy,
    /// Scale uniformly so the whole image fits, aligned to the top/left edge.
    FitStart,
    /// Scale uniformly so the whole image fits, aligned to the bottom/right edge.
    FitEnd,
    /// Center the image at its natural size without scaling.
    Center,
    /// Scale uniformly so the image covers the viewport, then center it.
    CenterCrop,
    /// Like [`FitMode::FitCenter`], but never upscales past the natural size.
    CenterInside,
}

impl FitMode {
    /// Returns the extent an image of `natural` size occupies in a viewport of
    /// size `viewport` when drawn with this mode.
    ///
    /// This is the "scale 1" extent the pan clamp works from. Degenerate
    /// natural sizes are returned unchanged.
    #[must_use]
    pub fn fitted_size(self, natural: Size, viewport: Size) -> Size {
        if natural.width <= 0.0 || natural.height <= 0.0 {
            return natural;
        }
        let sx = viewport.width / natural.width;
        let sy = viewport.height / natural.height;
        match self {
            Self::FitXy => viewport,
            Self::FitCenter | Self::FitStart | Self::FitEnd => natural * sx.min(sy),
            Self::Center => natural,
            Self::CenterCrop => natural * sx.max(sy),
            Self::CenterInside => natural * sx.min(sy).min(1.0),
        }
    }
}

/// What the render surface should currently draw with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ImageTransform {
    /// At rest: no custom matrix, use the host's native fit mode.
    Fit(FitMode),
    /// Zoomed: draw the fitted image through this matrix.
    Matrix(Affine),
}

impl ImageTransform {
    /// Returns the custom matrix, or `None` when the host's fit mode applies.
    #[must_use]
    pub fn matrix(&self) -> Option<Affine> {
        match self {
            Self::Fit(_) => None,
            Self::Matrix(m) => Some(*m),
        }
    }

    /// Returns `true` when no custom matrix is requested.
    #[must_use]
    pub fn is_fit(&self) -> bool {
        matches!(self, Self::Fit(_))
    }
}
