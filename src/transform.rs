//! Transform engine: scale/translation state and coordinate conversions.
//!
//! [`ViewTransform`] owns the affine view state (uniform scale plus a
//! translation applied after scaling, centered on the surface midpoint) and
//! knows nothing about timing or drawing. Zooming is always anchored: a scale
//! change recomputes the translation so the chosen surface point keeps
//! mapping to the same logical point, which is what prevents the view from
//! "jumping" under the cursor or between pinching fingers.

#[cfg(test)]
#[path = "transform_test.rs"]
mod transform_test;

use thiserror::Error;

use crate::consts::DEFAULT_ZOOM_FACTOR;

/// A point in either logical or surface space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A zoom update that had to be skipped to keep the transform finite.
///
/// These are the only true failures in the crate: letting a non-finite
/// multiplier or a zero divisor through would corrupt `scale`/`translation`
/// irrecoverably, so the update is rejected and the prior state kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransformError {
    /// The zoom multiplier was non-finite or not positive.
    #[error("zoom multiplier must be finite and positive")]
    InvalidMultiplier,
    /// The current scale is not positive; the anchored-zoom formula would
    /// divide by zero. Unreachable while the scale invariant holds.
    #[error("scale must be positive before an anchored zoom")]
    DegenerateScale,
}

/// Affine view state: uniform scale and post-scale translation.
///
/// `translation_x` / `translation_y` are in surface pixels, relative to the
/// surface midpoint. `scale` is a factor (1.0 = no zoom) and is kept finite
/// and positive at all times: every mutator rejects values that would break
/// that invariant, so [`ViewTransform::zoom_toward`] can never divide by a
/// zero `old_scale` in normal operation.
#[derive(Debug, Clone)]
pub struct ViewTransform {
    scale: f64,
    translation_x: f64,
    translation_y: f64,
    zoom_factor: f64,
    min_scale: Option<f64>,
    max_scale: Option<f64>,
    surface_width: f64,
    surface_height: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            translation_x: 0.0,
            translation_y: 0.0,
            zoom_factor: DEFAULT_ZOOM_FACTOR,
            min_scale: None,
            max_scale: None,
            surface_width: 0.0,
            surface_height: 0.0,
        }
    }
}

impl ViewTransform {
    /// Create a transform for a surface of the given size in pixels.
    #[must_use]
    pub fn new(surface_width: f64, surface_height: f64) -> Self {
        let mut transform = Self::default();
        transform.set_surface_size(surface_width, surface_height);
        transform
    }

    // --- Conversions ---

    /// Convert a logical point to surface coordinates (pixels).
    #[must_use]
    pub fn to_surface(&self, logical: Point) -> Point {
        Point {
            x: logical.x * self.scale + self.translation_x + self.surface_width / 2.0,
            y: logical.y * self.scale + self.translation_y + self.surface_height / 2.0,
        }
    }

    /// Convert a logical length to a surface length (pixels).
    #[must_use]
    pub fn scale_length(&self, logical_length: f64) -> f64 {
        logical_length * self.scale
    }

    // --- Zoom / pan ---

    /// Multiply the scale by `multiplier`, clamped into the active bounds,
    /// keeping `anchor` fixed.
    ///
    /// `anchor` is in surface coordinates relative to the surface midpoint
    /// (the same space as the translation). After the update, the logical
    /// point that sat under the anchor still sits under it. When clamping
    /// absorbs part of the multiplier, the anchor holds for the clamped
    /// scale change actually applied.
    ///
    /// # Errors
    ///
    /// Rejects the update, leaving state untouched, when `multiplier` is
    /// non-finite or not positive, or when the current scale is not positive
    /// (the divide-by-zero guard).
    pub fn zoom_toward(&mut self, multiplier: f64, anchor: Point) -> Result<(), TransformError> {
        if !multiplier.is_finite() || multiplier <= 0.0 {
            return Err(TransformError::InvalidMultiplier);
        }
        let old_scale = self.scale;
        if !old_scale.is_finite() || old_scale <= 0.0 {
            return Err(TransformError::DegenerateScale);
        }

        let new_scale = self.clamp_scale(old_scale * multiplier);
        self.scale = new_scale;
        self.translation_x = anchor.x - new_scale * (anchor.x - self.translation_x) / old_scale;
        self.translation_y = anchor.y - new_scale * (anchor.y - self.translation_y) / old_scale;
        Ok(())
    }

    /// Translate the view by a surface-pixel delta. Pan is unbounded.
    pub fn pan(&mut self, dx: f64, dy: f64) -> &mut Self {
        if dx.is_finite() && dy.is_finite() {
            self.translation_x += dx;
            self.translation_y += dy;
        }
        self
    }

    fn clamp_scale(&self, scale: f64) -> f64 {
        let mut clamped = scale;
        if let Some(min) = self.min_scale {
            clamped = clamped.max(min);
        }
        if let Some(max) = self.max_scale {
            clamped = clamped.min(max);
        }
        clamped
    }

    // --- Accessors / fluent configuration ---
    //
    // Setters ignore values that would violate an invariant (non-finite,
    // non-positive scale, zoom factor ≤ 1, crossed bounds) and keep the
    // prior state, so configuration chains never fail midway.

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: f64) -> &mut Self {
        if scale.is_finite() && scale > 0.0 {
            self.scale = scale;
        }
        self
    }

    #[must_use]
    pub fn zoom_factor(&self) -> f64 {
        self.zoom_factor
    }

    pub fn set_zoom_factor(&mut self, factor: f64) -> &mut Self {
        if factor.is_finite() && factor > 1.0 {
            self.zoom_factor = factor;
        }
        self
    }

    #[must_use]
    pub fn min_scale(&self) -> Option<f64> {
        self.min_scale
    }

    /// Set or clear (`None`) the lower scale bound.
    pub fn set_min_scale(&mut self, min: Option<f64>) -> &mut Self {
        match min {
            None => self.min_scale = None,
            Some(value) => {
                if value.is_finite()
                    && value > 0.0
                    && self.max_scale.is_none_or(|max| value <= max)
                {
                    self.min_scale = Some(value);
                }
            }
        }
        self
    }

    #[must_use]
    pub fn max_scale(&self) -> Option<f64> {
        self.max_scale
    }

    /// Set or clear (`None`) the upper scale bound.
    pub fn set_max_scale(&mut self, max: Option<f64>) -> &mut Self {
        match max {
            None => self.max_scale = None,
            Some(value) => {
                if value.is_finite()
                    && value > 0.0
                    && self.min_scale.is_none_or(|min| value >= min)
                {
                    self.max_scale = Some(value);
                }
            }
        }
        self
    }

    #[must_use]
    pub fn translation_x(&self) -> f64 {
        self.translation_x
    }

    pub fn set_translation_x(&mut self, translation: f64) -> &mut Self {
        if translation.is_finite() {
            self.translation_x = translation;
        }
        self
    }

    #[must_use]
    pub fn translation_y(&self) -> f64 {
        self.translation_y
    }

    pub fn set_translation_y(&mut self, translation: f64) -> &mut Self {
        if translation.is_finite() {
            self.translation_y = translation;
        }
        self
    }

    #[must_use]
    pub fn surface_width(&self) -> f64 {
        self.surface_width
    }

    #[must_use]
    pub fn surface_height(&self) -> f64 {
        self.surface_height
    }

    /// Update the surface dimensions used by [`ViewTransform::to_surface`].
    pub fn set_surface_size(&mut self, width: f64, height: f64) -> &mut Self {
        if width.is_finite() && height.is_finite() && width >= 0.0 && height >= 0.0 {
            self.surface_width = width;
            self.surface_height = height;
        }
        self
    }

    /// The surface midpoint in surface coordinates.
    #[must_use]
    pub fn surface_center(&self) -> Point {
        Point {
            x: self.surface_width / 2.0,
            y: self.surface_height / 2.0,
        }
    }
}
