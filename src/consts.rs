//! Shared numeric constants for the viewport crate.

// ── Zoom ────────────────────────────────────────────────────────

/// Multiplicative step applied per wheel notch when the host has not
/// configured one.
pub const DEFAULT_ZOOM_FACTOR: f64 = 2.0;

// ── Gestures ────────────────────────────────────────────────────

/// Minimum finger separation, in surface pixels, for a pinch ratio to be
/// trusted. Below this the reference distance is effectively zero and the
/// ratio would blow up the scale.
pub const MIN_PINCH_DISTANCE: f64 = 1e-6;

/// Maximum number of simultaneously tracked touch points.
pub const MAX_TOUCH_POINTS: usize = 2;
