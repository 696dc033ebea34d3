//! Input model: wheel deltas and the pointer/touch gesture state machine.
//!
//! [`GestureState`] is the transient state of a single interaction, from
//! pointer-down (or first touch) to release. It resolves raw event positions
//! into [`GestureUpdate`]s (pan deltas and pinch ratios) without touching
//! the transform itself; [`crate::viewport::Viewport`] applies them. The
//! state always returns to empty on release.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use thiserror::Error;

use crate::consts::{MAX_TOUCH_POINTS, MIN_PINCH_DISTANCE};
use crate::transform::Point;

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down = zoom out).
    pub dy: f64,
}

/// A pinch whose reference distance is zero.
///
/// Both stored fingers sit on the same point, so the ratio
/// `new_distance / old_distance` is undefined. The zoom update for the tick
/// is skipped; letting the division through would propagate a non-finite
/// scale into the transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("pinch reference distance is zero")]
pub struct PinchError;

/// A resolved gesture step for the controller to apply.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureUpdate {
    /// Single-pointer drag: translate the view by this surface-pixel delta.
    Pan { dx: f64, dy: f64 },
    /// Two-finger pinch: multiply the scale by `ratio`, anchored at
    /// `midpoint` (midpoint of the new finger pair, in raw surface
    /// coordinates).
    Pinch { ratio: f64, midpoint: Point },
}

/// Gesture state for the duration of one interaction.
///
/// Holds at most [`MAX_TOUCH_POINTS`] active positions: one entry for a
/// single-pointer pan, two for a pinch.
#[derive(Debug, Clone, Default)]
pub struct GestureState {
    pointer_down: bool,
    points: Vec<Point>,
}

impl GestureState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn pointer_down(&self) -> bool {
        self.pointer_down
    }

    /// The currently tracked positions (empty, one, or two).
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    // --- Single pointer ---

    /// Begin a single-pointer drag at `position`.
    pub fn begin_pointer(&mut self, position: Point) {
        self.pointer_down = true;
        self.points.clear();
        self.points.push(position);
    }

    /// Track a pointer move. Returns the pan delta while a single-pointer
    /// drag is active, `None` otherwise.
    pub fn move_pointer(&mut self, position: Point) -> Option<GestureUpdate> {
        if !self.pointer_down || self.points.len() != 1 {
            return None;
        }
        let last = self.points[0];
        self.points[0] = position;
        Some(GestureUpdate::Pan {
            dx: position.x - last.x,
            dy: position.y - last.y,
        })
    }

    /// End the interaction: release the pointer and clear tracked positions.
    pub fn end_pointer(&mut self) {
        self.pointer_down = false;
        self.points.clear();
    }

    // --- Multi-touch ---

    /// Begin a touch interaction. One touch behaves as pointer-down; two or
    /// more record the first two as the active pinch pair. An empty list is
    /// ignored.
    pub fn begin_touches(&mut self, touches: &[Point]) {
        if touches.is_empty() {
            return;
        }
        self.pointer_down = true;
        self.points.clear();
        self.points.extend(touches.iter().take(MAX_TOUCH_POINTS).copied());
    }

    /// Track a touch move, resolving it into a pan (one active point) or a
    /// pinch (two active points). Stored positions are updated regardless of
    /// the branch taken.
    ///
    /// # Errors
    ///
    /// [`PinchError`] when the stored pair is coincident: positions are
    /// still updated, but no update is emitted for this tick.
    pub fn move_touches(&mut self, touches: &[Point]) -> Result<Option<GestureUpdate>, PinchError> {
        if !self.pointer_down || touches.is_empty() {
            return Ok(None);
        }
        match self.points.len() {
            1 => Ok(self.move_pointer(touches[0])),
            2 if touches.len() >= 2 => {
                let old_distance = distance(self.points[0], self.points[1]);

                self.points.clear();
                self.points.extend(touches.iter().take(MAX_TOUCH_POINTS).copied());

                let a = self.points[0];
                let b = self.points[1];
                if old_distance < MIN_PINCH_DISTANCE {
                    return Err(PinchError);
                }
                let new_distance = distance(a, b);
                Ok(Some(GestureUpdate::Pinch {
                    ratio: new_distance / old_distance,
                    midpoint: Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0),
                }))
            }
            // Fewer live touches than stored points: malformed sequence, the
            // end event will re-sync the active set.
            _ => Ok(None),
        }
    }

    /// End or shrink a touch interaction. With no remaining touches the
    /// state resets to empty; otherwise the remaining touches (first two)
    /// replace the active set, so lifting one of two fingers continues as a
    /// pan without a restart.
    pub fn end_touches(&mut self, remaining: &[Point]) {
        self.points.clear();
        if remaining.is_empty() {
            self.pointer_down = false;
        } else {
            self.points.extend(remaining.iter().take(MAX_TOUCH_POINTS).copied());
        }
    }
}

fn distance(a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    dx.hypot(dy)
}
