//! Viewport controller: turns raw input into transform updates and decides
//! when a frame actually renders.
//!
//! All logic here is free of browser dependencies so it can be tested
//! natively; the `web_sys` wrapper lives in [`crate::engine`]. The controller owns the [`ViewTransform`], the
//! transient [`GestureState`], and the dirty flag the frame loop consumes
//! once per tick.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use thiserror::Error;

use crate::input::{GestureState, GestureUpdate, PinchError};
use crate::render::Renderer;
use crate::transform::{Point, TransformError, ViewTransform};

/// A gesture update that had to be skipped to keep the transform finite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ViewportError {
    #[error(transparent)]
    Transform(#[from] TransformError),
    #[error(transparent)]
    Pinch(#[from] PinchError),
}

/// Composes the transform engine, the gesture state machine, and an injected
/// drawing collaborator.
///
/// Input handlers mutate the transform and set the dirty flag;
/// [`Viewport::on_frame`], wired as the frame loop's callback, renders at
/// most once per tick, or every tick in continuous-render mode.
pub struct Viewport {
    transform: ViewTransform,
    gesture: GestureState,
    dirty: bool,
    always_render: bool,
    render_count: u64,
    renderer: Box<dyn Renderer>,
}

impl Viewport {
    /// Create a viewport for a surface of the given pixel size, drawing
    /// through `renderer`.
    ///
    /// Starts dirty so the first tick paints the initial view.
    #[must_use]
    pub fn new(surface_width: f64, surface_height: f64, renderer: Box<dyn Renderer>) -> Self {
        Self {
            transform: ViewTransform::new(surface_width, surface_height),
            gesture: GestureState::new(),
            dirty: true,
            always_render: false,
            render_count: 0,
            renderer,
        }
    }

    // --- Input handlers ---

    /// Wheel zoom toward the cursor. `cursor` is in surface coordinates;
    /// scrolling up (`delta_y < 0`) zooms in by the configured zoom factor,
    /// anything else zooms out by its inverse.
    ///
    /// # Errors
    ///
    /// Propagates the transform's zoom guards; the view is unchanged on error.
    pub fn on_wheel(&mut self, delta_y: f64, cursor: Point) -> Result<(), ViewportError> {
        let zoom_factor = self.transform.zoom_factor();
        let multiplier = if delta_y < 0.0 { zoom_factor } else { 1.0 / zoom_factor };
        self.transform.zoom_toward(multiplier, self.to_centered(cursor))?;
        self.dirty = true;
        Ok(())
    }

    /// Begin a single-pointer drag.
    pub fn on_pointer_down(&mut self, position: Point) {
        self.gesture.begin_pointer(position);
    }

    /// Continue a single-pointer drag: pan by the delta since the previous
    /// event. No-op when no drag is active.
    pub fn on_pointer_move(&mut self, position: Point) {
        if let Some(update) = self.gesture.move_pointer(position) {
            self.apply_pan(update);
        }
    }

    /// Release the pointer and clear the gesture state.
    pub fn on_pointer_up(&mut self) {
        self.gesture.end_pointer();
    }

    /// Begin a touch interaction (one touch pans, two pinch).
    pub fn on_touches_begin(&mut self, touches: &[Point]) {
        self.gesture.begin_touches(touches);
    }

    /// Continue a touch interaction: pan for one active point, anchored
    /// pinch-zoom for two.
    ///
    /// # Errors
    ///
    /// A degenerate pinch (coincident reference pair) or a transform zoom
    /// guard skips the update for this tick; gesture tracking stays in sync
    /// either way.
    pub fn on_touches_move(&mut self, touches: &[Point]) -> Result<(), ViewportError> {
        match self.gesture.move_touches(touches)? {
            Some(GestureUpdate::Pinch { ratio, midpoint }) => {
                self.transform.zoom_toward(ratio, self.to_centered(midpoint))?;
                self.dirty = true;
            }
            Some(update @ GestureUpdate::Pan { .. }) => self.apply_pan(update),
            None => {}
        }
        Ok(())
    }

    /// End or shrink a touch interaction; remaining touches keep panning.
    pub fn on_touches_end(&mut self, remaining: &[Point]) {
        self.gesture.end_touches(remaining);
    }

    fn apply_pan(&mut self, update: GestureUpdate) {
        if let GestureUpdate::Pan { dx, dy } = update {
            self.transform.pan(dx, dy);
            self.dirty = true;
        }
    }

    /// Anchors passed to the transform are relative to the surface midpoint.
    fn to_centered(&self, surface: Point) -> Point {
        let center = self.transform.surface_center();
        Point::new(surface.x - center.x, surface.y - center.y)
    }

    // --- Frame callback ---

    /// Per-tick render dispatch, registered as the frame loop's callback.
    ///
    /// Renders when the dirty flag is set: clears the surface, invokes the
    /// drawing collaborator with the current transform, and counts the
    /// render. Continuous-render mode re-arms the flag so every tick paints.
    pub fn on_frame(&mut self, delta_ms: f64) {
        if self.dirty {
            self.dirty = false;
            self.renderer.clear_surface();
            self.renderer.draw(&self.transform, delta_ms);
            self.render_count += 1;
        }
        if self.always_render {
            self.dirty = true;
        }
    }

    // --- Configuration / queries ---

    #[must_use]
    pub fn transform(&self) -> &ViewTransform {
        &self.transform
    }

    /// Mutable access for host-side configuration (zoom factor, bounds,
    /// initial position). Call [`Viewport::mark_dirty`] after direct edits.
    pub fn transform_mut(&mut self) -> &mut ViewTransform {
        &mut self.transform
    }

    /// Replace the drawing collaborator.
    pub fn set_renderer(&mut self, renderer: Box<dyn Renderer>) -> &mut Self {
        self.renderer = renderer;
        self.dirty = true;
        self
    }

    #[must_use]
    pub fn always_render(&self) -> bool {
        self.always_render
    }

    /// Enable or disable continuous-render mode.
    pub fn set_always_render(&mut self, always_render: bool) -> &mut Self {
        self.always_render = always_render;
        if always_render {
            self.dirty = true;
        }
        self
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Request a redraw on the next tick.
    pub fn mark_dirty(&mut self) -> &mut Self {
        self.dirty = true;
        self
    }

    /// Number of frames actually rendered (not ticks observed).
    #[must_use]
    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    #[must_use]
    pub fn pointer_down(&self) -> bool {
        self.gesture.pointer_down()
    }

    /// Propagate a host resize to the transform and repaint.
    pub fn set_surface_size(&mut self, width: f64, height: f64) -> &mut Self {
        self.transform.set_surface_size(width, height);
        self.dirty = true;
        self
    }
}
