//! Drawing collaborator capability and the 2D-context adapter.
//!
//! The viewport never inspects drawing output; it hands the collaborator the
//! current [`ViewTransform`] once per qualifying tick and otherwise stays out
//! of the way. [`Canvas2dRenderer`] is the only place in the crate that
//! touches [`web_sys::CanvasRenderingContext2d`].

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::transform::ViewTransform;

/// The drawing collaborator injected into [`crate::viewport::Viewport`].
///
/// `clear_surface` wipes the previous frame; `draw` produces the new one
/// using the transform's [`ViewTransform::to_surface`] /
/// [`ViewTransform::scale_length`] helpers. `delta_ms` is the time since the
/// previous tick, for animated content.
pub trait Renderer {
    fn clear_surface(&mut self);
    fn draw(&mut self, transform: &ViewTransform, delta_ms: f64);
}

/// A renderer that draws nothing. Useful for pure input/transform tests and
/// as an explicit stand-in before a host installs its own collaborator.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn clear_surface(&mut self) {}
    fn draw(&mut self, _transform: &ViewTransform, _delta_ms: f64) {}
}

/// Adapts a pair of closures into a [`Renderer`].
pub struct FnRenderer<C, D>
where
    C: FnMut(),
    D: FnMut(&ViewTransform, f64),
{
    clear: C,
    draw: D,
}

impl<C, D> FnRenderer<C, D>
where
    C: FnMut(),
    D: FnMut(&ViewTransform, f64),
{
    pub fn new(clear: C, draw: D) -> Self {
        Self { clear, draw }
    }
}

impl<C, D> Renderer for FnRenderer<C, D>
where
    C: FnMut(),
    D: FnMut(&ViewTransform, f64),
{
    fn clear_surface(&mut self) {
        (self.clear)();
    }

    fn draw(&mut self, transform: &ViewTransform, delta_ms: f64) {
        (self.draw)(transform, delta_ms);
    }
}

/// Renders through a browser 2D context.
///
/// Clearing resets the context transform and wipes the full surface; drawing
/// delegates to the host closure with the raw context and the current view
/// transform. Fallible `Canvas2D` calls are checked and surfaced through the
/// error hook rather than unwrapped.
pub struct Canvas2dRenderer<D, E>
where
    D: FnMut(&CanvasRenderingContext2d, &ViewTransform, f64),
    E: FnMut(&JsValue),
{
    ctx: CanvasRenderingContext2d,
    draw: D,
    on_error: E,
}

impl<D, E> Canvas2dRenderer<D, E>
where
    D: FnMut(&CanvasRenderingContext2d, &ViewTransform, f64),
    E: FnMut(&JsValue),
{
    /// Wrap a 2D context with a host draw closure and an error hook (the
    /// browser glue passes a console reporter).
    pub fn new(ctx: CanvasRenderingContext2d, draw: D, on_error: E) -> Self {
        Self { ctx, draw, on_error }
    }
}

impl<D, E> Renderer for Canvas2dRenderer<D, E>
where
    D: FnMut(&CanvasRenderingContext2d, &ViewTransform, f64),
    E: FnMut(&JsValue),
{
    fn clear_surface(&mut self) {
        if let Err(err) = self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0) {
            (self.on_error)(&err);
            return;
        }
        let canvas_width = self.ctx.canvas().map_or(0.0, |c| f64::from(c.width()));
        let canvas_height = self.ctx.canvas().map_or(0.0, |c| f64::from(c.height()));
        self.ctx.clear_rect(0.0, 0.0, canvas_width, canvas_height);
    }

    fn draw(&mut self, transform: &ViewTransform, delta_ms: f64) {
        (self.draw)(&self.ctx, transform, delta_ms);
    }
}
