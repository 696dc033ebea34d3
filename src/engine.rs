//! Browser glue: binds the viewport to an `HtmlCanvasElement` and drives the
//! frame loop with `requestAnimationFrame`.
//!
//! Everything here is a thin shell around the native-testable core. The host
//! remains responsible for DOM event subscription; it extracts coordinates
//! from its events and forwards them to the delegation methods below
//! (`mouseout` should be forwarded as a pointer-up so a drag doesn't stick
//! when the cursor leaves the surface).

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::HtmlCanvasElement;

use crate::frame_loop::{FrameLoop, FrameScheduler};
use crate::input::WheelDelta;
use crate::render::Renderer;
use crate::transform::Point;
use crate::viewport::{Viewport, ViewportError};

/// [`FrameScheduler`] over `requestAnimationFrame` / `cancelAnimationFrame`.
///
/// The tick closure is installed by [`CanvasEngine`] after the loop exists
/// (the closure needs a handle back to the loop). Until then, requests are
/// silently inert.
pub struct RafScheduler {
    tick: Option<Closure<dyn FnMut(f64)>>,
    pending: Option<i32>,
}

impl RafScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self { tick: None, pending: None }
    }

    /// Install the closure the browser will invoke on each refresh.
    pub fn set_tick(&mut self, tick: Closure<dyn FnMut(f64)>) {
        self.tick = Some(tick);
    }
}

impl Default for RafScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameScheduler for RafScheduler {
    fn request(&mut self) {
        let Some(tick) = &self.tick else {
            return;
        };
        let Some(window) = web_sys::window() else {
            return;
        };
        match window.request_animation_frame(tick.as_ref().unchecked_ref()) {
            Ok(id) => self.pending = Some(id),
            Err(err) => web_sys::console::warn_2(
                &"viewport: requestAnimationFrame failed".into(),
                &err,
            ),
        }
    }

    fn cancel(&mut self) {
        let Some(id) = self.pending.take() else {
            return;
        };
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(err) = window.cancel_animation_frame(id) {
            web_sys::console::warn_2(&"viewport: cancelAnimationFrame failed".into(), &err);
        }
    }
}

/// The full browser-side engine: a [`Viewport`] bound to a canvas element
/// plus a [`FrameLoop`] driven by the display refresh.
///
/// Guarded gesture failures (degenerate pinches, invalid zoom multipliers)
/// skip the update for that tick and are reported to the console.
pub struct CanvasEngine {
    canvas: HtmlCanvasElement,
    viewport: Rc<RefCell<Viewport>>,
    frame_loop: Rc<RefCell<FrameLoop<RafScheduler>>>,
}

impl CanvasEngine {
    /// Create an engine bound to `canvas`, drawing through `renderer`.
    ///
    /// The frame loop's callback is wired to the viewport's per-tick render
    /// dispatch; call [`CanvasEngine::start`] to begin ticking.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement, renderer: Box<dyn Renderer>) -> Self {
        let viewport = Rc::new(RefCell::new(Viewport::new(
            f64::from(canvas.width()),
            f64::from(canvas.height()),
            renderer,
        )));
        let frame_loop = Rc::new(RefCell::new(FrameLoop::new(RafScheduler::new())));

        {
            let viewport = Rc::clone(&viewport);
            frame_loop
                .borrow_mut()
                .set_callback(move |delta_ms| viewport.borrow_mut().on_frame(delta_ms));
        }

        // The refresh callback routes back into the loop through a weak
        // handle so the closure doesn't keep the loop alive by itself.
        let weak_loop = Rc::downgrade(&frame_loop);
        let tick = Closure::wrap(Box::new(move |now_ms: f64| {
            if let Some(frame_loop) = weak_loop.upgrade() {
                frame_loop.borrow_mut().tick(now_ms);
            }
        }) as Box<dyn FnMut(f64)>);
        frame_loop.borrow_mut().scheduler_mut().set_tick(tick);

        Self { canvas, viewport, frame_loop }
    }

    // --- Loop control ---

    /// Start (or resume) the render loop from the current time.
    pub fn start(&self) {
        self.frame_loop.borrow_mut().start(now_ms());
    }

    /// Pause the render loop. Safe to call repeatedly.
    pub fn pause(&self) {
        self.frame_loop.borrow_mut().pause();
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.frame_loop.borrow().is_running()
    }

    #[must_use]
    pub fn frames_per_second(&self) -> Option<f64> {
        self.frame_loop.borrow().frames_per_second()
    }

    // --- Input delegation ---

    pub fn on_wheel(&self, delta: WheelDelta, cursor: Point) {
        let result = self.viewport.borrow_mut().on_wheel(delta.dy, cursor);
        report_skipped(result);
    }

    pub fn on_pointer_down(&self, position: Point) {
        self.viewport.borrow_mut().on_pointer_down(position);
    }

    pub fn on_pointer_move(&self, position: Point) {
        self.viewport.borrow_mut().on_pointer_move(position);
    }

    pub fn on_pointer_up(&self) {
        self.viewport.borrow_mut().on_pointer_up();
    }

    pub fn on_touches_begin(&self, touches: &[Point]) {
        self.viewport.borrow_mut().on_touches_begin(touches);
    }

    pub fn on_touches_move(&self, touches: &[Point]) {
        let result = self.viewport.borrow_mut().on_touches_move(touches);
        report_skipped(result);
    }

    pub fn on_touches_end(&self, remaining: &[Point]) {
        self.viewport.borrow_mut().on_touches_end(remaining);
    }

    // --- Surface / access ---

    /// Re-read the canvas dimensions after a host resize.
    pub fn sync_surface_size(&self) {
        self.viewport
            .borrow_mut()
            .set_surface_size(f64::from(self.canvas.width()), f64::from(self.canvas.height()));
    }

    #[must_use]
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Shared handle to the viewport for host-side configuration (zoom
    /// factor, scale bounds, continuous-render mode, renderer swaps).
    #[must_use]
    pub fn viewport(&self) -> Rc<RefCell<Viewport>> {
        Rc::clone(&self.viewport)
    }
}

fn report_skipped(result: Result<(), ViewportError>) {
    if let Err(err) = result {
        web_sys::console::warn_1(&format!("viewport: skipped zoom update: {err}").into());
    }
}

fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|window| window.performance())
        .map_or(0.0, |performance| performance.now())
}
