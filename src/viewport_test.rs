#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::render::{NullRenderer, Renderer};
use crate::transform::{Point, ViewTransform};

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn viewport() -> Viewport {
    Viewport::new(800.0, 600.0, Box::new(NullRenderer))
}

/// Records clear/draw calls and the transform snapshot handed to `draw`.
#[derive(Debug, Default)]
struct RenderLog {
    clears: usize,
    draws: Vec<(f64, f64)>, // (scale at draw time, delta_ms)
}

struct RecordingRenderer {
    log: Rc<RefCell<RenderLog>>,
}

impl Renderer for RecordingRenderer {
    fn clear_surface(&mut self) {
        self.log.borrow_mut().clears += 1;
    }

    fn draw(&mut self, transform: &ViewTransform, delta_ms: f64) {
        self.log.borrow_mut().draws.push((transform.scale(), delta_ms));
    }
}

fn recording_viewport() -> (Viewport, Rc<RefCell<RenderLog>>) {
    let log = Rc::new(RefCell::new(RenderLog::default()));
    let vp = Viewport::new(800.0, 600.0, Box::new(RecordingRenderer { log: Rc::clone(&log) }));
    (vp, log)
}

// --- Construction ---

#[test]
fn starts_dirty_so_first_tick_renders() {
    let vp = viewport();
    assert!(vp.is_dirty());
    assert_eq!(vp.render_count(), 0);
}

#[test]
fn starts_with_identity_transform() {
    let vp = viewport();
    assert_eq!(vp.transform().scale(), 1.0);
    assert_eq!(vp.transform().translation_x(), 0.0);
    assert!(!vp.always_render());
}

// --- Wheel ---

#[test]
fn wheel_up_zooms_in_by_zoom_factor() {
    let mut vp = viewport();
    vp.transform_mut().set_zoom_factor(1.2);
    assert_eq!(vp.on_wheel(-1.0, pt(450.0, 350.0)), Ok(()));
    assert!(approx_eq(vp.transform().scale(), 1.2));
    assert!(vp.is_dirty());
}

#[test]
fn wheel_down_zooms_out_by_inverse_factor() {
    let mut vp = viewport();
    vp.transform_mut().set_zoom_factor(2.0);
    assert_eq!(vp.on_wheel(1.0, pt(400.0, 300.0)), Ok(()));
    assert!(approx_eq(vp.transform().scale(), 0.5));
}

#[test]
fn wheel_keeps_cursor_point_fixed() {
    // 800x600 surface, zoom factor 1.2, cursor 50px right of and below the
    // center. Logical (50, 50) starts under the cursor and must stay at
    // surface (450, 350) after the zoom.
    let mut vp = viewport();
    vp.transform_mut().set_zoom_factor(1.2);
    assert_eq!(vp.on_wheel(-1.0, pt(450.0, 350.0)), Ok(()));
    let p = vp.transform().to_surface(pt(50.0, 50.0));
    assert!(approx_eq(p.x, 450.0), "x drifted to {}", p.x);
    assert!(approx_eq(p.y, 350.0), "y drifted to {}", p.y);
}

#[test]
fn wheel_zero_delta_zooms_out() {
    let mut vp = viewport();
    vp.transform_mut().set_zoom_factor(2.0);
    assert_eq!(vp.on_wheel(0.0, pt(400.0, 300.0)), Ok(()));
    assert!(approx_eq(vp.transform().scale(), 0.5));
}

// --- Pointer pan ---

#[test]
fn pointer_drag_pans_by_delta() {
    let mut vp = viewport();
    vp.on_frame(16.0); // consume the initial dirty flag
    vp.on_pointer_down(pt(100.0, 100.0));
    vp.on_pointer_move(pt(110.0, 95.0));
    assert!(approx_eq(vp.transform().translation_x(), 10.0));
    assert!(approx_eq(vp.transform().translation_y(), -5.0));
    assert!(vp.is_dirty());
}

#[test]
fn pointer_move_without_down_does_nothing() {
    let mut vp = viewport();
    vp.on_frame(16.0);
    vp.on_pointer_move(pt(110.0, 95.0));
    assert_eq!(vp.transform().translation_x(), 0.0);
    assert!(!vp.is_dirty());
}

#[test]
fn pointer_up_ends_the_drag() {
    let mut vp = viewport();
    vp.on_pointer_down(pt(0.0, 0.0));
    vp.on_pointer_up();
    assert!(!vp.pointer_down());
    vp.on_pointer_move(pt(50.0, 50.0));
    assert_eq!(vp.transform().translation_x(), 0.0);
}

#[test]
fn split_drag_equals_single_drag() {
    let mut split = viewport();
    split.on_pointer_down(pt(0.0, 0.0));
    split.on_pointer_move(pt(3.0, 1.0));
    split.on_pointer_move(pt(7.0, 4.0));

    let mut single = viewport();
    single.on_pointer_down(pt(0.0, 0.0));
    single.on_pointer_move(pt(7.0, 4.0));

    assert!(approx_eq(split.transform().translation_x(), single.transform().translation_x()));
    assert!(approx_eq(split.transform().translation_y(), single.transform().translation_y()));
}

// --- Touch pan / pinch ---

#[test]
fn single_touch_pans() {
    let mut vp = viewport();
    vp.on_touches_begin(&[pt(10.0, 10.0)]);
    assert_eq!(vp.on_touches_move(&[pt(25.0, 12.0)]), Ok(()));
    assert!(approx_eq(vp.transform().translation_x(), 15.0));
    assert!(approx_eq(vp.transform().translation_y(), 2.0));
}

#[test]
fn pinch_scales_by_distance_ratio() {
    // (100,100)/(200,100) -> (90,100)/(210,100) is a 100 -> 120 distance
    // change, ratio 1.2.
    let mut vp = viewport();
    vp.on_touches_begin(&[pt(100.0, 100.0), pt(200.0, 100.0)]);
    assert_eq!(vp.on_touches_move(&[pt(90.0, 100.0), pt(210.0, 100.0)]), Ok(()));
    assert!(approx_eq(vp.transform().scale(), 1.2));
}

#[test]
fn pinch_keeps_midpoint_fixed() {
    let mut vp = viewport();
    // Logical point under the new midpoint (150, 100): centered coordinates
    // (150-400, 100-300) = (-250, -200) at identity transform.
    let logical = pt(-250.0, -200.0);
    let before = vp.transform().to_surface(logical);
    assert!(approx_eq(before.x, 150.0));
    assert!(approx_eq(before.y, 100.0));

    vp.on_touches_begin(&[pt(100.0, 100.0), pt(200.0, 100.0)]);
    assert_eq!(vp.on_touches_move(&[pt(90.0, 100.0), pt(210.0, 100.0)]), Ok(()));

    let after = vp.transform().to_surface(logical);
    assert!(approx_eq(after.x, 150.0), "midpoint drifted to {}", after.x);
    assert!(approx_eq(after.y, 100.0), "midpoint drifted to {}", after.y);
}

#[test]
fn degenerate_pinch_skips_the_zoom() {
    let mut vp = viewport();
    vp.on_frame(16.0);
    vp.on_touches_begin(&[pt(50.0, 50.0), pt(50.0, 50.0)]);
    let result = vp.on_touches_move(&[pt(40.0, 50.0), pt(60.0, 50.0)]);
    assert_eq!(result, Err(ViewportError::Pinch(crate::input::PinchError)));
    assert_eq!(vp.transform().scale(), 1.0);
    assert!(!vp.is_dirty());
}

#[test]
fn lifting_a_finger_keeps_panning() {
    let mut vp = viewport();
    vp.on_touches_begin(&[pt(0.0, 0.0), pt(100.0, 0.0)]);
    vp.on_touches_end(&[pt(100.0, 0.0)]);
    assert_eq!(vp.on_touches_move(&[pt(105.0, 2.0)]), Ok(()));
    assert!(approx_eq(vp.transform().translation_x(), 5.0));
    assert!(approx_eq(vp.transform().translation_y(), 2.0));
}

#[test]
fn releasing_all_touches_resets_gesture() {
    let mut vp = viewport();
    vp.on_touches_begin(&[pt(0.0, 0.0)]);
    vp.on_touches_end(&[]);
    assert!(!vp.pointer_down());
    assert_eq!(vp.on_touches_move(&[pt(50.0, 50.0)]), Ok(()));
    assert_eq!(vp.transform().translation_x(), 0.0);
}

// --- Frame dispatch ---

#[test]
fn first_frame_renders_then_goes_idle() {
    let (mut vp, log) = recording_viewport();
    vp.on_frame(16.0);
    vp.on_frame(16.0);
    vp.on_frame(16.0);
    assert_eq!(log.borrow().clears, 1);
    assert_eq!(log.borrow().draws.len(), 1);
    assert_eq!(vp.render_count(), 1);
}

#[test]
fn input_marks_dirty_and_next_frame_renders_once() {
    let (mut vp, log) = recording_viewport();
    vp.on_frame(16.0);
    vp.on_pointer_down(pt(0.0, 0.0));
    vp.on_pointer_move(pt(4.0, 0.0));
    vp.on_frame(16.0);
    vp.on_frame(16.0);
    assert_eq!(log.borrow().draws.len(), 2);
    assert_eq!(vp.render_count(), 2);
}

#[test]
fn continuous_mode_renders_every_tick() {
    let (mut vp, log) = recording_viewport();
    vp.set_always_render(true);
    for _ in 0..5 {
        vp.on_frame(16.0);
    }
    assert_eq!(log.borrow().draws.len(), 5);
    assert_eq!(vp.render_count(), 5);
    assert!(vp.is_dirty(), "continuous mode leaves the flag armed");
}

#[test]
fn draw_receives_current_transform_and_delta() {
    let (mut vp, log) = recording_viewport();
    vp.transform_mut().set_scale(3.0);
    vp.on_frame(42.0);
    assert_eq!(log.borrow().draws, vec![(3.0, 42.0)]);
}

#[test]
fn clear_precedes_draw_each_render() {
    let (mut vp, log) = recording_viewport();
    vp.on_frame(16.0);
    vp.mark_dirty();
    vp.on_frame(16.0);
    let log = log.borrow();
    assert_eq!(log.clears, 2);
    assert_eq!(log.draws.len(), 2);
}

#[test]
fn disabling_continuous_mode_stops_extra_renders() {
    let (mut vp, log) = recording_viewport();
    vp.set_always_render(true);
    vp.on_frame(16.0);
    vp.set_always_render(false);
    vp.on_frame(16.0); // flag still armed from continuous tick
    vp.on_frame(16.0); // idle
    assert_eq!(log.borrow().draws.len(), 2);
}

// --- Configuration ---

#[test]
fn set_surface_size_updates_transform_and_marks_dirty() {
    let mut vp = viewport();
    vp.on_frame(16.0);
    vp.set_surface_size(1024.0, 768.0);
    assert_eq!(vp.transform().surface_width(), 1024.0);
    assert!(vp.is_dirty());
}

#[test]
fn set_renderer_requests_a_repaint() {
    let (mut vp, _log) = recording_viewport();
    vp.on_frame(16.0);
    let log = Rc::new(RefCell::new(RenderLog::default()));
    vp.set_renderer(Box::new(RecordingRenderer { log: Rc::clone(&log) }));
    vp.on_frame(16.0);
    assert_eq!(log.borrow().draws.len(), 1);
}

#[test]
fn fluent_configuration_chain() {
    let mut vp = viewport();
    vp.set_always_render(true).mark_dirty().set_surface_size(100.0, 100.0);
    assert!(vp.always_render());
    assert_eq!(vp.transform().surface_width(), 100.0);
}
