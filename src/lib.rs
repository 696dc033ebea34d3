//! Interactive 2D viewport engine: pan, wheel/pinch zoom, and a driven
//! render loop, decoupled from what is actually drawn.
//!
//! This crate is compiled to WebAssembly and runs in the browser, but the
//! core (the coordinate transform, gesture state machine, viewport
//! controller, and frame loop) has no browser dependencies and is tested
//! natively. The host wires DOM events to [`engine::CanvasEngine`]
//! and injects a [`render::Renderer`] for the application-specific drawing;
//! the engine keeps the view transform consistent (zoom is always anchored,
//! so the point under the cursor or between pinching fingers never jumps)
//! and renders only when something changed.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`transform`] | Scale/translation state, anchored zoom, coordinate conversion |
//! | [`input`] | Pointer/touch gesture state machine |
//! | [`viewport`] | Input → transform mapping, dirty flag, render dispatch |
//! | [`frame_loop`] | Refresh-driven loop with timing statistics |
//! | [`render`] | Drawing-collaborator trait and the 2D-context adapter |
//! | [`engine`] | Browser glue: canvas binding and `requestAnimationFrame` |
//! | [`consts`] | Shared numeric constants (default zoom factor, pinch epsilon) |

pub mod consts;
pub mod engine;
pub mod frame_loop;
pub mod input;
pub mod render;
pub mod transform;
pub mod viewport;
