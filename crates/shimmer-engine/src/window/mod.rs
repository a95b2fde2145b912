//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and Windows, and wires them to the GPU layer.
//! A window whose GPU context cannot be acquired stays open and is handed to
//! the app without one.

mod redraw;
mod runtime;

pub use redraw::RedrawFlag;
pub use runtime::{Runtime, RuntimeConfig, RuntimeCtx};
