use winit::event::WindowEvent;
use winit::window::WindowId;

use crate::window::{RedrawFlag, RuntimeConfig};

use super::ctx::{FrameCtx, WindowCtx};

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by higher layers.
pub trait App {
    /// Called once a window exists. `redraw` is the window's frame scheduler.
    fn on_window_created(&mut self, id: WindowId, config: &RuntimeConfig, redraw: RedrawFlag) {
        let _ = (id, config, redraw);
    }

    /// Called before the window and its GPU context are dropped.
    fn on_window_destroyed(&mut self, id: WindowId) {
        let _ = id;
    }

    /// Called for window events.
    fn on_window_event(&mut self, window: &WindowCtx<'_>, event: &WindowEvent) -> AppControl {
        let _ = (window, event);
        AppControl::Continue
    }

    /// Called once per rendered frame per window.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
