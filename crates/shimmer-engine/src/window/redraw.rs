use std::cell::Cell;
use std::rc::Rc;

use crate::surface::FrameScheduler;

/// Per-window "draw again" latch shared between the runtime and the app.
///
/// Engines request frames through it; the runtime drains it once per event
/// loop iteration and turns it into a `request_redraw`.
#[derive(Debug, Clone, Default)]
pub struct RedrawFlag(Rc<Cell<bool>>);

impl RedrawFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_requested(&self) -> bool {
        self.0.get()
    }

    /// Returns whether a redraw was requested, clearing the latch.
    pub fn take(&self) -> bool {
        self.0.replace(false)
    }
}

impl FrameScheduler for RedrawFlag {
    fn request_frame(&self) {
        self.0.set(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_clears_the_latch() {
        let flag = RedrawFlag::new();
        let shared = flag.clone();

        shared.request_frame();
        assert!(flag.is_requested());
        assert!(flag.take());
        assert!(!flag.take());
    }
}
