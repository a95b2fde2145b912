use bytemuck::{Pod, Zeroable};

use crate::surface::SurfaceSize;

/// Uniform block bound at `@group(0) @binding(0)` of every fragment program.
///
/// Layout must match `Globals` in the WGSL prelude (16 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct Globals {
    pub resolution: [f32; 2],
    pub time: f32,
    pub _pad: f32,
}

/// CPU side of the program uniforms.
///
/// Elapsed time advances by `dt × speed` per running frame; a write is only
/// pending when time moved or the resolution changed.
#[derive(Debug, Default)]
pub struct UniformClock {
    globals: Globals,
    dirty: bool,
}

impl UniformClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elapsed(&self) -> f32 {
        self.globals.time
    }

    pub fn globals(&self) -> Globals {
        self.globals
    }

    pub fn advance(&mut self, dt: f32, speed: f32) {
        let step = dt * speed;
        if step != 0.0 && step.is_finite() {
            self.globals.time += step;
            self.dirty = true;
        }
    }

    pub fn set_resolution(&mut self, size: SurfaceSize) {
        let res = [size.width as f32, size.height as f32];
        if self.globals.resolution != res {
            self.globals.resolution = res;
            self.dirty = true;
        }
    }

    /// Forces the next `take_pending` to return the current values.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns the globals when they need uploading, clearing the flag.
    pub fn take_pending(&mut self) -> Option<Globals> {
        if !self.dirty {
            return None;
        }
        self.dirty = false;
        Some(self.globals)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(w: u32, h: u32) -> SurfaceSize {
        SurfaceSize { width: w, height: h, ratio: 1.0 }
    }

    #[test]
    fn globals_are_sixteen_bytes() {
        assert_eq!(std::mem::size_of::<Globals>(), 16);
    }

    #[test]
    fn elapsed_scales_with_speed() {
        let mut c = UniformClock::new();
        c.advance(0.5, 2.0);
        c.advance(0.25, 2.0);
        assert_eq!(c.elapsed(), 1.5);
    }

    #[test]
    fn resolution_write_only_on_change() {
        let mut c = UniformClock::new();
        c.set_resolution(size(800, 600));
        assert_eq!(c.take_pending().map(|g| g.resolution), Some([800.0, 600.0]));
        c.set_resolution(size(800, 600));
        assert_eq!(c.take_pending(), None);
    }

    #[test]
    fn zero_speed_does_not_dirty() {
        let mut c = UniformClock::new();
        c.advance(0.016, 0.0);
        assert_eq!(c.take_pending(), None);
        assert_eq!(c.elapsed(), 0.0);
    }
}
