use crate::coords::{Vec2, Viewport};

/// Upper bound applied to the device pixel ratio when sizing drawing buffers.
pub const MAX_PIXEL_RATIO: f32 = 2.0;

/// Device pixel ratio clamped to `[1, MAX_PIXEL_RATIO]`.
///
/// Non-finite input is treated as 1.
pub fn capped_ratio(scale_factor: f64) -> f32 {
    let r = scale_factor as f32;
    if !r.is_finite() {
        return 1.0;
    }
    r.clamp(1.0, MAX_PIXEL_RATIO)
}

/// Container size in logical pixels plus the window's scale factor.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ContainerSize {
    pub width: f32,
    pub height: f32,
    pub scale_factor: f64,
}

impl ContainerSize {
    pub fn new(width: f32, height: f32, scale_factor: f64) -> Self {
        Self { width, height, scale_factor }
    }
}

/// Drawing-buffer size in surface pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
    /// Capped ratio used to go from logical to surface pixels.
    pub ratio: f32,
}

impl SurfaceSize {
    /// `container × capped_ratio`, floored, never below 1×1.
    pub fn from_container(c: ContainerSize) -> Self {
        let ratio = capped_ratio(c.scale_factor);
        let side = |v: f32| {
            let v = v * ratio;
            if v.is_finite() && v >= 1.0 { v.floor() as u32 } else { 1 }
        };
        Self {
            width: side(c.width),
            height: side(c.height),
            ratio,
        }
    }

    /// Converts a logical-pixel position into surface pixels.
    #[inline]
    pub fn to_surface(self, logical: Vec2) -> Vec2 {
        logical * self.ratio
    }

    #[inline]
    pub fn viewport(self) -> Viewport {
        Viewport::new(self.width as f32, self.height as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── capped_ratio ──────────────────────────────────────────────────────

    #[test]
    fn ratio_is_clamped_to_one_and_two() {
        assert_eq!(capped_ratio(0.5), 1.0);
        assert_eq!(capped_ratio(1.5), 1.5);
        assert_eq!(capped_ratio(3.0), 2.0);
        assert_eq!(capped_ratio(f64::NAN), 1.0);
    }

    // ── from_container ────────────────────────────────────────────────────

    #[test]
    fn surface_is_container_times_capped_ratio() {
        let s = SurfaceSize::from_container(ContainerSize::new(400.0, 300.0, 3.0));
        assert_eq!((s.width, s.height), (800, 600));
        assert_eq!(s.ratio, 2.0);
    }

    #[test]
    fn zero_container_is_one_by_one() {
        let s = SurfaceSize::from_container(ContainerSize::new(0.0, 0.0, 1.0));
        assert_eq!((s.width, s.height), (1, 1));
    }

    #[test]
    fn pointer_is_scaled_by_ratio() {
        let s = SurfaceSize::from_container(ContainerSize::new(100.0, 100.0, 2.0));
        assert_eq!(s.to_surface(Vec2::new(10.0, 20.0)), Vec2::new(20.0, 40.0));
    }
}
