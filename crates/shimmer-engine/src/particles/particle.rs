use crate::coords::Vec2;
use crate::paint::Color;

/// Disc radius of every particle, in surface pixels.
pub const PARTICLE_RADIUS: f32 = 2.0;
/// Inclusive lower bound of particle density.
pub const DENSITY_MIN: f32 = 5.0;
/// Exclusive upper bound of particle density.
pub const DENSITY_MAX: f32 = 45.0;
/// Distance within which the pointer repels particles.
pub const INFLUENCE_RADIUS: f32 = 150.0;
/// Grid step used when sampling the rasterized text.
pub const SAMPLE_STRIDE: usize = 4;
/// Samples with alpha strictly above this become particles.
pub const ALPHA_THRESHOLD: u8 = 128;
/// Each frame a resting-bound particle closes `1 / EASE_DIVISOR` of the gap.
pub const EASE_DIVISOR: f32 = 10.0;

/// One animated point sampled from the text.
///
/// `base` is fixed at construction; only the simulation moves `pos`.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub(super) pos: Vec2,
    base: Vec2,
    color: [u8; 3],
    density: f32,
}

impl Particle {
    /// A particle resting at `base`.
    pub fn new(base: Vec2, color: [u8; 3], density: f32) -> Self {
        Self {
            pos: base,
            base,
            color,
            density,
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn base(&self) -> Vec2 {
        self.base
    }

    /// sRGB colour sampled from the bitmap.
    #[inline]
    pub fn color(&self) -> [u8; 3] {
        self.color
    }

    #[inline]
    pub fn density(&self) -> f32 {
        self.density
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        PARTICLE_RADIUS
    }

    pub fn is_at_rest(&self) -> bool {
        self.pos == self.base
    }

    pub(super) fn paint(&self) -> Color {
        let [r, g, b] = self.color;
        Color::from_srgb_u8(r, g, b, 255)
    }
}
