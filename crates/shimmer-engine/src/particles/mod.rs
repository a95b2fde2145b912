//! Text particle field.
//!
//! A line of text is rasterized once per surface size into an offscreen RGBA
//! bitmap tinted with a horizontal colour ramp. The bitmap is sampled on a
//! fixed grid; every opaque sample becomes a [`Particle`] that rests at its
//! sample coordinate, is pushed away by the pointer and eases back when the
//! pointer is gone.

mod field;
mod particle;
mod pointer;
mod raster;
mod sim;

pub use field::{font_size_for, ParticleField, ParticleFieldProps, DEFAULT_TEXT, HINT_TEXT};
pub use particle::{
    Particle, ALPHA_THRESHOLD, DENSITY_MAX, DENSITY_MIN, EASE_DIVISOR, INFLUENCE_RADIUS,
    PARTICLE_RADIUS, SAMPLE_STRIDE,
};
pub use pointer::{force_at, PointerState};
pub use sim::step;
