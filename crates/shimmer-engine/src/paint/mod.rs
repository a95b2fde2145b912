//! Paint model shared between engines and renderers.
//!
//! Scope:
//! - color representation (linear premultiplied alpha)
//! - horizontal color ramps used to tint rasterized text
//!
//! Geometry types remain in `coords`.

pub mod color;
pub mod gradient;

pub use color::Color;
pub use gradient::{ColorStop, LinearGradient, SpreadMode};
