//! Coordinate and geometry types shared across engines and renderers.
//!
//! Canonical CPU spaces:
//! - logical pixels: layout space of the host window (DPI-independent)
//! - surface pixels: logical pixels × capped device pixel ratio
//!
//! Both use a top-left origin, +X right, +Y down. Renderers convert to NDC in
//! shaders using a viewport uniform.

mod rect;
mod vec2;
mod viewport;

pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::Viewport;
