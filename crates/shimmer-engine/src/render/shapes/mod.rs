//! Shape renderers.

pub(crate) mod common;

pub mod circle;

pub use circle::{CircleRenderer, Dot};
