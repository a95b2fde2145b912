//! Shimmer engine crate.
//!
//! This crate owns the platform + GPU runtime pieces and the two embeddable
//! visual engines built on top of them: the text [`particles`] field and the
//! fragment [`shader`] surface. Both follow the lifecycle contract in
//! [`surface`].

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod paint;
pub mod text;

pub mod surface;
pub mod particles;
pub mod shader;
