//! GPU rendering subsystem.
//!
//! Renderers consume plain CPU instance slices and issue GPU commands via wgpu.
//! Each renderer is responsible for its own GPU resources (pipelines, buffers)
//! and frees them on `release`.
//!
//! Convention:
//! - CPU geometry is in viewport pixels (top-left origin, +Y down).
//! - Vertex shader converts to NDC using a viewport uniform.

mod ctx;
pub mod shapes;

pub use ctx::{RenderCtx, RenderTarget};
