//! GPU device + surface management.
//!
//! This module is responsible for:
//! - acquiring the wgpu Instance/Adapter/Device/Queue, preferring the primary
//!   backend tier and falling back to the compatibility tier
//! - creating & configuring the Surface (swapchain)
//! - acquiring frames and providing encoders/views for rendering

mod error;
mod frame;
mod gpu;
mod init;
mod surface;

pub use error::{ContextError, SurfaceErrorAction};
pub use frame::GpuFrame;
pub use gpu::Gpu;
pub(crate) use gpu::panic_message;
pub use init::{ContextTier, GpuInit};
