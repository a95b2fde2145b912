//! Surface lifecycle shared by every embeddable engine.
//!
//! An engine is mounted into a host-owned surface: it acquires a drawing
//! context, sizes itself from the container's logical size and a capped device
//! pixel ratio, follows resizes, runs one self-rescheduling frame loop and
//! releases everything on unmount.
//!
//! The pieces are injected capabilities so the contract is testable without a
//! window or a GPU:
//! - [`SurfaceEngine`] is implemented by the engines
//! - [`ResizeSource`] delivers container sizes (observer or polling)
//! - [`FrameScheduler`] requests the next frame from the host

mod frame_loop;
mod mount;
mod resize;
mod size;

pub use frame_loop::{FrameLoop, FrameScheduler};
pub use mount::{Mount, SurfaceEngine};
pub use resize::{observe, ObservedResize, PolledResize, ResizeObserver, ResizeSource, ResizeStrategy};
pub use size::{capped_ratio, ContainerSize, SurfaceSize, MAX_PIXEL_RATIO};
