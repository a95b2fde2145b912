use super::ContextTier;

/// High-level response after a surface error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; rendering may resume next frame.
    Reconfigured,
    /// Transient error; skip the current frame.
    SkipFrame,
    /// Fatal error (commonly OOM); terminate gracefully.
    Fatal,
}

/// Failure to obtain a drawing context for a window.
///
/// Every variant is treated the same by callers: the surface renders its
/// static fallback instead.
#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    #[error("window has zero size")]
    ZeroSize,

    #[error("failed to create wgpu surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable {tier:?} adapter: {source}")]
    Adapter {
        tier: ContextTier,
        #[source]
        source: wgpu::RequestAdapterError,
    },

    #[error("failed to create {tier:?} device: {source}")]
    Device {
        tier: ContextTier,
        #[source]
        source: wgpu::RequestDeviceError,
    },

    #[error("no supported surface formats")]
    NoSurfaceFormat,

    #[error("context creation panicked: {0}")]
    Panicked(String),

    #[error("no context tier succeeded (last error: {0})")]
    Exhausted(Box<ContextError>),
}
