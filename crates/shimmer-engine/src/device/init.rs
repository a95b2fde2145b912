/// Initialization parameters for the GPU layer.
///
/// Keep this structure stable and minimal. Add configuration flags only when a
/// concrete platform or backend requirement exists.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Prefer an sRGB surface format when available.
    pub prefer_srgb: bool,

    /// Present mode (swap behavior). FIFO is vsynced and broadly supported.
    pub present_mode: wgpu::PresentMode,

    /// Optional alpha mode preference for the surface.
    ///
    /// If provided but unsupported on the current surface, a supported mode is selected.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    /// Context tiers to try, in order.
    pub tiers: Vec<ContextTier>,

    /// Desired maximum frame latency for the surface.
    ///
    /// This value is a hint; support depends on platform/backend.
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            tiers: vec![ContextTier::Primary, ContextTier::Compatibility],
            desired_maximum_frame_latency: 2,
        }
    }
}

/// Capability tier used when acquiring a drawing context.
///
/// `Primary` asks for a modern backend (Vulkan, Metal, DX12) with default
/// limits; `Compatibility` accepts GL with downlevel limits, the native
/// analogue of falling back from a capable context type to a lesser one.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ContextTier {
    Primary,
    Compatibility,
}

impl ContextTier {
    pub fn backends(self) -> wgpu::Backends {
        match self {
            ContextTier::Primary => wgpu::Backends::PRIMARY,
            ContextTier::Compatibility => wgpu::Backends::GL,
        }
    }

    pub fn power_preference(self) -> wgpu::PowerPreference {
        match self {
            ContextTier::Primary => wgpu::PowerPreference::HighPerformance,
            ContextTier::Compatibility => wgpu::PowerPreference::LowPower,
        }
    }

    pub fn limits(self) -> wgpu::Limits {
        match self {
            ContextTier::Primary => wgpu::Limits::default(),
            ContextTier::Compatibility => wgpu::Limits::downlevel_webgl2_defaults(),
        }
    }
}
