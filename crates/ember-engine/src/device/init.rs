/// Initialization parameters for the presentation backend.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Prefer an sRGB surface format when available.
    ///
    /// Framebuffer bytes are shown unchanged either way: the upload texture picks the
    /// matching sRGB/linear variant.
    pub prefer_srgb: bool,

    /// Present mode (swap behavior).
    ///
    /// FIFO waits for vblank, which also paces the loop driver to the display rate.
    pub present_mode: wgpu::PresentMode,

    /// Optional alpha mode preference for the surface.
    ///
    /// If provided but unsupported on the current surface, a supported mode is selected.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    /// Required wgpu features.
    pub required_features: wgpu::Features,

    /// Limits requested from the adapter/device.
    ///
    /// Texture dimension limits are raised to what the adapter supports when the device
    /// is created, so the surface and upload texture can cover large displays.
    pub required_limits: wgpu::Limits,

    /// Desired maximum frame latency for the surface (a hint).
    pub desired_maximum_frame_latency: u32,
}

impl GpuInit {
    /// Presents as fast as the loop runs instead of waiting for vblank.
    pub fn without_vsync(mut self) -> Self {
        self.present_mode = wgpu::PresentMode::AutoNoVsync;
        self
    }
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            // Downlevel baseline, but with full-size textures: the surface and the upload
            // texture are as large as the window.
            required_limits: wgpu::Limits::downlevel_defaults()
                .using_resolution(wgpu::Limits::default()),
            desired_maximum_frame_latency: 2,
        }
    }
}
