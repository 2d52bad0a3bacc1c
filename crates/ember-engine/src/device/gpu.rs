use anyhow::{bail, Context, Result};
use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::present::{FrameImage, PresentSurface};

use super::blit::BlitPipeline;
use super::surface::{
    choose_alpha_mode, choose_surface_format, clamp_to_max_dimension, classify_surface_error,
};
use super::{GpuInit, SurfaceErrorAction};

/// wgpu-backed presentation surface for a window.
///
/// This type:
/// - creates and stores Instance/Adapter/Device/Queue
/// - creates and configures the Surface (swapchain)
/// - presents framebuffer contents through a texture blit
pub struct Gpu<'w> {
    /// Kept alive for the lifetime of the surface.
    _instance: wgpu::Instance,

    /// Surface bound to the window.
    ///
    /// Surface lifetime is tied to the window; the window must outlive the `Gpu`.
    surface: wgpu::Surface<'w>,

    window: &'w Window,

    device: wgpu::Device,
    queue: wgpu::Queue,

    /// Active surface configuration.
    config: wgpu::SurfaceConfiguration,

    /// Current drawable size in physical pixels.
    size: PhysicalSize<u32>,

    /// Largest surface/texture edge the device accepts.
    max_dimension: u32,

    blit: BlitPipeline,
}

impl<'w> Gpu<'w> {
    /// Creates a GPU context bound to a window.
    ///
    /// Adapter/device acquisition is asynchronous under wgpu.
    pub async fn new(window: &'w Window, init: GpuInit) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .context("failed to create wgpu surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("failed to find a suitable GPU adapter")?;

        log::debug!("using adapter: {:?}", adapter.get_info());

        let required_limits = init.required_limits.using_resolution(adapter.limits());
        let max_dimension = required_limits.max_texture_dimension_2d;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("ember device"),
                required_features: init.required_features,
                required_limits,
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::MemoryUsage,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to create wgpu device/queue")?;

        let caps = surface.get_capabilities(&adapter);
        let format = choose_surface_format(&caps, init.prefer_srgb)
            .context("no supported surface formats")?;

        let (width, height) = clamp_to_max_dimension((size.width, size.height), max_dimension);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: init.present_mode,
            alpha_mode: choose_alpha_mode(&caps, init.alpha_mode),
            view_formats: vec![],
            desired_maximum_frame_latency: init.desired_maximum_frame_latency,
        };

        if size.width > 0 && size.height > 0 {
            surface.configure(&device, &config);
        }

        log::info!("surface configured: {format:?}, {}x{}", size.width, size.height);

        Ok(Gpu {
            _instance: instance,
            surface,
            window,
            device,
            queue,
            config,
            size,
            max_dimension,
            blit: BlitPipeline::default(),
        })
    }

    /// Reconfigures the surface after a resize.
    ///
    /// wgpu does not support configuring a surface with a 0x0 size; in that case,
    /// only internal state is updated and configuration is deferred. Sizes beyond the
    /// device's texture limit are clamped; the compositor stretches the surface.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.size = new_size;
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }

        let (width, height) = self.drawable_size();
        if (width, height) != (new_size.width, new_size.height) {
            log::warn!(
                "window {}x{} exceeds the GPU limit of {}; presenting at {width}x{height}",
                new_size.width,
                new_size.height,
                self.max_dimension
            );
        }

        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
    }

    /// Converts a `SurfaceError` into a higher-level action, reconfiguring when needed.
    pub fn handle_surface_error(&mut self, err: wgpu::SurfaceError) -> SurfaceErrorAction {
        let action = classify_surface_error(&err);
        if action == SurfaceErrorAction::Reconfigured && self.size.width > 0 && self.size.height > 0
        {
            self.surface.configure(&self.device, &self.config);
        }
        action
    }
}

impl PresentSurface for Gpu<'_> {
    fn drawable_size(&self) -> (u32, u32) {
        clamp_to_max_dimension((self.size.width, self.size.height), self.max_dimension)
    }

    fn present(&mut self, image: &FrameImage<'_>) -> Result<()> {
        // Minimized window or not yet sized: nothing to show.
        if image.layout.is_empty() || self.size.width == 0 || self.size.height == 0 {
            return Ok(());
        }

        self.blit
            .upload(&self.device, &self.queue, self.config.format, image)?;

        let surface_texture = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(err) => {
                let action = self.handle_surface_error(err);
                if action == SurfaceErrorAction::Fatal {
                    bail!("surface ran out of memory");
                }
                log::debug!("frame skipped: {action:?}");
                return Ok(());
            }
        };

        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("ember present encoder"),
            });

        self.blit.draw(&mut encoder, &view);

        self.window.pre_present_notify();
        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        Ok(())
    }
}
