use anyhow::{Context, Result};
use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::coords::{ColorRgba, Viewport};

use super::context::{RenderContext, RenderOutcome};
use super::quad::{QuadFrame, QuadRenderer};
use super::surface::QuadSurface;
use super::uniforms::FrameUniforms;

/// Knobs for acquiring the GPU and configuring the window surface.
#[derive(Debug, Copy, Clone)]
pub struct GpuInit {
    /// Adapter selection hint. The fragment stage does all the work, so the
    /// discrete GPU is the default.
    pub power_preference: wgpu::PowerPreference,

    /// `Fifo` is available everywhere; the scene caps its own rate anyway.
    pub present_mode: wgpu::PresentMode,

    /// Composite with pre-multiplied alpha so the zero clear alpha shows the
    /// desktop. Falls back to whatever the surface supports.
    pub transparent: bool,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            power_preference: wgpu::PowerPreference::HighPerformance,
            present_mode: wgpu::PresentMode::Fifo,
            transparent: true,
        }
    }
}

/// wgpu-backed [`RenderContext`] bound to a window.
///
/// Owns the surface, device and queue and the quad renderer. The surface
/// is configured at `logical × pixel_ratio`; a zero dimension leaves it
/// unconfigured and frames are skipped until the next non-zero size.
pub struct GpuContext<'w> {
    window: &'w Window,
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    quad: QuadRenderer,
    clear: wgpu::Color,
    pixel_ratio: f32,
}

impl<'w> GpuContext<'w> {
    /// Creates the GPU objects for `window`, blocking on adapter and device
    /// acquisition.
    pub fn create(window: &'w Window, init: GpuInit) -> Result<Self> {
        pollster::block_on(Self::acquire(window, init))
    }

    async fn acquire(window: &'w Window, init: GpuInit) -> Result<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .context("failed to create droplets surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: init.power_preference,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no GPU adapter can present to this window")?;
        log::debug!("adapter: {:?}", adapter.get_info());

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("droplets device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to open droplets device")?;

        let caps = surface.get_capabilities(&adapter);
        let format = pick_format(&caps.formats)
            .context("surface reports no formats")?;
        let alpha_mode = pick_alpha_mode(&caps.alpha_modes, init.transparent);

        // Sized for real by the first `set_size`.
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: 0,
            height: 0,
            present_mode: init.present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            quad: QuadRenderer::default(),
            clear: wgpu::Color::TRANSPARENT,
            pixel_ratio: 1.0,
        })
    }

    fn is_configured(&self) -> bool {
        self.config.width > 0 && self.config.height > 0
    }
}

/// Physical size of the backing buffer for a logical viewport.
pub(crate) fn backing_size(viewport: Viewport, ratio: f32) -> PhysicalSize<u32> {
    PhysicalSize::new(
        (viewport.width as f32 * ratio).round() as u32,
        (viewport.height as f32 * ratio).round() as u32,
    )
}

/// sRGB when offered, since the shader writes linear color.
fn pick_format(formats: &[wgpu::TextureFormat]) -> Option<wgpu::TextureFormat> {
    formats
        .iter()
        .copied()
        .find(|f| f.is_srgb())
        .or_else(|| formats.first().copied())
}

fn pick_alpha_mode(
    supported: &[wgpu::CompositeAlphaMode],
    transparent: bool,
) -> wgpu::CompositeAlphaMode {
    let wanted = if transparent {
        wgpu::CompositeAlphaMode::PreMultiplied
    } else {
        wgpu::CompositeAlphaMode::Opaque
    };
    if supported.contains(&wanted) {
        return wanted;
    }
    let fallback = supported
        .first()
        .copied()
        .unwrap_or(wgpu::CompositeAlphaMode::Auto);
    log::debug!("{wanted:?} compositing unsupported; using {fallback:?}");
    fallback
}

impl RenderContext for GpuContext<'_> {
    fn set_clear_color(&mut self, color: ColorRgba, alpha: f32) {
        self.clear = color.with_alpha(alpha).to_wgpu_premultiplied();
    }

    fn set_pixel_ratio(&mut self, ratio: f32) {
        self.pixel_ratio = ratio;
    }

    fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    fn set_size(&mut self, viewport: Viewport) {
        let backing = backing_size(viewport, self.pixel_ratio);
        log::debug!(
            "backing buffer {}x{} (viewport {}x{} @ {})",
            backing.width,
            backing.height,
            viewport.width,
            viewport.height,
            self.pixel_ratio
        );

        self.config.width = backing.width;
        self.config.height = backing.height;
        if self.is_configured() {
            self.surface.configure(&self.device, &self.config);
        }
    }

    fn draw(&mut self, surface: &QuadSurface, uniforms: &FrameUniforms) -> RenderOutcome {
        if !self.is_configured() {
            return RenderOutcome::SkippedFrame;
        }

        let texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::OutOfMemory) => return RenderOutcome::Fatal,
            Err(err @ (wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                log::debug!("surface {err}; reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return RenderOutcome::SkippedFrame;
            }
            Err(err) => {
                log::debug!("surface {err}; skipping frame");
                return RenderOutcome::SkippedFrame;
            }
        };

        let view = texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("droplets frame encoder"),
            });

        self.quad.render(
            QuadFrame {
                device: &self.device,
                queue: &self.queue,
                format: self.config.format,
                encoder: &mut encoder,
                view: &view,
                clear: self.clear,
            },
            surface,
            uniforms,
        );

        self.queue.submit(std::iter::once(encoder.finish()));
        drop(view);
        self.window.pre_present_notify();
        texture.present();

        RenderOutcome::Presented
    }
}
