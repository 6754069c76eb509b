use hero_core::{BackingSize, HeroError, HeroUniforms, Renderer};

mod pipeline;
use pipeline::{create_hero_pipeline, HeroPipeline};

/// wgpu implementation of the hero's render pipeline.
pub struct GpuRenderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    hero: HeroPipeline,
}

impl GpuRenderer {
    /// Acquire adapter and device for `surface`, then compile and link once.
    pub async fn new(
        instance: &wgpu::Instance,
        surface: wgpu::Surface<'static>,
        size: BackingSize,
    ) -> Result<Self, HeroError> {
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| HeroError::NoGraphicsContext("no GPU adapter".into()))?;
        let info = adapter.get_info();
        log::info!("[gpu] adapter {:?} via {:?}", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // WebGL2-level limits so the GL fallback can satisfy them
                    required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                        .using_resolution(adapter.limits()),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: Some("hero_device"),
                },
                None,
            )
            .await
            .map_err(|e| HeroError::NoGraphicsContext(format!("request_device error: {e}")))?;

        let caps = surface.get_capabilities(&adapter);
        // Plain UNORM output matches what a WebGL canvas shows for the same shader.
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Rgba8Unorm
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| HeroError::NoGraphicsContext("surface reports no formats".into()))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let hero = create_hero_pipeline(&device, format).await?;
        log::info!(
            "[gpu] pipeline ready {}x{} {:?}",
            config.width,
            config.height,
            format
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            hero,
        })
    }

    pub fn size(&self) -> BackingSize {
        BackingSize {
            width: self.config.width,
            height: self.config.height,
        }
    }
}

impl Renderer for GpuRenderer {
    fn resize(&mut self, size: BackingSize) {
        if size.width == 0 || size.height == 0 {
            return;
        }
        self.config.width = size.width;
        self.config.height = size.height;
        self.surface.configure(&self.device, &self.config);
    }

    fn draw(&mut self, uniforms: &HeroUniforms) -> Result<(), HeroError> {
        self.queue
            .write_buffer(&self.hero.uniform_buffer, 0, bytemuck::bytes_of(uniforms));

        let frame = match self.surface.get_current_texture() {
            Ok(f) => f,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                return Err(HeroError::NoGraphicsContext("surface out of memory".into()));
            }
            Err(e) => return Err(HeroError::Surface(e.to_string())),
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("hero_encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("hero_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.hero.pipeline);
            rpass.set_bind_group(0, &self.hero.bind_group, &[]);
            rpass.draw(0..3, 0..1);
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
