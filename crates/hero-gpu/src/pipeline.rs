use hero_core::{HeroError, BLACKHOLE_WGSL, HERO_UNIFORMS_SIZE};

/// Linked program plus its typed uniform binding, created once.
pub(crate) struct HeroPipeline {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) uniform_buffer: wgpu::Buffer,
    pub(crate) bind_group: wgpu::BindGroup,
}

/// Compile the shader module and link the render pipeline.
///
/// Each step runs inside its own validation error scope so a failure is
/// reported with the driver's diagnostic instead of the uncaptured-error
/// handler.
pub(crate) async fn create_hero_pipeline(
    device: &wgpu::Device,
    color_format: wgpu::TextureFormat,
) -> Result<HeroPipeline, HeroError> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("blackhole_shader"),
        source: wgpu::ShaderSource::Wgsl(BLACKHOLE_WGSL.into()),
    });
    if let Some(err) = device.pop_error_scope().await {
        log::error!("[gpu] shader compile error: {err}");
        return Err(HeroError::ShaderCompile {
            log: err.to_string(),
        });
    }

    let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("hero_bgl"),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: wgpu::BufferSize::new(HERO_UNIFORMS_SIZE),
            },
            count: None,
        }],
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("hero_pl"),
        bind_group_layouts: &[&bgl],
        push_constant_ranges: &[],
    });

    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("hero_pipeline"),
        layout: Some(&pl),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_fullscreen"),
            buffers: &[],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState::default(),
        // Opaque single pass: no depth test, no blending.
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_blackhole"),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    });
    if let Some(err) = device.pop_error_scope().await {
        log::error!("[gpu] pipeline link error: {err}");
        return Err(HeroError::ProgramLink {
            log: err.to_string(),
        });
    }

    let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("hero_uniforms"),
        size: HERO_UNIFORMS_SIZE,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("hero_bg"),
        layout: &bgl,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: uniform_buffer.as_entire_binding(),
        }],
    });

    Ok(HeroPipeline {
        pipeline,
        uniform_buffer,
        bind_group,
    })
}
