use std::env;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use hero_core::{
    Accent, ContainerMetrics, DeviceHints, Hero, MotionPolicy, MountPlan, QualityPreset,
    RenderConfig,
};
use hero_gpu::GpuRenderer;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, Event, KeyEvent, WindowEvent};
use winit::event_loop::EventLoop;
use winit::keyboard::Key;
use winit::window::{Window, WindowBuilder};

fn env_flag(name: &str) -> bool {
    matches!(
        env::var(name).as_deref(),
        Ok("1") | Ok("true") | Ok("on") | Ok("yes")
    )
}

/// HERO_ACCENT, HERO_QUALITY and HERO_FORCE_MOTION stand in for the page options.
fn config_from_env() -> RenderConfig {
    let mut config = RenderConfig {
        selector: "native-window".to_string(),
        controls: false,
        force_motion: env_flag("HERO_FORCE_MOTION"),
        ..RenderConfig::default()
    };
    if let Ok(hex) = env::var("HERO_ACCENT") {
        config.accent = Accent::from_hex_or_default(&hex);
    }
    if let Ok(q) = env::var("HERO_QUALITY") {
        match q.parse::<QualityPreset>() {
            Ok(preset) => config.quality = Some(preset),
            Err(e) => log::warn!("[hero] {e}; using auto"),
        }
    }
    config
}

fn native_hints() -> DeviceHints {
    DeviceHints {
        // no portable way to read installed memory; cores are enough to pick a preset
        memory_gb: None,
        cores: std::thread::available_parallelism()
            .ok()
            .map(|n| n.get() as u32),
    }
}

/// The window plays the container: its logical size at its scale factor.
fn window_metrics(window: &Window, size: PhysicalSize<u32>) -> ContainerMetrics {
    let scale = window.scale_factor();
    ContainerMetrics::new(
        size.width as f64 / scale,
        size.height as f64 / scale,
        scale,
    )
}

fn preset_for_key(key: &str) -> Option<QualityPreset> {
    match key {
        "1" => Some(QualityPreset::Low),
        "2" => Some(QualityPreset::Auto),
        "3" => Some(QualityPreset::High),
        _ => None,
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let config = config_from_env();
    let hints = native_hints();
    let motion = MotionPolicy {
        prefers_reduced_motion: env_flag("HERO_REDUCED_MOTION"),
        force_motion: config.force_motion,
        query_override: false,
    };
    let mut hero: Hero<GpuRenderer> = Hero::new(config, hints)?;

    let event_loop = EventLoop::new().context("event loop")?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("Black hole hero (native)")
            .with_inner_size(winit::dpi::LogicalSize::new(1200.0, 700.0))
            .build(&event_loop)
            .context("window")?,
    );

    let instance = wgpu::Instance::default();
    let surface = instance.create_surface(window.clone())?;
    let metrics = window_metrics(&window, window.inner_size());
    let plan = hero.mount_with(&motion, metrics, Instant::now(), |size| {
        pollster::block_on(GpuRenderer::new(&instance, surface, size))
    })?;
    if plan == MountPlan::StaticFallback {
        log::info!("[hero] reduced motion requested; nothing to animate");
        return Ok(());
    }
    log::info!("[hero] keys 1/2/3 select low/auto/high quality");

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::CloseRequested => {
                hero.dispose();
                elwt.exit();
            }
            WindowEvent::Resized(size) => {
                // Minimizing reports a zero size; treat it like leaving the viewport.
                let visible = size.width > 0 && size.height > 0;
                hero.set_in_viewport(visible, Instant::now());
                if visible {
                    hero.set_container_metrics(window_metrics(&window, size));
                }
            }
            WindowEvent::ScaleFactorChanged { .. } => {
                hero.set_container_metrics(window_metrics(&window, window.inner_size()));
            }
            WindowEvent::Occluded(occluded) => {
                hero.set_page_visible(!occluded, Instant::now());
            }
            WindowEvent::CursorMoved { position, .. } => {
                let size = window.inner_size();
                hero.pointer_moved(
                    position.x as f32,
                    position.y as f32,
                    size.width as f32,
                    size.height as f32,
                );
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key: Key::Character(ref ch),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                if let Some(preset) = preset_for_key(ch.as_str()) {
                    let cap = hero.set_quality(preset, &hints);
                    log::info!("[quality] {} selected, cap {:.2}", preset.as_str(), cap);
                }
            }
            WindowEvent::RedrawRequested => {
                if let Err(e) = hero.frame(Instant::now()) {
                    log::error!("[hero] render loop stopped: {e}");
                    hero.dispose();
                    elwt.exit();
                }
            }
            _ => {}
        },
        Event::AboutToWait => {
            if hero.is_running() {
                window.request_redraw();
            }
        }
        _ => {}
    })?;
    Ok(())
}
