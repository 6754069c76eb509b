//! Frame driver tying the hero's components together.
//!
//! One [`Hero`] per mounted widget; every piece of mutable state lives in
//! it, so independent heroes never share anything. Platform code forwards
//! events into the setters and calls [`Hero::frame`] from its animation
//! callback while [`Hero::is_running`] holds.

use crate::clock::FrameClock;
use crate::config::{DeviceHints, MotionPolicy, QualityPreset, RenderConfig, ShaderTunables};
use crate::error::{ConfigError, HeroError};
use crate::input::InputSmoother;
use crate::lifecycle::{LifecycleController, LifecycleEvent, LoopAction, RenderLoopState, Transition};
use crate::quality::{AdaptiveQualityController, QualityTuning};
use crate::render::Renderer;
use crate::surface::{BackingSize, ContainerMetrics, SurfaceManager};
use crate::uniforms::HeroUniforms;
use glam::Vec2;
use instant::Instant;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MountPlan {
    Animate,
    /// Reduced motion: no canvas, no graphics context.
    StaticFallback,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameReport {
    pub delta: Duration,
    pub pointer: Vec2,
    pub resized: Option<BackingSize>,
    pub cap_drop: Option<f32>,
}

pub struct Hero<R> {
    config: RenderConfig,
    tunables: ShaderTunables,
    surface: SurfaceManager,
    smoother: InputSmoother,
    quality: AdaptiveQualityController,
    lifecycle: LifecycleController,
    clock: FrameClock,
    metrics: Option<ContainerMetrics>,
    resize_pending: bool,
    renderer: Option<R>,
}

impl<R: Renderer> Hero<R> {
    pub fn new(config: RenderConfig, hints: DeviceHints) -> Result<Self, HeroError> {
        Self::with_quality_tuning(config, hints, QualityTuning::default())
    }

    pub fn with_quality_tuning(
        config: RenderConfig,
        hints: DeviceHints,
        tuning: QualityTuning,
    ) -> Result<Self, HeroError> {
        config.validate()?;
        let cap = match config.quality {
            Some(preset) => preset.resolve_cap(config.pixel_ratio_cap, &hints),
            None => config.pixel_ratio_cap,
        };
        log::info!(
            "[hero] {} cap={:.2} quality={}",
            config.selector,
            cap,
            config.quality.map_or("fixed", QualityPreset::as_str)
        );
        Ok(Self {
            tunables: config.tunables,
            smoother: InputSmoother::new(config.tunables.sensitivity),
            quality: AdaptiveQualityController::with_tuning(cap, tuning),
            surface: SurfaceManager::new(),
            lifecycle: LifecycleController::new(),
            clock: FrameClock::new(),
            metrics: None,
            resize_pending: false,
            renderer: None,
            config,
        })
    }

    /// Decide once whether to animate. Reduced motion pins the loop in `Stopped`.
    pub fn plan_mount(&mut self, motion: &MotionPolicy) -> MountPlan {
        if motion.allows_motion() {
            MountPlan::Animate
        } else {
            self.lifecycle
                .handle(LifecycleEvent::Mount { motion_allowed: false });
            MountPlan::StaticFallback
        }
    }

    /// Size the backing buffer before the renderer exists.
    pub fn initial_size(&mut self, metrics: ContainerMetrics) -> BackingSize {
        self.metrics = Some(metrics);
        self.resize_pending = false;
        self.surface.resize(&metrics, self.quality.cap()).size
    }

    /// Hand over a ready renderer and start the loop.
    pub fn attach(&mut self, renderer: R, now: Instant) -> Result<Transition, HeroError> {
        if self.renderer.is_some() || self.lifecycle.is_disposed() {
            return Err(HeroError::AlreadyMounted);
        }
        self.renderer = Some(renderer);
        self.clock.start(now);
        Ok(self
            .lifecycle
            .handle(LifecycleEvent::Mount { motion_allowed: true }))
    }

    /// Record a fatal mount failure; the hero stays stopped for good.
    pub fn fail_mount(&mut self, err: &HeroError) {
        log::error!("[hero] mount aborted, keeping static fallback: {err}");
        self.renderer = None;
        self.lifecycle.handle(LifecycleEvent::Dispose);
    }

    /// Synchronous mount for platforms that can build the renderer inline.
    pub fn mount_with<F>(
        &mut self,
        motion: &MotionPolicy,
        metrics: ContainerMetrics,
        now: Instant,
        make_renderer: F,
    ) -> Result<MountPlan, HeroError>
    where
        F: FnOnce(BackingSize) -> Result<R, HeroError>,
    {
        if self.plan_mount(motion) == MountPlan::StaticFallback {
            return Ok(MountPlan::StaticFallback);
        }
        let size = self.initial_size(metrics);
        let renderer = match make_renderer(size) {
            Ok(r) => r,
            Err(e) => {
                self.fail_mount(&e);
                return Err(e);
            }
        };
        self.attach(renderer, now)?;
        Ok(MountPlan::Animate)
    }

    /// Run one frame: smoothing, pending resize, draw, quality observation.
    ///
    /// Returns `Ok(None)` when the loop is not running.
    pub fn frame(&mut self, now: Instant) -> Result<Option<FrameReport>, HeroError> {
        if !self.lifecycle.is_running() {
            return Ok(None);
        }
        let Some(renderer) = self.renderer.as_mut() else {
            return Ok(None);
        };
        let delta = self.clock.tick(now);
        let pointer = self.smoother.tick();

        let mut resized = None;
        if self.resize_pending {
            self.resize_pending = false;
            if let Some(metrics) = self.metrics {
                let r = self.surface.resize(&metrics, self.quality.cap());
                if r.reallocated {
                    renderer.resize(r.size);
                    resized = Some(r.size);
                }
            }
        }

        let uniforms = build_uniforms(
            self.surface.size(),
            pointer,
            self.config.accent.0,
            self.clock.elapsed(),
            &self.tunables,
        );
        if let Err(e) = renderer.draw(&uniforms) {
            if e.is_fatal() {
                return Err(e);
            }
            log::warn!("[hero] frame skipped: {e}");
        }

        let cap_drop = self.quality.observe(delta.as_secs_f32());
        if cap_drop.is_some() {
            self.resize_pending = true;
        }
        Ok(Some(FrameReport {
            delta,
            pointer,
            resized,
            cap_drop,
        }))
    }

    pub fn set_container_metrics(&mut self, metrics: ContainerMetrics) {
        self.metrics = Some(metrics);
        self.resize_pending = true;
    }

    pub fn set_pointer_target(&mut self, target: Vec2) {
        self.smoother.set_target(target);
    }

    pub fn pointer_moved(&mut self, client_x: f32, client_y: f32, window_w: f32, window_h: f32) {
        self.smoother
            .set_target_from_client(client_x, client_y, window_w, window_h);
    }

    pub fn set_page_visible(&mut self, visible: bool, now: Instant) -> LoopAction {
        let event = if visible {
            LifecycleEvent::PageVisible
        } else {
            LifecycleEvent::PageHidden
        };
        self.lifecycle_event(event, now)
    }

    pub fn set_in_viewport(&mut self, in_viewport: bool, now: Instant) -> LoopAction {
        let event = if in_viewport {
            LifecycleEvent::EnteredViewport
        } else {
            LifecycleEvent::LeftViewport
        };
        self.lifecycle_event(event, now)
    }

    fn lifecycle_event(&mut self, event: LifecycleEvent, now: Instant) -> LoopAction {
        let t = self.lifecycle.handle(event);
        if t.action == LoopAction::ResumeScheduling {
            self.clock.resume(now);
        }
        t.action
    }

    /// Tear down: the loop stops for good and the renderer is dropped.
    pub fn dispose(&mut self) -> LoopAction {
        self.renderer = None;
        self.lifecycle.handle(LifecycleEvent::Dispose).action
    }

    /// Quality selector entry point; the only path that can raise the cap.
    pub fn set_quality(&mut self, preset: QualityPreset, hints: &DeviceHints) -> f32 {
        let cap = preset.resolve_cap(self.config.pixel_ratio_cap, hints);
        self.apply_cap(cap);
        cap
    }

    pub fn set_pixel_ratio_cap(&mut self, cap: f32) -> Result<(), ConfigError> {
        if !(cap.is_finite() && cap > 0.0) {
            return Err(ConfigError::InvalidPixelRatioCap(cap));
        }
        self.apply_cap(cap);
        Ok(())
    }

    fn apply_cap(&mut self, cap: f32) {
        log::info!("[quality] pixel-ratio cap set to {:.2}", cap);
        self.quality.set_cap(cap);
        self.resize_pending = true;
    }

    pub fn set_beam_strength(&mut self, v: f32) -> Result<(), ConfigError> {
        self.tunables.set_beam_strength(v)
    }

    pub fn set_lens_strength(&mut self, v: f32) -> Result<(), ConfigError> {
        self.tunables.set_lens_strength(v)
    }

    pub fn set_swirl_speed(&mut self, v: f32) -> Result<(), ConfigError> {
        self.tunables.set_swirl_speed(v)
    }

    pub fn set_disk_inner(&mut self, v: f32) -> Result<(), ConfigError> {
        self.tunables.set_disk_inner(v)
    }

    pub fn set_disk_outer(&mut self, v: f32) -> Result<(), ConfigError> {
        self.tunables.set_disk_outer(v)
    }

    pub fn set_sensitivity(&mut self, v: f32) -> Result<(), ConfigError> {
        self.tunables.set_sensitivity(v)?;
        self.smoother.set_sensitivity(v);
        Ok(())
    }

    pub fn state(&self) -> RenderLoopState {
        self.lifecycle.state()
    }

    pub fn is_running(&self) -> bool {
        self.lifecycle.is_running()
    }

    pub fn is_disposed(&self) -> bool {
        self.lifecycle.is_disposed()
    }

    pub fn has_renderer(&self) -> bool {
        self.renderer.is_some()
    }

    pub fn renderer(&self) -> Option<&R> {
        self.renderer.as_ref()
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn tunables(&self) -> &ShaderTunables {
        &self.tunables
    }

    pub fn pixel_ratio_cap(&self) -> f32 {
        self.quality.cap()
    }

    pub fn quality(&self) -> &AdaptiveQualityController {
        &self.quality
    }

    pub fn surface(&self) -> &SurfaceManager {
        &self.surface
    }

    pub fn backing_size(&self) -> Option<BackingSize> {
        self.surface.size()
    }

    pub fn pointer(&self) -> Vec2 {
        self.smoother.smoothed()
    }

    pub fn elapsed(&self) -> Duration {
        self.clock.elapsed()
    }
}

fn build_uniforms(
    size: Option<BackingSize>,
    pointer: Vec2,
    accent: [f32; 3],
    elapsed: Duration,
    t: &ShaderTunables,
) -> HeroUniforms {
    HeroUniforms {
        resolution: size.map_or([1.0, 1.0], BackingSize::as_f32),
        pointer: pointer.to_array(),
        accent,
        time: elapsed.as_secs_f32(),
        beam_strength: t.beam_strength,
        lens_strength: t.lens_strength,
        swirl_speed: t.swirl_speed,
        disk_inner: t.disk_inner,
        disk_outer: t.disk_outer,
        _pad: [0.0; 3],
    }
}
