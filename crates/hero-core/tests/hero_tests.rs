// Host-side tests for the frame driver, using a recording renderer.

use glam::Vec2;
use hero_core::{
    BackingSize, ContainerMetrics, DeviceHints, Hero, HeroError, HeroUniforms, LoopAction,
    MotionPolicy, MountPlan, QualityPreset, RenderConfig, RenderLoopState, Renderer,
};
use instant::Instant;
use std::time::Duration;

#[derive(Default)]
struct RecordingRenderer {
    size: Option<BackingSize>,
    resizes: Vec<BackingSize>,
    draws: Vec<HeroUniforms>,
}

impl Renderer for RecordingRenderer {
    fn resize(&mut self, size: BackingSize) {
        self.size = Some(size);
        self.resizes.push(size);
    }

    fn draw(&mut self, uniforms: &HeroUniforms) -> Result<(), HeroError> {
        self.draws.push(*uniforms);
        Ok(())
    }
}

fn fixed_cap_config(cap: f32) -> RenderConfig {
    RenderConfig {
        pixel_ratio_cap: cap,
        quality: None,
        ..RenderConfig::default()
    }
}

fn mounted_hero(cap: f32, metrics: ContainerMetrics, t0: Instant) -> Hero<RecordingRenderer> {
    let mut hero = Hero::new(fixed_cap_config(cap), DeviceHints::default()).unwrap();
    let plan = hero
        .mount_with(&MotionPolicy::default(), metrics, t0, |size| {
            Ok(RecordingRenderer {
                size: Some(size),
                ..RecordingRenderer::default()
            })
        })
        .unwrap();
    assert_eq!(plan, MountPlan::Animate);
    hero
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn scenario_a_mount_sizes_backing_buffer() {
    let t0 = Instant::now();
    let hero = mounted_hero(1.5, ContainerMetrics::new(800.0, 600.0, 2.0), t0);
    assert_eq!(hero.state(), RenderLoopState::Running);
    assert_eq!(
        hero.renderer().unwrap().size,
        Some(BackingSize {
            width: 1200,
            height: 900
        })
    );
}

#[test]
fn scenario_b_reduced_motion_creates_no_context() {
    let mut hero: Hero<RecordingRenderer> =
        Hero::new(RenderConfig::default(), DeviceHints::default()).unwrap();
    let motion = MotionPolicy {
        prefers_reduced_motion: true,
        ..MotionPolicy::default()
    };
    let mut contexts = 0;
    let plan = hero
        .mount_with(
            &motion,
            ContainerMetrics::new(800.0, 600.0, 1.0),
            Instant::now(),
            |_| {
                contexts += 1;
                Ok(RecordingRenderer::default())
            },
        )
        .unwrap();
    assert_eq!(plan, MountPlan::StaticFallback);
    assert_eq!(contexts, 0);
    assert!(!hero.has_renderer());
    assert_eq!(hero.state(), RenderLoopState::Stopped);
    assert!(hero.frame(Instant::now()).unwrap().is_none());
    assert_eq!(
        hero.set_page_visible(true, Instant::now()),
        LoopAction::None
    );
}

#[test]
fn scenario_c_sustained_jank_drops_cap_once_per_trip() {
    let t0 = Instant::now();
    let mut hero = mounted_hero(1.5, ContainerMetrics::new(800.0, 600.0, 2.0), t0);
    let mut drops = Vec::new();
    for frame in 1..=130u64 {
        let report = hero.frame(t0 + ms(60 * frame)).unwrap().unwrap();
        assert_eq!(report.delta, ms(60));
        if let Some(cap) = report.cap_drop {
            drops.push((frame, cap));
        }
    }
    assert_eq!(drops, vec![(90, 1.25)]);
    assert_eq!(hero.pixel_ratio_cap(), 1.25);
    assert_eq!(hero.quality().jank_count(), 40);

    // The cap drop reallocates on the following frame.
    let r = hero.renderer().unwrap();
    assert_eq!(
        r.resizes,
        vec![BackingSize {
            width: 1000,
            height: 750
        }]
    );
    assert_eq!(r.draws.len(), 130);
    assert_eq!(r.draws[90].resolution, [1000.0, 750.0]);
}

#[test]
fn mount_failure_keeps_fallback_and_stops_for_good() {
    let mut hero: Hero<RecordingRenderer> =
        Hero::new(RenderConfig::default(), DeviceHints::default()).unwrap();
    let err = hero
        .mount_with(
            &MotionPolicy::default(),
            ContainerMetrics::new(100.0, 100.0, 1.0),
            Instant::now(),
            |_| {
                Err(HeroError::ShaderCompile {
                    log: "unexpected token".into(),
                })
            },
        )
        .unwrap_err();
    assert!(err.is_fatal());
    assert!(hero.is_disposed());
    assert_eq!(hero.state(), RenderLoopState::Stopped);
    assert!(hero.frame(Instant::now()).unwrap().is_none());
}

#[test]
fn paused_interval_is_excluded_from_elapsed_time() {
    let t0 = Instant::now();
    let mut hero = mounted_hero(1.0, ContainerMetrics::new(320.0, 200.0, 1.0), t0);
    hero.frame(t0 + ms(16)).unwrap();
    assert_eq!(hero.set_page_visible(false, t0 + ms(20)), LoopAction::StopScheduling);
    assert!(hero.frame(t0 + ms(40)).unwrap().is_none());

    let back = t0 + ms(5_000);
    assert_eq!(hero.set_page_visible(true, back), LoopAction::ResumeScheduling);
    let report = hero.frame(back + ms(16)).unwrap().unwrap();
    assert_eq!(report.delta, ms(16));
    assert_eq!(hero.elapsed(), ms(32));
    assert!((hero.renderer().unwrap().draws[1].time - 0.032).abs() < 1e-6);
}

#[test]
fn leaving_viewport_pauses_like_hidden_page() {
    let t0 = Instant::now();
    let mut hero = mounted_hero(1.0, ContainerMetrics::new(320.0, 200.0, 1.0), t0);
    assert_eq!(hero.set_in_viewport(false, t0), LoopAction::StopScheduling);
    assert_eq!(hero.state(), RenderLoopState::Paused);
    assert_eq!(
        hero.set_in_viewport(true, t0 + ms(900)),
        LoopAction::ResumeScheduling
    );
    let report = hero.frame(t0 + ms(916)).unwrap().unwrap();
    assert_eq!(report.delta, ms(16));
}

#[test]
fn resize_events_only_reallocate_on_change() {
    let t0 = Instant::now();
    let m = ContainerMetrics::new(640.0, 480.0, 1.0);
    let mut hero = mounted_hero(1.5, m, t0);
    hero.set_container_metrics(m);
    let report = hero.frame(t0 + ms(16)).unwrap().unwrap();
    assert_eq!(report.resized, None);
    hero.set_container_metrics(ContainerMetrics::new(1024.0, 480.0, 1.0));
    let report = hero.frame(t0 + ms(32)).unwrap().unwrap();
    assert_eq!(
        report.resized,
        Some(BackingSize {
            width: 1024,
            height: 480
        })
    );
    assert_eq!(hero.surface().reallocations(), 2);
}

#[test]
fn pointer_and_tunables_flow_into_uniforms() {
    let t0 = Instant::now();
    let mut hero = mounted_hero(1.0, ContainerMetrics::new(200.0, 100.0, 1.0), t0);
    hero.set_sensitivity(0.5).unwrap();
    hero.pointer_moved(200.0, 0.0, 200.0, 100.0);
    hero.set_beam_strength(0.8).unwrap();
    hero.set_disk_inner(1.1).unwrap();
    hero.frame(t0 + ms(16)).unwrap();
    let u = hero.renderer().unwrap().draws[0];
    assert_eq!(u.pointer, [0.5, -0.5]);
    assert_eq!(u.beam_strength, 0.8);
    assert_eq!(u.disk_inner, 1.1);
    assert_eq!(u.resolution, [200.0, 100.0]);
    assert_eq!(hero.pointer(), Vec2::new(0.5, -0.5));
}

#[test]
fn quality_selector_can_raise_the_cap() {
    let t0 = Instant::now();
    let mut hero = mounted_hero(1.5, ContainerMetrics::new(100.0, 100.0, 3.0), t0);
    let cap = hero.set_quality(QualityPreset::High, &DeviceHints::default());
    assert_eq!(cap, 2.0);
    let report = hero.frame(t0 + ms(16)).unwrap().unwrap();
    assert_eq!(
        report.resized,
        Some(BackingSize {
            width: 200,
            height: 200
        })
    );
    assert!(hero.set_pixel_ratio_cap(-1.0).is_err());
}

#[test]
fn dispose_drops_renderer_and_stops() {
    let t0 = Instant::now();
    let mut hero = mounted_hero(1.0, ContainerMetrics::new(100.0, 100.0, 1.0), t0);
    assert_eq!(hero.dispose(), LoopAction::CancelAll);
    assert!(!hero.has_renderer());
    assert!(hero.frame(t0 + ms(16)).unwrap().is_none());
    assert_eq!(hero.set_page_visible(true, t0), LoopAction::None);
    assert!(matches!(
        hero.attach(RecordingRenderer::default(), t0),
        Err(HeroError::AlreadyMounted)
    ));
}

#[test]
fn heroes_are_independent() {
    let t0 = Instant::now();
    let mut a = mounted_hero(1.0, ContainerMetrics::new(100.0, 100.0, 1.0), t0);
    let mut b = mounted_hero(1.0, ContainerMetrics::new(100.0, 100.0, 1.0), t0);
    a.set_page_visible(false, t0);
    a.pointer_moved(0.0, 0.0, 100.0, 100.0);
    assert!(b.frame(t0 + ms(16)).unwrap().is_some());
    assert_eq!(b.pointer(), Vec2::ZERO);
    assert!(a.frame(t0 + ms(16)).unwrap().is_none());
}
