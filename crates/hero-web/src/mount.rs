use crate::controls::{Control, ControlsPanel};
use crate::dom;
use crate::events::{EventListener, ViewportObserver};
use crate::frame::FrameLoop;
use hero_core::constants::VIEWPORT_INTERSECTION_THRESHOLD;
use hero_core::{
    BackingSize, DeviceHints, Hero, HeroError, HeroUniforms, LoopAction, MotionPolicy, MountPlan,
    RenderConfig, Renderer,
};
use hero_gpu::GpuRenderer;
use instant::Instant;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

/// GPU renderer that also keeps the canvas element's backing size in step.
pub struct CanvasRenderer {
    canvas: web::HtmlCanvasElement,
    gpu: GpuRenderer,
}

impl Renderer for CanvasRenderer {
    fn resize(&mut self, size: BackingSize) {
        dom::apply_backing_size(&self.canvas, size);
        self.gpu.resize(size);
    }

    fn draw(&mut self, uniforms: &HeroUniforms) -> Result<(), HeroError> {
        self.gpu.draw(uniforms)
    }
}

async fn init_gpu(
    canvas: web::HtmlCanvasElement,
    size: BackingSize,
) -> Result<CanvasRenderer, HeroError> {
    // WebGPU when the browser really provides it, WebGL2 otherwise.
    let instance =
        wgpu::util::new_instance_with_webgpu_detection(&wgpu::InstanceDescriptor::default()).await;
    let surface = instance
        .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
        .map_err(|e| HeroError::NoGraphicsContext(e.to_string()))?;
    let gpu = GpuRenderer::new(&instance, surface, size).await?;
    Ok(CanvasRenderer { canvas, gpu })
}

/// Everything one mounted hero owns on the page.
pub struct Mounted {
    hero: RefCell<Hero<CanvasRenderer>>,
    hints: DeviceHints,
    window: web::Window,
    document: web::Document,
    container: web::HtmlElement,
    canvas: RefCell<Option<web::HtmlCanvasElement>>,
    panel: RefCell<Option<ControlsPanel>>,
    listeners: RefCell<Vec<EventListener>>,
    observer: RefCell<Option<ViewportObserver>>,
    frames: FrameLoop,
}

impl Mounted {
    pub fn mount(selector: &str, config: RenderConfig) -> Result<Rc<Self>, HeroError> {
        let (window, document) = dom::window_document()
            .ok_or_else(|| HeroError::NoGraphicsContext("no window/document".into()))?;
        let container = dom::find_container(&document, selector)?;
        let hints = dom::device_hints(&window);
        let motion = MotionPolicy {
            prefers_reduced_motion: dom::prefers_reduced_motion(&window),
            force_motion: config.force_motion,
            query_override: dom::query_motion_override(&window),
        };

        let controls = config.controls;
        let mut hero = Hero::new(config, hints)?;
        let plan = hero.plan_mount(&motion);
        let mounted = Rc::new(Self {
            hero: RefCell::new(hero),
            hints,
            frames: FrameLoop::new(window.clone()),
            window,
            document,
            container,
            canvas: RefCell::new(None),
            panel: RefCell::new(None),
            listeners: RefCell::new(Vec::new()),
            observer: RefCell::new(None),
        });
        if plan == MountPlan::StaticFallback {
            return Ok(mounted);
        }

        dom::ensure_container_height(&mounted.container, mounted.hero.borrow().config());
        let canvas = dom::create_canvas(&mounted.document, &mounted.container)
            .map_err(|e| HeroError::NoGraphicsContext(format!("canvas: {:?}", e)))?;
        let metrics = dom::container_metrics(&mounted.window, &mounted.container);
        let size = mounted.hero.borrow_mut().initial_size(metrics);
        dom::apply_backing_size(&canvas, size);
        *mounted.canvas.borrow_mut() = Some(canvas.clone());

        if let Err(e) = mounted.install() {
            mounted.teardown();
            return Err(HeroError::NoGraphicsContext(format!("listeners: {:?}", e)));
        }

        let weak = Rc::downgrade(&mounted);
        spawn_local(async move {
            let result = init_gpu(canvas, size).await;
            if let Some(m) = weak.upgrade() {
                m.finish_mount(result, controls);
            }
        });
        Ok(mounted)
    }

    fn install(self: &Rc<Self>) -> Result<(), JsValue> {
        let weak = Rc::downgrade(self);
        let frame_weak = weak.clone();
        self.frames.set_callback(Closure::wrap(Box::new(move |_ts: f64| {
            on_animation_frame(&frame_weak);
        }) as Box<dyn FnMut(f64)>));

        let win: &web::EventTarget = &self.window;
        let doc: &web::EventTarget = &self.document;
        let mut listeners = Vec::with_capacity(4);

        let w = weak.clone();
        listeners.push(EventListener::new(win, "resize", move |_| {
            if let Some(m) = w.upgrade() {
                let metrics = dom::container_metrics(&m.window, &m.container);
                m.hero.borrow_mut().set_container_metrics(metrics);
            }
        })?);

        let w = weak.clone();
        listeners.push(EventListener::passive(win, "pointermove", move |ev| {
            let (Some(m), Some(pe)) = (w.upgrade(), ev.dyn_ref::<web::PointerEvent>()) else {
                return;
            };
            m.pointer_at(pe.client_x() as f32, pe.client_y() as f32);
        })?);

        let w = weak.clone();
        listeners.push(EventListener::passive(win, "touchmove", move |ev| {
            let (Some(m), Some(te)) = (w.upgrade(), ev.dyn_ref::<web::TouchEvent>()) else {
                return;
            };
            if let Some(t) = te.touches().get(0) {
                m.pointer_at(t.client_x() as f32, t.client_y() as f32);
            }
        })?);

        let w = weak.clone();
        listeners.push(EventListener::new(doc, "visibilitychange", move |_| {
            if let Some(m) = w.upgrade() {
                let visible = !m.document.hidden();
                let action = m.hero.borrow_mut().set_page_visible(visible, Instant::now());
                m.apply(action);
            }
        })?);
        *self.listeners.borrow_mut() = listeners;

        let w = weak;
        let observer = ViewportObserver::observe(
            &self.container,
            VIEWPORT_INTERSECTION_THRESHOLD,
            move |intersecting| {
                if let Some(m) = w.upgrade() {
                    let action = m
                        .hero
                        .borrow_mut()
                        .set_in_viewport(intersecting, Instant::now());
                    m.apply(action);
                }
            },
        )?;
        *self.observer.borrow_mut() = Some(observer);

        if self.document.hidden() {
            self.hero.borrow_mut().set_page_visible(false, Instant::now());
        }

        Ok(())
    }

    fn build_controls(self: &Rc<Self>) -> Result<(), JsValue> {
        let w = Rc::downgrade(self);
        let panel = ControlsPanel::build(
            &self.document,
            &self.container,
            self.hero.borrow().config(),
            move |control| {
                if let Some(m) = w.upgrade() {
                    m.apply_control(control);
                }
            },
        )?;
        *self.panel.borrow_mut() = Some(panel);
        Ok(())
    }

    fn finish_mount(self: &Rc<Self>, result: Result<CanvasRenderer, HeroError>, controls: bool) {
        if self.hero.borrow().is_disposed() {
            log::info!("[hero] disposed before the GPU was ready");
            return;
        }
        match result {
            Ok(renderer) => {
                let attached = self.hero.borrow_mut().attach(renderer, Instant::now());
                match attached {
                    Ok(t) => {
                        log::info!("[hero] mounted, loop {:?}", t.to);
                        self.apply(t.action);
                        if controls {
                            if let Err(e) = self.build_controls() {
                                log::warn!("[hero] controls panel unavailable: {:?}", e);
                            }
                        }
                    }
                    Err(e) => log::warn!("[hero] attach failed: {e}"),
                }
            }
            Err(e) => {
                self.hero.borrow_mut().fail_mount(&e);
                self.teardown();
            }
        }
    }

    fn pointer_at(&self, x: f32, y: f32) {
        let (w, h) = dom::window_size(&self.window);
        self.hero.borrow_mut().pointer_moved(x, y, w, h);
    }

    fn apply(&self, action: LoopAction) {
        match action {
            LoopAction::ScheduleFirstFrame | LoopAction::ResumeScheduling => self.frames.schedule(),
            LoopAction::StopScheduling | LoopAction::CancelAll => self.frames.cancel(),
            LoopAction::None => {}
        }
    }

    pub fn apply_control(&self, control: Control) {
        let mut hero = self.hero.borrow_mut();
        let result = match control {
            Control::Quality(preset) => {
                hero.set_quality(preset, &self.hints);
                Ok(())
            }
            Control::BeamStrength(v) => hero.set_beam_strength(v),
            Control::LensStrength(v) => hero.set_lens_strength(v),
            Control::SwirlSpeed(v) => hero.set_swirl_speed(v),
            Control::DiskInner(v) => hero.set_disk_inner(v),
            Control::DiskOuter(v) => hero.set_disk_outer(v),
        };
        if let Err(e) = result {
            log::warn!("[hero] control ignored: {e}");
        }
    }

    pub fn hero(&self) -> &RefCell<Hero<CanvasRenderer>> {
        &self.hero
    }

    pub fn hints(&self) -> &DeviceHints {
        &self.hints
    }

    /// Stop for good and remove everything this hero added to the page.
    pub fn teardown(&self) {
        self.hero.borrow_mut().dispose();
        self.frames.release();
        self.listeners.borrow_mut().clear();
        self.observer.borrow_mut().take();
        self.panel.borrow_mut().take();
        if let Some(canvas) = self.canvas.borrow_mut().take() {
            canvas.remove();
        }
    }
}

fn on_animation_frame(weak: &Weak<Mounted>) {
    let Some(m) = weak.upgrade() else {
        return;
    };
    m.frames.begin_frame();
    let result = m.hero.borrow_mut().frame(Instant::now());
    match result {
        Ok(Some(_)) => {
            if m.hero.borrow().is_running() {
                m.frames.schedule();
            }
        }
        Ok(None) => {}
        Err(e) => {
            log::error!("[hero] render loop stopped: {e}");
            // The callback closure is still on the stack; drop it afterwards.
            spawn_local(async move { m.teardown() });
        }
    }
}
