#![cfg(target_arch = "wasm32")]
//! Browser entry points for the black hole hero.
//!
//! ```js
//! import init, { mount } from "./hero_web.js";
//! await init();
//! const hero = mount("#bh-hero", { accent: "#64ffda", quality: "auto" });
//! // later
//! hero.dispose();
//! ```

use hero_core::{HeroError, QualityPreset, RenderLoopState};
use std::rc::Rc;
use wasm_bindgen::prelude::*;

mod controls;
mod dom;
mod events;
mod frame;
mod mount;
mod options;

use mount::Mounted;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("hero-web loaded");
    Ok(())
}

fn to_js(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Mount a hero into the element matching `selector` (default `#bh-hero`).
///
/// Fails only when the container is missing or the options are invalid.
/// Reduced motion and GPU failures leave the page's fallback in place and
/// still return a handle.
#[wasm_bindgen]
pub fn mount(selector: &str, options: JsValue) -> Result<HeroHandle, JsValue> {
    let config = options::parse_options(selector, &options);
    let selector = config.selector.clone();
    match Mounted::mount(&selector, config) {
        Ok(inner) => Ok(HeroHandle { inner }),
        Err(e) => {
            match &e {
                HeroError::ContainerNotFound(_) => log::warn!("[hero] {e}"),
                _ => log::error!("[hero] mount failed: {e}"),
            }
            let err = anyhow::Error::new(e).context(format!("mounting {selector}"));
            Err(JsValue::from_str(&format!("{err:#}")))
        }
    }
}

#[wasm_bindgen]
pub struct HeroHandle {
    inner: Rc<Mounted>,
}

#[wasm_bindgen]
impl HeroHandle {
    /// Stop the loop and remove the canvas, panel and every listener.
    pub fn dispose(&self) {
        self.inner.teardown();
    }

    /// `"low" | "auto" | "high"`; returns the resulting pixel-ratio cap.
    #[wasm_bindgen(js_name = setQuality)]
    pub fn set_quality(&self, quality: &str) -> Result<f32, JsValue> {
        let preset: QualityPreset = quality.parse().map_err(to_js)?;
        let hints = *self.inner.hints();
        Ok(self.inner.hero().borrow_mut().set_quality(preset, &hints))
    }

    #[wasm_bindgen(js_name = setPixelRatioCap)]
    pub fn set_pixel_ratio_cap(&self, cap: f32) -> Result<(), JsValue> {
        self.inner
            .hero()
            .borrow_mut()
            .set_pixel_ratio_cap(cap)
            .map_err(to_js)
    }

    #[wasm_bindgen(js_name = setBeamStrength)]
    pub fn set_beam_strength(&self, v: f32) -> Result<(), JsValue> {
        self.inner.hero().borrow_mut().set_beam_strength(v).map_err(to_js)
    }

    #[wasm_bindgen(js_name = setLensStrength)]
    pub fn set_lens_strength(&self, v: f32) -> Result<(), JsValue> {
        self.inner.hero().borrow_mut().set_lens_strength(v).map_err(to_js)
    }

    #[wasm_bindgen(js_name = setSpeed)]
    pub fn set_speed(&self, v: f32) -> Result<(), JsValue> {
        self.inner.hero().borrow_mut().set_swirl_speed(v).map_err(to_js)
    }

    #[wasm_bindgen(js_name = setDiskInner)]
    pub fn set_disk_inner(&self, v: f32) -> Result<(), JsValue> {
        self.inner.hero().borrow_mut().set_disk_inner(v).map_err(to_js)
    }

    #[wasm_bindgen(js_name = setDiskOuter)]
    pub fn set_disk_outer(&self, v: f32) -> Result<(), JsValue> {
        self.inner.hero().borrow_mut().set_disk_outer(v).map_err(to_js)
    }

    #[wasm_bindgen(js_name = setSensitivity)]
    pub fn set_sensitivity(&self, v: f32) -> Result<(), JsValue> {
        self.inner.hero().borrow_mut().set_sensitivity(v).map_err(to_js)
    }

    #[wasm_bindgen(getter, js_name = pixelRatioCap)]
    pub fn pixel_ratio_cap(&self) -> f32 {
        self.inner.hero().borrow().pixel_ratio_cap()
    }

    /// `"stopped" | "running" | "paused"`
    #[wasm_bindgen(getter)]
    pub fn state(&self) -> String {
        match self.inner.hero().borrow().state() {
            RenderLoopState::Stopped => "stopped",
            RenderLoopState::Running => "running",
            RenderLoopState::Paused => "paused",
        }
        .to_string()
    }
}
