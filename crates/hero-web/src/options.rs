//! Reads the plain JS options object passed to `mount`.
//!
//! Missing keys keep their defaults. Values of the wrong type are ignored
//! with a warning; range checks happen later in `RenderConfig::validate`.

use hero_core::{Accent, QualityPreset, RenderConfig};
use js_sys::Reflect;
use wasm_bindgen::JsValue;

fn get(options: &JsValue, key: &str) -> Option<JsValue> {
    if !options.is_object() {
        return None;
    }
    Reflect::get(options, &JsValue::from_str(key))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
}

fn number(options: &JsValue, key: &str) -> Option<f32> {
    let v = get(options, key)?;
    let n = v.as_f64();
    if n.is_none() {
        log::warn!("[hero] option {key} is not a number; ignored");
    }
    n.map(|n| n as f32)
}

fn text(options: &JsValue, key: &str) -> Option<String> {
    let v = get(options, key)?;
    let s = v.as_string();
    if s.is_none() {
        log::warn!("[hero] option {key} is not a string; ignored");
    }
    s
}

fn flag(options: &JsValue, key: &str) -> Option<bool> {
    get(options, key).map(|v| v.is_truthy())
}

pub fn parse_options(selector: &str, options: &JsValue) -> RenderConfig {
    let mut config = RenderConfig::default();
    if !selector.trim().is_empty() {
        config.selector = selector.to_string();
    }
    if let Some(hex) = text(options, "accent") {
        config.accent = Accent::from_hex_or_default(&hex);
    }
    if let Some(cap) = number(options, "pixelRatioCap") {
        config.pixel_ratio_cap = cap;
    }
    if let Some(vh) = number(options, "heightVh") {
        config.height_fraction = vh / 100.0;
    }
    if let Some(force) = flag(options, "forceMotion") {
        config.force_motion = force;
    }
    if let Some(q) = text(options, "quality") {
        match q.parse::<QualityPreset>() {
            Ok(preset) => config.quality = Some(preset),
            Err(e) => log::warn!("[hero] {e}; using auto"),
        }
    }
    if let Some(controls) = flag(options, "controls") {
        config.controls = controls;
    }

    let t = &mut config.tunables;
    if let Some(v) = number(options, "beamStrength") {
        t.beam_strength = v;
    }
    if let Some(v) = number(options, "lensStrength") {
        t.lens_strength = v;
    }
    if let Some(v) = number(options, "speed") {
        t.swirl_speed = v;
    }
    if let Some(v) = number(options, "diskInner") {
        t.disk_inner = v;
    }
    if let Some(v) = number(options, "diskOuter") {
        t.disk_outer = v;
    }
    if let Some(v) = number(options, "sensitivity") {
        t.sensitivity = v;
    }
    config
}
