use hero_core::{
    motion_override_from_query, BackingSize, ContainerMetrics, DeviceHints, HeroError,
    RenderConfig,
};
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

#[inline]
pub fn window_document() -> Option<(web::Window, web::Document)> {
    let window = web::window()?;
    let document = window.document()?;
    Some((window, document))
}

pub fn find_container(document: &web::Document, selector: &str) -> Result<web::HtmlElement, HeroError> {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
        .ok_or_else(|| HeroError::ContainerNotFound(selector.to_string()))
}

pub fn prefers_reduced_motion(window: &web::Window) -> bool {
    matches!(
        window.match_media("(prefers-reduced-motion: reduce)"),
        Ok(Some(mql)) if mql.matches()
    )
}

/// `?motion=on` in the page URL forces the animation.
pub fn query_motion_override(window: &web::Window) -> bool {
    window
        .location()
        .search()
        .map(|s| motion_override_from_query(&s))
        .unwrap_or(false)
}

pub fn device_hints(window: &web::Window) -> DeviceHints {
    let navigator = window.navigator();
    // deviceMemory is Chromium-only and missing from web-sys
    let memory_gb = js_sys::Reflect::get(&navigator, &JsValue::from_str("deviceMemory"))
        .ok()
        .and_then(|v| v.as_f64())
        .filter(|m| *m > 0.0)
        .map(|m| m as f32);
    let cores = Some(navigator.hardware_concurrency())
        .filter(|c| *c >= 1.0)
        .map(|c| c as u32);
    DeviceHints { memory_gb, cores }
}

/// Give the container a height unless the page already set one inline.
pub fn ensure_container_height(container: &web::HtmlElement, config: &RenderConfig) {
    let style = container.style();
    let has_height = style
        .get_property_value("height")
        .map(|h| !h.is_empty())
        .unwrap_or(false);
    if !has_height {
        let _ = style.set_property("height", &config.container_height_css());
        let _ = style.set_property("min-height", &config.container_min_height_css());
    }
}

pub fn create_canvas(
    document: &web::Document,
    container: &web::HtmlElement,
) -> Result<web::HtmlCanvasElement, JsValue> {
    let canvas: web::HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
    canvas.set_attribute("aria-hidden", "true")?;
    let style = canvas.style();
    style.set_property("position", "absolute")?;
    style.set_property("inset", "0")?;
    style.set_property("width", "100%")?;
    style.set_property("height", "100%")?;
    container.append_child(&canvas)?;
    Ok(canvas)
}

pub fn container_metrics(window: &web::Window, container: &web::HtmlElement) -> ContainerMetrics {
    ContainerMetrics::new(
        container.client_width() as f64,
        container.client_height() as f64,
        window.device_pixel_ratio(),
    )
}

pub fn apply_backing_size(canvas: &web::HtmlCanvasElement, size: BackingSize) {
    if canvas.width() != size.width {
        canvas.set_width(size.width);
    }
    if canvas.height() != size.height {
        canvas.set_height(size.height);
    }
}

/// Window size used to normalize pointer positions.
pub fn window_size(window: &web::Window) -> (f32, f32) {
    let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (w as f32, h as f32)
}
