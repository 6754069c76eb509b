//! Optional on-page tuning panel: a quality select and five sliders.

use crate::events::EventListener;
use hero_core::constants::{
    BEAM_RANGE, DISK_INNER_RANGE, DISK_OUTER_RANGE, LENS_RANGE, SPEED_RANGE,
};
use hero_core::{QualityPreset, RenderConfig};
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

const PANEL_CSS: &str = "position:absolute;right:12px;bottom:12px;z-index:5;\
font:12px system-ui,Segoe UI,Roboto,Arial;color:#cbd5e1;background:#0b1220cc;\
border:1px solid #ffffff22;border-radius:10px;padding:8px 10px;backdrop-filter:blur(8px)";

const PANEL_STYLE: &str = "<style>\
.bhc-row{display:flex;align-items:center;gap:6px;margin:6px 0}\
.bhc-row label{min-width:88px;color:#9fb0c6}\
.bhc-row input[type=range]{width:130px}\
.bhc-row select,.bhc-row input{background:#0f1629;border:1px solid #ffffff22;color:#e7eaf0;border-radius:6px;padding:3px 6px}\
</style>";

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Control {
    Quality(QualityPreset),
    BeamStrength(f32),
    LensStrength(f32),
    SwirlSpeed(f32),
    DiskInner(f32),
    DiskOuter(f32),
}

struct Slider {
    key: &'static str,
    label: &'static str,
    range: (f32, f32),
    value: f32,
    make: fn(f32) -> Control,
}

fn sliders(config: &RenderConfig) -> [Slider; 5] {
    let t = &config.tunables;
    [
        Slider {
            key: "beam",
            label: "Beaming",
            range: BEAM_RANGE,
            value: t.beam_strength,
            make: Control::BeamStrength,
        },
        Slider {
            key: "lens",
            label: "Lensing",
            range: LENS_RANGE,
            value: t.lens_strength,
            make: Control::LensStrength,
        },
        Slider {
            key: "speed",
            label: "Speed",
            range: SPEED_RANGE,
            value: t.swirl_speed,
            make: Control::SwirlSpeed,
        },
        Slider {
            key: "in",
            label: "Disk In",
            range: DISK_INNER_RANGE,
            value: t.disk_inner,
            make: Control::DiskInner,
        },
        Slider {
            key: "out",
            label: "Disk Out",
            range: DISK_OUTER_RANGE,
            value: t.disk_outer,
            make: Control::DiskOuter,
        },
    ]
}

fn panel_html(config: &RenderConfig) -> String {
    let mut html = String::from(PANEL_STYLE);
    html.push_str(
        "<div class=\"bhc-row\"><label>Quality</label><select data-bhc=\"quality\">\
         <option>low</option><option>auto</option><option>high</option></select></div>",
    );
    for s in sliders(config) {
        html.push_str(&format!(
            "<div class=\"bhc-row\"><label>{}</label><input data-bhc=\"{}\" type=\"range\" \
             min=\"{}\" max=\"{}\" step=\"0.01\" value=\"{}\"></div>",
            s.label, s.key, s.range.0, s.range.1, s.value
        ));
    }
    html
}

fn find<T: JsCast>(panel: &web::HtmlElement, key: &str) -> Result<T, JsValue> {
    panel
        .query_selector(&format!("[data-bhc=\"{key}\"]"))?
        .ok_or_else(|| JsValue::from_str(&format!("controls panel is missing {key}")))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("controls panel {key} has the wrong type")))
}

/// Panel element plus its listeners; dropping it removes both.
pub struct ControlsPanel {
    element: web::HtmlElement,
    _listeners: Vec<EventListener>,
}

impl ControlsPanel {
    pub fn build(
        document: &web::Document,
        container: &web::HtmlElement,
        config: &RenderConfig,
        on_change: impl Fn(Control) + 'static,
    ) -> Result<Self, JsValue> {
        let element: web::HtmlElement = document.create_element("div")?.dyn_into()?;
        element.style().set_css_text(PANEL_CSS);
        element.set_attribute("role", "region")?;
        element.set_attribute("aria-label", "Black hole controls")?;
        element.set_inner_html(&panel_html(config));

        let on_change = Rc::new(on_change);
        let mut listeners = Vec::with_capacity(6);

        let select: web::HtmlSelectElement = find(&element, "quality")?;
        select.set_value(config.quality.unwrap_or_default().as_str());
        {
            let on_change = on_change.clone();
            let sel = select.clone();
            listeners.push(EventListener::new(&select, "change", move |_| {
                match sel.value().parse::<QualityPreset>() {
                    Ok(preset) => on_change(Control::Quality(preset)),
                    Err(e) => log::warn!("[hero] {e}"),
                }
            })?);
        }

        for s in sliders(config) {
            let input: web::HtmlInputElement = find(&element, s.key)?;
            let on_change = on_change.clone();
            let inp = input.clone();
            let make = s.make;
            listeners.push(EventListener::new(&input, "input", move |_| {
                let v = inp.value_as_number();
                if v.is_finite() {
                    on_change(make(v as f32));
                }
            })?);
        }

        container.append_child(&element)?;
        Ok(Self {
            element,
            _listeners: listeners,
        })
    }
}

impl Drop for ControlsPanel {
    fn drop(&mut self) {
        self.element.remove();
    }
}
