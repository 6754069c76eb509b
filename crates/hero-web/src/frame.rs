use std::cell::{Cell, RefCell};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// `requestAnimationFrame` scheduling with at most one request in flight.
pub struct FrameLoop {
    window: web::Window,
    callback: RefCell<Option<Closure<dyn FnMut(f64)>>>,
    request_id: Cell<Option<i32>>,
}

impl FrameLoop {
    pub fn new(window: web::Window) -> Self {
        Self {
            window,
            callback: RefCell::new(None),
            request_id: Cell::new(None),
        }
    }

    pub fn set_callback(&self, callback: Closure<dyn FnMut(f64)>) {
        *self.callback.borrow_mut() = Some(callback);
    }

    pub fn schedule(&self) {
        if self.request_id.get().is_some() {
            return;
        }
        let callback = self.callback.borrow();
        let Some(cb) = callback.as_ref() else {
            return;
        };
        match self
            .window
            .request_animation_frame(cb.as_ref().unchecked_ref())
        {
            Ok(id) => self.request_id.set(Some(id)),
            Err(e) => log::warn!("[hero] requestAnimationFrame failed: {:?}", e),
        }
    }

    /// Called first thing in the callback: the request it answers is spent.
    pub fn begin_frame(&self) {
        self.request_id.set(None);
    }

    pub fn cancel(&self) {
        if let Some(id) = self.request_id.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
    }

    /// Cancel and drop the callback. Must not run from inside the callback.
    pub fn release(&self) {
        self.cancel();
        self.callback.borrow_mut().take();
    }
}
