use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// A requestAnimationFrame loop that reschedules itself until cancelled.
///
/// Every component owning a loop must cancel it on teardown; `cancel` is
/// idempotent and guards against a callback firing after teardown.
pub struct RafLoop {
    cancelled: Rc<Cell<bool>>,
    raf_id: Rc<Cell<i32>>,
    // Kept alive for the lifetime of the loop; dropped on cancel
    _tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
}

impl RafLoop {
    pub fn start(mut tick_fn: impl FnMut() + 'static) -> Self {
        let cancelled = Rc::new(Cell::new(false));
        let raf_id = Rc::new(Cell::new(0));
        let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));

        let cancelled_inner = cancelled.clone();
        let raf_id_inner = raf_id.clone();
        let tick_inner = tick.clone();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            if cancelled_inner.get() {
                return;
            }
            tick_fn();
            if cancelled_inner.get() {
                return;
            }
            if let Some(w) = web::window() {
                if let Some(cb) = tick_inner.borrow().as_ref() {
                    if let Ok(id) = w.request_animation_frame(cb.as_ref().unchecked_ref()) {
                        raf_id_inner.set(id);
                    }
                }
            }
        }) as Box<dyn FnMut()>));

        if let Some(w) = web::window() {
            if let Some(cb) = tick.borrow().as_ref() {
                if let Ok(id) = w.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    raf_id.set(id);
                }
            }
        }

        Self {
            cancelled,
            raf_id,
            _tick: tick,
        }
    }

    pub fn cancel(&self) {
        if self.cancelled.replace(true) {
            return;
        }
        if let Some(w) = web::window() {
            _ = w.cancel_animation_frame(self.raf_id.get());
        }
        self._tick.borrow_mut().take();
    }
}

impl Drop for RafLoop {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Schedule a single animation frame; returns the id for cancellation.
pub fn request_frame(cb: &Closure<dyn FnMut()>) -> Option<i32> {
    web::window()?
        .request_animation_frame(cb.as_ref().unchecked_ref())
        .ok()
}

pub fn cancel_frame(id: i32) {
    if let Some(w) = web::window() {
        _ = w.cancel_animation_frame(id);
    }
}
