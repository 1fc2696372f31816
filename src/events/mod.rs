use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

mod pointer;
mod wheel;

pub use pointer::{wire_field_pointer, wire_preview_pointer};
pub use wheel::wire_preview_wheel;

/// An event listener that removes itself when dropped.
///
/// Every listener a component attaches is held in one of these so teardown is
/// a matter of dropping the component's guard list; nothing is leaked across
/// navigations.
pub struct ListenerGuard {
    target: web::EventTarget,
    event: String,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl ListenerGuard {
    pub fn new(
        target: &web::EventTarget,
        event: &str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> Self {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        Self {
            target: target.clone(),
            event: event.to_owned(),
            closure,
        }
    }

    /// Variant for listeners that need explicit options (the preview wheel
    /// listener cannot be passive because it conditionally prevents default).
    pub fn new_with_options(
        target: &web::EventTarget,
        event: &str,
        options: &web::AddEventListenerOptions,
        handler: impl FnMut(web::Event) + 'static,
    ) -> Self {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        _ = target.add_event_listener_with_callback_and_add_event_listener_options(
            event,
            closure.as_ref().unchecked_ref(),
            options,
        );
        Self {
            target: target.clone(),
            event: event.to_owned(),
            closure,
        }
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        _ = self
            .target
            .remove_event_listener_with_callback(&self.event, self.closure.as_ref().unchecked_ref());
    }
}
