use crate::core::preview::PreviewInteraction;
use crate::dom;
use crate::events::ListenerGuard;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Zoom the preview with the wheel while the pointer is over the canvas.
///
/// The listener must not be passive: it prevents the page default scroll, but
/// only for events inside the canvas bounds.
pub fn wire_preview_wheel(
    canvas: &web::HtmlCanvasElement,
    interaction: Rc<RefCell<PreviewInteraction>>,
) -> Option<ListenerGuard> {
    let window = web::window()?;
    let options = web::AddEventListenerOptions::new();
    options.set_passive(false);

    let canvas = canvas.clone();
    Some(ListenerGuard::new_with_options(
        window.as_ref(),
        "wheel",
        &options,
        move |ev: web::Event| {
            let Some(ev) = ev.dyn_ref::<web::WheelEvent>() else {
                return;
            };
            if !dom::point_in_canvas(&canvas, ev.client_x() as f64, ev.client_y() as f64) {
                return;
            }
            ev.prevent_default();
            interaction.borrow_mut().wheel(ev.delta_y() as f32);
        },
    ))
}
