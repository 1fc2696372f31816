use crate::constants::MAX_PIXEL_RATIO;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Device pixel ratio clamped to the shared cap.
#[inline]
pub fn clamped_pixel_ratio() -> f64 {
    web::window()
        .map(|w| w.device_pixel_ratio())
        .unwrap_or(1.0)
        .min(MAX_PIXEL_RATIO)
}

/// Keep the canvas backing store in sync with its CSS size times the clamped
/// device pixel ratio. Safe to call redundantly.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    let dpr = clamped_pixel_ratio();
    let rect = canvas.get_bounding_client_rect();
    let w_px = (rect.width().max(1.0) * dpr) as u32;
    let h_px = (rect.height().max(1.0) * dpr) as u32;
    if canvas.width() != w_px.max(1) {
        canvas.set_width(w_px.max(1));
    }
    if canvas.height() != h_px.max(1) {
        canvas.set_height(h_px.max(1));
    }
}

/// Evaluate a media query once; absent facilities read as "no match".
pub fn media_matches(query: &str) -> bool {
    web::window()
        .and_then(|w| w.match_media(query).ok().flatten())
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

/// Whether a client-space point falls within the canvas bounds.
pub fn point_in_canvas(canvas: &web::HtmlCanvasElement, client_x: f64, client_y: f64) -> bool {
    let rect = canvas.get_bounding_client_rect();
    client_x >= rect.left()
        && client_x <= rect.right()
        && client_y >= rect.top()
        && client_y <= rect.bottom()
}

/// Client coordinates to NDC within the canvas (y up).
pub fn client_to_ndc(canvas: &web::HtmlCanvasElement, client_x: f64, client_y: f64) -> (f32, f32) {
    let rect = canvas.get_bounding_client_rect();
    let w = rect.width().max(1.0);
    let h = rect.height().max(1.0);
    let nx = ((client_x - rect.left()) / w) * 2.0 - 1.0;
    let ny = -(((client_y - rect.top()) / h) * 2.0 - 1.0);
    (nx as f32, ny as f32)
}

/// Collect every element carrying `attr` in document order.
pub fn elements_with_attribute(document: &web::Document, attr: &str) -> Vec<web::Element> {
    let selector = format!("[{}]", attr);
    let mut out = Vec::new();
    if let Ok(list) = document.query_selector_all(&selector) {
        for i in 0..list.length() {
            if let Some(node) = list.item(i) {
                if let Ok(el) = node.dyn_into::<web::Element>() {
                    out.push(el);
                }
            }
        }
    }
    out
}

pub fn set_css_var(el: &web::Element, name: &str, value: &str) {
    if let Some(html) = el.dyn_ref::<web::HtmlElement>() {
        _ = html.style().set_property(name, value);
    }
}

pub fn remove_css_var(el: &web::Element, name: &str) {
    if let Some(html) = el.dyn_ref::<web::HtmlElement>() {
        _ = html.style().remove_property(name);
    }
}
