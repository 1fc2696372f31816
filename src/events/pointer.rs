use crate::constants::{FIELD_CAMERA_Z, FIELD_FOV_Y_DEG};
use crate::core::camera;
use crate::core::cursor::CursorState;
use crate::core::preview::PreviewInteraction;
use crate::dom;
use crate::events::ListenerGuard;
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Track the pointer for the particle field.
///
/// Listens on the window so the interaction still works when hero content
/// (text, buttons) sits above the canvas. Leaving the canvas bounds clears
/// the cursor target instead of freezing it.
pub fn wire_field_pointer(
    canvas: &web::HtmlCanvasElement,
    cursor: Rc<RefCell<CursorState>>,
) -> Option<ListenerGuard> {
    let window = web::window()?;
    let canvas = canvas.clone();
    Some(ListenerGuard::new(
        window.as_ref(),
        "pointermove",
        move |ev: web::Event| {
            let Some(ev) = ev.dyn_ref::<web::PointerEvent>() else {
                return;
            };
            let (cx, cy) = (ev.client_x() as f64, ev.client_y() as f64);
            if !dom::point_in_canvas(&canvas, cx, cy) {
                cursor.borrow_mut().clear();
                return;
            }
            let (nx, ny) = dom::client_to_ndc(&canvas, cx, cy);
            let aspect = canvas.width().max(1) as f32 / canvas.height().max(1) as f32;
            let world = camera::ndc_to_plane(nx, ny, aspect, FIELD_FOV_Y_DEG, FIELD_CAMERA_Z);
            cursor.borrow_mut().set_target(Vec2::new(nx, ny), world);
        },
    ))
}

/// Wire drag and hover handling for the product preview.
///
/// Move and up listen on the window so a drag that leaves the canvas still
/// tracks and releases; down only arms dragging inside the canvas bounds.
pub fn wire_preview_pointer(
    canvas: &web::HtmlCanvasElement,
    interaction: Rc<RefCell<PreviewInteraction>>,
) -> Vec<ListenerGuard> {
    let Some(window) = web::window() else {
        return Vec::new();
    };
    let mut guards = Vec::with_capacity(3);

    {
        let canvas = canvas.clone();
        let interaction = interaction.clone();
        guards.push(ListenerGuard::new(
            window.as_ref(),
            "pointerdown",
            move |ev: web::Event| {
                let Some(ev) = ev.dyn_ref::<web::PointerEvent>() else {
                    return;
                };
                let (cx, cy) = (ev.client_x() as f64, ev.client_y() as f64);
                if dom::point_in_canvas(&canvas, cx, cy) {
                    interaction.borrow_mut().pointer_down(cx as f32, cy as f32);
                }
            },
        ));
    }

    {
        let interaction = interaction.clone();
        guards.push(ListenerGuard::new(
            window.as_ref(),
            "pointerup",
            move |_ev: web::Event| {
                interaction.borrow_mut().pointer_up();
            },
        ));
    }

    {
        let canvas = canvas.clone();
        guards.push(ListenerGuard::new(
            window.as_ref(),
            "pointermove",
            move |ev: web::Event| {
                let Some(ev) = ev.dyn_ref::<web::PointerEvent>() else {
                    return;
                };
                let (cx, cy) = (ev.client_x() as f64, ev.client_y() as f64);
                let inside = dom::point_in_canvas(&canvas, cx, cy);
                let (nx, ny) = dom::client_to_ndc(&canvas, cx, cy);
                interaction.borrow_mut().pointer_move(
                    inside,
                    cx as f32,
                    cy as f32,
                    Vec2::new(nx, ny),
                );
            },
        ));
    }

    guards
}
