use crate::core::camera;
use crate::core::cursor::CursorState;
use crate::core::particles;
use crate::constants::{FIELD_CAMERA_Z, FIELD_FOV_Y_DEG};
use crate::dom;
use crate::events::{self, ListenerGuard};
use crate::frame::RafLoop;
use crate::render::FieldGpu;
use glam::Vec2;
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

struct FieldInner {
    canvas: web::HtmlCanvasElement,
    gpu: RefCell<Option<FieldGpu>>,
    cursor: Rc<RefCell<CursorState>>,
    started: Instant,
    disposed: Cell<bool>,
    raf: RefCell<Option<RafLoop>>,
    listeners: RefCell<Vec<ListenerGuard>>,
}

/// Ambient firefly backdrop behind the hero section.
///
/// Owns its canvas's GPU context and render loop. Mounting never throws: if
/// no WebGPU context can be acquired the field stays dark and the page keeps
/// working. `unmount` is idempotent and must run on every teardown path.
#[wasm_bindgen]
pub struct ParticleField {
    inner: Rc<FieldInner>,
}

#[wasm_bindgen]
impl ParticleField {
    /// Mount onto `canvas`. `accent` is a `#RRGGBB` color; anything else
    /// falls back to the default accent.
    #[wasm_bindgen(constructor)]
    pub fn mount(canvas: web::HtmlCanvasElement, accent: Option<String>) -> ParticleField {
        dom::sync_canvas_backing_size(&canvas);
        let inner = Rc::new(FieldInner {
            canvas: canvas.clone(),
            gpu: RefCell::new(None),
            cursor: Rc::new(RefCell::new(CursorState::new())),
            started: Instant::now(),
            disposed: Cell::new(false),
            raf: RefCell::new(None),
            listeners: RefCell::new(Vec::new()),
        });

        // Pointer tracking and backing-size sync live for the mount's lifetime
        {
            let mut listeners = inner.listeners.borrow_mut();
            if let Some(guard) = events::wire_field_pointer(&canvas, inner.cursor.clone()) {
                listeners.push(guard);
            }
            if let Some(window) = web::window() {
                let canvas_resize = canvas.clone();
                listeners.push(ListenerGuard::new(window.as_ref(), "resize", move |_| {
                    dom::sync_canvas_backing_size(&canvas_resize);
                }));
            }
        }

        // GPU init is async; the loop renders nothing until it lands, and a
        // failure leaves the field in its degraded no-op mode
        {
            let inner_init = inner.clone();
            let accent = particles::parse_accent(accent.as_deref().unwrap_or(""));
            spawn_local(async move {
                match FieldGpu::new(&inner_init.canvas, accent).await {
                    Ok(gpu) => {
                        if inner_init.disposed.get() {
                            return;
                        }
                        log::info!("particle field ready ({} particles)", gpu.particle_count());
                        *inner_init.gpu.borrow_mut() = Some(gpu);
                    }
                    Err(e) => {
                        log::warn!("particle field degraded, no GPU context: {:?}", e);
                    }
                }
            });
        }

        let inner_tick = inner.clone();
        *inner.raf.borrow_mut() = Some(RafLoop::start(move || {
            inner_tick.cursor.borrow_mut().step();
            let t = inner_tick.started.elapsed().as_secs_f32();
            if let Some(gpu) = inner_tick.gpu.borrow_mut().as_mut() {
                gpu.resize_if_needed(inner_tick.canvas.width(), inner_tick.canvas.height());
                if let Err(e) = gpu.render(t, &inner_tick.cursor.borrow()) {
                    log::error!("field render error: {:?}", e);
                }
            }
        }));

        ParticleField { inner }
    }

    /// Recompute backing size and projection for a new CSS size. Safe to
    /// call redundantly.
    pub fn resize(&self, _width: f64, _height: f64) {
        dom::sync_canvas_backing_size(&self.inner.canvas);
    }

    /// Feed a raw cursor position in normalized device coordinates.
    #[wasm_bindgen(js_name = setCursor)]
    pub fn set_cursor(&self, ndc_x: f32, ndc_y: f32) {
        let aspect =
            self.inner.canvas.width().max(1) as f32 / self.inner.canvas.height().max(1) as f32;
        let world = camera::ndc_to_plane(ndc_x, ndc_y, aspect, FIELD_FOV_Y_DEG, FIELD_CAMERA_Z);
        self.inner
            .cursor
            .borrow_mut()
            .set_target(Vec2::new(ndc_x, ndc_y), world);
    }

    /// Pointer left the tracked region: drift back to neutral instead of
    /// freezing the last target.
    #[wasm_bindgen(js_name = clearCursor)]
    pub fn clear_cursor(&self) {
        self.inner.cursor.borrow_mut().clear();
    }

    /// Stop the render loop, detach listeners, and release the GPU context.
    /// Idempotent; required on every exit path.
    pub fn unmount(&self) {
        if self.inner.disposed.replace(true) {
            return;
        }
        if let Some(raf) = self.inner.raf.borrow_mut().take() {
            raf.cancel();
        }
        self.inner.listeners.borrow_mut().clear();
        self.inner.gpu.borrow_mut().take();
        log::info!("particle field unmounted");
    }
}
