use crate::core::particles::parse_accent;
use crate::core::preview::PreviewInteraction;
use crate::dom;
use crate::events::{self, ListenerGuard};
use crate::frame::RafLoop;
use crate::render::CardGpu;
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

struct StageInner {
    canvas: web::HtmlCanvasElement,
    gpu: RefCell<Option<CardGpu>>,
    // Decoded image that arrived before the GPU context did
    pending_image: RefCell<Option<image::RgbaImage>>,
    interaction: Rc<RefCell<PreviewInteraction>>,
    started: Instant,
    disposed: Rc<Cell<bool>>,
    raf: RefCell<Option<RafLoop>>,
    listeners: RefCell<Vec<ListenerGuard>>,
}

/// Interactive product card preview: drag to rotate, hover to tilt, wheel to
/// zoom. One focused image asset per stage.
///
/// Same degraded-mode and teardown contract as the particle field; a texture
/// that finishes loading after `unmount` is dropped, never applied.
#[wasm_bindgen]
pub struct ProductPreviewStage {
    inner: Rc<StageInner>,
}

#[wasm_bindgen]
impl ProductPreviewStage {
    #[wasm_bindgen(constructor)]
    pub fn mount(
        canvas: web::HtmlCanvasElement,
        image_url: String,
        accent: Option<String>,
    ) -> ProductPreviewStage {
        dom::sync_canvas_backing_size(&canvas);
        let inner = Rc::new(StageInner {
            canvas: canvas.clone(),
            gpu: RefCell::new(None),
            pending_image: RefCell::new(None),
            interaction: Rc::new(RefCell::new(PreviewInteraction::new())),
            started: Instant::now(),
            disposed: Rc::new(Cell::new(false)),
            raf: RefCell::new(None),
            listeners: RefCell::new(Vec::new()),
        });

        {
            let mut listeners = inner.listeners.borrow_mut();
            listeners.extend(events::wire_preview_pointer(&canvas, inner.interaction.clone()));
            if let Some(guard) = events::wire_preview_wheel(&canvas, inner.interaction.clone()) {
                listeners.push(guard);
            }
            if let Some(window) = web::window() {
                let canvas_resize = canvas.clone();
                listeners.push(ListenerGuard::new(window.as_ref(), "resize", move |_| {
                    dom::sync_canvas_backing_size(&canvas_resize);
                }));
            }
        }

        // The texture fetch and GPU init run concurrently; whichever lands
        // second applies the image
        load_texture(inner.clone(), image_url);
        {
            let inner_init = inner.clone();
            let accent = parse_accent(accent.as_deref().unwrap_or(""));
            spawn_local(async move {
                match CardGpu::new(&inner_init.canvas, accent).await {
                    Ok(mut gpu) => {
                        if inner_init.disposed.get() {
                            return;
                        }
                        if let Some(img) = inner_init.pending_image.borrow_mut().take() {
                            let (w, h) = img.dimensions();
                            gpu.apply_texture(img.as_raw(), w, h);
                            log::info!("card texture applied ({}x{})", w, h);
                        }
                        *inner_init.gpu.borrow_mut() = Some(gpu);
                    }
                    Err(e) => {
                        log::warn!("preview stage degraded, no GPU context: {:?}", e);
                    }
                }
            });
        }

        let inner_tick = inner.clone();
        *inner.raf.borrow_mut() = Some(RafLoop::start(move || {
            inner_tick.interaction.borrow_mut().step();
            let t = inner_tick.started.elapsed().as_secs_f32();
            let (rot, zoom) = {
                let i = inner_tick.interaction.borrow();
                (i.rot, i.zoom)
            };
            if let Some(gpu) = inner_tick.gpu.borrow_mut().as_mut() {
                gpu.resize_if_needed(inner_tick.canvas.width(), inner_tick.canvas.height());
                if let Err(e) = gpu.render(rot, zoom, PreviewInteraction::bob(t)) {
                    log::error!("preview render error: {:?}", e);
                }
            }
        }));

        ProductPreviewStage { inner }
    }

    /// Recompute backing size and projection for a new CSS size.
    pub fn resize(&self, _width: f64, _height: f64) {
        dom::sync_canvas_backing_size(&self.inner.canvas);
    }

    /// Stop the loop, detach listeners, release GPU resources and the
    /// texture. Idempotent.
    pub fn unmount(&self) {
        if self.inner.disposed.replace(true) {
            return;
        }
        if let Some(raf) = self.inner.raf.borrow_mut().take() {
            raf.cancel();
        }
        self.inner.listeners.borrow_mut().clear();
        self.inner.gpu.borrow_mut().take();
        self.inner.pending_image.borrow_mut().take();
        log::info!("preview stage unmounted");
    }
}

/// Fetch and decode the card image, starting at mount so the network load
/// overlaps GPU setup.
///
/// Failures are swallowed (the card stays untextured) and a load that
/// resolves after teardown is dropped on the disposed check. An image that
/// beats the GPU context is parked on the component until init lands.
fn load_texture(inner: Rc<StageInner>, url: String) {
    spawn_local(async move {
        let bytes = match fetch_bytes(&url).await {
            Ok(b) => b,
            Err(e) => {
                log::warn!("card texture fetch failed: {:?}", e);
                return;
            }
        };
        let decoded = match image::load_from_memory(&bytes) {
            Ok(img) => img.to_rgba8(),
            Err(e) => {
                log::warn!("card texture decode failed: {}", e);
                return;
            }
        };
        if inner.disposed.get() {
            return;
        }
        let mut gpu_slot = inner.gpu.borrow_mut();
        match gpu_slot.as_mut() {
            Some(gpu) => {
                let (w, h) = decoded.dimensions();
                gpu.apply_texture(decoded.as_raw(), w, h);
                log::info!("card texture applied ({}x{})", w, h);
            }
            None => {
                drop(gpu_slot);
                *inner.pending_image.borrow_mut() = Some(decoded);
            }
        }
    });
}

async fn fetch_bytes(url: &str) -> Result<Vec<u8>, JsValue> {
    let window = web::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let resp: web::Response = JsFuture::from(window.fetch_with_str(url)).await?.dyn_into()?;
    if !resp.ok() {
        return Err(JsValue::from_str("fetch not ok"));
    }
    let buf = JsFuture::from(resp.array_buffer()?).await?;
    Ok(js_sys::Uint8Array::new(&buf).to_vec())
}
