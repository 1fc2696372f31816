use crate::constants::{
    DESKTOP_MIN_WIDTH_QUERY, REDUCED_MOTION_QUERY, REVEAL_ROOT_MARGIN, REVEAL_THRESHOLD,
};
use crate::core::parallax;
use crate::core::reveal::{self, RevealTracker};
use crate::dom;
use crate::events::ListenerGuard;
use crate::frame;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

const REVEAL_CLASS: &str = "is-revealed";
const PARALLAX_VAR: &str = "--parallax-y";
const REVEAL_ATTR: &str = "data-reveal";
const PARALLAX_ATTR: &str = "data-parallax";

struct ChoreoInner {
    reveal_nodes: Vec<web::Element>,
    parallax_nodes: Vec<(web::Element, f64)>,
    tracker: RefCell<RevealTracker>,
    observer: RefCell<Option<web::IntersectionObserver>>,
    // Closures kept alive while observation/coalescing is armed
    observer_cb: RefCell<Option<Closure<dyn FnMut(js_sys::Array, web::IntersectionObserver)>>>,
    sweep_cb: RefCell<Option<Closure<dyn FnMut()>>>,
    parallax_cb: RefCell<Option<Closure<dyn FnMut()>>>,
    listeners: RefCell<Vec<ListenerGuard>>,
    pending_parallax: Rc<Cell<Option<i32>>>,
    pending_sweep: Cell<Option<i32>>,
    disposed: Cell<bool>,
}

/// Per-navigation scroll choreography: one-shot reveal-on-scroll plus a
/// continuous parallax offset for tagged nodes.
///
/// Construct one per logical page visit (the routing layer's navigation key
/// changing means deactivate the old one and build a new one, even when the
/// DOM looks similar); `deactivate` must run before the next page's
/// choreographer attaches.
#[wasm_bindgen]
pub struct ScrollChoreographer {
    inner: Rc<ChoreoInner>,
}

#[wasm_bindgen]
impl ScrollChoreographer {
    /// Scan the current DOM for `data-reveal` / `data-parallax` nodes and
    /// attach observers per the environment's motion and viewport signals.
    #[wasm_bindgen(constructor)]
    pub fn activate() -> ScrollChoreographer {
        let document = dom::window_document();
        let reveal_nodes = document
            .as_ref()
            .map(|d| dom::elements_with_attribute(d, REVEAL_ATTR))
            .unwrap_or_default();
        let parallax_nodes: Vec<(web::Element, f64)> = document
            .as_ref()
            .map(|d| dom::elements_with_attribute(d, PARALLAX_ATTR))
            .unwrap_or_default()
            .into_iter()
            .map(|el| {
                let coeff = parallax::parse_coeff(el.get_attribute(PARALLAX_ATTR).as_deref());
                (el, coeff)
            })
            .collect();

        let tracker = RevealTracker::new(reveal_nodes.len());
        let inner = Rc::new(ChoreoInner {
            reveal_nodes,
            parallax_nodes,
            tracker: RefCell::new(tracker),
            observer: RefCell::new(None),
            observer_cb: RefCell::new(None),
            sweep_cb: RefCell::new(None),
            parallax_cb: RefCell::new(None),
            listeners: RefCell::new(Vec::new()),
            pending_parallax: Rc::new(Cell::new(None)),
            pending_sweep: Cell::new(None),
            disposed: Cell::new(false),
        });

        let reduce_motion = dom::media_matches(REDUCED_MOTION_QUERY);
        let is_desktop = dom::media_matches(DESKTOP_MIN_WIDTH_QUERY);

        if reduce_motion {
            // Fully inert: everything revealed, parallax pinned at zero, no
            // observers for the rest of the navigation
            for el in &inner.reveal_nodes {
                _ = el.class_list().add_1(REVEAL_CLASS);
            }
            let mut t = inner.tracker.borrow_mut();
            for i in 0..inner.reveal_nodes.len() {
                t.mark(i);
            }
            drop(t);
            for (el, _) in &inner.parallax_nodes {
                dom::set_css_var(el, PARALLAX_VAR, "0px");
            }
            log::info!("scroll choreography inert (reduced motion)");
            return ScrollChoreographer { inner };
        }

        wire_reveal_observer(&inner);

        if !is_desktop {
            // Parallax at narrow widths reads as jitter, not depth
            for (el, _) in &inner.parallax_nodes {
                dom::set_css_var(el, PARALLAX_VAR, "0px");
            }
        } else if !inner.parallax_nodes.is_empty() {
            wire_parallax(&inner);
        }

        ScrollChoreographer { inner }
    }

    /// Disconnect observers, remove listeners, cancel pending coalesced
    /// work, and clear every parallax offset. Idempotent.
    pub fn deactivate(&self) {
        if self.inner.disposed.replace(true) {
            return;
        }
        if let Some(obs) = self.inner.observer.borrow_mut().take() {
            obs.disconnect();
        }
        self.inner.observer_cb.borrow_mut().take();
        if let Some(id) = self.inner.pending_sweep.take() {
            frame::cancel_frame(id);
        }
        self.inner.sweep_cb.borrow_mut().take();
        if let Some(id) = self.inner.pending_parallax.take() {
            frame::cancel_frame(id);
        }
        self.inner.parallax_cb.borrow_mut().take();
        self.inner.listeners.borrow_mut().clear();
        // Stale offsets must not bleed into the next page
        for (el, _) in &self.inner.parallax_nodes {
            dom::remove_css_var(el, PARALLAX_VAR);
        }
        log::info!("scroll choreography deactivated");
    }
}

/// Reveal a node: record it, tag the class, and stop observing it (one-shot).
fn reveal_index(inner: &ChoreoInner, i: usize) {
    if !inner.tracker.borrow_mut().mark(i) {
        return;
    }
    let el = &inner.reveal_nodes[i];
    _ = el.class_list().add_1(REVEAL_CLASS);
    if let Some(obs) = inner.observer.borrow().as_ref() {
        obs.unobserve(el);
    }
}

fn wire_reveal_observer(inner: &Rc<ChoreoInner>) {
    if inner.reveal_nodes.is_empty() {
        return;
    }

    // Re-navigations replay reveals, so start every node hidden
    for el in &inner.reveal_nodes {
        _ = el.class_list().remove_1(REVEAL_CLASS);
    }

    let inner_cb = inner.clone();
    let callback = Closure::wrap(Box::new(
        move |entries: js_sys::Array, _obs: web::IntersectionObserver| {
            if inner_cb.disposed.get() {
                return;
            }
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<web::IntersectionObserverEntry>() else {
                    continue;
                };
                if !entry.is_intersecting() {
                    continue;
                }
                let target = entry.target();
                if let Some(i) = inner_cb.reveal_nodes.iter().position(|el| *el == target) {
                    reveal_index(&inner_cb, i);
                }
            }
        },
    )
        as Box<dyn FnMut(js_sys::Array, web::IntersectionObserver)>);

    let options = web::IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
    options.set_root_margin(REVEAL_ROOT_MARGIN);

    match web::IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
    {
        Ok(observer) => {
            for el in &inner.reveal_nodes {
                observer.observe(el);
            }
            *inner.observer.borrow_mut() = Some(observer);
            *inner.observer_cb.borrow_mut() = Some(callback);
            wire_deep_link_sweep(inner);
        }
        Err(_) => {
            // No observation facility: reveal everything immediately
            for i in 0..inner.reveal_nodes.len() {
                reveal_index(inner, i);
            }
        }
    }
}

/// After the first rendered frame, force-reveal nodes already in view so a
/// mid-page landing does not wait for observer delivery.
fn wire_deep_link_sweep(inner: &Rc<ChoreoInner>) {
    let inner_cb = inner.clone();
    let sweep = Closure::wrap(Box::new(move || {
        inner_cb.pending_sweep.take();
        if inner_cb.disposed.get() {
            return;
        }
        let Some(window) = web::window() else {
            return;
        };
        let viewport_h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let pending: Vec<usize> = inner_cb.tracker.borrow().pending_indices().collect();
        for i in pending {
            let rect = inner_cb.reveal_nodes[i].get_bounding_client_rect();
            if reveal::in_force_reveal_band(rect.top(), rect.bottom(), viewport_h) {
                reveal_index(&inner_cb, i);
            }
        }
    }) as Box<dyn FnMut()>);

    if let Some(id) = frame::request_frame(&sweep) {
        inner.pending_sweep.set(Some(id));
        *inner.sweep_cb.borrow_mut() = Some(sweep);
    }
}

/// Recompute every parallax offset, at most once per animation frame no
/// matter how many scroll/resize events arrive in between.
fn wire_parallax(inner: &Rc<ChoreoInner>) {
    let inner_cb = inner.clone();
    let update = Closure::wrap(Box::new(move || {
        inner_cb.pending_parallax.take();
        if inner_cb.disposed.get() {
            return;
        }
        let Some(window) = web::window() else {
            return;
        };
        let viewport_h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        for (el, coeff) in &inner_cb.parallax_nodes {
            let rect = el.get_bounding_client_rect();
            let mid = rect.top() + rect.height() / 2.0;
            let y = parallax::offset_px(mid, viewport_h, *coeff);
            dom::set_css_var(el, PARALLAX_VAR, &format!("{:.2}px", y));
        }
    }) as Box<dyn FnMut()>);

    // Initial position before any scroll event
    if let Some(window) = web::window() {
        let schedule = {
            let pending = inner.pending_parallax.clone();
            let update_ref = update.as_ref().clone();
            move || {
                if pending.get().is_some() {
                    return;
                }
                if let Some(w) = web::window() {
                    if let Ok(id) = w.request_animation_frame(update_ref.unchecked_ref()) {
                        pending.set(Some(id));
                    }
                }
            }
        };
        schedule();
        let mut listeners = inner.listeners.borrow_mut();
        let s1 = schedule.clone();
        listeners.push(ListenerGuard::new(window.as_ref(), "scroll", move |_| s1()));
        let s2 = schedule;
        listeners.push(ListenerGuard::new(window.as_ref(), "resize", move |_| s2()));
    }
    *inner.parallax_cb.borrow_mut() = Some(update);
}
