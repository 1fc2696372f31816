use crate::constants::REDUCED_MOTION_QUERY;
use crate::core::chapter::{ChapterMachine, CHAPTER_START_THRESHOLD};
use crate::dom;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

const DOCKED_CLASS: &str = "is-docked";
const REVEALED_CLASS: &str = "is-revealed";

struct SequencerInner {
    section: web::Element,
    machine: RefCell<ChapterMachine>,
    start_observer: RefCell<Option<web::IntersectionObserver>>,
    reset_observer: RefCell<Option<web::IntersectionObserver>>,
    start_cb: RefCell<Option<Closure<dyn FnMut(js_sys::Array)>>>,
    reset_cb: RefCell<Option<Closure<dyn FnMut(js_sys::Array)>>>,
    dock_timer_cb: RefCell<Option<Closure<dyn FnMut()>>>,
    reveal_timer_cb: RefCell<Option<Closure<dyn FnMut()>>>,
    dock_timer: Cell<Option<i32>>,
    reveal_timer: Cell<Option<i32>>,
    disposed: Cell<bool>,
}

/// Timed chapter entrance for one section: intro title, hold, dock to the
/// corner, then reveal the body. Driven by two intersection observers (a
/// small trigger region starts the cycle, the whole section leaving resets
/// it) and two timeouts per cycle.
#[wasm_bindgen]
pub struct ChapterSequencer {
    inner: Rc<SequencerInner>,
}

#[wasm_bindgen]
impl ChapterSequencer {
    #[wasm_bindgen(constructor)]
    pub fn mount(section: web::Element, trigger: web::Element) -> ChapterSequencer {
        let inner = Rc::new(SequencerInner {
            section,
            machine: RefCell::new(ChapterMachine::new()),
            start_observer: RefCell::new(None),
            reset_observer: RefCell::new(None),
            start_cb: RefCell::new(None),
            reset_cb: RefCell::new(None),
            dock_timer_cb: RefCell::new(None),
            reveal_timer_cb: RefCell::new(None),
            dock_timer: Cell::new(None),
            reveal_timer: Cell::new(None),
            disposed: Cell::new(false),
        });

        if dom::media_matches(REDUCED_MOTION_QUERY) {
            // One jump to the end state, then nothing to observe
            inner.machine.borrow_mut().skip_to_reveal();
            apply_classes(&inner);
            log::info!("chapter sequencer pinned revealed (reduced motion)");
            return ChapterSequencer { inner };
        }

        wire_start_observer(&inner, &trigger);
        wire_reset_observer(&inner);
        ChapterSequencer { inner }
    }

    /// True once the title has docked this cycle.
    #[wasm_bindgen(getter)]
    pub fn docked(&self) -> bool {
        self.inner.machine.borrow().docked()
    }

    /// True once the body is revealed this cycle.
    #[wasm_bindgen(getter)]
    pub fn revealed(&self) -> bool {
        self.inner.machine.borrow().revealed()
    }

    /// Disconnect observers and cancel any in-flight timers. Idempotent.
    pub fn unmount(&self) {
        if self.inner.disposed.replace(true) {
            return;
        }
        if let Some(obs) = self.inner.start_observer.borrow_mut().take() {
            obs.disconnect();
        }
        if let Some(obs) = self.inner.reset_observer.borrow_mut().take() {
            obs.disconnect();
        }
        self.inner.start_cb.borrow_mut().take();
        self.inner.reset_cb.borrow_mut().take();
        clear_timers(&self.inner);
    }
}

fn apply_classes(inner: &SequencerInner) {
    let machine = inner.machine.borrow();
    let classes = inner.section.class_list();
    if machine.docked() {
        _ = classes.add_1(DOCKED_CLASS);
    } else {
        _ = classes.remove_1(DOCKED_CLASS);
    }
    if machine.revealed() {
        _ = classes.add_1(REVEALED_CLASS);
    } else {
        _ = classes.remove_1(REVEALED_CLASS);
    }
}

fn clear_timers(inner: &SequencerInner) {
    let Some(window) = web::window() else {
        return;
    };
    if let Some(id) = inner.dock_timer.take() {
        window.clear_timeout_with_handle(id);
    }
    if let Some(id) = inner.reveal_timer.take() {
        window.clear_timeout_with_handle(id);
    }
    inner.dock_timer_cb.borrow_mut().take();
    inner.reveal_timer_cb.borrow_mut().take();
}

fn schedule_cycle(inner: &Rc<SequencerInner>, dock_at_ms: u32, reveal_at_ms: u32) {
    let Some(window) = web::window() else {
        return;
    };

    let dock_inner = inner.clone();
    let dock_cb = Closure::wrap(Box::new(move || {
        dock_inner.dock_timer.take();
        if dock_inner.disposed.get() {
            return;
        }
        dock_inner.machine.borrow_mut().dock();
        apply_classes(&dock_inner);
    }) as Box<dyn FnMut()>);

    let reveal_inner = inner.clone();
    let reveal_cb = Closure::wrap(Box::new(move || {
        reveal_inner.reveal_timer.take();
        if reveal_inner.disposed.get() {
            return;
        }
        reveal_inner.machine.borrow_mut().reveal();
        apply_classes(&reveal_inner);
    }) as Box<dyn FnMut()>);

    if let Ok(id) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        dock_cb.as_ref().unchecked_ref(),
        dock_at_ms as i32,
    ) {
        inner.dock_timer.set(Some(id));
        *inner.dock_timer_cb.borrow_mut() = Some(dock_cb);
    }
    if let Ok(id) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        reveal_cb.as_ref().unchecked_ref(),
        reveal_at_ms as i32,
    ) {
        inner.reveal_timer.set(Some(id));
        *inner.reveal_timer_cb.borrow_mut() = Some(reveal_cb);
    }
}

fn wire_start_observer(inner: &Rc<SequencerInner>, trigger: &web::Element) {
    let inner_cb = inner.clone();
    let callback = Closure::wrap(Box::new(move |entries: js_sys::Array| {
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
            let schedule = inner_cb
                .machine
                .borrow_mut()
                .begin(entry.intersection_ratio());
            if let Some(schedule) = schedule {
                apply_classes(&inner_cb);
                schedule_cycle(&inner_cb, schedule.dock_at_ms, schedule.reveal_at_ms);
            }
        }
    }) as Box<dyn FnMut(js_sys::Array)>);

    let options = web::IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(CHAPTER_START_THRESHOLD));
    if let Ok(observer) =
        web::IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
    {
        observer.observe(trigger);
        *inner.start_observer.borrow_mut() = Some(observer);
        *inner.start_cb.borrow_mut() = Some(callback);
    }
}

fn wire_reset_observer(inner: &Rc<SequencerInner>) {
    let inner_cb = inner.clone();
    let callback = Closure::wrap(Box::new(move |entries: js_sys::Array| {
        if inner_cb.disposed.get() {
            return;
        }
        for entry in entries.iter() {
            let Ok(entry) = entry.dyn_into::<web::IntersectionObserverEntry>() else {
                continue;
            };
            // Only a complete exit cancels; partial visibility keeps the cycle
            if entry.is_intersecting() {
                continue;
            }
            if inner_cb.machine.borrow_mut().reset_on_exit() {
                clear_timers(&inner_cb);
                apply_classes(&inner_cb);
            }
        }
    }) as Box<dyn FnMut(js_sys::Array)>);

    // Default threshold 0 fires exactly when the section fully leaves
    if let Ok(observer) = web::IntersectionObserver::new(callback.as_ref().unchecked_ref()) {
        observer.observe(&inner.section);
        *inner.reset_observer.borrow_mut() = Some(observer);
        *inner.reset_cb.borrow_mut() = Some(callback);
    }
}
