// Browser smoke tests for the DOM-facing components. These touch real
// document APIs and must run under wasm-pack in a headless browser.

#![cfg(target_arch = "wasm32")]

use folio_fx::{
    ChapterSequencer, ParticleField, ProductPreviewStage, ScrollChoreographer, ThemeState,
};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> web_sys::Document {
    web_sys::window().and_then(|w| w.document()).unwrap()
}

fn attached_canvas() -> web_sys::HtmlCanvasElement {
    let doc = document();
    let canvas: web_sys::HtmlCanvasElement = doc
        .create_element("canvas")
        .unwrap()
        .dyn_into()
        .unwrap();
    doc.body().unwrap().append_child(&canvas).unwrap();
    canvas
}

#[wasm_bindgen_test]
fn theme_round_trips_through_storage_and_root_class() {
    let theme = ThemeState::load();
    let initial = theme.dark();

    theme.toggle();
    assert_eq!(theme.dark(), !initial);
    let root = document().document_element().unwrap();
    assert_eq!(root.class_list().contains("dark"), !initial);

    theme.toggle();
    assert_eq!(theme.dark(), initial);
    assert_eq!(root.class_list().contains("dark"), initial);
}

#[wasm_bindgen_test]
fn choreographer_reveals_tagged_nodes_and_tears_down() {
    let doc = document();
    let body = doc.body().unwrap();
    let node = doc.create_element("div").unwrap();
    node.set_attribute("data-reveal", "").unwrap();
    body.append_child(&node).unwrap();

    let choreo = ScrollChoreographer::activate();
    // Deactivation is idempotent and must not throw
    choreo.deactivate();
    choreo.deactivate();

    body.remove_child(&node).unwrap();
}

#[wasm_bindgen_test]
fn particle_field_unmount_is_idempotent() {
    let canvas = attached_canvas();
    // GPU init may still be in flight or have failed; neither may make
    // teardown fall over
    let field = ParticleField::mount(canvas.clone(), Some("#E46A2E".into()));
    field.unmount();
    field.unmount();
    document().body().unwrap().remove_child(&canvas).unwrap();
}

#[wasm_bindgen_test]
fn preview_stage_unmount_is_idempotent() {
    let canvas = attached_canvas();
    let stage = ProductPreviewStage::mount(canvas.clone(), "missing.png".into(), None);
    stage.unmount();
    stage.unmount();
    document().body().unwrap().remove_child(&canvas).unwrap();
}

#[wasm_bindgen_test]
fn sequencer_unmount_is_idempotent() {
    let doc = document();
    let body = doc.body().unwrap();
    let section = doc.create_element("section").unwrap();
    let trigger = doc.create_element("div").unwrap();
    section.append_child(&trigger).unwrap();
    body.append_child(&section).unwrap();

    let seq = ChapterSequencer::mount(section.clone(), trigger);
    assert!(!seq.docked());
    assert!(!seq.revealed());
    seq.unmount();
    seq.unmount();

    body.remove_child(&section).unwrap();
}

#[wasm_bindgen_test]
fn choreographer_clears_parallax_vars_on_deactivate() {
    let doc = document();
    let body = doc.body().unwrap();
    let node = doc.create_element("div").unwrap();
    node.set_attribute("data-parallax", "0.1").unwrap();
    body.append_child(&node).unwrap();

    let choreo = ScrollChoreographer::activate();
    choreo.deactivate();

    let style = node.dyn_ref::<web_sys::HtmlElement>().unwrap().style();
    assert!(style.get_property_value("--parallax-y").unwrap().is_empty());

    body.remove_child(&node).unwrap();
}
