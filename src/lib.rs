#![cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

mod choreographer;
mod constants;
mod core;
mod dom;
mod events;
mod frame;
mod particle_field;
mod preview_stage;
mod render;
mod sequencer;
mod theme;

pub use choreographer::ScrollChoreographer;
pub use particle_field::ParticleField;
pub use preview_stage::ProductPreviewStage;
pub use sequencer::ChapterSequencer;
pub use theme::ThemeState;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("folio-fx ready");
    Ok(())
}
