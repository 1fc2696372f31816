pub mod camera;
pub mod chapter;
pub mod cursor;
pub mod ease;
pub mod parallax;
pub mod particles;
pub mod preview;
pub mod reveal;

// Shaders bundled as string constants
pub static FIELD_WGSL: &str = include_str!("../../shaders/field.wgsl");
pub static CARD_WGSL: &str = include_str!("../../shaders/card.wgsl");
