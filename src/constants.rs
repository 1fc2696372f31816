// Frontend-layer tuning constants.
//
// Subsystem tuning (smoothing rates, clamps, spawn bounds, sequence delays)
// lives next to the logic that owns it in `core::*`; the values here only
// concern the DOM/render wiring.

// Device pixel ratio cap shared by both GPU surfaces (bounds fragment cost)
pub const MAX_PIXEL_RATIO: f64 = 1.6;

// Field camera
pub const FIELD_FOV_Y_DEG: f32 = 42.0;
pub const FIELD_CAMERA_Z: f32 = 7.2;
pub const FIELD_NEAR: f32 = 0.1;
pub const FIELD_FAR: f32 = 60.0;

// Preview camera (zoom moves the eye along Z)
pub const PREVIEW_FOV_Y_DEG: f32 = 40.0;
pub const PREVIEW_CAMERA_Y: f32 = 0.08;
pub const PREVIEW_NEAR: f32 = 0.1;
pub const PREVIEW_FAR: f32 = 50.0;

// Reveal observer tuning: visibility threshold plus a bottom-margin shrink so
// the transition fires slightly before the node is fully in view
pub const REVEAL_THRESHOLD: f64 = 0.18;
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -18% 0px";

// Environment/media queries read once per activation
pub const DESKTOP_MIN_WIDTH_QUERY: &str = "(min-width: 1024px)";
pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";
