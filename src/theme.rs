use std::cell::Cell;
use wasm_bindgen::prelude::*;
use web_sys as web;

const STORAGE_KEY: &str = "theme";
const DARK_CLASS: &str = "dark";

/// Explicitly owned light/dark theme value.
///
/// The stored string is the source of truth; the `dark` class on the document
/// root mirrors it. Reads happen once at construction, never ambiently.
#[wasm_bindgen]
pub struct ThemeState {
    dark: Cell<bool>,
}

#[wasm_bindgen]
impl ThemeState {
    /// Load the persisted theme, defaulting to dark, and sync the document
    /// root class to it.
    #[wasm_bindgen(constructor)]
    pub fn load() -> ThemeState {
        let stored = local_storage().and_then(|s| s.get_item(STORAGE_KEY).ok().flatten());
        let dark = match stored.as_deref() {
            Some("light") => false,
            Some("dark") => true,
            _ => true,
        };
        let state = ThemeState {
            dark: Cell::new(dark),
        };
        state.apply();
        state
    }

    #[wasm_bindgen(getter)]
    pub fn dark(&self) -> bool {
        self.dark.get()
    }

    /// Flip the theme, persist it, and update the document root.
    pub fn toggle(&self) {
        self.dark.set(!self.dark.get());
        self.persist();
        self.apply();
    }

    /// Set an explicit theme, persist it, and update the document root.
    #[wasm_bindgen(js_name = setDark)]
    pub fn set_dark(&self, dark: bool) {
        self.dark.set(dark);
        self.persist();
        self.apply();
    }
}

impl ThemeState {
    fn persist(&self) {
        let value = if self.dark.get() { "dark" } else { "light" };
        if let Some(storage) = local_storage() {
            if storage.set_item(STORAGE_KEY, value).is_err() {
                log::warn!("theme persistence unavailable");
            }
        }
    }

    fn apply(&self) {
        let Some(root) = web::window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element())
        else {
            return;
        };
        let classes = root.class_list();
        if self.dark.get() {
            _ = classes.add_1(DARK_CLASS);
        } else {
            _ = classes.remove_1(DARK_CLASS);
        }
    }
}

fn local_storage() -> Option<web::Storage> {
    web::window().and_then(|w| w.local_storage().ok().flatten())
}
