pub mod catalog;
mod diag;

#[cfg(target_family = "wasm")]
mod app;
#[cfg(target_family = "wasm")]
mod runner;
#[cfg(target_family = "wasm")]
mod source;
#[cfg(target_family = "wasm")]
mod surface;

use wasm_bindgen::prelude::*;

/// WASM entry point.
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(target_family = "wasm")]
    {
        console_error_panic_hook::set_once();
        if let Err(e) = app::boot() {
            app::show_fatal(&e.to_string());
        }
    }
}
