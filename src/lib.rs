#![cfg_attr(target_arch = "wasm32", allow(dead_code))]

//! Decorative full-page backdrop: a constellation star field (default) or a
//! scrolling double helix (`?bg=dna`), both composited over a drifting nebula
//! gradient field. Purely ambient; the host page works identically without it.

pub mod config;
pub mod constellation;
pub mod helix;
pub mod nebula;
pub mod rng;
pub mod scheduler;
pub mod viewport;

// Only compile the browser glue when targeting wasm32.

#[cfg(target_arch = "wasm32")]
mod wasm {
    use wasm_bindgen::prelude::*;

    mod app;
    mod render;

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();

        app::boot()
    }
}

// When compiling for non-wasm targets (e.g., `cargo test` on host),
// provide an empty stub so the crate still builds.
#[cfg(not(target_arch = "wasm32"))]
pub fn main() {}
