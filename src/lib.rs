//! Portfolio Site Behavior WASM Module
//!
//! Client-side behavior for a static portfolio page: a persisted theme toggle,
//! contact form validation and submission, and the viewport-reactive effects
//! (lazy images, staggered card reveal, button ripples and a shrinking header
//! whose height is kept in sync with the content offset).

pub mod api;
pub mod config;
pub mod contact;
pub mod dom;
pub mod errors;
pub mod models;
pub mod theme;
pub mod viewport;

// Re-export commonly used types
pub use config::Settings;
pub use errors::{PageError, SubmitError};
pub use models::{
    Field, FormStatus, HeaderMode, HeaderState, Point, Rect, RippleGeometry, StaggerIndex, Theme,
    Validity,
};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    console_log::init_with_level(log::Level::Debug)
        .map_err(|e| JsValue::from_str(&format!("failed to initialize logger: {}", e)))?;

    log::info!("Portfolio behavior WASM module initialized");
    Ok(())
}
