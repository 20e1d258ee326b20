//! Error types for page setup and form submission
//!
//! Nothing here is fatal to the page: setup errors surface to the calling
//! script, and submission errors become a visible status message.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures while wiring the behavior layer into the page
#[derive(Debug, Clone, Error)]
pub enum PageError {
    #[error("no global `window` exists")]
    NoWindow,

    #[error("window has no document")]
    NoDocument,

    #[error("invalid settings: {0}")]
    Settings(String),

    #[error("page behavior already initialized")]
    AlreadyInitialized,

    /// A DOM call threw; carries the JavaScript error rendered as text
    #[error("DOM call failed: {0}")]
    Dom(String),
}

impl PageError {
    pub fn dom(err: JsValue) -> Self {
        PageError::Dom(describe_js(&err))
    }
}

impl From<PageError> for JsValue {
    fn from(err: PageError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Failure of the contact form's network call
#[derive(Debug, Clone, Error)]
pub enum SubmitError {
    #[error("network error: {0}")]
    Network(String),
}

impl SubmitError {
    pub fn network(err: JsValue) -> Self {
        SubmitError::Network(describe_js(&err))
    }
}

/// Best-effort text for a thrown JavaScript value
pub fn describe_js(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
