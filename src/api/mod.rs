//! Portfolio behavior WASM API
//!
//! The JavaScript-facing entry point and the browser wiring behind it.
//!
//! # Module Structure
//!
//! - `helpers`: element lookups and boundary logging
//! - `page`: the page context that owns every installed component
//! - `theme`: theme toggle over `localStorage`
//! - `contact`: contact form over `fetch`

pub mod contact;
pub mod helpers;
pub mod page;
pub mod theme;

use std::cell::{Cell, RefCell};

use gloo::events::EventListener;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Window};

use crate::config::Settings;
use crate::errors::PageError;
use page::Page;

thread_local! {
    static PAGE: RefCell<Option<Page>> = const { RefCell::new(None) };
    static STARTED: Cell<bool> = const { Cell::new(false) };
}

/// Install the page behavior.
///
/// # Parameters
/// - `config`: optional settings object (camelCase keys); `undefined` selects defaults
///
/// Runs immediately when the document is parsed, otherwise on `DOMContentLoaded`.
/// Succeeds once per page; a setup that failed may be retried.
#[wasm_bindgen(js_name = initPage)]
pub fn init_page(config: JsValue) -> Result<(), JsValue> {
    let settings = Settings::from_js(config)?;
    let window = web_sys::window().ok_or(PageError::NoWindow)?;
    let document = window.document().ok_or(PageError::NoDocument)?;

    if STARTED.with(|started| started.replace(true)) {
        return Err(PageError::AlreadyInitialized.into());
    }

    if still_loading(&document.ready_state()) {
        log::debug!("document still loading, waiting for DOMContentLoaded");
        let target = document.clone();
        EventListener::once(&target, "DOMContentLoaded", move |_| {
            if let Err(err) = mount(window, document, &settings) {
                helpers::log_page_error("page setup failed", &err);
            }
        })
        .forget();
        return Ok(());
    }

    mount(window, document, &settings).map_err(Into::into)
}

/// `document.readyState` before the document finished parsing
fn still_loading(ready_state: &str) -> bool {
    ready_state == "loading"
}

// A failed mount releases the one-shot guard so the page script may retry
fn mount(window: Window, document: Document, settings: &Settings) -> Result<(), PageError> {
    match Page::mount(window, document, settings) {
        Ok(page) => {
            PAGE.with(|slot| *slot.borrow_mut() = Some(page));
            Ok(())
        }
        Err(err) => {
            STARTED.with(|started| started.set(false));
            Err(err)
        }
    }
}

/// Whether `initPage` finished installing the components
#[wasm_bindgen(js_name = isPageReady)]
pub fn is_page_ready() -> bool {
    PAGE.with(|slot| slot.borrow().is_some())
}
