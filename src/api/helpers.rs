//! Shared helpers for wiring components into the live document
//!
//! Element lookups that tolerate absent elements (every feature is optional on
//! a given page) and the error/log plumbing used at the JavaScript boundary.
//! A selector the browser rejects is a setup error, not an absent element.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, NodeList};

use crate::errors::PageError;

// ============================================================================
// Element Lookups
// ============================================================================

/// Element by id, cast to `T`; `None` when absent or of another type
pub fn by_id<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    document.get_element_by_id(id)?.dyn_into::<T>().ok()
}

/// First element matching `selector`
pub fn query<T: JsCast>(document: &Document, selector: &str) -> Result<Option<T>, PageError> {
    let found = document.query_selector(selector).map_err(|err| invalid_selector(selector, err))?;
    Ok(found.and_then(|el| el.dyn_into::<T>().ok()))
}

/// Every element matching `selector` that is a `T`, in document order
pub fn query_all<T: JsCast>(document: &Document, selector: &str) -> Result<Vec<T>, PageError> {
    collect(document.query_selector_all(selector), selector)
}

/// Like [`query_all`], scoped to the descendants of `root`
pub fn query_all_within<T: JsCast>(root: &Element, selector: &str) -> Result<Vec<T>, PageError> {
    collect(root.query_selector_all(selector), selector)
}

fn collect<T: JsCast>(nodes: Result<NodeList, JsValue>, selector: &str) -> Result<Vec<T>, PageError> {
    let nodes = nodes.map_err(|err| invalid_selector(selector, err))?;
    Ok((0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|node| node.dyn_into::<T>().ok())
        .collect())
}

fn invalid_selector(selector: &str, err: JsValue) -> PageError {
    log::warn!("querySelector rejected {:?}", selector);
    PageError::dom(err)
}

// ============================================================================
// Boundary Conversion
// ============================================================================

/// Log a setup failure that has no caller left to report to
pub fn log_page_error(context: &str, err: &crate::errors::PageError) {
    log::error!("{}: {}", context, err);
}
