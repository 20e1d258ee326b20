//! Host capabilities the behavior layer runs against
//!
//! Components are generic over these traits instead of reaching for global
//! DOM lookups. `web` implements them over `web-sys`; tests use the in-memory
//! fakes in `fake`.

use std::any::Any;
use std::rc::Rc;

use crate::models::Rect;

pub mod web;

#[cfg(test)]
pub mod fake;

/// A handle to one element of the page
pub trait ElementHandle: Clone + PartialEq + 'static {
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
    fn has_class(&self, class: &str) -> bool;

    fn attribute(&self, name: &str) -> Option<String>;
    fn set_attribute(&self, name: &str, value: &str);

    /// Set an inline style property; custom properties (`--name`) included
    fn set_style_property(&self, property: &str, value: &str);

    fn set_text(&self, text: &str);

    fn bounding_rect(&self) -> Rect;
}

/// Elements that can be navigated and restructured
pub trait ElementTree: ElementHandle {
    /// Nearest inclusive ancestor matching a CSS selector
    fn closest(&self, selector: &str) -> Option<Self>;

    /// Create an element with `tag` and append it as the last child
    fn append_element(&self, tag: &str) -> Option<Self>;

    /// Detach from the parent
    fn remove(&self);
}

/// An image element
pub trait ImageHandle: ElementHandle {
    /// Whether the current source finished loading (or there is none)
    fn is_complete(&self) -> bool;

    /// Run `callback` on the next load event only
    fn on_load_once(&self, callback: Box<dyn FnOnce()>);
}

/// Deferred execution on the host event loop
pub trait Scheduler {
    fn set_timeout(&self, delay_ms: u32, task: Box<dyn FnOnce()>);

    /// Run `task` before the next repaint, unless the handle is dropped first
    fn request_frame(&self, task: Box<dyn FnOnce()>) -> FrameHandle;
}

/// A pending animation frame. Dropping it cancels the frame.
pub struct FrameHandle {
    _guard: Box<dyn Any>,
}

impl FrameHandle {
    pub fn new(guard: impl Any) -> Self {
        Self { _guard: Box::new(guard) }
    }
}

/// Window-level layout signals
pub trait Viewport {
    /// Vertical scroll offset in CSS pixels
    fn scroll_y(&self) -> f64;

    fn on_scroll(&self, handler: Rc<dyn Fn()>);
    fn on_resize(&self, handler: Rc<dyn Fn()>);
    fn on_orientation_change(&self, handler: Rc<dyn Fn()>);

    /// Run `handler` once web fonts finished loading.
    /// Returns `false` when font loading cannot be observed.
    fn on_fonts_ready(&self, handler: Box<dyn FnOnce()>) -> bool;
}

/// Options for a visibility observer
#[derive(Debug, Clone, PartialEq)]
pub struct WatchOptions {
    /// Margin grown around the viewport, CSS `margin` syntax
    pub root_margin: String,
    /// Visible fraction that counts as "visible"
    pub threshold: f64,
}

impl WatchOptions {
    pub fn new(root_margin: impl Into<String>, threshold: f64) -> Self {
        Self { root_margin: root_margin.into(), threshold }
    }
}

/// One visibility change reported by the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub is_intersecting: bool,
    pub ratio: f64,
}

/// An active visibility observer
pub trait IntersectionObserve<E> {
    fn observe(&self, target: &E);
    fn unobserve(&self, target: &E);
}

/// Change callback: the target, its new intersection, and the observer reporting it
pub type IntersectionCallback<E> = Rc<dyn Fn(&E, Intersection, &dyn IntersectionObserve<E>)>;

/// Source of visibility observers
pub trait IntersectionHost<E> {
    /// `None` when the host cannot observe visibility at all
    fn create_observer(
        &self,
        options: &WatchOptions,
        on_change: IntersectionCallback<E>,
    ) -> Option<Box<dyn IntersectionObserve<E>>>;
}
