//! Browser implementations of the host traits, over `web-sys` and `gloo`

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::render::request_animation_frame;
use gloo::timers::callback::Timeout;
use js_sys::{Array, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Document, Element, HtmlElement, HtmlImageElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, Window,
};

use super::{
    ElementHandle, ElementTree, FrameHandle, ImageHandle, Intersection, IntersectionCallback,
    IntersectionHost, IntersectionObserve, Scheduler, Viewport, WatchOptions,
};
use crate::errors::describe_js;
use crate::models::Rect;

// DOM writes that throw are logged and skipped; the page keeps working.
fn warn_on_err(result: Result<(), JsValue>, what: &str) {
    if let Err(err) = result {
        log::warn!("{} failed: {}", what, describe_js(&err));
    }
}

fn element_add_class(el: &Element, class: &str) {
    warn_on_err(el.class_list().add_1(class), "classList.add");
}

fn element_remove_class(el: &Element, class: &str) {
    warn_on_err(el.class_list().remove_1(class), "classList.remove");
}

fn element_set_attribute(el: &Element, name: &str, value: &str) {
    warn_on_err(el.set_attribute(name, value), "setAttribute");
}

fn element_set_style(el: &Element, property: &str, value: &str) {
    match el.dyn_ref::<HtmlElement>() {
        Some(html) => warn_on_err(html.style().set_property(property, value), "style.setProperty"),
        None => log::debug!("skipping style {} on non-HTML element", property),
    }
}

fn element_rect(el: &Element) -> Rect {
    let rect = el.get_bounding_client_rect();
    Rect::new(rect.left(), rect.top(), rect.width(), rect.height())
}

macro_rules! impl_element_handle {
    ($($ty:ty),* $(,)?) => {$(
        impl ElementHandle for $ty {
            fn add_class(&self, class: &str) {
                element_add_class(self.unchecked_ref(), class)
            }

            fn remove_class(&self, class: &str) {
                element_remove_class(self.unchecked_ref(), class)
            }

            fn has_class(&self, class: &str) -> bool {
                self.unchecked_ref::<Element>().class_list().contains(class)
            }

            fn attribute(&self, name: &str) -> Option<String> {
                self.unchecked_ref::<Element>().get_attribute(name)
            }

            fn set_attribute(&self, name: &str, value: &str) {
                element_set_attribute(self.unchecked_ref(), name, value)
            }

            fn set_style_property(&self, property: &str, value: &str) {
                element_set_style(self.unchecked_ref(), property, value)
            }

            fn set_text(&self, text: &str) {
                self.unchecked_ref::<Element>().set_text_content(Some(text))
            }

            fn bounding_rect(&self) -> Rect {
                element_rect(self.unchecked_ref())
            }
        }
    )*};
}

impl_element_handle!(Element, HtmlImageElement);

impl ElementTree for Element {
    fn closest(&self, selector: &str) -> Option<Self> {
        Element::closest(self, selector).ok().flatten()
    }

    fn append_element(&self, tag: &str) -> Option<Self> {
        let document = self.owner_document()?;
        let child = document.create_element(tag).ok()?;
        match self.append_child(&child) {
            Ok(_) => Some(child),
            Err(err) => {
                log::warn!("appendChild failed: {}", describe_js(&err));
                None
            }
        }
    }

    fn remove(&self) {
        Element::remove(self)
    }
}

impl ImageHandle for HtmlImageElement {
    fn is_complete(&self) -> bool {
        self.complete()
    }

    fn on_load_once(&self, callback: Box<dyn FnOnce()>) {
        // The browser drops a `once` listener after it fires
        EventListener::once(self, "load", move |_| callback()).forget();
    }
}

/// Timers and animation frames on the window
#[derive(Debug, Clone, Copy, Default)]
pub struct WebScheduler;

impl Scheduler for WebScheduler {
    fn set_timeout(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        Timeout::new(delay_ms, task).forget();
    }

    fn request_frame(&self, task: Box<dyn FnOnce()>) -> FrameHandle {
        FrameHandle::new(request_animation_frame(move |_timestamp| task()))
    }
}

/// Window scroll/resize/orientation signals plus document font loading
pub struct WebViewport {
    window: Window,
    document: Document,
    listeners: RefCell<Vec<EventListener>>,
}

impl WebViewport {
    pub fn new(window: Window, document: Document) -> Self {
        Self { window, document, listeners: RefCell::new(Vec::new()) }
    }

    fn listen(&self, event: &'static str, handler: Rc<dyn Fn()>) {
        let listener = EventListener::new(&self.window, event, move |_| handler());
        self.listeners.borrow_mut().push(listener);
    }
}

impl Viewport for WebViewport {
    fn scroll_y(&self) -> f64 {
        self.window
            .scroll_y()
            .or_else(|_| self.window.page_y_offset())
            .unwrap_or(0.0)
    }

    fn on_scroll(&self, handler: Rc<dyn Fn()>) {
        // gloo listeners are passive unless asked otherwise
        self.listen("scroll", handler);
    }

    fn on_resize(&self, handler: Rc<dyn Fn()>) {
        self.listen("resize", handler);
    }

    fn on_orientation_change(&self, handler: Rc<dyn Fn()>) {
        self.listen("orientationchange", handler);
    }

    fn on_fonts_ready(&self, handler: Box<dyn FnOnce()>) -> bool {
        if !Reflect::has(&self.document, &JsValue::from_str("fonts")).unwrap_or(false) {
            return false;
        }
        let ready = match self.document.fonts().ready() {
            Ok(promise) => promise,
            Err(err) => {
                log::debug!("document.fonts.ready unavailable: {}", describe_js(&err));
                return false;
            }
        };
        wasm_bindgen_futures::spawn_local(async move {
            match JsFuture::from(ready).await {
                Ok(_) => handler(),
                Err(err) => log::warn!("font loading failed: {}", describe_js(&err)),
            }
        });
        true
    }
}

/// `IntersectionObserver` factory; inert when the browser lacks the API
#[derive(Debug, Clone, Copy)]
pub struct WebIntersection {
    supported: bool,
}

impl WebIntersection {
    pub fn detect(window: &Window) -> Self {
        let supported =
            Reflect::has(window, &JsValue::from_str("IntersectionObserver")).unwrap_or(false);
        if !supported {
            log::info!("IntersectionObserver unavailable, visibility effects fire immediately");
        }
        Self { supported }
    }
}

impl<E: ElementHandle + JsCast> IntersectionHost<E> for WebIntersection {
    fn create_observer(
        &self,
        options: &WatchOptions,
        on_change: IntersectionCallback<E>,
    ) -> Option<Box<dyn IntersectionObserve<E>>> {
        if !self.supported {
            return None;
        }

        let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, observer: IntersectionObserver| {
                let reporter = ObserverRef(observer);
                for entry in entries.iter() {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    let Ok(target) = entry.target().dyn_into::<E>() else {
                        continue;
                    };
                    let change = Intersection {
                        is_intersecting: entry.is_intersecting(),
                        ratio: entry.intersection_ratio(),
                    };
                    on_change(&target, change, &reporter);
                }
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_root_margin(&options.root_margin);
        init.set_threshold(&JsValue::from_f64(options.threshold));

        match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
            Ok(observer) => Some(Box::new(WebObserver { observer: ObserverRef(observer), _callback: callback })),
            Err(err) => {
                log::warn!("IntersectionObserver construction failed: {}", describe_js(&err));
                None
            }
        }
    }
}

/// Borrowed view of an observer, as handed to change callbacks
struct ObserverRef(IntersectionObserver);

impl<E: JsCast> IntersectionObserve<E> for ObserverRef {
    fn observe(&self, target: &E) {
        self.0.observe(target.unchecked_ref());
    }

    fn unobserve(&self, target: &E) {
        self.0.unobserve(target.unchecked_ref());
    }
}

/// Owning observer; keeps the JS callback alive as long as the observer
struct WebObserver {
    observer: ObserverRef,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl<E: JsCast> IntersectionObserve<E> for WebObserver {
    fn observe(&self, target: &E) {
        IntersectionObserve::<E>::observe(&self.observer, target);
    }

    fn unobserve(&self, target: &E) {
        IntersectionObserve::<E>::unobserve(&self.observer, target);
    }
}
