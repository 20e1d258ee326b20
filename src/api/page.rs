//! Page context: built once when the document is ready, alive for the session
//!
//! Holds the host services (scheduler, viewport, visibility) and every installed
//! component. Components never call each other; they only share the document.

use std::rc::Rc;

use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlImageElement, MouseEvent, Window};

use super::helpers::{by_id, query, query_all, query_all_within};
use super::{contact, theme};
use crate::config::Settings;
use crate::dom::web::{WebIntersection, WebScheduler, WebViewport};
use crate::dom::Scheduler;
use crate::errors::PageError;
use crate::models::Point;
use crate::viewport::{HeaderElements, HeaderHeightSync, LazyImageLoader, RevealAnimator, RippleEffect};

pub struct Page {
    pub theme: Option<Rc<theme::WebThemeToggle>>,
    pub contact: Option<Rc<contact::WebContact>>,
    pub lazy_images: LazyImageLoader<HtmlImageElement>,
    pub reveal: RevealAnimator<Element>,
    pub header: Option<Rc<HeaderHeightSync<Element>>>,
    _viewport: Rc<WebViewport>,
    _listeners: Vec<EventListener>,
}

impl Page {
    /// Look up every element first, so a rejected selector leaves the page untouched
    pub fn mount(window: Window, document: Document, settings: &Settings) -> Result<Self, PageError> {
        let root = document.document_element().ok_or(PageError::NoDocument)?;
        let deferred = query_all::<HtmlImageElement>(&document, &settings.lazy_images.selector)?;
        let cards = query_all::<Element>(&document, &settings.reveal.card_selector)?;
        let card_images = query_all::<HtmlImageElement>(&document, &settings.reveal.card_image_selector)?;
        let header_el = by_id::<Element>(&document, &settings.header.header_id);
        let header_images = match &header_el {
            Some(header) => query_all_within::<HtmlImageElement>(header, "img")?,
            None => Vec::new(),
        };
        let main = query::<Element>(&document, &settings.header.main_selector)?;

        let scheduler: Rc<dyn Scheduler> = Rc::new(WebScheduler);
        let viewport = Rc::new(WebViewport::new(window.clone(), document.clone()));
        let intersection = WebIntersection::detect(&window);
        let mut listeners = Vec::new();

        let theme = theme::install(&window, &document, &settings.theme, &mut listeners);
        let contact = contact::install(&document, &settings.contact, &mut listeners);

        let lazy_images = LazyImageLoader::<HtmlImageElement>::new(&intersection, settings.lazy_images.clone());
        lazy_images.defer_all(deferred);

        let card_count = cards.len();
        let reveal = RevealAnimator::<Element>::install(&intersection, Rc::clone(&scheduler), cards, &settings.reveal);

        lazy_images.track_loaded(card_images);

        let ripple = RippleEffect::new(Rc::clone(&scheduler), settings.ripple.clone());
        listeners.push(EventListener::new(&document, "click", move |event| {
            let Some(click) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let Some(target) = click.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                return;
            };
            let at = Point::new(f64::from(click.client_x()), f64::from(click.client_y()));
            ripple.handle_click(&target, at);
        }));

        let header = HeaderHeightSync::install(
            HeaderElements { header: header_el, main, root },
            header_images,
            viewport.clone(),
            scheduler,
            settings.header.clone(),
        );

        log::info!(
            "page behavior ready: {} cards, {} deferred images, header sync {}",
            card_count,
            lazy_images.pending(),
            if header.is_some() { "on" } else { "off" },
        );

        Ok(Self {
            theme,
            contact,
            lazy_images,
            reveal,
            header,
            _viewport: viewport,
            _listeners: listeners,
        })
    }
}
