//! Theme toggle wiring: `localStorage`, the color-scheme media query and the button click

use std::rc::Rc;

use gloo::events::EventListener;
use web_sys::{Document, Element, Storage, Window};

use super::helpers::by_id;
use crate::config::ThemeSettings;
use crate::errors::describe_js;
use crate::theme::{PreferenceStore, ThemeElements, ThemeToggle};

/// `localStorage`; reads and writes become no-ops when storage is blocked
pub struct BrowserStorage(Option<Storage>);

impl BrowserStorage {
    pub fn open(window: &Window) -> Self {
        let storage = window.local_storage().ok().flatten();
        if storage.is_none() {
            log::info!("localStorage unavailable, theme preference will not persist");
        }
        Self(storage)
    }
}

impl PreferenceStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.0.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        let Some(storage) = &self.0 else {
            return;
        };
        if let Err(err) = storage.set_item(key, value) {
            log::warn!("could not persist {}: {}", key, describe_js(&err));
        }
    }
}

pub fn prefers_dark(window: &Window) -> bool {
    window
        .match_media("(prefers-color-scheme: dark)")
        .ok()
        .flatten()
        .map_or(false, |query| query.matches())
}

pub type WebThemeToggle = ThemeToggle<Element, BrowserStorage>;

/// Apply the starting theme and hook the toggle button. Skipped when the page has no toggle.
pub fn install(
    window: &Window,
    document: &Document,
    settings: &ThemeSettings,
    listeners: &mut Vec<EventListener>,
) -> Option<Rc<WebThemeToggle>> {
    let body: Option<Element> = document.body().map(Into::into);
    let (Some(body), Some(button), Some(icon), Some(label)) = (
        body,
        by_id::<Element>(document, &settings.toggle_id),
        by_id::<Element>(document, &settings.icon_id),
        by_id::<Element>(document, &settings.label_id),
    ) else {
        log::debug!("theme toggle markup not found, skipping");
        return None;
    };

    let toggle = Rc::new(ThemeToggle::install(
        ThemeElements { body, button: button.clone(), icon, label },
        BrowserStorage::open(window),
        prefers_dark(window),
        settings.clone(),
    ));

    let on_click = Rc::clone(&toggle);
    listeners.push(EventListener::new(&button, "click", move |_| {
        let theme = on_click.toggle();
        log::debug!("theme switched to {:?}", theme);
    }));
    Some(toggle)
}
