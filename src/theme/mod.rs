//! Persisted light/dark theme toggle
//!
//! The body class is the source of truth for the current theme; the toggle
//! button's `aria-pressed`, icon and label mirror it.

use crate::config::ThemeSettings;
use crate::dom::ElementHandle;
use crate::models::Theme;

/// String key-value persistence (`localStorage` in the browser)
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

pub struct ThemeElements<E> {
    pub body: E,
    pub button: E,
    pub icon: E,
    pub label: E,
}

pub struct ThemeToggle<E: ElementHandle, S: PreferenceStore> {
    elements: ThemeElements<E>,
    store: S,
    settings: ThemeSettings,
}

impl<E: ElementHandle, S: PreferenceStore> ThemeToggle<E, S> {
    /// Resolve the starting theme from the store (or the platform preference) and apply it
    pub fn install(elements: ThemeElements<E>, store: S, prefers_dark: bool, settings: ThemeSettings) -> Self {
        let toggle = Self { elements, store, settings };
        let stored = toggle.store.get(&toggle.settings.storage_key);
        let theme = Theme::resolve(stored.as_deref(), prefers_dark);
        log::debug!("initial theme {:?} (stored: {:?}, prefers dark: {})", theme, stored, prefers_dark);
        toggle.apply(theme);
        toggle
    }

    pub fn current(&self) -> Theme {
        Theme::from_dark(self.elements.body.has_class(&self.settings.dark_class))
    }

    /// Flip the theme, persist it and return the new one
    pub fn toggle(&self) -> Theme {
        let theme = self.current().toggled();
        self.store.set(&self.settings.storage_key, theme.stored_value());
        self.apply(theme);
        theme
    }

    fn apply(&self, theme: Theme) {
        let ThemeElements { body, button, icon, label } = &self.elements;
        if theme.is_dark() {
            body.add_class(&self.settings.dark_class);
        } else {
            body.remove_class(&self.settings.dark_class);
        }
        button.set_attribute("aria-pressed", theme.aria_pressed());
        icon.set_attribute("class", theme.icon_class());
        label.set_text(theme.label());
    }
}
