//! Page settings
//!
//! Every selector, class name, threshold and delay the components use. All
//! fields default to the values the site's markup and stylesheet expect, so the
//! page script may pass only what it overrides (or nothing at all).

use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

use crate::errors::PageError;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub lazy_images: LazyImageSettings,
    pub reveal: RevealSettings,
    pub header: HeaderSettings,
    pub ripple: RippleSettings,
    pub theme: ThemeSettings,
    pub contact: ContactSettings,
}

impl Settings {
    /// Read settings handed over from JavaScript; `undefined`/`null` selects defaults.
    pub fn from_js(value: JsValue) -> Result<Self, PageError> {
        if value.is_undefined() || value.is_null() {
            return Ok(Self::default());
        }
        serde_wasm_bindgen::from_value(value).map_err(|e| PageError::Settings(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, PageError> {
        serde_json::from_str(json).map_err(|e| PageError::Settings(e.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LazyImageSettings {
    pub selector: String,
    pub source_attribute: String,
    pub loaded_class: String,
    pub root_margin: String,
    pub threshold: f64,
}

impl Default for LazyImageSettings {
    fn default() -> Self {
        Self {
            selector: "img.lazy".to_string(),
            source_attribute: "data-src".to_string(),
            loaded_class: "loaded".to_string(),
            root_margin: "200px 0px".to_string(),
            threshold: 0.01,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RevealSettings {
    pub card_selector: String,
    /// Images inside cards that get the loaded marker, deferred or not
    pub card_image_selector: String,
    pub pending_class: String,
    pub visible_class: String,
    pub index_attribute: String,
    pub stagger_ms: u32,
    pub threshold: f64,
}

impl Default for RevealSettings {
    fn default() -> Self {
        Self {
            card_selector: ".project-card".to_string(),
            card_image_selector: ".project-card img".to_string(),
            pending_class: "reveal".to_string(),
            visible_class: "visible".to_string(),
            index_attribute: "data-index".to_string(),
            stagger_ms: 80,
            threshold: 0.15,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeaderSettings {
    pub header_id: String,
    pub main_selector: String,
    pub shrink_class: String,
    /// Scroll offset above which the header shrinks
    pub shrink_after_px: f64,
    pub height_variable: String,
    pub orientation_settle_ms: u32,
    pub settle_correction_ms: u32,
}

impl Default for HeaderSettings {
    fn default() -> Self {
        Self {
            header_id: "ao-header".to_string(),
            main_selector: "main".to_string(),
            shrink_class: "shrink".to_string(),
            shrink_after_px: 50.0,
            height_variable: "--header-height".to_string(),
            orientation_settle_ms: 120,
            settle_correction_ms: 350,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RippleSettings {
    pub trigger_selector: String,
    pub class_name: String,
    pub lifetime_ms: u32,
}

impl Default for RippleSettings {
    fn default() -> Self {
        Self {
            trigger_selector: ".project-overlay .btn".to_string(),
            class_name: "ripple".to_string(),
            lifetime_ms: 650,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ThemeSettings {
    pub storage_key: String,
    pub dark_class: String,
    pub toggle_id: String,
    pub icon_id: String,
    pub label_id: String,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            storage_key: "ao_dark_mode".to_string(),
            dark_class: "dark-mode".to_string(),
            toggle_id: "darkToggle".to_string(),
            icon_id: "darkIcon".to_string(),
            label_id: "darkLabel".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactSettings {
    pub form_id: String,
    pub status_id: String,
    pub name_id: String,
    pub email_id: String,
    pub message_id: String,
}

impl ContactSettings {
    /// Id of the input element for a field
    pub fn input_id(&self, field: crate::models::Field) -> &str {
        use crate::models::Field;
        match field {
            Field::Name => &self.name_id,
            Field::Email => &self.email_id,
            Field::Message => &self.message_id,
        }
    }

    /// Id of the element showing a field's error; `<input id>Error` by convention
    pub fn error_id(&self, field: crate::models::Field) -> String {
        format!("{}Error", self.input_id(field))
    }
}

impl Default for ContactSettings {
    fn default() -> Self {
        Self {
            form_id: "contactForm".to_string(),
            status_id: "formStatus".to_string(),
            name_id: "name".to_string(),
            email_id: "email".to_string(),
            message_id: "message".to_string(),
        }
    }
}
