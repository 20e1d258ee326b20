//! Theme preference and how each theme is presented on the toggle button.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Resolve the starting theme.
    ///
    /// A stored preference wins; `"true"` means dark and any other stored value means
    /// light. With nothing stored, the platform color-scheme preference decides.
    pub fn resolve(stored: Option<&str>, prefers_dark: bool) -> Self {
        match stored {
            Some(value) => Theme::from_dark(value == "true"),
            None => Theme::from_dark(prefers_dark),
        }
    }

    pub fn from_dark(dark: bool) -> Self {
        if dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn is_dark(self) -> bool {
        matches!(self, Theme::Dark)
    }

    pub fn toggled(self) -> Self {
        Theme::from_dark(!self.is_dark())
    }

    /// Value written to the preference store
    pub fn stored_value(self) -> &'static str {
        if self.is_dark() {
            "true"
        } else {
            "false"
        }
    }

    /// `aria-pressed` value of the toggle button
    pub fn aria_pressed(self) -> &'static str {
        self.stored_value()
    }

    /// Icon classes offer the opposite theme
    pub fn icon_class(self) -> &'static str {
        match self {
            Theme::Dark => "fa-solid fa-sun",
            Theme::Light => "fa-regular fa-moon",
        }
    }

    /// Button label names the theme a click switches to
    pub fn label(self) -> &'static str {
        match self {
            Theme::Dark => "Light",
            Theme::Light => "Dark",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_preference_wins() {
        assert_eq!(Theme::resolve(Some("true"), false), Theme::Dark);
        assert_eq!(Theme::resolve(Some("false"), true), Theme::Light);
        assert_eq!(Theme::resolve(Some("garbage"), true), Theme::Light);
    }

    #[test]
    fn test_platform_preference_without_stored_value() {
        assert_eq!(Theme::resolve(None, true), Theme::Dark);
        assert_eq!(Theme::resolve(None, false), Theme::Light);
    }

    #[test]
    fn test_presentation() {
        assert_eq!(Theme::Dark.icon_class(), "fa-solid fa-sun");
        assert_eq!(Theme::Dark.label(), "Light");
        assert_eq!(Theme::Light.icon_class(), "fa-regular fa-moon");
        assert_eq!(Theme::Light.label(), "Dark");
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
    }
}
