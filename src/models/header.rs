//! Header state shared by the shrinking header and the content offset.

use serde::{Deserialize, Serialize};

/// Visual mode of the page header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderMode {
    #[default]
    Expanded,
    Shrunk,
}

impl HeaderMode {
    /// Mode for a vertical scroll offset. Shrunk strictly above the threshold.
    pub fn for_scroll(offset: f64, shrink_after: f64) -> Self {
        if offset > shrink_after {
            HeaderMode::Shrunk
        } else {
            HeaderMode::Expanded
        }
    }
}

/// Current header mode paired with the last published height
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HeaderState {
    pub mode: HeaderMode,
    /// Rendered height in whole pixels, as last published
    pub height_px: f64,
}

/// Round a measured height up to whole pixels, so content never slides under the header
pub fn publishable_height(measured: f64) -> f64 {
    if measured.is_finite() && measured > 0.0 {
        measured.ceil()
    } else {
        0.0
    }
}
