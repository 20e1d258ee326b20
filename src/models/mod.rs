//! Models module for the portfolio behavior layer
//!
//! Plain data shared by the viewport components, the theme toggle and the
//! contact form. Nothing here touches the host environment.

pub mod contact;
pub mod geometry;
pub mod header;
pub mod reveal;
pub mod theme;

// Re-export commonly used types
pub use contact::{Field, FormStatus, Validity};
pub use geometry::{px, Point, Rect, RippleGeometry};
pub use header::{HeaderMode, HeaderState};
pub use reveal::StaggerIndex;
pub use theme::Theme;
