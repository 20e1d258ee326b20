//! Viewport-reactive components
//!
//! Each component is installed once when the document is ready and then runs
//! on its own, reacting to visibility, scroll and layout signals from the
//! host. They share nothing but the page itself.

pub mod coalesce;
pub mod header;
pub mod lazy_images;
pub mod reveal;
pub mod ripple;
pub mod visibility;

pub use coalesce::FrameCoalescer;
pub use header::{HeaderElements, HeaderHeightSync};
pub use lazy_images::LazyImageLoader;
pub use reveal::RevealAnimator;
pub use ripple::RippleEffect;
pub use visibility::VisibilityWatcher;
