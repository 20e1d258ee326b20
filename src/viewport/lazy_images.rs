//! Deferred image loading and the `loaded` fade-in marker
//!
//! Two paths set the marker. Deferred images (carrying the source attribute)
//! get their real source once they come within the look-ahead margin and are
//! marked on load. Every card image, deferred or not, is marked right away when
//! it already finished loading, otherwise on its next load event. Both paths
//! go through [`mark_loaded`], which adds the class only when it is absent.
//! A deferred image is never marked while its placeholder is the live source.

use std::rc::Rc;

use crate::config::LazyImageSettings;
use crate::dom::{ImageHandle, IntersectionHost, WatchOptions};
use crate::viewport::visibility::VisibilityWatcher;

pub struct LazyImageLoader<I: ImageHandle> {
    watcher: VisibilityWatcher<I>,
    settings: Rc<LazyImageSettings>,
}

impl<I: ImageHandle> LazyImageLoader<I> {
    pub fn new(host: &dyn IntersectionHost<I>, settings: LazyImageSettings) -> Self {
        let options = WatchOptions::new(settings.root_margin.clone(), settings.threshold);
        Self { watcher: VisibilityWatcher::new(host, &options), settings: Rc::new(settings) }
    }

    /// Defer every image carrying the source attribute; others are left alone
    pub fn defer_all(&self, images: impl IntoIterator<Item = I>) {
        let mut deferred = 0;
        for image in images {
            if image.attribute(&self.settings.source_attribute).is_none() {
                continue;
            }
            let settings = Rc::clone(&self.settings);
            self.watcher.watch(image, move |image| assign_source(image, &settings));
            deferred += 1;
        }
        log::debug!("deferring {} images", deferred);
    }

    /// Attach the loaded marker to card images that may already be complete
    pub fn track_loaded(&self, images: impl IntoIterator<Item = I>) {
        for image in images {
            if image.is_complete() && !awaiting_source(&image, &self.settings) {
                mark_loaded(&image, &self.settings.loaded_class);
                continue;
            }
            let settings = Rc::clone(&self.settings);
            let target = image.clone();
            image.on_load_once(Box::new(move || {
                // Placeholder finished; the real source registers its own listener
                if !awaiting_source(&target, &settings) {
                    mark_loaded(&target, &settings.loaded_class);
                }
            }));
        }
    }

    /// Deferred images not yet near the viewport
    pub fn pending(&self) -> usize {
        self.watcher.pending()
    }
}

fn assign_source<I: ImageHandle>(image: &I, settings: &LazyImageSettings) {
    let Some(source) = image.attribute(&settings.source_attribute) else {
        return;
    };
    image.set_attribute("src", &source);
    let class = settings.loaded_class.clone();
    let target = image.clone();
    image.on_load_once(Box::new(move || mark_loaded(&target, &class)));
}

// An image with a source attribute whose real source is not live yet reports
// `complete` for its placeholder; that must not count as loaded.
fn awaiting_source<I: ImageHandle>(image: &I, settings: &LazyImageSettings) -> bool {
    match image.attribute(&settings.source_attribute) {
        Some(deferred) => image.attribute("src").as_deref() != Some(deferred.as_str()),
        None => false,
    }
}

pub fn mark_loaded<I: ImageHandle>(image: &I, class: &str) {
    if !image.has_class(class) {
        image.add_class(class);
    }
}
