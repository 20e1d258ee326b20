//! Shrinking header with a synced content offset
//!
//! The header shrinks once the page scrolls past a threshold. Its rendered
//! height is published as a root custom property (and mirrored as the main
//! element's `padding-top`) so content never sits under it or leaves a gap.
//!
//! Scroll handling is coalesced to one pass per frame. Within that pass the
//! mode is applied first and the height measured afterwards, since the two
//! modes render at different heights. Every other layout signal (resize,
//! orientation change, font loading, header image loads, a settle timer)
//! republishes the height without coalescing.

use std::cell::Cell;
use std::rc::Rc;

use crate::config::HeaderSettings;
use crate::dom::{ElementHandle, ImageHandle, Scheduler, Viewport};
use crate::models::header::publishable_height;
use crate::models::{px, HeaderMode, HeaderState};
use crate::viewport::coalesce::FrameCoalescer;

/// Elements the header sync works on, looked up by the caller
pub struct HeaderElements<E> {
    pub header: Option<E>,
    pub main: Option<E>,
    /// Document root carrying the height custom property
    pub root: E,
}

pub struct HeaderHeightSync<E: ElementHandle> {
    header: E,
    main: E,
    root: E,
    viewport: Rc<dyn Viewport>,
    scheduler: Rc<dyn Scheduler>,
    frame: FrameCoalescer,
    state: Cell<HeaderState>,
    settings: HeaderSettings,
}

impl<E: ElementHandle> HeaderHeightSync<E> {
    /// Apply the initial mode, publish the height and subscribe to every
    /// signal that can change it. Returns `None` when the page has no header
    /// or no main element.
    pub fn install<I: ImageHandle>(
        elements: HeaderElements<E>,
        header_images: impl IntoIterator<Item = I>,
        viewport: Rc<dyn Viewport>,
        scheduler: Rc<dyn Scheduler>,
        settings: HeaderSettings,
    ) -> Option<Rc<Self>> {
        let (Some(header), Some(main)) = (elements.header, elements.main) else {
            log::debug!("no header/main element on this page, header sync disabled");
            return None;
        };

        let sync = Rc::new(Self {
            header,
            main,
            root: elements.root,
            viewport,
            frame: FrameCoalescer::new(Rc::clone(&scheduler)),
            scheduler,
            state: Cell::new(HeaderState::default()),
            settings,
        });

        // A page restored mid-scroll starts shrunk, without a visible flash
        sync.apply_mode(sync.current_mode(), true);
        sync.update_header_height();
        sync.subscribe(header_images);
        Some(sync)
    }

    fn subscribe<I: ImageHandle>(self: &Rc<Self>, header_images: impl IntoIterator<Item = I>) {
        let this = Rc::clone(self);
        self.viewport.on_scroll(Rc::new(move || this.on_scroll()));

        let this = Rc::clone(self);
        self.viewport.on_resize(Rc::new(move || {
            this.update_header_height();
        }));

        let this = Rc::clone(self);
        self.viewport.on_orientation_change(Rc::new(move || {
            let settled = Rc::clone(&this);
            this.scheduler.set_timeout(
                this.settings.orientation_settle_ms,
                Box::new(move || {
                    settled.update_header_height();
                }),
            );
        }));

        let this = Rc::clone(self);
        if !self.viewport.on_fonts_ready(Box::new(move || {
            this.update_header_height();
        })) {
            log::debug!("font loading not observable, relying on the settle timer");
        }

        for image in header_images {
            if image.is_complete() {
                continue;
            }
            let this = Rc::clone(self);
            image.on_load_once(Box::new(move || {
                this.update_header_height();
            }));
        }

        let this = Rc::clone(self);
        self.scheduler.set_timeout(
            self.settings.settle_correction_ms,
            Box::new(move || {
                this.update_header_height();
            }),
        );
    }

    /// Measure the header and publish its height. Returns the published value.
    pub fn update_header_height(&self) -> f64 {
        let height = publishable_height(self.header.bounding_rect().height);
        let value = px(height);
        self.root.set_style_property(&self.settings.height_variable, &value);
        self.main.set_style_property("padding-top", &value);

        let mut state = self.state.get();
        state.height_px = height;
        self.state.set(state);
        height
    }

    /// Scroll event entry point; work happens on the next frame at most once
    pub fn on_scroll(self: &Rc<Self>) {
        let this = Rc::clone(self);
        self.frame.request(move || this.sync_to_scroll());
    }

    /// Recompute the mode from the latest offset, then republish the height
    fn sync_to_scroll(&self) {
        self.apply_mode(self.current_mode(), false);
        self.update_header_height();
    }

    fn current_mode(&self) -> HeaderMode {
        HeaderMode::for_scroll(self.viewport.scroll_y(), self.settings.shrink_after_px)
    }

    // Touches the class list only on an actual transition
    fn apply_mode(&self, mode: HeaderMode, initial: bool) {
        let mut state = self.state.get();
        if state.mode == mode && !initial {
            return;
        }
        match mode {
            HeaderMode::Shrunk => self.header.add_class(&self.settings.shrink_class),
            HeaderMode::Expanded if !initial => self.header.remove_class(&self.settings.shrink_class),
            HeaderMode::Expanded => {}
        }
        if state.mode != mode {
            log::debug!("header {:?} -> {:?}", state.mode, mode);
        }
        state.mode = mode;
        self.state.set(state);
    }

    pub fn state(&self) -> HeaderState {
        self.state.get()
    }
}
