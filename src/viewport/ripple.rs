//! Click ripples on project card buttons
//!
//! Stateless: each click spawns its own element inside the button and a timer
//! that removes it. Overlapping ripples never interact.

use std::rc::Rc;

use crate::config::RippleSettings;
use crate::dom::{ElementTree, Scheduler};
use crate::models::{px, Point, RippleGeometry};

pub struct RippleEffect {
    scheduler: Rc<dyn Scheduler>,
    settings: RippleSettings,
}

impl RippleEffect {
    pub fn new(scheduler: Rc<dyn Scheduler>, settings: RippleSettings) -> Self {
        Self { scheduler, settings }
    }

    /// Handle a click that bubbled up from `target`. Returns the ripple when
    /// the click came from inside a ripple button.
    pub fn handle_click<E: ElementTree>(&self, target: &E, click: Point) -> Option<E> {
        let button = target.closest(&self.settings.trigger_selector)?;
        self.spawn(&button, click)
    }

    pub fn spawn<E: ElementTree>(&self, button: &E, click: Point) -> Option<E> {
        let geometry = RippleGeometry::from_click(button.bounding_rect(), click);
        let ripple = button.append_element("span")?;
        ripple.add_class(&self.settings.class_name);
        ripple.set_style_property("left", &px(geometry.left));
        ripple.set_style_property("top", &px(geometry.top));
        ripple.set_style_property("width", &px(geometry.size));
        ripple.set_style_property("height", &px(geometry.size));

        let expired = ripple.clone();
        self.scheduler.set_timeout(self.settings.lifetime_ms, Box::new(move || expired.remove()));
        Some(ripple)
    }
}
