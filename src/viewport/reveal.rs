//! Staggered reveal of project cards
//!
//! Each card is put in the pending state and given a delay of its position
//! times the stagger interval. When a card becomes visible its own timer
//! starts; timers of different cards never wait on each other.

use std::rc::Rc;

use crate::config::RevealSettings;
use crate::dom::{ElementHandle, IntersectionHost, Scheduler, WatchOptions};
use crate::models::StaggerIndex;
use crate::viewport::visibility::VisibilityWatcher;

pub struct RevealAnimator<E: ElementHandle> {
    watcher: VisibilityWatcher<E>,
}

impl<E: ElementHandle> RevealAnimator<E> {
    pub fn install(
        host: &dyn IntersectionHost<E>,
        scheduler: Rc<dyn Scheduler>,
        cards: impl IntoIterator<Item = E>,
        settings: &RevealSettings,
    ) -> Self {
        let watcher = VisibilityWatcher::new(host, &WatchOptions::new("0px", settings.threshold));

        if !watcher.is_supported() {
            // No animation at all: cards are simply shown
            for card in cards {
                card.add_class(&settings.visible_class);
            }
            return Self { watcher };
        }

        for (position, card) in cards.into_iter().enumerate() {
            let stagger = StaggerIndex::for_position(position, settings.stagger_ms);
            card.add_class(&settings.pending_class);
            card.set_attribute(&settings.index_attribute, &stagger.to_string());

            let scheduler = Rc::clone(&scheduler);
            let visible = settings.visible_class.clone();
            watcher.watch(card, move |card| {
                let card = card.clone();
                scheduler.set_timeout(stagger.delay_ms(), Box::new(move || card.add_class(&visible)));
            });
        }
        Self { watcher }
    }

    /// Cards that have not been seen yet
    pub fn pending(&self) -> usize {
        self.watcher.pending()
    }
}
