//! One-shot visibility notifications
//!
//! A [`VisibilityWatcher`] owns one host observer for a fixed option set and
//! delivers `on_visible` at most once per registered element. The element is
//! unobserved before its callback runs, so a late duplicate report from the
//! host finds nothing to fire. Handled elements are remembered for the life of
//! the watcher and never observed again.

use std::cell::RefCell;
use std::rc::Rc;

use crate::dom::{
    ElementHandle, Intersection, IntersectionCallback, IntersectionHost, IntersectionObserve,
    WatchOptions,
};

struct PendingTarget<E> {
    target: E,
    on_visible: Box<dyn FnOnce(&E)>,
}

struct Targets<E> {
    pending: Vec<PendingTarget<E>>,
    handled: Vec<E>,
}

type SharedTargets<E> = Rc<RefCell<Targets<E>>>;

pub struct VisibilityWatcher<E: ElementHandle> {
    observer: Option<Box<dyn IntersectionObserve<E>>>,
    targets: SharedTargets<E>,
}

impl<E: ElementHandle> VisibilityWatcher<E> {
    pub fn new(host: &dyn IntersectionHost<E>, options: &WatchOptions) -> Self {
        let targets: SharedTargets<E> =
            Rc::new(RefCell::new(Targets { pending: Vec::new(), handled: Vec::new() }));
        let slots = Rc::clone(&targets);
        let on_change: IntersectionCallback<E> = Rc::new(
            move |target: &E, change: Intersection, observer: &dyn IntersectionObserve<E>| {
                if !change.is_intersecting {
                    return;
                }
                let Some(on_visible) = claim(&slots, target) else {
                    return;
                };
                observer.unobserve(target);
                on_visible(target);
            },
        );
        let observer = host.create_observer(options, on_change);
        Self { observer, targets }
    }

    /// Whether the host can observe visibility. Without it every `watch` fires immediately.
    pub fn is_supported(&self) -> bool {
        self.observer.is_some()
    }

    /// Call `on_visible` the first time `target` becomes visible
    pub fn watch(&self, target: E, on_visible: impl FnOnce(&E) + 'static) {
        if self.is_known(&target) {
            log::debug!("element already watched or handled, ignoring registration");
            return;
        }
        match &self.observer {
            Some(observer) => {
                self.targets
                    .borrow_mut()
                    .pending
                    .push(PendingTarget { target: target.clone(), on_visible: Box::new(on_visible) });
                observer.observe(&target);
            }
            None => {
                self.targets.borrow_mut().handled.push(target.clone());
                on_visible(&target);
            }
        }
    }

    fn is_known(&self, target: &E) -> bool {
        let targets = self.targets.borrow();
        targets.handled.contains(target) || targets.pending.iter().any(|p| p.target == *target)
    }

    /// Elements still waiting to become visible
    pub fn pending(&self) -> usize {
        self.targets.borrow().pending.len()
    }
}

// Moves the entry to `handled` before handing out its callback, so re-entrant
// reports and later registrations cannot claim it twice
fn claim<E: ElementHandle>(slots: &SharedTargets<E>, target: &E) -> Option<Box<dyn FnOnce(&E)>> {
    let mut targets = slots.borrow_mut();
    let index = targets.pending.iter().position(|p| p.target == *target)?;
    let entry = targets.pending.swap_remove(index);
    targets.handled.push(entry.target);
    Some(entry.on_visible)
}
