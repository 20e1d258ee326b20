//! Single-slot frame coalescing
//!
//! At most one frame callback is pending at a time. Requests made while one
//! is pending are dropped, not queued, which bounds work to one pass per
//! display refresh no matter how often the triggering event fires.

use std::cell::RefCell;
use std::rc::Rc;

use crate::dom::{FrameHandle, Scheduler};

type FrameSlot = Rc<RefCell<Option<FrameHandle>>>;

/// Dropping the coalescer cancels its pending frame
pub struct FrameCoalescer {
    scheduler: Rc<dyn Scheduler>,
    slot: FrameSlot,
}

impl FrameCoalescer {
    pub fn new(scheduler: Rc<dyn Scheduler>) -> Self {
        Self { scheduler, slot: Rc::new(RefCell::new(None)) }
    }

    /// Schedule `task` for the next frame unless one is already pending.
    /// Returns whether `task` was scheduled.
    pub fn request(&self, task: impl FnOnce() + 'static) -> bool {
        if self.slot.borrow().is_some() {
            return false;
        }
        // Weak, so the queued frame does not keep its own slot alive
        let slot = Rc::downgrade(&self.slot);
        let handle = self.scheduler.request_frame(Box::new(move || {
            task();
            if let Some(slot) = slot.upgrade() {
                slot.borrow_mut().take();
            }
        }));
        *self.slot.borrow_mut() = Some(handle);
        true
    }

    pub fn is_pending(&self) -> bool {
        self.slot.borrow().is_some()
    }
}
