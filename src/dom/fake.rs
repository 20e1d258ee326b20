//! In-memory host for native tests
//!
//! `FakeElement` records class, attribute and style writes; `FakeScheduler`
//! runs timers against a virtual clock; `FakeViewport` and `FakeIntersection`
//! let a test script scrolling and visibility changes.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use super::{
    ElementHandle, ElementTree, FrameHandle, ImageHandle, Intersection, IntersectionCallback,
    IntersectionHost, IntersectionObserve, Scheduler, Viewport, WatchOptions,
};
use crate::models::Rect;

type Measure = Rc<dyn Fn(&FakeElement) -> Rect>;

#[derive(Default)]
pub struct FakeNode {
    tag: String,
    classes: RefCell<Vec<String>>,
    attributes: RefCell<HashMap<String, String>>,
    styles: RefCell<HashMap<String, String>>,
    text: RefCell<String>,
    rect: Cell<Rect>,
    measure: RefCell<Option<Measure>>,
    /// Selectors this element answers to in `closest`
    selectors: RefCell<Vec<String>>,
    parent: RefCell<Weak<FakeNode>>,
    children: RefCell<Vec<FakeElement>>,
    complete: Cell<bool>,
    load_handlers: RefCell<Vec<Box<dyn FnOnce()>>>,
    /// Number of class list mutations that changed something
    class_writes: Cell<usize>,
    /// Class additions, including ones that found the class already present
    class_adds: RefCell<Vec<String>>,
}

#[derive(Clone, Default)]
pub struct FakeElement(Rc<FakeNode>);

impl PartialEq for FakeElement {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl std::fmt::Debug for FakeElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FakeElement")
            .field("tag", &self.0.tag)
            .field("classes", &self.0.classes.borrow())
            .finish()
    }
}

impl FakeElement {
    pub fn new(tag: &str) -> Self {
        Self(Rc::new(FakeNode { tag: tag.to_string(), ..FakeNode::default() }))
    }

    /// An image; `complete` mirrors `HTMLImageElement.complete`
    pub fn image(complete: bool) -> Self {
        let img = Self::new("img");
        img.0.complete.set(complete);
        img
    }

    pub fn with_attribute(self, name: &str, value: &str) -> Self {
        self.0.attributes.borrow_mut().insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_rect(self, rect: Rect) -> Self {
        self.0.rect.set(rect);
        self
    }

    /// Compute the bounding rect on every query
    pub fn with_measure(self, measure: impl Fn(&FakeElement) -> Rect + 'static) -> Self {
        *self.0.measure.borrow_mut() = Some(Rc::new(measure));
        self
    }

    pub fn matching(self, selector: &str) -> Self {
        self.0.selectors.borrow_mut().push(selector.to_string());
        self
    }

    pub fn append(&self, child: &FakeElement) {
        *child.0.parent.borrow_mut() = Rc::downgrade(&self.0);
        self.0.children.borrow_mut().push(child.clone());
    }

    pub fn tag(&self) -> &str {
        &self.0.tag
    }

    pub fn children(&self) -> Vec<FakeElement> {
        self.0.children.borrow().clone()
    }

    pub fn style(&self, property: &str) -> Option<String> {
        self.0.styles.borrow().get(property).cloned()
    }

    pub fn text(&self) -> String {
        self.0.text.borrow().clone()
    }

    pub fn class_writes(&self) -> usize {
        self.0.class_writes.get()
    }

    /// How many times `class` was added, counting redundant adds
    pub fn adds_of(&self, class: &str) -> usize {
        self.0.class_adds.borrow().iter().filter(|c| c.as_str() == class).count()
    }

    pub fn load_listeners(&self) -> usize {
        self.0.load_handlers.borrow().len()
    }

    pub fn set_complete(&self, complete: bool) {
        self.0.complete.set(complete);
    }

    /// Deliver a load event to every pending once-listener
    pub fn fire_load(&self) {
        self.0.complete.set(true);
        let handlers: Vec<_> = self.0.load_handlers.borrow_mut().drain(..).collect();
        for handler in handlers {
            handler();
        }
    }
}

impl ElementHandle for FakeElement {
    fn add_class(&self, class: &str) {
        self.0.class_adds.borrow_mut().push(class.to_string());
        let mut classes = self.0.classes.borrow_mut();
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
            self.0.class_writes.set(self.0.class_writes.get() + 1);
        }
    }

    fn remove_class(&self, class: &str) {
        let mut classes = self.0.classes.borrow_mut();
        let before = classes.len();
        classes.retain(|c| c != class);
        if classes.len() != before {
            self.0.class_writes.set(self.0.class_writes.get() + 1);
        }
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.classes.borrow().iter().any(|c| c == class)
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.attributes.borrow().get(name).cloned()
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.0.attributes.borrow_mut().insert(name.to_string(), value.to_string());
    }

    fn set_style_property(&self, property: &str, value: &str) {
        self.0.styles.borrow_mut().insert(property.to_string(), value.to_string());
    }

    fn set_text(&self, text: &str) {
        *self.0.text.borrow_mut() = text.to_string();
    }

    fn bounding_rect(&self) -> Rect {
        let measure = self.0.measure.borrow().clone();
        match measure {
            Some(measure) => measure(self),
            None => self.0.rect.get(),
        }
    }
}

impl ElementTree for FakeElement {
    fn closest(&self, selector: &str) -> Option<Self> {
        let mut current = Some(self.clone());
        while let Some(el) = current {
            if el.0.selectors.borrow().iter().any(|s| s == selector) {
                return Some(el);
            }
            current = el.0.parent.borrow().upgrade().map(FakeElement);
        }
        None
    }

    fn append_element(&self, tag: &str) -> Option<Self> {
        let child = FakeElement::new(tag);
        self.append(&child);
        Some(child)
    }

    fn remove(&self) {
        let parent = self.0.parent.borrow().upgrade();
        if let Some(parent) = parent {
            parent.children.borrow_mut().retain(|c| c != self);
        }
        *self.0.parent.borrow_mut() = Weak::new();
    }
}

impl ImageHandle for FakeElement {
    fn is_complete(&self) -> bool {
        self.0.complete.get()
    }

    fn on_load_once(&self, callback: Box<dyn FnOnce()>) {
        self.0.load_handlers.borrow_mut().push(callback);
    }
}

struct Timer {
    due: u64,
    seq: u64,
    task: Box<dyn FnOnce()>,
}

struct QueuedFrame {
    live: Rc<Cell<bool>>,
    task: Box<dyn FnOnce()>,
}

/// Stands in for the browser's frame id; dropping it cancels the frame
struct CancelOnDrop(Rc<Cell<bool>>);

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Virtual clock. Timers run in due order, ties in scheduling order.
#[derive(Default)]
pub struct FakeScheduler {
    now: Cell<u64>,
    seq: Cell<u64>,
    timers: RefCell<Vec<Timer>>,
    frames: RefCell<Vec<QueuedFrame>>,
    requested_frames: Cell<usize>,
    /// (scheduled at, delay) for every timer ever set
    delays: RefCell<Vec<(u64, u32)>>,
}

impl FakeScheduler {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn now(&self) -> u64 {
        self.now.get()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.borrow().len()
    }

    /// Frames queued and not cancelled
    pub fn pending_frames(&self) -> usize {
        self.frames.borrow().iter().filter(|f| f.live.get()).count()
    }

    pub fn requested_frames(&self) -> usize {
        self.requested_frames.get()
    }

    pub fn delays(&self) -> Vec<(u64, u32)> {
        self.delays.borrow().clone()
    }

    /// Move the clock forward, running every timer that comes due
    pub fn advance(&self, ms: u64) {
        let target = self.now.get() + ms;
        loop {
            let next = {
                let mut timers = self.timers.borrow_mut();
                let index = timers
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due <= target)
                    .min_by_key(|(_, t)| (t.due, t.seq))
                    .map(|(i, _)| i);
                index.map(|i| timers.remove(i))
            };
            match next {
                Some(timer) => {
                    self.now.set(timer.due.max(self.now.get()));
                    (timer.task)();
                }
                None => break,
            }
        }
        self.now.set(target);
    }

    /// Run the frame callbacks queued so far, skipping cancelled ones
    pub fn run_frame(&self) {
        let frames: Vec<_> = self.frames.borrow_mut().drain(..).collect();
        for frame in frames {
            if frame.live.get() {
                (frame.task)();
            }
        }
    }
}

impl Scheduler for FakeScheduler {
    fn set_timeout(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        let seq = self.seq.get();
        self.seq.set(seq + 1);
        self.delays.borrow_mut().push((self.now.get(), delay_ms));
        self.timers.borrow_mut().push(Timer { due: self.now.get() + u64::from(delay_ms), seq, task });
    }

    fn request_frame(&self, task: Box<dyn FnOnce()>) -> FrameHandle {
        self.requested_frames.set(self.requested_frames.get() + 1);
        let live = Rc::new(Cell::new(true));
        self.frames.borrow_mut().push(QueuedFrame { live: Rc::clone(&live), task });
        FrameHandle::new(CancelOnDrop(live))
    }
}

#[derive(Default)]
pub struct FakeViewport {
    scroll_y: Cell<f64>,
    scroll: RefCell<Vec<Rc<dyn Fn()>>>,
    resize: RefCell<Vec<Rc<dyn Fn()>>>,
    orientation: RefCell<Vec<Rc<dyn Fn()>>>,
    fonts: RefCell<Vec<Box<dyn FnOnce()>>>,
    fonts_supported: Cell<bool>,
}

impl FakeViewport {
    pub fn new(scroll_y: f64) -> Rc<Self> {
        let viewport = Self::default();
        viewport.scroll_y.set(scroll_y);
        viewport.fonts_supported.set(true);
        Rc::new(viewport)
    }

    pub fn without_font_loading(self: Rc<Self>) -> Rc<Self> {
        self.fonts_supported.set(false);
        self
    }

    /// Set the offset and deliver `count` scroll events
    pub fn scroll_to(&self, y: f64, count: usize) {
        self.scroll_y.set(y);
        for _ in 0..count {
            let handlers = self.scroll.borrow().clone();
            for handler in handlers {
                handler();
            }
        }
    }

    pub fn resize(&self) {
        let handlers = self.resize.borrow().clone();
        for handler in handlers {
            handler();
        }
    }

    pub fn rotate(&self) {
        let handlers = self.orientation.borrow().clone();
        for handler in handlers {
            handler();
        }
    }

    pub fn fonts_loaded(&self) {
        let handlers: Vec<_> = self.fonts.borrow_mut().drain(..).collect();
        for handler in handlers {
            handler();
        }
    }

    pub fn scroll_listeners(&self) -> usize {
        self.scroll.borrow().len()
    }
}

impl Viewport for FakeViewport {
    fn scroll_y(&self) -> f64 {
        self.scroll_y.get()
    }

    fn on_scroll(&self, handler: Rc<dyn Fn()>) {
        self.scroll.borrow_mut().push(handler);
    }

    fn on_resize(&self, handler: Rc<dyn Fn()>) {
        self.resize.borrow_mut().push(handler);
    }

    fn on_orientation_change(&self, handler: Rc<dyn Fn()>) {
        self.orientation.borrow_mut().push(handler);
    }

    fn on_fonts_ready(&self, handler: Box<dyn FnOnce()>) -> bool {
        if !self.fonts_supported.get() {
            return false;
        }
        self.fonts.borrow_mut().push(handler);
        true
    }
}

struct ObserverState {
    options: WatchOptions,
    observed: RefCell<Vec<FakeElement>>,
    on_change: IntersectionCallback<FakeElement>,
}

#[derive(Clone)]
struct FakeObserver(Rc<ObserverState>);

impl IntersectionObserve<FakeElement> for FakeObserver {
    fn observe(&self, target: &FakeElement) {
        let mut observed = self.0.observed.borrow_mut();
        if !observed.contains(target) {
            observed.push(target.clone());
        }
    }

    fn unobserve(&self, target: &FakeElement) {
        self.0.observed.borrow_mut().retain(|e| e != target);
    }
}

/// Scripted visibility. `supported == false` models a host without the capability.
pub struct FakeIntersection {
    supported: bool,
    observers: RefCell<Vec<FakeObserver>>,
}

impl FakeIntersection {
    pub fn new() -> Self {
        Self { supported: true, observers: RefCell::new(Vec::new()) }
    }

    pub fn unsupported() -> Self {
        Self { supported: false, observers: RefCell::new(Vec::new()) }
    }

    pub fn options(&self) -> Vec<WatchOptions> {
        self.observers.borrow().iter().map(|o| o.0.options.clone()).collect()
    }

    pub fn is_observed(&self, target: &FakeElement) -> bool {
        self.observers.borrow().iter().any(|o| o.0.observed.borrow().contains(target))
    }

    /// Report a new visible fraction for `target` to every observer watching it
    pub fn report(&self, target: &FakeElement, ratio: f64) {
        let observers = self.observers.borrow().clone();
        for observer in observers {
            if !observer.0.observed.borrow().contains(target) {
                continue;
            }
            let change = Intersection {
                is_intersecting: ratio > 0.0 && ratio >= observer.0.options.threshold,
                ratio,
            };
            let on_change = Rc::clone(&observer.0.on_change);
            on_change(target, change, &observer);
        }
    }
}

impl IntersectionHost<FakeElement> for FakeIntersection {
    fn create_observer(
        &self,
        options: &WatchOptions,
        on_change: IntersectionCallback<FakeElement>,
    ) -> Option<Box<dyn IntersectionObserve<FakeElement>>> {
        if !self.supported {
            return None;
        }
        let observer = FakeObserver(Rc::new(ObserverState {
            options: options.clone(),
            observed: RefCell::new(Vec::new()),
            on_change,
        }));
        self.observers.borrow_mut().push(observer.clone());
        Some(Box::new(observer))
    }
}
