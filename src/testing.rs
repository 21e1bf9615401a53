//! In-memory page and virtual clock for unit tests.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::rc::Rc;

use crate::dom::{DomNode, PageRoot};
use crate::hero::LoadSignals;
use crate::timing::Scheduler;

#[derive(Default)]
struct NodeState {
    classes: BTreeSet<String>,
    styles: BTreeMap<String, String>,
    text: String,
    disabled: bool,
    resets: usize,
    sibling_index: usize,
    layout_top: f64,
    layout_height: f64,
    viewport_top: f64,
}

#[derive(Clone, Default)]
pub struct FakeNode(Rc<RefCell<NodeState>>);

impl FakeNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_classes(classes: &[&str]) -> Self {
        let node = Self::new();
        for class in classes {
            node.add_class(class);
        }
        node
    }

    pub fn with_text(text: &str) -> Self {
        let node = Self::new();
        node.set_text(text);
        node
    }

    pub fn at_index(self, index: usize) -> Self {
        self.0.borrow_mut().sibling_index = index;
        self
    }

    pub fn with_layout(self, top: f64, height: f64) -> Self {
        {
            let mut state = self.0.borrow_mut();
            state.layout_top = top;
            state.layout_height = height;
        }
        self
    }

    pub fn set_viewport_top(&self, top: f64) {
        self.0.borrow_mut().viewport_top = top;
    }

    pub fn style(&self, property: &str) -> Option<String> {
        self.0.borrow().styles.get(property).cloned()
    }

    pub fn is_disabled(&self) -> bool {
        self.0.borrow().disabled
    }

    pub fn reset_count(&self) -> usize {
        self.0.borrow().resets
    }
}

impl DomNode for FakeNode {
    fn set_style(&self, property: &str, value: &str) {
        self.0
            .borrow_mut()
            .styles
            .insert(property.to_string(), value.to_string());
    }

    fn clear_style(&self, property: &str) {
        self.0.borrow_mut().styles.remove(property);
    }

    fn add_class(&self, class: &str) {
        self.0.borrow_mut().classes.insert(class.to_string());
    }

    fn remove_class(&self, class: &str) {
        self.0.borrow_mut().classes.remove(class);
    }

    fn toggle_class(&self, class: &str) -> bool {
        let mut state = self.0.borrow_mut();
        if state.classes.remove(class) {
            false
        } else {
            state.classes.insert(class.to_string());
            true
        }
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.borrow().classes.contains(class)
    }

    fn text(&self) -> String {
        self.0.borrow().text.clone()
    }

    fn set_text(&self, text: &str) {
        self.0.borrow_mut().text = text.to_string();
    }

    fn set_disabled(&self, disabled: bool) {
        self.0.borrow_mut().disabled = disabled;
    }

    fn reset(&self) {
        self.0.borrow_mut().resets += 1;
    }

    fn sibling_index(&self) -> usize {
        self.0.borrow().sibling_index
    }

    fn layout_top(&self) -> f64 {
        self.0.borrow().layout_top
    }

    fn layout_height(&self) -> f64 {
        self.0.borrow().layout_height
    }

    fn viewport_top(&self) -> f64 {
        self.0.borrow().viewport_top
    }
}

/// Elements are registered by id and under literal selector strings.
#[derive(Default)]
pub struct FakePage {
    ids: HashMap<String, FakeNode>,
    selectors: HashMap<String, Vec<FakeNode>>,
}

impl FakePage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: &str, node: &FakeNode) -> Self {
        self.ids.insert(id.to_string(), node.clone());
        self
    }

    pub fn with_selector(mut self, selector: &str, nodes: &[&FakeNode]) -> Self {
        self.selectors.insert(
            selector.to_string(),
            nodes.iter().map(|node| (*node).clone()).collect(),
        );
        self
    }
}

impl PageRoot for FakePage {
    type Node = FakeNode;

    fn by_id(&self, id: &str) -> Option<FakeNode> {
        self.ids.get(id).cloned()
    }

    fn query(&self, selector: &str) -> Option<FakeNode> {
        self.selectors
            .get(selector)
            .and_then(|nodes| nodes.first().cloned())
    }

    fn query_all(&self, selector: &str) -> Vec<FakeNode> {
        self.selectors.get(selector).cloned().unwrap_or_default()
    }
}

pub struct FakeLoad {
    pub reload: bool,
    pub skip: Cell<bool>,
}

impl FakeLoad {
    pub fn new(reload: bool, skip: bool) -> Self {
        Self {
            reload,
            skip: Cell::new(skip),
        }
    }
}

impl LoadSignals for FakeLoad {
    fn is_reload(&self) -> bool {
        self.reload
    }

    fn skip_requested(&self) -> bool {
        self.skip.get()
    }

    fn clear_skip(&self) {
        self.skip.set(false);
    }
}

struct Pending {
    due: u32,
    seq: u64,
    cancelled: Rc<Cell<bool>>,
    task: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct Clock {
    now: u32,
    seq: u64,
    queue: Vec<Pending>,
}

/// Virtual clock: tasks only run inside [`ManualScheduler::advance`].
#[derive(Clone, Default)]
pub struct ManualScheduler(Rc<RefCell<Clock>>);

pub struct ManualHandle {
    cancelled: Option<Rc<Cell<bool>>>,
}

impl Drop for ManualHandle {
    fn drop(&mut self) {
        if let Some(cancelled) = self.cancelled.take() {
            cancelled.set(true);
        }
    }
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> u32 {
        self.0.borrow().now
    }

    /// Moves time forward by `ms`, running every task that falls due, in
    /// due-time then scheduling order.
    pub fn advance(&self, ms: u32) {
        let target = self.0.borrow().now + ms;
        loop {
            let next = {
                let mut clock = self.0.borrow_mut();
                let position = clock
                    .queue
                    .iter()
                    .enumerate()
                    .filter(|(_, pending)| pending.due <= target)
                    .min_by_key(|(_, pending)| (pending.due, pending.seq))
                    .map(|(position, _)| position);
                position.map(|position| {
                    let pending = clock.queue.remove(position);
                    clock.now = pending.due;
                    pending
                })
            };
            let Some(pending) = next else {
                break;
            };
            if !pending.cancelled.get() {
                (pending.task)();
            }
        }
        self.0.borrow_mut().now = target;
    }
}

impl Scheduler for ManualScheduler {
    type Handle = ManualHandle;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> ManualHandle {
        let cancelled = Rc::new(Cell::new(false));
        let mut clock = self.0.borrow_mut();
        clock.seq += 1;
        let pending = Pending {
            due: clock.now + delay_ms,
            seq: clock.seq,
            cancelled: cancelled.clone(),
            task,
        };
        clock.queue.push(pending);
        ManualHandle {
            cancelled: Some(cancelled),
        }
    }

    fn detach(&self, mut handle: ManualHandle) {
        handle.cancelled = None;
    }
}
