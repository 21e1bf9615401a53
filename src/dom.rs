//! Thin seam between the page components and the browser DOM.
//!
//! Components only talk to [`PageRoot`] and [`DomNode`], so the same logic
//! runs against `web_sys` in the browser and against an in-memory page in
//! tests.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Event, EventTarget, HtmlButtonElement, HtmlElement, HtmlFormElement, Window};

use crate::config;
use crate::timing::{Scheduler, Throttle};

pub trait DomNode: Clone + 'static {
    fn set_style(&self, property: &str, value: &str);
    fn clear_style(&self, property: &str);
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
    /// Flips `class` and reports whether it is now present.
    fn toggle_class(&self, class: &str) -> bool;
    fn has_class(&self, class: &str) -> bool;
    fn text(&self) -> String;
    fn set_text(&self, text: &str);
    /// Only meaningful for buttons.
    fn set_disabled(&self, disabled: bool);
    /// Only meaningful for forms.
    fn reset(&self);
    /// Position among the parent's element children.
    fn sibling_index(&self) -> usize;
    fn layout_top(&self) -> f64;
    fn layout_height(&self) -> f64;
    /// Top edge relative to the viewport.
    fn viewport_top(&self) -> f64;
}

pub trait PageRoot {
    type Node: DomNode;

    fn by_id(&self, id: &str) -> Option<Self::Node>;
    fn query(&self, selector: &str) -> Option<Self::Node>;
    fn query_all(&self, selector: &str) -> Vec<Self::Node>;
}

pub fn apply_styles<N: DomNode>(node: &N, styles: &[(&str, &str)]) {
    for (property, value) in styles {
        node.set_style(property, value);
    }
}

/// Sets the transition before the opacity so the change animates.
pub fn fade<N: DomNode>(node: &N, transition: &str, opacity: &str) {
    node.set_style("transition", transition);
    node.set_style("opacity", opacity);
}

impl DomNode for HtmlElement {
    fn set_style(&self, property: &str, value: &str) {
        let _ = self.style().set_property(property, value);
    }

    fn clear_style(&self, property: &str) {
        let _ = self.style().remove_property(property);
    }

    fn add_class(&self, class: &str) {
        let _ = self.class_list().add_1(class);
    }

    fn remove_class(&self, class: &str) {
        let _ = self.class_list().remove_1(class);
    }

    fn toggle_class(&self, class: &str) -> bool {
        self.class_list().toggle(class).unwrap_or(false)
    }

    fn has_class(&self, class: &str) -> bool {
        self.class_list().contains(class)
    }

    fn text(&self) -> String {
        self.text_content().unwrap_or_default()
    }

    fn set_text(&self, text: &str) {
        self.set_text_content(Some(text));
    }

    fn set_disabled(&self, disabled: bool) {
        if let Some(button) = self.dyn_ref::<HtmlButtonElement>() {
            button.set_disabled(disabled);
        }
    }

    fn reset(&self) {
        if let Some(form) = self.dyn_ref::<HtmlFormElement>() {
            form.reset();
        }
    }

    fn sibling_index(&self) -> usize {
        let mut index = 0;
        let mut current = self.previous_element_sibling();
        while let Some(element) = current {
            index += 1;
            current = element.previous_element_sibling();
        }
        index
    }

    fn layout_top(&self) -> f64 {
        self.offset_top() as f64
    }

    fn layout_height(&self) -> f64 {
        self.offset_height() as f64
    }

    fn viewport_top(&self) -> f64 {
        self.get_bounding_client_rect().top()
    }
}

#[derive(Clone)]
pub struct WebPage {
    document: Document,
}

impl WebPage {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

impl PageRoot for WebPage {
    type Node = HtmlElement;

    fn by_id(&self, id: &str) -> Option<HtmlElement> {
        self.document.get_element_by_id(id)?.dyn_into().ok()
    }

    fn query(&self, selector: &str) -> Option<HtmlElement> {
        self.document
            .query_selector(selector)
            .ok()
            .flatten()?
            .dyn_into()
            .ok()
    }

    fn query_all(&self, selector: &str) -> Vec<HtmlElement> {
        let Ok(list) = self.document.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .collect()
    }
}

/// Registers `handler` for the lifetime of the page.
pub fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
    callback.forget();
    Ok(())
}

/// Window scroll listener behind the shared trailing throttle. The handler
/// receives the vertical scroll offset of the last event in the burst.
pub fn listen_scroll<S, F>(window: &Window, scheduler: &S, handler: F) -> Result<(), JsValue>
where
    S: Scheduler,
    F: Fn(f64) + 'static,
{
    let throttled = Throttle::new(scheduler.clone(), config::SCROLL_THROTTLE_MS, handler);
    let window_clone = window.clone();
    listen(window, "scroll", move |_| {
        throttled.call(scroll_offset(&window_clone));
    })
}

pub fn scroll_offset(window: &Window) -> f64 {
    window.scroll_y().unwrap_or(0.0)
}

pub fn viewport_height(window: &Window) -> f64 {
    window
        .inner_height()
        .ok()
        .and_then(|height| height.as_f64())
        .unwrap_or(0.0)
}
