//! Scroll-triggered reveals driven by `IntersectionObserver`.

use log::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{HtmlElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, Window};

use crate::dom::{fade, listen_scroll, viewport_height, DomNode, PageRoot, WebPage};
use crate::timing::Scheduler;

pub const REVEALED_CLASS: &str = "fade-in";
pub const ACTIVE_CLASS: &str = "active";
pub const SECTION_VISIBLE_CLASS: &str = "section-visible";

/// Cards that cascade in with a per-sibling delay.
pub const GRID_ITEM_CLASSES: [&str; 4] = ["highlight", "who-we-are-item", "impact-item", "funder-item"];
pub const REVEAL_TARGETS: &str =
    ".highlight, .who-we-are-item, .impact-item, .funder-item, .mission-text, .contact-form-container";

pub const HERO_SECTION_ID: &str = "hero-section";
pub const SUBTITLE_ID: &str = "hero-subtitle-below";

/// Revealed elements turn active once their top is this far inside the viewport.
const ACTIVE_MARGIN_PX: f64 = 150.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObserverSpec {
    pub threshold: f64,
    pub root_margin: &'static str,
}

pub const ITEM_OBSERVER: ObserverSpec = ObserverSpec {
    threshold: 0.1,
    root_margin: "0px 0px -50px 0px",
};

pub const SUBTITLE_OBSERVER: ObserverSpec = ObserverSpec {
    threshold: 0.3,
    root_margin: "0px 0px -100px 0px",
};

pub const SECTION_OBSERVER: ObserverSpec = ObserverSpec {
    threshold: 0.3,
    root_margin: "0px",
};

/// `index × 0.1s`, formatted without float noise.
pub fn stagger_delay(index: usize) -> String {
    format!("{}s", index as f64 / 10.0)
}

pub fn is_grid_item<N: DomNode>(node: &N) -> bool {
    GRID_ITEM_CLASSES.iter().any(|class| node.has_class(class))
}

pub fn reveal_item<N: DomNode>(node: &N) {
    node.add_class(REVEALED_CLASS);
    if is_grid_item(node) {
        node.set_style("animation-delay", &stagger_delay(node.sibling_index()));
    }
}

pub fn reveal_subtitle<N: DomNode>(node: &N) {
    fade(node, "opacity 1.5s ease-out", "1");
}

pub fn reveal_section<N: DomNode>(node: &N) {
    node.add_class(SECTION_VISIBLE_CLASS);
}

pub fn mark_active<N: DomNode>(revealed: &[N], viewport_height: f64) {
    for node in revealed {
        if node.viewport_top() < viewport_height - ACTIVE_MARGIN_PX {
            node.add_class(ACTIVE_CLASS);
        }
    }
}

fn observe<F>(targets: &[HtmlElement], trigger: ObserverSpec, on_visible: F) -> Result<(), JsValue>
where
    F: Fn(&HtmlElement, &IntersectionObserver) + 'static,
{
    if targets.is_empty() {
        return Ok(());
    }

    let callback = Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
        for entry in entries.iter() {
            let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                continue;
            };
            if !entry.is_intersecting() {
                continue;
            }
            if let Ok(target) = entry.target().dyn_into::<HtmlElement>() {
                on_visible(&target, &observer);
            }
        }
    }) as Box<dyn FnMut(Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(trigger.threshold));
    options.set_root_margin(trigger.root_margin);
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    for target in targets {
        observer.observe(target);
    }
    callback.forget();
    Ok(())
}

pub fn init<S: Scheduler>(page: &WebPage, window: &Window, scheduler: &S) -> Result<(), JsValue> {
    let items = page.query_all(REVEAL_TARGETS);
    debug!("Observing {} reveal targets", items.len());
    observe(&items, ITEM_OBSERVER, |item, observer| {
        reveal_item(item);
        observer.unobserve(item);
    })?;

    if let Some(hero_section) = page.by_id(HERO_SECTION_ID) {
        let page = page.clone();
        observe(&[hero_section], SUBTITLE_OBSERVER, move |_, _| {
            if let Some(subtitle) = page.by_id(SUBTITLE_ID) {
                reveal_subtitle(&subtitle);
            }
        })?;
    }

    observe(&page.query_all("section"), SECTION_OBSERVER, |section, observer| {
        reveal_section(section);
        observer.unobserve(section);
    })?;

    let mark = {
        let page = page.clone();
        let window = window.clone();
        move || mark_active(&page.query_all(&format!(".{REVEALED_CLASS}")), viewport_height(&window))
    };
    mark();
    listen_scroll(window, scheduler, move |_| mark())
}
