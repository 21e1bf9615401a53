use log::{debug, info, warn};
use wasm_bindgen::JsValue;
use web_sys::{window, Window};

use crate::contact;
use crate::dom::{listen, WebPage};
use crate::effects::{parallax, reveal};
use crate::hero::{self, BrowserLoad};
use crate::timing::BrowserScheduler;
use crate::{intro, nav, scroll_router};

/// Wires every page component once the document has been parsed.
pub fn start() -> Result<(), JsValue> {
    let window = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window.document().ok_or_else(|| JsValue::from_str("no document"))?;

    if document.ready_state() == "loading" {
        let ready_window = window.clone();
        listen(&document, "DOMContentLoaded", move |_| on_ready(&ready_window))
    } else {
        on_ready(&window);
        Ok(())
    }
}

fn on_ready(window: &Window) {
    let Some(document) = window.document() else {
        return;
    };
    let page = WebPage::new(document);
    let scheduler = BrowserScheduler;

    window.scroll_to_with_x_and_y(0.0, 0.0);

    guarded("smooth scroll", scroll_router::init(&page, window));
    guarded("navigation", nav::init(&page, window, &scheduler));
    guarded("reveals", reveal::init(&page, window, &scheduler));
    guarded("contact form", contact::form::init(&page, window, &scheduler));
    guarded("parallax", parallax::init(&page, window, &scheduler));

    match hero::start(&page, &scheduler, &BrowserLoad::new(window.clone())) {
        Some(path) => debug!("Hero intro started ({:?})", path),
        None => debug!("Page has no hero"),
    }
    intro::start(&page, &scheduler);

    info!("Page components ready");
}

/// One component failing to wire up must not take the others down.
fn guarded(component: &str, result: Result<(), JsValue>) {
    match result {
        Ok(()) => debug!("{} initialized", component),
        Err(error) => warn!("{} failed to initialize: {:?}", component, error),
    }
}
