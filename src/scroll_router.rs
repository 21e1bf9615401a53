//! In-page anchor links scroll smoothly to their section, leaving room for
//! the fixed nav bar.

use log::debug;
use wasm_bindgen::JsValue;
use web_sys::{ScrollBehavior, ScrollToOptions, Window};

use crate::dom::{listen, DomNode, PageRoot, WebPage};
use crate::nav::NAV_SELECTOR;

pub const NAV_ANCHORS_SELECTOR: &str = ".nav-links a[href^=\"#\"]";
pub const CTA_SELECTOR: &str = ".cta-button";

/// Clicks on these links are handled here instead of by the browser.
pub fn is_in_page(href: &str) -> bool {
    href.starts_with('#')
}

/// Where the viewport should land for `href`, or `None` when the link names
/// no section on this page (including a bare `#`).
pub fn resolve<P: PageRoot>(page: &P, href: &str) -> Option<f64> {
    let id = href.strip_prefix('#').filter(|id| !id.is_empty())?;
    let section = page.by_id(id)?;
    let nav_height = page
        .query(NAV_SELECTOR)
        .map_or(0.0, |nav| nav.layout_height());
    Some(section.layout_top() - nav_height)
}

fn smooth_scroll(window: &Window, top: f64) {
    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}

pub fn init(page: &WebPage, window: &Window) -> Result<(), JsValue> {
    let links = page.query_all(NAV_ANCHORS_SELECTOR);
    let cta = page.query(CTA_SELECTOR);
    debug!("Routing {} anchor links", links.len() + usize::from(cta.is_some()));

    for link in links.into_iter().chain(cta) {
        let page = page.clone();
        let window = window.clone();
        let anchor = link.clone();
        listen(&link, "click", move |event| {
            let href = anchor.get_attribute("href").unwrap_or_default();
            // External links navigate normally.
            if !is_in_page(&href) {
                return;
            }
            event.prevent_default();
            if let Some(top) = resolve(&page, &href) {
                smooth_scroll(&window, top);
            }
        })?;
    }
    Ok(())
}
