//! Navigation bar: scroll-driven styling and auto-hide, plus the compact
//! menu layout used on narrow viewports.

use std::cell::RefCell;

use log::{debug, warn};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlElement, Window};

use crate::components::mobile_menu::{MobileMenuToggle, MobileMenuToggleProps};
use crate::dom::{apply_styles, listen_scroll, DomNode, PageRoot, WebPage};
use crate::timing::Scheduler;

pub const NAV_SELECTOR: &str = ".nav";
pub const NAV_CONTAINER_SELECTOR: &str = ".nav-container";
pub const NAV_LINKS_SELECTOR: &str = ".nav-links";

pub const SCROLLED_CLASS: &str = "scrolled";
pub const MENU_OPEN_CLASS: &str = "mobile-open";

const SCROLLED_AFTER_PX: f64 = 50.0;
const HIDE_AFTER_PX: f64 = 200.0;

/// Viewports narrower than this get the compact menu.
pub const COMPACT_BELOW_PX: f64 = 768.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavState {
    pub scrolled: bool,
    pub hidden: bool,
}

impl NavState {
    pub fn apply<N: DomNode>(self, nav: &N) {
        if self.scrolled {
            nav.add_class(SCROLLED_CLASS);
        } else {
            nav.remove_class(SCROLLED_CLASS);
        }
        let transform = if self.hidden { "translateY(-100%)" } else { "translateY(0)" };
        nav.set_style("transform", transform);
    }
}

/// Only the previous sample is kept.
#[derive(Debug, Default)]
pub struct NavScroll {
    last_offset: f64,
}

impl NavScroll {
    pub fn sample(&mut self, offset: f64) -> NavState {
        let state = NavState {
            scrolled: offset > SCROLLED_AFTER_PX,
            hidden: offset > self.last_offset && offset > HIDE_AFTER_PX,
        };
        self.last_offset = offset;
        state
    }
}

pub struct NavController<N> {
    nav: N,
    scroll: RefCell<NavScroll>,
}

impl<N: DomNode> NavController<N> {
    pub fn new(nav: N) -> Self {
        Self {
            nav,
            scroll: RefCell::new(NavScroll::default()),
        }
    }

    pub fn on_scroll(&self, offset: f64) {
        let state = self.scroll.borrow_mut().sample(offset);
        state.apply(&self.nav);
    }
}

const COMPACT_PANEL: [(&str, &str); 10] = [
    ("position", "absolute"),
    ("top", "100%"),
    ("left", "0"),
    ("right", "0"),
    ("background", "rgba(255, 255, 255, 0.95)"),
    ("backdrop-filter", "blur(20px)"),
    ("flex-direction", "column"),
    ("padding", "2rem"),
    ("box-shadow", "0 10px 30px rgba(0,0,0,0.1)"),
    ("border-radius", "0 0 20px 20px"),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuLayout {
    Compact,
    Full,
}

impl MenuLayout {
    pub fn for_width(width: f64) -> Self {
        if width < COMPACT_BELOW_PX {
            MenuLayout::Compact
        } else {
            MenuLayout::Full
        }
    }

    pub fn shows_toggle(self) -> bool {
        self == MenuLayout::Compact
    }

    /// Inline styles for the links container. The full layout has none, so
    /// the stylesheet's own flow layout applies.
    pub fn panel_styles(self, open: bool) -> Vec<(&'static str, &'static str)> {
        match self {
            MenuLayout::Compact => {
                let mut styles = COMPACT_PANEL.to_vec();
                styles.push(("display", if open { "flex" } else { "none" }));
                styles
            }
            MenuLayout::Full => Vec::new(),
        }
    }
}

const TOGGLE_STYLE: &str = "background: none; \
    border: none; \
    font-size: 1.5rem; \
    color: #2563eb; \
    cursor: pointer; \
    padding: 8px; \
    border-radius: 8px; \
    transition: background-color 0.3s ease;";

/// Inline style for the menu button; it only shows in the compact layout.
pub fn toggle_style(layout: MenuLayout) -> String {
    let display = if layout.shows_toggle() { "block" } else { "none" };
    format!("display: {}; {}", display, TOGGLE_STYLE)
}

pub fn toggle_glyph(open: bool) -> &'static str {
    if open {
        "✕"
    } else {
        "☰"
    }
}

pub struct MobileMenu<N> {
    links: N,
}

impl<N: DomNode> MobileMenu<N> {
    pub fn new(links: N) -> Self {
        Self { links }
    }

    pub fn is_open(&self) -> bool {
        self.links.has_class(MENU_OPEN_CLASS)
    }

    /// Flips the open state and returns the new one.
    pub fn toggle(&self) -> bool {
        self.links.toggle_class(MENU_OPEN_CLASS)
    }

    pub fn apply_layout(&self, layout: MenuLayout) {
        for (property, _) in COMPACT_PANEL {
            self.links.clear_style(property);
        }
        self.links.clear_style("display");
        apply_styles(&self.links, &layout.panel_styles(self.is_open()));
    }
}

pub fn init<S: Scheduler>(page: &WebPage, window: &Window, scheduler: &S) -> Result<(), JsValue> {
    match page.query(NAV_SELECTOR) {
        Some(nav) => {
            let controller = NavController::new(nav);
            if let Err(error) = listen_scroll(window, scheduler, move |offset| controller.on_scroll(offset)) {
                warn!("Nav scroll listener failed: {:?}", error);
            }
        }
        None => debug!("No nav bar, skipping scroll effects"),
    }
    mount_mobile_menu(page)
}

fn mount_mobile_menu(page: &WebPage) -> Result<(), JsValue> {
    let (Some(container), Some(links)) = (page.query(NAV_CONTAINER_SELECTOR), page.query(NAV_LINKS_SELECTOR)) else {
        debug!("No nav links, skipping mobile menu");
        return Ok(());
    };

    let host = page.document().create_element("div")?.dyn_into::<HtmlElement>()?;
    host.set_class_name("mobile-menu-host");
    container.append_child(&host)?;

    yew::Renderer::<MobileMenuToggle>::with_root_and_props(host.into(), MobileMenuToggleProps { links }).render();
    Ok(())
}
