use wasm_bindgen::JsValue;
use web_sys::Window;

use crate::dom::{listen, listen_scroll, DomNode, PageRoot, WebPage};
use crate::effects::reveal::GRID_ITEM_CLASSES;
use crate::timing::Scheduler;

pub const FLOATING_SELECTOR: &str = ".element";

/// Vertical offset and rotation for the `index`-th floating element. Later
/// elements travel faster, which reads as depth.
pub fn parallax_transform(scroll_offset: f64, index: usize) -> String {
    let rate = scroll_offset * -0.5;
    let speed = 0.3 + index as f64 * 0.1;
    // `+ 0.0` turns a negative zero into `0`.
    format!(
        "translateY({}px) rotate({}deg)",
        rate * speed + 0.0,
        scroll_offset * 0.1 + 0.0
    )
}

pub struct Parallax<N> {
    elements: Vec<N>,
}

impl<N: DomNode> Parallax<N> {
    pub fn new(elements: Vec<N>) -> Self {
        Self { elements }
    }

    pub fn on_scroll(&self, scroll_offset: f64) {
        for (index, element) in self.elements.iter().enumerate() {
            element.set_style("transform", &parallax_transform(scroll_offset, index));
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardPose {
    Raised,
    Resting,
}

impl CardPose {
    pub fn transform(self) -> &'static str {
        match self {
            CardPose::Raised => "translateY(-12px) scale(1.02)",
            CardPose::Resting => "translateY(0) scale(1)",
        }
    }

    pub fn shadow(self) -> &'static str {
        match self {
            CardPose::Raised => "0 25px 50px rgba(0, 0, 0, 0.15)",
            CardPose::Resting => "0 15px 35px rgba(0, 0, 0, 0.1)",
        }
    }

    pub fn apply<N: DomNode>(self, card: &N) {
        card.set_style("transform", self.transform());
        card.set_style("box-shadow", self.shadow());
    }
}

fn card_selector() -> String {
    GRID_ITEM_CLASSES
        .iter()
        .map(|class| format!(".{class}"))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn init<S: Scheduler>(page: &WebPage, window: &Window, scheduler: &S) -> Result<(), JsValue> {
    let floating = page.query_all(FLOATING_SELECTOR);
    if !floating.is_empty() {
        let parallax = Parallax::new(floating);
        listen_scroll(window, scheduler, move |offset| parallax.on_scroll(offset))?;
    }

    for card in page.query_all(&card_selector()) {
        let raised = card.clone();
        listen(&card, "mouseenter", move |_| CardPose::Raised.apply(&raised))?;
        let resting = card.clone();
        listen(&card, "mouseleave", move |_| CardPose::Resting.apply(&resting))?;
    }
    Ok(())
}
