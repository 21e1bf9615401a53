use web_sys::{HtmlElement, MouseEvent};
use yew::prelude::*;
use yew_hooks::prelude::*;

use crate::dom::DomNode;
use crate::nav::{toggle_glyph, toggle_style, MenuLayout, MobileMenu, MENU_OPEN_CLASS};

#[derive(Properties, PartialEq)]
pub struct MobileMenuToggleProps {
    /// The `.nav-links` container the toggle opens and closes.
    pub links: HtmlElement,
}

#[function_component(MobileMenuToggle)]
pub fn mobile_menu_toggle(props: &MobileMenuToggleProps) -> Html {
    let open = use_state(|| props.links.has_class(MENU_OPEN_CLASS));
    let (width, _) = use_window_size();
    let layout = MenuLayout::for_width(width);

    {
        let links = props.links.clone();
        use_effect_with_deps(
            move |_| {
                MobileMenu::new(links).apply_layout(layout);
                || ()
            },
            (layout, *open),
        );
    }

    let onclick = {
        let links = props.links.clone();
        let open = open.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            open.set(MobileMenu::new(links.clone()).toggle());
        })
    };

    html! {
        <button class="mobile-menu-btn" style={toggle_style(layout)} {onclick}>
            { toggle_glyph(*open) }
        </button>
    }
}
