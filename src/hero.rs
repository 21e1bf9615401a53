//! Hero intro: the logo, title and media element choreographed on a fixed
//! timeline, with a quick fade-in when the visitor reloads or comes back.

use log::debug;
use web_sys::{PerformanceNavigation, Window};

use crate::dom::{apply_styles, fade, DomNode, PageRoot};
use crate::timing::{run_timeline, Cue, Scheduler};

/// Session storage key other pages set to skip the full intro.
pub const SKIP_ANIMATION_KEY: &str = "skipAnimation";

pub const INITIAL_LOGO_ID: &str = "hero-initial-logo";
pub const TITLE_CONTAINER_ID: &str = "hero-title-container";
pub const MEDIA_ID: &str = "hero-gif";
pub const TITLE_ABOVE_ID: &str = "hero-title-above";
pub const NAV_ID: &str = "main-nav";

const QUICK_FADE_DELAY_MS: u32 = 100;
const QUICK_FADE: &str = "opacity 0.8s ease-out";

const MEDIA_INSET: [(&str, &str); 5] = [
    ("top", "18%"),
    ("left", "1%"),
    ("right", "1%"),
    ("bottom", "15%"),
    ("border-radius", "15px"),
];

const MEDIA_FULL_BLEED: [(&str, &str); 5] = [
    ("top", "0"),
    ("left", "0"),
    ("right", "0"),
    ("bottom", "0"),
    ("border-radius", "0"),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeroStage {
    LogoFadeIn,
    TitleFadeIn,
    LogoFadeOut,
    /// Media goes full-bleed while the nav appears and the title leaves.
    FullBleed,
    /// Media shrinks back to its rounded inset.
    Inset,
    TitleAbove,
}

pub const HERO_TIMELINE: [Cue<HeroStage>; 6] = [
    Cue::new(100, HeroStage::LogoFadeIn),
    Cue::new(1000, HeroStage::TitleFadeIn),
    Cue::new(2500, HeroStage::LogoFadeOut),
    Cue::new(3000, HeroStage::FullBleed),
    Cue::new(5000, HeroStage::Inset),
    Cue::new(7000, HeroStage::TitleAbove),
];

/// What the hero needs to know about how this page load happened.
pub trait LoadSignals {
    fn is_reload(&self) -> bool;
    fn skip_requested(&self) -> bool;
    fn clear_skip(&self);
}

pub struct BrowserLoad {
    window: Window,
}

impl BrowserLoad {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl LoadSignals for BrowserLoad {
    fn is_reload(&self) -> bool {
        self.window
            .performance()
            .map(|performance| performance.navigation().type_() == PerformanceNavigation::TYPE_RELOAD)
            .unwrap_or(false)
    }

    fn skip_requested(&self) -> bool {
        self.window
            .session_storage()
            .ok()
            .flatten()
            .and_then(|storage| storage.get_item(SKIP_ANIMATION_KEY).ok().flatten())
            .map_or(false, |value| value == "true")
    }

    fn clear_skip(&self) {
        if let Ok(Some(storage)) = self.window.session_storage() {
            let _ = storage.remove_item(SKIP_ANIMATION_KEY);
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeroPath {
    Quick,
    Full,
}

impl HeroPath {
    pub fn select<L: LoadSignals>(load: &L) -> Self {
        if load.is_reload() || load.skip_requested() {
            HeroPath::Quick
        } else {
            HeroPath::Full
        }
    }
}

pub struct HeroElements<N> {
    initial_logo: Option<N>,
    title_container: N,
    media: Option<N>,
    title_above: Option<N>,
    nav: Option<N>,
}

impl<N: DomNode> HeroElements<N> {
    /// `None` when the page has no hero title container.
    pub fn locate<P: PageRoot<Node = N>>(page: &P) -> Option<Self> {
        Some(Self {
            title_container: page.by_id(TITLE_CONTAINER_ID)?,
            initial_logo: page.by_id(INITIAL_LOGO_ID),
            media: page.by_id(MEDIA_ID),
            title_above: page.by_id(TITLE_ABOVE_ID),
            nav: page.by_id(NAV_ID),
        })
    }

    pub fn apply(&self, stage: HeroStage) {
        match stage {
            HeroStage::LogoFadeIn => {
                if let Some(logo) = &self.initial_logo {
                    fade(logo, "opacity 1.5s ease-out", "1");
                }
            }
            HeroStage::TitleFadeIn => fade(&self.title_container, "opacity 2s ease-out", "1"),
            HeroStage::LogoFadeOut => {
                if let Some(logo) = &self.initial_logo {
                    fade(logo, "opacity 1s ease-out", "0");
                }
            }
            HeroStage::FullBleed => {
                if let Some(media) = &self.media {
                    apply_styles(media, &MEDIA_FULL_BLEED);
                    fade(media, "opacity 1.5s ease-out", "1");
                }
                if let Some(nav) = &self.nav {
                    fade(nav, "opacity 1.5s ease-out", "1");
                }
                fade(&self.title_container, "opacity 1s ease-out", "0");
            }
            HeroStage::Inset => {
                if let Some(media) = &self.media {
                    media.set_style("transition", "all 1.5s ease-out");
                    apply_styles(media, &MEDIA_INSET);
                }
            }
            HeroStage::TitleAbove => {
                if let Some(title_above) = &self.title_above {
                    fade(title_above, "opacity 1.5s ease-out", "1");
                }
            }
        }
    }

    /// Final layout with everything transparent, ready for the quick fade.
    fn settle_hidden(&self) {
        self.title_container.set_style("opacity", "0");
        if let Some(logo) = &self.initial_logo {
            logo.set_style("opacity", "0");
        }
        if let Some(media) = &self.media {
            apply_styles(media, &MEDIA_INSET);
            media.set_style("opacity", "0");
        }
        for node in [&self.title_above, &self.nav].into_iter().flatten() {
            node.set_style("opacity", "0");
        }
    }

    fn quick_fade_in(&self) {
        for node in [&self.media, &self.title_above, &self.nav].into_iter().flatten() {
            fade(node, QUICK_FADE, "1");
        }
    }
}

/// Picks the intro path for this load and starts it. Returns `None` when the
/// page has no hero.
pub fn start<P, S, L>(page: &P, scheduler: &S, load: &L) -> Option<HeroPath>
where
    P: PageRoot,
    S: Scheduler,
    L: LoadSignals,
{
    let Some(hero) = HeroElements::locate(page) else {
        debug!("No hero title container, skipping intro");
        return None;
    };

    let path = HeroPath::select(load);
    debug!("Hero intro path: {:?}", path);
    match path {
        HeroPath::Quick => {
            hero.settle_hidden();
            scheduler.run_later(QUICK_FADE_DELAY_MS, move || hero.quick_fade_in());
            load.clear_skip();
        }
        HeroPath::Full => {
            run_timeline(scheduler, &HERO_TIMELINE, move |stage| hero.apply(*stage));
        }
    }
    Some(path)
}
