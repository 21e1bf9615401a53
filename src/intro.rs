//! Page-level entrance: the body, the hero subtitle and the call-to-action
//! slide up into place shortly after load.

use crate::dom::{DomNode, PageRoot};
use crate::timing::{run_timeline, Cue, Scheduler};

const HIDDEN_OFFSET: &str = "translateY(20px)";
const SETTLE_TRANSITION: &str = "opacity 0.8s ease, transform 0.8s ease";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntroTarget {
    Body,
    Subtitle,
    CallToAction,
}

impl IntroTarget {
    pub fn selector(self) -> &'static str {
        match self {
            IntroTarget::Body => "body",
            IntroTarget::Subtitle => ".hero-subtitle",
            IntroTarget::CallToAction => ".cta-button",
        }
    }
}

pub const INTRO_TIMELINE: [Cue<IntroTarget>; 3] = [
    Cue::new(100, IntroTarget::Body),
    Cue::new(1500, IntroTarget::Subtitle),
    Cue::new(2000, IntroTarget::CallToAction),
];

/// Hides every target that exists, then plays the entrance timeline.
pub fn start<P: PageRoot, S: Scheduler>(page: &P, scheduler: &S) {
    let targets: Vec<(IntroTarget, P::Node)> = INTRO_TIMELINE
        .iter()
        .filter_map(|cue| page.query(cue.step.selector()).map(|node| (cue.step, node)))
        .collect();

    for (_, node) in &targets {
        node.set_style("opacity", "0");
        node.set_style("transform", HIDDEN_OFFSET);
    }

    run_timeline(scheduler, &INTRO_TIMELINE, move |target| {
        let found = targets.iter().find(|(candidate, _)| candidate == target);
        if let Some((_, node)) = found {
            node.set_style("transition", SETTLE_TRANSITION);
            node.set_style("opacity", "1");
            node.set_style("transform", "translateY(0)");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeNode, FakePage, ManualScheduler};

    #[test]
    fn targets_slide_in_on_schedule() {
        let body = FakeNode::new();
        let subtitle = FakeNode::new();
        let cta = FakeNode::new();
        let page = FakePage::new()
            .with_selector("body", &[&body])
            .with_selector(".hero-subtitle", &[&subtitle])
            .with_selector(".cta-button", &[&cta]);
        let clock = ManualScheduler::new();

        start(&page, &clock);
        for node in [&body, &subtitle, &cta] {
            assert_eq!(node.style("opacity").as_deref(), Some("0"));
            assert_eq!(node.style("transform").as_deref(), Some(HIDDEN_OFFSET));
        }

        clock.advance(100);
        assert_eq!(body.style("opacity").as_deref(), Some("1"));
        assert_eq!(subtitle.style("opacity").as_deref(), Some("0"));

        clock.advance(1400);
        assert_eq!(subtitle.style("opacity").as_deref(), Some("1"));
        assert_eq!(cta.style("opacity").as_deref(), Some("0"));

        clock.advance(500);
        assert_eq!(cta.style("opacity").as_deref(), Some("1"));
        assert_eq!(cta.style("transform").as_deref(), Some("translateY(0)"));
        assert_eq!(cta.style("transition").as_deref(), Some(SETTLE_TRANSITION));
    }

    #[test]
    fn absent_targets_are_skipped() {
        let body = FakeNode::new();
        let page = FakePage::new().with_selector("body", &[&body]);
        let clock = ManualScheduler::new();

        start(&page, &clock);
        clock.advance(3000);

        assert_eq!(body.style("opacity").as_deref(), Some("1"));
    }
}
