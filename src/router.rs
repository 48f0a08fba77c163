//! View router: the single active view and the navigation that changes it.
//!
//! Navigation is two-phase. `navigate` and `navigate_to_anchor` change the
//! view immediately and leave a pending scroll; `commit` runs after the new
//! composition is mounted and performs that scroll against the anchors the
//! page actually contains. Scrolling to an anchor that is not mounted is a
//! silent no-op.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Top-level page compositions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    Home,
    WebDesign,
    Seo,
    Marketing,
    ProductDesign,
    CrmErp,
    Ecommerce,
}

impl View {
    pub const ALL: [View; 7] = [
        View::Home,
        View::WebDesign,
        View::Seo,
        View::Marketing,
        View::ProductDesign,
        View::CrmErp,
        View::Ecommerce,
    ];

    /// Tag used in URLs and lead submissions.
    pub const fn tag(self) -> &'static str {
        match self {
            View::Home => "home",
            View::WebDesign => "web-design",
            View::Seo => "seo",
            View::Marketing => "marketing",
            View::ProductDesign => "product-design",
            View::CrmErp => "crm-erp",
            View::Ecommerce => "ecommerce",
        }
    }

    /// Parse a view tag. Unknown tags yield `None`.
    pub fn from_tag(tag: &str) -> Option<View> {
        View::ALL.into_iter().find(|view| view.tag() == tag)
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Named sections of the home composition that navigation can scroll to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Anchor {
    Hero,
    Services,
    Industries,
    WebDevelopment,
    Testimonials,
    Contact,
}

impl Anchor {
    /// Home sections in render order.
    pub const HOME_ORDER: [Anchor; 6] = [
        Anchor::Hero,
        Anchor::Services,
        Anchor::Industries,
        Anchor::WebDevelopment,
        Anchor::Testimonials,
        Anchor::Contact,
    ];

    /// Element id of the section.
    pub const fn id(self) -> &'static str {
        match self {
            Anchor::Hero => "hero",
            Anchor::Services => "services",
            Anchor::Industries => "industries",
            Anchor::WebDevelopment => "web-development",
            Anchor::Testimonials => "testimonials",
            Anchor::Contact => "contact",
        }
    }
}

/// What a navigation affordance does when activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "target", rename_all = "kebab-case")]
pub enum NavAction {
    /// Switch to a view and scroll to the top.
    Go(View),
    /// Switch to home, then scroll to a section once it is mounted.
    Anchor(Anchor),
    /// Return to home.
    Back,
}

/// Scroll the router owes the viewport after the next commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollTarget {
    Top,
    Anchor(Anchor),
}

/// Navigation capability handed to page components.
pub trait Navigator {
    fn navigate(&mut self, view: View);

    fn navigate_to_anchor(&mut self, anchor: Anchor);

    fn dispatch(&mut self, action: NavAction) {
        match action {
            NavAction::Go(view) => self.navigate(view),
            NavAction::Anchor(anchor) => self.navigate_to_anchor(anchor),
            NavAction::Back => self.navigate(View::Home),
        }
    }
}

/// The scrollable document, as seen by the router.
pub trait Viewport {
    fn scroll_to_top(&mut self);

    fn scroll_into_view(&mut self, anchor: Anchor);
}

/// Owner of the active view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewRouter {
    current: View,
    pending: Option<ScrollTarget>,
}

impl ViewRouter {
    /// Start on the home view with nothing to scroll.
    pub fn new() -> Self {
        Self {
            current: View::Home,
            pending: None,
        }
    }

    pub fn current(&self) -> View {
        self.current
    }

    pub fn pending_scroll(&self) -> Option<ScrollTarget> {
        self.pending
    }

    /// Run the pending scroll against the freshly mounted composition.
    ///
    /// `mounted` lists the anchors present in the committed page. Returns the
    /// scroll that was performed, if any.
    pub fn commit(&mut self, mounted: &[Anchor], viewport: &mut dyn Viewport) -> Option<ScrollTarget> {
        match self.pending.take()? {
            ScrollTarget::Top => {
                viewport.scroll_to_top();
                Some(ScrollTarget::Top)
            }
            ScrollTarget::Anchor(anchor) if mounted.contains(&anchor) => {
                viewport.scroll_into_view(anchor);
                Some(ScrollTarget::Anchor(anchor))
            }
            ScrollTarget::Anchor(anchor) => {
                debug!("Scroll target #{} is not mounted, skipping", anchor.id());
                None
            }
        }
    }
}

impl Default for ViewRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator for ViewRouter {
    fn navigate(&mut self, view: View) {
        debug!("Navigate: {} -> {}", self.current, view);
        self.current = view;
        self.pending = Some(ScrollTarget::Top);
    }

    fn navigate_to_anchor(&mut self, anchor: Anchor) {
        debug!("Navigate: {} -> home#{}", self.current, anchor.id());
        self.current = View::Home;
        self.pending = Some(ScrollTarget::Anchor(anchor));
    }
}
