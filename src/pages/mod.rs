//! Page compositions.
//!
//! `compose` turns the active view into a `Page`: the navigation bar, exactly
//! one page body and the footer. Every piece of display text is resolved
//! through the `Translator` at compose time, so a page built after a language
//! switch is entirely in the new language.

mod chrome;
mod home;
mod service_detail;
mod web_design;

pub use chrome::{Footer, LanguageOption, NavBar, ProductLink};
pub use home::{
    Contact, CostComparison, CustomSoftware, Hero, Industries, Sector, ServiceCard, Services,
    Testimonial, Testimonials, WebDevelopment,
};
pub use service_detail::{Comparison, Faq, ServiceDetailRecord, ServiceKind};
pub use web_design::WebDesignPage;

use crate::i18n::{Language, Translator};
use crate::router::{Anchor, NavAction, View};
use serde::Serialize;

/// A navigation affordance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkItem {
    pub label: String,
    pub action: NavAction,
}

impl LinkItem {
    pub fn new(t: &Translator, key: &str, action: NavAction) -> Self {
        Self {
            label: t.resolve(key),
            action,
        }
    }
}

/// Piece of text, optionally emphasized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Span {
    pub text: String,
    pub emphasis: bool,
}

/// Resolve `key` and split it on `{placeholder}`s, each replaced by an
/// emphasized span resolved from the paired key.
///
/// Placeholders without a pair stay in the plain text.
pub fn emphasized(t: &Translator, key: &str, emphasis: &[(&str, &str)]) -> Vec<Span> {
    let template = t.resolve(key);
    let mut spans = Vec::new();
    let mut rest = template.as_str();

    while !rest.is_empty() {
        let next = emphasis
            .iter()
            .filter_map(|(name, value_key)| {
                let marker = format!("{{{}}}", name);
                rest.find(&marker).map(|at| (at, marker.len(), *value_key))
            })
            .min_by_key(|(at, _, _)| *at);

        match next {
            Some((at, len, value_key)) => {
                if at > 0 {
                    spans.push(Span {
                        text: rest[..at].to_string(),
                        emphasis: false,
                    });
                }
                spans.push(Span {
                    text: t.resolve(value_key),
                    emphasis: true,
                });
                rest = &rest[at + len..];
            }
            None => {
                spans.push(Span {
                    text: rest.to_string(),
                    emphasis: false,
                });
                break;
            }
        }
    }

    spans
}

/// Titled card. `value` carries a headline figure when the card has one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub title: String,
    pub description: String,
    pub value: Option<String>,
}

impl Card {
    /// Card from `{prefix}.title` and `{prefix}.{description_field}`.
    pub fn from_keys(t: &Translator, prefix: &str, description_field: &str) -> Self {
        Self {
            title: t.resolve(&format!("{}.title", prefix)),
            description: t.resolve(&format!("{}.{}", prefix, description_field)),
            value: None,
        }
    }
}

/// Titled list of short strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemList {
    pub title: String,
    pub subtitle: Option<String>,
    pub items: Vec<String>,
}

impl ItemList {
    /// List from `{prefix}.title` and `{prefix}.{item}1..=count`.
    pub fn from_keys(t: &Translator, prefix: &str, item: &str, count: usize) -> Self {
        Self {
            title: t.resolve(&format!("{}.title", prefix)),
            subtitle: None,
            items: (1..=count)
                .map(|i| t.resolve(&format!("{}.{}{}", prefix, item, i)))
                .collect(),
        }
    }

    pub fn with_subtitle(mut self, t: &Translator, key: &str) -> Self {
        self.subtitle = Some(t.resolve(key));
        self
    }
}

/// Titled grid of cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardGrid {
    pub title: String,
    pub subtitle: Option<String>,
    pub cards: Vec<Card>,
}

/// Closing block with a single button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallToAction {
    pub title: String,
    pub description: String,
    pub button: LinkItem,
}

/// Top-level page body section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "section", rename_all = "kebab-case")]
pub enum Section {
    Hero(Hero),
    Services(Services),
    Industries(Industries),
    WebDevelopment(WebDevelopment),
    Testimonials(Testimonials),
    Contact(Contact),
    WebDesign(WebDesignPage),
    ServiceDetail(ServiceDetailRecord),
}

impl Section {
    /// Anchor the section is mounted under, for home sections.
    pub fn anchor(&self) -> Option<Anchor> {
        match self {
            Section::Hero(_) => Some(Anchor::Hero),
            Section::Services(_) => Some(Anchor::Services),
            Section::Industries(_) => Some(Anchor::Industries),
            Section::WebDevelopment(_) => Some(Anchor::WebDevelopment),
            Section::Testimonials(_) => Some(Anchor::Testimonials),
            Section::Contact(_) => Some(Anchor::Contact),
            Section::WebDesign(_) | Section::ServiceDetail(_) => None,
        }
    }
}

/// A fully composed page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    pub language: Language,
    /// `None` when the requested view tag is unknown; the body is then empty.
    pub view: Option<View>,
    pub title: String,
    pub description: String,
    pub nav: NavBar,
    pub body: Vec<Section>,
    pub footer: Footer,
}

impl Page {
    /// Anchors mounted in the body, in render order.
    pub fn anchors(&self) -> Vec<Anchor> {
        self.body.iter().filter_map(Section::anchor).collect()
    }

    pub fn contains_anchor(&self, anchor: Anchor) -> bool {
        self.body.iter().any(|s| s.anchor() == Some(anchor))
    }
}

/// Compose the page for `view`.
pub fn compose(view: Option<View>, t: &Translator) -> Page {
    let body = match view {
        Some(View::Home) => vec![
            Section::Hero(Hero::build(t)),
            Section::Services(Services::build(t)),
            Section::Industries(Industries::build(t)),
            Section::WebDevelopment(WebDevelopment::build(t)),
            Section::Testimonials(Testimonials::build(t)),
            Section::Contact(Contact::build(t)),
        ],
        Some(View::WebDesign) => vec![Section::WebDesign(WebDesignPage::build(t))],
        Some(other) => match ServiceKind::from_view(other) {
            Some(kind) => vec![Section::ServiceDetail(ServiceDetailRecord::build(kind, t))],
            None => Vec::new(),
        },
        None => Vec::new(),
    };

    Page {
        language: t.language(),
        view,
        title: t.resolve("meta.title"),
        description: t.resolve("meta.description"),
        nav: NavBar::build(t),
        body,
        footer: Footer::build(t),
    }
}

/// Compose the page for a raw view tag. Unknown tags compose an empty body.
pub fn compose_tag(tag: &str, t: &Translator) -> Page {
    compose(View::from_tag(tag), t)
}
