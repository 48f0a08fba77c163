//! The six sections of the home composition.

use super::{emphasized, CallToAction, Card, LinkItem, Span};
use crate::forms::{FormKind, FormView};
use crate::i18n::Translator;
use crate::router::{Anchor, NavAction, View};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hero {
    pub badge: String,
    pub title_lines: Vec<String>,
    pub description: Vec<Span>,
    pub primary: LinkItem,
    pub secondary: LinkItem,
    pub trusted_by: String,
    pub availability: String,
    pub form_title: String,
    pub form_description: String,
    pub form: FormView,
    pub confidential: String,
}

impl Hero {
    pub fn build(t: &Translator) -> Self {
        Self {
            badge: t.resolve("hero.badge"),
            title_lines: (1..=4)
                .map(|i| t.resolve(&format!("hero.title.line{}", i)))
                .collect(),
            description: emphasized(
                t,
                "hero.description",
                &[
                    ("websites", "hero.websites"),
                    ("productDesign", "hero.productDesign"),
                    ("businessSoftware", "hero.businessSoftware"),
                ],
            ),
            primary: LinkItem::new(t, "hero.freeConsultation", NavAction::Anchor(Anchor::Contact)),
            secondary: LinkItem::new(t, "hero.ourServices", NavAction::Anchor(Anchor::Services)),
            trusted_by: t.resolve("hero.trustedBy"),
            availability: t.resolve("hero.consultationAvailable"),
            form_title: t.resolve("hero.bookStrategy"),
            form_description: t.resolve("hero.bookStrategyDesc"),
            form: FormView::build(FormKind::Hero, None, t),
            confidential: t.resolve("hero.confidential"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceCard {
    pub card: Card,
    pub action: LinkItem,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Services {
    pub subtitle: String,
    pub title: String,
    pub description: String,
    pub cards: Vec<ServiceCard>,
    pub specific_need: CallToAction,
}

impl Services {
    pub fn build(t: &Translator) -> Self {
        let cards = ["webDesign", "seo", "productDesign", "crm", "payment", "ai"]
            .into_iter()
            .map(|service| {
                // Only the web design card opens its own page
                let action = if service == "webDesign" {
                    NavAction::Go(View::WebDesign)
                } else {
                    NavAction::Anchor(Anchor::Contact)
                };
                ServiceCard {
                    card: Card::from_keys(t, &format!("services.{}", service), "description"),
                    action: LinkItem::new(t, "services.getConsultation", action),
                }
            })
            .collect();

        Self {
            subtitle: t.resolve("services.subtitle"),
            title: t.resolve("services.title"),
            description: t.resolve("services.description"),
            cards,
            specific_need: CallToAction {
                title: t.resolve("services.specificNeed.title"),
                description: t.resolve("services.specificNeed.description"),
                button: LinkItem::new(t, "services.getQuote", NavAction::Anchor(Anchor::Contact)),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sector {
    pub title: String,
    pub description: String,
    pub features: Vec<String>,
    pub case_study: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Industries {
    pub badge: String,
    pub title: String,
    pub description: String,
    pub sectors: Vec<Sector>,
    pub not_listed: CallToAction,
}

impl Industries {
    pub const SECTORS: [&'static str; 6] =
        ["ngo", "fintech", "healthcare", "logistics", "retail", "industry"];

    pub fn build(t: &Translator) -> Self {
        let case_study = t.resolve("industries.caseStudy");
        let sectors = Self::SECTORS
            .into_iter()
            .map(|sector| {
                let prefix = format!("industries.sectors.{}", sector);
                Sector {
                    title: t.resolve(&format!("{}.title", prefix)),
                    description: t.resolve(&format!("{}.description", prefix)),
                    features: (1..=3)
                        .map(|i| t.resolve(&format!("{}.feature{}", prefix, i)))
                        .collect(),
                    case_study: case_study.clone(),
                }
            })
            .collect();

        Self {
            badge: t.resolve("industries.badge"),
            title: t.resolve("industries.title"),
            description: t.resolve("industries.description"),
            sectors,
            not_listed: CallToAction {
                title: t.resolve("industries.sectorNotListed.title"),
                description: t.resolve("industries.sectorNotListed.description"),
                button: LinkItem::new(
                    t,
                    "industries.sectorNotListed.button",
                    NavAction::Anchor(Anchor::Contact),
                ),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomSoftware {
    pub title: String,
    pub description: String,
    pub industry_header: String,
    pub solution_header: String,
    /// (industry, solution) rows
    pub rows: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CostComparison {
    pub title: String,
    pub generic_label: String,
    pub generic_points: Vec<String>,
    pub custom_label: String,
    pub custom_points: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebDevelopment {
    pub badge: String,
    pub title: String,
    pub description: String,
    pub features: Vec<Card>,
    pub why_generic: Card,
    pub custom_software: CustomSoftware,
    pub cost: CostComparison,
    pub button: LinkItem,
}

impl WebDevelopment {
    pub fn build(t: &Translator) -> Self {
        let features = ["landingPages", "ecommerce", "saas"]
            .into_iter()
            .map(|feature| Card::from_keys(t, &format!("webdev.features.{}", feature), "description"))
            .collect();

        let rows = [
            "restaurant",
            "healthcare",
            "logistics",
            "retail",
            "education",
            "realEstate",
        ]
        .into_iter()
        .map(|example| {
            let prefix = format!("webdev.customSoftware.examples.{}", example);
            (
                t.resolve(&format!("{}.industry", prefix)),
                t.resolve(&format!("{}.solution", prefix)),
            )
        })
        .collect();

        Self {
            badge: t.resolve("webdev.badge"),
            title: t.resolve("webdev.title"),
            description: t.resolve("webdev.description"),
            features,
            why_generic: Card::from_keys(t, "webdev.whyGeneric", "description"),
            custom_software: CustomSoftware {
                title: t.resolve("webdev.customSoftware.title"),
                description: t.resolve("webdev.customSoftware.description"),
                industry_header: t.resolve("webdev.customSoftware.table.industry"),
                solution_header: t.resolve("webdev.customSoftware.table.solution"),
                rows,
            },
            cost: CostComparison {
                title: t.resolve("webdev.costAnalysis"),
                generic_label: t.resolve("webdev.genericSaaS"),
                generic_points: vec![t.resolve("webdev.monthlyFees"), t.resolve("webdev.cumulativeHigh")],
                custom_label: t.resolve("webdev.customBuild"),
                custom_points: vec![t.resolve("webdev.ownership"), t.resolve("webdev.optimizedROI")],
            },
            button: LinkItem::new(t, "webdev.button", NavAction::Anchor(Anchor::Contact)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Testimonial {
    pub quote: String,
    pub author: String,
    pub role: String,
    pub metric: String,
    pub metric_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Testimonials {
    pub badge: String,
    pub title: String,
    pub items: Vec<Testimonial>,
}

impl Testimonials {
    pub fn build(t: &Translator) -> Self {
        let items = (1..=3)
            .map(|i| {
                let prefix = format!("testimonials.testimonial{}", i);
                let field = |name: &str| t.resolve(&format!("{}.{}", prefix, name));
                Testimonial {
                    quote: field("quote"),
                    author: field("author"),
                    role: field("role"),
                    metric: field("metric"),
                    metric_label: field("metricLabel"),
                }
            })
            .collect();

        Self {
            badge: t.resolve("testimonials.badge"),
            title: t.resolve("testimonials.title"),
            items,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contact {
    pub title: String,
    pub heading_lines: Vec<String>,
    pub description: String,
    pub form_title: String,
    pub form_subtitle: String,
    pub form: FormView,
}

impl Contact {
    pub fn build(t: &Translator) -> Self {
        Self {
            title: t.resolve("contact.title"),
            heading_lines: t
                .resolve("contact.heading")
                .lines()
                .map(str::to_string)
                .collect(),
            description: t.resolve("contact.description"),
            form_title: t.resolve("contact.formTitle"),
            form_subtitle: t.resolve("contact.formSubtitle"),
            form: FormView::build(FormKind::Contact, None, t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{Language, MemoryPreferenceStore, TranslationDictionary};

    fn with_translator<R>(language: Language, f: impl FnOnce(&Translator) -> R) -> R {
        let mut store = MemoryPreferenceStore::with_saved(language.code());
        let t = Translator::initialize(TranslationDictionary::bundled(), &mut store, None);
        f(&t)
    }

    // ==================== Hero Tests ====================

    #[test]
    fn test_hero_description_emphasis() {
        let hero = with_translator(Language::En, Hero::build);
        assert_eq!(hero.title_lines.len(), 4);
        let emphasized: Vec<_> = hero
            .description
            .iter()
            .filter(|s| s.emphasis)
            .map(|s| s.text.as_str())
            .collect();
        assert_eq!(
            emphasized,
            vec!["high-converting websites", "product design", "custom business software"]
        );
        assert!(hero.description.iter().all(|s| !s.text.contains('{')));
    }

    // ==================== Services Tests ====================

    #[test]
    fn test_services_card_actions() {
        let services = with_translator(Language::En, Services::build);
        assert_eq!(services.cards.len(), 6);
        assert_eq!(services.cards[0].action.action, NavAction::Go(View::WebDesign));
        assert!(services.cards[1..]
            .iter()
            .all(|c| c.action.action == NavAction::Anchor(Anchor::Contact)));
        assert_eq!(
            services.specific_need.button.action,
            NavAction::Anchor(Anchor::Contact)
        );
    }

    // ==================== Industries Tests ====================

    #[test]
    fn test_industries_sectors() {
        let industries = with_translator(Language::Fr, Industries::build);
        assert_eq!(industries.sectors.len(), 6);
        assert!(industries.sectors.iter().all(|s| s.features.len() == 3));
    }

    // ==================== Web Development Tests ====================

    #[test]
    fn test_web_development_table() {
        let webdev = with_translator(Language::En, WebDevelopment::build);
        assert_eq!(webdev.features.len(), 3);
        assert_eq!(webdev.custom_software.rows.len(), 6);
        assert_eq!(webdev.custom_software.rows[0].0, "Restaurant");
    }

    // ==================== Testimonials / Contact Tests ====================

    #[test]
    fn test_testimonials_and_contact() {
        let testimonials = with_translator(Language::En, Testimonials::build);
        assert_eq!(testimonials.items.len(), 3);
        assert!(testimonials.items.iter().all(|i| !i.metric.is_empty()));

        let contact = with_translator(Language::En, Contact::build);
        assert_eq!(contact.heading_lines.len(), 2);
        assert_eq!(contact.form.kind, FormKind::Contact);
    }
}
