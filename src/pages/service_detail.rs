//! Service detail pages.
//!
//! A `ServiceDetailRecord` is assembled from the dictionary namespace of one
//! service on every render. Which optional sections exist depends only on the
//! service variant.

use super::{Card, ItemList, LinkItem};
use crate::forms::{FormKind, FormView};
use crate::i18n::Translator;
use crate::router::{NavAction, View};
use serde::Serialize;

/// Views rendered by the generic detail page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceKind {
    Seo,
    Marketing,
    CrmErp,
    Ecommerce,
    ProductDesign,
}

impl ServiceKind {
    pub fn from_view(view: View) -> Option<ServiceKind> {
        match view {
            View::Seo => Some(ServiceKind::Seo),
            View::Marketing => Some(ServiceKind::Marketing),
            View::CrmErp => Some(ServiceKind::CrmErp),
            View::Ecommerce => Some(ServiceKind::Ecommerce),
            View::ProductDesign => Some(ServiceKind::ProductDesign),
            View::Home | View::WebDesign => None,
        }
    }

    pub fn view(self) -> View {
        match self {
            ServiceKind::Seo => View::Seo,
            ServiceKind::Marketing => View::Marketing,
            ServiceKind::CrmErp => View::CrmErp,
            ServiceKind::Ecommerce => View::Ecommerce,
            ServiceKind::ProductDesign => View::ProductDesign,
        }
    }

    /// Dictionary namespace under `servicedetail`.
    pub fn namespace(self) -> &'static str {
        match self {
            ServiceKind::Seo => "seo",
            ServiceKind::Marketing => "marketing",
            ServiceKind::CrmErp => "crmErp",
            ServiceKind::Ecommerce => "ecommerce",
            ServiceKind::ProductDesign => "productDesign",
        }
    }

    fn pillar_count(self) -> usize {
        match self {
            ServiceKind::Seo | ServiceKind::Ecommerce => 4,
            ServiceKind::Marketing | ServiceKind::CrmErp => 2,
            ServiceKind::ProductDesign => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

/// Generic software versus custom build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comparison {
    pub generic: ItemList,
    pub custom: ItemList,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceDetailRecord {
    pub view: View,
    pub back: LinkItem,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub what_is: Card,
    pub why_important: ItemList,
    pub how_it_works: ItemList,
    pub benefits: ItemList,
    pub examples: ItemList,
    pub methodology_title: String,
    pub methodology_subtitle: String,
    pub pillars: Vec<Card>,
    pub comparison: Option<Comparison>,
    pub products: Option<ItemList>,
    pub training: Option<ItemList>,
    pub features: Option<ItemList>,
    pub advantages: Option<ItemList>,
    pub faq_title: String,
    pub faqs: Vec<Faq>,
    pub contact_title: String,
    pub contact_subtitle: String,
    pub form: FormView,
}

impl ServiceDetailRecord {
    pub fn build(kind: ServiceKind, t: &Translator) -> Self {
        let ns = format!("servicedetail.{}", kind.namespace());
        let key = |suffix: &str| format!("{}.{}", ns, suffix);
        let list = |section: &str, item: &str, count: usize| {
            ItemList::from_keys(t, &key(section), item, count)
        };

        let pillars = (1..=kind.pillar_count())
            .map(|i| Card::from_keys(t, &key(&format!("pillars.pillar{}", i)), "desc"))
            .collect();

        let comparison = (kind == ServiceKind::CrmErp).then(|| Comparison {
            generic: list("comparison.generic", "point", 4),
            custom: list("comparison.custom", "point", 4),
        });

        let ecommerce = kind == ServiceKind::Ecommerce;

        let faqs = (1..=4)
            .map(|i| Faq {
                question: t.resolve(&key(&format!("faq.q{}", i))),
                answer: t.resolve(&key(&format!("faq.a{}", i))),
            })
            .collect();

        Self {
            view: kind.view(),
            back: LinkItem::new(t, "servicedetail.backHome", NavAction::Back),
            title: t.resolve(&key("title")),
            subtitle: t.resolve(&key("subtitle")),
            description: t.resolve(&key("description")),
            what_is: Card::from_keys(t, &key("whatIs"), "description"),
            why_important: list("whyImportant", "point", 4),
            how_it_works: list("howItWorks", "step", 4),
            benefits: list("benefits", "point", 4),
            examples: list("examples", "example", 4),
            methodology_title: t.resolve("servicedetail.methodology.title"),
            methodology_subtitle: t.resolve("servicedetail.methodology.subtitle"),
            pillars,
            comparison,
            products: ecommerce.then(|| list("products", "point", 4)),
            training: ecommerce.then(|| list("training", "point", 4)),
            features: ecommerce.then(|| list("features", "feature", 8)),
            advantages: ecommerce.then(|| list("advantages", "point", 4)),
            faq_title: t.resolve("servicedetail.faq.title"),
            faqs,
            contact_title: t.resolve("servicedetail.contactUs.title"),
            contact_subtitle: t.resolve("servicedetail.contactUs.subtitle"),
            form: FormView::build(FormKind::ServiceDetail, Some(kind.view()), t),
        }
    }
}
