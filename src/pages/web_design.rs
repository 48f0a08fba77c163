use super::{emphasized, CallToAction, Card, CardGrid, ItemList, LinkItem, Span};
use crate::i18n::Translator;
use crate::router::{Anchor, NavAction};
use serde::Serialize;

/// Conversion web design page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebDesignPage {
    pub back: LinkItem,
    pub badge: String,
    pub title: String,
    pub description: Vec<Span>,
    pub trusted_by: String,
    pub stats: ItemList,
    pub without: ItemList,
    pub pillars: CardGrid,
    pub benefits: CardGrid,
    pub trends: CardGrid,
    pub guarantee: CallToAction,
}

impl WebDesignPage {
    pub fn build(t: &Translator) -> Self {
        let pillars = ["speed", "mobile", "seo", "flow"]
            .into_iter()
            .map(|pillar| {
                let prefix = format!("webdesign.pillars.{}", pillar);
                Card {
                    value: Some(t.resolve(&format!("{}.value", prefix))),
                    ..Card::from_keys(t, &prefix, "desc")
                }
            })
            .collect();

        Self {
            back: LinkItem::new(t, "webdesign.backToOverview", NavAction::Back),
            badge: t.resolve("webdesign.badge"),
            title: t.resolve("webdesign.title"),
            description: emphasized(
                t,
                "webdesign.description",
                &[
                    ("psychology", "webdesign.customerPsychology"),
                    ("pathways", "webdesign.conversionPathways"),
                    ("unlimited", "webdesign.guaranteeUnlimited"),
                ],
            ),
            trusted_by: t.resolve("webdesign.trustedBy"),
            stats: ItemList::from_keys(t, "webdesign.stats", "stat", 4)
                .with_subtitle(t, "webdesign.stats.subtitle"),
            without: ItemList::from_keys(t, "webdesign.without", "point", 4)
                .with_subtitle(t, "webdesign.without.subtitle"),
            pillars: CardGrid {
                title: t.resolve("webdesign.pillars.title"),
                subtitle: Some(t.resolve("webdesign.pillars.subtitle")),
                cards: pillars,
            },
            benefits: card_grid(t, "webdesign.benefits", "benefit", 4),
            trends: card_grid(t, "webdesign.trends", "trend", 3),
            guarantee: CallToAction {
                title: t.resolve("webdesign.guarantee.title"),
                description: t.resolve("webdesign.guarantee.description"),
                button: LinkItem::new(
                    t,
                    "webdesign.guarantee.button",
                    NavAction::Anchor(Anchor::Contact),
                ),
            },
        }
    }
}

fn card_grid(t: &Translator, prefix: &str, item: &str, count: usize) -> CardGrid {
    CardGrid {
        title: t.resolve(&format!("{}.title", prefix)),
        subtitle: Some(t.resolve(&format!("{}.subtitle", prefix))),
        cards: (1..=count)
            .map(|i| Card::from_keys(t, &format!("{}.{}{}", prefix, item, i), "desc"))
            .collect(),
    }
}
