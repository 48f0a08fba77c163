//! Navigation bar and footer shared by every page.

use super::LinkItem;
use crate::i18n::{Language, Translator};
use crate::router::{Anchor, NavAction, View};
use chrono::Datelike;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductLink {
    pub link: LinkItem,
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageOption {
    pub language: Language,
    pub label: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavBar {
    pub brand: String,
    pub home: LinkItem,
    pub products_label: String,
    pub products: Vec<ProductLink>,
    pub expertise: LinkItem,
    pub contact: LinkItem,
    pub launch_project: LinkItem,
    pub language_label: String,
    /// Active language code, upper-cased
    pub active_language: String,
    pub languages: Vec<LanguageOption>,
}

impl NavBar {
    pub fn build(t: &Translator) -> Self {
        let products = [
            ("nav.conversionWebDesign", View::WebDesign, true),
            ("nav.marketingAdvertising", View::Marketing, false),
            ("nav.ecommerce", View::Ecommerce, false),
            ("nav.customCRMERP", View::CrmErp, false),
        ]
        .into_iter()
        .map(|(key, view, highlighted)| ProductLink {
            link: LinkItem::new(t, key, NavAction::Go(view)),
            highlighted,
        })
        .collect();

        let active = t.language();
        let languages = Language::ALL
            .into_iter()
            .map(|language| LanguageOption {
                language,
                label: language.native_name().to_string(),
                active: language == active,
            })
            .collect();

        Self {
            brand: t.resolve("brand.name"),
            home: LinkItem::new(t, "nav.home", NavAction::Go(View::Home)),
            products_label: t.resolve("nav.products"),
            products,
            expertise: LinkItem::new(t, "nav.expertise", NavAction::Anchor(Anchor::Industries)),
            contact: LinkItem::new(t, "nav.contact", NavAction::Anchor(Anchor::Contact)),
            launch_project: LinkItem::new(
                t,
                "nav.launchProject",
                NavAction::Anchor(Anchor::Contact),
            ),
            language_label: t.resolve("nav.language"),
            active_language: active.code().to_uppercase(),
            languages,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Footer {
    pub brand: String,
    pub description: String,
    pub email: String,
    pub address: String,
    pub expertise_title: String,
    pub expertise: Vec<LinkItem>,
    pub copyright: String,
}

impl Footer {
    pub fn build(t: &Translator) -> Self {
        Self::for_year(t, chrono::Utc::now().year())
    }

    pub fn for_year(t: &Translator, year: i32) -> Self {
        let expertise = [
            ("footer.expertise.webDesign", View::WebDesign),
            ("footer.expertise.marketing", View::Marketing),
            ("footer.expertise.productDesign", View::ProductDesign),
            ("footer.expertise.software", View::CrmErp),
        ]
        .into_iter()
        .map(|(key, view)| LinkItem::new(t, key, NavAction::Go(view)))
        .collect();

        Self {
            brand: t.resolve("brand.name"),
            description: t.resolve("footer.description"),
            email: t.resolve("footer.email"),
            address: t.resolve("footer.address"),
            expertise_title: t.resolve("footer.expertiseTitle"),
            expertise,
            copyright: t.resolve_with("footer.copyright", &[("year", &year.to_string())]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{MemoryPreferenceStore, TranslationDictionary};

    // ==================== NavBar Tests ====================

    #[test]
    fn test_navbar_actions() {
        let mut store = MemoryPreferenceStore::new();
        let t = Translator::initialize(TranslationDictionary::bundled(), &mut store, None);
        let nav = NavBar::build(&t);

        assert_eq!(nav.expertise.action, NavAction::Anchor(Anchor::Industries));
        assert_eq!(nav.contact.action, NavAction::Anchor(Anchor::Contact));
        assert_eq!(nav.products.len(), 4);
        assert!(nav.products[0].highlighted);
        assert_eq!(nav.products[0].link.action, NavAction::Go(View::WebDesign));
    }

    #[test]
    fn test_navbar_language_switcher() {
        let mut store = MemoryPreferenceStore::new();
        let t = Translator::initialize(TranslationDictionary::bundled(), &mut store, Some("fr-FR"));
        let nav = NavBar::build(&t);

        assert_eq!(nav.active_language, "FR");
        let active: Vec<_> = nav.languages.iter().filter(|l| l.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].language, Language::Fr);
    }

    // ==================== Footer Tests ====================

    #[test]
    fn test_footer_fills_year() {
        let mut store = MemoryPreferenceStore::new();
        let t = Translator::initialize(TranslationDictionary::bundled(), &mut store, None);
        let footer = Footer::for_year(&t, 2031);

        assert!(footer.copyright.contains("2031"));
        assert!(!footer.copyright.contains("{year}"));
        assert_eq!(footer.expertise.len(), 4);
    }
}
