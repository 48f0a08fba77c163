//! Application store: the view router and the translator behind one handle.
//!
//! Hosts build an `App` per session (or per request), feed it navigation and
//! language actions, and render. Page components never hold the store; they
//! describe navigation as `NavAction` values that the host dispatches back.

use crate::i18n::{Language, Translator};
use crate::pages::{compose, Page};
use crate::router::{Anchor, Navigator, ScrollTarget, View, ViewRouter, Viewport};

pub struct App<'a> {
    router: ViewRouter,
    translator: Translator<'a>,
}

impl<'a> App<'a> {
    pub fn new(translator: Translator<'a>) -> Self {
        Self {
            router: ViewRouter::new(),
            translator,
        }
    }

    pub fn view(&self) -> View {
        self.router.current()
    }

    pub fn language(&self) -> Language {
        self.translator.language()
    }

    pub fn translator(&self) -> &Translator<'a> {
        &self.translator
    }

    pub fn set_language(&mut self, language: Language) {
        self.translator.set_language(language);
    }

    /// Compose the active view.
    pub fn render(&self) -> Page {
        compose(Some(self.router.current()), &self.translator)
    }

    /// Render, then perform the scroll the last navigation left pending.
    pub fn commit(&mut self, viewport: &mut dyn Viewport) -> (Page, Option<ScrollTarget>) {
        let page = self.render();
        let scrolled = self.router.commit(&page.anchors(), viewport);
        (page, scrolled)
    }
}

impl Navigator for App<'_> {
    fn navigate(&mut self, view: View) {
        self.router.navigate(view);
    }

    fn navigate_to_anchor(&mut self, anchor: Anchor) {
        self.router.navigate_to_anchor(anchor);
    }
}
