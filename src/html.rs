//! HTML rendering of composed pages.
//!
//! Output is plain semantic markup: every home section is mounted under its
//! anchor id, navigation becomes links (`/{view}` or `/#{anchor}`) and lead
//! forms post JSON to `/api/leads` through a small inline script.

use crate::forms::{Field, FormView};
use crate::pages::{
    CallToAction, Card, CardGrid, Contact, Footer, Hero, Industries, ItemList, LinkItem, NavBar,
    Page, Section, ServiceDetailRecord, Services, Span, Testimonials, WebDesignPage,
    WebDevelopment,
};
use crate::router::{NavAction, View};

/// Escape text for element content and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// URL a navigation action leads to.
pub fn href(action: NavAction) -> String {
    match action {
        NavAction::Go(View::Home) | NavAction::Back => "/".to_string(),
        NavAction::Go(view) => format!("/{}", view.tag()),
        NavAction::Anchor(anchor) => format!("/#{}", anchor.id()),
    }
}

const FORM_SCRIPT: &str = r#"document.querySelectorAll("form[data-form-type]").forEach(function (form) {
  form.addEventListener("submit", function (event) {
    event.preventDefault();
    var button = form.querySelector("button[type=submit]");
    var label = button.textContent;
    var lead = { form_type: form.dataset.formType };
    new FormData(form).forEach(function (value, key) { lead[key] = value; });
    button.disabled = true;
    button.textContent = form.dataset.sending;
    fetch("/api/leads", { method: "POST", headers: { "Content-Type": "application/json" }, body: JSON.stringify(lead) })
      .then(function (response) { return response.json().then(function (body) { return [response.ok, body]; }); })
      .then(function (result) { alert(result[1].message); if (result[0]) { form.reset(); } })
      .catch(function () { alert(form.dataset.error); })
      .finally(function () { button.disabled = false; button.textContent = label; });
  });
});"#;

struct Labels {
    sending: String,
    error: String,
}

/// Render a full HTML document. `path` is the request path, used for the
/// language switcher links.
pub fn render_page(page: &Page, path: &str, sending: &str, error: &str) -> String {
    let labels = Labels {
        sending: sending.to_string(),
        error: error.to_string(),
    };
    let mut out = String::new();

    out.push_str("<!DOCTYPE html>\n");
    out.push_str(&format!("<html lang=\"{}\">\n<head>\n", page.language.code()));
    out.push_str("<meta charset=\"utf-8\">\n");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    out.push_str(&format!("<title>{}</title>\n", escape(&page.title)));
    out.push_str(&format!(
        "<meta name=\"description\" content=\"{}\">\n",
        escape(&page.description)
    ));
    out.push_str("</head>\n<body>\n");

    render_nav(&mut out, &page.nav, path);

    out.push_str("<main>\n");
    for section in &page.body {
        match section {
            Section::Hero(hero) => render_hero(&mut out, hero, &labels),
            Section::Services(services) => render_services(&mut out, services),
            Section::Industries(industries) => render_industries(&mut out, industries),
            Section::WebDevelopment(webdev) => render_webdev(&mut out, webdev),
            Section::Testimonials(testimonials) => render_testimonials(&mut out, testimonials),
            Section::Contact(contact) => render_contact(&mut out, contact, &labels),
            Section::WebDesign(web_design) => render_web_design(&mut out, web_design),
            Section::ServiceDetail(record) => render_service_detail(&mut out, record, &labels),
        }
    }
    out.push_str("</main>\n");

    render_footer(&mut out, &page.footer);

    out.push_str("<script>\n");
    out.push_str(FORM_SCRIPT);
    out.push_str("\n</script>\n</body>\n</html>\n");
    out
}

fn link(out: &mut String, item: &LinkItem, class: &str) {
    out.push_str(&format!(
        "<a class=\"{}\" href=\"{}\">{}</a>",
        class,
        href(item.action),
        escape(&item.label)
    ));
}

fn spans(out: &mut String, spans: &[Span]) {
    for span in spans {
        if span.emphasis {
            out.push_str(&format!("<strong>{}</strong>", escape(&span.text)));
        } else {
            out.push_str(&escape(&span.text));
        }
    }
}

fn heading(out: &mut String, level: u8, text: &str) {
    out.push_str(&format!("<h{0}>{1}</h{0}>\n", level, escape(text)));
}

fn paragraph(out: &mut String, text: &str) {
    out.push_str(&format!("<p>{}</p>\n", escape(text)));
}

fn list(out: &mut String, items: &ItemList) {
    heading(out, 3, &items.title);
    if let Some(subtitle) = &items.subtitle {
        paragraph(out, subtitle);
    }
    out.push_str("<ul>\n");
    for item in &items.items {
        out.push_str(&format!("<li>{}</li>\n", escape(item)));
    }
    out.push_str("</ul>\n");
}

fn card(out: &mut String, card: &Card) {
    out.push_str("<article class=\"card\">\n");
    if let Some(value) = &card.value {
        out.push_str(&format!("<span class=\"value\">{}</span>\n", escape(value)));
    }
    heading(out, 3, &card.title);
    paragraph(out, &card.description);
    out.push_str("</article>\n");
}

fn grid(out: &mut String, grid: &CardGrid) {
    heading(out, 2, &grid.title);
    if let Some(subtitle) = &grid.subtitle {
        paragraph(out, subtitle);
    }
    for c in &grid.cards {
        card(out, c);
    }
}

fn call_to_action(out: &mut String, cta: &CallToAction) {
    out.push_str("<aside class=\"cta\">\n");
    heading(out, 3, &cta.title);
    paragraph(out, &cta.description);
    link(out, &cta.button, "button");
    out.push_str("\n</aside>\n");
}

fn form(out: &mut String, form: &FormView, labels: &Labels) {
    out.push_str(&format!(
        "<form class=\"lead-form\" data-form-type=\"{}\" data-sending=\"{}\" data-error=\"{}\">\n",
        form.kind.tag(),
        escape(&labels.sending),
        escape(&labels.error)
    ));
    if let Some(service) = &form.service {
        out.push_str(&format!(
            "<input type=\"hidden\" name=\"service\" value=\"{}\">\n",
            escape(service)
        ));
    }
    for field in &form.fields {
        let name = field.field.name();
        let required = if field.required { " required" } else { "" };
        let placeholder = field
            .placeholder
            .as_deref()
            .map(|p| format!(" placeholder=\"{}\"", escape(p)))
            .unwrap_or_default();

        out.push_str(&format!("<label>{}\n", escape(&field.label)));
        if !field.options.is_empty() {
            out.push_str(&format!("<select name=\"{}\"{}>\n", name, required));
            if let Some(p) = &field.placeholder {
                out.push_str(&format!("<option value=\"\">{}</option>\n", escape(p)));
            }
            for option in &field.options {
                out.push_str(&format!(
                    "<option value=\"{}\">{}</option>\n",
                    escape(&option.value),
                    escape(&option.label)
                ));
            }
            out.push_str("</select>\n");
        } else if field.multiline {
            out.push_str(&format!(
                "<textarea name=\"{}\"{}{}></textarea>\n",
                name, placeholder, required
            ));
        } else {
            let input_type = match field.field {
                Field::Email => "email",
                Field::Phone => "tel",
                _ => "text",
            };
            out.push_str(&format!(
                "<input type=\"{}\" name=\"{}\"{}{}>\n",
                input_type, name, placeholder, required
            ));
        }
        out.push_str("</label>\n");
    }
    out.push_str(&format!(
        "<button type=\"submit\">{}</button>\n</form>\n",
        escape(&form.submit_label)
    ));
}

fn render_nav(out: &mut String, nav: &NavBar, path: &str) {
    out.push_str("<header>\n<nav>\n");
    out.push_str(&format!(
        "<a class=\"brand\" href=\"/\">{}</a>\n",
        escape(&nav.brand)
    ));
    link(out, &nav.home, "nav-link");
    out.push_str(&format!(
        "\n<details class=\"products\"><summary>{}</summary>\n",
        escape(&nav.products_label)
    ));
    for product in &nav.products {
        let class = if product.highlighted {
            "nav-link highlighted"
        } else {
            "nav-link"
        };
        link(out, &product.link, class);
        out.push('\n');
    }
    out.push_str("</details>\n");
    link(out, &nav.expertise, "nav-link");
    link(out, &nav.contact, "nav-link");
    link(out, &nav.launch_project, "button");
    out.push_str(&format!(
        "\n<div class=\"language\" aria-label=\"{}\"><span>{}</span>\n",
        escape(&nav.language_label),
        escape(&nav.active_language)
    ));
    for option in &nav.languages {
        let current = if option.active { " aria-current=\"true\"" } else { "" };
        out.push_str(&format!(
            "<a href=\"{}?lang={}\"{}>{}</a>\n",
            escape(path),
            option.language.code(),
            current,
            escape(&option.label)
        ));
    }
    out.push_str("</div>\n</nav>\n</header>\n");
}

fn render_hero(out: &mut String, hero: &Hero, labels: &Labels) {
    out.push_str("<section id=\"hero\">\n");
    out.push_str(&format!("<span class=\"badge\">{}</span>\n<h1>", escape(&hero.badge)));
    for line in &hero.title_lines {
        out.push_str(&format!("<span>{}</span>", escape(line)));
    }
    out.push_str("</h1>\n<p>");
    spans(out, &hero.description);
    out.push_str("</p>\n");
    link(out, &hero.primary, "button");
    link(out, &hero.secondary, "button secondary");
    out.push('\n');
    paragraph(out, &hero.trusted_by);
    out.push_str(&format!(
        "<div class=\"consultation\"><span class=\"status\">{}</span>\n",
        escape(&hero.availability)
    ));
    heading(out, 2, &hero.form_title);
    paragraph(out, &hero.form_description);
    form(out, &hero.form, labels);
    paragraph(out, &hero.confidential);
    out.push_str("</div>\n</section>\n");
}

fn render_services(out: &mut String, services: &Services) {
    out.push_str("<section id=\"services\">\n");
    out.push_str(&format!(
        "<span class=\"badge\">{}</span>\n",
        escape(&services.subtitle)
    ));
    heading(out, 2, &services.title);
    paragraph(out, &services.description);
    for service in &services.cards {
        out.push_str("<article class=\"card\">\n");
        heading(out, 3, &service.card.title);
        paragraph(out, &service.card.description);
        link(out, &service.action, "card-link");
        out.push_str("\n</article>\n");
    }
    call_to_action(out, &services.specific_need);
    out.push_str("</section>\n");
}

fn render_industries(out: &mut String, industries: &Industries) {
    out.push_str("<section id=\"industries\">\n");
    out.push_str(&format!(
        "<span class=\"badge\">{}</span>\n",
        escape(&industries.badge)
    ));
    heading(out, 2, &industries.title);
    paragraph(out, &industries.description);
    for sector in &industries.sectors {
        out.push_str("<article class=\"sector\">\n");
        heading(out, 3, &sector.title);
        paragraph(out, &sector.description);
        out.push_str("<ul class=\"tags\">");
        for feature in &sector.features {
            out.push_str(&format!("<li>{}</li>", escape(feature)));
        }
        out.push_str(&format!(
            "</ul>\n<span class=\"case-study\">{}</span>\n</article>\n",
            escape(&sector.case_study)
        ));
    }
    call_to_action(out, &industries.not_listed);
    out.push_str("</section>\n");
}

fn render_webdev(out: &mut String, webdev: &WebDevelopment) {
    out.push_str("<section id=\"web-development\">\n");
    out.push_str(&format!("<span class=\"badge\">{}</span>\n", escape(&webdev.badge)));
    heading(out, 2, &webdev.title);
    paragraph(out, &webdev.description);
    for feature in &webdev.features {
        card(out, feature);
    }
    card(out, &webdev.why_generic);

    let table = &webdev.custom_software;
    heading(out, 3, &table.title);
    paragraph(out, &table.description);
    out.push_str(&format!(
        "<table>\n<tr><th>{}</th><th>{}</th></tr>\n",
        escape(&table.industry_header),
        escape(&table.solution_header)
    ));
    for (industry, solution) in &table.rows {
        out.push_str(&format!(
            "<tr><td>{}</td><td>{}</td></tr>\n",
            escape(industry),
            escape(solution)
        ));
    }
    out.push_str("</table>\n");

    let cost = &webdev.cost;
    out.push_str("<div class=\"cost\">\n");
    heading(out, 3, &cost.title);
    for (label, points) in [
        (&cost.generic_label, &cost.generic_points),
        (&cost.custom_label, &cost.custom_points),
    ] {
        out.push_str(&format!("<h4>{}</h4>\n<ul>", escape(label)));
        for point in points {
            out.push_str(&format!("<li>{}</li>", escape(point)));
        }
        out.push_str("</ul>\n");
    }
    out.push_str("</div>\n");
    link(out, &webdev.button, "button");
    out.push_str("\n</section>\n");
}

fn render_testimonials(out: &mut String, testimonials: &Testimonials) {
    out.push_str("<section id=\"testimonials\">\n");
    out.push_str(&format!(
        "<span class=\"badge\">{}</span>\n",
        escape(&testimonials.badge)
    ));
    heading(out, 2, &testimonials.title);
    for item in &testimonials.items {
        out.push_str(&format!(
            "<figure>\n<blockquote>{}</blockquote>\n<figcaption>{}, {}</figcaption>\n<strong>{}</strong> <span>{}</span>\n</figure>\n",
            escape(&item.quote),
            escape(&item.author),
            escape(&item.role),
            escape(&item.metric),
            escape(&item.metric_label)
        ));
    }
    out.push_str("</section>\n");
}

fn render_contact(out: &mut String, contact: &Contact, labels: &Labels) {
    out.push_str("<section id=\"contact\">\n");
    out.push_str(&format!("<span class=\"badge\">{}</span>\n<h2>", escape(&contact.title)));
    let lines: Vec<String> = contact.heading_lines.iter().map(|l| escape(l)).collect();
    out.push_str(&lines.join("<br>"));
    out.push_str("</h2>\n");
    paragraph(out, &contact.description);
    heading(out, 3, &contact.form_title);
    paragraph(out, &contact.form_subtitle);
    form(out, &contact.form, labels);
    out.push_str("</section>\n");
}

fn render_web_design(out: &mut String, page: &WebDesignPage) {
    out.push_str("<section class=\"web-design\">\n");
    link(out, &page.back, "back");
    out.push_str(&format!(
        "\n<span class=\"badge\">{}</span>\n",
        escape(&page.badge)
    ));
    heading(out, 1, &page.title);
    out.push_str("<p>");
    spans(out, &page.description);
    out.push_str("</p>\n");
    paragraph(out, &page.trusted_by);
    list(out, &page.stats);
    list(out, &page.without);
    grid(out, &page.pillars);
    grid(out, &page.benefits);
    grid(out, &page.trends);
    call_to_action(out, &page.guarantee);
    out.push_str("</section>\n");
}

fn render_service_detail(out: &mut String, record: &ServiceDetailRecord, labels: &Labels) {
    out.push_str(&format!(
        "<section class=\"service-detail\" data-view=\"{}\">\n",
        record.view.tag()
    ));
    link(out, &record.back, "back");
    out.push('\n');
    out.push_str(&format!(
        "<span class=\"badge\">{}</span>\n",
        escape(&record.subtitle)
    ));
    heading(out, 1, &record.title);
    paragraph(out, &record.description);

    card(out, &record.what_is);
    for section in [&record.why_important, &record.benefits, &record.examples] {
        list(out, section);
    }

    heading(out, 2, &record.methodology_title);
    paragraph(out, &record.methodology_subtitle);
    list(out, &record.how_it_works);
    for pillar in &record.pillars {
        card(out, pillar);
    }

    if let Some(comparison) = &record.comparison {
        out.push_str("<div class=\"comparison\">\n");
        list(out, &comparison.generic);
        list(out, &comparison.custom);
        out.push_str("</div>\n");
    }
    for section in [
        &record.products,
        &record.training,
        &record.features,
        &record.advantages,
    ]
    .into_iter()
    .flatten()
    {
        list(out, section);
    }

    heading(out, 2, &record.faq_title);
    for faq in &record.faqs {
        out.push_str(&format!(
            "<details><summary>{}</summary><p>{}</p></details>\n",
            escape(&faq.question),
            escape(&faq.answer)
        ));
    }

    out.push_str("<div class=\"contact-us\">\n");
    heading(out, 2, &record.contact_title);
    paragraph(out, &record.contact_subtitle);
    form(out, &record.form, labels);
    out.push_str("</div>\n</section>\n");
}

fn render_footer(out: &mut String, footer: &Footer) {
    out.push_str("<footer>\n");
    out.push_str(&format!("<strong>{}</strong>\n", escape(&footer.brand)));
    paragraph(out, &footer.description);
    out.push_str(&format!(
        "<a href=\"mailto:{0}\">{0}</a>\n",
        escape(&footer.email)
    ));
    paragraph(out, &footer.address);
    heading(out, 4, &footer.expertise_title);
    out.push_str("<ul>\n");
    for item in &footer.expertise {
        out.push_str("<li>");
        link(out, item, "footer-link");
        out.push_str("</li>\n");
    }
    out.push_str("</ul>\n");
    out.push_str(&format!("<small>{}</small>\n", escape(&footer.copyright)));
    out.push_str("</footer>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{MemoryPreferenceStore, TranslationDictionary, Translator};
    use crate::pages::compose;
    use crate::router::Anchor;

    fn render(view: Option<View>, lang: &str) -> String {
        let mut store = MemoryPreferenceStore::with_saved(lang);
        let t = Translator::initialize(TranslationDictionary::bundled(), &mut store, None);
        let page = compose(view, &t);
        render_page(&page, "/", &t.resolve("forms.sending"), &t.resolve("forms.error"))
    }

    // ==================== Escape Tests ====================

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_href() {
        assert_eq!(href(NavAction::Go(View::Home)), "/");
        assert_eq!(href(NavAction::Back), "/");
        assert_eq!(href(NavAction::Go(View::CrmErp)), "/crm-erp");
        assert_eq!(href(NavAction::Anchor(Anchor::Industries)), "/#industries");
    }

    // ==================== Document Tests ====================

    #[test]
    fn test_home_document_mounts_anchors_in_order() {
        let html = render(Some(View::Home), "en");
        let positions: Vec<usize> = Anchor::HOME_ORDER
            .iter()
            .map(|a| {
                html.find(&format!("<section id=\"{}\">", a.id()))
                    .unwrap_or_else(|| panic!("missing #{}", a.id()))
            })
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<html lang=\"en\">"));
    }

    #[test]
    fn test_document_language_and_forms() {
        let html = render(Some(View::Seo), "fr");
        assert!(html.contains("<html lang=\"fr\">"));
        assert!(html.contains("data-form-type=\"service-detail\""));
        assert!(html.contains("name=\"service\" value=\"seo\""));
        assert!(html.contains("?lang=en"));
    }

    #[test]
    fn test_empty_body_for_unknown_view() {
        let html = render(None, "en");
        assert!(html.contains("<main>\n</main>"));
        assert!(html.contains("<footer>"));
    }
}
