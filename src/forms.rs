//! Lead capture forms: field layout per form and per-instance form state.
//!
//! A `LeadForm` owns its field values and an in-flight flag. Submission is
//! split into `begin` (validate, mark in flight, build the submission) and
//! `finish` (clear the flag, reset on success) so a host can hold the form
//! across the suspension and a second submit while in flight is refused.

use crate::email::{LeadSender, LeadSubmission};
use crate::i18n::Translator;
use crate::router::View;
use serde::Serialize;

/// Which form issued a lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormKind {
    Hero,
    Contact,
    ServiceDetail,
}

impl FormKind {
    pub const fn tag(self) -> &'static str {
        match self {
            FormKind::Hero => "hero",
            FormKind::Contact => "contact",
            FormKind::ServiceDetail => "service-detail",
        }
    }

    pub fn from_tag(tag: &str) -> Option<FormKind> {
        [FormKind::Hero, FormKind::Contact, FormKind::ServiceDetail]
            .into_iter()
            .find(|kind| kind.tag() == tag)
    }

    /// Fields rendered by this form, in order.
    pub fn fields(self) -> &'static [Field] {
        match self {
            FormKind::Hero => &[Field::Name, Field::Email, Field::Service, Field::Message],
            FormKind::Contact | FormKind::ServiceDetail => {
                &[Field::Name, Field::Email, Field::Phone, Field::Message]
            }
        }
    }

    fn success_key(self) -> &'static str {
        match self {
            FormKind::Hero => "hero.thankYouMessage",
            FormKind::Contact => "contact.thankYouMessage",
            FormKind::ServiceDetail => "servicedetail.contactUs.successMessage",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Phone,
    Message,
    Service,
}

impl Field {
    pub const fn name(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Message => "message",
            Field::Service => "service",
        }
    }

    pub const fn is_required(self) -> bool {
        matches!(self, Field::Name | Field::Email)
    }
}

/// Values of the hero form's service select, with their label keys.
pub const HERO_SERVICE_OPTIONS: [(&str, &str); 5] = [
    ("web-dev", "hero.service.webDev"),
    ("seo", "hero.service.seo"),
    ("software", "hero.service.software"),
    ("design", "hero.service.design"),
    ("other", "hero.service.other"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldView {
    pub field: Field,
    pub label: String,
    pub placeholder: Option<String>,
    pub required: bool,
    pub multiline: bool,
    pub options: Vec<SelectOption>,
}

/// A form ready to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormView {
    pub kind: FormKind,
    pub fields: Vec<FieldView>,
    pub submit_label: String,
    /// Fixed `service` value sent with the lead (service detail pages).
    pub service: Option<String>,
}

impl FormView {
    pub fn build(kind: FormKind, service: Option<View>, t: &Translator) -> Self {
        let fields = kind
            .fields()
            .iter()
            .map(|&field| field_view(kind, field, t))
            .collect();

        let submit_label = t.resolve(match kind {
            FormKind::Hero => "hero.secureSpot",
            FormKind::Contact => "contact.submit",
            FormKind::ServiceDetail => "servicedetail.contactUs.button",
        });

        Self {
            kind,
            fields,
            submit_label,
            service: service.map(|view| view.tag().to_string()),
        }
    }
}

fn field_view(kind: FormKind, field: Field, t: &Translator) -> FieldView {
    let namespace = match kind {
        FormKind::Hero => "hero",
        FormKind::Contact => "contact",
        FormKind::ServiceDetail => "servicedetail.contactUs",
    };

    let (label_key, placeholder_key) = match (kind, field) {
        (_, Field::Name) => (format!("{}.fullName", namespace), None),
        (_, Field::Email) => (format!("{}.email", namespace), None),
        (_, Field::Phone) => (format!("{}.phone", namespace), None),
        (FormKind::Hero, Field::Service) => {
            ("hero.howCanWeHelp".to_string(), Some("hero.selectService"))
        }
        (FormKind::Hero, Field::Message) => {
            ("hero.projectDetails".to_string(), Some("hero.describeGoals"))
        }
        (FormKind::Contact, Field::Message) => {
            ("contact.message".to_string(), Some("contact.messagePlaceholder"))
        }
        (_, Field::Message) | (_, Field::Service) => (format!("{}.{}", namespace, field.name()), None),
    };

    let options = if field == Field::Service {
        HERO_SERVICE_OPTIONS
            .iter()
            .map(|(value, key)| SelectOption {
                value: value.to_string(),
                label: t.resolve(key),
            })
            .collect()
    } else {
        Vec::new()
    };

    FieldView {
        field,
        label: t.resolve(&label_key),
        placeholder: placeholder_key.map(|key| t.resolve(key)),
        required: field.is_required(),
        multiline: field == Field::Message,
        options,
    }
}

/// Result of a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Delivered; the form was reset.
    Sent { name: String },
    /// The relay refused or failed; the fields are untouched.
    Failed,
    /// A required field is blank; nothing was sent.
    Invalid { missing: Vec<&'static str> },
    /// A submission from this form is still in flight.
    Busy,
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Sent { .. })
    }

    /// Localized acknowledgment shown to the visitor.
    pub fn acknowledgment(&self, kind: FormKind, t: &Translator) -> String {
        match self {
            SubmitOutcome::Sent { name } => {
                t.resolve_with(kind.success_key(), &[("name", name.as_str())])
            }
            SubmitOutcome::Failed => t.resolve("forms.error"),
            SubmitOutcome::Invalid { .. } => t.resolve("forms.required"),
            SubmitOutcome::Busy => t.resolve("forms.sending"),
        }
    }
}

/// State of one form instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadForm {
    kind: FormKind,
    name: String,
    email: String,
    phone: String,
    message: String,
    service: String,
    fixed_service: Option<View>,
    /// `form_type` sent to the relay; `None` lets the template default apply
    form_type: Option<String>,
    in_flight: bool,
}

impl LeadForm {
    pub fn new(kind: FormKind) -> Self {
        Self {
            kind,
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            message: String::new(),
            service: String::new(),
            fixed_service: None,
            form_type: Some(kind.tag().to_string()),
            in_flight: false,
        }
    }

    /// The form at the bottom of a service detail page.
    pub fn for_service(view: View) -> Self {
        let mut form = Self::new(FormKind::ServiceDetail);
        form.fixed_service = Some(view);
        form.service = view.tag().to_string();
        form
    }

    /// Fill a form from a submission received over the wire. The submission's
    /// own `form_type` is forwarded as given, even when absent or unknown.
    pub fn from_submission(kind: FormKind, lead: &LeadSubmission) -> Self {
        let mut form = match lead.service.as_deref().and_then(View::from_tag) {
            Some(view) if kind == FormKind::ServiceDetail => Self::for_service(view),
            _ => Self::new(kind),
        };
        form.set(Field::Name, &lead.name);
        form.set(Field::Email, &lead.email);
        form.set(Field::Phone, lead.phone.as_deref().unwrap_or_default());
        form.set(Field::Message, lead.message.as_deref().unwrap_or_default());
        if form.fixed_service.is_none() {
            form.set(Field::Service, lead.service.as_deref().unwrap_or_default());
        }
        form.form_type = lead
            .form_type
            .as_deref()
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string);
        form
    }

    pub fn kind(&self) -> FormKind {
        self.kind
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Whether the submit affordance is enabled.
    pub fn can_submit(&self) -> bool {
        !self.in_flight
    }

    pub fn set(&mut self, field: Field, value: &str) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
            Field::Message => &mut self.message,
            Field::Service if self.fixed_service.is_some() => return,
            Field::Service => &mut self.service,
        };
        *slot = value.to_string();
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::Message => &self.message,
            Field::Service => &self.service,
        }
    }

    fn missing_required(&self) -> Vec<&'static str> {
        self.kind
            .fields()
            .iter()
            .filter(|field| field.is_required() && self.value(**field).trim().is_empty())
            .map(|field| field.name())
            .collect()
    }

    fn submission(&self) -> LeadSubmission {
        fn optional(value: &str) -> Option<String> {
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_string())
        }

        LeadSubmission {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: optional(&self.phone),
            message: optional(&self.message),
            service: optional(&self.service),
            form_type: self.form_type.clone(),
        }
    }

    /// Validate and mark the form in flight.
    pub fn begin(&mut self) -> Result<LeadSubmission, SubmitOutcome> {
        if self.in_flight {
            return Err(SubmitOutcome::Busy);
        }
        let missing = self.missing_required();
        if !missing.is_empty() {
            return Err(SubmitOutcome::Invalid { missing });
        }
        self.in_flight = true;
        Ok(self.submission())
    }

    /// Record the relay's answer. Fields are cleared only on delivery.
    pub fn finish(&mut self, delivered: bool) -> SubmitOutcome {
        self.in_flight = false;
        if !delivered {
            return SubmitOutcome::Failed;
        }

        let name = std::mem::take(&mut self.name);
        self.email.clear();
        self.phone.clear();
        self.message.clear();
        if self.fixed_service.is_none() {
            self.service.clear();
        }
        SubmitOutcome::Sent { name }
    }

    pub async fn submit(&mut self, sender: &dyn LeadSender) -> SubmitOutcome {
        match self.begin() {
            Ok(lead) => {
                let delivered = sender.send(&lead).await;
                self.finish(delivered)
            }
            Err(outcome) => outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{Language, MemoryPreferenceStore, TranslationDictionary, TranslationMetrics};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct StubSender {
        result: bool,
        seen: Mutex<Vec<LeadSubmission>>,
    }

    impl StubSender {
        fn new(result: bool) -> Self {
            Self {
                result,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LeadSender for StubSender {
        async fn send(&self, lead: &LeadSubmission) -> bool {
            self.seen.lock().unwrap().push(lead.clone());
            self.result
        }
    }

    fn filled_contact_form() -> LeadForm {
        let mut form = LeadForm::new(FormKind::Contact);
        form.set(Field::Name, "Ada");
        form.set(Field::Email, "ada@example.com");
        form.set(Field::Phone, "+33 6 00 00 00 00");
        form.set(Field::Message, "Hello");
        form
    }

    // ==================== Submit Tests ====================

    #[tokio::test]
    async fn test_submit_success_resets_fields() {
        let sender = StubSender::new(true);
        let mut form = filled_contact_form();

        let outcome = form.submit(&sender).await;
        assert_eq!(outcome, SubmitOutcome::Sent { name: "Ada".to_string() });
        for field in FormKind::Contact.fields() {
            assert_eq!(form.value(*field), "");
        }
        assert!(!form.is_in_flight());

        let seen = sender.seen.lock().unwrap();
        assert_eq!(seen[0].form_type.as_deref(), Some("contact"));
        assert_eq!(seen[0].phone.as_deref(), Some("+33 6 00 00 00 00"));
    }

    #[tokio::test]
    async fn test_submit_failure_keeps_fields() {
        let sender = StubSender::new(false);
        let mut form = filled_contact_form();
        let before = form.clone();

        let outcome = form.submit(&sender).await;
        assert_eq!(outcome, SubmitOutcome::Failed);
        assert_eq!(form, before);
        assert!(form.can_submit());
    }

    #[tokio::test]
    async fn test_submit_missing_required_does_not_send() {
        let sender = StubSender::new(true);
        let mut form = LeadForm::new(FormKind::Hero);
        form.set(Field::Name, "Ada");

        let outcome = form.submit(&sender).await;
        assert_eq!(outcome, SubmitOutcome::Invalid { missing: vec!["email"] });
        assert!(sender.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_second_submit_while_in_flight_is_busy() {
        let mut form = filled_contact_form();
        assert!(form.begin().is_ok());
        assert!(!form.can_submit());
        assert_eq!(form.begin(), Err(SubmitOutcome::Busy));

        form.finish(false);
        assert!(form.can_submit());
    }

    #[tokio::test]
    async fn test_service_detail_form_keeps_service_tag() {
        let sender = StubSender::new(true);
        let mut form = LeadForm::for_service(View::CrmErp);
        form.set(Field::Name, "Ada");
        form.set(Field::Email, "ada@example.com");
        form.set(Field::Service, "something-else");

        assert!(form.submit(&sender).await.is_success());
        assert_eq!(form.value(Field::Service), "crm-erp");

        let seen = sender.seen.lock().unwrap();
        assert_eq!(seen[0].service.as_deref(), Some("crm-erp"));
        assert_eq!(seen[0].form_type.as_deref(), Some("service-detail"));
    }

    #[test]
    fn test_from_submission_service_detail() {
        let lead = LeadSubmission {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            service: Some("seo".to_string()),
            ..Default::default()
        };
        let form = LeadForm::from_submission(FormKind::ServiceDetail, &lead);
        assert_eq!(form.value(Field::Service), "seo");
        assert_eq!(form.value(Field::Name), "Ada");
    }

    #[tokio::test]
    async fn test_blank_name_and_email_are_both_reported() {
        let sender = StubSender::new(true);
        let mut form = LeadForm::new(FormKind::Contact);
        form.set(Field::Name, "   ");
        form.set(Field::Message, "Hello");

        let outcome = form.submit(&sender).await;
        assert_eq!(
            outcome,
            SubmitOutcome::Invalid { missing: vec!["name", "email"] }
        );
        assert!(sender.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_from_submission_forwards_raw_form_type() {
        let sender = StubSender::new(true);
        let lead = LeadSubmission {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            form_type: Some("newsletter".to_string()),
            ..Default::default()
        };

        let mut form = LeadForm::from_submission(FormKind::Contact, &lead);
        assert!(form.submit(&sender).await.is_success());

        let untagged = LeadSubmission {
            form_type: None,
            ..lead
        };
        let mut form = LeadForm::from_submission(FormKind::Contact, &untagged);
        assert!(form.submit(&sender).await.is_success());

        let seen = sender.seen.lock().unwrap();
        assert_eq!(seen[0].form_type.as_deref(), Some("newsletter"));
        assert_eq!(seen[1].form_type, None);
    }

    // ==================== Acknowledgment Tests ====================

    #[test]
    fn test_acknowledgments_are_localized() {
        let dict = TranslationDictionary::bundled();
        let mut store = MemoryPreferenceStore::with_saved("en");
        let mut t = Translator::initialize(dict, &mut store, None);

        let sent = SubmitOutcome::Sent { name: "Ada".to_string() };
        let contact = sent.acknowledgment(FormKind::Contact, &t);
        assert!(contact.contains("Ada"));
        assert!(!contact.contains("{name}"));
        assert_eq!(
            sent.acknowledgment(FormKind::Hero, &t),
            t.resolve("hero.thankYouMessage")
        );

        t.set_language(Language::Fr);
        assert_eq!(
            SubmitOutcome::Failed.acknowledgment(FormKind::Contact, &t),
            t.resolve("forms.error")
        );
        assert_ne!(t.resolve("forms.error"), "forms.error");
    }

    // ==================== Layout Tests ====================

    #[test]
    fn test_form_views_resolve_every_label() {
        let dict = TranslationDictionary::bundled();
        let metrics = TranslationMetrics::new();
        for language in Language::ALL {
            let mut store = MemoryPreferenceStore::with_saved(language.code());
            let t = Translator::initialize(dict, &mut store, None).with_metrics(&metrics);

            for (kind, service) in [
                (FormKind::Hero, None),
                (FormKind::Contact, None),
                (FormKind::ServiceDetail, Some(View::Seo)),
            ] {
                let view = FormView::build(kind, service, &t);
                assert_eq!(view.fields.len(), kind.fields().len());
            }
        }
        assert_eq!(metrics.resolution_misses(), 0);
        assert!(metrics.resolution_hits() > 0);
    }

    #[test]
    fn test_hero_form_layout() {
        let dict = TranslationDictionary::bundled();
        let mut store = MemoryPreferenceStore::new();
        let t = Translator::initialize(dict, &mut store, None);

        let hero = FormView::build(FormKind::Hero, None, &t);
        let service = hero
            .fields
            .iter()
            .find(|f| f.field == Field::Service)
            .expect("Hero form should have a service select");
        assert_eq!(service.options.len(), 5);
        assert_eq!(service.options[0].value, "web-dev");
        assert!(hero.fields.iter().all(|f| f.field != Field::Phone));

        let detail = FormView::build(FormKind::ServiceDetail, Some(View::Seo), &t);
        assert_eq!(detail.service.as_deref(), Some("seo"));
    }
}
