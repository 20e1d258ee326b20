//! Contact form wiring: field validity, error/status text and the `fetch` call

use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Document, Element, FormData, Headers, HtmlFormElement, HtmlInputElement,
    HtmlTextAreaElement, RequestInit, Response, ValidityState,
};

use super::helpers::by_id;
use crate::config::ContactSettings;
use crate::contact::{ContactForm, ContactFormView};
use crate::errors::SubmitError;
use crate::models::{Field, FormStatus, Validity};

struct FieldElements {
    field: Field,
    input: Element,
    error: Option<Element>,
}

pub struct WebContactForm {
    form: HtmlFormElement,
    status: Option<Element>,
    fields: Vec<FieldElements>,
}

impl WebContactForm {
    fn find(document: &Document, settings: &ContactSettings) -> Option<Self> {
        let form = by_id::<HtmlFormElement>(document, &settings.form_id)?;
        let mut fields = Vec::with_capacity(Field::ALL.len());
        for field in Field::ALL {
            let Some(input) = by_id::<Element>(document, settings.input_id(field)) else {
                log::warn!("contact form has no {:?} input", field);
                return None;
            };
            let error = by_id::<Element>(document, &settings.error_id(field));
            fields.push(FieldElements { field, input, error });
        }
        let status = by_id::<Element>(document, &settings.status_id);
        Some(Self { form, status, fields })
    }

    fn elements(&self, field: Field) -> Option<&FieldElements> {
        self.fields.iter().find(|f| f.field == field)
    }

    pub fn form(&self) -> &HtmlFormElement {
        &self.form
    }
}

fn validity_of(input: &Element) -> Option<ValidityState> {
    if let Some(input) = input.dyn_ref::<HtmlInputElement>() {
        return Some(input.validity());
    }
    input.dyn_ref::<HtmlTextAreaElement>().map(HtmlTextAreaElement::validity)
}

impl ContactFormView for WebContactForm {
    fn validity(&self, field: Field) -> Validity {
        let Some(state) = self.elements(field).and_then(|f| validity_of(&f.input)) else {
            return Validity::valid();
        };
        let value_missing = state.value_missing();
        let type_mismatch = state.type_mismatch();
        Validity { value_missing, type_mismatch, rule_violated: !state.valid() && !value_missing && !type_mismatch }
    }

    fn set_error(&self, field: Field, message: &str) {
        if let Some(error) = self.elements(field).and_then(|f| f.error.as_ref()) {
            error.set_text_content(Some(message));
        }
    }

    fn set_status(&self, status: FormStatus) {
        if let Some(el) = &self.status {
            el.set_text_content(Some(status.text()));
            el.set_class_name(status.class_name());
        }
    }

    fn reset(&self) {
        self.form.reset();
    }
}

/// POST the form to its action; resolves to the response status
async fn send(form: &HtmlFormElement) -> Result<u16, SubmitError> {
    let window = web_sys::window().ok_or_else(|| SubmitError::Network("no window".to_string()))?;
    let body = FormData::new_with_form(form).map_err(SubmitError::network)?;
    let headers = Headers::new().map_err(SubmitError::network)?;
    headers.set("Accept", "application/json").map_err(SubmitError::network)?;

    let init = RequestInit::new();
    init.set_method(&form.method());
    init.set_body(&body);
    init.set_headers(&headers);

    let response = JsFuture::from(window.fetch_with_str_and_init(&form.action(), &init))
        .await
        .map_err(SubmitError::network)?;
    let response: Response = response.dyn_into().map_err(SubmitError::network)?;
    Ok(response.status())
}

pub type WebContact = ContactForm<WebContactForm>;

/// Hook live validation and submission. Skipped when the page has no contact form.
pub fn install(
    document: &Document,
    settings: &ContactSettings,
    listeners: &mut Vec<EventListener>,
) -> Option<Rc<WebContact>> {
    let Some(view) = WebContactForm::find(document, settings) else {
        log::debug!("contact form markup not found, skipping");
        return None;
    };
    let contact = Rc::new(ContactForm::new(view));

    for field in &contact.view().fields {
        let on_input = Rc::clone(&contact);
        let which = field.field;
        listeners.push(EventListener::new(&field.input, "input", move |_| on_input.on_input(which)));
    }

    let on_submit = Rc::clone(&contact);
    listeners.push(EventListener::new_with_options(
        contact.view().form(),
        "submit",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            event.prevent_default();
            if on_submit.begin_submit().is_err() {
                return;
            }
            let pending = Rc::clone(&on_submit);
            wasm_bindgen_futures::spawn_local(async move {
                let outcome = send(pending.view().form()).await;
                pending.finish_submit(outcome);
            });
        },
    ));
    Some(contact)
}
