//! Contact form: validation, spam screening and the submit button's
//! sending / sent / error states.

use std::cell::Cell;
use std::rc::Rc;

use log::{debug, warn};
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlElement, HtmlInputElement, HtmlTextAreaElement, Window};

use crate::config;
use crate::contact::emailjs::{DeliveryError, EmailJs};
use crate::dom::{listen, DomNode, PageRoot, WebPage};
use crate::timing::Scheduler;

pub const CONTACT_FORM_SELECTOR: &str = ".contact-form";
pub const SUBMIT_BUTTON_SELECTOR: &str = ".submit-button";

pub const SENDING_LABEL: &str = "Sending...";
pub const SENT_LABEL: &str = "✓ Sent!";
pub const ERROR_LABEL: &str = "✗ Error";

const SENT_COLOR: &str = "#10b981";
const ERROR_COLOR: &str = "#ef4444";
const RESTING_COLOR: &str = "#3CA1FF";

pub const SPAM_PHRASES: [&str; 6] = [
    "free money",
    "viagra",
    "casino",
    "lottery winner",
    "click here now",
    "make money fast",
];

/// Display text is what the visitor sees in the alert.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a valid name (at least 2 characters)")]
    Name,
    #[error("Please enter a valid email address")]
    Email,
    #[error("Please enter a message (at least 10 characters)")]
    Message,
    #[error("Your message appears to contain content that may be flagged as spam. Please revise and try again.")]
    Spam,
}

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("a message is already being sent")]
    InFlight,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactFields {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let name = self.name.trim();
        let email = self.email.trim();
        let message = self.message.trim();

        if name.chars().count() < 2 {
            return Err(ValidationError::Name);
        }
        if !email.contains('@') || email.chars().count() < 5 {
            return Err(ValidationError::Email);
        }
        if message.chars().count() < 10 {
            return Err(ValidationError::Message);
        }

        let text = format!("{} {} {}", name, email, message).to_lowercase();
        if SPAM_PHRASES.iter().any(|phrase| text.contains(phrase)) {
            return Err(ValidationError::Spam);
        }
        Ok(())
    }
}

/// Validation runs synchronously inside `submit`, so there is no phase in
/// which it is observable; a rejected submit stays `Idle`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitPhase {
    Idle,
    Sending,
    Success,
    Error,
}

struct FormInner<N, S> {
    form: N,
    button: N,
    scheduler: S,
    phase: Cell<SubmitPhase>,
}

pub struct ContactForm<N, S> {
    inner: Rc<FormInner<N, S>>,
}

impl<N, S> Clone for ContactForm<N, S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<N: DomNode, S: Scheduler> ContactForm<N, S> {
    pub fn new(form: N, button: N, scheduler: S) -> Self {
        Self {
            inner: Rc::new(FormInner {
                form,
                button,
                scheduler,
                phase: Cell::new(SubmitPhase::Idle),
            }),
        }
    }

    pub fn phase(&self) -> SubmitPhase {
        self.inner.phase.get()
    }

    /// Validates `fields` and, if they pass, puts the button into its
    /// sending state. The returned [`Delivery`] must be completed with the
    /// outcome of the send.
    pub fn submit(&self, fields: &ContactFields) -> Result<Delivery<N, S>, SubmitError> {
        if self.phase() != SubmitPhase::Idle {
            return Err(SubmitError::InFlight);
        }

        fields.validate()?;

        let button = &self.inner.button;
        let original_label = button.text();
        button.set_text(SENDING_LABEL);
        button.set_style("opacity", "0.7");
        button.set_disabled(true);
        self.inner.phase.set(SubmitPhase::Sending);

        Ok(Delivery {
            form: self.clone(),
            original_label,
        })
    }

    fn restore(&self, label: &str) {
        let button = &self.inner.button;
        button.set_text(label);
        button.set_style("background", RESTING_COLOR);
        button.set_style("opacity", "1");
        button.set_disabled(false);
        self.inner.phase.set(SubmitPhase::Idle);
    }
}

/// A send in progress. Completing it is the only way out of the sending
/// state.
pub struct Delivery<N, S> {
    form: ContactForm<N, S>,
    original_label: String,
}

impl<N: DomNode, S: Scheduler> Delivery<N, S> {
    pub fn complete(self, outcome: Result<(), DeliveryError>) {
        let Delivery { form, original_label } = self;
        let inner = &form.inner;

        match outcome {
            Ok(()) => {
                inner.phase.set(SubmitPhase::Success);
                inner.button.set_text(SENT_LABEL);
                inner.button.set_style("background", SENT_COLOR);
            }
            Err(error) => {
                warn!("Contact form delivery failed: {}", error);
                inner.phase.set(SubmitPhase::Error);
                inner.button.set_text(ERROR_LABEL);
                inner.button.set_style("background", ERROR_COLOR);
            }
        }

        let clear_fields = form.phase() == SubmitPhase::Success;
        let scheduler = inner.scheduler.clone();
        scheduler.run_later(config::SUBMIT_RESULT_DISPLAY_MS, move || {
            // Failed sends keep what the visitor typed so they can retry.
            if clear_fields {
                form.inner.form.reset();
            }
            form.restore(&original_label);
        });
    }
}

fn field_value(form: &HtmlElement, selector: &str) -> String {
    let Ok(Some(element)) = form.query_selector(selector) else {
        return String::new();
    };
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(textarea) = element.dyn_ref::<HtmlTextAreaElement>() {
        textarea.value()
    } else {
        String::new()
    }
}

fn read_fields(form: &HtmlElement) -> ContactFields {
    ContactFields {
        name: field_value(form, "input[name=\"user_name\"]"),
        email: field_value(form, "input[name=\"user_email\"]"),
        message: field_value(form, "textarea[name=\"message\"]"),
    }
}

pub fn init<S: Scheduler>(page: &WebPage, window: &Window, scheduler: &S) -> Result<(), JsValue> {
    let Some(form) = page.query(CONTACT_FORM_SELECTOR) else {
        debug!("No contact form on this page");
        return Ok(());
    };
    let Some(button) = form
        .query_selector(SUBMIT_BUTTON_SELECTOR)?
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
    else {
        debug!("Contact form has no submit button");
        return Ok(());
    };

    let controller = ContactForm::new(form.clone(), button, scheduler.clone());
    let client = Rc::new(EmailJs::from_config());
    let window = window.clone();
    let form_element = form.clone();

    listen(&form, "submit", move |event| {
        event.prevent_default();
        let fields = read_fields(&form_element);
        match controller.submit(&fields) {
            Ok(delivery) => {
                let client = client.clone();
                spawn_local(async move {
                    let outcome = client.send(&fields).await;
                    delivery.complete(outcome);
                });
            }
            Err(SubmitError::Invalid(error)) => {
                let _ = window.alert_with_message(&error.to_string());
            }
            Err(SubmitError::InFlight) => debug!("Ignoring submit while a message is in flight"),
        }
    })
}
