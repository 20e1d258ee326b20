//! Contact form validation and submission
//!
//! Submission has one suspension point, the network call, so it is split in
//! two steps: [`ContactForm::begin_submit`] validates and shows "Sending...",
//! the caller performs the request, and [`ContactForm::finish_submit`] turns the
//! outcome into a visible status. A failed request is never retried.

use thiserror::Error;

use crate::errors::SubmitError;
use crate::models::{Field, FormStatus, Validity};

/// The form as the host renders it
pub trait ContactFormView {
    fn validity(&self, field: Field) -> Validity;
    fn set_error(&self, field: Field, message: &str);
    fn set_status(&self, status: FormStatus);
    /// Clear every field
    fn reset(&self);
}

/// Submission stopped before any network call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} invalid field(s): {:?}", .0.len(), .0)]
pub struct SubmitBlocked(pub Vec<Field>);

pub struct ContactForm<V: ContactFormView> {
    view: V,
}

impl<V: ContactFormView> ContactForm<V> {
    pub fn new(view: V) -> Self {
        Self { view }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Live validation while typing
    pub fn on_input(&self, field: Field) {
        let message = field.live_error(self.view.validity(field)).unwrap_or("");
        self.view.set_error(field, message);
    }

    /// Check every field, showing all errors. On success the status switches to "Sending...".
    pub fn begin_submit(&self) -> Result<(), SubmitBlocked> {
        let invalid: Vec<Field> = Field::ALL
            .into_iter()
            .filter(|&field| {
                let valid = self.view.validity(field).is_valid();
                if !valid {
                    self.view.set_error(field, field.error_message());
                }
                !valid
            })
            .collect();

        if !invalid.is_empty() {
            log::debug!("contact form blocked: {:?}", invalid);
            return Err(SubmitBlocked(invalid));
        }
        self.view.set_status(FormStatus::Sending);
        Ok(())
    }

    /// Report the network outcome: an HTTP status, or a transport failure
    pub fn finish_submit(&self, outcome: Result<u16, SubmitError>) -> FormStatus {
        let status = match outcome {
            Ok(code) if (200..300).contains(&code) => FormStatus::Sent,
            Ok(code) => {
                log::warn!("contact endpoint answered {}", code);
                FormStatus::Rejected
            }
            Err(err) => {
                log::warn!("contact submission failed: {}", err);
                FormStatus::NetworkError
            }
        };
        self.view.set_status(status);
        if status == FormStatus::Sent {
            self.view.reset();
        }
        status
    }
}
