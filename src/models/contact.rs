//! Contact form fields, constraint results and submission status.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Message];

    pub fn error_message(self) -> &'static str {
        match self {
            Field::Name => "Please enter your name.",
            Field::Email => "Please enter a valid email address.",
            Field::Message => "Please enter a message.",
        }
    }

    /// Error shown while typing. Only the email field reports a type mismatch.
    pub fn live_error(self, validity: Validity) -> Option<&'static str> {
        let invalid = match self {
            Field::Email => validity.value_missing || validity.type_mismatch,
            Field::Name | Field::Message => validity.value_missing,
        };
        invalid.then(|| self.error_message())
    }
}

/// Constraint state reported by the host for a single field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Validity {
    pub value_missing: bool,
    pub type_mismatch: bool,
    /// Any other constraint fails (pattern, length, range, step)
    pub rule_violated: bool,
}

impl Validity {
    pub fn valid() -> Self {
        Self::default()
    }

    pub fn missing() -> Self {
        Self { value_missing: true, ..Self::default() }
    }

    pub fn mismatched() -> Self {
        Self { type_mismatch: true, ..Self::default() }
    }

    pub fn violated() -> Self {
        Self { rule_violated: true, ..Self::default() }
    }

    /// Every constraint holds; this is what gates submission
    pub fn is_valid(&self) -> bool {
        !self.value_missing && !self.type_mismatch && !self.rule_violated
    }
}

/// Visible submission status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormStatus {
    Sending,
    Sent,
    /// The endpoint answered with a non-success status
    Rejected,
    NetworkError,
}

impl FormStatus {
    pub fn text(self) -> &'static str {
        match self {
            FormStatus::Sending => "Sending...",
            FormStatus::Sent => "✅ Message sent! I’ll reply shortly.",
            FormStatus::Rejected => "❌ Something went wrong. Try again later.",
            FormStatus::NetworkError => "⚠️ Network error. Please try again.",
        }
    }

    /// Status element class; empty while sending
    pub fn class_name(self) -> &'static str {
        match self {
            FormStatus::Sending => "",
            FormStatus::Sent => "status-success",
            FormStatus::Rejected | FormStatus::NetworkError => "status-error",
        }
    }
}
