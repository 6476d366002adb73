//! Contact form model
//!
//! The generated contact page posts straight to a third-party form endpoint.
//! This module holds what the site itself owns: the submitted fields, their
//! validation, the urlencoded payload and the submission status shown to the
//! visitor.

use lazy_static::lazy_static;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref EMAIL: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

/// Characters left as-is in `application/x-www-form-urlencoded` values
const FORM_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'*')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_');

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContactError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("invalid email address: {0}")]
    InvalidEmail(String),
    #[error("unknown subject: {0}")]
    UnknownSubject(String),
}

/// A visitor's message
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    /// Check required fields and the email shape.
    ///
    /// `subjects` lists the accepted subject values; an empty list accepts any.
    pub fn validate(&self, subjects: &[&str]) -> Result<(), ContactError> {
        for (field, value) in [
            ("name", &self.name),
            ("email", &self.email),
            ("subject", &self.subject),
            ("message", &self.message),
        ] {
            if value.trim().is_empty() {
                return Err(ContactError::MissingField(field));
            }
        }

        if !EMAIL.is_match(self.email.trim()) {
            return Err(ContactError::InvalidEmail(self.email.clone()));
        }

        if !subjects.is_empty() && !subjects.contains(&self.subject.as_str()) {
            return Err(ContactError::UnknownSubject(self.subject.clone()));
        }

        Ok(())
    }

    /// Submitted field pairs, with `_replyto` so replies reach the sender
    pub fn form_fields(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("name", self.name.as_str()),
            ("email", self.email.as_str()),
            ("subject", self.subject.as_str()),
            ("message", self.message.as_str()),
            ("_replyto", self.email.as_str()),
        ]
    }

    /// `application/x-www-form-urlencoded` body
    pub fn encode(&self) -> String {
        self.form_fields()
            .into_iter()
            .map(|(key, value)| format!("{}={}", key, encode_form_value(value)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Empty every field, as after a successful send
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn encode_form_value(value: &str) -> String {
    utf8_percent_encode(value, FORM_VALUE)
        .to_string()
        .replace("%20", "+")
}

/// What the visitor sees about their submission
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

impl SubmissionStatus {
    /// Start sending; ignored while a send is in flight
    pub fn submit(self) -> Self {
        match self {
            SubmissionStatus::Loading => self,
            _ => SubmissionStatus::Loading,
        }
    }

    pub fn succeed(self) -> Self {
        match self {
            SubmissionStatus::Loading => SubmissionStatus::Success,
            other => other,
        }
    }

    pub fn fail(self) -> Self {
        match self {
            SubmissionStatus::Loading => SubmissionStatus::Error,
            other => other,
        }
    }

    /// Clear a finished status, driven by the caller's reset timer
    pub fn reset(self) -> Self {
        match self {
            SubmissionStatus::Success | SubmissionStatus::Error => SubmissionStatus::Idle,
            other => other,
        }
    }

    /// Whether the submit button is disabled
    pub fn is_busy(self) -> bool {
        self == SubmissionStatus::Loading
    }
}
