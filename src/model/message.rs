use chrono::Utc;

use serde::{Deserialize, Serialize};

use crate::domain::{EmailAddress, EscapedText, ValidationError};

/// Subject used when the sender leaves the field blank
pub const DEFAULT_SUBJECT: &str = "No Subject";

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Raw contact-form payload, exactly as submitted by the browser.
///
/// Every field is optional at this stage; presence is a validation concern,
/// not a deserialization concern, so missing fields produce our own error
/// envelope instead of a serde rejection.
#[derive(Debug, Deserialize)]
pub struct ContactForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
    pub date: Option<String>,
}

/// A validated, sanitized submission that has not been persisted yet.
/// The store assigns the id on append.
#[derive(Debug)]
pub struct NewMessage {
    pub name: EscapedText,
    pub email: EmailAddress,
    pub subject: EscapedText,
    pub message: EscapedText,
    pub date: Option<String>,
}

impl TryFrom<ContactForm> for NewMessage {
    type Error = ValidationError;

    fn try_from(form: ContactForm) -> Result<Self, Self::Error> {
        let name = required("name", form.name)?;
        let message = required("message", form.message)?;

        // Presence first, grammar second: a blank email is a missing field,
        // not a malformed one.
        let email: EmailAddress = required("email", form.email)?.parse()?;

        let subject = form
            .subject
            .filter(|subject| !subject.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SUBJECT.into());

        Ok(Self {
            name: EscapedText::from(name.as_str()),
            email,
            subject: EscapedText::from(subject.trim()),
            message: EscapedText::from(message.as_str()),
            date: form.date.filter(|date| !date.trim().is_empty()),
        })
    }
}

fn required(field: &'static str, value: Option<String>) -> Result<String, ValidationError> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(ValidationError::MissingField(field)),
    }
}

/// Stored message record.
///
/// Immutable once appended; removed only by an explicit delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Store-assigned id, the only lookup/delete key
    pub id: String,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub date: String,
    /// Unused by this backend, kept for the admin page
    pub read: bool,
}

impl Message {
    /// Assemble the stored record from a validated submission and a
    /// store-assigned id. Falls back to the current server time when the
    /// caller supplied no date.
    pub fn assemble(id: String, new_message: NewMessage) -> Self {
        Self {
            id,
            name: new_message.name.into(),
            email: new_message.email.into(),
            subject: new_message.subject.into(),
            message: new_message.message.into(),
            date: new_message
                .date
                .unwrap_or_else(|| Utc::now().format(DATE_FORMAT).to_string()),
            read: false,
        }
    }
}
