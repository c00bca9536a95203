mod email_address;
mod escaped_text;

pub use email_address::EmailAddress;
pub use escaped_text::EscapedText;

/// Why a contact submission was rejected
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid email address")]
    InvalidEmail,
}
