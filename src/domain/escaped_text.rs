use std::fmt;

/// Free text with HTML metacharacters replaced by entities.
///
/// Stored and notified content passes through here so a submission cannot
/// inject markup into the admin page or the notification email.
#[derive(Debug, PartialEq, Clone)]
pub struct EscapedText(String);

impl From<&str> for EscapedText {
    fn from(value: &str) -> Self {
        let mut escaped = String::with_capacity(value.len());
        for c in value.chars() {
            match c {
                '&' => escaped.push_str("&amp;"),
                '<' => escaped.push_str("&lt;"),
                '>' => escaped.push_str("&gt;"),
                '"' => escaped.push_str("&quot;"),
                '\'' => escaped.push_str("&#039;"),
                _ => escaped.push(c),
            }
        }
        Self(escaped)
    }
}

impl AsRef<str> for EscapedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<EscapedText> for String {
    fn from(text: EscapedText) -> Self {
        text.0
    }
}

impl fmt::Display for EscapedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
