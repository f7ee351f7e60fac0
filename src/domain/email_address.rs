use once_cell::sync::Lazy;
use regex::Regex;

// Rust's `\w` is Unicode-aware and `$` only matches at the very end of input.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\w.-]+@[\w.-]+\.\w+$").expect("Invalid email pattern"));

/// An email address that passed the syntactic shape check.
///
/// Only the shape is checked: one or more word characters, dots or dashes,
/// an `@`, the same again, a final `.` and a word-character suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn parse(s: String) -> Result<Self, String> {
        if !EMAIL_RE.is_match(&s) {
            return Err(format!("{s:?} does not look like an email address."));
        }
        Ok(Self(s))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        EmailAddress::parse(value)
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
