use crate::error::{Result, StorefrontError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Shown when the backend rejects a message without explaining why.
pub const CONTACT_SERVER_FALLBACK: &str = "Something went wrong";
/// Shown when the message could not be sent at all.
pub const CONTACT_SEND_FAILED: &str = "Failed to send message. Please try again.";

const MIN_NAME_LEN: usize = 2;
const MIN_MESSAGE_LEN: usize = 10;

/// Loose email shape: something, `@`, something, `.`, something.
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").unwrap());

/// Body of `POST /contact`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
    pub message: String,
}

impl ContactForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone_number: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone_number: phone_number.into(),
            message: message.into(),
        }
    }

    /// Check fields in page order and report the first problem.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().chars().count() < MIN_NAME_LEN {
            return Err(StorefrontError::validation("name", "Please enter your full name."));
        }
        if !EMAIL_PATTERN.is_match(&self.email) {
            return Err(StorefrontError::validation(
                "email",
                "Please enter a valid email address.",
            ));
        }
        if self.message.trim().chars().count() < MIN_MESSAGE_LEN {
            return Err(StorefrontError::validation(
                "message",
                "Message should be at least 10 characters long.",
            ));
        }
        Ok(())
    }

    /// Empty every field, as after a successful send.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
