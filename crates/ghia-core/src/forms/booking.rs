use crate::config::BookingConfig;
use crate::error::{Result, StorefrontError};
use serde::{Deserialize, Serialize};

/// How a trainer takes bookings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingMode {
    /// Bookable through the online form.
    Online,
    /// Contact over WhatsApp to arrange an in-person session.
    InPerson,
}

impl BookingMode {
    /// Read the `online` query parameter; only the exact value `true` is online.
    pub fn from_query_param(value: Option<&str>) -> Self {
        if value == Some("true") {
            BookingMode::Online
        } else {
            BookingMode::InPerson
        }
    }
}

/// A session booking request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingForm {
    /// Trainer name, empty when booking with the team in general.
    #[serde(default)]
    pub trainer: String,
    pub name: String,
    pub email: String,
    pub date: String,
    pub time: String,
    #[serde(default)]
    pub note: String,
}

impl BookingForm {
    pub fn for_trainer(trainer: impl Into<String>) -> Self {
        Self {
            trainer: trainer.into(),
            ..Self::default()
        }
    }

    /// An online booking needs name, email, date and time.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("name", &self.name),
            ("email", &self.email),
            ("date", &self.date),
            ("time", &self.time),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                let message = format!("Please provide a {}.", field);
                return Err(StorefrontError::validation(field, message));
            }
        }
        Ok(())
    }

    /// Heading of the booking page.
    pub fn title(&self) -> String {
        if self.trainer.is_empty() {
            "Book a Session".to_string()
        } else {
            format!("Book a Session with {}", self.trainer)
        }
    }

    /// Prefilled WhatsApp message for in-person bookings.
    pub fn whatsapp_message(&self) -> String {
        let who = if self.trainer.is_empty() {
            "your team"
        } else {
            self.trainer.as_str()
        };
        format!(
            "Hi, I'd like to book a session with {}. Are there available slots?",
            who
        )
    }

    /// `https://wa.me/{phone}?text={message}` deep link.
    pub fn whatsapp_url(&self, phone: Option<&str>) -> String {
        let phone = phone.unwrap_or(BookingConfig::DEFAULT_WHATSAPP_PHONE);
        format!(
            "{}/{}?text={}",
            BookingConfig::WHATSAPP_BASE_URL,
            phone,
            urlencoding::encode(&self.whatsapp_message())
        )
    }

    /// Link a trainer profile uses to open the online booking form.
    pub fn booking_path(trainer: &str, mode: BookingMode) -> String {
        format!(
            "/book?trainer={}&online={}",
            urlencoding::encode(trainer),
            mode == BookingMode::Online
        )
    }
}
