//! Form models and their local validation.
//!
//! Validation is synchronous and runs before anything is sent. A failure is
//! a [`StorefrontError::Validation`](crate::StorefrontError::Validation)
//! carrying the inline message the page shows.

mod booking;
mod contact;

pub use booking::{BookingForm, BookingMode};
pub use contact::{ContactForm, CONTACT_SEND_FAILED, CONTACT_SERVER_FALLBACK};
