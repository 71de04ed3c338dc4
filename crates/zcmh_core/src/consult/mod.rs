//! WhatsApp consultation link-out.
//!
//! # Responsibility
//! - Compose `https://wa.me/<phone>?text=<message>` links.
//! - Dispatch them to the messaging app with a generic-handler fallback.
//!
//! # Invariants
//! - Phone numbers are digits only after normalization.
//! - Message text is percent-encoded; spaces become `%20`.
//! - Dispatch failures never propagate.

use crate::platform::LinkDispatcher;
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

const WHATSAPP_BASE_URL: &str = "https://wa.me";

/// Consultation flavor offered on the consultation screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsultationTopic {
    Psychologist,
    Hypnotherapist,
    General,
}

impl ConsultationTopic {
    /// Pre-filled greeting sent with the link.
    pub fn default_message(self) -> &'static str {
        match self {
            Self::Psychologist => {
                "Halo, saya ingin berkonsultasi dengan Psikolog melalui ZCMH App 🧠"
            }
            Self::Hypnotherapist => {
                "Halo, saya ingin berkonsultasi dengan Hypnotherapist melalui ZCMH App 🌙"
            }
            Self::General => {
                "Halo, saya ingin berkonsultasi mengenai kesehatan mental dari aplikasi ZCMH"
            }
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "psychologist" => Some(Self::Psychologist),
            "hypnotherapist" => Some(Self::Hypnotherapist),
            "general" => Some(Self::General),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkError {
    InvalidPhone(String),
}

impl Display for LinkError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPhone(value) => write!(f, "invalid phone number: `{value}`"),
        }
    }
}

impl Error for LinkError {}

/// How a consultation link was delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
    OpenedInApp,
    OpenedViaFallback,
    Failed,
}

/// Strips spaces, dashes, parentheses and a leading `+`; rejects anything
/// that is not a digit afterwards.
pub fn normalize_phone(phone: &str) -> Result<String, LinkError> {
    let trimmed = phone.trim();
    let without_plus = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits = without_plus
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect::<String>();

    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(LinkError::InvalidPhone(phone.to_string()));
    }
    Ok(digits)
}

/// Builds the WhatsApp click-to-chat URL.
pub fn whatsapp_url(phone: &str, message: &str) -> Result<String, LinkError> {
    let phone = normalize_phone(phone)?;
    Ok(format!(
        "{WHATSAPP_BASE_URL}/{phone}?text={}",
        urlencoding::encode(message)
    ))
}

/// Opens a consultation chat, falling back to generic URL dispatch when the
/// messaging app is absent.
pub fn open_consultation(
    dispatcher: &dyn LinkDispatcher,
    phone: &str,
    message: &str,
) -> Result<LinkOutcome, LinkError> {
    let url = whatsapp_url(phone, message)?;

    if let Err(err) = dispatcher.open_in_app(&url) {
        warn!("event=consult_open module=consult status=fallback error={err}");
        return Ok(match dispatcher.open_generic(&url) {
            Ok(()) => {
                info!("event=consult_open module=consult status=ok via=generic");
                LinkOutcome::OpenedViaFallback
            }
            Err(err) => {
                error!("event=consult_open module=consult status=error error={err}");
                LinkOutcome::Failed
            }
        });
    }

    info!("event=consult_open module=consult status=ok via=app");
    Ok(LinkOutcome::OpenedInApp)
}
