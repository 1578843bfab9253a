//! PIN delivery via an SMTP provider.
//!
//! [`SmtpStrategy`] wraps the `lettre` async SMTP transport. Each attempt
//! builds its own STARTTLS transport from the [`SmtpConfig`], sends one
//! message, and drops the connection; nothing is shared between attempts or
//! between providers.

use std::fmt;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::MultiPart;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use passvault_core::PinRequest;

use super::{DeliveryError, DeliveryStrategy};
use crate::message;

// ---------------------------------------------------------------------------
// SmtpConfig
// ---------------------------------------------------------------------------

/// Default SMTP port (STARTTLS submission).
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// Which body the provider sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyFormat {
    /// `multipart/alternative` with a plain-text and an HTML part.
    Html,
    /// A single `text/plain` part.
    Plain,
}

impl BodyFormat {
    /// Parse `html` / `plain` (case-insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "html" => Some(Self::Html),
            "plain" | "text" => Some(Self::Plain),
            _ => None,
        }
    }
}

/// Connection and sender settings for one SMTP provider.
#[derive(Clone)]
pub struct SmtpConfig {
    /// Strategy name, e.g. `outlook`.
    pub name: String,
    /// SMTP server hostname.
    pub host: String,
    /// SMTP server port (defaults to 587).
    pub port: u16,
    /// RFC 5322 "From" address.
    pub from_address: String,
    /// SMTP username.
    pub username: String,
    /// SMTP password.
    pub password: String,
    /// Body format sent by this provider.
    pub format: BodyFormat,
}

impl fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("name", &self.name)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("from_address", &self.from_address)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("format", &self.format)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// SmtpStrategy
// ---------------------------------------------------------------------------

/// Sends the PIN email through one SMTP provider.
pub struct SmtpStrategy {
    config: SmtpConfig,
}

impl SmtpStrategy {
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SmtpConfig {
        &self.config
    }

    /// Assemble the MIME message for `request`.
    pub fn build_message(&self, request: &PinRequest) -> Result<Message, DeliveryError> {
        let builder = Message::builder()
            .from(self.config.from_address.parse()?)
            .to(request.recipient().parse()?)
            .subject(message::SUBJECT);

        let built = match self.config.format {
            BodyFormat::Html => builder.multipart(MultiPart::alternative_plain_html(
                message::plain_body(request),
                message::html_body(request),
            )),
            BodyFormat::Plain => builder
                .header(ContentType::TEXT_PLAIN)
                .body(message::plain_body(request)),
        };

        built.map_err(|e| DeliveryError::Build(e.to_string()))
    }
}

#[async_trait]
impl DeliveryStrategy for SmtpStrategy {
    fn name(&self) -> &str {
        &self.config.name
    }

    async fn attempt(&self, request: &PinRequest) -> Result<(), DeliveryError> {
        let email = self.build_message(request)?;

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.host)?
            .port(self.config.port)
            .credentials(Credentials::new(
                self.config.username.clone(),
                self.config.password.clone(),
            ))
            .build();

        mailer.send(email).await?;

        tracing::info!(
            to = request.recipient(),
            provider = %self.config.name,
            host = %self.config.host,
            "PIN email sent"
        );
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
