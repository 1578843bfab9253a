//! Delivery strategies for PIN notifications.
//!
//! A strategy is one concrete way of getting the PIN to the user. The
//! [`PinNotifier`](crate::PinNotifier) tries them in priority order; each one
//! composes its own message and owns its own transport.

pub mod console;
pub mod file;
pub mod smtp;

use async_trait::async_trait;

use passvault_core::PinRequest;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Why a single strategy attempt failed.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    /// SMTP transport-level failure (DNS, connect, TLS, authentication).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),

    /// Writing the delivery record failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The strategy panicked; the chain caught it.
    #[error("Strategy panicked: {0}")]
    Panicked(String),
}

// ---------------------------------------------------------------------------
// DeliveryStrategy
// ---------------------------------------------------------------------------

/// One mechanism for conveying a PIN to its recipient.
#[async_trait]
pub trait DeliveryStrategy: Send + Sync {
    /// Name used in logs and delivery results.
    fn name(&self) -> &str;

    /// Run a single attempt. `Ok(())` means the PIN was delivered.
    async fn attempt(&self, request: &PinRequest) -> Result<(), DeliveryError>;
}
