//! PassVault PIN notifier.
//!
//! Delivers a one-time PIN to a user through an ordered fallback chain of
//! delivery strategies:
//!
//! - [`delivery`] - the [`DeliveryStrategy`] trait and the built-in SMTP,
//!   console, and file strategies.
//! - [`PinNotifier`] - tries each strategy in priority order and stops at the
//!   first success.
//! - [`NotifierConfig`] - environment-driven chain configuration.
//! - [`AuditLog`] - optional append-only record of successful deliveries.

pub mod audit;
pub mod chain;
pub mod config;
pub mod delivery;
pub mod message;
pub mod record;

pub use audit::AuditLog;
pub use chain::{AttemptFailure, Delivery, Exhausted, PinNotifier};
pub use config::{ConfigError, MethodConfig, NotifierConfig};
pub use delivery::console::ConsoleStrategy;
pub use delivery::file::FileLogStrategy;
pub use delivery::smtp::{BodyFormat, SmtpConfig, SmtpStrategy};
pub use delivery::{DeliveryError, DeliveryStrategy};
