//! `send` subcommand: real delivery through the configured chain.

use anyhow::Context;

use passvault_core::pin::{generate_pin, validate_pin_format};
use passvault_core::PinRequest;
use passvault_notifier::{NotifierConfig, PinNotifier};

use crate::cli::SendArgs;

/// Resolve the PIN to send: validate a supplied one or generate a new one.
pub fn resolve_pin(supplied: Option<String>) -> anyhow::Result<String> {
    match supplied {
        Some(pin) => {
            validate_pin_format(&pin)?;
            Ok(pin)
        }
        None => Ok(generate_pin()),
    }
}

/// Deliver one PIN. Returns `true` when a strategy succeeded.
pub async fn run(args: SendArgs) -> anyhow::Result<bool> {
    let pin = resolve_pin(args.pin)?;
    let request = PinRequest::new(args.email, pin, args.name)?;

    let config = NotifierConfig::from_env().context("invalid PIN delivery configuration")?;
    tracing::info!(methods = ?config.method_names(), "Loaded PIN delivery configuration");

    let notifier = PinNotifier::from_config(&config);

    match notifier.deliver(&request).await {
        Ok(delivery) => {
            println!(
                "PIN delivered to {} via {} (delivery {})",
                request.recipient(),
                delivery.strategy,
                delivery.id
            );
            Ok(true)
        }
        Err(exhausted) => {
            eprintln!("PIN delivery failed: {exhausted}");
            for failure in &exhausted.failures {
                eprintln!("  {}: {}", failure.strategy, failure.reason);
            }
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_pin_keeps_valid_pin() {
        assert_eq!(resolve_pin(Some("0420".to_string())).unwrap(), "0420");
    }

    #[test]
    fn resolve_pin_rejects_malformed_pin() {
        assert!(resolve_pin(Some("12".to_string())).is_err());
    }

    #[test]
    fn resolve_pin_generates_when_missing() {
        let pin = resolve_pin(None).unwrap();
        assert!(validate_pin_format(&pin).is_ok());
    }
}
