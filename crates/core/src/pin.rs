//! PIN notification request and caller-side PIN helpers.
//!
//! [`PinRequest`] is what every delivery strategy receives. It treats the PIN
//! as an opaque display string; format checks live in
//! [`validate_pin_format`] and are applied by callers that want them.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Number of digits in a generated PIN.
pub const PIN_LENGTH: usize = 4;

/// How long a delivered PIN stays valid, as quoted in message bodies.
pub const PIN_VALIDITY_MINUTES: u32 = 5;

// ---------------------------------------------------------------------------
// PinRequest
// ---------------------------------------------------------------------------

/// A single PIN notification: who receives it, the code, and the name used
/// to personalise the message.
///
/// Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PinRequestFields")]
pub struct PinRequest {
    recipient: String,
    pin: String,
    display_name: String,
}

/// Unchecked wire shape used to route deserialization through
/// [`PinRequest::new`].
#[derive(Deserialize)]
struct PinRequestFields {
    recipient: String,
    pin: String,
    display_name: String,
}

impl TryFrom<PinRequestFields> for PinRequest {
    type Error = CoreError;

    fn try_from(fields: PinRequestFields) -> Result<Self, Self::Error> {
        Self::new(fields.recipient, fields.pin, fields.display_name)
    }
}

impl PinRequest {
    /// Build a request.
    ///
    /// Only the recipient is checked (it must contain something other than
    /// whitespace). The PIN and display name are stored verbatim.
    pub fn new(
        recipient: impl Into<String>,
        pin: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Result<Self, CoreError> {
        let recipient = recipient.into();
        if recipient.trim().is_empty() {
            return Err(CoreError::Validation(
                "recipient address must not be empty".to_string(),
            ));
        }

        Ok(Self {
            recipient,
            pin: pin.into(),
            display_name: display_name.into(),
        })
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn pin(&self) -> &str {
        &self.pin
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}

// ---------------------------------------------------------------------------
// PIN helpers
// ---------------------------------------------------------------------------

/// Check that `pin` is exactly [`PIN_LENGTH`] ASCII digits.
pub fn validate_pin_format(pin: &str) -> Result<(), CoreError> {
    if pin.len() != PIN_LENGTH || !pin.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CoreError::Validation(format!(
            "PIN must be exactly {PIN_LENGTH} digits"
        )));
    }
    Ok(())
}

/// Generate a random zero-padded PIN of [`PIN_LENGTH`] digits.
pub fn generate_pin() -> String {
    let upper = 10u32.pow(PIN_LENGTH as u32);
    let value = rand::rng().random_range(0..upper);
    format!("{value:0width$}", width = PIN_LENGTH)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn new_keeps_fields_verbatim() {
        let request = PinRequest::new("a@b.com", "4821", "Ana").unwrap();
        assert_eq!(request.recipient(), "a@b.com");
        assert_eq!(request.pin(), "4821");
        assert_eq!(request.display_name(), "Ana");
    }

    #[test]
    fn new_rejects_blank_recipient() {
        assert_matches!(PinRequest::new("", "4821", "Ana"), Err(CoreError::Validation(_)));
        assert_matches!(PinRequest::new("   ", "4821", "Ana"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn new_does_not_validate_pin() {
        // The request carries whatever the caller supplied.
        let request = PinRequest::new("a@b.com", "not-a-pin", "").unwrap();
        assert_eq!(request.pin(), "not-a-pin");
    }

    #[test]
    fn deserialize_applies_recipient_check() {
        let ok: PinRequest = serde_json::from_str(
            r#"{"recipient":"lee@example.com","pin":"0099","display_name":"Lee"}"#,
        )
        .unwrap();
        assert_eq!(ok.pin(), "0099");

        let bad = serde_json::from_str::<PinRequest>(
            r#"{"recipient":"","pin":"0099","display_name":"Lee"}"#,
        );
        assert!(bad.is_err());
    }

    #[test]
    fn validate_pin_format_accepts_four_digits() {
        assert!(validate_pin_format("0000").is_ok());
        assert!(validate_pin_format("4821").is_ok());
    }

    #[test]
    fn validate_pin_format_rejects_wrong_length_or_charset() {
        assert!(validate_pin_format("123").is_err());
        assert!(validate_pin_format("12345").is_err());
        assert!(validate_pin_format("12a4").is_err());
        assert!(validate_pin_format("").is_err());
        assert!(validate_pin_format("١٢٣٤").is_err());
    }

    #[test]
    fn generated_pins_are_valid() {
        for _ in 0..100 {
            let pin = generate_pin();
            assert!(validate_pin_format(&pin).is_ok(), "bad pin {pin}");
        }
    }
}
