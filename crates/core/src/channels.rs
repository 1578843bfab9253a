//! Well-known delivery strategy names.
//!
//! These are the tokens accepted in the `PIN_DELIVERY_METHODS` list and the
//! names reported back in delivery results and log fields.

/// Outlook / Hotmail SMTP provider.
pub const METHOD_OUTLOOK: &str = "outlook";

/// Yahoo Mail SMTP provider.
pub const METHOD_YAHOO: &str = "yahoo";

/// Human-readable block printed to standard output.
pub const METHOD_CONSOLE: &str = "console";

/// Record appended to the local delivery log file.
pub const METHOD_FILE: &str = "file";

/// Default fallback order when `PIN_DELIVERY_METHODS` is not set.
pub const DEFAULT_METHOD_ORDER: [&str; 4] =
    [METHOD_OUTLOOK, METHOD_YAHOO, METHOD_CONSOLE, METHOD_FILE];
