//! `demo` subcommand: a simulated send-pin walkthrough for front-end work.
//!
//! Nothing leaves the machine. The demo runs the same request checks the
//! real path uses, shows the email a provider would send, appends a record to
//! a local demo log, and prints the JSON the HTTP layer would answer with.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;

use passvault_core::pin::{validate_pin_format, PIN_LENGTH, PIN_VALIDITY_MINUTES};
use passvault_core::PinRequest;
use passvault_notifier::{message, record};

use crate::cli::DemoArgs;

/// Default demo log path.
pub const DEMO_LOG_FILE: &str = "pins_demo.log";

/// Endpoint the front end posts to.
const SEND_PIN_URL: &str = "http://localhost:3001/send-pin";

const RULE_WIDTH: usize = 50;

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

/// Body the front end sends.
#[derive(Debug, Serialize)]
pub struct SendPinBody<'a> {
    pub email: &'a str,
    pub pin: &'a str,
    pub name: &'a str,
}

/// Simulated front-end HTTP request.
#[derive(Debug, Serialize)]
pub struct FrontendRequest<'a> {
    pub method: &'static str,
    pub url: &'static str,
    pub data: SendPinBody<'a>,
}

/// Response the send-pin endpoint would return.
#[derive(Debug, Serialize)]
pub struct ApiResponse {
    pub success: bool,
    pub message: String,
    pub timestamp: String,
    pub method: &'static str,
    pub note: &'static str,
}

impl ApiResponse {
    pub fn simulated(success: bool, timestamp: DateTime<Utc>) -> Self {
        Self {
            success,
            message: if success {
                "PIN sent successfully".to_string()
            } else {
                "PIN request rejected".to_string()
            },
            timestamp: timestamp.to_rfc3339(),
            method: "console_simulation",
            note: "In production the PIN is delivered through the configured fallback chain",
        }
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// The email a provider would deliver, as shown on screen.
pub fn email_preview(request: &PinRequest) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    format!(
        "EMAIL CONTENT THAT WOULD BE SENT:\n\
         {rule}\n\
         To: {to}\n\
         Subject: {subject}\n\
         \n\
         {body}\
         {rule}\n",
        to = request.recipient(),
        subject = message::SUBJECT,
        body = message::plain_body(request),
    )
}

/// Run the request checks and describe each one.
///
/// Returns the checklist lines and whether every check passed.
pub fn validation_report(args: &DemoArgs) -> (Vec<String>, bool) {
    let recipient_ok = PinRequest::new(&args.email, &args.pin, &args.name).is_ok();
    let pin_ok = validate_pin_format(&args.pin).is_ok();
    let name_ok = !args.name.trim().is_empty();

    let line = |ok: bool, what: &str| format!("[{}] {what}", if ok { "OK" } else { "FAILED" });
    let lines = vec![
        line(recipient_ok, "recipient address present"),
        line(pin_ok, &format!("PIN is {PIN_LENGTH} digits")),
        line(name_ok, "display name present"),
    ];
    (lines, recipient_ok && pin_ok && name_ok)
}

// ---------------------------------------------------------------------------
// Run
// ---------------------------------------------------------------------------

/// Print the walkthrough to `out`.
///
/// Demo log failures are reported in the output and never abort the run.
pub async fn run<W: Write>(args: &DemoArgs, out: &mut W) -> anyhow::Result<()> {
    let rule = "=".repeat(RULE_WIDTH);

    writeln!(out, "PASSVAULT PIN DELIVERY DEMO")?;
    writeln!(out, "{rule}")?;

    let frontend = FrontendRequest {
        method: "POST",
        url: SEND_PIN_URL,
        data: SendPinBody {
            email: &args.email,
            pin: &args.pin,
            name: &args.name,
        },
    };
    writeln!(out, "Request from the front end:")?;
    writeln!(out, "{}", serde_json::to_string_pretty(&frontend)?)?;
    writeln!(out)?;

    writeln!(out, "Validating request:")?;
    let (checks, valid) = validation_report(args);
    for check in &checks {
        writeln!(out, "  {check}")?;
    }
    writeln!(out)?;

    let now = Utc::now();
    if valid {
        let request = PinRequest::new(&args.email, &args.pin, &args.name)?;
        write!(out, "{}", email_preview(&request))?;
        writeln!(out)?;

        let entry = record::render(&request, now, &[("method", "demo")]);
        match record::append(&args.log_file, &entry).await {
            Ok(()) => writeln!(out, "PIN record saved to {}", args.log_file.display())?,
            Err(e) => writeln!(
                out,
                "Could not save PIN record to {}: {e}",
                args.log_file.display()
            )?,
        }
        writeln!(out)?;
    }

    let response = ApiResponse::simulated(valid, now);
    writeln!(out, "API response:")?;
    writeln!(out, "{}", serde_json::to_string_pretty(&response)?)?;
    writeln!(out)?;

    writeln!(out, "Front end receives:")?;
    writeln!(out, "  success: {}", response.success)?;
    writeln!(out, "  message: {}", response.message)?;
    if valid {
        writeln!(
            out,
            "  next step: prompt for the PIN (valid for {PIN_VALIDITY_MINUTES} minutes)"
        )?;
    }
    writeln!(out, "{rule}")?;

    tracing::debug!(valid, log_file = %args.log_file.display(), "Demo finished");
    Ok(())
}
