//! PIN email composition.
//!
//! Every strategy composes its own body from the same request; these helpers
//! keep the wording consistent between the HTML, plain-text, and console
//! renderings.

use passvault_core::pin::PIN_VALIDITY_MINUTES;
use passvault_core::PinRequest;

/// Subject line used by the SMTP strategies.
pub const SUBJECT: &str = "PassVault - Your access PIN";

/// Plain-text body.
pub fn plain_body(request: &PinRequest) -> String {
    format!(
        "Hello {name},\n\
         \n\
         Your PassVault PIN is: {pin}\n\
         \n\
         This PIN is valid for {PIN_VALIDITY_MINUTES} minutes.\n\
         If you did not request this code, ignore this message.\n\
         \n\
         Regards,\n\
         PassVault Team\n",
        name = request.display_name(),
        pin = request.pin(),
    )
}

/// HTML body. The display name and PIN are escaped.
pub fn html_body(request: &PinRequest) -> String {
    format!(
        r#"<html>
  <body style="font-family: Arial, sans-serif;">
    <div style="max-width: 600px; margin: 0 auto; padding: 20px;">
      <h2 style="color: #333;">PassVault PIN</h2>
      <p>Hello <strong>{name}</strong>,</p>
      <p>Your access PIN is:</p>
      <div style="background: #f0f0f0; padding: 20px; text-align: center; font-size: 24px; font-weight: bold; color: #333; border-radius: 5px;">
        {pin}
      </div>
      <p style="color: #666; font-size: 12px;">This PIN is valid for {PIN_VALIDITY_MINUTES} minutes.</p>
    </div>
  </body>
</html>
"#,
        name = escape_html(request.display_name()),
        pin = escape_html(request.pin()),
    )
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str) -> PinRequest {
        PinRequest::new("a@b.com", "4821", name).unwrap()
    }

    #[test]
    fn plain_body_embeds_pin_and_name() {
        let body = plain_body(&request("Ana"));
        assert!(body.contains("Hello Ana,"));
        assert!(body.contains("4821"));
        assert!(body.contains("valid for 5 minutes"));
    }

    #[test]
    fn html_body_embeds_pin_and_name() {
        let body = html_body(&request("Ana"));
        assert!(body.contains("<strong>Ana</strong>"));
        assert!(body.contains("4821"));
    }

    #[test]
    fn html_body_escapes_display_name() {
        let body = html_body(&request("<script>\"x\" & y</script>"));
        assert!(!body.contains("<script>"));
        assert!(body.contains("&lt;script&gt;&quot;x&quot; &amp; y&lt;/script&gt;"));
    }
}
