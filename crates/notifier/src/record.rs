//! Append-only text log records.
//!
//! Shared by [`FileLogStrategy`](crate::FileLogStrategy) and
//! [`AuditLog`](crate::AuditLog). Each record is rendered up front and written
//! with a single `write_all` on a file opened in append mode, then the file is
//! closed again. No locking beyond the OS append guarantee.

use std::path::Path;

use chrono::{DateTime, Utc};
use tokio::io::AsyncWriteExt;

use passvault_core::PinRequest;

/// Width of the closing rule under each record.
const RULE_WIDTH: usize = 30;

/// Render one delivery record.
///
/// `extra` lines are appended after the standard fields as `key: value`.
/// Control characters in any value are escaped, so a field can never start
/// a line of its own.
pub fn render(request: &PinRequest, timestamp: DateTime<Utc>, extra: &[(&str, &str)]) -> String {
    let mut record = format!(
        "\n--- PIN EMAIL {recipient} ---\n\
         recipient: {recipient}\n\
         display_name: {name}\n\
         pin: {pin}\n\
         timestamp: {ts}\n",
        recipient = field(request.recipient()),
        name = field(request.display_name()),
        pin = field(request.pin()),
        ts = timestamp.to_rfc3339(),
    );
    for (key, value) in extra {
        record.push_str(&format!("{key}: {}\n", field(value)));
    }
    record.push_str(&"-".repeat(RULE_WIDTH));
    record.push('\n');
    record
}

/// Escape control characters (`\n` becomes `\\n`) so a value stays on one line.
fn field(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if c.is_control() {
            out.extend(c.escape_default());
        } else {
            out.push(c);
        }
    }
    out
}

/// Append `record` to the file at `path`, creating it if needed.
pub async fn append(path: &Path, record: &str) -> std::io::Result<()> {
    let mut file = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await?;
    file.write_all(record.as_bytes()).await?;
    file.flush().await?;
    Ok(())
}
