//! Console fallback: print the PIN notification for a developer to read.

use std::io::Write;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use passvault_core::channels::METHOD_CONSOLE;
use passvault_core::PinRequest;

use super::{DeliveryError, DeliveryStrategy};

/// Width of the `=` rules framing the block.
const RULE_WIDTH: usize = 50;

/// Writes a human-readable PIN block to standard output (or an injected
/// writer).
pub struct ConsoleStrategy {
    out: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleStrategy {
    /// Print to standard output.
    pub fn new() -> Self {
        Self::with_writer(std::io::stdout())
    }

    /// Print to `writer` instead of standard output.
    pub fn with_writer(writer: impl Write + Send + 'static) -> Self {
        Self {
            out: Mutex::new(Box::new(writer)),
        }
    }

    /// Render the block printed for `request`.
    pub fn render(request: &PinRequest) -> String {
        let rule = "=".repeat(RULE_WIDTH);
        format!(
            "\n{rule}\n\
             EMAIL SENT (CONSOLE MODE)\n\
             {rule}\n\
             To: {to}\n\
             User: {name}\n\
             PIN: {pin}\n\
             {rule}\n\n",
            to = request.recipient(),
            name = request.display_name(),
            pin = request.pin(),
        )
    }
}

impl Default for ConsoleStrategy {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DeliveryStrategy for ConsoleStrategy {
    fn name(&self) -> &str {
        METHOD_CONSOLE
    }

    async fn attempt(&self, request: &PinRequest) -> Result<(), DeliveryError> {
        let block = Self::render(request);
        {
            let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
            out.write_all(block.as_bytes())?;
            out.flush()?;
        }

        tracing::info!(to = request.recipient(), "PIN printed to console");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    /// Cloneable in-memory writer so the test can read back what was printed.
    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn render_contains_pin_and_name() {
        let request = PinRequest::new("a@b.com", "4821", "Ana").unwrap();
        let block = ConsoleStrategy::render(&request);
        assert!(block.contains("PIN: 4821"));
        assert!(block.contains("User: Ana"));
        assert!(block.contains("To: a@b.com"));
    }

    #[tokio::test]
    async fn attempt_writes_block_and_succeeds() {
        let buf = SharedBuf::default();
        let strategy = ConsoleStrategy::with_writer(buf.clone());
        let request = PinRequest::new("a@b.com", "4821", "Ana").unwrap();

        strategy.attempt(&request).await.unwrap();

        let printed = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        assert!(printed.contains("4821"));
        assert!(printed.contains("Ana"));
    }

    #[tokio::test]
    async fn stdout_strategy_succeeds() {
        let strategy = ConsoleStrategy::default();
        let request = PinRequest::new("user@example.com", "0099", "Lee").unwrap();
        assert!(strategy.attempt(&request).await.is_ok());
        assert_eq!(strategy.name(), "console");
    }
}
