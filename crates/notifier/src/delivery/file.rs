//! File fallback: append the PIN notification to a local text log.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;

use passvault_core::channels::METHOD_FILE;
use passvault_core::PinRequest;

use super::{DeliveryError, DeliveryStrategy};
use crate::record;

/// Default log path, relative to the working directory.
pub const DEFAULT_LOG_FILE: &str = "pin_deliveries.log";

/// Appends one record per attempt to a UTF-8 text file.
#[derive(Debug, Clone)]
pub struct FileLogStrategy {
    path: PathBuf,
}

impl FileLogStrategy {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileLogStrategy {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_FILE)
    }
}

#[async_trait]
impl DeliveryStrategy for FileLogStrategy {
    fn name(&self) -> &str {
        METHOD_FILE
    }

    async fn attempt(&self, request: &PinRequest) -> Result<(), DeliveryError> {
        let entry = record::render(request, Utc::now(), &[]);
        record::append(&self.path, &entry).await?;

        tracing::info!(
            to = request.recipient(),
            path = %self.path.display(),
            "PIN written to delivery log"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[tokio::test]
    async fn appends_record_without_truncating() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pins.log");
        std::fs::write(&path, "previous content\n").unwrap();

        let strategy = FileLogStrategy::new(&path);
        let request = PinRequest::new("a@b.com", "4821", "Ana").unwrap();
        strategy.attempt(&request).await.unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("previous content\n"));
        assert!(contents.contains("4821"));
        assert!(contents.contains("a@b.com"));
        assert!(contents.contains("display_name: Ana"));
    }

    #[tokio::test]
    async fn one_record_per_attempt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pins.log");
        let strategy = FileLogStrategy::new(&path);

        for pin in ["1111", "2222"] {
            let request = PinRequest::new("a@b.com", pin, "Ana").unwrap();
            strategy.attempt(&request).await.unwrap();
        }

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.matches("--- PIN EMAIL a@b.com ---").count(), 2);
        assert!(contents.find("1111").unwrap() < contents.find("2222").unwrap());
    }

    #[tokio::test]
    async fn multi_line_name_stays_one_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pins.log");
        let strategy = FileLogStrategy::new(&path);

        let name = "Ana\n------------------------------\n\n--- PIN EMAIL evil@x.com ---\npin: 0000";
        let request = PinRequest::new("a@b.com", "4821", name).unwrap();
        strategy.attempt(&request).await.unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.matches("--- PIN EMAIL").count(), 1);
        let pins: Vec<&str> = contents.lines().filter(|l| l.starts_with("pin:")).collect();
        assert_eq!(pins, ["pin: 4821"]);
    }

    #[tokio::test]
    async fn missing_directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let strategy = FileLogStrategy::new(dir.path().join("missing").join("pins.log"));
        let request = PinRequest::new("a@b.com", "4821", "Ana").unwrap();

        assert_matches!(strategy.attempt(&request).await, Err(DeliveryError::Io(_)));
    }
}
