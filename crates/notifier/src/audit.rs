//! Optional audit trail of successful PIN deliveries.
//!
//! Audit writes never affect the delivery result: a failed append is logged
//! and swallowed.

use std::path::{Path, PathBuf};

use chrono::Utc;

use passvault_core::PinRequest;

use crate::record;

/// Append-only log recording which strategy delivered each PIN.
#[derive(Debug, Clone)]
pub struct AuditLog {
    path: PathBuf,
}

impl AuditLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record a successful delivery.
    pub async fn record(&self, request: &PinRequest, strategy: &str, delivery_id: &str) {
        let entry = record::render(
            request,
            Utc::now(),
            &[("strategy", strategy), ("delivery_id", delivery_id)],
        );

        if let Err(e) = record::append(&self.path, &entry).await {
            tracing::error!(
                path = %self.path.display(),
                error = %e,
                "Failed to append PIN audit record"
            );
        }
    }
}
