//! Ordered fallback chain of delivery strategies.
//!
//! [`PinNotifier::deliver`] walks the strategies in priority order, awaiting
//! each attempt to completion before starting the next. The first success
//! ends the walk, so at most one strategy produces a side effect per
//! successful call. Errors and panics from a strategy are logged, recorded,
//! and never reach the caller.

use std::any::Any;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use tracing::Instrument;
use uuid::Uuid;

use passvault_core::PinRequest;

use crate::audit::AuditLog;
use crate::config::NotifierConfig;
use crate::delivery::{DeliveryError, DeliveryStrategy};

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// One failed strategy attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptFailure {
    /// Name of the strategy that failed.
    pub strategy: String,
    /// Rendered error.
    pub reason: String,
}

/// A PIN that reached its recipient.
#[derive(Debug, Clone)]
pub struct Delivery {
    /// Correlation id for this `deliver` call.
    pub id: Uuid,
    /// Name of the strategy that succeeded.
    pub strategy: String,
    /// Failures of the higher-priority strategies tried before it.
    pub failures: Vec<AttemptFailure>,
}

/// Every strategy in the chain failed.
#[derive(Debug, Clone, thiserror::Error)]
#[error("all {} delivery strategies failed", .failures.len())]
pub struct Exhausted {
    /// Correlation id for this `deliver` call.
    pub id: Uuid,
    /// One entry per strategy, in priority order.
    pub failures: Vec<AttemptFailure>,
}

// ---------------------------------------------------------------------------
// PinNotifier
// ---------------------------------------------------------------------------

/// Delivers PINs through an ordered list of strategies.
pub struct PinNotifier {
    strategies: Vec<Box<dyn DeliveryStrategy>>,
    audit: Option<AuditLog>,
}

impl PinNotifier {
    /// Create a notifier trying `strategies` in the given order.
    pub fn new(strategies: Vec<Box<dyn DeliveryStrategy>>) -> Self {
        Self {
            strategies,
            audit: None,
        }
    }

    /// Build the chain described by `config`.
    pub fn from_config(config: &NotifierConfig) -> Self {
        let notifier = Self::new(config.build_strategies());
        match &config.audit_log {
            Some(path) => notifier.with_audit_log(AuditLog::new(path)),
            None => notifier,
        }
    }

    /// Record every successful delivery in `audit`.
    pub fn with_audit_log(mut self, audit: AuditLog) -> Self {
        self.audit = Some(audit);
        self
    }

    /// Strategy names in priority order.
    pub fn strategy_names(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Try each strategy in order until one succeeds.
    pub async fn deliver(&self, request: &PinRequest) -> Result<Delivery, Exhausted> {
        let id = Uuid::now_v7();
        let span = tracing::info_span!("pin_delivery", delivery_id = %id, to = request.recipient());

        async {
            let mut failures = Vec::new();

            for strategy in &self.strategies {
                let name = strategy.name().to_string();
                tracing::debug!(strategy = %name, "Attempting PIN delivery");

                match run_attempt(&**strategy, request).await {
                    Ok(()) => {
                        tracing::info!(strategy = %name, "PIN delivered");
                        if let Some(audit) = &self.audit {
                            audit.record(request, &name, &id.to_string()).await;
                        }
                        return Ok(Delivery {
                            id,
                            strategy: name,
                            failures,
                        });
                    }
                    Err(e) => {
                        tracing::warn!(
                            strategy = %name,
                            error = %e,
                            "PIN delivery strategy failed"
                        );
                        failures.push(AttemptFailure {
                            strategy: name,
                            reason: e.to_string(),
                        });
                    }
                }
            }

            tracing::error!(attempts = failures.len(), "All PIN delivery strategies failed");
            Err(Exhausted { id, failures })
        }
        .instrument(span)
        .await
    }

    /// Boolean entry point for callers that only need success or failure.
    ///
    /// An invalid request (empty recipient) is logged and reported as `false`.
    pub async fn send_pin(&self, email: &str, pin: &str, user_name: &str) -> bool {
        let request = match PinRequest::new(email, pin, user_name) {
            Ok(request) => request,
            Err(e) => {
                tracing::error!(error = %e, "Rejected PIN request");
                return false;
            }
        };
        self.deliver(&request).await.is_ok()
    }
}

/// Run one attempt, converting a panic into a [`DeliveryError::Panicked`].
async fn run_attempt(
    strategy: &dyn DeliveryStrategy,
    request: &PinRequest,
) -> Result<(), DeliveryError> {
    match AssertUnwindSafe(strategy.attempt(request)).catch_unwind().await {
        Ok(result) => result,
        Err(payload) => Err(DeliveryError::Panicked(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
