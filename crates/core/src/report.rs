//! Operation outcome reporting.
//!
//! [`track`] wraps an async operation and reports its pending, success and
//! failure phases to a [`Reporter`]. It never retries and returns the
//! operation's result untouched.

use std::fmt::Display;
use std::future::Future;

/// Observable phase of a tracked operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Pending,
    Success,
    /// Carries the underlying error's description.
    Failure(String),
}

/// Sink for operation outcomes.
pub trait Reporter: Send + Sync {
    fn report(&self, label: &str, phase: Phase);
}

/// Run `operation`, reporting its phases under `label`.
pub async fn track<T, E, F>(reporter: &dyn Reporter, label: &str, operation: F) -> Result<T, E>
where
    E: Display,
    F: Future<Output = Result<T, E>>,
{
    reporter.report(label, Phase::Pending);
    let result = operation.await;
    match &result {
        Ok(_) => reporter.report(label, Phase::Success),
        Err(e) => reporter.report(label, Phase::Failure(e.to_string())),
    }
    result
}

/// Emits each phase as a structured `tracing` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, label: &str, phase: Phase) {
        match phase {
            Phase::Pending => tracing::debug!(operation = label, "Operation started"),
            Phase::Success => tracing::info!(operation = label, "Operation succeeded"),
            Phase::Failure(error) => {
                tracing::warn!(operation = label, %error, "Operation failed")
            }
        }
    }
}
