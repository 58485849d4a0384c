//! Injected call observer.
//!
//! # Responsibilities
//! - Receive lifecycle events from request handlers
//! - Turn them into structured log events and metrics
//!
//! # Design Decisions
//! - Handlers hold an `Arc<dyn CallObserver>`; nothing logs through globals
//! - Every hook has an empty default so observers implement only what they need

use std::time::Duration;

use crate::backend::BackendError;
use crate::observability::metrics;
use crate::svc::error::ApiError;
use crate::svc::form::FormReport;
use crate::svc::handler::Operation;

/// Receives one event per stage of a handled call.
pub trait CallObserver: Send + Sync {
    fn call_started(&self, _op: Operation) {}

    fn form_mapped(&self, _op: Operation, _report: &FormReport) {}

    /// A call aborted before reaching the backend.
    fn call_rejected(&self, _op: Operation, _err: &ApiError) {}

    fn backend_failed(&self, _op: Operation, _err: &BackendError) {}

    fn call_finished(&self, _op: Operation, _status: u16, _elapsed: Duration) {}
}

/// Default observer: `tracing` events plus request metrics.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl CallObserver for TracingObserver {
    fn call_started(&self, op: Operation) {
        tracing::info!(operation = %op, "Received request");
    }

    fn form_mapped(&self, op: Operation, report: &FormReport) {
        tracing::debug!(
            operation = %op,
            applied = ?report.applied,
            skipped = ?report.skipped,
            ignored = ?report.ignored,
            "Mapped form fields"
        );
    }

    fn call_rejected(&self, op: Operation, err: &ApiError) {
        tracing::warn!(operation = %op, kind = err.kind(), error = %err, "Request rejected");
    }

    fn backend_failed(&self, op: Operation, err: &BackendError) {
        tracing::error!(operation = %op, error = %err, "Backend call failed");
    }

    fn call_finished(&self, op: Operation, status: u16, elapsed: Duration) {
        tracing::debug!(operation = %op, status, elapsed_ms = elapsed.as_millis() as u64, "Request finished");
        metrics::record_call(op.as_str(), status, elapsed);
    }
}

/// Observer that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl CallObserver for NoopObserver {}
