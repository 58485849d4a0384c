//! Single-shot backend invocation.
//!
//! # Responsibilities
//! - Run exactly one backend call under the ambient [`CallContext`]
//! - Fail fast when the context is already cancelled
//! - Return the backend's result or error unchanged
//!
//! # Design Decisions
//! - No retries and no timeout of its own; only the context deadline applies
//! - Backend futures are lazy, so a cancelled context never reaches the backend

use std::future::Future;

use crate::backend::context::CallContext;
use crate::backend::types::{BackendError, BackendResult};

/// Await `call` under `ctx`.
pub async fn invoke<T, F>(ctx: &CallContext, call: F) -> BackendResult<T>
where
    F: Future<Output = BackendResult<T>>,
{
    if ctx.is_cancelled() {
        return Err(BackendError::Cancelled);
    }

    let bounded = async {
        match ctx.deadline() {
            Some(deadline) => tokio::time::timeout_at(deadline, call)
                .await
                .unwrap_or(Err(BackendError::DeadlineExceeded)),
            None => call.await,
        }
    };

    tokio::select! {
        biased;
        _ = ctx.cancelled() => Err(BackendError::Cancelled),
        result = bounded => result,
    }
}
