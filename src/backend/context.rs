//! Ambient per-call context.
//!
//! # Responsibilities
//! - Carry the cancellation signal for one inbound call
//! - Carry the deadline the backend call must finish by
//!
//! # Design Decisions
//! - Tokens are children of the server shutdown token, so shutdown cancels
//!   every in-flight call
//! - The context is cheap to clone and never mutated by handlers

use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Cancellation and deadline for a single call.
#[derive(Debug, Clone)]
pub struct CallContext {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl CallContext {
    /// Create a context from an existing token and optional deadline.
    pub fn new(token: CancellationToken, deadline: Option<Instant>) -> Self {
        Self { token, deadline }
    }

    /// A context that is never cancelled and has no deadline.
    pub fn background() -> Self {
        Self::new(CancellationToken::new(), None)
    }

    /// A context cancelled through `token` and bounded by `timeout` from now.
    ///
    /// A timeout too large to represent as an instant leaves the call
    /// without a deadline.
    pub fn with_timeout(token: CancellationToken, timeout: Duration) -> Self {
        Self::new(token, Instant::now().checked_add(timeout))
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Cancel this call (and any child contexts).
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Resolves once the call is cancelled.
    pub async fn cancelled(&self) {
        self.token.cancelled().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_background_context() {
        let ctx = CallContext::background();
        assert!(!ctx.is_cancelled());
        assert!(ctx.deadline().is_none());
    }

    #[test]
    fn test_unrepresentable_timeout_means_no_deadline() {
        let ctx = CallContext::with_timeout(CancellationToken::new(), Duration::from_secs(u64::MAX));
        assert!(ctx.deadline().is_none());

        let ctx = CallContext::with_timeout(CancellationToken::new(), Duration::from_secs(30));
        assert!(ctx.deadline().is_some());
    }

    #[tokio::test]
    async fn test_parent_cancellation_reaches_child() {
        let root = CancellationToken::new();
        let ctx = CallContext::with_timeout(root.child_token(), Duration::from_secs(5));
        assert!(ctx.deadline().is_some());

        root.cancel();
        assert!(ctx.is_cancelled());
        ctx.cancelled().await;
    }
}
