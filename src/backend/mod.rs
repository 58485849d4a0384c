//! Backend service subsystem.
//!
//! # Data Flow
//! ```text
//! Request handler (typed argument)
//!     → invoker.rs (one call under the CallContext)
//!     → client.rs (SvcBackend implementation, e.g. HTTP RPC gateway)
//!     → typed result or BackendError, returned unchanged
//! ```
//!
//! # Design Decisions
//! - The backend client is injected at construction, never looked up globally
//! - No retries, no caching; a failed call is terminal for the request
//! - Cancellation and deadlines come from the caller's context only

pub mod client;
pub mod context;
pub mod invoker;
pub mod types;

pub use client::{HttpSvcBackend, SvcBackend};
pub use context::CallContext;
pub use invoker::invoke;
pub use types::{BackendError, BackendResult};
