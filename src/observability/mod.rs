//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Request handlers emit call events:
//!     → observer.rs (injected CallObserver)
//!         → logging.rs subscriber (structured log events)
//!         → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout, pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Request ID flows in through the `x-request-id` header and trace spans
//! - Handlers depend on the observer trait, never on a global logger

pub mod logging;
pub mod metrics;
pub mod observer;

pub use observer::{CallObserver, NoopObserver, TracingObserver};
