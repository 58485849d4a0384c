//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, per-call context)
//!     → request.rs (query + form body → InboundRequest)
//!     → svc handlers (translation, backend call)
//!     → response.rs (OutboundResponse → status + JSON)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::InboundRejection;
pub use server::{AppState, HttpServer};
