//! Service API facade library.
//!
//! Translates loosely typed HTTP calls (query string and form body) into
//! typed calls against the `svc` backend service, and the backend's replies
//! into JSON envelopes.

pub mod backend;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod svc;

pub use config::schema::ApiConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
