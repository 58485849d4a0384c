//! Service API translation layer.
//!
//! # Data Flow
//! ```text
//! InboundRequest (query + body parameter groups)
//!     → params.rs (extraction, integer parsing)
//!     → port.rs (port variant from svc_type)
//!     → form.rs + model.rs (table-driven form mapping)
//!     → handler.rs (one backend call per operation)
//!     → envelope.rs (OutboundResponse: status + JSON body)
//! ```
//!
//! # Design Decisions
//! - Every failure ends the call with a non-200 status
//! - Field names and aliases live in static tables, not in handler code
//! - No state is kept between calls

pub mod envelope;
pub mod error;
pub mod form;
pub mod handler;
pub mod model;
pub mod params;
pub mod port;

pub use envelope::OutboundResponse;
pub use error::{ApiError, ApiResult};
pub use handler::{build_descriptor, Operation, SvcApi};
pub use model::{ServiceDescriptor, ServiceId, ServiceList, ServicePort, ServiceReply};
pub use params::{InboundRequest, ParamGroup};
pub use port::PortKind;
