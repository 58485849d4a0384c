//! Request handlers for the service API.
//!
//! Each operation is one linear pipeline:
//!
//! ```text
//! check context → validate inputs → build payload → invoke backend → envelope
//! ```
//!
//! The first failure ends the call; the backend is only reached once every
//! local check has passed.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;

use crate::backend::{invoke, CallContext, SvcBackend};
use crate::observability::{CallObserver, TracingObserver};
use crate::svc::envelope::OutboundResponse;
use crate::svc::error::{ApiError, ApiResult};
use crate::svc::form::{map_form, FormReport};
use crate::svc::model::{ServiceDescriptor, ServiceId, ServiceList, ServiceReply};
use crate::svc::params::{InboundRequest, ParamGroup};
use crate::svc::port::{build_port, PORT_FIELDS};

/// Placeholder body returned by the update stub.
pub const UPDATE_PLACEHOLDER: &str = "svcApi.UpdateSvc has no backend operation";

/// Operations exposed by the service API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    FindSvcById,
    AddSvc,
    DeleteSvcById,
    UpdateSvc,
    FindAllSvc,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::FindSvcById => "find_svc_by_id",
            Operation::AddSvc => "add_svc",
            Operation::DeleteSvcById => "delete_svc_by_id",
            Operation::UpdateSvc => "update_svc",
            Operation::FindAllSvc => "find_all_svc",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Assemble a descriptor from a create-call body.
///
/// Builds the port variant first, then maps the remaining fields.
pub fn build_descriptor(body: &ParamGroup) -> ApiResult<(ServiceDescriptor, FormReport)> {
    let mut descriptor = ServiceDescriptor::default();
    if let Some((kind, port)) = build_port(body)? {
        descriptor.svc_type = kind.as_str().to_string();
        descriptor.svc_port.push(port);
    }
    let report = map_form(body, &mut descriptor, PORT_FIELDS)?;
    Ok((descriptor, report))
}

/// Translates inbound calls into backend calls.
///
/// Holds only shared, immutable handles, so one instance serves every
/// concurrent request.
#[derive(Clone)]
pub struct SvcApi {
    backend: Arc<dyn SvcBackend>,
    observer: Arc<dyn CallObserver>,
}

impl SvcApi {
    pub fn new(backend: Arc<dyn SvcBackend>) -> Self {
        Self {
            backend,
            observer: Arc::new(TracingObserver),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn CallObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Look up one service by `svc_id` (query).
    pub async fn find_svc_by_id(&self, ctx: &CallContext, req: &InboundRequest) -> OutboundResponse {
        let op = Operation::FindSvcById;
        let started = self.begin(op);
        let result = self.lookup(ctx, req).await;
        self.finish(op, started, result)
    }

    /// Create a service from the form body.
    pub async fn add_svc(&self, ctx: &CallContext, req: &InboundRequest) -> OutboundResponse {
        let op = Operation::AddSvc;
        let started = self.begin(op);
        let result = self.create(ctx, req).await;
        self.finish(op, started, result)
    }

    /// Delete one service by `svc_id` (query).
    pub async fn delete_svc_by_id(&self, ctx: &CallContext, req: &InboundRequest) -> OutboundResponse {
        let op = Operation::DeleteSvcById;
        let started = self.begin(op);
        let result = self.delete(ctx, req).await;
        self.finish(op, started, result)
    }

    /// Update stub. Makes no backend call.
    pub async fn update_svc(&self, _ctx: &CallContext, _req: &InboundRequest) -> OutboundResponse {
        let op = Operation::UpdateSvc;
        let started = self.begin(op);
        self.finish(op, started, Ok(UPDATE_PLACEHOLDER))
    }

    /// List every service.
    pub async fn find_all_svc(&self, ctx: &CallContext, _req: &InboundRequest) -> OutboundResponse {
        let op = Operation::FindAllSvc;
        let started = self.begin(op);
        let result = self.list(ctx).await;
        self.finish(op, started, result)
    }

    async fn lookup(&self, ctx: &CallContext, req: &InboundRequest) -> ApiResult<ServiceDescriptor> {
        ensure_active(ctx)?;
        let id = ServiceId::from_group(&req.query)?;
        Ok(invoke(ctx, self.backend.find_svc_by_id(id)).await?)
    }

    async fn create(&self, ctx: &CallContext, req: &InboundRequest) -> ApiResult<ServiceReply> {
        ensure_active(ctx)?;
        let (descriptor, report) = build_descriptor(&req.body)?;
        self.observer.form_mapped(Operation::AddSvc, &report);
        Ok(invoke(ctx, self.backend.add_svc(descriptor)).await?)
    }

    async fn delete(&self, ctx: &CallContext, req: &InboundRequest) -> ApiResult<ServiceReply> {
        ensure_active(ctx)?;
        let id = ServiceId::from_group(&req.query)?;
        Ok(invoke(ctx, self.backend.delete_svc(id)).await?)
    }

    async fn list(&self, ctx: &CallContext) -> ApiResult<ServiceList> {
        ensure_active(ctx)?;
        Ok(invoke(ctx, self.backend.find_all_svc()).await?)
    }

    fn begin(&self, op: Operation) -> Instant {
        self.observer.call_started(op);
        Instant::now()
    }

    fn finish<T: Serialize>(&self, op: Operation, started: Instant, result: ApiResult<T>) -> OutboundResponse {
        match &result {
            Err(ApiError::Backend(e)) => self.observer.backend_failed(op, e),
            Err(e) => self.observer.call_rejected(op, e),
            Ok(_) => {}
        }
        let response = OutboundResponse::from_result(result);
        self.observer.call_finished(op, response.status_code, started.elapsed());
        response
    }
}

fn ensure_active(ctx: &CallContext) -> ApiResult<()> {
    if ctx.is_cancelled() {
        return Err(ApiError::Cancelled);
    }
    Ok(())
}
