//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with one route per operation
//! - Wire up middleware (tracing, body limit, request ID)
//! - Give every call a context derived from the shutdown token
//! - Bind server to listener and drain on shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{DefaultBodyLimit, State},
    routing::{any, get},
    Json, Router,
};
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::backend::{CallContext, SvcBackend};
use crate::config::ApiConfig;
use crate::lifecycle::Shutdown;
use crate::observability::CallObserver;
use crate::svc::{InboundRequest, OutboundResponse, SvcApi};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub api: SvcApi,
    pub shutdown: Shutdown,
    pub request_timeout: Duration,
    pub service_name: String,
    pub service_version: String,
}

impl AppState {
    /// Context for one inbound call.
    fn call_context(&self) -> CallContext {
        CallContext::with_timeout(self.shutdown.subscribe(), self.request_timeout)
    }
}

/// HTTP server for the service API.
pub struct HttpServer {
    config: ApiConfig,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server in front of `backend`.
    pub fn new(config: ApiConfig, backend: Arc<dyn SvcBackend>, shutdown: Shutdown) -> Self {
        let state = AppState {
            api: SvcApi::new(backend),
            shutdown,
            request_timeout: Duration::from_secs(config.timeouts.request_secs),
            service_name: config.service.name.clone(),
            service_version: config.service.version.clone(),
        };
        Self { config, state }
    }

    /// Replace the default call observer.
    pub fn with_observer(mut self, observer: Arc<dyn CallObserver>) -> Self {
        self.state.api = self.state.api.with_observer(observer);
        self
    }

    /// Build the Axum router with all middleware layers.
    pub fn router(&self) -> Router {
        let operations = Router::new()
            .route("/findSvcById", any(find_svc_by_id))
            .route("/addSvc", any(add_svc))
            .route("/deleteSvcById", any(delete_svc_by_id))
            .route("/updateSvc", any(update_svc))
            .route("/call", any(find_all_svc));

        Router::new()
            .nest(&self.config.api.route_prefix, operations)
            .route("/health", get(health))
            .with_state(self.state.clone())
            .layer(DefaultBodyLimit::max(self.config.listener.max_body_bytes))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// Run the server, accepting connections on the given listener until
    /// shutdown is triggered.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            prefix = %self.config.api.route_prefix,
            "HTTP server starting"
        );

        let app = self.router();
        let shutdown = self.state.shutdown.clone();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move { shutdown.wait().await })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct HealthStatus {
    name: String,
    version: String,
    status: &'static str,
}

async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    let status = if state.shutdown.is_triggered() {
        "draining"
    } else {
        "ok"
    };
    Json(HealthStatus {
        name: state.service_name,
        version: state.service_version,
        status,
    })
}

async fn find_svc_by_id(State(state): State<AppState>, req: InboundRequest) -> OutboundResponse {
    state.api.find_svc_by_id(&state.call_context(), &req).await
}

async fn add_svc(State(state): State<AppState>, req: InboundRequest) -> OutboundResponse {
    state.api.add_svc(&state.call_context(), &req).await
}

async fn delete_svc_by_id(State(state): State<AppState>, req: InboundRequest) -> OutboundResponse {
    state.api.delete_svc_by_id(&state.call_context(), &req).await
}

async fn update_svc(State(state): State<AppState>, req: InboundRequest) -> OutboundResponse {
    state.api.update_svc(&state.call_context(), &req).await
}

async fn find_all_svc(State(state): State<AppState>, req: InboundRequest) -> OutboundResponse {
    state.api.find_all_svc(&state.call_context(), &req).await
}
