//! Backend service client.
//!
//! # Responsibilities
//! - Define the typed calls the translation layer makes ([`SvcBackend`])
//! - Provide an HTTP implementation speaking the RPC gateway envelope
//! - Translate transport and backend failures into [`BackendError`]

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::backend::types::{BackendError, BackendResult};
use crate::config::schema::BackendConfig;
use crate::svc::model::{ServiceDescriptor, ServiceId, ServiceList, ServiceReply};

pub const FIND_SVC_BY_ID: &str = "SvcService.FindSvcByID";
pub const ADD_SVC: &str = "SvcService.AddSvc";
pub const DELETE_SVC: &str = "SvcService.DeleteSvc";
pub const FIND_ALL_SVC: &str = "SvcService.FindAllSvc";

/// Typed calls against the service backend.
///
/// Implementations must be safe for concurrent use; the translation layer
/// shares one instance across all in-flight calls.
#[async_trait]
pub trait SvcBackend: Send + Sync {
    async fn find_svc_by_id(&self, id: ServiceId) -> BackendResult<ServiceDescriptor>;

    async fn add_svc(&self, svc: ServiceDescriptor) -> BackendResult<ServiceReply>;

    async fn delete_svc(&self, id: ServiceId) -> BackendResult<ServiceReply>;

    async fn find_all_svc(&self) -> BackendResult<ServiceList>;
}

/// Body of one RPC gateway call.
#[derive(Debug, Serialize)]
struct RpcRequest<'a, T: Serialize> {
    service: &'a str,
    endpoint: &'a str,
    request: &'a T,
}

/// Error payload returned by the backend on failure.
#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    #[serde(default)]
    code: Option<u16>,
    #[serde(default)]
    detail: String,
}

#[derive(Debug, Serialize)]
struct FindAll {}

/// [`SvcBackend`] over the HTTP RPC gateway.
#[derive(Clone)]
pub struct HttpSvcBackend {
    client: Client,
    rpc_url: Url,
    service: String,
}

impl HttpSvcBackend {
    /// Create a client from configuration.
    pub fn new(config: &BackendConfig) -> BackendResult<Self> {
        let base: Url = config.base_url.parse().map_err(|e| {
            BackendError::Transport(format!("Invalid backend URL '{}': {}", config.base_url, e))
        })?;
        let rpc_url = base
            .join("rpc")
            .map_err(|e| BackendError::Transport(format!("Invalid backend URL '{}': {}", config.base_url, e)))?;
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        tracing::info!(rpc_url = %rpc_url, service = %config.service_name, "Backend client initialized");

        Ok(Self {
            client,
            rpc_url,
            service: config.service_name.clone(),
        })
    }

    pub fn rpc_url(&self) -> &Url {
        &self.rpc_url
    }

    async fn call<Req, Resp>(&self, endpoint: &str, request: &Req) -> BackendResult<Resp>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let body = RpcRequest {
            service: &self.service,
            endpoint,
            request,
        };

        let resp = self
            .client
            .post(self.rpc_url.clone())
            .json(&body)
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(match serde_json::from_str::<RpcErrorBody>(&text) {
                Ok(err) => BackendError::Status {
                    status: err.code.unwrap_or(status.as_u16()),
                    detail: err.detail,
                },
                Err(_) => BackendError::Status {
                    status: status.as_u16(),
                    detail: text,
                },
            });
        }

        serde_json::from_str(&text).map_err(|e| BackendError::Decode(e.to_string()))
    }
}

#[async_trait]
impl SvcBackend for HttpSvcBackend {
    async fn find_svc_by_id(&self, id: ServiceId) -> BackendResult<ServiceDescriptor> {
        self.call(FIND_SVC_BY_ID, &id).await
    }

    async fn add_svc(&self, svc: ServiceDescriptor) -> BackendResult<ServiceReply> {
        self.call(ADD_SVC, &svc).await
    }

    async fn delete_svc(&self, id: ServiceId) -> BackendResult<ServiceReply> {
        self.call(DELETE_SVC, &id).await
    }

    async fn find_all_svc(&self) -> BackendResult<ServiceList> {
        self.call(FIND_ALL_SVC, &FindAll {}).await
    }
}
