//! Shared utilities for integration testing.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use svc_api::backend::{BackendError, BackendResult, SvcBackend};
use svc_api::svc::{ServiceDescriptor, ServiceId, ServiceList, ServiceReply};

/// In-process backend that records every call.
#[derive(Default)]
#[allow(dead_code)]
pub struct RecordingBackend {
    pub calls: AtomicUsize,
    pub added: Mutex<Vec<ServiceDescriptor>>,
    pub fail_with: Mutex<Option<BackendError>>,
    pub delay: Option<Duration>,
}

#[allow(dead_code)]
impl RecordingBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn slow(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            delay: Some(delay),
            ..Default::default()
        })
    }

    pub fn fail_with(&self, err: BackendError) {
        *self.fail_with.lock().unwrap() = Some(err);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn enter(&self) -> BackendResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let failure = self.fail_with.lock().unwrap().clone();
        match failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl SvcBackend for RecordingBackend {
    async fn find_svc_by_id(&self, id: ServiceId) -> BackendResult<ServiceDescriptor> {
        self.enter().await?;
        Ok(ServiceDescriptor {
            id: id.id,
            svc_name: format!("svc-{}", id.id),
            svc_namespace: "default".into(),
            ..Default::default()
        })
    }

    async fn add_svc(&self, svc: ServiceDescriptor) -> BackendResult<ServiceReply> {
        self.enter().await?;
        let msg = format!("added {}", svc.svc_name);
        self.added.lock().unwrap().push(svc);
        Ok(ServiceReply::new(msg))
    }

    async fn delete_svc(&self, id: ServiceId) -> BackendResult<ServiceReply> {
        self.enter().await?;
        Ok(ServiceReply::new(format!("deleted {}", id.id)))
    }

    async fn find_all_svc(&self) -> BackendResult<ServiceList> {
        self.enter().await?;
        let svc_info = self.added.lock().unwrap().clone();
        Ok(ServiceList { svc_info })
    }
}

/// Read one HTTP/1.1 request and return its body.
async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = socket.read(&mut chunk).await.unwrap_or(0);
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        let text = String::from_utf8_lossy(&buf);
        if let Some(end) = text.find("\r\n\r\n") {
            let content_length = text[..end]
                .lines()
                .filter_map(|l| l.split_once(':'))
                .find(|(k, _)| k.trim().eq_ignore_ascii_case("content-length"))
                .and_then(|(_, v)| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + content_length {
                return String::from_utf8_lossy(&buf[end + 4..end + 4 + content_length]).into_owned();
            }
        }
    }
    String::new()
}

/// Start a programmable mock backend on an ephemeral port.
///
/// `f` receives the raw request body and returns the status and body to send.
#[allow(dead_code)]
pub async fn start_programmable_backend<F, Fut>(f: F) -> SocketAddr
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        let request = read_request(&mut socket).await;
                        let (status, body) = f(request).await;
                        let status_text = match status {
                            200 => "200 OK",
                            400 => "400 Bad Request",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };

                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}
