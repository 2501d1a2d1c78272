use crate::catalog::{EndpointDescriptor, Method};
use rand::Rng;
use serde_json::Value;
use std::future::Future;
use std::ops::Range;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ExecError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out after {0}ms")]
    Timeout(u64),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExecRequest {
    pub id: String,
    pub method: Method,
    pub path: String,
    pub response: Value,
}

impl ExecRequest {
    pub fn for_endpoint(endpoint: &EndpointDescriptor) -> Self {
        ExecRequest {
            id: endpoint.id.clone(),
            method: endpoint.method,
            path: endpoint.path.clone(),
            response: endpoint.response.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Completion {
    pub response: Value,
    pub status: u16,
    pub latency_ms: u64,
}

#[derive(Debug)]
pub enum ExecEvent {
    Completed {
        id: String,
        outcome: Result<Completion, ExecError>,
    },
}

pub trait Backend: Send + Sync + 'static {
    fn execute(
        &self,
        request: &ExecRequest,
    ) -> impl Future<Output = Result<Completion, ExecError>> + Send;
}

/// Answers every request with the endpoint's canned response after `delay`.
#[derive(Clone, Debug)]
pub struct SimulatedBackend {
    pub delay: Duration,
    pub latency: Range<u64>,
}

impl SimulatedBackend {
    pub fn new(delay: Duration, latency: Range<u64>) -> Self {
        SimulatedBackend { delay, latency }
    }
}

impl Default for SimulatedBackend {
    fn default() -> Self {
        SimulatedBackend::new(Duration::from_millis(600), 50..250)
    }
}

impl Backend for SimulatedBackend {
    async fn execute(&self, request: &ExecRequest) -> Result<Completion, ExecError> {
        tokio::time::sleep(self.delay).await;
        let latency_ms = rand::rng().random_range(self.latency.clone());
        Ok(Completion {
            response: request.response.clone(),
            status: 200,
            latency_ms,
        })
    }
}

/// Runs one backend call, bounded by `limit`.
pub async fn run_one<B: Backend>(
    backend: &B,
    request: &ExecRequest,
    limit: Duration,
) -> Result<Completion, ExecError> {
    match tokio::time::timeout(limit, backend.execute(request)).await {
        Ok(outcome) => outcome,
        Err(_) => Err(ExecError::Timeout(limit.as_millis() as u64)),
    }
}

/// Spawns one task per request so different endpoints complete independently.
pub async fn handle_executions<B: Backend>(
    mut receiver: mpsc::Receiver<ExecRequest>,
    sender: mpsc::Sender<ExecEvent>,
    backend: Arc<B>,
    limit: Duration,
) {
    while let Some(request) = receiver.recv().await {
        log::debug!("executing {} {}", request.method.as_str(), request.path);
        let backend = Arc::clone(&backend);
        let sender = sender.clone();

        tokio::spawn(async move {
            let outcome = run_one(backend.as_ref(), &request, limit).await;
            if let Err(e) = &outcome {
                log::warn!("execution of {} failed: {}", request.id, e);
            }
            let event = ExecEvent::Completed {
                id: request.id,
                outcome,
            };
            if sender.send(event).await.is_err() {
                log::warn!("execution result dropped, UI channel closed");
            }
        });
    }
}
