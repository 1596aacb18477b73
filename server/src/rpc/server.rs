//! JSON-RPC server exposing the knowledge base to a host process.
//!
//! `initialize` opens the store, `rag` answers one question, `shutdown`
//! releases the store again.

use super::protocol::*;
use super::transport::LineTransport;
use crate::config::HostConfig;
use crate::knowledge::KnowledgeBase;
use serde_json::Value;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncWrite};

/// Request handler and event loop
pub struct RpcServer {
    knowledge: Arc<KnowledgeBase>,
}

impl RpcServer {
    pub fn new() -> Self {
        Self::with_knowledge(Arc::new(KnowledgeBase::new()))
    }

    /// Serve an existing (possibly already initialized) knowledge base
    pub fn with_knowledge(knowledge: Arc<KnowledgeBase>) -> Self {
        Self { knowledge }
    }

    /// Run the event loop over stdio until the client disconnects
    pub async fn run(&self) -> std::io::Result<()> {
        self.serve(&mut LineTransport::stdio()).await
    }

    /// Run the event loop over any line transport
    pub async fn serve<R, W>(&self, transport: &mut LineTransport<R, W>) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        tracing::info!("RPC server starting...");

        loop {
            match transport.read_request().await {
                Ok(Some(request)) => {
                    let response = self.handle_request(request).await;
                    transport.write_response(&response).await?;
                }
                Ok(None) => {
                    tracing::info!("Client disconnected");
                    break;
                }
                Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
                    let response = JsonRpcResponse::error(
                        None,
                        JsonRpcError::parse_error(format!("Parse error: {}", e)),
                    );
                    transport.write_response(&response).await?;
                }
                Err(e) => return Err(e),
            }
        }

        Ok(())
    }

    /// Handle a JSON-RPC request
    pub async fn handle_request(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        tracing::debug!("Handling request: {}", request.method);

        match request.method.as_str() {
            "initialize" => self.handle_initialize(request.id, request.params).await,
            "rag" => self.handle_rag(request.id, request.params).await,
            "ping" => to_response(request.id, &PingResult {}),
            "shutdown" => {
                let released = self.knowledge.shutdown().await;
                to_response(request.id, &ShutdownResult { released })
            }
            _ => {
                JsonRpcResponse::error(request.id, JsonRpcError::method_not_found(&request.method))
            }
        }
    }

    async fn handle_initialize(&self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        let Some(params) = params else {
            return JsonRpcResponse::error(id, JsonRpcError::invalid_params("Missing params"));
        };

        let config = match HostConfig::from_value(params) {
            Ok(config) => config,
            Err(e) => return JsonRpcResponse::error(id, e.into()),
        };

        match self.knowledge.initialize(&config).await {
            Ok(summary) => to_response(id, &summary),
            Err(e) => {
                tracing::error!("initialize failed: {}", e);
                JsonRpcResponse::error(id, e.into())
            }
        }
    }

    async fn handle_rag(&self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        let params: RagParams = match params {
            Some(p) => match serde_json::from_value(p) {
                Ok(p) => p,
                Err(e) => {
                    return JsonRpcResponse::error(
                        id,
                        JsonRpcError::invalid_params(format!("Invalid params: {}", e)),
                    );
                }
            },
            None => RagParams::default(),
        };

        match self.knowledge.ask(&params.question).await {
            Ok(answer) => to_response(id, &answer),
            Err(e) => JsonRpcResponse::error(id, e.into()),
        }
    }
}

impl Default for RpcServer {
    fn default() -> Self {
        Self::new()
    }
}

fn to_response<T: serde::Serialize>(id: Option<Value>, result: &T) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(value) => JsonRpcResponse::success(id, value),
        Err(e) => JsonRpcResponse::error(id, JsonRpcError::internal_error(e.to_string())),
    }
}
