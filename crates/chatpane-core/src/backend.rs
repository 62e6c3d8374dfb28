//! ChatBackend trait definition.
//!
//! The transport seam of the widget. The HTTP implementation lives in
//! chatpane-infra; tests substitute scripted backends.

use chatpane_types::chat::{ChatReply, ChatRequest, HealthStatus};
use chatpane_types::error::TransportError;

/// One request/response round trip against the chat endpoint.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait ChatBackend: Send + Sync {
    /// `POST /api/chat`.
    fn chat(
        &self,
        request: &ChatRequest,
    ) -> impl std::future::Future<Output = Result<ChatReply, TransportError>> + Send;

    /// `GET /api/health`.
    fn health(
        &self,
    ) -> impl std::future::Future<Output = Result<HealthStatus, TransportError>> + Send;
}
