//! Chat wire and transcript role types.
//!
//! `ChatRequest` / `ChatReply` mirror the JSON bodies of `POST /api/chat`,
//! and `HealthStatus` mirrors `GET /api/health`. The server adds a few
//! informational fields that the widget tolerates but does not need.

use serde::{Deserialize, Serialize};

use std::fmt;

use crate::session::SessionId;

/// Who authored a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sender::User => write!(f, "user"),
            Sender::Bot => write!(f, "bot"),
        }
    }
}

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub session_id: SessionId,
}

/// Successful body of `POST /api/chat`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
    /// Echo of the correlation token (informational).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    /// Server-side timestamp, ISO 8601 (informational).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// Body of `GET /api/health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Error body the server sends alongside non-2xx statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sender_display_matches_wire_name() {
        assert_eq!(Sender::User.to_string(), "user");
        assert_eq!(serde_json::to_value(Sender::Bot).unwrap(), serde_json::json!("bot"));
    }

    #[test]
    fn test_chat_request_wire_shape() {
        let req = ChatRequest {
            message: "hello".to_string(),
            session_id: serde_json::from_value(serde_json::json!("session_1_abc")).unwrap(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"message": "hello", "session_id": "session_1_abc"})
        );
    }

    #[test]
    fn test_chat_reply_tolerates_extra_fields() {
        let reply: ChatReply = serde_json::from_str(
            r#"{"response":"hi","session_id":"s","timestamp":"2025-01-01T00:00:00","extra":1}"#,
        )
        .unwrap();
        assert_eq!(reply.response, "hi");
        assert_eq!(reply.session_id.as_deref(), Some("s"));
    }

    #[test]
    fn test_chat_reply_requires_response() {
        let parsed = serde_json::from_str::<ChatReply>(r#"{"error":"boom"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_health_status_minimal() {
        let health: HealthStatus = serde_json::from_str(r#"{"status":"healthy"}"#).unwrap();
        assert_eq!(health.status, "healthy");
        assert!(health.version.is_none());
    }
}
