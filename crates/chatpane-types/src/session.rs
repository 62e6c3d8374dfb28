use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;

/// Number of random characters appended after the timestamp.
const SUFFIX_LEN: usize = 9;

/// Number of characters kept by [`SessionId::short`].
const SHORT_LEN: usize = 12;

/// Opaque correlation token sent with every chat request.
///
/// The server never verifies it; it only groups turns of one conversation.
/// Format: `session_<unix-millis>_<9 lowercase alphanumerics>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Generate a fresh identifier.
    pub fn generate() -> Self {
        let random = Uuid::new_v4().simple().to_string();
        Self(format!(
            "session_{}_{}",
            Utc::now().timestamp_millis(),
            &random[..SUFFIX_LEN]
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Display form: first 12 characters followed by `...`.
    pub fn short(&self) -> String {
        if self.0.chars().count() <= SHORT_LEN {
            return self.0.clone();
        }
        let head: String = self.0.chars().take(SHORT_LEN).collect();
        format!("{head}...")
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_format() {
        let id = SessionId::generate();
        let parts: Vec<&str> = id.as_str().split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "session");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), SUFFIX_LEN);
        assert!(parts[2].chars().all(|c| c.is_ascii_alphanumeric() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_generate_is_unique() {
        assert_ne!(SessionId::generate(), SessionId::generate());
    }

    #[test]
    fn test_short() {
        let id = SessionId("session_1700000000000_abcdefghi".to_string());
        assert_eq!(id.short(), "session_1700...");

        let tiny = SessionId("s1".to_string());
        assert_eq!(tiny.short(), "s1");
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = SessionId("session_1_abc".to_string());
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"session_1_abc\"");
    }
}
