//! Widget configuration types.
//!
//! `WidgetConfig` represents the `config.toml` that points the widget at a
//! chat endpoint and controls its fixed user-facing strings. All fields have
//! defaults, so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Top-level configuration for the chat widget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetConfig {
    /// Base URL of the chat server; `/api/chat` and `/api/health` are appended.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Upper bound on one round trip before it counts as a failed turn.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Language of the built-in messages.
    #[serde(default)]
    pub locale: Locale,

    /// Which bullet runs get wrapped in a list container.
    #[serde(default)]
    pub list_wrapping: ListWrapping,

    /// Canned prompts offered as one-shot "quick messages".
    #[serde(default)]
    pub quick_messages: Vec<String>,

    /// Per-string overrides of the locale catalog.
    #[serde(default)]
    pub messages: MessageOverrides,
}

/// Shortest accepted round-trip bound; `0` would fail every turn.
const MIN_REQUEST_TIMEOUT_SECS: u64 = 1;

fn default_base_url() -> String {
    "http://127.0.0.1:5001".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            locale: Locale::default(),
            list_wrapping: ListWrapping::default(),
            quick_messages: Vec::new(),
            messages: MessageOverrides::default(),
        }
    }
}

impl WidgetConfig {
    /// Round-trip bound, clamped to at least one second.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(MIN_REQUEST_TIMEOUT_SECS))
    }

    /// Resolve the message catalog: locale defaults with overrides applied.
    pub fn catalog(&self) -> MessageCatalog {
        let mut catalog = MessageCatalog::for_locale(self.locale);
        let overrides = &self.messages;
        if let Some(s) = &overrides.welcome {
            catalog.welcome = s.clone();
        }
        if let Some(s) = &overrides.fallback {
            catalog.fallback = s.clone();
        }
        if let Some(s) = &overrides.health_error {
            catalog.health_error = s.clone();
        }
        if let Some(s) = &overrides.error_prefix {
            catalog.error_prefix = s.clone();
        }
        if let Some(s) = &overrides.dictation_unsupported {
            catalog.dictation_unsupported = s.clone();
        }
        catalog
    }
}

/// Language of the built-in user-facing strings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ko,
    En,
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::Ko => write!(f, "ko"),
            Locale::En => write!(f, "en"),
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ko" | "ko-kr" => Ok(Locale::Ko),
            "en" | "en-us" => Ok(Locale::En),
            other => Err(format!("unsupported locale: '{other}'")),
        }
    }
}

/// Scope of the bullet-list wrapping stage.
///
/// `FirstRun` wraps only the first contiguous run of list items, matching the
/// widget's historical output. `AllRuns` wraps each run separately.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListWrapping {
    #[default]
    FirstRun,
    AllRuns,
}

/// Optional replacements for individual catalog strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub welcome: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dictation_unsupported: Option<String>,
}

/// The fixed user-facing strings of the widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageCatalog {
    /// Placeholder entry the transcript starts with (and returns to on clear).
    pub welcome: String,
    /// Bot entry shown when a turn fails for any reason.
    pub fallback: String,
    /// Shown when the start-up liveness check fails.
    pub health_error: String,
    /// Label in front of error notices, e.g. `⚠️ Error: ...`.
    pub error_prefix: String,
    pub dictation_unsupported: String,
}

impl MessageCatalog {
    pub fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::Ko => Self {
                welcome: "안녕하세요! 무엇을 도와드릴까요?".to_string(),
                fallback: "죄송합니다. 일시적인 오류가 발생했습니다. 잠시 후 다시 시도해주세요."
                    .to_string(),
                health_error: "서버에 연결할 수 없습니다. 잠시 후 다시 시도해주세요.".to_string(),
                error_prefix: "오류".to_string(),
                dictation_unsupported: "이 환경은 음성 인식을 지원하지 않습니다.".to_string(),
            },
            Locale::En => Self {
                welcome: "Hello! How can I help you today?".to_string(),
                fallback: "Sorry, a temporary error occurred. Please try again shortly."
                    .to_string(),
                health_error: "Cannot reach the server. Please try again shortly.".to_string(),
                error_prefix: "Error".to_string(),
                dictation_unsupported: "Voice input is not supported here.".to_string(),
            },
        }
    }

    /// Format an error notice the way the widget displays it.
    pub fn error_notice(&self, message: &str) -> String {
        format!("⚠️ {}: {message}", self.error_prefix)
    }
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self::for_locale(Locale::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widget_config_default_values() {
        let config = WidgetConfig::default();
        assert_eq!(config.base_url, "http://127.0.0.1:5001");
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.locale, Locale::Ko);
        assert_eq!(config.list_wrapping, ListWrapping::FirstRun);
        assert!(config.quick_messages.is_empty());
    }

    #[test]
    fn test_widget_config_deserialize_empty() {
        let config: WidgetConfig = toml::from_str("").unwrap();
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.catalog(), MessageCatalog::for_locale(Locale::Ko));
    }

    #[test]
    fn test_widget_config_deserialize_with_values() {
        let toml_str = r#"
base_url = "https://jobs.example.org"
request_timeout_secs = 10
locale = "en"
list_wrapping = "all_runs"
quick_messages = ["What jobs are near me?", "How do I apply?"]

[messages]
fallback = "Try again later."
"#;
        let config: WidgetConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.base_url, "https://jobs.example.org");
        assert_eq!(config.locale, Locale::En);
        assert_eq!(config.list_wrapping, ListWrapping::AllRuns);
        assert_eq!(config.quick_messages.len(), 2);

        let catalog = config.catalog();
        assert_eq!(catalog.fallback, "Try again later.");
        assert_eq!(catalog.welcome, MessageCatalog::for_locale(Locale::En).welcome);
    }

    #[test]
    fn test_zero_request_timeout_is_clamped() {
        let config: WidgetConfig = toml::from_str("request_timeout_secs = 0").unwrap();
        assert_eq!(config.request_timeout(), Duration::from_secs(1));
        assert_eq!(WidgetConfig::default().request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_locale_parse() {
        assert_eq!("ko-KR".parse::<Locale>().unwrap(), Locale::Ko);
        assert_eq!("EN".parse::<Locale>().unwrap(), Locale::En);
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn test_error_notice() {
        let catalog = MessageCatalog::for_locale(Locale::En);
        assert_eq!(catalog.error_notice("down"), "⚠️ Error: down");
    }
}
