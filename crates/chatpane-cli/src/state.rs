//! Application state resolved from the config file and global flags.
//!
//! AppState holds the effective [`WidgetConfig`] and builds the concrete
//! turn controller, pinning the core generics to the HTTP backend and the
//! terminal renderer.

use anyhow::Context;

use chatpane_core::controller::TurnController;
use chatpane_core::markup::FormatOptions;
use chatpane_infra::config::{load_widget_config, read_widget_config, resolve_config_path};
use chatpane_infra::http::HttpChatBackend;
use chatpane_types::config::{MessageCatalog, WidgetConfig};

use crate::cli::Cli;
use crate::cli::chat::renderer::{Echo, TerminalRenderer};

/// Turn controller pinned to the concrete infra and front-end implementations.
pub type ConcreteController = TurnController<HttpChatBackend, TerminalRenderer>;

/// Effective configuration for one invocation.
pub struct AppState {
    pub config: WidgetConfig,
}

impl AppState {
    /// Load the config file, then apply command-line overrides.
    ///
    /// A path given with `--config` must exist and parse. The platform
    /// default is optional and falls back to built-in defaults.
    pub async fn init(cli: &Cli) -> anyhow::Result<Self> {
        let config_path = cli.config.clone().or_else(resolve_config_path);

        let mut config = match (&cli.config, &config_path) {
            (Some(path), _) => read_widget_config(path)
                .await
                .with_context(|| format!("invalid config file {}", path.display()))?,
            (None, Some(path)) => load_widget_config(path).await,
            (None, None) => {
                tracing::debug!("No platform config dir, using defaults");
                WidgetConfig::default()
            }
        };

        if let Some(url) = &cli.url {
            config.base_url = url.clone();
        }
        if let Some(locale) = cli.locale {
            config.locale = locale;
        }

        tracing::debug!(
            path = ?config_path,
            base_url = %config.base_url,
            locale = %config.locale,
            "Configuration resolved"
        );

        Ok(Self { config })
    }

    pub fn catalog(&self) -> MessageCatalog {
        self.config.catalog()
    }

    pub fn format_options(&self) -> FormatOptions {
        FormatOptions {
            list_wrapping: self.config.list_wrapping,
        }
    }

    /// Build a controller that talks to the configured server.
    pub fn controller(&self, echo: Echo) -> ConcreteController {
        let catalog = self.catalog();
        let options = self.format_options();
        let renderer = TerminalRenderer::new(&catalog.welcome, &options, echo);
        TurnController::new(HttpChatBackend::from_config(&self.config), renderer, catalog)
            .with_format_options(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use clap::Parser;
    use tempfile::TempDir;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["chatpane"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[tokio::test]
    async fn explicit_missing_config_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("typo.toml");
        let cli = cli(&["--config", missing.to_str().unwrap(), "health"]);

        let err = AppState::init(&cli).await.err().unwrap();

        assert!(err.to_string().contains("typo.toml"));
    }

    #[tokio::test]
    async fn explicit_malformed_config_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        tokio::fs::write(&path, "request_timeout_secs = \"soon\"").await.unwrap();
        let cli = cli(&["--config", path.to_str().unwrap(), "health"]);

        assert!(AppState::init(&cli).await.is_err());
    }

    #[tokio::test]
    async fn explicit_config_is_loaded_and_flags_override_it() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        tokio::fs::write(
            &path,
            "base_url = \"https://help.example.com\"\nlocale = \"en\"\nrequest_timeout_secs = 7\n",
        )
        .await
        .unwrap();

        let state = AppState::init(&cli(&["--config", path.to_str().unwrap(), "health"]))
            .await
            .unwrap();
        assert_eq!(state.config.locale, chatpane_types::config::Locale::En);
        assert_eq!(state.config.request_timeout_secs, 7);

        let state = AppState::init(&cli(&[
            "--config",
            path.to_str().unwrap(),
            "--url",
            "http://localhost:9000",
            "--locale",
            "ko",
            "health",
        ]))
        .await
        .unwrap();
        assert_eq!(state.config.base_url, "http://localhost:9000");
        assert_eq!(state.config.locale, chatpane_types::config::Locale::Ko);
    }
}
