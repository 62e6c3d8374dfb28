//! Widget configuration loader.
//!
//! Reads `config.toml` (by default `{config_dir}/chatpane/config.toml`) and
//! deserializes it into [`WidgetConfig`]. The lenient loader falls back to
//! defaults when the file is missing or malformed; the strict loader reports
//! why.

use std::path::{Path, PathBuf};

use chatpane_types::config::WidgetConfig;
use chatpane_types::error::ConfigError;

/// Default location of the config file, if the platform has a config dir.
pub fn resolve_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("chatpane").join("config.toml"))
}

/// Load widget configuration from `path`.
///
/// - If the file does not exist, returns [`WidgetConfig::default()`].
/// - If the file exists but fails to read or parse, logs a warning and returns the default.
/// - Otherwise returns the parsed config.
pub async fn load_widget_config(path: &Path) -> WidgetConfig {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return WidgetConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return WidgetConfig::default();
        }
    };

    match toml::from_str::<WidgetConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            WidgetConfig::default()
        }
    }
}

/// Load widget configuration from `path`, reporting read and parse errors.
pub async fn read_widget_config(path: &Path) -> Result<WidgetConfig, ConfigError> {
    let content = tokio::fs::read_to_string(path).await?;
    Ok(toml::from_str(&content)?)
}
