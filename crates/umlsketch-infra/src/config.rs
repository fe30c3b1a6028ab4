//! Service configuration loader for umlsketch.
//!
//! Reads `umlsketch.toml` (or an explicit path) and deserializes it into
//! [`ServiceConfig`]. Falls back to defaults when the file is missing or
//! malformed, then applies environment overrides.

use std::path::{Path, PathBuf};

use umlsketch_types::config::ServiceConfig;

/// Config file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "umlsketch.toml";

/// Environment variable overriding [`ServiceConfig::model`].
pub const MODEL_ENV_VAR: &str = "UMLSKETCH_MODEL";

/// Load service configuration.
///
/// - `path` given: read that file; a missing file is a warning.
/// - `path` absent: read `umlsketch.toml` from the working directory; a
///   missing file is silent.
/// - A file that fails to parse logs a warning and yields the defaults.
///
/// Environment overrides are applied last.
pub async fn load_service_config(path: Option<&Path>) -> ServiceConfig {
    let explicit = path.is_some();
    let config_path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

    let config = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => parse_config(&content, &config_path),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            if explicit {
                tracing::warn!("Config file {} not found, using defaults", config_path.display());
            } else {
                tracing::debug!("No {} found, using defaults", config_path.display());
            }
            ServiceConfig::default()
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            ServiceConfig::default()
        }
    };

    apply_env_overrides(config, |key| std::env::var(key).ok())
}

fn parse_config(content: &str, path: &Path) -> ServiceConfig {
    match toml::from_str::<ServiceConfig>(content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            ServiceConfig::default()
        }
    }
}

/// Apply environment overrides on top of file configuration.
pub fn apply_env_overrides(
    mut config: ServiceConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> ServiceConfig {
    if let Some(model) = lookup(MODEL_ENV_VAR).filter(|m| !m.trim().is_empty()) {
        config.model = model.trim().to_string();
    }
    config
}
