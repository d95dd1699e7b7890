use std::path::PathBuf;

use drillcheck_core::config_export::{ConfigEnvelope, ConfigSnapshot};
use drillcheck_core::defaults::default_snapshot;
use drillcheck_core::error::CoreError;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Optional configuration envelope replacing the built-in rule sets.
    pub rules_path: Option<PathBuf>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `RULES_PATH`           | unset (built-in defaults)  |
    pub fn from_env() -> Result<Self, CoreError> {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port = parse_env("PORT", "3000")?;

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if let Some(bad) = cors_origins
            .iter()
            .find(|o| axum::http::HeaderValue::from_str(o).is_err())
        {
            return Err(CoreError::Config(format!("invalid CORS origin '{bad}'")));
        }

        let request_timeout_secs = parse_env("REQUEST_TIMEOUT_SECS", "30")?;

        let rules_path = std::env::var("RULES_PATH")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            rules_path,
        })
    }

    /// The default rule snapshot: the `RULES_PATH` envelope when set,
    /// otherwise the built-in rule sets.
    pub fn load_rules(&self) -> Result<ConfigSnapshot, CoreError> {
        let Some(path) = &self.rules_path else {
            return Ok(default_snapshot());
        };
        let text = std::fs::read_to_string(path).map_err(|e| {
            CoreError::Config(format!("cannot read rules file {}: {e}", path.display()))
        })?;
        let envelope = ConfigEnvelope::from_json(&text)?;
        tracing::info!(
            path = %path.display(),
            version = %envelope.version,
            configs = envelope.configs.len(),
            libraries = envelope.libraries.len(),
            "Loaded rule envelope"
        );
        Ok(envelope.into_snapshot())
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, default: &str) -> Result<T, CoreError> {
    let raw = std::env::var(key).unwrap_or_else(|_| default.into());
    raw.trim()
        .parse()
        .map_err(|_| CoreError::Config(format!("{key} has invalid value '{raw}'")))
}
