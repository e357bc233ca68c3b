//! Rule configuration loading.
//!
//! Rule tables are read from a JSON file. Missing tables keep their default
//! values, so a file only needs the entries it overrides.

use std::path::{Path, PathBuf};

use forja_domain::RuleConfig;

/// Env var naming the rules file.
pub const RULES_PATH_ENV: &str = "FORJA_RULES_PATH";

/// Errors that can occur while loading rule tables.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read rules file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid rules file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Loads a [`RuleConfig`] from disk or falls back to the defaults.
pub struct RuleConfigLoader;

impl RuleConfigLoader {
    /// Load the file named by `FORJA_RULES_PATH`, or the defaults when the
    /// variable is unset or blank.
    pub fn load() -> Result<RuleConfig, ConfigError> {
        let path = std::env::var(RULES_PATH_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);
        Self::load_optional(path.as_deref())
    }

    /// Load `path` when given, otherwise the defaults.
    pub fn load_optional(path: Option<&Path>) -> Result<RuleConfig, ConfigError> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => {
                tracing::debug!("No rules file configured, using default tables");
                Ok(RuleConfig::default())
            }
        }
    }

    pub fn load_from_path(path: &Path) -> Result<RuleConfig, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "Loaded rule tables");
        Ok(config)
    }
}
