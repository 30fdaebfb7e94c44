//! # Configuration
//!
//! Optional TOML file plus environment overrides.
//!
//! ```toml
//! [logging]
//! format = "json"            # "text" (default) or "json"
//! filter = "readiness=debug" # EnvFilter directive, RUST_LOG still wins
//!
//! [assessment]
//! strict_entity_types = true # reject unknown entity tags
//! max_input_bytes = 10485760
//! ```
//!
//! ## Environment Variables
//!
//! - `READINESS_LOG_FORMAT`: `text` or `json`, overrides `logging.format`
//! - `READINESS_STRICT`: `true`/`false`/`1`/`0`, overrides `assessment.strict_entity_types`

use readiness_core::ReadinessError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file read when `--config` is not given and the file exists.
pub const DEFAULT_CONFIG_FILE: &str = "readiness.toml";

/// Default tracing filter.
pub const DEFAULT_LOG_FILTER: &str = "readiness=info";

/// Default input file size limit (10 MB).
pub const DEFAULT_MAX_INPUT_BYTES: u64 = 10 * 1024 * 1024;

const LOG_FORMAT_ENV: &str = "READINESS_LOG_FORMAT";
const STRICT_ENV: &str = "READINESS_STRICT";

// =============================================================================
// CONFIG TYPES
// =============================================================================

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    fn parse(raw: &str) -> Result<Self, ReadinessError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(ReadinessError::ConfigError(format!(
                "{}={} (expected text or json)",
                LOG_FORMAT_ENV, other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub format: LogFormat,
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Text,
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssessmentConfig {
    /// Reject snapshots whose entity tag is missing or unknown.
    pub strict_entity_types: bool,
    /// Largest snapshot file accepted, in bytes.
    pub max_input_bytes: u64,
}

impl Default for AssessmentConfig {
    fn default() -> Self {
        Self {
            strict_entity_types: false,
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub assessment: AssessmentConfig,
}

// =============================================================================
// LOADING
// =============================================================================

impl AppConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ReadinessError> {
        toml::from_str(text).map_err(|e| ReadinessError::ConfigError(e.to_string()))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, `readiness.toml` in the
    /// working directory is used if present, otherwise defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ReadinessError> {
        let path: PathBuf = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.is_file() {
                    return Ok(Self::default());
                }
                default
            }
        };

        let text = std::fs::read_to_string(&path).map_err(|e| {
            ReadinessError::ConfigError(format!("Cannot read '{}': {}", path.display(), e))
        })?;
        Self::from_toml_str(&text)
    }

    /// Apply environment overrides from the process environment.
    pub fn with_env_overrides(self) -> Result<Self, ReadinessError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ReadinessError> {
        if let Some(raw) = lookup(LOG_FORMAT_ENV) {
            self.logging.format = LogFormat::parse(&raw)?;
        }

        if let Some(raw) = lookup(STRICT_ENV) {
            self.assessment.strict_entity_types = match raw.trim() {
                "1" | "true" | "TRUE" | "yes" => true,
                "0" | "false" | "FALSE" | "no" => false,
                other => {
                    return Err(ReadinessError::ConfigError(format!(
                        "{}={} (expected true or false)",
                        STRICT_ENV, other
                    )));
                }
            };
        }

        Ok(self)
    }
}

// =============================================================================
// TESTS
// =============================================================================
