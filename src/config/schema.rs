//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::handler::{DataFormat, DEFAULT_GREETING};

/// Root configuration for the redirect service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Structured redirect source read at startup.
    pub mappings: MappingSourceConfig,

    /// Static redirect table consulted after the structured source.
    pub redirects: StaticRedirects,

    /// Response for unmatched paths.
    pub greeting: GreetingConfig,

    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Location and format of the structured redirect source.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MappingSourceConfig {
    /// Path to the YAML or JSON file.
    pub path: PathBuf,

    /// Explicit format. Inferred from the file extension when absent.
    pub format: Option<DataFormat>,
}

impl MappingSourceConfig {
    /// Replace the configured source with command-line values, where given.
    pub fn apply_overrides(&mut self, path: Option<PathBuf>, format: Option<DataFormat>) {
        if let Some(path) = path {
            self.path = path;
        }
        if format.is_some() {
            self.format = format;
        }
    }

    /// The format to parse the source with.
    pub fn effective_format(&self) -> DataFormat {
        self.format
            .unwrap_or_else(|| DataFormat::from_path(&self.path))
    }
}

impl Default for MappingSourceConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("url.yml"),
            format: None,
        }
    }
}

/// Static path → URL table.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(transparent)]
pub struct StaticRedirects(pub HashMap<String, String>);

impl Default for StaticRedirects {
    fn default() -> Self {
        Self(HashMap::from([
            (
                "/urlshort-godoc".to_string(),
                "https://godoc.org/github.com/gophercises/urlshort".to_string(),
            ),
            (
                "/yaml-godoc".to_string(),
                "https://godoc.org/gopkg.in/yaml.v2".to_string(),
            ),
        ]))
    }
}

/// Default handler settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GreetingConfig {
    /// Plain-text body served for unmatched paths.
    pub body: String,
}

impl Default for GreetingConfig {
    fn default() -> Self {
        Self {
            body: DEFAULT_GREETING.to_string(),
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    pub level: String,

    /// Output format.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "urlshort=info,tower_http=info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Log line format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}
