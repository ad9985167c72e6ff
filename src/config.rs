//! Layered configuration.
//!
//! Sources are applied in order, later ones winning:
//!
//! 1. Built-in defaults
//! 2. An optional TOML file
//! 3. Environment variables prefixed `PHOTONQL_`, nested with `__`
//!    (e.g. `PHOTONQL_OUTPUT__PRETTY=true`)
//!
//! # Example
//!
//! ```toml
//! [output]
//! pretty = true
//!
//! [validation]
//! enabled = true
//! operand_shapes = true
//! ```

use crate::error::Result;
use crate::predicate::{Document, ValidationRules, Validator};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "PHOTONQL";

/// Document encoding options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Indented JSON instead of a single line
    pub pretty: bool,
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub output: OutputConfig,
    pub validation: ValidationRules,
}

impl Config {
    /// Load defaults, then `path` (if given), then the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = ::config::Config::builder();

        if let Some(path) = path {
            info!(path = %path.display(), "Loading configuration file");
            builder = builder
                .add_source(::config::File::from(path).format(::config::FileFormat::Toml));
        }

        let config: Config = builder
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        debug!(?config, "Configuration loaded");
        Ok(config)
    }

    /// Effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Encodes `document` as JSON in the configured style.
    pub fn encode(&self, document: &Document) -> Result<String> {
        if self.output.pretty {
            document.to_json_pretty()
        } else {
            document.to_json()
        }
    }

    /// A validator when validation is enabled.
    pub fn validator(&self) -> Option<Validator> {
        self.validation
            .enabled
            .then(|| Validator::new(self.validation.clone()))
    }
}
