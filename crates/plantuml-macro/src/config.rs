//! Process-wide configuration fallbacks.
//!
//! Parsed from a `[plantuml]` TOML section. Consulted only when the
//! per-invocation parameters omit a value.

use plantuml_render::{DEFAULT_COMMAND, DiagramFormat, Transcoder};
use serde::Deserialize;

use crate::params::{MacroParameters, lenient_format};

/// Configuration loading failure.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Process-wide PlantUML macro configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlantUmlConfig {
    /// Default remote server URL. When neither this nor the macro
    /// parameter is set, diagrams render through the local executable.
    pub server_url: Option<String>,
    /// Default output format; unknown names fall back to PNG.
    #[serde(deserialize_with = "lenient_format")]
    pub format: Option<DiagramFormat>,
    /// Local renderer executable (default `plantuml`).
    pub command: Option<String>,
    /// Remote payload encoding strategy. `huffman` parses but is rejected
    /// when a diagram is rendered; see [`Transcoder`].
    pub encoding: Transcoder,
}

/// TOML document wrapper: configuration lives under `[plantuml]`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigDocument {
    plantuml: PlantUmlConfig,
}

impl PlantUmlConfig {
    /// Parse the `[plantuml]` section out of a TOML document.
    ///
    /// A missing section yields the defaults.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let document: ConfigDocument = toml::from_str(text)?;
        Ok(document.plantuml)
    }

    /// Resolve the server URL for one invocation: parameters first, then
    /// the configured default.
    #[must_use]
    pub fn resolve_server(&self, params: &MacroParameters) -> Option<String> {
        params.server.clone().or_else(|| self.server_url.clone())
    }

    /// Resolve the output format: parameters, then config, then PNG.
    #[must_use]
    pub fn resolve_format(&self, params: &MacroParameters) -> DiagramFormat {
        params.format.or(self.format).unwrap_or_default()
    }

    /// Local renderer executable.
    #[must_use]
    pub fn command(&self) -> &str {
        self.command.as_deref().unwrap_or(DEFAULT_COMMAND)
    }
}
