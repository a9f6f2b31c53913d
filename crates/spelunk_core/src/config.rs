//! Spelunker configuration.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use spelunk_reflect::ReflectError;
use tracing::debug;

use crate::handlers::Builtin;
use crate::spelunker::{DEFAULT_TAG, Spelunker};
use crate::SpelunkError;

/// Declarative spelunker setup: a tag name plus directive keys bound to
/// built-in handlers.
///
/// ```json
/// {
///   "tag": "sanitize",
///   "handlers": { "trim": "trim", "at_least": "min" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpelunkerConfig {
    /// Tag whose annotations are read.
    #[serde(default = "default_tag")]
    pub tag: String,

    /// Directive key to built-in handler.
    #[serde(default)]
    pub handlers: BTreeMap<String, Builtin>,
}

fn default_tag() -> String {
    DEFAULT_TAG.to_string()
}

impl Default for SpelunkerConfig {
    fn default() -> Self {
        Self {
            tag: default_tag(),
            handlers: BTreeMap::new(),
        }
    }
}

impl SpelunkerConfig {
    /// Creates a configuration with the default tag and no handlers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds every built-in under its conventional key.
    pub fn with_builtins() -> Self {
        Self {
            handlers: Builtin::ALL
                .into_iter()
                .map(|builtin| (builtin.key().to_string(), builtin))
                .collect(),
            ..Self::default()
        }
    }

    /// Loads configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SpelunkError> {
        let path = path.as_ref();
        debug!("Loading spelunker config from {}", path.display());
        let content = fs::read_to_string(path)
            .map_err(|e| SpelunkError::config(format!("Failed to read config: {}", e)))?;
        Self::from_json(&content)
    }

    /// Parses configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, SpelunkError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| SpelunkError::config(format!("Invalid config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), SpelunkError> {
        if self.tag.trim().is_empty() {
            return Err(SpelunkError::config("Tag must not be empty"));
        }
        if let Some(key) = self.handlers.keys().find(|key| key.trim() != key.as_str()) {
            return Err(SpelunkError::config(format!(
                "Handler key '{}' has surrounding whitespace and would never match",
                key
            )));
        }
        Ok(())
    }
}

impl<E> Spelunker<E>
where
    E: From<ReflectError> + From<SpelunkError> + 'static,
{
    /// Builds a spelunker from configuration.
    pub fn from_config(config: &SpelunkerConfig) -> Self {
        let mut spelunker = Self::default();
        spelunker.set_tag(config.tag.clone());
        for (key, builtin) in &config.handlers {
            spelunker.insert_handler(key.clone(), builtin.handler());
        }
        spelunker
    }
}
