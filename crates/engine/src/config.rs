//! Serializer settings via `propbag.toml`
//!
//! Settings are a plain value handed to the engine (and through it to a bag
//! factory). There is no global switch to flip: two factories built from
//! different settings behave independently.
//!
//! Converters are code, not configuration, so they are never read from or
//! written to TOML. Every settings value starts with the standard converters
//! registered; use [`SerializerSettings::with_converter`] to add more.

use crate::converter::{ConverterRegistry, ValueConverter};
use propbag_core::{Error, Result, MAX_ARRAY_SIZE, MAX_NESTING_DEPTH};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Conventional settings file name.
pub const SETTINGS_FILE_NAME: &str = "propbag.toml";

/// What to do with null-valued object properties on output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NullValueHandling {
    /// Write `null` properties
    #[default]
    Include,
    /// Omit `null` properties, at any depth
    Ignore,
}

/// Whether the engine claims bare date strings itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateParseHandling {
    /// Date-like strings are ordinary strings; converters may read them
    #[default]
    None,
    /// Date-like strings belong to the engine; converters must not reinterpret them
    DateTime,
}

/// Output layout for stringified documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Formatting {
    /// No extraneous whitespace
    #[default]
    Compact,
    /// Two-space indented
    Indented,
}

/// Engine settings loaded from `propbag.toml`.
///
/// # Example
///
/// ```toml
/// null_value_handling = "ignore"
/// formatting = "compact"
/// max_depth = 64
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerializerSettings {
    /// Null property handling on output.
    #[serde(default)]
    pub null_value_handling: NullValueHandling,
    /// Date string ownership on input.
    #[serde(default)]
    pub date_parse_handling: DateParseHandling,
    /// Output layout.
    #[serde(default)]
    pub formatting: Formatting,
    /// Maximum nesting depth accepted in a document.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    /// Maximum element count of any array in a document.
    #[serde(default = "default_max_array_size")]
    pub max_array_size: usize,
    #[serde(skip, default = "ConverterRegistry::standard")]
    pub(crate) converters: ConverterRegistry,
}

fn default_max_depth() -> usize {
    MAX_NESTING_DEPTH
}

fn default_max_array_size() -> usize {
    MAX_ARRAY_SIZE
}

impl Default for SerializerSettings {
    fn default() -> Self {
        Self {
            null_value_handling: NullValueHandling::default(),
            date_parse_handling: DateParseHandling::default(),
            formatting: Formatting::default(),
            max_depth: default_max_depth(),
            max_array_size: default_max_array_size(),
            converters: ConverterRegistry::standard(),
        }
    }
}

impl SerializerSettings {
    /// Register an additional converter. Later registrations win.
    pub fn with_converter(mut self, converter: Arc<dyn ValueConverter>) -> Self {
        self.converters.register(converter);
        self
    }

    /// Drop every registered converter, including the standard ones.
    pub fn without_converters(mut self) -> Self {
        self.converters = ConverterRegistry::new();
        self
    }

    /// Set null handling.
    pub fn with_null_value_handling(mut self, handling: NullValueHandling) -> Self {
        self.null_value_handling = handling;
        self
    }

    /// Set date parse handling.
    pub fn with_date_parse_handling(mut self, handling: DateParseHandling) -> Self {
        self.date_parse_handling = handling;
        self
    }

    /// Set output formatting.
    pub fn with_formatting(mut self, formatting: Formatting) -> Self {
        self.formatting = formatting;
        self
    }

    /// Set the document limits.
    pub fn with_limits(mut self, max_depth: usize, max_array_size: usize) -> Self {
        self.max_depth = max_depth;
        self.max_array_size = max_array_size;
        self
    }

    /// Registered converters.
    pub fn converters(&self) -> &ConverterRegistry {
        &self.converters
    }

    /// Check the numeric limits.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if a limit is zero.
    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(Error::Config("max_depth must be at least 1".to_string()));
        }
        if self.max_array_size == 0 {
            return Err(Error::Config(
                "max_array_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns the default settings file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# propbag serializer settings
#
# Null properties on output: "include" (default) or "ignore"
#   "include" = write "key": null
#   "ignore"  = omit null-valued properties at every depth
null_value_handling = "include"

# Date strings on input: "none" (default) or "date_time"
#   "none"      = bare ISO-8601 strings may be read as timestamps
#   "date_time" = the engine owns date strings; the timestamp
#                 converter only accepts its object form
date_parse_handling = "none"

# Output layout: "compact" (default) or "indented"
formatting = "compact"

# Document limits
max_depth = 100
max_array_size = 1000000
"#
    }

    /// Parse settings from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the text is not valid settings TOML.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let settings: SerializerSettings = toml::from_str(text)
            .map_err(|e| Error::Config(format!("Failed to parse settings: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read and parse settings from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "Failed to read settings file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let settings: SerializerSettings = toml::from_str(&content).map_err(|e| {
            Error::Config(format!(
                "Failed to parse settings file '{}': {}",
                path.display(),
                e
            ))
        })?;
        settings.validate()?;
        debug!(
            target: "propbag::engine",
            path = %path.display(),
            null_value_handling = ?settings.null_value_handling,
            formatting = ?settings.formatting,
            "Loaded serializer settings"
        );
        Ok(settings)
    }

    /// Serialize these settings to TOML. Converters are not included.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize settings: {}", e)))
    }

    /// Serialize these settings to TOML and write them to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| {
            Error::Config(format!(
                "Failed to write settings file '{}': {}",
                path.display(),
                e
            ))
        })
    }
}
