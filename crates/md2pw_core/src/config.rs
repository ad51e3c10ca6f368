//! Converter configuration.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use jsonschema::Validator;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ConvertError;

// Embed the schema
const SCHEMA_JSON: &str = include_str!("../../../schemas/v1/config.json");
static CONFIG_SCHEMA: OnceLock<Result<Validator, String>> = OnceLock::new();

/// Config file names searched by [`ConverterConfig::discover`], in order.
pub const CONFIG_FILES: &[&str] = &[".md2pw.json", "md2pw.json"];

/// Deepest heading and list level PukiWiki markup can express.
pub const MAX_WIKI_LEVEL: u8 = 3;

/// Configuration for the converter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConverterConfig {
    /// Editor hint, ignored.
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Headings deeper than this are left as Markdown.
    #[serde(default = "default_level")]
    pub max_heading_level: u8,

    /// List nesting is clamped to this depth.
    #[serde(default = "default_level")]
    pub max_list_depth: u8,

    /// When set, the line under a table header is only dropped if it
    /// looks like a delimiter row.
    #[serde(default)]
    pub verify_table_separator: bool,

    /// File this configuration was read from, if any.
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

fn default_level() -> u8 {
    MAX_WIKI_LEVEL
}

impl ConverterConfig {
    pub fn new() -> Self {
        Self {
            schema: None,
            max_heading_level: MAX_WIKI_LEVEL,
            max_list_depth: MAX_WIKI_LEVEL,
            verify_table_separator: false,
            source_path: None,
        }
    }

    /// Loads configuration from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConvertError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ConvertError::config(format!("Failed to read config {}: {}", path.display(), e))
        })?;

        let mut config = Self::from_json(&content)?;
        config.source_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Parses configuration from a JSON string, validating it against the
    /// embedded schema first.
    pub fn from_json(json: &str) -> Result<Self, ConvertError> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| ConvertError::config(format!("Invalid JSON: {}", e)))?;

        let schema = CONFIG_SCHEMA
            .get_or_init(|| {
                let schema_json: serde_json::Value = serde_json::from_str(SCHEMA_JSON)
                    .map_err(|e| format!("embedded config schema is not JSON: {}", e))?;
                Validator::new(&schema_json)
                    .map_err(|e| format!("embedded config schema does not compile: {}", e))
            })
            .as_ref()
            .map_err(|e| ConvertError::internal(e.clone()))?;

        if let Err(e) = schema.validate(&value) {
            return Err(ConvertError::config(format!(
                "Config validation failed: {} at {}",
                e,
                e.instance_path()
            )));
        }

        serde_json::from_value(value)
            .map_err(|e| ConvertError::config(format!("Invalid config: {}", e)))
    }

    /// Looks for one of [`CONFIG_FILES`] directly inside `dir`.
    ///
    /// Returns `Ok(None)` when no config file exists.
    pub fn discover(dir: impl AsRef<Path>) -> Result<Option<Self>, ConvertError> {
        let dir = dir.as_ref();
        for name in CONFIG_FILES {
            let candidate = dir.join(name);
            match fs::metadata(&candidate) {
                Ok(meta) if meta.is_file() => {
                    debug!("Using config {}", candidate.display());
                    return Self::from_file(&candidate).map(Some);
                }
                Ok(_) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(None)
    }
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self::new()
    }
}
