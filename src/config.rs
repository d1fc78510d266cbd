//! Converter configuration.
//!
//! Handles loading, validating, and merging `convert.toml`. Every key is
//! optional: the file is merged over stock defaults, so it only needs the
//! values that differ.
//!
//! ## Configuration Options
//!
//! ```toml
//! source = "docs-old/docs"          # Docusaurus docs tree
//! destination = "src/content"       # Nextra content tree (deleted and rebuilt)
//! redirects_file = "redirects.json" # Where the redirect list is written
//! admonitions = "callout"           # "callout" or "remove"
//! manifest_file = "_meta.js"        # Per-directory navigation manifest
//! output_extension = "mdx"          # Extension of converted documents
//! extensions = ["md", "mdx"]        # Source extensions treated as documents
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::convert::ConvertOptions;
use crate::rewrite::AdmonitionMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file looked up in the working directory when `--config` is absent.
pub const CONFIG_FILE: &str = "convert.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Converter configuration loaded from `convert.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConvertConfig {
    /// Docusaurus docs directory to read.
    pub source: PathBuf,
    /// Nextra content directory to (re)build.
    pub destination: PathBuf,
    /// JSON file receiving the redirect list.
    pub redirects_file: PathBuf,
    /// Convert admonitions to callouts, or drop them.
    pub admonitions: AdmonitionMode,
    /// Manifest file name written in each output directory.
    pub manifest_file: String,
    /// Extension of every converted document.
    pub output_extension: String,
    /// Source file extensions treated as documents.
    pub extensions: Vec<String>,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        let options = ConvertOptions::default();
        Self {
            source: PathBuf::from("docs-old/docs"),
            destination: PathBuf::from("src/content"),
            redirects_file: PathBuf::from("redirects.json"),
            admonitions: options.admonitions,
            manifest_file: options.manifest_file,
            output_extension: options.output_extension,
            extensions: options.extensions,
        }
    }
}

impl ConvertConfig {
    /// Validate values that would otherwise produce a broken output tree.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "extensions must not be empty".into(),
            ));
        }
        if self.extensions.iter().any(|e| e.is_empty() || e.contains('.')) {
            return Err(ConfigError::Validation(
                "extensions must be bare, non-empty extensions like \"md\"".into(),
            ));
        }
        check_file_name("manifest_file", &self.manifest_file)?;
        check_file_name("output_extension", &self.output_extension)?;
        Ok(())
    }

    /// The walk options this config selects.
    pub fn options(&self) -> ConvertOptions {
        ConvertOptions {
            admonitions: self.admonitions,
            manifest_file: self.manifest_file.clone(),
            output_extension: self.output_extension.clone(),
            extensions: self.extensions.clone(),
        }
    }
}

fn check_file_name(key: &str, value: &str) -> Result<(), ConfigError> {
    if value.is_empty() || value.contains(['/', '\\']) {
        return Err(ConfigError::Validation(format!(
            "{key} must be a non-empty name without path separators"
        )));
    }
    Ok(())
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(ConvertConfig::default()).expect("default config must serialize")
}

/// Overlay the keys of `overlay` onto `base`.
///
/// The config has no nested tables, so each key present in `overlay` replaces
/// the base value outright (lists included) and every other key keeps its
/// base value. A non-table overlay replaces `base` entirely.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                base_table.insert(key, value);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto the stock defaults, deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<ConvertConfig, ConfigError> {
    let base = stock_defaults_value();
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: ConvertConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `path`, falling back to defaults when it does not exist.
pub fn load_config(path: &Path) -> Result<ConvertConfig, ConfigError> {
    resolve_config(load_raw_config(path)?)
}

/// Returns a fully-commented stock `convert.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# docs-migrate configuration
# ==========================
# All settings are optional. Values shown below are the defaults.
# Command-line flags (--source, --destination, --redirects) override them.
# Unknown keys will cause an error.

# Docusaurus docs directory to convert.
source = "docs-old/docs"

# Nextra content directory. Deleted and rebuilt on every run.
destination = "src/content"

# JSON file receiving the list of {source, destination, permanent} redirects
# for pages that declared a `slug` in their frontmatter.
redirects_file = "redirects.json"

# What to do with :::note / :::tip / ... admonition blocks:
#   "callout" - rewrite as > [!NOTE] style callouts
#   "remove"  - delete the block and its content
admonitions = "callout"

# Navigation manifest written into every output directory.
manifest_file = "_meta.js"

# Extension of every converted document.
output_extension = "mdx"

# Source files with these extensions are converted; everything else is ignored.
extensions = ["md", "mdx"]
"##
}
