//! YAML frontmatter splitting.
//!
//! A document may open with a `---` delimited YAML header:
//!
//! ```text
//! ---
//! title: Getting Started
//! sidebar_position: 2
//! slug: /start
//! ---
//!
//! # Getting Started
//! ```
//!
//! [`split`] returns the header as [`Metadata`] and everything after the
//! closing delimiter line as the body. A file without a complete header comes
//! back with empty metadata and its text untouched.

use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// Metadata key holding the position of a page in its directory's sidebar.
pub const ORDERING_KEY: &str = "sidebar_position";
/// Metadata key holding the page's previously published URL.
pub const LEGACY_PATH_KEY: &str = "slug";

#[derive(Error, Debug)]
pub enum FrontmatterError {
    #[error("invalid YAML frontmatter: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("frontmatter must be a mapping of keys to values")]
    NotAMapping,
    #[error("frontmatter value cannot be represented: {0}")]
    Value(#[from] serde_json::Error),
}

/// Parsed frontmatter fields, keyed by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    fields: BTreeMap<String, Value>,
}

impl Metadata {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The sidebar ordering key, if declared as a finite number (or numeric
    /// string). Fractional positions like `1.5` are common for slotting a page
    /// between two others.
    pub fn sidebar_position(&self) -> Option<f64> {
        let position = match self.fields.get(ORDERING_KEY)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }?;
        position.is_finite().then_some(position)
    }

    /// The legacy published path, if declared as a string.
    pub fn slug(&self) -> Option<&str> {
        self.fields.get(LEGACY_PATH_KEY)?.as_str()
    }
}

impl From<BTreeMap<String, Value>> for Metadata {
    fn from(fields: BTreeMap<String, Value>) -> Self {
        Self { fields }
    }
}

/// A document split into its frontmatter and body.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub metadata: Metadata,
    pub body: String,
}

/// Split raw document text into metadata and body.
pub fn split(raw: &str) -> Result<Document, FrontmatterError> {
    let Some((yaml, body)) = find_header(raw) else {
        return Ok(Document {
            metadata: Metadata::default(),
            body: raw.to_string(),
        });
    };

    Ok(Document {
        metadata: parse_yaml(yaml)?,
        body: body.to_string(),
    })
}

/// Locate the header block. Returns `(yaml, body)` slices of `raw`.
fn find_header(raw: &str) -> Option<(&str, &str)> {
    let text = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let mut lines = text.split_inclusive('\n');

    let first = lines.next()?;
    if first.trim_end() != "---" {
        return None;
    }

    let yaml_start = first.len();
    let mut offset = yaml_start;
    for line in lines {
        if line.trim_end() == "---" {
            return Some((&text[yaml_start..offset], &text[offset + line.len()..]));
        }
        offset += line.len();
    }

    None
}

fn parse_yaml(yaml: &str) -> Result<Metadata, FrontmatterError> {
    if yaml.trim().is_empty() {
        return Ok(Metadata::default());
    }

    let yaml_value: serde_yaml::Value = serde_yaml::from_str(yaml)?;
    match serde_json::to_value(yaml_value)? {
        Value::Object(map) => Ok(Metadata::from(map.into_iter().collect::<BTreeMap<_, _>>())),
        Value::Null => Ok(Metadata::default()),
        _ => Err(FrontmatterError::NotAMapping),
    }
}
