//! YAML frontmatter detection and parsing.
//!
//! Frontmatter is a block at the very start of a note delimited by `---` lines:
//! ```markdown
//! ---
//! tags:
//!   - rust
//! ---
//! # Note body
//! ```

use serde_yaml::Value;
use thiserror::Error;
use tracing::debug;
use vaultrag_core::{FieldValue, Frontmatter};

const DELIMITER: &str = "---";

/// Errors that can occur while parsing a frontmatter block.
#[derive(Debug, Error)]
pub enum FrontmatterParseError {
    #[error("invalid YAML frontmatter: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    #[error("frontmatter is a {0}, not a mapping")]
    NotAMapping(&'static str),
}

/// Outcome of looking for a frontmatter block.
#[derive(Debug)]
pub enum FrontmatterSplit<'a> {
    /// The text does not open with a delimiter line.
    Absent,
    /// An opening delimiter with no closing one.
    Unclosed,
    /// A well-formed block and the body that follows it.
    Parsed {
        frontmatter: Frontmatter,
        body: &'a str,
    },
    /// A closed block that did not parse as a YAML mapping.
    Invalid(FrontmatterParseError),
}

/// Separate a leading frontmatter block from the note body.
///
/// The line break after the closing delimiter is consumed, so `body` starts at the
/// first line following it.
pub fn split_frontmatter(text: &str) -> FrontmatterSplit<'_> {
    let mut lines = text.split_inclusive('\n');

    let opening = match lines.next() {
        Some(line) if is_delimiter(line) => line,
        _ => return FrontmatterSplit::Absent,
    };

    let mut offset = opening.len();
    for line in lines {
        if is_delimiter(line) {
            let yaml = &text[opening.len()..offset];
            let body = &text[offset + line.len()..];
            return match parse_block(yaml) {
                Ok(frontmatter) => FrontmatterSplit::Parsed { frontmatter, body },
                Err(err) => FrontmatterSplit::Invalid(err),
            };
        }
        offset += line.len();
    }

    FrontmatterSplit::Unclosed
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end() == DELIMITER
}

fn parse_block(yaml: &str) -> Result<Frontmatter, FrontmatterParseError> {
    if yaml.trim().is_empty() {
        return Ok(Frontmatter::default());
    }

    match untag(serde_yaml::from_str(yaml)?) {
        Value::Mapping(mapping) => Ok(convert_mapping(mapping)),
        // A block holding only comments
        Value::Null => Ok(Frontmatter::default()),
        Value::Bool(_) => Err(FrontmatterParseError::NotAMapping("boolean")),
        Value::Number(_) => Err(FrontmatterParseError::NotAMapping("number")),
        Value::String(_) => Err(FrontmatterParseError::NotAMapping("string")),
        Value::Sequence(_) => Err(FrontmatterParseError::NotAMapping("sequence")),
        Value::Tagged(_) => Err(FrontmatterParseError::NotAMapping("tagged value")),
    }
}

fn untag(value: Value) -> Value {
    match value {
        Value::Tagged(tagged) => untag(tagged.value),
        other => other,
    }
}

fn convert_mapping(mapping: serde_yaml::Mapping) -> Frontmatter {
    let mut frontmatter = Frontmatter::new();
    for (key, value) in mapping {
        match key_text(key) {
            Some(key) => frontmatter.insert(key, convert_value(value)),
            None => debug!("Skipping frontmatter entry with a non-scalar key"),
        }
    }
    frontmatter
}

fn key_text(key: Value) -> Option<String> {
    match untag(key) {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some("null".to_string()),
        _ => None,
    }
}

fn convert_value(value: Value) -> FieldValue {
    match value {
        Value::Null => FieldValue::Null,
        Value::Bool(b) => FieldValue::Bool(b),
        Value::Number(n) => n
            .as_i64()
            .map(FieldValue::Integer)
            .or_else(|| n.as_f64().map(FieldValue::Float))
            .unwrap_or_else(|| FieldValue::String(n.to_string())),
        Value::String(s) => FieldValue::String(s),
        Value::Sequence(items) => FieldValue::Sequence(items.into_iter().map(convert_value).collect()),
        Value::Mapping(mapping) => FieldValue::Mapping(convert_mapping(mapping)),
        Value::Tagged(tagged) => convert_value(tagged.value),
    }
}
