//! Core domain types for vaultrag.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Set of tags attached to a note. Case-sensitive, deduplicated.
pub type TagSet = BTreeSet<String>;

/// A structured frontmatter value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Sequence(Vec<FieldValue>),
    Mapping(Frontmatter),
}

impl FieldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[FieldValue]> {
        match self {
            FieldValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Frontmatter> {
        match self {
            FieldValue::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Render a scalar as text. Sequences, mappings and null yield `None`.
    pub fn scalar_text(&self) -> Option<String> {
        match self {
            FieldValue::String(s) => Some(s.clone()),
            FieldValue::Integer(i) => Some(i.to_string()),
            FieldValue::Float(f) => Some(f.to_string()),
            FieldValue::Bool(b) => Some(b.to_string()),
            FieldValue::Null | FieldValue::Sequence(_) | FieldValue::Mapping(_) => None,
        }
    }
}

/// Insertion-ordered frontmatter mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frontmatter {
    fields: Vec<(String, FieldValue)>,
}

impl Frontmatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field. An existing key keeps its position and takes the new value.
    pub fn insert(&mut self, key: impl Into<String>, value: FieldValue) {
        let key = key.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for Frontmatter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// A parsed note from the vault.
#[derive(Debug, Clone, Serialize)]
pub struct Note {
    /// File name without its final extension.
    pub title: String,
    /// Slash-separated path relative to the vault root.
    pub path: String,
    pub frontmatter: Frontmatter,
    /// Shared with every chunk cut from this note.
    pub tags: Arc<TagSet>,
    /// Body text with the frontmatter block removed.
    pub content: String,
}

impl Note {
    pub fn new(title: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            path: path.into(),
            frontmatter: Frontmatter::default(),
            tags: Arc::new(TagSet::new()),
            content: String::new(),
        }
    }

    pub fn with_frontmatter(mut self, frontmatter: Frontmatter) -> Self {
        self.frontmatter = frontmatter;
        self
    }

    pub fn with_tags(mut self, tags: TagSet) -> Self {
        self.tags = Arc::new(tags);
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }
}

/// A chunk of note text ready for embedding.
#[derive(Debug, Clone, Serialize)]
pub struct Chunk {
    /// Position of this chunk within its note, starting at 0.
    pub chunk_index: usize,
    pub text: String,
    /// Path of the owning note.
    pub source: String,
    pub note_title: String,
    /// Nearest enclosing heading, empty when there is none.
    pub heading: String,
    pub tags: Arc<TagSet>,
}

impl Chunk {
    /// Create a chunk that inherits its metadata from `note`.
    pub fn from_note(
        note: &Note,
        chunk_index: usize,
        heading: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            chunk_index,
            text: text.into(),
            source: note.path.clone(),
            note_title: note.title.clone(),
            heading: heading.into(),
            tags: Arc::clone(&note.tags),
        }
    }

    /// Serialize as a single JSON line for hand-off to an indexer.
    pub fn to_json_line(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
