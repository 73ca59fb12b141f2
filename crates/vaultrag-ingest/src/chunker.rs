//! Content chunking for RAG retrieval.
//!
//! Notes are first split along Markdown headings into sections. Sections longer
//! than the configured maximum are then cut into fixed-size, overlapping windows.
//! All sizes are counted in characters, not bytes.

use crate::error::{IngestError, IngestResult};
use tracing::debug;
use vaultrag_config::ChunkingConfig;
use vaultrag_core::{Chunk, Note};

const MAX_HEADING_LEVEL: usize = 6;

/// Configuration for chunking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkConfig {
    max_chunk_size: usize,
    overlap: usize,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            max_chunk_size: 500,
            overlap: 50,
        }
    }
}

impl ChunkConfig {
    /// Create a config, rejecting sizes that would never advance the window.
    pub fn new(max_chunk_size: usize, overlap: usize) -> IngestResult<Self> {
        if max_chunk_size == 0 {
            return Err(IngestError::InvalidChunkConfig(
                "max_chunk_size must be greater than 0".to_string(),
            ));
        }
        if overlap >= max_chunk_size {
            return Err(IngestError::InvalidChunkConfig(format!(
                "overlap ({}) must be smaller than max_chunk_size ({})",
                overlap, max_chunk_size
            )));
        }
        Ok(Self {
            max_chunk_size,
            overlap,
        })
    }

    /// Create config from the `[chunking]` settings.
    pub fn from_chunking_config(config: &ChunkingConfig) -> IngestResult<Self> {
        config.validate()?;
        Self::new(config.max_chunk_size, config.overlap)
    }

    pub fn max_chunk_size(&self) -> usize {
        self.max_chunk_size
    }

    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// Distance between the starts of consecutive windows. Always at least 1.
    pub fn step(&self) -> usize {
        self.max_chunk_size - self.overlap
    }
}

/// A run of body text under one heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section<'a> {
    /// Heading text without its `#` markers, empty before the first heading.
    pub heading: &'a str,
    pub text: &'a str,
}

/// Split a note body into sections at Markdown heading lines.
///
/// A heading line is 1-6 `#`, one space, and non-empty text. Sections come back flat
/// and in document order; sections without any non-whitespace text are dropped.
pub fn split_by_headings(body: &str) -> Vec<Section<'_>> {
    let mut sections = Vec::new();
    let mut heading = "";
    let mut text_start = 0;
    let mut offset = 0;

    for line in body.split_inclusive('\n') {
        if let Some(next_heading) = heading_text(line) {
            push_section(&mut sections, heading, &body[text_start..offset]);
            heading = next_heading;
            text_start = offset + line.len();
        }
        offset += line.len();
    }
    push_section(&mut sections, heading, &body[text_start..]);

    sections
}

fn push_section<'a>(sections: &mut Vec<Section<'a>>, heading: &'a str, text: &'a str) {
    if !text.trim().is_empty() {
        sections.push(Section { heading, text });
    }
}

fn heading_text(line: &str) -> Option<&str> {
    let line = line.strip_suffix('\n').unwrap_or(line);
    let line = line.strip_suffix('\r').unwrap_or(line);

    let level = line.len() - line.trim_start_matches('#').len();
    if !(1..=MAX_HEADING_LEVEL).contains(&level) {
        return None;
    }

    let text = line[level..].strip_prefix(' ')?;
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Content chunker for notes.
#[derive(Debug, Clone, Default)]
pub struct Chunker {
    config: ChunkConfig,
}

impl Chunker {
    /// Create a new chunker with the given configuration.
    pub fn new(config: ChunkConfig) -> Self {
        Self { config }
    }

    /// Create a chunker with default configuration.
    pub fn default_chunker() -> Self {
        Self::new(ChunkConfig::default())
    }

    /// Split a note into chunks: heading sections first, then fixed-size windows.
    pub fn chunk_note(&self, note: &Note) -> Vec<Chunk> {
        let sections = split_by_headings(&note.content);
        let chunks = self.split_sections(note, &sections);
        debug!(
            "Split '{}' into {} sections and {} chunks",
            note.path,
            sections.len(),
            chunks.len()
        );
        chunks
    }

    /// Turn sections into chunks carrying the note's metadata.
    ///
    /// Each section is walked in windows of `max_chunk_size` characters whose starts
    /// are `step` apart, so neighbouring windows share `overlap` characters. The walk
    /// stops at the first window that reaches the end of the section. Windows are
    /// trimmed and dropped when nothing but whitespace remains.
    pub fn split_sections(&self, note: &Note, sections: &[Section<'_>]) -> Vec<Chunk> {
        let mut chunks = Vec::new();

        for section in sections {
            for window in self.windows(section.text) {
                let text = window.trim();
                if !text.is_empty() {
                    chunks.push(Chunk::from_note(note, chunks.len(), section.heading, text));
                }
            }
        }

        chunks
    }

    fn windows<'a>(&self, text: &'a str) -> Vec<&'a str> {
        // Byte offset of every char start, plus the end of the text
        let bounds: Vec<usize> = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .collect();
        let char_count = bounds.len() - 1;

        let mut windows = Vec::new();
        let mut start = 0;
        while start < char_count {
            let end = (start + self.config.max_chunk_size).min(char_count);
            windows.push(&text[bounds[start]..bounds[end]]);
            // A later window would lie entirely inside this one
            if end == char_count {
                break;
            }
            start += self.config.step();
        }
        windows
    }
}
