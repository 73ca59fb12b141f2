//! Vault ingestion: read every note, then chunk it.

use crate::chunker::Chunker;
use crate::error::IngestResult;
use crate::reader::{VaultFile, VaultReader};
use tracing::{debug, info};
use vaultrag_core::{Chunk, Note};

/// Everything produced by one ingestion run.
#[derive(Debug, Default)]
pub struct IngestReport {
    pub notes: Vec<Note>,
    /// Chunks of all notes, grouped by note in note order.
    pub chunks: Vec<Chunk>,
    /// Notes that produced no chunks (empty or whitespace-only bodies).
    pub empty_notes: usize,
    /// Notes whose frontmatter was malformed and was read as body text.
    pub frontmatter_errors: usize,
}

/// Runs the read-parse-chunk pipeline over a vault.
pub struct Ingestor {
    reader: VaultReader,
    chunker: Chunker,
}

impl Ingestor {
    /// Create a new ingestor.
    pub fn new(reader: VaultReader, chunker: Chunker) -> Self {
        Self { reader, chunker }
    }

    /// List the files a run would ingest.
    pub fn discover(&self) -> IngestResult<Vec<VaultFile>> {
        self.reader.discover()
    }

    /// Ingest the whole vault.
    pub fn run(&self) -> IngestResult<IngestReport> {
        let files = self.discover()?;
        self.run_files(&files, |_| {})
    }

    /// Ingest the given files, calling `on_file` after each one.
    pub fn run_files<F>(&self, files: &[VaultFile], mut on_file: F) -> IngestResult<IngestReport>
    where
        F: FnMut(&VaultFile),
    {
        let mut report = IngestReport::default();

        for file in files {
            let parsed = self.reader.read_note(file)?;
            if parsed.frontmatter_error.is_some() {
                report.frontmatter_errors += 1;
            }

            let chunks = self.chunker.chunk_note(&parsed.note);
            if chunks.is_empty() {
                debug!("No chunks for {}", file.relative_path);
                report.empty_notes += 1;
            }

            report.chunks.extend(chunks);
            report.notes.push(parsed.note);
            on_file(file);
        }

        info!(
            "Ingested {} notes into {} chunks ({} empty, {} with bad frontmatter)",
            report.notes.len(),
            report.chunks.len(),
            report.empty_notes,
            report.frontmatter_errors
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunker::ChunkConfig;
    use std::fs;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn ingestor(root: &std::path::Path, max_chunk_size: usize, overlap: usize) -> Ingestor {
        let config = ChunkConfig::new(max_chunk_size, overlap).unwrap();
        Ingestor::new(VaultReader::new(root).unwrap(), Chunker::new(config))
    }

    #[test]
    fn test_run_over_vault() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::write(
            root.join("a.md"),
            "---\ntags: [rag]\n---\n# First\nContent one\n# Second\nContent two",
        )
        .unwrap();
        fs::write(root.join("b.md"), format!("# Big\n{}", "x".repeat(800))).unwrap();
        fs::write(root.join("empty.md"), "  \n\n").unwrap();
        fs::write(root.join("broken.md"), "---\n: :\n  - [\n---\nBody #kept").unwrap();

        let report = ingestor(root, 500, 50).run().unwrap();

        assert_eq!(report.notes.len(), 4);
        assert_eq!(report.empty_notes, 1);
        assert_eq!(report.frontmatter_errors, 1);

        let a_chunks: Vec<&Chunk> = report.chunks.iter().filter(|c| c.source == "a.md").collect();
        assert_eq!(a_chunks.len(), 2);
        assert_eq!(a_chunks[0].heading, "First");
        assert!(a_chunks[0].tags.contains("rag"));

        let b_chunks: Vec<&Chunk> = report.chunks.iter().filter(|c| c.source == "b.md").collect();
        assert_eq!(b_chunks.len(), 2);
        assert!(b_chunks.iter().all(|c| c.text.chars().count() <= 500));

        // Chunks follow note order
        let sources: Vec<&str> = report.chunks.iter().map(|c| c.source.as_str()).collect();
        let mut sorted = sources.clone();
        sorted.sort();
        assert_eq!(sources, sorted);
    }

    #[test]
    fn test_chunks_share_note_tags() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("n.md"),
            format!("# H\n{} #shared", "y".repeat(300)),
        )
        .unwrap();

        let report = ingestor(dir.path(), 100, 10).run().unwrap();
        let note = &report.notes[0];

        assert!(report.chunks.len() > 1);
        for chunk in &report.chunks {
            assert!(Arc::ptr_eq(&chunk.tags, &note.tags));
            assert_eq!(chunk.note_title, note.title);
            assert_eq!(chunk.source, note.path);
        }
    }

    #[test]
    fn test_progress_callback() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("one.md"), "1").unwrap();
        fs::write(dir.path().join("two.md"), "2").unwrap();

        let ingestor = ingestor(dir.path(), 500, 50);
        let files = ingestor.discover().unwrap();
        let mut seen = Vec::new();
        ingestor
            .run_files(&files, |f| seen.push(f.relative_path.clone()))
            .unwrap();

        assert_eq!(seen, vec!["one.md", "two.md"]);
    }
}
