//! Vault discovery and note reading.

use crate::error::{IngestError, IngestResult};
use crate::parser::{parse_note_with_report, NoteParse};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};
use vaultrag_core::Note;
use walkdir::WalkDir;

/// A markdown file discovered in the vault.
#[derive(Debug, Clone)]
pub struct VaultFile {
    pub absolute_path: PathBuf,
    /// Slash-separated path relative to the vault root.
    pub relative_path: String,
}

/// Reads and parses the notes of an Obsidian vault.
#[derive(Debug)]
pub struct VaultReader {
    root: PathBuf,
}

impl VaultReader {
    /// Create a reader for the vault at `root`.
    pub fn new(root: impl AsRef<Path>) -> IngestResult<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(IngestError::VaultNotFound(root.to_path_buf()));
        }

        Ok(Self {
            root: root.canonicalize()?,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// List every note file, sorted by relative path.
    ///
    /// Skips anything under a path segment starting with `.` or `_` or containing
    /// `Excalidraw`, and anything that is not a `.md` file.
    pub fn discover(&self) -> IngestResult<Vec<VaultFile>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(&self.root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_excluded_name(&e.file_name().to_string_lossy()))
        {
            let entry = entry.map_err(|source| IngestError::Walk {
                root: self.root.clone(),
                source,
            })?;

            let path = entry.path();
            if !entry.file_type().is_file() || !is_markdown_file(path) {
                continue;
            }

            let relative = path.strip_prefix(&self.root).unwrap_or(path);
            files.push(VaultFile {
                absolute_path: path.to_path_buf(),
                relative_path: to_slash_path(relative),
            });
        }

        files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        debug!("Discovered {} notes under {}", files.len(), self.root.display());
        Ok(files)
    }

    /// Read and parse a single discovered file.
    pub fn read_note(&self, file: &VaultFile) -> IngestResult<NoteParse> {
        let raw = std::fs::read(&file.absolute_path).map_err(|source| IngestError::Read {
            path: file.absolute_path.clone(),
            source,
        })?;
        Ok(parse_note_with_report(&raw, &file.relative_path))
    }

    /// Read and parse every note in the vault.
    pub fn read_all_notes(&self) -> IngestResult<Vec<Note>> {
        let files = self.discover()?;
        let notes = files
            .iter()
            .map(|file| self.read_note(file).map(|parsed| parsed.note))
            .collect::<IngestResult<Vec<_>>>()?;

        info!("Read {} notes from {}", notes.len(), self.root.display());
        Ok(notes)
    }
}

fn is_excluded_name(name: &str) -> bool {
    name.starts_with('.') || name.starts_with('_') || name.contains("Excalidraw")
}

fn is_markdown_file(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()).is_some_and(|e| e == "md")
}

fn to_slash_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
