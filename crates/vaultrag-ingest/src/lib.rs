//! Vaultrag Ingest - Obsidian vault parsing and chunking.
//!
//! This crate provides:
//! - Note parsing (title, path, YAML frontmatter, body)
//! - Tag extraction from frontmatter and inline `#tags`
//! - Heading-based sectioning with fixed-size fallback chunking
//! - Vault discovery and a read-then-chunk ingestion pipeline

mod chunker;
mod error;
mod frontmatter;
mod ingestor;
mod parser;
mod reader;
mod tags;

pub use chunker::{split_by_headings, ChunkConfig, Chunker, Section};
pub use error::{IngestError, IngestResult};
pub use frontmatter::{split_frontmatter, FrontmatterParseError, FrontmatterSplit};
pub use ingestor::{IngestReport, Ingestor};
pub use parser::{parse_note, parse_note_with_report, title_from_path, NoteParse};
pub use reader::{VaultFile, VaultReader};
pub use tags::extract_tags;
