//! Note parser: raw file contents to a [`Note`].

use crate::frontmatter::{split_frontmatter, FrontmatterParseError, FrontmatterSplit};
use crate::tags::extract_tags;
use std::path::Path;
use tracing::warn;
use vaultrag_core::{Frontmatter, Note};

/// A parsed note together with any recovered frontmatter failure.
#[derive(Debug)]
pub struct NoteParse {
    pub note: Note,
    /// Set when the frontmatter block was malformed and the whole file became the body.
    pub frontmatter_error: Option<FrontmatterParseError>,
}

/// Parse a note from its raw bytes and vault-relative path.
///
/// Never fails: invalid UTF-8 is replaced, and malformed frontmatter is logged and
/// treated as absent.
pub fn parse_note(raw: &[u8], relative_path: &str) -> Note {
    parse_note_with_report(raw, relative_path).note
}

/// Like [`parse_note`], but hands back the frontmatter error instead of only logging it.
pub fn parse_note_with_report(raw: &[u8], relative_path: &str) -> NoteParse {
    let text = String::from_utf8_lossy(raw);
    let title = title_from_path(relative_path);

    let (frontmatter, content, frontmatter_error) = match split_frontmatter(&text) {
        FrontmatterSplit::Parsed { frontmatter, body } => (frontmatter, body.to_string(), None),
        FrontmatterSplit::Absent | FrontmatterSplit::Unclosed => {
            (Frontmatter::default(), text.to_string(), None)
        }
        FrontmatterSplit::Invalid(err) => {
            warn!("Couldn't parse frontmatter for '{}': {}", relative_path, err);
            (Frontmatter::default(), text.to_string(), Some(err))
        }
    };

    let tags = extract_tags(&frontmatter, &content);
    let note = Note::new(title, relative_path)
        .with_frontmatter(frontmatter)
        .with_tags(tags)
        .with_content(content);

    NoteParse {
        note,
        frontmatter_error,
    }
}

/// File name of `relative_path` without its final extension.
pub fn title_from_path(relative_path: &str) -> String {
    Path::new(relative_path)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
