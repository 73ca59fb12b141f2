//! Tag extraction from frontmatter and inline `#tags`.

use regex::Regex;
use std::sync::LazyLock;
use vaultrag_core::{Frontmatter, TagSet};

// `#` directly followed by non-whitespace other than another `#`. Heading markers are
// a run of `#` ending in a space, so neither `# Title` nor `### Title` matches.
static INLINE_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#([^\s#]\S*)").unwrap());

/// Collect the tags of a note: the frontmatter `tags` sequence plus inline body tags.
pub fn extract_tags(frontmatter: &Frontmatter, body: &str) -> TagSet {
    let mut tags = frontmatter_tags(frontmatter);
    tags.extend(
        INLINE_TAG_RE
            .captures_iter(body)
            .filter_map(|cap| cap.get(1))
            .map(|m| m.as_str().to_string()),
    );
    tags
}

/// Tags listed under the frontmatter `tags` key. Anything but a sequence contributes nothing.
fn frontmatter_tags(frontmatter: &Frontmatter) -> TagSet {
    frontmatter
        .get("tags")
        .and_then(|value| value.as_sequence())
        .map(|items| items.iter().filter_map(|item| item.scalar_text()).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use vaultrag_core::FieldValue;

    fn tags_frontmatter(value: FieldValue) -> Frontmatter {
        let mut fm = Frontmatter::new();
        fm.insert("tags", value);
        fm
    }

    #[test]
    fn test_inline_tags() {
        let tags = extract_tags(&Frontmatter::new(), "Some text #learning and #coding here");
        assert!(tags.contains("learning"));
        assert!(tags.contains("coding"));
        assert_eq!(tags.len(), 2);
    }

    #[test]
    fn test_headings_are_not_tags() {
        let body = "# My Note\nSome text #learning\n## Another heading\n###### Deep";
        let tags = extract_tags(&Frontmatter::new(), body);

        assert!(tags.contains("learning"));
        assert!(!tags.contains("My"));
        assert!(!tags.contains("Another"));
        assert!(!tags.contains("Deep"));
        assert_eq!(tags.len(), 1);
    }

    #[test]
    fn test_deep_heading_markers_are_not_tags() {
        let body = "## Another heading\n### Deep\n#### Four\n##### Five\n###### Six";
        assert!(extract_tags(&Frontmatter::new(), body).is_empty());
        assert!(extract_tags(&Frontmatter::new(), "##\n######\n").is_empty());
    }

    #[test]
    fn test_tag_may_contain_hash_after_first_char() {
        let tags = extract_tags(&Frontmatter::new(), "see #c# and ##double");
        assert!(tags.contains("c#"));
        assert!(tags.contains("double"));
        assert_eq!(tags.len(), 2);
    }

    #[test]
    fn test_frontmatter_sequence() {
        let fm = tags_frontmatter(FieldValue::Sequence(vec![
            FieldValue::String("python".into()),
            FieldValue::String("rag".into()),
            FieldValue::Integer(2024),
            FieldValue::Null,
        ]));
        let tags = extract_tags(&fm, "");

        let tags: Vec<&str> = tags.iter().map(String::as_str).collect();
        assert_eq!(tags, vec!["2024", "python", "rag"]);
    }

    #[test]
    fn test_non_sequence_tags_are_ignored() {
        let fm = tags_frontmatter(FieldValue::String("python".into()));
        assert!(extract_tags(&fm, "").is_empty());

        let fm = tags_frontmatter(FieldValue::Null);
        assert!(extract_tags(&fm, "").is_empty());
    }

    #[test]
    fn test_duplicates_collapse_and_case_is_kept() {
        let fm = tags_frontmatter(FieldValue::Sequence(vec![FieldValue::String("rust".into())]));
        let tags = extract_tags(&fm, "#rust #Rust #rust");

        assert_eq!(tags.len(), 2);
        assert!(tags.contains("rust"));
        assert!(tags.contains("Rust"));
    }

    #[test]
    fn test_no_tags() {
        assert!(extract_tags(&Frontmatter::new(), "No tags at all").is_empty());
    }

    #[test]
    fn test_tag_runs_to_whitespace() {
        let tags = extract_tags(&Frontmatter::new(), "#project/alpha\tnext #end");
        assert!(tags.contains("project/alpha"));
        assert!(tags.contains("end"));
    }
}
