//! Slide document parser.
//!
//! A slide file is markdown with an optional YAML header:
//!
//! ```text
//! ---
//! id: loops-1
//! title: For loops
//! type: text
//! ---
//! # Iterating
//!
//! A `for` loop walks any iterator.
//! ```
//!
//! The header must provide `id` and `title`. `type` selects the slide kind
//! and falls back to `text`. The body is trimmed and kept as markdown.

use crate::{Error, Result, Slide, SlideContent, SlideKind};
use serde_yaml::{Mapping, Value};

const DELIMITER: &str = "---";

/// Parse a slide document into a [`Slide`].
///
/// # Errors
///
/// - [`Error::MissingMetadata`] when `id` or `title` is absent or blank
/// - [`Error::Parse`] when the header is unterminated, not YAML, or not a mapping
///
/// ```rust
/// use deck_core::{parse_slide, SlideKind};
///
/// let slide = parse_slide("---\nid: s1\ntitle: Hello\n---\nBody text\n")?;
/// assert_eq!(slide.id, "s1");
/// assert_eq!(slide.kind, SlideKind::Text);
/// assert_eq!(slide.content.as_markdown(), Some("Body text"));
/// # Ok::<(), deck_core::Error>(())
/// ```
pub fn parse_slide(raw: &str) -> Result<Slide> {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let (header, body) = split_front_matter(raw)?;

    let metadata = match header {
        Some(text) if !text.trim().is_empty() => {
            let value: Value = serde_yaml::from_str(text)
                .map_err(|e| Error::Parse(format!("invalid front matter: {e}")))?;
            match value {
                Value::Mapping(map) => map,
                Value::Null => Mapping::new(),
                _ => return Err(Error::Parse("front matter must be a mapping".into())),
            }
        },
        _ => Mapping::new(),
    };

    let id = scalar(&metadata, &["id"]);
    let title = scalar(&metadata, &["title"]);

    let mut missing = Vec::new();
    if id.is_none() {
        missing.push("id");
    }
    if title.is_none() {
        missing.push("title");
    }

    let (Some(id), Some(title)) = (id, title) else {
        return Err(Error::MissingMetadata { fields: missing });
    };

    let kind = scalar(&metadata, &["type"])
        .map(|value| SlideKind::from_header(&value))
        .unwrap_or_default();

    Ok(Slide {
        id,
        title,
        content: SlideContent::markdown(body.trim()),
        kind,
        image_ref: scalar(&metadata, &["image", "imageRef"]),
        video_ref: scalar(&metadata, &["video", "videoRef"]),
    })
}

/// Split a document into its optional header and its body.
///
/// The header exists only when the very first line is `---`; it ends at the
/// next line that is exactly `---`.
fn split_front_matter(input: &str) -> Result<(Option<&str>, &str)> {
    let mut chunks = input.split_inclusive('\n');

    let Some(first) = chunks.next() else {
        return Ok((None, input));
    };
    if first.trim_end_matches(['\n', '\r']) != DELIMITER {
        return Ok((None, input));
    }

    let mut offset = first.len();
    for chunk in chunks {
        if chunk.trim_end_matches(['\n', '\r']) == DELIMITER {
            let header = &input[first.len()..offset];
            let body = &input[offset + chunk.len()..];
            return Ok((Some(header), body));
        }
        offset += chunk.len();
    }

    Err(Error::Parse(
        "unterminated front matter (missing closing '---' line)".into(),
    ))
}

/// First non-blank scalar found under any of `keys`, rendered as a string.
fn scalar(map: &Mapping, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| {
        let text = match map.get(*key)? {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => return None,
        };
        (!text.is_empty()).then_some(text)
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parses_header_and_body() {
        let raw = "---\nid: loops-1\ntitle: For loops\ntype: video\nvideo: https://cdn/loops.mp4\n---\n\n# Iterating\n\nBody.\n\n";
        let slide = parse_slide(raw).unwrap();

        assert_eq!(slide.id, "loops-1");
        assert_eq!(slide.title, "For loops");
        assert_eq!(slide.kind, SlideKind::Video);
        assert_eq!(slide.video_ref.as_deref(), Some("https://cdn/loops.mp4"));
        assert!(slide.image_ref.is_none());
        assert_eq!(slide.content.as_markdown(), Some("# Iterating\n\nBody."));
    }

    #[test]
    fn test_missing_title_is_rejected() {
        let err = parse_slide("---\nid: x\n---\nbody").unwrap_err();
        match err {
            Error::MissingMetadata { fields } => assert_eq!(fields, vec!["title"]),
            other => panic!("expected MissingMetadata, got {other:?}"),
        }
    }

    #[test]
    fn test_id_and_title_default_to_text_kind() {
        let slide = parse_slide("---\nid: x\ntitle: X\n---\nbody").unwrap();
        assert_eq!(slide.kind, SlideKind::Text);
    }

    #[test]
    fn test_unknown_type_falls_back_to_text() {
        let slide = parse_slide("---\nid: x\ntitle: X\ntype: hologram\n---\n").unwrap();
        assert_eq!(slide.kind, SlideKind::Text);
        assert_eq!(slide.content.as_markdown(), Some(""));
    }

    #[test]
    fn test_no_header_reports_both_fields() {
        let err = parse_slide("# Just markdown\n").unwrap_err();
        match err {
            Error::MissingMetadata { fields } => assert_eq!(fields, vec!["id", "title"]),
            other => panic!("expected MissingMetadata, got {other:?}"),
        }
    }

    #[test]
    fn test_blank_values_count_as_missing() {
        let err = parse_slide("---\nid: \"  \"\ntitle: T\n---\n").unwrap_err();
        assert!(matches!(err, Error::MissingMetadata { ref fields } if fields == &["id"]));
    }

    #[test]
    fn test_numeric_id_is_accepted() {
        let slide = parse_slide("---\nid: 7\ntitle: Seven\n---\n").unwrap();
        assert_eq!(slide.id, "7");
    }

    #[test]
    fn test_crlf_and_bom() {
        let raw = "\u{feff}---\r\nid: w\r\ntitle: Windows\r\nimageRef: a.png\r\n---\r\nBody\r\n";
        let slide = parse_slide(raw).unwrap();
        assert_eq!(slide.title, "Windows");
        assert_eq!(slide.image_ref.as_deref(), Some("a.png"));
        assert_eq!(slide.content.as_markdown(), Some("Body"));
    }

    #[test]
    fn test_unterminated_header() {
        let err = parse_slide("---\nid: x\ntitle: X\n").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_header_must_be_mapping() {
        let err = parse_slide("---\n- id\n- title\n---\n").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_body_delimiters_are_kept() {
        let slide = parse_slide("---\nid: x\ntitle: X\n---\nabove\n---\nbelow\n").unwrap();
        assert_eq!(slide.content.as_markdown(), Some("above\n---\nbelow"));
    }

    proptest! {
        #[test]
        fn test_body_is_trimmed(body in "[a-zA-Z0-9 .,\n]{0,200}") {
            let raw = format!("---\nid: p\ntitle: P\n---\n{body}");
            let slide = parse_slide(&raw).unwrap();
            prop_assert_eq!(slide.content.as_markdown(), Some(body.trim()));
        }
    }
}
