use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

use crate::headings::{HeadingEntry, Loc};

/// Build the heading index for a note: every heading with its text, level and
/// line span, in document order.
///
/// This is the engine's stand-in for the host metadata cache. Headings inside
/// fenced code blocks don't register (they aren't headings to the parser), and
/// a YAML frontmatter block at the top of the note is skipped rather than
/// misread as a setext underline.
pub fn heading_index(content: &str) -> Vec<HeadingEntry> {
    let line_starts = line_start_offsets(content);
    let line_of = |byte: usize| {
        line_starts
            .partition_point(|&start| start <= byte)
            .saturating_sub(1)
    };

    let parser = Parser::new_ext(content, Options::ENABLE_YAML_STYLE_METADATA_BLOCKS);

    let mut headings = Vec::new();
    let mut current: Option<(u8, std::ops::Range<usize>, String)> = None;

    for (event, range) in parser.into_offset_iter() {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                current = Some((level as u8, range, String::new()));
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some((_, _, buffer)) = current.as_mut() {
                    buffer.push_str(&text);
                }
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some((level, span, text)) = current.take() {
                    headings.push(HeadingEntry {
                        text: text.trim().to_string(),
                        level,
                        start: Loc::new(line_of(span.start)),
                        end: Loc::new(line_of(span.end.saturating_sub(1))),
                    });
                }
            }
            _ => {}
        }
    }

    headings
}

fn line_start_offsets(content: &str) -> Vec<usize> {
    let mut starts = vec![0];
    for (offset, byte) in content.bytes().enumerate() {
        if byte == b'\n' {
            starts.push(offset + 1);
        }
    }
    starts
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_atx_headings_with_lines_and_levels() {
        let content = "# Top\n\nbody\n\n## Nested\n\nmore";
        let headings = heading_index(content);

        assert_eq!(
            headings,
            vec![
                HeadingEntry::new("Top", 1, 0),
                HeadingEntry::new("Nested", 2, 4),
            ]
        );
    }

    #[test]
    fn test_inline_markup_flattened_to_plain_text() {
        let headings = heading_index("## **Bold** and `code` title\n");
        assert_eq!(headings[0].text, "Bold and code title");
    }

    #[test]
    fn test_headings_in_code_fences_ignored() {
        let content = "# Real\n\n```\n# Not a heading\n```\n";
        let headings = heading_index(content);
        assert_eq!(headings.len(), 1);
        assert_eq!(headings[0].text, "Real");
    }

    #[test]
    fn test_frontmatter_not_misread_as_setext() {
        let content = "---\ntitle: note\n---\n\n# First\n";
        let headings = heading_index(content);
        assert_eq!(headings, vec![HeadingEntry::new("First", 1, 4)]);
    }

    #[test]
    fn test_setext_heading_ends_on_underline() {
        let content = "Title\n=====\n\nbody\n";
        let headings = heading_index(content);
        assert_eq!(headings.len(), 1);
        assert_eq!(headings[0].level, 1);
        assert_eq!(headings[0].start, Loc::new(0));
        assert_eq!(headings[0].end, Loc::new(1));
    }

    #[test]
    fn test_empty_document_has_no_headings() {
        assert!(heading_index("").is_empty());
        assert!(heading_index("just a paragraph\n").is_empty());
    }
}
