use crate::headings::HeadingBoundary;

/// Compute the line index at which new content should be spliced into a
/// heading section, suitable for a zero-deletion insert-before.
///
/// `insert_at_start` places content directly under the heading line itself and
/// ignores `collapse_trailing_blank_lines`. Otherwise content lands at the end
/// of the section (`boundary.end`, or end of document for the last section);
/// with `collapse_trailing_blank_lines` set, the position walks back over
/// trailing empty lines so the content sits immediately after the last
/// non-blank line, leaving the blank padding after the insertion.
///
/// The returned index is always within `[0, lines.len()]`.
pub fn splice_position<S: AsRef<str>>(
    lines: &[S],
    boundary: &HeadingBoundary,
    insert_at_start: bool,
    collapse_trailing_blank_lines: bool,
) -> usize {
    let mut position = if insert_at_start {
        boundary.start.line + 1
    } else {
        boundary.end.map(|loc| loc.line).unwrap_or(lines.len())
    };
    position = position.min(lines.len());

    if insert_at_start || !collapse_trailing_blank_lines {
        return position;
    }

    while position > 0 && lines[position - 1].as_ref().is_empty() {
        position -= 1;
    }
    position
}

/// Splice `content` into `text` as a new line at `index`, preserving all
/// existing lines. Multi-line content is inserted verbatim as one block.
pub fn splice_lines(text: &str, index: usize, content: &str) -> String {
    let mut lines: Vec<&str> = text.split('\n').collect();
    let index = index.min(lines.len());
    lines.insert(index, content);
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headings::Loc;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    fn boundary(start: usize, end: Option<usize>) -> HeadingBoundary {
        HeadingBoundary {
            start: Loc::new(start),
            end: end.map(Loc::new),
        }
    }

    #[test]
    fn test_insert_at_start_sits_directly_under_heading() {
        let lines = lines(&["# Heading", "body", ""]);
        let position = splice_position(&lines, &boundary(0, None), true, false);
        assert_eq!(position, 1);
    }

    #[test]
    fn test_insert_at_start_ignores_collapse_flag() {
        let lines = lines(&["# Heading", "", "", "body"]);
        assert_eq!(
            splice_position(&lines, &boundary(0, None), true, true),
            splice_position(&lines, &boundary(0, None), true, false),
        );
    }

    #[test]
    fn test_append_lands_at_section_end() {
        let lines = lines(&["# Heading", "body", "# Next"]);
        let position = splice_position(&lines, &boundary(0, Some(2)), false, false);
        assert_eq!(position, 2);
    }

    #[test]
    fn test_append_to_last_section_lands_at_document_end() {
        let lines = lines(&["# Heading", "body"]);
        let position = splice_position(&lines, &boundary(0, None), false, false);
        assert_eq!(position, 2);
    }

    // Section body ending in k blank lines: collapse places content at
    // end - k, no-collapse at end.
    #[rstest]
    #[case(false, 3)]
    #[case(true, 1)]
    fn test_collapse_trailing_blank_lines(#[case] collapse: bool, #[case] expected: usize) {
        let lines = lines(&["content here", "", "", "# Heading2"]);
        let position = splice_position(&lines, &boundary(0, Some(3)), false, collapse);
        assert_eq!(position, expected);
    }

    #[test]
    fn test_collapse_with_no_blank_padding_is_a_no_op() {
        let lines = lines(&["# Heading", "content", "# Next"]);
        assert_eq!(splice_position(&lines, &boundary(0, Some(2)), false, true), 2);
    }

    #[test]
    fn test_position_clamped_to_line_count() {
        let lines = lines(&["# Heading"]);
        // Heading on the final line: start-insert would point one past the end
        let position = splice_position(&lines, &boundary(0, None), true, false);
        assert_eq!(position, 1);

        let position = splice_position(&lines, &boundary(0, Some(9)), false, false);
        assert_eq!(position, 1);
    }

    #[test]
    fn test_splice_lines_inserts_without_deleting() {
        let spliced = splice_lines("# Heading\nbody", 1, "inserted");
        assert_eq!(spliced, "# Heading\ninserted\nbody");
    }

    #[test]
    fn test_splice_lines_multiline_content_is_one_block() {
        let spliced = splice_lines("a\nb", 1, "x\ny");
        assert_eq!(spliced, "a\nx\ny\nb");
    }

    #[test]
    fn test_repeated_append_preserves_document_order() {
        // Appending N times at the end position keeps content in insertion
        // order with no loss or reordering.
        let mut text = "# Heading\nfirst".to_string();
        for i in 0..3 {
            let lines: Vec<&str> = text.split('\n').collect();
            let position = splice_position(&lines, &boundary(0, None), false, false);
            text = splice_lines(&text, position, &format!("appended-{i}"));
        }
        assert_eq!(
            text,
            "# Heading\nfirst\nappended-0\nappended-1\nappended-2"
        );
    }
}
