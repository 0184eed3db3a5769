use serde::{Deserialize, Serialize};

/// Zero-based line position within a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loc {
    pub line: usize,
}

impl Loc {
    pub fn new(line: usize) -> Self {
        Self { line }
    }
}

/// One heading as reported by the metadata index, in document order.
///
/// `start` and `end` describe the span of the heading's own line(s): for an
/// ATX heading both sit on the same line, for a setext heading `end` sits on
/// the underline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingEntry {
    pub text: String,
    pub level: u8,
    pub start: Loc,
    pub end: Loc,
}

impl HeadingEntry {
    pub fn new(text: impl Into<String>, level: u8, line: usize) -> Self {
        Self {
            text: text.into(),
            level,
            start: Loc::new(line),
            end: Loc::new(line),
        }
    }
}

/// The line range holding a heading section's content.
///
/// `start` is the last line of the matched heading itself (content begins on
/// the following line); `end` is the start of the next heading at the same or
/// shallower level, or `None` when the section runs to the end of the
/// document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadingBoundary {
    pub start: Loc,
    pub end: Option<Loc>,
}

/// Resolve a heading path (shallow-to-deep heading texts) to the boundary of
/// the section it names.
///
/// Matching is suffix-based over the ancestor chain: a cursor stack of the
/// current heading ancestry is maintained while scanning in document order,
/// and a heading matches when the reversed path equals the leading elements of
/// its reversed ancestor chain. A short path can therefore match several
/// sections; the *first* document-order hit wins. That ambiguity is
/// long-standing client-visible behavior and is deliberately kept.
///
/// Levels skipped in the document (e.g. `#` straight to `###`) leave holes in
/// the ancestor chain, and a path element can never match a hole.
///
/// An empty path matches nothing; callers reject it as a missing target before
/// getting here.
pub fn resolve_heading_boundary(
    headings: &[HeadingEntry],
    path: &[String],
) -> Option<HeadingBoundary> {
    if path.is_empty() {
        return None;
    }
    let reversed_path: Vec<&str> = path.iter().rev().map(String::as_str).collect();

    // cursor[level] holds the nearest enclosing heading text at that level;
    // level 0 is never occupied since markdown levels start at 1.
    let mut cursor: [Option<&str>; 7] = [None; 7];

    for (heading_idx, heading) in headings.iter().enumerate() {
        let level = usize::from(heading.level.min(6));
        cursor[level] = Some(heading.text.as_str());
        for slot in cursor.iter_mut().skip(level + 1) {
            *slot = None;
        }

        let reversed_cursor: Vec<Option<&str>> =
            cursor[..=level].iter().rev().copied().collect();

        let matches = reversed_path
            .iter()
            .enumerate()
            .all(|(idx, element)| reversed_cursor.get(idx).copied().flatten() == Some(*element));

        if matches {
            let end = headings[heading_idx + 1..]
                .iter()
                .find(|next| next.level <= heading.level)
                .map(|next| next.start);
            return Some(HeadingBoundary {
                start: heading.end,
                end,
            });
        }
    }

    None
}
