//! Search match engine: simple (fuzzy) mode over filename+content, and
//! literal/regex line scanning for full-text search.

mod scanner;

pub use scanner::{FileMatches, ScanOptions, scan_vault, validate_scope_path};

use regex::{Regex, RegexBuilder};
use serde::Serialize;

use crate::vault::VaultError;

/// Separator between filename and content in the simple-search haystack.
///
/// Its length is the seam width used when reclassifying raw match offsets;
/// both sides of that arithmetic must come from this constant.
pub const FILENAME_SEPARATOR: &str = "\n\n";

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("invalid search pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
    #[error("invalid search path '{path}': {reason}")]
    InvalidPath { path: String, reason: &'static str },
    #[error(transparent)]
    Vault(#[from] VaultError),
}

/// One search request, request-scoped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub pattern: String,
    pub is_regex: bool,
    pub case_sensitive: bool,
    pub context_length: usize,
}

/// Which logical string a match came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchSource {
    Filename,
    Content,
}

/// A simple-mode match with offsets relative to the logical source string
/// (never to the internal concatenated buffer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchSpan {
    pub source: MatchSource,
    pub start: usize,
    pub end: usize,
    pub context: String,
}

/// Raw result of the injected fuzzy matcher: a score plus `[start, end)`
/// offset pairs into the searched text.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleSearchHit {
    pub score: f64,
    pub matches: Vec<(usize, usize)>,
}

/// The fuzzy simple-search primitive, injected by the host.
pub trait SimpleSearch {
    /// Prepare a matcher for one query; the returned closure is run once per
    /// candidate text and yields `None` for non-matching text.
    fn prepare<'a>(&'a self, query: &str) -> Box<dyn Fn(&str) -> Option<SimpleSearchHit> + 'a>;
}

/// Run the prepared simple-search matcher over one file.
///
/// Filename and content are joined with [`FILENAME_SEPARATOR`] so a single
/// matcher pass covers both. Raw offsets are then reclassified: pairs ending
/// within the filename report `source=filename` with the whole filename as
/// context; pairs starting past the separator report `source=content` shifted
/// back into content space, with a `context_length`-character window around
/// the match. Pairs straddling the seam are artifacts of the concatenation
/// and are discarded.
pub fn simple_match(
    filename: &str,
    content: &str,
    matcher: &dyn Fn(&str) -> Option<SimpleSearchHit>,
    context_length: usize,
) -> Option<(f64, Vec<MatchSpan>)> {
    let haystack = format!("{filename}{FILENAME_SEPARATOR}{content}");
    let hit = matcher(&haystack)?;

    let seam = filename.len();
    let content_base = seam + FILENAME_SEPARATOR.len();

    let mut spans = Vec::new();
    for (start, end) in hit.matches {
        if end <= seam {
            spans.push(MatchSpan {
                source: MatchSource::Filename,
                start,
                end,
                context: filename.to_string(),
            });
        } else if start >= content_base {
            let start = start - content_base;
            let end = (end - content_base).min(content.len());
            let window_start =
                floor_char_boundary(content, start.saturating_sub(context_length));
            let window_end = ceil_char_boundary(content, end.saturating_add(context_length));
            spans.push(MatchSpan {
                source: MatchSource::Content,
                start,
                end,
                context: content[window_start..window_end].to_string(),
            });
        }
        // else: straddles the separator, not a valid match in either string
    }

    Some((hit.score, spans))
}

/// Compile a query into a regex: literal mode escapes every metacharacter,
/// regex mode takes the pattern verbatim. Matching is case-insensitive unless
/// requested otherwise.
pub fn compile_query(query: &SearchQuery) -> Result<Regex, SearchError> {
    let source = if query.is_regex {
        query.pattern.clone()
    } else {
        regex::escape(&query.pattern)
    };
    RegexBuilder::new(&source)
        .case_insensitive(!query.case_sensitive)
        .build()
        .map_err(SearchError::from)
}

/// A full-text match on one line. `match_start`/`match_end` are offsets
/// within `snippet`, not within the original line: consumers get
/// self-contained windowed text plus the sub-range to highlight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineMatch {
    pub line: usize,
    pub snippet: String,
    #[serde(rename = "matchStart")]
    pub match_start: usize,
    #[serde(rename = "matchEnd")]
    pub match_end: usize,
}

/// Scan content line by line for every match of `pattern`, extracting a
/// context snippet of `context_length` characters either side of each match.
/// Line numbers are 1-indexed.
pub fn scan_lines(content: &str, pattern: &Regex, context_length: usize) -> Vec<LineMatch> {
    let mut matches = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        for found in pattern.find_iter(line) {
            let window_start =
                floor_char_boundary(line, found.start().saturating_sub(context_length));
            let window_end =
                ceil_char_boundary(line, found.end().saturating_add(context_length));
            matches.push(LineMatch {
                line: idx + 1,
                snippet: line[window_start..window_end].to_string(),
                match_start: found.start() - window_start,
                match_end: found.end() - window_start,
            });
        }
    }
    matches
}

fn floor_char_boundary(s: &str, mut index: usize) -> usize {
    index = index.min(s.len());
    while !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}

fn ceil_char_boundary(s: &str, mut index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    while !s.is_char_boundary(index) {
        index += 1;
    }
    index
}
