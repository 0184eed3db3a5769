use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use vaultgate_engine::{
    LineMatch, MatchSource, MatchSpan, ScanOptions, SearchQuery, SimpleSearch, Vault, scan_vault,
    simple_match,
};

use crate::error::{ApiError, ErrorCode};

const DEFAULT_CONTEXT_LENGTH: usize = 100;

/// One simple-search result file with its context matches.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimpleSearchResultItem {
    pub filename: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    pub matches: Vec<SimpleSearchMatch>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimpleSearchMatch {
    #[serde(rename = "match")]
    pub range: MatchRange,
    pub source: MatchSource,
    pub context: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchRange {
    pub start: usize,
    pub end: usize,
}

impl From<MatchSpan> for SimpleSearchMatch {
    fn from(span: MatchSpan) -> Self {
        Self {
            range: MatchRange {
                start: span.start,
                end: span.end,
            },
            source: span.source,
            context: span.context,
        }
    }
}

/// Simple search across every markdown file in the vault.
///
/// Each file's filename and content are matched in one pass by the injected
/// fuzzy matcher; results are sorted ascending by score, matching the
/// historical response ordering.
pub fn search_simple(
    vault: &dyn Vault,
    matcher: &dyn SimpleSearch,
    query: Option<&str>,
    context_length: Option<usize>,
) -> Result<Vec<SimpleSearchResultItem>, ApiError> {
    let query = query
        .filter(|q| !q.is_empty())
        .ok_or_else(|| ApiError::from_code(ErrorCode::MissingQueryParameter))?;
    let context_length = context_length.unwrap_or(DEFAULT_CONTEXT_LENGTH);

    let search = matcher.prepare(query);
    let mut results = Vec::new();
    for file in vault.list_markdown_files()? {
        let content = vault.read(&file)?;
        if let Some((score, spans)) = simple_match(file.as_str(), &content, &*search, context_length)
        {
            results.push(SimpleSearchResultItem {
                filename: file.to_string(),
                score: Some(score),
                matches: spans.into_iter().map(SimpleSearchMatch::from).collect(),
            });
        }
    }

    results.sort_by(|a, b| a.score.partial_cmp(&b.score).unwrap_or(Ordering::Equal));
    Ok(results)
}

/// Body of a full-text search request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FullTextSearchRequest {
    pub query: Option<String>,
    pub path: Option<String>,
    pub file_extension: Option<String>,
    pub case_sensitive: bool,
    pub use_regex: bool,
    pub context_length: Option<usize>,
}

/// One full-text result file; matches carry 1-indexed line numbers and
/// snippet-relative highlight offsets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FullTextResultItem {
    pub filename: String,
    pub matches: Vec<LineMatch>,
}

/// Full-text (literal or regex) search over a filtered candidate file set.
pub fn search_fulltext(
    vault: &dyn Vault,
    request: &FullTextSearchRequest,
) -> Result<Vec<FullTextResultItem>, ApiError> {
    let pattern = request
        .query
        .as_deref()
        .filter(|q| !q.is_empty())
        .ok_or_else(|| ApiError::from_code(ErrorCode::MissingQueryParameter))?;

    let query = SearchQuery {
        pattern: pattern.to_string(),
        is_regex: request.use_regex,
        case_sensitive: request.case_sensitive,
        context_length: request.context_length.unwrap_or(DEFAULT_CONTEXT_LENGTH),
    };
    let options = ScanOptions {
        path: request.path.clone().filter(|p| !p.is_empty()),
        file_extension: request.file_extension.clone(),
    };

    let results = scan_vault(vault, &query, &options)?;
    Ok(results
        .into_iter()
        .map(|file| FullTextResultItem {
            filename: file.path.to_string(),
            matches: file.matches,
        })
        .collect())
}
